//! End-to-end sweep tests.
//!
//! Small hand-built models pin exact numbers; seeded random models check the
//! structural guarantees of every retained layer.

use cruise_core::{
    dominates, CostModel, CostModelSpec, CostRandom, Cruise, CruiseError, CruiseParameters,
    StateKey, SweepOutcome,
};
use std::collections::HashMap;

fn flat_model(n_d: usize, n_h: usize, n_s: usize, cruise: f64) -> CostModel {
    CostModel::new(CostModelSpec {
        timings: (0..n_s).map(|s| 2.0 - 0.2 * s as f64).collect(),
        speed_cost: (0..n_s).map(|s| 0.5 * s as f64).collect(),
        cruise_cost: vec![vec![cruise; n_h]; n_d],
        climb_cost: vec![vec![1.0; n_h]; n_d],
        descend_gain: vec![vec![0.5; n_h]; n_d],
        height_gain: 0.2,
        weight_cost: 0.0,
        n_h: None,
    })
    .unwrap()
}

fn params(backoff: usize, pareto_max: usize) -> CruiseParameters {
    CruiseParameters {
        backoff,
        pareto_max,
    }
}

fn random_cruise(seed: u64, backoff: usize, pareto_max: usize) -> Cruise {
    let model = CostRandom::new()
        .n_d(15)
        .n_h(4)
        .n_s(3)
        .seed(seed)
        .build()
        .unwrap();
    Cruise::new(model, params(backoff, pareto_max)).unwrap()
}

#[test]
fn single_step_single_state() {
    let model = CostModel::new(CostModelSpec {
        timings: vec![1.0],
        speed_cost: vec![0.0],
        cruise_cost: vec![vec![10.0]],
        climb_cost: vec![vec![0.0]],
        descend_gain: vec![vec![0.0]],
        height_gain: 0.0,
        weight_cost: 0.0,
        n_h: None,
    })
    .unwrap();
    let cruise = Cruise::new(model, CruiseParameters::default()).unwrap();

    let outcome = cruise.compute_single(100.0, 100.0).unwrap();
    let trajectories = outcome.trajectories().expect("feasible");
    assert_eq!(trajectories.len(), 1);

    let path = trajectories.states(0).unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!((path[0].energy, path[0].time), (100.0, 100.0));
    assert_eq!((path[1].energy, path[1].time), (90.0, 99.0));

    let (energy, time) = trajectories.front();
    assert_eq!(energy, vec![90.0]);
    assert_eq!(time, vec![99.0]);
}

#[test]
fn single_point_buckets_leave_one_trajectory() {
    let cruise = Cruise::new(flat_model(6, 1, 1, 3.0), params(2, 1)).unwrap();
    let outcome = cruise
        .compute(&[(100.0, 50.0), (50.0, 100.0), (75.0, 75.0)])
        .unwrap();
    let trajectories = outcome.trajectories().expect("feasible");
    assert_eq!(trajectories.len(), 1);
    // the bucket keeps its highest-energy point
    assert_eq!(trajectories.states(0).unwrap()[0].energy, 100.0);
}

#[test]
fn zero_backoff_never_locks_speed() {
    let cruise = Cruise::new(flat_model(5, 2, 2, 3.0), params(0, 50)).unwrap();
    let sweep = cruise.sweep(&[(100.0, 100.0)]).unwrap();
    for layer in &sweep.layers()[1..] {
        assert!(layer.states().iter().all(|state| state.key.backoff == 0));
        for speed in 0..2 {
            assert!(layer.states().iter().any(|state| state.key.speed == speed));
        }
    }
    // any state, including one that just changed speed, may change again
    let layer = &sweep.layers()[2];
    let previous = &sweep.layers()[1];
    let flipped_twice = layer.states().iter().any(|state| {
        let parent = &previous.states()[state.parent.unwrap()];
        // seed speed is 0
        parent.key.speed != 0 && state.key.speed != parent.key.speed
    });
    assert!(flipped_twice);
}

#[test]
fn lockout_rearms_after_speed_change() {
    let cruise = Cruise::new(flat_model(4, 1, 2, 3.0), params(3, 50)).unwrap();
    let sweep = cruise.sweep(&[(100.0, 100.0)]).unwrap();
    let first = &sweep.layers()[1];
    for state in first.states() {
        let expected = if state.key.speed == 1 { 3 } else { 0 };
        assert_eq!(state.key.backoff, expected);
    }
    let third = &sweep.layers()[3];
    assert!(third
        .states()
        .iter()
        .any(|state| state.key == StateKey::new(0, 1, 1)));
}

#[test]
fn exhausted_budget_is_infeasible_not_an_error() {
    let cruise = Cruise::new(flat_model(3, 2, 2, 10.0), CruiseParameters::default()).unwrap();
    let outcome = cruise.compute_single(5.0, 100.0).unwrap();
    assert_eq!(outcome, SweepOutcome::Infeasible);
    assert!(!outcome.is_feasible());
    assert!(outcome.into_trajectories().is_none());
}

#[test]
fn exhausted_time_is_infeasible() {
    let cruise = Cruise::new(flat_model(3, 1, 1, 1.0), CruiseParameters::default()).unwrap();
    // two time units per waypoint
    let outcome = cruise.compute_single(1000.0, 6.0).unwrap();
    assert_eq!(outcome, SweepOutcome::Infeasible);
    let outcome = cruise.compute_single(1000.0, 6.5).unwrap();
    assert!(outcome.is_feasible());
}

#[test]
fn invalid_inputs_fail_before_sweeping() {
    let mut spec: CostModelSpec = flat_model(3, 2, 2, 1.0).into();
    spec.climb_cost.pop();
    assert!(matches!(
        CostModel::new(spec),
        Err(CruiseError::InvalidModel(_))
    ));

    let cruise = Cruise::new(flat_model(3, 2, 2, 1.0), CruiseParameters::default()).unwrap();
    assert!(matches!(cruise.compute(&[]), Err(CruiseError::EmptyBudgets)));
}

#[test]
fn final_front_is_not_sampled() {
    // one state per (speed) bucket survives each waypoint, yet every speed
    // yields a distinct trade-off at the end
    let cruise = Cruise::new(flat_model(3, 1, 3, 3.0), params(0, 1)).unwrap();
    let sweep = cruise.sweep(&[(100.0, 100.0)]).unwrap();
    let last = sweep.layers().last().unwrap();
    assert_eq!(last.len(), 3);
    assert_eq!(sweep.endpoints().len(), 3);

    let trajectories = sweep.into_outcome().unwrap().into_trajectories().unwrap();
    assert_eq!(trajectories.len(), 3);
    assert!(trajectories.len() > cruise.parameters().pareto_max);
}

#[test]
fn retained_states_are_feasible_and_traceable() {
    for seed in 0..4 {
        let cruise = random_cruise(seed, 2, 4);
        let sweep = cruise.sweep(&[(26_000.0, 26_000.0)]).unwrap();
        let layers = sweep.layers();
        assert_eq!(layers.len(), 16);

        for (i, layer) in layers.iter().enumerate() {
            for state in layer.states() {
                assert!(state.energy > 0.0 && state.time > 0.0);
                if i == 0 {
                    assert!(state.parent.is_none());
                    continue;
                }
                let parent = state.parent.expect("backreference");
                let previous = &layers[i - 1];
                assert!(parent < previous.len());
                let pred = previous.states()[parent];
                if pred.key.backoff > 0 {
                    assert_eq!(state.key.speed, pred.key.speed);
                    assert_eq!(state.key.backoff, pred.key.backoff - 1);
                }
                assert!(state.key.height.abs_diff(pred.key.height) <= 1);
            }
        }
    }
}

#[test]
fn buckets_are_bounded_and_non_dominated() {
    let pareto_max = 3;
    let cruise = random_cruise(11, 2, pareto_max);
    let sweep = cruise.sweep(&[(26_000.0, 26_000.0), (25_000.0, 27_000.0)]).unwrap();
    for layer in &sweep.layers()[1..] {
        let mut buckets: HashMap<StateKey, Vec<(f64, f64)>> = HashMap::new();
        for state in layer.states() {
            buckets
                .entry(state.key)
                .or_default()
                .push((state.energy, state.time));
        }
        for points in buckets.values() {
            assert!(points.len() <= pareto_max);
            for a in points {
                for b in points {
                    assert!(!dominates(*a, *b));
                }
            }
        }
    }
}

#[test]
fn trajectories_span_every_waypoint_in_front_order() {
    let cruise = random_cruise(5, 3, 5);
    let outcome = cruise.compute_single(26_000.0, 26_000.0).unwrap();
    let trajectories = outcome.trajectories().expect("feasible");
    assert!(!trajectories.is_empty());
    assert_eq!(trajectories.n_d(), 15);

    for path in trajectories.iter() {
        assert_eq!(path.len(), 16);
        assert_eq!((path[0].height, path[0].speed), (0, 0));
        assert_eq!((path[0].energy, path[0].time), (26_000.0, 26_000.0));
        for pair in path.windows(2) {
            assert!(pair[1].time < pair[0].time);
        }
    }

    let (energy, time) = trajectories.front();
    for i in 1..energy.len() {
        assert!(energy[i] < energy[i - 1]);
        assert!(time[i] > time[i - 1]);
    }
    for a in energy.iter().zip(&time) {
        for b in energy.iter().zip(&time) {
            assert!(!dominates((*a.0, *a.1), (*b.0, *b.1)));
        }
    }

    let profile = trajectories.profile(0).unwrap();
    assert_eq!(profile.energy[0], 1.0);
    assert_eq!(profile.time[0], 1.0);
    assert!(profile.height.iter().all(|h| (0.0..1.0).contains(h)));
    assert!(profile.speed.iter().all(|s| (0.0..1.0).contains(s)));
}

#[test]
fn repeated_runs_are_identical() {
    let cruise = random_cruise(9, 2, 4);
    let budgets = [(26_000.0, 26_000.0), (24_000.0, 28_000.0)];
    let first = cruise.compute(&budgets).unwrap();
    let second = cruise.compute(&budgets).unwrap();
    assert_eq!(first, second);

    let rebuilt = random_cruise(9, 2, 4);
    assert_eq!(rebuilt.compute(&budgets).unwrap(), first);
}
