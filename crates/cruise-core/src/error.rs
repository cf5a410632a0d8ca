//! Error types for cruise optimization.
//!
//! Only setup can fail. Once a [`crate::Cruise`] has accepted its model,
//! parameters and budgets, the sweep itself is total: infeasible candidates
//! are pruned and an empty final layer is reported through
//! [`crate::SweepOutcome::Infeasible`] rather than an error.

/// Errors raised while validating a cost model, parameters or budgets.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CruiseError {
    /// Cost model arrays disagree on their dimensions or hold non-finite values.
    #[error("invalid cost model: {0}")]
    InvalidModel(String),

    /// Sweep parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No initial budget was supplied.
    #[error("at least one initial (energy, time) budget is required")]
    EmptyBudgets,

    /// An initial budget is not strictly positive and finite.
    #[error("initial budget {index} is not positive: energy={energy}, time={time}")]
    InvalidBudget {
        /// Position of the offending budget.
        index: usize,
        energy: f64,
        time: f64,
    },

    /// A backreference does not resolve inside the retained layers.
    #[error("state {position} in layer {layer} has no valid predecessor")]
    BrokenBackreference { layer: usize, position: usize },

    /// A cost model could not be parsed from JSON.
    #[error("cost model json: {0}")]
    Json(#[from] serde_json::Error),
}

impl CruiseError {
    /// Creates an invalid model error with the given message.
    #[must_use]
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel(message.into())
    }

    /// Creates an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CruiseError>;
