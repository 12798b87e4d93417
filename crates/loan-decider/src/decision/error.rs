/// Failures raised while evaluating a single application.
///
/// A rejection is not an error: these cover inputs the calculation cannot be run on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecisionError {
    #[error("{field} has unknown value '{value}'")]
    InvalidEnumeration { field: &'static str, value: String },
    #[error("{field} is not a usable amount (found {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("credit rating {0} is not defined by the lending policy")]
    UndefinedRating(i32),
    #[error("lending policy has no {table} entry for '{key}'")]
    MissingPolicyEntry { table: &'static str, key: String },
}

impl DecisionError {
    pub(crate) fn invalid_enumeration(field: &'static str, value: &str) -> Self {
        Self::InvalidEnumeration {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_amount(field: &'static str, value: f64) -> Self {
        Self::InvalidAmount { field, value }
    }
}

/// Problems found while loading or validating a lending policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("lending policy is missing {table} entry for '{key}'")]
    MissingEntry { table: &'static str, key: String },
    #[error("lending policy {table} entry '{key}' has invalid value {value}")]
    InvalidValue {
        table: &'static str,
        key: String,
        value: f64,
    },
    #[error("failed to read lending policy: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse lending policy: {0}")]
    Parse(#[from] serde_json::Error),
}
