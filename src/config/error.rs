// ==========================================
// Zuidplas Logistics - Configuration Errors
// ==========================================
// Misconfiguration is a programmer error: fail fast, never default
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== Loading =====
    #[error("config file read failed ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("config parse failed: {0}")]
    ParseError(#[from] serde_json::Error),

    // ===== Capacity tables =====
    #[error("fust capacity table '{table}' is empty")]
    EmptyCapacityTable { table: String },

    #[error("capacity must be > 0 (table '{table}', fust type '{fust_type}')")]
    NonPositiveCapacity { table: String, fust_type: String },

    // ===== Truck rules =====
    #[error("truck rule '{field}' is invalid: {message}")]
    InvalidTruckRule { field: String, message: String },

    #[error("cost '{field}' must be a finite, non-negative amount (got {value})")]
    InvalidCost { field: String, value: f64 },

    #[error("bundle rule '{field}' must be > 0 (got {value})")]
    InvalidBundleRule { field: String, value: f64 },

    // ===== Routes =====
    #[error("no routes configured")]
    NoRoutes,

    #[error("duplicate route key: {0}")]
    DuplicateRoute(String),

    #[error("{context} references unknown route '{route}'")]
    UnknownRoute { context: String, route: String },

    #[error("allocation plan is invalid: {0}")]
    InvalidAllocationPlan(String),

    // ===== Scoring =====
    #[error("scoring weight '{field}' must be finite and >= 0 (got {value})")]
    InvalidScoringWeight { field: String, value: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
