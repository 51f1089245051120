// ==========================================
// Zuidplas Logistics - Configuration Layer
// ==========================================
// Responsibility: fixed business tables (routes, capacities, costs,
// scoring weights, customer names), JSON loading, fail-fast validation
// ==========================================

pub mod error;
pub mod logistics_config;
pub mod scoring_profile;

pub use error::{ConfigError, ConfigResult};
pub use logistics_config::{
    AllocationSlot, CostTable, CustomerRouteList, CustomerTables, FustRules, LogisticsConfig,
    TruckCapacityRule,
};
pub use scoring_profile::ScoringProfile;
