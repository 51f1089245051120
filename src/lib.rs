// ==========================================
// Zuidplas Logistics - Core Library
// ==========================================
// Order rows from the ERP -> fust -> carts -> trucks,
// plus ranked truck-allocation options for the day plan.
// Pure, synchronous computation; the ERP fetch and the
// dashboard rendering live outside this crate.
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Configuration layer - business tables
pub mod config;

// Import layer - normalisation and validation
pub mod importer;

// Engine layer - classification, carts, allocation
pub mod engine;

// Export layer - CSV reports
pub mod export;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use config::{ConfigError, LogisticsConfig, ScoringProfile};

pub use domain::{
    AllocationOption, AllocationStrategy, CartResult, CartType, FeasibilityStatus, OrderRow,
    RejectionReason, RouteDefinition, TruckKind,
};

pub use engine::{
    AllocationEngine, CartCalculator, CartResultCache, FustAggregator, LogisticsPipeline,
    PipelineOptions, PipelineReport, PipelineWarning, RouteClassifier,
};

pub use importer::{ImportError, ValidationReport};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Zuidplas Logistics";
