// ==========================================
// Zuidplas Logistics - Engine Layer
// ==========================================
// Responsibility: business rules of the cart pipeline
// Rule: data-quality issues resolve to defaults and surface as warnings,
// never as errors
// ==========================================

pub mod allocation;
pub mod cache;
pub mod capacity;
pub mod cart_calculator;
pub mod classifier;
pub mod customer_matcher;
pub mod diagnostics;
pub mod fust_aggregator;
pub mod orchestrator;
pub mod warnings;

// Re-export the engines
pub use allocation::{AllocationEngine, SlotEvaluation};
pub use cache::{content_key, CartResultCache};
pub use capacity::CapacityEvaluator;
pub use cart_calculator::{CartCalculation, CartCalculator};
pub use classifier::{
    BundlesPerFust, BundlesSource, Classification, ClassifiedRow, RouteAssignment, RouteClassifier,
};
pub use customer_matcher::{normalize_name, CustomerMatch, CustomerMatcher};
pub use diagnostics::{CustomerCount, DiagnosticsReport, OrderStatistics, RejectionSummary};
pub use fust_aggregator::FustAggregator;
pub use orchestrator::{LogisticsPipeline, PipelineOptions, PipelineReport};
pub use warnings::PipelineWarning;
