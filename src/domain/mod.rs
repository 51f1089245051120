// ==========================================
// Zuidplas Logistics - Domain Layer
// ==========================================
// Responsibility: entities and value types of the cart pipeline
// Contains no configuration lookups and no engine logic
// ==========================================

pub mod allocation;
pub mod cart;
pub mod order;
pub mod route;
pub mod types;

pub use allocation::{
    AllocationOption, AllocationStrategy, CapacityConstraint, Feasibility, TruckAssignment,
    TruckLoad,
};
pub use cart::{CartResult, FustBreakdown, FustBucket, RouteCartBreakdown, RouteCartTotals};
pub use order::OrderRow;
pub use route::RouteDefinition;
pub use types::{CartType, FeasibilityStatus, LifecycleState, Period, RejectionReason, TruckKind};
