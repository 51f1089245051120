// ==========================================
// Zuidplas Logistics - Allocation Domain Model
// ==========================================
// TruckLoad: cart mix on one truck (or a fleet of identical trucks)
// AllocationOption: one named truck-assignment strategy with score
// ==========================================

use crate::domain::types::{FeasibilityStatus, TruckKind};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// TruckLoad - evaluated cart mix
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckLoad {
    pub standard_carts: u32,
    pub danish_carts: u32,
    pub equivalent_standard: u32, // standard + ceil(danish / ratio)
    pub effective_capacity: u32,  // nominal, or reduced above the Danish threshold
    pub capacity_reduced: bool,
    pub status: FeasibilityStatus,
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
pub trait CapacityConstraint {
    /// Equivalent carts above capacity (0 when it fits)
    fn overflow_carts(&self) -> u32;

    fn is_overflow(&self) -> bool {
        self.overflow_carts() > 0
    }

    /// Load factor in percent
    fn utilization_pct(&self) -> f64;
}

impl CapacityConstraint for TruckLoad {
    fn overflow_carts(&self) -> u32 {
        self.equivalent_standard.saturating_sub(self.effective_capacity)
    }

    fn utilization_pct(&self) -> f64 {
        if self.effective_capacity == 0 {
            return 0.0;
        }
        self.equivalent_standard as f64 / self.effective_capacity as f64 * 100.0
    }
}

// ==========================================
// Allocation strategies
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    Standard,
    NeighborTruck,
    OverflowCarrier,
    ExternalTruck,
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::Standard => write!(f, "standard"),
            AllocationStrategy::NeighborTruck => write!(f, "neighbor_truck"),
            AllocationStrategy::OverflowCarrier => write!(f, "overflow_carrier"),
            AllocationStrategy::ExternalTruck => write!(f, "external_truck"),
        }
    }
}

// ==========================================
// TruckAssignment - one route slot in an option
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckAssignment {
    pub slot: usize,
    pub route: String,
    pub route_name: String,
    pub departure: String,
    pub truck_id: String,
    pub truck_kind: TruckKind,
    pub truck_count: u32,
    pub load: TruckLoad,
    pub external_carrier_carts: u32, // equivalent carts handed to a carrier
    pub cost: f64,
    #[serde(default)]
    pub requires_action: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

// ==========================================
// AllocationOption
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feasibility {
    pub fits: bool,
    pub status: FeasibilityStatus,
    pub overflow_carts: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub strategy: AllocationStrategy,
    pub assignments: Vec<TruckAssignment>,
    pub cost: f64,
    pub feasibility: Feasibility,
    pub recommended: bool,
    #[serde(default)]
    pub requires_action: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub score: u32,
}

impl AllocationOption {
    pub fn assignment_for(&self, route: &str) -> Option<&TruckAssignment> {
        self.assignments.iter().find(|a| a.route == route)
    }
}
