// ==========================================
// Zuidplas Logistics - Domain Type Definitions
// ==========================================
// Shared enums used across importer, engine and export layers.
// Wire format: snake_case (matches the dashboard JSON contract)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Lifecycle State
// ==========================================
// Only Active rows are eligible for cart calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Active,
    Cancelled,
    Deleted,
}

impl LifecycleState {
    pub fn is_active(&self) -> bool {
        matches!(self, LifecycleState::Active)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Active => write!(f, "active"),
            LifecycleState::Cancelled => write!(f, "cancelled"),
            LifecycleState::Deleted => write!(f, "deleted"),
        }
    }
}

// ==========================================
// Rejection Reason
// ==========================================
// Declaration order == check order (first match wins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    NoAssembly,
    NoBundles,
    NoLocation,
    NoCustomer,
    Cancelled,
    TestData,
    Contract,
}

impl RejectionReason {
    /// All reasons in check order.
    pub const ALL: [RejectionReason; 7] = [
        RejectionReason::NoAssembly,
        RejectionReason::NoBundles,
        RejectionReason::NoLocation,
        RejectionReason::NoCustomer,
        RejectionReason::Cancelled,
        RejectionReason::TestData,
        RejectionReason::Contract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::NoAssembly => "no_assembly",
            RejectionReason::NoBundles => "no_bundles",
            RejectionReason::NoLocation => "no_location",
            RejectionReason::NoCustomer => "no_customer",
            RejectionReason::Cancelled => "cancelled",
            RejectionReason::TestData => "test_data",
            RejectionReason::Contract => "contract",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Cart Type
// ==========================================
// Danish carts: smaller, 2 Danish = 1 standard-equivalent on a truck
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartType {
    #[default]
    Standard,
    Danish,
}

impl fmt::Display for CartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartType::Standard => write!(f, "standard"),
            CartType::Danish => write!(f, "danish"),
        }
    }
}

// ==========================================
// Delivery Period
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    #[default]
    Morning,
    Evening,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Morning => write!(f, "morning"),
            Period::Evening => write!(f, "evening"),
        }
    }
}

// ==========================================
// Feasibility Status
// ==========================================
// Ordered by severity: Fits < Tight < Overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityStatus {
    Fits,
    Tight,
    Overflow,
}

impl fmt::Display for FeasibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityStatus::Fits => write!(f, "fits"),
            FeasibilityStatus::Tight => write!(f, "tight"),
            FeasibilityStatus::Overflow => write!(f, "overflow"),
        }
    }
}

// ==========================================
// Truck Kind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckKind {
    Own,
    Neighbor,
    External,
}

impl fmt::Display for TruckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruckKind::Own => write!(f, "own"),
            TruckKind::Neighbor => write!(f, "neighbor"),
            TruckKind::External => write!(f, "external"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reason_order_is_check_order() {
        let mut sorted = RejectionReason::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, RejectionReason::ALL.to_vec());
        assert_eq!(RejectionReason::NoAssembly.to_string(), "no_assembly");
    }

    #[test]
    fn test_feasibility_severity_order() {
        assert!(FeasibilityStatus::Fits < FeasibilityStatus::Tight);
        assert!(FeasibilityStatus::Tight < FeasibilityStatus::Overflow);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&RejectionReason::TestData).unwrap();
        assert_eq!(json, "\"test_data\"");
        let state: LifecycleState = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(state, LifecycleState::Cancelled);
    }
}
