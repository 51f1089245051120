// ==========================================
// Zuidplas Logistics - Cart Domain Model
// ==========================================
// FustBucket: per-calculation accumulator (route, cart type, fust type)
// CartResult: per-route cart counts + truck count
// ==========================================

use crate::domain::types::CartType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// FustBucket - accumulated fractional fust
// ==========================================
// Lives for one calculation pass only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FustBucket {
    pub route: String,
    pub cart_type: CartType,
    pub fust_type: String,
    pub total_fust: f64,
    pub row_count: usize,
}

// ==========================================
// CartResult and its breakdown
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FustBreakdown {
    pub fust_type: String,
    pub cart_type: CartType,
    pub total_fust: f64,
    pub capacity: u32,
    pub carts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCartBreakdown {
    pub route: String,
    pub carts: u32,
    pub standard_carts: u32,
    pub danish_carts: u32,
    pub fust_breakdown: Vec<FustBreakdown>,
}

impl RouteCartBreakdown {
    pub fn totals(&self) -> RouteCartTotals {
        RouteCartTotals {
            standard: self.standard_carts,
            danish: self.danish_carts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CartResult {
    pub total: u32,
    pub trucks: u32,
    pub by_route: BTreeMap<String, u32>,
    pub breakdown: Vec<RouteCartBreakdown>,
}

impl CartResult {
    pub fn route(&self, route: &str) -> Option<&RouteCartBreakdown> {
        self.breakdown.iter().find(|b| b.route == route)
    }

    /// Standard/Danish split per route, the input of the allocation engine.
    pub fn route_totals(&self) -> BTreeMap<String, RouteCartTotals> {
        self.breakdown
            .iter()
            .map(|b| (b.route.clone(), b.totals()))
            .collect()
    }
}

// ==========================================
// RouteCartTotals - cart mix of one route
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RouteCartTotals {
    pub standard: u32,
    pub danish: u32,
}

impl RouteCartTotals {
    pub fn new(standard: u32, danish: u32) -> Self {
        Self { standard, danish }
    }

    pub fn total(&self) -> u32 {
        self.standard.saturating_add(self.danish)
    }
}
