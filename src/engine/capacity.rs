// ==========================================
// Zuidplas Logistics - Truck Capacity Rule
// ==========================================
// equivalent = standard + ceil(danish / ratio)
// capacity   = reduced if danish > threshold, else nominal (step, not slope)
// status     = overflow if equivalent > capacity,
//              tight if utilisation >= tight threshold, else fits
// ==========================================

use crate::config::TruckCapacityRule;
use crate::domain::allocation::{CapacityConstraint, TruckLoad};
use crate::domain::cart::RouteCartTotals;
use crate::domain::types::FeasibilityStatus;

pub struct CapacityEvaluator {
    rule: TruckCapacityRule,
}

impl CapacityEvaluator {
    pub fn new(rule: TruckCapacityRule) -> Self {
        Self { rule }
    }

    pub fn equivalent_standard(&self, standard: u32, danish: u32) -> u32 {
        standard.saturating_add(danish.div_ceil(self.rule.danish_ratio.max(1)))
    }

    /// Capacity of one truck carrying `danish` Danish carts; flag set when reduced.
    pub fn effective_capacity(&self, danish: u32) -> (u32, bool) {
        if danish > self.rule.danish_threshold {
            (self.rule.reduced_capacity, true)
        } else {
            (self.rule.max_standard, false)
        }
    }

    pub fn status(&self, load: &TruckLoad) -> FeasibilityStatus {
        if load.is_overflow() {
            FeasibilityStatus::Overflow
        } else if load.effective_capacity > 0
            && load.utilization_pct() >= self.rule.tight_utilization * 100.0
        {
            FeasibilityStatus::Tight
        } else {
            FeasibilityStatus::Fits
        }
    }

    /// One truck carrying the whole route.
    pub fn evaluate(&self, totals: RouteCartTotals) -> TruckLoad {
        self.evaluate_fleet(totals, 1)
    }

    /// `trucks` identical trucks sharing the route; Danish carts are spread
    /// evenly, so each truck carries ceil(danish / trucks) of them.
    pub fn evaluate_fleet(&self, totals: RouteCartTotals, trucks: u32) -> TruckLoad {
        let trucks = trucks.max(1);
        let equivalent = self.equivalent_standard(totals.standard, totals.danish);
        let (per_truck, reduced) = self.effective_capacity(totals.danish.div_ceil(trucks));

        let mut load = TruckLoad {
            standard_carts: totals.standard,
            danish_carts: totals.danish,
            equivalent_standard: equivalent,
            effective_capacity: per_truck.saturating_mul(trucks),
            capacity_reduced: reduced,
            status: FeasibilityStatus::Fits,
        };
        load.status = self.status(&load);
        load
    }

    /// Fewest trucks whose fleet holds the route, starting at
    /// ceil(equivalent / nominal). The Danish step-down can push it higher;
    /// ceil(equivalent / reduced) always fits.
    pub fn trucks_needed(&self, totals: RouteCartTotals) -> u32 {
        let equivalent = self.equivalent_standard(totals.standard, totals.danish);
        let nominal = equivalent.div_ceil(self.rule.max_standard.max(1)).max(1);
        let worst = equivalent
            .div_ceil(self.rule.reduced_capacity.min(self.rule.max_standard).max(1))
            .max(nominal);

        (nominal..=worst)
            .find(|&trucks| !self.evaluate_fleet(totals, trucks).is_overflow())
            .unwrap_or(worst)
    }
}
