use super::scoring::{rank_options, score_options};
use super::strategies::{generate_options, StrategyContext};
use crate::config::{AllocationSlot, LogisticsConfig};
use crate::domain::allocation::{AllocationOption, CapacityConstraint, TruckLoad};
use crate::domain::cart::RouteCartTotals;
use crate::domain::route::RouteDefinition;
use crate::engine::capacity::CapacityEvaluator;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// SlotEvaluation - one departure of the day plan, checked
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEvaluation {
    pub index: usize,
    pub slot: AllocationSlot,
    pub route: RouteDefinition,
    pub totals: RouteCartTotals,
    pub load: TruckLoad, // the whole route on a single truck
}

impl SlotEvaluation {
    pub fn overflows(&self) -> bool {
        self.load.is_overflow()
    }
}

// ==========================================
// AllocationEngine
// ==========================================
pub struct AllocationEngine {
    config: Arc<LogisticsConfig>,
    capacity: CapacityEvaluator,
}

impl AllocationEngine {
    pub fn new(config: Arc<LogisticsConfig>) -> Self {
        Self {
            capacity: CapacityEvaluator::new(config.truck.clone()),
            config,
        }
    }

    pub fn capacity(&self) -> &CapacityEvaluator {
        &self.capacity
    }

    /// Capacity check of every configured slot; routes without carts count as empty.
    pub fn evaluate_slots(&self, totals: &BTreeMap<String, RouteCartTotals>) -> Vec<SlotEvaluation> {
        self.config
            .allocation_slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let route = self.config.route(&slot.route)?.clone();
                let route_totals = totals.get(&slot.route).copied().unwrap_or_default();
                let load = self.capacity.evaluate(route_totals);
                debug!(
                    route = %slot.route,
                    standard = route_totals.standard,
                    danish = route_totals.danish,
                    equivalent = load.equivalent_standard,
                    capacity = load.effective_capacity,
                    status = %load.status,
                    "slot evaluated"
                );
                Some(SlotEvaluation {
                    index,
                    slot: slot.clone(),
                    route,
                    totals: route_totals,
                    load,
                })
            })
            .collect()
    }

    /// Generate, score (against the whole set) and rank the options.
    #[instrument(skip(self, totals), fields(routes = totals.len()))]
    pub fn generate_options(&self, totals: &BTreeMap<String, RouteCartTotals>) -> Vec<AllocationOption> {
        let slots = self.evaluate_slots(totals);
        let ctx = StrategyContext {
            slots: &slots,
            config: &self.config,
            capacity: &self.capacity,
        };

        let mut options = generate_options(&ctx);
        score_options(&mut options, &self.config.scoring);
        rank_options(&mut options);

        info!(
            options = options.len(),
            overflowing_slots = slots.iter().filter(|s| s.overflows()).count(),
            best = options.first().map(|o| o.id.as_str()).unwrap_or("-"),
            "allocation options generated"
        );
        options
    }
}
