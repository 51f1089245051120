use super::core::SlotEvaluation;
use crate::config::LogisticsConfig;
use crate::domain::allocation::{
    AllocationOption, AllocationStrategy, CapacityConstraint, Feasibility, TruckAssignment,
};
use crate::domain::types::{FeasibilityStatus, TruckKind};
use crate::engine::capacity::CapacityEvaluator;

pub(super) const NEIGHBOR_TRUCK_ID: &str = "neighbor-truck";
pub(super) const EXTERNAL_TRUCK_ID: &str = "external-truck";
pub(super) const CALL_NEIGHBOR: &str = "Call neighbor to confirm availability";

pub(super) struct StrategyContext<'a> {
    pub slots: &'a [SlotEvaluation],
    pub config: &'a LogisticsConfig,
    pub capacity: &'a CapacityEvaluator,
}

/// Generation order is the tie-break order of the ranking.
pub(super) fn generate_options(ctx: &StrategyContext<'_>) -> Vec<AllocationOption> {
    let mut options = vec![standard(ctx)];

    if let Some(option) = neighbor(ctx) {
        options.push(option);
    }
    for slot in ctx.slots.iter().filter(|s| s.overflows()) {
        options.push(overflow_carrier(ctx, slot));
        options.push(external_truck(ctx, slot));
    }
    options
}

// ==========================================
// Strategies
// ==========================================

/// Every slot on its own truck.
pub(super) fn standard(ctx: &StrategyContext<'_>) -> AllocationOption {
    let assignments = own_assignments(ctx, None);
    let feasibility = feasibility(&assignments);
    let fits = feasibility.fits;

    AllocationOption {
        id: "default".to_string(),
        name: "Standard Allocation".to_string(),
        description: format!("All routes on own trucks ({})", truck_plan(&assignments)),
        strategy: AllocationStrategy::Standard,
        cost: total_cost(&assignments),
        assignments,
        feasibility,
        recommended: fits,
        requires_action: None,
        pros: strings(&["Uses own trucks", "Lowest cost", "Efficient truck utilization"]),
        cons: strings(&["Tight timing if Route 1 delayed", "No buffer for delays"]),
        score: 0,
    }
}

/// Neighbour's truck takes its slot; only offered when nothing overflows.
pub(super) fn neighbor(ctx: &StrategyContext<'_>) -> Option<AllocationOption> {
    let index = ctx.config.neighbor_slot?;
    if ctx.slots.iter().any(|s| s.overflows()) {
        return None;
    }
    let neighbor_slot = ctx.slots.iter().find(|s| s.index == index)?;

    let assignments: Vec<TruckAssignment> = own_assignments(ctx, Some(index))
        .into_iter()
        .map(|assignment| {
            if assignment.slot != index {
                return assignment;
            }
            TruckAssignment {
                truck_id: NEIGHBOR_TRUCK_ID.to_string(),
                truck_kind: TruckKind::Neighbor,
                cost: ctx.config.costs.neighbor_truck,
                requires_action: Some(CALL_NEIGHBOR.to_string()),
                note: None,
                ..assignment
            }
        })
        .collect();

    Some(AllocationOption {
        id: "neighbor".to_string(),
        name: "Neighbor's Truck".to_string(),
        description: format!(
            "Use neighbor's truck for Route {} ({}), own trucks for the other routes",
            neighbor_slot.route.id, neighbor_slot.route.name
        ),
        strategy: AllocationStrategy::NeighborTruck,
        cost: total_cost(&assignments),
        feasibility: feasibility(&assignments),
        assignments,
        recommended: false,
        requires_action: Some(CALL_NEIGHBOR.to_string()),
        pros: strings(&["Free truck", "Reliable partner", "Lowest total cost"]),
        cons: strings(&["Depends on availability", "Requires manual confirmation"]),
        score: 0,
    })
}

/// Own truck loads its effective capacity, the rest goes by carrier.
pub(super) fn overflow_carrier(ctx: &StrategyContext<'_>, target: &SlotEvaluation) -> AllocationOption {
    let overflow = target.load.overflow_carts();
    let carrier_cost = overflow as f64 * ctx.config.costs.carrier_per_cart;

    let assignments: Vec<TruckAssignment> = own_assignments(ctx, None)
        .into_iter()
        .map(|assignment| {
            if assignment.slot != target.index {
                return assignment;
            }
            TruckAssignment {
                external_carrier_carts: overflow,
                cost: assignment.cost + carrier_cost,
                note: Some(format!("{} cart(s) via external carrier", overflow)),
                ..assignment
            }
        })
        .collect();

    AllocationOption {
        id: format!("overflow_carrier_{}", target.route.key),
        name: "Overflow via External Carrier".to_string(),
        description: format!(
            "Route {} ({}): {} carts via external carrier, rest in own truck",
            target.route.id, target.route.name, overflow
        ),
        strategy: AllocationStrategy::OverflowCarrier,
        cost: total_cost(&assignments),
        feasibility: feasibility(&assignments),
        assignments,
        recommended: true,
        requires_action: None,
        pros: strings(&["Minimal extra cost", "Uses own trucks efficiently", "Guaranteed capacity"]),
        cons: strings(&["Requires external carrier booking", "Split delivery for overflow route"]),
        score: 0,
    }
}

/// The whole route on external truck(s).
pub(super) fn external_truck(ctx: &StrategyContext<'_>, target: &SlotEvaluation) -> AllocationOption {
    let trucks = ctx.capacity.trucks_needed(target.totals);
    let fleet = ctx.capacity.evaluate_fleet(target.totals, trucks);

    let assignments: Vec<TruckAssignment> = own_assignments(ctx, Some(target.index))
        .into_iter()
        .map(|assignment| {
            if assignment.slot != target.index {
                return assignment;
            }
            TruckAssignment {
                truck_id: EXTERNAL_TRUCK_ID.to_string(),
                truck_kind: TruckKind::External,
                truck_count: trucks,
                load: fleet,
                cost: ctx.config.costs.external_truck_per_trip * trucks as f64,
                note: None,
                ..assignment
            }
        })
        .collect();

    AllocationOption {
        id: format!("overflow_truck_{}", target.route.key),
        name: format!("External Truck for Route {}", target.route.id),
        description: format!(
            "Use external truck for entire Route {} ({})",
            target.route.id, target.route.name
        ),
        strategy: AllocationStrategy::ExternalTruck,
        cost: total_cost(&assignments),
        feasibility: feasibility(&assignments),
        assignments,
        recommended: false,
        requires_action: None,
        pros: strings(&["Simple solution", "Guaranteed capacity", "No split delivery"]),
        cons: strings(&["Higher cost", "External dependency"]),
        score: 0,
    }
}

// ==========================================
// Helpers
// ==========================================

/// Own-truck assignment per slot. A slot whose truck already drove an
/// earlier slot gets a "returns from" note; `skip_truck_of` excludes a
/// slot from that bookkeeping (its truck is replaced).
fn own_assignments(ctx: &StrategyContext<'_>, skip_truck_of: Option<usize>) -> Vec<TruckAssignment> {
    let mut last_route_of_truck: Vec<(&str, u32)> = Vec::new();

    ctx.slots
        .iter()
        .map(|slot| {
            let truck_id = slot.slot.truck_id.as_str();
            let note = last_route_of_truck
                .iter()
                .rev()
                .find(|(truck, _)| *truck == truck_id)
                .map(|(truck, route_id)| format!("{} returns from Route {}", truck, route_id));
            if skip_truck_of != Some(slot.index) {
                last_route_of_truck.push((truck_id, slot.route.id));
            }

            TruckAssignment {
                slot: slot.index,
                route: slot.route.key.clone(),
                route_name: slot.route.name.clone(),
                departure: slot.route.departure_label(),
                truck_id: truck_id.to_string(),
                truck_kind: TruckKind::Own,
                truck_count: 1,
                load: slot.load,
                external_carrier_carts: 0,
                cost: ctx.config.costs.own_truck_per_route,
                requires_action: None,
                note,
            }
        })
        .collect()
}

/// Overflow left after carrier hand-off.
fn unresolved_overflow(assignment: &TruckAssignment) -> u32 {
    assignment
        .load
        .overflow_carts()
        .saturating_sub(assignment.external_carrier_carts)
}

fn assignment_status(assignment: &TruckAssignment) -> FeasibilityStatus {
    if unresolved_overflow(assignment) > 0 {
        FeasibilityStatus::Overflow
    } else if assignment.external_carrier_carts > 0 {
        // own truck loaded to capacity
        FeasibilityStatus::Tight
    } else {
        assignment.load.status
    }
}

pub(super) fn feasibility(assignments: &[TruckAssignment]) -> Feasibility {
    let status = assignments
        .iter()
        .map(assignment_status)
        .max()
        .unwrap_or(FeasibilityStatus::Fits);
    let overflow_carts = assignments
        .iter()
        .fold(0u32, |sum, a| sum.saturating_add(unresolved_overflow(a)));
    let carrier_carts = assignments
        .iter()
        .fold(0u32, |sum, a| sum.saturating_add(a.external_carrier_carts));

    let names = |wanted: FeasibilityStatus| -> String {
        assignments
            .iter()
            .filter(|a| assignment_status(a) == wanted)
            .map(|a| a.route_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let message = match status {
        FeasibilityStatus::Overflow => {
            format!("{} cart(s) over capacity on {}", overflow_carts, names(FeasibilityStatus::Overflow))
        }
        _ if carrier_carts > 0 => {
            format!("{} overflow cart(s) handled via external carrier", carrier_carts)
        }
        FeasibilityStatus::Tight => format!(
            "All routes fit within capacity; {} at or above the tight threshold",
            names(FeasibilityStatus::Tight)
        ),
        FeasibilityStatus::Fits => "All routes fit within capacity".to_string(),
    };

    Feasibility {
        fits: overflow_carts == 0,
        status,
        overflow_carts,
        message,
    }
}

fn total_cost(assignments: &[TruckAssignment]) -> f64 {
    assignments.iter().map(|a| a.cost).sum()
}

fn truck_plan(assignments: &[TruckAssignment]) -> String {
    assignments
        .iter()
        .map(|a| format!("{} {} {}", a.truck_id, a.departure, a.route_name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
