use crate::config::ScoringProfile;
use crate::domain::allocation::AllocationOption;

/// Score of one option relative to the cheapest option of the set.
///
/// score = base - (cost / min_cost * w - w)
///       + feasible bonus | - overflow penalty
///       + recommended bonus
///       - manual action penalty
///
/// clamped to 0..=100 and rounded.
pub(super) fn score_option(option: &AllocationOption, min_cost: f64, profile: &ScoringProfile) -> u32 {
    let mut score = profile.base_score;

    if min_cost > 0.0 {
        let relative = option.cost / min_cost;
        score -= relative * profile.cost_weight - profile.cost_weight;
    }

    if option.feasibility.fits {
        score += profile.feasible_bonus;
    } else {
        score -= profile.overflow_penalty;
    }

    if option.recommended {
        score += profile.recommended_bonus;
    }
    if option.requires_action.is_some() {
        score -= profile.manual_action_penalty;
    }

    score.round().clamp(0.0, 100.0) as u32
}

pub(super) fn score_options(options: &mut [AllocationOption], profile: &ScoringProfile) {
    let min_cost = options
        .iter()
        .map(|o| o.cost)
        .fold(f64::INFINITY, f64::min);
    let min_cost = if min_cost.is_finite() { min_cost } else { 0.0 };

    for option in options.iter_mut() {
        option.score = score_option(option, min_cost, profile);
    }
}

/// Descending by score; `sort_by` is stable so ties keep generation order.
pub(super) fn rank_options(options: &mut [AllocationOption]) {
    options.sort_by(|a, b| b.score.cmp(&a.score));
}
