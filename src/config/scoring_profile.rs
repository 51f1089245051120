use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Weights used to score allocation options against each other.
///
/// Every field is optional in the config file; missing values keep the
/// defaults of the dispatch desk (base 100, cost weight 30, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringProfile {
    /// Starting score of every option
    pub base_score: f64,

    /// Points lost per "one cheapest-option cost" above the cheapest option
    pub cost_weight: f64,

    /// Bonus when no assignment overflows
    pub feasible_bonus: f64,

    /// Penalty when at least one assignment overflows
    pub overflow_penalty: f64,

    /// Bonus for options their strategy marks as recommended
    pub recommended_bonus: f64,

    /// Penalty for options that need a manual confirmation (e.g. calling the neighbour)
    pub manual_action_penalty: f64,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            cost_weight: 30.0,
            feasible_bonus: 30.0,
            overflow_penalty: 20.0,
            recommended_bonus: 20.0,
            manual_action_penalty: 10.0,
        }
    }
}

impl ScoringProfile {
    pub fn validate(&self) -> ConfigResult<()> {
        let fields = [
            ("baseScore", self.base_score),
            ("costWeight", self.cost_weight),
            ("feasibleBonus", self.feasible_bonus),
            ("overflowPenalty", self.overflow_penalty),
            ("recommendedBonus", self.recommended_bonus),
            ("manualActionPenalty", self.manual_action_penalty),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidScoringWeight {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let profile: ScoringProfile = serde_json::from_str(r#"{ "costWeight": 10 }"#).unwrap();
        assert_eq!(profile.cost_weight, 10.0);
        assert_eq!(profile.base_score, 100.0);
        assert_eq!(profile.manual_action_penalty, 10.0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let profile = ScoringProfile {
            overflow_penalty: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidScoringWeight { ref field, .. }) if field == "overflowPenalty"
        ));
    }
}
