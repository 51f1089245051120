// ==========================================
// Zuidplas Logistics - Route Domain Model
// ==========================================
// Routes are static configuration (auction hubs with a departure time).
// Each morning route may point at an evening variant.
// ==========================================

use crate::domain::types::Period;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ==========================================
// RouteDefinition
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDefinition {
    pub key: String,  // e.g. "rijnsburg", "aalsmeer_evening"
    pub id: u32,      // display number (Route 1, Route 2, ...)
    pub name: String, // e.g. "Rijnsburg (Avond)"
    pub hub: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub evening_variant: Option<String>,
}

impl RouteDefinition {
    pub fn new(key: &str, id: u32, name: &str, hub: &str, departure: (u32, u32), period: Period) -> Self {
        Self {
            key: key.to_string(),
            id,
            name: name.to_string(),
            hub: hub.to_string(),
            departure_time: NaiveTime::from_hms_opt(departure.0, departure.1, 0)
                .unwrap_or(NaiveTime::MIN),
            period,
            evening_variant: None,
        }
    }

    pub fn with_evening_variant(mut self, key: &str) -> Self {
        self.evening_variant = Some(key.to_string());
        self
    }

    /// Departure formatted as HH:MM
    pub fn departure_label(&self) -> String {
        self.departure_time.format("%H:%M").to_string()
    }
}

/// Serde adapter for "HH:MM" (also accepts "HH:MM:SS").
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time (expected HH:MM): {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        let trimmed = raw.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
            .ok()
    }
}
