// ==========================================
// Zuidplas Logistics - Data-Quality Warnings
// ==========================================
// Data-quality issues never fail the pipeline: they resolve to a
// documented default and are returned with the result.
// ==========================================

use crate::domain::types::CartType;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// Location id missing from the location table; rows went to the default route
    #[serde(rename_all = "camelCase")]
    UnmappedLocation {
        location_id: Option<i64>,
        rows: usize,
        fallback_route: String,
    },

    /// Fust type absent from the capacity table; the default capacity was used
    #[serde(rename_all = "camelCase")]
    UnknownFustType {
        route: String,
        cart_type: CartType,
        fust_type: String,
        default_capacity: u32,
    },

    /// Rows without a fust-type property
    #[serde(rename_all = "camelCase")]
    MissingFustType { rows: usize, default_fust_type: String },

    /// Customer name not found in any customer table
    #[serde(rename_all = "camelCase")]
    UnmatchedCustomer { customer_name: String, rows: usize },

    /// Evening row whose route has no evening variant
    #[serde(rename_all = "camelCase")]
    NoEveningVariant { route: String, rows: usize },
}

impl PipelineWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineWarning::UnmappedLocation { .. } => "unmapped_location",
            PipelineWarning::UnknownFustType { .. } => "unknown_fust_type",
            PipelineWarning::MissingFustType { .. } => "missing_fust_type",
            PipelineWarning::UnmatchedCustomer { .. } => "unmatched_customer",
            PipelineWarning::NoEveningVariant { .. } => "no_evening_variant",
        }
    }

    /// Log at warn level and hand the warning back.
    pub fn emit(self) -> Self {
        warn!(kind = self.kind(), "{}", self);
        self
    }
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::UnmappedLocation {
                location_id,
                rows,
                fallback_route,
            } => match location_id {
                Some(id) => write!(
                    f,
                    "location {} is not mapped to a route; {} row(s) assigned to '{}'",
                    id, rows, fallback_route
                ),
                None => write!(
                    f,
                    "{} row(s) without location assigned to '{}'",
                    rows, fallback_route
                ),
            },
            PipelineWarning::UnknownFustType {
                route,
                cart_type,
                fust_type,
                default_capacity,
            } => write!(
                f,
                "unknown fust type '{}' on {} carts for route '{}'; using default capacity {}",
                fust_type, cart_type, route, default_capacity
            ),
            PipelineWarning::MissingFustType {
                rows,
                default_fust_type,
            } => write!(
                f,
                "{} row(s) without fust type; assumed '{}'",
                rows, default_fust_type
            ),
            PipelineWarning::UnmatchedCustomer { customer_name, rows } => write!(
                f,
                "customer '{}' ({} row(s)) is not in any customer table",
                customer_name, rows
            ),
            PipelineWarning::NoEveningVariant { route, rows } => write!(
                f,
                "route '{}' has no evening variant; {} evening row(s) kept on it",
                route, rows
            ),
        }
    }
}
