// ==========================================
// Zuidplas Logistics - Order Row Domain Model
// ==========================================
// One product line of a customer order, in canonical shape.
// Produced by the importer's FieldMapper from heterogeneous ERP rows.
// ==========================================

use crate::domain::types::LifecycleState;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderRow - canonical order row
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    // ===== Identity =====
    pub order_id: Option<String>,
    pub row_id: Option<String>,

    // ===== Customer / destination =====
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub delivery_location_id: Option<i64>,
    pub delivery_time: Option<NaiveTime>,

    // ===== Quantities =====
    pub assembly_amount: f64,              // bundles in this row
    pub bundles_per_fust_hint: Option<f64>, // bundles_per_fust as sent by the ERP
    pub stems_per_bundle: Option<f64>,      // property L11
    pub stems_per_container: Option<f64>,   // property L13
    pub base_product_count: Option<f64>,    // nr_base_product (stems per container)

    // ===== Container =====
    pub fust_type_code: Option<String>, // property 901

    // ===== Status =====
    pub lifecycle_state: LifecycleState,
    pub is_contract: bool,

    // ===== Meta =====
    pub row_number: usize, // position in the input payload
}

impl OrderRow {
    /// Identifier used in logs and reports: row id, then order id, then position.
    pub fn display_ref(&self) -> String {
        self.row_id
            .clone()
            .or_else(|| self.order_id.clone())
            .unwrap_or_else(|| format!("#{}", self.row_number))
    }

    /// Identifier used for duplicate detection (row id preferred over order id).
    pub fn identity_ref(&self) -> Option<&str> {
        self.row_id.as_deref().or(self.order_id.as_deref())
    }

    /// True when any bundles-per-fust source is present: a positive hint,
    /// an L11/L13 pair, or a positive base-product count.
    pub fn has_bundle_source(&self) -> bool {
        let positive = |v: Option<f64>| v.map_or(false, |x| x > 0.0);
        positive(self.bundles_per_fust_hint)
            || (self.stems_per_bundle.is_some() && self.stems_per_container.is_some())
            || positive(self.base_product_count)
    }
}
