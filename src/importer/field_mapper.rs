// ==========================================
// Zuidplas Logistics - Field Mapper
// ==========================================
// Raw ERP record -> canonical OrderRow
// Each canonical field has an ordered list of candidate paths;
// the first non-empty candidate wins.
// ==========================================

use crate::domain::order::OrderRow;
use crate::domain::types::LifecycleState;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::order_importer_trait::FieldMapper as FieldMapperTrait;
use serde_json::Value;

// ==========================================
// Field vocabulary
// ==========================================

/// Where a candidate value lives in a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// Top-level key of the row
    Flat(&'static str),
    /// Key of the nested `order` object
    Nested(&'static str),
    /// Entry of the `properties` list, by property code
    Property(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    OrderId,
    RowId,
    CustomerId,
    CustomerName,
    DeliveryLocationId,
    DeliveryTime,
    AssemblyAmount,
    BundlesPerFust,
    StemsPerBundle,
    StemsPerContainer,
    BaseProductCount,
    FustType,
    RowState,
    OrderState,
    DeletedAt,
    OrderTypes,
    OrderType,
}

pub const FUST_TYPE_PROPERTY: &str = "901";
pub const STEMS_PER_BUNDLE_PROPERTY: &str = "L11";
pub const STEMS_PER_CONTAINER_PROPERTY: &str = "L13";

/// Order `type` value used by the ERP for standing (contract) orders.
pub const CONTRACT_ORDER_TYPE: i64 = 32768;

/// Lifecycle states that make a row ineligible (matched as substrings).
pub const CANCELLED_STATES: &[&str] = &[
    "cancelled",
    "deleted",
    "void",
    "geannuleerd",
    "annuleer",
    "afgezegd",
    "afgewezen",
    "rejected",
    "refunded",
    "terugbetaald",
    "inactive",
    "inactief",
];

impl CanonicalField {
    /// Candidate paths in probe order.
    pub fn paths(&self) -> &'static [FieldPath] {
        use FieldPath::*;
        match self {
            CanonicalField::OrderId => &[Flat("order_id"), Flat("orderId"), Nested("id"), Nested("order_id")],
            CanonicalField::RowId => &[Flat("id"), Flat("orderrow_id"), Flat("row_id"), Flat("rowId")],
            CanonicalField::CustomerId => &[Flat("customer_id"), Flat("customerId"), Nested("customer_id")],
            CanonicalField::CustomerName => &[
                Flat("customer_name"),
                Flat("customerName"),
                Flat("customer"),
                Nested("customer_name"),
                Nested("contact_name"),
            ],
            CanonicalField::DeliveryLocationId => &[
                Flat("delivery_location_id"),
                Flat("deliveryLocationId"),
                Nested("delivery_location_id"),
            ],
            CanonicalField::DeliveryTime => &[Flat("delivery_time"), Flat("deliveryTime"), Nested("delivery_time")],
            CanonicalField::AssemblyAmount => &[Flat("assembly_amount"), Flat("assemblyAmount")],
            CanonicalField::BundlesPerFust => &[
                Flat("bundles_per_fust"),
                Flat("bundlesPerFust"),
                Flat("bundlesPerFustHint"),
            ],
            CanonicalField::StemsPerBundle => &[Property(STEMS_PER_BUNDLE_PROPERTY), Flat("stemsPerBundle")],
            CanonicalField::StemsPerContainer => &[Property(STEMS_PER_CONTAINER_PROPERTY), Flat("stemsPerContainer")],
            CanonicalField::BaseProductCount => &[Flat("nr_base_product"), Flat("baseProductCount")],
            CanonicalField::FustType => &[Property(FUST_TYPE_PROPERTY), Flat("fustTypeCode"), Flat("fust_type")],
            CanonicalField::RowState => &[Flat("state"), Flat("status"), Flat("lifecycleState")],
            CanonicalField::OrderState => &[Nested("state"), Nested("status")],
            CanonicalField::DeletedAt => &[Nested("deleted_at")],
            CanonicalField::OrderTypes => &[Nested("types")],
            CanonicalField::OrderType => &[Nested("type")],
        }
    }
}

// ==========================================
// FieldMapper
// ==========================================
pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self { cleaner: DataCleaner }
    }

    /// First non-empty candidate value of a canonical field.
    pub fn probe<'a>(&self, raw: &'a Value, field: CanonicalField) -> Option<&'a Value> {
        field
            .paths()
            .iter()
            .filter_map(|path| self.resolve(raw, *path))
            .find(|value| !self.cleaner.is_blank(value))
    }

    fn resolve<'a>(&self, raw: &'a Value, path: FieldPath) -> Option<&'a Value> {
        match path {
            FieldPath::Flat(key) => raw.get(key),
            FieldPath::Nested(key) => raw.get("order").and_then(|order| order.get(key)),
            FieldPath::Property(code) => self.property(raw, code),
        }
    }

    /// `properties: [{ code, value | pivot.value }]`
    fn property<'a>(&self, raw: &'a Value, code: &str) -> Option<&'a Value> {
        let entry = raw
            .get("properties")?
            .as_array()?
            .iter()
            .find(|p| p.get("code").and_then(|c| self.cleaner.text(c)).as_deref() == Some(code))?;

        entry
            .get("value")
            .filter(|v| !self.cleaner.is_blank(v))
            .or_else(|| entry.get("pivot").and_then(|pivot| pivot.get("value")))
    }

    fn text(&self, raw: &Value, field: CanonicalField) -> Option<String> {
        self.probe(raw, field).and_then(|v| self.cleaner.text(v))
    }

    fn number(&self, raw: &Value, field: CanonicalField) -> Option<f64> {
        self.probe(raw, field).and_then(|v| self.cleaner.number(v))
    }

    // ==========================================
    // Status derivation
    // ==========================================

    fn lifecycle_state(&self, raw: &Value) -> LifecycleState {
        if self.probe(raw, CanonicalField::DeletedAt).is_some() {
            return LifecycleState::Deleted;
        }

        for field in [CanonicalField::RowState, CanonicalField::OrderState] {
            if let Some(state) = self.text(raw, field) {
                let state = state.to_lowercase();
                if CANCELLED_STATES.iter().any(|c| state.contains(c)) {
                    return if state.contains("deleted") {
                        LifecycleState::Deleted
                    } else {
                        LifecycleState::Cancelled
                    };
                }
            }
        }
        LifecycleState::Active
    }

    fn is_contract(&self, raw: &Value) -> bool {
        let tagged = match self.probe(raw, CanonicalField::OrderTypes) {
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(|t| self.cleaner.text(t))
                .any(|t| t.eq_ignore_ascii_case("CONTRACT")),
            Some(other) => self
                .cleaner
                .text(other)
                .map_or(false, |t| t.to_uppercase().contains("CONTRACT")),
            None => false,
        };

        tagged
            || self
                .probe(raw, CanonicalField::OrderType)
                .and_then(|t| self.cleaner.integer(t))
                == Some(CONTRACT_ORDER_TYPE)
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_row(&self, raw: &Value, row_number: usize) -> OrderRow {
        OrderRow {
            // Identity
            order_id: self.text(raw, CanonicalField::OrderId),
            row_id: self.text(raw, CanonicalField::RowId),

            // Customer / destination
            customer_id: self.text(raw, CanonicalField::CustomerId),
            customer_name: self.text(raw, CanonicalField::CustomerName).unwrap_or_default(),
            delivery_location_id: self
                .probe(raw, CanonicalField::DeliveryLocationId)
                .and_then(|v| self.cleaner.integer(v)),
            delivery_time: self
                .probe(raw, CanonicalField::DeliveryTime)
                .and_then(|v| self.cleaner.time_of_day(v)),

            // Quantities
            assembly_amount: self.number(raw, CanonicalField::AssemblyAmount).unwrap_or(0.0),
            bundles_per_fust_hint: self.number(raw, CanonicalField::BundlesPerFust),
            stems_per_bundle: self.number(raw, CanonicalField::StemsPerBundle),
            stems_per_container: self.number(raw, CanonicalField::StemsPerContainer),
            base_product_count: self.number(raw, CanonicalField::BaseProductCount),

            // Container
            fust_type_code: self.text(raw, CanonicalField::FustType),

            // Status
            lifecycle_state: self.lifecycle_state(raw),
            is_contract: self.is_contract(raw),

            row_number,
        }
    }
}
