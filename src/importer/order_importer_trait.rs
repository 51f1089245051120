// ==========================================
// Zuidplas Logistics - Importer Traits
// ==========================================
// Interfaces of the normalise and validate stages (no implementation)
// ==========================================

use crate::domain::order::OrderRow;
use crate::importer::order_validator::ValidationReport;
use serde_json::Value;

// ==========================================
// FieldMapper Trait
// ==========================================
// Implementor: importer::field_mapper::FieldMapper
pub trait FieldMapper: Send + Sync {
    /// Map one raw ERP record onto the canonical OrderRow.
    ///
    /// # Arguments
    /// - raw: record of unspecified shape (flat, nested `order.*`, property list)
    /// - row_number: 1-based position in the payload
    ///
    /// Missing fields resolve to defaults; this never fails.
    fn map_row(&self, raw: &Value, row_number: usize) -> OrderRow;

    fn map_rows(&self, raw: &[Value]) -> Vec<OrderRow> {
        raw.iter()
            .enumerate()
            .map(|(index, record)| self.map_row(record, index + 1))
            .collect()
    }
}

// ==========================================
// OrderValidator Trait
// ==========================================
// Implementor: importer::order_validator::OrderValidator
pub trait OrderValidator: Send + Sync {
    /// Split rows into valid and rejected, then drop duplicates.
    ///
    /// # Returns
    /// - ValidationReport with per-reason counts and the duplicate count
    fn validate(&self, rows: Vec<OrderRow>) -> ValidationReport;
}
