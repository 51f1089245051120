// ==========================================
// Zuidplas Logistics - Order Validator
// ==========================================
// Rejection checks, first match wins:
// no_assembly -> no_bundles -> no_location -> no_customer
// -> cancelled -> test_data -> contract
// Surviving rows are deduplicated on
// (row/order id, customer id, location id, assembly amount).
// ==========================================

use crate::domain::order::OrderRow;
use crate::domain::types::RejectionReason;
use crate::importer::order_importer_trait::OrderValidator as OrderValidatorTrait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// ValidationReport
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub row: OrderRow,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub total: usize,
    pub valid: Vec<OrderRow>,
    pub rejected: Vec<Rejection>,
    /// Every reason is present, zero when unused
    pub reason_counts: BTreeMap<RejectionReason, usize>,
    pub duplicates: Vec<OrderRow>,
    pub duplicate_count: usize,
}

impl ValidationReport {
    pub fn count(&self, reason: RejectionReason) -> usize {
        self.reason_counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// No input rows at all (as opposed to rows that were all rejected).
    pub fn is_empty_input(&self) -> bool {
        self.total == 0
    }

    pub fn all_rejected(&self) -> bool {
        self.total > 0 && self.valid.is_empty()
    }
}

// ==========================================
// OrderValidator
// ==========================================
pub struct OrderValidator {
    test_patterns: Vec<String>, // lower-case substrings of test customer names
}

impl Default for OrderValidator {
    fn default() -> Self {
        Self::new(vec!["test".to_string(), "demo".to_string()])
    }
}

impl OrderValidator {
    pub fn new(test_patterns: Vec<String>) -> Self {
        Self {
            test_patterns: test_patterns.into_iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// First failing check, or None for a valid row.
    pub fn check_row(&self, row: &OrderRow) -> Option<RejectionReason> {
        if row.assembly_amount <= 0.0 {
            return Some(RejectionReason::NoAssembly);
        }
        if !row.has_bundle_source() {
            return Some(RejectionReason::NoBundles);
        }
        // id 0 is the ERP's placeholder for "not set"
        if matches!(row.delivery_location_id, None | Some(0)) {
            return Some(RejectionReason::NoLocation);
        }
        if matches!(row.customer_id.as_deref(), None | Some("0")) {
            return Some(RejectionReason::NoCustomer);
        }
        if !row.lifecycle_state.is_active() {
            return Some(RejectionReason::Cancelled);
        }
        if self.is_test_customer(&row.customer_name) {
            return Some(RejectionReason::TestData);
        }
        if row.is_contract {
            return Some(RejectionReason::Contract);
        }
        None
    }

    fn is_test_customer(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.test_patterns.iter().any(|p| name.contains(p.as_str()))
    }
}

/// Composite duplicate key; the amount is compared bit-exact.
type DedupKey = (Option<String>, Option<String>, Option<i64>, u64);

fn dedup_key(row: &OrderRow) -> DedupKey {
    (
        row.identity_ref().map(str::to_string),
        row.customer_id.clone(),
        row.delivery_location_id,
        row.assembly_amount.to_bits(),
    )
}

impl OrderValidatorTrait for OrderValidator {
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    fn validate(&self, rows: Vec<OrderRow>) -> ValidationReport {
        let mut report = ValidationReport {
            total: rows.len(),
            reason_counts: RejectionReason::ALL.iter().map(|r| (*r, 0)).collect(),
            ..Default::default()
        };

        let mut passed = Vec::with_capacity(rows.len());
        for row in rows {
            match self.check_row(&row) {
                Some(reason) => {
                    debug!(row = %row.display_ref(), reason = %reason, "row rejected");
                    *report.reason_counts.entry(reason).or_insert(0) += 1;
                    report.rejected.push(Rejection { row, reason });
                }
                None => passed.push(row),
            }
        }

        let mut seen: HashSet<DedupKey> = HashSet::with_capacity(passed.len());
        for row in passed {
            if seen.insert(dedup_key(&row)) {
                report.valid.push(row);
            } else {
                debug!(row = %row.display_ref(), "duplicate row dropped");
                report.duplicates.push(row);
            }
        }
        report.duplicate_count = report.duplicates.len();

        info!(
            total = report.total,
            valid = report.valid.len(),
            rejected = report.rejected.len(),
            duplicates = report.duplicate_count,
            no_assembly = report.count(RejectionReason::NoAssembly),
            no_bundles = report.count(RejectionReason::NoBundles),
            no_location = report.count(RejectionReason::NoLocation),
            no_customer = report.count(RejectionReason::NoCustomer),
            cancelled = report.count(RejectionReason::Cancelled),
            test_data = report.count(RejectionReason::TestData),
            contract = report.count(RejectionReason::Contract),
            "order validation complete"
        );
        report
    }
}
