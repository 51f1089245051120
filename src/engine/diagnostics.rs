// ==========================================
// Zuidplas Logistics - Diagnostics
// ==========================================
// Pure reporting over already-computed pipeline outputs:
// order statistics, rejection summary, unmatched customers,
// late-delivery rows and a tally of data-quality warnings.
// ==========================================

use crate::domain::types::RejectionReason;
use crate::engine::classifier::ClassifiedRow;
use crate::engine::customer_matcher::CustomerMatch;
use crate::engine::warnings::PipelineWarning;
use crate::importer::ValidationReport;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const TOP_CUSTOMERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCount {
    pub customer_name: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatistics {
    pub rows: usize,
    pub unique_orders: usize,
    pub rows_per_route: BTreeMap<String, usize>,
    pub top_customers: Vec<CustomerCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RejectionSummary {
    pub total: usize,
    pub valid: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub by_reason: BTreeMap<RejectionReason, usize>,
    pub empty_input: bool,
    pub all_rejected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub statistics: OrderStatistics,
    pub rejections: RejectionSummary,
    pub unmatched_customers: Vec<CustomerCount>,
    pub late_delivery_rows: usize,
    pub warning_tally: BTreeMap<String, usize>,
}

pub fn order_statistics(rows: &[ClassifiedRow<'_>]) -> OrderStatistics {
    let mut rows_per_route: BTreeMap<String, usize> = BTreeMap::new();
    let mut orders: BTreeSet<&str> = BTreeSet::new();
    let mut customers: BTreeMap<&str, usize> = BTreeMap::new();

    for item in rows {
        *rows_per_route.entry(item.route.clone()).or_insert(0) += 1;
        if let Some(order) = item.row.order_id.as_deref().or(item.row.row_id.as_deref()) {
            orders.insert(order);
        }
        *customers.entry(item.row.customer_name.as_str()).or_insert(0) += 1;
    }

    OrderStatistics {
        rows: rows.len(),
        unique_orders: orders.len(),
        rows_per_route,
        top_customers: ranked(customers, Some(TOP_CUSTOMERS)),
    }
}

pub fn rejection_summary(report: &ValidationReport) -> RejectionSummary {
    RejectionSummary {
        total: report.total,
        valid: report.valid_count(),
        rejected: report.rejected_count(),
        duplicates: report.duplicate_count,
        by_reason: report.reason_counts.clone(),
        empty_input: report.is_empty_input(),
        all_rejected: report.all_rejected(),
    }
}

/// Customers without a match in any customer table, most rows first.
pub fn unmatched_customers(rows: &[ClassifiedRow<'_>]) -> Vec<CustomerCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in rows.iter().filter(|r| !r.customer_match.is_matched()) {
        *counts.entry(item.row.customer_name.as_str()).or_insert(0) += 1;
    }
    ranked(counts, None)
}

pub fn late_delivery_rows(rows: &[ClassifiedRow<'_>]) -> usize {
    rows.iter()
        .filter(|r| r.customer_match == CustomerMatch::LateDelivery)
        .count()
}

pub fn warning_tally(warnings: &[PipelineWarning]) -> BTreeMap<String, usize> {
    let mut tally = BTreeMap::new();
    for warning in warnings {
        *tally.entry(warning.kind().to_string()).or_insert(0) += 1;
    }
    tally
}

pub fn diagnose(
    validation: &ValidationReport,
    rows: &[ClassifiedRow<'_>],
    warnings: &[PipelineWarning],
) -> DiagnosticsReport {
    DiagnosticsReport {
        statistics: order_statistics(rows),
        rejections: rejection_summary(validation),
        unmatched_customers: unmatched_customers(rows),
        late_delivery_rows: late_delivery_rows(rows),
        warning_tally: warning_tally(warnings),
    }
}

fn ranked(counts: BTreeMap<&str, usize>, limit: Option<usize>) -> Vec<CustomerCount> {
    let mut list: Vec<CustomerCount> = counts
        .into_iter()
        .map(|(name, rows)| CustomerCount {
            customer_name: name.to_string(),
            rows,
        })
        .collect();
    // BTreeMap order is the tie-break (name ascending)
    list.sort_by(|a, b| b.rows.cmp(&a.rows));
    if let Some(limit) = limit {
        list.truncate(limit);
    }
    list
}
