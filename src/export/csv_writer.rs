// ==========================================
// Zuidplas Logistics - CSV Writer
// ==========================================
// breakdown:  one record per (route, cart type, fust type) bucket
// rejections: one record per rejected row with its reason
// ==========================================

use crate::domain::cart::CartResult;
use crate::domain::types::{CartType, RejectionReason};
use crate::export::error::ExportResult;
use crate::importer::ValidationReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRecord<'a> {
    pub route: &'a str,
    pub cart_type: CartType,
    pub fust_type: &'a str,
    pub total_fust: f64,
    pub capacity: u32,
    pub carts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionRecord<'a> {
    pub row: usize,
    pub reference: String,
    pub customer_id: Option<&'a str>,
    pub customer_name: &'a str,
    pub delivery_location_id: Option<i64>,
    pub assembly_amount: f64,
    pub reason: RejectionReason,
}

pub fn write_breakdown<W: Write>(result: &CartResult, writer: W) -> ExportResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for route in &result.breakdown {
        for fust in &route.fust_breakdown {
            csv.serialize(BreakdownRecord {
                route: &route.route,
                cart_type: fust.cart_type,
                fust_type: &fust.fust_type,
                total_fust: round_fust(fust.total_fust),
                capacity: fust.capacity,
                carts: fust.carts,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}

pub fn write_rejections<W: Write>(report: &ValidationReport, writer: W) -> ExportResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for rejection in &report.rejected {
        let row = &rejection.row;
        csv.serialize(RejectionRecord {
            row: row.row_number,
            reference: row.display_ref(),
            customer_id: row.customer_id.as_deref(),
            customer_name: &row.customer_name,
            delivery_location_id: row.delivery_location_id,
            assembly_amount: row.assembly_amount,
            reason: rejection.reason,
        })?;
    }
    csv.flush()?;
    Ok(())
}

pub fn breakdown_csv(result: &CartResult) -> ExportResult<String> {
    let mut buffer = Vec::new();
    write_breakdown(result, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn rejections_csv(report: &ValidationReport) -> ExportResult<String> {
    let mut buffer = Vec::new();
    write_rejections(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Two decimals are enough for a fust count on a report.
fn round_fust(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
