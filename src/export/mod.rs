// ==========================================
// Zuidplas Logistics - Export Layer
// ==========================================
// CSV rendering of the per-route fust breakdown and of rejected rows
// ==========================================

pub mod csv_writer;
pub mod error;

pub use csv_writer::{
    breakdown_csv, rejections_csv, write_breakdown, write_rejections, BreakdownRecord,
    RejectionRecord,
};
pub use error::{ExportError, ExportResult};
