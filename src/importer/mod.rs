// ==========================================
// Zuidplas Logistics - Import Layer
// ==========================================
// Responsibility: ERP payload -> canonical OrderRow -> validated rows
// Stages: payload unwrap, field mapping, validation + dedup
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod order_importer_trait;
pub mod order_validator;
pub mod payload;

pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{CanonicalField, FieldMapper as FieldMapperImpl, FieldPath};
pub use order_importer_trait::{FieldMapper, OrderValidator};
pub use order_validator::{OrderValidator as OrderValidatorImpl, Rejection, ValidationReport};
pub use payload::{rows_from_file, rows_from_json, rows_from_value};
