// ==========================================
// Zuidplas Logistics - Pipeline Orchestrator
// ==========================================
// raw rows -> FieldMapper -> OrderValidator -> RouteClassifier
//          -> FustAggregator -> CartCalculator -> AllocationEngine
// Synchronous and pure: no I/O, no shared mutable state.
// ==========================================

use crate::config::{ConfigResult, LogisticsConfig};
use crate::domain::allocation::AllocationOption;
use crate::domain::cart::CartResult;
use crate::domain::order::OrderRow;
use crate::engine::allocation::AllocationEngine;
use crate::engine::cache::{keyed, CartResultCache};
use crate::engine::cart_calculator::{CartCalculation, CartCalculator};
use crate::engine::classifier::RouteClassifier;
use crate::engine::diagnostics::{diagnose, DiagnosticsReport};
use crate::engine::fust_aggregator::FustAggregator;
use crate::engine::warnings::PipelineWarning;
use crate::importer::order_importer_trait::{FieldMapper as _, OrderValidator as _};
use crate::importer::{FieldMapperImpl, OrderValidatorImpl, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

// ==========================================
// PipelineOptions / PipelineReport
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOptions {
    /// Stop after the cart calculation
    pub skip_allocation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    #[serde(skip)]
    pub validation: ValidationReport,
    pub cart_result: CartResult,
    pub options: Vec<AllocationOption>,
    pub warnings: Vec<PipelineWarning>,
    pub diagnostics: DiagnosticsReport,
}

impl PipelineReport {
    /// Highest-ranked allocation option
    pub fn best_option(&self) -> Option<&AllocationOption> {
        self.options.first()
    }
}

// ==========================================
// LogisticsPipeline
// ==========================================

pub struct LogisticsPipeline {
    config: Arc<LogisticsConfig>,
    mapper: FieldMapperImpl,
    validator: OrderValidatorImpl,
    classifier: RouteClassifier,
    aggregator: FustAggregator,
    calculator: CartCalculator,
    allocation: AllocationEngine,
}

impl LogisticsPipeline {
    /// Validates the configuration once; misconfiguration fails here.
    pub fn new(config: LogisticsConfig) -> ConfigResult<Self> {
        config.validate()?;
        let config = Arc::new(config);

        Ok(Self {
            mapper: FieldMapperImpl::new(),
            validator: OrderValidatorImpl::default(),
            classifier: RouteClassifier::new(config.clone()),
            aggregator: FustAggregator::new(),
            calculator: CartCalculator::new(config.clone()),
            allocation: AllocationEngine::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &LogisticsConfig {
        &self.config
    }

    pub fn normalize(&self, raw: &[Value]) -> Vec<OrderRow> {
        self.mapper.map_rows(raw)
    }

    pub fn validate(&self, rows: Vec<OrderRow>) -> ValidationReport {
        self.validator.validate(rows)
    }

    /// Valid rows -> CartResult (classification, aggregation, rounding).
    pub fn calculate_carts(&self, valid: &[OrderRow]) -> CartCalculation {
        let classification = self.classifier.classify(valid);
        let buckets = self.aggregator.aggregate(&classification.rows);
        let mut calculation = self.calculator.calculate(&buckets);

        let mut warnings = classification.warnings;
        warnings.append(&mut calculation.warnings);
        calculation.warnings = warnings;
        calculation
    }

    /// Ranked allocation options for the morning slots of a cart result.
    pub fn allocate(&self, result: &CartResult) -> Vec<AllocationOption> {
        self.allocation.generate_options(&result.route_totals())
    }

    #[instrument(skip(self, raw), fields(rows = raw.len()))]
    pub fn run(&self, raw: &[Value], options: PipelineOptions) -> PipelineReport {
        let rows = self.normalize(raw);
        self.run_rows(rows, options)
    }

    /// Same as `run`, reusing `cache` when the raw rows and options are unchanged.
    pub fn run_cached(
        &self,
        raw: &[Value],
        options: PipelineOptions,
        cache: &mut CartResultCache<PipelineReport>,
    ) -> PipelineReport {
        cache.get_or_compute(keyed(raw, &options), || self.run(raw, options))
    }

    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn run_rows(&self, rows: Vec<OrderRow>, options: PipelineOptions) -> PipelineReport {
        let validation = self.validate(rows);

        let classification = self.classifier.classify(&validation.valid);
        let buckets = self.aggregator.aggregate(&classification.rows);
        let calculation = self.calculator.calculate(&buckets);

        let mut warnings = classification.warnings.clone();
        warnings.extend(calculation.warnings);

        let allocation_options = if options.skip_allocation {
            Vec::new()
        } else {
            self.allocate(&calculation.result)
        };

        let diagnostics = diagnose(&validation, &classification.rows, &warnings);

        info!(
            total = validation.total,
            valid = validation.valid_count(),
            rejected = validation.rejected_count(),
            duplicates = validation.duplicate_count,
            carts = calculation.result.total,
            trucks = calculation.result.trucks,
            options = allocation_options.len(),
            warnings = warnings.len(),
            "pipeline complete"
        );

        PipelineReport {
            validation,
            cart_result: calculation.result,
            options: allocation_options,
            warnings,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::domain::types::RejectionReason;
    use serde_json::json;

    fn pipeline() -> LogisticsPipeline {
        LogisticsPipeline::new(LogisticsConfig::default()).unwrap()
    }

    fn raw(order: &str, location: i64, amount: f64) -> Value {
        json!({
            "order_id": order,
            "customer_id": "c1",
            "customer_name": "Hermes Bloemen",
            "delivery_location_id": location,
            "assembly_amount": amount,
            "bundles_per_fust": 6,
            "properties": [{"code": "901", "value": "612"}],
        })
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut config = LogisticsConfig::default();
        config.fust.standard_capacities.clear();
        assert!(matches!(
            LogisticsPipeline::new(config),
            Err(ConfigError::EmptyCapacityTable { .. })
        ));
    }

    #[test]
    fn test_run_end_to_end() {
        let report = pipeline().run(
            &[raw("o1", 36, 120.0), raw("o2", 32, 60.0), raw("o3", 36, 0.0)],
            PipelineOptions::default(),
        );

        assert_eq!(report.validation.valid_count(), 2);
        assert_eq!(report.validation.count(RejectionReason::NoAssembly), 1);
        // 120 / 6 = 20 fust -> 1 cart; 60 / 6 = 10 fust -> 1 cart
        assert_eq!(report.cart_result.total, 2);
        assert_eq!(report.cart_result.by_route["rijnsburg"], 1);
        assert_eq!(report.best_option().map(|o| o.id.as_str()), Some("default"));
        assert_eq!(report.diagnostics.rejections.rejected, 1);
    }

    #[test]
    fn test_skip_allocation() {
        let report = pipeline().run(&[raw("o1", 36, 10.0)], PipelineOptions { skip_allocation: true });
        assert!(report.options.is_empty());
        assert_eq!(report.cart_result.total, 1);
    }

    #[test]
    fn test_empty_input_is_distinguishable() {
        let report = pipeline().run(&[], PipelineOptions::default());
        assert!(report.validation.is_empty_input());
        assert!(!report.validation.all_rejected());
        assert_eq!(report.cart_result, CartResult::default());

        let rejected = pipeline().run(&[raw("o1", 36, 0.0)], PipelineOptions::default());
        assert!(rejected.validation.all_rejected());
    }

    #[test]
    fn test_cached_run_reuses_report() {
        let pipeline = pipeline();
        let rows = vec![raw("o1", 36, 10.0)];
        let mut cache = CartResultCache::new();

        let first = pipeline.run_cached(&rows, PipelineOptions::default(), &mut cache);
        let second = pipeline.run_cached(&rows, PipelineOptions::default(), &mut cache);
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);

        pipeline.run_cached(&rows, PipelineOptions { skip_allocation: true }, &mut cache);
        assert_eq!(cache.misses(), 2);
    }
}
