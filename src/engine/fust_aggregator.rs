// ==========================================
// Zuidplas Logistics - Fust Aggregator
// ==========================================
// fust(row) = assembly_amount / bundles_per_fust (fractional)
// bucket[(route, cart type, fust type)] += fust(row)
// ==========================================

use crate::domain::cart::FustBucket;
use crate::domain::types::CartType;
use crate::engine::classifier::ClassifiedRow;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// (route key, cart type, fust type)
pub type BucketKey = (String, CartType, String);

pub struct FustAggregator {
    // stateless
}

impl Default for FustAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl FustAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// Buckets ordered by (route, cart type, fust type).
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn aggregate(&self, rows: &[ClassifiedRow<'_>]) -> Vec<FustBucket> {
        let mut parts: BTreeMap<BucketKey, Vec<f64>> = BTreeMap::new();
        for row in rows {
            parts
                .entry((row.route.clone(), row.cart_type, row.fust_type.clone()))
                .or_default()
                .push(row.fust());
        }

        let buckets: Vec<FustBucket> = parts
            .into_iter()
            .map(|((route, cart_type, fust_type), mut values)| {
                // summed in sorted order: the total does not depend on input order
                values.sort_by(|a, b| a.total_cmp(b));
                let total_fust: f64 = values.iter().sum();
                debug!(%route, %cart_type, %fust_type, total_fust, rows = values.len(), "fust bucket");
                FustBucket {
                    route,
                    cart_type,
                    fust_type,
                    total_fust,
                    row_count: values.len(),
                }
            })
            .collect();

        info!(buckets = buckets.len(), "fust aggregation complete");
        buckets
    }
}
