// ==========================================
// Zuidplas Logistics - Cart Calculator
// ==========================================
// carts(bucket) = ceil(total_fust / capacity(cart type, fust type))
// route carts   = sum over its buckets (each fust type rounded on its own)
// trucks        = ceil(total carts / standard carts per truck)
// ==========================================

use crate::config::LogisticsConfig;
use crate::domain::cart::{CartResult, FustBreakdown, FustBucket, RouteCartBreakdown};
use crate::domain::types::CartType;
use crate::engine::warnings::PipelineWarning;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Absorbs float noise of summed fractional fust (e.g. 72.00000000001).
const ROUNDING_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartCalculation {
    pub result: CartResult,
    pub warnings: Vec<PipelineWarning>,
}

pub struct CartCalculator {
    config: Arc<LogisticsConfig>,
}

impl CartCalculator {
    pub fn new(config: Arc<LogisticsConfig>) -> Self {
        Self { config }
    }

    /// Saturates at `u32::MAX`; cart counts never wrap.
    pub fn carts_for_bucket(&self, total_fust: f64, capacity: u32) -> u32 {
        if total_fust <= 0.0 || capacity == 0 {
            return 0;
        }
        (total_fust / capacity as f64 - ROUNDING_EPSILON).ceil().max(0.0) as u32
    }

    pub fn trucks_for(&self, total_carts: u32) -> u32 {
        total_carts.div_ceil(self.config.truck.max_standard.max(1))
    }

    #[instrument(skip(self, buckets), fields(buckets = buckets.len()))]
    pub fn calculate(&self, buckets: &[FustBucket]) -> CartCalculation {
        let mut warnings = Vec::new();
        let mut routes: BTreeMap<String, RouteCartBreakdown> = BTreeMap::new();

        for bucket in buckets {
            let (capacity, known) = self.config.fust_capacity(bucket.cart_type, &bucket.fust_type);
            if !known {
                warnings.push(
                    PipelineWarning::UnknownFustType {
                        route: bucket.route.clone(),
                        cart_type: bucket.cart_type,
                        fust_type: bucket.fust_type.clone(),
                        default_capacity: capacity,
                    }
                    .emit(),
                );
            }

            let carts = self.carts_for_bucket(bucket.total_fust, capacity);
            let entry = routes
                .entry(bucket.route.clone())
                .or_insert_with(|| RouteCartBreakdown {
                    route: bucket.route.clone(),
                    carts: 0,
                    standard_carts: 0,
                    danish_carts: 0,
                    fust_breakdown: Vec::new(),
                });

            entry.carts = entry.carts.saturating_add(carts);
            match bucket.cart_type {
                CartType::Standard => entry.standard_carts = entry.standard_carts.saturating_add(carts),
                CartType::Danish => entry.danish_carts = entry.danish_carts.saturating_add(carts),
            }
            entry.fust_breakdown.push(FustBreakdown {
                fust_type: bucket.fust_type.clone(),
                cart_type: bucket.cart_type,
                total_fust: bucket.total_fust,
                capacity,
                carts,
            });
        }

        // display order: route id, then key
        let mut breakdown: Vec<RouteCartBreakdown> = routes.into_values().collect();
        breakdown.sort_by_key(|b| {
            (
                self.config.route(&b.route).map_or(u32::MAX, |r| r.id),
                b.route.clone(),
            )
        });

        let by_route: BTreeMap<String, u32> =
            breakdown.iter().map(|b| (b.route.clone(), b.carts)).collect();
        let total = breakdown.iter().fold(0u32, |sum, b| sum.saturating_add(b.carts));
        let trucks = self.trucks_for(total);

        info!(total_carts = total, trucks, routes = breakdown.len(), "cart calculation complete");
        CartCalculation {
            result: CartResult {
                total,
                trucks,
                by_route,
                breakdown,
            },
            warnings,
        }
    }
}
