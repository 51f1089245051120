// ==========================================
// Zuidplas Logistics - Route & Fust Classifier
// ==========================================
// Per valid row: route (location table, evening variant),
// cart type (Danish customer list), fust type (property 901),
// bundles per fust (prioritised rules, first applicable wins).
// ==========================================

use crate::config::LogisticsConfig;
use crate::domain::order::OrderRow;
use crate::domain::types::{CartType, Period};
use crate::engine::customer_matcher::{CustomerMatch, CustomerMatcher};
use crate::engine::warnings::PipelineWarning;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// Classification output
// ==========================================

/// Which rule produced bundles-per-fust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundlesSource {
    StemsRatio,  // L13 / L11
    BaseProduct, // nr_base_product / assumed stems per bundle
    Hint,        // bundles_per_fust > 1
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundlesPerFust {
    pub value: f64,
    pub source: BundlesSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteAssignment {
    pub route: String,
    /// Location not in the table (or absent); default route used
    pub fallback: bool,
}

#[derive(Debug, Clone)]
pub struct ClassifiedRow<'a> {
    pub row: &'a OrderRow,
    pub route: String,      // final route key, evening variant applied
    pub base_route: String, // route of the location table
    pub period: Period,
    pub cart_type: CartType,
    pub fust_type: String,
    pub bundles_per_fust: BundlesPerFust,
    pub customer_match: CustomerMatch,
}

impl ClassifiedRow<'_> {
    /// Fractional fust of this row; never rounded here.
    pub fn fust(&self) -> f64 {
        self.row.assembly_amount / self.bundles_per_fust.value
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    pub rows: Vec<ClassifiedRow<'a>>,
    pub warnings: Vec<PipelineWarning>,
}

// ==========================================
// RouteClassifier
// ==========================================
pub struct RouteClassifier {
    config: Arc<LogisticsConfig>,
    matcher: CustomerMatcher,
}

impl RouteClassifier {
    pub fn new(config: Arc<LogisticsConfig>) -> Self {
        Self {
            matcher: CustomerMatcher::new(&config),
            config,
        }
    }

    /// Location table lookup; unmapped ids go to the default route.
    pub fn route_for_row(&self, row: &OrderRow) -> RouteAssignment {
        match row
            .delivery_location_id
            .and_then(|id| self.config.route_for_location(id))
        {
            Some(route) => RouteAssignment {
                route: route.to_string(),
                fallback: false,
            },
            None => RouteAssignment {
                route: self.config.default_route.clone(),
                fallback: true,
            },
        }
    }

    pub fn fust_type_for_row(&self, row: &OrderRow) -> String {
        row.fust_type_code
            .clone()
            .unwrap_or_else(|| self.config.fust.default_fust_type.clone())
    }

    /// 1. L11 and L13 both > 0: L13 / L11
    /// 2. nr_base_product > 0: nr_base_product / assumed stems per bundle
    /// 3. bundles_per_fust > 1 (exactly 1 is unreliable and skipped)
    /// 4. default
    pub fn bundles_per_fust(&self, row: &OrderRow) -> BundlesPerFust {
        let rules = &self.config.fust;
        let positive = |v: Option<f64>| v.filter(|x| *x > 0.0);

        if let (Some(per_bundle), Some(per_container)) =
            (positive(row.stems_per_bundle), positive(row.stems_per_container))
        {
            return BundlesPerFust {
                value: per_container / per_bundle,
                source: BundlesSource::StemsRatio,
            };
        }
        if let Some(base) = positive(row.base_product_count) {
            return BundlesPerFust {
                value: base / rules.assumed_stems_per_bundle,
                source: BundlesSource::BaseProduct,
            };
        }
        if let Some(hint) = row.bundles_per_fust_hint.filter(|h| *h > 1.0) {
            return BundlesPerFust {
                value: hint,
                source: BundlesSource::Hint,
            };
        }
        BundlesPerFust {
            value: rules.default_bundles_per_fust,
            source: BundlesSource::Default,
        }
    }

    /// Evening when the customer is on an evening list, the name carries
    /// an evening hint, or the delivery time is at/after the evening cut-off.
    pub fn period_for_row(&self, row: &OrderRow, customer_match: &CustomerMatch) -> Period {
        let listed_evening = matches!(
            customer_match,
            CustomerMatch::Route {
                period: Period::Evening,
                ..
            }
        );
        let late_time = row
            .delivery_time
            .map_or(false, |t| t >= self.config.customers.evening_from);

        if listed_evening || late_time || self.matcher.has_evening_hint(&row.customer_name) {
            Period::Evening
        } else {
            Period::Morning
        }
    }

    pub fn cart_type_for_row(&self, row: &OrderRow) -> CartType {
        if self.matcher.is_danish(&row.customer_name) {
            CartType::Danish
        } else {
            CartType::Standard
        }
    }

    pub fn classify_row<'a>(&self, row: &'a OrderRow) -> ClassifiedRow<'a> {
        let assignment = self.route_for_row(row);
        let customer_match = self.matcher.match_customer(&row.customer_name);
        let period = self.period_for_row(row, &customer_match);

        let route = match period {
            Period::Evening => self
                .config
                .route(&assignment.route)
                .and_then(|r| r.evening_variant.clone())
                .unwrap_or_else(|| assignment.route.clone()),
            Period::Morning => assignment.route.clone(),
        };

        ClassifiedRow {
            row,
            route,
            base_route: assignment.route,
            period,
            cart_type: self.cart_type_for_row(row),
            fust_type: self.fust_type_for_row(row),
            bundles_per_fust: self.bundles_per_fust(row),
            customer_match,
        }
    }

    /// Classify all rows and collect the data-quality warnings.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn classify<'a>(&self, rows: &'a [OrderRow]) -> Classification<'a> {
        let mut unmapped: BTreeMap<Option<i64>, usize> = BTreeMap::new();
        let mut unmatched: BTreeMap<String, usize> = BTreeMap::new();
        let mut no_variant: BTreeMap<String, usize> = BTreeMap::new();
        let mut missing_fust = 0usize;

        let mut classified = Vec::with_capacity(rows.len());
        for row in rows {
            let item = self.classify_row(row);

            if self.route_for_row(row).fallback {
                *unmapped.entry(row.delivery_location_id).or_insert(0) += 1;
            }
            if row.fust_type_code.is_none() {
                missing_fust += 1;
            }
            if !item.customer_match.is_matched() {
                *unmatched.entry(row.customer_name.clone()).or_insert(0) += 1;
            }
            if item.period == Period::Evening && item.route == item.base_route {
                *no_variant.entry(item.base_route.clone()).or_insert(0) += 1;
            }

            debug!(
                row = %row.display_ref(),
                route = %item.route,
                cart_type = %item.cart_type,
                fust_type = %item.fust_type,
                bundles_per_fust = item.bundles_per_fust.value,
                "row classified"
            );
            classified.push(item);
        }

        let mut warnings = Vec::new();
        for (location_id, count) in unmapped {
            warnings.push(
                PipelineWarning::UnmappedLocation {
                    location_id,
                    rows: count,
                    fallback_route: self.config.default_route.clone(),
                }
                .emit(),
            );
        }
        if missing_fust > 0 {
            warnings.push(
                PipelineWarning::MissingFustType {
                    rows: missing_fust,
                    default_fust_type: self.config.fust.default_fust_type.clone(),
                }
                .emit(),
            );
        }
        for (customer_name, count) in unmatched {
            warnings.push(
                PipelineWarning::UnmatchedCustomer {
                    customer_name,
                    rows: count,
                }
                .emit(),
            );
        }
        for (route, count) in no_variant {
            warnings.push(PipelineWarning::NoEveningVariant { route, rows: count }.emit());
        }

        info!(
            rows = classified.len(),
            warnings = warnings.len(),
            "route & fust classification complete"
        );
        Classification {
            rows: classified,
            warnings,
        }
    }
}
