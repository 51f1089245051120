// ==========================================
// Zuidplas Logistics - Logistics Configuration
// ==========================================
// All fixed tables the pipeline depends on:
// routes, location -> route, fust capacities, truck rule, costs,
// allocation slots, scoring weights, customer tables.
// Default reproduces the dispatch desk's business values.
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::scoring_profile::ScoringProfile;
use crate::domain::route::{hhmm, RouteDefinition};
use crate::domain::types::{CartType, Period};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

// ==========================================
// LogisticsConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogisticsConfig {
    pub routes: Vec<RouteDefinition>,
    pub location_routes: BTreeMap<i64, String>,
    pub default_route: String,
    pub fust: FustRules,
    pub truck: TruckCapacityRule,
    pub costs: CostTable,
    pub allocation_slots: Vec<AllocationSlot>,
    pub neighbor_slot: Option<usize>,
    pub scoring: ScoringProfile,
    pub customers: CustomerTables,
}

// ==========================================
// FustRules - container capacity per cart
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FustRules {
    pub standard_capacities: BTreeMap<String, u32>,
    pub default_standard_capacity: u32,
    pub danish_capacities: BTreeMap<String, u32>,
    pub default_danish_capacity: u32,
    pub default_fust_type: String,
    pub default_bundles_per_fust: f64,
    pub assumed_stems_per_bundle: f64, // used with nr_base_product only
}

impl Default for FustRules {
    fn default() -> Self {
        let standard = [
            ("612", 72),
            ("614", 72),
            ("575", 32),
            ("902", 40),
            ("588", 40),
            ("996", 32),
            ("856", 20),
            ("821", 40),
        ];
        let danish = [("902", 24), ("996", 32), ("612", 68), ("614", 68)];

        Self {
            standard_capacities: to_capacity_table(&standard),
            default_standard_capacity: 72,
            danish_capacities: to_capacity_table(&danish),
            default_danish_capacity: 24,
            default_fust_type: "612".to_string(),
            default_bundles_per_fust: 5.0,
            assumed_stems_per_bundle: 10.0,
        }
    }
}

fn to_capacity_table(entries: &[(&str, u32)]) -> BTreeMap<String, u32> {
    entries
        .iter()
        .map(|(code, capacity)| (code.to_string(), *capacity))
        .collect()
}

// ==========================================
// TruckCapacityRule - standard/Danish mix on one truck
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TruckCapacityRule {
    pub max_standard: u32,     // nominal standard-equivalent carts
    pub danish_ratio: u32,     // Danish carts per standard-equivalent
    pub danish_threshold: u32, // above this many Danish carts the capacity drops
    pub reduced_capacity: u32,
    pub tight_utilization: f64,
}

impl Default for TruckCapacityRule {
    fn default() -> Self {
        Self {
            max_standard: 17,
            danish_ratio: 2,
            danish_threshold: 6,
            reduced_capacity: 16,
            tight_utilization: 0.8,
        }
    }
}

// ==========================================
// CostTable
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostTable {
    pub own_truck_per_route: f64,
    pub external_truck_per_trip: f64,
    pub neighbor_truck: f64,
    pub carrier_per_cart: f64,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            own_truck_per_route: 150.0,
            external_truck_per_trip: 250.0,
            neighbor_truck: 0.0,
            carrier_per_cart: 25.0,
        }
    }
}

// ==========================================
// AllocationSlot - one departure of the day plan
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlot {
    pub route: String,
    pub truck_id: String,
}

impl AllocationSlot {
    pub fn new(route: &str, truck_id: &str) -> Self {
        Self {
            route: route.to_string(),
            truck_id: truck_id.to_string(),
        }
    }
}

// ==========================================
// CustomerTables - canonical customer names
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRouteList {
    pub route: String,
    pub customers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerTables {
    /// Checked in list order; the first list containing a name wins.
    pub route_customers: Vec<CustomerRouteList>,
    pub danish_customers: Vec<String>,
    pub late_delivery_customers: Vec<String>,
    pub evening_hints: Vec<String>,
    #[serde(with = "hhmm")]
    pub evening_from: NaiveTime,
}

impl Default for CustomerTables {
    fn default() -> Self {
        let lists: [(&str, &[&str]); 6] = [
            ("rijnsburg", RIJNSBURG_MORNING),
            ("aalsmeer", AALSMEER_MORNING),
            ("naaldwijk", NAALDWIJK_MORNING),
            ("rijnsburg_evening", RIJNSBURG_EVENING),
            ("aalsmeer_evening", AALSMEER_EVENING),
            ("naaldwijk_evening", NAALDWIJK_EVENING),
        ];

        Self {
            route_customers: lists
                .iter()
                .map(|(route, names)| CustomerRouteList {
                    route: route.to_string(),
                    customers: to_strings(names),
                })
                .collect(),
            danish_customers: to_strings(DANISH_CUSTOMERS),
            late_delivery_customers: to_strings(LATE_DELIVERY_CUSTOMERS),
            evening_hints: to_strings(&["avond", "zaterdag"]),
            evening_from: NaiveTime::from_hms_opt(15, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

const RIJNSBURG_MORNING: &[&str] = &[
    "A. Heemskerk", "Aad van Duijn", "Albert Noort", "Bohemen", "C van Klaveren",
    "C.W de Mooij", "Floral Sourcing", "H. Star", "Hermes Bloemen", "Heyer",
    "Hoek groothandel", "Hollandirect", "Kariflex", "kooter", "L&M", "L&M Rijnsburg",
    "Maat & Zoon", "Nagel", "Nic den Heijer", "Jason Walters", "Retail Flower",
    "Sorisso Verde", "Star T.", "Star v/d Gugten", "V/D PLAS", "V&E Export", "Vianen",
    "St. Gabriel", "St.Gabriel",
];

const AALSMEER_MORNING: &[&str] = &[
    "Akkus", "Albert Heijn", "Behne Blumen", "By Special", "Bloomon", "Directflor",
    "Divflo", "Fleura Metz", "Flora Service", "EZ Flower", "Floral Connection",
    "Floris Holland", "Floral Charm", "Hans Visser", "Hans Visser P", "Hans Visser B",
    "Greenflor", "hilverda de boer", "holex", "Hoekhuis Aalsmeer", "Intratuin", "IBH",
    "Lem", "F.T.C. Aalsmeer", "KUB Flowers", "Hoorn", "OZ Zurel", "Nijssen", "PS Flowers",
    "Roelofs", "salaba/barile", "Slikweid", "Spaargaren", "Transfleur", "Thom Slootman",
    "Tuning", "verbeek en bol", "Vliet", "Vimex", "Verdnatura", "waterdrinker",
    "Willemsen", "Zandbergen", "MM Flower", "Klok Aalsmeer",
];

const NAALDWIJK_MORNING: &[&str] = &[
    "Astrafund", "Bloomer Flowers", "Bachetle", "Bloom Bouqet", "Capitol fl.",
    "D vd Vijver", "Diva Flowers", "E- Flowers", "Euroveiling", "Flowering Direct",
    "Florca Westland", "Flowers All-inn", "Flowerportal", "FSF", "Flamingo Flowers",
    "Liga Flor", "Liga Flor B.V", "Goldman", "H. Star", "MD Agro Import", "Kontikiflor",
    "Kuipers", "Leeuwenburg", "Lion Fleurex", "Premium", "Sjaak vd vijver", "SQ Flora",
    "v Vliet", "Webshopflower", "West Flora Export", "What If", "Zeester", "Zuylen",
    "Denen", "Bosjes", "Crocus", "Superflora", "Superflora BV", "Klok Naaldwijk",
];

const RIJNSBURG_EVENING: &[&str] = &[
    "A. Heemskerk", "Albert Noort", "Esmeralda", "Floral Sourcing", "HGR", "Heyer inkoop",
    "L&M Zaterdag", "L&M", "Nagel", "Ransom", "Retail Flowers", "Vianen", "V/D Plas",
    "V&E Export", "karren Bosjes",
];

const AALSMEER_EVENING: &[&str] = &[
    "Akkus", "Albert Heijn", "Bloem Fleurtiek", "By Special Zaterdag", "By Special",
    "Dobbe", "Fleura Metz", "Floral Connection", "Flower Direct", "Greenflor",
    "FTC Aalsmeer", "Guchtenaere", "Hans Visser SK-SV", "Hans Visser B-SV",
    "Hans Visser B", "Hans Visser P-SV", "Hans Visser P", "Hoekhuis Aalsmeer", "Nijssen",
    "Hoorn", "Trans-Fleur", "Slootman", "Verbeek en Bol", "Waterdrinker", "Willemsen",
    "Zurel", "Bosjes", "Klok Dozen", "MM Flowers", "Dijkflora",
];

const NAALDWIJK_EVENING: &[&str] = &[
    "Bachetle", "Bloombouquet", "Blumen Aschof", "Capitol Flowers", "Flamingo", "H. Star",
    "H.P Nieuwkerk & Zn.", "Hoekhuis", "Kontikiflor", "Leeuwenburg", "Premium", "Penning",
    "Vliet", "Goedegeburen", "Zalam", "CON", "Superflora", "F.T.C. Bleiswijk",
    "Rhein-Maas", "Bosjes Overig", "Klok Dozen", "Klok Bosjes",
];

const DANISH_CUSTOMERS: &[&str] = &[
    "Superflora", "Flamingo", "Flamingo Flowers", "Flower Trade Consult", "MM Flowers",
    "Dijk Flora", "Dijkflora",
];

const LATE_DELIVERY_CUSTOMERS: &[&str] = &["Rheinmaas", "Plantion", "Algemeen"];

// ==========================================
// Default
// ==========================================
impl Default for LogisticsConfig {
    fn default() -> Self {
        let routes = vec![
            RouteDefinition::new("rijnsburg", 1, "Rijnsburg", "Royal FloraHolland Rijnsburg", (9, 0), Period::Morning)
                .with_evening_variant("rijnsburg_evening"),
            RouteDefinition::new("aalsmeer", 2, "Aalsmeer", "Royal FloraHolland Aalsmeer", (10, 0), Period::Morning)
                .with_evening_variant("aalsmeer_evening"),
            RouteDefinition::new("naaldwijk", 3, "Naaldwijk", "Royal FloraHolland Naaldwijk", (11, 0), Period::Morning)
                .with_evening_variant("naaldwijk_evening"),
            RouteDefinition::new("rijnsburg_evening", 4, "Rijnsburg (Avond)", "Royal FloraHolland Rijnsburg", (17, 0), Period::Evening),
            RouteDefinition::new("aalsmeer_evening", 5, "Aalsmeer (Avond)", "Royal FloraHolland Aalsmeer", (18, 0), Period::Evening),
            RouteDefinition::new("naaldwijk_evening", 6, "Naaldwijk (Avond)", "Royal FloraHolland Naaldwijk", (19, 0), Period::Evening),
        ];

        Self {
            routes,
            location_routes: BTreeMap::from([
                (32, "aalsmeer".to_string()),
                (34, "naaldwijk".to_string()),
                (36, "rijnsburg".to_string()),
            ]),
            default_route: "rijnsburg".to_string(),
            fust: FustRules::default(),
            truck: TruckCapacityRule::default(),
            costs: CostTable::default(),
            allocation_slots: vec![
                AllocationSlot::new("rijnsburg", "own-truck-1"),
                AllocationSlot::new("aalsmeer", "own-truck-2"),
                AllocationSlot::new("naaldwijk", "own-truck-1"),
            ],
            neighbor_slot: Some(0),
            scoring: ScoringProfile::default(),
            customers: CustomerTables::default(),
        }
    }
}

impl LogisticsConfig {
    // ==========================================
    // Loading
    // ==========================================

    /// Parse a JSON config; omitted sections keep their defaults.
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: LogisticsConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw)
    }

    // ==========================================
    // Lookups
    // ==========================================

    pub fn route(&self, key: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|r| r.key == key)
    }

    /// Route key for a location id, `None` when the id is not mapped.
    pub fn route_for_location(&self, location_id: i64) -> Option<&str> {
        self.location_routes.get(&location_id).map(String::as_str)
    }

    /// Cart capacity for a fust type; the flag is false when the default was used.
    pub fn fust_capacity(&self, cart_type: CartType, fust_type: &str) -> (u32, bool) {
        let (table, default) = match cart_type {
            CartType::Standard => (&self.fust.standard_capacities, self.fust.default_standard_capacity),
            CartType::Danish => (&self.fust.danish_capacities, self.fust.default_danish_capacity),
        };
        match table.get(fust_type) {
            Some(capacity) => (*capacity, true),
            None => (default, false),
        }
    }

    // ==========================================
    // Validation (fail fast)
    // ==========================================
    pub fn validate(&self) -> ConfigResult<()> {
        self.validate_fust_rules()?;
        self.validate_truck_rule()?;
        self.validate_costs()?;
        self.validate_routes()?;
        self.validate_allocation_plan()?;
        self.scoring.validate()
    }

    fn validate_fust_rules(&self) -> ConfigResult<()> {
        let tables = [
            ("standard", &self.fust.standard_capacities, self.fust.default_standard_capacity),
            ("danish", &self.fust.danish_capacities, self.fust.default_danish_capacity),
        ];

        for (name, table, default) in tables {
            if table.is_empty() {
                return Err(ConfigError::EmptyCapacityTable {
                    table: name.to_string(),
                });
            }
            if let Some((code, _)) = table.iter().find(|(_, capacity)| **capacity == 0) {
                return Err(ConfigError::NonPositiveCapacity {
                    table: name.to_string(),
                    fust_type: code.clone(),
                });
            }
            if default == 0 {
                return Err(ConfigError::NonPositiveCapacity {
                    table: name.to_string(),
                    fust_type: "<default>".to_string(),
                });
            }
        }

        let bundle_rules = [
            ("defaultBundlesPerFust", self.fust.default_bundles_per_fust),
            ("assumedStemsPerBundle", self.fust.assumed_stems_per_bundle),
        ];
        for (field, value) in bundle_rules {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidBundleRule {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn validate_truck_rule(&self) -> ConfigResult<()> {
        let rule = &self.truck;
        let invalid = |field: &str, message: &str| ConfigError::InvalidTruckRule {
            field: field.to_string(),
            message: message.to_string(),
        };

        if rule.max_standard == 0 {
            return Err(invalid("maxStandard", "must be > 0"));
        }
        if rule.danish_ratio == 0 {
            return Err(invalid("danishRatio", "must be > 0"));
        }
        if rule.reduced_capacity == 0 || rule.reduced_capacity > rule.max_standard {
            return Err(invalid("reducedCapacity", "must be in 1..=maxStandard"));
        }
        if !(rule.tight_utilization > 0.0 && rule.tight_utilization <= 1.0) {
            return Err(invalid("tightUtilization", "must be in (0, 1]"));
        }
        Ok(())
    }

    fn validate_costs(&self) -> ConfigResult<()> {
        let costs = [
            ("ownTruckPerRoute", self.costs.own_truck_per_route),
            ("externalTruckPerTrip", self.costs.external_truck_per_trip),
            ("neighborTruck", self.costs.neighbor_truck),
            ("carrierPerCart", self.costs.carrier_per_cart),
        ];
        for (field, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCost {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn validate_routes(&self) -> ConfigResult<()> {
        if self.routes.is_empty() {
            return Err(ConfigError::NoRoutes);
        }

        let mut seen = HashSet::new();
        for route in &self.routes {
            if !seen.insert(route.key.as_str()) {
                return Err(ConfigError::DuplicateRoute(route.key.clone()));
            }
        }

        let unknown = |context: String, route: &str| ConfigError::UnknownRoute {
            context,
            route: route.to_string(),
        };

        if !seen.contains(self.default_route.as_str()) {
            return Err(unknown("defaultRoute".to_string(), &self.default_route));
        }
        for (location, route) in &self.location_routes {
            if !seen.contains(route.as_str()) {
                return Err(unknown(format!("location {}", location), route));
            }
        }
        for route in &self.routes {
            if let Some(variant) = &route.evening_variant {
                if !seen.contains(variant.as_str()) {
                    return Err(unknown(format!("evening variant of '{}'", route.key), variant));
                }
            }
        }
        for list in &self.customers.route_customers {
            if !seen.contains(list.route.as_str()) {
                return Err(unknown("customer table".to_string(), &list.route));
            }
        }
        Ok(())
    }

    fn validate_allocation_plan(&self) -> ConfigResult<()> {
        for slot in &self.allocation_slots {
            if self.route(&slot.route).is_none() {
                return Err(ConfigError::UnknownRoute {
                    context: format!("allocation slot ({})", slot.truck_id),
                    route: slot.route.clone(),
                });
            }
        }
        if let Some(index) = self.neighbor_slot {
            if index >= self.allocation_slots.len() {
                return Err(ConfigError::InvalidAllocationPlan(format!(
                    "neighbor slot {} out of range ({} slots)",
                    index,
                    self.allocation_slots.len()
                )));
            }
        }
        Ok(())
    }
}
