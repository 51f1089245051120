// ==========================================
// Zuidplas Logistics - Customer Name Matcher
// ==========================================
// Case-fold, strip prefixes/suffixes/punctuation, then exact match
// against the canonical customer tables.
// Known weak spot: ERP spellings drift, so unmatched names are
// reported, never guessed.
// ==========================================

use crate::config::LogisticsConfig;
use crate::domain::types::Period;
use std::collections::HashMap;

/// Trailing tokens that carry no identity (legal form, sales channel).
const LEGAL_SUFFIXES: &[&str] = &[
    "b.v.", "b.v", "bv", "v.o.f.", "v.o.f", "vof", "s.r.o.", "s.r.o", "sro", "webshop",
    "retail", "export", "holding", "group",
];

// ==========================================
// normalize_name
// ==========================================
pub fn normalize_name(name: &str) -> String {
    let collapsed = collapse_whitespace(&name.to_lowercase());
    let without_prefix = strip_quantity_prefix(&collapsed);
    let without_brackets = strip_bracketed(without_prefix);
    let without_suffixes = strip_legal_suffixes(&without_brackets);

    let mut cleaned = String::with_capacity(without_suffixes.len());
    for c in without_suffixes.chars() {
        match c {
            '.' => {}
            '&' => cleaned.push_str(" en "),
            c if c.is_alphanumeric() || c == '_' => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }
    collapse_whitespace(&cleaned)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// "2x Fleura Metz" -> "Fleura Metz"
fn strip_quantity_prefix(s: &str) -> &str {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && s[digits..].starts_with('x') {
        s[digits + 1..].trim_start()
    } else {
        s
    }
}

fn strip_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut closing: Option<char> = None;
    for c in s.chars() {
        match closing {
            Some(close) if c == close => {
                closing = None;
                out.push(' ');
            }
            Some(_) => {}
            None => match c {
                '(' => closing = Some(')'),
                '[' => closing = Some(']'),
                '{' => closing = Some('}'),
                _ => out.push(c),
            },
        }
    }
    out
}

fn strip_legal_suffixes(s: &str) -> String {
    let mut words: Vec<&str> = s.split_whitespace().collect();
    while words.len() > 1 {
        match words.last() {
            Some(last) if LEGAL_SUFFIXES.contains(last) => {
                words.pop();
            }
            _ => break,
        }
    }
    words.join(" ")
}

// ==========================================
// CustomerMatcher
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerMatch {
    /// Listed on a route table
    Route { route: String, period: Period },
    /// Auction/late-delivery customer with no fixed route
    LateDelivery,
    Unmatched,
}

impl CustomerMatch {
    pub fn is_matched(&self) -> bool {
        !matches!(self, CustomerMatch::Unmatched)
    }
}

pub struct CustomerMatcher {
    index: HashMap<String, (String, Period)>, // normalised name -> (route key, period)
    danish: Vec<String>,
    late_delivery: Vec<String>,
    evening_hints: Vec<String>,
}

impl CustomerMatcher {
    pub fn new(config: &LogisticsConfig) -> Self {
        let mut index = HashMap::new();
        for list in &config.customers.route_customers {
            let period = config.route(&list.route).map(|r| r.period).unwrap_or_default();
            for customer in &list.customers {
                let key = normalize_name(customer);
                if !key.is_empty() {
                    index.entry(key).or_insert_with(|| (list.route.clone(), period));
                }
            }
        }

        let normalized = |names: &[String]| -> Vec<String> {
            names
                .iter()
                .map(|n| normalize_name(n))
                .filter(|n| !n.is_empty())
                .collect()
        };

        Self {
            index,
            danish: normalized(&config.customers.danish_customers),
            late_delivery: normalized(&config.customers.late_delivery_customers),
            evening_hints: config
                .customers
                .evening_hints
                .iter()
                .map(|h| h.to_lowercase())
                .collect(),
        }
    }

    pub fn match_customer(&self, name: &str) -> CustomerMatch {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return CustomerMatch::Unmatched;
        }

        let late = normalized.split(' ').any(|word| {
            self.late_delivery
                .iter()
                .any(|keyword| word.starts_with(keyword.as_str()))
        });
        if late {
            return CustomerMatch::LateDelivery;
        }

        match self.index.get(&normalized) {
            Some((route, period)) => CustomerMatch::Route {
                route: route.clone(),
                period: *period,
            },
            None => CustomerMatch::Unmatched,
        }
    }

    /// Danish-cart customers, by normalised containment.
    pub fn is_danish(&self, name: &str) -> bool {
        let normalized = normalize_name(name);
        !normalized.is_empty() && self.danish.iter().any(|d| normalized.contains(d.as_str()))
    }

    /// Name carries an evening hint ("avond", "zaterdag").
    pub fn has_evening_hint(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.evening_hints.iter().any(|h| lower.contains(h.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_basics() {
        assert_eq!(normalize_name("  Fleura   Metz "), "fleura metz");
        assert_eq!(normalize_name("2x Fleura Metz"), "fleura metz");
        assert_eq!(normalize_name("Hoekhuis Aalsmeer (MINI) [x]"), "hoekhuis aalsmeer");
        assert_eq!(normalize_name("L&M"), "l en m");
        assert_eq!(normalize_name("Star v/d Gugten"), "star v d gugten");
        assert_eq!(normalize_name("Hans Visser SK-SV"), "hans visser sk sv");
        assert_eq!(normalize_name("F.T.C. Aalsmeer"), "ftc aalsmeer");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_normalize_strips_legal_suffixes() {
        assert_eq!(normalize_name("Liga Flor B.V."), "liga flor");
        assert_eq!(normalize_name("Liga Flor B.V"), "liga flor");
        assert_eq!(normalize_name("Superflora BV"), "superflora");
        assert_eq!(normalize_name("Goldman s.r.o."), "goldman");
        assert_eq!(normalize_name("West Flora Export"), "west flora");
        assert_eq!(normalize_name("Bloom Holding Group"), "bloom");
        // a lone suffix word is kept
        assert_eq!(normalize_name("Export"), "export");
    }

    #[test]
    fn test_match_morning_and_evening_lists() {
        let matcher = CustomerMatcher::new(&LogisticsConfig::default());

        assert_eq!(
            matcher.match_customer("Fleura Metz B.V."),
            CustomerMatch::Route {
                route: "aalsmeer".to_string(),
                period: Period::Morning
            }
        );
        assert_eq!(
            matcher.match_customer("L&M Zaterdag"),
            CustomerMatch::Route {
                route: "rijnsburg_evening".to_string(),
                period: Period::Evening
            }
        );
        // listed on both: the first (morning) list wins
        assert_eq!(
            matcher.match_customer("A. Heemskerk"),
            CustomerMatch::Route {
                route: "rijnsburg".to_string(),
                period: Period::Morning
            }
        );
    }

    #[test]
    fn test_unmatched_and_late_delivery() {
        let matcher = CustomerMatcher::new(&LogisticsConfig::default());
        assert_eq!(matcher.match_customer("Onbekende Kweker"), CustomerMatch::Unmatched);
        assert_eq!(matcher.match_customer(""), CustomerMatch::Unmatched);
        assert_eq!(matcher.match_customer("Plantion Ede"), CustomerMatch::LateDelivery);
        assert!(matcher.match_customer("Rheinmaas GmbH").is_matched());
    }

    #[test]
    fn test_danish_customers() {
        let matcher = CustomerMatcher::new(&LogisticsConfig::default());
        assert!(matcher.is_danish("Superflora BV"));
        assert!(matcher.is_danish("FLAMINGO FLOWERS"));
        assert!(matcher.is_danish("Dijk Flora Aalsmeer"));
        assert!(!matcher.is_danish("Fleura Metz"));
        assert!(!matcher.is_danish(""));
    }

    #[test]
    fn test_evening_hint() {
        let matcher = CustomerMatcher::new(&LogisticsConfig::default());
        assert!(matcher.has_evening_hint("By Special Zaterdag"));
        assert!(matcher.has_evening_hint("Nagel AVOND"));
        assert!(!matcher.has_evening_hint("Nagel"));
    }
}
