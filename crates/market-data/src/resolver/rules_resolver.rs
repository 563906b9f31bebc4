//! Rule tables - ordered label patterns for each asset class.
//!
//! Every asset class owns a table of [`TickerRule`]s. A label is tested
//! against the rules of its class in table order and the first rule that
//! matches builds the canonical ticker. A label no rule matches has no ticker.
//!
//! | Class | Rule | Label | Ticker |
//! |-------|------|-------|--------|
//! | Stock | `EPIC` | `BP` | `BP` |
//! | Stock | `EPIC_DOT` | `BP.` | `BP` |
//! | Stock | `EPIC_MARKET` | `BP.L` | `BP.L` |
//! | Fx | `FXPAIR_X` | `EURGBP=X` | `EURGBP=X` |
//! | Fx | `FXPAIR_SEP` | `EUR:GBP`, `EUR/GBP` | `EURGBP=X` |
//! | Fx | `FXPAIR_CH6` | `EURGBP` | `EURGBP=X` |
//! | Index | `INDEX_HAT` | `^FTSE` | `^FTSE` |
//! | Index | `INDEX` | `FTSE` | `^FTSE` |

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::models::AssetClass;

/// Suffix the quote endpoint expects on currency pairs.
pub const FX_PAIR_SUFFIX: &str = "=X";

/// Prefix the quote endpoint expects on index codes.
pub const INDEX_PREFIX: &str = "^";

/// One label pattern and the ticker it produces.
pub struct TickerRule {
    /// Short rule name used in diagnostics
    pub name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> String,
}

impl TickerRule {
    fn new(name: &'static str, pattern: &str, build: fn(&Captures<'_>) -> String) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid regex pattern"),
            build,
        }
    }

    /// Apply the rule, returning the canonical ticker on a match.
    pub fn apply(&self, label: &str) -> Option<String> {
        self.pattern.captures(label).map(|caps| (self.build)(&caps))
    }
}

fn first_group(caps: &Captures<'_>) -> String {
    caps[1].to_string()
}

fn fx_pair(caps: &Captures<'_>) -> String {
    format!("{}{}{}", &caps[1], &caps[2], FX_PAIR_SUFFIX)
}

fn fx_bare(caps: &Captures<'_>) -> String {
    format!("{}{}", &caps[1], FX_PAIR_SUFFIX)
}

fn index_bare(caps: &Captures<'_>) -> String {
    format!("{}{}", INDEX_PREFIX, &caps[1])
}

lazy_static! {
    /// Equity codes: 2-4 alphanumerics, optionally a dot and a market suffix.
    static ref STOCK_RULES: Vec<TickerRule> = vec![
        TickerRule::new("EPIC", r"^([A-Z0-9]{2,4})$", first_group),
        TickerRule::new("EPIC_DOT", r"^([A-Z0-9]{2,4})\.$", first_group),
        TickerRule::new("EPIC_MARKET", r"^([A-Z0-9]{2,4}\.[A-Z]+)$", first_group),
    ];

    /// Currency pairs: six letters, suffixed for the query grammar.
    static ref FX_RULES: Vec<TickerRule> = vec![
        TickerRule::new("FXPAIR_X", r"^([A-Z]{6}=X)$", first_group),
        TickerRule::new("FXPAIR_SEP", r"^([A-Z]{3})[:/]([A-Z]{3})$", fx_pair),
        TickerRule::new("FXPAIR_CH6", r"^([A-Z]{6})$", fx_bare),
    ];

    /// Index codes: a letter and at least two more alphanumerics, caret-prefixed.
    static ref INDEX_RULES: Vec<TickerRule> = vec![
        TickerRule::new("INDEX_HAT", r"^(\^[A-Z][A-Z0-9]{2,})$", first_group),
        TickerRule::new("INDEX", r"^([A-Z][A-Z0-9]{2,})$", index_bare),
    ];
}

/// Ordered rule table for an asset class.
pub fn rules_for(asset_class: AssetClass) -> &'static [TickerRule] {
    match asset_class {
        AssetClass::Stock => STOCK_RULES.as_slice(),
        AssetClass::Fx => FX_RULES.as_slice(),
        AssetClass::Index => INDEX_RULES.as_slice(),
    }
}

/// Match a label against one class, returning the winning rule and ticker.
pub fn match_rule(asset_class: AssetClass, label: &str) -> Option<(&'static TickerRule, String)> {
    rules_for(asset_class)
        .iter()
        .find_map(|rule| rule.apply(label).map(|ticker| (rule, ticker)))
}
