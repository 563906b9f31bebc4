//! Label resolution for the quote endpoint.
//!
//! This module converts raw spreadsheet labels into the ticker grammar the
//! quote endpoint understands.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    LabelClassifier                        │
//! │                                                           │
//! │  for each requested AssetClass (in order)                 │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │ Rule table of the class (in order)                  │  │
//! │  │   Stock: EPIC, EPIC_DOT, EPIC_MARKET                │  │
//! │  │   Fx:    FXPAIR_X, FXPAIR_SEP, FXPAIR_CH6           │  │
//! │  │   Index: INDEX_HAT, INDEX                           │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                  │ first match                            │
//! │                  ▼                                        │
//! │            Classification (label -> ticker)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A label that no rule matches is left out of the [`Classification`]; this
//! is not an error.
//!
//! # Example
//!
//! ```
//! use loadprices_market_data::models::AssetClass;
//! use loadprices_market_data::resolver::classify;
//!
//! let classification = classify(["EUR:USD", "GBPEUR", "nonsense"], AssetClass::Fx);
//! assert_eq!(classification.get("EUR:USD").map(|t| t.as_ref()), Some("EURUSD=X"));
//! assert_eq!(classification.get("GBPEUR").map(|t| t.as_ref()), Some("GBPEUR=X"));
//! assert!(classification.get("nonsense").is_none());
//! ```

mod classifier;
mod rules_resolver;

pub use classifier::{classify, ClassifiedLabel, Classification, LabelClassifier};
pub use rules_resolver::{match_rule, rules_for, TickerRule, FX_PAIR_SUFFIX, INDEX_PREFIX};
