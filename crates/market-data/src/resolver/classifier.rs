//! Label classifier - maps free-text labels to tickers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::debug;

use crate::models::{AssetClass, Label, Ticker};
use crate::provider::yahoo::build_url;

use super::rules_resolver::match_rule;

/// Resolves labels to tickers using the rule tables of one or more asset
/// classes.
///
/// Classes are tried in the order given; within a class the rules are tried
/// in table order. The first match wins. Labels that match nothing are
/// dropped from the result without error.
#[derive(Clone, Debug)]
pub struct LabelClassifier {
    classes: Vec<AssetClass>,
}

impl LabelClassifier {
    /// Classifier for a single asset class.
    pub fn new(asset_class: AssetClass) -> Self {
        Self {
            classes: vec![asset_class],
        }
    }

    /// Classifier trying several asset classes in order.
    pub fn for_classes(classes: &[AssetClass]) -> Self {
        let mut unique = Vec::with_capacity(classes.len());
        for class in classes {
            if !unique.contains(class) {
                unique.push(*class);
            }
        }
        Self { classes: unique }
    }

    pub fn classes(&self) -> &[AssetClass] {
        &self.classes
    }

    /// Resolve one label, returning its class and ticker.
    ///
    /// Surrounding whitespace is ignored; matching is otherwise exact and
    /// case-sensitive.
    pub fn match_ticker(&self, label: &str) -> Option<(AssetClass, Ticker)> {
        let text = label.trim();
        if text.is_empty() {
            return None;
        }
        self.classes.iter().find_map(|class| {
            match_rule(*class, text).map(|(rule, ticker)| {
                debug!("{}: {} => {}", rule.name, label, ticker);
                (*class, Ticker::from(ticker))
            })
        })
    }

    /// Resolve every label in `labels`.
    pub fn classify<I, S>(&self, labels: I) -> Classification
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classification = Classification::default();
        for label in labels {
            let label = label.as_ref();
            if classification.get(label).is_some() {
                continue;
            }
            if let Some((class, ticker)) = self.match_ticker(label) {
                classification.insert(label.to_string(), class, ticker);
            }
        }
        debug!("tickers: {:?}", classification.tickers());
        classification
    }
}

/// Classify `labels` with the rules of a single asset class.
pub fn classify<I, S>(labels: I, asset_class: AssetClass) -> Classification
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    LabelClassifier::new(asset_class).classify(labels)
}

/// One resolved label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedLabel {
    pub label: Label,
    pub asset_class: AssetClass,
    pub ticker: Ticker,
}

/// Read-only mapping of label to ticker, in first-seen label order.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    entries: Vec<ClassifiedLabel>,
    index: HashMap<Label, usize>,
}

impl Classification {
    fn insert(&mut self, label: Label, asset_class: AssetClass, ticker: Ticker) {
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push(ClassifiedLabel {
            label,
            asset_class,
            ticker,
        });
    }

    /// Ticker for a label, or `None` if the label was not matched.
    pub fn get(&self, label: &str) -> Option<&Ticker> {
        self.index.get(label).map(|&i| &self.entries[i].ticker)
    }

    /// Asset class the label was resolved under.
    pub fn asset_class_of(&self, label: &str) -> Option<AssetClass> {
        self.index.get(label).map(|&i| self.entries[i].asset_class)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedLabel> {
        self.entries.iter()
    }

    /// Distinct tickers in first-seen order.
    ///
    /// Labels resolving to the same ticker ("BP" and "BP.") contribute it once.
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(Arc::clone(&e.ticker)))
            .map(|e| Arc::clone(&e.ticker))
            .collect()
    }

    /// Quote URL for the stored tickers.
    pub fn url(&self, base: &str) -> String {
        build_url(base, self.tickers())
    }

    /// Quote URL for `tickers`, falling back to the stored tickers when the
    /// override is empty.
    pub fn url_with<S: AsRef<str>>(&self, base: &str, tickers: &[S]) -> String {
        if tickers.is_empty() {
            self.url(base)
        } else {
            build_url(base, tickers)
        }
    }
}
