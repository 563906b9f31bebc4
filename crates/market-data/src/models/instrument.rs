use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Asset classification used to pick a ticker grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Equity code, optionally with a market suffix ("BP", "BP.L")
    Stock,
    /// Currency pair ("EURUSD=X")
    Fx,
    /// Market index ("^FTSE")
    Index,
}

impl AssetClass {
    /// All classes in default classification order.
    pub const ALL: [AssetClass; 3] = [AssetClass::Stock, AssetClass::Fx, AssetClass::Index];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Fx => "fx",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stock" | "stocks" | "equity" | "epic" => Ok(Self::Stock),
            "fx" | "currency" | "currencies" => Ok(Self::Fx),
            "index" | "indices" | "indexes" => Ok(Self::Index),
            other => Err(MarketDataError::UnknownAssetClass(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("stocks".parse::<AssetClass>().unwrap(), AssetClass::Stock);
        assert_eq!("EQUITY".parse::<AssetClass>().unwrap(), AssetClass::Stock);
        assert_eq!(" fx ".parse::<AssetClass>().unwrap(), AssetClass::Fx);
        assert_eq!("indices".parse::<AssetClass>().unwrap(), AssetClass::Index);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "bond".parse::<AssetClass>().unwrap_err();
        assert_eq!(err, MarketDataError::UnknownAssetClass("bond".to_string()));
    }

    #[test]
    fn test_display_round_trips() {
        for class in AssetClass::ALL {
            assert_eq!(class.to_string().parse::<AssetClass>().unwrap(), class);
        }
    }
}
