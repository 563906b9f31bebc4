use std::fmt;

use loadprices_market_data::models::AssetClass;
use loadprices_market_data::resolver::LabelClassifier;

use crate::errors::Result;
use crate::sheet::CellRange;

use super::constants::{
    DEFAULT_SHEET, FX_DATA_COLUMNS, FX_KEY_RANGE, INDICES_DATA_COLUMNS, INDICES_KEY_RANGE,
    STOCKS_DATA_COLUMNS, STOCKS_KEY_RANGE,
};

/// Where to read labels and where to write prices.
///
/// Data columns are bare column names (`"B"`), completed from the key
/// range; price goes to the first, currency to the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadJob {
    pub sheet: String,
    pub key_range: CellRange,
    pub data_columns: Vec<String>,
    /// Classes tried, in order, for every label
    pub asset_classes: Vec<AssetClass>,
}

impl LoadJob {
    /// Create a job, checking that every data column completes to a valid
    /// range against the key range.
    pub fn new<S: AsRef<str>>(
        sheet: &str,
        key_range: &str,
        data_columns: &[S],
        asset_classes: &[AssetClass],
    ) -> Result<Self> {
        let key_range = CellRange::parse(key_range)?;
        let data_columns = data_columns
            .iter()
            .map(|c| -> Result<String> {
                let column = c.as_ref().trim().to_string();
                CellRange::parse(&column)?.merge(&key_range)?;
                Ok(column)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sheet: sheet.to_string(),
            key_range,
            data_columns,
            asset_classes: asset_classes.to_vec(),
        })
    }

    /// Labels in `Sheet1!A1:A200`, prices in B and C.
    pub fn stocks() -> Result<Self> {
        Self::new(
            DEFAULT_SHEET,
            STOCKS_KEY_RANGE,
            &STOCKS_DATA_COLUMNS,
            &[AssetClass::Stock],
        )
    }

    /// Labels in `Sheet1!E1:G200`, rates in F.
    pub fn fx() -> Result<Self> {
        Self::new(DEFAULT_SHEET, FX_KEY_RANGE, &FX_DATA_COLUMNS, &[AssetClass::Fx])
    }

    /// Labels in `Sheet1!H1:H200`, levels in I and J.
    pub fn indices() -> Result<Self> {
        Self::new(
            DEFAULT_SHEET,
            INDICES_KEY_RANGE,
            &INDICES_DATA_COLUMNS,
            &[AssetClass::Index],
        )
    }

    /// Preset job for an asset class.
    pub fn preset(asset_class: AssetClass) -> Result<Self> {
        match asset_class {
            AssetClass::Stock => Self::stocks(),
            AssetClass::Fx => Self::fx(),
            AssetClass::Index => Self::indices(),
        }
    }

    pub fn classifier(&self) -> LabelClassifier {
        LabelClassifier::for_classes(&self.asset_classes)
    }

    /// Destination range of every data column over the whole key range.
    pub fn data_ranges(&self) -> Result<Vec<CellRange>> {
        self.data_columns
            .iter()
            .map(|c| CellRange::parse(c)?.merge(&self.key_range))
            .collect()
    }
}

impl fmt::Display for LoadJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let classes = self
            .asset_classes
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join("+");
        write!(
            f,
            "{}!{} -> [{}] ({})",
            self.sheet,
            self.key_range,
            self.data_columns.join(","),
            classes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_presets() {
        let job = LoadJob::stocks().unwrap();
        assert_eq!(job.to_string(), "Sheet1!A1:A200 -> [B,C] (stock)");

        let job = LoadJob::fx().unwrap();
        assert_eq!(job.to_string(), "Sheet1!E1:G200 -> [F] (fx)");

        let job = LoadJob::indices().unwrap();
        assert_eq!(job.to_string(), "Sheet1!H1:H200 -> [I,J] (index)");

        assert_eq!(LoadJob::preset(AssetClass::Fx).unwrap(), LoadJob::fx().unwrap());
    }

    #[test]
    fn test_data_ranges_follow_key_range() {
        let job = LoadJob::fx().unwrap();
        let ranges = job.data_ranges().unwrap();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].name(), "F1:F200");
    }

    #[test]
    fn test_invalid_key_range() {
        assert!(matches!(
            LoadJob::new("Sheet1", "A1:A2:A3", &["B"], &[AssetClass::Stock]),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_invalid_data_column() {
        assert!(matches!(
            LoadJob::new("Sheet1", "A1:A200", &["B!"], &[AssetClass::Stock]),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn test_classifier_uses_job_classes() {
        let job = LoadJob::new(
            "Sheet1",
            "A1:A10",
            &["B"],
            &[AssetClass::Stock, AssetClass::Fx],
        )
        .unwrap();
        assert_eq!(
            job.classifier().classes(),
            &[AssetClass::Stock, AssetClass::Fx]
        );
    }
}
