// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Provides a configuration for `CsvReturnsLoader` instances.

use std::fmt::{self, Display};

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use tailrisk_core::correctness::{check_predicate_true, check_valid_string};

/// Sentinel written by the Fama-French data library for missing observations.
pub const FAMA_FRENCH_NA_VALUE: f64 = -99.99;

/// The period each row of a returns file represents.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexPeriod {
    /// Rows are months; every date is normalized to the first day of its month.
    #[default]
    Monthly,
    /// Rows are days; dates are kept as parsed.
    Daily,
}

impl IndexPeriod {
    /// Returns the canonical date of the period containing `date`.
    #[must_use]
    pub fn normalize(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Monthly => date.with_day(1).unwrap_or(date),
            Self::Daily => date,
        }
    }
}

impl Display for IndexPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Configuration for `CsvReturnsLoader` instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CsvReturnsConfig {
    /// The columns to keep, in output order. All columns are kept when `None`.
    pub columns: Option<Vec<String>>,
    /// Output names for source columns, keyed by source column name.
    pub rename: IndexMap<String, String>,
    /// If the file holds percentages which should be converted to fractional returns.
    pub percent: bool,
    /// Values which denote a missing observation.
    pub na_values: Vec<f64>,
    /// The `chrono` format of the period column. A format without a day field (e.g. `%Y%m`)
    /// is parsed as the first day of the period.
    pub date_format: String,
    /// The period each row represents.
    pub period: IndexPeriod,
}

impl Default for CsvReturnsConfig {
    /// Creates a new default [`CsvReturnsConfig`] instance.
    fn default() -> Self {
        Self {
            columns: None,
            rename: IndexMap::new(),
            percent: false,
            na_values: Vec::new(),
            date_format: "%Y-%m-%d".to_string(),
            period: IndexPeriod::Daily,
        }
    }
}

impl CsvReturnsConfig {
    /// Returns the configuration of the Fama-French portfolios formed on market equity
    /// (equal-weighted, monthly): the bottom and top deciles renamed to `SmallCap10` and
    /// `LargeCap10`.
    #[must_use]
    pub fn fama_french_deciles() -> Self {
        Self {
            columns: Some(vec!["Lo 10".to_string(), "Hi 10".to_string()]),
            rename: IndexMap::from([
                ("Lo 10".to_string(), "SmallCap10".to_string()),
                ("Hi 10".to_string(), "LargeCap10".to_string()),
            ]),
            percent: true,
            na_values: vec![FAMA_FRENCH_NA_VALUE],
            date_format: "%Y%m".to_string(),
            period: IndexPeriod::Monthly,
        }
    }

    /// Returns the configuration of the EDHEC hedge fund indices (monthly, all columns).
    #[must_use]
    pub fn hedge_fund_indices() -> Self {
        Self {
            columns: None,
            rename: IndexMap::new(),
            percent: true,
            na_values: Vec::new(),
            date_format: "%d/%m/%Y".to_string(),
            period: IndexPeriod::Monthly,
        }
    }

    /// Returns the name a source column is given in the loaded table.
    #[must_use]
    pub fn output_name<'a>(&'a self, column: &'a str) -> &'a str {
        self.rename.get(column).map_or(column, String::as_str)
    }

    /// Returns whether `value` is one of the configured missing-value sentinels.
    #[must_use]
    pub fn is_na_value(&self, value: f64) -> bool {
        self.na_values
            .iter()
            .any(|na| (value - na).abs() < f64::EPSILON * na.abs().max(1.0))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `date_format` or any selected or renamed column is blank, a column is
    /// selected twice, or a missing-value sentinel is not finite.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_valid_string(&self.date_format, "date_format")?;
        if let Some(columns) = &self.columns {
            check_predicate_true(!columns.is_empty(), "`columns` was empty")?;
            for (i, column) in columns.iter().enumerate() {
                check_valid_string(column, "columns")?;
                check_predicate_true(
                    !columns[..i].contains(column),
                    &format!("column '{column}' was selected more than once"),
                )?;
            }
        }
        for (from, to) in &self.rename {
            check_valid_string(from, "rename")?;
            check_valid_string(to, "rename")?;
        }
        for value in &self.na_values {
            check_predicate_true(value.is_finite(), &format!("na value {value} was not finite"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_default_is_valid() {
        let config = CsvReturnsConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.percent);
        assert_eq!(config.period, IndexPeriod::Daily);
    }

    #[rstest]
    fn test_presets_are_valid() {
        assert!(CsvReturnsConfig::fama_french_deciles().validate().is_ok());
        assert!(CsvReturnsConfig::hedge_fund_indices().validate().is_ok());
    }

    #[rstest]
    fn test_fama_french_output_names() {
        let config = CsvReturnsConfig::fama_french_deciles();
        assert_eq!(config.output_name("Lo 10"), "SmallCap10");
        assert_eq!(config.output_name("Hi 10"), "LargeCap10");
        assert_eq!(config.output_name("Lo 20"), "Lo 20");
    }

    #[rstest]
    #[case(-99.99, true)]
    #[case(-99.98, false)]
    #[case(0.0, false)]
    fn test_is_na_value(#[case] value: f64, #[case] expected: bool) {
        let config = CsvReturnsConfig::fama_french_deciles();
        assert_eq!(config.is_na_value(value), expected);
    }

    #[rstest]
    fn test_validate_rejects_duplicate_columns() {
        let config = CsvReturnsConfig {
            columns: Some(vec!["A".to_string(), "A".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn test_validate_rejects_non_finite_na_value() {
        let config = CsvReturnsConfig {
            na_values: vec![f64::NAN],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn test_validate_rejects_blank_date_format() {
        let config = CsvReturnsConfig {
            date_format: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn test_monthly_normalize() {
        let date = NaiveDate::from_ymd_opt(1997, 1, 31).unwrap();
        assert_eq!(
            IndexPeriod::Monthly.normalize(date),
            NaiveDate::from_ymd_opt(1997, 1, 1).unwrap()
        );
        assert_eq!(IndexPeriod::Daily.normalize(date), date);
    }

    #[rstest]
    fn test_deserialize_partial_uses_defaults() {
        let config: CsvReturnsConfig =
            serde_json::from_str(r#"{"percent": true, "period": "MONTHLY"}"#).unwrap();
        assert!(config.percent);
        assert_eq!(config.period, IndexPeriod::Monthly);
        assert_eq!(config.date_format, "%Y-%m-%d");
    }
}
