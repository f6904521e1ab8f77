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

//! Loading of return tables from CSV files.
//!
//! The first column of a returns file is the period, the remaining columns are the returns of
//! one asset or portfolio each. The header of the period column is ignored (it is often blank).
//! Empty cells, `NA`, `NaN` and the configured sentinel values load as missing (`NaN`).

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use indexmap::IndexMap;
use tailrisk_analysis::ReturnTable;

use crate::{config::CsvReturnsConfig, error::LoadError};

/// Date format specifiers which fix the day of the month.
const DAY_SPECIFIERS: [&str; 9] = ["%d", "%e", "%j", "%F", "%D", "%x", "%c", "%+", "%s"];

/// A source of historical returns.
pub trait ReturnsSource {
    /// Loads the returns as a table with one column per asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or holds invalid data.
    fn load(&self) -> Result<ReturnTable, LoadError>;
}

/// Loads a [`ReturnTable`] from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvReturnsLoader {
    path: PathBuf,
    config: CsvReturnsConfig,
}

impl CsvReturnsLoader {
    /// Creates a new [`CsvReturnsLoader`] instance.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, config: CsvReturnsConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn config(&self) -> &CsvReturnsConfig {
        &self.config
    }
}

impl ReturnsSource for CsvReturnsLoader {
    fn load(&self) -> Result<ReturnTable, LoadError> {
        log::debug!("Loading returns from {}", self.path.display());
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        load_returns_from_reader(BufReader::new(file), &self.config)
    }
}

/// Loads a [`ReturnTable`] from CSV data read from `reader`.
///
/// # Errors
///
/// Returns an error if:
/// - `config` is invalid.
/// - The data is not well-formed CSV (including rows of differing length).
/// - A selected or renamed column is not in the header.
/// - A period or return cannot be parsed.
/// - The periods are not strictly increasing.
pub fn load_returns_from_reader<R: Read>(
    reader: R,
    config: &CsvReturnsConfig,
) -> Result<ReturnTable, LoadError> {
    config
        .validate()
        .map_err(|e| LoadError::Config(e.to_string()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let selected = select_columns(&headers, config)?;

    let mut index = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); selected.len()];

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        index.push(parse_period(record.get(0).unwrap_or_default(), config, row)?);

        for ((position, name), column) in selected.iter().zip(values.iter_mut()) {
            let value = record.get(*position).unwrap_or_default();
            column.push(parse_return(value, config, name, row)?);
        }
    }

    let missing = values.iter().flatten().filter(|v| v.is_nan()).count();
    if missing > 0 {
        log::warn!("{missing} missing observations loaded as NaN");
    }

    let num_selected = selected.len();
    let columns: IndexMap<String, Vec<f64>> = selected
        .iter()
        .zip(values)
        .map(|((_, name), values)| (config.output_name(name).to_string(), values))
        .collect();

    if columns.len() != num_selected {
        return Err(LoadError::Config(
            "column selection and renames produce duplicate column names".to_string(),
        ));
    }

    let table = ReturnTable::new(index, columns)?;
    log::debug!(
        "Loaded {} periods of {} columns",
        table.len(),
        table.num_columns()
    );

    Ok(table)
}

/// Resolves the `(position, source name)` of every column to load, in output order.
fn select_columns(
    headers: &StringRecord,
    config: &CsvReturnsConfig,
) -> Result<Vec<(usize, String)>, LoadError> {
    let available: Vec<(usize, &str)> = headers.iter().enumerate().skip(1).collect();

    let selected = match &config.columns {
        Some(columns) => columns
            .iter()
            .map(|column| {
                available
                    .iter()
                    .find(|(_, name)| name == column)
                    .map(|(position, name)| (*position, (*name).to_string()))
                    .ok_or_else(|| LoadError::MissingColumn(column.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => available
            .iter()
            .map(|(position, name)| (*position, (*name).to_string()))
            .collect(),
    };

    if let Some(from) = config
        .rename
        .keys()
        .find(|from| !selected.iter().any(|(_, name)| name == *from))
    {
        return Err(LoadError::MissingColumn(from.clone()));
    }

    Ok(selected)
}

fn parse_period(
    value: &str,
    config: &CsvReturnsConfig,
    row: usize,
) -> Result<NaiveDate, LoadError> {
    let format = config.date_format.as_str();
    let parsed = if DAY_SPECIFIERS.iter().any(|spec| format.contains(spec)) {
        NaiveDate::parse_from_str(value, format)
    } else {
        // Periods without a day field (e.g. `192607`) start on the first of the month
        NaiveDate::parse_from_str(&format!("{value}01"), &format!("{format}%d"))
    };

    parsed
        .map(|date| config.period.normalize(date))
        .map_err(|_| LoadError::ParseDate {
            value: value.to_string(),
            row,
            format: format.to_string(),
        })
}

fn parse_return(
    value: &str,
    config: &CsvReturnsConfig,
    column: &str,
    row: usize,
) -> Result<f64, LoadError> {
    if value.is_empty() || value.eq_ignore_ascii_case("na") || value.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }

    let parsed: f64 = value.parse().map_err(|_| LoadError::ParseValue {
        value: value.to_string(),
        column: column.to_string(),
        row,
    })?;

    if config.is_na_value(parsed) {
        return Ok(f64::NAN);
    }

    Ok(if config.percent { parsed / 100.0 } else { parsed })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tailrisk_analysis::{ReturnData, semideviation, var_historic};
    use tailrisk_core::approx_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const FAMA_FRENCH_CSV: &str = "\
,<= 0,Lo 30,Med 40,Hi 30,Lo 10,Dec 2,Hi 10
192607,-99.99,0.36,1.13,3.08,-0.57,0.59,3.35
192608,-99.99,4.19,3.01,2.99,3.84,6.04,2.36
192609,-99.99,0.14,-0.36,0.67,-99.99,-0.53,0.19
192610,-99.99,-4.43,-3.29,-3.18,-3.72,-4.65,-2.88
";

    const HEDGE_FUND_CSV: &str = "\
date,Convertible Arbitrage,CTA Global,Distressed Securities
31/01/1997,1.19,3.93,1.78
28/02/1997,1.23,2.98,1.22
31/03/1997,0.78,-0.21,-0.12
";

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_values(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            if e.is_nan() {
                assert!(a.is_nan(), "expected NaN, was {a}");
            } else {
                assert!(approx_eq!(f64, *a, *e, epsilon = 1e-12), "expected {e}, was {a}");
            }
        }
    }

    #[rstest]
    fn test_load_fama_french_deciles() {
        let config = CsvReturnsConfig::fama_french_deciles();
        let table = load_returns_from_reader(FAMA_FRENCH_CSV.as_bytes(), &config).unwrap();

        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["SmallCap10", "LargeCap10"]
        );
        assert_eq!(
            table.index(),
            &[
                date(1926, 7, 1),
                date(1926, 8, 1),
                date(1926, 9, 1),
                date(1926, 10, 1)
            ]
        );
        assert_values(
            table.column_values("SmallCap10").unwrap(),
            &[-0.0057, 0.0384, f64::NAN, -0.0372],
        );
        assert_values(
            table.column_values("LargeCap10").unwrap(),
            &[0.0335, 0.0236, 0.0019, -0.0288],
        );
    }

    #[rstest]
    fn test_load_hedge_fund_indices_snaps_to_month_start() {
        let config = CsvReturnsConfig::hedge_fund_indices();
        let table = load_returns_from_reader(HEDGE_FUND_CSV.as_bytes(), &config).unwrap();

        assert_eq!(table.num_columns(), 3);
        assert_eq!(
            table.index(),
            &[date(1997, 1, 1), date(1997, 2, 1), date(1997, 3, 1)]
        );
        assert_values(
            table.column_values("CTA Global").unwrap(),
            &[0.0393, 0.0298, -0.0021],
        );
    }

    #[rstest]
    fn test_load_without_scaling_keeps_raw_values() {
        let data = "date,A\n2020-01-02,0.5\n2020-01-03,-0.25\n";
        let table =
            load_returns_from_reader(data.as_bytes(), &CsvReturnsConfig::default()).unwrap();

        assert_eq!(table.index(), &[date(2020, 1, 2), date(2020, 1, 3)]);
        assert_eq!(table.column_values("A").unwrap(), &[0.5, -0.25]);
    }

    #[rstest]
    #[case("")]
    #[case("NA")]
    #[case("nan")]
    fn test_missing_markers_load_as_nan(#[case] marker: &str) {
        let data = format!("date,A\n2020-01-02,{marker}\n2020-01-03,0.1\n");
        let table =
            load_returns_from_reader(data.as_bytes(), &CsvReturnsConfig::default()).unwrap();

        let values = table.column_values("A").unwrap();
        assert!(values[0].is_nan());
        assert_eq!(values[1], 0.1);
    }

    #[rstest]
    fn test_missing_selected_column() {
        let config = CsvReturnsConfig {
            columns: Some(vec!["B".to_string()]),
            ..Default::default()
        };
        let result = load_returns_from_reader("date,A\n2020-01-02,0.1\n".as_bytes(), &config);
        assert!(matches!(result, Err(LoadError::MissingColumn(name)) if name == "B"));
    }

    #[rstest]
    fn test_missing_renamed_column() {
        let config = CsvReturnsConfig {
            rename: IndexMap::from([("B".to_string(), "Bonds".to_string())]),
            ..Default::default()
        };
        let result = load_returns_from_reader("date,A\n2020-01-02,0.1\n".as_bytes(), &config);
        assert!(matches!(result, Err(LoadError::MissingColumn(name)) if name == "B"));
    }

    #[rstest]
    fn test_duplicate_output_names() {
        let config = CsvReturnsConfig {
            rename: IndexMap::from([("A".to_string(), "B".to_string())]),
            ..Default::default()
        };
        let result = load_returns_from_reader("date,A,B\n2020-01-02,0.1,0.2\n".as_bytes(), &config);
        assert!(matches!(result, Err(LoadError::Config(_))));
    }

    #[rstest]
    fn test_invalid_value() {
        let result = load_returns_from_reader(
            "date,A\n2020-01-02,0.1\n2020-01-03,abc\n".as_bytes(),
            &CsvReturnsConfig::default(),
        );
        match result {
            Err(LoadError::ParseValue { value, column, row }) => {
                assert_eq!(value, "abc");
                assert_eq!(column, "A");
                assert_eq!(row, 2);
            }
            other => panic!("expected ParseValue error, was {other:?}"),
        }
    }

    #[rstest]
    fn test_invalid_date() {
        let result = load_returns_from_reader(
            "date,A\n2020/01/02,0.1\n".as_bytes(),
            &CsvReturnsConfig::default(),
        );
        assert!(matches!(result, Err(LoadError::ParseDate { row: 1, .. })));
    }

    #[rstest]
    fn test_ragged_row_is_csv_error() {
        let result = load_returns_from_reader(
            "date,A,B\n2020-01-02,0.1\n".as_bytes(),
            &CsvReturnsConfig::default(),
        );
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[rstest]
    fn test_unordered_periods_are_rejected() {
        let result = load_returns_from_reader(
            "date,A\n2020-01-03,0.1\n2020-01-02,0.2\n".as_bytes(),
            &CsvReturnsConfig::default(),
        );
        assert!(matches!(result, Err(LoadError::Analysis(_))));
    }

    #[rstest]
    fn test_invalid_config_is_rejected() {
        let config = CsvReturnsConfig {
            date_format: String::new(),
            ..Default::default()
        };
        let result = load_returns_from_reader("date,A\n".as_bytes(), &config);
        assert!(matches!(result, Err(LoadError::Config(_))));
    }

    #[rstest]
    fn test_csv_loader_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FAMA_FRENCH_CSV.as_bytes()).unwrap();
        file.flush().unwrap();

        let loader = CsvReturnsLoader::new(file.path(), CsvReturnsConfig::fama_french_deciles());
        assert_eq!(loader.path(), file.path());

        let table = loader.load().unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.num_columns(), 2);
    }

    #[rstest]
    fn test_csv_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CsvReturnsLoader::new(
            dir.path().join("missing.csv"),
            CsvReturnsConfig::default(),
        );
        assert!(matches!(loader.load(), Err(LoadError::Io { .. })));
    }

    #[rstest]
    fn test_loaded_table_feeds_statistics() {
        let config = CsvReturnsConfig::fama_french_deciles();
        let table = load_returns_from_reader(FAMA_FRENCH_CSV.as_bytes(), &config).unwrap();
        let data = ReturnData::from(table);

        let semi = semideviation(&data);
        assert!(semi.get("SmallCap10").unwrap() > 0.0);
        assert!(approx_eq!(
            f64,
            semi.get("LargeCap10").unwrap(),
            0.0,
            epsilon = 1e-12
        ));

        // Percentiles propagate the missing observation
        let var = var_historic(&data, None);
        assert!(var.get("SmallCap10").unwrap().is_nan());
        assert!(var.get("LargeCap10").unwrap() > 0.0);
    }
}
