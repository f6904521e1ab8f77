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

//! Return series and return tables, the inputs of every risk statistic.
//!
//! A [`ReturnSeries`] is one ordered sequence of periodic fractional returns (`0.01` = 1%) on a
//! strictly increasing time index. A [`ReturnTable`] holds several named columns aligned on a
//! shared index. [`ReturnData`] is the tagged union of the two accepted by polymorphic statistics.
//!
//! Missing observations are stored as `f64::NAN` and serialize as JSON `null`.

use chrono::{Months, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tailrisk_core::correctness::{check_equal_usize, check_predicate_true, check_valid_string};

use crate::{error::AnalysisError, statistic::StatValue};

/// Time axis shared by series and tables.
///
/// Monthly periods are keyed by the first day of their month.
pub type TimeIndex = Vec<NaiveDate>;

/// Creates a monthly index of `len` periods starting at `start`.
#[must_use]
pub fn monthly_index(start: NaiveDate, len: usize) -> TimeIndex {
    (0..len)
        .map_while(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|months| start.checked_add_months(Months::new(months)))
        })
        .collect()
}

fn check_index(index: &[NaiveDate]) -> anyhow::Result<()> {
    check_predicate_true(
        index.windows(2).all(|pair| pair[0] < pair[1]),
        "index must be strictly increasing",
    )
}

fn from_nullable(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// An ordered sequence of periodic returns indexed by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReturnSeries")]
pub struct ReturnSeries {
    index: TimeIndex,
    values: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReturnSeries {
    index: TimeIndex,
    values: Vec<Option<f64>>,
}

impl TryFrom<RawReturnSeries> for ReturnSeries {
    type Error = AnalysisError;

    fn try_from(raw: RawReturnSeries) -> Result<Self, Self::Error> {
        Self::new(raw.index, from_nullable(raw.values))
    }
}

impl ReturnSeries {
    /// Creates a new [`ReturnSeries`] instance.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if `index` and `values` differ in length
    /// or `index` is not strictly increasing.
    pub fn new(index: TimeIndex, values: Vec<f64>) -> Result<Self, AnalysisError> {
        check_equal_usize(index.len(), values.len(), "index", "values")
            .and_then(|()| check_index(&index))
            .map_err(AnalysisError::invalid_input)?;

        Ok(Self { index, values })
    }

    /// Creates a monthly series starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if the monthly index cannot be represented.
    pub fn monthly(start: NaiveDate, values: Vec<f64>) -> Result<Self, AnalysisError> {
        Self::new(monthly_index(start, values.len()), values)
    }

    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns an iterator over `(period, return)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, f64)> {
        self.index.iter().zip(self.values.iter().copied())
    }
}

/// Named return series aligned on a shared time index.
///
/// Column order is insertion order and carries no meaning beyond presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReturnTable")]
pub struct ReturnTable {
    index: TimeIndex,
    columns: IndexMap<String, Vec<f64>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReturnTable {
    index: TimeIndex,
    columns: IndexMap<String, Vec<Option<f64>>>,
}

impl TryFrom<RawReturnTable> for ReturnTable {
    type Error = AnalysisError;

    fn try_from(raw: RawReturnTable) -> Result<Self, Self::Error> {
        let columns = raw
            .columns
            .into_iter()
            .map(|(name, values)| (name, from_nullable(values)))
            .collect();
        Self::new(raw.index, columns)
    }
}

impl ReturnTable {
    /// Creates a new [`ReturnTable`] instance.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if any column length differs from the index
    /// length, a column name is blank, or `index` is not strictly increasing.
    pub fn new(
        index: TimeIndex,
        columns: IndexMap<String, Vec<f64>>,
    ) -> Result<Self, AnalysisError> {
        check_index(&index).map_err(AnalysisError::invalid_input)?;
        for (name, values) in &columns {
            check_valid_string(name, "column")
                .and_then(|()| check_equal_usize(values.len(), index.len(), name, "index"))
                .map_err(AnalysisError::invalid_input)?;
        }

        Ok(Self { index, columns })
    }

    /// Creates a table with no columns on the given index.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if `index` is not strictly increasing.
    pub fn with_index(index: TimeIndex) -> Result<Self, AnalysisError> {
        Self::new(index, IndexMap::new())
    }

    /// Appends (or replaces) the column `name` with the values of `series`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if the series index differs from the table
    /// index or `name` is blank.
    pub fn insert_series(
        &mut self,
        name: impl Into<String>,
        series: ReturnSeries,
    ) -> Result<(), AnalysisError> {
        let name = name.into();
        check_valid_string(&name, "column").map_err(AnalysisError::invalid_input)?;
        if series.index != self.index {
            return Err(AnalysisError::invalid_input(format!(
                "series '{name}' is not aligned with the table index"
            )));
        }

        self.columns.insert(name, series.values);
        Ok(())
    }

    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns an iterator over `(name, values)` in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Returns a copy of column `name` as a standalone series.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ReturnSeries> {
        self.columns.get(name).map(|values| ReturnSeries {
            index: self.index.clone(),
            values: values.clone(),
        })
    }

    /// Returns a new table holding only `names`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if any name is not a column of this table.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, AnalysisError> {
        let mut columns = IndexMap::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let values = self
                .columns
                .get(name)
                .ok_or_else(|| AnalysisError::invalid_input(format!("no column named '{name}'")))?;
            columns.insert(name.to_string(), values.clone());
        }

        Ok(Self {
            index: self.index.clone(),
            columns,
        })
    }

    /// Returns a new table with every value multiplied by `factor` (missing values stay missing).
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), values.iter().map(|v| v * factor).collect()))
            .collect();

        Self {
            index: self.index.clone(),
            columns,
        }
    }
}

/// A return series or a return table: the polymorphic input of the scalar statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnData {
    Series(ReturnSeries),
    Table(ReturnTable),
}

impl ReturnData {
    /// Parses JSON into [`ReturnData`].
    ///
    /// A series is `{"index": [...], "values": [...]}` and a table is
    /// `{"index": [...], "columns": {"name": [...], ...}}`, with `null` marking a missing value.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidInputType`] if `json` is not valid JSON or describes
    /// anything other than a series or a table.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        if let Ok(data) = serde_json::from_str::<Self>(json) {
            return Ok(data);
        }

        let value: Value = serde_json::from_str(json).map_err(AnalysisError::invalid_input)?;
        Self::try_from(value)
    }

    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        match self {
            Self::Series(series) => series.index(),
            Self::Table(table) => table.index(),
        }
    }

    /// Applies `f` to the series, or to every column of the table.
    pub fn map_columns<T>(&self, f: impl Fn(&[f64]) -> T) -> StatValue<T> {
        match self {
            Self::Series(series) => StatValue::Scalar(f(series.values())),
            Self::Table(table) => StatValue::PerColumn(
                table
                    .columns()
                    .map(|(name, values)| {
                        log::trace!("Computing column '{name}' ({} periods)", values.len());
                        (name.to_string(), f(values))
                    })
                    .collect(),
            ),
        }
    }
}

impl From<ReturnSeries> for ReturnData {
    fn from(series: ReturnSeries) -> Self {
        Self::Series(series)
    }
}

impl From<ReturnTable> for ReturnData {
    fn from(table: ReturnTable) -> Self {
        Self::Table(table)
    }
}

fn describe_json(value: &Value) -> &'static str {
    match value {
        Value::Null => "was null",
        Value::Bool(_) => "was a boolean",
        Value::Number(_) => "was a scalar",
        Value::String(_) => "was a string",
        Value::Array(_) => "was a bare array (an index is required)",
        Value::Object(_) => "was an object of unrecognized structure",
    }
}

impl TryFrom<Value> for ReturnData {
    type Error = AnalysisError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        // `values` marks a series, `columns` a table
        if value.get("values").is_some() {
            let raw: RawReturnSeries = serde_json::from_value(value).map_err(|e| {
                AnalysisError::invalid_input(format!("was not a valid return series: {e}"))
            })?;
            return Ok(Self::Series(ReturnSeries::try_from(raw)?));
        }

        if value.get("columns").is_some() {
            let raw: RawReturnTable = serde_json::from_value(value).map_err(|e| {
                AnalysisError::invalid_input(format!("was not a valid return table: {e}"))
            })?;
            return Ok(Self::Table(ReturnTable::try_from(raw)?));
        }

        Err(AnalysisError::invalid_input(describe_json(&value)))
    }
}
