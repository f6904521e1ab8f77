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

//! The `RiskStatistic` trait and the shape of its results.

use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::returns::{ReturnData, ReturnSeries};

/// The result of a polymorphic statistic: one value for a series, or one value per column
/// (keyed by the original column names, in column order) for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue<T> {
    Scalar(T),
    PerColumn(IndexMap<String, T>),
}

impl<T: Copy> StatValue<T> {
    /// Returns the scalar value, or `None` for a per-column result.
    #[must_use]
    pub fn as_scalar(&self) -> Option<T> {
        match self {
            Self::Scalar(value) => Some(*value),
            Self::PerColumn(_) => None,
        }
    }

    /// Returns the value for `column`, or `None` for a scalar result or an unknown column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<T> {
        match self {
            Self::Scalar(_) => None,
            Self::PerColumn(values) => values.get(column).copied(),
        }
    }

    #[must_use]
    pub fn as_per_column(&self) -> Option<&IndexMap<String, T>> {
        match self {
            Self::Scalar(_) => None,
            Self::PerColumn(values) => Some(values),
        }
    }

    /// Applies `f` to every value.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> StatValue<U> {
        match self {
            Self::Scalar(value) => StatValue::Scalar(f(value)),
            Self::PerColumn(values) => StatValue::PerColumn(
                values
                    .into_iter()
                    .map(|(name, value)| (name, f(value)))
                    .collect(),
            ),
        }
    }
}

/// A statistic computed over the observations of a return series.
///
/// Implementors provide [`RiskStatistic::calculate_from_values`]; dispatch over
/// [`ReturnData`] is shared by every statistic.
pub trait RiskStatistic: Debug {
    type Item;

    fn name(&self) -> String;

    /// Calculates the statistic over raw observations (`NaN` marks a missing value).
    fn calculate_from_values(&self, values: &[f64]) -> Self::Item;

    fn calculate_from_series(&self, series: &ReturnSeries) -> Self::Item {
        self.calculate_from_values(series.values())
    }

    /// Calculates the statistic for a series, or column-wise for a table.
    fn calculate(&self, data: &ReturnData) -> StatValue<Self::Item> {
        data.map_columns(|values| self.calculate_from_values(values))
    }
}
