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

use std::fmt::{self, Display};

use tailrisk_core::{
    correctness::{FAILED, check_in_range_inclusive_f64},
    math::percentile,
};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
};

/// The default VaR level, in percent.
pub const DEFAULT_VAR_LEVEL: f64 = 5.0;

/// Historic Value at Risk: the loss such that `level` percent of the returns fall below it,
/// reported as a positive number when the left tail is negative.
#[derive(Debug, Clone)]
pub struct HistoricVaR {
    level: f64,
}

impl HistoricVaR {
    /// Creates a new [`HistoricVaR`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not within [0, 100].
    pub fn new_checked(level: Option<f64>) -> anyhow::Result<Self> {
        let level = level.unwrap_or(DEFAULT_VAR_LEVEL);
        check_in_range_inclusive_f64(level, 0.0, 100.0, "level")?;
        Ok(Self { level })
    }

    /// Creates a new [`HistoricVaR`] instance (the level defaults to 5%).
    ///
    /// # Panics
    ///
    /// Panics if `level` is not within [0, 100].
    #[must_use]
    pub fn new(level: Option<f64>) -> Self {
        Self::new_checked(level).expect(FAILED)
    }

    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }
}

impl Default for HistoricVaR {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Display for HistoricVaR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Historic VaR ({}%)", self.level)
    }
}

impl RiskStatistic for HistoricVaR {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        -percentile(values, self.level)
    }
}

/// Returns the historic VaR of a series, or of each column of a table.
///
/// # Panics
///
/// Panics if `level` is not within [0, 100].
#[must_use]
pub fn var_historic(r: &ReturnData, level: Option<f64>) -> StatValue<f64> {
    HistoricVaR::new(level).calculate(r)
}
