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

//! Wealth index, running peaks and drawdowns of a return series.

use std::fmt::{self, Display};

use chrono::NaiveDate;
use serde::Serialize;
use tailrisk_core::correctness::{FAILED, check_positive_f64};

use crate::{
    returns::{ReturnSeries, TimeIndex},
    statistic::RiskStatistic,
};

/// The wealth a drawdown table starts compounding from.
pub const DEFAULT_STARTING_WEALTH: f64 = 1000.0;

/// Wealth index, previous peaks and fractional drawdowns over the index of a return series.
///
/// A missing return leaves all three columns missing at that period; compounding and the
/// running peak resume from the last valid period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawdownTable {
    index: TimeIndex,
    wealth: Vec<f64>,
    peaks: Vec<f64>,
    drawdown: Vec<f64>,
}

impl DrawdownTable {
    #[must_use]
    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Returns the compounded wealth index.
    #[must_use]
    pub fn wealth(&self) -> &[f64] {
        &self.wealth
    }

    /// Returns the running maximum of the wealth index (inclusive of each period).
    #[must_use]
    pub fn peaks(&self) -> &[f64] {
        &self.peaks
    }

    /// Returns the fractional decline of wealth from its previous peak (always <= 0).
    #[must_use]
    pub fn drawdown(&self) -> &[f64] {
        &self.drawdown
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the deepest drawdown, or `NaN` if no period has a valid drawdown.
    #[must_use]
    pub fn max_drawdown(&self) -> f64 {
        deepest(&self.drawdown)
    }

    /// Returns the period at which the deepest drawdown occurred.
    #[must_use]
    pub fn max_drawdown_period(&self) -> Option<NaiveDate> {
        self.drawdown
            .iter()
            .enumerate()
            .filter(|(_, dd)| !dd.is_nan())
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| self.index[i])
    }
}

/// Builds the drawdown table of `series` starting from [`DEFAULT_STARTING_WEALTH`].
#[must_use]
pub fn drawdowns(series: &ReturnSeries) -> DrawdownTable {
    drawdowns_with_base(series, DEFAULT_STARTING_WEALTH)
}

/// Builds the drawdown table of `series` starting from `starting_wealth`.
///
/// # Panics
///
/// Panics if `starting_wealth` is not positive and finite.
#[must_use]
pub fn drawdowns_with_base(series: &ReturnSeries, starting_wealth: f64) -> DrawdownTable {
    check_positive_f64(starting_wealth, "starting_wealth").expect(FAILED);

    let (wealth, peaks, drawdown) = compound(series.values(), starting_wealth);
    DrawdownTable {
        index: series.index().to_vec(),
        wealth,
        peaks,
        drawdown,
    }
}

fn compound(returns: &[f64], starting_wealth: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut wealth = Vec::with_capacity(returns.len());
    let mut peaks = Vec::with_capacity(returns.len());
    let mut drawdown = Vec::with_capacity(returns.len());

    let mut growth = 1.0;
    let mut peak = f64::NAN;

    for &r in returns {
        if r.is_nan() {
            wealth.push(f64::NAN);
            peaks.push(f64::NAN);
            drawdown.push(f64::NAN);
            continue;
        }

        growth *= 1.0 + r;
        let value = starting_wealth * growth;
        peak = if peak.is_nan() { value } else { peak.max(value) };

        wealth.push(value);
        peaks.push(peak);
        drawdown.push((value - peak) / peak);
    }

    (wealth, peaks, drawdown)
}

fn deepest(drawdown: &[f64]) -> f64 {
    drawdown
        .iter()
        .copied()
        .filter(|dd| !dd.is_nan())
        .reduce(f64::min)
        .unwrap_or(f64::NAN)
}

/// The deepest peak-to-trough decline of the compounded wealth index (a value <= 0).
#[derive(Debug, Clone, Default)]
pub struct MaxDrawdown {}

impl Display for MaxDrawdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Max Drawdown")
    }
}

impl RiskStatistic for MaxDrawdown {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        let (_, _, drawdown) = compound(values, DEFAULT_STARTING_WEALTH);
        deepest(&drawdown)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
