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

//! The Jarque-Bera goodness-of-fit test for normality.
//!
//! The statistic is `JB = n / 6 * (S^2 + (K - 3)^2 / 4)` with `S` the skewness and `K` the
//! Pearson kurtosis of the sample. Under normality `JB` is asymptotically chi-squared with two
//! degrees of freedom, which gives the p-value.

use std::fmt::{self, Display};

use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tailrisk_core::correctness::{FAILED, check_in_range_inclusive_f64};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
    statistics::{kurtosis::Kurtosis, skewness::Skewness},
};

/// The default significance level of [`is_normal`].
pub const DEFAULT_NORMALITY_LEVEL: f64 = 0.01;

/// The outcome of a Jarque-Bera test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JarqueBera {
    pub statistic: f64,
    pub p_value: f64,
}

/// Runs the Jarque-Bera test over `values`.
///
/// A missing value anywhere in the sample makes both fields `NaN`.
#[must_use]
pub fn jarque_bera(values: &[f64]) -> JarqueBera {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return JarqueBera {
            statistic: f64::NAN,
            p_value: f64::NAN,
        };
    }

    let n = values.len() as f64;
    let skew = Skewness::default().calculate_from_values(values);
    let excess = Kurtosis::default().calculate_from_values(values) - 3.0;
    let statistic = n / 6.0 * excess.mul_add(excess / 4.0, skew.powi(2));

    let p_value = if statistic.is_nan() {
        f64::NAN
    } else if statistic.is_infinite() {
        0.0
    } else {
        ChiSquared::new(2.0).map_or(f64::NAN, |dist| dist.sf(statistic))
    };

    JarqueBera { statistic, p_value }
}

/// The p-value of the Jarque-Bera test.
#[derive(Debug, Clone, Default)]
pub struct JarqueBeraPValue {}

impl Display for JarqueBeraPValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Jarque-Bera p-value")
    }
}

impl RiskStatistic for JarqueBeraPValue {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        jarque_bera(values).p_value
    }
}

/// Whether the hypothesis of normality is accepted at a significance level.
#[derive(Debug, Clone)]
pub struct NormalityTest {
    level: f64,
}

impl NormalityTest {
    /// Creates a new [`NormalityTest`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not within [0, 1].
    pub fn new_checked(level: Option<f64>) -> anyhow::Result<Self> {
        let level = level.unwrap_or(DEFAULT_NORMALITY_LEVEL);
        check_in_range_inclusive_f64(level, 0.0, 1.0, "level")?;
        Ok(Self { level })
    }

    /// Creates a new [`NormalityTest`] instance (the level defaults to 1%).
    ///
    /// # Panics
    ///
    /// Panics if `level` is not within [0, 1].
    #[must_use]
    pub fn new(level: Option<f64>) -> Self {
        Self::new_checked(level).expect(FAILED)
    }

    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }
}

impl Default for NormalityTest {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Display for NormalityTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Is Normal ({}%)", self.level * 100.0)
    }
}

impl RiskStatistic for NormalityTest {
    type Item = bool;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        jarque_bera(values).p_value > self.level
    }
}

/// Applies the Jarque-Bera test to a series, or to each column of a table.
///
/// Returns `true` if the hypothesis of normality is accepted, i.e. the p-value exceeds `level`
/// (1% by default).
///
/// # Panics
///
/// Panics if `level` is not within [0, 1].
#[must_use]
pub fn is_normal(r: &ReturnData, level: Option<f64>) -> StatValue<bool> {
    NormalityTest::new(level).calculate(r)
}
