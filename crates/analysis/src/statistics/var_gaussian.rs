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

use statrs::distribution::{ContinuousCDF, Normal};
use tailrisk_core::{
    correctness::{FAILED, check_in_range_exclusive_f64},
    math::{mean, std_dev},
};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
    statistics::var_historic::DEFAULT_VAR_LEVEL,
};

/// Returns the standard normal quantile at `level` percent.
#[must_use]
pub fn gaussian_z(level: f64) -> f64 {
    Normal::standard().inverse_cdf(level / 100.0)
}

/// Returns `-(mean + z * sigma)` with the population standard deviation.
pub(crate) fn parametric_var(values: &[f64], z: f64) -> f64 {
    -z.mul_add(std_dev(values, 0), mean(values))
}

pub(crate) fn check_parametric_level(level: Option<f64>) -> anyhow::Result<f64> {
    let level = level.unwrap_or(DEFAULT_VAR_LEVEL);
    check_in_range_exclusive_f64(level, 0.0, 100.0, "level")?;
    Ok(level)
}

/// Parametric Gaussian Value at Risk: `-(mean + z * sigma)` where `z` is the standard normal
/// quantile at `level` percent.
#[derive(Debug, Clone)]
pub struct GaussianVaR {
    level: f64,
}

impl GaussianVaR {
    /// Creates a new [`GaussianVaR`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not within (0, 100).
    pub fn new_checked(level: Option<f64>) -> anyhow::Result<Self> {
        Ok(Self {
            level: check_parametric_level(level)?,
        })
    }

    /// Creates a new [`GaussianVaR`] instance (the level defaults to 5%).
    ///
    /// # Panics
    ///
    /// Panics if `level` is not within (0, 100).
    #[must_use]
    pub fn new(level: Option<f64>) -> Self {
        Self::new_checked(level).expect(FAILED)
    }

    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }
}

impl Default for GaussianVaR {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Display for GaussianVaR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gaussian VaR ({}%)", self.level)
    }
}

impl RiskStatistic for GaussianVaR {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        parametric_var(values, gaussian_z(self.level))
    }
}

/// Returns the Gaussian VaR of a series, or of each column of a table.
///
/// # Panics
///
/// Panics if `level` is not within (0, 100).
#[must_use]
pub fn var_gaussian(r: &ReturnData, level: Option<f64>) -> StatValue<f64> {
    GaussianVaR::new(level).calculate(r)
}
