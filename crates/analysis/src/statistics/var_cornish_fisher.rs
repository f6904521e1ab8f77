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

//! Cornish-Fisher modified Value at Risk.
//!
//! The Gaussian quantile `z` is adjusted for the observed skewness `s` and kurtosis `k`:
//!
//! ```text
//! z' = z + (z^2 - 1) s / 6 + (z^3 - 3z)(k - 3) / 24 - (2z^3 - 5z) s^2 / 36
//! ```
//!
//! and the VaR is `-(mean + z' * sigma)` with the population standard deviation.

use std::fmt::{self, Display};

use tailrisk_core::correctness::FAILED;

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
    statistics::{
        kurtosis::{Kurtosis, KurtosisMethod},
        skewness::Skewness,
        var_gaussian::{check_parametric_level, gaussian_z, parametric_var},
    },
};

/// Returns the Cornish-Fisher adjusted quantile for Gaussian quantile `z`, skewness `s` and
/// (non-excess) kurtosis `k`.
#[must_use]
pub fn cornish_fisher_z(z: f64, s: f64, k: f64) -> f64 {
    z + (z.powi(2) - 1.0) * s / 6.0 + (z.powi(3) - 3.0 * z) * (k - 3.0) / 24.0
        - (2.0 * z.powi(3) - 5.0 * z) * s.powi(2) / 36.0
}

/// Parametric VaR, optionally modified with the Cornish-Fisher expansion.
///
/// Unmodified, the result is identical to [`GaussianVaR`](super::var_gaussian::GaussianVaR).
#[derive(Debug, Clone)]
pub struct CornishFisherVaR {
    level: f64,
    modified: bool,
    kurtosis: Kurtosis,
}

impl CornishFisherVaR {
    /// Creates a new [`CornishFisherVaR`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not within (0, 100).
    pub fn new_checked(
        level: Option<f64>,
        modified: bool,
        kurtosis_method: Option<KurtosisMethod>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            level: check_parametric_level(level)?,
            modified,
            kurtosis: Kurtosis::new(kurtosis_method),
        })
    }

    /// Creates a new [`CornishFisherVaR`] instance (the level defaults to 5%, kurtosis to
    /// [`KurtosisMethod::Pearson`]).
    ///
    /// # Panics
    ///
    /// Panics if `level` is not within (0, 100).
    #[must_use]
    pub fn new(
        level: Option<f64>,
        modified: bool,
        kurtosis_method: Option<KurtosisMethod>,
    ) -> Self {
        Self::new_checked(level, modified, kurtosis_method).expect(FAILED)
    }

    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub const fn modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub const fn kurtosis_method(&self) -> KurtosisMethod {
        self.kurtosis.method()
    }
}

impl Display for CornishFisherVaR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modified {
            write!(f, "Cornish-Fisher VaR ({}%)", self.level)
        } else {
            write!(f, "Parametric VaR ({}%)", self.level)
        }
    }
}

impl RiskStatistic for CornishFisherVaR {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        let mut z = gaussian_z(self.level);
        if self.modified {
            let s = Skewness::default().calculate_from_values(values);
            let k = self.kurtosis.calculate_from_values(values);
            z = cornish_fisher_z(z, s, k);
        }
        parametric_var(values, z)
    }
}

/// Returns the parametric VaR of a series, or of each column of a table, applying the
/// Cornish-Fisher modification when `modified` is true.
///
/// # Panics
///
/// Panics if `level` is not within (0, 100).
#[must_use]
pub fn var_cornishfisher(r: &ReturnData, level: Option<f64>, modified: bool) -> StatValue<f64> {
    CornishFisherVaR::new(level, modified, None).calculate(r)
}
