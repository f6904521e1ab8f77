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

//! Kurtosis of a return series.
//!
//! Two formulas are available. [`KurtosisMethod::Pearson`] is the fourth standardized moment
//! `mean((r - mean(r))^4) / sigma^4` (a normal distribution scores 3; no excess is subtracted).
//! [`KurtosisMethod::ThirdMoment`] reproduces a widely circulated formula which raises the
//! demeaned returns to the third power, and is therefore numerically identical to skewness.
//! It exists only to reconcile figures produced by that formula and should not be used for
//! new analysis.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use tailrisk_core::math::{central_moment, std_dev};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
};

/// The formula used to compute kurtosis.
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
pub enum KurtosisMethod {
    /// The fourth standardized moment (non-excess).
    #[default]
    Pearson,
    /// The third standardized moment, i.e. the skewness formula.
    ThirdMoment,
}

impl Display for KurtosisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Kurtosis {
    method: KurtosisMethod,
}

impl Kurtosis {
    /// Creates a new [`Kurtosis`] instance (defaults to [`KurtosisMethod::Pearson`]).
    #[must_use]
    pub fn new(method: Option<KurtosisMethod>) -> Self {
        Self {
            method: method.unwrap_or_default(),
        }
    }

    #[must_use]
    pub const fn method(&self) -> KurtosisMethod {
        self.method
    }
}

impl Display for Kurtosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            KurtosisMethod::Pearson => write!(f, "Kurtosis"),
            KurtosisMethod::ThirdMoment => write!(f, "Kurtosis (third moment)"),
        }
    }
}

impl RiskStatistic for Kurtosis {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        let order = match self.method {
            KurtosisMethod::Pearson => 4,
            KurtosisMethod::ThirdMoment => 3,
        };
        central_moment(values, order) / std_dev(values, 0).powi(order)
    }
}

/// Returns the (Pearson) kurtosis of a series, or of each column of a table.
#[must_use]
pub fn kurtosis(r: &ReturnData) -> StatValue<f64> {
    Kurtosis::default().calculate(r)
}
