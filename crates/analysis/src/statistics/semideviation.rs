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

use tailrisk_core::math::std_dev;

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
};

/// The population standard deviation of the negative returns only.
///
/// Returns `NaN` when there are no negative observations.
#[derive(Debug, Clone, Default)]
pub struct SemiDeviation {}

impl Display for SemiDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semi-Deviation")
    }
}

impl RiskStatistic for SemiDeviation {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        let negative: Vec<f64> = values.iter().copied().filter(|&x| x < 0.0).collect();
        std_dev(&negative, 0)
    }
}

/// Returns the negative semi-deviation of a series, or of each column of a table.
#[must_use]
pub fn semideviation(r: &ReturnData) -> StatValue<f64> {
    SemiDeviation::default().calculate(r)
}
