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

use tailrisk_core::{correctness::FAILED, math::mean};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
    statistics::var_historic::HistoricVaR,
};

/// Historic Conditional Value at Risk (expected shortfall): the mean loss of the returns at or
/// beyond the historic VaR threshold, reported as a positive number.
#[derive(Debug, Clone, Default)]
pub struct HistoricCVaR {
    var: HistoricVaR,
}

impl HistoricCVaR {
    /// Creates a new [`HistoricCVaR`] instance.
    ///
    /// # Errors
    ///
    /// Returns an error if `level` is not within [0, 100].
    pub fn new_checked(level: Option<f64>) -> anyhow::Result<Self> {
        Ok(Self {
            var: HistoricVaR::new_checked(level)?,
        })
    }

    /// Creates a new [`HistoricCVaR`] instance (the level defaults to 5%).
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
        self.var.level()
    }
}

impl Display for HistoricCVaR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Historic CVaR ({}%)", self.level())
    }
}

impl RiskStatistic for HistoricCVaR {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        let threshold = -self.var.calculate_from_values(values);
        let tail: Vec<f64> = values.iter().copied().filter(|&x| x <= threshold).collect();
        -mean(&tail)
    }
}

/// Returns the historic CVaR of a series, or of each column of a table.
///
/// # Panics
///
/// Panics if `level` is not within [0, 100].
#[must_use]
pub fn cvar_historic(r: &ReturnData, level: Option<f64>) -> StatValue<f64> {
    HistoricCVaR::new(level).calculate(r)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;
    use tailrisk_core::approx_eq;

    use super::*;
    use crate::{
        returns::{ReturnSeries, ReturnTable},
        statistics::var_historic::var_historic,
        stubs::{create_series, sample_series, sample_table, skewed_series},
    };

    #[rstest]
    fn test_sample_series(sample_series: ReturnSeries) {
        // Threshold is -0.018, so the tail holds only -0.02
        let result = cvar_historic(&sample_series.into(), None).as_scalar().unwrap();
        assert!(approx_eq!(f64, result, 0.02, epsilon = 1e-12));
    }

    #[rstest]
    fn test_skewed_series(skewed_series: ReturnSeries) {
        let result = HistoricCVaR::default().calculate_from_series(&skewed_series);
        assert!(approx_eq!(f64, result, 0.083, epsilon = 1e-12));
    }

    #[rstest]
    fn test_table_per_column(sample_table: ReturnTable) {
        let result = cvar_historic(&sample_table.into(), None);
        assert!(approx_eq!(f64, result.get("A").unwrap(), 0.02, epsilon = 1e-12));
        assert!(approx_eq!(f64, result.get("B").unwrap(), 0.01, epsilon = 1e-12));
    }

    #[rstest]
    fn test_missing_value_is_nan() {
        let series = create_series(vec![0.01, f64::NAN, -0.02]);
        assert!(cvar_historic(&series.into(), None).as_scalar().unwrap().is_nan());
    }

    #[rstest]
    fn test_name() {
        assert_eq!(HistoricCVaR::new(Some(1.0)).name(), "Historic CVaR (1%)");
    }

    proptest! {
        #[test]
        fn prop_cvar_at_least_var(
            values in prop::collection::vec(-0.5_f64..0.5, 1..100),
            level in 0.0_f64..=100.0,
        ) {
            let data: ReturnData = create_series(values).into();
            let var = var_historic(&data, Some(level)).as_scalar().unwrap();
            let cvar = cvar_historic(&data, Some(level)).as_scalar().unwrap();
            prop_assert!(cvar >= var - 1e-12, "cvar {} < var {}", cvar, var);
        }
    }
}
