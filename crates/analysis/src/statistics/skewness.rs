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

use tailrisk_core::math::{central_moment, std_dev};

use crate::{
    returns::ReturnData,
    statistic::{RiskStatistic, StatValue},
};

/// The third standardized moment, `mean((r - mean(r))^3) / sigma^3`, using the population
/// standard deviation.
#[derive(Debug, Clone, Default)]
pub struct Skewness {}

impl Display for Skewness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skewness")
    }
}

impl RiskStatistic for Skewness {
    type Item = f64;

    fn name(&self) -> String {
        self.to_string()
    }

    fn calculate_from_values(&self, values: &[f64]) -> Self::Item {
        central_moment(values, 3) / std_dev(values, 0).powi(3)
    }
}

/// Returns the skewness of a series, or of each column of a table.
#[must_use]
pub fn skewness(r: &ReturnData) -> StatValue<f64> {
    Skewness::default().calculate(r)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tailrisk_core::approx_eq;

    use super::*;
    use crate::{
        returns::{ReturnSeries, ReturnTable},
        stubs::{create_series, sample_series, sample_table, skewed_series},
    };

    #[rstest]
    fn test_sample_series(sample_series: ReturnSeries) {
        let result = skewness(&sample_series.into()).as_scalar().unwrap();
        assert!(approx_eq!(f64, result, 0.205_692_271_755_725_3, epsilon = 1e-10));
    }

    #[rstest]
    fn test_left_tail_is_negative(skewed_series: ReturnSeries) {
        let result = Skewness::default().calculate_from_series(&skewed_series);
        assert!(approx_eq!(f64, result, -1.628_457_720_561_403_3, epsilon = 1e-10));
    }

    #[rstest]
    fn test_symmetric_is_zero() {
        let series = create_series(vec![-0.02, -0.01, 0.0, 0.01, 0.02]);
        let result = skewness(&series.into()).as_scalar().unwrap();
        assert!(approx_eq!(f64, result, 0.0, epsilon = 1e-12));
    }

    #[rstest]
    fn test_constant_series_is_nan() {
        let series = create_series(vec![0.25; 6]);
        assert!(skewness(&series.into()).as_scalar().unwrap().is_nan());
    }

    #[rstest]
    fn test_missing_values_are_skipped() {
        let with_missing = create_series(vec![0.01, f64::NAN, -0.02, 0.03, -0.01, 0.05]);
        let result = skewness(&with_missing.into()).as_scalar().unwrap();
        assert!(approx_eq!(f64, result, 0.205_692_271_755_725_3, epsilon = 1e-10));
    }

    #[rstest]
    fn test_table_per_column(sample_table: ReturnTable) {
        let result = skewness(&sample_table.into());
        assert!(approx_eq!(
            f64,
            result.get("A").unwrap(),
            -0.239_063_146_929_544_45,
            epsilon = 1e-10
        ));
        assert!(approx_eq!(
            f64,
            result.get("B").unwrap(),
            -0.381_801_774_160_605_9,
            epsilon = 1e-10
        ));
    }
}
