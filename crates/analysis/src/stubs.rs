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

//! Test fixtures for return series and tables.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rstest::fixture;

use crate::returns::{ReturnSeries, ReturnTable, monthly_index};

/// Returns the first period of the fixture series (January 2020).
///
/// # Panics
///
/// Panics if the date cannot be constructed.
#[must_use]
pub fn jan_2020() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
}

/// Creates a monthly series starting January 2020.
///
/// # Panics
///
/// Panics if the monthly index cannot be built.
#[must_use]
pub fn create_series(values: Vec<f64>) -> ReturnSeries {
    ReturnSeries::monthly(jan_2020(), values).expect("valid series")
}

/// Creates a monthly table starting January 2020 from `(name, values)` columns.
///
/// # Panics
///
/// Panics if the columns differ in length.
#[must_use]
pub fn create_table(columns: Vec<(&str, Vec<f64>)>) -> ReturnTable {
    let len = columns.first().map_or(0, |(_, values)| values.len());
    let columns: IndexMap<String, Vec<f64>> = columns
        .into_iter()
        .map(|(name, values)| (name.to_string(), values))
        .collect();
    ReturnTable::new(monthly_index(jan_2020(), len), columns).expect("valid table")
}

#[fixture]
pub fn sample_series() -> ReturnSeries {
    create_series(vec![0.01, -0.02, 0.03, -0.01, 0.05])
}

#[fixture]
pub fn sample_table() -> ReturnTable {
    create_table(vec![
        ("A", vec![0.01, -0.02, 0.03]),
        ("B", vec![0.02, 0.01, -0.01]),
    ])
}

/// Twelve monthly returns with a fat left tail.
#[fixture]
pub fn skewed_series() -> ReturnSeries {
    create_series(vec![
        0.012, 0.018, -0.004, 0.021, 0.009, -0.083, 0.015, 0.007, -0.011, 0.026, 0.004, -0.046,
    ])
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_fixtures_start_in_january_2020(sample_series: ReturnSeries) {
        let first = jan_2020();
        assert_eq!((first.year(), first.month(), first.day()), (2020, 1, 1));
        assert_eq!(sample_series.index().first(), Some(&first));
        assert_eq!(sample_table().index().first(), Some(&first));
    }
}
