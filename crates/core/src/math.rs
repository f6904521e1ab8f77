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

//! Mathematical functions for return-series aggregation.
//!
//! Aggregations follow the usual data-frame convention for missing values: `NaN` observations
//! are skipped by mean, deviation and moment calculations, while order statistics such as
//! [`percentile`] propagate them. An aggregation over no valid observations is `NaN`.

/// Macro for approximate floating-point equality comparison.
///
/// This macro compares two floating-point values with a specified epsilon tolerance,
/// providing a safe alternative to exact equality checks which can fail due to
/// floating-point precision issues.
///
/// # Usage
///
/// ```rust
/// use tailrisk_core::approx_eq;
///
/// let a = 0.1 + 0.2;
/// let b = 0.3;
/// assert!(approx_eq!(f64, a, b, epsilon = 1e-10));
/// ```
#[macro_export]
macro_rules! approx_eq {
    ($type:ty, $left:expr, $right:expr, epsilon = $epsilon:expr) => {{
        let left_val: $type = $left;
        let right_val: $type = $right;
        (left_val - right_val).abs() < $epsilon
    }};
}

/// Performs linear interpolation using a weight factor.
///
/// Given ordinates `y1` and `y2` and a weight `x1_diff`, computes the
/// interpolated value using the formula: `y1 + x1_diff * (y2 - y1)`.
#[inline]
#[must_use]
pub fn linear_weighting(y1: f64, y2: f64, x1_diff: f64) -> f64 {
    x1_diff.mul_add(y2 - y1, y1)
}

/// Returns an iterator over the non-missing values of `values`.
#[inline]
pub fn valid_values(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| !v.is_nan())
}

/// Returns the number of non-missing values.
#[inline]
#[must_use]
pub fn valid_count(values: &[f64]) -> usize {
    valid_values(values).count()
}

/// Returns the arithmetic mean of the non-missing values, or `NaN` if there are none.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    let (sum, count) = valid_values(values).fold((0.0, 0_usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

/// Returns the standard deviation of the non-missing values with `ddof` delta degrees
/// of freedom (`ddof = 0` is the population deviation, `ddof = 1` the sample deviation).
///
/// Returns `NaN` when the number of valid observations does not exceed `ddof`.
#[must_use]
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let count = valid_count(values);
    if count <= ddof {
        return f64::NAN;
    }

    let mu = mean(values);
    let sum_sq: f64 = valid_values(values).map(|v| (v - mu).powi(2)).sum();
    (sum_sq / (count - ddof) as f64).sqrt()
}

/// Returns the `order`-th central moment of the non-missing values, `mean((x - mean(x))^order)`.
#[must_use]
pub fn central_moment(values: &[f64], order: i32) -> f64 {
    let mu = mean(values);
    if mu.is_nan() {
        return f64::NAN;
    }
    let demeaned: Vec<f64> = valid_values(values).map(|v| (v - mu).powi(order)).collect();
    mean(&demeaned)
}

/// Returns the `q`-th percentile (`0 <= q <= 100`) using linear interpolation between the
/// closest ranks, matching the default method of numpy's `percentile`.
///
/// A missing value anywhere in `values` makes the result `NaN`, as does an empty slice.
///
/// # Panics
///
/// Panics if `q` is outside `[0, 100]`.
#[must_use]
pub fn percentile(values: &[f64], q: f64) -> f64 {
    assert!(
        (0.0..=100.0).contains(&q),
        "Percentile `q` must be in [0, 100], was {q}"
    );

    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    linear_weighting(sorted[lower], sorted[upper], rank - lower as f64)
}
