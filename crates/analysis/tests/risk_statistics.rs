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

//! End-to-end checks of the public risk statistics surface.

use chrono::NaiveDate;
use tailrisk_analysis::{
    AnalysisError, ReturnData, ReturnSeries, StatValue, cvar_historic, drawdowns, is_normal,
    kurtosis, semideviation, skewness, var_cornishfisher, var_gaussian, var_historic,
};

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1926, 7, 1).unwrap()
}

fn series(values: Vec<f64>) -> ReturnSeries {
    ReturnSeries::monthly(start(), values).unwrap()
}

#[test]
fn drawdowns_end_to_end() {
    let table = drawdowns(&series(vec![0.01, -0.02, 0.03, -0.01, 0.05]));

    let wealth = [1010.0, 989.8, 1019.494, 1009.299_06, 1059.764_013];
    let peaks = [1010.0, 1010.0, 1019.494, 1019.494, 1059.764_013];
    // (989.8 - 1010) / 1010 = -0.02 and (1009.29906 - 1019.494) / 1019.494 = -0.01
    let drawdown = [0.0, -0.02, 0.0, -0.01, 0.0];

    for i in 0..5 {
        approx_eq(table.wealth()[i], wealth[i], 1e-6);
        approx_eq(table.peaks()[i], peaks[i], 1e-6);
        approx_eq(table.drawdown()[i], drawdown[i], 1e-9);
    }
}

#[test]
fn table_statistics_are_computed_per_column() {
    let json = r#"{
        "index": ["2020-01-01", "2020-02-01", "2020-03-01"],
        "columns": {"A": [0.01, -0.02, 0.03], "B": [0.02, 0.01, -0.01]}
    }"#;
    let table = ReturnData::from_json(json).unwrap();

    let var = var_historic(&table, Some(5.0));
    let StatValue::PerColumn(values) = &var else {
        panic!("expected per-column result, was {var:?}");
    };
    assert_eq!(values.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    approx_eq(values["A"], 0.017, 1e-12);
    approx_eq(values["B"], 0.008, 1e-12);

    // Each column is independent of the other
    let a_only = ReturnData::from(series(vec![0.01, -0.02, 0.03]));
    approx_eq(
        var_historic(&a_only, Some(5.0)).as_scalar().unwrap(),
        values["A"],
        1e-15,
    );
}

#[test]
fn per_column_results_follow_json_column_order() {
    let json = r#"{
        "index": ["2020-01-01", "2020-02-01", "2020-03-01"],
        "columns": {"Z": [0.01, -0.02, 0.03], "A": [0.02, 0.01, -0.01]}
    }"#;
    let expected = vec!["Z", "A"];

    let from_json = var_historic(&ReturnData::from_json(json).unwrap(), None);
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    let from_value = var_historic(&ReturnData::try_from(value).unwrap(), None);

    for result in [from_json, from_value] {
        let StatValue::PerColumn(values) = &result else {
            panic!("expected per-column result, was {result:?}");
        };
        assert_eq!(values.keys().map(String::as_str).collect::<Vec<_>>(), expected);
    }
}

#[test]
fn malformed_series_reports_length_mismatch() {
    let json = r#"{"index": ["2020-01-01"], "values": [0.01, 0.02]}"#;
    let AnalysisError::InvalidInputType(msg) = ReturnData::from_json(json).unwrap_err();
    assert!(msg.contains("'index' usize of 1"), "unexpected message: {msg}");
}

#[test]
fn unsupported_inputs_are_rejected() {
    for json in ["0.05", "\"SmallCap10\"", "[0.01, 0.02]", r#"{"values": [0.01]}"#] {
        let result = ReturnData::from_json(json);
        assert!(
            matches!(result, Err(AnalysisError::InvalidInputType(_))),
            "{json} was accepted"
        );
    }
}

#[test]
fn all_nonnegative_series_has_nan_semideviation() {
    let data = ReturnData::from(series(vec![0.0, 0.01, 0.02, 0.005]));
    assert!(semideviation(&data).as_scalar().unwrap().is_nan());
}

#[test]
fn gaussian_and_unmodified_cornish_fisher_agree() {
    let data = ReturnData::from(series(vec![0.012, -0.031, 0.007, 0.022, -0.004, 0.015]));
    for level in [1.0, 2.5, 5.0, 10.0, 50.0] {
        assert_eq!(
            var_cornishfisher(&data, Some(level), false),
            var_gaussian(&data, Some(level))
        );
    }
}

#[test]
fn cvar_is_at_least_var() {
    let data = ReturnData::from(series(vec![
        0.012, 0.018, -0.004, 0.021, 0.009, -0.083, 0.015, 0.007, -0.011, 0.026, 0.004, -0.046,
    ]));
    for level in [1.0, 5.0, 10.0, 25.0] {
        let var = var_historic(&data, Some(level)).as_scalar().unwrap();
        let cvar = cvar_historic(&data, Some(level)).as_scalar().unwrap();
        assert!(cvar >= var, "level {level}: cvar {cvar} < var {var}");
    }
}

// Kurtosis reports the fourth standardized moment; the third-moment formula is available
// through `KurtosisMethod::ThirdMoment` and coincides with skewness.
#[test]
fn kurtosis_differs_from_skewness() {
    let data = ReturnData::from(series(vec![
        0.012, 0.018, -0.004, 0.021, 0.009, -0.083, 0.015, 0.007, -0.011, 0.026, 0.004, -0.046,
    ]));
    let skew = skewness(&data).as_scalar().unwrap();
    let kurt = kurtosis(&data).as_scalar().unwrap();
    assert!(skew < 0.0);
    assert!(kurt > 3.0);
}

#[test]
fn normality_of_fat_tailed_series_depends_on_level() {
    let data = ReturnData::from(series(vec![
        0.012, 0.018, -0.004, 0.021, 0.009, -0.083, 0.015, 0.007, -0.011, 0.026, 0.004, -0.046,
    ]));
    assert_eq!(is_normal(&data, None).as_scalar(), Some(true));
    assert_eq!(is_normal(&data, Some(0.05)).as_scalar(), Some(false));
}
