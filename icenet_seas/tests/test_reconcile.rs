/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

mod common;
use common::*;

use icenet_common::diagnostics::{DiagLevel, RecordingDiagnostics};
use icenet_seas::{DateWindow, ForecastIssuance, GriddedTimeSeries, IceNetSeasError};
use icenet_seas::reconcile::{broadcast_forecast, filter_by_obs, resolve_window};
use icenet_seas::sic_error::sic_error;

/// issued 2022-04-01 with lead times 0..14 (valid 04/01 - 04/15)
fn forecast ()->ForecastIssuance {
    ForecastIssuance::from_shape_fn( ymd(2022,4,1), (0..15).collect(), (2,2), |(l,_,_)| l as f64 / 20.0).unwrap()
}

fn nominal ()->DateWindow {
    DateWindow::new( ymd(2022,4,1), ymd(2022,4,15)).unwrap()
}

#[test]
fn test_full_coverage() {
    let fc = forecast();
    let obs = constant_series( ymd(2022,4,1), ymd(2022,4,15), (2,2), 0.5);
    let diag = RecordingDiagnostics::new();

    let window = resolve_window( &fc, &obs, &diag).unwrap();
    assert_eq!( window, nominal());
    assert!( diag.events().is_empty());

    // idempotent, no hidden state
    assert_eq!( resolve_window( &fc, &obs, &diag).unwrap(), window);
    assert!( diag.events().is_empty());
}

#[test]
fn test_partial_coverage() {
    let fc = forecast();
    let obs = constant_series( ymd(2022,4,1), ymd(2022,4,10), (2,2), 0.5);
    let diag = RecordingDiagnostics::new();

    let window = resolve_window( &fc, &obs, &diag).unwrap();
    assert_eq!( window, DateWindow::new( ymd(2022,4,1), ymd(2022,4,10)).unwrap());
    assert!( window.is_subset_of( &nominal()));

    let warnings = diag.messages( DiagLevel::Warn);
    assert_eq!( warnings.len(), 1);
    assert!( warnings[0].starts_with("Observational data not available for full range of forecast lead times"));
}

#[test]
fn test_no_observations() {
    let fc = forecast();
    let diag = RecordingDiagnostics::new();

    match resolve_window( &fc, &GriddedTimeSeries::empty(), &diag) {
        Err(e @ IceNetSeasError::NoObservationalOverlap{..}) => {
            assert_eq!( e.to_string(), "No observational data available between 04/01/22 and 04/15/22");
            if let IceNetSeasError::NoObservationalOverlap{ start, end } = e {
                assert_eq!( (start,end), (ymd(2022,4,1), ymd(2022,4,15)));
            }
        }
        other => panic!("expected NoObservationalOverlap, got {other:?}")
    }
}

#[test]
fn test_observations_outside_nominal() {
    let fc = forecast();
    let diag = RecordingDiagnostics::new();

    // shorter than the forecast and extending beyond its start
    let obs = constant_series( ymd(2022,3,25), ymd(2022,4,5), (2,2), 0.5);
    let window = resolve_window( &fc, &obs, &diag).unwrap();
    assert_eq!( window, DateWindow::new( ymd(2022,4,1), ymd(2022,4,5)).unwrap());

    // no shared date at all
    let obs = constant_series( ymd(2022,5,1), ymd(2022,5,5), (2,2), 0.5);
    assert!( matches!( resolve_window( &fc, &obs, &diag), Err(IceNetSeasError::NoObservationalOverlap{..})));
}

#[test]
fn test_broadcast_with_gaps() {
    let fc = ForecastIssuance::from_shape_fn( ymd(2022,4,1), vec![1,2,4], (1,1), |(l,_,_)| l as f64).unwrap();
    let window = DateWindow::new( ymd(2022,4,1), ymd(2022,4,5)).unwrap();

    let series = broadcast_forecast( &fc, &window).unwrap();
    assert_eq!( series.len(), 5);

    let values: Vec<f64> = series.data().iter().copied().collect();
    assert!( values[0].is_nan());
    assert_eq!( values[1], 0.0);
    assert_eq!( values[2], 1.0);
    assert!( values[3].is_nan());
    assert_eq!( values[4], 2.0);
}

#[test]
fn test_filter_by_obs() {
    let fc = forecast();
    let obs = constant_series( ymd(2022,3,1), ymd(2022,4,10), (2,2), 0.5);
    let diag = RecordingDiagnostics::new();

    // more obs timesteps than lead times: nominal window, obs get cut to it
    let r = filter_by_obs( &fc, &obs, &diag).unwrap();
    assert_eq!( r.window, nominal());
    assert_eq!( r.forecast.len(), 15);
    assert_eq!( r.observations.dates(), r.forecast.dates());
    assert!( r.observations.grid_for( &ymd(2022,4,11)).unwrap().iter().all( |v| v.is_nan()));
    assert_eq!( r.forecast.grid_for( &ymd(2022,4,3)).unwrap()[[0,0]], 0.1);

    let obs = constant_series( ymd(2022,4,3), ymd(2022,4,8), (2,2), 0.5);
    let r = filter_by_obs( &fc, &obs, &diag).unwrap();
    assert_eq!( r.nominal, nominal());
    assert_eq!( r.window, DateWindow::new( ymd(2022,4,3), ymd(2022,4,8)).unwrap());
    assert!( r.window.is_subset_of( &r.nominal));
    assert_eq!( r.forecast.dates(), r.observations.dates());
}

#[test]
fn test_filter_by_obs_with_missing_day() {
    let fc = ForecastIssuance::from_shape_fn( ymd(2022,4,1), (0..15).collect(), (2,2), |_| 0.5).unwrap();
    let dates: Vec<_> = icenet_common::datetime::date_range( ymd(2022,4,1), ymd(2022,4,15)).into_iter()
        .filter( |d| *d != ymd(2022,4,7))
        .collect();
    let obs = GriddedTimeSeries::from_shape_fn( dates, (2,2), |_| 0.25).unwrap();
    let diag = RecordingDiagnostics::new();

    // 14 obs days for 15 lead times: partial coverage, but the window still spans all of 04/01 - 04/15
    let r = filter_by_obs( &fc, &obs, &diag).unwrap();
    assert_eq!( r.window, nominal());
    assert_eq!( r.forecast.dates(), r.observations.dates());
    assert_eq!( r.observations.len(), 15);
    assert!( r.observations.grid_for( &ymd(2022,4,7)).unwrap().iter().all( |v| v.is_nan()));
    assert_eq!( r.observations.grid_for( &ymd(2022,4,8)).unwrap()[[1,1]], 0.25);
    assert_eq!( diag.count( DiagLevel::Warn), 1);

    let err = sic_error( &r.forecast, &r.observations).unwrap();
    assert_eq!( err.daily.len(), 15);
    assert_eq!( err.daily[6].date, ymd(2022,4,7));
    assert_eq!( err.daily[6].n_cells, 0);
    assert!( err.daily[6].bias.is_nan());
    assert_eq!( err.daily[7].n_cells, 4);
    assert_eq!( err.daily[7].bias, 0.25);
}

#[test]
fn test_partial_coverage_error() {
    let fc = forecast();
    let obs = daily_series( ymd(2022,4,3), ymd(2022,4,9), (2,2), |t| (t + 2) as f64 / 20.0);
    let diag = RecordingDiagnostics::new();

    let r = filter_by_obs( &fc, &obs, &diag).unwrap();
    assert_eq!( r.forecast.dates(), r.observations.dates());

    // forecast and observations were built to agree day by day
    let err = sic_error( &r.forecast, &r.observations).unwrap();
    assert_eq!( err.daily.len(), 7);
    assert!( err.daily.iter().all( |d| d.n_cells == 4 && d.bias == 0.0));
}
