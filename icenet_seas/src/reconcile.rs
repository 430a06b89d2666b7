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

//! reconcile the lead time window of a forecast with the observations that are actually available, and
//! broadcast the forecast onto the resolved window so that forecast and observations share a date axis

use ndarray::{Array3, Axis};

use icenet_common::diagnostics::Diagnostics;

use crate::errors::*;
use crate::series::{DateWindow, ForecastIssuance, GriddedTimeSeries};

/// a forecast and observations aligned on the same date axis
#[derive(Debug,Clone,PartialEq)]
pub struct Reconciled {
    /// the window implied by the forecast lead times
    pub nominal: DateWindow,
    /// the window we could actually resolve, always a subset of `nominal`
    pub window: DateWindow,
    /// the forecast broadcast onto every date of `window`
    pub forecast: GriddedTimeSeries,
    /// the observations reindexed onto every date of `window`, missing days are NaN grids
    pub observations: GriddedTimeSeries,
}

/// compute the comparison window for `forecast` given the available observations:
///  - observations have at least as many timesteps as the forecast has lead times: the nominal window
///  - there are no observations at all: `NoObservationalOverlap` with the nominal bounds
///  - otherwise the nominal window narrowed to the first/last observation date (with a shortfall warning)
pub fn resolve_window (forecast: &ForecastIssuance, obs: &GriddedTimeSeries, diag: &dyn Diagnostics)->Result<DateWindow> {
    let nominal = forecast.nominal_window()?;

    if obs.len() >= forecast.len() {
        return Ok( nominal)
    }

    let no_overlap = || IceNetSeasError::NoObservationalOverlap { start: nominal.start, end: nominal.end };
    let obs_window = obs.window().ok_or_else( no_overlap)?;

    diag.warn( &format!("Observational data not available for full range of forecast lead times: {} vs {}", obs_window, nominal));

    obs_window.intersect( &nominal).ok_or_else( no_overlap)
}

/// the forecast grids for each date in `window`. Dates without a matching lead time get an undefined (NaN) grid
pub fn broadcast_forecast (forecast: &ForecastIssuance, window: &DateWindow)->Result<GriddedTimeSeries> {
    let dates = window.dates();
    let (ny,nx) = forecast.grid_shape();
    let mut data = Array3::<f64>::from_elem( (dates.len(), ny, nx), f64::NAN);

    for (i,date) in dates.iter().enumerate() {
        if let Some(grid) = forecast.grid_for_date(date) {
            data.index_axis_mut( Axis(0), i).assign( &grid);
        }
    }

    GriddedTimeSeries::new( dates, data)
}

/// resolve the comparison window and align forecast and observations on it. Both series of the result have
/// one grid per date of the window, missing observation days are undefined (NaN) grids
pub fn filter_by_obs (forecast: &ForecastIssuance, obs: &GriddedTimeSeries, diag: &dyn Diagnostics)->Result<Reconciled> {
    let nominal = forecast.nominal_window()?;
    let window = resolve_window( forecast, obs, diag)?;

    let forecast = broadcast_forecast( forecast, &window)?;
    let observations = obs.reindex( forecast.dates())?;

    let n_missing = window.num_days() - obs.slice_window( &window).len();
    if n_missing > 0 {
        diag.debug( &format!("{n_missing} observation day(s) missing within {window}"));
    }

    Ok( Reconciled { nominal, window, forecast, observations })
}
