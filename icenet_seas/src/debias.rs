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

//! linear scaling bias correction of a raw forecast against observations and historical forecasts.
//!
//! The fit compares the per-cell time means of the observation and historical forecast series (distributions,
//! not matched timesteps), the resulting delta is applied to every timestep of the raw forecast and the
//! corrected values are clamped to the configured physical range

use chrono::NaiveDate;
use ndarray::{Array2, Axis, Zip};
use serde::{Serialize,Deserialize};

use icenet_common::ValueRange;
use icenet_common::datetime::add_days;
use icenet_common::diagnostics::Diagnostics;

use crate::errors::*;
use crate::series::{DateWindow, GriddedTimeSeries};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="lowercase")]
pub enum DeltaType {
    /// corrected = raw + (mean(obs) - mean(hist))
    Additive,
    /// corrected = raw * (mean(obs) / mean(hist))
    Multiplicative
}

/// which part of the observation and historical series is used to fit the correction
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum FitPeriod {
    /// both series as they are
    Full,
    /// only the dates covered by both series
    SharedHistory
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct DebiasConfig {
    pub delta_type: DeltaType,

    /// corrected values are clamped into this range
    pub physical_range: ValueRange,

    /// observations are loaded for [issue_date - obs_window_days, issue_date + obs_window_days]
    pub obs_window_days: i64,

    pub fit_period: FitPeriod,
}

impl Default for DebiasConfig {
    fn default()->Self {
        DebiasConfig {
            delta_type: DeltaType::Additive,
            physical_range: ValueRange::unit(),
            obs_window_days: 10 * 365,
            fit_period: FitPeriod::Full,
        }
    }
}

impl DebiasConfig {
    pub fn validate (&self)->Result<()> {
        if !self.physical_range.is_valid() || self.physical_range.min.is_nan() || self.physical_range.max.is_nan() {
            return Err( IceNetSeasError::InvalidConfig( format!("invalid physical range {}", self.physical_range)))
        }
        if self.obs_window_days < 0 {
            return Err( IceNetSeasError::InvalidConfig( format!("negative observation window {}", self.obs_window_days)))
        }
        Ok(())
    }

    /// the observation date window we use to correct a forecast issued at `issue_date`
    pub fn obs_window (&self, issue_date: NaiveDate)->DateWindow {
        DateWindow {
            start: add_days( &issue_date, -self.obs_window_days),
            end: add_days( &issue_date, self.obs_window_days)
        }
    }
}

/// a fitted linear scaling correction with one delta per grid cell. Cells without a defined delta are NaN
#[derive(Debug,Clone)]
pub struct LinearScaling {
    delta_type: DeltaType,
    physical_range: ValueRange,
    delta: Array2<f64>
}

impl LinearScaling {
    /// fit the per-cell delta of `obs` against `hist`. Failures:
    ///  - `BiasFitInsufficientData` if either series is empty (e.g. no observation files for the window),
    ///    or if no grid cell has valid values in both
    ///  - `BiasFitNoOverlap` if both series have data but their date windows do not intersect
    ///  - `GridMismatch` if the grid geometries differ
    pub fn fit (obs: &GriddedTimeSeries, hist: &GriddedTimeSeries, config: &DebiasConfig)->Result<Self> {
        config.validate()?;

        let obs_window = obs.window().ok_or_else( || insufficient_data("no observational data"))?;
        let hist_window = hist.window().ok_or_else( || insufficient_data("no historical forecast data"))?;

        let shared = hist_window.intersect( &obs_window)
            .ok_or( IceNetSeasError::BiasFitNoOverlap { hist: hist_window, obs: obs_window })?;

        if obs.grid_shape() != hist.grid_shape() {
            return Err( IceNetSeasError::GridMismatch { expected: obs.grid_shape(), found: hist.grid_shape() })
        }

        let (obs_mean, hist_mean) = match config.fit_period {
            FitPeriod::Full => (time_mean(obs), time_mean(hist)),
            FitPeriod::SharedHistory => (time_mean( &obs.slice_window(&shared)), time_mean( &hist.slice_window(&shared)))
        };

        let delta = match config.delta_type {
            DeltaType::Additive => Zip::from(&obs_mean).and(&hist_mean).map_collect( |&o,&h| o - h),
            DeltaType::Multiplicative => Zip::from(&obs_mean).and(&hist_mean).map_collect( |&o,&h| if h != 0.0 { o / h } else { f64::NAN })
        };

        if delta.iter().all( |d| d.is_nan()) {
            return Err( insufficient_data("no grid cell has both valid observation and historical forecast values"))
        }

        Ok( LinearScaling { delta_type: config.delta_type, physical_range: config.physical_range, delta } )
    }

    pub fn delta (&self)->&Array2<f64> { &self.delta }

    pub fn delta_type (&self)->DeltaType { self.delta_type }

    /// number of grid cells for which no correction could be computed
    pub fn masked_cells (&self)->usize {
        self.delta.iter().filter( |d| d.is_nan()).count()
    }

    fn correct (&self, v: f64, delta: f64)->f64 {
        if delta.is_nan() {
            f64::NAN
        } else {
            let corrected = match self.delta_type {
                DeltaType::Additive => v + delta,
                DeltaType::Multiplicative => v * delta
            };
            self.physical_range.clamp( corrected)
        }
    }

    /// apply the correction to each timestep of `fut`. The result has the same dates and grid geometry
    pub fn apply (&self, fut: &GriddedTimeSeries)->Result<GriddedTimeSeries> {
        if fut.is_empty() {
            return Ok( fut.clone())
        }
        if fut.grid_shape() != self.delta.dim() {
            return Err( IceNetSeasError::GridMismatch { expected: self.delta.dim(), found: fut.grid_shape() })
        }

        let mut data = fut.data().clone();
        for mut grid in data.axis_iter_mut( Axis(0)) {
            Zip::from(&mut grid).and(&self.delta).for_each( |v,&d| *v = self.correct( *v, d));
        }
        fut.with_data( data)
    }
}

/// per cell mean over all timesteps, ignoring undefined values
fn time_mean (series: &GriddedTimeSeries)->Array2<f64> {
    let mut sum = Array2::<f64>::zeros( series.grid_shape());
    let mut count = Array2::<usize>::zeros( series.grid_shape());

    for grid in series.data().axis_iter( Axis(0)) {
        Zip::from(&mut sum).and(&mut count).and(&grid).for_each( |s,c,&v| {
            if !v.is_nan() {
                *s += v;
                *c += 1;
            }
        });
    }

    Zip::from(&sum).and(&count).map_collect( |&s,&c| if c > 0 { s / c as f64 } else { f64::NAN })
}

/// the value ranges before and after correction
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct DebiasReport {
    pub obs: Option<ValueRange>,
    pub hist: Option<ValueRange>,
    pub fut: Option<ValueRange>,
    pub output: Option<ValueRange>,
    pub obs_window: Option<DateWindow>,
    pub hist_window: Option<DateWindow>,
    pub masked_cells: usize
}

fn fmt_range (range: &Option<ValueRange>)->String {
    match range {
        Some(r) => r.to_string(),
        None => "n/a".to_string()
    }
}

/// fit the correction on `obs` and `hist` and apply it to `fut`, reporting input/output value ranges
pub fn debias (obs: &GriddedTimeSeries, hist: &GriddedTimeSeries, fut: &GriddedTimeSeries,
               config: &DebiasConfig, diag: &dyn Diagnostics)->Result<(GriddedTimeSeries,DebiasReport)>
{
    let (obs_range, hist_range, fut_range) = (obs.value_range(), hist.value_range(), fut.value_range());
    diag.info( &format!("Debiaser input ranges: obs {}, hist {}, fut {}", fmt_range(&obs_range), fmt_range(&hist_range), fmt_range(&fut_range)));

    let scaling = LinearScaling::fit( obs, hist, config)?;
    let corrected = scaling.apply( fut)?;

    let output_range = corrected.value_range();
    diag.info( &format!("Debiaser output range: {}", fmt_range(&output_range)));

    let masked_cells = scaling.masked_cells();
    if masked_cells > 0 {
        diag.debug( &format!("{masked_cells} grid cells without correction are masked"));
    }

    let report = DebiasReport {
        obs: obs_range,
        hist: hist_range,
        fut: fut_range,
        output: output_range,
        obs_window: obs.window(),
        hist_window: hist.window(),
        masked_cells
    };

    Ok( (corrected, report) )
}
