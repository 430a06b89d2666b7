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

//! sea ice concentration error of an aligned forecast/observation pair

use chrono::NaiveDate;
use ndarray::{Axis, Zip};
use serde::Serialize;

use crate::errors::*;
use crate::series::GriddedTimeSeries;

/// error statistics over all cells that are defined in both forecast and observation
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct DailyError {
    pub date: NaiveDate,
    pub n_cells: usize,
    pub bias: f64,
    pub mae: f64,
    pub rmse: f64,
}

#[derive(Debug,Clone)]
pub struct SicError {
    /// forecast - observation for each cell
    pub diff: GriddedTimeSeries,
    pub daily: Vec<DailyError>,
}

/// elementwise `forecast - obs`. Both series need identical dates and grid geometry
pub fn sic_error (forecast: &GriddedTimeSeries, obs: &GriddedTimeSeries)->Result<SicError> {
    if forecast.dates() != obs.dates() {
        return Err( invalid_series( format!("forecast ({} steps) and observations ({} steps) are not aligned", forecast.len(), obs.len())))
    }
    if forecast.is_empty() {
        return Ok( SicError { diff: forecast.clone(), daily: Vec::new() })
    }
    if forecast.grid_shape() != obs.grid_shape() {
        return Err( IceNetSeasError::GridMismatch { expected: forecast.grid_shape(), found: obs.grid_shape() })
    }

    let data = Zip::from( forecast.data()).and( obs.data()).map_collect( |&f,&o| f - o);
    let diff = forecast.with_data( data)?;

    let daily = diff.dates().iter().zip( diff.data().axis_iter( Axis(0))).map( |(date,grid)| {
        let mut n_cells = 0;
        let (mut sum, mut abs_sum, mut sq_sum) = (0.0, 0.0, 0.0);
        for v in grid.iter().filter( |v| !v.is_nan()) {
            n_cells += 1;
            sum += v;
            abs_sum += v.abs();
            sq_sum += v * v;
        }
        let n = n_cells as f64;
        if n_cells > 0 {
            DailyError { date: *date, n_cells, bias: sum / n, mae: abs_sum / n, rmse: (sq_sum / n).sqrt() }
        } else {
            DailyError { date: *date, n_cells, bias: f64::NAN, mae: f64::NAN, rmse: f64::NAN }
        }
    }).collect();

    Ok( SicError { diff, daily } )
}
