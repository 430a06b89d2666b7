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

//! in-memory test fixtures

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path,PathBuf};
use std::sync::Mutex;
use chrono::NaiveDate;

use icenet_common::datetime::date_range;
use icenet_common::fs::canonical_path;
use icenet_seas::{GridReader, GriddedTimeSeries, ForecastIssuance, IceNetSeasError, Result};

pub fn ymd (y: i32, m: u32, d: u32)->NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

/// a daily series over [start,end] where each grid is filled with `f(t)`
pub fn daily_series<F> (start: NaiveDate, end: NaiveDate, grid_shape: (usize,usize), f: F)->GriddedTimeSeries where F: Fn(usize)->f64 {
    GriddedTimeSeries::from_shape_fn( date_range(start,end), grid_shape, |(t,_,_)| f(t)).unwrap()
}

pub fn constant_series (start: NaiveDate, end: NaiveDate, grid_shape: (usize,usize), v: f64)->GriddedTimeSeries {
    daily_series( start, end, grid_shape, |_| v)
}

/// create an empty file so that it shows up in directory listings
pub fn touch (path: &Path)->PathBuf {
    if let Some(dir) = path.parent() { std::fs::create_dir_all(dir).unwrap(); }
    File::create(path).unwrap();
    canonical_path(path)
}

/// a GridReader that serves pre-registered series keyed by canonical path
#[derive(Default)]
pub struct MemReader {
    series: HashMap<(PathBuf,String),GriddedTimeSeries>,
    forecasts: HashMap<(PathBuf,String),ForecastIssuance>,
    reads: Mutex<Vec<PathBuf>>
}

impl MemReader {
    pub fn new()->Self { MemReader::default() }

    /// register a series and create the (empty) backing file
    pub fn add_series (&mut self, path: &Path, var_name: &str, series: GriddedTimeSeries) {
        let path = touch(path);
        self.series.insert( (path, var_name.to_string()), series);
    }

    pub fn add_forecast (&mut self, path: &Path, var_name: &str, forecast: ForecastIssuance) {
        let path = touch(path);
        self.forecasts.insert( (path, var_name.to_string()), forecast);
    }

    pub fn reads (&self)->Vec<PathBuf> { self.reads.lock().unwrap().clone() }
}

impl GridReader for MemReader {
    fn read_series (&self, path: &Path, var_name: &str)->Result<GriddedTimeSeries> {
        let key = (canonical_path(path), var_name.to_string());
        self.reads.lock().unwrap().push( key.0.clone());

        self.series.get(&key).cloned().ok_or_else( || IceNetSeasError::FileNotFound( path.to_path_buf()))
    }

    fn read_forecast (&self, path: &Path, var_name: &str, date: NaiveDate)->Result<ForecastIssuance> {
        let key = (canonical_path(path), var_name.to_string());
        self.reads.lock().unwrap().push( key.0.clone());

        match self.forecasts.get(&key) {
            Some(fc) if fc.issue_date() == date => Ok( fc.clone()),
            Some(_) => Err( IceNetSeasError::ForecastDateNotFound { date, path: path.to_path_buf() }),
            None => Err( IceNetSeasError::FileNotFound( path.to_path_buf()))
        }
    }
}
