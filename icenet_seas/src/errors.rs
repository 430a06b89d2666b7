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

use std::path::PathBuf;
use chrono::NaiveDate;
use thiserror::Error;
use icenet_common::datetime::short_date_string;

use crate::series::DateWindow;

pub type Result<T> = std::result::Result<T, IceNetSeasError>;

#[derive(Error,Debug)]
pub enum IceNetSeasError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config error {0}")]
    ConfigError( #[from] icenet_common::config::ConfigError),

    #[error("array shape error {0}")]
    ShapeError( #[from] ndarray::ShapeError),

    #[cfg(feature="netcdf")]
    #[error("netcdf error {0}")]
    NetcdfError( #[from] netcdf::Error),

    #[error("file not found {0:?}")]
    FileNotFound(PathBuf),

    #[error("variable {var} not found in {path:?}")]
    MissingVariable { var: String, path: PathBuf },

    #[error("invalid time axis in {path:?}: {msg}")]
    InvalidTimeAxis { path: PathBuf, msg: String },

    #[error("forecast date {} not found in {path:?}", short_date_string(.date))]
    ForecastDateNotFound { date: NaiveDate, path: PathBuf },

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("grid mismatch: expected {expected:?} got {found:?}")]
    GridMismatch { expected: (usize,usize), found: (usize,usize) },

    /// there is not a single timestep of observational data for the forecast window
    #[error("No observational data available between {} and {}", short_date_string(.start), short_date_string(.end))]
    NoObservationalOverlap { start: NaiveDate, end: NaiveDate },

    /// a historical forecast file has no computed valid window
    #[error("{0:?} is not part of the historical forecast corpus")]
    UnmatchedCorpusFile(PathBuf),

    /// historical forecast and observation series do not share any date
    #[error("bias correction failed - historical forecast period {hist} does not overlap observation period {obs}")]
    BiasFitNoOverlap { hist: DateWindow, obs: DateWindow },

    /// not enough valid data to fit a bias correction
    #[error("bias correction failed - insufficient data: {0}")]
    BiasFitInsufficientData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl IceNetSeasError {
    /// is this one of the bias fit failures
    pub fn is_bias_fit_failure (&self)->bool {
        matches!( self, IceNetSeasError::BiasFitNoOverlap{..} | IceNetSeasError::BiasFitInsufficientData(_))
    }
}

pub fn invalid_series (msg: impl ToString)->IceNetSeasError {
    IceNetSeasError::InvalidSeries(msg.to_string())
}

pub fn insufficient_data (msg: impl ToString)->IceNetSeasError {
    IceNetSeasError::BiasFitInsufficientData(msg.to_string())
}
