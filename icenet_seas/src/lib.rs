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

//! alignment and bias correction of IceNet sea ice concentration forecasts.
//!
//! The main entry points are
//!   - [`get_seas_forecast`]: read a seasonal (SEAS) forecast issuance and optionally bias correct it against
//!     observations and the historical forecast corpus
//!   - [`get_forecast_obs`]: read an IceNet forecast issuance and align it with the available observations
//!   - [`run_seas_batch`]: process a number of SEAS issuances independently of each other
//!
//! All file layouts follow `<source_root>/<hemisphere>/siconca/<YYYYMMDD|YYYY>.nc`

use std::{fmt, path::{Path,PathBuf}};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize,Serialize};

use icenet_common::config::load_config_path;
use icenet_common::datetime::{batch_dates, yyyymmdd, DateBatch};
use icenet_common::diagnostics::Diagnostics;
use icenet_common::fs::path_to_lossy_string;

mod errors;
pub use errors::*;

pub mod series;
pub use series::{DateWindow, GriddedTimeSeries, ForecastIssuance};

pub mod reader;
pub use reader::GridReader;

pub mod cf;

#[cfg(feature="netcdf")]
pub mod nc_reader;

pub mod obs;
pub mod corpus;
pub mod debias;
pub mod reconcile;
pub mod sic_error;

use corpus::HistoricalCorpus;
use debias::{debias, DebiasConfig, DebiasReport};
use obs::load_obs_series;
use reconcile::{filter_by_obs, Reconciled};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,clap::ValueEnum)]
#[serde(rename_all="lowercase")]
pub enum Hemisphere {
    North,
    South
}

impl Hemisphere {
    pub fn as_str (&self)->&'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south"
        }
    }

    /// `<root>/<hemisphere>/siconca`
    pub fn siconca_dir (&self, root: &Path)->PathBuf {
        root.join( self.as_str()).join("siconca")
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// source locations and variable names
#[derive(Clone,Serialize,Deserialize,Debug,PartialEq)]
#[serde(default)]
pub struct SeasConfig {
    /// root of the per-issuance SEAS forecast files
    pub seas_source: PathBuf,

    /// root of the yearly observation archives
    pub obs_source: PathBuf,

    /// variable name within SEAS forecast files
    pub seas_var: String,

    /// variable name within observation archives
    pub obs_var: String,

    /// IceNet forecast variables for mean and standard deviation
    pub forecast_mean_var: String,
    pub forecast_stddev_var: String,

    pub debias: DebiasConfig,
}

impl Default for SeasConfig {
    fn default()->Self {
        SeasConfig {
            seas_source: PathBuf::from("./data/mars.seas"),
            obs_source: PathBuf::from("./data/osisaf"),
            seas_var: "siconc".to_string(),
            obs_var: "ice_conc".to_string(),
            forecast_mean_var: "sic_mean".to_string(),
            forecast_stddev_var: "sic_stddev".to_string(),
            debias: DebiasConfig::default(),
        }
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<SeasConfig> {
    let config: SeasConfig = load_config_path( path)?;
    config.debias.validate()?;
    Ok(config)
}

/* #region SEAS forecast retrieval ******************************************************************************/

/// a (possibly bias corrected) SEAS forecast issuance
#[derive(Debug,Clone)]
pub struct SeasForecast {
    pub issue_date: NaiveDate,
    pub path: PathBuf,
    pub series: GriddedTimeSeries,
    /// only set if the forecast was bias corrected
    pub report: Option<DebiasReport>,
}

/// `<seas_source>/<hemisphere>/siconca/<YYYYMMDD>.nc`
pub fn seas_forecast_path (config: &SeasConfig, hemisphere: Hemisphere, date: NaiveDate)->PathBuf {
    hemisphere.siconca_dir( &config.seas_source).join( format!("{}.nc", yyyymmdd(&date)))
}

/// read the SEAS forecast issued at `date`. If `bias_correct` is set we fit a linear scaling correction of the
/// historical forecast corpus (all other issuances in the same directory) against the observations within the
/// configured window around `date`, and apply it to the forecast
pub fn get_seas_forecast (config: &SeasConfig, hemisphere: Hemisphere, date: NaiveDate, bias_correct: bool,
                          reader: &dyn GridReader, diag: &dyn Diagnostics)->Result<SeasForecast>
{
    let seas_file = seas_forecast_path( config, hemisphere, date);
    let seas = reader.read_series( &seas_file, &config.seas_var)?;

    if !bias_correct {
        return Ok( SeasForecast { issue_date: date, path: seas_file, series: seas, report: None })
    }

    let window = config.debias.obs_window( date);
    let obs = load_obs_series( reader, diag, &config.obs_source, &config.obs_var, hemisphere, window.start, window.end)?;

    let corpus = HistoricalCorpus::enumerate( &hemisphere.siconca_dir( &config.seas_source), &seas_file, diag)?;
    let hist = corpus.load( reader, &config.seas_var, diag)?;

    let (series, report) = debias( &obs, &hist, &seas, &config.debias, diag)?;

    Ok( SeasForecast { issue_date: date, path: seas_file, series, report: Some(report) })
}

/// process SEAS issuances one by one. A failure for one issuance is reported and does not affect the others
pub fn run_seas_batch (config: &SeasConfig, hemisphere: Hemisphere, dates: Vec<NaiveDate>, bias_correct: bool,
                       reader: &dyn GridReader, diag: &dyn Diagnostics)->Vec<(NaiveDate,Result<SeasForecast>)>
{
    let mut results = Vec::with_capacity( dates.len());

    for batch in batch_dates( dates, DateBatch::Month) {
        if let Some(first) = batch.first() {
            diag.info( &format!("processing {} forecast(s) for {}-{:02}", batch.len(), first.year(), first.month()));
        }

        for date in batch {
            let res = get_seas_forecast( config, hemisphere, date, bias_correct, reader, diag);
            if let Err(e) = &res {
                diag.error( &format!("forecast {} failed: {e}", yyyymmdd(&date)));
            }
            results.push( (date, res));
        }
    }

    results
}

/* #endregion SEAS forecast retrieval */

/* #region IceNet forecast / observation pairing ****************************************************************/

/// the issuance at `date` from an IceNet forecast file, either mean or standard deviation
pub fn get_forecast_issuance (config: &SeasConfig, forecast_file: &Path, date: NaiveDate, stddev: bool,
                              reader: &dyn GridReader)->Result<ForecastIssuance>
{
    let var_name = if stddev { &config.forecast_stddev_var } else { &config.forecast_mean_var };
    reader.read_forecast( forecast_file, var_name, date)
}

/// read the forecast issued at `date`, load the observations for its lead time window and align both
pub fn get_forecast_obs (config: &SeasConfig, hemisphere: Hemisphere, forecast_file: &Path, date: NaiveDate, stddev: bool,
                         reader: &dyn GridReader, diag: &dyn Diagnostics)->Result<Reconciled>
{
    let forecast = get_forecast_issuance( config, forecast_file, date, stddev, reader)?;
    let nominal = forecast.nominal_window()?;

    diag.debug( &format!("forecast {} covers {}", path_to_lossy_string(forecast_file), nominal));
    let obs = load_obs_series( reader, diag, &config.obs_source, &config.obs_var, hemisphere, nominal.start, nominal.end)?;

    filter_by_obs( &forecast, &obs, diag)
}

/* #endregion IceNet forecast / observation pairing */
