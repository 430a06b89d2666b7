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
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use tracing::Level;

use icenet_common::config::load_config_or_default;
use icenet_common::diagnostics::TracingDiagnostics;
use icenet_seas::{get_forecast_obs, Hemisphere, SeasConfig, nc_reader::NetcdfReader, sic_error::sic_error};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "compute the sea ice concentration error of an IceNet forecast against observations")]
pub struct Args {
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// CSV file for daily error statistics
    #[arg(short,long, default_value = "plot/sic_error.csv")]
    pub output_path: PathBuf,

    /// use the standard deviation instead of the mean forecast
    #[arg(long)]
    pub stddev: bool,

    #[arg(short,long)]
    pub verbose: bool,

    #[arg(value_enum)]
    pub hemisphere: Hemisphere,

    pub forecast_file: PathBuf,

    /// issue date of the forecast (YYYY-MM-DD)
    pub forecast_date: NaiveDate,
}

fn main()->Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level( if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config: SeasConfig = load_config_or_default( args.config.as_ref())?;
    let diag = TracingDiagnostics;

    let reconciled = get_forecast_obs( &config, args.hemisphere, &args.forecast_file, args.forecast_date, args.stddev, &NetcdfReader, &diag)?;
    let error = sic_error( &reconciled.forecast, &reconciled.observations)?;

    if let Some(dir) = args.output_path.parent() {
        if !dir.as_os_str().is_empty() { std::fs::create_dir_all(dir)?; }
    }

    tracing::info!("Saving daily errors for {} to {:?}", reconciled.window, args.output_path);
    let mut writer = csv::Writer::from_path( &args.output_path)?;
    for day in &error.daily {
        writer.serialize(day)?;
    }
    writer.flush()?;

    Ok(())
}
