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
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use clap::Parser;
use tracing::Level;

use icenet_common::config::{load_config_or_default, config_to_ron_string};
use icenet_common::diagnostics::TracingDiagnostics;
use icenet_seas::{run_seas_batch, Hemisphere, SeasConfig, nc_reader::NetcdfReader};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "retrieve and bias correct SEAS sea ice concentration forecasts")]
pub struct Args {
    /// optional RON config file (defaults are used otherwise)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// do not bias correct forecasts
    #[arg(long)]
    pub no_bias_correct: bool,

    #[arg(short,long)]
    pub verbose: bool,

    #[arg(value_enum)]
    pub hemisphere: Hemisphere,

    /// issue dates of forecasts to retrieve (YYYY-MM-DD)
    #[arg(num_args=1..)]
    pub dates: Vec<NaiveDate>,
}

fn main()->Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level( if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config: SeasConfig = load_config_or_default( args.config.as_ref())?;
    config.debias.validate()?;
    if args.verbose {
        println!("{}", config_to_ron_string(&config)?);
    }

    let results = run_seas_batch( &config, args.hemisphere, args.dates, !args.no_bias_correct, &NetcdfReader, &TracingDiagnostics);

    let mut n_failed = 0;
    for (date, res) in &results {
        match res {
            Ok(fc) => {
                let range = fc.series.value_range().map( |r| r.to_string()).unwrap_or("n/a".to_string());
                println!("{date}: {} steps, range {range}", fc.series.len());
                if let Some(report) = &fc.report {
                    println!("{}", config_to_ron_string(report)?);
                }
            }
            Err(e) => {
                println!("{date}: FAILED {e}");
                n_failed += 1;
            }
        }
    }

    if n_failed > 0 {
        Err( anyhow!("{n_failed} of {} forecasts failed", results.len()))
    } else {
        Ok(())
    }
}
