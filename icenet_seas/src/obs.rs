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

//! observation range loader: yearly observation archives (`<root>/<hemisphere>/siconca/<YYYY>.nc`) covering a date range

use std::path::{Path,PathBuf};
use chrono::{Datelike, NaiveDate};

use icenet_common::datetime::{batch_dates, date_range, DateBatch};
use icenet_common::diagnostics::Diagnostics;
use icenet_common::fs::path_to_lossy_string;

use crate::errors::*;
use crate::reader::GridReader;
use crate::series::GriddedTimeSeries;
use crate::Hemisphere;

pub fn obs_file_path (obs_root: &Path, hemisphere: Hemisphere, year: i32)->PathBuf {
    hemisphere.siconca_dir( obs_root).join( format!("{year}.nc"))
}

/// the observation years required for [start,end], ascending
pub fn obs_years (start: NaiveDate, end: NaiveDate)->Vec<i32> {
    batch_dates( date_range( start, end), DateBatch::Year).iter()
        .filter_map( |batch| batch.first().map( |d| d.year()))
        .collect()
}

/// the existing yearly observation files for [start,end] in ascending year order, plus the number of years requested
pub fn find_obs_files (obs_root: &Path, hemisphere: Hemisphere, start: NaiveDate, end: NaiveDate)->(Vec<PathBuf>,usize) {
    let years = obs_years( start, end);
    let files = years.iter()
        .map( |year| obs_file_path( obs_root, hemisphere, *year))
        .filter( |path| path.is_file())
        .collect();
    (files, years.len())
}

/// load the observation series covering [start,end].
///
/// Missing yearly files are not an error - we emit a missing-coverage warning and return whatever we found,
/// which can be an empty series. Callers that need data have to check the series length
pub fn load_obs_series (reader: &dyn GridReader, diag: &dyn Diagnostics, obs_root: &Path, var_name: &str,
                        hemisphere: Hemisphere, start: NaiveDate, end: NaiveDate)->Result<GriddedTimeSeries>
{
    let (files, n_years) = find_obs_files( obs_root, hemisphere, start, end);

    if files.len() < n_years {
        diag.warn( &format!("Cannot find all obs source files for {} - {} in {}", start, end, path_to_lossy_string(obs_root)));
    }
    diag.info( &format!("Got files: {:?}", files));

    let mut parts: Vec<GriddedTimeSeries> = Vec::with_capacity( files.len());
    for path in &files {
        parts.push( reader.read_series( path, var_name)?);
    }

    let obs = GriddedTimeSeries::concat( parts)?;
    Ok( obs.slice_dates( Some(start), Some(end)) )
}
