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

//! the seam between the core and the gridded file format

use std::path::Path;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::series::{GriddedTimeSeries, ForecastIssuance};

/// something that can materialize gridded series from source files
pub trait GridReader {
    /// read a (time,y,x) variable together with its daily time axis
    fn read_series (&self, path: &Path, var_name: &str)->Result<GriddedTimeSeries>;

    /// read the issuance at `date` of a (time,y,x,leadtime) forecast variable
    fn read_forecast (&self, path: &Path, var_name: &str, date: NaiveDate)->Result<ForecastIssuance>;
}
