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

//! NetCDF backed [`GridReader`]. Only compiled with the `netcdf` feature

use std::path::Path;
use chrono::NaiveDate;
use ndarray::{Array3, Array4, Axis};
use netcdf::AttributeValue;

use crate::cf::{decode_time_offsets, CfPacking};
use crate::errors::*;
use crate::reader::GridReader;
use crate::series::{GriddedTimeSeries, ForecastIssuance};

const TIME_VAR: &str = "time";
const LEADTIME_VAR: &str = "leadtime";

#[derive(Debug,Default,Clone,Copy)]
pub struct NetcdfReader;

impl GridReader for NetcdfReader {
    fn read_series (&self, path: &Path, var_name: &str)->Result<GriddedTimeSeries> {
        let file = open_file(path)?;
        let dates = read_time_axis( &file, path)?;

        let var = file.variable(var_name).ok_or_else( || missing_variable( var_name, path))?;
        let dims = var.dimensions();
        if dims.len() != 3 {
            return Err( invalid_series( format!("{var_name} in {path:?} has {} dimensions, expected (time,y,x)", dims.len())))
        }
        let shape = (dims[0].len(), dims[1].len(), dims[2].len());

        let mut values: Vec<f64> = var.get_values::<f64,_>(..)?;
        cf_packing( &var).unpack( &mut values);

        let data = Array3::from_shape_vec( shape, values)?;
        GriddedTimeSeries::new( dates, data)
    }

    fn read_forecast (&self, path: &Path, var_name: &str, date: NaiveDate)->Result<ForecastIssuance> {
        let file = open_file(path)?;
        let dates = read_time_axis( &file, path)?;
        let t_idx = dates.iter().position( |d| *d == date)
            .ok_or_else( || IceNetSeasError::ForecastDateNotFound { date, path: path.to_path_buf() })?;

        let lt_var = file.variable(LEADTIME_VAR).ok_or_else( || missing_variable( LEADTIME_VAR, path))?;
        let leadtimes: Vec<i64> = lt_var.get_values::<i64,_>(..)?;

        let var = file.variable(var_name).ok_or_else( || missing_variable( var_name, path))?;
        let dims = var.dimensions();
        if dims.len() != 4 {
            return Err( invalid_series( format!("{var_name} in {path:?} has {} dimensions, expected (time,yc,xc,leadtime)", dims.len())))
        }
        let shape = (dims[0].len(), dims[1].len(), dims[2].len(), dims[3].len());

        let mut values: Vec<f64> = var.get_values::<f64,_>(..)?;
        cf_packing( &var).unpack( &mut values);

        // (time,yc,xc,leadtime) -> (leadtime,yc,xc)
        let data = Array4::from_shape_vec( shape, values)?
            .index_axis_move( Axis(0), t_idx)
            .permuted_axes([2,0,1])
            .as_standard_layout()
            .to_owned();

        ForecastIssuance::new( date, leadtimes, data)
    }
}

fn open_file (path: &Path)->Result<netcdf::File> {
    if !path.is_file() {
        return Err( IceNetSeasError::FileNotFound( path.to_path_buf()))
    }
    Ok( netcdf::open(path)? )
}

fn missing_variable (var: &str, path: &Path)->IceNetSeasError {
    IceNetSeasError::MissingVariable { var: var.to_string(), path: path.to_path_buf() }
}

fn time_axis_error (path: &Path, msg: impl ToString)->IceNetSeasError {
    IceNetSeasError::InvalidTimeAxis { path: path.to_path_buf(), msg: msg.to_string() }
}

/// decode a CF time axis ("<unit> since YYYY-MM-DD[ HH:MM:SS]") into daily dates
fn read_time_axis (file: &netcdf::File, path: &Path)->Result<Vec<NaiveDate>> {
    let var = file.variable(TIME_VAR).ok_or_else( || missing_variable( TIME_VAR, path))?;

    let units = match var.attribute_value("units") {
        Some(Ok(AttributeValue::Str(s))) => s,
        _ => return Err( time_axis_error( path, "no 'units' attribute"))
    };

    let mut offsets: Vec<f64> = var.get_values::<f64,_>(..)?;
    cf_packing( &var).unpack( &mut offsets);

    decode_time_offsets( &units, &offsets).map_err( |msg| time_axis_error( path, msg))
}

fn numeric_attr (var: &netcdf::Variable<'_>, attr: &str)->Option<f64> {
    match var.attribute_value(attr) {
        Some(Ok(AttributeValue::Double(v))) => Some(v),
        Some(Ok(AttributeValue::Float(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Short(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Ushort(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Int(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Uint(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Schar(v))) => Some(v as f64),
        Some(Ok(AttributeValue::Uchar(v))) => Some(v as f64),
        _ => None
    }
}

fn cf_packing (var: &netcdf::Variable<'_>)->CfPacking {
    CfPacking {
        fill_value: numeric_attr( var, "_FillValue"),
        missing_value: numeric_attr( var, "missing_value"),
        scale_factor: numeric_attr( var, "scale_factor"),
        add_offset: numeric_attr( var, "add_offset"),
    }
}
