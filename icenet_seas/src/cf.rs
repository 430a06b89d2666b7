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

//! CF convention decoding that does not depend on the file format library: packed value unpacking and
//! `<unit> since <date>` time axes

use chrono::{NaiveDate, TimeDelta};

/// the CF attributes that determine how stored values map to physical values
#[derive(Debug,Clone,Copy,Default,PartialEq)]
pub struct CfPacking {
    pub fill_value: Option<f64>,
    pub missing_value: Option<f64>,
    pub scale_factor: Option<f64>,
    pub add_offset: Option<f64>,
}

impl CfPacking {
    pub fn is_packed (&self)->bool {
        self.scale_factor.is_some() || self.add_offset.is_some()
    }

    fn is_missing (&self, v: f64)->bool {
        v.is_nan() || self.fill_value == Some(v) || self.missing_value == Some(v)
    }

    /// map fill/missing values to NaN and unpack the rest as `v * scale_factor + add_offset`.
    /// Fill values are compared against the packed (stored) values
    pub fn unpack (&self, values: &mut [f64]) {
        let scale = self.scale_factor.unwrap_or(1.0);
        let offset = self.add_offset.unwrap_or(0.0);
        let packed = self.is_packed();

        for v in values.iter_mut() {
            if self.is_missing(*v) {
                *v = f64::NAN
            } else if packed {
                *v = *v * scale + offset
            }
        }
    }
}

/// seconds per unit of a CF time `units` attribute ("days since 1970-01-01 00:00:00") and its base date
pub fn parse_time_units (units: &str)->Result<(f64,NaiveDate),String> {
    let parts: Vec<&str> = units.trim().splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err( format!("unexpected units '{units}'"))
    }
    let secs_per_unit: f64 = match parts[0] {
        "days" | "day" => 86400.0,
        "hours" | "hour" => 3600.0,
        "minutes" | "minute" => 60.0,
        "seconds" | "second" => 1.0,
        other => return Err( format!("unsupported time unit '{other}'"))
    };
    let base_str = parts[2].trim();
    let base_str = base_str.get(0..10).unwrap_or(base_str);
    let base = NaiveDate::parse_from_str( base_str, "%Y-%m-%d")
        .map_err( |e| format!("invalid base date '{base_str}': {e}"))?;

    Ok( (secs_per_unit, base) )
}

/// convert time offsets into daily dates. Non-finite offsets (e.g. unmasked fill values) are rejected
pub fn decode_time_offsets (units: &str, offsets: &[f64])->Result<Vec<NaiveDate>,String> {
    let (secs_per_unit, base) = parse_time_units( units)?;

    offsets.iter().map( |v| {
        if !v.is_finite() {
            return Err( format!("non-finite time offset {v}"))
        }
        let days = (v * secs_per_unit / 86400.0).floor();
        if days.abs() > i32::MAX as f64 {
            return Err( format!("time offset {v} out of range"))
        }
        base.checked_add_signed( TimeDelta::days( days as i64))
            .ok_or_else( || format!("time offset {v} out of range"))
    }).collect()
}
