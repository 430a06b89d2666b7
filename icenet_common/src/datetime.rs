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

//! calendar date helpers. All gridded series in IceNet are daily, hence we work with `NaiveDate` throughout

use chrono::{Datelike, NaiveDate, TimeDelta};
use std::collections::BTreeMap;

/// format of forecast file names (e.g. `20220401.nc`)
pub const YYYYMMDD: &str = "%Y%m%d";

#[inline] pub fn days (n: i64)->TimeDelta { TimeDelta::days(n) }

/// parse the leading 8 digits of a string as `YYYYMMDD` date
pub fn parse_yyyymmdd (s: &str)->Option<NaiveDate> {
    let prefix = s.get(0..8)?;
    if prefix.bytes().all(|b| b.is_ascii_digit()) {
        NaiveDate::parse_from_str( prefix, YYYYMMDD).ok()
    } else {
        None
    }
}

pub fn yyyymmdd (date: &NaiveDate)->String {
    date.format(YYYYMMDD).to_string()
}

/// short human readable format (mm/dd/yy) we use in diagnostic messages
pub fn short_date_string (date: &NaiveDate)->String {
    date.format("%D").to_string()
}

/// the day before the given date (saturates at the minimal representable date)
pub fn prev_day (date: &NaiveDate)->NaiveDate {
    date.pred_opt().unwrap_or(*date)
}

/// add a (possibly negative) number of days, saturating at the representable date range
pub fn add_days (date: &NaiveDate, n: i64)->NaiveDate {
    date.checked_add_signed( days(n))
        .unwrap_or( if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// number of days from `earlier` to `later` (negative if `later` is before `earlier`)
pub fn days_between (earlier: &NaiveDate, later: &NaiveDate)->i64 {
    (*later - *earlier).num_days()
}

/// all dates of the inclusive interval [start,end], empty if end < start
pub fn date_range (start: NaiveDate, end: NaiveDate)->Vec<NaiveDate> {
    if end < start {
        Vec::new()
    } else {
        start.iter_days().take_while(|d| *d <= end).collect()
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DateBatch {
    Year,
    Month
}

/// the key of the batch a date belongs to: (year,0) for yearly batches, (year,month) for monthly batches
pub fn batch_key (date: &NaiveDate, batch: DateBatch)->(i32,u32) {
    match batch {
        DateBatch::Year => (date.year(), 0),
        DateBatch::Month => (date.year(), date.month())
    }
}

/// group dates into ascending yearly or monthly batches. Dates within each batch are sorted and de-duplicated
pub fn batch_dates<I> (dates: I, batch: DateBatch)->Vec<Vec<NaiveDate>> where I: IntoIterator<Item=NaiveDate> {
    let mut batches: BTreeMap<(i32,u32),Vec<NaiveDate>> = BTreeMap::new();

    for date in dates {
        batches.entry( batch_key(&date, batch)).or_default().push(date);
    }

    batches.into_values().map( |mut v| {
        v.sort();
        v.dedup();
        v
    }).collect()
}
