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

//! historical forecast corpus builder.
//!
//! Successive forecast issuances overlap in their lead time coverage. For bias correction we only use the part
//! of each historical issuance that precedes the next issuance, i.e. each issuance is authoritative for its
//! *valid window* `[issue_date, next_issue_date - 1 day]`. The most recent issuance has an open ended window.
//!
//! ```diagram
//!   issuances:   I0          I1          I2
//!                |===========|===========|===========>
//!   windows:     [I0, I1-1d] [I1, I2-1d] [I2, ..)
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path,PathBuf};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use icenet_common::datetime::{parse_yyyymmdd, prev_day, short_date_string, add_days};
use icenet_common::diagnostics::Diagnostics;
use icenet_common::fs::{canonical_path, filename, matching_files_in_dir, path_to_lossy_string};

use crate::errors::*;
use crate::reader::GridReader;
use crate::series::GriddedTimeSeries;

lazy_static! {
    /// per-issuance forecast files are named by their issue date (e.g. `20220401.nc`)
    pub static ref FORECAST_FILE_RE: Regex = Regex::new( r"^\d{8}\.nc$").unwrap();
}

/// the half-open date interval during which an issuance is authoritative. `end` is inclusive, `None` means unbounded
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct ValidWindow {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>
}

impl ValidWindow {
    pub fn contains (&self, date: &NaiveDate)->bool {
        *date >= self.start && self.end.map_or( true, |end| *date <= end)
    }

    pub fn is_unbounded (&self)->bool { self.end.is_none() }

    /// is `next` the direct successor of this window (no gap, no overlap)
    pub fn is_followed_by (&self, next: &ValidWindow)->bool {
        self.end.map_or( false, |end| add_days( &end, 1) == next.start)
    }
}

impl fmt::Display for ValidWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", short_date_string(&self.start), short_date_string(&end)),
            None => write!(f, "{}-", short_date_string(&self.start))
        }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct CorpusEntry {
    /// canonical path of the forecast file
    pub path: PathBuf,
    pub issue_date: NaiveDate,
    pub window: ValidWindow
}

/// the ordered set of historical forecast files and their valid windows. This is a lazy handle - data is
/// only read when calling [`HistoricalCorpus::load`] or [`HistoricalCorpus::assemble`]
#[derive(Debug,Clone,Default)]
pub struct HistoricalCorpus {
    entries: Vec<CorpusEntry>,          // sorted by issue date
    index: BTreeMap<PathBuf,usize>      // canonical path -> entries index
}

impl HistoricalCorpus {

    /// build the corpus from (path,issue_date) pairs in any order. Issue dates have to be unique
    pub fn from_issuances (issuances: Vec<(PathBuf,NaiveDate)>)->Result<Self> {
        let mut issuances: Vec<(PathBuf,NaiveDate)> = issuances.into_iter()
            .map( |(path,date)| (canonical_path(&path), date))
            .collect();
        issuances.sort_by( |a,b| a.1.cmp(&b.1).then_with( || a.0.cmp(&b.0)));

        for w in issuances.windows(2) {
            if w[0].1 == w[1].1 {
                return Err( invalid_series( format!("duplicated issue date {} for {:?} and {:?}", w[0].1, w[0].0, w[1].0)))
            }
        }

        let mut entries: Vec<CorpusEntry> = Vec::with_capacity( issuances.len());
        let mut index: BTreeMap<PathBuf,usize> = BTreeMap::new();

        for (i, (path, issue_date)) in issuances.iter().enumerate() {
            let end = issuances.get(i+1).map( |(_,next_date)| prev_day(next_date));
            let window = ValidWindow { start: *issue_date, end };

            if index.insert( path.clone(), i).is_some() {
                return Err( invalid_series( format!("duplicated corpus file {path:?}")))
            }
            entries.push( CorpusEntry { path: path.clone(), issue_date: *issue_date, window });
        }

        Ok( HistoricalCorpus { entries, index } )
    }

    /// enumerate all issuance files in `dir` except `target`. Files that match the name pattern but do not
    /// have a valid date are skipped with a warning
    pub fn enumerate (dir: &Path, target: &Path, diag: &dyn Diagnostics)->Result<Self> {
        let target = canonical_path(target);
        let mut issuances: Vec<(PathBuf,NaiveDate)> = Vec::new();

        for path in matching_files_in_dir( &dir, &FORECAST_FILE_RE)? {
            let path = canonical_path( &path);
            if path == target { continue }

            match filename(&path).and_then( parse_yyyymmdd) {
                Some(date) => issuances.push( (path, date)),
                None => diag.warn( &format!("ignoring {} - not a valid issue date", path_to_lossy_string(&path)))
            }
        }

        diag.debug( &format!("historical corpus of {} files in {}", issuances.len(), path_to_lossy_string(dir)));
        Self::from_issuances( issuances)
    }

    pub fn entries (&self)->&[CorpusEntry] { &self.entries }

    pub fn len (&self)->usize { self.entries.len() }

    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    pub fn paths (&self)->Vec<PathBuf> {
        self.entries.iter().map( |e| e.path.clone()).collect()
    }

    /// look up the valid window of a corpus file
    pub fn valid_window (&self, path: &Path)->Result<ValidWindow> {
        let key = canonical_path(path);
        self.index.get( &key)
            .map( |idx| self.entries[*idx].window)
            .ok_or_else( || IceNetSeasError::UnmatchedCorpusFile(key))
    }

    /// check that consecutive windows are contiguous and that only the last one is unbounded
    pub fn is_contiguous (&self)->bool {
        let n = self.entries.len();
        self.entries.windows(2).all( |w| w[0].window.is_followed_by( &w[1].window))
            && self.entries.last().map_or( true, |e| e.window.is_unbounded())
    }

    /// read and concatenate all corpus files, each clipped to the end of its valid window
    pub fn load (&self, reader: &dyn GridReader, var_name: &str, diag: &dyn Diagnostics)->Result<GriddedTimeSeries> {
        self.assemble( &self.paths(), reader, var_name, diag)
    }

    /// read the given files, clip each of them to the end of its valid window and concatenate the results.
    /// Files that are not part of this corpus are logged and excluded
    pub fn assemble (&self, files: &[PathBuf], reader: &dyn GridReader, var_name: &str, diag: &dyn Diagnostics)->Result<GriddedTimeSeries> {
        let mut parts: Vec<(NaiveDate,GriddedTimeSeries)> = Vec::with_capacity( files.len());

        for path in files {
            let window = match self.valid_window( path) {
                Ok(window) => window,
                Err(e) => {
                    diag.error( &format!("{e} - excluded"));
                    continue
                }
            };

            let series = reader.read_series( path, var_name)?;
            let series = match window.end {
                Some(end) => {
                    diag.debug( &format!("Stripping {} to {}", path_to_lossy_string(path), end));
                    series.slice_dates( None, Some(end))
                }
                None => {
                    diag.debug( &format!("Not stripping {}", path_to_lossy_string(path)));
                    series
                }
            };
            parts.push( (window.start, series));
        }

        parts.sort_by_key( |(start,_)| *start);
        GriddedTimeSeries::concat( parts.into_iter().map( |(_,s)| s).collect())
    }
}
