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

//! the data model: daily gridded sea ice concentration series and forecast issuances.
//!
//! Grid values are fractions in [0,1]. Undefined (land / no-data) cells are represented as NaN

use std::fmt;
use chrono::NaiveDate;
use ndarray::{s, Array3, ArrayView2, Axis, concatenate};
use serde::{Serialize,Deserialize};

use icenet_common::{MinMaxAvg, ValueRange};
use icenet_common::datetime::{add_days, days_between, date_range, short_date_string};

use crate::errors::*;

/* #region DateWindow ****************************************************************************************/

/// inclusive date interval
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl DateWindow {
    pub fn new (start: NaiveDate, end: NaiveDate)->Result<Self> {
        if end < start {
            Err( invalid_series( format!("window end {end} before start {start}")))
        } else {
            Ok( DateWindow { start, end } )
        }
    }

    /// number of days in the window (both ends included)
    pub fn num_days (&self)->usize {
        days_between( &self.start, &self.end) as usize + 1
    }

    pub fn contains (&self, date: &NaiveDate)->bool {
        *date >= self.start && *date <= self.end
    }

    pub fn is_subset_of (&self, other: &DateWindow)->bool {
        self.start >= other.start && self.end <= other.end
    }

    pub fn intersect (&self, other: &DateWindow)->Option<DateWindow> {
        let start = self.start.max( other.start);
        let end = self.end.min( other.end);
        if start <= end { Some( DateWindow { start, end }) } else { None }
    }

    pub fn overlaps (&self, other: &DateWindow)->bool {
        self.intersect(other).is_some()
    }

    pub fn dates (&self)->Vec<NaiveDate> {
        date_range( self.start, self.end)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", short_date_string(&self.start), short_date_string(&self.end))
    }
}

/* #endregion DateWindow */

/* #region GriddedTimeSeries *********************************************************************************/

/// a sequence of 2-D grids indexed by strictly increasing dates. The data array has (time,y,x) layout
#[derive(Debug,Clone,PartialEq)]
pub struct GriddedTimeSeries {
    dates: Vec<NaiveDate>,
    data: Array3<f64>
}

impl GriddedTimeSeries {
    pub fn new (dates: Vec<NaiveDate>, data: Array3<f64>)->Result<Self> {
        if dates.len() != data.dim().0 {
            return Err( invalid_series( format!("{} dates for {} grids", dates.len(), data.dim().0)))
        }
        check_increasing( &dates)?;

        Ok( GriddedTimeSeries { dates, data } )
    }

    /// a series without timesteps (and without grid geometry)
    pub fn empty ()->Self {
        GriddedTimeSeries { dates: Vec::new(), data: Array3::zeros((0,0,0)) }
    }

    pub fn from_shape_fn<F> (dates: Vec<NaiveDate>, grid_shape: (usize,usize), f: F)->Result<Self>
        where F: FnMut((usize,usize,usize))->f64
    {
        let data = Array3::from_shape_fn( (dates.len(), grid_shape.0, grid_shape.1), f);
        Self::new( dates, data)
    }

    pub fn len (&self)->usize { self.dates.len() }

    pub fn is_empty (&self)->bool { self.dates.is_empty() }

    pub fn dates (&self)->&[NaiveDate] { &self.dates }

    pub fn data (&self)->&Array3<f64> { &self.data }

    pub fn into_parts (self)->(Vec<NaiveDate>,Array3<f64>) { (self.dates, self.data) }

    /// (ny,nx) of each grid
    pub fn grid_shape (&self)->(usize,usize) {
        let (_,ny,nx) = self.data.dim();
        (ny,nx)
    }

    pub fn first_date (&self)->Option<NaiveDate> { self.dates.first().copied() }

    pub fn last_date (&self)->Option<NaiveDate> { self.dates.last().copied() }

    /// the [first,last] date window, None for empty series
    pub fn window (&self)->Option<DateWindow> {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => Some( DateWindow { start, end }),
            _ => None
        }
    }

    pub fn index_of (&self, date: &NaiveDate)->Option<usize> {
        self.dates.binary_search(date).ok()
    }

    pub fn grid (&self, idx: usize)->ArrayView2<'_,f64> {
        self.data.index_axis( Axis(0), idx)
    }

    pub fn grid_for (&self, date: &NaiveDate)->Option<ArrayView2<'_,f64>> {
        self.index_of(date).map( |idx| self.grid(idx))
    }

    /// select the timesteps within the inclusive [start,end] bounds. Open bounds are not clipped
    pub fn slice_dates (&self, start: Option<NaiveDate>, end: Option<NaiveDate>)->Self {
        let lo = match start {
            Some(start) => self.dates.partition_point( |d| *d < start),
            None => 0
        };
        let hi = match end {
            Some(end) => self.dates.partition_point( |d| *d <= end),
            None => self.dates.len()
        }.max(lo);

        GriddedTimeSeries {
            dates: self.dates[lo..hi].to_vec(),
            data: self.data.slice( s![lo..hi, .., ..]).to_owned()
        }
    }

    pub fn slice_window (&self, window: &DateWindow)->Self {
        self.slice_dates( Some(window.start), Some(window.end))
    }

    /// concatenate series along the time axis in the given order. Empty parts are ignored, the remaining
    /// ones have to share the grid geometry and need to have strictly increasing dates across part boundaries
    pub fn concat (parts: Vec<GriddedTimeSeries>)->Result<Self> {
        let parts: Vec<GriddedTimeSeries> = parts.into_iter().filter( |p| !p.is_empty()).collect();
        if parts.is_empty() { return Ok( GriddedTimeSeries::empty()) }

        let grid_shape = parts[0].grid_shape();
        for p in &parts[1..] {
            if p.grid_shape() != grid_shape {
                return Err( IceNetSeasError::GridMismatch { expected: grid_shape, found: p.grid_shape() })
            }
        }

        let dates: Vec<NaiveDate> = parts.iter().flat_map( |p| p.dates.iter().copied()).collect();
        let views: Vec<_> = parts.iter().map( |p| p.data.view()).collect();
        let data = concatenate( Axis(0), &views)?;

        Self::new( dates, data)
    }

    /// the min/max/avg of all defined grid values
    pub fn stats (&self)->MinMaxAvg {
        let mut acc = MinMaxAvg::new();
        acc.add_all( self.data.iter());
        acc
    }

    /// min/max of all defined grid values, None if there are none
    pub fn value_range (&self)->Option<ValueRange> {
        self.stats().range()
    }

    /// a new series with the same dates and geometry but different data
    pub fn with_data (&self, data: Array3<f64>)->Result<Self> {
        if data.dim() != self.data.dim() {
            return Err( invalid_series( format!("data shape {:?} does not match series shape {:?}", data.dim(), self.data.dim())))
        }
        Ok( GriddedTimeSeries { dates: self.dates.clone(), data } )
    }

    /// the series on the given date axis. Grids for dates this series does not have are undefined (NaN),
    /// dates outside of `dates` are dropped
    pub fn reindex (&self, dates: &[NaiveDate])->Result<Self> {
        let (ny,nx) = self.grid_shape();
        let mut data = Array3::<f64>::from_elem( (dates.len(), ny, nx), f64::NAN);

        for (i,date) in dates.iter().enumerate() {
            if let Some(grid) = self.grid_for(date) {
                data.index_axis_mut( Axis(0), i).assign( &grid);
            }
        }

        Self::new( dates.to_vec(), data)
    }

    pub fn map_values<F> (&self, f: F)->Self where F: FnMut(f64)->f64 {
        GriddedTimeSeries { dates: self.dates.clone(), data: self.data.mapv(f) }
    }
}

fn check_increasing (dates: &[NaiveDate])->Result<()> {
    for w in dates.windows(2) {
        if w[1] <= w[0] {
            return Err( invalid_series( format!("dates not strictly increasing: {} followed by {}", w[0], w[1])))
        }
    }
    Ok(())
}

/* #endregion GriddedTimeSeries */

/* #region ForecastIssuance **********************************************************************************/

/// a forecast produced at `issue_date` with one grid per lead time (in days from `issue_date`).
/// The data array has (leadtime,y,x) layout
#[derive(Debug,Clone,PartialEq)]
pub struct ForecastIssuance {
    issue_date: NaiveDate,
    leadtimes: Vec<i64>,
    data: Array3<f64>
}

impl ForecastIssuance {
    pub fn new (issue_date: NaiveDate, leadtimes: Vec<i64>, data: Array3<f64>)->Result<Self> {
        if leadtimes.len() != data.dim().0 {
            return Err( invalid_series( format!("{} lead times for {} grids", leadtimes.len(), data.dim().0)))
        }
        if leadtimes.iter().any( |lt| *lt < 0) {
            return Err( invalid_series("negative lead time"))
        }
        if leadtimes.windows(2).any( |w| w[1] <= w[0]) {
            return Err( invalid_series("lead times not strictly increasing"))
        }

        Ok( ForecastIssuance { issue_date, leadtimes, data } )
    }

    pub fn from_shape_fn<F> (issue_date: NaiveDate, leadtimes: Vec<i64>, grid_shape: (usize,usize), f: F)->Result<Self>
        where F: FnMut((usize,usize,usize))->f64
    {
        let data = Array3::from_shape_fn( (leadtimes.len(), grid_shape.0, grid_shape.1), f);
        Self::new( issue_date, leadtimes, data)
    }

    pub fn issue_date (&self)->NaiveDate { self.issue_date }

    pub fn leadtimes (&self)->&[i64] { &self.leadtimes }

    pub fn data (&self)->&Array3<f64> { &self.data }

    pub fn len (&self)->usize { self.leadtimes.len() }

    pub fn is_empty (&self)->bool { self.leadtimes.is_empty() }

    pub fn grid_shape (&self)->(usize,usize) {
        let (_,ny,nx) = self.data.dim();
        (ny,nx)
    }

    pub fn min_leadtime (&self)->Option<i64> { self.leadtimes.first().copied() }

    pub fn max_leadtime (&self)->Option<i64> { self.leadtimes.last().copied() }

    /// the date predicted by the grid with the given lead time
    pub fn valid_date (&self, leadtime: i64)->NaiveDate {
        add_days( &self.issue_date, leadtime)
    }

    /// the window spanned by [issue_date + min leadtime, issue_date + max leadtime]
    pub fn nominal_window (&self)->Result<DateWindow> {
        match (self.min_leadtime(), self.max_leadtime()) {
            (Some(min_lt), Some(max_lt)) => DateWindow::new( self.valid_date(min_lt), self.valid_date(max_lt)),
            _ => Err( invalid_series( format!("forecast issued {} has no lead times", self.issue_date)))
        }
    }

    pub fn grid_for_leadtime (&self, leadtime: i64)->Option<ArrayView2<'_,f64>> {
        self.leadtimes.binary_search( &leadtime).ok().map( |idx| self.data.index_axis( Axis(0), idx))
    }

    pub fn grid_for_date (&self, date: &NaiveDate)->Option<ArrayView2<'_,f64>> {
        self.grid_for_leadtime( days_between( &self.issue_date, date))
    }

    /// the forecast as series indexed by valid dates
    pub fn to_series (&self)->Result<GriddedTimeSeries> {
        let dates = self.leadtimes.iter().map( |lt| self.valid_date(*lt)).collect();
        GriddedTimeSeries::new( dates, self.data.clone())
    }
}

/* #endregion ForecastIssuance */
