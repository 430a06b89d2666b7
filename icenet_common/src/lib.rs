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

//! domain neutral utilities shared by the IceNet crates

use serde::{Serialize,Deserialize};

pub mod datetime;
pub mod fs;
pub mod config;
pub mod diagnostics;

/// a simple incremental min/max/avg accumulator that ignores undefined (NaN) values
#[derive(Debug,Clone)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation (NaN values are masked and don't count)
    pub fn add (&mut self, x: f64) {
        if x.is_nan() { return }

        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }

    pub fn add_all<'a,I> (&mut self, xs: I) where I: IntoIterator<Item=&'a f64> {
        for x in xs { self.add(*x) }
    }

    pub fn is_empty (&self)->bool { self.n == 0 }

    /// the observed value range, None if we did not see any valid value
    pub fn range (&self)->Option<ValueRange> {
        if self.n > 0 { Some( ValueRange { min: self.min, max: self.max }) } else { None }
    }
}

impl Default for MinMaxAvg {
    fn default()->Self { MinMaxAvg::new() }
}

/// closed value interval
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64
}

impl ValueRange {
    pub fn new (min: f64, max: f64)->Self { ValueRange { min, max } }

    /// the unit interval, which is the physical range of sea ice concentration
    pub fn unit ()->Self { ValueRange { min: 0.0, max: 1.0 } }

    pub fn clamp (&self, x: f64)->f64 {
        if x.is_nan() { x } else { x.clamp( self.min, self.max) }
    }

    pub fn contains (&self, x: f64)->bool { x >= self.min && x <= self.max }

    pub fn is_valid (&self)->bool { self.min <= self.max }
}

impl std::fmt::Display for ValueRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} - {:.2}", self.min, self.max)
    }
}
