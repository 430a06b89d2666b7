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

mod common;
use common::*;

use icenet_seas::cf::{decode_time_offsets, parse_time_units, CfPacking};

#[test]
fn test_unpack_scaled_values() {
    // ice_conc stored as percent in shorts
    let packing = CfPacking { fill_value: Some(-32767.0), scale_factor: Some(0.01), add_offset: Some(0.0), ..CfPacking::default() };
    let mut values = vec![ 0.0, 50.0, 100.0, -32767.0 ];
    packing.unpack( &mut values);

    assert_eq!( values[0], 0.0);
    assert_eq!( values[1], 0.5);
    assert_eq!( values[2], 1.0);
    assert!( values[3].is_nan());

    let offset_only = CfPacking { add_offset: Some(-1.0), ..CfPacking::default() };
    let mut values = vec![ 1.5 ];
    offset_only.unpack( &mut values);
    assert_eq!( values[0], 0.5);
}

#[test]
fn test_unpacked_values_unchanged() {
    let packing = CfPacking { missing_value: Some(-999.0), ..CfPacking::default() };
    assert!( !packing.is_packed());

    let mut values = vec![ 0.25, -999.0, 0.75 ];
    packing.unpack( &mut values);
    assert_eq!( values[0], 0.25);
    assert!( values[1].is_nan());
    assert_eq!( values[2], 0.75);
}

#[test]
fn test_time_units() {
    assert_eq!( parse_time_units( "days since 1970-01-01").unwrap(), (86400.0, ymd(1970,1,1)));
    assert_eq!( parse_time_units( "hours since 1978-10-25 00:00:00").unwrap(), (3600.0, ymd(1978,10,25)));
    assert!( parse_time_units( "fortnights since 1970-01-01").is_err());
    assert!( parse_time_units( "days after 1970-01-01").is_err());
    assert!( parse_time_units( "days since 1970-13-01").is_err());
}

#[test]
fn test_decode_time_offsets() {
    let dates = decode_time_offsets( "hours since 2022-04-01 00:00:00", &[0.0, 12.0, 24.0, 36.0]).unwrap();
    assert_eq!( dates, vec![ ymd(2022,4,1), ymd(2022,4,1), ymd(2022,4,2), ymd(2022,4,2) ]);

    let dates = decode_time_offsets( "days since 2022-04-01", &[-1.0, 30.0]).unwrap();
    assert_eq!( dates, vec![ ymd(2022,3,31), ymd(2022,5,1) ]);
}

#[test]
fn test_reject_non_finite_time_offsets() {
    assert!( decode_time_offsets( "days since 2022-04-01", &[0.0, f64::NAN]).is_err());
    assert!( decode_time_offsets( "days since 2022-04-01", &[f64::INFINITY]).is_err());
    assert!( decode_time_offsets( "days since 2022-04-01", &[1.0e300]).is_err());
}
