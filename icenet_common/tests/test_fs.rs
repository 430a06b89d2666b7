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

use std::fs::File;
use regex::Regex;
use icenet_common::fs::{matching_files_in_dir, canonical_path, filename};

#[test]
fn test_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["20220401.nc", "20220301.nc", "2022.nc", "notes.txt"] {
        File::create( dir.path().join(name)).unwrap();
    }
    std::fs::create_dir( dir.path().join("20220501.nc")).unwrap(); // dirs don't count

    let re = Regex::new( r"^\d{8}\.nc$").unwrap();
    let files = matching_files_in_dir( &dir.path(), &re).unwrap();
    let names: Vec<&str> = files.iter().filter_map(|p| filename(p)).collect();

    assert_eq!( names, vec!["20220301.nc", "20220401.nc"]);
}

#[test]
fn test_missing_dir() {
    let re = Regex::new( r".*").unwrap();
    let files = matching_files_in_dir( &"does/not/exist", &re).unwrap();
    assert!( files.is_empty());
}

#[test]
fn test_canonical_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("20220401.nc");
    File::create(&path).unwrap();

    let indirect = dir.path().join(".").join("20220401.nc");
    assert_eq!( canonical_path(&path), canonical_path(&indirect));
}
