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

use serde::{Serialize,Deserialize};
use icenet_common::{MinMaxAvg, ValueRange};
use icenet_common::diagnostics::{Diagnostics, DiagLevel, RecordingDiagnostics};
use icenet_common::config::{load_config_path, load_config_or_default, config_to_ron_string};

#[test]
fn test_min_max_avg_skips_nan() {
    let mut acc = MinMaxAvg::new();
    assert!( acc.range().is_none());

    acc.add_all( &[0.2, f64::NAN, 0.8, 0.5]);
    assert_eq!( acc.n, 3);
    assert_eq!( acc.range(), Some( ValueRange::new(0.2, 0.8)));
    assert!( (acc.avg - 0.5).abs() < 1e-12);
}

#[test]
fn test_value_range() {
    let r = ValueRange::unit();
    assert_eq!( r.clamp(1.3), 1.0);
    assert_eq!( r.clamp(-0.1), 0.0);
    assert!( r.clamp(f64::NAN).is_nan());
    assert_eq!( format!("{}", ValueRange::new(0.123, 0.9)), "0.12 - 0.90");
}

#[test]
fn test_recording_diagnostics() {
    let diag = RecordingDiagnostics::new();
    diag.info("got files");
    diag.warn("missing 2021");
    diag.warn("missing 2022");

    assert_eq!( diag.count(DiagLevel::Warn), 2);
    assert_eq!( diag.messages(DiagLevel::Info), vec!["got files".to_string()]);

    diag.clear();
    assert!( diag.events().is_empty());
}

#[derive(Serialize,Deserialize,Debug,PartialEq,Default)]
#[serde(default)]
struct TestConfig {
    name: String,
    window_days: i64,
}

#[test]
fn test_config_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ron");

    let conf = TestConfig { name: "seas".into(), window_days: 3650 };
    std::fs::write( &path, config_to_ron_string(&conf).unwrap()).unwrap();

    let loaded: TestConfig = load_config_path(&path).unwrap();
    assert_eq!( loaded, conf);

    let default: TestConfig = load_config_or_default::<TestConfig,&std::path::Path>(None).unwrap();
    assert_eq!( default, TestConfig::default());

    std::fs::write( &path, "(window_days: 10)").unwrap();
    let partial: TestConfig = load_config_path(&path).unwrap();
    assert_eq!( partial.window_days, 10);
}
