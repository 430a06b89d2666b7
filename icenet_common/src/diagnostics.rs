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

//! the diagnostics sink that is passed into all core components. Production code uses
//! [`TracingDiagnostics`], tests use [`RecordingDiagnostics`] to check which diagnostics got emitted

use std::sync::Mutex;
use std::fmt;

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord)]
pub enum DiagLevel {
    Debug,
    Info,
    Warn,
    Error
}

impl fmt::Display for DiagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagLevel::Debug => "debug",
            DiagLevel::Info => "info",
            DiagLevel::Warn => "warn",
            DiagLevel::Error => "error",
        };
        write!(f, "{s}")
    }
}

pub trait Diagnostics {
    fn emit (&self, level: DiagLevel, msg: &str);

    fn debug (&self, msg: &str) { self.emit( DiagLevel::Debug, msg) }
    fn info (&self, msg: &str) { self.emit( DiagLevel::Info, msg) }
    fn warn (&self, msg: &str) { self.emit( DiagLevel::Warn, msg) }
    fn error (&self, msg: &str) { self.emit( DiagLevel::Error, msg) }
}

/// forwards to the `tracing` macros
#[derive(Debug,Default,Clone,Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit (&self, level: DiagLevel, msg: &str) {
        match level {
            DiagLevel::Debug => tracing::debug!("{}", msg),
            DiagLevel::Info => tracing::info!("{}", msg),
            DiagLevel::Warn => tracing::warn!("{}", msg),
            DiagLevel::Error => tracing::error!("{}", msg),
        }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct DiagEvent {
    pub level: DiagLevel,
    pub msg: String
}

/// keeps all emitted events in memory
#[derive(Debug,Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagEvent>>
}

impl RecordingDiagnostics {
    pub fn new()->Self { RecordingDiagnostics::default() }

    pub fn events (&self)->Vec<DiagEvent> {
        self.events.lock().map( |events| events.clone()).unwrap_or_default()
    }

    pub fn messages (&self, level: DiagLevel)->Vec<String> {
        self.events().into_iter().filter( |e| e.level == level).map( |e| e.msg).collect()
    }

    pub fn count (&self, level: DiagLevel)->usize {
        self.events().iter().filter( |e| e.level == level).count()
    }

    pub fn clear (&self) {
        if let Ok(mut events) = self.events.lock() { events.clear() }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit (&self, level: DiagLevel, msg: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push( DiagEvent { level, msg: msg.to_string() });
        }
    }
}
