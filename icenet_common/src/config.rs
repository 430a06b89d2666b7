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

//! RON based configuration loading

use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error,Debug)]
pub enum ConfigError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config RON error {0}")]
    RonError( #[from] ron::Error),

    #[error("config serialize/deserialize RON error {0}")]
    RonSerdeError( #[from] ron::error::SpannedError),
}

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let data = std::fs::read(path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

/// load config from `path` if given, fall back to the config type's default otherwise
pub fn load_config_or_default<C,P> (path: Option<P>) -> Result<C> where C: for <'a> serde::Deserialize<'a> + Default, P: AsRef<Path> {
    match path {
        Some(path) => load_config_path(path),
        None => Ok( C::default())
    }
}

pub fn config_to_ron_string<C> (config: &C) -> Result<String> where C: serde::Serialize {
    Ok( ron::ser::to_string_pretty( config, ron::ser::PrettyConfig::default())? )
}
