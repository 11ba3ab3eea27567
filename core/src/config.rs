// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reader configuration, optionally sourced from the environment.

use std::env;

use crate::constants;
use crate::error::{Error, Result};

/// Attempt to read the environment variable with the given `key`, parsing it
/// using the provided `parse` function.
///
/// Returns
///
/// - `Ok(None)` when the env variable is not set.
/// - `Ok(Some(T))` when the env variable is set and the parser succeeds.
/// - `Err(Error)` when the env variable is set and the parse fails.
pub(crate) fn env_parse<T>(
    key: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<Option<T>> {
    env::var(key).ok().as_deref().map(parse).transpose()
}

/// Settings applied to every [`TableReader`][crate::TableReader].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Sent with the copy-end signal when a reader is abandoned mid-stream.
    pub cancel_message: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            cancel_message: constants::DEFAULT_CANCEL_MESSAGE.to_owned(),
        }
    }
}

impl ReaderConfig {
    /// Environment variable for [`Self::cancel_message`].
    pub const CANCEL_MESSAGE_ENV: &'static str = constants::CANCEL_MESSAGE_ENV;

    /// Construct a config from the environment, falling back to the defaults
    /// for unset variables.
    ///
    /// # Error
    ///
    /// Returns an error when a variable is set but its value is invalid.
    pub fn from_env() -> Result<Self> {
        let cancel_message = env_parse(Self::CANCEL_MESSAGE_ENV, parse_cancel_message)?;
        Ok(Self {
            cancel_message: cancel_message
                .unwrap_or_else(|| constants::DEFAULT_CANCEL_MESSAGE.to_owned()),
        })
    }
}

fn parse_cancel_message(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::with_message_and_status(
            format!("{} must not be empty", constants::CANCEL_MESSAGE_ENV),
            crate::error::Status::InvalidArguments,
        ));
    }
    Ok(value.to_owned())
}
