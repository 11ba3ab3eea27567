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

use crate::error::Result;
use crate::options::OptionValue;
use crate::result::QueryResult;

/// Ability to configure an object by setting/getting options.
pub trait Optionable {
    type Option: AsRef<str>;

    /// Set a post-init option.
    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()>;

    /// Get a string option value by key.
    fn get_option_string(&self, key: Self::Option) -> Result<String>;

    /// Get a bytes option value by key.
    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>>;

    /// Get an integer option value by key.
    fn get_option_int(&self, key: Self::Option) -> Result<i64>;

    /// Get a float option value by key.
    fn get_option_double(&self, key: Self::Option) -> Result<f64>;
}

/// A handle to an open connection to the data source.
///
/// Connections are used from a single thread at a time and every call
/// blocks until the data source has answered.
pub trait Connection {
    /// Execute a statement and collect its complete result.
    fn execute(&mut self, statement: &str) -> Result<QueryResult>;

    /// Execute a statement that puts the connection into copy-out mode,
    /// e.g. `COPY ... TO STDOUT`.
    ///
    /// Fails with the data source's own error when the statement does not
    /// start a copy-out.
    fn start_copy_out(&mut self, statement: &str) -> Result<()>;

    /// Replace the content of `buffer` with the next chunk of copy data.
    ///
    /// # Result
    ///
    /// - `Ok(true)`: `buffer` holds the next chunk.
    /// - `Ok(false)`: the copy is complete and the connection has left
    ///   copy-out mode.
    /// - `Err(_)`: the transport failed.
    fn get_copy_data(&mut self, buffer: &mut Vec<u8>) -> Result<bool>;

    /// Leave copy mode. An `error_message` aborts the copy and asks the data
    /// source to discard whatever it has not sent yet.
    fn put_copy_end(&mut self, error_message: Option<&str>) -> Result<()>;

    /// The most recent error message reported by the data source.
    fn error_message(&self) -> String;
}

/// A transaction on a [Connection].
///
/// While a transaction is borrowed by a nested scope (such as a
/// [TableReader][crate::TableReader]) it cannot be used, which suspends it
/// until the nested scope ends.
pub trait Transaction {
    type ConnectionType: Connection;

    /// The connection this transaction runs on.
    fn connection(&mut self) -> &mut Self::ConnectionType;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;
}
