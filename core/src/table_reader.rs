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

//! Streaming reader for bulk exports (`COPY ... TO STDOUT`).

use crate::config::ReaderConfig;
use crate::error::{Error, Result, Status};
use crate::options::{OptionReader, OptionValue};
use crate::sync::{Connection, Optionable, Transaction};
use crate::transaction::CopyOutTransaction;

/// Lifecycle of a [TableReader].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Chunks may still be fetched.
    Streaming,
    /// The data source signalled the end of the copy.
    Completed,
    /// The copy was aborted with a copy-end signal.
    Cancelled,
    /// Fetching failed; the copy is aborted when the reader is closed or
    /// dropped.
    Failed,
}

/// Pulls the output of a bulk export one chunk at a time.
///
/// The reader borrows the parent transaction mutably for its whole lifetime
/// and runs the copy inside a sub-transaction of its own. Chunks are
/// delivered in the order the data source produced them. Only the most
/// recent chunk is held; [TableReader::fetch_next] replaces it.
///
/// A reader that is dropped before the copy completed sends a copy-end
/// signal with [ReaderConfig::cancel_message], so the connection leaves
/// copy-out mode and stays usable. Use [TableReader::close] to observe a
/// failure of that signal.
///
/// ```ignore
/// let mut reader = TableReader::open(&mut transaction, "COPY users TO STDOUT")?;
/// while reader.fetch_next()? {
///     sink.write_all(reader.raw_chunk())?;
/// }
/// reader.close()?;
/// ```
pub struct TableReader<'a, C: Connection> {
    transaction: CopyOutTransaction<'a, C>,
    buffer: Vec<u8>,
    state: ReaderState,
    config: ReaderConfig,
}

impl<'a, C: Connection> TableReader<'a, C> {
    /// Start `statement` in copy-out mode on the parent's connection.
    pub fn open<T>(parent: &'a mut T, statement: &str) -> Result<Self>
    where
        T: Transaction<ConnectionType = C>,
    {
        Self::open_with_config(parent, statement, ReaderConfig::default())
    }

    pub fn open_with_config<T>(
        parent: &'a mut T,
        statement: &str,
        config: ReaderConfig,
    ) -> Result<Self>
    where
        T: Transaction<ConnectionType = C>,
    {
        let mut transaction = CopyOutTransaction::new(parent);
        transaction.connection().start_copy_out(statement)?;
        log::debug!("copy-out started: {statement}");
        Ok(Self {
            transaction,
            buffer: Vec::new(),
            state: ReaderState::Streaming,
            config,
        })
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Fetch the next chunk, releasing the previous one.
    ///
    /// Returns `false` once the copy is complete; later calls keep returning
    /// `false`.
    pub fn fetch_next(&mut self) -> Result<bool> {
        match self.state {
            ReaderState::Streaming => {}
            ReaderState::Completed => return Ok(false),
            ReaderState::Cancelled | ReaderState::Failed => {
                return Err(Error::with_message_and_status(
                    format!("cannot fetch from a {:?} table reader", self.state),
                    Status::InvalidState,
                ));
            }
        }

        self.buffer.clear();
        let connection = self.transaction.connection();
        match connection.get_copy_data(&mut self.buffer) {
            Ok(true) => {
                log::trace!("copy-out chunk of {} bytes", self.buffer.len());
                Ok(true)
            }
            Ok(false) => {
                self.state = ReaderState::Completed;
                self.transaction.commit()?;
                log::debug!("copy-out completed");
                Ok(false)
            }
            Err(error) => {
                self.state = ReaderState::Failed;
                self.buffer.clear();
                let mut message = connection.error_message();
                if message.is_empty() {
                    message = error.message;
                }
                Err(Error {
                    message: format!("get_copy_data() failed: {message}"),
                    status: Status::IO,
                    ..error
                })
            }
        }
    }

    /// The current chunk. Empty before the first and after the last fetch.
    pub fn raw_chunk(&self) -> &[u8] {
        &self.buffer
    }

    /// The current chunk as UTF-8 text.
    pub fn chunk_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.buffer)?)
    }

    /// Finish with the reader.
    ///
    /// A reader that has not completed is cancelled; a failure to deliver
    /// the copy-end signal is returned here instead of being logged.
    pub fn close(mut self) -> Result<()> {
        self.cancel()
    }

    fn cancel(&mut self) -> Result<()> {
        if !matches!(self.state, ReaderState::Streaming | ReaderState::Failed) {
            return Ok(());
        }
        self.state = ReaderState::Cancelled;
        self.buffer = Vec::new();
        let transaction = &mut self.transaction;
        let result = transaction
            .connection()
            .put_copy_end(Some(&self.config.cancel_message));
        transaction.rollback()?;
        log::debug!("copy-out cancelled: {}", self.config.cancel_message);
        result
    }
}

impl<C: Connection> Drop for TableReader<'_, C> {
    fn drop(&mut self) {
        if let Err(error) = self.cancel() {
            log::warn!("failed to cancel copy-out: {error}");
        }
    }
}

impl<C: Connection> Optionable for TableReader<'_, C> {
    type Option = OptionReader;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        match (key, value) {
            (OptionReader::CancelMessage, OptionValue::String(message)) => {
                self.config.cancel_message = message;
                Ok(())
            }
            (OptionReader::CancelMessage, value) => Err(Error::with_message_and_status(
                format!(
                    "Incorrect value for reader option {}: expected String, got {}",
                    OptionReader::CancelMessage.as_ref(),
                    value.get_type()
                ),
                Status::InvalidArguments,
            )),
            (key, _) => Err(unknown_option(&key)),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        match key {
            OptionReader::CancelMessage => Ok(self.config.cancel_message.clone()),
            key => Err(unknown_option(&key)),
        }
    }

    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>> {
        Err(unknown_option(&key))
    }

    fn get_option_int(&self, key: Self::Option) -> Result<i64> {
        Err(unknown_option(&key))
    }

    fn get_option_double(&self, key: Self::Option) -> Result<f64> {
        Err(unknown_option(&key))
    }
}

fn unknown_option(key: &OptionReader) -> Error {
    Error::with_message_and_status(
        format!("Unrecognized reader option: {}", key.as_ref()),
        Status::NotFound,
    )
}
