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

//! A scripted, in-memory data source used for testing purposes.
//!
//! Statements are registered up front together with the result they yield
//! or the chunks a copy-out emits. Every copy-end signal is recorded so that
//! tests can check how a [pgrow_core::TableReader] left the connection.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};

use pgrow_core::error::{Error, Result, Status};
use pgrow_core::{Connection, QueryResult, Transaction};

/// One step of a scripted copy-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyEvent {
    /// A chunk of copy data.
    Chunk(Vec<u8>),
    /// A transport failure carrying the data source's error text.
    Failure(String),
}

/// Build a text result from column names and rows of optional cells.
pub fn text_result(names: &[&str], rows: &[&[Option<&str>]]) -> Result<QueryResult> {
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns = (0..names.len())
        .map(|column| {
            let cells = rows
                .iter()
                .map(|row| {
                    row.get(column).copied().ok_or_else(|| {
                        Error::with_message_and_status(
                            format!("row has no cell for column {column}"),
                            Status::InvalidArguments,
                        )
                    })
                })
                .collect::<Result<Vec<Option<&str>>>>()?;
            Ok(Arc::new(StringArray::from(cells)) as ArrayRef)
        })
        .collect::<Result<Vec<_>>>()?;
    QueryResult::from_batch(RecordBatch::try_new(schema, columns)?)
}

/// A connection that answers from a script.
#[derive(Debug, Default)]
pub struct DummyConnection {
    results: HashMap<String, QueryResult>,
    copies: HashMap<String, Vec<CopyEvent>>,
    active_copy: Option<VecDeque<CopyEvent>>,
    copy_end_failure: Option<String>,
    copy_ends: Vec<Option<String>>,
    error_message: String,
}

impl DummyConnection {
    /// Answer `statement` with `result`.
    pub fn with_result(mut self, statement: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(statement.into(), result);
        self
    }

    /// Answer `statement` with a copy-out emitting `chunks`, then the end of
    /// the copy.
    pub fn with_copy_out<I, B>(self, statement: impl Into<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        let events = chunks
            .into_iter()
            .map(|chunk| CopyEvent::Chunk(chunk.into()))
            .collect();
        self.with_copy_events(statement, events)
    }

    /// Answer `statement` with a copy-out following `events`. Events after a
    /// [CopyEvent::Failure] are never reached.
    pub fn with_copy_events(mut self, statement: impl Into<String>, events: Vec<CopyEvent>) -> Self {
        self.copies.insert(statement.into(), events);
        self
    }

    /// Make every copy-end signal fail with `message`.
    pub fn with_copy_end_failure(mut self, message: impl Into<String>) -> Self {
        self.copy_end_failure = Some(message.into());
        self
    }

    /// Every copy-end signal received so far, with its error message.
    pub fn copy_ends(&self) -> &[Option<String>] {
        &self.copy_ends
    }

    pub fn in_copy_out(&self) -> bool {
        self.active_copy.is_some()
    }

    /// Begin a transaction on this connection.
    pub fn transaction(&mut self) -> DummyTransaction<'_> {
        DummyTransaction {
            connection: self,
            state: TransactionState::Open,
        }
    }

    fn fail(&mut self, message: String, status: Status) -> Error {
        self.error_message.clone_from(&message);
        Error::with_message_and_status(message, status)
    }

    fn ensure_idle(&mut self) -> Result<()> {
        if self.in_copy_out() {
            return Err(self.fail(
                "another command is already in progress".to_owned(),
                Status::InvalidState,
            ));
        }
        Ok(())
    }
}

impl Connection for DummyConnection {
    fn execute(&mut self, statement: &str) -> Result<QueryResult> {
        self.ensure_idle()?;
        match self.results.get(statement) {
            Some(result) => Ok(result.clone()),
            None => Err(self
                .fail(format!("statement not scripted: {statement}"), Status::NotFound)
                .with_sqlstate(*b"42P01")),
        }
    }

    fn start_copy_out(&mut self, statement: &str) -> Result<()> {
        self.ensure_idle()?;
        match self.copies.get(statement) {
            Some(events) => {
                log::debug!("dummy copy-out of {} events: {statement}", events.len());
                self.active_copy = Some(events.iter().cloned().collect());
                Ok(())
            }
            None => Err(self.fail(
                format!("statement does not start a copy-out: {statement}"),
                Status::InvalidState,
            )),
        }
    }

    fn get_copy_data(&mut self, buffer: &mut Vec<u8>) -> Result<bool> {
        let Some(events) = self.active_copy.as_mut() else {
            return Err(self.fail("no copy-out in progress".to_owned(), Status::InvalidState));
        };
        match events.pop_front() {
            Some(CopyEvent::Chunk(chunk)) => {
                buffer.extend_from_slice(&chunk);
                Ok(true)
            }
            Some(CopyEvent::Failure(message)) => Err(self.fail(message, Status::IO)),
            None => {
                self.active_copy = None;
                Ok(false)
            }
        }
    }

    fn put_copy_end(&mut self, error_message: Option<&str>) -> Result<()> {
        self.copy_ends.push(error_message.map(str::to_owned));
        if let Some(message) = self.copy_end_failure.clone() {
            return Err(self.fail(message, Status::IO));
        }
        if self.active_copy.take().is_none() {
            return Err(self.fail("no copy-out in progress".to_owned(), Status::InvalidState));
        }
        Ok(())
    }

    fn error_message(&self) -> String {
        self.error_message.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Open,
    Committed,
    RolledBack,
}

/// A transaction on a [DummyConnection].
#[derive(Debug)]
pub struct DummyTransaction<'c> {
    connection: &'c mut DummyConnection,
    state: TransactionState,
}

impl DummyTransaction<'_> {
    pub fn state(&self) -> TransactionState {
        self.state
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state != TransactionState::Open {
            return Err(Error::with_message_and_status(
                format!("transaction already {:?}", self.state),
                Status::InvalidState,
            ));
        }
        Ok(())
    }
}

impl Transaction for DummyTransaction<'_> {
    type ConnectionType = DummyConnection;

    fn connection(&mut self) -> &mut DummyConnection {
        self.connection
    }

    fn commit(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.connection.ensure_idle()?;
        self.state = TransactionState::Committed;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.state = TransactionState::RolledBack;
        Ok(())
    }
}
