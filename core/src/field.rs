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

use crate::decode::{ColumnsCheck, FromResult, FromText};
use crate::error::Result;
use crate::row::Row;

/// A single cell of a [Row].
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    row: Row<'a>,
    column: usize,
}

impl<'a> Field<'a> {
    pub(crate) fn new(row: Row<'a>, column: usize) -> Self {
        Self { row, column }
    }

    /// Absolute column index within the result.
    pub fn index(&self) -> usize {
        self.column
    }

    fn relative(&self) -> usize {
        self.column - self.row.offset()
    }

    pub fn name(&self) -> Result<&'a str> {
        self.row.name(self.relative())
    }

    pub fn is_null(&self) -> Result<bool> {
        self.row.is_null(self.relative())
    }

    pub fn text(&self) -> Result<&'a str> {
        self.row.text(self.relative())
    }

    /// Decode the cell. Only one-column types are accepted.
    pub fn decode<T: FromResult>(&self) -> Result<T> {
        #[allow(clippy::let_unit_value)]
        let () = <T as ColumnsCheck>::SINGLE;
        self.row.get(self.relative())
    }

    pub fn optional<T: FromText>(&self) -> Result<Option<T>> {
        self.row.optional(self.relative())
    }
}
