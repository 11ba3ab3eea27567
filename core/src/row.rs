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

//! Views over a range of columns within one row of a [QueryResult].

use crate::decode::{ColumnsCheck, FromResult, FromText};
use crate::error::{Error, Result, Status};
use crate::field::Field;
use crate::result::QueryResult;

/// A view over `columns` consecutive columns of one row, starting at
/// `offset`.
///
/// Rows are cheap to copy and never own data; they cannot outlive the
/// [QueryResult] they were taken from.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    result: &'a QueryResult,
    row: usize,
    offset: usize,
    columns: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(result: &'a QueryResult, row: usize, offset: usize, columns: usize) -> Self {
        debug_assert!(offset
            .checked_add(columns)
            .is_some_and(|end| end <= result.columns()));
        Self {
            result,
            row,
            offset,
            columns,
        }
    }

    /// Index of this row within the result.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Absolute index of the first column of this view.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// A narrower view over `columns` columns starting at `offset`, relative
    /// to this view.
    pub fn slice(&self, offset: usize, columns: usize) -> Result<Row<'a>> {
        if columns == 0 {
            return Err(Error::with_message_and_status(
                "slice requires at least one column",
                Status::InvalidArguments,
            ));
        }
        if offset
            .checked_add(columns)
            .filter(|end| *end <= self.columns)
            .is_none()
        {
            return Err(Error::out_of_range(format!(
                "slice ({}-{}) out of range (0-{})",
                offset,
                offset.saturating_add(columns - 1),
                self.columns.saturating_sub(1)
            )));
        }
        Ok(Row::new(self.result, self.row, self.offset + offset, columns))
    }

    pub fn name(&self, column: usize) -> Result<&'a str> {
        self.ensure_column(column)?;
        self.result.name(self.offset + column)
    }

    /// Index of the column named `name`, relative to this view.
    pub fn index(&self, name: &str) -> Result<usize> {
        let column = self.result.index(name)?;
        if column < self.offset || column - self.offset >= self.columns {
            return Err(Error::out_of_range(format!(
                "column {name} out of range (column {column} is not part of the row/slice)"
            )));
        }
        Ok(column - self.offset)
    }

    pub fn is_null(&self, column: usize) -> Result<bool> {
        self.ensure_column(column)?;
        self.result.is_null(self.row, self.offset + column)
    }

    /// The raw text of a cell. Fails with [Status::UnexpectedNull] on NULL.
    pub fn text(&self, column: usize) -> Result<&'a str> {
        self.ensure_column(column)?;
        self.result.get(self.row, self.offset + column)
    }

    /// Decode a single cell, substituting the null sentinel of `T` for NULL.
    pub fn cell<T: FromText>(&self, column: usize) -> Result<T> {
        if self.is_null(column)? {
            if let Some(null) = T::null() {
                return Ok(null);
            }
        }
        T::from_text(self.text(column)?)
    }

    /// Decode `T` from the columns starting at `column`. The row may be wider
    /// than `T` needs.
    pub fn get<T: FromResult>(&self, column: usize) -> Result<T> {
        #[allow(clippy::let_unit_value)]
        let () = <T as ColumnsCheck>::NON_ZERO;
        self.ensure_column(column)?;
        if T::COLUMNS > self.columns - column {
            return Err(Error::with_message_and_status(
                format!(
                    "datatype ({}) requires {} columns, but row/slice has {} columns starting at column {}",
                    std::any::type_name::<T>(),
                    T::COLUMNS,
                    self.columns - column,
                    column
                ),
                Status::SchemaMismatch,
            ));
        }
        T::from_row(Row::new(
            self.result,
            self.row,
            self.offset + column,
            T::COLUMNS,
        ))
    }

    pub fn optional<T: FromText>(&self, column: usize) -> Result<Option<T>> {
        self.get::<Option<T>>(column)
    }

    /// Decode `T` from the whole view. The view must have exactly
    /// `T::COLUMNS` columns.
    pub fn decode<T: FromResult>(&self) -> Result<T> {
        if T::COLUMNS != self.columns {
            return Err(Error::with_message_and_status(
                format!(
                    "datatype ({}) requires {} columns, but row/slice has {} columns",
                    std::any::type_name::<T>(),
                    T::COLUMNS,
                    self.columns
                ),
                Status::SchemaMismatch,
            ));
        }
        self.get(0)
    }

    pub fn pair<A: FromResult, B: FromResult>(&self) -> Result<(A, B)> {
        self.decode()
    }

    pub fn field(&self, column: usize) -> Result<Field<'a>> {
        self.ensure_column(column)?;
        Ok(Field::new(*self, self.offset + column))
    }

    pub fn field_by_name(&self, name: &str) -> Result<Field<'a>> {
        let column = self.index(name)?;
        Ok(Field::new(*self, self.offset + column))
    }

    /// All fields of this view, in column order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = Field<'a>> + 'a {
        let row = *self;
        (0..row.columns).map(move |column| Field::new(row, row.offset + column))
    }

    fn ensure_column(&self, column: usize) -> Result<()> {
        if column >= self.columns {
            return Err(Error::out_of_range(format!(
                "column {} out of range (0-{})",
                column,
                self.columns.saturating_sub(1)
            )));
        }
        Ok(())
    }
}
