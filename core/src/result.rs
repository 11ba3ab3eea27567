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

//! The complete outcome of one executed statement.

use std::collections::{BTreeMap, BTreeSet};
use std::iter::FusedIterator;
use std::ops::Range;
use std::sync::Arc;

use arrow_array::{Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Schema, SchemaRef};
use arrow_select::concat::concat_batches;

use crate::decode::FromResult;
use crate::error::{Error, Result, Status};
use crate::row::Row;

/// Whether a statement produced a row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// A command without a row set, e.g. `UPDATE` or `CREATE TABLE`.
    Command,
    /// A row set, possibly empty.
    Rows,
}

/// An immutable, text-encoded query result.
///
/// Row-set results are stored as an Arrow [RecordBatch] whose columns are
/// all `Utf8`; SQL NULL is the Arrow null. Every [Row] and [crate::Field]
/// borrows the result it was created from.
#[derive(Debug, Clone)]
pub struct QueryResult {
    kind: ResultKind,
    schema: SchemaRef,
    columns: Vec<StringArray>,
    rows: usize,
    rows_affected: Option<u64>,
}

impl QueryResult {
    /// Wrap a row set. Every column must be of type `Utf8`.
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let columns = batch
            .columns()
            .iter()
            .zip(schema.fields())
            .map(|(column, field)| {
                column
                    .as_any()
                    .downcast_ref::<StringArray>()
                    .cloned()
                    .ok_or_else(|| {
                        Error::with_message_and_status(
                            format!(
                                "column {} has type {}, expected {}",
                                field.name(),
                                field.data_type(),
                                DataType::Utf8
                            ),
                            Status::SchemaMismatch,
                        )
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let rows = batch.num_rows();
        Ok(Self {
            kind: ResultKind::Rows,
            schema,
            columns,
            rows,
            rows_affected: Some(rows as u64),
        })
    }

    /// Wrap a row set delivered in several batches sharing `schema`.
    pub fn from_batches<'a>(
        schema: SchemaRef,
        batches: impl IntoIterator<Item = &'a RecordBatch>,
    ) -> Result<Self> {
        Self::from_batch(concat_batches(&schema, batches)?)
    }

    /// A result without a row set.
    pub fn command(rows_affected: Option<u64>) -> Self {
        Self {
            kind: ResultKind::Command,
            schema: Arc::new(Schema::empty()),
            columns: Vec::new(),
            rows: 0,
            rows_affected,
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.kind
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn has_rows_affected(&self) -> bool {
        self.rows_affected.is_some()
    }

    /// Number of rows inserted, updated, deleted or returned.
    pub fn rows_affected(&self) -> Result<u64> {
        self.rows_affected.ok_or_else(|| {
            Error::with_message_and_status(
                "statement does not return affected rows",
                Status::InvalidState,
            )
        })
    }

    /// Number of columns, zero for command results.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn size(&self) -> Result<usize> {
        self.check_has_result_set()?;
        Ok(self.rows)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.size()? == 0)
    }

    /// Name of the column at `column`.
    pub fn name(&self, column: usize) -> Result<&str> {
        self.check_column(column)?;
        Ok(self.schema.field(column).name())
    }

    /// Index of the column named `name`.
    ///
    /// Unquoted names are matched case-insensitively by folding them to
    /// lower case; a double-quoted name is matched exactly, with `""`
    /// standing for a literal quote.
    pub fn index(&self, name: &str) -> Result<usize> {
        self.check_has_result_set()?;
        let folded = fold_column_name(name);
        self.schema
            .index_of(&folded)
            .map_err(|_| Error::out_of_range(format!("column not found: {name}")))
    }

    pub fn is_null(&self, row: usize, column: usize) -> Result<bool> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.columns[column].is_null(row))
    }

    /// The text of a cell. Fails with [Status::UnexpectedNull] on NULL.
    pub fn get(&self, row: usize, column: usize) -> Result<&str> {
        if self.is_null(row, column)? {
            return Err(Error::with_message_and_status(
                format!(
                    "unexpected NULL value in row {row} column {column} = {}",
                    self.schema.field(column).name()
                ),
                Status::UnexpectedNull,
            ));
        }
        Ok(self.columns[column].value(row))
    }

    /// The row at `row`, spanning all columns.
    pub fn at(&self, row: usize) -> Result<Row<'_>> {
        self.check_row(row)?;
        Ok(Row::new(self, row, 0, self.columns()))
    }

    /// All rows in order. The iterator can be cloned or re-created to start
    /// over; it never changes the result.
    pub fn rows(&self) -> Result<Rows<'_>> {
        self.check_has_result_set()?;
        Ok(Rows {
            result: self,
            range: 0..self.rows,
        })
    }

    /// Decode the only row. Fails unless the result has exactly one row.
    pub fn one<T: FromResult>(&self) -> Result<T> {
        match self.size()? {
            1 => self.at(0)?.decode(),
            n => Err(Error::out_of_range(format!(
                "invalid result size: {n} rows, expected 1 row"
            ))),
        }
    }

    /// Decode the only row, if any. Fails on more than one row.
    pub fn optional<T: FromResult>(&self) -> Result<Option<T>> {
        match self.size()? {
            0 => Ok(None),
            1 => self.at(0)?.decode().map(Some),
            n => Err(Error::out_of_range(format!(
                "invalid result size: {n} rows, expected 0 or 1 rows"
            ))),
        }
    }

    pub fn vector<T: FromResult>(&self) -> Result<Vec<T>> {
        self.rows()?.map(|row| row.decode()).collect()
    }

    pub fn set<T: FromResult + Ord>(&self) -> Result<BTreeSet<T>> {
        self.rows()?.map(|row| row.decode()).collect()
    }

    /// Decode each row into a key made of the leading columns and a value
    /// made of the remaining ones.
    pub fn map<K: FromResult + Ord, V: FromResult>(&self) -> Result<BTreeMap<K, V>> {
        self.rows()?.map(|row| row.decode::<(K, V)>()).collect()
    }

    fn check_has_result_set(&self) -> Result<()> {
        match self.kind {
            ResultKind::Rows => Ok(()),
            ResultKind::Command => Err(Error::with_message_and_status(
                "statement does not yield a result set",
                Status::NoResultSet,
            )),
        }
    }

    fn check_row(&self, row: usize) -> Result<()> {
        self.check_has_result_set()?;
        if row >= self.rows {
            if self.rows == 0 {
                return Err(Error::out_of_range(format!(
                    "row {row} out of range, result is empty"
                )));
            }
            return Err(Error::out_of_range(format!(
                "row {row} out of range (0-{})",
                self.rows - 1
            )));
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<()> {
        self.check_has_result_set()?;
        if column >= self.columns() {
            if self.columns() == 0 {
                return Err(Error::out_of_range(format!(
                    "column {column} out of range, result has no columns"
                )));
            }
            return Err(Error::out_of_range(format!(
                "column {column} out of range (0-{})",
                self.columns() - 1
            )));
        }
        Ok(())
    }
}

fn fold_column_name(name: &str) -> String {
    match name
        .strip_prefix('"')
        .and_then(|quoted| quoted.strip_suffix('"'))
    {
        Some(quoted) => quoted.replace("\"\"", "\""),
        None => name.to_ascii_lowercase(),
    }
}

/// Iterator over the rows of a [QueryResult].
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    result: &'a QueryResult,
    range: Range<usize>,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.range.next()?;
        Some(Row::new(self.result, row, 0, self.result.columns()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Rows<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let row = self.range.next_back()?;
        Some(Row::new(self.result, row, 0, self.result.columns()))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}

#[cfg(test)]
mod tests {
    use arrow_array::Int32Array;
    use arrow_schema::Field;

    use super::*;

    fn people() -> QueryResult {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("name", DataType::Utf8, true),
            Field::new("Mixed Case", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["1", "2"])),
                Arc::new(StringArray::from(vec![Some("alice"), None])),
                Arc::new(StringArray::from(vec![Some("x"), Some("y")])),
            ],
        )
        .unwrap();
        QueryResult::from_batch(batch).unwrap()
    }

    #[test]
    fn counts() {
        let result = people();
        assert_eq!(result.kind(), ResultKind::Rows);
        assert_eq!(result.columns(), 3);
        assert_eq!(result.size().unwrap(), 2);
        assert!(!result.is_empty().unwrap());
        assert_eq!(result.rows_affected().unwrap(), 2);
    }

    #[test]
    fn command_results_have_no_row_set() {
        let result = QueryResult::command(Some(5));
        assert_eq!(result.kind(), ResultKind::Command);
        assert_eq!(result.columns(), 0);
        assert_eq!(result.rows_affected().unwrap(), 5);
        assert_eq!(result.size().unwrap_err().status, Status::NoResultSet);
        assert_eq!(result.index("id").unwrap_err().status, Status::NoResultSet);
        assert_eq!(result.name(0).unwrap_err().status, Status::NoResultSet);
        assert_eq!(result.get(0, 0).unwrap_err().status, Status::NoResultSet);
        assert_eq!(result.rows().unwrap_err().status, Status::NoResultSet);

        let result = QueryResult::command(None);
        assert!(!result.has_rows_affected());
        assert_eq!(result.rows_affected().unwrap_err().status, Status::InvalidState);
    }

    #[test]
    fn column_names() {
        let result = people();
        assert_eq!(result.name(1).unwrap(), "name");
        assert_eq!(result.index("name").unwrap(), 1);
        assert_eq!(result.index("NAME").unwrap(), 1);
        assert_eq!(result.index("\"Mixed Case\"").unwrap(), 2);

        let error = result.index("Mixed Case").unwrap_err();
        assert_eq!(error.status, Status::OutOfRange);
        assert_eq!(error.message, "column not found: Mixed Case");

        let error = result.name(3).unwrap_err();
        assert_eq!(error.status, Status::OutOfRange);
        assert_eq!(error.message, "column 3 out of range (0-2)");
    }

    #[test]
    fn cells() {
        let result = people();
        assert_eq!(result.get(0, 1).unwrap(), "alice");
        assert!(result.is_null(1, 1).unwrap());

        let error = result.get(1, 1).unwrap_err();
        assert_eq!(error.status, Status::UnexpectedNull);
        assert_eq!(error.message, "unexpected NULL value in row 1 column 1 = name");

        let error = result.get(2, 0).unwrap_err();
        assert_eq!(error.status, Status::OutOfRange);
        assert_eq!(error.message, "row 2 out of range (0-1)");
    }

    #[test]
    fn empty_row_set() {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Utf8, true)]));
        let result = QueryResult::from_batch(RecordBatch::new_empty(schema)).unwrap();
        assert!(result.is_empty().unwrap());
        assert_eq!(result.rows().unwrap().count(), 0);
        assert_eq!(result.optional::<i32>().unwrap(), None);
        let error = result.at(0).unwrap_err();
        assert_eq!(error.message, "row 0 out of range, result is empty");
    }

    #[test]
    fn rejects_non_text_columns() {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int32, false)]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(vec![1]))]).unwrap();
        let error = QueryResult::from_batch(batch).unwrap_err();
        assert_eq!(error.status, Status::SchemaMismatch);
    }

    #[test]
    fn rows_are_restartable() {
        let result = people();
        let rows = result.rows().unwrap();
        assert_eq!(rows.len(), 2);
        let first: Vec<i32> = rows.clone().map(|row| row.get(0).unwrap()).collect();
        let second: Vec<i32> = rows.map(|row| row.get(0).unwrap()).collect();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(first, second);

        let reversed: Vec<i32> = result
            .rows()
            .unwrap()
            .rev()
            .map(|row| row.get(0).unwrap())
            .collect();
        assert_eq!(reversed, vec![2, 1]);
    }

    #[test]
    fn whole_result_helpers() {
        let result = people();
        let pairs: Vec<(i32, Option<String>, String)> = result.vector().unwrap();
        assert_eq!(
            pairs,
            vec![
                (1, Some("alice".to_string()), "x".to_string()),
                (2, None, "y".to_string())
            ]
        );
        assert_eq!(result.one::<i32>().unwrap_err().status, Status::OutOfRange);
        assert_eq!(result.optional::<i32>().unwrap_err().status, Status::OutOfRange);
        assert_eq!(result.vector::<i32>().unwrap_err().status, Status::SchemaMismatch);

        let map = result.map::<i32, (Option<String>, String)>().unwrap();
        assert_eq!(map[&2], (None, "y".to_string()));
    }
}
