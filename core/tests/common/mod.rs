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

use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};

use pgrow_core::QueryResult;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a text result from column names and rows of optional cells.
pub fn text_result(names: &[&str], rows: &[&[Option<&str>]]) -> QueryResult {
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..names.len())
        .map(|column| {
            let cells: Vec<Option<&str>> = rows.iter().map(|row| row[column]).collect();
            Arc::new(StringArray::from(cells)) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema, columns).unwrap();
    QueryResult::from_batch(batch).unwrap()
}

/// A single-cell result.
pub fn cell(value: Option<&str>) -> QueryResult {
    text_result(&["value"], &[&[value]])
}
