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

mod common;

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use arrow_array::{RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};

use pgrow_core::error::{Error, Result, Status};
use pgrow_core::{impl_from_result, FromResult, FromText, QueryResult, Row};

use common::{cell, text_result};

#[derive(Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl FromResult for Point {
    const COLUMNS: usize = 2;

    fn from_row(row: Row<'_>) -> Result<Self> {
        Ok(Point {
            x: row.get(0)?,
            y: row.get(1)?,
        })
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Mood {
    Happy,
    Sad,
}

impl FromText for Mood {
    fn from_text(value: &str) -> Result<Self> {
        match value {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            _ => Err(Error::with_message_and_status(
                format!("invalid mood: {value}"),
                Status::InvalidData,
            )),
        }
    }
}

impl_from_result!(Mood);

#[derive(Debug, PartialEq)]
struct Score(i32);

impl FromText for Score {
    fn from_text(value: &str) -> Result<Self> {
        i32::from_text(value).map(Score)
    }

    fn null() -> Option<Self> {
        Some(Score(-1))
    }
}

impl_from_result!(Score);

#[test]
fn null_sentinel_or_unexpected_null() {
    common::init_logging();
    let result = cell(None);
    let row = result.at(0).unwrap();

    assert_eq!(row.get::<Option<i32>>(0).unwrap(), None);
    assert_eq!(row.get::<Score>(0).unwrap(), Score(-1));
    assert_eq!(
        row.get::<i32>(0).unwrap_err().status,
        Status::UnexpectedNull
    );
    assert_eq!(
        row.get::<Vec<i32>>(0).unwrap_err().status,
        Status::UnexpectedNull
    );
    assert_eq!(row.get::<Option<Vec<i32>>>(0).unwrap(), None);
}

#[test]
fn arrays_from_cells() {
    let result = text_result(
        &["empty", "ints", "quoted", "nullable", "nested"],
        &[&[
            Some("{}"),
            Some("{1,2,3}"),
            Some(r#"{"a,b","c\"d"}"#),
            Some("{1,NULL,3}"),
            Some("{{1,2},{3,4}}"),
        ]],
    );
    let row = result.at(0).unwrap();

    assert!(row.get::<Vec<i32>>(0).unwrap().is_empty());
    assert!(row.get::<HashSet<String>>(0).unwrap().is_empty());
    assert_eq!(row.get::<Vec<i32>>(1).unwrap(), vec![1, 2, 3]);
    assert_eq!(
        row.get::<Vec<String>>(2).unwrap(),
        vec!["a,b".to_string(), "c\"d".to_string()]
    );
    assert_eq!(
        row.get::<Vec<Option<i32>>>(3).unwrap(),
        vec![Some(1), None, Some(3)]
    );
    assert_eq!(
        row.get::<Vec<i32>>(3).unwrap_err().status,
        Status::InvalidArray
    );
    assert_eq!(
        row.get::<Vec<Vec<i32>>>(4).unwrap(),
        vec![vec![1, 2], vec![3, 4]]
    );
}

#[test]
fn malformed_arrays_in_cells() {
    for literal in ["{1,2", "{1,2}x", "{1,,2}", "{\"1}"] {
        let result = cell(Some(literal));
        let error = result.at(0).unwrap().get::<Vec<i32>>(0).unwrap_err();
        assert_eq!(error.status, Status::InvalidArray, "{literal}");
    }
}

#[test]
fn registered_types() {
    let result = text_result(
        &["x", "y", "mood", "moods"],
        &[
            &[Some("1.5"), Some("-2"), Some("happy"), Some("{sad,happy,sad}")],
            &[Some("0"), Some("0"), Some("sad"), Some("{}")],
        ],
    );
    let row = result.at(0).unwrap();
    assert_eq!(row.get::<Point>(0).unwrap(), Point { x: 1.5, y: -2.0 });
    assert_eq!(row.get::<Mood>(2).unwrap(), Mood::Happy);
    assert_eq!(
        row.get::<BTreeSet<Mood>>(3).unwrap(),
        BTreeSet::from([Mood::Happy, Mood::Sad])
    );
    assert_eq!(
        row.slice(0, 3).unwrap().decode::<(Point, Mood)>().unwrap(),
        (Point { x: 1.5, y: -2.0 }, Mood::Happy)
    );

    let points: Vec<(Point, Mood, Vec<Mood>)> = result.vector().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].0, Point { x: 0.0, y: 0.0 });
    assert!(points[1].2.is_empty());

    let bad = cell(Some("{angry}"));
    assert_eq!(
        bad.at(0).unwrap().get::<Vec<Mood>>(0).unwrap_err().status,
        Status::InvalidData
    );
}

#[test]
fn multi_column_types_need_enough_columns() {
    let result = text_result(&["x"], &[&[Some("1")]]);
    let row = result.at(0).unwrap();
    let error = row.get::<Point>(0).unwrap_err();
    assert_eq!(error.status, Status::SchemaMismatch);
    assert!(error.message.contains("requires 2 columns"));
    assert!(error.message.contains("Point"));
}

#[test]
fn batches_are_concatenated() {
    let schema = Arc::new(Schema::new(vec![Field::new("n", DataType::Utf8, true)]));
    let first = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(StringArray::from(vec!["1", "2"]))],
    )
    .unwrap();
    let second =
        RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["3"]))])
            .unwrap();
    let result = QueryResult::from_batches(schema, [&first, &second]).unwrap();
    assert_eq!(result.size().unwrap(), 3);
    assert_eq!(result.vector::<i64>().unwrap(), vec![1, 2, 3]);
    assert_eq!(result.set::<i64>().unwrap(), BTreeSet::from([1, 2, 3]));
}

#[test]
fn iteration_never_mutates_the_result() {
    let result = text_result(
        &["id", "name"],
        &[&[Some("1"), Some("a")], &[Some("2"), None]],
    );
    let names: Vec<Option<String>> = result
        .rows()
        .unwrap()
        .map(|row| row.optional::<String>(1).unwrap())
        .collect();
    assert_eq!(names, vec![Some("a".to_string()), None]);

    let ids: Vec<i32> = result
        .rows()
        .unwrap()
        .map(|row| row.field_by_name("ID").unwrap().decode().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(result.size().unwrap(), 2);
}
