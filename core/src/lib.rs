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

//! pgrow: typed decoding of text-encoded query results.
//!
//! The `core` library turns the text cells of a query result into Rust
//! values and streams bulk exports without materializing them:
//!
//! - [QueryResult], [Row] and [Field] are read-only views over a result.
//! - [FromText] and [FromResult] form the conversion registry. Scalars,
//!   [Option] (the null sentinel), tuples spanning several columns and
//!   array containers are supported out of the box; other types are added
//!   by implementing the traits.
//! - [array] parses the textual array format, nesting as deep as the target
//!   type does.
//! - [TableReader] pulls the raw output of `COPY ... TO STDOUT` chunk by
//!   chunk and cancels the copy if it is abandoned.
//!
//! Connecting, transactions and the wire protocol are left to an
//! implementation of [Connection] and [Transaction].
//!
//! ```
//! # use std::sync::Arc;
//! # use arrow_array::{RecordBatch, StringArray};
//! # use arrow_schema::{DataType, Field, Schema};
//! use pgrow_core::QueryResult;
//!
//! # let schema = Arc::new(Schema::new(vec![
//! #     Field::new("id", DataType::Utf8, false),
//! #     Field::new("tags", DataType::Utf8, true),
//! # ]));
//! # let batch = RecordBatch::try_new(schema, vec![
//! #     Arc::new(StringArray::from(vec!["1"])),
//! #     Arc::new(StringArray::from(vec![Some("{a,NULL}")])),
//! # ]).unwrap();
//! let result = QueryResult::from_batch(batch)?;
//! for row in result.rows()? {
//!     let id: i64 = row.get(0)?;
//!     let tags: Vec<Option<String>> = row.get(1)?;
//!     assert_eq!((id, tags), (1, vec![Some("a".to_string()), None]));
//! }
//! # Ok::<(), pgrow_core::error::Error>(())
//! ```

pub mod array;
pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod field;
pub mod options;
pub mod result;
pub mod row;
pub mod sync;
pub mod table_reader;
mod transaction;

pub use decode::{Bytea, FromResult, FromText};
pub use field::Field;
pub use result::{QueryResult, ResultKind, Rows};
pub use row::Row;
pub use sync::*;
pub use table_reader::{ReaderState, TableReader};
