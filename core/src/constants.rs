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

use crate::error::StatusCode;

pub const STATUS_OK: StatusCode = 0;
pub const STATUS_UNKNOWN: StatusCode = 1;
pub const STATUS_NOT_FOUND: StatusCode = 3;
pub const STATUS_INVALID_ARGUMENT: StatusCode = 5;
pub const STATUS_INVALID_STATE: StatusCode = 6;
pub const STATUS_INVALID_DATA: StatusCode = 7;
pub const STATUS_INTERNAL: StatusCode = 9;
pub const STATUS_IO: StatusCode = 10;
pub const STATUS_OUT_OF_RANGE: StatusCode = 20;
pub const STATUS_SCHEMA_MISMATCH: StatusCode = 21;
pub const STATUS_UNEXPECTED_NULL: StatusCode = 22;
pub const STATUS_INVALID_ARRAY: StatusCode = 23;
pub const STATUS_NO_RESULT_SET: StatusCode = 24;

pub const READER_OPTION_CANCEL_MESSAGE: &str = "pgrow.reader.cancel_message";

/// Message sent with the copy-end signal when a reader is abandoned.
pub const DEFAULT_CANCEL_MESSAGE: &str = "cancelled in dtor";

pub const CANCEL_MESSAGE_ENV: &str = "PGROW_COPY_CANCEL_MESSAGE";

/// Bare array token decoded as the element type's null sentinel.
pub const ARRAY_NULL: &str = "NULL";
