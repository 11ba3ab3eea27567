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

//! Error, status and result types.

use std::fmt::Display;
use std::num::{ParseFloatError, ParseIntError};

use arrow_schema::ArrowError;

use crate::constants;

pub type StatusCode = u8;

/// Status of an operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// No error.
    Ok,
    /// An unknown error occurred.
    Unknown,
    /// A row or column index is out of bounds, or a column name is unknown.
    OutOfRange,
    /// The number of columns a type consumes does not match the number of
    /// columns available.
    SchemaMismatch,
    /// A NULL value was read through an accessor that does not tolerate it.
    UnexpectedNull,
    /// An array literal violates the array grammar.
    ///
    /// For instance, quoting may be malformed, a delimiter may be missing,
    /// or the literal may be followed by additional data.
    InvalidArray,
    /// Row or column access on a result that carries no row set.
    NoResultSet,
    /// An I/O error occurred while talking to the data source.
    IO,
    /// A single value could not be decoded into the requested type.
    InvalidData,
    /// The preconditions for the operation are not met, likely a programming error.
    /// For instance, the object may already be closed.
    InvalidState,
    /// The arguments are invalid, likely a programming error.
    InvalidArguments,
    /// A requested resource was not found.
    NotFound,
    /// An error internal to the library occurred.
    Internal,
}

/// A pgrow error.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    /// The error message.
    pub message: String,
    /// The status of the operation.
    pub status: Status,
    /// A vendor-specific error code, if applicable.
    pub vendor_code: i32,
    /// A SQLSTATE error code, if provided by the data source.
    /// If not set, it is `\0\0\0\0\0`.
    pub sqlstate: [u8; 5],
    /// Additional metadata reported by the data source.
    pub details: Option<Vec<(String, Vec<u8>)>>,
}

/// Result type wrapping [Error].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn with_message_and_status(message: impl Into<String>, status: Status) -> Self {
        Self {
            message: message.into(),
            status,
            vendor_code: 0,
            sqlstate: [0; 5],
            details: None,
        }
    }

    /// Attach a SQLSTATE code, as reported by the data source.
    pub fn with_sqlstate(mut self, sqlstate: [u8; 5]) -> Self {
        self.sqlstate = sqlstate;
        self
    }

    /// The SQLSTATE as a string, or `None` when it was never set.
    pub fn sqlstate_str(&self) -> Option<&str> {
        if self.sqlstate == [0; 5] {
            return None;
        }
        std::str::from_utf8(&self.sqlstate).ok()
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        Self::with_message_and_status(message, Status::OutOfRange)
    }

    pub(crate) fn invalid_array(message: impl Into<String>) -> Self {
        Self::with_message_and_status(
            format!("invalid array input, {}", message.into()),
            Status::InvalidArray,
        )
    }

    pub(crate) fn invalid_data<T: ?Sized>(value: &str) -> Self {
        Self::with_message_and_status(
            format!(
                "invalid value for {}: {value:?}",
                std::any::type_name::<T>()
            ),
            Status::InvalidData,
        )
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.status, self.message)?;
        if let Some(sqlstate) = self.sqlstate_str() {
            write!(f, " (sqlstate: {sqlstate}, vendor_code: {})", self.vendor_code)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<ArrowError> for Error {
    fn from(value: ArrowError) -> Self {
        Self::with_message_and_status(value.to_string(), Status::Internal)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self::with_message_and_status(
            format!("Error while decoding UTF-8: {value}"),
            Status::InvalidData,
        )
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        Self::with_message_and_status(
            format!("invalid integer value: {value}"),
            Status::InvalidData,
        )
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Self::with_message_and_status(
            format!("invalid floating point value: {value}"),
            Status::InvalidData,
        )
    }
}

impl TryFrom<StatusCode> for Status {
    type Error = Error;

    fn try_from(value: StatusCode) -> Result<Self> {
        match value {
            constants::STATUS_OK => Ok(Status::Ok),
            constants::STATUS_UNKNOWN => Ok(Status::Unknown),
            constants::STATUS_OUT_OF_RANGE => Ok(Status::OutOfRange),
            constants::STATUS_SCHEMA_MISMATCH => Ok(Status::SchemaMismatch),
            constants::STATUS_UNEXPECTED_NULL => Ok(Status::UnexpectedNull),
            constants::STATUS_INVALID_ARRAY => Ok(Status::InvalidArray),
            constants::STATUS_NO_RESULT_SET => Ok(Status::NoResultSet),
            constants::STATUS_IO => Ok(Status::IO),
            constants::STATUS_INVALID_DATA => Ok(Status::InvalidData),
            constants::STATUS_INVALID_STATE => Ok(Status::InvalidState),
            constants::STATUS_INVALID_ARGUMENT => Ok(Status::InvalidArguments),
            constants::STATUS_NOT_FOUND => Ok(Status::NotFound),
            constants::STATUS_INTERNAL => Ok(Status::Internal),
            v => Err(Error::with_message_and_status(
                format!("Unknown status code: {v}"),
                Status::InvalidData,
            )),
        }
    }
}

impl From<Status> for StatusCode {
    fn from(value: Status) -> Self {
        match value {
            Status::Ok => constants::STATUS_OK,
            Status::Unknown => constants::STATUS_UNKNOWN,
            Status::OutOfRange => constants::STATUS_OUT_OF_RANGE,
            Status::SchemaMismatch => constants::STATUS_SCHEMA_MISMATCH,
            Status::UnexpectedNull => constants::STATUS_UNEXPECTED_NULL,
            Status::InvalidArray => constants::STATUS_INVALID_ARRAY,
            Status::NoResultSet => constants::STATUS_NO_RESULT_SET,
            Status::IO => constants::STATUS_IO,
            Status::InvalidData => constants::STATUS_INVALID_DATA,
            Status::InvalidState => constants::STATUS_INVALID_STATE,
            Status::InvalidArguments => constants::STATUS_INVALID_ARGUMENT,
            Status::NotFound => constants::STATUS_NOT_FOUND,
            Status::Internal => constants::STATUS_INTERNAL,
        }
    }
}

impl From<&Status> for StatusCode {
    fn from(value: &Status) -> Self {
        (*value).into()
    }
}
