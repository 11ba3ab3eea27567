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

//! Conversion of text cells into typed values.
//!
//! Decoding is split across two traits:
//!
//! - [FromText] turns one text cell into a value and may define a null
//!   sentinel that stands in for SQL NULL. It also decides how the value is
//!   read as an element of an array literal, see [crate::array].
//! - [FromResult] turns [FromResult::COLUMNS] consecutive columns of a
//!   [Row] into a value. Tuples compose their members positionally.
//!
//! New types are registered by implementing these traits; the
//! [impl_from_result!][crate::impl_from_result] macro covers the common case
//! of a single-column type that already implements [FromText].
//!
//! ```
//! use pgrow_core::error::{Error, Result, Status};
//! use pgrow_core::{impl_from_result, FromText};
//!
//! struct Celsius(f64);
//!
//! impl FromText for Celsius {
//!     fn from_text(value: &str) -> Result<Self> {
//!         value
//!             .strip_suffix("C")
//!             .ok_or_else(|| Error::with_message_and_status("missing unit", Status::InvalidData))
//!             .and_then(|v| Ok(Celsius(f64::from_text(v)?)))
//!     }
//! }
//!
//! impl_from_result!(Celsius);
//!
//! assert_eq!(Celsius::from_text("21.5C").unwrap().0, 21.5);
//! ```

use crate::array::{self, Cursor};
use crate::error::{Error, Result, Status};
use crate::row::Row;

/// Decoding from a single text cell.
pub trait FromText: Sized {
    /// Decode a non-NULL cell.
    fn from_text(value: &str) -> Result<Self>;

    /// The value used in place of SQL NULL, if this type has one.
    fn null() -> Option<Self> {
        None
    }

    /// Read one element of an array literal at the cursor.
    ///
    /// Scalars accept a quoted or bare element. Container types override
    /// this to parse a nested array literal.
    fn parse_element(cursor: &mut Cursor<'_>) -> Result<Self> {
        array::parse_scalar_element(cursor)
    }
}

/// Decoding from one or more consecutive columns of a row.
///
/// A type consuming no columns is rejected when a decode call is built:
///
/// ```compile_fail,E0080
/// use pgrow_core::error::Result;
/// use pgrow_core::{FromResult, Row};
///
/// struct Nothing;
///
/// impl FromResult for Nothing {
///     const COLUMNS: usize = 0;
///
///     fn from_row(_row: Row<'_>) -> Result<Self> {
///         Ok(Nothing)
///     }
/// }
///
/// let _get: fn(&Row<'_>, usize) -> Result<Nothing> = Row::get::<Nothing>;
/// ```
///
/// A single [Field][crate::Field] only decodes into one-column types:
///
/// ```compile_fail,E0080
/// use pgrow_core::error::Result;
/// use pgrow_core::Field;
///
/// let _decode: fn(&Field<'static>) -> Result<(i32, i32)> = Field::decode::<(i32, i32)>;
/// ```
///
/// The one-column counterpart builds:
///
/// ```
/// use pgrow_core::error::Result;
/// use pgrow_core::Field;
///
/// let _decode: fn(&Field<'static>) -> Result<i32> = Field::decode::<i32>;
/// ```
pub trait FromResult: Sized {
    /// Number of columns consumed. Must not be zero.
    const COLUMNS: usize = 1;

    /// Decode from a row holding exactly [Self::COLUMNS] columns.
    fn from_row(row: Row<'_>) -> Result<Self>;
}

/// Build-time checks on [FromResult::COLUMNS], evaluated when a decode
/// call is instantiated.
pub(crate) trait ColumnsCheck: FromResult {
    const NON_ZERO: () = assert!(Self::COLUMNS > 0, "FromResult::COLUMNS yields zero");
    const SINGLE: () = assert!(
        Self::COLUMNS == 1,
        "a single field can only be decoded into a one-column type"
    );
}

impl<T: FromResult> ColumnsCheck for T {}

/// Register single-column [FromResult] implementations for types that
/// implement [FromText].
#[macro_export]
macro_rules! impl_from_result {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::FromResult for $ty {
                fn from_row(row: $crate::Row<'_>) -> $crate::error::Result<Self> {
                    row.cell::<Self>(0)
                }
            }
        )+
    };
}

impl FromText for bool {
    fn from_text(value: &str) -> Result<Self> {
        match value {
            "t" | "true" => Ok(true),
            "f" | "false" => Ok(false),
            _ => Err(Error::invalid_data::<Self>(value)),
        }
    }
}

macro_rules! impl_from_text_parse {
    ($($ty:ty),+) => {
        $(
            impl FromText for $ty {
                fn from_text(value: &str) -> Result<Self> {
                    value.parse().map_err(|_| Error::invalid_data::<Self>(value))
                }
            }
        )+
    };
}

impl_from_text_parse!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

impl FromText for String {
    fn from_text(value: &str) -> Result<Self> {
        Ok(value.to_owned())
    }
}

impl FromText for char {
    fn from_text(value: &str) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::invalid_data::<Self>(value)),
        }
    }
}

/// Binary data in the `bytea` hex output format (`\x` followed by pairs of
/// hex digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Bytea(pub Vec<u8>);

impl FromText for Bytea {
    fn from_text(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix("\\x")
            .ok_or_else(|| Error::invalid_data::<Self>(value))?;
        if digits.len() % 2 != 0 {
            return Err(Error::invalid_data::<Self>(value));
        }
        digits
            .as_bytes()
            .chunks_exact(2)
            .map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
                (Some(high), Some(low)) => Ok((high << 4) | low),
                _ => Err(Error::invalid_data::<Self>(value)),
            })
            .collect::<Result<Vec<u8>>>()
            .map(Bytea)
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

crate::impl_from_result!(
    bool, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64, String, char, Bytea
);

impl<T: FromText> FromText for Option<T> {
    fn from_text(value: &str) -> Result<Self> {
        T::from_text(value).map(Some)
    }

    fn null() -> Option<Self> {
        Some(None)
    }

    fn parse_element(cursor: &mut Cursor<'_>) -> Result<Self> {
        if cursor.eat_null_token() {
            return Ok(None);
        }
        T::parse_element(cursor).map(Some)
    }
}

impl<T: FromText> FromResult for Option<T> {
    fn from_row(row: Row<'_>) -> Result<Self> {
        row.cell::<Self>(0)
    }
}

macro_rules! impl_from_result_tuple {
    ($($name:ident),+) => {
        impl<$($name: FromResult),+> FromResult for ($($name,)+) {
            const COLUMNS: usize = 0 $(+ $name::COLUMNS)+;

            #[allow(unused_assignments)]
            fn from_row(row: Row<'_>) -> Result<Self> {
                let mut offset = 0;
                Ok(($(
                    {
                        let value = row.get::<$name>(offset)?;
                        offset += $name::COLUMNS;
                        value
                    },
                )+))
            }
        }
    };
}

impl_from_result_tuple!(A);
impl_from_result_tuple!(A, B);
impl_from_result_tuple!(A, B, C);
impl_from_result_tuple!(A, B, C, D);
impl_from_result_tuple!(A, B, C, D, E);
impl_from_result_tuple!(A, B, C, D, E, F);
impl_from_result_tuple!(A, B, C, D, E, F, G);
impl_from_result_tuple!(A, B, C, D, E, F, G, H);

/// Decode a single text value into `T`, e.g. a parameter echoed back by the
/// data source or a value read outside of a result.
pub fn decode<T: FromText>(value: &str) -> Result<T> {
    T::from_text(value)
}

/// Decode an optional text value, mapping `None` to the null sentinel of `T`.
pub fn decode_nullable<T: FromText>(value: Option<&str>) -> Result<T> {
    match value {
        Some(value) => T::from_text(value),
        None => T::null().ok_or_else(|| {
            Error::with_message_and_status(
                format!("unexpected NULL value for {}", std::any::type_name::<T>()),
                Status::UnexpectedNull,
            )
        }),
    }
}
