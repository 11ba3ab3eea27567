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

//! Parser for the textual array format.
//!
//! ```text
//! array   := '{' [ element ( delim element )* ] '}'
//! delim   := ',' | ';'
//! element := quoted | array | bare
//! quoted  := '"' ( '\' any | not-'"' )* '"'
//! bare    := characters up to the next delim or '}'
//! ```
//!
//! The bare token `NULL` stands for the element type's null sentinel. Whether
//! an element is a nested array is decided by the element type, never by the
//! text. Empty elements are rejected: `{}` is the only empty array.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

use crate::constants::ARRAY_NULL;
use crate::decode::{FromResult, FromText};
use crate::error::{Error, Result};
use crate::row::Row;

/// Read position within an array literal.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.input.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    fn advance(&mut self, len: usize) {
        self.position += len;
    }

    /// Consume a bare `NULL` element, if one is next.
    pub(crate) fn eat_null_token(&mut self) -> bool {
        let rest = self.rest();
        let is_null = rest.starts_with(ARRAY_NULL)
            && matches!(
                rest.as_bytes().get(ARRAY_NULL.len()),
                Some(b',' | b';' | b'}')
            );
        if is_null {
            self.advance(ARRAY_NULL.len());
        }
        is_null
    }

    /// Consume a quoted element and return its unescaped content.
    fn take_quoted(&mut self) -> Result<String> {
        debug_assert_eq!(self.peek(), Some(b'"'));
        self.advance(1);
        let mut unescaped = String::new();
        loop {
            let rest = self.rest();
            let Some(pos) = rest.find(['\\', '"']) else {
                return Err(Error::invalid_array("unterminated quoted string"));
            };
            unescaped.push_str(&rest[..pos]);
            if rest.as_bytes()[pos] == b'"' {
                self.advance(pos + 1);
                return Ok(unescaped);
            }
            let Some(escaped) = rest[pos + 1..].chars().next() else {
                return Err(Error::invalid_array("unterminated quoted string"));
            };
            unescaped.push(escaped);
            self.advance(pos + 1 + escaped.len_utf8());
        }
    }

    /// Consume an unquoted element, leaving the cursor on its terminator.
    fn take_bare(&mut self) -> Result<&'a str> {
        let rest = self.rest();
        let end = rest
            .find([',', ';', '}'])
            .ok_or_else(|| Error::invalid_array("unterminated unquoted string"))?;
        self.advance(end);
        Ok(&rest[..end])
    }
}

/// A container that an array literal can be decoded into.
pub trait ArrayContainer: Default {
    type Element: FromText;

    fn push_element(&mut self, element: Self::Element);
}

impl<T: FromText> ArrayContainer for Vec<T> {
    type Element = T;

    fn push_element(&mut self, element: T) {
        self.push(element);
    }
}

impl<T: FromText> ArrayContainer for VecDeque<T> {
    type Element = T;

    fn push_element(&mut self, element: T) {
        self.push_back(element);
    }
}

impl<T: FromText + Ord> ArrayContainer for BTreeSet<T> {
    type Element = T;

    fn push_element(&mut self, element: T) {
        self.insert(element);
    }
}

impl<T: FromText + Eq + Hash, S: BuildHasher + Default> ArrayContainer for HashSet<T, S> {
    type Element = T;

    fn push_element(&mut self, element: T) {
        self.insert(element);
    }
}

/// Parse the array literal at the cursor, leaving the cursor just past its
/// closing brace.
pub fn parse_array<C: ArrayContainer>(cursor: &mut Cursor<'_>) -> Result<C> {
    if cursor.next_byte() != Some(b'{') {
        return Err(Error::invalid_array("expected '{'"));
    }
    let mut container = C::default();
    if cursor.peek() == Some(b'}') {
        cursor.advance(1);
        return Ok(container);
    }
    loop {
        match cursor.peek() {
            Some(b',' | b';' | b'}') => {
                return Err(Error::invalid_array("unexpected empty element"));
            }
            None => return Err(Error::invalid_array("unterminated array")),
            _ => {}
        }
        container.push_element(C::Element::parse_element(cursor)?);
        match cursor.next_byte() {
            Some(b',' | b';') => continue,
            Some(b'}') => return Ok(container),
            _ => return Err(Error::invalid_array("expected ',', ';', or '}'")),
        }
    }
}

/// Parse a complete array literal. Anything after the closing brace is an
/// error.
pub fn parse_array_text<C: ArrayContainer>(value: &str) -> Result<C> {
    let mut cursor = Cursor::new(value);
    let container = parse_array(&mut cursor)?;
    if !cursor.is_at_end() {
        return Err(Error::invalid_array("unexpected additional data"));
    }
    Ok(container)
}

/// Read a quoted or bare element and decode it as `T`.
pub fn parse_scalar_element<T: FromText>(cursor: &mut Cursor<'_>) -> Result<T> {
    if cursor.peek() == Some(b'"') {
        let value = cursor.take_quoted()?;
        return T::from_text(&value);
    }
    let token = cursor.take_bare()?;
    if token == ARRAY_NULL {
        return T::null().ok_or_else(|| Error::invalid_array("unexpected NULL value"));
    }
    T::from_text(token)
}

macro_rules! impl_array {
    ($container:ident < T $(, $param:ident)* > where $($bound:tt)*) => {
        impl<T $(, $param)*> FromText for $container<T $(, $param)*>
        where
            $($bound)*
        {
            fn from_text(value: &str) -> Result<Self> {
                parse_array_text(value)
            }

            fn parse_element(cursor: &mut Cursor<'_>) -> Result<Self> {
                parse_array(cursor)
            }
        }

        impl<T $(, $param)*> FromResult for $container<T $(, $param)*>
        where
            $($bound)*
        {
            fn from_row(row: Row<'_>) -> Result<Self> {
                row.cell::<Self>(0)
            }
        }
    };
}

impl_array!(Vec<T> where T: FromText);
impl_array!(VecDeque<T> where T: FromText);
impl_array!(BTreeSet<T> where T: FromText + Ord);
impl_array!(HashSet<T, S> where T: FromText + Eq + Hash, S: BuildHasher + Default);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::error::Status;

    fn invalid(result: Result<impl std::fmt::Debug>) -> String {
        let error = result.unwrap_err();
        assert_eq!(error.status, Status::InvalidArray, "{error}");
        error.message
    }

    #[test]
    fn empty_array() {
        assert!(decode::<Vec<i32>>("{}").unwrap().is_empty());
        assert!(decode::<BTreeSet<String>>("{}").unwrap().is_empty());
        assert!(decode::<Vec<Vec<i32>>>("{}").unwrap().is_empty());
    }

    #[test]
    fn integers_in_source_order() {
        assert_eq!(decode::<Vec<i32>>("{1,2,3}").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode::<Vec<i32>>("{3;1;2}").unwrap(), vec![3, 1, 2]);
        assert_eq!(
            decode::<VecDeque<i64>>("{-1,0}").unwrap(),
            VecDeque::from([-1, 0])
        );
    }

    #[test]
    fn quoted_elements() {
        assert_eq!(
            decode::<Vec<String>>(r#"{"a,b","c\"d"}"#).unwrap(),
            vec!["a,b".to_string(), "c\"d".to_string()]
        );
        assert_eq!(
            decode::<Vec<String>>(r#"{"back\\slash","}{","x\yz"}"#).unwrap(),
            vec!["back\\slash", "}{", "xyz"]
        );
        assert_eq!(decode::<Vec<String>>(r#"{""}"#).unwrap(), vec![""]);
        assert_eq!(decode::<Vec<i32>>(r#"{"1","2"}"#).unwrap(), vec![1, 2]);
        assert_eq!(decode::<Vec<String>>(r#"{"\ü"}"#).unwrap(), vec!["ü"]);
    }

    #[test]
    fn bare_tokens_are_not_trimmed() {
        assert_eq!(
            decode::<Vec<String>>("{ a ,b}").unwrap(),
            vec![" a ".to_string(), "b".to_string()]
        );
        assert_eq!(decode::<Vec<String>>("{a\"b}").unwrap(), vec!["a\"b"]);
    }

    #[test]
    fn null_elements() {
        assert_eq!(
            decode::<Vec<Option<i32>>>("{1,NULL,3}").unwrap(),
            vec![Some(1), None, Some(3)]
        );
        assert_eq!(
            decode::<Vec<Option<String>>>(r#"{"NULL",NULL,null}"#).unwrap(),
            vec![Some("NULL".to_string()), None, Some("null".to_string())]
        );
        let message = invalid(decode::<Vec<i32>>("{1,NULL,3}"));
        assert!(message.contains("unexpected NULL value"));
        assert!(decode::<Vec<String>>("{NULL}").is_err());
    }

    #[test]
    fn nested_arrays() {
        assert_eq!(
            decode::<Vec<Vec<i32>>>("{{1,2},{3,4}}").unwrap(),
            vec![vec![1, 2], vec![3, 4]]
        );
        assert_eq!(
            decode::<Vec<Vec<Vec<String>>>>(r#"{{{a},{"b,c"}},{{}}}"#).unwrap(),
            vec![
                vec![vec!["a".to_string()], vec!["b,c".to_string()]],
                vec![vec![]]
            ]
        );
        assert_eq!(
            decode::<Vec<Option<Vec<i32>>>>("{{1},NULL}").unwrap(),
            vec![Some(vec![1]), None]
        );
        invalid(decode::<Vec<Vec<i32>>>("{1,2}"));
        invalid(decode::<Vec<Vec<i32>>>("{{1}x}"));
    }

    #[test]
    fn sets_collapse_duplicates() {
        assert_eq!(
            decode::<BTreeSet<i32>>("{3,1,3,2}").unwrap(),
            BTreeSet::from([1, 2, 3])
        );
        let set = decode::<HashSet<String>>("{a,b,a}").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("a") && set.contains("b"));
    }

    #[test]
    fn malformed_literals() {
        invalid(decode::<Vec<i32>>("{1,2"));
        assert!(invalid(decode::<Vec<i32>>("{1,2}x")).contains("unexpected additional data"));
        assert!(invalid(decode::<Vec<i32>>("1,2}")).contains("expected '{'"));
        invalid(decode::<Vec<i32>>(""));
        invalid(decode::<Vec<i32>>("{"));
        assert!(invalid(decode::<Vec<i32>>("{1,,2}")).contains("unexpected empty element"));
        invalid(decode::<Vec<i32>>("{1,}"));
        invalid(decode::<Vec<i32>>("{,1}"));
        invalid(decode::<Vec<String>>(r#"{"abc}"#));
        invalid(decode::<Vec<String>>(r#"{"abc\"#));
        invalid(decode::<Vec<String>>(r#"{"a"b}"#));
    }

    #[test]
    fn element_decode_errors_keep_their_status() {
        let error = decode::<Vec<i32>>("{1,x}").unwrap_err();
        assert_eq!(error.status, Status::InvalidData);
    }

    #[test]
    fn cursor_stops_after_literal() {
        let mut cursor = Cursor::new("{1,2},rest");
        let values: Vec<i32> = parse_array(&mut cursor).unwrap();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(cursor.rest(), ",rest");
        assert!(!cursor.is_at_end());
    }
}
