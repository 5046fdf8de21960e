#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a json parser for hand-written data files. It understands `//` and `/* */` comments, and every value it returns remembers the line it was read from, so a program that finds something wrong in the data can tell the author where to look.
//!
//! ## How to use it ?
//!
//! [`parse`] returns a [`Value`]: a null, boolean, number (always `f64`), string, array or object, plus the line of the token that closed it (`0` when unknown). Objects are ordered by key and the last of duplicated keys wins.
//!
//! ### Parsing
//!
//! ```rust
//! use level_json::parse;
//!
//! let value = parse(
//!     r#"{
//!         "name": "lvl1", // trailing comment
//!         /* a block comment */
//!         "size": [4, 2.5e1]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(value.member("name").unwrap().as_str().unwrap(), "lvl1");
//! assert_eq!(value.member("size").unwrap().at(1).unwrap().as_number().unwrap(), 25.0);
//! assert_eq!(value.line(), 5);
//! ```
//!
//! ### Typed access
//!
//! Accessors never hand out a default when the type is wrong, they return an [`Error`] instead. The only exception is [`Value::as_bool`], which reads null as `false`.
//!
//! Reading members comes in two flavours that must not be confused:
//!
//! - [`Value::get`], [`Value::has`], [`Value::require`] and [`Value::member`] only look.
//! - [`Value::read_or_insert`] inserts a null member when the key is missing, even if the caller only reads it.
//!
//! ```rust
//! use level_json::{parse, Kind, NULL};
//!
//! let mut value = parse(r#"{"a": 1}"#).unwrap();
//!
//! assert_eq!(value.require("b").unwrap_err().kind, Kind::Data);
//! assert!(value.get("b", &NULL).unwrap().is_null());
//! assert!(!value.has("b").unwrap());
//!
//! assert!(value.read_or_insert("b").unwrap().is_null());
//! assert!(value.has("b").unwrap());
//! ```
//!
//! ### Typed structures
//!
//! [`from_value`] reads any `serde::Deserialize` type out of a parsed tree. A failure is a `DataError` pointing at the line of the value that did not fit.
//!
//! ```rust
//! #[derive(serde::Deserialize)]
//! struct Size {
//!     width: u32,
//!     height: f64,
//! }
//!
//! let value = level_json::parse(r#"{"width": 4, "height": 2.5}"#).unwrap();
//! let size: Size = level_json::from_value(&value).unwrap();
//!
//! assert_eq!(size.width, 4);
//! assert_eq!(size.height, 2.5);
//! ```
//!
//! ### Errors
//!
//! Every failure is an [`Error`] whose [`Kind`] says which layer gave up: `ParseError` for malformed characters, `SyntaxError` for a misplaced token, `TypeError` and `IndexError` for accessors, `DataError` for a tree that does not have the expected shape. Errors found while reading text always start with `Line <n>:`.
//!
//! ```rust
//! let error = level_json::parse("[1, 2").unwrap_err();
//!
//! assert_eq!(
//!     error.to_string(),
//!     "SyntaxError: Line 1: After value in array must be ',' or ']', not end of file"
//! );
//! ```

extern crate bytecount;
extern crate memchr;
extern crate nom;
extern crate serde;
extern crate thiserror;
extern crate tracing;

mod de;
mod input;
mod lexer;
mod parser;

pub mod error;
pub mod level;
pub mod value;

pub use de::from_value;
pub use error::{Error, Kind};
pub use parser::{parse, parse_reader, Parser, MAX_DEPTH};
pub use value::{Array, Data, Object, Value, ValueType, NULL};
