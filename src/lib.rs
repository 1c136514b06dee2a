//! # picojson
//!
//! A small JSON library built around one loosely typed [`Value`] tree, a
//! recursive descent [`Parser`] that reports its work to a pluggable
//! [`Context`], and a serializer with compact and pretty output.
//!
//! ```
//! use picojson::Value;
//!
//! let data = r#"
//!     {
//!         "age": 43,
//!         "name": "John Doe",
//!         "phones": [
//!             "+44 1234567",
//!             "+44 2345678"
//!         ]
//!     }"#;
//!
//! let v: Value = picojson::from_str(data).unwrap();
//!
//! assert!(v["age"].is::<i64>());
//! assert_eq!(v["phones"][0], "+44 1234567");
//! assert!(v["spouse"].is_null());
//!
//! assert_eq!(
//!     v.to_json(false),
//!     r#"{"age":43,"name":"John Doe","phones":["+44 1234567","+44 2345678"]}"#,
//! );
//! ```
//!
//! # Parse errors
//!
//! A parse failure reports the line it happened on and the rest of that
//! line:
//!
//! ```
//! let err = picojson::from_str::<picojson::DefaultNumber>("{]").unwrap_err();
//! assert_eq!(err.to_string(), "syntax error at line 1 near: ]");
//! ```
//!
//! Asking a `Value` for a type it does not hold with [`Value::get`] is a
//! programming error and panics; check with [`Value::is`] first or use
//! [`Value::try_get`].
//!
//! # Numbers
//!
//! How numbers are stored is up to a [`NumberPolicy`]. The default,
//! [`DefaultNumber`], stores an `f64`. Numerals that fit an `i64` exactly are
//! additionally kept as integers until they are read as a float. With the
//! `arbitrary_precision` feature the `ArbitraryPrecision` policy keeps every
//! numeral verbatim.
//!
//! # Streaming
//!
//! A [`Context`] receives each value as it is parsed, so a document can be
//! validated without building anything ([`validate`]) or a huge top-level
//! array can be processed one element at a time. See the [`de`] module.

#![doc(html_root_url = "https://docs.rs/picojson/0.1.0")]
#![allow(
    clippy::collapsible_else_if,
    clippy::comparison_chain,
    clippy::doc_markdown,
    clippy::match_like_matches_macro,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::needless_doctest_main,
    clippy::return_self_not_must_use,
    clippy::wildcard_imports,
)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// We only use our own error type; no need for From conversions provided by the
// standard library's try! macro. This reduces lines of LLVM IR by 4%.
macro_rules! tri {
    ($e:expr $(,)?) => {
        match $e {
            core::result::Result::Ok(val) => val,
            core::result::Result::Err(err) => return core::result::Result::Err(err),
        }
    };
}

pub mod cursor;
pub mod de;
pub mod error;
pub mod map;
pub mod number;
pub mod read;
pub mod ser;
pub mod value;

#[doc(inline)]
pub use crate::cursor::InputCursor;
#[doc(inline)]
pub use crate::de::{
    from_iter, from_reader, from_slice, from_str, parse_into, parse_value, validate, Context,
    DefaultContext, DenyContext, NullContext, Parser, StreamParser,
};
#[doc(inline)]
pub use crate::error::{Error, ErrorCode, Result};
#[doc(inline)]
pub use crate::map::Map;
#[cfg(feature = "arbitrary_precision")]
#[doc(inline)]
pub use crate::number::{ArbitraryPrecision, Numeral};
#[doc(inline)]
pub use crate::number::{DefaultNumber, Integer, NumberPolicy};
#[doc(inline)]
pub use crate::read::Read;
#[doc(inline)]
pub use crate::ser::{to_string, to_string_pretty, to_vec, to_vec_pretty, to_writer, to_writer_pretty};
#[doc(inline)]
pub use crate::value::{Array, JsonType, Object, Value, ValueType};
