#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

//! A permissive URI reference parser and resolver following [RFC 3986].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! **Capabilities:**
//!
//! - Parsing: Any string is accepted as a URI reference and split into its
//!   components. Ill-formed parts yield absent or empty components, never errors.
//!   See [`Uri::parse`].
//! - Normalization: Dot segments are removed from hierarchical paths
//!   as described in [Section 5.2.4 of RFC 3986][rds].
//!   See [`normalize::remove_dot_segments`].
//! - Resolution: A reference is resolved against a base URI with the algorithm
//!   defined in [Section 5.3 of RFC 3986][resolve]. See [`Uri::resolve_reference`]
//!   and [`Resolver`](resolve::Resolver).
//! - Recomposition: The [`Display`](core::fmt::Display) implementation of [`Uri`]
//!   writes the components back in canonical form, and comparison is performed
//!   on that form.
//!
//! [rds]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4
//! [resolve]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3
//!
//! The crate does not percent-decode, lower-case or otherwise normalize
//! anything besides dot segments. Two URIs that differ only in letter case or
//! percent-encoding compare unequal.
//!
//! # Terminology
//!
//! Query and fragment components are stored **with** their leading delimiter,
//! i.e., the query of `"foo:bar?baz#qux"` is `"?baz"` and its fragment is `"#qux"`.
//!
//! # Crate features
//!
//! - `std` (default): Implies `impl-error`.
//!
//! - `impl-error` (default): Implements [`Error`] for error types.
//!
//! - `serde`: Implements [`Serialize`] and [`Deserialize`] for [`Uri`].
//!
//! [`Error`]: core::error::Error
//! [`Serialize`]: serde::Serialize
//! [`Deserialize`]: serde::Deserialize

extern crate alloc;

pub mod component;
pub mod normalize;
pub mod resolve;

mod fmt;
mod imp;
mod parse;

pub use imp::Uri;

#[cfg(feature = "impl-error")]
use core::error::Error;
