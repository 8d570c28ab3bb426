//! IANA media types and Accept-style media ranges.
//!
//! This crate provides:
//! - [`MediaType`]: content-type, subtype and parameter set, with a
//!   directional containment relation for wildcard and parameter matching
//! - [`MediaRange`]: quality-ordered patterns parsed from `Accept` headers,
//!   with best-match negotiation over available representations
//! - A parameter series codec (quoted strings, RFC 2231 extended values)
//! - Bounded LRU caches in front of the string constructors
//! - A small table of filename extensions
//!
//! All values are immutable and can be shared freely across threads.
//!
//! ```
//! use mime_range::{MediaRange, MediaType};
//!
//! let accept = MediaRange::from_string("text/html;q=0.9, application/json").unwrap();
//! let html = MediaType::from_string("text/html").unwrap();
//! let json = MediaType::from_string("application/json").unwrap();
//!
//! let best = accept.query([&html, &json]).unwrap();
//! assert_eq!(best.candidate, &json);
//! ```

pub mod cache;
pub mod error;
pub mod extensions;
pub mod grammar;
pub mod media_range;
pub mod media_type;
pub mod parameters;

// Re-export commonly used types
pub use cache::{range_from_string, type_from_bytes, type_from_string};
pub use error::{Error, Result};
pub use extensions::{file_type, lookup_extension};
pub use media_range::{Match, MediaRange, Quality, RangeEntry};
pub use media_type::MediaType;
