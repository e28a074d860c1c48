//! `bibleref` - Bible citation lookup.
//!
//! Parses citations such as `"Gn 30,5-7.15"`, resolves them against a loaded
//! Bible document and renders the verses with optional quotes, verse numbers,
//! ellipsis markers and a compact citation.

pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod library;
