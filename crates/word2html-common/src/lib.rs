//! Common utilities for the word2html converter.
//!
//! This crate provides shared infrastructure used by all converter components:
//! - **Warning System** - colored, deduplicated terminal output for non-fatal problems
//! - **Image Assets** - raw embedded image blobs handed from the extractor to the transcoder
//! - **Data URLs** - encoding and decoding of inline `data:` references

pub mod asset;
pub mod data_url;
pub mod warning;

pub use asset::ImageAsset;
pub use data_url::{DataUrl, DataUrlError};
