//! Record extraction module
//!
//! Turns a parsed response body into the stream of records it carries.
//!
//! # Overview
//!
//! Every stream names a JSONPath (e.g. `$.leads[*]`) locating its records
//! in the response body. [`RecordExtractor`] evaluates that path and yields
//! the matched objects in server order, stamping the configured
//! `profile_id` onto each one when the tap is restricted to a profile.

mod extractor;

pub use extractor::{lookup_path, RecordExtractor, Records};
