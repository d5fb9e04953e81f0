//! WhatConverts stream definitions
//!
//! The five streams are fixed at build time. Each one is a
//! [`StreamDefinition`]; the parts that vary per stream (query
//! parameters, pagination, record extraction) are picked by matching on
//! its [`StreamKind`].

mod definitions;
mod params;

pub use definitions::{all_streams, find_stream, StreamDefinition, StreamKind, STREAMS};
pub use params::{build_params, LEADS_PER_PAGE};

#[cfg(test)]
mod tests;
