//! Authentication module
//!
//! The WhatConverts API uses HTTP Basic authentication: the API token is
//! the username and the API secret is the password.

mod authenticator;

pub use authenticator::{AuthConfig, Authenticator};

#[cfg(test)]
mod tests;
