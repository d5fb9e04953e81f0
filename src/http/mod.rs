//! HTTP client module
//!
//! Provides the HTTP client the page fetcher runs on.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Basic credentials applied by the auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::RateLimiterConfig;

/// Root of the WhatConverts REST API
pub const DEFAULT_BASE_URL: &str = "https://app.whatconverts.com/api/v1";
