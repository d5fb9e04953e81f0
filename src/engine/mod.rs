//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Fetches pages, extracts records and drives pagination
//! - `SyncStats` - Counters for a run
//! - Singer message types (Schema, Record, State)

mod types;

pub use types::{Message, SyncStats};

use crate::auth::AuthConfig;
use crate::config::TapConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::MessageSink;
use crate::pagination::PaginationState;
use crate::streams::{build_params, StreamDefinition, StreamKind};
use crate::types::{JsonObject, JsonValue};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// Tap configuration
    config: TapConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, config: TapConfig) -> Self {
        Self {
            client,
            config,
            stats: SyncStats::default(),
        }
    }

    /// Create an engine with a basic-auth client built from the config
    pub fn from_config(config: TapConfig, http_config: HttpClientConfig) -> Result<Self> {
        let client = HttpClient::with_auth(http_config, AuthConfig::from_tap_config(&config))?;
        Ok(Self::new(client, config))
    }

    /// Get the tap configuration
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Issue one authenticated request against the accounts endpoint
    pub async fn check(&self) -> Result<()> {
        let accounts = StreamKind::Accounts.definition();
        let params = build_params(accounts, &self.config, None, Utc::now().date_naive());
        let _: JsonValue = self
            .client
            .get_json(accounts.path, &params)
            .await?;
        Ok(())
    }

    /// Fetch one page of a stream and return the parsed body
    pub async fn fetch_page(
        &mut self,
        stream: &StreamDefinition,
        path: &str,
        cursor: Option<u32>,
    ) -> Result<JsonValue> {
        let params = build_params(stream, &self.config, cursor, Utc::now().date_naive());
        debug!("GET {path} {params:?}");

        let body = self
            .client
            .get_json(path, &params)
            .await?;
        self.stats.add_page();
        Ok(body)
    }

    /// Sync several streams in order, then emit the final state
    pub async fn sync<S: MessageSink + ?Sized>(
        &mut self,
        streams: &[&StreamDefinition],
        sink: &mut S,
    ) -> Result<SyncStats> {
        let start = Instant::now();

        for stream in streams {
            self.sync_stream(stream, sink).await?;
        }
        sink.send(Message::empty_state())?;

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        Ok(self.stats.clone())
    }

    /// Sync a single stream: its schema, then every record
    pub async fn sync_stream<S: MessageSink + ?Sized>(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut S,
    ) -> Result<usize> {
        let start = Instant::now();
        info!("Starting sync for stream: {}", stream.name);

        sink.send(Message::schema(stream))?;

        let count = match stream.kind {
            StreamKind::Profiles => self.sync_profiles(stream, sink).await?,
            _ => self.sync_pages(stream, None, sink).await?,
        };

        self.stats.add_stream();
        info!(
            "Finished stream {}: {count} records in {}ms",
            stream.name,
            start.elapsed().as_millis()
        );
        Ok(count)
    }

    /// Ids of every account visible to the credentials, in server order.
    ///
    /// The accounts drained here are not emitted and not counted as synced.
    pub async fn read_account_ids(&mut self) -> Result<Vec<i64>> {
        let accounts = StreamKind::Accounts.definition();
        let mut ids = Vec::new();

        self.walk_pages(accounts, None, |record| {
            match record.get("account_id").and_then(parse_account_id) {
                Some(id) => ids.push(id),
                None => warn!("Skipping account without a usable account_id: {record:?}"),
            }
            Ok(())
        })
        .await?;

        Ok(ids)
    }

    /// Drain accounts, then fetch the profiles of each account
    async fn sync_profiles<S: MessageSink + ?Sized>(
        &mut self,
        stream: &StreamDefinition,
        sink: &mut S,
    ) -> Result<usize> {
        let account_ids = self.read_account_ids().await?;
        debug!("Fetching profiles for {} accounts", account_ids.len());

        let mut total = 0;
        for account_id in account_ids {
            total += self.sync_pages(stream, Some(account_id), sink).await?;
        }
        Ok(total)
    }

    /// Send every record of one request path to the sink
    async fn sync_pages<S: MessageSink + ?Sized>(
        &mut self,
        stream: &StreamDefinition,
        account_id: Option<i64>,
        sink: &mut S,
    ) -> Result<usize> {
        let count = self
            .walk_pages(stream, account_id, |record| {
                sink.send(Message::record(stream.name, record))
            })
            .await?;

        self.stats.add_records(count);
        Ok(count)
    }

    /// Walk the pages of one request path, handing each record to `on_record`
    async fn walk_pages<F>(
        &mut self,
        stream: &StreamDefinition,
        account_id: Option<i64>,
        mut on_record: F,
    ) -> Result<usize>
    where
        F: FnMut(JsonObject) -> Result<()>,
    {
        let path = stream.request_path(account_id);
        let extractor = stream.extractor(&self.config);
        let paginator = stream.paginator();

        let mut state = PaginationState::new();
        let mut total = 0;

        while !state.is_done() {
            let body = self.fetch_page(stream, &path, state.cursor()).await?;

            let mut page_count = 0;
            for mut record in extractor.extract(&body)? {
                if let Some(id) = account_id {
                    record.insert("account_id".to_string(), JsonValue::from(id));
                }
                on_record(record)?;
                page_count += 1;
            }

            debug!(
                "{} page {}: {page_count} records",
                stream.name,
                state.current_page().unwrap_or_default()
            );
            total += page_count;

            state = paginator.advance(state, &body, page_count);
        }

        Ok(total)
    }
}

/// Account ids arrive as numbers, occasionally as numeric strings
fn parse_account_id(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
