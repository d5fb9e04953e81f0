//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::SyncEngine;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClientConfig;
use crate::output::{build_catalog, selected_streams, MessageWriter};
use crate::streams::{all_streams, find_stream, StreamDefinition};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
    http_config: HttpClientConfig,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            http_config: HttpClientConfig::default(),
        }
    }

    /// Use a custom HTTP client configuration
    #[must_use]
    pub fn with_http_config(mut self, http_config: HttpClientConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Run the CLI command, printing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        self.run_to(stdout.lock()).await
    }

    /// Run the CLI command, writing messages to `out`
    pub async fn run_to<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = MessageWriter::with_format(out, self.cli.format);

        let result = match &self.cli.command {
            Commands::Spec => self.spec(&mut writer),
            Commands::Check { config_json } => {
                self.check(config_json.as_deref(), &mut writer).await
            }
            Commands::Discover { config_json } => {
                self.discover(config_json.as_deref(), &mut writer)
            }
            Commands::Streams => self.streams(&mut writer),
            Commands::Read {
                streams,
                catalog,
                config_json,
            } => {
                self.read(
                    streams.as_deref(),
                    catalog.as_deref(),
                    config_json.as_deref(),
                    &mut writer,
                )
                .await
            }
        };

        writer.flush()?;
        result
    }

    /// Load configuration
    fn load_config(&self, inline: Option<&str>) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = inline {
            return TapConfig::from_json_str(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration provided, use --config or --config-json",
        ))
    }

    /// Show spec
    fn spec<W: Write>(&self, writer: &mut MessageWriter<W>) -> Result<()> {
        writer.write_value(&json!({
            "type": "SPEC",
            "spec": {
                "documentationUrl": "https://www.whatconverts.com/api/",
                "connectionSpecification": TapConfig::json_schema()
            }
        }))
    }

    /// Check connection
    async fn check<W: Write>(
        &self,
        config_json: Option<&str>,
        writer: &mut MessageWriter<W>,
    ) -> Result<()> {
        let config = self.load_config(config_json)?;
        let engine = SyncEngine::from_config(config, self.http_config.clone())?;

        info!("Checking connection to WhatConverts");

        let status = match engine.check().await {
            Ok(()) => json!({
                "status": "SUCCEEDED",
                "message": "Connection successful"
            }),
            Err(e) => json!({
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }),
        };

        writer.write_value(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": status
        }))
    }

    /// Discover streams
    fn discover<W: Write>(
        &self,
        config_json: Option<&str>,
        writer: &mut MessageWriter<W>,
    ) -> Result<()> {
        // Schemas are static; a config is only validated when one is given
        if config_json.is_some() || self.cli.config.is_some() {
            self.load_config(config_json)?;
        }

        writer.write_value(&build_catalog(all_streams()))
    }

    /// List available stream names
    fn streams<W: Write>(&self, writer: &mut MessageWriter<W>) -> Result<()> {
        let names: Vec<&str> = all_streams().iter().map(|s| s.name).collect();

        writer.write_value(&json!({
            "type": "STREAMS",
            "streams": names
        }))
    }

    /// Read data
    async fn read<W: Write>(
        &self,
        streams_filter: Option<&str>,
        catalog_path: Option<&Path>,
        config_json: Option<&str>,
        writer: &mut MessageWriter<W>,
    ) -> Result<()> {
        let config = self.load_config(config_json)?;
        let catalog = catalog_path.map(load_catalog).transpose()?;
        let selected = select_streams(streams_filter, catalog.as_ref())?;

        info!(
            "Syncing {} streams: {}",
            selected.len(),
            selected.iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
        );

        let mut engine = SyncEngine::from_config(config, self.http_config.clone())?;
        let stats = engine.sync(&selected, writer).await?;

        info!(
            "Sync complete: {} records from {} streams ({} pages) in {}ms",
            stats.records_synced, stats.streams_synced, stats.pages_fetched, stats.duration_ms
        );

        Ok(())
    }
}

/// Read a catalog file
fn load_catalog(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("Invalid catalog JSON: {e}")))
}

/// Resolve the streams to sync, always in sync order.
///
/// With neither a filter nor a catalog every stream is synced. Unknown
/// names in either are an error.
fn select_streams(
    streams_filter: Option<&str>,
    catalog: Option<&Value>,
) -> Result<Vec<&'static StreamDefinition>> {
    let mut wanted: Option<HashSet<String>> = None;

    if let Some(catalog) = catalog {
        let names = selected_streams(catalog);
        check_known(&names)?;
        wanted = Some(names.into_iter().collect());
    }

    if let Some(filter) = streams_filter {
        let names: Vec<String> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        check_known(&names)?;

        if !names.is_empty() {
            let names: HashSet<String> = names.into_iter().collect();
            wanted = Some(match wanted {
                Some(existing) => existing.intersection(&names).cloned().collect(),
                None => names,
            });
        }
    }

    Ok(all_streams()
        .iter()
        .filter(|s| wanted.as_ref().map_or(true, |w| w.contains(s.name)))
        .collect())
}

fn check_known(names: &[String]) -> Result<()> {
    match names.iter().find(|name| find_stream(name).is_none()) {
        Some(unknown) => Err(Error::stream_not_found(unknown.as_str())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(streams: &[&StreamDefinition]) -> Vec<&'static str> {
        streams.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_select_all_by_default() {
        let selected = select_streams(None, None).unwrap();
        assert_eq!(selected.len(), 5);
        assert_eq!(selected[0].name, "whatconverts_accounts");
    }

    #[test]
    fn test_select_keeps_sync_order() {
        let selected = select_streams(
            Some("whatconverts_tracking_web_forms, whatconverts_leads"),
            None,
        )
        .unwrap();
        assert_eq!(
            names(&selected),
            vec!["whatconverts_leads", "whatconverts_tracking_web_forms"]
        );
    }

    #[test]
    fn test_select_empty_filter_means_all() {
        assert_eq!(select_streams(Some(" , "), None).unwrap().len(), 5);
    }

    #[test]
    fn test_select_unknown_stream() {
        let err = select_streams(Some("whatconverts_calls"), None).unwrap_err();
        assert!(matches!(err, Error::StreamNotFound { stream } if stream == "whatconverts_calls"));
    }

    #[test]
    fn test_select_from_catalog_and_filter() {
        let catalog = json!({
            "streams": [
                {
                    "tap_stream_id": "whatconverts_profiles",
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": true}}]
                },
                {
                    "tap_stream_id": "whatconverts_leads",
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": true}}]
                }
            ]
        });

        let selected = select_streams(None, Some(&catalog)).unwrap();
        assert_eq!(
            names(&selected),
            vec!["whatconverts_profiles", "whatconverts_leads"]
        );

        let selected = select_streams(Some("whatconverts_leads"), Some(&catalog)).unwrap();
        assert_eq!(names(&selected), vec!["whatconverts_leads"]);
    }
}
