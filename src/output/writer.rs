//! Singer message writer
//!
//! Writes engine messages as one JSON object per line.

use crate::engine::Message;
use crate::error::Result;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    #[default]
    Json,
    /// Indented JSON
    Pretty,
}

/// Destination for messages produced by the engine
pub trait MessageSink {
    /// Accept one message
    fn send(&mut self, message: Message) -> Result<()>;
}

impl MessageSink for Vec<Message> {
    fn send(&mut self, message: Message) -> Result<()> {
        self.push(message);
        Ok(())
    }
}

/// Writes Singer messages to an underlying writer
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    messages_written: usize,
}

impl<W: Write> MessageWriter<W> {
    /// Create a writer emitting compact JSON lines
    pub fn new(inner: W) -> Self {
        Self::with_format(inner, OutputFormat::Json)
    }

    /// Create a writer with the given format
    pub fn with_format(inner: W, format: OutputFormat) -> Self {
        Self {
            inner,
            format,
            messages_written: 0,
        }
    }

    /// Write a raw JSON value as one message
    pub fn write_value(&mut self, value: &serde_json::Value) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.inner, value)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.inner, value)?,
        }
        self.inner.write_all(b"\n")?;
        self.messages_written += 1;
        Ok(())
    }

    /// Number of messages written so far
    #[must_use]
    pub fn messages_written(&self) -> usize {
        self.messages_written
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> MessageSink for MessageWriter<W> {
    fn send(&mut self, message: Message) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.inner, &message)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.inner, &message)?,
        }
        self.inner.write_all(b"\n")?;
        self.messages_written += 1;
        Ok(())
    }
}
