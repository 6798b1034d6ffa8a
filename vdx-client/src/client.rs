//! High-level query client.

use std::sync::Arc;

use vdx_data::{DataTypeRegistry, Dataset, DecodeError};
use vdx_protocol::{decompress, Command, ResponseEnvelope};

use crate::connection::{Connection, ConnectionConfig};
use crate::error::ClientError;
use crate::retry::{RetryDecision, RetrySession, DEFAULT_MAX_TRIES};

/// High-level client for VDX servers.
///
/// One client owns one connection and runs one request at a time; methods
/// take `&mut self`, so concurrent use of a single client does not compile.
/// Retrievals retry transport-level failures with a reconnect between
/// attempts. Server-reported errors fail immediately with the server's
/// message.
pub struct VdxClient {
    conn: Connection,
    registry: Arc<DataTypeRegistry>,
    max_tries: u32,
}

impl VdxClient {
    /// Creates a client with the built-in dataset types.
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_registry(config, Arc::new(DataTypeRegistry::with_builtin_types()))
    }

    /// Creates a client decoding through a caller-supplied registry.
    pub fn with_registry(config: ConnectionConfig, registry: Arc<DataTypeRegistry>) -> Self {
        Self {
            conn: Connection::new(config),
            registry,
            max_tries: DEFAULT_MAX_TRIES,
        }
    }

    /// Sets the attempt budget for retried operations (at least 1).
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries.max(1);
        self
    }

    /// The decoder registry used for binary responses.
    pub fn registry(&self) -> &Arc<DataTypeRegistry> {
        &self.registry
    }

    /// Registers a decoder for an additional type tag.
    ///
    /// Registration is meant for startup, before queries run; the registry
    /// is shared by every client holding the same `Arc`.
    pub fn add_data_type<F>(&self, tag: impl Into<String>, decoder: F)
    where
        F: Fn(&[u8]) -> Result<Dataset, DecodeError> + Send + Sync + 'static,
    {
        self.registry.register(tag, decoder);
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_connected()
    }

    /// Connects to the server. Does nothing when already connected.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        self.conn.connect().await
    }

    /// Closes the connection.
    pub async fn close(&mut self) {
        self.conn.close().await;
    }

    /// Writes one command and reads the response status line.
    pub async fn submit_command(
        &mut self,
        cmd: &Command,
    ) -> Result<ResponseEnvelope, ClientError> {
        self.conn.connect().await?;
        let request = cmd.request_line();
        tracing::debug!("Sending command: {}", request.trim_end());
        self.conn.write_all(request.as_bytes()).await?;
        let line = self.conn.read_line().await?;
        tracing::debug!("Response status: {}", line);
        Ok(ResponseEnvelope::parse(&line)?)
    }

    // =========================================================================
    // Retrieval operations
    // =========================================================================

    /// Runs a binary query and decodes the payload into a dataset.
    pub async fn get_binary_data(&mut self, cmd: &Command) -> Result<Dataset, ClientError> {
        let mut session = RetrySession::new(self.max_tries);
        loop {
            match self.try_binary(cmd).await {
                Ok(dataset) => return Ok(dataset),
                Err(err) => match session.failed(err) {
                    RetryDecision::Fail(err) => return Err(err),
                    RetryDecision::Retry(err) => self.recover(&session, err).await,
                },
            }
        }
    }

    /// Runs a text query and returns the response lines, in order.
    pub async fn get_text_data(&mut self, cmd: &Command) -> Result<Vec<String>, ClientError> {
        let mut session = RetrySession::new(self.max_tries);
        loop {
            match self.try_text(cmd).await {
                Ok(lines) => return Ok(lines),
                Err(err) => match session.failed(err) {
                    RetryDecision::Fail(err) => return Err(err),
                    RetryDecision::Retry(err) => self.recover(&session, err).await,
                },
            }
        }
    }

    async fn try_binary(&mut self, cmd: &Command) -> Result<Dataset, ClientError> {
        let fields = match self.submit_command(cmd).await? {
            ResponseEnvelope::Ok(fields) => fields,
            ResponseEnvelope::Error(message) => return Err(ClientError::Server { message }),
        };
        let count = fields.byte_count()?;
        // The payload is already in flight; read it fully before failing on
        // the remaining fields.
        let compressed = self.conn.read_exact(count).await?;
        let tag = fields.type_tag()?;
        let payload = decompress(&compressed)?;
        tracing::debug!(
            "Decoding {} payload: {} bytes compressed, {} inflated",
            tag,
            count,
            payload.len()
        );
        Ok(self.registry.decode(tag, &payload)?)
    }

    async fn try_text(&mut self, cmd: &Command) -> Result<Vec<String>, ClientError> {
        let fields = match self.submit_command(cmd).await? {
            ResponseEnvelope::Ok(fields) => fields,
            ResponseEnvelope::Error(message) => return Err(ClientError::Server { message }),
        };
        let count = fields.line_count()?;
        let mut lines = Vec::new();
        for _ in 0..count {
            lines.push(self.conn.read_line().await?);
        }
        Ok(lines)
    }

    /// Reconnects between attempts. A failed reconnect is left for the next
    /// attempt to surface.
    async fn recover(&mut self, session: &RetrySession, err: ClientError) {
        tracing::warn!(
            "Attempt {}/{} failed: {}; reconnecting",
            session.attempts(),
            session.max_tries(),
            err
        );
        if let Err(err) = self.conn.reconnect().await {
            tracing::debug!("Reconnect failed: {}", err);
        }
    }
}
