//! Connection management.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::ClientError;

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Timeout for each read while waiting on a response.
    pub read_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// `host:port` form, for logging.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A connection to a VDX server.
///
/// Wraps one TCP stream in a buffered reader. All reads run under the
/// configured read timeout; timeout is the only cancellation.
pub struct Connection {
    config: ConnectionConfig,
    stream: Option<BufReader<TcpStream>>,
}

impl Connection {
    /// Creates a new connection (not yet connected).
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            stream: None,
        }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Connects to the server. Does nothing when already connected.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        if self.stream.is_some() {
            return Ok(());
        }
        tracing::debug!("Connecting to {}...", self.config.addr());
        let stream = tokio::time::timeout(
            self.config.connect_timeout,
            TcpStream::connect((self.config.host.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| ClientError::Timeout)?
        .map_err(ClientError::Io)?;
        stream.set_nodelay(true).ok();
        self.stream = Some(BufReader::new(stream));
        tracing::debug!("Connected to {}", self.config.addr());
        Ok(())
    }

    /// Closes the connection. Safe to call when already closed.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            tracing::debug!("Closing connection to {}", self.config.addr());
            let _ = stream.get_mut().shutdown().await;
        }
    }

    /// Drops the current stream and opens a fresh one.
    pub async fn reconnect(&mut self) -> Result<(), ClientError> {
        self.close().await;
        self.connect().await
    }

    /// Writes the full buffer to the server.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<(), ClientError> {
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        stream
            .get_mut()
            .write_all(data)
            .await
            .map_err(ClientError::Io)?;
        stream.get_mut().flush().await.map_err(ClientError::Io)
    }

    /// Reads one newline-terminated line, stripping the terminator.
    pub async fn read_line(&mut self) -> Result<String, ClientError> {
        let timeout = self.config.read_timeout;
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        let mut line = String::new();
        let n = tokio::time::timeout(timeout, stream.read_line(&mut line))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(ClientError::Io)?;
        if n == 0 {
            return Err(ClientError::ConnectionClosed);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Reads exactly `count` raw bytes.
    pub async fn read_exact(&mut self, count: usize) -> Result<Vec<u8>, ClientError> {
        let timeout = self.config.read_timeout;
        let stream = self.stream.as_mut().ok_or(ClientError::NotConnected)?;
        let mut buf = vec![0u8; count];
        tokio::time::timeout(timeout, stream.read_exact(&mut buf))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => ClientError::ConnectionClosed,
                _ => ClientError::Io(e),
            })?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ConnectionConfig::new("localhost", 16050);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.addr(), "localhost:16050");
    }

    #[test]
    fn test_config_builders() {
        let config = ConnectionConfig::new("vdx.example.org", 16050)
            .with_connect_timeout(Duration::from_secs(5))
            .with_read_timeout(Duration::from_millis(500));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_unconnected_reads_fail() {
        let mut conn = Connection::new(ConnectionConfig::new("localhost", 16050));
        assert!(!conn.is_connected());
        assert!(matches!(
            conn.read_line().await,
            Err(ClientError::NotConnected)
        ));
        assert!(matches!(
            conn.write_all(b"x").await,
            Err(ClientError::NotConnected)
        ));
    }
}
