//! Integration tests against a scripted VDX server.
//!
//! These tests verify the black-box behavior of the client:
//! - Binary queries decode through the registry without over-reading
//! - Text queries return the declared lines verbatim
//! - Server errors fail immediately with zero reconnects
//! - Transport and protocol failures reconnect up to the attempt budget

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use vdx_client::{ClientError, ConnectionConfig, VdxClient};
use vdx_data::{Dataset, DecodeError, Wave};
use vdx_protocol::{compress, Command};

/// Reads one request line from a client connection.
async fn read_request(stream: &mut BufReader<TcpStream>) -> String {
    let mut line = String::new();
    stream.read_line(&mut line).await.unwrap();
    line
}

/// Binds a listener and returns it with a client configured against it.
async fn bind_server() -> (TcpListener, VdxClient) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ConnectionConfig::new(addr.ip().to_string(), addr.port())
        .with_read_timeout(Duration::from_secs(2));
    (listener, VdxClient::new(config))
}

fn data_command() -> Command {
    Command::new().with("source", "hvo_def_tilt").with("action", "data")
}

#[tokio::test]
async fn test_binary_query_decodes_wave_without_over_reading() {
    let (listener, mut client) = bind_server().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut stream = BufReader::new(stream);

        let request = read_request(&mut stream).await;
        assert_eq!(request, "getdata: action=data;source=hvo_def_tilt\n");

        let wave = Wave::new(100.0, 50.0, vec![1, 2, 3, 4]);
        let payload = compress(&wave.to_binary()).unwrap();
        let header = format!("ok: bytes={};type=wave\n", payload.len());
        stream.get_mut().write_all(header.as_bytes()).await.unwrap();
        stream.get_mut().write_all(&payload).await.unwrap();

        // A second exchange on the same connection proves the client
        // consumed exactly the declared byte count.
        let request = read_request(&mut stream).await;
        assert!(request.starts_with("getdata: "));
        stream
            .get_mut()
            .write_all(b"ok: lines=2\n7:UWE:Uwekahuna\n9:SMC:Sand Hill\n")
            .await
            .unwrap();
    });

    let dataset = client.get_binary_data(&data_command()).await.unwrap();
    match dataset {
        Dataset::Wave(wave) => {
            assert_eq!(wave.start_time, 100.0);
            assert_eq!(wave.sampling_rate, 50.0);
            assert_eq!(wave.samples(), &[1, 2, 3, 4]);
        }
        other => panic!("expected wave, got {other:?}"),
    }

    let lines = client.get_text_data(&data_command()).await.unwrap();
    assert_eq!(lines, vec!["7:UWE:Uwekahuna", "9:SMC:Sand Hill"]);
}

#[tokio::test]
async fn test_server_error_fails_immediately() {
    let (listener, mut client) = bind_server().await;
    let connects = Arc::new(AtomicUsize::new(0));
    let server_connects = connects.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            server_connects.fetch_add(1, Ordering::SeqCst);
            let mut stream = BufReader::new(stream);
            // Answer every request on this connection until the client
            // hangs up.
            loop {
                let request = read_request(&mut stream).await;
                if request.is_empty() {
                    break;
                }
                stream
                    .get_mut()
                    .write_all(b"error:no data for selection\n")
                    .await
                    .unwrap();
            }
        }
    });

    let err = client.get_binary_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::Server { message } => assert_eq!(message, "no data for selection"),
        other => panic!("expected server error, got {other:?}"),
    }

    let err = client.get_text_data(&data_command()).await.unwrap_err();
    assert!(matches!(err, ClientError::Server { .. }));

    // Both operations reused the first connection: a server error never
    // triggers a reconnect.
    assert_eq!(connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dropped_connections_retried_until_success() {
    let (listener, mut client) = bind_server().await;
    let connects = Arc::new(AtomicUsize::new(0));
    let server_connects = connects.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let n = server_connects.fetch_add(1, Ordering::SeqCst);
            let mut stream = BufReader::new(stream);
            let _ = read_request(&mut stream).await;
            if n < 2 {
                // Close without answering; the client should reconnect.
                continue;
            }
            stream.get_mut().write_all(b"ok: lines=1\n42:OK\n").await.unwrap();
        }
    });

    let lines = client.get_text_data(&data_command()).await.unwrap();
    assert_eq!(lines, vec!["42:OK"]);
    assert_eq!(connects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_exhausted_budget_reports_last_cause() {
    let (listener, mut client) = bind_server().await;
    let connects = Arc::new(AtomicUsize::new(0));
    let server_connects = connects.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            server_connects.fetch_add(1, Ordering::SeqCst);
            let mut stream = BufReader::new(stream);
            let _ = read_request(&mut stream).await;
            // Close without answering, every time.
        }
    });

    let err = client.get_text_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(
                *source,
                ClientError::ConnectionClosed | ClientError::Io(_)
            ));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }

    // Initial connect plus one reconnect per failed attempt except the last.
    assert_eq!(connects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_malformed_status_line_is_retried() {
    let (listener, mut client) = bind_server().await;

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let mut stream = BufReader::new(stream);
            let _ = read_request(&mut stream).await;
            stream.get_mut().write_all(b"greetings traveler\n").await.unwrap();
        }
    });

    let err = client.get_binary_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, ClientError::Protocol(_)));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_type_tag_is_distinguishable() {
    let (listener, mut client) = bind_server().await;

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let mut stream = BufReader::new(stream);
            let _ = read_request(&mut stream).await;
            let payload = compress(&[0u8; 8]).unwrap();
            let header = format!("ok: bytes={};type=mystery\n", payload.len());
            stream.get_mut().write_all(header.as_bytes()).await.unwrap();
            stream.get_mut().write_all(&payload).await.unwrap();
        }
    });

    let err = client.get_binary_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::RetryExhausted { source, .. } => match *source {
            ClientError::Decode(DecodeError::UnknownType(tag)) => assert_eq!(tag, "mystery"),
            other => panic!("expected unknown type, got {other:?}"),
        },
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_type_field_is_retried() {
    let (listener, mut client) = bind_server().await;
    let connects = Arc::new(AtomicUsize::new(0));
    let server_connects = connects.clone();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            server_connects.fetch_add(1, Ordering::SeqCst);
            let mut stream = BufReader::new(stream);
            loop {
                let request = read_request(&mut stream).await;
                if request.is_empty() {
                    break;
                }
                // Payload present but no type tag.
                let payload = compress(b"orphaned").unwrap();
                let header = format!("ok: bytes={}\n", payload.len());
                stream.get_mut().write_all(header.as_bytes()).await.unwrap();
                stream.get_mut().write_all(&payload).await.unwrap();
            }
        }
    });

    let err = client.get_binary_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(
                *source,
                ClientError::Protocol(vdx_protocol::ProtocolError::MissingField("type"))
            ));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(connects.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_read_timeout_surfaces() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let config = ConnectionConfig::new(addr.ip().to_string(), addr.port())
        .with_read_timeout(Duration::from_millis(100));
    let mut client = VdxClient::new(config).with_max_tries(1);

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let mut stream = BufReader::new(stream);
            let _ = read_request(&mut stream).await;
            // Never answer; hold the socket open.
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
    });

    let err = client.get_text_data(&data_command()).await.unwrap_err();
    match err {
        ClientError::RetryExhausted { attempts, source } => {
            assert_eq!(attempts, 1);
            assert!(matches!(*source, ClientError::Timeout));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}
