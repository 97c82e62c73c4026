// Server loop module
// Accepts connections until shutdown, then waits for in-flight requests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop until a shutdown is requested.
///
/// After the listener closes, open connections get up to
/// `performance.write_timeout` seconds to finish.
pub async fn run_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    signals: Arc<SignalHandler>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        // Registered before the flag check so a notify in between is not lost
        let shutdown = signals.shutdown.notified();
        tokio::pin!(shutdown);
        shutdown.as_mut().enable();
        if signals.is_shutdown_requested() {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => match accept_result {
                Ok((stream, peer_addr)) => {
                    accept_connection(stream, peer_addr, &state, &active_connections, &signals);
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            },
            () = &mut shutdown => break,
        }
    }

    drop(listener);
    let grace = Duration::from_secs(state.config.performance.write_timeout);
    drain_connections(&active_connections, grace).await;
}

/// Wait until no connection is active or `grace` has passed.
async fn drain_connections(active: &AtomicUsize, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {remaining} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::listener::create_listener;
    use crate::store::InMemoryMissionStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_drain_returns_once_idle() {
        let active = AtomicUsize::new(0);
        tokio::time::timeout(
            Duration::from_secs(1),
            drain_connections(&active, Duration::from_secs(30)),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let active = AtomicUsize::new(3);
        drain_connections(&active, Duration::from_millis(100)).await;
        assert_eq!(active.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_serves_requests_until_shutdown() {
        let mut config = Config::load_from("definitely-missing-config-file").unwrap();
        config.logging.access_log = false;
        let state = Arc::new(AppState::new(config, Arc::new(InMemoryMissionStore::new())));
        let signals = Arc::new(SignalHandler::new());

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(run_server_loop(listener, state, Arc::clone(&signals)));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /message HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.ends_with("Hello, World!"));

        signals.request_shutdown();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_idle_keep_alive_connection_does_not_hold_shutdown() {
        let mut config = Config::load_from("definitely-missing-config-file").unwrap();
        config.logging.access_log = false;
        assert!(config.performance.write_timeout >= 30);
        let state = Arc::new(AppState::new(config, Arc::new(InMemoryMissionStore::new())));
        let signals = Arc::new(SignalHandler::new());

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(run_server_loop(listener, state, Arc::clone(&signals)));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /message HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();

        // Read the one response and leave the connection open
        let mut received = Vec::new();
        let mut buf = [0u8; 1024];
        while !received.ends_with(b"Hello, World!") {
            let n = stream.read(&mut buf).await.unwrap();
            assert_ne!(n, 0, "connection closed before the response arrived");
            received.extend_from_slice(&buf[..n]);
        }

        let started = std::time::Instant::now();
        signals.request_shutdown();
        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));

        // The server hung up on the idle client
        let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(n, 0);
    }
}
