//! Signal-path test: SIGTERM flips the running flag and the accept loop
//! stops within one accept-wait interval.
//!
//! Lives in its own test binary because it raises a real signal against
//! the test process; the other test binaries must not see it.

#![cfg(unix)]

use std::process::Command;
use std::sync::Arc;
use std::time::Duration;

use honeypot::config::schema::ListenerConfig;
use honeypot::lifecycle::spawn_signal_watcher;
use honeypot::net::Listener;
use honeypot::service::ServiceContext;
use honeypot::sink::RotatingSink;
use honeypot::state::ServiceState;

const ACCEPT_WAIT: Duration = Duration::from_millis(100);

#[tokio::test]
async fn sigterm_stops_the_accept_loop() {
    let dir = tempfile::tempdir().unwrap();
    let sink = RotatingSink::open(dir.path().join("events.json"), 1 << 20, 3).unwrap();
    let state = Arc::new(ServiceState::new(Duration::from_secs(60)));
    let ctx = ServiceContext {
        state: Arc::clone(&state),
        sink: Arc::new(sink),
    };

    let listener = Listener::bind(&ListenerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    })
    .unwrap();
    let server = tokio::spawn(async move { listener.run(ctx, ACCEPT_WAIT).await });
    let watcher = spawn_signal_watcher(Arc::clone(&state));

    // Let the watcher install its handlers before raising the signal.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(state.is_running());

    let status = Command::new("kill")
        .args(["-TERM", &std::process::id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    watcher.await.unwrap();
    assert!(!state.is_running());

    tokio::time::timeout(ACCEPT_WAIT * 5, server)
        .await
        .expect("loop did not stop after SIGTERM")
        .unwrap();
}
