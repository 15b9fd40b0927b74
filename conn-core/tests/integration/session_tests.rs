//! Session manager lifecycle tests

use conn_core::{
    ConnectOutcome, DEFAULT_TERM_SIZE, ExitOutcome, ServerDirectory, ServerEntry, SessionError,
    SessionManager, SessionState, TermSize,
};

use super::fakes::{FakeConnector, FakeCredentials, FakeTerminal, Harness, Script};

type FakeManager = SessionManager<FakeConnector, FakeTerminal, FakeCredentials>;

fn directory() -> ServerDirectory {
    ServerDirectory::from_entries([
        ("web", ServerEntry::new("10.0.0.5", "alice", Some(2222))),
        ("db", ServerEntry::new("db.internal", "bob", None)),
    ])
}

fn manager(harness: &Harness) -> FakeManager {
    SessionManager::new(harness.connector(), harness.terminal(), harness.credentials())
        .with_console(harness.console.clone())
        .with_streams(Harness::streams())
}

const RELEASE_ORDER: [&str; 3] = ["channel.close", "transport.close", "restore"];

fn ends_with_release(events: &[&str]) -> bool {
    events.ends_with(&RELEASE_ORDER)
}

// ========== Lookup ==========

#[tokio::test]
async fn unknown_server_does_nothing() {
    let harness = Harness::default();
    let mut manager = manager(&harness);

    let outcome = manager.connect(&directory(), "ghost").await.unwrap();

    assert_eq!(outcome, ConnectOutcome::NotFound);
    assert!(harness.log.events().is_empty(), "{:?}", harness.log.events());
    assert_eq!(
        harness.console.contents(),
        "Server ghost not found in configuration.\n"
    );
    assert_eq!(manager.state(), SessionState::Idle);
}

#[tokio::test]
async fn lookup_is_case_sensitive() {
    let harness = Harness::default();
    let mut manager = manager(&harness);

    let outcome = manager.connect(&directory(), "WEB").await.unwrap();

    assert_eq!(outcome, ConnectOutcome::NotFound);
    assert_eq!(harness.log.count("prompt"), 0);
}

// ========== Successful session ==========

#[tokio::test]
async fn clean_exit_runs_full_lifecycle() {
    let harness = Harness::default();
    let mut manager = manager(&harness);

    let outcome = manager.connect(&directory(), "web").await.unwrap();

    assert_eq!(outcome, ConnectOutcome::Completed);
    assert_eq!(manager.state(), SessionState::Closed);
    assert_eq!(
        harness.log.events(),
        vec![
            "prompt",
            "connect",
            "open_session",
            "raw",
            "request_pty",
            "start_shell",
            "relay",
            "channel.close",
            "transport.close",
            "restore",
        ]
    );
    assert_eq!(harness.console.contents(), "Connected to web (10.0.0.5)\n");
}

#[tokio::test]
async fn connects_with_entry_parameters() {
    let harness = Harness::default();
    let mut manager = manager(&harness);

    manager.connect(&directory(), "web").await.unwrap();

    let seen = harness.seen();
    assert_eq!(seen.address, "10.0.0.5");
    assert_eq!(seen.port, 2222);
    assert_eq!(seen.username, "alice");
    assert_eq!(seen.password, "pw");
}

#[tokio::test]
async fn missing_port_uses_22() {
    let harness = Harness::default();
    let mut manager = manager(&harness);

    manager.connect(&directory(), "db").await.unwrap();

    assert_eq!(harness.seen().port, 22);
}

#[tokio::test]
async fn close_without_status_is_clean() {
    let harness = Harness::new(Script {
        exit: ExitOutcome::Closed,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let outcome = manager.connect(&directory(), "web").await.unwrap();

    assert_eq!(outcome, ConnectOutcome::Completed);
    assert!(ends_with_release(&harness.log.events()));
}

// ========== Geometry ==========

#[tokio::test]
async fn pty_uses_probed_geometry() {
    let harness = Harness::new(Script {
        size: Some((132, 50)),
        ..Script::default()
    });
    let mut manager = manager(&harness);

    manager.connect(&directory(), "web").await.unwrap();

    let pty = harness.seen().pty.unwrap();
    assert_eq!(pty.term, "xterm-256color");
    assert_eq!(pty.size, TermSize { cols: 132, rows: 50 });
}

#[tokio::test]
async fn failed_probe_falls_back_to_80x40() {
    let harness = Harness::new(Script {
        size: None,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let outcome = manager.connect(&directory(), "web").await.unwrap();

    assert_eq!(outcome, ConnectOutcome::Completed);
    assert_eq!(harness.seen().pty.unwrap().size, DEFAULT_TERM_SIZE);
}

// ========== Failures before raw mode ==========

#[tokio::test]
async fn prompt_failure_never_connects() {
    let harness = Harness::new(Script {
        fail_prompt: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::Prompt(_)));
    assert_eq!(harness.log.events(), vec!["prompt"]);
    assert_eq!(manager.state(), SessionState::Failed);
}

#[tokio::test]
async fn connect_failure_never_touches_terminal() {
    let harness = Harness::new(Script {
        fail_connect: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::Connect { .. }));
    assert_eq!(harness.log.events(), vec!["prompt", "connect"]);
    assert_eq!(harness.console.contents(), "");
    assert_eq!(manager.state(), SessionState::Failed);
}

#[tokio::test]
async fn channel_failure_releases_transport() {
    let harness = Harness::new(Script {
        fail_channel: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(err.to_string().starts_with("Failed to create SSH session"));
    assert_eq!(
        harness.log.events(),
        vec!["prompt", "connect", "open_session", "transport.close"]
    );
    assert_eq!(harness.log.count("raw"), 0);
}

#[tokio::test]
async fn raw_mode_failure_releases_channel_and_transport() {
    let harness = Harness::new(Script {
        fail_raw: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::Terminal(_)));
    assert_eq!(harness.log.count("request_pty"), 0);
    assert_eq!(harness.log.count("channel.close"), 1);
    assert_eq!(harness.log.count("transport.close"), 1);
}

// ========== Failures in raw mode ==========

#[tokio::test]
async fn pty_failure_unwinds_in_order() {
    let harness = Harness::new(Script {
        fail_pty: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::PtyRequest(_)));
    let events = harness.log.events();
    assert!(ends_with_release(&events), "{events:?}");
    assert_eq!(harness.log.count("restore"), 1);
    assert_eq!(harness.log.count("start_shell"), 0);
    assert_eq!(manager.state(), SessionState::Failed);
}

#[tokio::test]
async fn shell_failure_unwinds_in_order() {
    let harness = Harness::new(Script {
        fail_shell: true,
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(err.to_string().starts_with("Failed to start shell"));
    assert!(ends_with_release(&harness.log.events()));
    assert_eq!(harness.log.count("relay"), 0);
}

#[tokio::test]
async fn non_zero_exit_is_reported_after_unwind() {
    let harness = Harness::new(Script {
        exit: ExitOutcome::Exited(2),
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::RemoteExit(2)));
    assert!(ends_with_release(&harness.log.events()));
    assert_eq!(harness.log.count("restore"), 1);
    assert_eq!(manager.state(), SessionState::Failed);
}

#[tokio::test]
async fn exit_signal_is_reported() {
    let harness = Harness::new(Script {
        exit: ExitOutcome::Signaled {
            signal: "KILL".to_string(),
            message: String::new(),
        },
        ..Script::default()
    });
    let mut manager = manager(&harness);

    let err = manager.connect(&directory(), "web").await.unwrap_err();

    assert!(matches!(err, SessionError::RemoteSignal { ref signal, .. } if signal == "KILL"));
    assert!(ends_with_release(&harness.log.events()));
}
