use reactlog::{Discard, MatchDiscipline, Redirect, SharedBuffer, SharedReactLog};

#[test]
fn tracing_events_are_dispatched_per_line() {
    let primary = SharedBuffer::new();
    let audit = SharedBuffer::new();

    let shared = SharedReactLog::new(primary.clone());
    shared.register("DEBUG", Discard).unwrap();
    shared.register("AUDIT", Redirect::new(audit.clone())).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(shared.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("cache warmed");
        tracing::info!("AUDIT user=42 logged in");
        tracing::warn!("disk at 91%");
    });

    let primary = primary.to_string_lossy();
    let audit = audit.to_string_lossy();

    assert!(!primary.contains("cache warmed"));
    assert!(primary.contains("disk at 91%"));
    assert!(!primary.contains("AUDIT"));
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains("AUDIT user=42 logged in"));
}

#[test]
fn substring_triggers_apply_to_formatted_fields() {
    let primary = SharedBuffer::new();
    let shared = SharedReactLog::with_discipline(primary.clone(), MatchDiscipline::Substring);
    shared.register("user_id=107", Discard).unwrap();

    let subscriber = tracing_subscriber::fmt()
        .with_writer(shared)
        .with_ansi(false)
        .without_time()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(user_id = 107, "profile updated");
        tracing::info!(user_id = 108, "profile updated");
    });

    let primary = primary.to_string_lossy();
    assert_eq!(primary.lines().count(), 1);
    assert!(primary.contains("user_id=108"));
}

#[test]
fn registering_while_installed_as_writer_does_not_deadlock() {
    let primary = SharedBuffer::new();
    let shared = SharedReactLog::new(primary.clone());

    let (tx, rx) = std::sync::mpsc::channel();
    let worker = shared.clone();
    std::thread::spawn(move || {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(worker.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || {
            tracing::info!("before registration");
            let result = worker.register("TRACE", Discard);
            tracing::info!("TRACE suppressed after registration");
            tracing::info!("after registration");
            result
        });
        let _ = tx.send(result);
    });

    let result = rx
        .recv_timeout(std::time::Duration::from_secs(5))
        .expect("registration deadlocked");
    assert!(result.is_ok());

    let primary = primary.to_string_lossy();
    assert!(primary.contains("before registration"));
    assert!(primary.contains("registered trigger"));
    assert!(primary.contains("after registration"));
    assert!(!primary.contains("TRACE suppressed"));
}
