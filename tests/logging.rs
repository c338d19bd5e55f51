use taskboard::{error::LoggingError, logging};

#[test]
fn init_is_idempotent_per_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = logging::init_logging("debug", dir.path()).unwrap();
    assert_eq!(path, dir.path().join(logging::LOG_FILE));
    assert!(path.exists());
    assert_eq!(logging::active_log(), Some(path.as_path()));

    assert_eq!(logging::init_logging("debug", dir.path()).unwrap(), path);

    let other = tempfile::tempdir().unwrap();
    let err = logging::init_logging("debug", other.path()).unwrap_err();
    assert!(matches!(err, LoggingError::AlreadyInitialized(_)));
}
