//! Tests for error handling system

use super::*;
use std::io;
use std::path::PathBuf;

#[test]
fn test_error_severity() {
    // Unparsable sources are skipped with a warning
    assert_eq!(
        GuardError::parse_error("src/broken.ts", vec!["Unexpected token".to_string()]).severity(),
        ErrorSeverity::Warning
    );

    assert_eq!(
        GuardError::io_error(io::Error::new(io::ErrorKind::NotFound, "not found")).severity(),
        ErrorSeverity::Error
    );

    // A broken path transform aborts one module, not the run
    assert_eq!(
        GuardError::internal("sourcePath and outFilePath are identical").severity(),
        ErrorSeverity::Error
    );

    assert_eq!(
        GuardError::config_error("Invalid config").severity(),
        ErrorSeverity::Critical
    );
}

#[test]
fn test_is_critical() {
    assert!(GuardError::config_error("Invalid config").is_critical());
    assert!(!GuardError::internal("identical paths").is_critical());
    assert!(!GuardError::UnsupportedSourceType {
        path: PathBuf::from("README.md")
    }
    .is_critical());
}

#[test]
fn test_user_message() {
    let err = GuardError::PermissionDenied {
        path: PathBuf::from("/test/path"),
    };
    let msg = err.user_message();
    assert!(msg.contains("/test/path"));
    assert!(msg.contains("permission denied"));

    let err = GuardError::parse_error(
        "/test/user.ts",
        vec!["Expected `}`".to_string(), "Unexpected end of input".to_string()],
    );
    let msg = err.user_message();
    assert!(msg.contains("/test/user.ts"));
    assert!(msg.contains("2 syntax errors"));
}

#[test]
fn test_display_of_internal_invariant() {
    let err = GuardError::internal("sourcePath and outFilePath are identical: src/a.ts");
    assert_eq!(
        err.to_string(),
        "Internal Error: sourcePath and outFilePath are identical: src/a.ts"
    );
}

#[test]
fn test_error_factory_methods() {
    match GuardError::io_error(io::Error::new(io::ErrorKind::NotFound, "not found")) {
        GuardError::Io { source } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
        other => panic!("Expected Io error, got {:?}", other),
    }

    match GuardError::config_error("Invalid config") {
        GuardError::Config { message } => assert_eq!(message, "Invalid config"),
        other => panic!("Expected Config error, got {:?}", other),
    }

    match GuardError::directory_traversal_error("/src", "loop detected") {
        GuardError::DirectoryTraversal { path, message } => {
            assert_eq!(path, PathBuf::from("/src"));
            assert_eq!(message, "loop detected");
        }
        other => panic!("Expected DirectoryTraversal error, got {:?}", other),
    }
}

#[test]
fn test_handle_error() {
    assert!(handle_error(GuardError::PermissionDenied {
        path: PathBuf::from("/test/path"),
    })
    .is_none());

    assert!(handle_error(GuardError::io_error(io::Error::new(
        io::ErrorKind::NotFound,
        "not found"
    )))
    .is_none());

    assert!(handle_error(GuardError::config_error("Invalid config")).is_some());
}

#[test]
fn test_from_conversions() {
    let err: GuardError = io::Error::new(io::ErrorKind::Other, "boom").into();
    assert!(matches!(err, GuardError::Io { .. }));

    let err: GuardError = glob::Pattern::new("[").unwrap_err().into();
    assert!(matches!(err, GuardError::GlobPattern { .. }));
    assert!(err.is_critical());
}
