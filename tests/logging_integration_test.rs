// Integration tests for the diagnostic log sink.
// The sink installs a thread-local default subscriber, so each test owns its
// own sink and they can run in parallel.

use docker_credential_vault::cli::commands::get;
use docker_credential_vault::cli::handle_error;
use docker_credential_vault::infrastructure::vault::MockSecretStore;
use docker_credential_vault::{CredentialService, LogConfig, LogFormat, LogSink};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tempfile::TempDir;
use tracing::info;

fn file_config(dir: &Path, format: LogFormat) -> LogConfig {
    LogConfig {
        level: "debug".to_string(),
        format,
        log_dir: Some(dir.to_path_buf()),
        file_name: "vault-creds.log".to_string(),
    }
}

#[test]
fn test_sink_writes_and_flushes_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(temp_dir.path(), LogFormat::Text);

    {
        let sink = LogSink::open(&config).unwrap();
        assert!(sink.is_enabled());
        info!("Test message 1");
        info!(key = "value", "Test message with fields");
    }

    let contents = fs::read_to_string(temp_dir.path().join("vault-creds.log")).unwrap();
    assert!(contents.contains("Test message 1"), "Log should contain basic message");
    assert!(contents.contains("key=\"value\"") || contents.contains("key=value"));
    assert!(contents.contains("INFO"), "Lines should be level-tagged");
}

#[test]
fn test_sink_appends_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(temp_dir.path(), LogFormat::Text);

    {
        let _sink = LogSink::open(&config).unwrap();
        info!("first invocation");
    }
    {
        let _sink = LogSink::open(&config).unwrap();
        info!("second invocation");
    }

    let contents = fs::read_to_string(temp_dir.path().join("vault-creds.log")).unwrap();
    assert!(contents.contains("first invocation"));
    assert!(contents.contains("second invocation"));
}

#[test]
fn test_json_format() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(temp_dir.path(), LogFormat::Json);

    {
        let _sink = LogSink::open(&config).unwrap();
        info!(attempt = 1, "json line");
    }

    let contents = fs::read_to_string(temp_dir.path().join("vault-creds.log")).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("json line"))
        .expect("json line should be logged");
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["fields"]["attempt"], 1);
}

#[test]
fn test_lookup_logs_input_and_key_and_hides_secret() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(temp_dir.path(), LogFormat::Text);

    let store = MockSecretStore::new().with_secret(
        "secret/cmVnaXN0cnkuZXhhbXBsZS5jb20=",
        serde_json::json!({"serverurl": "registry.example.com", "username": "bot", "password": "s3cr3t"}),
    );

    {
        let _sink = LogSink::open(&config).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let service = CredentialService::new(store);

        runtime.block_on(async {
            service.get(b"registry.example.com\n").await.unwrap();
            service.get(b"unknown.example.com\n").await.unwrap_err();
        });
    }

    let contents = fs::read_to_string(temp_dir.path().join("vault-creds.log")).unwrap();
    assert!(contents.contains("registry.example.com"));
    assert!(contents.contains("cmVnaXN0cnkuZXhhbXBsZS5jb20="));
    assert!(contents.contains("unknown.example.com"));
    assert!(contents.contains("dW5rbm93bi5leGFtcGxlLmNvbQ=="));
    assert!(!contents.contains("s3cr3t"), "Secrets must not reach the log");
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_closed_stdout_is_logged() {
    let temp_dir = TempDir::new().unwrap();
    let config = file_config(temp_dir.path(), LogFormat::Text);

    let store = MockSecretStore::new().with_secret(
        "secret/cmVnaXN0cnkuZXhhbXBsZS5jb20=",
        serde_json::json!({"serverurl": "registry.example.com", "username": "bot", "password": "s3cr3t"}),
    );

    {
        let _sink = LogSink::open(&config).unwrap();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let service = CredentialService::new(store);

        let err = runtime
            .block_on(get::respond(&service, b"registry.example.com\n", ClosedPipe))
            .unwrap_err();
        assert_eq!(handle_error(&err, false), ExitCode::SUCCESS);
    }

    let contents = fs::read_to_string(temp_dir.path().join("vault-creds.log")).unwrap();
    assert!(contents.contains("OutputWriteError"));
    assert!(contents.contains("ERROR"));
}

#[test]
fn test_disabled_sink_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();

    {
        let sink = LogSink::disabled();
        assert!(!sink.is_enabled());
        info!("dropped");
    }

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
