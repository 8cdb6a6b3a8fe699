// Shared test helpers for integration tests.
// Used by cli_contract.rs and cli_flows.rs.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_nota"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Output of one binary run.
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: i32,
}

/// A throwaway home directory, optionally holding a `.nota.json`.
pub struct Home {
    dir: TempDir,
}

impl Home {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp home"),
        }
    }

    pub fn with_config(config_content: &str) -> Self {
        let home = Self::empty();
        std::fs::write(home.dir.path().join(".nota.json"), config_content)
            .expect("failed to write config");
        home
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}

pub fn run_nota(home: &Home, stdin_input: &[u8]) -> RunOutput {
    run_nota_args(home, stdin_input, &[])
}

/// Runs the binary with HOME pointed at `home`, feeding `stdin_input`.
pub fn run_nota_args(home: &Home, stdin_input: &[u8], extra_args: &[&str]) -> RunOutput {
    let mut cmd = Command::new(binary_path());
    cmd.args(extra_args)
        .env("HOME", home.path())
        .env_remove("RUST_LOG");
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    let output = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            let write_result = child.stdin.take().unwrap().write_all(stdin_input);
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    RunOutput {
        stdout: output.stdout,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// The request a fake webhook received.
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("webhook body should be valid JSON")
    }
}

/// A one-shot HTTP endpoint on loopback that records the first request.
pub struct FakeWebhook {
    pub url: String,
    handle: JoinHandle<Option<CapturedRequest>>,
}

impl FakeWebhook {
    pub fn spawn(status_line: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind fake webhook");
        let url = format!("http://{}/api/webhooks/test", listener.local_addr().unwrap());
        let handle = thread::spawn(move || serve_once(listener, status_line));
        Self { url, handle }
    }

    /// Wait for the captured request. Only call when a request is expected.
    pub fn request(self) -> CapturedRequest {
        self.handle
            .join()
            .expect("fake webhook thread panicked")
            .expect("fake webhook received no well-formed request")
    }
}

fn serve_once(listener: TcpListener, status_line: &str) -> Option<CapturedRequest> {
    let (mut stream, _) = listener.accept().ok()?;
    stream.set_read_timeout(Some(Duration::from_secs(10))).ok()?;
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let (name, value) = (name.trim().to_string(), value.trim().to_string());
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().ok()?;
            }
            headers.push((name, value));
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    let response = format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
    stream.write_all(response.as_bytes()).ok()?;

    Some(CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body,
    })
}

/// A listener nobody should connect to; lets a test prove no network call happened.
pub struct Tripwire {
    listener: TcpListener,
    pub url: String,
    pub port: u16,
}

impl Tripwire {
    pub fn new() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind tripwire");
        let port = listener.local_addr().unwrap().port();
        Self {
            url: format!("http://127.0.0.1:{port}/hook"),
            listener,
            port,
        }
    }

    pub fn was_touched(&self) -> bool {
        self.listener
            .set_nonblocking(true)
            .expect("failed to set nonblocking");
        match self.listener.accept() {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => panic!("tripwire accept failed: {e}"),
        }
    }
}

/// A loopback port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub fn discord_config(webhook: &str) -> String {
    serde_json::json!({"type": "discord", "webhook": webhook}).to_string()
}

pub fn gmail_config(host: &str, port: u16) -> String {
    serde_json::json!({
        "type": "gmail",
        "email": {
            "from": "me@example.com",
            "password": "secret",
            "to": "you@example.com",
            "host": host,
            "port": port
        }
    })
    .to_string()
}
