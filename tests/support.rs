//! Common test support utilities and fixtures
//!
//! Recording doubles for the injected capabilities (writer, logger, sleeper,
//! analytics client), a minimal HTTP responder and a CLI runner.

#![allow(dead_code)]

use async_trait::async_trait;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stepkit::analytics::Client;
use stepkit::log::{Level, Logger, Producer};
use stepkit::utils::Sleeper;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// In-memory writer whose clones share one buffer
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).expect("Buffer is not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One record captured by [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub producer: Producer,
    pub level: Level,
    pub message: String,
}

/// Logger that keeps every record, debug included
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .map(|record| record.message)
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, producer: Producer, level: Level, message: &str) {
        self.records.lock().unwrap().push(Record {
            producer,
            level,
            message: message.to_string(),
        });
    }
}

/// Sleeper that records the requested durations without pausing
#[derive(Default)]
pub struct RecordingSleeper {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.calls.lock().unwrap().push(duration);
    }
}

/// Sleeper pausing for a fixed short time, whatever duration is asked for
pub struct ShortSleeper(pub Duration);

impl Sleeper for ShortSleeper {
    fn sleep(&self, _duration: Duration) {
        std::thread::sleep(self.0);
    }
}

pub fn short_sleeper() -> Arc<dyn Sleeper> {
    Arc::new(ShortSleeper(Duration::from_millis(1)))
}

/// Analytics client that keeps every body it is handed
#[derive(Default)]
pub struct RecordingClient {
    bodies: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<serde_json::Value> {
        self.bodies()
            .iter()
            .map(|body| serde_json::from_str(body).expect("Body is not JSON"))
            .collect()
    }
}

#[async_trait]
impl Client for RecordingClient {
    async fn send(&self, body: String) {
        self.bodies.lock().unwrap().push(body);
    }
}

/// Local HTTP endpoint answering every request with one status code
pub struct StatusServer {
    pub url: String,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl StatusServer {
    pub async fn start(status: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let url = format!("http://{}/track", listener.local_addr().unwrap());
        let bodies = Arc::new(Mutex::new(Vec::new()));

        let received = Arc::clone(&bodies);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let received = Arc::clone(&received);
                tokio::spawn(async move {
                    if let Some(body) = read_request(&mut stream).await {
                        received.lock().unwrap().push(body);
                    }
                    let response = format!(
                        "HTTP/1.1 {} Test\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                        status
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Self { url, bodies }
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        data.extend_from_slice(&chunk[..read]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
    let length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..read]);
    }

    Some(String::from_utf8_lossy(&data[header_end..]).to_string())
}

/// URL of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/track", addr)
}

/// Result of running a CLI command
#[derive(Debug)]
pub struct CliOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// A temporary directory holding a config file
pub struct Workspace {
    pub root: TempDir,
    pub config_path: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join("stepkit.yaml");
        Self { root, config_path }
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(&self.config_path, yaml).expect("Failed to write config");
    }

    pub fn config_str(&self) -> &str {
        self.config_path.to_str().expect("Config path not UTF-8")
    }
}

/// Run the stepkit CLI with the given arguments
pub fn run_cli(args: &[&str]) -> CliOutput {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .env_remove("STEPKIT_DEBUG")
        .output()
        .expect("Failed to execute cargo run");

    CliOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
