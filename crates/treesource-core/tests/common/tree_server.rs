//! Minimal HTTP/1.1 tree server for integration tests.
//!
//! Serves fixed bodies by request path. Unknown paths get 500, like the
//! reference tree server does on lookup errors. Every request's header
//! lines are recorded so tests can assert on what was sent.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub struct TreeServerBuilder {
    routes: HashMap<String, (u16, Vec<u8>)>,
}

impl TreeServerBuilder {
    /// Directory listing: `[{"name":..,"isDir":..}]`.
    pub fn dir(self, path: &str, entries: &[(&str, bool)]) -> Self {
        let items: Vec<String> = entries
            .iter()
            .map(|(name, is_dir)| format!(r#"{{"name":"{}","isDir":{}}}"#, name, is_dir))
            .collect();
        self.raw(path, 200, format!("[{}]", items.join(",")))
    }

    pub fn file(self, path: &str, content: &str) -> Self {
        self.raw(path, 200, content)
    }

    pub fn raw(mut self, path: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(path.to_string(), (status, body.into()));
        self
    }

    /// Starts serving in a background thread until the process exits.
    pub fn start(self) -> TreeServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        TreeServer {
            base_url: format!("http://127.0.0.1:{}/", port),
            requests,
        }
    }
}

pub struct TreeServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TreeServer {
    pub fn builder() -> TreeServerBuilder {
        TreeServerBuilder::default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, (u16, Vec<u8>)>,
    log: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(text) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let request = parse_request(text);
    let (status, body) = routes
        .get(&request.path)
        .cloned()
        .unwrap_or((500, b"no such node".to_vec()));
    log.lock().unwrap().push(request);

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&body);
}

fn parse_request(text: &str) -> RecordedRequest {
    let mut lines = text.lines();
    let path = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let headers = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();
    RecordedRequest { path, headers }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// Accepts connections and never answers; each stream is held open until the
/// process exits. Returns the base URL.
pub fn start_stalled() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}/", port)
}
