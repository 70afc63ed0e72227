//! Minimal HTTP/1.1 server that records POST bodies for integration tests.
//!
//! Each connection serves one request and is closed. The response status for
//! the n-th request (0-based) comes from `statuses[n]`, defaulting to 200.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
    pub received_at: Instant,
}

#[derive(Clone)]
pub struct CaptureServer {
    pub url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CaptureServer {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server that answers 200 to every request.
pub fn start() -> CaptureServer {
    start_with_statuses(Vec::new())
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start_with_statuses(statuses: Vec<u32>) -> CaptureServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream, &shared, &statuses);
        }
    });
    CaptureServer {
        url: format!("http://127.0.0.1:{}/submit", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, requests: &Mutex<Vec<CapturedRequest>>, statuses: &[u32]) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    let header_end = loop {
        if let Some(pos) = find_header_end(&data) {
            break pos;
        }
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }

    let body_start = header_end + 4;
    while data.len() < body_start + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    let body_end = (body_start + content_length).min(data.len());
    let body = String::from_utf8_lossy(&data[body_start..body_end]).into_owned();

    let index = {
        let mut guard = requests.lock().unwrap();
        guard.push(CapturedRequest {
            method,
            path,
            content_type,
            body,
            received_at: Instant::now(),
        });
        guard.len() - 1
    };

    let status = statuses.get(index).copied().unwrap_or(200);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status,
        reason(status)
    );
    let _ = stream.write_all(response.as_bytes());
}

fn find_header_end(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
