//! Minimal HTTP/1.1 server that supports Range GET for integration tests.
//!
//! Serves a single static body for every path. Responds to GET with Range
//! with 206 Partial Content (or 416 when the start is past the end), and can
//! inject failures: a fixed status, failing first requests, a truncated first
//! body, or a stalled first response. Every GET is recorded.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, GET ignores Range and always returns 200 with the full body.
    pub support_ranges: bool,
    /// Answer every GET with this status and a small text body.
    pub status_override: Option<u16>,
    /// Answer the first N GETs with 500.
    pub fail_first: usize,
    /// Send only this many body bytes on the first successful GET, then close.
    pub truncate_first: Option<usize>,
    /// Sleep this long before answering the first GET.
    pub stall_first: Option<Duration>,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            support_ranges: true,
            status_override: None,
            fail_first: 0,
            truncate_first: None,
            stall_first: None,
        }
    }
}

/// One recorded GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub path: String,
    /// Parsed `Range: bytes=start-end`; end is `None` when open-ended.
    pub range: Option<(u64, Option<u64>)>,
}

#[derive(Clone)]
pub struct RangeServer {
    /// e.g. "http://127.0.0.1:12345/img"
    pub base_url: String,
    requests: Arc<Mutex<Vec<RequestRecord>>>,
}

impl RangeServer {
    pub fn requests(&self) -> Vec<RequestRecord> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

struct Shared {
    body: Vec<u8>,
    opts: RangeServerOptions,
    gets: AtomicUsize,
    successes: AtomicUsize,
    requests: Arc<Mutex<Vec<RequestRecord>>>,
}

/// Starts a server in a background thread serving `body`. The server runs until the process exits.
pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

/// Like `start` but allows injecting failures.
pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let shared = Arc::new(Shared {
        body,
        opts,
        gets: AtomicUsize::new(0),
        successes: AtomicUsize::new(0),
        requests: Arc::clone(&requests),
    });
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let shared = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &shared));
        }
    });
    RangeServer {
        base_url: format!("http://127.0.0.1:{}/img", port),
        requests,
    }
}

fn write_status(stream: &mut std::net::TcpStream, code: u16, reason: &str) {
    let body = format!("{} {}\n", code, reason);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        code,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn handle(mut stream: std::net::TcpStream, shared: &Shared) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path, range) = parse_request(request);
    if !method.eq_ignore_ascii_case("GET") {
        write_status(&mut stream, 405, "Method Not Allowed");
        return;
    }

    shared.requests.lock().unwrap().push(RequestRecord {
        path: path.to_string(),
        range,
    });
    let nth_get = shared.gets.fetch_add(1, Ordering::SeqCst);
    let opts = shared.opts;

    if nth_get == 0 {
        if let Some(stall) = opts.stall_first {
            thread::sleep(stall);
        }
    }
    if let Some(code) = opts.status_override {
        write_status(&mut stream, code, "Injected");
        return;
    }
    if nth_get < opts.fail_first {
        write_status(&mut stream, 500, "Internal Server Error");
        return;
    }

    let body = &shared.body;
    let total = body.len() as u64;
    let (status, content_range, slice) = match range.filter(|_| opts.support_ranges) {
        Some((start, end)) => {
            let end_incl = end.unwrap_or(u64::MAX).min(total.saturating_sub(1));
            if total == 0 || start > end_incl {
                let response = format!(
                    "HTTP/1.1 416 Range Not Satisfiable\r\nContent-Range: bytes */{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    total
                );
                let _ = stream.write_all(response.as_bytes());
                return;
            }
            let slice = &body[start as usize..=end_incl as usize];
            (
                "206 Partial Content",
                format!("bytes {}-{}/{}", start, end_incl, total),
                slice,
            )
        }
        None => (
            "200 OK",
            format!("bytes 0-{}/{}", total.saturating_sub(1), total),
            &body[..],
        ),
    };

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nContent-Range: {}\r\nAccept-Ranges: bytes\r\nConnection: close\r\n\r\n",
        status,
        slice.len(),
        content_range
    );
    let _ = stream.write_all(response.as_bytes());

    let nth_success = shared.successes.fetch_add(1, Ordering::SeqCst);
    match opts.truncate_first {
        Some(cut) if nth_success == 0 => {
            let _ = stream.write_all(&slice[..cut.min(slice.len())]);
            let _ = stream.flush();
            // Dropping the stream closes the connection short of Content-Length.
        }
        _ => {
            let _ = stream.write_all(slice);
        }
    }
}

/// Returns (method, path, optional range) for `Range: bytes=X-[Y]`.
fn parse_request(request: &str) -> (&str, &str, Option<(u64, Option<u64>)>) {
    let mut method = "";
    let mut path = "";
    let mut range = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            let mut parts = line.split_whitespace();
            method = parts.next().unwrap_or("");
            path = parts.next().unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                let value = value.trim();
                if value.to_lowercase().starts_with("bytes=") {
                    let part = value[6..].trim();
                    if let Some((a, b)) = part.split_once('-') {
                        let start = a.trim().parse::<u64>().unwrap_or(0);
                        let end = b.trim();
                        let end = if end.is_empty() {
                            None
                        } else {
                            end.parse::<u64>().ok()
                        };
                        range = Some((start, end));
                    }
                }
            }
        }
    }
    (method, path, range)
}
