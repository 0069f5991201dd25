//! Minimal HTTP/1.1 server that plays a CDN for integration tests.
//!
//! Routes are matched on the request path (query ignored). Unknown paths get
//! 404. Every request line and User-Agent is recorded for assertions.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(content_type: Option<&'static str>, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type,
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recorded {
    /// Request targets including the query string, in arrival order.
    pub targets: Vec<String>,
    pub user_agents: Vec<String>,
}

pub struct AssetServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl AssetServer {
    pub fn targets(&self) -> Vec<String> {
        self.recorded.lock().unwrap().targets.clone()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.recorded.lock().unwrap().user_agents.clone()
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: HashMap<String, Route>) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    let rec = Arc::clone(&recorded);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let rec = Arc::clone(&rec);
            thread::spawn(move || handle(stream, &routes, &rec));
        }
    });
    AssetServer {
        base_url: format!("http://127.0.0.1:{}", port),
        recorded,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Recorded>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let (target, user_agent) = parse_request(request);
    {
        let mut rec = recorded.lock().unwrap();
        rec.targets.push(target.to_string());
        rec.user_agents.push(user_agent.to_string());
    }

    let path = target.split('?').next().unwrap_or("");
    let not_found = Route::status(404);
    let route = routes.get(path).unwrap_or(&not_found);
    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let content_type = route
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
        route.status,
        reason,
        route.body.len(),
        content_type
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
}

/// Returns (request target, User-Agent value).
fn parse_request(request: &str) -> (&str, &str) {
    let mut target = "";
    let mut user_agent = "";
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if i == 0 {
            target = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                user_agent = value.trim();
            }
        }
    }
    (target, user_agent)
}
