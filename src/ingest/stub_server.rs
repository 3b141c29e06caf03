//! One-thread HTTP responder for client tests. Each route maps a request
//! path (query string ignored) to a status line and JSON body; unknown
//! paths get a 404.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

pub(crate) struct Route {
    pub path: &'static str,
    pub status: &'static str,
    pub body: String,
}

pub(crate) fn route(path: &'static str, status: &'static str, body: &str) -> Route {
    Route { path, status, body: body.to_string() }
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Starts the responder and returns its base URL, e.g. `http://127.0.0.1:40123`.
pub(crate) fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let request = read_request(&mut stream);
            let path = request
                .split_whitespace()
                .nth(1)
                .and_then(|target| target.split('?').next())
                .unwrap_or_default();

            let (status, body) = routes
                .iter()
                .find(|r| r.path == path)
                .map(|r| (r.status, r.body.as_str()))
                .unwrap_or(("404 Not Found", r#"{"cod":"404","message":"city not found"}"#));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}
