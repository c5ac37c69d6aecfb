//! In-process HTTP fixture for exercising the client against canned
//! responses. Speaks just enough HTTP/1.1 for reqwest: reads one
//! request per connection, drains the body, answers, closes.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen by the fixture
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Canned response returned by a test handler
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

pub fn json(status: u16, body: &str) -> Canned {
    Canned {
        status,
        body: body.to_string(),
    }
}

pub struct TestServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<SeenRequest>>>,
}

impl TestServer {
    /// Spawn a server; the handler gets each request plus how many times
    /// that path has been hit before.
    pub async fn spawn<F>(handler: F) -> TestServer
    where
        F: Fn(&SeenRequest, usize) -> Canned + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<SeenRequest>>> = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        let handler = Arc::new(handler);

        tokio::spawn(async move {
            loop {
                let Ok((mut sock, _)) = listener.accept().await else {
                    break;
                };
                let log = Arc::clone(&log);
                let handler = Arc::clone(&handler);

                tokio::spawn(async move {
                    if let Some(req) = read_request(&mut sock).await {
                        let nth = {
                            let mut log = log.lock();
                            let nth = log.iter().filter(|r| r.path == req.path).count();
                            log.push(req.clone());
                            nth
                        };
                        let canned = handler(&req, nth);
                        let _ = write_response(&mut sock, &canned).await;
                    }
                });
            }
        });

        TestServer {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests seen for `path`
    pub fn hits(&self, path: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.path == path).count()
    }
}

async fn read_request(sock: &mut TcpStream) -> Option<SeenRequest> {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];

    let header_end = loop {
        let n = sock.read(&mut tmp).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&tmp[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        if buf.len() > (1 << 20) {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_lowercase(), value.trim().to_string());
        }
    }

    // drain the body so the client never sees a reset mid-send
    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let mut body_read = buf.len() - header_end - 4;
    while body_read < content_length {
        let n = sock.read(&mut tmp).await.ok()?;
        if n == 0 {
            break;
        }
        body_read += n;
    }

    Some(SeenRequest {
        method,
        path,
        headers,
    })
}

async fn write_response(sock: &mut TcpStream, canned: &Canned) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        reason(canned.status),
        canned.body.len(),
        canned.body
    );
    sock.write_all(response.as_bytes()).await?;
    sock.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "OK",
    }
}
