//! Fake Open Brewery DB upstream for integration tests.
//!
//! Serves one canned reply for every path and records each request URI so
//! tests can assert on the exact path and query string that were sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use brewery_mcp::services::brewery_api::BreweryApiClient;

/// What the fake upstream answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(StatusCode),
    RawBody(&'static str),
}

#[derive(Clone)]
struct Shared {
    reply: Reply,
    requests: Arc<Mutex<Vec<Uri>>>,
}

pub struct FakeUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Uri>>>,
    handle: JoinHandle<()>,
}

impl FakeUpstream {
    pub async fn start(reply: Reply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shared = Shared {
            reply,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(respond).with_state(shared);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().expect("Fake upstream has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake upstream crashed");
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    pub async fn json(body: Value) -> Self {
        Self::start(Reply::Json(body)).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/breweries", self.addr)
    }

    pub fn client(&self) -> BreweryApiClient {
        BreweryApiClient::new(&self.base_url()).expect("Failed to build client")
    }

    /// Every request URI seen so far, in arrival order.
    pub fn requests(&self) -> Vec<Uri> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Uri {
        self.requests()
            .pop()
            .expect("Fake upstream received no requests")
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(State(shared): State<Shared>, uri: Uri) -> Response {
    shared.requests.lock().unwrap().push(uri);
    match shared.reply {
        Reply::Json(body) => Json(body).into_response(),
        Reply::Status(status) => status.into_response(),
        Reply::RawBody(body) => {
            ([(header::CONTENT_TYPE, "application/json")], body).into_response()
        }
    }
}

/// Upstream that answers every connection with a hand-written HTTP/1.1 status line.
///
/// axum always sends canonical reason phrases, so custom ones need a raw socket.
pub async fn raw_status_upstream(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind raw upstream");
    let addr = listener.local_addr().expect("Raw upstream has no address");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let mut seen = Vec::new();
            while !seen.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => seen.extend_from_slice(&buf[..n]),
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    addr
}

/// Minimal valid upstream brewery object.
pub fn brewery_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "brewery_type": "micro",
        "country": "US"
    })
}

/// A realistic upstream record with every field populated.
pub fn full_brewery_json() -> Value {
    json!({
        "id": "b54b16e1-ac3b-4bff-a11f-f7ae9ddc27e0",
        "name": "MadTree Brewing 2.0",
        "brewery_type": "regional",
        "address_1": "5164 Kennedy Ave",
        "address_2": null,
        "address_3": null,
        "city": "Cincinnati",
        "state_province": "Ohio",
        "postal_code": "45213",
        "country": "United States",
        "longitude": -84.4137736,
        "latitude": 39.1885752,
        "phone": "5138368733",
        "website_url": "http://www.madtreebrewing.com",
        "state": "Ohio",
        "street": "5164 Kennedy Ave"
    })
}
