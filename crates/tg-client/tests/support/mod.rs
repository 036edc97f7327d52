//! Scripted stand-in for the scoring/ledger service.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tg_client::HttpFraudApi;
use tg_config::ServiceConfig;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

/// Answers requests with the scripted `(status, body)` pairs, in order, then
/// stops listening.
pub struct MockService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: Option<JoinHandle<()>>,
}

impl MockService {
    pub fn start(script: Vec<(u16, &'static str)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock service");
        let addr = server.server_addr().to_ip().expect("ip listener");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        let handle = std::thread::spawn(move || {
            for (status, body) in script {
                let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(5)) else {
                    return;
                };
                let mut content = String::new();
                let _ = request.as_reader().read_to_string(&mut content);
                recorded.lock().unwrap().push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body: content,
                });
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
            handle: Some(handle),
        }
    }

    pub fn api(&self) -> HttpFraudApi {
        let config = ServiceConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            ..ServiceConfig::default()
        };
        HttpFraudApi::new(&config).expect("client builds")
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait for the script to finish and return everything received.
    pub fn finish(mut self) -> Vec<Recorded> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("mock service thread");
        }
        self.requests()
    }
}

/// An address nothing listens on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}
