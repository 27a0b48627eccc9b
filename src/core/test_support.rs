// In-process HTTP fixture server used by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct FixtureServer {
    base: String,
    routes: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    pub fn start() -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fixture server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("fixture server listens on tcp")
            .port();

        let routes: Arc<Mutex<HashMap<String, Vec<u8>>>> = Arc::default();
        let requests: Arc<Mutex<Vec<String>>> = Arc::default();

        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        std::thread::spawn(move || {
            for request in server.incoming_requests() {
                let raw = request.url().to_string();
                let path = raw.split('?').next().unwrap_or_default().to_string();
                thread_requests.lock().unwrap().push(raw);

                let body = thread_routes.lock().unwrap().get(&path).cloned();
                let response = match body {
                    Some(body) => tiny_http::Response::from_data(body),
                    None => tiny_http::Response::from_data(b"not found".to_vec())
                        .with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base: format!("http://127.0.0.1:{port}"),
            routes,
            requests,
        }
    }

    pub fn route(&self, path: &str, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), body.into());
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of requests whose path (query stripped) equals `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|raw| raw.split('?').next() == Some(path))
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn sha1_hex(bytes: &[u8]) -> String {
    use sha1::{Digest, Sha1};
    hex::encode(Sha1::digest(bytes))
}
