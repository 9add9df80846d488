//! Shared test utilities: a local mock of the HackenProof programs API

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tiny_http::{Header, Response, Server};

/// A request the mock received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    pub fn is_listing(&self) -> bool {
        self.url.starts_with("/programs-api/programs?")
    }

    pub fn listing_page(&self) -> Option<u32> {
        listing_page(&self.url)
    }

    pub fn detail_slug(&self) -> Option<&str> {
        self.url.strip_prefix("/programs-api/programs/")
    }
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

/// Canned responses. Listing pages without a route return an empty page;
/// details without a route return 404.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    listings: HashMap<u32, Reply>,
    details: HashMap<String, Reply>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing(self, page: u32, slugs: &[&str]) -> Self {
        let programs: Vec<_> = slugs
            .iter()
            .map(|slug| serde_json::json!({ "slug": slug, "title": format!("{} program", slug) }))
            .collect();
        let body = serde_json::json!({ "programs": programs, "page": page });
        self.listing_raw(page, 200, &body.to_string())
    }

    pub fn listing_raw(mut self, page: u32, status: u16, body: &str) -> Self {
        self.listings.insert(
            page,
            Reply {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub fn detail(self, slug: &str, detail: serde_json::Value) -> Self {
        self.detail_raw(slug, 200, &detail.to_string())
    }

    pub fn detail_raw(mut self, slug: &str, status: u16, body: &str) -> Self {
        self.details.insert(
            slug.to_string(),
            Reply {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    fn reply(&self, url: &str) -> Reply {
        if let Some(page) = listing_page(url) {
            return self.listings.get(&page).cloned().unwrap_or(Reply {
                status: 200,
                body: r#"{"programs":[]}"#.to_string(),
            });
        }
        if let Some(slug) = url.strip_prefix("/programs-api/programs/") {
            if let Some(reply) = self.details.get(slug) {
                return reply.clone();
            }
        }
        Reply {
            status: 404,
            body: r#"{"error":"not_found"}"#.to_string(),
        }
    }
}

fn listing_page(url: &str) -> Option<u32> {
    let query = url.strip_prefix("/programs-api/programs?")?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("page="))
        .and_then(|v| v.parse().ok())
}

/// Mock platform served on an ephemeral localhost port
pub struct MockPlatform {
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    base_url: String,
}

impl MockPlatform {
    pub fn start(routes: Routes) -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("Failed to start mock server"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("Mock server has no IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let user_agent = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("User-Agent"))
                        .map(|h| h.value.as_str().to_string());
                    let url = request.url().to_string();
                    let reply = routes.reply(&url);

                    requests
                        .lock()
                        .unwrap()
                        .push(RecordedRequest { url, user_agent });

                    let content_type =
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                    let response = Response::from_string(reply.body)
                        .with_status_code(reply.status)
                        .with_header(content_type);
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            handle: Some(handle),
            requests,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Compact request log: "list:1", "detail:alpha", ...
    pub fn request_log(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| match (r.listing_page(), r.detail_slug()) {
                (Some(page), _) => format!("list:{}", page),
                (None, Some(slug)) => format!("detail:{}", slug),
                _ => r.url.clone(),
            })
            .collect()
    }
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe socket");
    let addr = listener.local_addr().expect("Probe socket has no address");
    drop(listener);
    format!("http://{}", addr)
}
