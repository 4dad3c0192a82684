//! HttpProbe and LinkTracker against a local HTTP server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use tiny_http::{Header, Method, Response, Server, StatusCode};

use super::*;
use crate::config::LinksConfig;

/// Serves `/`, `/about` and `/old` (redirect to `/about`); everything else 404.
struct TestServer {
    server: Arc<Server>,
    port: u16,
    heads: Arc<AtomicUsize>,
}

impl TestServer {
    fn start() -> Self {
        let server = Arc::new(Server::http("127.0.0.1:0").unwrap());
        let port = server.server_addr().to_ip().unwrap().port();
        let heads = Arc::new(AtomicUsize::new(0));

        thread::spawn({
            let server = server.clone();
            let heads = heads.clone();
            move || {
                for request in server.incoming_requests() {
                    if *request.method() == Method::Head {
                        heads.fetch_add(1, Ordering::SeqCst);
                    }
                    let response = match request.url() {
                        "/" | "/about" => Response::empty(StatusCode(200)),
                        "/old" => Response::empty(StatusCode(301)).with_header(
                            Header::from_bytes("Location", "/about").unwrap(),
                        ),
                        "/error" => Response::empty(StatusCode(500)),
                        _ => Response::empty(StatusCode(404)),
                    };
                    let _ = request.respond(response);
                }
            }
        });

        Self { server, port, heads }
    }

    fn config(&self) -> LinksConfig {
        LinksConfig {
            enable: true,
            site_url: format!("http://127.0.0.1:{}", self.port),
            timeout: 5,
            concurrency: 4,
        }
    }

    fn heads(&self) -> usize {
        self.heads.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

#[tokio::test]
async fn test_http_probe_status() {
    let server = TestServer::start();
    let probe = HttpProbe::new(&server.config()).unwrap();

    assert!(probe.probe("/about").await.is_ok());
    assert!(probe.probe("/old").await.is_ok());

    let failure = probe.probe("/blog/missing-post").await.unwrap_err();
    assert_eq!(failure.status_code, 404);

    let failure = probe.probe("/error").await.unwrap_err();
    assert_eq!(failure.status_code, 500);
}

#[tokio::test]
async fn test_http_probe_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let server = Server::http("127.0.0.1:0").unwrap();
        server.server_addr().to_ip().unwrap().port()
    };
    let config = LinksConfig {
        site_url: format!("http://127.0.0.1:{port}"),
        timeout: 2,
        ..Default::default()
    };
    let probe = HttpProbe::new(&config).unwrap();

    let failure = probe.probe("/about").await.unwrap_err();
    assert_eq!(failure.status_code, 0);
}

#[tokio::test]
async fn test_tracker_end_to_end() {
    let server = TestServer::start();
    let tracker = LinkTracker::from_config(&server.config()).unwrap();
    assert!(tracker.is_enabled());

    let outcome = tracker
        .check_urls(
            [
                "/about",
                "/blog/missing-post",
                "/assets/site.css",
                "https://example.com/",
                "#top",
            ],
            "/index",
        )
        .await;
    assert_eq!(outcome.broken_urls, vec!["/blog/missing-post"]);
    assert_eq!(outcome.valid_urls.len(), 4);

    assert!(!tracker.check_url("/blog/missing-post", "/archive").await);
    assert_eq!(server.heads(), 2);

    let broken = tracker.broken_links();
    assert_eq!(broken.len(), 1);
    assert_eq!(broken[0].status_code, 404);
    assert_eq!(broken[0].found_on, vec!["/index", "/archive"]);
}

#[tokio::test]
async fn test_tracker_from_config_respects_enable() {
    let server = TestServer::start();
    let config = LinksConfig {
        enable: false,
        ..server.config()
    };
    let tracker = LinkTracker::from_config(&config).unwrap();

    assert!(tracker.check_url("/blog/missing-post", "/index").await);
    assert_eq!(server.heads(), 0);
}
