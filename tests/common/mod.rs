//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use template_router::config::ServerConfig;
use template_router::lifecycle::Shutdown;
use template_router::{HttpServer, Router};

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, target: &str) -> String {
        format!("http://{}{}", self.addr, target)
    }

    /// Trigger graceful shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked");
        assert!(result.is_ok(), "server returned an error: {:?}", result);
    }
}

/// Start a server for `router` with `config`'s listener and timeout settings.
pub async fn start_server(config: ServerConfig, router: Router) -> TestServer {
    start(HttpServer::new(config, router)).await
}

/// Start a server for the static routes in `config`.
#[allow(dead_code)]
pub async fn start_config_server(config: ServerConfig) -> TestServer {
    start(HttpServer::from_config(config)).await
}

async fn start(server: HttpServer) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// HTTP client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
