//! Local axum server standing in for the open data endpoints

use axum::http::{header, StatusCode};
use axum::routing::{get, MethodRouter};
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts requests served by one route
#[derive(Clone, Default)]
pub struct HitCounter(Arc<AtomicUsize>);

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// GET route answering with a fixed status and JSON body
pub fn json_route(counter: HitCounter, status: StatusCode, body: &str) -> MethodRouter {
    let body = body.to_string();
    get(move || {
        let counter = counter.clone();
        let body = body.clone();
        async move {
            counter.0.fetch_add(1, Ordering::SeqCst);
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }
    })
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}
