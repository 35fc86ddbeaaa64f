//! Router assembly and request logging.

use axum::extract::{ConnectInfo, Request};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;

use crate::handlers;
use greetcast_geo::{GeoClient, GeocodeClient};
use greetcast_weather::WeatherClient;

#[derive(Clone)]
pub struct AppState {
    pub geo: GeoClient,
    pub geocode: GeocodeClient,
    pub weather: WeatherClient,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api", get(handlers::hello).post(handlers::hello_post))
        .route("/api/hello", get(handlers::hello))
        .with_state(state)
        .layer(middleware::from_fn(trace_request))
}

/// One log line per request with the derived client address and the parsed
/// client signature.
async fn trace_request(req: Request, next: Next) -> Response {
    let client_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| crate::extract::client_ip(req.headers(), *peer))
        .unwrap_or_else(|| "unknown".to_string());

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let signature = greetcast_agent::parse(user_agent);

    tracing::info!(
        %client_ip,
        os = %signature.os,
        device = %signature.device,
        path = %req.uri().path(),
        "request received"
    );

    next.run(req).await
}
