//! Request orchestration: resolve, refine, fetch, compose.
//!
//! Each step runs in sequence and each outbound failure is caught here and
//! converted into the matching payload; nothing propagates as a fault.

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use std::net::SocketAddr;

use crate::extract::client_ip;
use crate::greeting::GreetingResponse;
use crate::http::AppState;
use greetcast_geo::ResolvedLocation;

const DEFAULT_VISITOR: &str = "Guest";

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    pub visitor_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HelloBody {
    pub visitor_name: Option<String>,
    /// Caller-supplied precise location, echoed verbatim into the response.
    #[serde(rename = "preciseLocation")]
    pub precise_location: Option<String>,
}

/// `GET /api` and `GET /api/hello`
pub async fn hello(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Query(query): Query<HelloQuery>,
) -> (StatusCode, Json<GreetingResponse>) {
    let visitor_name = query
        .visitor_name
        .unwrap_or_else(|| DEFAULT_VISITOR.to_string());
    greet(&state, &headers, peer, &visitor_name, None).await
}

/// `POST /api`
pub async fn hello_post(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<HelloBody>,
) -> (StatusCode, Json<GreetingResponse>) {
    let visitor_name = body
        .visitor_name
        .unwrap_or_else(|| DEFAULT_VISITOR.to_string());
    greet(&state, &headers, peer, &visitor_name, body.precise_location).await
}

/// The pipeline behind every greeting route. `provided_precise` short-circuits
/// the reverse-geocoding call when the caller supplied their own location.
async fn greet(
    state: &AppState,
    headers: &HeaderMap,
    peer: SocketAddr,
    visitor_name: &str,
    provided_precise: Option<String>,
) -> (StatusCode, Json<GreetingResponse>) {
    let client_ip = client_ip(headers, peer);

    let location = match state.geo.resolve(&client_ip).await {
        ResolvedLocation::Resolved(location) => location,
        sentinel => {
            return (
                StatusCode::NOT_FOUND,
                Json(GreetingResponse::location_unavailable(
                    client_ip,
                    sentinel,
                    visitor_name,
                )),
            );
        }
    };

    let precise_location = match provided_precise {
        Some(address) => Some(address),
        None => match (location.latitude, location.longitude) {
            (Some(latitude), Some(longitude)) => {
                state.geocode.reverse(latitude, longitude).await
            }
            _ => None,
        },
    };

    let temperature = match state.weather.current_temperature(&location.city).await {
        Ok(reading) => reading,
        Err(e) => {
            tracing::warn!("Temperature lookup failed for {}: {}", location.city, e);
            return (
                StatusCode::NOT_FOUND,
                Json(GreetingResponse::weather_unavailable(
                    client_ip,
                    location,
                    precise_location,
                    visitor_name,
                )),
            );
        }
    };

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let device_details = greetcast_agent::parse(user_agent);

    (
        StatusCode::OK,
        Json(GreetingResponse::success(
            client_ip,
            location,
            precise_location,
            temperature,
            device_details,
            visitor_name,
        )),
    )
}
