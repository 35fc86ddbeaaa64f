use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use greetcast_core::Config;
use greetcast_geo::{GeoClient, GeocodeClient};
use greetcast_server::{build_router, AppState};
use greetcast_weather::WeatherClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env (if present)
    dotenvy::dotenv().ok();

    greetcast_core::init()?;

    let (config, _validation) = Config::load_validated()?;

    let state = AppState {
        geo: GeoClient::new(&config.providers.geoip_url)?,
        geocode: GeocodeClient::new(&config.providers.geocode_url)?,
        weather: WeatherClient::new(
            &config.providers.weather_url,
            config.providers.weather_api_key.clone(),
        )?,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    tracing::info!("listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
