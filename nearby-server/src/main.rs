use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nearby_server::nearby::NearbyConfig;
use nearby_server::routing::{RoutingClient, RoutingConfig};
use nearby_server::transit::{MbtaClient, TransitConfig};
use nearby_server::walk::WalkTimeEstimator;
use nearby_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials are read once here and held as immutable config for
    // the lifetime of the process. Both are optional: a missing transit
    // key tightens rate limits, a missing routing key disables the
    // routed walk path.
    let transit_key = std::env::var("MBTA_API_KEY").unwrap_or_else(|_| {
        warn!("MBTA_API_KEY not set; using unauthenticated rate limits");
        String::new()
    });
    let routing_key = std::env::var("ORS_API_KEY").unwrap_or_else(|_| {
        warn!("ORS_API_KEY not set; walk estimates will be heuristic only");
        String::new()
    });

    let transit_key_set = !transit_key.is_empty();

    let transit_config = TransitConfig::new(transit_key);
    let transit =
        MbtaClient::new(transit_config).expect("Failed to create transit client");

    let routing = if routing_key.is_empty() {
        None
    } else {
        let routing_config = RoutingConfig::new(routing_key);
        Some(RoutingClient::new(routing_config).expect("Failed to create routing client"))
    };
    let walker = WalkTimeEstimator::new(routing);

    let state = AppState::new(transit, walker, NearbyConfig::default(), transit_key_set);
    let app = create_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Nearby transit server listening on http://{addr}");
    info!("  GET /api/health - health check");
    info!("  GET /api/nearby?lat=..&lon=..[&radius=..] - stops with leave-by times");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
