use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use common_jamf::JamfClient;
use tower_http::trace::TraceLayer;

use crate::api::endpoint;

#[derive(Clone)]
pub struct State {
    pub jamf_client: Arc<dyn JamfClient + Send + Sync>,
}

pub fn router(jamf_client: Arc<dyn JamfClient + Send + Sync>) -> Router {
    let state = State { jamf_client };

    let status_router = Router::new()
        .route("/", get(index))
        .route("/_liveness", get(liveness));

    let shards_router = Router::new().route("/shards", post(endpoint::shards));

    Router::new()
        .merge(status_router)
        .merge(shards_router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn liveness() -> &'static str {
    "ok"
}

pub async fn index() -> &'static str {
    "guid sharder"
}
