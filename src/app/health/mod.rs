use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "message": "Saatvik Yoga Email Service is running!" }))
}
