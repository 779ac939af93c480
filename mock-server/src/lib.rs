//! Mock HTTP API used by the core crate's integration tests.
//!
//! Two surfaces: `/echo` reflects the received verb and parameters back as
//! JSON (query string for GET, urlencoded form for POST), which lets tests
//! assert on exactly what the client put on the wire; `/profile` is a small
//! token-guarded typed endpoint for exercising implicit parameters and the
//! non-2xx error path.

use std::collections::HashMap;

use axum::{extract::Query, http::StatusCode, routing::get, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Query string or form body reflected back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub name: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Token accepted by `/profile`.
pub const VALID_TOKEN: &str = "sesame";

pub fn app() -> Router {
    Router::new()
        .route("/echo", get(echo_get).post(echo_post))
        .route("/profile", get(profile))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo_get(Query(params): Query<HashMap<String, String>>) -> Json<Echo> {
    Json(Echo {
        method: "GET".to_string(),
        params,
    })
}

async fn echo_post(Form(params): Form<HashMap<String, String>>) -> Json<Echo> {
    Json(Echo {
        method: "POST".to_string(),
        params,
    })
}

async fn profile(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Profile>, (StatusCode, Json<ApiError>)> {
    if params.get("access_token").map(String::as_str) != Some(VALID_TOKEN) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiError {
                error: "invalid access token".to_string(),
            }),
        ));
    }
    let user_id = params.get("user_id").cloned().unwrap_or_default();
    Ok(Json(Profile {
        name: format!("user-{user_id}"),
        user_id,
        api_version: params.get("v").cloned().unwrap_or_default(),
    }))
}
