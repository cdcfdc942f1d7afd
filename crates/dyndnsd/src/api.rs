//! HTTP surface: routes, dialect extraction, response rendering
//!
//! Two dialects share one engine. They differ only in which request fields
//! carry the address, secret, and hostname(s), and in how outcomes are
//! rendered:
//!
//! - `/update` is the JSON dialect: query parameters `addr`, `secret`,
//!   `domain`; responds with a structured JSON body
//! - `/nic/update`, `/v2/update`, `/v3/update` are the DynDNS-compatible
//!   dialect: query parameters `myip`, `hostname`, `password`; the secret is
//!   preferred from the Basic-Auth password; responds with the fixed token
//!   vocabulary routers expect
//!
//! The dialect is selected by route, never by branching inside shared
//! handler logic.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::prelude::*;
use serde::Serialize;

use dyndns_core::{Error, RawUpdate, UpdateEngine, UpdateOutcome};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<UpdateEngine>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/update", get(update))
        // DynDNS compatible handlers. Most routers will invoke /nic/update.
        .route("/nic/update", get(dyn_update))
        .route("/v2/update", get(dyn_update))
        .route("/v3/update", get(dyn_update))
        .with_state(state)
}

/// Wire format of the JSON dialect response
///
/// Field names are part of the wire contract; do not rename.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateResponse {
    pub success: bool,
    pub message: String,
    pub domains: Vec<String>,
    pub address: String,
    pub addr_type: String,
    pub arpa_addr: String,
    pub domain: String,
}

impl From<UpdateOutcome> for UpdateResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::Success { plan } => Self {
                success: true,
                message: plan.summary(),
                domains: plan.domains,
                address: plan.address,
                addr_type: plan.kind.record_type().to_string(),
                arpa_addr: plan.reverse_name,
                domain: plan.hostname_field,
            },
            UpdateOutcome::Failure(err) => Self {
                message: err.to_string(),
                ..Self::default()
            },
        }
    }
}

/// JSON dialect handler
async fn update(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let raw = RawUpdate {
        address: param(&params, "addr"),
        secret: param(&params, "secret"),
        hostnames: param(&params, "domain"),
    };

    let outcome = state.engine.process(raw).await;
    Json(UpdateResponse::from(outcome)).into_response()
}

/// DynDNS-compatible dialect handler
async fn dyn_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let secret = basic_auth_password(&headers)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| param(&params, "password"));

    let raw = RawUpdate {
        address: param(&params, "myip"),
        secret,
        hostnames: param(&params, "hostname"),
    };

    let outcome = state.engine.process(raw).await;

    // Routers parse only this fixed vocabulary; never append message text or
    // tool diagnostics here.
    let body = match &outcome {
        UpdateOutcome::Success { plan } => format!("good {}\n", plan.address),
        UpdateOutcome::Failure(Error::AuthenticationFailed) => "badauth\n".to_string(),
        UpdateOutcome::Failure(Error::DomainNotSet) => "notfqdn\n".to_string(),
        UpdateOutcome::Failure(_) => "dnserr\n".to_string(),
    };

    body.into_response()
}

fn param(params: &HashMap<String, String>, name: &str) -> String {
    params.get(name).cloned().unwrap_or_default()
}

/// Password from an HTTP Basic Authorization header, if one is present
fn basic_auth_password(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64_STANDARD.decode(encoded.trim()).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (_user, password) = credentials.split_once(':')?;
    Some(password.to_string())
}
