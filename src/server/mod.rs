// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP front end for the policy handler.

use crate::config::Config;
use crate::constants::server::{
    HEALTH_PATH, MAX_BODY_BYTES, VALIDATE_PATH, VALIDATE_SETTINGS_PATH,
};
use crate::policy::PolicyHandler;
use anyhow::{Context, Result};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde::Serialize;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Bind to the configured address and serve until ctrl-c
pub async fn run(config: Config) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    let handler = Arc::new(PolicyHandler::new(config.default_settings));
    serve(listener, handler, shutdown_signal()).await
}

/// Accept connections on `listener` until `shutdown` completes
pub async fn serve(
    listener: TcpListener,
    handler: Arc<PolicyHandler>,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(shutdown);

    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    continue;
                }
            },
            () = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections");
                return Ok(());
            }
        };

        debug!("Accepted connection from {}", peer);
        let handler = handler.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let handler = handler.clone();
                async move { route(&handler, req).await }
            });
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                warn!("Connection from {} failed: {}", peer, e);
            }
        });
    }
}

/// Dispatch one request to the matching policy entry point
pub async fn route<B>(
    handler: &PolicyHandler,
    req: Request<B>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let (parts, body) = req.into_parts();

    let response = match (&parts.method, parts.uri.path()) {
        (&Method::GET, HEALTH_PATH) => text(StatusCode::OK, "ok"),
        (&Method::POST, VALIDATE_PATH) => match read_body(body).await {
            Ok(payload) => {
                let response = handler.validate(&payload);
                debug!(
                    "Validation result: accepted={}, mutated={}",
                    response.accepted,
                    response.is_mutation()
                );
                json(&response)
            }
            Err(response) => response,
        },
        (&Method::POST, VALIDATE_SETTINGS_PATH) => match read_body(body).await {
            Ok(payload) => json(&handler.validate_settings(&payload)),
            Err(response) => response,
        },
        (_, HEALTH_PATH | VALIDATE_PATH | VALIDATE_SETTINGS_PATH) => {
            text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        }
        (_, path) => {
            debug!("No route for {} {}", parts.method, path);
            text(StatusCode::NOT_FOUND, "not found")
        }
    };

    Ok(response)
}

/// Buffer at most `MAX_BODY_BYTES` of the request body
async fn read_body<B>(body: B) -> std::result::Result<Bytes, Response<Full<Bytes>>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    Limited::new(body, MAX_BODY_BYTES)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                text(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
            } else {
                text(StatusCode::BAD_REQUEST, e.to_string())
            }
        })
}

fn json<T: Serialize>(value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => respond(StatusCode::OK, "application/json", body.into()),
        Err(e) => text(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

fn text(status: StatusCode, body: impl Into<String>) -> Response<Full<Bytes>> {
    let body: String = body.into();
    respond(status, "text/plain; charset=utf-8", Bytes::from(body))
}

fn respond(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
}
