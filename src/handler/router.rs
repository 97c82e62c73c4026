//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: exact path lookup in a fixed
//! route table, method check, dispatch, and the error boundary that turns
//! handler failures into opaque 500s.

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::missions;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Behaviors reachable through the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Message,
    Random,
    AddMission,
    ListMissions,
}

/// Which methods a route accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedMethods {
    Any,
    Only(Method),
}

/// One row of the route table
#[derive(Debug)]
pub struct RouteEntry {
    pub path: &'static str,
    pub methods: AllowedMethods,
    pub route: Route,
}

/// Exact, case-sensitive paths; anything else is a 404
pub static ROUTES: [RouteEntry; 4] = [
    RouteEntry {
        path: "/message",
        methods: AllowedMethods::Any,
        route: Route::Message,
    },
    RouteEntry {
        path: "/random",
        methods: AllowedMethods::Any,
        route: Route::Random,
    },
    RouteEntry {
        path: "/add/mission",
        methods: AllowedMethods::Only(Method::POST),
        route: Route::AddMission,
    },
    RouteEntry {
        path: "/list/mission",
        methods: AllowedMethods::Only(Method::GET),
        route: Route::ListMissions,
    },
];

/// Look up the table row for a path
pub fn resolve(path: &str) -> Option<&'static RouteEntry> {
    ROUTES.iter().find(|entry| entry.path == path)
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type so the same path serves hyper connections
/// and in-process callers.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| {
        AccessLogEntry::from_request(
            remote_addr,
            req.method(),
            req.uri(),
            req.version(),
            req.headers(),
        )
    });

    let mut response = route_request(req, &state).await;

    if let Ok(server) = state.config.http.server_name.parse() {
        response.headers_mut().insert("Server", server);
    }

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on the table, answering 404/405 itself
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(entry) = resolve(req.uri().path()) else {
        return http::build_404_response();
    };

    if let AllowedMethods::Only(method) = &entry.methods {
        if req.method() != method {
            return http::build_405_response(method.as_str());
        }
    }

    let path = entry.path;
    let result = match entry.route {
        Route::Message => Ok(http::build_text_response(StatusCode::OK, "Hello, World!")),
        Route::Random => Ok(http::build_text_response(
            StatusCode::OK,
            uuid::Uuid::new_v4().to_string(),
        )),
        Route::AddMission => missions::add_mission(req, state).await,
        Route::ListMissions => missions::list_missions(state).await,
    };

    result.unwrap_or_else(|e| internal_error(path, &e))
}

/// Log the failure with its route and answer with the opaque 500
fn internal_error(path: &str, error: &HandlerError) -> Response<Full<Bytes>> {
    match error {
        HandlerError::Form(e) => logger::log_error(&format!("{path}: failed to parse form: {e}")),
        HandlerError::Store(e) => logger::log_error(&format!("{path}: storage failure: {e}")),
    }
    http::build_500_response()
}
