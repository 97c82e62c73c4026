//! Mission routes
//!
//! `POST /add/mission` and `GET /list/mission`. Validation problems become
//! responses here; everything else is returned as a `HandlerError` for the
//! router to log and turn into a 500.

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::form;
use crate::http;
use crate::logger;
use crate::store::{epoch_seconds, Mission};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde::Serialize;

/// Body of a successful add
#[derive(Debug, Serialize)]
pub struct AddMissionResponse {
    pub success: bool,
    pub id: i64,
    pub name: String,
    pub time: i64,
}

/// Body of a successful list
#[derive(Debug, Serialize)]
pub struct ListMissionsResponse {
    pub success: bool,
    pub tasks: Vec<Mission>,
}

/// Insert the mission named by the form field `name`, stamped with the
/// current time.
pub async fn add_mission<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let name = form::read_text_field(req, "name", state.config.http.max_body_size).await?;

    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Ok(http::build_400_response());
    };

    let time = epoch_seconds();
    let id = state.store.insert_mission(&name, time).await?;
    logger::log_mission_added(id, &name, time);

    Ok(http::build_json_response(
        StatusCode::OK,
        &AddMissionResponse {
            success: true,
            id,
            name,
            time,
        },
    ))
}

/// Every mission, newest first.
pub async fn list_missions(state: &AppState) -> Result<Response<Full<Bytes>>, HandlerError> {
    let tasks = state.store.list_missions().await?;

    Ok(http::build_json_response(
        StatusCode::OK,
        &ListMissionsResponse {
            success: true,
            tasks,
        },
    ))
}
