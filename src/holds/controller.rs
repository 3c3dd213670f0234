use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::holds::command::cancel_hold_cmd::{CancelHoldCommand, CancelHoldCommandRequest, CancelHoldCommandResponse};
use crate::holds::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest, PlaceHoldCommandResponse};
use crate::holds::command::queue_position_cmd::{QueuePositionCommand, QueuePositionCommandRequest, QueuePositionCommandResponse};

pub async fn place_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<PlaceHoldCommandResponse>, ServerError> {
    let req: PlaceHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = PlaceHoldCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn cancel_hold(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CancelHoldCommandResponse>, ServerError> {
    let req: CancelHoldCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = CancelHoldCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn queue_position(
    State(state): State<AppState>,
    Path((item_id, patron)): Path<(String, String)>) -> Result<Json<QueuePositionCommandResponse>, ServerError> {
    let library = state.load_library().await?;
    let req = QueuePositionCommandRequest::new(patron.as_str(), item_id.as_str());
    let res = QueuePositionCommand::new(library).execute(req).await?;
    Ok(Json(res))
}
