use axum::{
    extract::State,
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::loans::command::borrow_item_cmd::{BorrowItemCommand, BorrowItemCommandRequest, BorrowItemCommandResponse};
use crate::loans::command::return_item_cmd::{ReturnItemCommand, ReturnItemCommandRequest, ReturnItemCommandResponse};

pub async fn borrow_item(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowItemCommandResponse>, ServerError> {
    let req: BorrowItemCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = BorrowItemCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn return_item(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnItemCommandResponse>, ServerError> {
    let req: ReturnItemCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = ReturnItemCommand::new(library).execute(req).await?;
    Ok(Json(res))
}
