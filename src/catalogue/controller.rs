use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use crate::catalogue::command::add_item_cmd::{AddItemCommand, AddItemCommandRequest, AddItemCommandResponse};
use crate::catalogue::command::get_item_cmd::{GetItemCommand, GetItemCommandRequest, GetItemCommandResponse};
use crate::catalogue::command::list_items_cmd::{ListItemsCommand, ListItemsCommandRequest, ListItemsCommandResponse};
use crate::catalogue::command::remove_item_cmd::{RemoveItemCommand, RemoveItemCommandRequest, RemoveItemCommandResponse};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

#[derive(Debug, Default, Deserialize)]
pub struct PatronQuery {
    patron: Option<String>,
}

pub async fn list_items(
    State(state): State<AppState>,
    Query(req): Query<ListItemsCommandRequest>) -> Result<Json<ListItemsCommandResponse>, ServerError> {
    let library = state.load_library().await?;
    let res = ListItemsCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PatronQuery>) -> Result<Json<GetItemCommandResponse>, ServerError> {
    let library = state.load_library().await?;
    let req = GetItemCommandRequest::new(id.as_str(), query.patron.as_deref());
    let res = GetItemCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn add_item(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddItemCommandResponse>, ServerError> {
    let req: AddItemCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = AddItemCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<RemoveItemCommandResponse>, ServerError> {
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = RemoveItemCommand::new(library).execute(RemoveItemCommandRequest::new(id.as_str())).await?;
    Ok(Json(res))
}
