use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::patrons::command::get_account_cmd::{GetAccountCommand, GetAccountCommandRequest, GetAccountCommandResponse};
use crate::patrons::command::login_cmd::{LoginCommand, LoginCommandRequest, LoginCommandResponse};
use crate::patrons::command::update_fines_cmd::{UpdateFinesCommand, UpdateFinesCommandRequest, UpdateFinesCommandResponse};

pub async fn login(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<LoginCommandResponse>, ServerError> {
    let req: LoginCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let library = state.load_library().await?;
    let res = LoginCommand::new(library).execute(req).await?;
    Ok(Json(res))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(name): Path<String>) -> Result<Json<GetAccountCommandResponse>, ServerError> {
    let library = state.load_library().await?;
    let res = GetAccountCommand::new(library).execute(GetAccountCommandRequest::new(name.as_str())).await?;
    Ok(Json(res))
}

pub async fn update_fines(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<UpdateFinesCommandResponse>, ServerError> {
    let req: UpdateFinesCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let _guard = state.exclusive().await;
    let library = state.load_library().await?;
    let res = UpdateFinesCommand::new(library).execute(req).await?;
    Ok(Json(res))
}
