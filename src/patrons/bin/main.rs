use axum::{
    routing::{get, post},
    Router,
};
use lambda_http::{run, Error};
use hinlibs::core::controller::AppState;
use hinlibs::core::repository::RepositoryStore;
use hinlibs::patrons::controller::{get_account, login, update_fines};
use hinlibs::utils::ddb::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

const DEV_MODE: bool = true;

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let state = if DEV_MODE {
        std::env::set_var("AWS_LAMBDA_FUNCTION_NAME", "_");
        std::env::set_var("AWS_LAMBDA_FUNCTION_MEMORY_SIZE", "4096");
        std::env::set_var("AWS_LAMBDA_FUNCTION_VERSION", "1");
        std::env::set_var("AWS_LAMBDA_RUNTIME_API", "http://[::]:9000/.rt");
        AppState::new("dev", RepositoryStore::LocalDynamoDB).await
    } else {
        AppState::new("prod", RepositoryStore::DynamoDB).await
    };

    let app = Router::new()
        .route("/patrons/login", post(login))
        .route("/patrons/fines", post(update_fines))
        .route("/patrons/:name", get(get_account))
        .with_state(state);

    run(app).await
}
