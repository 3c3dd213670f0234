use axum::{
    routing::post,
    Router,
};
use lambda_http::{run, Error};
use hinlibs::core::controller::AppState;
use hinlibs::core::repository::RepositoryStore;
use hinlibs::loans::controller::{borrow_item, return_item};
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
        .route("/loans/borrow", post(borrow_item))
        .route("/loans/return", post(return_item))
        .with_state(state);

    run(app).await
}
