//! Example consumer: a separate Rust project that uses resource-router as a dependency.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `CONFIG_PATH=../sample cargo run`

use resource_router::{
    common_routes, introspection_routes, load_from_dir, resource_routes, Application, AppState, Record,
    ResourceTarget, UrlOptions,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("resource_router=info,example_consumer=info")),
        )
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "sample".into());
    let config = load_from_dir(&config_path).await?;
    let app = Application::from_config(&config)?;

    let post = Record::new("Post", 1);
    let comment = Record::new("Comment", 2);
    for package in app.packages() {
        let mut options = UrlOptions::default().parent(&post);
        if package.scope_param().is_some() {
            options = options.scope("demo");
        }
        match app.resource_url_for(package.name(), ResourceTarget::Record(&comment), &options) {
            Ok(path) => tracing::info!(package = package.name(), %path, "nested comment"),
            Err(e) => tracing::info!(package = package.name(), error = %e, "nested comment not routable"),
        }
    }

    let state = AppState::new(app);
    let router = axum::Router::new()
        .merge(common_routes(state.clone()))
        .merge(introspection_routes(state.clone()))
        .merge(resource_routes(state));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Example consumer listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
