use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;

use foodgram::server::{
    config::Config,
    error::Error,
    model::app::AppState,
    router, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&config).await?;

    // Base64 image payloads in JSON are a third larger than the decoded image
    let body_limit = config.api.max_image_bytes * 2;

    let app = router::routes()
        .with_state(AppState {
            db,
            config: config.api,
        })
        .layer(session)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
