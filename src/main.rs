use daytrack::api::routes::create_routes;
use daytrack::config::AppConfig;
use daytrack::db;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    info!("Database ready at {}", config.database_url);

    // Create the application routes
    let app = create_routes(pool);

    // Start the server
    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Daytrack server starting on http://{}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
