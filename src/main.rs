use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use users_service::repository::{
    memory::InMemoryUserRepository, postgres::PgUserRepository, UserRepository,
};
use users_service::service::UserService;
use users_service::{database, handlers, observability, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    observability::init_tracing(&config).context("failed to initialize tracing")?;

    info!(
        "Starting {} on port {}",
        config.service.name, config.service.port
    );

    let repository: Arc<dyn UserRepository> = match config.database {
        Some(ref database) => {
            let pool = database::create_pool(database)
                .await
                .context("failed to connect to database")?;
            Arc::new(PgUserRepository::new(pool))
        }
        None => {
            warn!("No [database] configured, using the in-memory store");
            Arc::new(InMemoryUserRepository::new())
        }
    };

    let state = AppState::new(config.clone(), UserService::new(repository));
    let app = handlers::router(state);

    users_service::server::Server::new(config)
        .serve(app)
        .await
        .context("server error")?;

    Ok(())
}
