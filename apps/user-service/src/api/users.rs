use axum::Router;
use domain_users::{
    HttpOrderClient, InMemoryUserRepository, PgUserRepository, UserService, handlers,
};

use crate::state::AppState;

/// Users router backed by Postgres when a pool is present, memory otherwise.
pub fn router(state: &AppState) -> eyre::Result<Router> {
    let orders = HttpOrderClient::new(state.config.order_service.clone())?;

    let router = match &state.db {
        Some(db) => {
            let repository = PgUserRepository::new(db.clone());
            handlers::router(UserService::new(repository, orders))
        }
        None => {
            let repository = InMemoryUserRepository::new();
            handlers::router(UserService::new(repository, orders))
        }
    };

    Ok(router)
}
