use std::sync::Arc;

use crate::application::ports::class_repository::ClassRepository;
use crate::application::ports::health_port::HealthPort;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::tokens::AccessTokens;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::class_repository_sqlx::SqlxClassRepository;
use crate::infrastructure::db::repositories::health_sqlx::SqlxHealth;
use crate::infrastructure::db::repositories::order_repository_sqlx::SqlxOrderRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::InMemoryStores;

/// Shared per-process state handed to every handler. Built once at startup;
/// cloning is cheap.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    tokens: AccessTokens,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    class_repo: Arc<dyn ClassRepository>,
    order_repo: Arc<dyn OrderRepository>,
    health: Arc<dyn HealthPort>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        class_repo: Arc<dyn ClassRepository>,
        order_repo: Arc<dyn OrderRepository>,
        health: Arc<dyn HealthPort>,
    ) -> Self {
        Self {
            user_repo,
            class_repo,
            order_repo,
            health,
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(SqlxUserRepository::new(pool.clone())),
            Arc::new(SqlxClassRepository::new(pool.clone())),
            Arc::new(SqlxOrderRepository::new(pool.clone())),
            Arc::new(SqlxHealth::new(pool)),
        )
    }

    pub fn in_memory(stores: &InMemoryStores) -> Self {
        Self::new(
            Arc::new(stores.users.clone()),
            Arc::new(stores.classes.clone()),
            Arc::new(stores.orders.clone()),
            Arc::new(stores.health.clone()),
        )
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        let tokens = AccessTokens::new(cfg.jwt_secret.clone(), cfg.jwt_expires_secs);
        Self {
            cfg,
            tokens,
            services: Arc::new(services),
        }
    }

    pub fn tokens(&self) -> &AccessTokens {
        &self.tokens
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn class_repo(&self) -> Arc<dyn ClassRepository> {
        self.services.class_repo.clone()
    }

    pub fn order_repo(&self) -> Arc<dyn OrderRepository> {
        self.services.order_repo.clone()
    }

    pub fn health(&self) -> Arc<dyn HealthPort> {
        self.services.health.clone()
    }
}
