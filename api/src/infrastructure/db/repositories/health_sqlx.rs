use async_trait::async_trait;

use crate::application::ports::health_port::HealthPort;
use crate::infrastructure::db::PgPool;

pub struct SqlxHealth {
    pub pool: PgPool,
}

impl SqlxHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthPort for SqlxHealth {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
