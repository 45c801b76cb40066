use async_trait::async_trait;

#[async_trait]
pub trait HealthPort: Send + Sync {
    async fn ping(&self) -> anyhow::Result<()>;
}
