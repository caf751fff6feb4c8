use crate::models::title::{NewTitle, Title, TitlePatch};
use anyhow::Result;
use sea_orm::{
    Condition, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn title_repo(&self) -> repositories::title::TitleRepository {
        repositories::title::TitleRepository::new(self.conn.clone())
    }

    pub async fn count_titles(&self, condition: Condition) -> Result<u64> {
        self.title_repo().count(condition).await
    }

    pub async fn list_titles(
        &self,
        condition: Condition,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Title>> {
        self.title_repo().list_page(condition, offset, limit).await
    }

    pub async fn get_title(&self, pk: i32) -> Result<Option<Title>> {
        self.title_repo().get(pk).await
    }

    pub async fn insert_title(&self, title: &NewTitle) -> Result<i32> {
        self.title_repo().insert(title).await
    }

    pub async fn update_title(&self, pk: i32, patch: &TitlePatch) -> Result<u64> {
        self.title_repo().update(pk, patch).await
    }

    pub async fn delete_title(&self, pk: i32) -> Result<u64> {
        self.title_repo().delete(pk).await
    }
}
