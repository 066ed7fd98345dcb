use sqlx::MySqlPool;
use tokio::sync::OnceCell;

static POOL: OnceCell<MySqlPool> = OnceCell::const_new();

/// Process-wide pool handle: the first caller connects, everyone after
/// reuses the same pool. Concurrent first access is single-flighted by
/// the cell, so init happens at most once.
pub async fn db_pool(database_url: &str) -> Result<&'static MySqlPool, sqlx::Error> {
    POOL.get_or_try_init(|| async { MySqlPool::connect(database_url).await })
        .await
}
