use anyhow::Result;
use futures_util::StreamExt;
use moka::future::Cache;
use once_cell::sync::Lazy;
use sqlx::MySqlPool;
use std::time::Duration;

/// employee_id (uppercased) => (mobile number, display name)
pub static MOBILE_CACHE: Lazy<Cache<String, (String, String)>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(100_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

fn cache_key(employee_id: &str) -> String {
    employee_id.trim().to_uppercase()
}

/// Remember one employee's login lookup.
pub async fn remember(employee_id: &str, mobile_number: &str, employee_name: &str) {
    MOBILE_CACHE
        .insert(
            cache_key(employee_id),
            (mobile_number.to_string(), employee_name.to_string()),
        )
        .await;
}

pub async fn lookup(employee_id: &str) -> Option<(String, String)> {
    MOBILE_CACHE.get(&cache_key(employee_id)).await
}

/// Drop a cached entry, e.g. after an upload rewrote the profile.
pub async fn forget(employee_id: &str) {
    MOBILE_CACHE.invalidate(&cache_key(employee_id)).await;
}

/// Batch insert entries
async fn batch_remember(entries: &[(String, String, String)]) {
    let futures: Vec<_> = entries
        .iter()
        .map(|(id, mobile, name)| {
            MOBILE_CACHE.insert(cache_key(id), (mobile.clone(), name.clone()))
        })
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Load employee login lookups into the in-memory cache (batched).
pub async fn warmup_mobile_cache(pool: &MySqlPool, batch_size: usize) -> Result<()> {
    let mut stream = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT employee_id, mobile_number, employee_name
        FROM employees
        ORDER BY updated_at DESC
        "#,
    )
    .fetch(pool);

    let mut batch = Vec::with_capacity(batch_size);
    let mut total_count = 0usize;

    while let Some(row) = stream.next().await {
        let entry = row?;
        batch.push(entry);
        total_count += 1;

        if batch.len() >= batch_size {
            batch_remember(&batch).await;
            batch.clear();
        }
    }

    // Insert any remaining entries
    if !batch.is_empty() {
        batch_remember(&batch).await;
    }

    log::info!(
        "Employee mobile cache warmup complete: {} records",
        total_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn lookup_is_case_insensitive_on_the_id() {
        remember("ncs7582", "9876543210", "Ashin").await;
        let (mobile, name) = lookup("NCS7582").await.unwrap();
        assert_eq!(mobile, "9876543210");
        assert_eq!(name, "Ashin");

        forget("Ncs7582").await;
        assert!(lookup("NCS7582").await.is_none());
    }
}
