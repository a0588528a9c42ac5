use std::time::Duration;

use r2d2::Pool as r2d2Pool;
use redis::Client;
use sqlx::{pool::PoolOptions, Pool, Postgres};

use crate::{settings::Config, Backend};

pub async fn init_pool(database_url: &str) -> anyhow::Result<Pool<Postgres>> {
    let pool = PoolOptions::new()
        .min_connections(5)
        .max_connections(100)
        .idle_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub fn init_redis_pool(redis_url: &str) -> anyhow::Result<r2d2Pool<Client>> {
    let client = redis::Client::open(redis_url)?;
    let pool = r2d2::Pool::builder()
        .connection_timeout(Duration::from_secs(5))
        .build(client)?;
    Ok(pool)
}

/// Connects Postgres and Redis. Missing configuration or an unreachable
/// service yields `None` and the server answers "service unavailable".
pub async fn init_backend(config: &Config) -> Option<Backend> {
    let (Some(database_url), Some(redis_url)) = (&config.database_url, &config.redis_url) else {
        tracing::warn!("database_url or redis_url is not configured, backend disabled");
        return None;
    };
    tracing::info!("Init Postgres connection on {}", database_url);
    let db = match init_pool(database_url).await {
        Ok(val) => val,
        Err(err) => {
            tracing::error!("failed to connect to database: {}", err);
            return None;
        }
    };
    tracing::info!("Init Redis connection on {}", redis_url);
    let redis_conn = match init_redis_pool(redis_url) {
        Ok(val) => val,
        Err(err) => {
            tracing::error!("failed to connect to redis: {}", err);
            return None;
        }
    };
    Some(Backend { db, redis_conn })
}
