//! Local Cache demo
//!
//! Runs a short workload against both cache scopes and prints the
//! resulting statistics as JSON.

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_cache::{
    spawn_purge_task, CacheEngine, CachedFn, Config, ContextCache, ContextId, MemoryCache,
};

const WORKERS: u64 = 4;
const ROUNDS: u64 = 50;

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the shared cache and start the purge task
/// 4. Run workers, each with its own context-local store
/// 5. Print statistics for both scopes
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "local_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load cache configuration")?;
    info!(
        default_timeout = config.default_timeout,
        default_size = config.default_size,
        purge_interval = config.purge_interval,
        "configuration loaded"
    );

    let shared = Arc::new(RwLock::new(MemoryCache::<u64>::from_config(&config)));
    let purge_handle = spawn_purge_task(shared.clone(), config.purge_interval);

    let contexts = Arc::new(ContextCache::<u64>::from_config(&config));
    let mut workers = Vec::new();
    for worker in 0..WORKERS {
        let contexts = Arc::clone(&contexts);
        workers.push(tokio::task::spawn_blocking(move || {
            let square = CachedFn::with_key_fn(|n: &u64| format!("square:{n}"), |n: &u64| n * n)
                .size(16);
            let mut handle = contexts.handle_for(ContextId::Worker(worker));
            let mut sum = 0;
            for round in 0..ROUNDS {
                sum += square.call_or_cached(&mut handle, &(round % 20));
            }
            sum
        }));
    }

    let mut total = 0;
    for worker in workers {
        total += worker.await.context("worker panicked")?;
    }

    {
        let cube = CachedFn::new("last_cube", |n: &u64| n * n * n).timeout(1.0);
        let mut guard = shared.write().await;
        for n in 0..10 {
            cube.call(&mut *guard, &n);
        }
    }

    let (shared_stats, last_cube_ttl) = {
        let guard = shared.read().await;
        (guard.stats(), guard.ttl("last_cube"))
    };
    let context_stats = contexts.total_stats();
    info!(total, contexts = contexts.contexts(), "workload finished");

    let report = json!({
        "shared": shared_stats,
        "shared_hit_rate": shared_stats.hit_rate(),
        "last_cube_ttl": last_cube_ttl,
        "contexts": context_stats,
        "contexts_hit_rate": context_stats.hit_rate(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    purge_handle.abort();
    Ok(())
}
