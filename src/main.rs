// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use lonkero_fingerprint::agent::FingerprintAgent;
use lonkero_fingerprint::config::AppConfig;
use lonkero_fingerprint::dedup::RedisDedupStore;
use lonkero_fingerprint::engine::EngineClient;
use lonkero_fingerprint::queue::RedisQueue;
use lonkero_fingerprint::reporting::RedisBus;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    print!("\x1b[92m");
    println!("   __ _                            _     _");
    println!("  / _(_)_ _  __ _ ___ _ _ _ __ _ _(_)_ _| |_");
    println!(" |  _| | ' \\/ _` / -_) '_| '_ \\ '_| | ' \\  _|");
    println!(" |_| |_|_||_\\__, \\___|_| | .__/_| |_|_||_\\__|");
    println!("            |___/        |_|");
    print!("\x1b[0m");
    println!();
    print!("\x1b[1m\x1b[97m");
    println!("        Web Technology Fingerprint Agent");
    print!("\x1b[0m");
    println!();

    info!("Lonkero Fingerprint Agent v1.0.0 - Starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("fingerprint-worker")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())?;

    Ok(())
}

async fn async_main() -> Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;
    let num_workers = config.server.workers;
    info!(
        "Configuration loaded: workers={}, redis={}, engine={}",
        num_workers, config.redis.url, config.engine.command
    );

    // Connect to Redis; the queue owns the pool, dedup and emission share it
    let queue = Arc::new(RedisQueue::new(&config.redis.url).await?);
    info!("[SUCCESS] Connected to Redis");

    let bus = Arc::new(RedisBus::new(queue.pool()));
    let dedup = Arc::new(RedisDedupStore::new(queue.pool()));
    let engine = Arc::new(EngineClient::new(&config.engine));

    let agent = Arc::new(FingerprintAgent::new(
        config.scan.clone(),
        engine,
        dedup,
        bus.clone(),
        bus,
    ));
    info!("[SUCCESS] Fingerprint agent initialized");

    // Spawn worker loops
    info!("Spawning {} parallel workers", num_workers);
    let mut handles = vec![];

    for worker_id in 0..num_workers {
        let queue = Arc::clone(&queue);
        let agent = Arc::clone(&agent);

        handles.push(tokio::spawn(worker_loop(queue, agent, worker_id)));
    }

    // Wait for all workers (runs forever)
    for handle in handles {
        let _ = handle.await;
    }

    Ok(())
}

async fn worker_loop(queue: Arc<RedisQueue>, agent: Arc<FingerprintAgent>, worker_id: usize) {
    info!("Worker {} started", worker_id);
    loop {
        match process_next_request(&queue, &agent, worker_id).await {
            Ok(()) => {}
            Err(e) => {
                // Every failure is scoped to a single request
                error!("Worker {} error: {:#}", worker_id, e);
            }
        }

        // Small delay to prevent tight loop
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }
}

async fn process_next_request(
    queue: &RedisQueue,
    agent: &FingerprintAgent,
    worker_id: usize,
) -> Result<()> {
    let message = match queue.pop_request(30).await? {
        Some(message) => message,
        None => return Ok(()), // No request available, continue loop
    };

    let selector = message.selector.clone();
    let outcome = agent.process(message).await?;
    info!(
        "[Worker {}] request {} finished: {:?}",
        worker_id, selector, outcome
    );

    Ok(())
}
