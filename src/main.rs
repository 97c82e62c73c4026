use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod scheduler;
mod server;
mod store;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg)?;

    // Worker threads default to the CPU count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // Reject a bad cadence before anything binds
    let timer = scheduler::Timer::from_config(&cfg.scheduler)?;

    let store = store::open(&cfg.storage).await?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg, store.is_persistent());

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    let scheduler_task = match timer {
        Some(timer) => Some(tokio::spawn(scheduler::run_scheduler(
            timer,
            Arc::clone(&store),
            Arc::clone(&signals),
        ))),
        None => {
            logger::log_scheduler_disabled();
            None
        }
    };

    let state = Arc::new(config::AppState::new(cfg, store));
    server::run_server_loop(listener, state, Arc::clone(&signals)).await;

    if let Some(task) = scheduler_task {
        if let Err(e) = task.await {
            logger::log_error(&format!("Scheduler task ended abnormally: {e}"));
        }
    }

    logger::log_shutdown("Server stopped");
    Ok(())
}
