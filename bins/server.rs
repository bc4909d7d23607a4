use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(format: &str) {
    common::utils::logging::init_logging(format);
    info!(service = "catalog", event = "logger_init", format, "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and PRODUCTS_PATH apply
    dotenv().ok();
    let config = configs::AppConfig::load_or_env();
    let format = config
        .as_ref()
        .map(|c| c.logging.format.clone())
        .unwrap_or_else(|_| "compact".to_string());
    init_logging(&format);

    let cfg = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "catalog", event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "catalog",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "catalog",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        store = %cfg.store.path.display(),
        "catalog service starting"
    );

    // server::run_with_config drains connections on Ctrl+C before returning
    rt.block_on(async move {
        match server::startup::run_with_config(cfg).await {
            Ok(()) => {
                info!(service = "catalog", event = "stop", %service_id, pid, "server stopped normally");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service = "catalog", event = "run_failed", error = %e, "server returned error");
                std::process::ExitCode::FAILURE
            }
        }
    })
}
