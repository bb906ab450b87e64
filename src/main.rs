use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, error, warn};

// 从 lib.rs 导入模块
use grades_service::config::AppConfig;
use grades_service::errors::Result;
use grades_service::routes;
use grades_service::runtime::{lifetime, server};

fn main() {
    dotenv().ok();
    setup_panic!();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志
    let stdout_log = std::io::stdout();
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(stdout_log);
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to build tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run(config)) {
        #[cfg(debug_assertions)]
        error!("{}", e.format_colored());
        #[cfg(not(debug_assertions))]
        error!("{}", e.format_simple());

        // 退出前刷新日志
        drop(runtime);
        drop(_guard);
        std::process::exit(1);
    }
}

async fn run(config: &'static AppConfig) -> Result<()> {
    let start = chrono::Utc::now();

    // 打印信息
    warn!(
        "Starting pre-startup processing...
        Project: {}
        Version: {}
        Authors: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    let startup = lifetime::startup::prepare_server_startup(config).await?;
    let addr = server::resolve_bind_address(&config.server_bind_address()).await?;

    // 输出预处理时间
    debug!(
        "Pre-startup processing completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(start)
            .num_milliseconds()
    );

    warn!("Using {} worker threads for the server", config.server.workers);

    let service = routes::configure_grades_routes(
        startup.storage,
        startup.verifier,
        config.default_request_timeout(),
    );

    server::serve_with_shutdown(addr, service, lifetime::shutdown::listen_for_shutdown()).await
}
