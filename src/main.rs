use clap::Parser;
use csv_relay::config::cli::LogFormat;
use csv_relay::server::{self, AppState};
use csv_relay::utils::logger;
use csv_relay::CliArgs;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_server_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting csv-relay");

    let settings = match args.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let state = AppState::from_settings(&settings)?;
    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    let port = listener.local_addr()?.port();

    tracing::info!("🚀 Server is running on port {}", port);
    tracing::info!("Environment: {}", settings.environment);
    tracing::info!("Health check: http://localhost:{}/health", port);

    server::serve(listener, state, server::shutdown_signal()).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}
