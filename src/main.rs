use anyhow::Context;
use clap::Parser;
use parsverse::utils::error::ErrorSeverity;
use parsverse::utils::{logger, validation::Validate};
use parsverse::web::{self, AppState};
use parsverse::{AppConfig, ChatCompletionClient, CliConfig, StoryEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在時忽略
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_server_logger(cli.verbose);
    }

    tracing::info!("Starting ParsVerse");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        let code = match e.severity() {
            ErrorSeverity::Critical => 3,
            _ => 1,
        };
        std::process::exit(code);
    }

    tracing::info!(
        "🔌 Provider: {:?}, base URL: {}",
        config.provider.kind,
        config.base_url()
    );

    let api_key = config.api_key()?.to_string();
    let client = match config.timeout() {
        Some(timeout) => ChatCompletionClient::with_timeout(config.base_url(), api_key, timeout)?,
        None => ChatCompletionClient::new(config.base_url(), api_key),
    };

    let engine = StoryEngine::from_config(client, &config);
    let params = engine.params();
    tracing::info!(
        "🪶 Generation: model={}, max_tokens={}, temperature={}",
        params.model,
        params.max_tokens,
        params.temperature
    );
    let state = Arc::new(AppState::new(engine, config.app_url().map(str::to_string)));
    let app = web::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;

    web::serve(listener, app, web::shutdown_signal()).await?;
    Ok(())
}
