use std::process::ExitCode;

use guildscript::{
    config::Config, error::AppError, runtime::lua::LuaRuntime,
    service::pipeline::GuildConfigService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to compile guild script: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let mut runtime = LuaRuntime::new()?;
    let configuration = GuildConfigService::new(&mut runtime)
        .compile(&config.script)
        .await?;

    let rendered = configuration.to_json_pretty()?;
    match &config.output {
        Some(path) => {
            tokio::fs::write(path, rendered.as_bytes()).await?;
            tracing::info!("Wrote guild configuration to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
