pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod domain;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::reset::WeeklyResetService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_reset() -> Result<()> {
    let db_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| "ping_pong.db".to_string());

    let pool = database::create_pool(&db_path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::init_database(&mut conn)?;
    drop(conn);

    let service = WeeklyResetService::new(pool);
    let outcome = service.perform_weekly_reset()?;
    log::info!(
        "Manual reset done: {} archived, {} reset",
        outcome.archived_players,
        outcome.reset_players
    );
    Ok(())
}
