use clap::Parser;
use log::LevelFilter;
use smartissues::config::config_manager::ConfigManager;
use smartissues::errors::ErrorHandler;
use smartissues::structs::cli::Cli;
use smartissues::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load(cli.config.as_deref());

    let default_level = match &config {
        Ok(config) if config.debug => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut runner = CommandRunner::new(cli.config, config);

    if let Err(error) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&error);
        std::process::exit(1);
    }

    Ok(())
}
