use clap::Parser;
use coin_panel::app::AppContext;
use coin_panel::cli::{print_config, Cli, Commands};
use coin_panel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::parse(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    coin_panel::telemetry::init_telemetry(&config.telemetry)?;

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Top(args) => args.execute(&ctx).await?,
        Commands::Watch(args) => {
            tracing::info!(exchange = %args.exchange, "Starting live board");
            args.execute(&ctx).await?;
        }
        Commands::Prices(args) => args.execute(&ctx).await?,
        Commands::Window(args) => args.execute(&ctx).await?,
        Commands::Pairs(args) => args.execute(&ctx).await?,
        Commands::Candles(args) => args.execute(&ctx).await?,
        Commands::Format(args) => args.execute(&ctx).await?,
        Commands::Proxy(args) => args.execute(&ctx).await?,
        Commands::Ping(args) => args.execute(&ctx).await?,
        Commands::Config => print_config(ctx.config()),
    }

    Ok(())
}
