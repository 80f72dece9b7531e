mod commands;

use clap::Parser;
use commands::*;

use ethscope_config::Config;
use ethscope_core::Explorer;

#[derive(Parser)]
#[command(name = "ethscope")]
#[command(about = "Ethereum block explorer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { subcommand } => match subcommand {
            ConfigCommands::View => {
                let cfg = Config::load_file()?;
                println!("{}", cfg.view()?);
            }
            ConfigCommands::Set { key, value } => {
                let mut cfg = Config::load_file()?;
                cfg.set_value(&key, &value)?;
                cfg.save()?;
                println!("✅ {} = {} Set successfully.", key, value);
            }
            ConfigCommands::Init => {
                let path = Config::init_default()?;
                println!("Default configuration file has been created: {:?}", path);
            }
        },
        Commands::Query(command) => {
            let cfg = Config::load()?;
            log::debug!("Using network {}", cfg.network);
            let explorer = Explorer::from_config(&cfg);
            println!("{}", execute(&explorer, command).await);
        }
    }

    Ok(())
}
