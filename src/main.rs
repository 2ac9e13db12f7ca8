use backtester::commands::{backtest, list_strategies, sweep};
use backtester::runner::DEFAULT_INITIAL_CAPITAL;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backtester")]
#[command(about = "An OHLCV strategy backtesting tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single strategy over a candle snapshot and print the full result
    Backtest {
        /// Strategy name (see list-strategies)
        strategy: String,
        /// Path to the candle snapshot file (JSON array of candles)
        #[arg(long = "data-file", value_name = "PATH")]
        data_file: PathBuf,
        /// Strategy parameters as a JSON object, e.g. '{"short_window": 10}'
        #[arg(long, default_value = "{}")]
        params: String,
        /// Starting cash for the simulated account
        #[arg(long, default_value_t = DEFAULT_INITIAL_CAPITAL)]
        initial_capital: f64,
    },
    /// Run a batch of strategy configurations in parallel and print a summary per run
    Sweep {
        /// Path to the candle snapshot file (JSON array of candles)
        #[arg(long = "data-file", value_name = "PATH")]
        data_file: PathBuf,
        /// Path to a JSON array of run configurations
        #[arg(long = "configs", value_name = "PATH")]
        config_file: PathBuf,
    },
    /// List registered strategy names
    ListStrategies,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match cli.command {
        Commands::Backtest {
            strategy,
            data_file,
            params,
            initial_capital,
        } => {
            info!("Backtesting strategy {}", strategy);
            backtest::run(&data_file, &strategy, &params, initial_capital)?;
        }
        Commands::Sweep {
            data_file,
            config_file,
        } => {
            sweep::run(&data_file, &config_file)?;
        }
        Commands::ListStrategies => {
            list_strategies::run()?;
        }
    }

    Ok(())
}
