use std::{env, io};

use anyhow::{anyhow, Result};
use contract_builder::Solc;
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tx_bot::{
    config::{resolve_config, LoggingFormat},
    stdin_prompter, AlloyNetwork, App, Console, Scheduler, Session, WalletStore,
};

fn init_logging(format: LoggingFormat) -> Result<()> {
    const LOG_CONFIGURATION_ENVVAR: &str = "RUST_LOG";

    let filter = EnvFilter::new(
        env::var(LOG_CONFIGURATION_ENVVAR)
            .as_deref()
            .unwrap_or("warn,tx_bot=info,contract_builder=info"),
    );

    // Logs go to stderr so that they don't interleave with the interactive output.
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_env_filter(filter);

    match format {
        LoggingFormat::Json => subscriber.json().try_init(),
        LoggingFormat::Text => subscriber.try_init(),
    }
    .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = resolve_config()?;
    init_logging(config.logging_format)?;

    info!("Starting transaction bot.");
    info!("Bot configuration:\n{}", config.print_safe_config());

    let wallets = WalletStore::load(&config.keys)?;
    let network = AlloyNetwork::new(config.rpc_url.clone());
    let compiler = Solc::new(config.files.solc_path.clone());
    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let scheduler = Scheduler::new();
    scheduler.cancel_on_ctrl_c();
    let mut session = Session {
        prompter: stdin_prompter(),
        console: Console::stdout(),
        scheduler,
    };

    let mut app = App::new(config, wallets, network, compiler, rng);
    app.run(&mut session).await
}
