use std::path::PathBuf;

use clap::Parser;

use crate::{
    config::{
        defaults::*,
        enums::{LoggingFormat, RepeatPolicy},
    },
    environment_variables::*,
};

/// Configuration of the bot through the command line arguments.
///
/// All fields are optional, as they can be provided either through environment variables (also
/// read from a `.env` file) or through default values. Without any flag the bot runs a single
/// interactive session.
#[derive(Clone, Debug, Default, Parser)]
#[clap(about = "Deploys a token contract and sends randomized transfers from a set of wallets")]
pub struct CLIConfig {
    #[clap(
        long,
        value_enum,
        help = "Logging format configuration.",
        long_help = format!("Logging format configuration. If not provided, the value from the \
            environment variable `{LOGGING_FORMAT_ENV}` will be used. If that is not set, the \
            default value is `{DEFAULT_LOGGING_FORMAT:?}`.")
    )]
    pub logging_format: Option<LoggingFormat>,

    #[clap(
        long,
        help = "URL of the Ethereum RPC node.",
        long_help = format!("URL of the Ethereum RPC node. If not provided, the value from the \
            environment variable `{RPC_URL_ENV}` will be used.")
    )]
    pub rpc_url: Option<String>,

    #[clap(
        long,
        help = "Private keys of the wallets.",
        long_help = format!("Private keys of the wallets. If not provided, the key file given \
            with `--wallets-file` is used. Otherwise the comma-separated value of \
            `{PRIVATE_KEYS_ENV}` or the single key in `{PRIVATE_KEY_ENV}` will be used. If neither \
            is set, the keys are read from the key file."),
        num_args = 1..,
        value_delimiter = ','
    )]
    pub private_keys: Option<Vec<String>>,

    #[clap(
        long,
        help = "File with one private key per line.",
        long_help = format!("File with one private key per line, blank lines are ignored. Takes \
            precedence over `{PRIVATE_KEYS_ENV}` and `{PRIVATE_KEY_ENV}`. If not provided and \
            neither of them is set, the value from the environment variable `{WALLETS_FILE_ENV}` \
            will be used. If that is not set, the default value is `{DEFAULT_WALLETS_FILE}`."),
        value_parser = parsing::parse_path
    )]
    pub wallets_file: Option<PathBuf>,

    #[clap(
        long,
        help = "Solidity source of the token contract.",
        long_help = format!("Solidity source of the token contract. If not provided, the value \
            from the environment variable `{CONTRACT_SOURCE_ENV}` will be used. If that is not \
            set, the default value is `{DEFAULT_CONTRACT_SOURCE}`."),
        value_parser = parsing::parse_path
    )]
    pub contract_source: Option<PathBuf>,

    #[clap(
        long,
        help = "Directory where imported contract dependencies are looked up.",
        long_help = format!("Directory where imported contract dependencies are looked up. If not \
            provided, the value from the environment variable `{PACKAGE_DIR_ENV}` will be used. \
            If that is not set, the default value is `{DEFAULT_PACKAGE_DIR}`."),
        value_parser = parsing::parse_path
    )]
    pub package_dir: Option<PathBuf>,

    #[clap(
        long,
        help = "Path to the `solc` executable.",
        long_help = format!("Path to the `solc` executable. If not provided, the value from the \
            environment variable `{SOLC_PATH_ENV}` will be used. If that is not set, the default \
            value is `{DEFAULT_SOLC_PATH}` (looked up in PATH)."),
        value_parser = parsing::parse_path
    )]
    pub solc_path: Option<PathBuf>,

    #[clap(
        long,
        help = "File with burn addresses, one per line.",
        long_help = format!("File with burn addresses, one per line. If not provided, the value \
            from the environment variable `{BURN_ADDRESSES_FILE_ENV}` will be used. If that is \
            not set, the default value is `{DEFAULT_BURN_ADDRESSES_FILE}`."),
        value_parser = parsing::parse_path
    )]
    pub burn_addresses_file: Option<PathBuf>,

    #[clap(
        long,
        help = "File with KYC wallet addresses, one per line.",
        long_help = format!("File with KYC wallet addresses, one per line. If not provided, the \
            value from the environment variable `{KYC_ADDRESSES_FILE_ENV}` will be used. If that \
            is not set, the default value is `{DEFAULT_KYC_ADDRESSES_FILE}`."),
        value_parser = parsing::parse_path
    )]
    pub kyc_addresses_file: Option<PathBuf>,

    #[clap(
        long,
        value_enum,
        help = "What to do after a batch of transactions.",
        long_help = format!("What to do after a batch of transactions. If not provided, the value \
            from the environment variable `{REPEAT_POLICY_ENV}` will be used. If that is not set, \
            the default value is `{DEFAULT_REPEAT_POLICY:?}`.")
    )]
    pub repeat_policy: Option<RepeatPolicy>,

    #[clap(
        long,
        help = "Pause (in seconds) between deployments from consecutive wallets.",
        long_help = format!("Pause (in seconds) between deployments from consecutive wallets. If \
            not provided, the value from the environment variable `{DEPLOYMENT_DELAY_SECS_ENV}` \
            will be used. If that is not set, the default value is \
            `{DEFAULT_DEPLOYMENT_DELAY_SECS}`.")
    )]
    pub deployment_delay_secs: Option<u64>,

    #[clap(
        long,
        help = "Pause (in seconds) after every transaction.",
        long_help = format!("Pause (in seconds) after every transaction. If not provided, the \
            value from the environment variable `{TRANSACTION_DELAY_SECS_ENV}` will be used. If \
            that is not set, the default value is `{DEFAULT_TRANSACTION_DELAY_SECS}`.")
    )]
    pub transaction_delay_secs: Option<u64>,

    #[clap(
        long,
        help = "Seed for sampling senders, recipients and amounts.",
        long_help = format!("Seed for sampling senders, recipients and amounts. If not provided, \
            the value from the environment variable `{RNG_SEED_ENV}` will be used. If that is not \
            set, the generator is seeded from system entropy.")
    )]
    pub rng_seed: Option<u64>,
}

pub(super) mod parsing {
    use std::{path::PathBuf, str::FromStr};

    use anyhow::{anyhow, Result};

    pub fn parse_path(path: &str) -> Result<PathBuf> {
        let expanded_path =
            shellexpand::full(path).map_err(|e| anyhow!("Failed to expand path: {e:?}"))?;
        PathBuf::from_str(expanded_path.as_ref())
            .map_err(|e| anyhow!("Failed to interpret path: {e:?}"))
    }
}
