use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Result};
use clap::Parser;
pub use cli::CLIConfig;
use defaults::*;
pub use enums::{LoggingFormat, RepeatPolicy};

use crate::environment_variables::*;

mod cli;
mod defaults;
mod display;
mod enums;

/// Where the private keys of the wallets come from.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum KeySource {
    Inline(Vec<String>),
    File(PathBuf),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FileConfig {
    pub contract_source: PathBuf,
    pub package_dir: PathBuf,
    pub solc_path: PathBuf,
    pub burn_addresses: PathBuf,
    pub kyc_addresses: PathBuf,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Timings {
    pub deployment_delay: Duration,
    pub transaction_delay: Duration,
    pub restart_delay: Duration,
    pub repeat_delay: Duration,
    pub continuous_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            deployment_delay: Duration::from_secs(DEFAULT_DEPLOYMENT_DELAY_SECS),
            transaction_delay: Duration::from_secs(DEFAULT_TRANSACTION_DELAY_SECS),
            restart_delay: RESTART_DELAY,
            repeat_delay: REPEAT_DELAY,
            continuous_delay: CONTINUOUS_DELAY,
        }
    }
}

/// Resolved configuration for the bot. Order of precedence is:
/// 1. Command line arguments (`CLIConfig`).
/// 2. Environment variables (including ones loaded from `.env`).
/// 3. Default values (available only for some fields).
///
/// For field documentation, see their counterparts in `CLIConfig`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BotConfig {
    pub logging_format: LoggingFormat,
    pub rpc_url: String,
    pub keys: KeySource,
    pub files: FileConfig,
    pub timings: Timings,
    pub repeat_policy: RepeatPolicy,
    pub rng_seed: Option<u64>,
}

/// Resolves the configuration for the bot using the command line arguments, environment
/// variables, and default values.
pub fn resolve_config() -> Result<BotConfig> {
    resolve_config_from(CLIConfig::parse(), |name| std::env::var(name).ok())
}

pub(crate) fn resolve_config_from(
    CLIConfig {
        logging_format,
        rpc_url,
        private_keys,
        wallets_file,
        contract_source,
        package_dir,
        solc_path,
        burn_addresses_file,
        kyc_addresses_file,
        repeat_policy,
        deployment_delay_secs,
        transaction_delay_secs,
        rng_seed,
    }: CLIConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BotConfig> {
    let resolver = Resolver { env: &env };

    let keys = resolve_key_source(private_keys, wallets_file, &env)?;

    let files = FileConfig {
        contract_source: resolver.path(
            contract_source,
            CONTRACT_SOURCE_ENV,
            DEFAULT_CONTRACT_SOURCE,
        )?,
        package_dir: resolver.path(package_dir, PACKAGE_DIR_ENV, DEFAULT_PACKAGE_DIR)?,
        solc_path: resolver.path(solc_path, SOLC_PATH_ENV, DEFAULT_SOLC_PATH)?,
        burn_addresses: resolver.path(
            burn_addresses_file,
            BURN_ADDRESSES_FILE_ENV,
            DEFAULT_BURN_ADDRESSES_FILE,
        )?,
        kyc_addresses: resolver.path(
            kyc_addresses_file,
            KYC_ADDRESSES_FILE_ENV,
            DEFAULT_KYC_ADDRESSES_FILE,
        )?,
    };

    let timings = Timings {
        deployment_delay: Duration::from_secs(resolver.value(
            deployment_delay_secs,
            DEPLOYMENT_DELAY_SECS_ENV,
            Some(DEFAULT_DEPLOYMENT_DELAY_SECS),
        )?),
        transaction_delay: Duration::from_secs(resolver.value(
            transaction_delay_secs,
            TRANSACTION_DELAY_SECS_ENV,
            Some(DEFAULT_TRANSACTION_DELAY_SECS),
        )?),
        ..Timings::default()
    };

    Ok(BotConfig {
        logging_format: resolver.value(
            logging_format,
            LOGGING_FORMAT_ENV,
            Some(DEFAULT_LOGGING_FORMAT),
        )?,
        rpc_url: resolver.value(rpc_url, RPC_URL_ENV, None)?,
        keys,
        files,
        timings,
        repeat_policy: resolver.value(
            repeat_policy,
            REPEAT_POLICY_ENV,
            Some(DEFAULT_REPEAT_POLICY),
        )?,
        rng_seed: resolver.optional(rng_seed, RNG_SEED_ENV)?,
    })
}

fn resolve_key_source(
    private_keys: Option<Vec<String>>,
    wallets_file: Option<PathBuf>,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<KeySource> {
    if let Some(keys) = private_keys {
        return Ok(KeySource::Inline(keys));
    }
    if let Some(path) = wallets_file {
        return Ok(KeySource::File(path));
    }
    if let Some(keys) = env(PRIVATE_KEYS_ENV).filter(|v| !v.trim().is_empty()) {
        return Ok(KeySource::Inline(
            keys.split(',').map(|key| key.trim().to_string()).collect(),
        ));
    }
    if let Some(key) = env(PRIVATE_KEY_ENV).filter(|v| !v.trim().is_empty()) {
        return Ok(KeySource::Inline(vec![key.trim().to_string()]));
    }
    let path = env(WALLETS_FILE_ENV).unwrap_or_else(|| DEFAULT_WALLETS_FILE.to_string());
    Ok(KeySource::File(cli::parsing::parse_path(&path)?))
}

struct Resolver<'a, E> {
    env: &'a E,
}

impl<E: Fn(&str) -> Option<String>> Resolver<'_, E> {
    fn optional<T: FromStr>(&self, value: Option<T>, env_var: &str) -> Result<Option<T>> {
        if value.is_some() {
            return Ok(value);
        }
        match (self.env)(env_var) {
            Some(raw) => T::from_str(raw.trim())
                .map(Some)
                .map_err(|_| anyhow!("Invalid value `{raw}` of `{env_var}`")),
            None => Ok(None),
        }
    }

    fn value<T: FromStr>(&self, value: Option<T>, env_var: &str, default: Option<T>) -> Result<T> {
        match self.optional(value, env_var)?.or(default) {
            Some(value) => Ok(value),
            None => bail!("Missing required configuration: `{env_var}`"),
        }
    }

    fn path(&self, value: Option<PathBuf>, env_var: &str, default: &str) -> Result<PathBuf> {
        match value {
            Some(path) => Ok(path),
            None => {
                let raw = (self.env)(env_var).unwrap_or_else(|| default.to_string());
                cli::parsing::parse_path(&raw)
            }
        }
    }
}
