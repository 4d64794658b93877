use std::time::Duration;

use crate::config::{LoggingFormat, RepeatPolicy};

pub const DEFAULT_LOGGING_FORMAT: LoggingFormat = LoggingFormat::Text;
pub const DEFAULT_WALLETS_FILE: &str = "wallets.txt";
pub const DEFAULT_CONTRACT_SOURCE: &str = "auto.sol";
pub const DEFAULT_PACKAGE_DIR: &str = "node_modules";
pub const DEFAULT_SOLC_PATH: &str = contract_builder::DEFAULT_SOLC_BINARY;
pub const DEFAULT_BURN_ADDRESSES_FILE: &str = "burnAddress.txt";
pub const DEFAULT_KYC_ADDRESSES_FILE: &str = "KycAddress.txt";
pub const DEFAULT_REPEAT_POLICY: RepeatPolicy = RepeatPolicy::Confirm;
pub const DEFAULT_DEPLOYMENT_DELAY_SECS: u64 = 5;
pub const DEFAULT_TRANSACTION_DELAY_SECS: u64 = 5;

const ONE_HOUR_IN_SECONDS: u64 = 60 * 60;
pub const RESTART_DELAY: Duration = Duration::from_secs(3);
pub const REPEAT_DELAY: Duration = Duration::from_secs(24 * ONE_HOUR_IN_SECONDS);
pub const CONTINUOUS_DELAY: Duration = Duration::from_secs(10);
