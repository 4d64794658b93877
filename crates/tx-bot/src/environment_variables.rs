pub const LOGGING_FORMAT_ENV: &str = "LOGGING_FORMAT";
pub const RPC_URL_ENV: &str = "RPC_URL";
pub const PRIVATE_KEYS_ENV: &str = "PRIVATE_KEYS";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const WALLETS_FILE_ENV: &str = "WALLETS_FILE";
pub const CONTRACT_SOURCE_ENV: &str = "CONTRACT_SOURCE";
pub const PACKAGE_DIR_ENV: &str = "PACKAGE_DIR";
pub const SOLC_PATH_ENV: &str = "SOLC_PATH";
pub const BURN_ADDRESSES_FILE_ENV: &str = "BURN_ADDRESSES_FILE";
pub const KYC_ADDRESSES_FILE_ENV: &str = "KYC_ADDRESSES_FILE";
pub const REPEAT_POLICY_ENV: &str = "REPEAT_POLICY";
pub const DEPLOYMENT_DELAY_SECS_ENV: &str = "DEPLOYMENT_DELAY_SECS";
pub const TRANSACTION_DELAY_SECS_ENV: &str = "TRANSACTION_DELAY_SECS";
pub const RNG_SEED_ENV: &str = "RNG_SEED";
