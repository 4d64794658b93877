//! Interactive bot that deploys a token contract from a set of wallets and sends randomized value
//! transfers from them to addresses listed in a file.

mod addresses;
mod amount;
mod app;
pub mod config;
mod console;
mod deploy;
mod environment_variables;
mod files;
mod network;
mod prompt;
mod providers;
mod run_state;
mod scheduler;
mod shell;
#[cfg(test)]
mod testing;
mod transactions;
mod wallet;

pub use addresses::{AddressList, AddressListError};
pub use amount::Amount;
pub use app::{App, Continuation, Session, Step};
pub use console::Console;
pub use deploy::{creation_code, DeploymentReport, CONSTRUCTOR_ARITY};
pub use environment_variables::*;
pub use network::{AlloyNetwork, Deployment, Network, NetworkError, NetworkResult};
pub use prompt::{stdin_prompter, InquirePrompter, Interrupted, LinePrompter, Prompter};
pub use providers::{create_provider_with_signer, create_simple_provider, LoggingFiller};
pub use run_state::{RecipientMode, RunPlan, RunState};
pub use scheduler::{Scheduler, Wakeup};
pub use transactions::BatchSummary;
pub use wallet::{Wallet, WalletError, WalletStore};
