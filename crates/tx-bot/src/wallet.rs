//! Signing wallets of the bot.

use std::{fmt, io, path::PathBuf, str::FromStr};

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::{config::KeySource, files};

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Key file {0:?} not found")]
    KeyFileNotFound(PathBuf),

    #[error("Failed to read key file {path:?}: {source}")]
    KeyFileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Private key #{position} is invalid: {reason}")]
    InvalidKey { position: usize, reason: String },

    #[error("Private key on line {line} of {path:?} is invalid: {reason}")]
    InvalidKeyLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("No private keys were provided")]
    NoKeys,
}

#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl From<PrivateKeySigner> for Wallet {
    fn from(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }
}

// Never print the key itself.
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish()
    }
}

/// Ordered, non-empty collection of wallets. Order follows the key source.
#[derive(Clone, Debug)]
pub struct WalletStore {
    wallets: Vec<Wallet>,
}

impl WalletStore {
    pub fn load(source: &KeySource) -> Result<Self, WalletError> {
        let store = match source {
            KeySource::Inline(keys) => Self::from_keys(keys)?,
            KeySource::File(path) => {
                let lines = files::read_lines(path).map_err(|source| {
                    if source.kind() == io::ErrorKind::NotFound {
                        WalletError::KeyFileNotFound(path.clone())
                    } else {
                        WalletError::KeyFileUnreadable {
                            path: path.clone(),
                            source,
                        }
                    }
                })?;
                let entries = lines.into_iter().map(|line| (line.number, line.content));
                Self::from_entries(entries, |line, reason| WalletError::InvalidKeyLine {
                    path: path.clone(),
                    line,
                    reason,
                })?
            }
        };
        info!(wallets = store.len(), "Loaded wallets");
        Ok(store)
    }

    /// Builds the store from raw private keys (hex, with or without `0x`). Blank entries are
    /// ignored.
    pub fn from_keys<I, S>(keys: I) -> Result<Self, WalletError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = keys
            .into_iter()
            .filter(|key| !key.as_ref().trim().is_empty())
            .enumerate()
            .map(|(index, key)| (index + 1, key.as_ref().trim().to_string()));
        Self::from_entries(entries, |position, reason| WalletError::InvalidKey {
            position,
            reason,
        })
    }

    /// Parses `(location, key)` entries. `invalid` names the location of a key that fails to
    /// parse.
    fn from_entries(
        entries: impl IntoIterator<Item = (usize, String)>,
        invalid: impl Fn(usize, String) -> WalletError,
    ) -> Result<Self, WalletError> {
        let wallets = entries
            .into_iter()
            .map(|(location, key)| {
                PrivateKeySigner::from_str(&key)
                    .map(Wallet::from)
                    .map_err(|e| invalid(location, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if wallets.is_empty() {
            return Err(WalletError::NoKeys);
        }
        Ok(Self { wallets })
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }

    /// Uniformly random wallet.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Wallet {
        &self.wallets[rng.gen_range(0..self.wallets.len())]
    }
}
