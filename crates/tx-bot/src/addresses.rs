//! Recipient address lists.

use std::{io, path::PathBuf, str::FromStr};

use alloy_primitives::Address;
use rand::Rng;
use thiserror::Error;

use crate::files::{self, Line};

#[derive(Debug, Error)]
pub enum AddressListError {
    #[error("Address file {0:?} not found")]
    NotFound(PathBuf),

    #[error("Failed to read address file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Address file {0:?} contains no valid addresses")]
    Empty(PathBuf),
}

/// Non-empty ordered list of recipients together with the lines that could not be parsed.
#[derive(Clone, Debug)]
pub struct AddressList {
    addresses: Vec<Address>,
    skipped: Vec<Line>,
}

impl AddressList {
    pub fn load(path: PathBuf) -> Result<Self, AddressListError> {
        let lines = files::read_lines(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                AddressListError::NotFound(path.clone())
            } else {
                AddressListError::Read {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let list = Self::from_lines(lines);
        if list.addresses.is_empty() {
            return Err(AddressListError::Empty(path));
        }
        Ok(list)
    }

    fn from_lines(lines: Vec<Line>) -> Self {
        let (mut addresses, mut skipped) = (Vec::new(), Vec::new());
        for line in lines {
            match Address::from_str(&line.content) {
                Ok(address) => addresses.push(address),
                Err(_) => skipped.push(line),
            }
        }
        Self { addresses, skipped }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn skipped(&self) -> &[Line] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Address {
        self.addresses[rng.gen_range(0..self.addresses.len())]
    }
}
