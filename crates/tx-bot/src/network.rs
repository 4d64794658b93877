//! Access to the chain: balances, value transfers and contract deployments.

use std::{future::Future, time::Duration};

use alloy_network::{ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::{PendingTransactionError, Provider};
use alloy_rpc_types::TransactionRequest;
use alloy_transport::TransportError;
use thiserror::Error;
use tracing::debug;

use crate::{
    providers::{create_provider_with_signer, create_simple_provider},
    wallet::Wallet,
};

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Couldn't create connection: {0}")]
    Provider(TransportError),

    #[error("RPC call failed: {0}")]
    Rpc(#[from] TransportError),

    #[error("Couldn't track the transaction: {0}")]
    Confirmation(#[from] PendingTransactionError),

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Receipt of deployment {0} carries no contract address")]
    MissingContractAddress(TxHash),
}

pub type NetworkResult<T> = Result<T, NetworkError>;

/// How long a submitted transaction may stay unconfirmed before it is reported as failed.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Outcome of a confirmed contract-creation transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Deployment {
    pub tx_hash: TxHash,
    pub contract_address: Address,
}

/// Chain operations used by the bot. Every submitting call waits for the receipt.
pub trait Network {
    fn balance(&self, address: Address) -> impl Future<Output = NetworkResult<U256>> + Send;

    /// Sends `value` wei from `wallet` to `to`.
    fn transfer(
        &self,
        wallet: &Wallet,
        to: Address,
        value: U256,
    ) -> impl Future<Output = NetworkResult<TxHash>> + Send;

    /// Submits a contract-creation transaction with `creation_code` (bytecode followed by the
    /// encoded constructor arguments).
    fn deploy(
        &self,
        wallet: &Wallet,
        creation_code: Bytes,
    ) -> impl Future<Output = NetworkResult<Deployment>> + Send;
}

/// [`Network`] backed by an RPC node. A fresh provider is created for every operation.
#[derive(Clone, Debug)]
pub struct AlloyNetwork {
    rpc_url: String,
}

impl AlloyNetwork {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
        }
    }

    async fn submit(&self, wallet: &Wallet, tx: TransactionRequest) -> NetworkResult<Receipt> {
        let provider = create_provider_with_signer(&self.rpc_url, wallet.signer().clone()).await?;
        let pending = provider
            .send_transaction(tx.with_from(wallet.address()))
            .await?;
        debug!(tx_hash = %pending.tx_hash(), "Transaction submitted, waiting for receipt");

        let receipt = pending
            .with_timeout(Some(RECEIPT_TIMEOUT))
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(NetworkError::Reverted(receipt.transaction_hash()));
        }
        Ok(Receipt {
            tx_hash: receipt.transaction_hash(),
            contract_address: receipt.contract_address(),
        })
    }
}

struct Receipt {
    tx_hash: TxHash,
    contract_address: Option<Address>,
}

impl Network for AlloyNetwork {
    async fn balance(&self, address: Address) -> NetworkResult<U256> {
        let provider = create_simple_provider(&self.rpc_url).await?;
        Ok(provider.get_balance(address).await?)
    }

    async fn transfer(&self, wallet: &Wallet, to: Address, value: U256) -> NetworkResult<TxHash> {
        let tx = TransactionRequest::default().with_to(to).with_value(value);
        Ok(self.submit(wallet, tx).await?.tx_hash)
    }

    async fn deploy(&self, wallet: &Wallet, creation_code: Bytes) -> NetworkResult<Deployment> {
        let tx = TransactionRequest::default().with_deploy_code(creation_code);
        let receipt = self.submit(wallet, tx).await?;
        let contract_address = receipt
            .contract_address
            .ok_or(NetworkError::MissingContractAddress(receipt.tx_hash))?;
        Ok(Deployment {
            tx_hash: receipt.tx_hash,
            contract_address,
        })
    }
}
