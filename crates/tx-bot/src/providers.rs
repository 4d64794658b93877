use alloy_network::{Ethereum, EthereumWallet, Network};
use alloy_provider::{
    fillers::{FillerControlFlow, TxFiller, WalletFiller},
    Provider, ProviderBuilder, SendableTx,
};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::{Transport, TransportResult};

use crate::network::{NetworkError, NetworkResult};

/// Creates a provider for the given RPC URL, without any fillers or signer. Suitable for
/// read-only queries like balances.
pub async fn create_simple_provider(rpc_url: &str) -> NetworkResult<impl Provider> {
    ProviderBuilder::new()
        .on_builtin(rpc_url)
        .await
        .map_err(NetworkError::Provider)
}

/// Creates a provider for the given RPC URL that signs transactions with `signer`. Nonce, gas and
/// chain id are fetched from the node before every transaction.
pub async fn create_provider_with_signer(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> NetworkResult<impl Provider + Clone> {
    ProviderBuilder::new()
        .with_recommended_fillers()
        .filler(WalletFiller::new(EthereumWallet::from(signer)))
        .filler(LoggingFiller::default())
        .on_builtin(rpc_url)
        .await
        .map_err(NetworkError::Provider)
}

/// A noop filler that reports transaction details once it is prepared, just before sending.
#[derive(Copy, Clone, Debug, Default)]
pub struct LoggingFiller {}

impl TxFiller for LoggingFiller {
    type Fillable = ();

    fn status(&self, _tx: &<Ethereum as Network>::TransactionRequest) -> FillerControlFlow {
        FillerControlFlow::Finished
    }

    fn fill_sync(&self, tx: &mut SendableTx<Ethereum>) {
        match tx {
            SendableTx::Builder(tx) => {
                let kind = match tx.to {
                    Some(to) if to.is_call() => "transfer",
                    _ => "deployment",
                };
                tracing::debug!(
                    sender = ?tx.from,
                    to = ?tx.to,
                    value = ?tx.value,
                    nonce = tx.nonce,
                    gas = tx.gas,
                    kind,
                    "Sending a transaction"
                );
            }
            SendableTx::Envelope(_) => {} // Only builders are sent by the bot.
        }
    }

    async fn prepare<P: Provider<T, Ethereum>, T: Transport + Clone>(
        &self,
        _provider: &P,
        _tx: &<Ethereum as Network>::TransactionRequest,
    ) -> TransportResult<Self::Fillable> {
        Ok(())
    }

    async fn fill(
        &self,
        _fillable: Self::Fillable,
        tx: SendableTx<Ethereum>,
    ) -> TransportResult<SendableTx<Ethereum>> {
        Ok(tx)
    }
}
