//! One-shot deployment of the token contract from every wallet.

use std::io::Write;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use anyhow::Result;
use contract_builder::{build_contract, BuildResult, Compiler, ContractArtifact, ImportResolver};
use rand::Rng;
use tracing::{error, info};

use crate::{
    app::{App, Continuation, Session},
    network::{Deployment, Network},
    prompt::Prompter,
    scheduler::Wakeup,
};

pub const TOKEN_NAME: &str = "MyToken";
pub const TOKEN_SYMBOL: &str = "MTK";
pub const INITIAL_SUPPLY: u64 = 1_000_000;
/// name, symbol, initial supply, owner
pub const CONSTRUCTOR_ARITY: usize = 4;

/// Appends the ABI-encoded constructor arguments to `bytecode`.
pub fn creation_code(bytecode: &Bytes, owner: Address) -> Bytes {
    let arguments = (
        TOKEN_NAME.to_string(),
        TOKEN_SYMBOL.to_string(),
        U256::from(INITIAL_SUPPLY),
        owner,
    )
        .abi_encode_params();
    [bytecode.as_ref(), arguments.as_slice()].concat().into()
}

#[derive(Clone, Debug, Default)]
pub struct DeploymentReport {
    pub deployed: Vec<Deployment>,
    pub failed: usize,
    pub interrupted: bool,
}

impl<N: Network, C: Compiler, R: Rng> App<N, C, R> {
    pub(crate) async fn deploy<P: Prompter, W: Write>(
        &mut self,
        session: &mut Session<P, W>,
    ) -> Result<Continuation> {
        let source = &self.config.files.contract_source;
        session
            .console
            .waiting(format!("Compiling {}...", source.display()));

        let artifact = match self.build_artifact() {
            Ok(artifact) => artifact,
            Err(e) => {
                error!("Contract build failed: {e}");
                session.console.failure(format!("Compilation failed: {e}"));
                return Ok(self.back_to_shell());
            }
        };
        let arity = artifact.constructor_arity();
        if arity != CONSTRUCTOR_ARITY {
            session.console.failure(format!(
                "Contract {} takes {arity} constructor argument(s), expected {CONSTRUCTOR_ARITY} \
                 (name, symbol, initial supply, owner)",
                artifact.name
            ));
            return Ok(self.back_to_shell());
        }
        info!(contract = %artifact.name, bytes = artifact.bytecode.len(), "Contract compiled");

        session.console.waiting(format!(
            "Deploying {} from {} wallet(s)...",
            artifact.name,
            self.wallets.len()
        ));
        let report = self.deploy_batch(&artifact.bytecode, session).await;
        if report.interrupted {
            return Ok(Continuation::Exit);
        }

        session.console.celebrate(format!(
            "Deployment finished: {} succeeded, {} failed",
            report.deployed.len(),
            report.failed
        ));
        Ok(Continuation::Exit)
    }

    fn build_artifact(&self) -> BuildResult<ContractArtifact> {
        let files = &self.config.files;
        build_contract(
            &files.contract_source,
            &ImportResolver::new(files.package_dir.clone()),
            &self.compiler,
        )
    }

    /// Deploys from each wallet in order, pausing between consecutive wallets. Failures are
    /// reported and do not stop the batch.
    pub(crate) async fn deploy_batch<P: Prompter, W: Write>(
        &self,
        bytecode: &Bytes,
        session: &mut Session<P, W>,
    ) -> DeploymentReport {
        let mut report = DeploymentReport::default();
        let wallets = self.wallets.wallets();

        for (index, wallet) in wallets.iter().enumerate() {
            let owner = wallet.address();
            session.console.info(format!(
                "🔹 Deploying from wallet {}/{}: {owner}",
                index + 1,
                wallets.len()
            ));

            let submission = self.network.deploy(wallet, creation_code(bytecode, owner));
            let Some(result) = session.scheduler.unless_shut_down(submission).await else {
                session
                    .console
                    .failure("Shutting down, deployment left unconfirmed");
                report.interrupted = true;
                break;
            };
            match result {
                Ok(deployment) => {
                    info!(
                        %owner,
                        contract = %deployment.contract_address,
                        tx_hash = %deployment.tx_hash,
                        "Contract deployed"
                    );
                    session.console.success(format!(
                        "Contract deployed at {}",
                        deployment.contract_address
                    ));
                    report.deployed.push(deployment);
                }
                Err(e) => {
                    error!(%owner, "Deployment failed: {e}");
                    session
                        .console
                        .failure(format!("Deployment from {owner} failed: {e}"));
                    report.failed += 1;
                }
            }

            if index + 1 < wallets.len() {
                let delay = self.config.timings.deployment_delay;
                session.console.waiting(format!(
                    "Waiting {}s before the next wallet...",
                    delay.as_secs()
                ));
                if session.scheduler.pause(delay).await == Wakeup::Cancelled {
                    report.interrupted = true;
                    break;
                }
            }
        }
        report
    }
}
