//! Batches of randomized value transfers.

use std::{io::Write, path::PathBuf};

use alloy_primitives::TxHash;
use anyhow::Result;
use contract_builder::Compiler;
use rand::Rng;
use tracing::{error, info};

use crate::{
    addresses::AddressList,
    amount::Amount,
    app::{App, Continuation, Session, Step},
    config::RepeatPolicy,
    network::Network,
    prompt::Prompter,
    run_state::{RecipientMode, RunPlan, RunState},
    scheduler::Wakeup,
};

#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub sent: Vec<TxHash>,
    pub failed: usize,
    pub interrupted: bool,
}

impl<N: Network, C: Compiler, R: Rng> App<N, C, R> {
    pub(crate) async fn transactions<P: Prompter, W: Write>(
        &mut self,
        state: RunState,
        session: &mut Session<P, W>,
    ) -> Result<Continuation> {
        let plan = match state.plan {
            Some(plan) => plan,
            None => ask_plan(session)?,
        };

        let recipients = match AddressList::load(self.recipients_file(plan.mode)) {
            Ok(recipients) => recipients,
            Err(e) => {
                error!("Couldn't load {}: {e}", plan.mode);
                session.console.failure(e.to_string());
                return Ok(self.back_to_shell());
            }
        };
        for line in recipients.skipped() {
            session.console.failure(format!(
                "Skipping invalid address on line {}: `{}`",
                line.number, line.content
            ));
        }

        session.console.info(format!(
            "🚀 Starting {} transaction(s) to {} ({} loaded)",
            plan.count,
            plan.mode,
            recipients.len()
        ));
        let summary = self.send_batch(plan.count, &recipients, session).await;
        if summary.interrupted {
            return Ok(Continuation::Exit);
        }
        session.console.celebrate(format!(
            "All transactions finished: {} succeeded, {} failed",
            summary.sent.len(),
            summary.failed
        ));

        self.repeat(plan, session)
    }

    fn recipients_file(&self, mode: RecipientMode) -> PathBuf {
        match mode {
            RecipientMode::Burn => self.config.files.burn_addresses.clone(),
            RecipientMode::Kyc => self.config.files.kyc_addresses.clone(),
        }
    }

    /// Sends `count` transfers, one at a time, each followed by a pause. A failed transfer is
    /// reported and the batch goes on.
    pub(crate) async fn send_batch<P: Prompter, W: Write>(
        &mut self,
        count: u32,
        recipients: &AddressList,
        session: &mut Session<P, W>,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let delay = self.config.timings.transaction_delay;

        for number in 1..=count {
            let wallet = self.wallets.pick(&mut self.rng);
            let recipient = recipients.pick(&mut self.rng);
            let amount = Amount::sample(&mut self.rng);

            session.console.info(format!(
                "🔹 Transaction {number}/{count} from {}",
                wallet.address()
            ));
            session
                .console
                .info(format!("➡ Sending {amount} ETH to {recipient}"));

            let transfer = self.network.transfer(wallet, recipient, amount.to_wei());
            let Some(result) = session.scheduler.unless_shut_down(transfer).await else {
                session
                    .console
                    .failure("Shutting down, transaction left unconfirmed");
                summary.interrupted = true;
                break;
            };
            match result {
                Ok(tx_hash) => {
                    info!(
                        sender = %wallet.address(),
                        %recipient,
                        %amount,
                        %tx_hash,
                        "Transfer confirmed"
                    );
                    session
                        .console
                        .success(format!("Success! Transaction hash: {tx_hash}"));
                    summary.sent.push(tx_hash);
                }
                Err(e) => {
                    error!(
                        sender = %wallet.address(),
                        %recipient,
                        %amount,
                        "Transfer failed: {e}"
                    );
                    session.console.failure(format!("Transaction failed: {e}"));
                    summary.failed += 1;
                }
            }

            session.console.waiting(format!(
                "Waiting {}s before the next transaction...",
                delay.as_secs()
            ));
            if session.scheduler.pause(delay).await == Wakeup::Cancelled {
                summary.interrupted = true;
                break;
            }
        }
        summary
    }

    fn repeat<P: Prompter, W: Write>(
        &self,
        plan: RunPlan,
        session: &mut Session<P, W>,
    ) -> Result<Continuation> {
        let timings = &self.config.timings;
        match self.config.repeat_policy {
            RepeatPolicy::Confirm => {
                let answer = session.prompter.ask("Repeat after 24 hours? (y/n)")?;
                if answer.eq_ignore_ascii_case("y") {
                    session.console.waiting("Waiting 24 hours before the next run...");
                    Ok(Continuation::Resume {
                        after: timings.repeat_delay,
                        step: Step::Transactions(RunState::default()),
                    })
                } else {
                    session.console.info("👋 Done, exiting.");
                    Ok(Continuation::Exit)
                }
            }
            RepeatPolicy::Continuous => {
                session.console.waiting(format!(
                    "Next batch in {}s...",
                    timings.continuous_delay.as_secs()
                ));
                Ok(Continuation::Resume {
                    after: timings.continuous_delay,
                    step: Step::Transactions(RunState { plan: Some(plan) }),
                })
            }
        }
    }
}

/// Asks for the recipient mode and the number of transactions until both answers are valid.
fn ask_plan<P: Prompter, W: Write>(session: &mut Session<P, W>) -> Result<RunPlan> {
    let mode = loop {
        let answer = session
            .prompter
            .ask("Transaction mode (1: burn addresses, 2: KYC wallets):")?;
        match answer.parse::<RecipientMode>() {
            Ok(mode) => break mode,
            Err(()) => session
                .console
                .failure(format!("Invalid mode `{answer}`, choose 1 or 2")),
        }
    };

    let count = loop {
        let answer = session.prompter.ask("Number of transactions:")?;
        match answer.parse::<u32>() {
            Ok(count) if count > 0 => break count,
            _ => session
                .console
                .failure(format!("Invalid number `{answer}`, expected a positive integer")),
        }
    };

    Ok(RunPlan { mode, count })
}
