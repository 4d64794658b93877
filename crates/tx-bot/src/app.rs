use std::{io::Write, time::Duration};

use anyhow::Result;
use contract_builder::Compiler;
use rand::Rng;
use tracing::{debug, info};

use crate::{
    config::BotConfig,
    console::Console,
    network::Network,
    prompt::{Interrupted, Prompter},
    run_state::RunState,
    scheduler::{Scheduler, Wakeup},
    wallet::WalletStore,
};

/// Unit of work of the application loop.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Step {
    Shell,
    Deploy,
    Transactions(RunState),
}

/// What the application loop does once a step is finished.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Continuation {
    Exit,
    Resume { after: Duration, step: Step },
}

/// Operator-facing side of the application: where answers come from, where status lines go and
/// how delays are waited out.
pub struct Session<P, W: Write> {
    pub prompter: P,
    pub console: Console<W>,
    pub scheduler: Scheduler,
}

pub struct App<N, C, R> {
    pub(crate) config: BotConfig,
    pub(crate) wallets: WalletStore,
    pub(crate) network: N,
    pub(crate) compiler: C,
    pub(crate) rng: R,
}

impl<N: Network, C: Compiler, R: Rng> App<N, C, R> {
    pub fn new(config: BotConfig, wallets: WalletStore, network: N, compiler: C, rng: R) -> Self {
        Self {
            config,
            wallets,
            network,
            compiler,
            rng,
        }
    }

    /// Runs steps starting from the shell until one of them finishes the session or the
    /// scheduler is shut down. Interrupting a prompt ends the session as well.
    pub async fn run<P: Prompter, W: Write>(&mut self, session: &mut Session<P, W>) -> Result<()> {
        match self.run_steps(session).await {
            Err(e) if e.is::<Interrupted>() => {
                info!("Prompt interrupted, exiting");
                Ok(())
            }
            result => result,
        }
    }

    async fn run_steps<P: Prompter, W: Write>(
        &mut self,
        session: &mut Session<P, W>,
    ) -> Result<()> {
        let mut step = Step::Shell;
        loop {
            debug!(?step, "Running step");
            let continuation = self.step(step, session).await?;

            match continuation {
                Continuation::Exit => return Ok(()),
                Continuation::Resume { after, step: next } => {
                    if session.scheduler.pause(after).await == Wakeup::Cancelled {
                        info!("Scheduler shut down, exiting");
                        return Ok(());
                    }
                    step = next;
                }
            }
        }
    }

    pub(crate) async fn step<P: Prompter, W: Write>(
        &mut self,
        step: Step,
        session: &mut Session<P, W>,
    ) -> Result<Continuation> {
        match step {
            Step::Shell => self.shell(session).await,
            Step::Deploy => self.deploy(session).await,
            Step::Transactions(state) => self.transactions(state, session).await,
        }
    }

    /// Continuation that brings the operator back to the menu.
    pub(crate) fn back_to_shell(&self) -> Continuation {
        Continuation::Resume {
            after: self.config.timings.restart_delay,
            step: Step::Shell,
        }
    }
}
