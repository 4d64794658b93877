use std::{io::Write, str::FromStr, time::Duration};

use alloy_primitives::utils::format_ether;
use anyhow::Result;
use contract_builder::Compiler;
use rand::Rng;
use tracing::warn;

use crate::{
    app::{App, Continuation, Session, Step},
    network::Network,
    prompt::Prompter,
    run_state::RunState,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MenuChoice {
    Deploy,
    Transactions,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Deploy),
            "2" => Ok(Self::Transactions),
            _ => Err(()),
        }
    }
}

impl<N: Network, C: Compiler, R: Rng> App<N, C, R> {
    /// Banner, wallet overview and the main menu.
    pub(crate) async fn shell<P: Prompter, W: Write>(
        &mut self,
        session: &mut Session<P, W>,
    ) -> Result<Continuation> {
        let console = &mut session.console;
        console.clear();
        console.banner();
        console.heading("Wallets");

        for (index, wallet) in self.wallets.wallets().iter().enumerate() {
            let address = wallet.address();
            let Some(result) = session
                .scheduler
                .unless_shut_down(self.network.balance(address))
                .await
            else {
                return Ok(Continuation::Exit);
            };
            match result {
                Ok(balance) => console.info(format!(
                    "{}. {address}: {} ETH",
                    index + 1,
                    format_ether(balance)
                )),
                Err(e) => {
                    warn!(%address, "Balance query failed: {e}");
                    console.failure(format!(
                        "{}. {address}: couldn't fetch balance: {e}",
                        index + 1
                    ));
                }
            }
        }

        console.info("");
        console.heading("Menu");
        console.option("1", "Deploy the token contract from every wallet (one-shot)");
        console.option("2", "Send automatic transactions");

        let answer = session.prompter.ask("Choose an option:")?;
        match MenuChoice::from_str(&answer) {
            Ok(MenuChoice::Deploy) => Ok(Continuation::Resume {
                after: Duration::ZERO,
                step: Step::Deploy,
            }),
            Ok(MenuChoice::Transactions) => Ok(Continuation::Resume {
                after: Duration::ZERO,
                step: Step::Transactions(RunState::default()),
            }),
            Err(()) => {
                session.console.failure(format!(
                    "Invalid option `{answer}`. Restarting in {}s...",
                    self.config.timings.restart_delay.as_secs()
                ));
                Ok(self.back_to_shell())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert2::{assert, let_assert};

    use super::*;
    use crate::testing::*;

    #[tokio::test]
    async fn every_wallet_is_listed_even_when_a_query_fails() {
        let (mut app, network, _) = test_app(&[ACCOUNT_1, ACCOUNT_2], canned_token());
        network.fail_balance_of(app.wallets.wallets()[0].address());
        let mut session = session(&["2"]);

        let continuation = app.step(Step::Shell, &mut session).await;

        let_assert!(
            Ok(Continuation::Resume { step: Step::Transactions(state), .. }) = continuation
        );
        assert!(state == RunState::default());
        assert!(network.balance_queries() == 2);
        let output = printed(session);
        assert!(output.contains("couldn't fetch balance"));
        assert!(output.contains(&app.wallets.wallets()[1].address().to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_ends_a_balance_query_that_never_answers() {
        let (mut app, network, _) = test_app(&[ACCOUNT_1, ACCOUNT_2], canned_token());
        network.stall_balances();
        let mut session = session(&[]);
        let remote = session.scheduler.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            remote.shutdown();
        });

        let continuation = app.step(Step::Shell, &mut session).await;

        assert!(let Ok(Continuation::Exit) = continuation);
        assert!(network.balance_queries() == 1);
    }

    #[tokio::test]
    async fn deploy_option_is_dispatched() {
        let (mut app, _, _) = test_app(&[ACCOUNT_1], canned_token());
        let mut session = session(&[" 1 "]);

        let continuation = app.step(Step::Shell, &mut session).await;

        assert!(let Ok(Continuation::Resume { step: Step::Deploy, .. }) = continuation);
    }

    #[tokio::test]
    async fn invalid_option_goes_back_after_restart_delay() {
        let (mut app, _, _) = test_app(&[ACCOUNT_1], canned_token());
        let mut session = session(&["deploy"]);

        let continuation = app.step(Step::Shell, &mut session).await;

        let_assert!(Ok(Continuation::Resume { after, step: Step::Shell }) = continuation);
        assert!(after == Duration::from_secs(3));
    }
}
