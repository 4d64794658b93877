//! Test doubles and fixtures shared by the orchestrator tests.

use std::{
    collections::{HashSet, VecDeque},
    fs,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use alloy_primitives::{address, Address, Bytes, TxHash, B256, U256};
use anyhow::{bail, Result};
use contract_builder::{BuildResult, Compiler, CompilerOutput, StandardJsonInput};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use tempfile::TempDir;

use crate::{
    addresses::AddressList,
    app::{App, Session},
    config::{BotConfig, FileConfig, KeySource, LoggingFormat, RepeatPolicy, Timings},
    console::Console,
    network::{Deployment, Network, NetworkError, NetworkResult},
    prompt::{Interrupted, Prompter},
    scheduler::Scheduler,
    wallet::{Wallet, WalletStore},
};

pub const ACCOUNT_1: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const ACCOUNT_2: &str = "0x5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a";
pub const RECIPIENT_1: Address = address!("000000000000000000000000000000000000dEaD");
pub const RECIPIENT_2: Address = address!("2222222222222222222222222222222222222222");

pub type TestApp = App<MockNetwork, CannedCompiler, StdRng>;

// ---- Network. ---------------------------------------------------------------------------------

#[derive(Default)]
struct MockState {
    balance_queries: AtomicUsize,
    transfer_attempts: AtomicUsize,
    transfers: Mutex<Vec<(Address, Address, U256)>>,
    deploys: Mutex<Vec<(Address, Bytes)>>,
    failing_balances: Mutex<HashSet<Address>>,
    failing_transfer_attempts: Mutex<HashSet<usize>>,
    failing_deployers: Mutex<HashSet<Address>>,
    stalled_balances: AtomicBool,
    stalled_transfers: AtomicBool,
    stalled_deploys: AtomicBool,
}

/// Models a node that accepts the call and never answers.
async fn stall_if(flag: &AtomicBool) {
    if flag.load(Ordering::SeqCst) {
        std::future::pending::<()>().await;
    }
}

/// Records every call. Handles are cheap clones sharing the same record.
#[derive(Clone, Default)]
pub struct MockNetwork {
    state: Arc<MockState>,
}

fn rejected() -> NetworkError {
    NetworkError::Reverted(TxHash::ZERO)
}

impl MockNetwork {
    pub fn fail_balance_of(&self, address: Address) {
        self.state.failing_balances.lock().unwrap().insert(address);
    }

    /// Makes the given (0-based) transfer attempts fail.
    pub fn fail_transfer_attempts(&self, attempts: &[usize]) {
        self.state
            .failing_transfer_attempts
            .lock()
            .unwrap()
            .extend(attempts);
    }

    pub fn fail_deploys_from(&self, deployer: Address) {
        self.state.failing_deployers.lock().unwrap().insert(deployer);
    }

    pub fn stall_balances(&self) {
        self.state.stalled_balances.store(true, Ordering::SeqCst);
    }

    pub fn stall_transfers(&self) {
        self.state.stalled_transfers.store(true, Ordering::SeqCst);
    }

    pub fn stall_deploys(&self) {
        self.state.stalled_deploys.store(true, Ordering::SeqCst);
    }

    pub fn balance_queries(&self) -> usize {
        self.state.balance_queries.load(Ordering::SeqCst)
    }

    /// `(sender, recipient, value)` of every attempted transfer.
    pub fn transfers(&self) -> Vec<(Address, Address, U256)> {
        self.state.transfers.lock().unwrap().clone()
    }

    /// `(deployer, creation code)` of every attempted deployment.
    pub fn deploys(&self) -> Vec<(Address, Bytes)> {
        self.state.deploys.lock().unwrap().clone()
    }
}

impl Network for MockNetwork {
    async fn balance(&self, address: Address) -> NetworkResult<U256> {
        self.state.balance_queries.fetch_add(1, Ordering::SeqCst);
        stall_if(&self.state.stalled_balances).await;
        match self.state.failing_balances.lock().unwrap().contains(&address) {
            true => Err(rejected()),
            false => Ok(U256::from(10).pow(U256::from(18))),
        }
    }

    async fn transfer(&self, wallet: &Wallet, to: Address, value: U256) -> NetworkResult<TxHash> {
        let attempt = self.state.transfer_attempts.fetch_add(1, Ordering::SeqCst);
        self.state
            .transfers
            .lock()
            .unwrap()
            .push((wallet.address(), to, value));
        stall_if(&self.state.stalled_transfers).await;
        match self
            .state
            .failing_transfer_attempts
            .lock()
            .unwrap()
            .contains(&attempt)
        {
            true => Err(rejected()),
            false => Ok(B256::with_last_byte(attempt as u8 + 1)),
        }
    }

    async fn deploy(&self, wallet: &Wallet, creation_code: Bytes) -> NetworkResult<Deployment> {
        let deployer = wallet.address();
        let deployed = {
            let mut deploys = self.state.deploys.lock().unwrap();
            deploys.push((deployer, creation_code));
            deploys.len()
        };
        stall_if(&self.state.stalled_deploys).await;
        if self.state.failing_deployers.lock().unwrap().contains(&deployer) {
            return Err(rejected());
        }
        Ok(Deployment {
            tx_hash: B256::with_last_byte(deployed as u8),
            contract_address: deployer.create(deployed as u64),
        })
    }
}

// ---- Compiler. --------------------------------------------------------------------------------

/// Returns the same output for every input and counts invocations.
#[derive(Clone)]
pub struct CannedCompiler {
    output: CompilerOutput,
    calls: Arc<AtomicUsize>,
}

impl CannedCompiler {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Compiler for CannedCompiler {
    fn compile(&self, _input: &StandardJsonInput) -> BuildResult<CompilerOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.clone())
    }
}

fn token_output(bytecode: &str, constructor_inputs: usize) -> CompilerOutput {
    let inputs: Vec<_> = (0..constructor_inputs)
        .map(|i| json!({ "name": format!("arg{i}"), "type": "uint256" }))
        .collect();
    serde_json::from_value(json!({
        "contracts": {
            "auto.sol": {
                "MyToken": {
                    "abi": [{ "type": "constructor", "inputs": inputs }],
                    "evm": { "bytecode": { "object": bytecode } }
                }
            }
        }
    }))
    .unwrap()
}

/// A token with a 4-argument constructor and `0x6080` bytecode.
pub fn canned_token() -> CompilerOutput {
    token_output("6080", 4)
}

pub fn token_with_bytecode(bytecode: &str) -> CompilerOutput {
    token_output(bytecode, 4)
}

pub fn token_with_constructor_inputs(inputs: usize) -> CompilerOutput {
    token_output("6080", inputs)
}

// ---- Prompter. --------------------------------------------------------------------------------

/// Answers prompts from a fixed script. Running out of answers is an error, unless configured to
/// behave like an operator pressing Ctrl-C.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    interrupt_when_exhausted: bool,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            interrupt_when_exhausted: false,
        }
    }

    pub fn interrupt_when_exhausted(&mut self) {
        self.interrupt_when_exhausted = true;
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        match self.answers.pop_front() {
            Some(answer) => Ok(answer.trim().to_string()),
            None if self.interrupt_when_exhausted => Err(Interrupted.into()),
            None => bail!("Unexpected prompt: {question}"),
        }
    }
}

// ---- Fixtures. --------------------------------------------------------------------------------

pub fn test_config() -> BotConfig {
    let missing = PathBuf::from("/nonexistent/tx-bot");
    BotConfig {
        logging_format: LoggingFormat::Text,
        rpc_url: "http://localhost:8545".to_string(),
        keys: KeySource::Inline(vec![]),
        files: FileConfig {
            contract_source: missing.join("auto.sol"),
            package_dir: missing.join("node_modules"),
            solc_path: PathBuf::from("solc"),
            burn_addresses: missing.join("burnAddress.txt"),
            kyc_addresses: missing.join("KycAddress.txt"),
        },
        timings: Timings::default(),
        repeat_policy: RepeatPolicy::Confirm,
        rng_seed: Some(7),
    }
}

/// App over a mock network and a canned compiler. The returned handles observe the app's
/// collaborators.
pub fn test_app(keys: &[&str], output: CompilerOutput) -> (TestApp, MockNetwork, CannedCompiler) {
    let network = MockNetwork::default();
    let compiler = CannedCompiler {
        output,
        calls: Arc::default(),
    };
    let wallets = WalletStore::from_keys(keys).unwrap();
    let app = App::new(
        test_config(),
        wallets,
        network.clone(),
        compiler.clone(),
        StdRng::seed_from_u64(7),
    );
    (app, network, compiler)
}

pub fn session(answers: &[&str]) -> Session<ScriptedPrompter, Vec<u8>> {
    Session {
        prompter: ScriptedPrompter::new(answers),
        console: Console::new(Vec::new()),
        scheduler: Scheduler::new(),
    }
}

/// Everything the session printed.
pub fn printed(session: Session<ScriptedPrompter, Vec<u8>>) -> String {
    String::from_utf8(session.console.into_inner()).unwrap()
}

fn write_list(file_name: &str, addresses: &[Address]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    let content: Vec<_> = addresses.iter().map(Address::to_string).collect();
    fs::write(&path, content.join("\n")).unwrap();
    (dir, path)
}

impl TestApp {
    pub fn with_burn_list(&mut self, addresses: &[Address]) -> (TempDir, AddressList) {
        let (dir, path) = write_list("burnAddress.txt", addresses);
        self.config.files.burn_addresses = path.clone();
        (dir, AddressList::load(path).unwrap())
    }

    pub fn with_kyc_list(&mut self, addresses: &[Address]) -> (TempDir, AddressList) {
        let (dir, path) = write_list("KycAddress.txt", addresses);
        self.config.files.kyc_addresses = path.clone();
        (dir, AddressList::load(path).unwrap())
    }

    /// Places a contract source on disk. Its content is irrelevant to the canned compiler.
    pub fn with_contract_source(&mut self) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auto.sol");
        fs::write(
            &path,
            "// SPDX-License-Identifier: MIT\npragma solidity ^0.8.20;\ncontract MyToken {}\n",
        )
        .unwrap();
        self.config.files.contract_source = path;
        dir
    }
}
