use std::{
    collections::BTreeMap,
    io,
    io::Write,
    path::PathBuf,
    process::{Command, Stdio},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{BuildError, BuildResult, Compiler};

pub const DEFAULT_SOLC_BINARY: &str = "solc";

/// Standard-JSON compiler input. Only the parts we need are modelled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StandardJsonInput {
    pub language: &'static str,
    pub sources: BTreeMap<String, Source>,
    pub settings: Settings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Source {
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl StandardJsonInput {
    /// Request ABI and creation bytecode for every contract in `sources`.
    pub fn new(sources: BTreeMap<String, Source>) -> Self {
        let selection = BTreeMap::from([(
            "*".to_string(),
            BTreeMap::from([(
                "*".to_string(),
                vec!["abi".to_string(), "evm.bytecode.object".to_string()],
            )]),
        )]);
        Self {
            language: "Solidity",
            sources,
            settings: Settings {
                output_selection: selection,
            },
        }
    }
}

/// Standard-JSON compiler output.
///
/// Contracts are kept in name order, the same order `solc` emits them in.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompilerOutput {
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: String,
    pub message: String,
    #[serde(default)]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    fn is_error(&self) -> bool {
        self.severity.eq_ignore_ascii_case("error")
    }

    fn render(&self) -> String {
        self.formatted_message
            .clone()
            .unwrap_or_else(|| self.message.clone())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ContractOutput {
    #[serde(default)]
    pub abi: serde_json::Value,
    pub evm: EvmOutput,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EvmOutput {
    pub bytecode: BytecodeOutput,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BytecodeOutput {
    #[serde(default)]
    pub object: String,
}

impl CompilerOutput {
    pub fn errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter(|d| d.is_error())
            .map(Diagnostic::render)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter(|d| !d.is_error())
            .map(Diagnostic::render)
            .collect()
    }
}

/// The `solc` executable driven through `--standard-json`.
#[derive(Clone, Debug)]
pub struct Solc {
    binary: PathBuf,
}

impl Default for Solc {
    fn default() -> Self {
        Self::new(DEFAULT_SOLC_BINARY)
    }
}

impl Solc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Compiler for Solc {
    fn compile(&self, input: &StandardJsonInput) -> BuildResult<CompilerOutput> {
        let binary = self.binary.display().to_string();
        let mut process = match Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .arg("--standard-json")
            .spawn()
        {
            Ok(process) => process,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(BuildError::CompilerNotFound(binary));
            }
            Err(err) => {
                return Err(BuildError::CompilerFailed(format!(
                    "failed to spawn `{binary}`: {err}"
                )));
            }
        };

        let payload = serde_json::to_vec(input)?;
        let mut stdin = process
            .stdin
            .take()
            .ok_or_else(|| BuildError::CompilerFailed("stdin of the compiler is closed".into()))?;
        stdin
            .write_all(&payload)
            .map_err(|err| BuildError::CompilerFailed(format!("writing input failed: {err}")))?;
        drop(stdin);

        let output = process
            .wait_with_output()
            .map_err(|err| BuildError::CompilerFailed(err.to_string()))?;
        debug!(status = ?output.status, "Compiler finished");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::CompilerFailed(format!(
                "`{binary}` exited with {}: {stderr}",
                output.status
            )));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
