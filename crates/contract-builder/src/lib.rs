//! Building a deployable contract out of a single Solidity source file.
//!
//! The source is handed to an external compiler (`solc`, through its standard-JSON interface)
//! together with every dependency it imports. Dependencies are looked up in a local package
//! directory (usually `node_modules`).

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

pub use crate::{
    artifact::ContractArtifact,
    imports::{find_imports, CollectedSources, ImportResolver, Resolution},
    solc::{
        CompilerOutput, ContractOutput, Diagnostic, Solc, Source, StandardJsonInput,
        DEFAULT_SOLC_BINARY,
    },
};

mod artifact;
mod imports;
mod solc;

/// Errors that can occur while building a contract artifact.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("Contract source {0:?} not found")]
    SourceNotFound(PathBuf),

    #[error("Failed to read contract source {path:?}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Compiler `{0}` could not be found")]
    CompilerNotFound(String),

    #[error("Compiler invocation failed: {0}")]
    CompilerFailed(String),

    #[error("Compiler produced unexpected output: {0}")]
    InvalidOutput(#[from] serde_json::Error),

    #[error("Compilation failed:\n{}", .0.join("\n"))]
    Diagnostics(Vec<String>),

    #[error("No contract was compiled from {0}")]
    NoContract(String),

    #[error("Contract {0} has empty bytecode (is it abstract or an interface?)")]
    EmptyBytecode(String),

    #[error("Contract {name} has malformed bytecode: {source}")]
    InvalidBytecode {
        name: String,
        #[source]
        source: hex::FromHexError,
    },
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Anything that can turn a standard-JSON compiler input into a compiler output.
pub trait Compiler {
    fn compile(&self, input: &StandardJsonInput) -> BuildResult<CompilerOutput>;
}

/// Build the first contract defined in the source file at `resolver`'s main unit.
///
/// Returns [`BuildError::SourceNotFound`] without touching the compiler when the file is absent.
pub fn build_contract(
    source_path: &Path,
    resolver: &ImportResolver,
    compiler: &impl Compiler,
) -> BuildResult<ContractArtifact> {
    if !source_path.is_file() {
        return Err(BuildError::SourceNotFound(source_path.to_path_buf()));
    }
    let content = fs::read_to_string(source_path).map_err(|source| BuildError::UnreadableSource {
        path: source_path.to_path_buf(),
        source,
    })?;

    let unit_name = main_unit_name(source_path);
    let sources = resolver.collect_sources(&unit_name, content);
    for missing in &sources.missing {
        warn!(import = %missing, "Dependency not found in the package directory");
    }

    let input = StandardJsonInput::new(sources.units);
    debug!(unit = %unit_name, sources = input.sources.len(), "Compiling contract source");
    let output = compiler.compile(&input)?;

    let errors = output.errors();
    if !errors.is_empty() {
        return Err(BuildError::Diagnostics(errors));
    }
    for warning in output.warnings() {
        warn!("{warning}");
    }

    ContractArtifact::first_in_unit(&output, &unit_name)
}

/// Name of the in-memory module the main source is registered under.
fn main_unit_name(source_path: &Path) -> String {
    source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use assert2::{assert, let_assert};
    use tempfile::TempDir;

    use super::*;

    /// Returns a canned output and counts invocations.
    struct CannedCompiler {
        output: &'static str,
        calls: Cell<usize>,
    }

    impl CannedCompiler {
        fn new(output: &'static str) -> Self {
            Self {
                output,
                calls: Cell::new(0),
            }
        }
    }

    impl Compiler for CannedCompiler {
        fn compile(&self, _input: &StandardJsonInput) -> BuildResult<CompilerOutput> {
            self.calls.set(self.calls.get() + 1);
            Ok(serde_json::from_str(self.output)?)
        }
    }

    fn source_in(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("auto.sol");
        fs::write(&path, "pragma solidity ^0.8.20;\ncontract Token {}\n").unwrap();
        path
    }

    #[test]
    fn missing_source_does_not_reach_compiler() {
        let dir = TempDir::new().unwrap();
        let compiler = CannedCompiler::new("{}");
        let resolver = ImportResolver::new(dir.path().join("node_modules"));

        let result = build_contract(&dir.path().join("absent.sol"), &resolver, &compiler);

        assert!(let Err(BuildError::SourceNotFound(_)) = result);
        assert!(compiler.calls.get() == 0);
    }

    #[test]
    fn empty_bytecode_is_rejected() {
        let dir = TempDir::new().unwrap();
        let compiler = CannedCompiler::new(
            r#"{"contracts":{"auto.sol":{"IToken":{"abi":[],"evm":{"bytecode":{"object":""}}}}}}"#,
        );
        let resolver = ImportResolver::new(dir.path().join("node_modules"));

        let result = build_contract(&source_in(&dir), &resolver, &compiler);

        let_assert!(Err(BuildError::EmptyBytecode(name)) = result);
        assert!(name == "IToken");
        assert!(compiler.calls.get() == 1);
    }

    #[test]
    fn compiler_errors_are_reported() {
        let dir = TempDir::new().unwrap();
        let compiler = CannedCompiler::new(
            r#"{"errors":[
                {"severity":"warning","message":"unused variable"},
                {"severity":"error","message":"Source not found","formattedMessage":"ParserError: Source \"x.sol\" not found"}
            ]}"#,
        );
        let resolver = ImportResolver::new(dir.path().join("node_modules"));

        let result = build_contract(&source_in(&dir), &resolver, &compiler);

        let_assert!(Err(BuildError::Diagnostics(errors)) = result);
        assert!(errors == vec!["ParserError: Source \"x.sol\" not found".to_string()]);
    }

    #[test]
    fn first_contract_is_selected() {
        let dir = TempDir::new().unwrap();
        let compiler = CannedCompiler::new(
            r#"{"contracts":{
                "auto.sol":{
                    "MyToken":{"abi":[{"type":"constructor","inputs":[]}],"evm":{"bytecode":{"object":"6080"}}},
                    "Zeta":{"abi":[],"evm":{"bytecode":{"object":"6001"}}}
                },
                "@openzeppelin/contracts/token/ERC20/ERC20.sol":{
                    "ERC20":{"abi":[],"evm":{"bytecode":{"object":"60aa"}}}
                }
            }}"#,
        );
        let resolver = ImportResolver::new(dir.path().join("node_modules"));

        let artifact = build_contract(&source_in(&dir), &resolver, &compiler).unwrap();

        assert!(artifact.name == "MyToken");
        assert!(artifact.bytecode.to_vec() == vec![0x60u8, 0x80]);
    }
}
