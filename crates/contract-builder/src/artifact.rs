use alloy_primitives::Bytes;

use crate::{BuildError, BuildResult, CompilerOutput};

/// ABI and creation bytecode of a compiled contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    pub name: String,
    pub abi: serde_json::Value,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Take the first contract (in name order) that the compiler produced for `unit`.
    pub fn first_in_unit(output: &CompilerOutput, unit: &str) -> BuildResult<Self> {
        let (name, contract) = output
            .contracts
            .get(unit)
            .and_then(|contracts| contracts.iter().next())
            .ok_or_else(|| BuildError::NoContract(unit.to_string()))?;

        let object = contract.evm.bytecode.object.trim();
        let object = object.strip_prefix("0x").unwrap_or(object);
        if object.is_empty() {
            return Err(BuildError::EmptyBytecode(name.clone()));
        }
        let bytecode = hex::decode(object).map_err(|source| BuildError::InvalidBytecode {
            name: name.clone(),
            source,
        })?;

        Ok(Self {
            name: name.clone(),
            abi: contract.abi.clone(),
            bytecode: bytecode.into(),
        })
    }

    /// Number of constructor parameters declared in the ABI. A contract without an explicit
    /// constructor takes none.
    pub fn constructor_arity(&self) -> usize {
        self.abi
            .as_array()
            .into_iter()
            .flatten()
            .find(|item| item["type"] == "constructor")
            .and_then(|constructor| constructor["inputs"].as_array())
            .map_or(0, Vec::len)
    }
}
