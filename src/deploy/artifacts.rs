// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Compiled contract artifacts.
//!
//! Reads the JSON the Hardhat and Foundry toolchains emit per contract. Only
//! the contract name, ABI and creation bytecode are kept.

use alloy_primitives::Bytes;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{RegCcipError, Result};

/// One compiled contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub contract_name: String,
    pub abi: serde_json::Value,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hardhat(Bytes),
    Foundry { object: Bytes },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: Option<String>,
    abi: serde_json::Value,
    bytecode: RawBytecode,
}

impl Artifact {
    pub fn new(contract_name: impl Into<String>, abi: serde_json::Value, bytecode: Bytes) -> Self {
        Self {
            contract_name: contract_name.into(),
            abi,
            bytecode,
        }
    }

    /// Parses an artifact file. `fallback_name` is used when the JSON carries
    /// no `contractName`, as Foundry output does not.
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json)?;
        let bytecode = match raw.bytecode {
            RawBytecode::Hardhat(bytes) => bytes,
            RawBytecode::Foundry { object } => object,
        };

        Ok(Self {
            contract_name: raw.contract_name.unwrap_or_else(|| fallback_name.to_string()),
            abi: raw.abi,
            bytecode,
        })
    }

    /// Creation bytecode followed by ABI-encoded constructor arguments.
    pub fn init_code(&self, constructor_args: &[u8]) -> Bytes {
        [self.bytecode.as_ref(), constructor_args].concat().into()
    }
}

/// Artifacts keyed by contract name.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    by_name: HashMap<String, Artifact>,
}

impl Artifacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, artifact: Artifact) {
        self.by_name.insert(artifact.contract_name.clone(), artifact);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, artifact: Artifact) -> Self {
        self.insert(artifact);
        self
    }

    /// Looks up an artifact by contract name.
    ///
    /// # Errors
    ///
    /// Returns [`RegCcipError::ArtifactNotFound`] if nothing was loaded under `name`.
    pub fn get(&self, name: &str) -> Result<&Artifact> {
        self.by_name
            .get(name)
            .ok_or_else(|| RegCcipError::ArtifactNotFound {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Loads every contract artifact found under `dir`, recursively.
    ///
    /// Build-info, debug (`*.dbg.json`) and bytecode-less (interface or
    /// abstract contract) files are skipped.
    pub async fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref();
        let mut artifacts = Self::new();
        let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    if path.file_name().is_some_and(|name| name != "build-info") {
                        pending.push(path);
                    }
                    continue;
                }

                let Some(stem) = artifact_stem(&path) else {
                    continue;
                };

                let json = tokio::fs::read_to_string(&path).await?;
                match Artifact::from_json(&json, stem) {
                    Ok(artifact) if !artifact.bytecode.is_empty() => {
                        debug!(
                            contract_name = %artifact.contract_name,
                            path = %path.display(),
                            event = "artifact_loaded"
                        );
                        artifacts.insert(artifact);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, event = "artifact_skipped");
                    }
                }
            }
        }

        info!(
            dir = %root.display(),
            count = artifacts.len(),
            event = "artifacts_loaded"
        );

        Ok(artifacts)
    }
}

fn artifact_stem(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    let stem = name.strip_suffix(".json")?;
    (!stem.ends_with(".dbg")).then_some(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hardhat_artifact() {
        let json = r#"{
            "_format": "hh-sol-artifact-1",
            "contractName": "REG",
            "abi": [],
            "bytecode": "0x6080",
            "deployedBytecode": "0x"
        }"#;
        let artifact = Artifact::from_json(json, "ignored").unwrap();
        assert_eq!(artifact.contract_name, "REG");
        assert_eq!(artifact.bytecode, Bytes::from_static(&[0x60, 0x80]));
    }

    #[test]
    fn test_parses_foundry_artifact() {
        let json = r#"{"abi": [], "bytecode": {"object": "0x6080", "linkReferences": {}}}"#;
        let artifact = Artifact::from_json(json, "Router").unwrap();
        assert_eq!(artifact.contract_name, "Router");
        assert_eq!(artifact.bytecode.len(), 2);
    }

    #[test]
    fn test_init_code_appends_args() {
        let artifact = Artifact::new("X", serde_json::json!([]), Bytes::from_static(&[1, 2]));
        assert_eq!(artifact.init_code(&[3]), Bytes::from_static(&[1, 2, 3]));
    }

    #[test]
    fn test_missing_artifact() {
        let err = Artifacts::new().get("ARM").unwrap_err();
        assert!(matches!(err, RegCcipError::ArtifactNotFound { name } if name == "ARM"));
    }

    #[tokio::test]
    async fn test_load_dir_walks_hardhat_layout() {
        let dir = tempfile::tempdir().unwrap();
        let contract_dir = dir.path().join("contracts/REG.sol");
        tokio::fs::create_dir_all(&contract_dir).await.unwrap();
        tokio::fs::write(
            contract_dir.join("REG.json"),
            r#"{"contractName": "REG", "abi": [], "bytecode": "0x6080"}"#,
        )
        .await
        .unwrap();
        tokio::fs::write(contract_dir.join("REG.dbg.json"), r#"{"buildInfo": "x"}"#)
            .await
            .unwrap();
        tokio::fs::write(
            contract_dir.join("IREG.json"),
            r#"{"contractName": "IREG", "abi": [], "bytecode": "0x"}"#,
        )
        .await
        .unwrap();

        let artifacts = Artifacts::load_dir(dir.path()).await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(artifacts.get("REG").is_ok());
    }
}
