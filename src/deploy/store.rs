// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
//! Deployment records and the stores that hold them.

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::error::Result;
use crate::traits::DeploymentStore;

/// What is remembered about one deployed contract.
///
/// Serialized in the hardhat-deploy layout so the files stay readable by
/// the usual JS tooling.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub address: Address,
    /// Logic contract behind `address` when it is a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<Address>,
    #[builder(default)]
    #[serde(default)]
    pub abi: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<TxHash>,
    /// Constructor arguments, or initializer arguments for proxies.
    #[builder(default)]
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl DeploymentRecord {
    pub fn is_proxy(&self) -> bool {
        self.implementation.is_some()
    }
}

/// Process-local store, used for fixtures and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryDeploymentStore {
    records: Arc<Mutex<BTreeMap<String, DeploymentRecord>>>,
}

impl MemoryDeploymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, DeploymentRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DeploymentStore for MemoryDeploymentStore {
    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        Ok(self.records().get(name).cloned())
    }

    async fn save(&self, name: &str, record: DeploymentRecord) -> Result<()> {
        self.records().insert(name.to_string(), record);
        Ok(())
    }

    async fn names(&self) -> Result<Vec<String>> {
        Ok(self.records().keys().cloned().collect())
    }
}

/// One JSON file per deployment, `<dir>/<Name>.json`.
///
/// `dir` is normally a per-chain directory such as `deployments/sepolia`,
/// see [`DeployConfig::chain_deployments_dir`](crate::DeployConfig::chain_deployments_dir).
#[derive(Debug, Clone)]
pub struct JsonDeploymentStore {
    dir: PathBuf,
}

impl JsonDeploymentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl DeploymentStore for JsonDeploymentStore {
    async fn get(&self, name: &str) -> Result<Option<DeploymentRecord>> {
        match tokio::fs::read(self.path(name)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, name: &str, record: DeploymentRecord) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path(name);
        tokio::fs::write(&path, serde_json::to_vec_pretty(&record)?).await?;

        debug!(
            name = name,
            path = %path.display(),
            address = %record.address,
            event = "deployment_saved"
        );

        Ok(())
    }

    async fn names(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(|file| file.strip_suffix(".json"))
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(last_byte: u8) -> DeploymentRecord {
        DeploymentRecord::builder()
            .address(Address::with_last_byte(last_byte))
            .build()
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryDeploymentStore::new();
        store.save("ARM", record(1)).await.unwrap();
        store.save("ARM", record(2)).await.unwrap();

        let saved = store.get("ARM").await.unwrap().unwrap();
        assert_eq!(saved.address, Address::with_last_byte(2));
        assert_eq!(store.names().await.unwrap(), vec!["ARM".to_string()]);
        assert!(store.get("Router").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_json_store_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDeploymentStore::new(dir.path().join("nowhere"));
        assert!(store.names().await.unwrap().is_empty());
        assert!(store.get("REG").await.unwrap().is_none());
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let record = DeploymentRecord::builder()
            .address(Address::with_last_byte(1))
            .implementation(Address::with_last_byte(2))
            .transaction_hash(TxHash::with_last_byte(3))
            .build();
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("transactionHash").is_some());
        assert!(json.get("implementation").is_some());
        assert!(record.is_proxy());
    }
}
