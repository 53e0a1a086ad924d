// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

use crate::permit::PermitField;

#[derive(Error, Debug)]
pub enum RegCcipError {
    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Could not resolve permit field `{field}`: {reason}")]
    FieldResolution { field: PermitField, reason: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("No deployment recorded for {name}")]
    DeploymentNotFound { name: String },

    #[error("No compiled artifact for {name}")]
    ArtifactNotFound { name: String },

    #[error("Value provided is not a valid address: {value}")]
    InvalidAddress { value: String },

    #[error("Missing environment variable {name}")]
    MissingEnv { name: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Typed data error: {0}")]
    TypedData(#[from] alloy_dyn_abi::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<alloy_signer::Error> for RegCcipError {
    fn from(err: alloy_signer::Error) -> Self {
        RegCcipError::Signing(err.to_string())
    }
}

impl From<alloy_contract::Error> for RegCcipError {
    fn from(err: alloy_contract::Error) -> Self {
        RegCcipError::ContractCall(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RegCcipError>;
