// SPDX-FileCopyrightText: 2025 RealT
//
// SPDX-License-Identifier: Apache-2.0
use alloy_dyn_abi::eip712::TypedData;
use alloy_primitives::{Address, B256, U256};
use alloy_signer::Signer;
use alloy_sol_types::{Eip712Domain, SolStruct};
use tracing::{debug, info, Instrument};

use super::{Permit, PermitConfig, PermitField, PermitSignature};
use crate::error::{RegCcipError, Result};
use crate::spans;
use crate::traits::{ChainProvider, PermitToken};

/// The EIP-712 domain a permit is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl PermitDomain {
    pub fn eip712_domain(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(self.name.clone().into()),
            Some(self.version.clone().into()),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    /// The token's `DOMAIN_SEPARATOR()` for this domain.
    pub fn separator(&self) -> B256 {
        self.eip712_domain().separator()
    }
}

/// A fully resolved permit, ready to be signed or checked.
///
/// Any change to a field, including any domain field, yields a different
/// [`signing_hash`](Self::signing_hash) and so invalidates signatures made
/// over the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitRequest {
    pub owner: Address,
    pub spender: Address,
    pub value: U256,
    pub nonce: U256,
    pub deadline: U256,
    pub domain: PermitDomain,
}

impl PermitRequest {
    /// Resolves the nonce, domain name and chain id that `config` leaves open.
    ///
    /// Lookups are issued one at a time; the first that fails aborts the
    /// resolution with [`RegCcipError::FieldResolution`] naming the field.
    pub async fn resolve<T, N>(
        owner: Address,
        spender: Address,
        value: U256,
        deadline: U256,
        token: &T,
        network: &N,
        config: &PermitConfig,
    ) -> Result<Self>
    where
        T: PermitToken + ?Sized,
        N: ChainProvider + ?Sized,
    {
        let verifying_contract = token.address();
        let span = spans::resolve_permit(&owner, &spender, &verifying_contract);

        async move {
            let nonce = match config.nonce {
                Some(nonce) => nonce,
                None => token
                    .nonces(owner)
                    .await
                    .map_err(|e| field_error(PermitField::Nonce, e))?,
            };

            let name = match &config.name {
                Some(name) => name.clone(),
                None => token
                    .name()
                    .await
                    .map_err(|e| field_error(PermitField::Name, e))?,
            };

            let chain_id = match config.chain_id {
                Some(chain_id) => chain_id,
                None => network
                    .chain_id()
                    .await
                    .map_err(|e| field_error(PermitField::ChainId, e))?,
            };

            debug!(
                owner = %owner,
                nonce = %nonce,
                name = %name,
                chain_id = chain_id,
                verifying_contract = %verifying_contract,
                event = "permit_fields_resolved"
            );

            Ok(Self {
                owner,
                spender,
                value,
                nonce,
                deadline,
                domain: PermitDomain {
                    name,
                    version: config.version().to_string(),
                    chain_id,
                    verifying_contract,
                },
            })
        }
        .instrument(span)
        .await
    }

    /// The `Permit` struct as the token hashes it.
    pub fn permit(&self) -> Permit {
        Permit {
            owner: self.owner,
            spender: self.spender,
            value: self.value,
            nonce: self.nonce,
            deadline: self.deadline,
        }
    }

    /// The EIP-712 digest a valid signature must be made over.
    pub fn signing_hash(&self) -> B256 {
        self.permit().eip712_signing_hash(&self.domain.eip712_domain())
    }

    /// The request as an `eth_signTypedData_v4` document.
    ///
    /// Useful for handing the payload to an external wallet; its signing
    /// hash is identical to [`signing_hash`](Self::signing_hash).
    pub fn typed_data(&self) -> TypedData {
        TypedData::from_struct(&self.permit(), Some(self.domain.eip712_domain()))
    }

    /// Signs the request with `signer`, which must hold the owner's key.
    ///
    /// # Errors
    ///
    /// Returns [`RegCcipError::Signing`] if `signer` is not the owner or the
    /// signer fails to produce a typed-data signature.
    pub async fn sign<S>(&self, signer: &S) -> Result<PermitSignature>
    where
        S: Signer + Send + Sync,
    {
        let signer_address = signer.address();
        if signer_address != self.owner {
            return Err(RegCcipError::Signing(format!(
                "signer {signer_address} cannot sign for owner {}",
                self.owner
            )));
        }

        let signature = signer
            .sign_typed_data(&self.permit(), &self.domain.eip712_domain())
            .await?;

        info!(
            owner = %self.owner,
            spender = %self.spender,
            value = %self.value,
            nonce = %self.nonce,
            deadline = %self.deadline,
            verifying_contract = %self.domain.verifying_contract,
            event = "permit_signed"
        );

        Ok(PermitSignature::new(signature))
    }

    /// Recovers the address that signed this exact request.
    pub fn recover(&self, signature: &PermitSignature) -> Result<Address> {
        signature.recover(&self.signing_hash())
    }

    /// Returns `true` if `signature` was made by the owner over this request.
    pub fn verify(&self, signature: &PermitSignature) -> bool {
        self.recover(signature)
            .map(|signer| signer == self.owner)
            .unwrap_or(false)
    }
}

fn field_error(field: PermitField, err: RegCcipError) -> RegCcipError {
    RegCcipError::FieldResolution {
        field,
        reason: err.to_string(),
    }
}

/// Builds and signs a permit letting `spender` move `value` of `token` out of
/// the signer's balance until `deadline`.
///
/// The owner is the signer's address. `nonce`, `name` and `chainId` are read
/// from the token and the network unless `config` overrides them; the
/// version defaults to `"1"`. The deadline is not checked against the clock:
/// expiry is enforced by the contract that consumes the permit.
pub async fn get_permit_signature<S, T, N>(
    signer: &S,
    spender: Address,
    value: U256,
    deadline: U256,
    token: &T,
    network: &N,
    config: PermitConfig,
) -> Result<PermitSignature>
where
    S: Signer + Send + Sync,
    T: PermitToken + ?Sized,
    N: ChainProvider + ?Sized,
{
    let request = PermitRequest::resolve(
        signer.address(),
        spender,
        value,
        deadline,
        token,
        network,
        &config,
    )
    .await?;

    request.sign(signer).await.inspect_err(|e| {
        spans::record_error(e);
    })
}
