use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::call::{CallDescriptor, ReadQuery};

/// How the wallet/provider boundary reports failure.
///
/// The two cases are distinguished by construction rather than by message
/// text: `Rejected` is the signer saying no, `Rpc` is everything the
/// transport or node can get wrong. Callers never sniff message contents.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ChainClientError {
    /// The signer declined the transaction in their wallet.
    #[error("{0}")]
    Rejected(String),

    /// RPC transport or node-side failure.
    #[error("{0}")]
    Rpc(String),
}

/// Receipt returned the moment the provider accepts a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Provider-assigned transaction hash.
    pub transaction_id: String,
}

/// The two chain primitives everything in this workspace builds on.
///
/// The embedding host implements this over whatever wallet bridge it has;
/// tests implement it with scripted fakes. Nothing here signs, encodes, or
/// estimates gas.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Hand a validated call to the signer and wait for the provider to
    /// accept or refuse it.
    async fn submit_transaction(
        &self,
        call: &CallDescriptor,
    ) -> Result<SubmissionReceipt, ChainClientError>;

    /// Read a single integer value from a contract. Every value this
    /// workspace reads (allocations, released amounts, allowances) is an
    /// integer token amount.
    async fn read_contract_value(&self, query: &ReadQuery) -> Result<u128, ChainClientError>;
}

/// Hosts typically share one client across many controllers.
#[async_trait]
impl<T: ChainClient + ?Sized> ChainClient for Arc<T> {
    async fn submit_transaction(
        &self,
        call: &CallDescriptor,
    ) -> Result<SubmissionReceipt, ChainClientError> {
        (**self).submit_transaction(call).await
    }

    async fn read_contract_value(&self, query: &ReadQuery) -> Result<u128, ChainClientError> {
        (**self).read_contract_value(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::Address;

    struct Echo;

    #[async_trait]
    impl ChainClient for Echo {
        async fn submit_transaction(
            &self,
            call: &CallDescriptor,
        ) -> Result<SubmissionReceipt, ChainClientError> {
            Ok(SubmissionReceipt {
                transaction_id: format!("0x{}", call.function()),
            })
        }

        async fn read_contract_value(&self, _query: &ReadQuery) -> Result<u128, ChainClientError> {
            Ok(5)
        }
    }

    #[tokio::test]
    async fn arc_wrapped_client_delegates() {
        let client = Arc::new(Echo);
        let call = CallDescriptor::new(
            Address::parse("0x5fbdb2315678afecb367f032d93f642f64180aa3").unwrap(),
            "withdraw",
            vec![],
        );
        let receipt = client.submit_transaction(&call).await.unwrap();
        assert_eq!(receipt.transaction_id, "0xwithdraw");
    }

    #[test]
    fn error_serializes_with_kind_tag() {
        let err = ChainClientError::Rejected("User denied transaction signature.".into());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"rejected","message":"User denied transaction signature."}"#
        );
    }

    #[test]
    fn error_display_is_the_raw_message() {
        let err = ChainClientError::Rpc("nonce too low".into());
        assert_eq!(err.to_string(), "nonce too low");
    }
}
