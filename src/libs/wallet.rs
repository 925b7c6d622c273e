use alloy::primitives::Address;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use url::Url;

use crate::libs::config::Config;
use crate::libs::network::NetworkDescriptor;
use crate::swap::SwapError;

/// The wallet side of the session: a locally held key standing in for
/// the browser-injected wallet. Created once on connect; the address it
/// derives is the session's account for the rest of the run.
#[derive(Clone, Debug)]
pub struct WalletSession {
    signer: PrivateKeySigner,
    pub address: Address,
}

impl WalletSession {
    /// Every operation requires a wallet; a missing or malformed key is
    /// the NoWallet precondition failure, reported rather than retried.
    pub fn connect(config: &Config) -> Result<Self, SwapError> {
        let key = config.private_key.as_deref().ok_or(SwapError::NoWallet)?;
        let signer: PrivateKeySigner = key.parse().map_err(|_| SwapError::NoWallet)?;
        let address = signer.address();
        Ok(Self { signer, address })
    }

    /// The account list for this session. Mirrors an accounts request
    /// against an injected wallet: one address, never cleared.
    pub fn accounts(&self) -> Vec<Address> {
        vec![self.address]
    }

    /// Build a signing provider against one of the network's RPC
    /// endpoints. Rebuilt whenever the selected network changes.
    pub fn provider(
        &self,
        network: &NetworkDescriptor,
        rpc_override: Option<&str>,
    ) -> Result<impl Provider + Clone, SwapError> {
        let endpoint = rpc_override
            .or_else(|| network.rpc_urls.first().map(|s| s.as_str()))
            .ok_or_else(|| SwapError::Rpc("network has no RPC endpoint".into()))?;
        let url = Url::parse(endpoint)
            .map_err(|e| SwapError::Rpc(format!("bad RPC url `{endpoint}`: {e}")))?;
        let signer = self.signer.clone().with_chain_id(Some(network.chain_id));
        Ok(ProviderBuilder::new()
            .with_chain_id(network.chain_id)
            .wallet(signer)
            .connect_http(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_the_no_wallet_precondition() {
        let config = Config {
            private_key: None,
            bsc_rpc: None,
        };
        assert!(matches!(
            WalletSession::connect(&config),
            Err(SwapError::NoWallet)
        ));

        let config = Config {
            private_key: Some("not-a-key".into()),
            bsc_rpc: None,
        };
        assert!(matches!(
            WalletSession::connect(&config),
            Err(SwapError::NoWallet)
        ));
    }

    #[test]
    fn derives_one_account_from_the_key() {
        let config = Config {
            // well-known anvil test key
            private_key: Some(
                "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".into(),
            ),
            bsc_rpc: None,
        };
        let session = WalletSession::connect(&config).unwrap();
        assert_eq!(session.accounts(), vec![session.address]);
        assert_eq!(
            session.address.to_string().to_ascii_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }
}
