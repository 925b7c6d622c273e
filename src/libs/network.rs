use std::sync::{LazyLock, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::libs::writing::cc;
use crate::log;
use crate::swap::SwapError;

/// Static chain metadata in the add-chain request shape: id, display
/// name, native currency, RPC endpoints and explorer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

pub static BSC_MAINNET: LazyLock<NetworkDescriptor> = LazyLock::new(|| NetworkDescriptor {
    chain_id: 56,
    chain_name: "BSC Mainnet".into(),
    native_currency: NativeCurrency {
        name: "BNB".into(),
        symbol: "BNB".into(),
        decimals: 18,
    },
    rpc_urls: vec!["https://bsc-dataseed.binance.org/".into()],
    block_explorer_urls: vec!["https://bscscan.com/".into()],
});

pub static BSC_TESTNET: LazyLock<NetworkDescriptor> = LazyLock::new(|| NetworkDescriptor {
    chain_id: 97,
    chain_name: "BSC Testnet".into(),
    native_currency: NativeCurrency {
        name: "tBNB".into(),
        symbol: "tBNB".into(),
        decimals: 18,
    },
    rpc_urls: vec!["https://data-seed-prebsc-1-s1.binance.org:8545/".into()],
    block_explorer_urls: vec!["https://testnet.bscscan.com/".into()],
});

/// Chain-switch capabilities of the wallet side. Switching to a chain
/// the wallet does not know fails with `UnrecognizedChain`; the
/// selector falls back to registering it.
#[allow(async_fn_in_trait)]
pub trait WalletBridge {
    async fn switch_chain(&self, chain_id: u64) -> Result<(), SwapError>;
    async fn add_chain(&self, network: &NetworkDescriptor) -> Result<(), SwapError>;
}

/// Switch the wallet to `network`, registering the chain first when the
/// wallet reports it as unknown. One fallback, no retry loop.
pub async fn select_network<W: WalletBridge>(
    wallet: &W,
    network: &NetworkDescriptor,
) -> Result<(), SwapError> {
    match wallet.switch_chain(network.chain_id).await {
        Ok(()) => Ok(()),
        Err(SwapError::UnrecognizedChain(id)) => {
            log!(
                cc::YELLOW,
                "chain {} unknown to wallet, requesting add of `{}`",
                id,
                network.chain_name
            );
            wallet.add_chain(network).await?;
            wallet.switch_chain(network.chain_id).await
        }
        Err(e) => Err(e),
    }
}

/// Toggle-style switch: the session moves to `next` only when the
/// wallet accepts it. On failure it keeps `current` and hands the
/// error back for the caller to surface.
pub async fn switch_or_stay<'a, W: WalletBridge>(
    wallet: &W,
    current: &'a NetworkDescriptor,
    next: &'a NetworkDescriptor,
) -> (&'a NetworkDescriptor, Option<SwapError>) {
    match select_network(wallet, next).await {
        Ok(()) => (next, None),
        Err(e) => (current, Some(e)),
    }
}

/// Wallet-side chain registry for the keystore session. Starts knowing
/// only the mainnet descriptor; anything else goes through the
/// add-chain path. A switch probes the endpoint's `eth_chainId` and
/// rejects mismatched descriptors.
pub struct ChainRegistry {
    known: Mutex<Vec<NetworkDescriptor>>,
    http: reqwest::Client,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self {
            known: Mutex::new(vec![BSC_MAINNET.clone()]),
            http: reqwest::Client::new(),
        }
    }

    fn lookup(&self, chain_id: u64) -> Option<NetworkDescriptor> {
        self.known
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.chain_id == chain_id)
            .cloned()
    }

    /// Raw `eth_chainId` against a single endpoint.
    async fn probe_chain_id(&self, rpc_url: &str) -> Result<u64, SwapError> {
        let url =
            Url::parse(rpc_url).map_err(|e| SwapError::Rpc(format!("bad RPC url: {e}")))?;
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_chainId",
            "params": [],
        });
        let res = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SwapError::Rpc(e.to_string()))?;
        let v: Value = res
            .json()
            .await
            .map_err(|e| SwapError::Rpc(format!("non-JSON response from RPC: {e}")))?;
        if let Some(err) = v.get("error") {
            return Err(SwapError::Rpc(format!("rpc error: {err}")));
        }
        let hex = v
            .get("result")
            .and_then(|r| r.as_str())
            .ok_or_else(|| SwapError::Rpc("chainId not a string".into()))?;
        u64::from_str_radix(hex.trim_start_matches("0x"), 16)
            .map_err(|e| SwapError::Rpc(format!("bad chainId hex `{hex}`: {e}")))
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletBridge for ChainRegistry {
    async fn switch_chain(&self, chain_id: u64) -> Result<(), SwapError> {
        let network = self
            .lookup(chain_id)
            .ok_or(SwapError::UnrecognizedChain(chain_id))?;
        let endpoint = network
            .rpc_urls
            .first()
            .ok_or_else(|| SwapError::Rpc("network has no RPC endpoint".into()))?;
        let reported = self.probe_chain_id(endpoint).await?;
        if reported != chain_id {
            return Err(SwapError::Rpc(format!(
                "endpoint {endpoint} serves chain {reported}, expected {chain_id}"
            )));
        }
        log!(cc::CYAN, "switched to `{}`", network.chain_name);
        Ok(())
    }

    async fn add_chain(&self, network: &NetworkDescriptor) -> Result<(), SwapError> {
        let mut known = self.known.lock().unwrap();
        if !known.iter().any(|n| n.chain_id == network.chain_id) {
            known.push(network.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Bridge that refuses unknown chains until `add_chain` runs.
    struct ScriptedBridge {
        known: Mutex<Vec<u64>>,
        switches: AtomicUsize,
        adds: AtomicUsize,
        hard_fail: bool,
    }

    impl ScriptedBridge {
        fn knowing(ids: &[u64]) -> Self {
            Self {
                known: Mutex::new(ids.to_vec()),
                switches: AtomicUsize::new(0),
                adds: AtomicUsize::new(0),
                hard_fail: false,
            }
        }
    }

    impl WalletBridge for ScriptedBridge {
        async fn switch_chain(&self, chain_id: u64) -> Result<(), SwapError> {
            self.switches.fetch_add(1, Ordering::SeqCst);
            if self.hard_fail {
                return Err(SwapError::Rpc("switch refused".into()));
            }
            if self.known.lock().unwrap().contains(&chain_id) {
                Ok(())
            } else {
                Err(SwapError::UnrecognizedChain(chain_id))
            }
        }

        async fn add_chain(&self, network: &NetworkDescriptor) -> Result<(), SwapError> {
            self.adds.fetch_add(1, Ordering::SeqCst);
            self.known.lock().unwrap().push(network.chain_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn known_chain_switches_without_an_add() {
        let bridge = ScriptedBridge::knowing(&[56]);
        select_network(&bridge, &BSC_MAINNET).await.unwrap();
        assert_eq!(bridge.switches.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.adds.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unrecognized_chain_falls_back_to_add_then_retries() {
        let bridge = ScriptedBridge::knowing(&[56]);
        select_network(&bridge, &BSC_TESTNET).await.unwrap();
        assert_eq!(bridge.adds.load(Ordering::SeqCst), 1);
        assert_eq!(bridge.switches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn other_switch_failures_do_not_add_chains() {
        let mut bridge = ScriptedBridge::knowing(&[56]);
        bridge.hard_fail = true;
        let err = select_network(&bridge, &BSC_MAINNET).await.unwrap_err();
        assert!(matches!(err, SwapError::Rpc(_)));
        assert_eq!(bridge.adds.load(Ordering::SeqCst), 0);
        assert_eq!(bridge.switches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_switch_keeps_the_session_on_its_current_network() {
        let mut bridge = ScriptedBridge::knowing(&[56]);
        bridge.hard_fail = true;
        let (chosen, err) = switch_or_stay(&bridge, &BSC_MAINNET, &BSC_TESTNET).await;
        assert_eq!(chosen.chain_id, 56);
        assert!(matches!(err, Some(SwapError::Rpc(_))));
    }

    #[tokio::test]
    async fn accepted_switch_moves_to_the_target() {
        let bridge = ScriptedBridge::knowing(&[56]);
        let (chosen, err) = switch_or_stay(&bridge, &BSC_MAINNET, &BSC_TESTNET).await;
        assert_eq!(chosen.chain_id, 97);
        assert!(err.is_none());
    }

    #[test]
    fn registry_starts_with_mainnet_only() {
        let registry = ChainRegistry::new();
        assert!(registry.lookup(56).is_some());
        assert!(registry.lookup(97).is_none());
    }

    #[test]
    fn descriptors_serialize_in_add_chain_shape() {
        let v = serde_json::to_value(&*BSC_TESTNET).unwrap();
        assert_eq!(v["chain_id"], 97);
        assert_eq!(v["native_currency"]["symbol"], "tBNB");
        assert!(v["rpc_urls"].as_array().unwrap().len() == 1);
    }
}
