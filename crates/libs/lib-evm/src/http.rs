//! # JSON-RPC HTTP Provider
//!
//! [`HttpProvider`] speaks plain JSON-RPC 2.0 to a node over reqwest and exposes it
//! through the [`Eip1193Provider`] boundary. It is meant for nodes that manage
//! unlocked accounts (local dev nodes) and for the deployment utility.
//!
//! Wallet-only methods are translated:
//!
//! - `eth_requestAccounts` maps to `eth_accounts`
//! - `wallet_switchEthereumChain` succeeds only if the node already runs that chain,
//!   otherwise it fails with code `4902`
//! - `wallet_addEthereumChain` is unsupported (`4200`)
//!
//! Nodes do not push `accountsChanged` / `chainChanged`. [`HttpProvider::watch`] polls
//! `eth_accounts` and `eth_chainId` and broadcasts differences until the returned
//! returned [`TaskHandle`] is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U64};
use async_trait::async_trait;
use lib_utils::task::TaskHandle;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::{EvmError, Result};
use crate::provider::{parse_hex_u64, Eip1193Provider, ProviderError, ProviderEvent};

const EVENT_CHANNEL_CAPACITY: usize = 16;

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ProviderError>,
}

/// JSON-RPC provider backed by an HTTP endpoint.
#[derive(Clone)]
pub struct HttpProvider {
    http: Client,
    url: String,
    next_id: Arc<AtomicU64>,
    events: broadcast::Sender<ProviderEvent>,
}

impl HttpProvider {
    /// Create a provider with a request timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EvmError::Transport(format!("Failed to build HTTP client: {e}")))?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            http,
            url: url.into(),
            next_id: Arc::new(AtomicU64::new(1)),
            events,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(method, id, "JSON-RPC request");

        let response = self.http.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(EvmError::Transport(format!("HTTP {status}: {text}")));
        }

        let response: RpcResponse = response.json().await?;
        if let Some(error) = response.error {
            return Err(EvmError::Provider(error));
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn switch_chain(&self, params: &Value) -> Result<Value> {
        let requested = params
            .get(0)
            .and_then(|p| p.get("chainId"))
            .and_then(Value::as_str)
            .and_then(parse_hex_u64)
            .ok_or_else(|| EvmError::Decode("wallet_switchEthereumChain: missing chainId".into()))?;

        let current: U64 = serde_json::from_value(self.rpc("eth_chainId", json!([])).await?)?;
        if current.to::<u64>() == requested {
            Ok(Value::Null)
        } else {
            Err(ProviderError::unrecognized_chain(requested).into())
        }
    }

    /// Start polling the node for account and chain changes.
    pub fn watch(&self, interval: Duration) -> TaskHandle {
        let provider = self.clone();
        let task = tokio::spawn(async move {
            let mut accounts: Option<Vec<Address>> = None;
            let mut chain: Option<u64> = None;
            let mut ticker = tokio::time::interval(interval);

            loop {
                ticker.tick().await;

                match provider.rpc("eth_accounts", json!([])).await {
                    Ok(raw) => match serde_json::from_value::<Vec<Address>>(raw) {
                        Ok(current) => {
                            if accounts.as_ref().is_some_and(|prev| *prev != current) {
                                let _ = provider.events.send(ProviderEvent::AccountsChanged(current.clone()));
                            }
                            accounts = Some(current);
                        }
                        Err(e) => warn!(error = %e, "Malformed eth_accounts response"),
                    },
                    Err(e) => warn!(error = %e, "Failed to poll eth_accounts"),
                }

                match provider.rpc("eth_chainId", json!([])).await {
                    Ok(raw) => match serde_json::from_value::<U64>(raw) {
                        Ok(id) => {
                            let current = id.to::<u64>();
                            if chain.is_some_and(|prev| prev != current) {
                                let _ = provider.events.send(ProviderEvent::ChainChanged(current));
                            }
                            chain = Some(current);
                        }
                        Err(e) => warn!(error = %e, "Malformed eth_chainId response"),
                    },
                    Err(e) => warn!(error = %e, "Failed to poll eth_chainId"),
                }
            }
        });

        TaskHandle::new(task)
    }
}

#[async_trait]
impl Eip1193Provider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "eth_requestAccounts" => self.rpc("eth_accounts", params).await,
            "wallet_switchEthereumChain" => self.switch_chain(&params).await,
            "wallet_addEthereumChain" => Err(ProviderError::unsupported_method(method).into()),
            _ => self.rpc(method, params).await,
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

