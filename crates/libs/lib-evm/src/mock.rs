//! # In-Memory Mock Chain
//!
//! [`MockChain`] implements [`Eip1193Provider`] entirely in memory so the orchestration
//! layer can be exercised without a wallet or node. Calldata is decoded with the same
//! `sol!` bindings the real calls are encoded with, and the chain simulates just enough
//! of the token, factory and router contracts for the launchpad flows:
//!
//! - token deployment from [`MockChain::token_artifact`] init code, minting
//!   `initialSupply * 10^decimals` to the recipient
//! - `approve` / `allowance` / `balanceOf` and the metadata views
//! - `getPair` / `createPair`, reverting with `UniswapV2: PAIR_EXISTS` on duplicates
//! - `addLiquidityETH` and both exact-input swaps against a constant-product pool
//!   with the 0.3% fee
//!
//! Failing simulations are answered the way wallets answer them: the request fails
//! with an `execution reverted: <reason>` error and nothing is mined.
//!
//! ## Scripting
//!
//! ```rust,ignore
//! let chain = Arc::new(MockChain::new(421_614, router, factory, weth));
//! chain.fail_next("eth_sendTransaction", ProviderError::user_rejected());
//! chain.set_chain_id(1);                // wallet starts on the wrong network
//! chain.withhold_receipts(true);        // transactions never confirm
//! chain.revert_next_transaction();      // next transaction is mined with status 0
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{address, keccak256, Address, Bytes, B256, U256, U64};
use alloy_sol_types::{SolInterface, SolValue};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::sync::broadcast;

use crate::abi::{IUniswapV2Factory, IUniswapV2Router02, IERC20};
use crate::artifact::{TokenArtifact, TokenConstructorArgs};
use crate::error::{EvmError, Result};
use crate::provider::{
    parse_hex_u64, AddChainParams, Eip1193Provider, ProviderError, ProviderEvent,
};

/// Account authorized by default (funded with 100 native units).
pub const DEFAULT_ACCOUNT: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Init code accepted as the token contract.
pub const TOKEN_BYTECODE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x52, 0x34, 0x80, 0x15];

/// JSON-RPC code wallets use for failed execution.
const EXECUTION_REVERTED: i64 = 3;

/// A transaction accepted by the mock chain, mined or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentTransaction {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    pub data: Bytes,
    pub value: U256,
    pub gas: Option<u64>,
}

#[derive(Debug, Clone, Default)]
struct MockToken {
    name: String,
    symbol: String,
    decimals: u8,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl MockToken {
    fn balance(&self, owner: Address) -> U256 {
        self.balances.get(&owner).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> std::result::Result<(), ProviderError> {
        let balance = self.balance(from);
        if balance < amount {
            return Err(revert("ERC20: transfer amount exceeds balance"));
        }
        self.balances.insert(from, balance - amount);
        *self.balances.entry(to).or_default() += amount;
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> std::result::Result<(), ProviderError> {
        let allowance = self.allowances.get(&(from, spender)).copied().unwrap_or_default();
        if allowance < amount {
            return Err(revert("TransferHelper: TRANSFER_FROM_FAILED"));
        }
        self.transfer(from, to, amount)?;
        if allowance != U256::MAX {
            self.allowances.insert((from, spender), allowance - amount);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Pool {
    pair: Address,
    token_reserve: U256,
    native_reserve: U256,
}

struct State {
    chain_id: u64,
    known_chains: HashSet<u64>,
    accounts: Vec<Address>,
    native: HashMap<Address, U256>,
    tokens: HashMap<Address, MockToken>,
    pairs: HashMap<(Address, Address), Address>,
    /// Pools keyed by the non-native token
    pools: HashMap<Address, Pool>,
    receipts: HashMap<B256, Value>,
    withhold_receipts: bool,
    revert_next: bool,
    block_number: u64,
    nonce: u64,
    failures: HashMap<String, VecDeque<ProviderError>>,
    requests: Vec<String>,
    sent: Vec<SentTransaction>,
    added_chains: Vec<AddChainParams>,
}

/// In-memory EIP-1193 provider simulating a chain with a V2 DEX.
pub struct MockChain {
    router: Address,
    factory: Address,
    wrapped_native: Address,
    state: Mutex<State>,
    events: broadcast::Sender<ProviderEvent>,
}

impl MockChain {
    pub fn new(chain_id: u64, router: Address, factory: Address, wrapped_native: Address) -> Self {
        let (events, _) = broadcast::channel(32);
        let mut native = HashMap::new();
        native.insert(DEFAULT_ACCOUNT, U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)));

        Self {
            router,
            factory,
            wrapped_native,
            state: Mutex::new(State {
                chain_id,
                known_chains: HashSet::from([chain_id]),
                accounts: vec![DEFAULT_ACCOUNT],
                native,
                tokens: HashMap::new(),
                pairs: HashMap::new(),
                pools: HashMap::new(),
                receipts: HashMap::new(),
                withhold_receipts: false,
                revert_next: false,
                block_number: 1,
                nonce: 0,
                failures: HashMap::new(),
                requests: Vec::new(),
                sent: Vec::new(),
                added_chains: Vec::new(),
            }),
            events,
        }
    }

    /// Artifact whose bytecode this chain deploys as a token.
    pub fn token_artifact() -> TokenArtifact {
        TokenArtifact::new(TOKEN_BYTECODE.to_vec())
    }

    // region:    --- Scripting

    /// Fail the next request for `method` with `error`. Queued errors are consumed in order.
    pub fn fail_next(&self, method: &str, error: ProviderError) {
        self.state
            .lock()
            .failures
            .entry(method.to_string())
            .or_default()
            .push_back(error);
    }

    /// Change the active chain without emitting an event.
    pub fn set_chain_id(&self, chain_id: u64) {
        let mut state = self.state.lock();
        state.chain_id = chain_id;
        state.known_chains.insert(chain_id);
    }

    /// Forget a chain so switching to it fails with code 4902.
    pub fn forget_chain(&self, chain_id: u64) {
        self.state.lock().known_chains.remove(&chain_id);
    }

    /// Replace the authorized accounts and emit `accountsChanged`.
    pub fn set_accounts(&self, accounts: Vec<Address>) {
        self.state.lock().accounts = accounts.clone();
        self.emit(ProviderEvent::AccountsChanged(accounts));
    }

    /// Change the active chain and emit `chainChanged`, as a user switching networks would.
    pub fn switch_network(&self, chain_id: u64) {
        self.set_chain_id(chain_id);
        self.emit(ProviderEvent::ChainChanged(chain_id));
    }

    pub fn emit(&self, event: ProviderEvent) {
        let _ = self.events.send(event);
    }

    /// Stop returning receipts, so every confirmation wait times out.
    pub fn withhold_receipts(&self, withhold: bool) {
        self.state.lock().withhold_receipts = withhold;
    }

    /// Mine the next transaction with status 0 and no state change.
    pub fn revert_next_transaction(&self) {
        self.state.lock().revert_next = true;
    }

    pub fn set_native_balance(&self, owner: Address, amount: U256) {
        self.state.lock().native.insert(owner, amount);
    }

    /// Register a pair for `(token_a, token_b)` as if someone else had created it.
    pub fn register_pair(&self, token_a: Address, token_b: Address) -> Address {
        let mut state = self.state.lock();
        self.insert_pair(&mut state, token_a, token_b)
    }

    /// Seed pool reserves for `token` against the wrapped native asset.
    pub fn seed_pool(&self, token: Address, token_reserve: U256, native_reserve: U256) {
        let mut state = self.state.lock();
        let pair = self.insert_pair(&mut state, token, self.wrapped_native);
        state.pools.insert(
            token,
            Pool {
                pair,
                token_reserve,
                native_reserve,
            },
        );
    }

    // endregion: --- Scripting

    // region:    --- Inspection

    pub fn chain_id(&self) -> u64 {
        self.state.lock().chain_id
    }

    pub fn native_balance(&self, owner: Address) -> U256 {
        self.state.lock().native.get(&owner).copied().unwrap_or_default()
    }

    pub fn token_balance(&self, token: Address, owner: Address) -> U256 {
        self.state
            .lock()
            .tokens
            .get(&token)
            .map(|t| t.balance(owner))
            .unwrap_or_default()
    }

    pub fn token_allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .tokens
            .get(&token)
            .and_then(|t| t.allowances.get(&(owner, spender)).copied())
            .unwrap_or_default()
    }

    pub fn pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        self.state.lock().pairs.get(&sorted(token_a, token_b)).copied()
    }

    /// `(token_reserve, native_reserve)` of the pool for `token`.
    pub fn reserves(&self, token: Address) -> Option<(U256, U256)> {
        self.state
            .lock()
            .pools
            .get(&token)
            .map(|p| (p.token_reserve, p.native_reserve))
    }

    /// Every transaction accepted so far, in submission order.
    pub fn sent_transactions(&self) -> Vec<SentTransaction> {
        self.state.lock().sent.clone()
    }

    /// Method names of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn added_chains(&self) -> Vec<AddChainParams> {
        self.state.lock().added_chains.clone()
    }

    // endregion: --- Inspection

    fn insert_pair(&self, state: &mut State, token_a: Address, token_b: Address) -> Address {
        let key = sorted(token_a, token_b);
        let pair = *state.pairs.entry(key).or_insert_with(|| pair_address(key));

        let token = if token_a == self.wrapped_native { token_b } else { token_a };
        state.pools.entry(token).or_insert(Pool {
            pair,
            ..Default::default()
        });
        pair
    }

    fn dispatch(&self, state: &mut State, method: &str, params: &Value) -> Result<Value> {
        match method {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!(state.accounts)),
            "eth_chainId" => Ok(json!(U64::from(state.chain_id))),
            "eth_blockNumber" => Ok(json!(U64::from(state.block_number))),
            "eth_getBalance" => {
                let owner: Address = param(params, 0)?;
                Ok(json!(state.native.get(&owner).copied().unwrap_or_default()))
            }
            "eth_call" => {
                let tx = params.get(0).cloned().unwrap_or(Value::Null);
                let to: Address = field(&tx, "to")?;
                let data: Bytes = field_or_default(&tx, "data")?;
                let out = self.execute_view(state, to, &data)?;
                Ok(json!(Bytes::from(out)))
            }
            "eth_sendTransaction" => self.send_transaction(state, params),
            "eth_getTransactionReceipt" => {
                if state.withhold_receipts {
                    return Ok(Value::Null);
                }
                let hash: B256 = param(params, 0)?;
                Ok(state.receipts.get(&hash).cloned().unwrap_or(Value::Null))
            }
            "wallet_switchEthereumChain" => {
                let chain_id = chain_id_param(params)?;
                if !state.known_chains.contains(&chain_id) {
                    return Err(ProviderError::unrecognized_chain(chain_id).into());
                }
                self.activate_chain(state, chain_id);
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                let descriptor: AddChainParams = param(params, 0)?;
                let chain_id = parse_hex_u64(&descriptor.chain_id)
                    .ok_or_else(|| EvmError::Decode(format!("bad chainId {}", descriptor.chain_id)))?;
                state.added_chains.push(descriptor);
                state.known_chains.insert(chain_id);
                self.activate_chain(state, chain_id);
                Ok(Value::Null)
            }
            _ => Err(ProviderError::unsupported_method(method).into()),
        }
    }

    fn activate_chain(&self, state: &mut State, chain_id: u64) {
        if state.chain_id != chain_id {
            state.chain_id = chain_id;
            self.emit(ProviderEvent::ChainChanged(chain_id));
        }
    }

    fn send_transaction(&self, state: &mut State, params: &Value) -> Result<Value> {
        let tx = params.get(0).cloned().unwrap_or(Value::Null);
        let from: Address = field(&tx, "from")?;
        let to: Option<Address> = field_or_default(&tx, "to")?;
        let data: Bytes = field_or_default(&tx, "data")?;
        let value: U256 = field_or_default(&tx, "value")?;
        let gas = tx
            .get("gas")
            .and_then(Value::as_str)
            .and_then(parse_hex_u64);

        if !state.accounts.contains(&from) {
            return Err(ProviderError::new(4100, "The requested account has not been authorized by the user.").into());
        }

        state.nonce += 1;
        let nonce = state.nonce;
        let hash = keccak256([from.as_slice(), nonce.to_be_bytes().as_slice()].concat());

        let reverted = std::mem::take(&mut state.revert_next);
        let contract_address = if reverted {
            None
        } else {
            self.execute(state, from, to, &data, value, nonce)?
        };

        state.block_number += 1;
        state.receipts.insert(
            hash,
            json!({
                "transactionHash": hash,
                "blockNumber": U64::from(state.block_number),
                "status": if reverted { "0x0" } else { "0x1" },
                "contractAddress": contract_address,
                "gasUsed": U256::from(gas.unwrap_or(21_000)),
            }),
        );
        state.sent.push(SentTransaction {
            hash,
            from,
            to,
            data,
            value,
            gas,
        });

        Ok(json!(hash))
    }

    /// Apply a state-changing transaction. Returns the created contract, if any.
    ///
    /// The attached value leaves the sender first and is refunded if execution fails.
    fn execute(
        &self,
        state: &mut State,
        from: Address,
        to: Option<Address>,
        data: &[u8],
        value: U256,
        nonce: u64,
    ) -> Result<Option<Address>> {
        let balance = state.native.get(&from).copied().unwrap_or_default();
        if balance < value {
            return Err(ProviderError::new(-32000, "insufficient funds for gas * price + value").into());
        }
        state.native.insert(from, balance - value);

        let result = match to {
            None => self.deploy_token(state, from, data, nonce).map(Some),
            Some(to) => self.execute_call(state, from, to, data, value).map(|()| None),
        };
        if result.is_err() {
            state.native.insert(from, balance);
        }
        result
    }

    fn execute_call(&self, state: &mut State, from: Address, to: Address, data: &[u8], value: U256) -> Result<()> {
        if to == self.factory {
            return self.execute_factory(state, data);
        }
        if to == self.router {
            return self.execute_router(state, from, data, value);
        }

        let Some(token) = state.tokens.get_mut(&to) else {
            return Err(revert("call to non-contract account").into());
        };
        match IERC20::IERC20Calls::abi_decode(data)? {
            IERC20::IERC20Calls::approve(call) => {
                token.allowances.insert((from, call.spender), call.amount);
                Ok(())
            }
            _ => Err(revert("view function called in a transaction").into()),
        }
    }

    fn deploy_token(&self, state: &mut State, from: Address, data: &[u8], nonce: u64) -> Result<Address> {
        let args_data = data
            .strip_prefix(TOKEN_BYTECODE)
            .ok_or_else(|| revert("invalid init code"))?;
        let args = TokenConstructorArgs::abi_decode(args_data)?;

        let scale = U256::from(10u64).pow(U256::from(args.decimals));
        let total_supply = args
            .initial_supply
            .checked_mul(scale)
            .ok_or_else(|| revert("initial supply overflows uint256"))?;

        let address = Address::from_slice(&keccak256([from.as_slice(), nonce.to_be_bytes().as_slice(), b"create".as_slice()].concat())[12..]);
        let mut token = MockToken {
            name: args.name,
            symbol: args.symbol,
            decimals: args.decimals,
            total_supply,
            ..Default::default()
        };
        token.balances.insert(args.recipient, total_supply);
        state.tokens.insert(address, token);
        Ok(address)
    }

    fn execute_factory(&self, state: &mut State, data: &[u8]) -> Result<()> {
        match IUniswapV2Factory::IUniswapV2FactoryCalls::abi_decode(data)? {
            IUniswapV2Factory::IUniswapV2FactoryCalls::createPair(call) => {
                if call.tokenA == call.tokenB {
                    return Err(revert("UniswapV2: IDENTICAL_ADDRESSES").into());
                }
                if call.tokenA.is_zero() || call.tokenB.is_zero() {
                    return Err(revert("UniswapV2: ZERO_ADDRESS").into());
                }
                if state.pairs.contains_key(&sorted(call.tokenA, call.tokenB)) {
                    return Err(revert("UniswapV2: PAIR_EXISTS").into());
                }
                self.insert_pair(state, call.tokenA, call.tokenB);
                Ok(())
            }
            IUniswapV2Factory::IUniswapV2FactoryCalls::getPair(_) => {
                Err(revert("view function called in a transaction").into())
            }
        }
    }

    fn execute_router(&self, state: &mut State, from: Address, data: &[u8], value: U256) -> Result<()> {
        use IUniswapV2Router02::IUniswapV2Router02Calls as Calls;

        match Calls::abi_decode(data)? {
            Calls::addLiquidityETH(call) => {
                check_deadline(call.deadline)?;
                if value < call.amountETHMin || call.amountTokenDesired < call.amountTokenMin {
                    return Err(revert("UniswapV2Router: INSUFFICIENT_AMOUNT").into());
                }
                let key = sorted(call.token, self.wrapped_native);
                let pair = state.pairs.get(&key).copied().unwrap_or_else(|| pair_address(key));
                let token = state
                    .tokens
                    .get_mut(&call.token)
                    .ok_or_else(|| revert("TransferHelper: TRANSFER_FROM_FAILED"))?;
                token.transfer_from(self.router, from, pair, call.amountTokenDesired)?;
                self.insert_pair(state, call.token, self.wrapped_native);

                let pool = state.pools.entry(call.token).or_default();
                pool.token_reserve += call.amountTokenDesired;
                pool.native_reserve += value;
                Ok(())
            }
            Calls::swapExactTokensForETH(call) => {
                check_deadline(call.deadline)?;
                let token_address = self.token_in_path(&call.path, true)?;
                let pool = state
                    .pools
                    .get(&token_address)
                    .copied()
                    .ok_or_else(|| revert("UniswapV2Library: INSUFFICIENT_LIQUIDITY"))?;
                let amount_out = amount_out(call.amountIn, pool.token_reserve, pool.native_reserve)?;
                if amount_out < call.amountOutMin {
                    return Err(revert("UniswapV2Router: INSUFFICIENT_OUTPUT_AMOUNT").into());
                }

                let token = state
                    .tokens
                    .get_mut(&token_address)
                    .ok_or_else(|| revert("TransferHelper: TRANSFER_FROM_FAILED"))?;
                token.transfer_from(self.router, from, pool.pair, call.amountIn)?;

                if let Some(pool) = state.pools.get_mut(&token_address) {
                    pool.token_reserve += call.amountIn;
                    pool.native_reserve -= amount_out;
                }
                *state.native.entry(call.to).or_default() += amount_out;
                Ok(())
            }
            Calls::swapExactETHForTokens(call) => {
                check_deadline(call.deadline)?;
                let token_address = self.token_in_path(&call.path, false)?;
                let pool = state
                    .pools
                    .get(&token_address)
                    .copied()
                    .ok_or_else(|| revert("UniswapV2Library: INSUFFICIENT_LIQUIDITY"))?;
                let amount_out = amount_out(value, pool.native_reserve, pool.token_reserve)?;
                if amount_out < call.amountOutMin {
                    return Err(revert("UniswapV2Router: INSUFFICIENT_OUTPUT_AMOUNT").into());
                }

                let token = state
                    .tokens
                    .get_mut(&token_address)
                    .ok_or_else(|| revert("UniswapV2Library: INSUFFICIENT_LIQUIDITY"))?;
                token.transfer(pool.pair, call.to, amount_out)?;

                if let Some(pool) = state.pools.get_mut(&token_address) {
                    pool.native_reserve += value;
                    pool.token_reserve -= amount_out;
                }
                Ok(())
            }
        }
    }

    /// Validate a two-hop path against the wrapped native asset and return the token side.
    fn token_in_path(&self, path: &[Address], token_first: bool) -> Result<Address> {
        match (path, token_first) {
            ([token, native], true) if *native == self.wrapped_native => Ok(*token),
            ([native, token], false) if *native == self.wrapped_native => Ok(*token),
            _ => Err(revert("UniswapV2Router: INVALID_PATH").into()),
        }
    }

    fn execute_view(&self, state: &State, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        if to == self.factory {
            return match IUniswapV2Factory::IUniswapV2FactoryCalls::abi_decode(data)? {
                IUniswapV2Factory::IUniswapV2FactoryCalls::getPair(call) => Ok(state
                    .pairs
                    .get(&sorted(call.tokenA, call.tokenB))
                    .copied()
                    .unwrap_or(Address::ZERO)
                    .abi_encode()),
                IUniswapV2Factory::IUniswapV2FactoryCalls::createPair(call) => {
                    if state.pairs.contains_key(&sorted(call.tokenA, call.tokenB)) {
                        return Err(revert("UniswapV2: PAIR_EXISTS").into());
                    }
                    Ok(Address::ZERO.abi_encode())
                }
            };
        }

        let Some(token) = state.tokens.get(&to) else {
            // Calls to accounts without code return empty data
            return Ok(Vec::new());
        };

        use IERC20::IERC20Calls as Calls;
        let out = match Calls::abi_decode(data)? {
            Calls::name(_) => token.name.abi_encode(),
            Calls::symbol(_) => token.symbol.abi_encode(),
            Calls::decimals(_) => U256::from(token.decimals).abi_encode(),
            Calls::totalSupply(_) => token.total_supply.abi_encode(),
            Calls::balanceOf(call) => token.balance(call.owner).abi_encode(),
            Calls::allowance(call) => token
                .allowances
                .get(&(call.owner, call.spender))
                .copied()
                .unwrap_or_default()
                .abi_encode(),
            Calls::approve(_) => true.abi_encode(),
        };
        Ok(out)
    }
}

#[async_trait]
impl Eip1193Provider for MockChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let mut state = self.state.lock();
        state.requests.push(method.to_string());

        if let Some(error) = state.failures.get_mut(method).and_then(VecDeque::pop_front) {
            return Err(error.into());
        }

        self.dispatch(&mut state, method, &params)
    }

    fn subscribe(&self) -> broadcast::Receiver<ProviderEvent> {
        self.events.subscribe()
    }
}

fn revert(reason: &str) -> ProviderError {
    ProviderError::new(EXECUTION_REVERTED, format!("execution reverted: {reason}"))
}

fn sorted(a: Address, b: Address) -> (Address, Address) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Deterministic pair address for a sorted token pair.
fn pair_address(key: (Address, Address)) -> Address {
    Address::from_slice(&keccak256([key.0.as_slice(), key.1.as_slice()].concat())[12..])
}

/// Constant-product output with the 0.3% fee.
fn amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256> {
    if amount_in.is_zero() {
        return Err(revert("UniswapV2Library: INSUFFICIENT_INPUT_AMOUNT").into());
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(revert("UniswapV2Library: INSUFFICIENT_LIQUIDITY").into());
    }
    let amount_in_with_fee = amount_in * U256::from(997u64);
    let numerator = amount_in_with_fee * reserve_out;
    let denominator = reserve_in * U256::from(1000u64) + amount_in_with_fee;
    Ok(numerator / denominator)
}

fn check_deadline(deadline: U256) -> Result<()> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    if deadline < U256::from(now) {
        return Err(revert("UniswapV2Router: EXPIRED").into());
    }
    Ok(())
}

fn chain_id_param(params: &Value) -> Result<u64> {
    params
        .get(0)
        .and_then(|p| p.get("chainId"))
        .and_then(Value::as_str)
        .and_then(parse_hex_u64)
        .ok_or_else(|| EvmError::Decode("missing chainId".to_string()))
}

fn param<T: serde::de::DeserializeOwned>(params: &Value, index: usize) -> Result<T> {
    let value = params
        .get(index)
        .cloned()
        .ok_or_else(|| EvmError::Decode(format!("missing parameter {index}")))?;
    Ok(serde_json::from_value(value)?)
}

fn field<T: serde::de::DeserializeOwned>(object: &Value, name: &str) -> Result<T> {
    let value = object
        .get(name)
        .cloned()
        .ok_or_else(|| EvmError::Decode(format!("missing field {name}")))?;
    Ok(serde_json::from_value(value)?)
}

fn field_or_default<T: serde::de::DeserializeOwned + Default>(object: &Value, name: &str) -> Result<T> {
    match object.get(name) {
        Some(Value::Null) | None => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{Erc20, Factory};
    use crate::signer::{ConfirmationOptions, Signer, TxRequest};
    use std::sync::Arc;
    use std::time::Duration;

    const ROUTER: Address = address!("0xD7f655E006F1aE864bdababC8fC978C3e5B38b7e");
    const FACTORY: Address = address!("0xad4c763Bc17F9893fDd0BAa2Ce5e4F20D3B89d3f");
    const WETH: Address = address!("0xc336C7309D8a2B0431Edc0f5D40a5E529437FE5a");

    fn chain() -> Arc<MockChain> {
        Arc::new(MockChain::new(421_614, ROUTER, FACTORY, WETH))
    }

    fn options() -> ConfirmationOptions {
        ConfirmationOptions {
            confirmations: 1,
            timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(10),
        }
    }

    async fn deploy(signer: &Signer) -> Address {
        let args = TokenConstructorArgs {
            name: "Test".to_string(),
            symbol: "TST".to_string(),
            initial_supply: U256::from(1000u64),
            decimals: 18,
            recipient: signer.address(),
        };
        let data = MockChain::token_artifact().deploy_data(&args);
        let pending = signer.send_transaction(TxRequest::create(data)).await.unwrap();
        let receipt = pending.wait(&options()).await.unwrap();
        receipt.contract_address.unwrap()
    }

    #[tokio::test]
    async fn test_deploy_mints_scaled_supply_to_recipient() {
        let chain = chain();
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);
        let token = deploy(&signer).await;

        let erc20 = Erc20::new(token, signer.clone());
        assert_eq!(erc20.name().await.unwrap(), "Test");
        assert_eq!(erc20.symbol().await.unwrap(), "TST");
        assert_eq!(erc20.decimals().await.unwrap(), 18);
        let expected = U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(erc20.total_supply().await.unwrap(), expected);
        assert_eq!(erc20.balance_of(DEFAULT_ACCOUNT).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_create_pair_twice_reverts_with_pair_exists() {
        let chain = chain();
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);
        let token = deploy(&signer).await;
        let factory = Factory::new(FACTORY, signer);

        assert_eq!(factory.get_pair(token, WETH).await.unwrap(), None);
        factory.create_pair(token, WETH, Some(3_000_000)).await.unwrap();
        assert!(factory.get_pair(token, WETH).await.unwrap().is_some());

        let err = factory.create_pair(token, WETH, Some(3_000_000)).await.unwrap_err();
        assert!(err.to_string().contains("PAIR_EXISTS"));
    }

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let chain = chain();
        chain.fail_next("eth_chainId", ProviderError::user_rejected());

        assert!(chain.request("eth_chainId", json!([])).await.unwrap_err().is_user_rejected());
        assert_eq!(chain.request("eth_chainId", json!([])).await.unwrap(), json!("0x66eee"));
    }

    #[tokio::test]
    async fn test_failed_simulation_is_not_mined() {
        let chain = chain();
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);

        // Init code without constructor arguments
        let err = signer
            .send_transaction(TxRequest::create(MockChain::token_artifact().bytecode))
            .await
            .unwrap_err();
        assert!(matches!(err, EvmError::Decode(_)));

        let err = signer
            .send_transaction(TxRequest::call(DEFAULT_ACCOUNT, Vec::new()).with_value(U256::from(1u64)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("execution reverted"));
        assert!(chain.sent_transactions().is_empty());
        assert_eq!(
            chain.native_balance(DEFAULT_ACCOUNT),
            U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
        );
    }

    #[tokio::test]
    async fn test_withheld_receipt_times_out() {
        let chain = chain();
        chain.withhold_receipts(true);
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);

        let args = TokenConstructorArgs {
            name: "Slow".to_string(),
            symbol: "SLW".to_string(),
            initial_supply: U256::from(1u64),
            decimals: 0,
            recipient: DEFAULT_ACCOUNT,
        };
        let pending = signer
            .send_transaction(TxRequest::create(MockChain::token_artifact().deploy_data(&args)))
            .await
            .unwrap();
        let err = pending.wait(&options()).await.unwrap_err();
        assert!(matches!(err, EvmError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_reverted_receipt() {
        let chain = chain();
        let signer = Signer::new(chain.clone(), DEFAULT_ACCOUNT);
        let token = deploy(&signer).await;

        chain.revert_next_transaction();
        let pending = Erc20::new(token, signer.clone())
            .approve(ROUTER, U256::MAX, Some(100_000))
            .await
            .unwrap();
        let err = pending.wait(&options()).await.unwrap_err();
        assert!(matches!(err, EvmError::Reverted { .. }));
        assert_eq!(chain.token_allowance(token, DEFAULT_ACCOUNT, ROUTER), U256::ZERO);
    }

    #[tokio::test]
    async fn test_switch_to_unknown_chain_fails_with_4902() {
        let chain = chain();
        chain.set_chain_id(1);
        chain.forget_chain(421_614);
        let mut events = chain.subscribe();

        let err = chain
            .request("wallet_switchEthereumChain", json!([{ "chainId": "0x66eee" }]))
            .await
            .unwrap_err();
        assert!(err.is_unrecognized_chain());

        chain
            .request(
                "wallet_addEthereumChain",
                json!([{
                    "chainId": "0x66eee",
                    "chainName": "Arbitrum Sepolia",
                    "nativeCurrency": { "name": "ETH", "symbol": "ETH", "decimals": 18 },
                    "rpcUrls": ["https://sepolia-rollup.arbitrum.io/rpc"],
                    "blockExplorerUrls": ["https://sepolia.arbiscan.io"]
                }]),
            )
            .await
            .unwrap();
        assert_eq!(chain.chain_id(), 421_614);
        assert_eq!(events.recv().await.unwrap(), ProviderEvent::ChainChanged(421_614));
    }

    #[test]
    fn test_amount_out_applies_fee() {
        let out = amount_out(U256::from(1000u64), U256::from(1_000_000u64), U256::from(1_000_000u64)).unwrap();
        assert_eq!(out, U256::from(996u64));
    }
}
