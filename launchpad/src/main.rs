//! Launchpad command-line front end.
//!
//! Reads commands from stdin and drives the [`App`] event loop against the JSON-RPC node
//! configured in the environment. The node's unlocked accounts stand in for the wallet.

use std::sync::Arc;

use launchpad::app::tasks::liquidity::LiquidityState;
use launchpad::app::tasks::swap::SwapState;
use launchpad::app::App;
use launchpad::logging::{self, LogConfig};
use launchpad::ui::present_deployment;
use launchpad::ui::trading::{render_liquidity, render_swap, render_tabs, render_wallet};
use launchpad::utils::validation::TokenForm;
use launchpad::Result;
use lib_core::{core_config, init_config};
use lib_evm::HttpProvider;
use serde::Serialize;
use shared::dto::token::DeploymentStatus;
use shared::dto::trading::TradingTab;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const HELP: &str = "\
Commands:
  connect                                  connect the wallet and switch network
  deploy <name> <symbol> <supply> [dec]    deploy a token (decimals default 18)
  tab swap|liquidity                       select the trading tab
  create-pair                              create the token / WETH pair
  approve                                  approve the router on the active tab
  liquidity <token amount> <eth amount>    add liquidity
  amount <value>                           set the swap amount
  toggle                                   flip the swap direction
  slippage <bps>                           50, 100, 200 or 500
  max                                      use the full balance on the active tab
  swap                                     submit the swap
  status [--json]                          show the current state
  help                                     show this help
  quit                                     exit";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = logging::init(&LogConfig::from_env());

    init_config()?;
    let config = Arc::new(core_config()?.clone());

    let provider = Arc::new(HttpProvider::new(config.network.rpc_url.clone())?);
    let _watch = provider.watch(config.provider_event_poll_interval);

    let mut app = App::new(Some(provider), Arc::clone(&config));
    info!(rpc_url = %config.network.rpc_url, "Launchpad ready");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                };
                if !run_command(&mut app, line.trim()) {
                    break;
                }
            }
            Some(kind) = app.next_event() => {
                info!(event = kind, "Event handled");
                print_status(&app);
            }
        }
    }

    info!("Launchpad shutting down");
    Ok(())
}

/// Returns `false` when the loop should stop.
fn run_command(app: &mut App, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("quit" | "exit", _) => return false,
        ("help", _) => println!("{HELP}"),
        ("status", ["--json"]) => print_status_json(app),
        ("status", _) => print_status(app),
        ("connect", _) => app.connect_wallet(),
        ("deploy", [name, symbol, supply, rest @ ..]) => {
            let mut form = TokenForm::new(*name, *symbol, *supply, "18");
            if let Some(decimals) = rest.first() {
                form.set_decimals(decimals);
            }
            app.set_form(form);
            if let Err(err) = app.deploy_token() {
                println!("{}", err.user_message());
            }
        }
        ("tab", ["swap"]) => app.select_tab(TradingTab::Swap),
        ("tab", ["liquidity"]) => app.select_tab(TradingTab::Liquidity),
        ("create-pair", _) => with_liquidity(app, |liquidity| async move { liquidity.create_pair().await }),
        ("approve", _) => match app.active_tab() {
            Some(TradingTab::Liquidity) => with_liquidity(app, |liquidity| async move { liquidity.approve().await }),
            _ => with_swap(app, |swap| async move { swap.approve().await }),
        },
        ("liquidity", [token_amount, base_amount]) => {
            if let Some(liquidity) = app.liquidity() {
                liquidity.set_token_amount(*token_amount);
                liquidity.set_base_amount(*base_amount);
            }
            with_liquidity(app, |liquidity| async move { liquidity.add_liquidity().await });
        }
        ("amount", [value]) => {
            if let Some(swap) = app.swap() {
                swap.set_amount(*value);
            }
        }
        ("toggle", _) => {
            if let Some(swap) = app.swap() {
                swap.toggle_swap_type();
            }
        }
        ("slippage", [bps]) => match (app.swap(), bps.parse::<u16>()) {
            (Some(swap), Ok(bps)) => {
                if let Err(err) = swap.set_slippage_bps(bps) {
                    println!("{}", err.user_message());
                }
            }
            (None, _) => println!("Deploy a token first"),
            (_, Err(_)) => println!("Slippage must be a whole number of basis points"),
        },
        ("max", _) => match app.active_tab() {
            Some(TradingTab::Liquidity) => {
                if let Some(liquidity) = app.liquidity() {
                    liquidity.set_max_token();
                    liquidity.set_max_base();
                }
            }
            _ => {
                if let Some(swap) = app.swap() {
                    swap.set_max();
                }
            }
        },
        ("swap", _) => with_swap(app, |swap| async move { swap.swap().await }),
        _ => println!("Unknown command, type `help`"),
    }
    true
}

fn with_liquidity<F, Fut>(app: &App, run: F)
where
    F: FnOnce(launchpad::app::tasks::liquidity::LiquidityOrchestrator) -> Fut,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    match app.liquidity() {
        Some(liquidity) => {
            tokio::spawn(run(liquidity));
        }
        None => println!("Deploy a token first"),
    }
}

fn with_swap<F, Fut>(app: &App, run: F)
where
    F: FnOnce(launchpad::app::tasks::swap::SwapOrchestrator) -> Fut,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    match app.swap() {
        Some(swap) => {
            tokio::spawn(run(swap));
        }
        None => println!("Deploy a token first"),
    }
}

/// Machine-readable view of everything `status` prints.
#[derive(Serialize)]
struct StatusSnapshot {
    account: Option<String>,
    chain_id: Option<u64>,
    wallet_error: Option<String>,
    deployment: DeploymentStatus,
    active_tab: Option<TradingTab>,
    swap: Option<SwapState>,
    liquidity: Option<LiquidityState>,
}

fn print_status_json(app: &App) {
    let session = app.session();
    let snapshot = StatusSnapshot {
        account: session.as_ref().map(|s| s.address.to_checksum(None)),
        chain_id: session.as_ref().map(|s| s.chain_id),
        wallet_error: app.wallet_error(),
        deployment: app.deployment_status(),
        active_tab: app.active_tab(),
        swap: app.swap().map(|swap| swap.state()),
        liquidity: app.liquidity().map(|liquidity| liquidity.state()),
    };
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => warn!(error = %e, "Failed to serialize status"),
    }
}

fn print_status(app: &App) {
    let session = app.session();
    let wallet_error = app.wallet_error();
    println!(
        "{}",
        render_wallet(session.as_ref(), app.is_connecting(), wallet_error.as_deref())
    );

    if let Some(view) = present_deployment(&app.deployment_status(), &app.config().network.explorer_url) {
        print!("{view}");
    }

    let (Some(tab), Some(token)) = (app.active_tab(), app.deployment_status().token().cloned()) else {
        return;
    };
    println!("{}", render_tabs(tab));
    match tab {
        TradingTab::Swap => {
            if let Some(swap) = app.swap() {
                print!("{}", render_swap(&swap.state(), &token.symbol, token.decimals));
            }
        }
        TradingTab::Liquidity => {
            if let Some(liquidity) = app.liquidity() {
                print!("{}", render_liquidity(&liquidity.state(), &token.symbol, token.decimals));
            }
        }
    }
}
