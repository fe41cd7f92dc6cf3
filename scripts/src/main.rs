//! `bluechip` — command-line access to the creator-pool suite.

use anyhow::Context;
use bluechip_client::chain::{factory_address, ChainConfig, MNEMONIC_ENV};
use bluechip_client::convert::from_micro_units;
use bluechip_client::flows::liquidity::RemoveAmount;
use bluechip_client::flows::portfolio::{fetch_listings, TokenListing};
use bluechip_client::flows::progress::fetch_progress;
use bluechip_client::rpc::RpcClient;
use bluechip_client::tx::{Severity, TxReceipt, TxStatus};
use bluechip_client::BluechipClient;
use bluechip_std::factory::DEFAULT_COMMIT_LIMIT_USD;
use bluechip_std::pool::CommitStatus;
use bluechip_std::MICRO_DECIMALS;
use clap::{Parser, Subcommand, ValueEnum};
use cosmwasm_std::Uint128;
use dotenv::dotenv;

#[derive(Parser)]
#[command(name = "bluechip", version, about = "Client for BlueChip creator pools")]
struct Cli {
    /// Network preset to connect to.
    #[arg(long, global = true, default_value = "local")]
    network: String,
    /// Factory contract address; falls back to $BLUECHIP_FACTORY.
    #[arg(long, global = true)]
    factory: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum SwapDirection {
    /// Native bluechip into the creator token.
    Buy,
    /// Creator token back into native bluechip.
    Sell,
}

#[derive(Subcommand)]
enum Command {
    /// Native balance of the connected wallet.
    Balance,
    /// Commit to a pool; buys through the commit path once launched.
    Commit {
        pool: String,
        /// Human amount of bluechip, e.g. "25.5".
        amount: String,
        #[arg(long)]
        slippage: Option<String>,
        /// Deadline in minutes; 0 means none.
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Swap against a launched pool in either direction.
    Swap {
        pool: String,
        amount: String,
        #[arg(long, value_enum, default_value_t = SwapDirection::Buy)]
        direction: SwapDirection,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Shorthand for `swap --direction buy`.
    Buy {
        pool: String,
        amount: String,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Shorthand for `swap --direction sell`.
    Sell {
        pool: String,
        amount: String,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Commit progress of a pool against the launch threshold.
    Progress { pool: String },
    /// Tokens the connected wallet holds.
    Portfolio,
    /// All listed tokens, no wallet required.
    Discover,
    /// Launch a new creator pool with the default configuration.
    CreatePool {
        token_name: String,
        token_symbol: String,
    },
    /// Liquidity position management.
    #[command(subcommand)]
    Liquidity(LiquidityCommand),
}

#[derive(Subcommand)]
enum LiquidityCommand {
    /// Open a new position.
    Deposit {
        pool: String,
        /// Native side, human units.
        amount0: String,
        /// Creator-token side, human units.
        amount1: String,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Add to an existing position.
    Add {
        pool: String,
        position_id: String,
        amount0: String,
        amount1: String,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Remove part of a position, by liquidity amount or percent.
    Remove {
        pool: String,
        position_id: String,
        /// Absolute liquidity units to burn.
        #[arg(long, conflicts_with = "percent")]
        amount: Option<String>,
        /// Percentage of the position (1-99).
        #[arg(long)]
        percent: Option<u64>,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, default_value_t = 0)]
        deadline: u64,
    },
    /// List the wallet's positions in a pool.
    Positions { pool: String },
    /// Close a position entirely.
    Close { pool: String, position_id: String },
    /// Collect accrued fees.
    Collect { pool: String, position_id: String },
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Success => "ok",
        Severity::Error => "err",
    }
}

fn report(receipt: TxReceipt) {
    let status = TxStatus::from(&receipt);
    println!(
        "[{}] tx {} (height {}, gas used {})",
        severity_tag(status.severity()),
        receipt.tx_hash,
        receipt.height,
        receipt.gas_used
    );
}

fn describe_status(status: &CommitStatus) -> String {
    match status {
        CommitStatus::FullyCommitted => "launched".to_owned(),
        CommitStatus::InProgress { raised, target } => format!(
            "committing ({} / {} USD)",
            from_micro_units(*raised, MICRO_DECIMALS),
            from_micro_units(*target, MICRO_DECIMALS)
        ),
    }
}

fn print_listings(listings: &[TokenListing]) {
    if listings.is_empty() {
        println!("no tokens found");
        return;
    }
    for listing in listings {
        let info = listing.info();
        let holding = match listing.balance() {
            Some(balance) => format!(", holding {}", from_micro_units(balance, info.decimals)),
            None => String::new(),
        };
        println!(
            "{} ({}) pool {} — {}{holding}",
            info.name,
            info.symbol,
            info.pool_address,
            describe_status(&info.commit_status)
        );
    }
}

async fn connect(cli: &Cli) -> anyhow::Result<BluechipClient> {
    let config = ChainConfig::parse_network(&cli.network)?;
    let mnemonic = std::env::var(MNEMONIC_ENV)
        .with_context(|| format!("{MNEMONIC_ENV} is not set"))?;
    let factory = factory_address(cli.factory.clone())?;
    Ok(BluechipClient::connect(config, &mnemonic, factory).await?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Balance => {
            let client = connect(&cli).await?;
            let balance = client.balance().await?;
            let config = ChainConfig::parse_network(&cli.network)?;
            println!(
                "{} {} ({}{})",
                from_micro_units(balance, config.coin_decimals),
                config.native_denom.trim_start_matches('u').to_uppercase(),
                balance,
                config.native_denom
            );
        }
        Command::Commit {
            pool,
            amount,
            slippage,
            deadline,
        } => {
            let client = connect(&cli).await?;
            report(
                client
                    .commit(pool, amount, slippage.as_deref(), *deadline)
                    .await?,
            );
        }
        Command::Swap {
            pool,
            amount,
            direction,
            slippage,
            deadline,
        } => {
            let client = connect(&cli).await?;
            let receipt = match direction {
                SwapDirection::Buy => {
                    client.buy(pool, amount, slippage.as_deref(), *deadline).await?
                }
                SwapDirection::Sell => {
                    client.sell(pool, amount, slippage.as_deref(), *deadline).await?
                }
            };
            report(receipt);
        }
        Command::Buy {
            pool,
            amount,
            slippage,
            deadline,
        } => {
            let client = connect(&cli).await?;
            report(client.buy(pool, amount, slippage.as_deref(), *deadline).await?);
        }
        Command::Sell {
            pool,
            amount,
            slippage,
            deadline,
        } => {
            let client = connect(&cli).await?;
            report(client.sell(pool, amount, slippage.as_deref(), *deadline).await?);
        }
        Command::Progress { pool } => {
            let config = ChainConfig::parse_network(&cli.network)?;
            let rpc = RpcClient::new(&config.rpc_url)?;
            let progress =
                fetch_progress(&rpc, pool, Uint128::new(DEFAULT_COMMIT_LIMIT_USD)).await?;
            println!(
                "{} participants, {} / {} USD ({}%)",
                progress.participants,
                from_micro_units(progress.total_paid_usd, MICRO_DECIMALS),
                from_micro_units(progress.threshold_usd, MICRO_DECIMALS),
                progress.percent_complete
            );
            for point in &progress.timeline {
                println!(
                    "  {} -> {} USD cumulative",
                    point.wallet,
                    from_micro_units(point.cumulative_usd, MICRO_DECIMALS)
                );
            }
        }
        Command::Portfolio => {
            let client = connect(&cli).await?;
            print_listings(&client.portfolio().await?);
        }
        Command::Discover => {
            let config = ChainConfig::parse_network(&cli.network)?;
            let rpc = RpcClient::new(&config.rpc_url)?;
            let factory = factory_address(cli.factory.clone())?;
            print_listings(&fetch_listings(&rpc, &factory).await?);
        }
        Command::CreatePool {
            token_name,
            token_symbol,
        } => {
            let client = connect(&cli).await?;
            report(client.create_pool(token_name, token_symbol).await?);
        }
        Command::Liquidity(liquidity) => {
            let client = connect(&cli).await?;
            if let LiquidityCommand::Positions { pool } = liquidity {
                let positions = client.positions(pool).await?;
                if positions.is_empty() {
                    println!("no positions in {pool}");
                }
                for position in positions {
                    println!(
                        "position {} — liquidity {}, unclaimed fees {} / {}",
                        position.position_id,
                        position.liquidity,
                        position.unclaimed_fees_0,
                        position.unclaimed_fees_1
                    );
                }
                return Ok(());
            }
            let receipt = match liquidity {
                LiquidityCommand::Deposit {
                    pool,
                    amount0,
                    amount1,
                    slippage,
                    deadline,
                } => {
                    client
                        .deposit_liquidity(pool, amount0, amount1, slippage.as_deref(), *deadline)
                        .await?
                }
                LiquidityCommand::Add {
                    pool,
                    position_id,
                    amount0,
                    amount1,
                    slippage,
                    deadline,
                } => {
                    client
                        .add_to_position(
                            pool,
                            position_id,
                            amount0,
                            amount1,
                            slippage.as_deref(),
                            *deadline,
                        )
                        .await?
                }
                LiquidityCommand::Remove {
                    pool,
                    position_id,
                    amount,
                    percent,
                    slippage,
                    deadline,
                } => {
                    let how_much = match (amount, percent) {
                        (Some(amount), None) => RemoveAmount::liquidity(amount)?,
                        (None, Some(percent)) => RemoveAmount::percent(*percent)?,
                        _ => anyhow::bail!("pass exactly one of --amount or --percent"),
                    };
                    client
                        .remove_liquidity(pool, position_id, how_much, slippage.as_deref(), *deadline)
                        .await?
                }
                LiquidityCommand::Close { pool, position_id } => {
                    client.close_position(pool, position_id).await?
                }
                LiquidityCommand::Collect { pool, position_id } => {
                    client.collect_fees(pool, position_id).await?
                }
                LiquidityCommand::Positions { .. } => unreachable!("handled above"),
            };
            report(receipt);
        }
    }
    Ok(())
}
