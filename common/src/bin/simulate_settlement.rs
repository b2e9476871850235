// Replay the canonical delayed payment scenario against a fresh
// in-memory ledger: fund an owner, create the payment, deposit, move the
// clock past the release time and run the check twice.

use anyhow::Result;
use clap::Parser;
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, warn};

use payhold_common::{
    config::{COIN_VALUE, NATIVE_ASSET, VERSION},
    crypto::Address,
    ledger::{compute_payment_id, ChainState},
    payment::PayoutMode,
    time::get_current_time_in_seconds,
    transaction::{
        CheckPayload, CreatePaymentPayload, DepositPayload, Transaction, TransactionType,
    },
};

#[derive(Parser)]
#[command(version = VERSION, about = "PayHold settlement scenario runner")]
struct Args {
    /// Deposit amount in atomic units
    #[arg(long, default_value_t = 10 * COIN_VALUE)]
    deposit: u64,
    /// Target amount in atomic units
    #[arg(long, default_value_t = COIN_VALUE)]
    target: u64,
    /// Release delay in seconds
    #[arg(long, default_value_t = 3600)]
    delay: u64,
    /// Pay out the full held balance instead of the target amount
    #[arg(long)]
    full_balance: bool,
}

fn setup_logger() -> Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .info(Color::Green)
        .debug(Color::BrightBlack)
        .warn(Color::Yellow);
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger()?;

    let mut state = ChainState::new();
    let owner = Address::random();
    let beneficiary = Address::random();
    let now = get_current_time_in_seconds();

    state.credit_account(&owner, args.deposit)?;
    info!("owner {} funded with {}", owner, args.deposit);

    let payout_mode = if args.full_balance {
        PayoutMode::FullBalance
    } else {
        PayoutMode::TargetAmount
    };
    let payload = CreatePaymentPayload {
        owner: owner.clone(),
        beneficiary: beneficiary.clone(),
        target_amount: args.target,
        release_time: now + args.delay,
        payout_mode,
    };
    let payment_id = compute_payment_id(&owner, state.sequence(), &payload);
    state.apply(
        &Transaction::new(owner.clone(), TransactionType::CreatePayment(payload)),
        now,
    )?;
    info!("payment {} releases in {}s", payment_id, args.delay);

    state.apply(
        &Transaction::new(
            owner.clone(),
            TransactionType::Deposit(DepositPayload {
                payment_id: payment_id.clone(),
                amount: args.deposit,
                asset: NATIVE_ASSET,
            }),
        ),
        now,
    )?;

    let check = Transaction::new(
        owner.clone(),
        TransactionType::Check(CheckPayload {
            payment_id: payment_id.clone(),
        }),
    );

    // too early: only the audit event fires
    let events = state.apply(&check, now)?;
    info!(
        "check before release: {:?}",
        events.iter().map(|e| e.name()).collect::<Vec<_>>()
    );

    // move the ledger clock past the release time
    let late = now + args.delay;
    let events = state.apply(&check, late)?;
    info!(
        "check after release: {:?}",
        events.iter().map(|e| e.name()).collect::<Vec<_>>()
    );
    info!(
        "beneficiary {} now holds {}",
        beneficiary,
        state.get_account_balance(&beneficiary)
    );

    match state.apply(&check, late) {
        Err(err) => info!("repeat check rejected: {err}"),
        Ok(_) => warn!("repeat check unexpectedly accepted"),
    }

    Ok(())
}
