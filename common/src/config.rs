use crate::crypto::Hash;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Native settlement asset (plaintext balances)
// Deposits naming any other asset are refused
pub const NATIVE_ASSET: Hash = Hash::zero();

// 8 decimals numbers
pub const COIN_DECIMALS: u8 = 8;
// 100 000 000 to represent 1 coin
pub const COIN_VALUE: u64 = 10u64.pow(COIN_DECIMALS as u32);
