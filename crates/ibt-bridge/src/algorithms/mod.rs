//! # Algorithms Module
//!
//! Pure bridge logic with no I/O: coin selection and receipt correlation.

pub mod coin_select;
pub mod correlate;

pub use coin_select::select_spendable_unit;
pub use correlate::{correlate_to_eth, correlate_to_sui, normalize_eth_tx_hash};
