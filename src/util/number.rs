//! A set of utilities for working with currency amounts.

use rust_decimal::{prelude::*, RoundingStrategy};

/// How many fractional digits a currency amount carries.
pub const CURRENCY_DECIMALS: u32 = 10;

/// Create a number.
///
/// This is mostly a wrapper around the decimal literal macro that makes it
/// easier to swap out the number type project-wide without having to change
/// each instance by hand, but can also be used by callers of the core to
/// create numbers more seamlessly.
#[macro_export]
macro_rules! num {
    ($($val:tt)*) => {
        rust_decimal_macros::dec!($($val)*)
    }
}

/// Round a currency amount to `CURRENCY_DECIMALS` places, with ties going to
/// the even neighbor.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointNearestEven)
}
