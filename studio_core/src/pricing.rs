//! Session cost computation.
//!
//! Costs use decimal arithmetic so that sums of hourly prices never drift.

use rust_decimal::Decimal;

/// Total cost of a session
///
/// `hourly_rate * hours + Σ(rental_price * hours)` over every rented item.
/// Returns `None` when the total does not fit in a `Decimal`.
pub fn session_cost<I>(hourly_rate: Decimal, rental_prices: I, hours: u32) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    let hours = Decimal::from(hours);
    rental_prices
        .into_iter()
        .try_fold(hourly_rate.checked_mul(hours)?, |total, price| {
            total.checked_add(price.checked_mul(hours)?)
        })
}
