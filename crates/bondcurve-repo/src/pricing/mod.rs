//! Discounting pricers for repos.
//!
//! Both legs are discounted on the repo curve mapped to the collateral
//! issuer:
//!
//! ```text
//! pv       = (N + I) * df(end) - N0 * df(start)
//! par rate = (df(start) / df(end) - 1) / yf
//! ```
//!
//! where `N0` is the notional while the start date has not passed and zero
//! afterwards. Once the valuation date is after the end date the present
//! value is zero.

mod product_pricer;
mod trade_pricer;

pub use product_pricer::DiscountingRepoProductPricer;
pub use trade_pricer::DiscountingRepoTradePricer;
