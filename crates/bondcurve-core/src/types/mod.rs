//! Domain types.

mod amount;
mod buy_sell;
mod currency;
mod date;
mod identifiers;
mod tenor;

pub use amount::{CurrencyAmount, MultiCurrencyAmount};
pub use buy_sell::BuySell;
pub use currency::Currency;
pub use date::Date;
pub use identifiers::{
    CurveGroupName, CurveName, LegalEntityGroup, LegalEntityId, QuoteId, RepoGroup, SecurityId,
    StandardId,
};
pub use tenor::Tenor;
