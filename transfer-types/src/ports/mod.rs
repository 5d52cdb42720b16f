//! Port traits implemented by the outbound adapters.

mod rates;
mod store;

pub use rates::RateSource;
pub use store::TransferStore;
