//! Core business logic abstractions

pub mod board;
pub mod config;
pub mod currency;
pub mod log;
pub mod quote;
pub mod rates;

// Re-export main types for cleaner imports
pub use board::{FetchState, FetchTicket, RateBoard, RateCard};
pub use currency::Currency;
pub use quote::{Quote, Spread, derive_quote};
pub use rates::{AsOf, RateProvider, RateRequest, RateTable};
