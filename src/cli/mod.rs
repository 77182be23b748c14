//! Terminal front end: one-shot rates, the interactive board and setup

pub mod board;
pub mod rates;
pub mod setup;
pub mod ui;
pub mod watch;
