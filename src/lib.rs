#![doc = include_str!("../README.md")]

pub mod error;
pub mod orders;
pub mod resolver;
pub mod usd;
pub mod xlsx;

pub use error::{Error, Result};
pub use orders::{LineItem, OrderSheet, Orders};
pub use usd::Usd;
