//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// The market needs at least one seller.
    #[error("market has no sellers")]
    NoSellers,
    /// A per-seller vector does not match the seller count.
    #[error("{field} has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// A scalar parameter is outside its accepted range.
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A per-seller value is outside its accepted range.
    #[error("seller {seller}: {field} = {value} is outside [{min}, {max}]")]
    SellerOutOfRange {
        seller: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type MarketResult<T> = core::result::Result<T, MarketError>;
pub type Result<T> = MarketResult<T>;
