//! Market data model.

pub mod seller;
pub mod params;

pub use params::MarketParams;
pub use seller::Seller;

/// One snapshot per iteration, one entry per seller.
pub type History = Vec<Vec<f64>>;
