pub mod parse;
pub mod price;

pub use price::PriceFetcher;
