pub mod listing;
pub mod resolve;
