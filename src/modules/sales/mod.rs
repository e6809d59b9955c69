pub mod models;

pub use models::{LineItem, LineItemStatus, MAX_UNIT_PRICE, NOT_AVAILABLE, UNKNOWN_PRODUCT};
