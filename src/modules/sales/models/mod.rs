pub mod line_item;

pub use line_item::{LineItem, LineItemStatus, MAX_UNIT_PRICE, NOT_AVAILABLE, UNKNOWN_PRODUCT};
