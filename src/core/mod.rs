pub mod currency;
pub mod error;
pub mod period;
pub mod traits;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use period::{bucket_key, period_bounds, Granularity};
