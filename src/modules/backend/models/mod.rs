pub mod envelope;

pub use envelope::{extract_records, ApiEnvelope, ApiStatus};
