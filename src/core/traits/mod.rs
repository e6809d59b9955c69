pub mod key_value_store;

pub use key_value_store::{get_json, set_json, KeyValueStore};
