pub mod backend_client;
pub mod sales_source;

pub use backend_client::BackendClient;
pub use sales_source::SalesSource;
