pub mod selected_connection;

pub use selected_connection::SelectedConnection;
