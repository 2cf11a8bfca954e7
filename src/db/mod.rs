//! Database repositories and connection management.

pub mod connection;
pub mod department;
pub mod reference;

pub use connection::create_pool;
