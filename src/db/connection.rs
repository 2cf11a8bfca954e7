//! Database connection pool and operations.

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Create a database connection pool.
pub async fn create_pool(conn_str: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(conn_str).await
}

/// Test database connection.
pub async fn test_connection(conn: &DatabaseConnection) -> Result<(), DbErr> {
    conn.ping().await
}
