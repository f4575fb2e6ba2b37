pub mod connection;
pub mod matches;
pub mod models;
pub mod repository;
pub mod setup;
pub mod stats;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
pub use repository::Repository;
pub use setup::run_migrations;

#[cfg(test)]
pub(crate) fn test_connection() -> rusqlite::Connection {
    let mut conn = rusqlite::Connection::open_in_memory().unwrap();
    run_migrations(&mut conn).unwrap();
    conn
}
