pub mod provider;
pub mod sqlite;
