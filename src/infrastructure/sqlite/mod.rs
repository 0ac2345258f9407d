pub mod asset_repo;
pub mod indicator_engine;
pub mod migrations;
pub mod price_repo;
