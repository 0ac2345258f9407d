pub mod asset_repository;
pub mod indicator_engine;
pub mod price_provider;
pub mod price_repository;
