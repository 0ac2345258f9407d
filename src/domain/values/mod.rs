pub mod provider_map;
pub mod recompute_window;
