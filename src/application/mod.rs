pub mod directory;
pub mod normalize;
pub mod sync;
