pub mod base;
pub mod macros;
pub mod manager;
pub mod tile;
