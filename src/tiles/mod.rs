pub mod cache;
pub mod config;
pub mod source;
pub mod system;

// Re-exports for convenience
pub use cache::{GeometryCache, GeometryKey};
pub use config::{CenterTile, TileGeometryConfig, TileSize};
pub use source::{ShardPolicy, UrlResolver, UrlSource};
pub use system::TileSystem;
