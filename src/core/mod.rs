pub mod bounds;
pub mod constants;
pub mod geo;
pub mod map;
pub mod platform;
pub mod projection;
pub mod viewport;
