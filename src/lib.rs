pub mod api;
pub mod compose;
pub mod config;
pub mod normalize;
pub mod upstream;
