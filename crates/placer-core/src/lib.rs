pub mod anchors;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod interaction;
pub mod placer;
pub mod scripted;
pub mod status;
pub mod tracker;
pub mod visualizer;

pub use anchors::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use headless::*;
pub use interaction::*;
pub use placer::*;
pub use scripted::*;
pub use status::*;
pub use tracker::*;
pub use visualizer::*;
