pub mod cache;
pub mod ramp;
pub mod raster;
pub mod render;
pub mod types;
pub mod window;
