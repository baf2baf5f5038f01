pub mod client;
pub mod color_utils;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod storage;

pub use error::{Error, Result};
