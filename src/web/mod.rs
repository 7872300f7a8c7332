//! HTML pages (Askama templates) and their URL parameters

pub mod handlers;
pub mod params;

pub use params::{GalleryParams, ViewMode};
