//! Spiralscope library - live audio spectrum drawn as a pitch spiral

pub mod audio;
pub mod cli;
pub mod error;
pub mod params;
pub mod rendering;
pub mod spiral;
