// src/graphics/mod.rs
pub mod buffer;

pub use buffer::FrameBuffer;
