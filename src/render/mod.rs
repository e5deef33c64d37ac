// src/render/mod.rs
pub mod components;

mod render_engine;
pub use render_engine::RenderEngine;

mod text_renderer;
pub use text_renderer::{TextRenderer, wrap_text};
