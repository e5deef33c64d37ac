// src/render/components/mod.rs
mod date_component;
mod error_component;
mod layout_component;
mod reading_component;

pub use date_component::{DateTimeText, format_timestamp};
pub use error_component::ErrorMessage;
pub use layout_component::StaticLayout;
pub use reading_component::ReadingField;
