//! Presentation. Plain-text agenda rendering.

pub mod render;

pub use render::render_agenda;
