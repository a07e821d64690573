pub mod config;
mod detect;
mod latest;
mod render;
pub mod services;

pub use detect::detect;
pub use latest::{latest, latest_with};
pub use render::{load_layout, render, render_with};
