pub mod app;
pub mod keymap;
pub mod render;
pub mod state;
pub mod theme;

pub use app::run;
