//! Interaction state: one controller per concern, composed by
//! [`navigation::NavigationController`].

pub mod archive;
pub mod boxes;
pub mod info;
pub mod input;
pub mod message;
pub mod navigation;
pub mod now;
pub mod structure;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use navigation::{NavigationController, UiMode, View};
