pub mod actions;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod reducer;
pub mod state;
pub mod strategy;

pub use actions::*;
pub use reducer::*;
pub use state::*;
