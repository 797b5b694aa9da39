pub mod adapters;
pub mod client;
pub mod contracts;
pub mod controller;
pub mod error;

pub use adapters::*;
pub use client::*;
pub use contracts::*;
pub use controller::*;
pub use error::*;
