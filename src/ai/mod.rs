pub mod client;
pub mod generator;
pub mod keywords;
pub mod label;
pub mod prompts;

pub use client::*;
pub use generator::*;
pub use label::*;
