//! Core domain types and logic.

pub mod price;
pub mod dates;
pub mod company;
pub mod cleaning;
pub mod indicator;
pub mod engine;
pub mod macro_data;
pub mod merge;
pub mod table;
pub mod window;
pub mod pipeline;
pub mod config;
pub mod error;
