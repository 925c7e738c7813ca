pub mod components;
pub mod config;
pub mod field;
pub mod ladder;
pub mod system;
