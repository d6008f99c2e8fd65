pub mod config;
pub mod page;
pub mod state;
pub mod text;
