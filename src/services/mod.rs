pub mod animation;
pub mod api;
pub mod controller;
