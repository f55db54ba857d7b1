// Library interface for the lab terminal

pub mod config;
pub mod primitives;
pub mod services;
pub mod view;

#[cfg(feature = "runtime")]
pub mod app;
#[cfg(feature = "runtime")]
pub mod input;
