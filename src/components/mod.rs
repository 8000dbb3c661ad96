pub mod app;
pub mod controls;
pub mod error_banner;
pub mod periodogram;
pub mod waterfall;
