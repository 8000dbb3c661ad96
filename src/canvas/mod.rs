pub mod export;
pub mod periodogram_chart;
pub mod surface;
