pub mod bar;
pub mod chart;
pub mod error;
pub mod series;
