pub mod chart;
pub mod data;
pub mod export;
pub mod style;

pub use data::{benchmark_data, MatrixSize, Measurements, Method, MetricTable};
pub use style::Palette;
