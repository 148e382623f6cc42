//! Benchmark measurements for the CPU vs. SME matmul comparison.
//!
//! The numbers are literal constants from a single measurement run; nothing
//! here performs I/O or computation beyond indexing.

/// Matrix problem sizes covered by the benchmark (M×K×N, all cubic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixSize {
    Size64,
    Size128,
    Size256,
}

impl MatrixSize {
    pub fn all() -> &'static [MatrixSize] {
        &[MatrixSize::Size64, MatrixSize::Size128, MatrixSize::Size256]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MatrixSize::Size64 => "64×64×64",
            MatrixSize::Size128 => "128×128×128",
            MatrixSize::Size256 => "256×256×256",
        }
    }

    /// Position within `all()`, used as the x coordinate on category axes
    pub fn index(&self) -> usize {
        match self {
            MatrixSize::Size64 => 0,
            MatrixSize::Size128 => 1,
            MatrixSize::Size256 => 2,
        }
    }
}

/// Matmul implementation variants being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Scalar reference implementation
    CpuBaseline,
    /// CPU-side transpose feeding a single SME tile
    CpuPrepSingleTile,
    /// SME-side transpose feeding a single SME tile
    SmePrepSingleTile,
    /// SME-side transpose feeding four tiles in parallel
    SmePrepFourTiles,
}

impl Method {
    pub fn all() -> &'static [Method] {
        &[
            Method::CpuBaseline,
            Method::CpuPrepSingleTile,
            Method::SmePrepSingleTile,
            Method::SmePrepFourTiles,
        ]
    }

    /// Legend label for the execution-time chart
    pub fn label(&self) -> &'static str {
        match self {
            Method::CpuBaseline => "CPU Baseline",
            Method::CpuPrepSingleTile => "CPU Prep + Single Tile",
            Method::SmePrepSingleTile => "SME Prep + Single Tile",
            Method::SmePrepFourTiles => "SME Prep + 4-Tiles Parallel",
        }
    }

    /// Compact label for the throughput chart legend
    pub fn short_label(&self) -> &'static str {
        match self {
            Method::CpuBaseline => "CPU",
            Method::CpuPrepSingleTile => "CPU Prep + Single",
            Method::SmePrepSingleTile => "SME Prep + Single",
            Method::SmePrepFourTiles => "SME Prep + 4-Tiles",
        }
    }

    /// Legend label for the speedup chart, which only shows SME variants
    pub fn speedup_label(&self) -> &'static str {
        match self {
            Method::CpuBaseline => "Baseline (CPU)",
            Method::CpuPrepSingleTile => "SME (CPU Transpose + Single Tile)",
            Method::SmePrepSingleTile => "SME (SME Transpose + Single Tile)",
            Method::SmePrepFourTiles => "SME (SME Transpose + 4-Tiles Parallel)",
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, Method::CpuBaseline)
    }

    fn index(&self) -> usize {
        match self {
            Method::CpuBaseline => 0,
            Method::CpuPrepSingleTile => 1,
            Method::SmePrepSingleTile => 2,
            Method::SmePrepFourTiles => 3,
        }
    }
}

/// One metric across every method and matrix size.
///
/// Rows are ordered like `Method::all()`, columns like `MatrixSize::all()`.
#[derive(Debug, Clone)]
pub struct MetricTable {
    values: [[f64; 3]; 4],
}

impl MetricTable {
    pub fn new(values: [[f64; 3]; 4]) -> Self {
        Self { values }
    }

    pub fn get(&self, method: Method) -> &[f64; 3] {
        &self.values[method.index()]
    }

    pub fn value(&self, method: Method, size: MatrixSize) -> f64 {
        self.values[method.index()][size.index()]
    }

    /// Series points for plotting, x being the category index
    pub fn points(&self, method: Method) -> Vec<(f64, f64)> {
        self.get(method)
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }
}

/// The three parallel measurement tables described in the report
#[derive(Debug, Clone)]
pub struct Measurements {
    /// Wall-clock execution time in microseconds
    pub time_us: MetricTable,
    /// Speedup factor relative to the CPU baseline
    pub speedup: MetricTable,
    /// Throughput in GFLOPS
    pub gflops: MetricTable,
}

/// Measured results from the SME optimization run
pub fn benchmark_data() -> Measurements {
    Measurements {
        time_us: MetricTable::new([
            [453.0, 2985.9, 11554.4],
            [39.4, 59.6, 140.2],
            [5.1, 18.8, 66.1],
            [5.3, 8.4, 23.0],
        ]),
        speedup: MetricTable::new([
            [1.00, 1.00, 1.00],
            [11.50, 50.10, 82.41],
            [88.82, 158.82, 174.80],
            [85.47, 355.46, 502.37],
        ]),
        gflops: MetricTable::new([
            [1.16, 1.40, 2.90],
            [13.31, 70.37, 239.33],
            [102.80, 223.10, 507.63],
            [98.92, 499.32, 1458.89],
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_every_size() {
        let data = benchmark_data();
        for &method in Method::all() {
            assert_eq!(data.time_us.get(method).len(), MatrixSize::all().len());
            assert_eq!(data.speedup.get(method).len(), MatrixSize::all().len());
            assert_eq!(data.gflops.get(method).len(), MatrixSize::all().len());
        }
    }

    #[test]
    fn test_baseline_speedup_is_one() {
        let data = benchmark_data();
        for &size in MatrixSize::all() {
            assert_eq!(data.speedup.value(Method::CpuBaseline, size), 1.00);
        }
    }

    #[test]
    fn test_values_strictly_positive() {
        let data = benchmark_data();
        for &method in Method::all() {
            for &size in MatrixSize::all() {
                assert!(data.time_us.value(method, size) > 0.0);
                assert!(data.gflops.value(method, size) > 0.0);
                assert!(data.speedup.value(method, size) > 0.0);
            }
        }
    }

    #[test]
    fn test_four_tiles_is_fastest() {
        let data = benchmark_data();
        for &size in MatrixSize::all() {
            let best = data.time_us.value(Method::SmePrepFourTiles, size);
            for &method in Method::all() {
                assert!(best <= data.time_us.value(method, size));
            }
        }
    }

    #[test]
    fn test_speedup_consistent_with_times() {
        // Speedup was derived from the time table; the published figures are
        // rounded to two decimals, so allow a small relative tolerance.
        let data = benchmark_data();
        for &method in Method::all() {
            for &size in MatrixSize::all() {
                let derived = data.time_us.value(Method::CpuBaseline, size)
                    / data.time_us.value(method, size);
                let published = data.speedup.value(method, size);
                let rel_err = (derived - published).abs() / published;
                assert!(
                    rel_err < 0.02,
                    "{:?} @ {}: derived {:.2} vs published {:.2}",
                    method,
                    size.name(),
                    derived,
                    published
                );
            }
        }
    }

    #[test]
    fn test_points_align_with_size_indices() {
        let data = benchmark_data();
        let points = data.gflops.points(Method::SmePrepFourTiles);
        assert_eq!(points.len(), 3);
        for (&size, &(x, y)) in MatrixSize::all().iter().zip(points.iter()) {
            assert_eq!(x, size.index() as f64);
            assert_eq!(y, data.gflops.value(Method::SmePrepFourTiles, size));
        }
    }
}
