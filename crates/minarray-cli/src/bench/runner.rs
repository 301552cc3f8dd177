use anyhow::{Context, Result};
use minarray::{Array, DType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::time::{Duration, Instant};

use crate::bench::input::BenchConfig;

/// Timings for one element type.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub dtype: DType,
    pub size: usize,
    pub dot: Duration,
    pub sum_columns: Duration,
    pub sum_rows: Duration,
    /// Grand total of the product, rendered as a 1x1 array.
    pub total: String,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} n={} dot {:.6}s sum(1) {:.6}s sum(0) {:.6}s total {}",
            self.dtype,
            self.size,
            self.dot.as_secs_f64(),
            self.sum_columns.as_secs_f64(),
            self.sum_rows.as_secs_f64(),
            self.total.trim_end()
        )
    }
}

/// Run `op` `repeats` times, returning the last result and the fastest time.
fn timed<T, F>(repeats: usize, mut op: F) -> Result<(T, Duration)>
where
    F: FnMut() -> minarray::error::Result<T>,
{
    let mut best = Duration::MAX;
    let mut result = None;
    for _ in 0..repeats {
        let start = Instant::now();
        let value = op()?;
        best = best.min(start.elapsed());
        result = Some(value);
    }
    let result = result.context("benchmark ran zero repeats")?;
    Ok((result, best))
}

pub fn run_dtype(config: &BenchConfig, dtype: DType) -> Result<BenchReport> {
    let n = config.size;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut a = Array::zeros(&[n, n], dtype)?;
    let mut b = Array::zeros(&[n, n], dtype)?;
    a.randint_with(&mut rng, config.low, config.high)?;
    b.randint_with(&mut rng, config.low, config.high)?;

    let (product, dot) = timed(config.repeats, || a.dot(&b))?;
    log::info!("Dot {} {:.6} seconds", dtype, dot.as_secs_f64());

    let (row_sums, sum_columns) = timed(config.repeats, || product.sum(1))?;
    log::info!("Sum 1 {} {:.6} seconds", dtype, sum_columns.as_secs_f64());

    let (total, sum_rows) = timed(config.repeats, || row_sums.sum(0))?;
    log::info!("Sum 0 {} {:.6} seconds", dtype, sum_rows.as_secs_f64());

    Ok(BenchReport {
        dtype,
        size: n,
        dot,
        sum_columns,
        sum_rows,
        total: total.to_string(),
    })
}

pub fn run_benchmark(config: &BenchConfig) -> Result<Vec<BenchReport>> {
    config.validate()?;
    config
        .dtypes
        .iter()
        .map(|&dtype| {
            run_dtype(config, dtype).with_context(|| format!("Benchmark failed for {}", dtype))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_benchmark_totals() {
        let config = BenchConfig {
            size: 4,
            low: 1,
            high: 2,
            seed: Some(1),
            ..BenchConfig::default()
        };
        let reports = run_benchmark(&config).unwrap();
        assert_eq!(reports.len(), 4);
        for report in reports {
            // all-ones operands: every product entry is n, grand total n^3
            assert_eq!(report.total, "[6.40e+01]\n");
        }
    }
}
