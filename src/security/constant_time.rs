/*!
 * Constant-Time Comparison and Verification
 *
 * Provides the comparison primitive used for authentication tags and a
 * small timing harness that checks an operation does not run measurably
 * faster for one class of inputs than another.
 */

use crate::error::{error_codes, CryptoError, CryptoResult};
use std::time::{Duration, Instant};
use subtle::ConstantTimeEq;

/// Compare two byte slices without branching on their contents.
///
/// Every byte pair is XOR-accumulated and the accumulator is tested against
/// zero once. Slices of different length compare unequal; lengths are not
/// treated as secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff.ct_eq(&0u8).into()
}

/// Result of a timing comparison between two input classes
#[derive(Debug, Clone)]
pub struct ConstantTimeResult {
    pub is_constant_time: bool,
    pub mean_a: Duration,
    pub mean_b: Duration,
    pub t_statistic: f64,
    pub samples_per_class: usize,
}

/// Configuration for constant-time testing
#[derive(Debug, Clone)]
pub struct ConstantTimeConfig {
    pub iterations: usize,
    pub warmup_iterations: usize,
    /// Largest |t| accepted before the operation is reported as leaking
    pub t_threshold: f64,
}

impl Default for ConstantTimeConfig {
    fn default() -> Self {
        Self {
            iterations: 10000,
            warmup_iterations: 1000,
            t_threshold: 10.0,
        }
    }
}

/// Verify that an operation takes the same time for two classes of input.
///
/// Measurements of both classes are interleaved so that frequency scaling
/// and cache state affect them equally, then compared with Welch's t-test.
pub fn verify_constant_time<F, T>(
    mut operation: F,
    class_a: &T,
    class_b: &T,
    config: &ConstantTimeConfig,
) -> CryptoResult<ConstantTimeResult>
where
    F: FnMut(&T),
{
    for _ in 0..config.warmup_iterations {
        operation(class_a);
        operation(class_b);
    }

    let mut times_a = Vec::with_capacity(config.iterations);
    let mut times_b = Vec::with_capacity(config.iterations);

    for i in 0..config.iterations {
        // Alternate which class goes first
        let (first, second) = if i % 2 == 0 {
            (class_a, class_b)
        } else {
            (class_b, class_a)
        };

        let t_first = time_once(&mut operation, first);
        let t_second = time_once(&mut operation, second);

        if i % 2 == 0 {
            times_a.push(t_first);
            times_b.push(t_second);
        } else {
            times_b.push(t_first);
            times_a.push(t_second);
        }
    }

    let result = analyze_timing_measurements(&times_a, &times_b, config)?;

    if !result.is_constant_time {
        return Err(CryptoError::SideChannelViolation {
            test_name: "constant_time_verification".to_string(),
            details: format!(
                "Welch t statistic {:.2} exceeds threshold {:.2}",
                result.t_statistic, config.t_threshold
            ),
            error_code: error_codes::SIDE_CHANNEL_LEAK,
        });
    }

    Ok(result)
}

fn time_once<F, T>(operation: &mut F, input: &T) -> u64
where
    F: FnMut(&T),
{
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    let start = Instant::now();
    operation(input);
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
    start.elapsed().as_nanos() as u64
}

/// Compare two sets of timing measurements (nanoseconds)
fn analyze_timing_measurements(
    times_a: &[u64],
    times_b: &[u64],
    config: &ConstantTimeConfig,
) -> CryptoResult<ConstantTimeResult> {
    if times_a.len() < 2 || times_b.len() < 2 {
        return Err(CryptoError::invalid_parameter(
            "measurements",
            "at least 2 samples per class",
            &format!("{} and {} samples", times_a.len(), times_b.len()),
        ));
    }

    let (mean_a, var_a) = mean_and_variance(times_a);
    let (mean_b, var_b) = mean_and_variance(times_b);

    let standard_error = (var_a / times_a.len() as f64 + var_b / times_b.len() as f64).sqrt();
    let t_statistic = if standard_error == 0.0 {
        0.0
    } else {
        (mean_a - mean_b) / standard_error
    };

    Ok(ConstantTimeResult {
        is_constant_time: t_statistic.abs() <= config.t_threshold,
        mean_a: Duration::from_nanos(mean_a as u64),
        mean_b: Duration::from_nanos(mean_b as u64),
        t_statistic,
        samples_per_class: times_a.len().min(times_b.len()),
    })
}

fn mean_and_variance(samples: &[u64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&x| x as f64).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|&x| {
            let diff = x as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    (mean, variance)
}
