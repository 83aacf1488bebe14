pub mod builders;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Longest path to the end of any terminal task, computed by plain
/// relaxation over `edges` (pred, task). Independent of the crate's solvers.
pub fn longest_path_completion(
    durations: &[f64],
    edges: &[(usize, usize)],
    terminals: &[usize],
) -> f64 {
    let mut start = vec![0.0_f64; durations.len()];
    // Bellman-Ford style: n passes suffice on a DAG.
    for _ in 0..durations.len() {
        let mut changed = false;
        for &(p, t) in edges {
            let candidate = start[p] + durations[p];
            if candidate > start[t] {
                start[t] = candidate;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    terminals
        .iter()
        .map(|&t| start[t] + durations[t])
        .fold(0.0, f64::max)
}
