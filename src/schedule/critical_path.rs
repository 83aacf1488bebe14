// src/schedule/critical_path.rs

//! Longest-path traversal in topological order.

use crate::errors::Result;
use crate::schedule::network::Network;

/// Earliest starts and the resulting completion time.
///
/// `start[t]` is the longest duration-weighted path from any source to `t`;
/// completion is the latest finish over the terminal tasks.
pub fn earliest_starts(network: &Network) -> Result<(Vec<f64>, f64)> {
    let order = network.topological_order()?;
    let mut starts = vec![0.0_f64; network.len()];

    for &t in order.iter() {
        starts[t] = network
            .predecessors(t)
            .iter()
            .map(|&p| starts[p] + network.duration(p))
            .fold(0.0, f64::max);
    }

    let completion = network
        .terminals()
        .iter()
        .map(|&t| starts[t] + network.duration(t))
        .fold(0.0, f64::max);

    Ok((starts, completion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_takes_the_later_predecessor() {
        // A=15, B=18, C=12 with C after A, E after B and C.
        let net = Network::new(
            vec!["A".into(), "B".into(), "C".into(), "E".into()],
            vec![15.0, 18.0, 12.0, 16.0],
            vec![vec![], vec![], vec![0], vec![1, 2]],
            vec![3],
        )
        .unwrap();

        let (starts, completion) = earliest_starts(&net).unwrap();
        assert_eq!(starts, vec![0.0, 0.0, 15.0, 27.0]);
        assert_eq!(completion, 43.0);
    }

    #[test]
    fn isolated_task_starts_at_zero() {
        let net = Network::new(vec!["solo".into()], vec![4.0], vec![vec![]], vec![0]).unwrap();
        assert_eq!(earliest_starts(&net).unwrap(), (vec![0.0], 4.0));
    }
}
