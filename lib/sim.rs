//! Repeated execution of a circuit and accumulation of its outcomes.
//!
//! Every shot starts from a freshly allocated ∣0…0⟩ state, so shots share no
//! state and may be sampled in any order or in parallel. Any error aborts the
//! whole run.

use rand::{ distributions::Standard, Rng, SeedableRng };
use rand_pcg::Pcg64Mcg;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{ debug, trace };
use crate::{
    circuit::{ Circuit, CircuitError, CircuitResult },
    histogram::{ Histogram, HistogramError },
};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("circuit error: {0}")]
    CircuitError(#[from] CircuitError),

    #[error("histogram error: {0}")]
    HistogramError(#[from] HistogramError),
}
pub type SimResult<T> = Result<T, SimError>;

/// Number of shots sampled by each parallel task in [`run_shots_par`].
pub const CHUNK_SHOTS: usize = 256;

/// Run `circuit` for `shots` independent shots and tally the outcomes.
pub fn run_shots<R>(circuit: &Circuit, shots: usize, rng: &mut R)
    -> SimResult<Histogram>
where R: Rng + ?Sized
{
    debug!(shots, qubits = circuit.num_qubits(), "sampling circuit");
    let mut hist = Histogram::new(circuit.num_clbits());
    for shot in 0..shots {
        let outcome = circuit.run_once(rng)?;
        trace!(shot, %outcome);
        hist.record(outcome)?;
    }
    debug!(shots, outcomes = hist.len(), "sampling done");
    Ok(hist)
}

/// Like [`run_shots`], but calling `build` to obtain the circuit for every
/// shot.
///
/// The width of the histogram is taken from the first circuit built; zero
/// shots produce an empty histogram of width 0.
pub fn run_shots_with<F, R>(mut build: F, shots: usize, rng: &mut R)
    -> SimResult<Histogram>
where
    F: FnMut() -> CircuitResult<Circuit>,
    R: Rng + ?Sized,
{
    debug!(shots, "sampling rebuilt circuits");
    let mut hist: Option<Histogram> = None;
    for shot in 0..shots {
        let circuit = build()?;
        let outcome = circuit.run_once(rng)?;
        trace!(shot, %outcome);
        hist.get_or_insert_with(|| Histogram::new(circuit.num_clbits()))
            .record(outcome)?;
    }
    Ok(hist.unwrap_or_else(|| Histogram::new(0)))
}

/// Run `circuit` for `shots` shots on the rayon thread pool.
///
/// Shots are split into chunks of [`CHUNK_SHOTS`], each sampled with its own
/// [`Pcg64Mcg`] seeded from a master generator, so the result depends only on
/// `seed` and not on the number of threads. With no seed, the master generator
/// is seeded from system entropy.
pub fn run_shots_par(circuit: &Circuit, shots: usize, seed: Option<u64>)
    -> SimResult<Histogram>
{
    let outer_rng = match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed),
        None => Pcg64Mcg::from_entropy(),
    };
    let nchunks = shots.div_ceil(CHUNK_SHOTS);
    debug!(shots, chunks = nchunks, ?seed, "sampling circuit in parallel");
    let seed_vec: Vec<u64>
        = outer_rng
        .sample_iter(&Standard)
        .take(nchunks)
        .collect();
    seed_vec
        .into_par_iter()
        .enumerate()
        .map(|(index, seed_chunk)| {
            let n = CHUNK_SHOTS.min(shots - index * CHUNK_SHOTS);
            let mut rng = Pcg64Mcg::seed_from_u64(seed_chunk);
            run_shots(circuit, n, &mut rng)
        })
        .try_reduce(
            || Histogram::new(circuit.num_clbits()),
            |a, b| a.merged(b).map_err(SimError::from),
        )
}

/// Parameters for a sampling run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShotConfig {
    /// Number of shots.
    pub shots: usize,
    /// Master seed; `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for ShotConfig {
    fn default() -> Self { Self { shots: 1024, seed: None } }
}

impl ShotConfig {
    /// Create a new config with a fixed seed.
    pub fn seeded(shots: usize, seed: u64) -> Self {
        Self { shots, seed: Some(seed) }
    }

    /// Sample `circuit` in parallel according to `self`.
    pub fn run(&self, circuit: &Circuit) -> SimResult<Histogram> {
        run_shots_par(circuit, self.shots, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use crate::circuit::CircuitBuilder;

    #[test]
    fn zero_shots() {
        let mut rng = StdRng::seed_from_u64(10546);
        let hist = run_shots(&Circuit::bell(), 0, &mut rng).unwrap();
        assert!(hist.is_empty());
        assert_eq!(hist.width(), 2);
        let hist = run_shots_par(&Circuit::bell(), 0, Some(1)).unwrap();
        assert!(hist.is_empty());
    }

    #[test]
    fn deterministic_circuit() {
        let mut rng = StdRng::seed_from_u64(10546);
        let circuit
            = CircuitBuilder::new(2, 2).unwrap()
            .x(1).unwrap()
            .measure_all().unwrap()
            .build();
        let hist = run_shots(&circuit, 50, &mut rng).unwrap();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist.get("10"), 50);
    }

    #[test]
    fn build_errors_abort() {
        let mut rng = StdRng::seed_from_u64(10546);
        let mut calls = 0;
        let res = run_shots_with(
            || {
                calls += 1;
                if calls < 3 {
                    Ok(Circuit::bell())
                } else {
                    CircuitBuilder::new(2, 2)?.h(5).map(|b| b.build())
                }
            },
            10,
            &mut rng,
        );
        assert!(matches!(
            res,
            Err(SimError::CircuitError(CircuitError::QubitOutOfRange(5, 2))),
        ));
        assert_eq!(calls, 3);
    }

    #[test]
    fn rebuilt_circuits() {
        let mut rng = StdRng::seed_from_u64(10546);
        let hist = run_shots_with(|| Ok(Circuit::bell()), 200, &mut rng).unwrap();
        assert_eq!(hist.total(), 200);
        assert_eq!(hist.get("00") + hist.get("11"), 200);
        let empty = run_shots_with(|| Ok(Circuit::bell()), 0, &mut rng).unwrap();
        assert_eq!(empty.width(), 0);
    }

    #[test]
    fn parallel_reproducible() {
        let circuit = Circuit::bell();
        let a = run_shots_par(&circuit, 1000, Some(10546)).unwrap();
        let b = run_shots_par(&circuit, 1000, Some(10546)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total(), 1000);
        assert_eq!(a.get("00") + a.get("11"), 1000);
        let c = ShotConfig::seeded(1000, 10546).run(&circuit).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn default_config() {
        let hist = ShotConfig::default().run(&Circuit::bell()).unwrap();
        assert_eq!(hist.total(), 1024);
    }
}
