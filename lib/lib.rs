//! This package contains a small dense statevector simulator, built around the
//! two-qubit circuit that prepares a [Bell state][bell]: a Hadamard gate puts
//! qubit 0 into superposition and a controlled-NOT entangles it with qubit 1.
//!
//! - [`state`] holds the 2<sup>*n*</sup> complex amplitudes of a register and
//! applies gates and [Born-rule][born] measurement to them.
//! - [`circuit`] provides a checked builder for fixed sequences of gates and
//! measurements, and renders circuits as GraphViz diagrams.
//! - [`sim`] runs a circuit for many independent shots, sequentially or on a
//! thread pool, and tallies the outcomes into a [`histogram`].
//!
//! ```
//! use rand::SeedableRng;
//! use bellsim::{ circuit::Circuit, sim::run_shots };
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(10546);
//! let hist = run_shots(&Circuit::bell(), 1000, &mut rng).unwrap();
//! assert_eq!(hist.get("00") + hist.get("11"), 1000);
//! assert_eq!(hist.get("01") + hist.get("10"), 0);
//! ```
//!
//! [bell]: https://en.wikipedia.org/wiki/Bell_state
//! [born]: https://en.wikipedia.org/wiki/Born_rule
//!
//! # Further reading
//! - M. A. Nielsen and I. L. Chuang, *Quantum Computation and Quantum
//! Information*, ch. 1.3.

pub mod bits;
pub mod state;
pub mod circuit;
pub mod histogram;
pub mod sim;
pub(crate) mod vizdefs;

pub use bits::BitString;
pub use circuit::{ BellState, Circuit, CircuitBuilder, Gate, Op };
pub use histogram::Histogram;
pub use sim::{ run_shots, run_shots_par, run_shots_with, ShotConfig };
pub use state::StateVec;

pub extern crate num_complex;
/// Handy macro to create `num_complex::Complex64`s from more natural and
/// succinct syntax.
///
/// ```
/// use std::f64::consts::FRAC_1_SQRT_2;
/// use num_complex::Complex64;
/// use bellsim::c;
///
/// assert_eq!( c!(i (-1.0)),          Complex64::new(0.0, -1.0)           );
/// assert_eq!( c!(FRAC_1_SQRT_2),     Complex64::new(FRAC_1_SQRT_2, 0.0)  );
/// assert_eq!( c!(0.5, 0.5),          Complex64::new(0.5, 0.5)            );
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr )
        => { $crate::num_complex::Complex64::new(0.0, $im) };
    ( $re:expr )
        => { $crate::num_complex::Complex64::new($re, 0.0) };
    ( $re:expr, $im:expr )
        => { $crate::num_complex::Complex64::new($re, $im) };
}
