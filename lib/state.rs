//! Dense statevector representation of a register of qubits.
//!
//! A [`StateVec`] over *n* qubits holds 2<sup>*n*</sup> complex amplitudes,
//! indexed by basis state such that bit *q* of the index is the value of qubit
//! *q* (see [`BitString`]). Gates act in place and preserve normalization;
//! measurement is terminal and collapses the state.

use std::{ f64::consts::FRAC_1_SQRT_2, fmt };
use ndarray::Array1;
use num_complex::Complex64 as C64;
use rand::Rng;
use thiserror::Error;
use crate::{
    bits::{ BitString, BitsError },
    circuit::Gate,
};

#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("state: qubit index {0} out of range for {1} qubit(s)")]
    QubitOutOfRange(usize, usize),

    #[error("state: two-qubit gate must act on distinct qubits, got {0} twice")]
    SameQubit(usize),

    #[error("state: number of qubits must be between 1 and {1}, got {0}")]
    BadQubitCount(usize, usize),

    #[error("state: amplitude vector length {0} is not a power of two")]
    BadLength(usize),

    #[error("state: basis index {0} out of range for {1} qubit(s)")]
    BasisOutOfRange(usize, usize),

    #[error("state: vector is not normalized (squared norm = {0})")]
    NotNormalized(f64),

    #[error("state: already collapsed by measurement")]
    Collapsed,

    #[error("bitstring error: {0}")]
    BitsError(#[from] BitsError),
}
pub type StateResult<T> = Result<T, StateError>;

/// Largest register a [`StateVec`] may describe.
pub const MAX_QUBITS: usize = 24;

/// Tolerance on the squared norm of a state vector.
pub const NORM_TOL: f64 = 1e-10;

/// The state of a register of qubits.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVec {
    n: usize,
    amps: Array1<C64>,
    collapsed: bool,
}

impl StateVec {
    /// Create a new register of `n` qubits in the ∣0…0⟩ state.
    pub fn new(n: usize) -> StateResult<Self> {
        Self::basis(n, 0)
    }

    /// Create a new register of `n` qubits in the basis state ∣`k`⟩.
    pub fn basis(n: usize, k: usize) -> StateResult<Self> {
        if n == 0 || n > MAX_QUBITS {
            return Err(StateError::BadQubitCount(n, MAX_QUBITS));
        }
        let len = 1_usize << n;
        if k >= len { return Err(StateError::BasisOutOfRange(k, n)); }
        let mut amps: Array1<C64> = Array1::zeros(len);
        amps[k] = C64::from(1.0);
        Ok(Self { n, amps, collapsed: false })
    }

    /// Create a new register from a list of amplitudes.
    ///
    /// The length of `amps` must be a power of two, at least 2, and the
    /// amplitudes must be normalized to within [`NORM_TOL`].
    pub fn from_amps<I>(amps: I) -> StateResult<Self>
    where I: IntoIterator<Item = C64>
    {
        let amps: Array1<C64> = amps.into_iter().collect();
        let len = amps.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(StateError::BadLength(len));
        }
        let n = len.trailing_zeros() as usize;
        if n > MAX_QUBITS {
            return Err(StateError::BadQubitCount(n, MAX_QUBITS));
        }
        let state = Self { n, amps, collapsed: false };
        state.check_norm()?;
        Ok(state)
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.n }

    /// Return the number of amplitudes, 2<sup>*n*</sup>.
    pub fn len(&self) -> usize { self.amps.len() }

    /// Always `false`; a register holds at least one qubit.
    pub fn is_empty(&self) -> bool { false }

    /// Return `true` if the state has been measured.
    pub fn is_collapsed(&self) -> bool { self.collapsed }

    /// Return the amplitude on basis state `k`, if it exists.
    pub fn amp(&self, k: usize) -> Option<C64> { self.amps.get(k).copied() }

    /// Return a view of all amplitudes.
    pub fn amps(&self) -> &Array1<C64> { &self.amps }

    /// Return the sum of squared amplitude magnitudes.
    pub fn norm_sqr(&self) -> f64 { self.amps.iter().map(|a| a.norm_sqr()).sum() }

    /// Return `true` if the squared norm is 1 to within [`NORM_TOL`].
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < NORM_TOL
    }

    /// Like [`is_normalized`][Self::is_normalized], but return an error
    /// carrying the offending squared norm.
    pub fn check_norm(&self) -> StateResult<()> {
        let norm = self.norm_sqr();
        if (norm - 1.0).abs() < NORM_TOL {
            Ok(())
        } else {
            Err(StateError::NotNormalized(norm))
        }
    }

    /// Return the Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }

    fn check_live(&self) -> StateResult<()> {
        if self.collapsed { Err(StateError::Collapsed) } else { Ok(()) }
    }

    fn check_qubit(&self, q: usize) -> StateResult<()> {
        if q < self.n {
            Ok(())
        } else {
            Err(StateError::QubitOutOfRange(q, self.n))
        }
    }

    fn check_pair(&self, a: usize, b: usize) -> StateResult<()> {
        self.check_qubit(a)?;
        self.check_qubit(b)?;
        if a == b { Err(StateError::SameQubit(a)) } else { Ok(()) }
    }

    // every gate ends here; gates are unitary
    fn post_gate(&self) {
        debug_assert!(
            self.is_normalized(),
            "gate broke normalization: squared norm = {}",
            self.norm_sqr(),
        );
    }

    /// Apply a Hadamard gate to qubit `q`.
    pub fn apply_hadamard(&mut self, q: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_qubit(q)?;
        let mask = 1_usize << q;
        for k in (0..self.amps.len()).filter(|k| k & mask == 0) {
            let a0 = self.amps[k];
            let a1 = self.amps[k | mask];
            self.amps[k] = (a0 + a1) * FRAC_1_SQRT_2;
            self.amps[k | mask] = (a0 - a1) * FRAC_1_SQRT_2;
        }
        self.post_gate();
        Ok(self)
    }

    /// Apply a π-rotation about *x* to qubit `q`.
    pub fn apply_x(&mut self, q: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_qubit(q)?;
        let mask = 1_usize << q;
        for k in (0..self.amps.len()).filter(|k| k & mask == 0) {
            self.amps.swap(k, k | mask);
        }
        self.post_gate();
        Ok(self)
    }

    /// Apply a π-rotation about *z* to qubit `q`.
    pub fn apply_z(&mut self, q: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_qubit(q)?;
        let mask = 1_usize << q;
        self.amps.indexed_iter_mut()
            .filter(|(k, _)| k & mask != 0)
            .for_each(|(_, a)| { *a = -*a; });
        self.post_gate();
        Ok(self)
    }

    /// Apply a controlled-NOT gate with control `c` and target `t`.
    ///
    /// Amplitudes of basis states with bit `c` set are swapped with their
    /// partners across bit `t`.
    pub fn apply_cnot(&mut self, c: usize, t: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_pair(c, t)?;
        let cmask = 1_usize << c;
        let tmask = 1_usize << t;
        for k in (0..self.amps.len()).filter(|k| k & cmask != 0 && k & tmask == 0) {
            self.amps.swap(k, k | tmask);
        }
        self.post_gate();
        Ok(self)
    }

    /// Apply a controlled-*Z* gate between qubits `a` and `b`.
    pub fn apply_cz(&mut self, a: usize, b: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_pair(a, b)?;
        let mask = (1_usize << a) | (1_usize << b);
        self.amps.indexed_iter_mut()
            .filter(|(k, _)| k & mask == mask)
            .for_each(|(_, amp)| { *amp = -*amp; });
        self.post_gate();
        Ok(self)
    }

    /// Swap the states of qubits `a` and `b`.
    pub fn apply_swap(&mut self, a: usize, b: usize) -> StateResult<&mut Self> {
        self.check_live()?;
        self.check_pair(a, b)?;
        let amask = 1_usize << a;
        let bmask = 1_usize << b;
        for k in (0..self.amps.len()).filter(|k| k & amask != 0 && k & bmask == 0) {
            self.amps.swap(k, (k & !amask) | bmask);
        }
        self.post_gate();
        Ok(self)
    }

    /// Apply any [`Gate`].
    pub fn apply_gate(&mut self, gate: &Gate) -> StateResult<&mut Self> {
        match *gate {
            Gate::H(k) => self.apply_hadamard(k),
            Gate::X(k) => self.apply_x(k),
            Gate::Z(k) => self.apply_z(k),
            Gate::CX(c, t) => self.apply_cnot(c, t),
            Gate::CZ(a, b) => self.apply_cz(a, b),
            Gate::Swap(a, b) => self.apply_swap(a, b),
        }
    }

    /// Measure all qubits in the *Z* basis.
    ///
    /// A basis index is drawn with probability equal to its squared amplitude
    /// magnitude, using a single uniform sample from `rng`, and the state is
    /// collapsed onto it. The state may not be measured again or acted on by
    /// any further gates.
    pub fn measure_all<R>(&mut self, rng: &mut R) -> StateResult<BitString>
    where R: Rng + ?Sized
    {
        self.check_live()?;
        let r: f64 = rng.gen();
        let mut acc = 0.0;
        let mut last_nonzero: usize = 0;
        let mut outcome: Option<usize> = None;
        for (k, a) in self.amps.iter().enumerate() {
            let p = a.norm_sqr();
            if p > 0.0 { last_nonzero = k; }
            acc += p;
            if p > 0.0 && acc > r {
                outcome = Some(k);
                break;
            }
        }
        // round-off can leave the cumulative sum just short of `r`
        let k = outcome.unwrap_or(last_nonzero);
        let a = self.amps[k];
        self.amps.fill(C64::from(0.0));
        self.amps[k] = if a.norm() > 0.0 { a / a.norm() } else { C64::from(1.0) };
        self.collapsed = true;
        Ok(BitString::new(k as u64, self.n)?)
    }
}

impl fmt::Display for StateVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms
            = self.amps.iter()
            .enumerate()
            .filter(|(_, a)| a.norm_sqr() > NORM_TOL)
            .peekable();
        if terms.peek().is_none() { return write!(f, "0"); }
        let mut first = true;
        for (k, a) in terms {
            if !first { write!(f, " + ")?; }
            first = false;
            let bits = BitString::new(k as u64, self.n).map_err(|_| fmt::Error)?;
            write!(f, "({})∣{}⟩", a, bits)?;
        }
        Ok(())
    }
}
