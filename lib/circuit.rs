//! Conventional circuit descriptions over a register of qubits and a register
//! of classical bits.
//!
//! Circuits are assembled with a [`CircuitBuilder`], which checks every
//! operation as it is added, and then frozen into an immutable [`Circuit`].
//! All measurements come after all gates: a circuit is executed by applying
//! its gates to a fresh ∣0…0⟩ state, followed by a single measurement of the
//! whole register whose results are routed to classical bits.
//!
//! ```
//! # use bellsim::circuit::*;
//! let circuit
//!     = CircuitBuilder::new(2, 2).unwrap()
//!     .h(0).unwrap()
//!     .cx(0, 1).unwrap()
//!     .measure_all().unwrap()
//!     .build();
//! assert_eq!(circuit, Circuit::bell());
//! ```

use std::{ fmt, fs, io::Write, path::Path };
use rand::Rng;
use thiserror::Error;
use crate::{
    bits::{ BitString, BitsError },
    state::{ StateError, StateVec, MAX_QUBITS },
};

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("circuit: number of qubits must be between 1 and {1}, got {0}")]
    BadQubitCount(usize, usize),

    #[error("circuit: number of classical bits must be at most {1}, got {0}")]
    BadClbitCount(usize, usize),

    #[error("circuit: qubit index {0} out of range for {1} qubit(s)")]
    QubitOutOfRange(usize, usize),

    #[error("circuit: classical bit index {0} out of range for {1} bit(s)")]
    ClbitOutOfRange(usize, usize),

    #[error("circuit: two-qubit gate must act on distinct qubits, got {0} twice")]
    SameQubit(usize),

    #[error("circuit: cannot measure {0} qubit(s) into {1} classical bit(s)")]
    RegisterMismatch(usize, usize),

    #[error("circuit: gate {0} follows a measurement")]
    GateAfterMeasurement(Gate),

    #[error("circuit: qubit {0} is measured more than once")]
    QubitRemeasured(usize),

    #[error("circuit: classical bit {0} is written more than once")]
    ClbitReused(usize),

    #[error("state error: {0}")]
    StateError(#[from] StateError),

    #[error("bitstring error: {0}")]
    BitsError(#[from] BitsError),

    #[error("error constructing GraphViz representation: {0}")]
    GraphVizError(String),

    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
}
pub type CircuitResult<T> = Result<T, CircuitError>;
#[allow(unused_imports)]
use CircuitError::*;

/// A unitary gate to apply in a quantum circuit.
///
/// Every gate here is its own inverse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard.
    H(usize),
    /// π-rotation about *x*.
    X(usize),
    /// π-rotation about *z*.
    Z(usize),
    /// π-rotation about *x* on the second qubit, controlled by the first.
    CX(usize, usize),
    /// π-rotation about *z* on the second qubit, controlled by the first.
    CZ(usize, usize),
    /// Swap gate.
    Swap(usize, usize),
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `X`.
    pub fn is_x(&self) -> bool { matches!(self, Self::X(..)) }

    /// Return `true` if `self` is `Z`.
    pub fn is_z(&self) -> bool { matches!(self, Self::Z(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` is `CZ`.
    pub fn is_cz(&self) -> bool { matches!(self, Self::CZ(..)) }

    /// Return `true` if `self` is `Swap`.
    pub fn is_swap(&self) -> bool { matches!(self, Self::Swap(..)) }

    /// Return the short lowercase name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            Self::H(..) => "h",
            Self::X(..) => "x",
            Self::Z(..) => "z",
            Self::CX(..) => "cx",
            Self::CZ(..) => "cz",
            Self::Swap(..) => "swap",
        }
    }

    /// Return the qubit(s) the gate acts on, in argument order.
    pub fn qubits(&self) -> (usize, Option<usize>) {
        match *self {
            Self::H(k) | Self::X(k) | Self::Z(k) => (k, None),
            Self::CX(a, b) | Self::CZ(a, b) | Self::Swap(a, b) => (a, Some(b)),
        }
    }

    /// Return `true` if `other` is the inverse of `self`.
    pub fn is_inv(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::H(a), Self::H(b)) => a == b,
            (Self::X(a), Self::X(b)) => a == b,
            (Self::Z(a), Self::Z(b)) => a == b,
            (Self::CX(c_a, t_a), Self::CX(c_b, t_b)) =>
                c_a == c_b && t_a == t_b,
            (Self::CZ(a_a, b_a), Self::CZ(a_b, b_b)) =>
                (a_a == a_b && b_a == b_b) || (a_a == b_b && a_b == b_a),
            (Self::Swap(a_a, b_a), Self::Swap(a_b, b_b)) =>
                (a_a == a_b && b_a == b_b) || (a_a == b_b && a_b == b_a),
            _ => false,
        }
    }

    /// Return the inverse of `self`.
    pub fn inv(&self) -> Self { *self }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qubits() {
            (a, None) => write!(f, "{} q{}", self.name(), a),
            (a, Some(b)) => write!(f, "{} q{}, q{}", self.name(), a, b),
        }
    }
}

/// A generic circuit operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    /// A unitary gate.
    Gate(Gate),
    /// A *Z*-basis measurement of `qubit`, stored in classical bit `clbit`.
    Measure { qubit: usize, clbit: usize },
}

impl Op {
    /// Return `true` if `self` is `Gate`.
    pub fn is_gate(&self) -> bool { matches!(self, Self::Gate(_)) }

    /// Return `true` if `self` is `Measure`.
    pub fn is_measure(&self) -> bool { matches!(self, Self::Measure { .. }) }
}

impl From<Gate> for Op {
    fn from(gate: Gate) -> Self { Self::Gate(gate) }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate(gate) => write!(f, "{}", gate),
            Self::Measure { qubit, clbit } =>
                write!(f, "measure q{} -> c{}", qubit, clbit),
        }
    }
}

/// The four maximally entangled two-qubit states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BellState {
    /// ∣Φ⁺⟩ = (∣00⟩ + ∣11⟩) / √2
    PhiPlus,
    /// ∣Φ⁻⟩ = (∣00⟩ – ∣11⟩) / √2
    PhiMinus,
    /// ∣Ψ⁺⟩ = (∣01⟩ + ∣10⟩) / √2
    PsiPlus,
    /// ∣Ψ⁻⟩ = (∣01⟩ – ∣10⟩) / √2
    PsiMinus,
}

impl BellState {
    // gates applied before H(0), CX(0, 1) to reach the state from ∣00⟩
    fn prep(&self) -> &'static [Gate] {
        match self {
            Self::PhiPlus => &[],
            Self::PhiMinus => &[Gate::X(0)],
            Self::PsiPlus => &[Gate::X(1)],
            Self::PsiMinus => &[Gate::X(0), Gate::X(1)],
        }
    }
}

/// Accumulates and checks operations for a [`Circuit`].
#[derive(Clone, Debug)]
pub struct CircuitBuilder {
    nqubits: usize,
    nclbits: usize,
    ops: Vec<Op>,
    measured: Vec<bool>,
    written: Vec<bool>,
}

impl CircuitBuilder {
    /// Start a new circuit on `nqubits` qubits and `nclbits` classical bits.
    pub fn new(nqubits: usize, nclbits: usize) -> CircuitResult<Self> {
        if nqubits == 0 || nqubits > MAX_QUBITS {
            return Err(BadQubitCount(nqubits, MAX_QUBITS));
        }
        if nclbits > BitString::MAX_WIDTH {
            return Err(BadClbitCount(nclbits, BitString::MAX_WIDTH));
        }
        Ok(Self {
            nqubits,
            nclbits,
            ops: Vec::new(),
            measured: vec![false; nqubits],
            written: vec![false; nclbits],
        })
    }

    fn check_qubit(&self, q: usize) -> CircuitResult<()> {
        if q < self.nqubits { Ok(()) } else { Err(QubitOutOfRange(q, self.nqubits)) }
    }

    /// Append a gate.
    pub fn gate(&mut self, gate: Gate) -> CircuitResult<&mut Self> {
        match gate.qubits() {
            (a, None) => { self.check_qubit(a)?; },
            (a, Some(b)) => {
                self.check_qubit(a)?;
                self.check_qubit(b)?;
                if a == b { return Err(SameQubit(a)); }
            },
        }
        if self.measured.iter().any(|m| *m) {
            return Err(GateAfterMeasurement(gate));
        }
        self.ops.push(gate.into());
        Ok(self)
    }

    /// Append a Hadamard on qubit `k`.
    pub fn h(&mut self, k: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::H(k))
    }

    /// Append an *X* gate on qubit `k`.
    pub fn x(&mut self, k: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::X(k))
    }

    /// Append a *Z* gate on qubit `k`.
    pub fn z(&mut self, k: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::Z(k))
    }

    /// Append a CNOT with control `c` and target `t`.
    pub fn cx(&mut self, c: usize, t: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::CX(c, t))
    }

    /// Append a CZ between qubits `a` and `b`.
    pub fn cz(&mut self, a: usize, b: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::CZ(a, b))
    }

    /// Append a swap between qubits `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> CircuitResult<&mut Self> {
        self.gate(Gate::Swap(a, b))
    }

    /// Append a measurement of `qubit` into classical bit `clbit`.
    pub fn measure(&mut self, qubit: usize, clbit: usize)
        -> CircuitResult<&mut Self>
    {
        self.check_qubit(qubit)?;
        if clbit >= self.nclbits {
            return Err(ClbitOutOfRange(clbit, self.nclbits));
        }
        if self.measured[qubit] { return Err(QubitRemeasured(qubit)); }
        if self.written[clbit] { return Err(ClbitReused(clbit)); }
        self.measured[qubit] = true;
        self.written[clbit] = true;
        self.ops.push(Op::Measure { qubit, clbit });
        Ok(self)
    }

    /// Measure every qubit `k` into classical bit `k`.
    ///
    /// Requires at least as many classical bits as qubits.
    pub fn measure_all(&mut self) -> CircuitResult<&mut Self> {
        if self.nclbits < self.nqubits {
            return Err(RegisterMismatch(self.nqubits, self.nclbits));
        }
        (0..self.nqubits).try_for_each(|k| self.measure(k, k).map(|_| ()))?;
        Ok(self)
    }

    /// Freeze the accumulated operations into a [`Circuit`].
    pub fn build(&self) -> Circuit {
        Circuit {
            nqubits: self.nqubits,
            nclbits: self.nclbits,
            ops: self.ops.clone(),
        }
    }
}

/// An immutable quantum circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    nqubits: usize,
    nclbits: usize,
    ops: Vec<Op>,
}

impl Circuit {
    /// The canonical ∣Φ⁺⟩ circuit: a Hadamard on qubit 0, a CNOT from qubit 0
    /// to qubit 1, and a measurement of both qubits.
    pub fn bell() -> Self {
        Self {
            nqubits: 2,
            nclbits: 2,
            ops: vec![
                Gate::H(0).into(),
                Gate::CX(0, 1).into(),
                Op::Measure { qubit: 0, clbit: 0 },
                Op::Measure { qubit: 1, clbit: 1 },
            ],
        }
    }

    /// Like [`bell`][Self::bell], but preparing any of the four Bell states.
    pub fn bell_state(which: BellState) -> Self {
        let ops: Vec<Op>
            = which.prep().iter()
            .chain([Gate::H(0), Gate::CX(0, 1)].iter())
            .map(|g| Op::Gate(*g))
            .chain([
                Op::Measure { qubit: 0, clbit: 0 },
                Op::Measure { qubit: 1, clbit: 1 },
            ])
            .collect();
        Self { nqubits: 2, nclbits: 2, ops }
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize { self.nqubits }

    /// Return the number of classical bits.
    pub fn num_clbits(&self) -> usize { self.nclbits }

    /// Return all operations in order.
    pub fn ops(&self) -> &[Op] { &self.ops }

    /// Return an iterator over the gates only.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.ops.iter()
            .filter_map(|op| match op { Op::Gate(g) => Some(g), _ => None })
    }

    /// Return an iterator over `(qubit, clbit)` measurement pairs.
    pub fn measurements(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ops.iter()
            .filter_map(|op| match op {
                Op::Measure { qubit, clbit } => Some((*qubit, *clbit)),
                _ => None,
            })
    }

    /// Return `true` if the circuit contains at least one measurement.
    pub fn has_measurements(&self) -> bool {
        self.ops.iter().any(|op| op.is_measure())
    }

    /// Apply all gates to a fresh ∣0…0⟩ state and return it, ignoring
    /// measurements.
    pub fn statevector(&self) -> CircuitResult<StateVec> {
        let mut state = StateVec::new(self.nqubits)?;
        for gate in self.gates() {
            state.apply_gate(gate)?;
        }
        Ok(state)
    }

    /// Execute one shot of the circuit and return the classical register.
    ///
    /// The gates are applied to a fresh state, whose normalization is checked
    /// before a single measurement of the whole register. Classical bits that
    /// no measurement writes to read `0`. A circuit without measurements never
    /// consumes randomness.
    pub fn run_once<R>(&self, rng: &mut R) -> CircuitResult<BitString>
    where R: Rng + ?Sized
    {
        let mut state = self.statevector()?;
        state.check_norm()?;
        let mut creg = BitString::zeros(self.nclbits)?;
        if self.has_measurements() {
            let outcome = state.measure_all(rng)?;
            for (qubit, clbit) in self.measurements() {
                creg.set_bit(clbit, outcome.bit(qubit).unwrap_or(false));
            }
        }
        Ok(creg)
    }

    /// Render `self` as a graphviz graph, with one horizontal line of nodes per
    /// qubit wire.
    pub fn to_graphviz(&self, name: &str) -> CircuitResult<tabbycat::Graph> {
        use tabbycat::*;
        use tabbycat::attributes::*;
        use crate::vizdefs::*;
        let mut next_id: usize = 0;
        let mut fresh = || { let id = next_id; next_id += 1; id };

        // initial declarations
        let mut statements
            = StmtList::new()
            .add_attr(
                AttrType::Graph,
                AttrList::new().add_pair(rankdir(RankDir::LR)),
            )
            .add_attr(
                AttrType::Node,
                AttrList::new()
                    .add_pair(fontname(FONT))
                    .add_pair(fontsize(FONTSIZE))
                    .add_pair(margin(NODE_MARGIN))
                    ,
            );

        // input labels, stacked at the same rank
        let mut wires: Vec<usize> = Vec::with_capacity(self.nqubits);
        let mut inputs_subgraph_stmt
            = StmtList::new()
            .add_attr(
                AttrType::Graph,
                AttrList::new().add_pair(rank(RankType::Source)),
            );
        for k in 0..self.nqubits {
            let id = fresh();
            let attrs
                = AttrList::new()
                .add_pair(label(format!("q{}: ∣0⟩", k)))
                .add_pair(shape(Shape::Plaintext));
            inputs_subgraph_stmt
                = inputs_subgraph_stmt.add_node(id.into(), None, Some(attrs));
            wires.push(id);
        }
        statements
            = statements.add_subgraph(SubGraph::cluster(inputs_subgraph_stmt));

        fn gate_node(text: &str, color: attributes::Color, square: bool)
            -> AttrList
        {
            AttrList::new()
                .add_pair(label(text.to_string()))
                .add_pair(shape(if square { Shape::Square } else { Shape::Circle }))
                .add_pair(height(if square { SQUARE_HEIGHT } else { CIRCLE_HEIGHT }))
                .add_pair(style(Style::Filled))
                .add_pair(fillcolor(color))
        }

        for op in self.ops.iter() {
            // (qubit, node attributes) for each wire touched by `op`
            let nodes: Vec<(usize, AttrList)>
                = match *op {
                    Op::Gate(Gate::H(k)) =>
                        vec![(k, gate_node("H", H_COLOR, true))],
                    Op::Gate(Gate::X(k)) =>
                        vec![(k, gate_node("X", X_COLOR, true))],
                    Op::Gate(Gate::Z(k)) =>
                        vec![(k, gate_node("Z", Z_COLOR, true))],
                    Op::Gate(Gate::CX(c, t)) =>
                        vec![
                            (c, gate_node("•", Z_COLOR, false)),
                            (t, gate_node("⊕", X_COLOR, false)),
                        ],
                    Op::Gate(Gate::CZ(a, b)) =>
                        vec![
                            (a, gate_node("•", Z_COLOR, false)),
                            (b, gate_node("•", Z_COLOR, false)),
                        ],
                    Op::Gate(Gate::Swap(a, b)) =>
                        vec![
                            (a, gate_node("×", SWAP_COLOR, false)),
                            (b, gate_node("×", SWAP_COLOR, false)),
                        ],
                    Op::Measure { qubit, clbit } =>
                        vec![
                            (qubit, gate_node(&format!("M→c{}", clbit), MEAS_COLOR, true)),
                        ],
                };
            let mut ids: Vec<usize> = Vec::with_capacity(nodes.len());
            for (k, attrs) in nodes.into_iter() {
                let id = fresh();
                statements = statements.add_node(id.into(), None, Some(attrs));
                statements
                    = statements.add_edge(
                        Edge::head_node(wires[k].into(), None)
                            .line_to_node(id.into(), None)
                    );
                wires[k] = id;
                ids.push(id);
            }
            // tie the two halves of a two-qubit gate together
            if let &[a, b] = ids.as_slice() {
                statements
                    = statements.add_edge(
                        Edge::head_node(a.into(), None)
                            .line_to_node(b.into(), None)
                            .add_attrpair(color(CTRL_WIRE))
                    );
            }
        }

        // output labels, stacked at the same rank
        let mut outputs_subgraph_stmt
            = StmtList::new()
            .add_attr(
                AttrType::Graph,
                AttrList::new().add_pair(rank(RankType::Sink)),
            );
        for (k, last) in wires.iter().enumerate() {
            let id = fresh();
            let attrs
                = AttrList::new()
                .add_pair(label(format!("q{}", k)))
                .add_pair(shape(Shape::Plaintext));
            outputs_subgraph_stmt
                = outputs_subgraph_stmt.add_node(id.into(), None, Some(attrs));
            statements
                = statements.add_edge(
                    Edge::head_node((*last).into(), None)
                        .line_to_node(id.into(), None)
                );
        }
        statements
            = statements.add_subgraph(SubGraph::cluster(outputs_subgraph_stmt));

        GraphBuilder::default()
            .graph_type(GraphType::Graph)
            .strict(false)
            .id(Identity::quoted(name))
            .stmts(statements)
            .build()
            .map_err(GraphVizError)
    }

    /// Like [`to_graphviz`][Self::to_graphviz], but render directly to a string
    /// and write it to `path`.
    pub fn save_graphviz<P>(&self, name: &str, path: P) -> CircuitResult<()>
    where P: AsRef<Path>
    {
        let graphviz = self.to_graphviz(name)?;
        fs::OpenOptions::new()
            .write(true)
            .append(false)
            .create(true)
            .truncate(true)
            .open(path)?
            .write_all(format!("{}", graphviz).as_bytes())?;
        Ok(())
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreg q[{}];", self.nqubits)?;
        write!(f, "creg c[{}];", self.nclbits)?;
        for op in self.ops.iter() {
            write!(f, "\n{};", op)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;
    use rand::{ rngs::StdRng, SeedableRng };

    #[test]
    fn builder_matches_bell() {
        let circuit
            = CircuitBuilder::new(2, 2).unwrap()
            .h(0).unwrap()
            .cx(0, 1).unwrap()
            .measure_all().unwrap()
            .build();
        assert_eq!(circuit, Circuit::bell());
        assert_eq!(circuit, Circuit::bell_state(BellState::PhiPlus));
        assert_eq!(circuit.gates().count(), 2);
        assert_eq!(circuit.measurements().collect::<Vec<_>>(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn builder_errors() {
        let mut b = CircuitBuilder::new(2, 2).unwrap();
        assert!(matches!(b.h(2), Err(QubitOutOfRange(2, 2))));
        assert!(matches!(b.cx(1, 1), Err(SameQubit(1))));
        assert!(matches!(b.cx(0, 3), Err(QubitOutOfRange(3, 2))));
        assert!(matches!(b.measure(0, 2), Err(ClbitOutOfRange(2, 2))));
        b.measure(0, 1).unwrap();
        assert!(matches!(b.measure(0, 0), Err(QubitRemeasured(0))));
        assert!(matches!(b.measure(1, 1), Err(ClbitReused(1))));
        assert!(matches!(b.x(1), Err(GateAfterMeasurement(Gate::X(1)))));

        let mut b = CircuitBuilder::new(2, 1).unwrap();
        assert!(matches!(b.measure_all(), Err(RegisterMismatch(2, 1))));
        assert!(matches!(CircuitBuilder::new(0, 0), Err(BadQubitCount(0, _))));
        assert!(matches!(CircuitBuilder::new(1, 65), Err(BadClbitCount(65, 64))));
    }

    #[test]
    fn gate_inverse() {
        assert!(Gate::H(0).is_inv(&Gate::H(0)));
        assert!(!Gate::H(0).is_inv(&Gate::H(1)));
        assert!(Gate::CX(0, 1).is_inv(&Gate::CX(0, 1)));
        assert!(!Gate::CX(0, 1).is_inv(&Gate::CX(1, 0)));
        assert!(Gate::CZ(0, 1).is_inv(&Gate::CZ(1, 0)));
        assert!(Gate::Swap(2, 0).is_inv(&Gate::Swap(0, 2)));
        assert_eq!(Gate::CX(3, 1).inv(), Gate::CX(3, 1));
    }

    #[test]
    fn bell_statevector() {
        let state = Circuit::bell().statevector().unwrap();
        let mags: Vec<f64> = state.amps().iter().map(|a| a.norm()).collect();
        assert!((mags[0b00] - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((mags[0b11] - FRAC_1_SQRT_2).abs() < 1e-12);
        assert!(mags[0b01] < 1e-12);
        assert!(mags[0b10] < 1e-12);
    }

    #[test]
    fn bell_family_support() {
        let expected = [
            (BellState::PhiPlus, [0b00, 0b11], 1.0),
            (BellState::PhiMinus, [0b00, 0b11], -1.0),
            (BellState::PsiPlus, [0b01, 0b10], 1.0),
            (BellState::PsiMinus, [0b01, 0b10], -1.0),
        ];
        for (which, [k0, k1], rel_sign) in expected {
            let state = Circuit::bell_state(which).statevector().unwrap();
            let a0 = state.amp(k0).unwrap();
            let a1 = state.amp(k1).unwrap();
            assert!((a0.norm() - FRAC_1_SQRT_2).abs() < 1e-12);
            assert!((a1 - a0 * rel_sign).norm() < 1e-12);
        }
    }

    #[test]
    fn run_once_routes_clbits() {
        let mut rng = StdRng::seed_from_u64(10546);
        // ∣q₁q₀⟩ = ∣01⟩, with qubit 0 stored in clbit 2
        let circuit
            = CircuitBuilder::new(2, 3).unwrap()
            .x(0).unwrap()
            .measure(0, 2).unwrap()
            .measure(1, 0).unwrap()
            .build();
        for _ in 0..10 {
            assert_eq!(circuit.run_once(&mut rng).unwrap().to_string(), "100");
        }
        let unmeasured = CircuitBuilder::new(1, 2).unwrap().h(0).unwrap().build();
        assert_eq!(unmeasured.run_once(&mut rng).unwrap().to_string(), "00");
    }

    #[test]
    fn run_once_bell() {
        let mut rng = StdRng::seed_from_u64(10546);
        let circuit = Circuit::bell();
        for _ in 0..100 {
            let out = circuit.run_once(&mut rng).unwrap().to_string();
            assert!(out == "00" || out == "11");
        }
    }

    #[test]
    fn display() {
        let expected = "\
qreg q[2];
creg c[2];
h q0;
cx q0, q1;
measure q0 -> c0;
measure q1 -> c1;";
        assert_eq!(Circuit::bell().to_string(), expected);
    }

    #[test]
    fn graphviz() {
        let dot = Circuit::bell().to_graphviz("bell").unwrap().to_string();
        assert!(dot.contains("bell"));
        assert!(dot.contains("⊕"));
        assert!(dot.contains("M→c1"));
    }
}
