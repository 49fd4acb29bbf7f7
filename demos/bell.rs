use std::{ path::PathBuf, time::Instant };
use clap::{ Parser, ValueEnum };
use tracing_subscriber::EnvFilter;
use bellsim::{
    circuit::{ BellState, Circuit },
    sim::ShotConfig,
};

fn timeit<F, T>(mut f: F) -> (T, f64)
where F: FnMut() -> T
{
    let t0 = Instant::now();
    let out: T = f();
    (out, (Instant::now() - t0).as_secs_f64())
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Which {
    PhiPlus,
    PhiMinus,
    PsiPlus,
    PsiMinus,
}

impl From<Which> for BellState {
    fn from(which: Which) -> Self {
        match which {
            Which::PhiPlus => BellState::PhiPlus,
            Which::PhiMinus => BellState::PhiMinus,
            Which::PsiPlus => BellState::PsiPlus,
            Which::PsiMinus => BellState::PsiMinus,
        }
    }
}

/// Prepare a Bell state, sample it, and print a histogram of the outcomes.
#[derive(Debug, Parser)]
struct Args {
    /// Number of shots.
    #[arg(short, long, default_value_t = 1024)]
    shots: usize,

    /// Master seed for sampling; omit to seed from system entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Which Bell state to prepare.
    #[arg(long, value_enum, default_value_t = Which::PhiPlus)]
    state: Which,

    /// Write a GraphViz rendering of the circuit to this path.
    #[arg(long)]
    dot: Option<PathBuf>,
}

// prepare
//
//   q0: ∣0⟩ --H--*--M
//                |
//   q1: ∣0⟩ -----X--M
//
// and check that only the two correlated outcomes ever appear
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let circuit = Circuit::bell_state(args.state.into());
    println!("{}\n", circuit);

    let state = circuit.statevector()?;
    println!("state before measurement: {}\n", state);

    if let Some(path) = args.dot.as_ref() {
        circuit.save_graphviz("bell", path)?;
        println!("circuit written to {}", path.display());
    }

    let config = ShotConfig { shots: args.shots, seed: args.seed };
    print!("sample {} shots ... ", config.shots);
    let (res, t) = timeit(|| config.run(&circuit));
    println!("{:.3e} secs", t);
    let hist = res?;
    println!("{}", hist);
    Ok(())
}
