use std::f64::consts::FRAC_1_SQRT_2;
use rand::{ rngs::StdRng, SeedableRng };
use bellsim::{
    circuit::{ BellState, Circuit, CircuitBuilder, CircuitResult },
    histogram::Histogram,
    sim::{ run_shots, run_shots_par, run_shots_with },
};

const SHOTS: usize = 1000;

// 5σ band for a fair binomial over `SHOTS` trials
fn within_band(count: usize) -> bool {
    let mean = SHOTS as f64 * 0.5;
    let sigma = (SHOTS as f64 * 0.25).sqrt();
    (count as f64 - mean).abs() <= 5.0 * sigma
}

fn check_even_split(hist: &Histogram, a: &str, b: &str) {
    assert_eq!(hist.total(), SHOTS);
    assert_eq!(hist.len(), 2, "unexpected outcomes:\n{}", hist);
    assert_eq!(hist.get(a) + hist.get(b), SHOTS);
    assert!(within_band(hist.get(a)), "{} count out of band:\n{}", a, hist);
    assert!(within_band(hist.get(b)), "{} count out of band:\n{}", b, hist);
}

#[test]
fn bell_state_amplitudes() -> anyhow::Result<()> {
    let state
        = CircuitBuilder::new(2, 2)?
        .h(0)?
        .cx(0, 1)?
        .build()
        .statevector()?;
    let mags: Vec<f64> = state.amps().iter().map(|a| a.norm()).collect();
    assert!((mags[0b00] - FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((mags[0b11] - FRAC_1_SQRT_2).abs() < 1e-12);
    assert!(mags[0b01] < 1e-12);
    assert!(mags[0b10] < 1e-12);
    Ok(())
}

#[test]
fn bell_histogram() -> anyhow::Result<()> {
    for seed in [1, 10546, 271828] {
        let mut rng = StdRng::seed_from_u64(seed);
        let hist = run_shots(&Circuit::bell(), SHOTS, &mut rng)?;
        check_even_split(&hist, "00", "11");
        assert!(!hist.contains("01"));
        assert!(!hist.contains("10"));
    }
    Ok(())
}

#[test]
fn bell_histogram_rebuilt() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(10546);
    let build = || -> CircuitResult<Circuit> {
        Ok(CircuitBuilder::new(2, 2)?.h(0)?.cx(0, 1)?.measure_all()?.build())
    };
    let hist = run_shots_with(build, SHOTS, &mut rng)?;
    check_even_split(&hist, "00", "11");
    Ok(())
}

#[test]
fn bell_histogram_parallel() -> anyhow::Result<()> {
    let hist = run_shots_par(&Circuit::bell(), SHOTS, Some(10546))?;
    check_even_split(&hist, "00", "11");
    Ok(())
}

#[test]
fn psi_histogram() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(10546);
    let hist = run_shots(&Circuit::bell_state(BellState::PsiMinus), SHOTS, &mut rng)?;
    check_even_split(&hist, "01", "10");
    Ok(())
}
