// demos/differentiation.rs
//! Differentiating regularly and irregularly sampled signals

use iir_core::processing::{
    central_difference, centered_differentiator, centered_isd, noise_robust_centered, time_varying_differentiator,
    FilterType,
};
use rand::Rng;
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("IIR Core Differentiation Example");
    println!("================================");

    // Fixed rate: 7 point central difference on a 1 Hz sine sampled at 1 kHz
    let dt = 0.001;
    let values: Vec<f64> = (0..1000).map(|i| (2.0 * PI * i as f64 * dt).sin()).collect();
    let mut diff = centered_differentiator(&central_difference::<f64>(7)?, dt, 1)?;
    let derivative = diff.filter(&values)?;

    println!("\nFixed rate (output lags by {} samples):", diff.center());
    for i in [100, 250, 500, 750] {
        let t = (i - diff.center()) as f64 * dt;
        println!(
            "  t = {:.3}: estimated {:+.6}, exact {:+.6}",
            t,
            derivative[i],
            2.0 * PI * (2.0 * PI * t).cos()
        );
    }

    // Irregular sampling: timestamps jitter around a 10 ms period
    let mut rng = rand::thread_rng();
    let mut t = 0.0;
    let mut times = Vec::with_capacity(200);
    for _ in 0..200 {
        t += 0.01 * rng.gen_range(0.5..1.5);
        times.push(t);
    }
    let samples: Vec<f64> = times.iter().map(|&t| t * t * t).collect();

    let coeffs = centered_isd(&noise_robust_centered::<f64>(5)?)?;
    let mut varying = time_varying_differentiator(&coeffs, FilterType::Centered, 1)?;
    let estimates = varying.filter(&times, &samples)?;

    println!("\nIrregular sampling of t³ (output lags by {} samples):", varying.center());
    for i in [50, 100, 150, 199] {
        let t = times[i - varying.center()];
        println!("  t = {:.3}: estimated {:.6}, exact {:.6}", t, estimates[i], 3.0 * t * t);
    }

    Ok(())
}
