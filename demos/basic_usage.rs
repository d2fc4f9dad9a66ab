// demos/basic_usage.rs
//! Basic usage example for IIR Core

use iir_core::config::ConfigLoader;
use iir_core::processing::{moving_average, Butterworth, DigitalFilter, FilterBank, FilterKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("IIR Core Basic Usage Example");
    println!("============================");

    // Design a low-pass filter
    println!("\nDesigning 5th order low-pass filter (fc = 10 Hz, fs = 100 Hz)...");
    let mut lowpass = Butterworth::new(5, 10.0, 100.0, FilterKind::LowPass)?;
    let (a, b) = lowpass.coefficients();
    println!("  a = {:?}", a);
    println!("  b = {:?}", b);

    let data: Vec<f64> = (1..=8).map(f64::from).collect();
    let filtered = lowpass.filter(&data)?;
    println!("  filtered ramp: {:?}", filtered);

    // Redesign in place; a failed redesign leaves the filter unusable until fixed
    println!("\nRedesigning with an invalid cut-off...");
    match lowpass.set_filter_parameters(5, 60.0, 100.0) {
        Ok(()) => println!("  unexpected success"),
        Err(e) => println!("  rejected: {} (status: {:?})", e, lowpass.status()),
    }
    lowpass.set_filter_parameters(3, 20.0, 100.0)?;
    println!("  redesigned, status: {:?}", lowpass.status());

    // Band filters
    println!("\nDesigning band filters around 50 Hz (fs = 1000 Hz)...");
    let bandpass = Butterworth::new_band(2, 40.0, 60.0, 1000.0, FilterKind::BandPass)?;
    let bandreject = Butterworth::new_band(2, 48.0, 52.0, 1000.0, FilterKind::BandReject)?;
    println!("  band-pass has {} coefficients", bandpass.a_order());
    println!("  band-reject has {} coefficients", bandreject.a_order());

    // Arbitrary coefficients
    println!("\nRunning a hand-written first order high-pass...");
    let mut custom = DigitalFilter::with_coefficients(&[1.0, -0.99993717], &[0.99996859, -0.99996859])?;
    for x in [1.0, 2.0, 3.0, 4.0] {
        println!("  {:.1} -> {:.6}", x, custom.step_filter(x)?);
    }

    // Moving average
    println!("\nMoving average over 4 samples...");
    let mut average = moving_average::<f64>(4)?;
    println!("  {:?}", average.filter(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])?);

    // Filter bank from configuration
    println!("\nLoading configuration...");
    let config = ConfigLoader::new().load()?;
    println!("  single filter: {} order {}", config.butterworth.kind, config.butterworth.order);
    let mut bank = FilterBank::<f64>::from_config(&config.bank)?;
    println!("  filter bank with {} stages at {} Hz", bank.stage_count(), config.bank.sampling_frequency);
    let response = bank.process(&[1.0, 0.0, 0.0, 0.0, 0.0])?;
    println!("  impulse response start: {:?}", response);

    println!("\nExample completed successfully!");
    Ok(())
}
