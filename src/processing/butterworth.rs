// src/processing/butterworth.rs
//! Butterworth IIR filter design
//!
//! Designs low-pass, high-pass, band-pass and band-reject filters of any order:
//! analog prototype poles are placed on the left half of the unit circle, scaled to
//! the pre-warped cut-off, mapped to the z-plane with the bilinear transform and
//! expanded into polynomial coefficients. The numerator is finally scaled so the
//! gain is exactly one at the reference frequency of the filter kind.

use crate::config::constants::design::MIN_EDGE_SEPARATION;
use crate::error::{FilterError, FilterResult, FilterStatus};
use crate::processing::bilinear::to_digital_all;
use crate::processing::coefficients::FilterType;
use crate::processing::filters::DigitalFilter;
use crate::processing::polynomial::poly_coeffs_from_roots;
use crate::utils::{constant, from_usize, nyquist, prewarp, Sample};
use ndarray::{Array1, ArrayView1};
use num::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Frequency response shape of a Butterworth filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Keeps frequencies below the cut-off
    #[default]
    LowPass,
    /// Keeps frequencies above the cut-off
    HighPass,
    /// Keeps frequencies between the band edges
    BandPass,
    /// Removes frequencies between the band edges
    BandReject,
}

impl FilterKind {
    /// Whether the kind is designed from two band edges rather than a cut-off.
    pub fn is_band(&self) -> bool {
        matches!(self, FilterKind::BandPass | FilterKind::BandReject)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::LowPass => "low-pass",
            FilterKind::HighPass => "high-pass",
            FilterKind::BandPass => "band-pass",
            FilterKind::BandReject => "band-reject",
        };
        f.write_str(name)
    }
}

/// Cut-off or band edges, in the unit of the sampling frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequencies<F> {
    /// Single cut-off for low/high-pass kinds
    Cutoff(F),
    /// Band edges for band kinds
    Band { lower: F, upper: F },
}

/// Complete set of Butterworth design parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterworthDesign<F> {
    /// Filter kind
    pub kind: FilterKind,
    /// Prototype order, the band kinds double it
    pub order: usize,
    /// Cut-off or band edges
    pub frequencies: Frequencies<F>,
    /// Sampling frequency
    pub sampling_frequency: F,
}

impl<F: Sample> ButterworthDesign<F> {
    /// Low-pass design
    pub fn lowpass(order: usize, cutoff: F, sampling_frequency: F) -> Self {
        Self {
            kind: FilterKind::LowPass,
            order,
            frequencies: Frequencies::Cutoff(cutoff),
            sampling_frequency,
        }
    }

    /// High-pass design
    pub fn highpass(order: usize, cutoff: F, sampling_frequency: F) -> Self {
        Self {
            kind: FilterKind::HighPass,
            order,
            frequencies: Frequencies::Cutoff(cutoff),
            sampling_frequency,
        }
    }

    /// Band-pass design
    pub fn bandpass(order: usize, lower: F, upper: F, sampling_frequency: F) -> Self {
        Self {
            kind: FilterKind::BandPass,
            order,
            frequencies: Frequencies::Band { lower, upper },
            sampling_frequency,
        }
    }

    /// Band-reject design
    pub fn bandreject(order: usize, lower: F, upper: F, sampling_frequency: F) -> Self {
        Self {
            kind: FilterKind::BandReject,
            order,
            frequencies: Frequencies::Band { lower, upper },
            sampling_frequency,
        }
    }

    /// Check the parameters, first failure wins.
    pub fn validate(&self) -> FilterResult<()> {
        if self.order == 0 {
            return Err(FilterError::BadOrderSize { order: self.order });
        }

        let fs = self.sampling_frequency;
        match (self.kind.is_band(), self.frequencies) {
            (false, Frequencies::Cutoff(fc)) => {
                check_positive(fs)?;
                check_positive(fc)?;
                if !(fc < nyquist(fs)) {
                    return Err(FilterError::BadCutoffFrequency {
                        cutoff: to_f64(fc),
                        nyquist: to_f64(nyquist(fs)),
                    });
                }
            }
            (true, Frequencies::Band { lower, upper }) => {
                check_positive(fs)?;
                check_positive(lower)?;
                check_positive(upper)?;
                if !(lower < upper) {
                    return Err(FilterError::BadBandFrequency {
                        lower: to_f64(lower),
                        upper: to_f64(upper),
                    });
                }
                if !(upper < nyquist(fs)) {
                    return Err(FilterError::BadCutoffFrequency {
                        cutoff: to_f64(upper),
                        nyquist: to_f64(nyquist(fs)),
                    });
                }
            }
            _ => {
                return Err(FilterError::FrequencyKindMismatch {
                    kind: self.kind.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Number of coefficients of each resulting vector.
    pub fn coefficient_count(&self) -> usize {
        if self.kind.is_band() {
            2 * self.order + 1
        } else {
            self.order + 1
        }
    }
}

fn to_f64<F: Sample>(value: F) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn check_positive<F: Sample>(frequency: F) -> FilterResult<()> {
    // NaN is rejected too
    if frequency > F::zero() {
        Ok(())
    } else {
        Err(FilterError::BadFrequencyValue {
            frequency: to_f64(frequency),
        })
    }
}

/// Normalized prototype pole `k` (1-based) of an order `order` Butterworth filter.
fn prototype_pole<F: Sample>(order: usize, k: usize) -> Complex<F> {
    let theta = from_usize::<F>(2 * k - 1) * F::PI() / from_usize::<F>(2 * order);
    Complex::new(-theta.sin(), theta.cos())
}

/// Geometric band center `sqrt(fpw1·fpw2)` and pre-warped edges.
fn prewarped_band<F: Sample>(lower: F, upper: F, fs: F) -> (F, F, F) {
    let fpw1 = prewarp(lower, fs);
    let fpw2 = prewarp(upper, fs);
    ((fpw1 * fpw2).sqrt(), fpw1, fpw2)
}

/// Analog (s-plane) poles of the design.
///
/// Low/high-pass designs have `order` poles, band designs `2·order`. The design
/// is assumed to be valid.
pub fn analog_poles<F: Sample>(design: &ButterworthDesign<F>) -> Vec<Complex<F>> {
    let fs = design.sampling_frequency;
    let two_pi = constant::<F>(2.0) * F::PI();
    let prototypes = (1..=design.order).map(|k| prototype_pole::<F>(design.order, k));

    match design.frequencies {
        Frequencies::Cutoff(fc) => {
            let scale = Complex::new(two_pi * prewarp(fc, fs), F::zero());
            match design.kind {
                FilterKind::HighPass => prototypes.map(|p| scale / p).collect(),
                _ => prototypes.map(|p| scale * p).collect(),
            }
        }
        Frequencies::Band { lower, upper } => {
            let (fpw0, fpw1, fpw2) = prewarped_band(lower, upper, fs);
            let half_bandwidth = constant::<F>(0.5) * (fpw2 - fpw1) / fpw0;
            let one = Complex::new(F::one(), F::zero());
            let i = Complex::new(F::zero(), F::one());

            let mut poles = Vec::with_capacity(2 * design.order);
            for p in prototypes {
                let s = match design.kind {
                    FilterKind::BandReject => Complex::new(half_bandwidth, F::zero()) / p,
                    _ => p * half_bandwidth,
                };
                let root = (one - s * s).sqrt();
                poles.push((s + i * root) * (fpw0 * two_pi));
                poles.push((s - i * root) * (fpw0 * two_pi));
            }
            poles
        }
    }
}

/// Zeros of the digital transfer function.
///
/// Low-pass: all at -1. High-pass: all at +1. Band-pass: `order` at -1 then
/// `order` at +1. Band-reject: conjugate pairs `e^{±i·w0}` at the band center.
pub fn analog_zeros<F: Sample>(design: &ButterworthDesign<F>) -> Vec<Complex<F>> {
    let n = design.order;
    let minus_one = Complex::new(-F::one(), F::zero());
    let plus_one = Complex::new(F::one(), F::zero());

    match design.kind {
        FilterKind::LowPass => vec![minus_one; n],
        FilterKind::HighPass => vec![plus_one; n],
        FilterKind::BandPass => {
            let mut zeros = vec![minus_one; n];
            zeros.extend(std::iter::repeat(plus_one).take(n));
            zeros
        }
        FilterKind::BandReject => {
            let w0 = band_center(design);
            let zero = Complex::from_polar(F::one(), w0);
            (0..n).flat_map(|_| [zero, zero.conj()]).collect()
        }
    }
}

/// Digital angular band center `w0 = 2·atan(π·fpw0/fs)`, zero for non-band designs.
fn band_center<F: Sample>(design: &ButterworthDesign<F>) -> F {
    match design.frequencies {
        Frequencies::Band { lower, upper } => {
            let fs = design.sampling_frequency;
            let (fpw0, _, _) = prewarped_band(lower, upper, fs);
            constant::<F>(2.0) * (F::PI() * fpw0 / fs).atan()
        }
        Frequencies::Cutoff(_) => F::zero(),
    }
}

/// Evaluate `Σ c_k·z^{-k}`.
fn evaluate_at<F: Sample>(coeffs: ArrayView1<'_, F>, z: Complex<F>) -> Complex<F> {
    let z_inv = Complex::new(F::one(), F::zero()) / z;
    let mut power = Complex::new(F::one(), F::zero());
    let mut sum = Complex::new(F::zero(), F::zero());
    for &c in coeffs.iter() {
        sum = sum + power * c;
        power = power * z_inv;
    }
    sum
}

/// Alternating-sign sum, the response at Nyquist (`z = -1`).
fn alternating_sum<F: Sample>(coeffs: ArrayView1<'_, F>) -> F {
    coeffs
        .iter()
        .enumerate()
        .fold(F::zero(), |acc, (i, &c)| if i % 2 == 0 { acc + c } else { acc - c })
}

/// Scale the numerator for unit gain at the reference frequency of the kind.
fn normalize_gain<F: Sample>(design: &ButterworthDesign<F>, a: &Array1<F>, b: &mut Array1<F>) {
    let scale = match design.kind {
        FilterKind::LowPass | FilterKind::BandReject => a.sum() / b.sum(),
        FilterKind::HighPass => alternating_sum(a.view()) / alternating_sum(b.view()),
        FilterKind::BandPass => {
            let z = Complex::from_polar(F::one(), band_center(design));
            evaluate_at(a.view(), z).norm() / evaluate_at(b.view(), z).norm()
        }
    };
    b.mapv_inplace(|v| v * scale);
}

/// Run the full design pipeline and return `(a, b)` with `a[0] == 1`.
pub fn design<F: Sample>(design: &ButterworthDesign<F>) -> FilterResult<(Array1<F>, Array1<F>)> {
    design.validate()?;

    let poles = to_digital_all(design.sampling_frequency, &analog_poles(design));
    let zeros = analog_zeros(design);

    let mut a: Array1<F> = poly_coeffs_from_roots(&poles).iter().map(|c| c.re).collect();
    let mut b: Array1<F> = poly_coeffs_from_roots(&zeros).iter().map(|c| c.re).collect();
    normalize_gain(design, &a, &mut b);

    let a0 = a[0];
    a.mapv_inplace(|v| v / a0);
    b.mapv_inplace(|v| v / a0);

    debug!(
        kind = %design.kind,
        order = design.order,
        frequencies = ?design.frequencies,
        sampling_frequency = %design.sampling_frequency,
        coefficients = a.len(),
        "designed Butterworth filter"
    );
    Ok((a, b))
}

/// Minimum order and normalized cut-off of a low/high-pass Butterworth filter.
///
/// `w_pass` and `w_stop` are pass and stop band edges normalized to the Nyquist
/// frequency, `a_pass` the maximum pass band loss and `a_stop` the minimum stop
/// band attenuation, both in dB. `w_pass < w_stop` gives a low-pass filter,
/// `w_pass > w_stop` a high-pass one. The returned cut-off is normalized too.
///
/// Edges so close that their prewarped ratio is within `MIN_EDGE_SEPARATION` of 1
/// give `BadBandFrequency` instead of an unbounded order.
pub fn find_minimum_butter<F: Sample>(w_pass: F, w_stop: F, a_pass: F, a_stop: F) -> FilterResult<(usize, F)> {
    for w in [w_pass, w_stop] {
        if !(w > F::zero() && w < F::one()) {
            return Err(FilterError::BadFrequencyValue { frequency: to_f64(w) });
        }
    }
    if w_pass == w_stop {
        return Err(FilterError::BadBandFrequency {
            lower: to_f64(w_pass),
            upper: to_f64(w_stop),
        });
    }
    let (a_pass, a_stop) = (a_pass.abs(), a_stop.abs());
    if !(a_pass > F::zero() && a_stop > a_pass) {
        return Err(FilterError::BadAttenuation {
            pass: to_f64(a_pass),
            stop: to_f64(a_stop),
        });
    }

    let ten = constant::<F>(10.0);
    let tenth = constant::<F>(0.1);
    let half_pi = F::FRAC_PI_2();
    let stop_ratio = ten.powf(tenth * a_stop) - F::one();
    let pass_ratio = ten.powf(tenth * a_pass) - F::one();

    let wp = (half_pi * w_pass).tan();
    let ws = (half_pi * w_stop).tan();
    let lowpass = w_pass < w_stop;
    let wa = if lowpass { ws / wp } else { wp / ws };
    let too_close = || FilterError::BadBandFrequency {
        lower: to_f64(w_pass),
        upper: to_f64(w_stop),
    };
    if !(wa - F::one() > constant::<F>(MIN_EDGE_SEPARATION)) {
        warn!(w_pass = %w_pass, w_stop = %w_stop, "band edges too close to estimate an order");
        return Err(too_close());
    }

    let raw_order = ((stop_ratio / pass_ratio).log10() / (constant::<F>(2.0) * wa.log10())).ceil();
    let order = raw_order.to_usize().ok_or_else(too_close)?.max(1);

    let w0 = wa / stop_ratio.powf(F::one() / from_usize::<F>(2 * order));
    let analog_cutoff = if lowpass { w0 * wp } else { wp / w0 };
    let cutoff = analog_cutoff.atan() / half_pi;

    debug!(order, cutoff = %cutoff, lowpass, "estimated minimum Butterworth order");
    Ok((order, cutoff))
}

/// Butterworth filter: a [`DigitalFilter`] whose coefficients come from a design.
#[derive(Debug, Clone)]
pub struct Butterworth<F: Sample> {
    kind: FilterKind,
    design: Option<ButterworthDesign<F>>,
    filter: DigitalFilter<F>,
}

impl<F: Sample> Butterworth<F> {
    /// Low-pass or high-pass filter.
    pub fn new(order: usize, cutoff: F, sampling_frequency: F, kind: FilterKind) -> FilterResult<Self> {
        let mut filter = Self::uninitialized(kind);
        filter.set_filter_parameters(order, cutoff, sampling_frequency)?;
        Ok(filter)
    }

    /// Band-pass or band-reject filter.
    pub fn new_band(order: usize, lower: F, upper: F, sampling_frequency: F, kind: FilterKind) -> FilterResult<Self> {
        let mut filter = Self::uninitialized(kind);
        filter.set_band_parameters(order, lower, upper, sampling_frequency)?;
        Ok(filter)
    }

    /// Filter with a kind but no design yet; it refuses to run until configured.
    pub fn uninitialized(kind: FilterKind) -> Self {
        Self {
            kind,
            design: None,
            filter: DigitalFilter::new(),
        }
    }

    /// Build from a complete design.
    pub fn from_design(design: ButterworthDesign<F>) -> FilterResult<Self> {
        let mut filter = Self::uninitialized(design.kind);
        filter.apply(design)?;
        Ok(filter)
    }

    /// Redesign as a low/high-pass filter of the configured kind.
    pub fn set_filter_parameters(&mut self, order: usize, cutoff: F, sampling_frequency: F) -> FilterResult<()> {
        self.apply(ButterworthDesign {
            kind: self.kind,
            order,
            frequencies: Frequencies::Cutoff(cutoff),
            sampling_frequency,
        })
    }

    /// Redesign as a band filter of the configured kind.
    pub fn set_band_parameters(&mut self, order: usize, lower: F, upper: F, sampling_frequency: F) -> FilterResult<()> {
        self.apply(ButterworthDesign {
            kind: self.kind,
            order,
            frequencies: Frequencies::Band { lower, upper },
            sampling_frequency,
        })
    }

    fn apply(&mut self, params: ButterworthDesign<F>) -> FilterResult<()> {
        let result = design(&params).and_then(|(a, b)| {
            self.filter
                .set_coefficients(&a.to_vec(), &b.to_vec(), FilterType::Backward)
        });

        match result {
            Ok(()) => {
                self.design = Some(params);
                Ok(())
            }
            Err(err) => {
                warn!(kind = %self.kind, error = %err, "Butterworth design rejected");
                self.filter.mark_failed(err.status());
                Err(err)
            }
        }
    }

    /// Filter one sample
    pub fn step_filter(&mut self, data: F) -> FilterResult<F> {
        self.filter.step_filter(data)
    }

    /// Filter a block, one output per input
    pub fn filter(&mut self, data: &[F]) -> FilterResult<Vec<F>> {
        self.filter.filter(data)
    }

    /// Filter a block into a caller provided buffer of the same length
    pub fn filter_into(&mut self, data: &[F], results: &mut [F]) -> FilterResult<()> {
        self.filter.filter_into(data, results)
    }

    /// Clear the histories, keeping the coefficients
    pub fn reset_filter(&mut self) {
        self.filter.reset_filter();
    }

    /// Filter kind
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Parameters of the last successful design.
    pub fn design(&self) -> Option<&ButterworthDesign<F>> {
        self.design.as_ref()
    }

    /// Order of the last successful design, 0 if none
    pub fn order(&self) -> usize {
        self.design.map_or(0, |d| d.order)
    }

    /// Owned copies of `(a, b)`
    pub fn coefficients(&self) -> (Vec<F>, Vec<F>) {
        self.filter.coefficients()
    }

    /// Denominator coefficients
    pub fn a_coefficients(&self) -> ArrayView1<'_, F> {
        self.filter.a_coefficients()
    }

    /// Numerator coefficients
    pub fn b_coefficients(&self) -> ArrayView1<'_, F> {
        self.filter.b_coefficients()
    }

    /// Number of denominator coefficients
    pub fn a_order(&self) -> usize {
        self.filter.a_order()
    }

    /// Number of numerator coefficients
    pub fn b_order(&self) -> usize {
        self.filter.b_order()
    }

    /// Output latency in samples
    pub fn center(&self) -> usize {
        self.filter.center()
    }

    /// Current status
    pub fn status(&self) -> FilterStatus {
        self.filter.status()
    }

    /// Whether the filter can run
    pub fn is_ready(&self) -> bool {
        self.filter.is_ready()
    }
}
