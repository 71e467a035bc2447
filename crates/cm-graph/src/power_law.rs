use cm_core::errors::{codes, CmError, ErrorInfo};

use crate::sequence::DegreeSequence;

/// Deterministic power-law degree sequence with exponent `tau`.
///
/// Vertex `i` of `n` gets weight `floor(((i + 1) / n)^(-1 / (tau - 1)))`, so
/// the sequence is non-increasing and ends in degree one. When the weights
/// sum to an odd number the last entry is raised by one to make the sequence
/// realizable. Exponents so close to one that a weight or the total no longer
/// fits in `usize` are rejected as `invalid-config`.
pub fn power_law_sequence(vertices: usize, tau: f64) -> Result<DegreeSequence, CmError> {
    if vertices == 0 {
        return Err(CmError::Config(
            ErrorInfo::new(codes::INVALID_CONFIG, "power-law sequence needs vertices")
                .with_context("vertices", vertices),
        ));
    }
    if !(tau.is_finite() && tau > 1.0) {
        return Err(CmError::Config(
            ErrorInfo::new(codes::INVALID_CONFIG, "power-law exponent must exceed one")
                .with_context("tau", tau),
        ));
    }
    let exponent = -1.0 / (tau - 1.0);
    let n = vertices as f64;
    let mut degrees = Vec::with_capacity(vertices);
    let mut total: usize = 0;
    for i in 0..vertices {
        let weight = ((i + 1) as f64 / n).powf(exponent).floor();
        if !(weight.is_finite() && weight < usize::MAX as f64) {
            return Err(weight_overflow(tau, i));
        }
        let degree = (weight as usize).max(1);
        // Headroom of one for the parity bump below.
        total = total
            .checked_add(degree)
            .filter(|&sum| sum < usize::MAX)
            .ok_or_else(|| weight_overflow(tau, i))?;
        degrees.push(degree);
    }
    if total % 2 != 0 {
        if let Some(last) = degrees.last_mut() {
            *last += 1;
        }
    }
    DegreeSequence::new(degrees)
}

fn weight_overflow(tau: f64, vertex: usize) -> CmError {
    CmError::Config(
        ErrorInfo::new(
            codes::INVALID_CONFIG,
            "power-law weights overflow the stub count",
        )
        .with_context("tau", tau)
        .with_context("vertex", vertex)
        .with_hint("use an exponent further from one"),
    )
}
