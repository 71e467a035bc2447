use cm_core::errors::{codes, CmError, ErrorInfo};
use serde::Serialize;

/// A degree sequence that passed validation.
///
/// Only [`DegreeSequence::new`] and [`DegreeSequence::from_signed`] create
/// values, so every instance is non-empty, has no zero entries and sums to an
/// even number of stubs that fits in `usize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeSequence {
    degrees: Vec<usize>,
}

impl DegreeSequence {
    /// Validates `degrees` and wraps it.
    pub fn new(degrees: Vec<usize>) -> Result<Self, CmError> {
        check(degrees.iter().map(|&degree| degree as i128))?;
        Ok(Self { degrees })
    }

    /// Validates signed input, rejecting negative entries as invalid degrees.
    pub fn from_signed(degrees: &[i64]) -> Result<Self, CmError> {
        validate(degrees)?;
        let degrees = degrees.iter().map(|&degree| degree as usize).collect();
        Ok(Self { degrees })
    }

    /// Returns the degrees in input order.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    /// Returns the number of vertices the sequence describes.
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Always `false`; empty sequences fail validation.
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Returns the total number of half-edges (the degree sum).
    pub fn stub_count(&self) -> usize {
        self.degrees.iter().sum()
    }

    /// Consumes the sequence and returns the raw degrees.
    pub fn into_inner(self) -> Vec<usize> {
        self.degrees
    }
}

/// Checks that a raw degree sequence can be realized by stub matching.
///
/// Fails with `empty-sequence`, `invalid-degree` (first non-positive entry),
/// `stub-overflow` (sum exceeds `usize::MAX`) or `odd-sum`, in that order.
pub fn validate(degrees: &[i64]) -> Result<(), CmError> {
    check(degrees.iter().map(|&degree| i128::from(degree)))
}

fn check(degrees: impl ExactSizeIterator<Item = i128>) -> Result<(), CmError> {
    if degrees.len() == 0 {
        return Err(CmError::Sequence(ErrorInfo::new(
            codes::EMPTY_SEQUENCE,
            "degree sequence has no vertices",
        )));
    }
    let mut sum: i128 = 0;
    let mut overflow_at = None;
    for (position, degree) in degrees.enumerate() {
        if degree <= 0 {
            return Err(CmError::Sequence(
                ErrorInfo::new(codes::INVALID_DEGREE, "degrees must be positive")
                    .with_context("position", position)
                    .with_context("degree", degree),
            ));
        }
        if overflow_at.is_none() {
            sum += degree;
            if sum > usize::MAX as i128 {
                overflow_at = Some(position);
            }
        }
    }
    if let Some(position) = overflow_at {
        return Err(CmError::Sequence(
            ErrorInfo::new(
                codes::STUB_OVERFLOW,
                "degree sum exceeds the addressable stub count",
            )
            .with_context("position", position),
        ));
    }
    if sum % 2 != 0 {
        return Err(CmError::Sequence(
            ErrorInfo::new(codes::ODD_SUM, "degree sum must be even to pair every stub")
                .with_context("sum", sum)
                .with_hint("add or remove one half-edge"),
        ));
    }
    Ok(())
}
