//! Code matrix generators.
//!
//! The set of strategies is closed; [`CodeKind`] dispatches to one of the
//! three generator functions below.

use polyclass_core::{PolyclassError, PolyclassResult};
use rand::Rng;

use crate::matrix::CodeMatrix;

/// Largest class count accepted by [`exhaustive`] (2^19 - 1 rows).
pub const MAX_EXHAUSTIVE_CLASSES: usize = 20;

/// Largest row count accepted by [`random_code`], the size of the
/// exhaustive code for [`MAX_EXHAUSTIVE_CLASSES`] classes.
pub const MAX_RANDOM_ROWS: usize = (1 << (MAX_EXHAUSTIVE_CLASSES - 1)) - 1;

/// Re-draws allowed after the first random code before giving up.
pub const MAX_RANDOM_ATTEMPTS: usize = 100;

/// Strategies that produce a [`CodeMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodeKind {
    /// Identity code: row `i` isolates class `i`.
    OneAgainstAll,
    /// Random code of `max(n, n * width_factor)` rows.
    Random { width_factor: f64 },
    /// Every two-group split of the classes, up to complement.
    Exhaustive,
}

impl CodeKind {
    pub fn generate<R: Rng + ?Sized>(
        &self,
        num_classes: usize,
        rng: &mut R,
    ) -> PolyclassResult<CodeMatrix> {
        let code = match *self {
            CodeKind::OneAgainstAll => one_against_all(num_classes),
            CodeKind::Random { width_factor } => random_code(num_classes, width_factor, rng)?,
            CodeKind::Exhaustive => exhaustive(num_classes)?,
        };
        log::debug!("Code:\n{code}");
        Ok(code)
    }
}

/// `num_classes x num_classes` identity code.
pub fn one_against_all(num_classes: usize) -> CodeMatrix {
    let mut code = CodeMatrix::zeros(num_classes, num_classes);
    for i in 0..num_classes {
        code.set(i, i, true);
    }
    code
}

/// Exhaustive code with `2^(n-1) - 1` rows.
///
/// Column 0 is always set. Bit `(row, i)` for `i >= 1` is set when
/// `row / 2^(n-1-i)` is odd, which enumerates every split once.
pub fn exhaustive(num_classes: usize) -> PolyclassResult<CodeMatrix> {
    if num_classes < 2 {
        return Err(PolyclassError::InvalidParameter(format!(
            "exhaustive code needs at least 2 classes, got {num_classes}"
        )));
    }
    if num_classes > MAX_EXHAUSTIVE_CLASSES {
        return Err(PolyclassError::CodeTooLarge {
            num_classes,
            max: MAX_EXHAUSTIVE_CLASSES,
        });
    }

    let width = (1usize << (num_classes - 1)) - 1;
    let mut code = CodeMatrix::zeros(width, num_classes);
    for row in 0..width {
        code.set(row, 0, true);
    }
    for i in 1..num_classes {
        let skip = 1usize << (num_classes - 1 - i);
        for row in 0..width {
            code.set(row, i, (row / skip) % 2 != 0);
        }
    }
    Ok(code)
}

/// Random code with fair coin bits, re-drawn until valid.
///
/// After [`MAX_RANDOM_ATTEMPTS`] re-draws the last candidate is returned
/// even if it is invalid; a warning is logged in that case.
pub fn random_code<R: Rng + ?Sized>(
    num_classes: usize,
    width_factor: f64,
    rng: &mut R,
) -> PolyclassResult<CodeMatrix> {
    if num_classes < 2 {
        return Err(PolyclassError::InvalidParameter(format!(
            "random code needs at least 2 classes, got {num_classes}"
        )));
    }
    if !(width_factor > 0.0) || !width_factor.is_finite() {
        return Err(PolyclassError::InvalidParameter(format!(
            "random width factor must be positive, got {width_factor}"
        )));
    }

    let wanted = (num_classes as f64 * width_factor).floor().max(num_classes as f64);
    if wanted > MAX_RANDOM_ROWS as f64 {
        return Err(PolyclassError::InvalidParameter(format!(
            "random code for {num_classes} classes with width factor {width_factor} \
             needs {wanted} rows; at most {MAX_RANDOM_ROWS} are supported"
        )));
    }
    let rows = wanted as usize;
    let mut code = CodeMatrix::zeros(rows, num_classes);
    let mut attempts = 0;
    loop {
        randomize(&mut code, rng);
        if code.is_valid() {
            break;
        }
        if attempts >= MAX_RANDOM_ATTEMPTS {
            log::warn!(
                "no valid {rows}x{num_classes} random code after {} draws; using the last one",
                attempts + 1
            );
            break;
        }
        attempts += 1;
    }
    Ok(code)
}

fn randomize<R: Rng + ?Sized>(code: &mut CodeMatrix, rng: &mut R) {
    for row in 0..code.num_rows() {
        for class in 0..code.num_classes() {
            code.set(row, class, rng.gen::<f64>() >= 0.5);
        }
    }
}
