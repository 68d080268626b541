//! Precision validation and inference.

use crate::defs::Error;
use crate::defs::Precision;
use crate::defs::SourceKind;
use crate::defs::MAX_PRECISION;
use crate::defs::MIN_PRECISION;
use crate::defs::WORD_BIT_SIZE;

/// Returns `p` clamped to the range of allowed precisions.
/// Used for precisions deduced from a source type, never for precisions given by the caller.
pub const fn clamp_prec(p: Precision) -> Precision {
    if p < MIN_PRECISION {
        MIN_PRECISION
    } else if p > MAX_PRECISION {
        MAX_PRECISION
    } else {
        p
    }
}

/// Returns `p` if it is in the range of allowed precisions.
///
/// ## Errors
///
///  - InvalidPrecision: `p` is less than `MIN_PRECISION` or greater than `MAX_PRECISION`.
pub fn check_prec(p: Precision) -> Result<Precision, Error> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&p) {
        Ok(p)
    } else {
        Err(Error::InvalidPrecision {
            requested: p,
            min: MIN_PRECISION,
            max: MAX_PRECISION,
        })
    }
}

/// Returns the number of binary digits needed to hold `digits` digits in radix `radix`.
pub fn digits_for_nonbinary_float(digits: u32, radix: u32) -> Precision {
    (digits as f64 * (radix as f64).log2()).ceil() as Precision
}

/// Returns the largest precision whose numbers are rendered with at most `digits` significant decimal digits.
pub(crate) fn prec_for_decimal_digits(digits: u32) -> Precision {
    (digits.saturating_sub(1) as f64 * 10f64.log2()).floor() as Precision
}

/// Deduces precision from the number of words `words` of an arbitrary precision value.
///
/// ## Errors
///
///  - PrecisionOverflow: `words` * `WORD_BIT_SIZE` is greater than `MAX_PRECISION`.
pub(crate) fn prec_from_words(words: usize, kind: SourceKind) -> Result<Precision, Error> {
    // words * WORD_BIT_SIZE <= MAX_PRECISION is checked without multiplying.
    if words > MAX_PRECISION as usize / WORD_BIT_SIZE {
        return Err(Error::PrecisionOverflow(kind));
    }

    Ok(((words * WORD_BIT_SIZE) as Precision).max(MIN_PRECISION))
}

/// Deduces precision from the combined number of words `w1` + `w2` of two parts of an arbitrary precision value.
///
/// ## Errors
///
///  - PrecisionOverflow: (`w1` + `w2`) * `WORD_BIT_SIZE` is greater than `MAX_PRECISION`.
pub(crate) fn prec_from_word_pair(w1: usize, w2: usize, kind: SourceKind) -> Result<Precision, Error> {
    if w1 > usize::MAX - w2 {
        return Err(Error::PrecisionOverflow(kind));
    }

    prec_from_words(w1 + w2, kind)
}
