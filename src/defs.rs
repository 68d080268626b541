//! Definitions.

use core::fmt::Display;

use gmp_mpfr_sys::gmp;
use gmp_mpfr_sys::mpfr;

/// Precision of a number in bits.
pub type Precision = mpfr::prec_t;

/// Binary exponent of a number.
pub type Exponent = mpfr::exp_t;

/// Minimum allowed precision.
pub const MIN_PRECISION: Precision = mpfr::PREC_MIN;

/// Maximum allowed precision.
pub const MAX_PRECISION: Precision = mpfr::PREC_MAX;

/// Precision of a default-constructed number: the significand width of `f64`.
pub const DEFAULT_PRECISION: Precision = f64::MANTISSA_DIGITS as Precision;

/// Size of a word of an arbitrary precision integer in bits.
pub const WORD_BIT_SIZE: usize = gmp::NUMB_BITS as usize;

/// Rounding mode used for every conversion.
pub(crate) const DEFAULT_RND: mpfr::rnd_t = mpfr::rnd_t::RNDN;

/// Category of a value a number is constructed from.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum SourceKind {
    /// Native integer or `bool`.
    NativeInt,

    /// Native floating point number.
    NativeFloat,

    /// Arbitrary precision integer.
    Integer,

    /// Arbitrary precision rational.
    Rational,

    /// 128-bit quadruple precision floating point number.
    Real128,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let repr = match self {
            SourceKind::NativeInt => "native integer",
            SourceKind::NativeFloat => "native float",
            SourceKind::Integer => "integer",
            SourceKind::Rational => "rational",
            SourceKind::Real128 => "quadruple float",
        };
        f.write_str(repr)
    }
}

/// Possible errors.
#[derive(Debug, Clone, Copy)]
pub enum Error {
    /// The precision requested by the caller is out of the allowed range.
    InvalidPrecision {
        /// Requested precision.
        requested: Precision,

        /// Minimum allowed precision.
        min: Precision,

        /// Maximum allowed precision.
        max: Precision,
    },

    /// The precision deduced from the size of the source value exceeds the maximum allowed precision.
    PrecisionOverflow(SourceKind),

    /// Conversion of a number to a decimal string failed.
    Render,

    /// Invalid argument.
    InvalidArgument,

    /// Writing to the output sink failed.
    Format,
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidPrecision {
                requested,
                min,
                max,
            } => write!(
                f,
                "invalid precision {}: the minimum allowed precision is {}, the maximum allowed precision is {}",
                requested, min, max
            ),
            Error::PrecisionOverflow(k) => {
                write!(f, "the deduced precision for a number constructed from {} is too large", k)
            }
            Error::Render => f.write_str("conversion to a decimal string failed"),
            Error::InvalidArgument => f.write_str("invalid argument"),
            Error::Format => f.write_str("formatting error"),
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::InvalidPrecision {
                    requested: r0,
                    min: n0,
                    max: x0,
                },
                Self::InvalidPrecision {
                    requested: r1,
                    min: n1,
                    max: x1,
                },
            ) => r0 == r1 && n0 == n1 && x0 == x1,
            (Self::PrecisionOverflow(l0), Self::PrecisionOverflow(r0)) => l0 == r0,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Error::Format
    }
}
