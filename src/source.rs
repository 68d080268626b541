//! Values a `Real` can be constructed from.

use rug::Integer;
use rug::Rational;

use crate::defs::Precision;
use crate::defs::SourceKind;
use crate::prec::clamp_prec;
use crate::prec::digits_for_nonbinary_float;
use crate::real128::Real128;
use crate::real128::REAL128_SIG_DIGITS;

/// Value of a native integer type widened to 128 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum IntValue {
    Unsigned(u128),
    Signed(i128),
}

/// A native integer or `bool` together with the bit width of its type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeInt {
    pub(crate) value: IntValue,
    pub(crate) bits: u32,
}

impl NativeInt {
    /// Returns the precision used when the caller does not request one: the bit width of the type.
    pub fn default_prec(&self) -> Precision {
        clamp_prec(self.bits as Precision)
    }
}

/// A native floating point number together with the format of its type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NativeFloat {
    pub(crate) value: f64,
    pub(crate) digits: u32,
    pub(crate) radix: u32,
}

impl NativeFloat {
    /// Returns the precision used when the caller does not request one: the significand width of the type.
    pub fn default_prec(&self) -> Precision {
        if self.radix == 2 {
            clamp_prec(self.digits as Precision)
        } else {
            clamp_prec(digits_for_nonbinary_float(self.digits, self.radix))
        }
    }
}

/// A value a `Real` can be constructed from.
///
/// Every supported source type converts into `Source` with `From`, so
/// constructors accept `impl Into<Source>`.
#[derive(Copy, Clone, Debug)]
pub enum Source<'a> {
    /// Native integer or `bool`.
    Int(NativeInt),

    /// Native floating point number.
    Float(NativeFloat),

    /// Arbitrary precision integer.
    Integer(&'a Integer),

    /// Arbitrary precision rational.
    Rational(&'a Rational),

    /// Quadruple precision floating point number.
    Real128(Real128),
}

impl Source<'_> {
    /// Returns the category of the source value.
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Int(_) => SourceKind::NativeInt,
            Source::Float(_) => SourceKind::NativeFloat,
            Source::Integer(_) => SourceKind::Integer,
            Source::Rational(_) => SourceKind::Rational,
            Source::Real128(_) => SourceKind::Real128,
        }
    }
}

macro_rules! impl_uint_source {
    ($($u:ty),*) => {
        $(
            impl From<$u> for NativeInt {
                fn from(u: $u) -> Self {
                    NativeInt {
                        value: IntValue::Unsigned(u as u128),
                        bits: <$u>::BITS,
                    }
                }
            }

            impl From<$u> for Source<'_> {
                fn from(u: $u) -> Self {
                    Source::Int(u.into())
                }
            }
        )*
    };
}

macro_rules! impl_int_source {
    ($($s:ty),*) => {
        $(
            impl From<$s> for NativeInt {
                fn from(i: $s) -> Self {
                    NativeInt {
                        value: IntValue::Signed(i as i128),
                        bits: <$s>::BITS,
                    }
                }
            }

            impl From<$s> for Source<'_> {
                fn from(i: $s) -> Self {
                    Source::Int(i.into())
                }
            }
        )*
    };
}

macro_rules! impl_float_source {
    ($($f:ty),*) => {
        $(
            impl From<$f> for NativeFloat {
                fn from(f: $f) -> Self {
                    NativeFloat {
                        value: f as f64,
                        digits: <$f>::MANTISSA_DIGITS,
                        radix: <$f>::RADIX,
                    }
                }
            }

            impl From<$f> for Source<'_> {
                fn from(f: $f) -> Self {
                    Source::Float(f.into())
                }
            }
        )*
    };
}

impl_uint_source!(u8, u16, u32, u64, u128, usize);
impl_int_source!(i8, i16, i32, i64, i128, isize);
impl_float_source!(f32, f64);

impl From<bool> for NativeInt {
    fn from(b: bool) -> Self {
        NativeInt {
            value: IntValue::Unsigned(b as u128),
            bits: 1,
        }
    }
}

impl From<bool> for Source<'_> {
    fn from(b: bool) -> Self {
        Source::Int(b.into())
    }
}

impl<'a> From<&'a Integer> for Source<'a> {
    fn from(n: &'a Integer) -> Self {
        Source::Integer(n)
    }
}

impl<'a> From<&'a Rational> for Source<'a> {
    fn from(q: &'a Rational) -> Self {
        Source::Rational(q)
    }
}

impl From<Real128> for Source<'_> {
    fn from(x: Real128) -> Self {
        Source::Real128(x)
    }
}

/// Returns the precision used for a quadruple precision source.
pub(crate) const fn real128_default_prec() -> Precision {
    REAL128_SIG_DIGITS as Precision
}
