//! Construction of numbers from other number types.

use core::cmp::Ordering;
use core::ffi::c_long;
use core::ffi::c_ulong;

use gmp_mpfr_sys::gmp;
use gmp_mpfr_sys::mpfr;
use rug::Integer;
use rug::Rational;

use crate::defs::Error;
use crate::defs::Precision;
use crate::defs::SourceKind;
use crate::defs::DEFAULT_RND;
use crate::num::Real;
use crate::prec::check_prec;
use crate::prec::prec_from_word_pair;
use crate::prec::prec_from_words;
use crate::real128::Real128;
use crate::real128::EXP_BIAS;
use crate::real128::EXP_FIELD_MAX;
use crate::real128::TRAILING_SIG_BITS;
use crate::source::real128_default_prec;
use crate::source::IntValue;
use crate::source::NativeFloat;
use crate::source::NativeInt;
use crate::source::Source;

impl Real {
    /// Constructs a number from `src` with precision `p`.
    /// If `p` is 0, the precision is deduced from the type of `src`:
    ///
    ///  - native integers and `bool`: the bit width of the type;
    ///  - native floats: the number of significand bits;
    ///  - arbitrary precision integers: the number of words times the word size;
    ///  - arbitrary precision rationals: the number of words of the numerator and the denominator times the word size;
    ///  - quadruple precision floats: 113.
    ///
    /// The value is rounded to the nearest, ties to even.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: `p` is not 0 and is out of the allowed range.
    ///  - PrecisionOverflow: the deduced precision exceeds the maximum allowed precision.
    pub fn with_prec<'a, S: Into<Source<'a>>>(src: S, p: Precision) -> Result<Self, Error> {
        let src = src.into();
        let requested = if p == 0 { None } else { Some(check_prec(p)?) };

        let ret = match src {
            Source::Int(n) => Self::from_native_int(n, requested.unwrap_or_else(|| n.default_prec())),
            Source::Float(f) => Self::from_native_float(f, requested.unwrap_or_else(|| f.default_prec())),
            Source::Integer(n) => {
                let p = match requested {
                    Some(p) => p,
                    None => prec_from_words(integer_words(n), SourceKind::Integer)?,
                };
                Self::from_integer(n, p)
            }
            Source::Rational(q) => {
                let p = match requested {
                    Some(p) => p,
                    None => prec_from_word_pair(
                        integer_words(q.numer()),
                        integer_words(q.denom()),
                        SourceKind::Rational,
                    )?,
                };
                Self::from_rational(q, p)
            }
            Source::Real128(x) => Self::from_real128(x, requested.unwrap_or(real128_default_prec())),
        };

        Ok(ret)
    }

    /// Constructs a number from `src` with precision deduced from the type of `src`.
    /// See [`Real::with_prec`] for details.
    ///
    /// ## Errors
    ///
    ///  - PrecisionOverflow: the deduced precision exceeds the maximum allowed precision.
    pub fn from_source<'a, S: Into<Source<'a>>>(src: S) -> Result<Self, Error> {
        Self::with_prec(src, 0)
    }

    fn from_native_int(n: NativeInt, p: Precision) -> Self {
        let mut ret = Self::alloc(p);
        let raw = ret.as_raw_mut();

        unsafe {
            match n.value {
                IntValue::Unsigned(u) => match c_ulong::try_from(u) {
                    Ok(u) => {
                        mpfr::set_ui(raw, u, DEFAULT_RND);
                    }
                    Err(_) => {
                        let z = Integer::from(u);
                        mpfr::set_z(raw, z.as_raw(), DEFAULT_RND);
                    }
                },
                IntValue::Signed(i) => match c_long::try_from(i) {
                    Ok(i) => {
                        mpfr::set_si(raw, i, DEFAULT_RND);
                    }
                    Err(_) => {
                        let z = Integer::from(i);
                        mpfr::set_z(raw, z.as_raw(), DEFAULT_RND);
                    }
                },
            }
        }

        ret
    }

    fn from_native_float(f: NativeFloat, p: Precision) -> Self {
        let mut ret = Self::alloc(p);
        unsafe {
            mpfr::set_d(ret.as_raw_mut(), f.value, DEFAULT_RND);
        }
        ret
    }

    fn from_integer(n: &Integer, p: Precision) -> Self {
        let mut ret = Self::alloc(p);
        unsafe {
            mpfr::set_z(ret.as_raw_mut(), n.as_raw(), DEFAULT_RND);
        }
        ret
    }

    fn from_rational(q: &Rational, p: Precision) -> Self {
        let mut ret = Self::alloc(p);
        unsafe {
            mpfr::set_q(ret.as_raw_mut(), q.as_raw(), DEFAULT_RND);
        }
        ret
    }

    fn from_real128(x: Real128, p: Precision) -> Self {
        let (sign, exp, hi, lo) = x.ieee_fields();

        let mut sig = Integer::from(hi);
        sig <<= 64;
        sig += lo;
        let sig_is_zero = sig.cmp0() == Ordering::Equal;

        let mut ret = Self::alloc(p);
        let raw = ret.as_raw_mut();

        unsafe {
            if exp == 0 {
                if sig_is_zero {
                    mpfr::set_zero(raw, 1);
                } else {
                    // subnormal: sig * 2^(1 - bias - 112)
                    mpfr::set_z(raw, sig.as_raw(), DEFAULT_RND);
                    mpfr::div_2ui(
                        raw,
                        raw,
                        (EXP_BIAS - 1 + TRAILING_SIG_BITS) as c_ulong,
                        DEFAULT_RND,
                    );
                }
            } else if exp == EXP_FIELD_MAX {
                if sig_is_zero {
                    mpfr::set_inf(raw, 1);
                } else {
                    mpfr::set_nan(raw);
                }
            } else {
                // normal: (2^112 + sig) * 2^(exp - bias - 112)
                mpfr::set_ui_2exp(raw, 1, TRAILING_SIG_BITS as mpfr::exp_t, DEFAULT_RND);
                mpfr::add_z(raw, raw, sig.as_raw(), DEFAULT_RND);
                mpfr::mul_2si(
                    raw,
                    raw,
                    exp as c_long - (EXP_BIAS + TRAILING_SIG_BITS) as c_long,
                    DEFAULT_RND,
                );
            }

            if sign {
                mpfr::neg(raw, raw, DEFAULT_RND);
            }
        }

        ret
    }
}

/// Returns the number of words used by the absolute value of `n`.
fn integer_words(n: &Integer) -> usize {
    n.significant_digits::<gmp::limb_t>()
}

macro_rules! impl_from_native_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Real {
                fn from(v: $t) -> Self {
                    let n = NativeInt::from(v);
                    Self::from_native_int(n, n.default_prec())
                }
            }
        )*
    };
}

macro_rules! impl_from_native_float {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Real {
                fn from(v: $t) -> Self {
                    let f = NativeFloat::from(v);
                    Self::from_native_float(f, f.default_prec())
                }
            }
        )*
    };
}

impl_from_native_int!(bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
impl_from_native_float!(f32, f64);

impl From<Real128> for Real {
    fn from(x: Real128) -> Self {
        Self::from_real128(x, real128_default_prec())
    }
}

impl TryFrom<&Integer> for Real {
    type Error = Error;

    fn try_from(n: &Integer) -> Result<Self, Self::Error> {
        Self::from_source(n)
    }
}

impl TryFrom<&Rational> for Real {
    type Error = Error;

    fn try_from(q: &Rational) -> Result<Self, Self::Error> {
        Self::from_source(q)
    }
}
