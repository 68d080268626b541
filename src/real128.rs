//! IEEE 754 binary128 (quadruple precision) bit container.

/// Number of significand bits of a quadruple precision number, including the implicit bit.
pub const REAL128_SIG_DIGITS: u32 = 113;

/// Number of explicitly stored significand bits.
pub(crate) const TRAILING_SIG_BITS: u32 = REAL128_SIG_DIGITS - 1;

/// Exponent bias.
pub(crate) const EXP_BIAS: u32 = 16383;

/// Value of the biased exponent field for infinity and NaN.
pub(crate) const EXP_FIELD_MAX: u32 = 0x7fff;

const SIG_MASK: u128 = (1u128 << TRAILING_SIG_BITS) - 1;

/// A quadruple precision floating point number stored as its IEEE 754 bit pattern.
///
/// The type does no arithmetic, it carries the value between the caller and a `Real`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Real128 {
    bits: u128,
}

impl Real128 {
    /// Creates a number from its IEEE 754 binary128 bit pattern.
    pub const fn from_bits(bits: u128) -> Self {
        Real128 { bits }
    }

    /// Returns the IEEE 754 binary128 bit pattern of `self`.
    pub const fn to_bits(&self) -> u128 {
        self.bits
    }

    /// Returns the sign bit, the biased exponent, and the trailing significand of `self`
    /// split into the high 48 bits and the low 64 bits.
    pub const fn ieee_fields(&self) -> (bool, u32, u64, u64) {
        let sign = self.bits >> 127 != 0;
        let exp = ((self.bits >> TRAILING_SIG_BITS) as u32) & EXP_FIELD_MAX;
        let sig = self.bits & SIG_MASK;
        (sign, exp, (sig >> 64) as u64, sig as u64)
    }

    /// Converts `f` to a quadruple precision number. The conversion is exact.
    pub fn from_f64(f: f64) -> Self {
        let bits = f.to_bits();
        let sign = (bits >> 63) as u128;
        let exp = ((bits >> 52) & 0x7ff) as u32;
        let frac = (bits & ((1u64 << 52) - 1)) as u128;

        let (e, m) = if exp == 0x7ff {
            if frac == 0 {
                (EXP_FIELD_MAX, 0)
            } else {
                // quiet NaN keeping the payload
                (EXP_FIELD_MAX, (frac << 60) | (1u128 << (TRAILING_SIG_BITS - 1)))
            }
        } else if exp == 0 {
            if frac == 0 {
                (0, 0)
            } else {
                // subnormal double is a normal quad
                let shift = frac.leading_zeros() - (128 - 52) + 1;
                let m = (frac << shift) & ((1u128 << 52) - 1);
                (EXP_BIAS - 1022 - shift, m << 60)
            }
        } else {
            (exp + EXP_BIAS - 1023, frac << 60)
        };

        Real128::from_bits((sign << 127) | ((e as u128) << TRAILING_SIG_BITS) | m)
    }

    /// Returns true if `self` is NaN.
    pub const fn is_nan(&self) -> bool {
        let (_, e, hi, lo) = self.ieee_fields();
        e == EXP_FIELD_MAX && (hi != 0 || lo != 0)
    }

    /// Returns true if `self` is positive or negative infinity.
    pub const fn is_inf(&self) -> bool {
        let (_, e, hi, lo) = self.ieee_fields();
        e == EXP_FIELD_MAX && hi == 0 && lo == 0
    }
}

impl From<f64> for Real128 {
    fn from(f: f64) -> Self {
        Real128::from_f64(f)
    }
}

impl From<f32> for Real128 {
    fn from(f: f32) -> Self {
        Real128::from_f64(f as f64)
    }
}
