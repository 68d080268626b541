//! Real definition, precision management, and basic number properties.

use core::mem::MaybeUninit;

use gmp_mpfr_sys::mpfr;
use gmp_mpfr_sys::mpfr::mpfr_t;
use rug::Float;

use crate::common::buf::ScratchBuf;
use crate::defs::Error;
use crate::defs::Precision;
use crate::defs::DEFAULT_PRECISION;
use crate::defs::DEFAULT_RND;
use crate::prec::check_prec;

#[cfg(feature = "random")]
use crate::defs::Exponent;

/// Allocates a number store of precision `p`. The value of the store is NaN.
/// `p` must be in the range of allowed precisions.
pub(crate) fn new_store(p: Precision) -> Float {
    debug_assert!(check_prec(p).is_ok());
    unsafe {
        let mut raw = MaybeUninit::<mpfr_t>::uninit();
        mpfr::init2(raw.as_mut_ptr(), p);
        Float::from_raw(raw.assume_init())
    }
}

/// A floating point number with a precision selected per instance.
///
/// A number exclusively owns its storage; cloning copies the storage with the same precision.
pub struct Real {
    inner: Float,
}

impl Real {
    /// Returns a number of precision `p` with unspecified value. `p` must be checked by the caller.
    pub(crate) fn alloc(p: Precision) -> Self {
        Real { inner: new_store(p) }
    }

    /// Returns a new number with value of 0 and precision of `p` bits.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: the precision is out of the allowed range.
    pub fn new(p: Precision) -> Result<Self, Error> {
        let mut ret = Self::alloc(check_prec(p)?);
        unsafe {
            mpfr::set_zero(ret.as_raw_mut(), 1);
        }
        Ok(ret)
    }

    /// Returns the precision of `self` in bits.
    pub fn prec(&self) -> Precision {
        unsafe { mpfr::get_prec(self.as_raw()) }
    }

    /// Returns a pointer to the underlying MPFR number.
    pub fn as_raw(&self) -> *const mpfr_t {
        self.inner.as_raw()
    }

    pub(crate) fn as_raw_mut(&mut self) -> *mut mpfr_t {
        self.inner.as_raw_mut()
    }

    /// Returns true if `self` is NaN.
    pub fn is_nan(&self) -> bool {
        unsafe { mpfr::nan_p(self.as_raw()) != 0 }
    }

    /// Returns true if `self` is positive or negative infinity.
    pub fn is_inf(&self) -> bool {
        unsafe { mpfr::inf_p(self.as_raw()) != 0 }
    }

    /// Returns true if `self` is positive or negative zero.
    pub fn is_zero(&self) -> bool {
        unsafe { mpfr::zero_p(self.as_raw()) != 0 }
    }

    /// Returns true if the sign bit of `self` is set. This includes negative zero and NaN with the sign bit set.
    pub fn is_sign_negative(&self) -> bool {
        unsafe { mpfr::signbit(self.as_raw()) != 0 }
    }

    /// Returns `self` rounded to the nearest `f64`.
    pub fn to_f64(&self) -> f64 {
        unsafe { mpfr::get_d(self.as_raw(), DEFAULT_RND) }
    }

    /// Sets the precision of `self` to `p` bits. The value of `self` is not preserved.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: the precision is out of the allowed range. `self` is not modified.
    pub fn set_prec(&mut self, p: Precision) -> Result<(), Error> {
        let p = check_prec(p)?;
        unsafe {
            mpfr::set_prec(self.as_raw_mut(), p);
        }
        Ok(())
    }

    /// Sets the precision of `self` to `p` bits, rounding the value to the nearest number
    /// representable with `p` bits, ties to even.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: the precision is out of the allowed range. `self` is not modified.
    pub fn set_prec_preserving(&mut self, p: Precision) -> Result<(), Error> {
        if p == self.prec() {
            return Ok(());
        }

        let p = check_prec(p)?;

        // the value is rounded into the scratch buffer while self still holds the old precision
        let mut tmp = ScratchBuf::acquire();
        unsafe {
            mpfr::set_prec(tmp.as_raw_mut(), p);
            mpfr::set(tmp.as_raw_mut(), self.as_raw(), DEFAULT_RND);

            mpfr::set_prec(self.as_raw_mut(), p);
            mpfr::set(self.as_raw_mut(), tmp.as_raw(), DEFAULT_RND);
        }

        Ok(())
    }

    /// Returns a random normal number with precision `p`, all `p` bits of the significand
    /// filled, random sign, and the exponent in the range from `exp_from` to `exp_to` inclusive.
    /// The number is in the range [0.5, 1) multiplied by 2 raised to the exponent.
    /// Exponents out of the kernel's exponent range produce infinity or zero.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: the precision is out of the allowed range.
    ///  - InvalidArgument: `exp_from` is greater than `exp_to`, or the precision is too large for the generator.
    #[cfg(feature = "random")]
    pub fn random_normal(p: Precision, exp_from: Exponent, exp_to: Exponent) -> Result<Self, Error> {
        use rand::random;
        use rand::Rng;
        use rug::integer::Order;
        use rug::Integer;

        let p = check_prec(p)?;

        if exp_from > exp_to {
            return Err(Error::InvalidArgument);
        }

        let bits = u32::try_from(p).map_err(|_| Error::InvalidArgument)?;
        let words = (bits as usize + 63) / 64;
        let digits: Vec<u64> = (0..words).map(|_| random::<u64>()).collect();

        let mut m = Integer::from_digits(&digits, Order::Lsf);
        m.keep_bits_mut(bits);
        m.set_bit(bits - 1, true);

        let e = rand::thread_rng().gen_range(exp_from..=exp_to);

        let mut ret = Self::alloc(p);
        let raw = ret.as_raw_mut();
        unsafe {
            mpfr::set_z(raw, m.as_raw(), DEFAULT_RND);
            mpfr::mul_2si(raw, raw, e.saturating_sub(p), DEFAULT_RND);
            if random::<bool>() {
                mpfr::neg(raw, raw, DEFAULT_RND);
            }
        }

        Ok(ret)
    }
}

impl Clone for Real {
    fn clone(&self) -> Self {
        let mut ret = Self::alloc(self.prec());
        unsafe {
            mpfr::set(ret.as_raw_mut(), self.as_raw(), DEFAULT_RND);
        }
        ret
    }
}

impl Default for Real {
    fn default() -> Self {
        let mut ret = Self::alloc(DEFAULT_PRECISION);
        unsafe {
            mpfr::set_zero(ret.as_raw_mut(), 1);
        }
        ret
    }
}

impl core::fmt::Debug for Real {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Real")
            .field("prec", &self.prec())
            .field("value", &format_args!("{}", self))
            .finish()
    }
}

#[cfg(test)]
mod tests {

    use rand::random;

    use super::*;
    use crate::defs::MAX_PRECISION;
    use crate::defs::MIN_PRECISION;

    // true if both numbers have the same precision and the same bits
    fn same_bits(a: &Real, b: &Real) -> bool {
        a.prec() == b.prec()
            && a.is_nan() == b.is_nan()
            && (a.is_nan() || unsafe { mpfr::equal_p(a.as_raw(), b.as_raw()) != 0 })
            && a.is_sign_negative() == b.is_sign_negative()
    }

    #[test]
    fn test_new() {
        let n = Real::new(100).unwrap();
        assert_eq!(n.prec(), 100);
        assert!(n.is_zero());
        assert!(!n.is_sign_negative());

        assert_eq!(
            Real::new(0).unwrap_err(),
            Error::InvalidPrecision {
                requested: 0,
                min: MIN_PRECISION,
                max: MAX_PRECISION
            }
        );
        assert!(Real::new(-3).is_err());
        assert!(Real::new(MIN_PRECISION).is_ok());

        let d = Real::default();
        assert_eq!(d.prec(), DEFAULT_PRECISION);
        assert!(d.is_zero());
        assert_eq!(d.to_f64(), 0.0);
    }

    #[test]
    fn test_predicates() {
        let n = Real::from(f64::NAN);
        assert!(n.is_nan());
        assert!(!n.is_inf());
        assert!(!n.is_zero());

        let n = Real::from(f64::NEG_INFINITY);
        assert!(n.is_inf());
        assert!(n.is_sign_negative());

        let n = Real::from(-0.0f64);
        assert!(n.is_zero());
        assert!(n.is_sign_negative());

        let n = Real::from(-2.5f32);
        assert!(!n.is_zero());
        assert!(n.is_sign_negative());
        assert_eq!(n.to_f64(), -2.5);
    }

    #[test]
    fn test_clone() {
        let n = Real::with_prec(1.1f64, 200).unwrap();
        let mut c = n.clone();
        assert!(same_bits(&n, &c));
        assert_ne!(n.as_raw(), c.as_raw());

        c.set_prec_preserving(10).unwrap();
        assert_eq!(n.prec(), 200);
        assert_eq!(c.prec(), 10);
        assert_eq!(n.to_f64(), 1.1);

        let n = Real::from(f64::NAN);
        assert!(n.clone().is_nan());
    }

    #[test]
    fn test_set_prec() {
        let mut n = Real::from(123);
        n.set_prec(256).unwrap();
        assert_eq!(n.prec(), 256);

        assert_eq!(
            n.set_prec(0),
            Err(Error::InvalidPrecision {
                requested: 0,
                min: MIN_PRECISION,
                max: MAX_PRECISION
            })
        );
        assert_eq!(n.prec(), 256);

        // failed change leaves the value intact
        let mut n = Real::from(123);
        assert!(n.set_prec_preserving(MAX_PRECISION + 1).is_err());
        assert!(n.set_prec(-1).is_err());
        assert_eq!(n.prec(), 32);
        assert_eq!(n.to_f64(), 123.0);
    }

    #[test]
    fn test_set_prec_preserving() {
        let mut n = Real::from(123);
        n.set_prec_preserving(256).unwrap();
        assert_eq!(n.prec(), 256);
        assert_eq!(n.to_f64(), 123.0);

        // 123 = 1111011b, 4 bits round down to 1111000b
        let mut n = Real::from(123);
        n.set_prec_preserving(4).unwrap();
        assert_eq!(n.to_f64(), 120.0);

        // tie: 6 bits are between 1111010b and 1111100b, even is 1111100b

        let mut n = Real::from(123);
        n.set_prec_preserving(6).unwrap();
        assert_eq!(n.to_f64(), 124.0);

        // tie: 1001b to 3 bits is between 1000b and 1010b, even is 1000b
        let mut n = Real::from(9u8);
        n.set_prec_preserving(3).unwrap();
        assert_eq!(n.to_f64(), 8.0);

        // tie: 1011b to 3 bits is between 1010b and 1100b, even is 1100b
        let mut n = Real::from(11u8);
        n.set_prec_preserving(3).unwrap();
        assert_eq!(n.to_f64(), 12.0);

        // special values survive
        for f in [f64::INFINITY, f64::NEG_INFINITY, -0.0] {
            let mut n = Real::from(f);
            n.set_prec_preserving(300).unwrap();
            assert!(same_bits(&n, &Real::with_prec(f, 300).unwrap()));
        }
        let mut n = Real::from(f64::NAN);
        n.set_prec_preserving(2).unwrap();
        assert!(n.is_nan());
    }

    #[test]
    fn test_set_prec_idempotent() {
        for _ in 0..1000 {
            let f: f64 = random::<f64>() * 1e10;
            let p = random::<u8>() as Precision + 1;

            let mut n = Real::from(f);
            n.set_prec_preserving(p).unwrap();
            let once = n.clone();
            n.set_prec_preserving(p).unwrap();

            assert!(same_bits(&n, &once));
        }
    }

    #[test]
    fn test_set_prec_grow_shrink() {
        for _ in 0..1000 {
            let p = 64;
            let f: f64 = random::<f64>() - 0.5;

            let orig = Real::with_prec(f, p).unwrap();
            let mut n = orig.clone();

            n.set_prec_preserving(128).unwrap();
            assert_eq!(n.prec(), 128);
            n.set_prec_preserving(64).unwrap();

            assert!(same_bits(&n, &orig));
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn test_random_normal() {
        for _ in 0..1000 {
            let p = random::<u16>() as Precision % 1000 + 1;
            let n = Real::random_normal(p, -100, 100).unwrap();
            assert_eq!(n.prec(), p);

            let a = n.to_f64().abs();
            assert!(a >= 0.5 * 2f64.powi(-100));
            assert!(a < 2f64.powi(100));

            let mut c = n.clone();
            c.set_prec_preserving(p + 10).unwrap();
            c.set_prec_preserving(p).unwrap();
            assert!(same_bits(&c, &n));
        }

        let n = Real::random_normal(64, 3, 3).unwrap();
        let a = n.to_f64().abs();
        assert!((4.0..8.0).contains(&a));

        assert_eq!(Real::random_normal(64, 3, 2).unwrap_err(), Error::InvalidArgument);
        assert!(Real::random_normal(0, 0, 1).is_err());
    }
}
