//! Conversion of numbers to and from decimal strings.

use core::cmp::Ordering;
use core::ffi::c_char;
use core::ffi::CStr;
use core::fmt::Write;
use core::ptr::null_mut;
use core::ptr::NonNull;
use core::str::FromStr;
use std::ffi::CString;

use gmp_mpfr_sys::mpfr;
use rug::Integer;

use crate::defs::Error;
use crate::defs::Exponent;
use crate::defs::Precision;
use crate::defs::DEFAULT_PRECISION;
use crate::defs::DEFAULT_RND;
use crate::num::Real;
use crate::prec::check_prec;
use crate::prec::clamp_prec;
use crate::prec::digits_for_nonbinary_float;
use crate::prec::prec_for_decimal_digits;

/// Digit string allocated by MPFR.
struct MpfrStr {
    ptr: NonNull<c_char>,
}

impl MpfrStr {
    fn new(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| MpfrStr { ptr })
    }

    fn as_bytes(&self) -> &[u8] {
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }.to_bytes()
    }
}

impl Drop for MpfrStr {
    fn drop(&mut self) {
        unsafe {
            mpfr::free_str(self.ptr.as_ptr());
        }
    }
}

impl Real {
    /// Writes the decimal representation of `self` to `w`.
    ///
    /// The format is `[-]d.ddd[e[+|-]EEE]`: the first significant digit, a decimal point,
    /// the remaining significant digits without trailing zeros, and the decimal exponent
    /// if it is not 0. The number of digits is enough to recover the value at the
    /// precision of `self`. NaN is written as `nan`, infinity as `inf` or `-inf`,
    /// and zero as `0.` or `-0.`.
    ///
    /// ## Errors
    ///
    ///  - Render: the kernel failed to produce the digit string.
    ///  - Format: writing to `w` failed.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        if self.is_nan() {
            w.write_str("nan")?;
            return Ok(());
        }

        if self.is_inf() {
            w.write_str(if self.is_sign_negative() { "-inf" } else { "inf" })?;
            return Ok(());
        }

        let mut exp: Exponent = 0;
        let s = unsafe { mpfr::get_str(null_mut(), &mut exp, 10, 0, self.as_raw(), DEFAULT_RND) };
        let s = MpfrStr::new(s).ok_or(Error::Render)?;

        let (neg, digits) = match s.as_bytes().split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, s.as_bytes()),
        };

        let (first, rest) = digits.split_first().ok_or(Error::Render)?;
        let len = rest.iter().rposition(|&d| d != b'0').map_or(0, |i| i + 1);
        let rest = core::str::from_utf8(&rest[..len]).map_err(|_| Error::Render)?;

        if neg {
            w.write_char('-')?;
        }
        w.write_char(*first as char)?;
        w.write_char('.')?;
        w.write_str(rest)?;

        if !self.is_zero() {
            // mpfr places the point before the first digit
            let e = Integer::from(exp) - 1;
            match e.cmp0() {
                Ordering::Greater => write!(w, "e+{}", e)?,
                Ordering::Less => write!(w, "e{}", e)?,
                Ordering::Equal => {}
            }
        }

        Ok(())
    }

    /// Returns the decimal representation of `self`. See [`Real::write_to`] for the format.
    ///
    /// ## Errors
    ///
    ///  - Render: the kernel failed to produce the digit string.
    pub fn render(&self) -> Result<String, Error> {
        let mut s = String::new();
        self.write_to(&mut s)?;
        Ok(s)
    }

    /// Parses a decimal number from `s` with precision `p`, rounding to the nearest, ties to even.
    ///
    /// Accepts an optional sign, digits with an optional decimal point, and an optional
    /// exponent introduced by `e` or `E`. `nan`, `inf`, and `infinity` are accepted in any case.
    /// Leading whitespace and the `@` exponent marker are rejected.
    ///
    /// ## Errors
    ///
    ///  - InvalidPrecision: the precision is out of the allowed range.
    ///  - InvalidArgument: `s` is not a number in its entirety.
    pub fn parse(s: &str, p: Precision) -> Result<Self, Error> {
        let p = check_prec(p)?;

        if s.is_empty() || s.starts_with(char::is_whitespace) || s.contains('@') {
            return Err(Error::InvalidArgument);
        }

        let cs = CString::new(s).map_err(|_| Error::InvalidArgument)?;

        let mut ret = Self::alloc(p);
        let mut end: *mut c_char = null_mut();

        let consumed = unsafe {
            mpfr::strtofr(ret.as_raw_mut(), cs.as_ptr(), &mut end, 10, DEFAULT_RND);
            end.cast_const().offset_from(cs.as_ptr())
        };

        if usize::try_from(consumed) != Ok(s.len()) {
            return Err(Error::InvalidArgument);
        }

        Ok(ret)
    }
}

/// Splits `s` into the significand and the decimal exponent. The exponent is 0 if absent or malformed.
fn split_exponent(s: &str) -> (&str, i64) {
    match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], s[i + 1..].parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// Returns the number of decimal digits of the significand of `s` without leading zeros, at least 1.
fn significant_digits(s: &str) -> u32 {
    let (significand, _) = split_exponent(s);

    let n = significand
        .chars()
        .filter(char::is_ascii_digit)
        .skip_while(|&c| c == '0')
        .count();

    u32::try_from(n).unwrap_or(u32::MAX).max(1)
}

/// Returns the number of bits enough to hold exactly the integer written in `s`,
/// or `None` if `s` is not a nonzero integer.
fn integer_bits(s: &str) -> Option<Precision> {
    let (significand, exp) = split_exponent(s);

    let frac_digits = significand.find('.').map_or(0, |i| significand.len() - i - 1) as i64;
    let digits: Vec<u8> = significand.bytes().filter(u8::is_ascii_digit).collect();

    // digits without leading and trailing zeros
    let first = digits.iter().position(|&d| d != b'0')?;
    let last = digits.iter().rposition(|&d| d != b'0')?;
    let trailing_zeros = (digits.len() - last - 1) as i64;

    // value is d * 10^t, and 10^t = 5^t * 2^t
    let t = exp.saturating_sub(frac_digits).saturating_add(trailing_zeros);
    if t < 0 {
        return None;
    }

    let d = u32::try_from(last - first + 1).ok()?;
    let bits = digits_for_nonbinary_float(d, 10).saturating_add((t as f64 * 5f64.log2()).ceil() as Precision);

    Some(bits)
}

impl FromStr for Real {
    type Err = Error;

    /// Parses a decimal number, deducing the precision from `s`.
    ///
    /// The precision is the largest precision rendered with as many significant digits as `s` has,
    /// and at least `DEFAULT_PRECISION`. The rendering of any number with precision `DEFAULT_PRECISION`
    /// is parsed back to the same number. If `s` is an integer that does not fit the precision,
    /// it is parsed exactly, as long as it needs at most twice the precision, and unless `s` is the
    /// rendering of a number with precision `DEFAULT_PRECISION`.
    ///
    /// Precision is not a part of the rendering, so use [`Real::parse`] with the precision of the
    /// original number to restore numbers of any precision.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let p = clamp_prec(prec_for_decimal_digits(significant_digits(s)).max(DEFAULT_PRECISION));
        let n = Real::parse(s, p)?;

        match integer_bits(s) {
            Some(bits) if bits > p && bits <= clamp_prec(p.saturating_mul(2)) => {
                if p > DEFAULT_PRECISION || n.render()? != s {
                    Real::parse(s, bits)
                } else {
                    Ok(n)
                }
            }
            _ => Ok(n),
        }
    }
}

impl core::fmt::Display for Real {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.write_to(f).map_err(|_| core::fmt::Error)
    }
}
