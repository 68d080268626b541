//! Multiple precision floating point numbers with a precision selected per instance.
//!
//! A [`Real`] owns a binary floating point number of a given precision in bits. Numbers
//! are constructed from native integers, native floats, arbitrary precision integers and
//! rationals, and quadruple precision floats, with the precision either given by the caller
//! or deduced from the type of the source value. The precision can be changed later, either
//! destructively or with rounding of the value. Numbers are rendered as locale-independent
//! decimal strings.
//!
//! Arithmetic is performed by MPFR.
//!
//! ## Examples
//!
//! ```
//! use mpreal::Real;
//! use mpreal::Real128;
//!
//! // precision deduced from the type: 32 bits for i32
//! let n = Real::from(123);
//! assert_eq!(n.prec(), 32);
//! assert_eq!(n.to_string(), "1.23e+2");
//!
//! // explicit precision
//! let mut n = Real::with_prec(1.1f64, 200).unwrap();
//! assert_eq!(n.prec(), 200);
//!
//! // change precision keeping the value rounded to nearest
//! n.set_prec_preserving(53).unwrap();
//! assert_eq!(n.to_f64(), 1.1);
//!
//! // quadruple precision source: 113 bits
//! let q = Real::from(Real128::from_f64(0.5));
//! assert_eq!(q.prec(), 113);
//! assert_eq!(q.to_string(), "5.e-1");
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]

mod common;
mod conv;
mod defs;
mod num;
mod prec;
mod real128;
mod source;
mod strop;

#[cfg(feature = "serde")]
mod for_3rd;

pub use crate::defs::Error;
pub use crate::defs::Exponent;
pub use crate::defs::Precision;
pub use crate::defs::SourceKind;
pub use crate::num::Real;
pub use crate::real128::Real128;
pub use crate::source::NativeFloat;
pub use crate::source::NativeInt;
pub use crate::source::Source;

pub use crate::defs::DEFAULT_PRECISION;
pub use crate::defs::MAX_PRECISION;
pub use crate::defs::MIN_PRECISION;
pub use crate::defs::WORD_BIT_SIZE;
pub use crate::real128::REAL128_SIG_DIGITS;

pub use crate::prec::check_prec;
pub use crate::prec::clamp_prec;
pub use crate::prec::digits_for_nonbinary_float;
