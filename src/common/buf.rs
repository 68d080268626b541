//! Scratch buffer for holding intermediate numbers.

use core::cell::Cell;
use core::mem::ManuallyDrop;

use gmp_mpfr_sys::mpfr;
use gmp_mpfr_sys::mpfr::mpfr_t;
use rug::Float;

use crate::defs::MIN_PRECISION;
use crate::num::new_store;

thread_local! {
    static SCRATCH: Cell<Option<Float>> = const { Cell::new(None) };
}

/// Number storage borrowed from the current thread for the duration of an operation.
///
/// Acquisition takes the thread's buffer, or allocates a new one if the buffer is in use
/// by an enclosing operation. The buffer always has precision `MIN_PRECISION` when acquired.
/// On drop, the precision is reset to `MIN_PRECISION` and the buffer is given back to the thread.
pub(crate) struct ScratchBuf {
    inner: ManuallyDrop<Float>,
}

impl ScratchBuf {
    pub fn acquire() -> Self {
        let inner = SCRATCH
            .try_with(Cell::take)
            .ok()
            .flatten()
            .unwrap_or_else(|| new_store(MIN_PRECISION));

        ScratchBuf {
            inner: ManuallyDrop::new(inner),
        }
    }

    #[inline]
    pub fn as_raw(&self) -> *const mpfr_t {
        self.inner.as_raw()
    }

    #[inline]
    pub fn as_raw_mut(&mut self) -> *mut mpfr_t {
        self.inner.as_raw_mut()
    }
}

impl Drop for ScratchBuf {
    fn drop(&mut self) {
        // inner is not accessed after this point
        let mut inner = unsafe { ManuallyDrop::take(&mut self.inner) };

        unsafe {
            mpfr::set_prec(inner.as_raw_mut(), MIN_PRECISION);
        }

        // if the thread is being torn down the buffer is freed here
        let _ = SCRATCH.try_with(move |s| s.set(Some(inner)));
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn prec(b: &ScratchBuf) -> mpfr::prec_t {
        unsafe { mpfr::get_prec(b.as_raw()) }
    }

    #[test]
    fn test_scratch_buf() {
        let mut b = ScratchBuf::acquire();
        assert_eq!(prec(&b), MIN_PRECISION);

        unsafe {
            mpfr::set_prec(b.as_raw_mut(), 300);
            mpfr::set_ui(b.as_raw_mut(), 7, mpfr::rnd_t::RNDN);
        }
        assert_eq!(prec(&b), 300);
        drop(b);

        // reused and reset
        let b = ScratchBuf::acquire();
        assert_eq!(prec(&b), MIN_PRECISION);

        // nested acquisition does not alias
        let b2 = ScratchBuf::acquire();
        assert_ne!(b.as_raw(), b2.as_raw());
        assert_eq!(prec(&b2), MIN_PRECISION);

        drop(b2);
        drop(b);

        let b = ScratchBuf::acquire();
        assert_eq!(prec(&b), MIN_PRECISION);
    }

    #[test]
    fn test_scratch_buf_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    for p in 1..100 {
                        let mut b = ScratchBuf::acquire();
                        assert_eq!(prec(&b), MIN_PRECISION);
                        unsafe {
                            mpfr::set_prec(b.as_raw_mut(), p * (i + 1));
                        }
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
    }
}
