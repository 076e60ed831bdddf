use super::ScalarFxP;
use core::ops::Add;
use fixed::types::extra::{LeEqU32, LeEqU64, Sum, Unsigned, U16};
use fixed::FixedU32;

/// A trait encompassing the signed 32 bit fixed point numbers used as signal
/// values throughout this crate
pub trait Fixed32: fixed::traits::Fixed {
    /// One if representable, otherwise the maximum representable value
    const ONE_OR_MAX: Self = if let Some(val) = Self::TRY_ONE {
        val
    } else {
        Self::MAX
    };
    /// Multiply two values via a 64 bit widening multiply, truncating the
    /// result back into `Self`
    fn multiply_fixed(self, rhs: Self) -> Self;
    /// Scale a value by a number in `[0, 1)`.  Never overflows.
    fn scale_fixed(self, rhs: ScalarFxP) -> Self;
}

impl<N> Fixed32 for fixed::FixedI32<N>
where
    N: Unsigned + LeEqU32 + Add<N> + Add<U16>,
    Sum<N, N>: Unsigned + LeEqU64,
    Sum<N, U16>: Unsigned + LeEqU64,
{
    fn multiply_fixed(self, rhs: Self) -> Self {
        Self::from_num(self.wide_mul(rhs))
    }
    fn scale_fixed(self, rhs: ScalarFxP) -> Self {
        Self::from_num(self.wide_mul_unsigned(FixedU32::<U16>::from_num(rhs)))
    }
}
