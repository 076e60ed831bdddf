//! Window functions for the spectrum side of the demo harnesses.

use crate::Float;

fn phase<T: Float>(i: usize, n: usize) -> T {
    T::TAU * T::from_f32(i as f32) / T::from_f32((n - 1) as f32)
}

/// The Hann window, `0.5 * (1 - cos(2 pi i / (n-1)))`
pub fn hann<T: Float>(i: usize, n: usize) -> T {
    if n < 2 {
        return T::ONE;
    }
    T::ONE_HALF * (T::ONE - phase::<T>(i, n).fcos())
}

/// The Hamming window
pub fn hamming<T: Float>(i: usize, n: usize) -> T {
    if n < 2 {
        return T::ONE;
    }
    T::from_f32(0.54) - T::from_f32(0.46) * phase::<T>(i, n).fcos()
}

/// The Blackman window
pub fn blackman<T: Float>(i: usize, n: usize) -> T {
    if n < 2 {
        return T::ONE;
    }
    let c = phase::<T>(i, n).fcos();
    // cos(2x) folded to 2cos^2(x) - 1 to stay inside fcos's argument range
    T::from_f32(0.42) - T::ONE_HALF * c + T::from_f32(0.08) * (T::TWO * c * c - T::ONE)
}
