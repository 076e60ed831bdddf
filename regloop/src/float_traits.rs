#[cfg(not(feature = "libm"))]
use num_traits::float::FloatCore as NumTraitsFloat;
#[cfg(feature = "libm")]
use num_traits::Float as NumTraitsFloat;

/// Types must implement this trait to instantiate any of the generic devices
/// in this crate.  Implementations are provided for `f32` and `f64`.
pub trait Float: NumTraitsFloat + From<u16> + Default + Copy + Send {
    /// 0
    const ZERO: Self;
    /// 1
    const ONE: Self;
    /// 2
    const TWO: Self;
    /// 3
    const THREE: Self;
    /// 1/2
    const ONE_HALF: Self;
    /// pi
    const PI: Self;
    /// 2*pi
    const TAU: Self;
    /// pi / 2
    const FRAC_PI_2: Self;
    /// pi / 3
    const FRAC_PI_3: Self;
    /// pi / 6
    const FRAC_PI_6: Self;
    /// 1 / sqrt(3)
    const FRAC_1_SQRT_3: Self;
    /// sqrt(3) / 2
    const FRAC_SQRT_3_2: Self;
    /// Creates a value of this type from a u16.  Functionality provided by
    /// the trait (uses the `From<u16>` implementation)
    fn from_u16(x: u16) -> Self {
        <Self as From<u16>>::from(x)
    }
    /// Creates a value of this type from a f32
    fn from_f32(x: f32) -> Self;
    /// Creates a value of this type from a f64
    fn from_f64(x: f64) -> Self;
    /// Convert to a f32
    fn as_f32(self) -> f32;
    /// Returns the sine of self
    fn fsin(self) -> Self;
    /// Returns the cosine of self
    fn fcos(self) -> Self;
    /// Returns the square root of self (self must be positive and normal)
    fn fsqrt(self) -> Self;
    /// Returns the base-2 logarithm of self (self must be positive and normal)
    fn flog2(self) -> Self;
    /// Returns 2 raised to the power of self
    fn fexp2(self) -> Self;
    /// Decompose a positive, normal value into `(m, e)` with `m` in `[1, 2)`
    /// such that `self == m * 2^e`
    fn frexp2(self) -> (Self, i32);
    /// Multiply self by `2^e`.  `e` must keep the result in the normal range.
    fn ldexp2(self, e: i32) -> Self;
}

impl Float for f32 {
    const ZERO: f32 = 0.0f32;
    const ONE: f32 = 1.0f32;
    const TWO: f32 = 2.0f32;
    const THREE: f32 = 3.0f32;
    const ONE_HALF: f32 = 0.5f32;
    const PI: f32 = core::f32::consts::PI;
    const TAU: f32 = core::f32::consts::TAU;
    const FRAC_PI_2: f32 = core::f32::consts::FRAC_PI_2;
    const FRAC_PI_3: f32 = core::f32::consts::FRAC_PI_3;
    const FRAC_PI_6: f32 = core::f32::consts::FRAC_PI_6;
    const FRAC_1_SQRT_3: f32 = 0.577_350_26_f32;
    const FRAC_SQRT_3_2: f32 = 0.866_025_4_f32;
    fn from_f32(x: f32) -> Self {
        x
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn as_f32(self) -> f32 {
        self
    }
    fn fsin(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::sin_poly::<Self, 7>(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::sin(self);
        ret
    }
    fn fcos(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::cos_poly::<Self, 7>(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::cos(self);
        ret
    }
    fn fsqrt(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::sqrt_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::sqrt(self);
        ret
    }
    fn flog2(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::log2_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::log2(self);
        ret
    }
    fn fexp2(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::exp2_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::exp2(self);
        ret
    }
    fn frexp2(self) -> (Self, i32) {
        let bits = self.to_bits();
        let e = ((bits >> 23) & 0xFF) as i32 - 127;
        let m = f32::from_bits((bits & 0x007F_FFFF) | 0x3F80_0000);
        (m, e)
    }
    fn ldexp2(self, e: i32) -> Self {
        self * f32::from_bits(((e + 127) as u32) << 23)
    }
}

impl Float for f64 {
    const ZERO: f64 = 0.0f64;
    const ONE: f64 = 1.0f64;
    const TWO: f64 = 2.0f64;
    const THREE: f64 = 3.0f64;
    const ONE_HALF: f64 = 0.5f64;
    const PI: f64 = core::f64::consts::PI;
    const TAU: f64 = core::f64::consts::TAU;
    const FRAC_PI_2: f64 = core::f64::consts::FRAC_PI_2;
    const FRAC_PI_3: f64 = core::f64::consts::FRAC_PI_3;
    const FRAC_PI_6: f64 = core::f64::consts::FRAC_PI_6;
    const FRAC_1_SQRT_3: f64 = 0.577_350_269_189_625_8_f64;
    const FRAC_SQRT_3_2: f64 = 0.866_025_403_784_438_6_f64;
    fn from_f32(x: f32) -> Self {
        x as f64
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn as_f32(self) -> f32 {
        self as f32
    }
    fn fsin(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::sin_poly::<Self, 7>(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::sin(self);
        ret
    }
    fn fcos(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::cos_poly::<Self, 7>(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::cos(self);
        ret
    }
    fn fsqrt(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::sqrt_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::sqrt(self);
        ret
    }
    fn flog2(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::log2_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::log2(self);
        ret
    }
    fn fexp2(self) -> Self {
        #[cfg(not(feature = "libm"))]
        let ret = crate::trig::exp2_poly(self);
        #[cfg(feature = "libm")]
        let ret = <Self as NumTraitsFloat>::exp2(self);
        ret
    }
    fn frexp2(self) -> (Self, i32) {
        let bits = self.to_bits();
        let e = ((bits >> 52) & 0x7FF) as i32 - 1023;
        let m = f64::from_bits((bits & 0x000F_FFFF_FFFF_FFFF) | 0x3FF0_0000_0000_0000);
        (m, e)
    }
    fn ldexp2(self, e: i32) -> Self {
        self * f64::from_bits(((e + 1023) as u64) << 52)
    }
}
