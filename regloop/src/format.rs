//! The dual numeric kernel: one trait family describing everything a device
//! needs from its number types, implemented once for the floating-point
//! formats (`f32`, `f64`) and once for the fixed-point format (tagged by
//! `i32`).
//!
//! Devices are written a single time against these traits; choosing a format
//! type parameter selects the whole arithmetic at compile time.

use crate::context::{Context, ContextFxP, GenericContext};
use crate::devices;
use crate::fixedmath;
use crate::{Fixed32, Float};
use core::ops::{Add, Neg, Sub};

/// Type aliases defining the data types of the internal signals within the
/// control loop.  This is primarily to be generic over fixed/floating point.
pub trait CtlFormatBase: Sized + Copy + Default + Send {
    /// A general signal value: measurement, error, regulator output
    type Value: CtlType<Self> + Neg<Output = Self::Value>;
    /// A coefficient in `[0, 1)`, e.g. a filter alpha or a duty cycle
    type Scalar: CtlType<Self>;
    /// A regulator or filter gain
    type Gain: CtlType<Self>;
    /// An angle in radians, `[-2pi, 2pi]` representable
    type Phase: CtlType<Self> + Neg<Output = Self::Phase>;
    /// A free-running phase accumulator in revolutions
    type PhaseAcc: Copy + Default + Send + PartialOrd;
    /// A frequency in Hz
    type Frequency: Copy + Default + Send;
    /// A value that may carry higher precision/range than [Self::Value],
    /// used to accumulate sums of values
    type Wide: Copy
        + Default
        + Send
        + PartialOrd
        + Add<Output = Self::Wide>
        + Sub<Output = Self::Wide>
        + Neg<Output = Self::Wide>;
    /// Type-specific context information
    type Context: Copy + Send + GenericContext;
    /// Widen a value into an accumulator
    fn widen(v: Self::Value) -> Self::Wide;
    /// Narrow an accumulator back into a value, saturating on the fixed path
    fn narrow(w: Self::Wide) -> Self::Value;
    /// Saturating accumulator addition
    fn wide_sat_add(a: Self::Wide, b: Self::Wide) -> Self::Wide;
    /// Apply a gain to a value
    fn weigh(g: Self::Gain, v: Self::Value) -> Self::Value;
    /// Convert an f32 design value into a value
    fn value_from_f32(x: f32) -> Self::Value;
    /// Convert a value to f32
    fn value_to_f32(v: Self::Value) -> f32;
    /// Convert an f32 design value into a gain
    fn gain_from_f32(x: f32) -> Self::Gain;
    /// pi
    fn phase_pi() -> Self::Phase;
    /// 2*pi
    fn phase_tau() -> Self::Phase;
    /// pi/2
    fn phase_frac_pi_2() -> Self::Phase;
    /// pi/3
    fn phase_frac_pi_3() -> Self::Phase;
    /// pi/6
    fn phase_frac_pi_6() -> Self::Phase;
}

/// A trait to simplify common operations on the format types.  This is used
/// to maximize the amount of code that can be agnostic to fixed and floating
/// point.
pub trait CtlType<T: CtlFormatBase>:
    Copy
    + Default
    + Send
    + PartialOrd
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
{
    /// Returns zero
    fn zero() -> Self;
    /// Returns one, or the largest representable value for fixed-point
    /// types that cannot represent one
    fn one() -> Self;
    /// This function will perform a saturating addition for fixed-point
    /// types, and a normal addition for floating-point types
    fn sat_add(self, rhs: Self) -> Self;
    /// Multiply this type with itself, widening internally on the fixed path
    fn multiply(self, rhs: Self) -> Self;
    /// Divide a value by two
    fn divide_by_two(self) -> Self;
    /// Multiply this type by a Scalar.  This will never overflow
    /// (by definition, the result will always be smaller)
    fn scale(self, rhs: T::Scalar) -> Self;
}

/// The umbrella trait every device is generic over: the base format plus the
/// per-device operation sets
pub trait CtlFormat:
    CtlFormatBase
    + devices::ema::detail::EmaOps
    + devices::lqe::detail::LqeOps
    + devices::osc::detail::OscOps
    + devices::svm::detail::ModOps
    + devices::psc::detail::PscOps
    + devices::transform::detail::TransformOps
{
}

/// Helper trait to make constraint bounds less painful for floating point
/// types
pub trait CtlFloat:
    Float
    + CtlFormatBase<
        Value = Self,
        Scalar = Self,
        Gain = Self,
        Phase = Self,
        PhaseAcc = Self,
        Frequency = Self,
        Wide = Self,
        Context = Context<Self>,
    >
{
}

impl CtlFloat for f32 {}
impl CtlFloat for f64 {}

impl<T: CtlFloat> CtlFormat for T {}
impl CtlFormat for i32 {}

// Floating-point implementation:

impl<T: Float> CtlFormatBase for T {
    type Value = T;
    type Scalar = T;
    type Gain = T;
    type Phase = T;
    type PhaseAcc = T;
    type Frequency = T;
    type Wide = T;
    type Context = Context<T>;
    fn widen(v: T) -> T {
        v
    }
    fn narrow(w: T) -> T {
        w
    }
    fn wide_sat_add(a: T, b: T) -> T {
        a + b
    }
    fn weigh(g: T, v: T) -> T {
        g * v
    }
    fn value_from_f32(x: f32) -> T {
        T::from_f32(x)
    }
    fn value_to_f32(v: T) -> f32 {
        v.as_f32()
    }
    fn gain_from_f32(x: f32) -> T {
        T::from_f32(x)
    }
    fn phase_pi() -> T {
        T::PI
    }
    fn phase_tau() -> T {
        T::TAU
    }
    fn phase_frac_pi_2() -> T {
        T::FRAC_PI_2
    }
    fn phase_frac_pi_3() -> T {
        T::FRAC_PI_3
    }
    fn phase_frac_pi_6() -> T {
        T::FRAC_PI_6
    }
}

impl<T: Float> CtlType<T> for T {
    fn zero() -> Self {
        T::ZERO
    }
    fn one() -> Self {
        T::ONE
    }
    // Don't have to worry about floating point overflow
    fn sat_add(self, rhs: Self) -> Self {
        self + rhs
    }
    fn multiply(self, rhs: Self) -> Self {
        self * rhs
    }
    fn divide_by_two(self) -> Self {
        self / Self::TWO
    }
    fn scale(self, rhs: Self) -> Self {
        self * rhs
    }
}

// Fixed-point implementation, tagged by `i32`:

impl CtlFormatBase for i32 {
    type Value = fixedmath::Value;
    type Scalar = fixedmath::Scalar;
    type Gain = fixedmath::Gain;
    type Phase = fixedmath::Phase;
    type PhaseAcc = fixedmath::PhaseAcc;
    type Frequency = fixedmath::Frequency;
    type Wide = fixedmath::Wide;
    type Context = ContextFxP;
    fn widen(v: Self::Value) -> Self::Wide {
        fixedmath::widen(v)
    }
    fn narrow(w: Self::Wide) -> Self::Value {
        fixedmath::narrow(w)
    }
    fn wide_sat_add(a: Self::Wide, b: Self::Wide) -> Self::Wide {
        a.saturating_add(b)
    }
    fn weigh(g: Self::Gain, v: Self::Value) -> Self::Value {
        g.multiply_fixed(v)
    }
    fn value_from_f32(x: f32) -> Self::Value {
        fixedmath::Value::saturating_from_num(x)
    }
    fn value_to_f32(v: Self::Value) -> f32 {
        v.to_num()
    }
    fn gain_from_f32(x: f32) -> Self::Gain {
        fixedmath::Gain::saturating_from_num(x)
    }
    fn phase_pi() -> Self::Phase {
        fixedmath::PHASE_PI
    }
    fn phase_tau() -> Self::Phase {
        fixedmath::PHASE_TAU
    }
    fn phase_frac_pi_2() -> Self::Phase {
        fixedmath::PHASE_FRAC_PI_2
    }
    fn phase_frac_pi_3() -> Self::Phase {
        fixedmath::PHASE_FRAC_PI_3
    }
    fn phase_frac_pi_6() -> Self::Phase {
        fixedmath::PHASE_FRAC_PI_6
    }
}

impl<F: Fixed32 + Send> CtlType<i32> for F {
    fn zero() -> Self {
        Self::ZERO
    }
    fn one() -> Self {
        Self::ONE_OR_MAX
    }
    fn sat_add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
    fn multiply(self, rhs: Self) -> Self {
        self.multiply_fixed(rhs)
    }
    fn divide_by_two(self) -> Self {
        self.unwrapped_shr(1)
    }
    fn scale(self, rhs: fixedmath::Scalar) -> Self {
        self.scale_fixed(rhs)
    }
}

impl CtlType<i32> for fixedmath::Scalar {
    fn zero() -> Self {
        Self::ZERO
    }
    fn one() -> Self {
        Self::MAX
    }
    fn sat_add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
    fn multiply(self, rhs: Self) -> Self {
        Self::from_num(self.wide_mul(rhs))
    }
    fn divide_by_two(self) -> Self {
        self.unwrapped_shr(1)
    }
    fn scale(self, rhs: fixedmath::Scalar) -> Self {
        Self::from_num(self.wide_mul(rhs))
    }
}
