//! Fixed-point types and math helpers used by the fixed-point control path.
//!
//! Every alias below documents the closed value interval it is contracted to
//! carry.  Arithmetic between two aliases goes through a widening multiply so
//! the intermediate lands in a type whose exponent is the sum of the operand
//! exponents; feeding a value outside an alias's interval into a device is a
//! contract violation, not a runtime error.

pub use fixed::types::*;
use fixed::FixedI64;

/// A general signal value (measurement, error, regulator output) in the
/// interval `[-32768, 32768)` with a resolution of 2^-16.
pub type Value = I16F16;
/// A regulator or filter design gain, same interval contract as [Value]
pub type Gain = I16F16;
/// A coefficient in `[0, 1)`, e.g. a filter alpha or a duty cycle
pub type Scalar = U0F16;
/// An angle in radians in `[-2pi, 2pi]` (interval `[-8, 8)`, 28 fractional
/// bits).  Devices taking a `Phase` expect it already wrapped.
pub type Phase = I4F28;
/// A wide accumulator covering any sum or product of two [Value]s
pub type Wide = I32F32;
/// A free-running phase accumulator in revolutions, `[0, 1)`.  Wrapping is
/// the natural integer overflow, so the modulus is exact.
pub type PhaseAcc = U0F32;
/// A frequency in Hz, `[0, 16384)`
pub type Frequency = U14F18;

/// pi as a [Phase]
pub const PHASE_PI: Phase = Phase::lit("3.1415926536");
/// 2*pi as a [Phase]
pub const PHASE_TAU: Phase = Phase::lit("6.2831853072");
/// pi/2 as a [Phase]
pub const PHASE_FRAC_PI_2: Phase = Phase::lit("1.5707963268");
/// pi/3 as a [Phase]
pub const PHASE_FRAC_PI_3: Phase = Phase::lit("1.0471975512");
/// pi/6 as a [Phase]
pub const PHASE_FRAC_PI_6: Phase = Phase::lit("0.5235987756");
/// 1/sqrt(3) as a [Scalar]
pub const FRAC_1_SQRT_3: Scalar = Scalar::lit("0.5773502692");
/// sqrt(3)/2 as a [Scalar]
pub const FRAC_SQRT_3_2: Scalar = Scalar::lit("0.8660254038");
/// 3/pi as a [Scalar] (used to split a phase into pi/3 sectors)
pub const FRAC_3_PI: Scalar = Scalar::lit("0.9549296586");

/// Widen a [Value] into a [Wide] accumulator
pub fn widen(v: Value) -> Wide {
    Wide::from_num(v)
}

/// Narrow a [Wide] accumulator back into a [Value], saturating
pub fn narrow(w: Wide) -> Value {
    Value::saturating_from_num(w)
}

/// One Horner step in [Phase] precision: `acc * x + c`.
///
/// The caller guarantees `|acc * x| < 8`; the 64 bit intermediate cannot
/// overflow for any pair of [Phase] operands.
pub fn phase_mul_add(acc: Phase, x: Phase, c: Phase) -> Phase {
    let prod = ((acc.to_bits() as i64) * (x.to_bits() as i64)) >> 28;
    Phase::from_bits(prod as i32) + c
}

/// Convert a compile-time f64 into [Phase] bits.  Used to materialize
/// polynomial coefficient tables at compile time.
pub(crate) const fn phase_from_f64(x: f64) -> Phase {
    Phase::from_bits((x * (1u64 << 28) as f64) as i32)
}

/// Widen the given 32 bit fixed point number to a 64 bit fixed point number
pub fn widen_i<Frac>(a: fixed::FixedI32<Frac>) -> FixedI64<Frac>
where
    Frac: fixed::types::extra::Unsigned
        + fixed::types::extra::LeEqU32
        + fixed::types::extra::LeEqU64,
{
    FixedI64::<Frac>::from_num(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_fraction_correctness() {
        let third: f64 = FRAC_1_SQRT_3.to_num();
        let half_rt3: f64 = FRAC_SQRT_3_2.to_num();
        let delta: f64 = Scalar::DELTA.to_num();
        assert!((third - 1.0 / 3.0f64.sqrt()).abs() <= delta);
        assert!((half_rt3 - 3.0f64.sqrt() / 2.0).abs() <= delta);
    }

    #[test]
    fn phase_mul_add_matches_float() {
        let x = Phase::from_num(1.25);
        let acc = Phase::from_num(-0.5);
        let c = Phase::from_num(0.125);
        let got: f64 = phase_mul_add(acc, x, c).to_num();
        assert!((got - (-0.5 * 1.25 + 0.125)).abs() < 1e-7);
    }

    #[test]
    fn widening_is_lossless() {
        let v = Value::from_num(-123.625);
        let w: f64 = widen_i(v).to_num();
        assert_eq!(w, -123.625);
        assert_eq!(narrow(widen(v)), v);
    }

    #[test]
    fn phase_acc_wraps_exactly() {
        let mut acc = PhaseAcc::from_num(0.75);
        let delta = PhaseAcc::from_num(0.5);
        acc = acc.wrapping_add(delta);
        assert_eq!(acc, PhaseAcc::from_num(0.25));
    }
}
