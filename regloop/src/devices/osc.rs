use super::*;

pub(crate) mod detail {
    use super::*;
    pub trait OscOps: CtlFormatBase {
        /// Phase increment per sample, in revolutions
        fn osc_delta(freq: Self::Frequency, context: &Self::Context) -> Self::PhaseAcc;
        /// Advance the accumulator one sample, wrapping at one revolution
        fn osc_advance(acc: Self::PhaseAcc, delta: Self::PhaseAcc) -> Self::PhaseAcc;
        /// Convert the accumulator to an angle in radians, `[0, 2pi)`
        fn acc_to_phase(acc: Self::PhaseAcc) -> Self::Phase;
    }
}

/// Parameters for an [Osc]: the precomputed per-sample phase increment
#[derive(Clone, Copy, Default)]
pub struct OscParams<T: CtlFormatBase> {
    delta: T::PhaseAcc,
}

impl<T: CtlFormat> OscParams<T> {
    /// Build from an oscillation frequency in Hz.  The frequency must stay
    /// below half the sample rate.
    pub fn new(freq: T::Frequency, context: &T::Context) -> Self {
        Self {
            delta: T::osc_delta(freq, context),
        }
    }
}

/// A free-running sawtooth phase accumulator.
///
/// The accumulator runs in revolutions, where the wrap at the end of a
/// cycle is exact in both numeric formats, and reports the phase in
/// radians.  [Device::next] advances and returns the new phase; [Osc::phase]
/// reads without advancing.  The input type is `()` as the oscillator is
/// driven by its parameters alone.
#[derive(Clone, Copy, Default)]
pub struct Osc<T: CtlFormatBase> {
    acc: T::PhaseAcc,
}

impl<T: CtlFormatBase> Osc<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T: CtlFormat> Osc<T> {
    /// The current phase in radians, without advancing
    pub fn phase(&self) -> T::Phase {
        T::acc_to_phase(self.acc)
    }
}

impl<T: CtlFormat> Device<T> for Osc<T> {
    type Input = ();
    type Params = OscParams<T>;
    type Output = T::Phase;
    fn next(&mut self, _ctx: &T::Context, _input: (), params: OscParams<T>) -> T::Phase {
        self.acc = T::osc_advance(self.acc, params.delta);
        T::acc_to_phase(self.acc)
    }
}

impl<T: CtlFloat> detail::OscOps for T {
    fn osc_delta(freq: T, context: &Context<T>) -> T {
        freq * context.sample_period
    }
    fn osc_advance(acc: T, delta: T) -> T {
        let acc = acc + delta;
        if acc >= T::ONE {
            acc - T::ONE
        } else {
            acc
        }
    }
    fn acc_to_phase(acc: T) -> T {
        acc * T::TAU
    }
}

impl detail::OscOps for i32 {
    fn osc_delta(
        freq: fixedmath::Frequency,
        context: &crate::context::ContextFxP,
    ) -> fixedmath::PhaseAcc {
        // freq (U14F18) * dt (U0F32) yields revolutions per sample with 50
        // fractional bits; keep the top 32
        let prod = (freq.to_bits() as u64) * (context.sample_period.to_bits() as u64);
        fixedmath::PhaseAcc::from_bits((prod >> 18) as u32)
    }
    fn osc_advance(acc: fixedmath::PhaseAcc, delta: fixedmath::PhaseAcc) -> fixedmath::PhaseAcc {
        // the wrap at one revolution is the natural integer overflow
        acc.wrapping_add(delta)
    }
    fn acc_to_phase(acc: fixedmath::PhaseAcc) -> fixedmath::Phase {
        let prod = (fixedmath::PHASE_TAU.to_bits() as i64) * (acc.to_bits() as i64);
        fixedmath::Phase::from_bits((prod >> 32) as i32)
    }
}
