use super::*;
use core::marker::PhantomData;

pub(crate) mod detail {
    use super::*;
    pub trait PscOps: CtlFormatBase {
        /// Convert a duty cycle in `[0, 1]` to a switch instant in timer
        /// counts within the PWM period
        fn duty_to_counts(duty: Self::Scalar, period: u32) -> u32;
        /// Map a bipolar modulator output in `[-1, 1]` onto a duty cycle
        fn duty_from_bipolar(v: Self::Value) -> Self::Scalar;
    }
}

/// Parameters of the phase-shift corrector: the PWM period and the minimum
/// measurement window, both in timer counts.
#[derive(Clone, Copy)]
pub struct PscParams {
    /// The minimum measurement window, in timer counts
    pub crit: u32,
    /// The PWM period, in timer counts
    pub period: u32,
}

impl PscParams {
    /// Build from the critical window duration in seconds, the PWM
    /// frequency in Hz, and the timer resolution per period
    pub fn new(t_crit: f32, f_pwm: f32, period: u32) -> Self {
        Self {
            crit: (t_crit * f_pwm * period as f32) as u32,
            period,
        }
    }
}

/// The phase-shift corrector.
///
/// Takes the three per-channel duty cycles of a modulator tick, converts
/// them to switch instants within the PWM period, and pushes instants that
/// crowd each other apart so that both inter-switch measurement windows are
/// at least the critical width.  The output is the pair of sample
/// timestamps placed in the middle of the two windows.
///
/// A new pair is produced on every second tick only; the off ticks return
/// the held pair, mirroring dual-edge PWM reload timing.  The caller must
/// keep calling every tick to keep the cadence aligned.
#[derive(Clone, Copy, Default)]
pub struct Psc<T: CtlFormatBase> {
    last: (u32, u32),
    hold: bool,
    marker: PhantomData<T>,
}

impl<T: CtlFormatBase> Psc<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// The most recently emitted sample-timestamp pair
    pub fn last(&self) -> (u32, u32) {
        self.last
    }
}

impl<T: CtlFormat> Device<T> for Psc<T> {
    type Input = [T::Scalar; 3];
    type Params = PscParams;
    type Output = (u32, u32);
    fn next(&mut self, _ctx: &T::Context, duties: [T::Scalar; 3], params: PscParams) -> (u32, u32) {
        let stale = self.hold;
        self.hold = !self.hold;
        if stale {
            return self.last;
        }
        let mut t = [
            T::duty_to_counts(duties[0], params.period),
            T::duty_to_counts(duties[1], params.period),
            T::duty_to_counts(duties[2], params.period),
        ];
        // three-element sort network over indices
        let mut idx = [0usize, 1, 2];
        if t[idx[0]] > t[idx[1]] {
            idx.swap(0, 1);
        }
        if t[idx[1]] > t[idx[2]] {
            idx.swap(1, 2);
        }
        if t[idx[0]] > t[idx[1]] {
            idx.swap(0, 1);
        }
        let (lo, mid, hi) = (idx[0], idx[1], idx[2]);
        // widen the lower window symmetrically: advance the earlier edge,
        // delay the later one
        let gap = t[mid] - t[lo];
        if gap < params.crit {
            let need = params.crit - gap;
            let advance = (need / 2).min(t[lo]);
            t[lo] -= advance;
            t[mid] = (t[mid] + (need - advance)).min(params.period);
        }
        // the upper window can only be widened upward without re-crowding
        // the corrected lower pair; the comparison form also covers the case
        // where the lower correction pushed mid past hi
        if t[hi] < t[mid] + params.crit {
            t[hi] = (t[mid] + params.crit).min(params.period);
        }
        self.last = (
            t[lo] + (t[mid] - t[lo]) / 2,
            t[mid] + (t[hi] - t[mid]) / 2,
        );
        self.last
    }
}

impl<T: CtlFloat> detail::PscOps for T {
    fn duty_to_counts(duty: T, period: u32) -> u32 {
        let d = crate::util::clamp(duty, T::ZERO, T::ONE);
        (d * T::from_f32(period as f32)).to_u32().unwrap_or(0)
    }
    fn duty_from_bipolar(v: T) -> T {
        crate::util::clamp((v + T::ONE) * T::ONE_HALF, T::ZERO, T::ONE)
    }
}

impl detail::PscOps for i32 {
    fn duty_to_counts(duty: fixedmath::Scalar, period: u32) -> u32 {
        (((duty.to_bits() as u64) * (period as u64)) >> 16) as u32
    }
    fn duty_from_bipolar(v: fixedmath::Value) -> fixedmath::Scalar {
        let bits = (v.to_bits() >> 1) + (1 << 15);
        fixedmath::Scalar::from_bits(crate::util::clamp(bits, 0, u16::MAX as i32) as u16)
    }
}
