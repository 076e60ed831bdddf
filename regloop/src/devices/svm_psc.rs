use super::*;

/// Space-vector modulation feeding the phase-shift corrector: the full
/// drive-side chain from electrical angle to the pair of current-sampling
/// timestamps.
///
/// The bipolar SVM channel values are rescaled onto `[0, 1]` duty cycles
/// before correction, so the PSC sees the same normalization the PWM
/// compare registers do.  The every-other-tick emission contract of [Psc]
/// carries through.
#[derive(Clone, Copy, Default)]
pub struct SvmPsc<T: CtlFormatBase, S: Sine<T>> {
    svm: Svm<T, S>,
    psc: Psc<T>,
}

impl<T: CtlFormatBase, S: Sine<T>> SvmPsc<T, S> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// The most recently emitted sample-timestamp pair
    pub fn last(&self) -> (u32, u32) {
        self.psc.last()
    }
}

impl<T: CtlFormat, S: Sine<T>> Device<T> for SvmPsc<T, S> {
    type Input = T::Phase;
    type Params = PscParams;
    type Output = (u32, u32);
    fn next(&mut self, ctx: &T::Context, phase: T::Phase, params: PscParams) -> (u32, u32) {
        let channels = self.svm.next(ctx, phase, ());
        let duties = [
            T::duty_from_bipolar(channels[0]),
            T::duty_from_bipolar(channels[1]),
            T::duty_from_bipolar(channels[2]),
        ];
        self.psc.next(ctx, duties, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::SinPoly;

    #[test]
    fn chain_produces_ordered_samples() {
        let ctx = Context::<f64>::new(1e-3);
        let params = PscParams::new(1e-6, 1e4, 10_000);
        let mut dev = SvmPsc::<f64, SinPoly<5>>::new();
        for k in 0..720 {
            let phase = core::f64::consts::TAU * ((k / 2) as f64) / 360.0;
            let (a, b) = dev.next(&ctx, phase, params);
            assert!(a <= b);
            assert!(b <= 10_000);
        }
    }

    #[test]
    fn odd_ticks_repeat_the_pair() {
        let ctx = Context::<f64>::new(1e-3);
        let params = PscParams::new(1e-6, 1e4, 10_000);
        let mut dev = SvmPsc::<f64, SinPoly<5>>::new();
        let first = dev.next(&ctx, 0.1, params);
        let held = dev.next(&ctx, 0.2, params);
        assert_eq!(first, held);
        assert_eq!(dev.last(), first);
    }
}
