use super::*;
use core::marker::PhantomData;

/// Classical sine-wave modulation with one, two or three channels.
///
/// The single-channel form emits `S(phase)`; the two-channel form adds the
/// quadrature channel `S(phase + pi/2)`; the three-channel form emits the
/// symmetric set `S(phase)`, `S(phase + 2pi/3)`, `S(phase - 2pi/3)`, whose
/// sum is zero up to the polynomial error.  Channel counts outside 1..=3 do
/// not implement [Device] and fail to compile.
#[derive(Clone, Copy, Default)]
pub struct Swm<T: CtlFormatBase, S: Sine<T>, const N: usize> {
    marker: PhantomData<(T, S)>,
}

impl<T: CtlFormatBase, S: Sine<T>, const N: usize> Swm<T, S, N> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T: CtlFormat, S: Sine<T>> Device<T> for Swm<T, S, 1> {
    type Input = T::Phase;
    type Params = ();
    type Output = [T::Value; 1];
    fn next(&mut self, _ctx: &T::Context, phase: T::Phase, _params: ()) -> [T::Value; 1] {
        [S::sine(phase)]
    }
}

impl<T: CtlFormat, S: Sine<T>> Device<T> for Swm<T, S, 2> {
    type Input = T::Phase;
    type Params = ();
    type Output = [T::Value; 2];
    fn next(&mut self, _ctx: &T::Context, phase: T::Phase, _params: ()) -> [T::Value; 2] {
        [S::sine(phase), S::sine(T::phase_offset(phase, 3))]
    }
}

impl<T: CtlFormat, S: Sine<T>> Device<T> for Swm<T, S, 3> {
    type Input = T::Phase;
    type Params = ();
    type Output = [T::Value; 3];
    fn next(&mut self, _ctx: &T::Context, phase: T::Phase, _params: ()) -> [T::Value; 3] {
        [
            S::sine(phase),
            S::sine(T::phase_offset(phase, 4)),
            S::sine(T::phase_offset(phase, 8)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::{sin_max_abs_error, SinPoly};

    #[test]
    fn single_channel_is_the_sine() {
        let ctx = Context::<f64>::default();
        let mut swm = Swm::<f64, SinPoly<7>, 1>::new();
        for k in 0..100 {
            let phase = core::f64::consts::TAU * (k as f64) / 100.0;
            let [y] = swm.next(&ctx, phase, ());
            assert!((y - phase.sin()).abs() < sin_max_abs_error(7));
        }
    }

    #[test]
    fn two_channels_are_in_quadrature() {
        let ctx = Context::<f64>::default();
        let mut swm = Swm::<f64, SinPoly<7>, 2>::new();
        for k in 0..100 {
            let phase = core::f64::consts::TAU * (k as f64) / 100.0;
            let [a, b] = swm.next(&ctx, phase, ());
            assert!((a - phase.sin()).abs() < sin_max_abs_error(7));
            assert!((b - phase.cos()).abs() < 2.0 * sin_max_abs_error(7));
        }
    }

    #[test]
    fn three_channel_sum_is_zero() {
        let ctx = Context::<f64>::default();
        let mut swm = Swm::<f64, SinPoly<5>, 3>::new();
        for k in 0..360 {
            let phase = core::f64::consts::TAU * (k as f64) / 360.0;
            let [a, b, c] = swm.next(&ctx, phase, ());
            assert!((a + b + c).abs() < 3.0 * sin_max_abs_error(5));
        }
    }

    #[test]
    fn fixed_three_channel_tracks_float() {
        let ctxf = Context::<f64>::default();
        let ctxx = crate::context::ContextFxP::default();
        let mut wf = Swm::<f64, SinPoly<5>, 3>::new();
        let mut wx = Swm::<i32, SinPoly<5>, 3>::new();
        for k in 0..360 {
            let phase = core::f64::consts::TAU * (k as f64) / 360.0;
            let of = wf.next(&ctxf, phase, ());
            let ox = wx.next(&ctxx, fixedmath::Phase::from_num(phase), ());
            for (f, x) in of.iter().zip(ox.iter()) {
                let x: f64 = x.to_num();
                assert!((f - x).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn three_channels_are_symmetric() {
        let ctx = Context::<f64>::default();
        let mut swm = Swm::<f64, SinPoly<7>, 3>::new();
        let third = core::f64::consts::TAU / 3.0;
        for k in 0..90 {
            let phase = core::f64::consts::TAU * (k as f64) / 90.0;
            let [a, b, c] = swm.next(&ctx, phase, ());
            assert!((a - phase.sin()).abs() < 2.0 * sin_max_abs_error(7));
            assert!((b - (phase + third).sin()).abs() < 2.0 * sin_max_abs_error(7));
            assert!((c - (phase - third).sin()).abs() < 2.0 * sin_max_abs_error(7));
        }
    }
}
