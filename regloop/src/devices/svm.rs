use super::*;
use crate::format::CtlType;
use core::marker::PhantomData;

pub(crate) mod detail {
    use super::*;
    /// Phase bookkeeping shared by the modulators
    pub trait ModOps: CtlFormatBase {
        /// Split a phase in `[0, 2pi)` into a pi/3-wide sector index
        /// (0 through 5) and the phase local to that sector
        fn sector_split(phase: Self::Phase) -> (u8, Self::Phase);
        /// Add `twelfths * pi/6` to a phase, wrapping back into `[0, 2pi)`
        fn phase_offset(phase: Self::Phase, twelfths: u8) -> Self::Phase;
    }
}

/// Space-vector modulation for a three-phase bridge.
///
/// The phase is partitioned into six sectors of width pi/3; within a sector
/// the two active-vector dwell values are `dx = S(pi/3 - local)` and
/// `dy = S(local)`, and the three channel values are a fixed per-sector
/// permutation of `a = dx + dy`, `b = -a` and `c = b + 2 dx` (or `2 dy` in
/// odd sectors).  Peak output is 2/sqrt(3) of the sine-modulation peak.
///
/// This implements [Device], taking the electrical angle as input (no
/// parameters) and returning the three channel values.
#[derive(Clone, Copy, Default)]
pub struct Svm<T: CtlFormatBase, S: Sine<T>> {
    marker: PhantomData<(T, S)>,
}

impl<T: CtlFormatBase, S: Sine<T>> Svm<T, S> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T: CtlFormat, S: Sine<T>> Device<T> for Svm<T, S> {
    type Input = T::Phase;
    type Params = ();
    type Output = [T::Value; 3];
    fn next(&mut self, _ctx: &T::Context, phase: T::Phase, _params: ()) -> [T::Value; 3] {
        let (sector, local) = T::sector_split(phase);
        let dx = S::sine(T::phase_frac_pi_3() - local);
        let dy = S::sine(local);
        let a = dx.sat_add(dy);
        let b = -a;
        let t = if sector % 2 == 1 { dy } else { dx };
        let c = b.sat_add(t.sat_add(t));
        match sector {
            0 => [b, c, a],
            1 => [c, b, a],
            2 => [a, b, c],
            3 => [a, c, b],
            4 => [c, a, b],
            // sector_split never yields more than 5
            _ => [b, a, c],
        }
    }
}

impl<T: CtlFloat> detail::ModOps for T {
    fn sector_split(phase: T) -> (u8, T) {
        let scaled = phase * T::THREE / T::PI;
        let mut sector = scaled.floor().to_u32().unwrap_or(0) as u8;
        if sector > 5 {
            sector = 5;
        }
        let local = phase - T::FRAC_PI_3 * T::from_f32(sector as f32);
        (sector, local)
    }
    fn phase_offset(phase: T, twelfths: u8) -> T {
        let p = phase + T::FRAC_PI_6 * T::from_f32(twelfths as f32);
        if p >= T::TAU {
            p - T::TAU
        } else {
            p
        }
    }
}

impl detail::ModOps for i32 {
    fn sector_split(phase: fixedmath::Phase) -> (u8, fixedmath::Phase) {
        use crate::Fixed32;
        // phase * 3/pi lands in [0, 6); the integer part is the sector
        let scaled = phase.scale_fixed(fixedmath::FRAC_3_PI);
        let mut sector = (scaled.to_bits() >> 28) as u8;
        if sector > 5 {
            sector = 5;
        }
        let local = phase
            - fixedmath::Phase::from_bits(
                fixedmath::PHASE_FRAC_PI_3.to_bits() * sector as i32,
            );
        (sector, local)
    }
    fn phase_offset(phase: fixedmath::Phase, twelfths: u8) -> fixedmath::Phase {
        let off = fixedmath::Phase::from_bits(
            fixedmath::PHASE_FRAC_PI_6.to_bits() * twelfths as i32,
        );
        // wrap before adding; phase + off could exceed the Phase range
        let wrap = fixedmath::PHASE_TAU - off;
        if phase >= wrap {
            phase - wrap
        } else {
            phase + off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextFxP;
    use crate::trig::{sin_max_abs_error, sin_poly, SinPoly};

    #[test]
    fn fifty_hz_reference_steps() {
        // 50 Hz drive sampled at 1 kHz, order-5 sine
        let ctx = Context::<f64>::new(1e-3);
        let mut svm = Svm::<f64, SinPoly<5>>::new();
        let tol = 3.0 * sin_max_abs_error(5);

        // step 0: phase 0, sector 0: a = sin(60 deg), c = b + 2 dx
        let out = svm.next(&ctx, 0.0, ());
        let s60 = (core::f64::consts::FRAC_PI_3).sin();
        assert!((out[0] + s60).abs() < tol);
        assert!((out[1] - s60).abs() < tol);
        assert!((out[2] - s60).abs() < tol);

        // step 1: phase 18 deg
        let phase = core::f64::consts::TAU * 0.05;
        let out = svm.next(&ctx, phase, ());
        let dx = (core::f64::consts::FRAC_PI_3 - phase).sin();
        let dy = phase.sin();
        assert!((out[0] + (dx + dy)).abs() < tol);
        assert!((out[1] - (dx - dy)).abs() < tol);
        assert!((out[2] - (dx + dy)).abs() < tol);
    }

    #[test]
    fn sector_permutations_cover_all_channels() {
        let ctx = Context::<f64>::new(1e-3);
        let mut svm = Svm::<f64, SinPoly<5>>::new();
        for s in 0..6 {
            // sample mid-sector so dx != dy and all three values differ
            let phase = (s as f64 + 0.25) * core::f64::consts::FRAC_PI_3;
            let (sector, local) = <f64 as detail::ModOps>::sector_split(phase);
            assert_eq!(sector, s as u8);
            assert!(local >= 0.0 && local < core::f64::consts::FRAC_PI_3 + 1e-12);

            let out = svm.next(&ctx, phase, ());
            let dx = sin_poly::<f64, 5>(core::f64::consts::FRAC_PI_3 - local);
            let dy = sin_poly::<f64, 5>(local);
            let a = dx + dy;
            let c = -a + 2.0 * if s % 2 == 1 { dy } else { dx };
            // each of {a, -a, c} appears exactly once
            let mut found = [false; 3];
            for v in out {
                if (v - a).abs() < 1e-12 {
                    found[0] = true;
                } else if (v + a).abs() < 1e-12 {
                    found[1] = true;
                } else if (v - c).abs() < 1e-12 {
                    found[2] = true;
                }
            }
            assert!(found.iter().all(|x| *x));
        }
    }

    #[test]
    fn utilization_exceeds_sine_peak() {
        // line-to-neutral peak reaches 1.0 vs sin-modulation's sqrt(3)/2
        let ctx = Context::<f64>::new(1e-3);
        let mut svm = Svm::<f64, SinPoly<7>>::new();
        let mut peak = 0.0f64;
        for k in 0..600 {
            let phase = core::f64::consts::TAU * (k as f64) / 600.0;
            for v in svm.next(&ctx, phase, ()) {
                peak = peak.max(v.abs());
            }
        }
        assert!(peak > 0.99 && peak < 1.01);
    }

    #[test]
    fn fixed_tracks_float() {
        let ctxf = Context::<f64>::new(1e-3);
        let ctxx = ContextFxP::from_rate_hz(1000);
        let mut sf = Svm::<f64, SinPoly<5>>::new();
        let mut sx = Svm::<i32, SinPoly<5>>::new();
        for k in 0..360 {
            let phase = core::f64::consts::TAU * (k as f64) / 360.0;
            let of = sf.next(&ctxf, phase, ());
            let ox = sx.next(&ctxx, fixedmath::Phase::from_num(phase), ());
            for (f, x) in of.iter().zip(ox.iter()) {
                let x: f64 = x.to_num();
                assert!((f - x).abs() < 2e-3);
            }
        }
    }
}
