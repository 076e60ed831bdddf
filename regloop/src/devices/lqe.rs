use super::*;

pub(crate) mod detail {
    use super::*;
    pub trait LqeOps: CtlFormatBase {
        /// One predict/gain/update cycle; returns the new estimate
        fn lqe_step(
            params: &LqeParams<Self>,
            x: &mut Self::Value,
            p: &mut Self::Gain,
            z: Self::Value,
        ) -> Self::Value;
    }
}

/// Design parameters of a scalar steady-state Kalman filter
#[derive(Clone, Copy, Default)]
pub struct LqeParams<T: CtlFormatBase> {
    /// State transition factor
    pub f: T::Gain,
    /// Measurement factor
    pub h: T::Gain,
    /// Process noise covariance
    pub q: T::Gain,
    /// Measurement noise covariance (must be positive)
    pub r: T::Gain,
}

impl<T: CtlFormatBase> LqeParams<T> {
    /// Constructor; all parameters positive
    pub fn new(f: T::Gain, h: T::Gain, q: T::Gain, r: T::Gain) -> Self {
        Self { f, h, q, r }
    }
    /// Replace the filter design in place
    pub fn set_params(&mut self, f: T::Gain, h: T::Gain, q: T::Gain, r: T::Gain) {
        *self = Self::new(f, h, q, r);
    }
}

/// A scalar linear quadratic estimator.
///
/// Per step this predicts `x <- F x`, `P <- F^2 P + Q`, computes the gain
/// `K = H P / (H^2 P + R)` and folds the measurement in.  State is the
/// estimate and the error covariance; both can be re-seeded with
/// [Lqe::reset].
///
/// This implements [Device], taking the measurement as input and
/// [LqeParams] as parameters, and returns the updated estimate.
#[derive(Clone, Copy, Default)]
pub struct Lqe<T: CtlFormatBase> {
    x: T::Value,
    p: T::Gain,
}

impl<T: CtlFormatBase> Lqe<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Re-seed the estimate and the error covariance
    pub fn reset(&mut self, x: T::Value, p: T::Gain) {
        self.x = x;
        self.p = p;
    }
    /// The current estimate, without folding in a measurement
    pub fn estimate(&self) -> T::Value {
        self.x
    }
    /// The current error covariance
    pub fn covariance(&self) -> T::Gain {
        self.p
    }
}

impl<T: CtlFormat> Device<T> for Lqe<T> {
    type Input = T::Value;
    type Params = LqeParams<T>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, z: T::Value, params: LqeParams<T>) -> T::Value {
        T::lqe_step(&params, &mut self.x, &mut self.p, z)
    }
}

impl<T: CtlFloat> detail::LqeOps for T {
    fn lqe_step(params: &LqeParams<T>, x: &mut T, p: &mut T, z: T) -> T {
        // predict
        *x = params.f * *x;
        *p = params.f * params.f * *p + params.q;
        // gain
        let k = params.h * *p / (params.h * params.h * *p + params.r);
        // update
        *x = *x + k * (z - params.h * *x);
        *p = (T::ONE - k * params.h) * *p;
        *x
    }
}

impl detail::LqeOps for i32 {
    fn lqe_step(
        params: &LqeParams<i32>,
        x: &mut fixedmath::Value,
        p: &mut fixedmath::Gain,
        z: fixedmath::Value,
    ) -> fixedmath::Value {
        use crate::Fixed32;
        // predict
        *x = params.f.multiply_fixed(*x);
        let p_pred = params
            .f
            .multiply_fixed(params.f)
            .multiply_fixed(*p)
            .saturating_add(params.q);
        // gain; the denominator is at least R > 0 by the design contract
        let num = params.h.multiply_fixed(p_pred);
        let den = params.h.multiply_fixed(num).saturating_add(params.r);
        let k = fixedmath::narrow(fixedmath::widen(num) / fixedmath::widen(den));
        // update
        let innovation = z - params.h.multiply_fixed(*x);
        *x = x.saturating_add(k.multiply_fixed(innovation));
        *p = (fixedmath::Gain::ONE - k.multiply_fixed(params.h)).multiply_fixed(p_pred);
        *x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextFxP;

    fn params_f64() -> LqeParams<f64> {
        LqeParams::<f64>::new(1.0, 1.0, 1e-4, 0.25)
    }

    #[test]
    fn converges_to_constant_measurement() {
        let ctx = Context::<f64>::default();
        let params = params_f64();
        let mut lqe = Lqe::<f64>::new();
        lqe.reset(0.0, 1.0);
        let mut last = 0.0;
        for _ in 0..500 {
            last = lqe.next(&ctx, 2.0, params);
        }
        assert!((last - 2.0).abs() < 1e-2);
        // steady-state covariance settles well below the seed
        assert!(lqe.covariance() < 0.05);
    }

    #[test]
    fn first_step_gain() {
        // P0 = 1, F = H = 1: K = (P0 + Q) / (P0 + Q + R)
        let ctx = Context::<f64>::default();
        let params = params_f64();
        let mut lqe = Lqe::<f64>::new();
        lqe.reset(0.0, 1.0);
        let k = (1.0 + 1e-4) / (1.0 + 1e-4 + 0.25);
        let got = lqe.next(&ctx, 1.0, params);
        assert!((got - k).abs() < 1e-12);
    }

    #[test]
    fn set_params_replaces_design() {
        let mut params = params_f64();
        params.set_params(0.5, 2.0, 1e-3, 0.1);
        assert_eq!(params.f, 0.5);
        assert_eq!(params.h, 2.0);
    }

    #[test]
    fn fixed_tracks_float() {
        let ctxf = Context::<f64>::default();
        let ctxx = ContextFxP::default();
        let pf = params_f64();
        let px = LqeParams::<i32>::new(
            fixedmath::Gain::from_num(1.0),
            fixedmath::Gain::from_num(1.0),
            fixedmath::Gain::from_num(1e-4),
            fixedmath::Gain::from_num(0.25),
        );
        let mut lf = Lqe::<f64>::new();
        let mut lx = Lqe::<i32>::new();
        lf.reset(0.0, 1.0);
        lx.reset(fixedmath::Value::ZERO, fixedmath::Gain::ONE);
        for k in 0..300 {
            let z = if k % 2 == 0 { 1.125 } else { 0.875 };
            let yf = lf.next(&ctxf, z, pf);
            let yx: f64 = lx
                .next(&ctxx, fixedmath::Value::from_num(z), px)
                .to_num();
            assert!((yf - yx).abs() < 5e-3);
        }
    }
}
