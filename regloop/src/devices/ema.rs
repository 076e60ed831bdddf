use super::*;
use crate::format::CtlType;

pub(crate) mod detail {
    use super::*;
    pub trait EmaOps: CtlFormatBase {
        /// alpha = 2 / (n + 1)
        fn alpha_from_samples(n: u32) -> Self::Scalar;
        /// alpha = dt / (dt + window)
        fn alpha_from_time(window: Self::Value, context: &Self::Context) -> Self::Scalar;
    }
}

/// Parameters for an [Ema]: the single smoothing coefficient every design
/// input reduces to.
#[derive(Clone, Copy, Default)]
pub struct EmaParams<T: CtlFormatBase> {
    /// The smoothing coefficient, in `(0, 1]`
    pub alpha: T::Scalar,
}

impl<T: detail::EmaOps> EmaParams<T> {
    /// Build directly from a smoothing coefficient in `(0, 1]`
    pub fn from_alpha(alpha: T::Scalar) -> Self {
        Self { alpha }
    }
    /// Build from an equivalent rectangular-window length in samples
    pub fn from_samples(n: u32) -> Self {
        Self {
            alpha: T::alpha_from_samples(n),
        }
    }
    /// Build from a smoothing time in seconds
    pub fn from_time(window: T::Value, context: &T::Context) -> Self {
        Self {
            alpha: T::alpha_from_time(window, context),
        }
    }
    /// Build from a first-order lag time constant in seconds.  The discrete
    /// coefficient is the same as [EmaParams::from_time]; the constructor
    /// exists so designs written against a PT1 element read as such.
    pub fn from_pt1(time_constant: T::Value, context: &T::Context) -> Self {
        Self {
            alpha: T::alpha_from_time(time_constant, context),
        }
    }
    /// Recompute the coefficient for a new smoothing time
    pub fn set_window(&mut self, window: T::Value, context: &T::Context) {
        self.alpha = T::alpha_from_time(window, context);
    }
}

/// A first-order exponential moving average,
/// `y[k] = y[k-1] + alpha * (x[k] - y[k-1])`.
///
/// This implements [Device], taking the raw sample as input and
/// [EmaParams] as parameters, and returns the filtered sample.
#[derive(Clone, Copy, Default)]
pub struct Ema<T: CtlFormatBase> {
    y: T::Value,
}

impl<T: CtlFormatBase> Ema<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Re-seed the filter history
    pub fn reset(&mut self, value: T::Value) {
        self.y = value;
    }
    /// The last output without advancing the filter
    pub fn output(&self) -> T::Value {
        self.y
    }
}

impl<T: CtlFormat> Device<T> for Ema<T> {
    type Input = T::Value;
    type Params = EmaParams<T>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, x: T::Value, params: EmaParams<T>) -> T::Value {
        self.y = self.y.sat_add((x - self.y).scale(params.alpha));
        self.y
    }
}

impl<T: CtlFloat> detail::EmaOps for T {
    fn alpha_from_samples(n: u32) -> T {
        T::TWO / (T::from_f32(n as f32) + T::ONE)
    }
    fn alpha_from_time(window: T, context: &Context<T>) -> T {
        let dt = context.sample_period;
        dt / (dt + window)
    }
}

impl detail::EmaOps for i32 {
    fn alpha_from_samples(n: u32) -> fixedmath::Scalar {
        // alpha = 2 / (n + 1), saturating at the largest coefficient for
        // n <= 1 (a one-sample window is a passthrough)
        let bits = (2u64 << 16) / (n as u64 + 1);
        if bits > u16::MAX as u64 {
            fixedmath::Scalar::MAX
        } else {
            fixedmath::Scalar::from_bits(bits as u16)
        }
    }
    fn alpha_from_time(
        window: fixedmath::Value,
        context: &crate::context::ContextFxP,
    ) -> fixedmath::Scalar {
        if window <= fixedmath::Value::ZERO {
            return fixedmath::Scalar::MAX;
        }
        // both operands in 2^-32 s so the quotient is a pure integer ratio
        let dt = context.sample_period.to_bits() as u64;
        let tau = (window.to_bits() as u64) << 16;
        let bits = (dt << 16) / (dt + tau);
        fixedmath::Scalar::from_bits(bits as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextFxP;

    #[test]
    fn step_response_alpha_half() {
        // dt = 0.01, alpha = 0.5, constant unit input
        let ctx = Context::<f64>::new(0.01);
        let params = EmaParams::<f64>::from_alpha(0.5);
        let mut ema = Ema::<f64>::new();
        ema.reset(0.0);
        let expected = [0.5, 0.75, 0.875, 0.9375];
        for want in expected {
            let got = ema.next(&ctx, 1.0, params);
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn unit_alpha_is_passthrough() {
        let ctx = Context::<f64>::default();
        let params = EmaParams::<f64>::from_alpha(1.0);
        let mut ema = Ema::<f64>::new();
        for x in [3.25, -1.5, 0.0, 100.0] {
            assert_eq!(ema.next(&ctx, x, params), x);
        }
    }

    #[test]
    fn small_alpha_attenuates() {
        let ctx = Context::<f64>::default();
        let params = EmaParams::<f64>::from_alpha(1e-3);
        let mut ema = Ema::<f64>::new();
        let y = ema.next(&ctx, 1.0, params);
        assert!(y > 0.0 && y < 2e-3);
    }

    #[test]
    fn design_inputs_agree() {
        let ctx = Context::<f64>::new(0.001);
        // samples: alpha = 2/(n+1)
        assert!((EmaParams::<f64>::from_samples(3).alpha - 0.5).abs() < 1e-12);
        // time and pt1 share the discrete coefficient
        let a = EmaParams::<f64>::from_time(0.099, &ctx).alpha;
        let b = EmaParams::<f64>::from_pt1(0.099, &ctx).alpha;
        assert!((a - 0.01).abs() < 1e-9);
        assert!((a - b).abs() < 1e-15);
        // set_window recomputes
        let mut p = EmaParams::<f64>::from_alpha(0.5);
        p.set_window(0.099, &ctx);
        assert!((p.alpha - a).abs() < 1e-15);
    }

    #[test]
    fn fixed_matches_float() {
        let ctxf = Context::<f64>::new(0.01);
        let ctxx = ContextFxP::from_rate_hz(100);
        let pf = EmaParams::<f64>::from_time(0.04, &ctxf);
        let px = EmaParams::<i32>::from_time(fixedmath::Value::from_num(0.04), &ctxx);
        let mut ef = Ema::<f64>::new();
        let mut ex = Ema::<i32>::new();
        for k in 0..200 {
            let x = if k % 7 < 4 { 1.5 } else { -0.25 };
            let yf = ef.next(&ctxf, x, pf);
            let yx: f64 = ex
                .next(&ctxx, fixedmath::Value::from_num(x), px)
                .to_num();
            assert!((yf - yx).abs() < 1e-3);
        }
    }

    #[test]
    fn process_iterator() {
        let ctx = Context::<f64>::new(0.01);
        let params = EmaParams::<f64>::from_alpha(0.5);
        let mut ema = Ema::<f64>::new();
        let inputs = [1.0, 1.0, 1.0, 1.0];
        let expected = [0.5, 0.75, 0.875, 0.9375];
        let outputs = ema.process(&ctx, inputs.iter().copied(), core::iter::repeat(params));
        for (got, want) in outputs.zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12);
        }
    }
}
