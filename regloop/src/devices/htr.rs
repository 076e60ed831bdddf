use super::*;
use crate::units::{
    JoulePerKelvinKilogram, Kelvin, KelvinPerWatt, Kilogram, Quantity,
};
use crate::Float;

/// Design parameters of the lumped-thermal heater model
#[derive(Clone, Copy, Default)]
pub struct HtrParams<T: Float> {
    dt_over_cm: T,
    inv_r_th: T,
    t_env: T,
}

impl<T: Float> HtrParams<T> {
    /// Build from specific heat capacity, heated mass, thermal resistance
    /// to ambient and the ambient temperature
    pub fn new(
        c: Quantity<T, JoulePerKelvinKilogram>,
        m: Quantity<T, Kilogram>,
        r_th: Quantity<T, KelvinPerWatt>,
        t_env: Quantity<T, Kelvin>,
        context: &Context<T>,
    ) -> Self {
        let dt = context.sample_period;
        Self {
            dt_over_cm: dt / (c.canonical() * m.canonical()),
            inv_r_th: T::ONE / r_th.canonical(),
            t_env: t_env.canonical(),
        }
    }
}

/// A lumped-thermal heater model:
///
/// `T[k+1] = T[k] + dt/(C m) (P[k] - (T[k] - T_env)/R_th)`
///
/// Input is the heating power in watts; output the plate temperature in
/// kelvin.  Host-bench model, floating-point formats only.
#[derive(Clone, Copy, Default)]
pub struct Htr<T: Float> {
    temperature: T,
}

impl<T: Float> Htr<T> {
    /// Constructor; seed with the starting temperature
    pub fn new(temperature: T) -> Self {
        Self { temperature }
    }
    /// Re-seed the plate temperature
    pub fn reset(&mut self, temperature: T) {
        self.temperature = temperature;
    }
}

impl<T: CtlFloat> Device<T> for Htr<T> {
    type Input = T;
    type Params = HtrParams<T>;
    type Output = T;
    fn next(&mut self, _ctx: &T::Context, power: T, p: HtrParams<T>) -> T {
        let leak = (self.temperature - p.t_env) * p.inv_r_th;
        self.temperature = self.temperature + p.dt_over_cm * (power - leak);
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(ctx: &Context<f64>) -> HtrParams<f64> {
        // a small aluminium plate: 900 J/(K kg), 50 g, 8 K/W to ambient
        HtrParams::new(
            Quantity::<f64, JoulePerKelvinKilogram>::new(900.0),
            Quantity::<f64, Kilogram>::new(0.05),
            Quantity::<f64, KelvinPerWatt>::new(8.0),
            Quantity::<f64, Kelvin>::new(293.15),
            ctx,
        )
    }

    #[test]
    fn idle_plate_stays_at_ambient() {
        let ctx = Context::<f64>::new(0.1);
        let p = params(&ctx);
        let mut htr = Htr::<f64>::new(293.15);
        for _ in 0..1000 {
            htr.next(&ctx, 0.0, p);
        }
        assert!((htr.next(&ctx, 0.0, p) - 293.15).abs() < 1e-9);
    }

    #[test]
    fn heats_to_env_plus_p_rth() {
        let ctx = Context::<f64>::new(0.1);
        let p = params(&ctx);
        let mut htr = Htr::<f64>::new(293.15);
        let mut t = 0.0;
        // tau = C m R_th = 360 s; run 5000 s
        for _ in 0..50_000 {
            t = htr.next(&ctx, 10.0, p);
        }
        assert!((t - (293.15 + 80.0)).abs() < 0.1);
    }

    #[test]
    fn cools_back_toward_ambient() {
        let ctx = Context::<f64>::new(0.1);
        let p = params(&ctx);
        let mut htr = Htr::<f64>::new(400.0);
        let t0 = htr.next(&ctx, 0.0, p);
        let t1 = htr.next(&ctx, 0.0, p);
        assert!(t1 < t0 && t0 < 400.0);
    }
}
