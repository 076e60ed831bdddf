use super::*;
use crate::units::{Henry, KilogramMeterSq, Ohm, Quantity, Weber};
use crate::Float;

/// Design parameters of the discrete DC-motor model, reduced to the raw
/// per-step update coefficients
#[derive(Clone, Copy, Default)]
pub struct DcmParams<T: Float> {
    dt_over_l: T,
    dt_over_j: T,
    r: T,
    k: T,
}

impl<T: Float> DcmParams<T> {
    /// Build from the electrical and mechanical design values: armature
    /// resistance, armature inductance, torque constant and rotor inertia
    pub fn new(
        r: Quantity<T, Ohm>,
        l: Quantity<T, Henry>,
        k: Quantity<T, Weber>,
        j: Quantity<T, KilogramMeterSq>,
        context: &Context<T>,
    ) -> Self {
        let dt = context.sample_period;
        Self {
            dt_over_l: dt / l.canonical(),
            dt_over_j: dt / j.canonical(),
            r: r.canonical(),
            k: k.canonical(),
        }
    }
}

/// One input sample of the motor model
#[derive(Clone, Copy, Default)]
pub struct DcmInput<T: Float> {
    /// Armature voltage, V
    pub voltage: T,
    /// Load torque, N*m
    pub load_torque: T,
}

/// One output sample of the motor model
#[derive(Clone, Copy, Default)]
pub struct DcmOutput<T: Float> {
    /// Armature current, A
    pub current: T,
    /// Rotor angular velocity, rad/s
    pub speed: T,
}

/// A discrete DC-motor model for closing test loops around the regulators:
///
/// `i[k+1] = i[k] + dt/L (u[k] - R i[k] - k w[k])`
/// `w[k+1] = w[k] + dt/J (k i[k] - T_load[k])`
///
/// Both state derivatives are evaluated on the pre-step state.  This model
/// runs on the host bench, so it implements [Device] for the floating-point
/// formats only.
#[derive(Clone, Copy, Default)]
pub struct Dcm<T: Float> {
    current: T,
    speed: T,
}

impl<T: Float> Dcm<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Re-seed the electrical and mechanical state
    pub fn reset(&mut self, current: T, speed: T) {
        self.current = current;
        self.speed = speed;
    }
}

impl<T: CtlFloat> Device<T> for Dcm<T> {
    type Input = DcmInput<T>;
    type Params = DcmParams<T>;
    type Output = DcmOutput<T>;
    fn next(&mut self, _ctx: &T::Context, input: DcmInput<T>, p: DcmParams<T>) -> DcmOutput<T> {
        let back_emf = p.k * self.speed;
        let di = p.dt_over_l * (input.voltage - p.r * self.current - back_emf);
        let dw = p.dt_over_j * (p.k * self.current - input.load_torque);
        self.current = self.current + di;
        self.speed = self.speed + dw;
        DcmOutput {
            current: self.current,
            speed: self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Millihenry;

    fn params(ctx: &Context<f64>) -> DcmParams<f64> {
        DcmParams::new(
            Quantity::<f64, Ohm>::new(1.2),
            Quantity::<f64, Millihenry>::new(5.0).to::<Henry>(),
            Quantity::<f64, Weber>::new(0.05),
            Quantity::<f64, KilogramMeterSq>::new(2e-5),
            ctx,
        )
    }

    #[test]
    fn unloaded_motor_spins_up_to_u_over_k() {
        let ctx = Context::<f64>::new(1e-5);
        let p = params(&ctx);
        let mut dcm = Dcm::<f64>::new();
        let input = DcmInput {
            voltage: 12.0,
            load_torque: 0.0,
        };
        let mut out = DcmOutput::default();
        for _ in 0..2_000_000 {
            out = dcm.next(&ctx, input, p);
        }
        // at equilibrium the back-EMF cancels the supply: w = U/k, i = 0
        assert!((out.speed - 12.0 / 0.05).abs() < 0.5);
        assert!(out.current.abs() < 0.05);
    }

    #[test]
    fn loaded_motor_draws_torque_current() {
        let ctx = Context::<f64>::new(1e-5);
        let p = params(&ctx);
        let mut dcm = Dcm::<f64>::new();
        let input = DcmInput {
            voltage: 12.0,
            load_torque: 0.01,
        };
        let mut out = DcmOutput::default();
        for _ in 0..2_000_000 {
            out = dcm.next(&ctx, input, p);
        }
        // steady state: i = T/k, w = (U - R i)/k
        let i = 0.01 / 0.05;
        assert!((out.current - i).abs() < 5e-3);
        assert!((out.speed - (12.0 - 1.2 * i) / 0.05).abs() < 0.5);
    }

    #[test]
    fn current_rises_before_speed() {
        let ctx = Context::<f64>::new(1e-5);
        let p = params(&ctx);
        let mut dcm = Dcm::<f64>::new();
        let input = DcmInput {
            voltage: 12.0,
            load_torque: 0.0,
        };
        let first = dcm.next(&ctx, input, p);
        // the electrical pole reacts on the first step, the shaft does not
        assert!(first.current > 0.0);
        assert_eq!(first.speed, 0.0);
    }
}
