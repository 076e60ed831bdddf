use super::*;
use crate::context::GenericContext;
use crate::format::CtlType;
use core::marker::PhantomData;

/// Compile-time marker selecting how the proportional gain composes the
/// output
pub trait Coupling: Copy + Default + Send {
    /// True if the proportional gain multiplies the full (P+I+D) sum
    const COUPLED: bool;
}

/// The default composition: `out = p*e + i*sum(e) + d*delta(e)`
#[derive(Clone, Copy, Default)]
pub struct Direct;
impl Coupling for Direct {
    const COUPLED: bool = false;
}

/// Coupled composition: `out = p*(e + i*sum(e) + d*delta(e))`
#[derive(Clone, Copy, Default)]
pub struct CoupledP;
impl Coupling for CoupledP {
    const COUPLED: bool = true;
}

/// Parameters of a proportional-only regulator.  The entry point of the
/// builder chain: [PParams::with_i] and [PParams::with_d] move to the
/// larger regulator classes.
#[derive(Clone, Copy, Default)]
pub struct PParams<T: CtlFormatBase> {
    /// Proportional gain
    pub p: T::Gain,
}

impl<T: CtlFormatBase> PParams<T> {
    /// Constructor
    pub fn new(p: T::Gain) -> Self {
        Self { p }
    }
    /// Add an integral gain, already discrete
    pub fn with_i(self, i: T::Gain) -> PiParams<T, Direct> {
        PiParams {
            p: self.p,
            i,
            i_limit: None,
            coupling: PhantomData,
        }
    }
    /// Add an integral gain given as a continuous-time gain; multiplies by
    /// the sample period
    pub fn with_i_dt(self, ki: T::Gain, context: &T::Context) -> PiParams<T, Direct> {
        self.with_i(ki.multiply(T::gain_from_f32(context.sample_period_secs())))
    }
    /// Add a derivative gain, already discrete
    pub fn with_d(self, d: T::Gain) -> PdParams<T, Direct> {
        PdParams {
            p: self.p,
            d,
            coupling: PhantomData,
        }
    }
    /// Add a derivative gain given as a continuous-time gain; divides by
    /// the sample period
    pub fn with_d_dt(self, kd: T::Gain, context: &T::Context) -> PdParams<T, Direct> {
        self.with_d(kd.multiply(T::gain_from_f32(
            1.0 / context.sample_period_secs(),
        )))
    }
}

/// Parameters of a PI regulator
#[derive(Clone, Copy, Default)]
pub struct PiParams<T: CtlFormatBase, C: Coupling = Direct> {
    /// Proportional gain
    pub p: T::Gain,
    /// Integral gain
    pub i: T::Gain,
    /// Optional symmetric clamp on the accumulated error
    pub i_limit: Option<T::Value>,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> PiParams<T, C> {
    /// Clamp the accumulated error into `[-limit, limit]`
    pub fn with_i_limit(mut self, limit: T::Value) -> Self {
        self.i_limit = Some(limit);
        self
    }
    /// Add a derivative gain, already discrete
    pub fn with_d(self, d: T::Gain) -> PidParams<T, C> {
        PidParams {
            p: self.p,
            i: self.i,
            d,
            i_limit: self.i_limit,
            coupling: PhantomData,
        }
    }
    /// Add a derivative gain given as a continuous-time gain; divides by
    /// the sample period
    pub fn with_d_dt(self, kd: T::Gain, context: &T::Context) -> PidParams<T, C> {
        let d = kd.multiply(T::gain_from_f32(1.0 / context.sample_period_secs()));
        self.with_d(d)
    }
}

impl<T: CtlFormatBase> PiParams<T, Direct> {
    /// Mark the proportional gain as coupled over the full sum
    pub fn coupled(self) -> PiParams<T, CoupledP> {
        PiParams {
            p: self.p,
            i: self.i,
            i_limit: self.i_limit,
            coupling: PhantomData,
        }
    }
}

/// Parameters of a PD regulator
#[derive(Clone, Copy, Default)]
pub struct PdParams<T: CtlFormatBase, C: Coupling = Direct> {
    /// Proportional gain
    pub p: T::Gain,
    /// Derivative gain
    pub d: T::Gain,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> PdParams<T, C> {
    /// Add an integral gain, already discrete
    pub fn with_i(self, i: T::Gain) -> PidParams<T, C> {
        PidParams {
            p: self.p,
            i,
            d: self.d,
            i_limit: None,
            coupling: PhantomData,
        }
    }
}

impl<T: CtlFormatBase> PdParams<T, Direct> {
    /// Mark the proportional gain as coupled over the full sum
    pub fn coupled(self) -> PdParams<T, CoupledP> {
        PdParams {
            p: self.p,
            d: self.d,
            coupling: PhantomData,
        }
    }
}

/// Parameters of a full PID regulator
#[derive(Clone, Copy, Default)]
pub struct PidParams<T: CtlFormatBase, C: Coupling = Direct> {
    /// Proportional gain
    pub p: T::Gain,
    /// Integral gain
    pub i: T::Gain,
    /// Derivative gain
    pub d: T::Gain,
    /// Optional symmetric clamp on the accumulated error
    pub i_limit: Option<T::Value>,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> PidParams<T, C> {
    /// Clamp the accumulated error into `[-limit, limit]`
    pub fn with_i_limit(mut self, limit: T::Value) -> Self {
        self.i_limit = Some(limit);
        self
    }
}

fn integrate<T: CtlFormatBase>(
    e_int: &mut T::Wide,
    error: T::Value,
    limit: Option<T::Value>,
) -> T::Value {
    *e_int = T::wide_sat_add(*e_int, T::widen(error));
    if let Some(lim) = limit {
        let hi = T::widen(lim);
        let lo = -hi;
        if *e_int > hi {
            *e_int = hi;
        } else if *e_int < lo {
            *e_int = lo;
        }
    }
    T::narrow(*e_int)
}

/// A proportional-only regulator, `out = p * e`.  Stateless in effect; the
/// struct exists so all regulator classes share the [Device] shape.
#[derive(Clone, Copy, Default)]
pub struct Po<T: CtlFormatBase> {
    marker: PhantomData<T>,
}

impl<T: CtlFormatBase> Po<T> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
}

impl<T: CtlFormat> Device<T> for Po<T> {
    type Input = T::Value;
    type Params = PParams<T>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, error: T::Value, params: PParams<T>) -> T::Value {
        T::weigh(params.p, error)
    }
}

/// A PI regulator.  State is the accumulated error.
#[derive(Clone, Copy, Default)]
pub struct Pi<T: CtlFormatBase, C: Coupling = Direct> {
    e_int: T::Wide,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> Pi<T, C> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Zero the accumulated error
    pub fn reset(&mut self) {
        self.e_int = Default::default();
    }
}

impl<T: CtlFormat, C: Coupling> Device<T> for Pi<T, C> {
    type Input = T::Value;
    type Params = PiParams<T, C>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, error: T::Value, params: PiParams<T, C>) -> T::Value {
        let e_int = integrate::<T>(&mut self.e_int, error, params.i_limit);
        let i_term = T::weigh(params.i, e_int);
        if C::COUPLED {
            T::weigh(params.p, error.sat_add(i_term))
        } else {
            T::weigh(params.p, error).sat_add(i_term)
        }
    }
}

/// A PD regulator.  State is the previous error.
#[derive(Clone, Copy, Default)]
pub struct Pd<T: CtlFormatBase, C: Coupling = Direct> {
    e_prev: T::Value,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> Pd<T, C> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Zero the error history
    pub fn reset(&mut self) {
        self.e_prev = Default::default();
    }
}

impl<T: CtlFormat, C: Coupling> Device<T> for Pd<T, C> {
    type Input = T::Value;
    type Params = PdParams<T, C>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, error: T::Value, params: PdParams<T, C>) -> T::Value {
        let e_d = error - self.e_prev;
        self.e_prev = error;
        let d_term = T::weigh(params.d, e_d);
        if C::COUPLED {
            T::weigh(params.p, error.sat_add(d_term))
        } else {
            T::weigh(params.p, error).sat_add(d_term)
        }
    }
}

/// A full PID regulator.  State is the accumulated and the previous error.
#[derive(Clone, Copy, Default)]
pub struct Pid<T: CtlFormatBase, C: Coupling = Direct> {
    e_int: T::Wide,
    e_prev: T::Value,
    coupling: PhantomData<C>,
}

impl<T: CtlFormatBase, C: Coupling> Pid<T, C> {
    /// Constructor
    pub fn new() -> Self {
        Default::default()
    }
    /// Zero the error history and the accumulated error
    pub fn reset(&mut self) {
        self.e_int = Default::default();
        self.e_prev = Default::default();
    }
}

impl<T: CtlFormat, C: Coupling> Device<T> for Pid<T, C> {
    type Input = T::Value;
    type Params = PidParams<T, C>;
    type Output = T::Value;
    fn next(&mut self, _ctx: &T::Context, error: T::Value, params: PidParams<T, C>) -> T::Value {
        let e_int = integrate::<T>(&mut self.e_int, error, params.i_limit);
        let e_d = error - self.e_prev;
        self.e_prev = error;
        let i_term = T::weigh(params.i, e_int);
        let d_term = T::weigh(params.d, e_d);
        if C::COUPLED {
            T::weigh(params.p, error.sat_add(i_term).sat_add(d_term))
        } else {
            T::weigh(params.p, error)
                .sat_add(i_term)
                .sat_add(d_term)
        }
    }
}
