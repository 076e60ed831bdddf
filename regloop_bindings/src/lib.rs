//! C-linkage entry points for the browser demo.  Each controller is exposed
//! twice: an `f_` prefix running the f64 path and an `x_` prefix running the
//! fixed-point path.  The boundary type is always an IEEE double; the fixed
//! variants accept values in `[-10000, 10000]` and convert at the edge.

use core::cell::UnsafeCell;

use regloop::context::{Context, ContextFxP};
use regloop::devices::{Device, Ema, EmaParams, Lqe, LqeParams};
use regloop::{GainFxP, ValueFxP};

/// The demo's fixed sample period, seconds
const DT: f64 = 0.01;
const SAMPLE_RATE_HZ: u32 = 100;

/// Single-threaded demo host: every export runs on the one JS thread, so a
/// plain cell per controller is sound.
struct Singleton<T>(UnsafeCell<T>);

unsafe impl<T> Sync for Singleton<T> {}

impl<T> Singleton<T> {
    const fn new(v: T) -> Self {
        Self(UnsafeCell::new(v))
    }
    #[allow(clippy::mut_from_ref)]
    unsafe fn get(&self) -> &mut T {
        &mut *self.0.get()
    }
}

fn ctx_f() -> Context<f64> {
    Context::new(DT)
}

fn ctx_x() -> ContextFxP {
    ContextFxP::from_rate_hz(SAMPLE_RATE_HZ)
}

fn to_fixed(x: f64) -> ValueFxP {
    ValueFxP::saturating_from_num(x.clamp(-10_000.0, 10_000.0))
}

// ---------------------------------------------------------------------------
// EMA
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FEma {
    params: Option<EmaParams<f64>>,
    state: Ema<f64>,
}

#[derive(Default)]
struct XEma {
    params: Option<EmaParams<i32>>,
    state: Ema<i32>,
}

static F_EMA: Singleton<Option<FEma>> = Singleton::new(None);
static X_EMA: Singleton<Option<XEma>> = Singleton::new(None);

#[no_mangle]
pub extern "C" fn f_ema_get_timing() -> f64 {
    DT
}

#[no_mangle]
pub extern "C" fn f_ema_set_window(t: f64) {
    let ema = unsafe { F_EMA.get() }.get_or_insert_with(Default::default);
    ema.params = Some(EmaParams::from_time(t, &ctx_f()));
}

#[no_mangle]
pub extern "C" fn f_ema_reset(v: f64) {
    let ema = unsafe { F_EMA.get() }.get_or_insert_with(Default::default);
    ema.state.reset(v);
}

#[no_mangle]
pub extern "C" fn f_ema_apply(x: f64) -> f64 {
    let ema = unsafe { F_EMA.get() }.get_or_insert_with(Default::default);
    let params = ema
        .params
        .unwrap_or_else(|| EmaParams::from_time(10.0 * DT, &ctx_f()));
    ema.state.next(&ctx_f(), x, params)
}

#[no_mangle]
pub extern "C" fn x_ema_get_timing() -> f64 {
    DT
}

#[no_mangle]
pub extern "C" fn x_ema_set_window(t: f64) {
    let ema = unsafe { X_EMA.get() }.get_or_insert_with(Default::default);
    ema.params = Some(EmaParams::from_time(to_fixed(t), &ctx_x()));
}

#[no_mangle]
pub extern "C" fn x_ema_reset(v: f64) {
    let ema = unsafe { X_EMA.get() }.get_or_insert_with(Default::default);
    ema.state.reset(to_fixed(v));
}

#[no_mangle]
pub extern "C" fn x_ema_apply(x: f64) -> f64 {
    let ema = unsafe { X_EMA.get() }.get_or_insert_with(Default::default);
    let params = ema
        .params
        .unwrap_or_else(|| EmaParams::from_time(to_fixed(10.0 * DT), &ctx_x()));
    ema.state.next(&ctx_x(), to_fixed(x), params).to_num()
}

// ---------------------------------------------------------------------------
// LQE
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FLqe {
    params: Option<LqeParams<f64>>,
    state: Lqe<f64>,
}

#[derive(Default)]
struct XLqe {
    params: Option<LqeParams<i32>>,
    state: Lqe<i32>,
}

static F_LQE: Singleton<Option<FLqe>> = Singleton::new(None);
static X_LQE: Singleton<Option<XLqe>> = Singleton::new(None);

#[no_mangle]
pub extern "C" fn f_lqe_get_timing() -> f64 {
    DT
}

#[no_mangle]
pub extern "C" fn f_lqe_set_params(f: f64, h: f64, q: f64, r: f64) {
    let lqe = unsafe { F_LQE.get() }.get_or_insert_with(Default::default);
    lqe.params = Some(LqeParams::new(f, h, q, r));
}

#[no_mangle]
pub extern "C" fn f_lqe_reset(x: f64, p: f64) {
    let lqe = unsafe { F_LQE.get() }.get_or_insert_with(Default::default);
    lqe.state.reset(x, p);
}

#[no_mangle]
pub extern "C" fn f_lqe_apply(z: f64) -> f64 {
    let lqe = unsafe { F_LQE.get() }.get_or_insert_with(Default::default);
    let params = lqe
        .params
        .unwrap_or_else(|| LqeParams::new(1.0, 1.0, 1e-4, 1.0));
    lqe.state.next(&ctx_f(), z, params)
}

#[no_mangle]
pub extern "C" fn x_lqe_get_timing() -> f64 {
    DT
}

#[no_mangle]
pub extern "C" fn x_lqe_set_params(f: f64, h: f64, q: f64, r: f64) {
    let lqe = unsafe { X_LQE.get() }.get_or_insert_with(Default::default);
    lqe.params = Some(LqeParams::new(
        GainFxP::saturating_from_num(f),
        GainFxP::saturating_from_num(h),
        GainFxP::saturating_from_num(q),
        GainFxP::saturating_from_num(r),
    ));
}

#[no_mangle]
pub extern "C" fn x_lqe_reset(x: f64, p: f64) {
    let lqe = unsafe { X_LQE.get() }.get_or_insert_with(Default::default);
    lqe.state
        .reset(to_fixed(x), GainFxP::saturating_from_num(p));
}

#[no_mangle]
pub extern "C" fn x_lqe_apply(z: f64) -> f64 {
    let lqe = unsafe { X_LQE.get() }.get_or_insert_with(Default::default);
    let params = lqe.params.unwrap_or_else(|| {
        LqeParams::new(
            GainFxP::ONE,
            GainFxP::ONE,
            GainFxP::from_bits(7),
            GainFxP::ONE,
        )
    });
    lqe.state.next(&ctx_x(), to_fixed(z), params).to_num()
}
