//! This crate contains deterministic, allocation-free building blocks for
//! digital control loops on microcontroller-class targets: signal filters,
//! the PID regulator family, Clarke/Park transforms, multi-phase modulators,
//! phase oscillators, polynomial approximations of the transcendentals, and
//! simple plant models for closing test loops.  It is `no_std` and every
//! algorithm is written once against a numeric-format trait family, so the
//! same source runs in either floating-point or fixed-point arithmetic.
//!
//! The fixed-point path minimizes widening multiplies and keeps division
//! out of the per-sample hot path wherever the algorithm allows (parameter
//! builders may divide; they run once at configuration time).  Most of the
//! relevant code for users can be found in the [devices] module.
//!
//! This crate uses the (somewhat regrettably hungarian-style) convention of
//! exporting the concrete fixed-point signal types with a FxP suffix.  The
//! position of the binary point is carried by the type system via the
//! `fixed` crate; the value interval each alias is contracted to carry is
//! documented on the alias.

#![no_std]
#![warn(missing_docs)]

pub mod cheby;
pub mod context;
pub mod devices;
pub mod fixedmath;
pub mod trig;
pub mod units;
pub mod util;
pub mod window;

/// True if using libm for floating-point math, false if using the internal
/// polynomial approximations
pub const USE_LIBM: bool = cfg!(feature = "libm");

mod fixed_traits;
pub use fixed_traits::Fixed32;

mod float_traits;
pub use float_traits::Float;

mod format;
pub use format::{CtlFloat, CtlFormat, CtlFormatBase, CtlType};

/// A general fixed-point signal value; see [fixedmath::Value]
pub use fixedmath::Value as ValueFxP;
/// A fixed-point regulator gain; see [fixedmath::Gain]
pub use fixedmath::Gain as GainFxP;
/// A fixed-point coefficient in `[0, 1)`; see [fixedmath::Scalar]
pub use fixedmath::Scalar as ScalarFxP;
/// A fixed-point angle in radians; see [fixedmath::Phase]
pub use fixedmath::Phase as PhaseFxP;
/// A fixed-point accumulator; see [fixedmath::Wide]
pub use fixedmath::Wide as WideFxP;
/// A fixed-point frequency in Hz; see [fixedmath::Frequency]
pub use fixedmath::Frequency as FrequencyFxP;
