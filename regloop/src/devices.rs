//! This module contains definitions of the control-loop primitives.
//!
//! Every primitive is split into an immutable `Params` struct built from
//! design values, and a state struct implementing [Device].  The caller owns
//! both, and drives the device one sample tick at a time with
//! [Device::next].

use crate::{CtlFloat, CtlFormat, CtlFormatBase};

pub(crate) mod dcm;
pub(crate) mod ema;
pub(crate) mod htr;
pub(crate) mod lqe;
pub(crate) mod osc;
pub(crate) mod pid;
pub(crate) mod psc;
pub(crate) mod svm;
pub(crate) mod svm_psc;
pub(crate) mod swm;
pub(crate) mod transform;

use crate::context::Context;
use crate::fixedmath;
use crate::trig::Sine;

/// A control device
///
/// This is one of the central abstractions in this library.  A device is a
/// logical component that takes an input signal and applies some logic to
/// it, according to a set of parameters, producing an output signal.
///
/// Parameters are the design-time side of a device: coefficients computed
/// once from human-meaningful values (time constants, gains, frequencies)
/// and then treated as read-only.  The device struct itself is the per
/// instance state, default-initialized to algorithmically neutral values.
/// `next` is a straight-line, bounded-time operation; it never allocates
/// and never fails.
pub trait Device<T: CtlFormat> {
    /// The input type for this device, e.g. a measurement or an error signal
    type Input;
    /// The parameter type for this device
    type Params;
    /// The output type for this device
    type Output;
    /// Within the provided `context`, take one sample of `input` and
    /// execute the device's logic using `params`, then return one sample of
    /// output.
    fn next(
        &mut self,
        context: &T::Context,
        input: Self::Input,
        params: Self::Params,
    ) -> Self::Output;
    /// This is similar to [Device::next], but works on iterators and returns
    /// an iterator over the results
    fn process<'a, InputIt: Iterator<Item = Self::Input>, ParamIt: Iterator<Item = Self::Params>>(
        &'a mut self,
        context: &'a T::Context,
        input: InputIt,
        params: ParamIt,
    ) -> DeviceIter<'a, T, Self, InputIt, ParamIt>
    where
        Self: Sized,
    {
        DeviceIter {
            dev: self,
            ctx: context,
            input,
            params,
        }
    }
}

/// An iterator over a [Device] returned by [Device::process]
pub struct DeviceIter<
    'a,
    T: CtlFormat,
    D: Device<T>,
    InputIt: Iterator<Item = D::Input>,
    ParamIt: Iterator<Item = D::Params>,
> {
    dev: &'a mut D,
    ctx: &'a T::Context,
    input: InputIt,
    params: ParamIt,
}

impl<
        'a,
        T: CtlFormat,
        D: Device<T>,
        InputIt: Iterator<Item = D::Input>,
        ParamIt: Iterator<Item = D::Params>,
    > Iterator for DeviceIter<'a, T, D, InputIt, ParamIt>
{
    type Item = D::Output;
    fn next(&mut self) -> Option<D::Output> {
        Some(
            self.dev
                .next(self.ctx, self.input.next()?, self.params.next()?),
        )
    }
}

pub use dcm::{Dcm, DcmInput, DcmOutput, DcmParams};
pub use ema::{Ema, EmaParams};
pub use htr::{Htr, HtrParams};
pub use lqe::{Lqe, LqeParams};
pub use osc::{Osc, OscParams};
pub use pid::{CoupledP, Coupling, Direct, PParams, Pd, PdParams, Pi, PiParams, Pid, PidParams, Po};
pub use psc::{Psc, PscParams};
pub use svm::Svm;
pub use svm_psc::SvmPsc;
pub use swm::Swm;
pub use transform::{clarke, iclarke, iclarke2, ipark, park, Abc};
