//! Zero-cost physical units.
//!
//! A unit is a zero-sized tag carrying a dimension class and a scale
//! relative to the class's canonical unit; a [Quantity] pairs a raw number
//! with such a tag.  Multiplication and division combine tags through a
//! small static class algebra, and conversions between units of one class
//! collapse to a single constant multiplication.  Nothing here survives to
//! runtime except that multiplication.
//!
//! Design values for the devices in this crate (motor constants, thermal
//! resistances, filter windows) enter through quantities and are reduced to
//! raw coefficients when a `Param` is built; the per-sample path never
//! converts units.

use crate::Float;
use core::marker::PhantomData;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Marker trait for dimension classes (Voltage, Time, Angle, ...)
pub trait UnitClass: 'static {}

macro_rules! unit_class {
    ($($(#[$attr:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$attr])*
            pub enum $name {}
            impl UnitClass for $name {}
        )*
    };
}

unit_class! {
    /// The class of bare ratios
    Dimensionless,
    /// Spatial length
    Length,
    /// Time
    Time,
    /// Plane angle
    Angle,
    /// Frequency
    Frequency,
    /// Electric potential
    Voltage,
    /// Electric current
    Current,
    /// Power
    Power,
    /// Electrical resistance
    Resistance,
    /// Inductance
    Inductance,
    /// Capacitance
    Capacitance,
    /// Magnetic flux (also the class of motor torque/back-EMF constants)
    MagneticFlux,
    /// Moment of inertia
    MomentOfInertia,
    /// Mass
    Mass,
    /// Thermodynamic temperature
    Temperature,
    /// Specific heat capacity
    HeatCapacity,
    /// Thermal resistance
    ThermalResistance,
}

/// The class of a product that has no named entry in the algebra
pub struct ProdClass<A: UnitClass, B: UnitClass>(PhantomData<(A, B)>);
impl<A: UnitClass, B: UnitClass> UnitClass for ProdClass<A, B> {}

/// The class of a quotient that has no named entry in the algebra
pub struct PerClass<A: UnitClass, B: UnitClass>(PhantomData<(A, B)>);
impl<A: UnitClass, B: UnitClass> UnitClass for PerClass<A, B> {}

/// Class-level multiplication table
pub trait ClassMul<Rhs: UnitClass>: UnitClass {
    /// The class of the product
    type Output: UnitClass;
}

/// Class-level division table
pub trait ClassDiv<Rhs: UnitClass>: UnitClass {
    /// The class of the quotient
    type Output: UnitClass;
}

macro_rules! class_mul {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(impl ClassMul<$rhs> for $lhs { type Output = $out; })*
    };
}

macro_rules! class_div {
    ($($lhs:ty, $rhs:ty => $out:ty;)*) => {
        $(impl ClassDiv<$rhs> for $lhs { type Output = $out; })*
    };
}

class_mul! {
    Voltage, Current => Power;
    Current, Voltage => Power;
    Resistance, Current => Voltage;
    Current, Resistance => Voltage;
    Voltage, Time => MagneticFlux;
    Time, Voltage => MagneticFlux;
    Inductance, Current => MagneticFlux;
    Current, Inductance => MagneticFlux;
    Frequency, Time => Dimensionless;
    Time, Frequency => Dimensionless;
    ThermalResistance, Power => Temperature;
    Power, ThermalResistance => Temperature;
    Angle, Frequency => ProdClass<Angle, Frequency>;
    Frequency, Angle => ProdClass<Angle, Frequency>;
    HeatCapacity, Mass => ProdClass<HeatCapacity, Mass>;
    Mass, HeatCapacity => ProdClass<HeatCapacity, Mass>;
}

class_div! {
    Voltage, Resistance => Current;
    Voltage, Current => Resistance;
    Power, Voltage => Current;
    Power, Current => Voltage;
    MagneticFlux, Time => Voltage;
    MagneticFlux, Current => Inductance;
    Dimensionless, Time => Frequency;
    Dimensionless, Frequency => Time;
    Temperature, Power => ThermalResistance;
    Angle, Time => PerClass<Angle, Time>;
}

// Ratios of like quantities are dimensionless
impl<C: UnitClass> ClassDiv<C> for C {
    type Output = Dimensionless;
}

/// A unit: a zero-sized tag with a dimension class and a scale relative to
/// the class's canonical unit
pub trait Unit: Copy + 'static {
    /// The dimension class this unit measures
    type Class: UnitClass;
    /// How many canonical units one of this unit is
    const SCALE: f64;
    /// Printable symbol
    const SYMBOL: &'static str;
}

macro_rules! define_unit {
    ($($(#[$attr:meta])* $name:ident: $class:ty, $scale:expr, $sym:literal;)*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;
            impl Unit for $name {
                type Class = $class;
                const SCALE: f64 = $scale;
                const SYMBOL: &'static str = $sym;
            }
        )*
    };
}

define_unit! {
    /// A bare ratio
    Unity: Dimensionless, 1.0, "1";
    /// Canonical angle unit
    Radian: Angle, 1.0, "rad";
    /// pi/180 radians
    Degree: Angle, core::f64::consts::PI / 180.0, "deg";
    /// One full revolution, 2*pi radians
    Rev: Angle, core::f64::consts::TAU, "rev";
    /// A quarter revolution, pi/2 radians
    QRev: Angle, core::f64::consts::FRAC_PI_2, "qrev";
    /// Alias for a quarter revolution under its other customary name
    HalfPi: Angle, core::f64::consts::FRAC_PI_2, "hpi";
    /// Canonical time unit
    Second: Time, 1.0, "s";
    /// 1e-3 seconds
    Millisecond: Time, 1e-3, "ms";
    /// 1e-6 seconds
    Microsecond: Time, 1e-6, "us";
    /// Canonical frequency unit
    Hertz: Frequency, 1.0, "Hz";
    /// 1e3 Hertz
    Kilohertz: Frequency, 1e3, "kHz";
    /// Canonical length unit
    Meter: Length, 1.0, "m";
    /// 1e-3 meters
    Millimeter: Length, 1e-3, "mm";
    /// Canonical voltage unit
    Volt: Voltage, 1.0, "V";
    /// 1e-3 volts
    Millivolt: Voltage, 1e-3, "mV";
    /// Canonical current unit
    Ampere: Current, 1.0, "A";
    /// 1e-3 amperes
    Milliampere: Current, 1e-3, "mA";
    /// Canonical power unit
    Watt: Power, 1.0, "W";
    /// Canonical resistance unit
    Ohm: Resistance, 1.0, "Ohm";
    /// 1e-3 ohms
    MilliOhm: Resistance, 1e-3, "mOhm";
    /// 1e3 ohms
    KiloOhm: Resistance, 1e3, "kOhm";
    /// Canonical inductance unit
    Henry: Inductance, 1.0, "H";
    /// 1e-3 henries
    Millihenry: Inductance, 1e-3, "mH";
    /// 1e-6 henries
    Microhenry: Inductance, 1e-6, "uH";
    /// Canonical capacitance unit
    Farad: Capacitance, 1.0, "F";
    /// 1e-6 farads
    Microfarad: Capacitance, 1e-6, "uF";
    /// Canonical magnetic flux unit (V*s, N*m/A)
    Weber: MagneticFlux, 1.0, "Wb";
    /// Canonical moment of inertia unit
    KilogramMeterSq: MomentOfInertia, 1.0, "kg*m^2";
    /// Canonical mass unit
    Kilogram: Mass, 1.0, "kg";
    /// 1e-3 kilograms
    Gram: Mass, 1e-3, "g";
    /// Canonical temperature unit
    Kelvin: Temperature, 1.0, "K";
    /// Canonical specific heat capacity unit
    JoulePerKelvinKilogram: HeatCapacity, 1.0, "J/(K*kg)";
    /// Canonical thermal resistance unit
    KelvinPerWatt: ThermalResistance, 1.0, "K/W";
}

/// The unit of a product of two units.  Its scale is the product of the
/// operand scales and its class comes from the class algebra.
pub struct Prod<U: Unit, V: Unit>(PhantomData<(U, V)>);

impl<U: Unit, V: Unit> Clone for Prod<U, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U: Unit, V: Unit> Copy for Prod<U, V> {}

impl<U: Unit, V: Unit> Unit for Prod<U, V>
where
    U::Class: ClassMul<V::Class>,
{
    type Class = <U::Class as ClassMul<V::Class>>::Output;
    const SCALE: f64 = U::SCALE * V::SCALE;
    const SYMBOL: &'static str = "(product)";
}

/// The unit of a quotient of two units
pub struct Per<U: Unit, V: Unit>(PhantomData<(U, V)>);

impl<U: Unit, V: Unit> Clone for Per<U, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U: Unit, V: Unit> Copy for Per<U, V> {}

impl<U: Unit, V: Unit> Unit for Per<U, V>
where
    U::Class: ClassDiv<V::Class>,
{
    type Class = <U::Class as ClassDiv<V::Class>>::Output;
    const SCALE: f64 = U::SCALE / V::SCALE;
    const SYMBOL: &'static str = "(quotient)";
}

/// A raw number tagged with a [Unit]
pub struct Quantity<T, U: Unit> {
    raw: T,
    unit: PhantomData<U>,
}

impl<T: Clone, U: Unit> Clone for Quantity<T, U> {
    fn clone(&self) -> Self {
        Quantity {
            raw: self.raw.clone(),
            unit: PhantomData,
        }
    }
}
impl<T: Copy, U: Unit> Copy for Quantity<T, U> {}

impl<T: PartialEq, U: Unit> PartialEq for Quantity<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: PartialOrd, U: Unit> PartialOrd for Quantity<T, U> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.raw.partial_cmp(&other.raw)
    }
}

impl<T: Default, U: Unit> Default for Quantity<T, U> {
    fn default() -> Self {
        Quantity {
            raw: T::default(),
            unit: PhantomData,
        }
    }
}

impl<T, U: Unit> Quantity<T, U> {
    /// Attach unit `U` to a raw value
    pub const fn new(raw: T) -> Self {
        Quantity {
            raw,
            unit: PhantomData,
        }
    }
    /// Strip the unit
    pub fn raw(self) -> T {
        self.raw
    }
}

impl<T: Float, U: Unit> Quantity<T, U> {
    /// Convert to another unit of the same class.  The factor is a
    /// compile-time constant; conversion is a single multiplication.
    pub fn to<V: Unit<Class = U::Class>>(self) -> Quantity<T, V> {
        Quantity::new(self.raw * T::from_f64(U::SCALE / V::SCALE))
    }
    /// The value expressed in the class's canonical unit
    pub fn canonical(self) -> T {
        self.raw * T::from_f64(U::SCALE)
    }
}

impl<T: Add<Output = T>, U: Unit> Add for Quantity<T, U> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Quantity::new(self.raw + rhs.raw)
    }
}

impl<T: Sub<Output = T>, U: Unit> Sub for Quantity<T, U> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Quantity::new(self.raw - rhs.raw)
    }
}

impl<T: Neg<Output = T>, U: Unit> Neg for Quantity<T, U> {
    type Output = Self;
    fn neg(self) -> Self {
        Quantity::new(-self.raw)
    }
}

impl<T: Mul<Output = T>, U: Unit, V: Unit> Mul<Quantity<T, V>> for Quantity<T, U>
where
    U::Class: ClassMul<V::Class>,
{
    type Output = Quantity<T, Prod<U, V>>;
    fn mul(self, rhs: Quantity<T, V>) -> Self::Output {
        Quantity::new(self.raw * rhs.raw)
    }
}

impl<T: Div<Output = T>, U: Unit, V: Unit> Div<Quantity<T, V>> for Quantity<T, U>
where
    U::Class: ClassDiv<V::Class>,
{
    type Output = Quantity<T, Per<U, V>>;
    fn div(self, rhs: Quantity<T, V>) -> Self::Output {
        Quantity::new(self.raw / rhs.raw)
    }
}

/// `k * pi` expressed in the angle unit `U`
pub fn pi<T: Float, U: Unit<Class = Angle>>(k: T) -> Quantity<T, U> {
    Quantity::new(k * T::from_f64(core::f64::consts::PI / U::SCALE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_factors() {
        let r = Quantity::<f64, MilliOhm>::new(4700.0);
        assert!((r.to::<Ohm>().raw() - 4.7).abs() < 1e-12);
        let a = Quantity::<f64, Rev>::new(0.25);
        assert!((a.to::<Radian>().raw() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((a.to::<Degree>().raw() - 90.0).abs() < 1e-9);
        assert!((a.to::<QRev>().raw() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn class_algebra() {
        let v = Quantity::<f64, Volt>::new(12.0);
        let i = Quantity::<f64, Milliampere>::new(1500.0);
        let p = (v * i).to::<Watt>();
        assert!((p.raw() - 18.0).abs() < 1e-9);

        let r = (v / Quantity::<f64, Ampere>::new(3.0)).to::<Ohm>();
        assert!((r.raw() - 4.0).abs() < 1e-12);

        // like-over-like quotients are plain ratios
        let ratio = (v / Quantity::<f64, Millivolt>::new(6000.0)).to::<Unity>();
        assert!((ratio.raw() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn pi_helper() {
        assert!((pi::<f64, Radian>(0.5).raw() - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((pi::<f64, Rev>(2.0).raw() - 1.0).abs() < 1e-12);
        assert!((pi::<f64, HalfPi>(0.5).raw() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn canonical_collapse() {
        let l = Quantity::<f64, Millihenry>::new(2.5);
        assert!((l.canonical() - 0.0025).abs() < 1e-15);
    }
}
