use super::*;
use crate::format::CtlType;

pub(crate) mod detail {
    use super::*;
    pub trait TransformOps: CtlFormatBase {
        /// 1/sqrt(3)
        const FRAC_1_SQRT_3: Self::Scalar;
        /// sqrt(3)/2
        const FRAC_SQRT_3_2: Self::Scalar;
    }
}

/// Adapter over two- and three-component phase vectors.  The Clarke
/// projection only reads the first two components, so both shapes are
/// accepted wherever a frame of phase quantities is expected.
pub trait Abc<V: Copy> {
    /// The first phase component
    fn a(&self) -> V;
    /// The second phase component
    fn b(&self) -> V;
}

impl<V: Copy> Abc<V> for [V; 2] {
    fn a(&self) -> V {
        self[0]
    }
    fn b(&self) -> V {
        self[1]
    }
}

impl<V: Copy> Abc<V> for [V; 3] {
    fn a(&self) -> V {
        self[0]
    }
    fn b(&self) -> V {
        self[1]
    }
}

/// Forward Clarke projection, phases to the orthogonal alpha/beta frame:
/// `alpha = a`, `beta = (a + 2b)/sqrt(3)`.  The third phase of a
/// three-component input is implied by `a + b + c = 0` and ignored.
pub fn clarke<T: CtlFormat, A: Abc<T::Value>>(abc: A) -> [T::Value; 2] {
    let (a, b) = (abc.a(), abc.b());
    [a, a.sat_add(b).sat_add(b).scale(T::FRAC_1_SQRT_3)]
}

/// Inverse Clarke projection back to three phases:
/// `a = alpha`, `b = (-alpha + sqrt(3) beta)/2`, `c = (-alpha - sqrt(3) beta)/2`
pub fn iclarke<T: CtlFormat>(ab: [T::Value; 2]) -> [T::Value; 3] {
    let minus_half_a = (-ab[0]).divide_by_two();
    let beta_s = ab[1].scale(T::FRAC_SQRT_3_2);
    [ab[0], minus_half_a.sat_add(beta_s), minus_half_a - beta_s]
}

/// [iclarke] truncated to its first two components
pub fn iclarke2<T: CtlFormat>(ab: [T::Value; 2]) -> [T::Value; 2] {
    let abc = iclarke::<T>(ab);
    [abc[0], abc[1]]
}

/// Forward Park rotation of an alpha/beta frame by the electrical angle:
/// `d = alpha cos + beta sin`, `q = beta cos - alpha sin`.
///
/// The cosine is derived from the caller-supplied sine polynomial, so one
/// polynomial order choice covers both.
pub fn park<T: CtlFormat, S: Sine<T>>(ab: [T::Value; 2], theta: T::Phase) -> [T::Value; 2] {
    let (sin, cos) = (S::sine(theta), S::cosine(theta));
    [
        ab[0].multiply(cos).sat_add(ab[1].multiply(sin)),
        ab[1].multiply(cos) - ab[0].multiply(sin),
    ]
}

/// Inverse Park rotation:
/// `alpha = d cos - q sin`, `beta = q cos + d sin`
pub fn ipark<T: CtlFormat, S: Sine<T>>(dq: [T::Value; 2], theta: T::Phase) -> [T::Value; 2] {
    let (sin, cos) = (S::sine(theta), S::cosine(theta));
    [
        dq[0].multiply(cos) - dq[1].multiply(sin),
        dq[1].multiply(cos).sat_add(dq[0].multiply(sin)),
    ]
}

impl<T: CtlFloat> detail::TransformOps for T {
    const FRAC_1_SQRT_3: T = T::FRAC_1_SQRT_3;
    const FRAC_SQRT_3_2: T = T::FRAC_SQRT_3_2;
}

impl detail::TransformOps for i32 {
    const FRAC_1_SQRT_3: fixedmath::Scalar = fixedmath::FRAC_1_SQRT_3;
    const FRAC_SQRT_3_2: fixedmath::Scalar = fixedmath::FRAC_SQRT_3_2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trig::SinPoly;

    #[test]
    fn iclarke_reference_vector() {
        let out = iclarke::<f64>([1.25, -0.85]);
        assert!((out[0] - 1.25).abs() < 1e-8);
        assert!((out[1] + 1.36112).abs() < 1e-5);
        assert!((out[2] - 0.11112).abs() < 1e-5);
        // the three phases always sum to zero
        assert!((out[0] + out[1] + out[2]).abs() < 1e-12);
    }

    #[test]
    fn clarke_roundtrip_on_balanced_frames() {
        let cases = [[1.0, -0.25], [0.0, 0.0], [-2.5, 1.75]];
        for ab in cases {
            let abc = iclarke::<f64>(ab);
            assert!((abc[0] + abc[1] + abc[2]).abs() < 1e-12);
            let back = clarke::<f64, _>(abc);
            assert!((back[0] - ab[0]).abs() < 1e-8);
            assert!((back[1] - ab[1]).abs() < 1e-8);
            // the two-component truncation drops only the implied phase
            let two = iclarke2::<f64>(ab);
            assert_eq!([abc[0], abc[1]], two);
        }
    }

    #[test]
    fn clarke_ignores_third_phase() {
        let two = clarke::<f64, _>([0.5, -1.25]);
        let three = clarke::<f64, _>([0.5, -1.25, 0.75]);
        assert_eq!(two, three);
    }

    #[test]
    fn park_reference_vector() {
        // alpha = 2.5, beta = -1.25, theta = 30 degrees
        let theta = core::f64::consts::PI / 6.0;
        let dq = park::<f64, SinPoly<7>>([2.5, -1.25], theta);
        assert!((dq[0] - 1.54006).abs() < 1e-3);
        assert!((dq[1] + 2.33253).abs() < 1e-3);
    }

    #[test]
    fn park_roundtrip() {
        for k in 0..32 {
            let theta = core::f64::consts::TAU * (k as f64) / 32.0;
            let v = [0.75, -1.5];
            let back = ipark::<f64, SinPoly<7>>(park::<f64, SinPoly<7>>(v, theta), theta);
            assert!((back[0] - v[0]).abs() < 1e-4);
            assert!((back[1] - v[1]).abs() < 1e-4);
        }
    }

    #[test]
    fn fixed_park_tracks_float() {
        for k in 0..16 {
            let theta = core::f64::consts::TAU * (k as f64) / 16.0;
            let df = park::<f64, SinPoly<5>>([1.5, -0.5], theta);
            let dx = park::<i32, SinPoly<5>>(
                [
                    fixedmath::Value::from_num(1.5),
                    fixedmath::Value::from_num(-0.5),
                ],
                fixedmath::Phase::from_num(theta),
            );
            let d: f64 = dx[0].to_num();
            let q: f64 = dx[1].to_num();
            assert!((d - df[0]).abs() < 1e-3);
            assert!((q - df[1]).abs() < 1e-3);
        }
    }
}
