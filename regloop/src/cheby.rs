//! Compile-time Chebyshev approximation builder.
//!
//! Coefficient tables for every polynomial in this crate are derived here at
//! compile time: a reference function is sampled at the Chebyshev nodes of
//! the target interval, expanded in the Chebyshev basis, and converted to
//! monomial coefficients so the runtime evaluators are plain Horner loops.
//! The const math kernel below reimplements the handful of f64 operations
//! that are not const-evaluable in core (the same trick the rest of the
//! crate uses for fixed-point lookup tables).

use crate::Float;

/// Coefficient storage size; supports approximation orders 2 through 8.
pub const MAX_COEFFS: usize = 9;

/// Reference functions the builder can sample at compile time
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RefFn {
    /// sin(x)
    Sin,
    /// cos(x)
    Cos,
    /// sqrt(x), x > 0
    Sqrt,
    /// log2(x), x in [0.5, 4]
    Log2,
    /// 2^x, |x| <= 1
    Exp2,
    /// sin(sqrt(u))/sqrt(u) — the odd-symmetric sine core in u = x^2
    SinCardSq,
}

const FRAC_1_LN2: f64 = 1.442_695_040_888_963_4;
const LN2: f64 = 0.693_147_180_559_945_3;
const PI: f64 = core::f64::consts::PI;

/// Taylor sine, converged to f64 precision for |x| <= 2*pi
pub const fn csin(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = x;
    let mut acc = x;
    let mut n = 1u64;
    while n < 24 {
        term = -term * x2 / ((2 * n * (2 * n + 1)) as f64);
        acc += term;
        n += 1;
    }
    acc
}

/// Taylor cosine, converged to f64 precision for |x| <= 2*pi
pub const fn ccos(x: f64) -> f64 {
    let x2 = x * x;
    let mut term = 1.0;
    let mut acc = 1.0;
    let mut n = 1u64;
    while n < 24 {
        term = -term * x2 / (((2 * n - 1) * 2 * n) as f64);
        acc += term;
        n += 1;
    }
    acc
}

/// Newton square root, x >= 0
pub const fn csqrt(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let mut y = if x > 1.0 { x } else { 1.0 };
    let mut i = 0;
    while i < 64 {
        y = 0.5 * (y + x / y);
        i += 1;
    }
    y
}

/// Base-2 logarithm via the atanh series, x in (0, 8]
pub const fn clog2(x: f64) -> f64 {
    let t = (x - 1.0) / (x + 1.0);
    let t2 = t * t;
    let mut term = t;
    let mut acc = t;
    let mut n = 1u64;
    while n < 64 {
        term *= t2;
        acc += term / ((2 * n + 1) as f64);
        n += 1;
    }
    2.0 * acc * FRAC_1_LN2
}

/// 2^x via the exponential series, |x| <= 2
pub const fn cexp2(x: f64) -> f64 {
    let y = x * LN2;
    let mut term = 1.0;
    let mut acc = 1.0;
    let mut n = 1u64;
    while n < 32 {
        term = term * y / (n as f64);
        acc += term;
        n += 1;
    }
    acc
}

/// sin(sqrt(u))/sqrt(u) with the removable singularity at u = 0 filled in
const fn csincardsq(u: f64) -> f64 {
    if u < 1e-12 {
        return 1.0 - u / 6.0 + u * u / 120.0;
    }
    let s = csqrt(u);
    csin(s) / s
}

const fn sample(f: RefFn, x: f64) -> f64 {
    match f {
        RefFn::Sin => csin(x),
        RefFn::Cos => ccos(x),
        RefFn::Sqrt => csqrt(x),
        RefFn::Log2 => clog2(x),
        RefFn::Exp2 => cexp2(x),
        RefFn::SinCardSq => csincardsq(x),
    }
}

/// Build the monomial coefficients of the order-`order` Chebyshev
/// interpolant of `f` on `[a, b]`.
///
/// The returned array holds `order + 1` coefficients, constant term first;
/// the remaining entries are zero.  Evaluate with [horner].
pub const fn monomial_coeffs(f: RefFn, a: f64, b: f64, order: usize) -> [f64; MAX_COEFFS] {
    assert!(order + 1 <= MAX_COEFFS);
    let m = order + 1;

    // Sample at the Chebyshev nodes of [a, b]
    let mut fx = [0.0; MAX_COEFFS];
    let mut k = 0;
    while k < m {
        let t = ccos(PI * (k as f64 + 0.5) / m as f64);
        fx[k] = sample(f, 0.5 * (b - a) * t + 0.5 * (a + b));
        k += 1;
    }

    // Chebyshev-basis coefficients via the discrete cosine sum
    let mut cheb = [0.0; MAX_COEFFS];
    let mut j = 0;
    while j < m {
        let mut s = 0.0;
        let mut k = 0;
        while k < m {
            s += fx[k] * ccos(PI * (j as f64) * (k as f64 + 0.5) / m as f64);
            k += 1;
        }
        cheb[j] = 2.0 * s / m as f64;
        j += 1;
    }
    cheb[0] *= 0.5;

    // Basis change T_j(t) -> monomials in t via the recurrence
    // T_{j+1} = 2 t T_j - T_{j-1}
    let mut mono_t = [0.0; MAX_COEFFS];
    let mut t_prev = [0.0; MAX_COEFFS];
    t_prev[0] = 1.0;
    mono_t[0] += cheb[0];
    if m > 1 {
        let mut t_cur = [0.0; MAX_COEFFS];
        t_cur[1] = 1.0;
        mono_t[1] += cheb[1];
        let mut j = 2;
        while j < m {
            let mut t_next = [0.0; MAX_COEFFS];
            let mut i = 0;
            while i < MAX_COEFFS {
                let shifted = if i == 0 { 0.0 } else { 2.0 * t_cur[i - 1] };
                t_next[i] = shifted - t_prev[i];
                i += 1;
            }
            i = 0;
            while i < MAX_COEFFS {
                mono_t[i] += cheb[j] * t_next[i];
                i += 1;
            }
            t_prev = t_cur;
            t_cur = t_next;
            j += 1;
        }
    }

    // Compose with the affine map t = s*x + o to get monomials in x
    let s = 2.0 / (b - a);
    let o = -(a + b) / (b - a);
    let mut res = [0.0; MAX_COEFFS];
    let mut j = m;
    while j > 0 {
        j -= 1;
        // res = res * (s*x + o) + mono_t[j]
        let mut tmp = [0.0; MAX_COEFFS];
        let mut i = MAX_COEFFS;
        while i > 0 {
            i -= 1;
            tmp[i] = o * res[i]
                + if i == 0 { 0.0 } else { s * res[i - 1] };
        }
        tmp[0] += mono_t[j];
        res = tmp;
    }
    res
}

/// Evaluate the first `terms` monomial coefficients at `x` by Horner's scheme
pub fn horner<T: Float>(coeffs: &[f64; MAX_COEFFS], terms: usize, x: T) -> T {
    let mut acc = T::from_f64(coeffs[terms - 1]);
    let mut i = terms - 1;
    while i > 0 {
        i -= 1;
        acc = acc * x + T::from_f64(coeffs[i]);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_kernel_correctness() {
        assert!((csin(1.0) - 1.0f64.sin()).abs() < 1e-12);
        assert!((ccos(2.5) - 2.5f64.cos()).abs() < 1e-12);
        assert!((csqrt(2.0) - 2.0f64.sqrt()).abs() < 1e-12);
        assert!((clog2(1.5) - 1.5f64.log2()).abs() < 1e-12);
        assert!((cexp2(0.75) - 0.75f64.exp2()).abs() < 1e-12);
    }

    #[test]
    fn sin_interpolant_order_5() {
        const C: [f64; MAX_COEFFS] =
            monomial_coeffs(RefFn::Sin, 0.0, core::f64::consts::FRAC_PI_2, 5);
        let steps = 500;
        let mut max_err = 0.0f64;
        for i in 0..=steps {
            let x = core::f64::consts::FRAC_PI_2 * (i as f64) / (steps as f64);
            let err = (horner(&C, 6, x) - x.sin()).abs();
            if err > max_err {
                max_err = err;
            }
        }
        assert!(max_err < 5e-5);
    }

    #[test]
    fn exp2_interpolant_order_5() {
        const C: [f64; MAX_COEFFS] = monomial_coeffs(RefFn::Exp2, 0.0, 1.0, 5);
        let steps = 500;
        for i in 0..=steps {
            let x = (i as f64) / (steps as f64);
            assert!((horner(&C, 6, x) - x.exp2()).abs() < 1e-4);
        }
    }

    #[test]
    fn sqrt_interpolant_order_5() {
        const C: [f64; MAX_COEFFS] = monomial_coeffs(RefFn::Sqrt, 1.0, 4.0, 5);
        let steps = 500;
        for i in 0..=steps {
            let x = 1.0 + 3.0 * (i as f64) / (steps as f64);
            assert!((horner(&C, 6, x) - x.sqrt()).abs() < 5e-3);
        }
    }
}
