//! Scalar root finding and real roots of cubic polynomials.
use crate::errors::{EosError, EosResult};
use std::f64::consts::PI;

/// Secant iteration for `f(x) = 0` started from `x0` and `x0 + dx`.
///
/// Converges if either `|f(x)| < tol` or the step size falls below `tol`
/// relative to `x`.
pub fn secant<F>(mut f: F, x0: f64, dx: f64, tol: f64, max_iter: usize) -> EosResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let (mut x_old, mut x) = (x0, x0 + dx);
    let mut f_old = f(x_old);
    for _ in 0..max_iter {
        let fx = f(x);
        if !fx.is_finite() || !f_old.is_finite() {
            return Err(EosError::IterationFailed(String::from("secant")));
        }
        if fx.abs() < tol {
            return Ok(x);
        }
        if fx == f_old {
            return Err(EosError::IterationFailed(String::from("secant")));
        }
        let step = fx * (x - x_old) / (fx - f_old);
        x_old = x;
        f_old = fx;
        x -= step;
        if !x.is_finite() {
            return Err(EosError::IterationFailed(String::from("secant")));
        }
        if step.abs() < tol * x.abs().max(1.0) {
            return Ok(x);
        }
    }
    Err(EosError::NotConverged(String::from("secant")))
}

/// Brent's method for a root of `f` bracketed by `[a, b]`.
pub fn brent<F>(mut f: F, a: f64, b: f64, tol: f64, max_iter: usize) -> EosResult<f64>
where
    F: FnMut(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));
    if !fa.is_finite() || !fb.is_finite() {
        return Err(EosError::IterationFailed(String::from("brent")));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(EosError::Error(format!(
            "brent: root is not bracketed by [{a}, {b}]"
        )));
    }

    let (mut c, mut fc) = (b, fb);
    let (mut d, mut e) = (b - a, b - a);
    for _ in 0..max_iter {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // inverse quadratic interpolation or secant step
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            // bisection
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol1 { d } else { tol1.copysign(xm) };
        fb = f(b);
        if !fb.is_finite() {
            return Err(EosError::IterationFailed(String::from("brent")));
        }
    }
    Err(EosError::NotConverged(String::from("brent")))
}

/// Real roots of $az^3+bz^2+cz+d=0$ in ascending order.
///
/// Degenerate leading coefficients fall back to the quadratic or linear case.
pub fn cubic_roots(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a == 0.0 {
        return quadratic_roots(b, c, d);
    }
    let (b, c, d) = (b / a, c / a, d / a);

    // depressed cubic t^3 + pt + q = 0 with z = t - b/3
    let shift = -b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b.powi(3) / 27.0 - b * c / 3.0 + d;
    let disc = 0.25 * q * q + p.powi(3) / 27.0;

    let mut roots = if p == 0.0 && q == 0.0 {
        vec![shift]
    } else if disc > 0.0 {
        let sqrt_disc = disc.sqrt();
        let u = (-0.5 * q + sqrt_disc).cbrt();
        let v = (-0.5 * q - sqrt_disc).cbrt();
        vec![u + v + shift]
    } else {
        let r = 2.0 * (-p / 3.0).sqrt();
        let arg = (1.5 * q / p * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let phi = arg.acos() / 3.0;
        (0..3)
            .map(|k| r * (phi - 2.0 * PI * k as f64 / 3.0).cos() + shift)
            .collect()
    };

    // polish with Newton steps on the monic polynomial
    for z in roots.iter_mut() {
        for _ in 0..2 {
            let f = ((*z + b) * *z + c) * *z + d;
            let df = (3.0 * *z + 2.0 * b) * *z + c;
            if df != 0.0 {
                *z -= f / df;
            }
        }
    }
    roots.sort_by(|x, y| x.total_cmp(y));
    roots
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a == 0.0 {
        return if b == 0.0 { vec![] } else { vec![-c / b] };
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return vec![];
    }
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let mut roots = if q == 0.0 {
        vec![0.0]
    } else {
        vec![q / a, c / q]
    };
    roots.sort_by(|x, y| x.total_cmp(y));
    roots
}
