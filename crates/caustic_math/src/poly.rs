//! Real polynomials and real-root isolation on an interval.
//!
//! Roots are found by recursion on the derivative: the real roots of `p'`
//! split the interval into pieces on which `p` is monotonic, and each piece
//! with a sign change holds exactly one root, refined by bisection.

use crate::Interval;

/// Bisection steps are capped; 128 halvings exhaust `f64` resolution on any
/// finite interval.
const MAX_BISECTIONS: usize = 128;

/// A polynomial with real coefficients in ascending order of power.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients `c0 + c1 x + c2 x² + ...`.
    ///
    /// Trailing zero coefficients are dropped so the leading coefficient is
    /// always non-zero.
    pub fn new(coeffs: impl Into<Vec<f64>>) -> Self {
        let mut coeffs = coeffs.into();
        while coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// First derivative.
    pub fn derivative(&self) -> Self {
        let coeffs: Vec<f64> = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, &c)| c * power as f64)
            .collect();
        Self::new(coeffs)
    }

    /// All real roots strictly inside `range`, in ascending order.
    ///
    /// Constant polynomials (including the zero polynomial) have no isolated
    /// roots and yield an empty list. Roots of even multiplicity are reported
    /// only when the polynomial evaluates to exactly zero at the critical
    /// point.
    pub fn roots_in(&self, range: Interval) -> Vec<f64> {
        match self.coeffs.as_slice() {
            [] | [_] => Vec::new(),
            &[c0, c1] => {
                let root = -c0 / c1;
                if range.surrounds(root) {
                    vec![root]
                } else {
                    Vec::new()
                }
            }
            &[c0, c1, c2] => quadratic_roots(c2, c1, c0)
                .into_iter()
                .filter(|&root| range.surrounds(root))
                .collect(),
            _ => self.isolate_roots(range),
        }
    }

    fn isolate_roots(&self, range: Interval) -> Vec<f64> {
        let mut knots = vec![range.min];
        knots.extend(self.derivative().roots_in(range));
        knots.push(range.max);

        let mut roots = Vec::new();
        for pair in knots.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let (f_lo, f_hi) = (self.eval(lo), self.eval(hi));

            if f_lo == 0.0 {
                if range.surrounds(lo) && roots.last() != Some(&lo) {
                    roots.push(lo);
                }
                continue;
            }
            if f_lo.signum() != f_hi.signum() && f_hi != 0.0 {
                roots.push(self.bisect(lo, hi, f_lo));
            }
        }
        roots
    }

    /// Shrink a sign-changing bracket down to `f64` resolution.
    fn bisect(&self, mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
        for _ in 0..MAX_BISECTIONS {
            let mid = 0.5 * (lo + hi);
            if mid <= lo || mid >= hi {
                break;
            }
            let f_mid = self.eval(mid);
            if f_mid == 0.0 {
                return mid;
            }
            if (f_mid < 0.0) == (f_lo < 0.0) {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

/// Real roots of `a x² + b x + c` (with `a != 0`) in ascending order.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        return vec![-b / (2.0 * a)];
    }

    // Numerically stable form, avoids cancellation between -b and sqrt
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let (r1, r2) = (q / a, c / q);
    if r1 <= r2 {
        vec![r1, r2]
    } else {
        vec![r2, r1]
    }
}
