// internal utilities for dealing with Complex annoyances

use num::{complex::Complex64, Complex, One, Zero};

use crate::RealScalar;

/// formatting for Complex, because the implementation is not good enough for me
pub(crate) fn complex_fmt<T: std::fmt::Display + Zero + One + PartialEq>(c: &Complex<T>) -> String {
    let r = &c.re;
    let i = &c.im;
    if i.is_zero() {
        format!("{r}")
    } else if i.is_one() {
        format!("({r}+i)")
    } else {
        format!("({r}+i{i})")
    }
}

/// Project onto machine precision, component by component
pub(crate) fn c_to_f64<T: RealScalar>(c: &Complex<T>) -> Complex64 {
    Complex64::new(c.re.to_f64_lossy(), c.im.to_f64_lossy())
}
