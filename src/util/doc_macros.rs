//! Macros for reducing doc comment boilerplate.

/// Default explanation for [`roots::Error::InvalidPolynomial`] errors.
macro_rules! errors_invalid_polynomial {
    () => {
        r"- `InvalidPolynomial`: the polynomial has no coefficients, or its leading coefficient is negligible (within the negligible threshold, or NaN).\n"
    };
}
pub(crate) use errors_invalid_polynomial;

/// Default explanation for [`roots::Error::DivisionByZero`] errors.
macro_rules! errors_division_by_zero {
    () => {
        r"- `DivisionByZero`: two root estimates coincided, or a correction was not finite. The estimates are not returned, as they are meaningless.\n"
    };
}
pub(crate) use errors_division_by_zero;

/// Documents the precision argument of top level functions
macro_rules! precision_digits {
    () => {
        r"`precision_digits` selects the arithmetic: [`None`] computes in machine precision, `Some(dps)` in arbitrary precision with `dps` significant decimal digits.\n\n"
    };
}
pub(crate) use precision_digits;
