//! Arbitrary precision decimal floating point numbers.
//!
//! A [`BigFloat`] is `mantissa * 10^exponent` with an arbitrary size integer
//! mantissa. Every value carries the number of significant decimal digits it
//! is rounded to, so the working precision travels with the data instead of
//! living in process-wide state. Binary operations round their result to the
//! larger precision of the two operands. A precision of `0` marks an exact
//! value (integer constants such as [`Zero::zero`] and [`One::one`]), which
//! never forces rounding on the other operand.

use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
    str::FromStr,
    sync::OnceLock,
};

use num::{bigint::Sign, BigInt, BigUint, Integer, Num, One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Precision used when two exact values are divided.
pub const DEFAULT_DIGITS: u32 = 50;

/// Extra digits kept while aligning operands of an addition, any operand
/// smaller than this many digits below the last significant digit of the
/// other one cannot change the rounded result.
const GUARD_DIGITS: i64 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseBigFloatError {
    #[error("empty string")]
    Empty,

    #[error("invalid digit in `{0}`")]
    InvalidDigit(String),

    #[error("invalid exponent in `{0}`")]
    InvalidExponent(String),

    #[error("only radix 10 is supported, got {0}")]
    Radix(u32),
}

/// The precision context of one computation, in decimal digits ("dps").
///
/// Constructing constants through a context is the only way machine numbers
/// enter the arbitrary precision world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Context {
    dps: u32,
}

impl Context {
    /// A context with `dps` significant decimal digits. A precision of zero
    /// is bumped to one digit.
    #[must_use]
    pub fn new(dps: u32) -> Self {
        Self { dps: dps.max(1) }
    }

    #[must_use]
    pub const fn dps(&self) -> u32 {
        self.dps
    }

    /// Exact conversion of a finite `f64`, rounded to the context precision.
    ///
    /// Returns [`None`] for NaN and infinities.
    #[must_use]
    pub fn from_f64(&self, value: f64) -> Option<BigFloat> {
        BigFloat::from_f64_exact(value).map(|x| x.with_digits(self.dps))
    }

    #[must_use]
    pub fn from_i64(&self, value: i64) -> BigFloat {
        BigFloat::from_parts(BigInt::from(value), 0, self.dps)
    }

    /// `10^exponent` at the context precision
    #[must_use]
    pub fn pow10(&self, exponent: i64) -> BigFloat {
        BigFloat::from_parts(BigInt::one(), exponent, self.dps)
    }

    /// Parse a decimal literal and round it to the context precision.
    ///
    /// # Errors
    /// If the literal is malformed, see [`ParseBigFloatError`].
    pub fn parse(&self, literal: &str) -> Result<BigFloat, ParseBigFloatError> {
        literal.parse::<BigFloat>().map(|x| x.with_digits(self.dps))
    }
}

#[derive(Clone, Debug)]
pub struct BigFloat {
    mantissa: BigInt,
    exponent: i64,
    digits: u32,
}

/// Powers of ten below this exponent are computed once and shared.
const POW10_CACHED: usize = 512;

static POW10: OnceLock<Vec<BigUint>> = OnceLock::new();

fn pow10_table() -> &'static [BigUint] {
    POW10.get_or_init(|| {
        std::iter::successors(Some(BigUint::one()), |p| Some(p * BigUint::from(10u8)))
            .take(POW10_CACHED)
            .collect()
    })
}

#[allow(clippy::cast_possible_truncation)]
fn pow10_uint(exponent: u64) -> BigUint {
    let exponent = exponent as usize;
    match pow10_table().get(exponent) {
        Some(p) => p.clone(),
        None => num::pow(BigUint::from(10u8), exponent),
    }
}

fn pow10_int(exponent: u64) -> BigInt {
    BigInt::from(pow10_uint(exponent))
}

/// Number of decimal digits of the magnitude, zero has no digits.
fn decimal_len(m: &BigInt) -> u64 {
    let mag = m.magnitude();
    if mag.is_zero() {
        return 0;
    }
    // 10^(len - 1) <= mag < 10^len, start from the estimate given by the bit
    // length and fix it up
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut len = ((mag.bits() - 1) as f64 * std::f64::consts::LOG10_2) as u64 + 1;
    if let Some(upper) = usize::try_from(len).ok().and_then(|i| pow10_table().get(i)) {
        // the estimate is never more than one digit short
        if *mag >= *upper {
            len += 1;
        }
        return len;
    }
    while len > 1 && *mag < pow10_uint(len - 1) {
        len -= 1;
    }
    while *mag >= pow10_uint(len) {
        len += 1;
    }
    len
}

const fn sign_rank(sign: Sign) -> i8 {
    match sign {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

/// Private
impl BigFloat {
    fn from_parts(mantissa: BigInt, exponent: i64, digits: u32) -> Self {
        let mut res = Self {
            mantissa,
            exponent,
            digits,
        };
        res.round();
        res
    }

    /// Round the mantissa half away from zero to `self.digits` digits.
    #[allow(clippy::cast_possible_wrap)]
    fn round(&mut self) {
        if self.mantissa.is_zero() {
            self.exponent = 0;
            return;
        }
        if self.digits == 0 {
            return;
        }
        let len = decimal_len(&self.mantissa);
        let digits = u64::from(self.digits);
        if len <= digits {
            return;
        }
        let shift = len - digits;
        let divisor = pow10_int(shift);
        let (mut q, r) = self.mantissa.div_rem(&divisor);
        let twice_r = r.magnitude() + r.magnitude();
        if twice_r >= *divisor.magnitude() {
            if self.mantissa.is_negative() {
                q -= BigInt::one();
            } else {
                q += BigInt::one();
            }
        }
        self.mantissa = q;
        self.exponent += shift as i64;
    }

    /// Decimal position of the leading digit, i.e. `floor(log10(|self|))`.
    #[allow(clippy::cast_possible_wrap)]
    fn magnitude_order(&self) -> i64 {
        debug_assert!(!self.mantissa.is_zero());
        self.exponent + decimal_len(&self.mantissa) as i64 - 1
    }

    fn from_f64_exact(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let (mantissa, exponent, sign) = num::Float::integer_decode(value);
        let mut m = BigInt::from(mantissa);
        let mut e10 = 0i64;
        if exponent >= 0 {
            m <<= exponent as usize;
        } else {
            // 2^-k = 5^k * 10^-k
            let k = u32::from(exponent.unsigned_abs());
            m *= num::pow(BigInt::from(5u8), k as usize);
            e10 = -i64::from(k);
        }
        if sign < 0 {
            m = -m;
        }
        Some(Self::from_parts(m, e10, 0))
    }

    /// Mantissas of both operands scaled to the smaller of the two exponents
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, i64) {
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => (self.mantissa.clone(), other.mantissa.clone(), self.exponent),
            Ordering::Greater => {
                let shift = (self.exponent - other.exponent).unsigned_abs();
                (
                    &self.mantissa * pow10_int(shift),
                    other.mantissa.clone(),
                    other.exponent,
                )
            }
            Ordering::Less => {
                let shift = (other.exponent - self.exponent).unsigned_abs();
                (
                    self.mantissa.clone(),
                    &other.mantissa * pow10_int(shift),
                    self.exponent,
                )
            }
        }
    }

    fn add_impl(&self, other: &Self) -> Self {
        let digits = self.digits.max(other.digits);
        if other.is_zero() {
            return self.clone().with_digits(digits);
        }
        if self.is_zero() {
            return other.clone().with_digits(digits);
        }
        if digits > 0 {
            let guard = i64::from(digits) + GUARD_DIGITS;
            let order_diff = self.magnitude_order() - other.magnitude_order();
            if order_diff > guard {
                return self.clone().with_digits(digits);
            }
            if -order_diff > guard {
                return other.clone().with_digits(digits);
            }
        }
        let (a, b, exponent) = self.aligned(other);
        Self::from_parts(a + b, exponent, digits)
    }

    fn mul_impl(&self, other: &Self) -> Self {
        Self::from_parts(
            &self.mantissa * &other.mantissa,
            self.exponent + other.exponent,
            self.digits.max(other.digits),
        )
    }

    fn div_impl(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "attempted to divide BigFloat by zero");
        let digits = match self.digits.max(other.digits) {
            0 => DEFAULT_DIGITS,
            d => d,
        };
        if self.is_zero() {
            return Self::from_parts(BigInt::zero(), 0, digits);
        }
        #[allow(clippy::cast_possible_wrap)]
        let shift = (i64::from(digits) + GUARD_DIGITS + decimal_len(&other.mantissa) as i64
            - decimal_len(&self.mantissa) as i64)
            .max(0);
        let numerator = &self.mantissa * pow10_int(shift.unsigned_abs());
        Self::from_parts(
            numerator / &other.mantissa,
            self.exponent - other.exponent - shift,
            digits,
        )
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let order = self.magnitude_order().cmp(&other.magnitude_order());
        if order != Ordering::Equal {
            return order;
        }
        let (a, b, _) = self.aligned(other);
        a.magnitude().cmp(b.magnitude())
    }

    fn cmp_exact(&self, other: &Self) -> Ordering {
        let (sa, sb) = (self.mantissa.sign(), other.mantissa.sign());
        if sa != sb {
            return sign_rank(sa).cmp(&sign_rank(sb));
        }
        match sa {
            Sign::NoSign => Ordering::Equal,
            Sign::Plus => self.cmp_magnitude(other),
            Sign::Minus => self.cmp_magnitude(other).reverse(),
        }
    }
}

/// Public
impl BigFloat {
    /// Significant decimal digits this value is rounded to, zero for exact
    /// values.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    #[must_use]
    pub const fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    #[must_use]
    pub const fn exponent(&self) -> i64 {
        self.exponent
    }

    /// Re-round to a new precision. Increasing the precision of a rounded
    /// value does not recover lost digits.
    #[must_use]
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self.round();
        self
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
            digits: self.digits,
        }
    }

    /// Round towards zero to an integer value
    #[must_use]
    pub fn trunc(&self) -> Self {
        if self.exponent >= 0 {
            return self.clone();
        }
        let divisor = pow10_int(self.exponent.unsigned_abs());
        Self::from_parts(&self.mantissa / divisor, 0, self.digits)
    }

    /// The nearest `f64`, saturating to infinity outside of its range.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.mantissa.is_zero() {
            return 0.0;
        }
        // the standard library parser is correctly rounded
        format!("{}e{}", self.mantissa, self.exponent)
            .parse::<f64>()
            .unwrap_or(f64::NAN)
    }
}

impl Zero for BigFloat {
    fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
            digits: 0,
        }
    }

    fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }
}

impl One for BigFloat {
    fn one() -> Self {
        Self {
            mantissa: BigInt::one(),
            exponent: 0,
            digits: 0,
        }
    }
}

impl Num for BigFloat {
    type FromStrRadixErr = ParseBigFloatError;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix != 10 {
            return Err(ParseBigFloatError::Radix(radix));
        }
        str.parse()
    }
}

impl FromStr for BigFloat {
    type Err = ParseBigFloatError;

    /// Parses `[+-]digits[.digits][(e|E)[+-]digits]` exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseBigFloatError::Empty);
        }
        let (number, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
            Some(idx) => {
                let exponent = s[idx + 1..]
                    .parse::<i64>()
                    .map_err(|_| ParseBigFloatError::InvalidExponent(s.to_owned()))?;
                (&s[..idx], exponent)
            }
            None => (s, 0),
        };
        let (negative, number) = match number.as_bytes().first() {
            Some(b'-') => (true, &number[1..]),
            Some(b'+') => (false, &number[1..]),
            _ => (false, number),
        };
        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
        let digits = format!("{int_part}{frac_part}");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigFloatError::InvalidDigit(s.to_owned()));
        }
        let mut mantissa = digits
            .parse::<BigInt>()
            .map_err(|_| ParseBigFloatError::InvalidDigit(s.to_owned()))?;
        if negative {
            mantissa = -mantissa;
        }
        #[allow(clippy::cast_possible_wrap)]
        let exponent = exponent - frac_part.len() as i64;
        Ok(Self::from_parts(mantissa, exponent, 0))
    }
}

impl Add for BigFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.add_impl(&rhs)
    }
}

impl AddAssign for BigFloat {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_impl(&rhs);
    }
}

impl Sub for BigFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.add_impl(&-rhs)
    }
}

impl SubAssign for BigFloat {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_impl(&-rhs);
    }
}

impl Mul for BigFloat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_impl(&rhs)
    }
}

impl MulAssign for BigFloat {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_impl(&rhs);
    }
}

impl Div for BigFloat {
    type Output = Self;

    /// # Panics
    /// When dividing by zero, there is no NaN to fall back on.
    fn div(self, rhs: Self) -> Self::Output {
        self.div_impl(&rhs)
    }
}

impl DivAssign for BigFloat {
    fn div_assign(&mut self, rhs: Self) {
        *self = self.div_impl(&rhs);
    }
}

impl Rem for BigFloat {
    type Output = Self;

    /// Remainder of truncated division, with the sign of `self`
    fn rem(self, rhs: Self) -> Self::Output {
        let quotient = self.div_impl(&rhs).trunc();
        self.add_impl(&-quotient.mul_impl(&rhs))
    }
}

impl RemAssign for BigFloat {
    fn rem_assign(&mut self, rhs: Self) {
        *self = self.clone() % rhs;
    }
}

impl Neg for BigFloat {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        self.mantissa = -self.mantissa;
        self
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_exact(other) == Ordering::Equal
    }
}

impl Eq for BigFloat {}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_exact(other)
    }
}

impl ToPrimitive for BigFloat {
    fn to_i64(&self) -> Option<i64> {
        self.trunc().to_f64().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.trunc().to_f64().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Self::to_f64(self))
    }
}

/// Scientific notation with every stored digit, e.g. `-1.25e-3`
impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mantissa.is_zero() {
            return write!(f, "0");
        }
        let digits = self.mantissa.magnitude().to_string();
        let digits = digits.trim_end_matches('0');
        let sign = if self.is_negative() { "-" } else { "" };
        let order = self.magnitude_order();
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            write!(f, "{sign}{head}e{order}")
        } else {
            write!(f, "{sign}{head}.{tail}e{order}")
        }
    }
}
