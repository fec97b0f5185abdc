//! Find all roots of real polynomials at once with the Durand-Kerner method,
//! in machine precision or in arbitrary decimal precision.
//!
//! ```
//! use durand_kerner::{DurandKerner, Poly};
//!
//! // x^2 - 1
//! let p = Poly::from_descending(&[1.0, 0.0, -1.0]);
//! let roots = DurandKerner::default().find_roots(&p).unwrap();
//! assert_eq!(roots.len(), 2);
//! ```
//!
//! The same algorithm runs in arbitrary precision by picking [`BigFloat`]
//! as the scalar type, the number of digits is part of the finder:
//!
//! ```
//! use durand_kerner::{BigFloat, Context, DurandKerner, Poly};
//!
//! let ctx = Context::new(60);
//! let p = Poly::<BigFloat>::from_f64_descending(&[1.0, 0.0, -2.0], &ctx).unwrap();
//! let roots = DurandKerner::<BigFloat>::new(ctx).find_roots(&p).unwrap();
//! let sqrt2 = roots.iter().map(|z| z.re.clone()).max().unwrap();
//! assert!(sqrt2.to_string().starts_with("1.41421356237309504880168872420969807856967187537694"));
//! ```
//!
//! The [`filter`] module applies the root finder to the transfer functions of
//! Gaussian FIR filters.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub use num;

mod scalar;
pub use scalar::RealScalar;

mod util;
pub use util::__testing;
pub use util::big_float::{self, BigFloat, Context, ParseBigFloatError};

mod poly;
pub use poly::{roots, Poly};
pub use roots::{DurandKerner, Solution};

mod precision;
pub use precision::{find_roots, Overrides, Precision, DEFAULT_DPS};

pub mod filter;
pub mod report;
