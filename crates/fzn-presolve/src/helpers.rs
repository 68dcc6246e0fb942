//! Overflow-aware arithmetic helpers used by the presolve rules.
//!
//! Domain bounds use `i64::MIN` and `i64::MAX` as sentinels meaning "no
//! bound". All arithmetic that combines bounds with coefficients must
//! saturate at the sentinels instead of wrapping, and rules that cannot
//! bound a computation soundly must decline to act.

use thiserror::Error;

use crate::{domain::Domain, IntVal};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("computing the bounds of the scalar product would overflow")]
/// Error returned by [`compute_linear_bounds`] when any term of the scalar
/// product cannot be bounded without overflowing the representable range.
///
/// The caller must leave the model unmodified; deciding the constraint is
/// deferred to the solver.
pub struct LinearBoundsOverflow;

/// Saturating addition over bound values.
///
/// Saturates at the `i64::MIN`/`i64::MAX` sentinels, so adding to an
/// unbounded value stays unbounded.
pub(crate) fn cap_add(a: IntVal, b: IntVal) -> IntVal {
	a.saturating_add(b)
}

/// Saturating subtraction over bound values.
pub(crate) fn cap_sub(a: IntVal, b: IntVal) -> IntVal {
	a.saturating_sub(b)
}

/// Saturating multiplication over bound values.
pub(crate) fn cap_prod(a: IntVal, b: IntVal) -> IntVal {
	a.saturating_mul(b)
}

/// Division of `a` by positive `b`, rounding towards positive infinity.
pub(crate) fn div_ceil(a: IntVal, b: IntVal) -> IntVal {
	debug_assert!(b > 0);
	if a >= 0 {
		(a + b - 1) / b
	} else {
		a / b
	}
}

/// Compute sound lower and upper bounds of the scalar product
/// `sum(coefficients[i] * variables[i])` from the variables' current domain
/// bounds.
///
/// Terms with a zero coefficient are skipped. A variable without a finite
/// bound, or any partial sum or product that saturates, makes the whole
/// computation unsound and yields [`LinearBoundsOverflow`].
pub(crate) fn compute_linear_bounds<'a>(
	coefficients: &[IntVal],
	domains: impl Iterator<Item = &'a Domain>,
) -> Result<(IntVal, IntVal), LinearBoundsOverflow> {
	let mut lb = 0;
	let mut ub = 0;
	for (coef, dom) in coefficients.iter().zip(domains) {
		if *coef == 0 {
			continue;
		}
		let vmin = dom.min();
		let vmax = dom.max();
		if vmin == IntVal::MIN || vmax == IntVal::MAX {
			return Err(LinearBoundsOverflow);
		}
		let min_delta = if *coef > 0 {
			cap_prod(vmin, *coef)
		} else {
			cap_prod(vmax, *coef)
		};
		let max_delta = if *coef > 0 {
			cap_prod(vmax, *coef)
		} else {
			cap_prod(vmin, *coef)
		};
		lb = cap_add(lb, min_delta);
		ub = cap_add(ub, max_delta);
		if lb == IntVal::MIN
			|| ub == IntVal::MAX
			|| min_delta == IntVal::MIN
			|| min_delta == IntVal::MAX
			|| max_delta == IntVal::MIN
			|| max_delta == IntVal::MAX
		{
			return Err(LinearBoundsOverflow);
		}
	}
	Ok((lb, ub))
}
