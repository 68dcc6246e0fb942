//! The integer domain collaborator used by the presolve rules.
//!
//! A [`Domain`] is a finite (or sentinel-unbounded) set of integer values,
//! stored as a sorted list of inclusive ranges. The full range
//! `[i64::MIN, i64::MAX]` is the "unbounded" form; the endpoint sentinels
//! mean "no bound on this side" rather than attainable values.

use rangelist::{IntervalIterator, RangeList};

use crate::{IntSetVal, IntVal};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// The set of values an integer decision variable may still take.
pub struct Domain {
	/// The values of the domain as a sorted list of inclusive ranges.
	ranges: IntSetVal,
}

impl Domain {
	/// Create the unbounded domain.
	pub fn all() -> Self {
		Self {
			ranges: RangeList::from(IntVal::MIN..=IntVal::MAX),
		}
	}

	/// Create the Boolean domain `{0, 1}`.
	pub fn boolean() -> Self {
		Self::interval(0, 1)
	}

	/// Number of values in the domain.
	///
	/// Only meaningful for bounded domains; the unbounded form saturates.
	pub fn card(&self) -> usize {
		self.ranges
			.iter()
			.map(|r| (*r.end() as i128 - *r.start() as i128 + 1) as u128)
			.sum::<u128>()
			.try_into()
			.unwrap_or(usize::MAX)
	}

	/// Whether `value` is in the domain.
	pub fn contains(&self, value: IntVal) -> bool {
		self.ranges.contains(&value)
	}

	/// Create a domain from an unsorted list of values.
	pub fn from_values(values: &[IntVal]) -> Self {
		let mut values = values.to_vec();
		values.sort_unstable();
		values.dedup();
		Self {
			ranges: RangeList::from_iter(values.into_iter().map(|v| v..=v)),
		}
	}

	/// Whether the domain is fixed to exactly one value.
	pub fn has_one_value(&self) -> bool {
		!self.is_empty() && self.min() == self.max()
	}

	/// Create the domain holding all values in `lb..=ub`.
	pub fn interval(lb: IntVal, ub: IntVal) -> Self {
		Self {
			ranges: RangeList::from(lb..=ub),
		}
	}

	/// Intersect the domain with another domain. Returns whether the domain
	/// changed.
	pub fn intersect_with_domain(&mut self, other: &Domain) -> bool {
		let new = self.ranges.intersect(&other.ranges);
		let changed = new != self.ranges;
		self.ranges = new;
		changed
	}

	/// Intersect the domain with the interval `lb..=ub`. Returns whether the
	/// domain changed.
	pub fn intersect_with_interval(&mut self, lb: IntVal, ub: IntVal) -> bool {
		let mask = RangeList::from(lb..=ub);
		let new = self.ranges.intersect(&mask);
		let changed = new != self.ranges;
		self.ranges = new;
		changed
	}

	/// Intersect the domain with a list of values. Returns whether the
	/// domain changed.
	pub fn intersect_with_values(&mut self, values: &[IntVal]) -> bool {
		self.intersect_with_domain(&Domain::from_values(values))
	}

	/// Whether the domain is the unbounded sentinel form.
	pub fn is_all_int(&self) -> bool {
		self.min() == IntVal::MIN && self.max() == IntVal::MAX
	}

	/// Whether the domain is a single boolean-shaped interval `{0, 1}`.
	pub fn is_boolean(&self) -> bool {
		self.min() == 0 && self.max() == 1
	}

	/// Whether the domain is a single contiguous range of values.
	pub fn is_contiguous(&self) -> bool {
		self.ranges.iter().count() == 1
	}

	/// Whether the domain holds no value at all.
	pub fn is_empty(&self) -> bool {
		self.ranges.lower_bound().is_none()
	}

	/// Largest value in the domain.
	///
	/// An empty domain reports `min() > max()`, mirroring an empty interval.
	pub fn max(&self) -> IntVal {
		self.ranges.upper_bound().copied().unwrap_or(IntVal::MIN)
	}

	/// Smallest value in the domain.
	///
	/// An empty domain reports `min() > max()`, mirroring an empty interval.
	pub fn min(&self) -> IntVal {
		self.ranges.lower_bound().copied().unwrap_or(IntVal::MAX)
	}

	/// Remove a single value from the domain.
	///
	/// Returns whether the removal was performed. The unbounded sentinel
	/// form declines the removal (and reports false) rather than
	/// materialising two near-full ranges around the hole.
	pub fn remove_value(&mut self, value: IntVal) -> bool {
		if self.is_all_int() || !self.contains(value) {
			return false;
		}
		self.ranges = RangeList::from_iter(self.ranges.iter().flat_map(|r| {
			let (lb, ub) = (*r.start(), *r.end());
			if value < lb || value > ub {
				vec![lb..=ub]
			} else {
				let mut out = Vec::new();
				if lb < value {
					out.push(lb..=value - 1);
				}
				if value < ub {
					out.push(value + 1..=ub);
				}
				out
			}
		}));
		true
	}

	/// Translate every value in the domain by `delta`.
	pub fn shift(&mut self, delta: IntVal) {
		self.ranges = RangeList::from_iter(
			self.ranges
				.iter()
				.map(|r| r.start() + delta..=r.end() + delta),
		);
	}

	/// Create the domain fixed to exactly `value`.
	pub fn singleton(value: IntVal) -> Self {
		Self::interval(value, value)
	}

	/// The single value of a fixed domain.
	///
	/// Panics when the domain is not fixed; shape checks are the caller's
	/// responsibility.
	pub fn value(&self) -> IntVal {
		assert!(self.has_one_value(), "domain is not fixed to one value");
		self.min()
	}
}

impl Default for Domain {
	fn default() -> Self {
		Self::all()
	}
}

impl std::fmt::Display for Domain {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return write!(f, "{{}}");
		}
		if self.has_one_value() {
			return write!(f, "{}", self.value());
		}
		for (i, r) in self.ranges.iter().enumerate() {
			if i > 0 {
				write!(f, " union ")?;
			}
			write!(f, "{}..{}", r.start(), r.end())?;
		}
		Ok(())
	}
}
