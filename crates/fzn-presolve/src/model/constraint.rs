//! Definition of constraints as stored in a [`Model`].
//!
//! [`Model`]: crate::Model

use index_vec::define_index_type;

use crate::{model::argument::Argument, model::variable::VarRef};

/// Type tag used when a constraint has been proven unsatisfiable.
pub const FALSE_CONSTRAINT: &str = "false_constraint";

define_index_type! {
	/// Reference to a constraint stored in a [`Model`].
	///
	/// [`Model`]: crate::Model
	pub struct CtRef = u32;
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A constraint of the model: a type tag plus an ordered argument list.
///
/// Presolve rewrites constraints in place (changing the tag and arguments)
/// and flips the `active` flag; constraints are never created or deleted
/// after model construction.
pub struct Constraint {
	/// Type tag identifying the constraint, e.g. `int_lin_eq` or
	/// `array_bool_or`.
	pub ty: String,
	/// The ordered argument list.
	pub arguments: Vec<Argument>,
	/// Whether the constraint is still part of the model.
	pub active: bool,
	/// The variable this constraint defines, if any.
	pub target_variable: Option<VarRef>,
	/// Opaque hint from the front-end that the constraint should be
	/// propagated strongly.
	pub strong_propagation: bool,
	/// Marker preventing one-shot domain-tightening rules from reapplying
	/// their propagation on every pass.
	pub presolve_propagation_done: bool,
}

impl Constraint {
	/// Whether the constraint's type tag carries the `_reif` suffix.
	pub fn is_reified(&self) -> bool {
		self.ty.ends_with("_reif")
	}

	/// Create a new active constraint with the given tag and arguments.
	pub(crate) fn new(ty: String, arguments: Vec<Argument>) -> Self {
		Self {
			ty,
			arguments,
			active: true,
			target_variable: None,
			strong_propagation: false,
			presolve_propagation_done: false,
		}
	}

	/// Remove the argument at `index`, shifting later arguments down.
	pub(crate) fn remove_arg(&mut self, index: usize) {
		let _ = self.arguments.remove(index);
	}
}
