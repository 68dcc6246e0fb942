//! Definition of integer decision variables as stored in a [`Model`].
//!
//! [`Model`]: crate::Model

use index_vec::define_index_type;

use crate::{domain::Domain, model::constraint::CtRef};

define_index_type! {
	/// Reference to an integer decision variable stored in a [`Model`].
	///
	/// [`Model`]: crate::Model
	pub struct VarRef = u32;
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An integer decision variable of the model.
///
/// Variables are created by the front-end before presolve starts and are
/// never deleted: when a variable is proven equal to another and substituted
/// away, it is only marked inactive.
pub struct Variable {
	/// Name of the variable, used for diagnostics only.
	pub name: String,
	/// The set of values the variable can still take.
	pub domain: Domain,
	/// Whether the variable is still part of the model.
	pub active: bool,
	/// Whether the variable was introduced by the front-end flattening
	/// rather than declared by the user.
	///
	/// Used as a tie break when two equal variables are merged: the
	/// user-declared variable is preferred as the survivor.
	pub temporary: bool,
	/// The one constraint that computes this variable's value, if any.
	///
	/// At most one constraint may claim a variable as its target, and the
	/// relation must never form a cycle.
	pub defining_constraint: Option<CtRef>,
}

impl Variable {
	/// Create a new variable with the given name and domain.
	pub(crate) fn new(name: String, domain: Domain, temporary: bool) -> Self {
		Self {
			name,
			domain,
			active: true,
			temporary,
			defining_constraint: None,
		}
	}
}
