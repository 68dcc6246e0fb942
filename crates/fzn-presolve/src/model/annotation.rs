//! Definition of search annotations attached to a [`Model`].
//!
//! [`Model`]: crate::Model

use crate::{model::variable::VarRef, IntVal};

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(
	variant_size_differences,
	reason = "leaf variants are smaller than the nested variants"
)]
/// A node of a search-annotation tree.
///
/// Annotations are opaque search hints for the downstream solver; presolve
/// only rewrites the variable references they contain when variables are
/// substituted away.
pub enum Annotation {
	/// A bare identifier, e.g. `input_order`.
	Atom(String),
	/// A call with nested annotation arguments, e.g. `int_search(..)`.
	Call {
		/// Identifier of the called annotation.
		id: String,
		/// The annotation arguments of the call.
		arguments: Vec<Annotation>,
	},
	/// An integer literal.
	Int(IntVal),
	/// A list of nested annotations.
	List(Vec<Annotation>),
	/// A reference to a single variable.
	Var(VarRef),
	/// An array of variable references.
	VarArray(Vec<VarRef>),
}

impl Annotation {
	/// Append every variable referenced anywhere in the tree to `out`.
	///
	/// Traversal is iterative with an explicit stack, so arbitrarily nested
	/// annotation trees cannot exhaust the call stack.
	pub fn append_variables(&self, out: &mut Vec<VarRef>) {
		let mut stack = vec![self];
		while let Some(ann) = stack.pop() {
			match ann {
				Annotation::List(anns) | Annotation::Call { arguments: anns, .. } => {
					stack.extend(anns.iter());
				}
				Annotation::Var(var) => out.push(*var),
				Annotation::VarArray(vars) => out.extend_from_slice(vars),
				Annotation::Atom(_) | Annotation::Int(_) => {}
			}
		}
	}
}
