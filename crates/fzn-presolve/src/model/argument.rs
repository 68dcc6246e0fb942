//! Definition of constraint arguments.

use crate::{model::variable::VarRef, IntVal};

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(
	variant_size_differences,
	reason = "scalar variants are smaller than the list variants"
)]
/// A single argument of a [`Constraint`].
///
/// The argument shape determines which presolve rules are applicable, e.g.
/// whether an operand is a fixed value or a variable.
///
/// [`Constraint`]: crate::Constraint
pub enum Argument {
	/// A single integer constant.
	IntValue(IntVal),
	/// An inclusive interval of integer constants.
	IntInterval(IntVal, IntVal),
	/// A list of integer constants.
	IntList(Vec<IntVal>),
	/// A reference to a single variable.
	Var(VarRef),
	/// An array of variable references.
	VarArray(Vec<VarRef>),
}

impl Argument {
	/// The constant values of an [`Argument::IntList`].
	///
	/// Panics on any other shape; argument shapes are guaranteed by the
	/// model construction step.
	pub fn int_list(&self) -> &[IntVal] {
		match self {
			Argument::IntList(values) => values,
			_ => panic!("argument is not a list of integer values"),
		}
	}

	/// Whether the argument is a single variable reference.
	pub fn is_variable(&self) -> bool {
		matches!(self, Argument::Var(_))
	}

	/// The constant payload of an [`Argument::IntValue`], if that is the
	/// argument's shape.
	pub fn literal_value(&self) -> Option<IntVal> {
		match self {
			Argument::IntValue(value) => Some(*value),
			_ => None,
		}
	}

	/// The variable of an [`Argument::Var`].
	///
	/// Panics on any other shape; argument shapes are guaranteed by the
	/// model construction step.
	pub fn var(&self) -> VarRef {
		match self {
			Argument::Var(var) => *var,
			_ => panic!("argument is not a variable reference"),
		}
	}

	/// The variable of an [`Argument::Var`], or the first variable of a
	/// non-empty [`Argument::VarArray`].
	pub fn var_ref(&self) -> Option<VarRef> {
		match self {
			Argument::Var(var) => Some(*var),
			Argument::VarArray(vars) => vars.first().copied(),
			_ => None,
		}
	}

	/// The variables referenced by the argument, empty for constant shapes.
	pub fn vars(&self) -> &[VarRef] {
		match self {
			Argument::Var(var) => std::slice::from_ref(var),
			Argument::VarArray(vars) => vars,
			_ => &[],
		}
	}
}
