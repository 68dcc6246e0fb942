//! Definition of solution-output descriptors attached to a [`Model`].
//!
//! [`Model`]: crate::Model

use crate::model::variable::VarRef;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A descriptor naming the variables whose values form part of the printed
/// solution.
///
/// Presolve only rewrites the variable references when variables are
/// substituted away; formatting the solution is the solver driver's job.
pub struct SolutionOutput {
	/// Name under which the value is reported.
	pub name: String,
	/// The scalar variable to report, if the output is a scalar.
	pub variable: Option<VarRef>,
	/// The flattened array of variables to report, if the output is an
	/// array.
	pub flat_variables: Vec<VarRef>,
}
