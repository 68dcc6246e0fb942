//! # fzn-presolve
//!
//! A presolve engine for FlatZinc-style constraint models. The library takes
//! a parsed model (integer decision variables with finite domains,
//! constraints identified by their type tag, search annotations, and output
//! descriptors) and rewrites it in place into an equivalent but simpler,
//! more propagation-friendly model before a solver consumes it.
//!
//! The engine is built from four cooperating parts:
//!
//! - a catalog of rewrite rules, each a pure function of one constraint that
//!   tightens domains or rewrites the constraint's shape,
//! - a dispatcher that routes every active constraint to the rules
//!   registered for its type tag (exact, prefix, or suffix match) in a fixed
//!   priority order,
//! - a union-find substitution subsystem that merges variables proven equal
//!   and rewrites every reference to the eliminated variable, and
//! - a fixpoint driver that iterates rule dispatch and substitution until no
//!   rule fires, followed by a one-shot structural cleanup pass that repairs
//!   and regroups constraint chains.
//!
//! Construction of the input model from a FlatZinc file, and solving the
//! presolved model, are left to the caller. The [`Model`] type offers the
//! builder surface that a front-end (or a test) needs to materialise a
//! model.
//!
//! ```
//! use fzn_presolve::{Argument, Domain, Model, Presolver};
//!
//! let mut model = Model::default();
//! let x = model.new_var("x", Domain::interval(0, 10));
//! let _ = model.add_constraint(
//! 	"int_le",
//! 	vec![Argument::Var(x), Argument::IntValue(5)],
//! );
//!
//! let mut presolver = Presolver::default();
//! assert!(presolver.run(&mut model));
//! assert_eq!(model.variables[x].domain.max(), 5);
//! ```

pub mod domain;
pub(crate) mod helpers;
pub mod model;
pub mod presolve;

pub use domain::Domain;
pub use helpers::LinearBoundsOverflow;
pub use model::{
	annotation::Annotation, argument::Argument, constraint::Constraint, constraint::CtRef,
	output::SolutionOutput, variable::VarRef, variable::Variable, Model,
};
pub use presolve::Presolver;

/// Type alias for integer values used within the model.
pub type IntVal = i64;

/// Type alias for a set of integer values, stored as a sorted list of
/// inclusive ranges.
pub type IntSetVal = rangelist::RangeList<IntVal>;
