//! Module that defines the main data structures of a constraint model as
//! consumed and rewritten by the presolve engine.

pub mod annotation;
pub mod argument;
pub mod constraint;
pub mod output;
pub mod variable;

use index_vec::IndexVec;
use itertools::Itertools;

use crate::{
	domain::Domain,
	model::{
		annotation::Annotation,
		argument::Argument,
		constraint::{Constraint, CtRef, FALSE_CONSTRAINT},
		output::SolutionOutput,
		variable::{VarRef, Variable},
	},
	IntVal,
};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A constraint model: variable and constraint arenas plus search
/// annotations and output descriptors.
///
/// All cross-references between entities are arena indices ([`VarRef`] and
/// [`CtRef`]), so rewriting or deactivating an entity can never leave a
/// dangling reference behind.
///
/// The iteration order of [`Model::constraints`] is the front-end's
/// declaration order. The order is semantically significant: the cleanup
/// pass recognises flattened constraint chains by scanning sequentially.
pub struct Model {
	/// The integer decision variables of the model.
	pub variables: IndexVec<VarRef, Variable>,
	/// The constraints of the model, in declaration order.
	pub constraints: IndexVec<CtRef, Constraint>,
	/// The search annotations of the model.
	pub search_annotations: Vec<Annotation>,
	/// The solution-output descriptors of the model.
	pub outputs: Vec<SolutionOutput>,
}

impl Model {
	/// Iterator over the references of all currently active constraints.
	pub fn active_constraints(&self) -> impl Iterator<Item = CtRef> + '_ {
		self.constraints
			.iter_enumerated()
			.filter(|(_, ct)| ct.active)
			.map(|(c, _)| c)
	}

	/// Add a new constraint to the model and return its reference.
	pub fn add_constraint(&mut self, ty: impl Into<String>, arguments: Vec<Argument>) -> CtRef {
		self.constraints.push(Constraint::new(ty.into(), arguments))
	}

	/// Add a new constraint that defines `target` and return its reference.
	pub fn add_constraint_with_target(
		&mut self,
		ty: impl Into<String>,
		arguments: Vec<Argument>,
		target: VarRef,
	) -> CtRef {
		let c = self.add_constraint(ty, arguments);
		self.set_target_variable(c, target);
		c
	}

	/// Add a search annotation to the model.
	pub fn add_search_annotation(&mut self, ann: Annotation) {
		self.search_annotations.push(ann);
	}

	/// Add a solution-output descriptor to the model.
	pub fn add_output(&mut self, output: SolutionOutput) {
		self.outputs.push(output);
	}

	/// Whether the argument denotes exactly one value: either a constant, or
	/// a variable whose domain has been fixed.
	pub fn arg_has_one_value(&self, arg: &Argument) -> bool {
		match arg {
			Argument::IntValue(_) => true,
			Argument::Var(var) => self.variables[*var].domain.has_one_value(),
			_ => false,
		}
	}

	/// The single value denoted by the argument, if there is one.
	pub fn arg_value(&self, arg: &Argument) -> Option<IntVal> {
		match arg {
			Argument::IntValue(value) => Some(*value),
			Argument::Var(var) => {
				let domain = &self.variables[*var].domain;
				domain.has_one_value().then(|| domain.value())
			}
			_ => None,
		}
	}

	/// Render a constraint in the `type(arg, ..)` surface syntax, used by
	/// diagnostics and tests.
	pub fn constraint_to_string(&self, c: CtRef) -> String {
		let ct = &self.constraints[c];
		let args = ct
			.arguments
			.iter()
			.map(|arg| self.render_argument(arg))
			.join(", ");
		let mut out = format!("{}({args})", ct.ty);
		if let Some(target) = ct.target_variable {
			out.push_str(&format!(" => {}", self.variables[target].name));
		}
		out
	}

	/// Deactivate a constraint, detaching its target-variable link first.
	pub fn mark_constraint_inactive(&mut self, c: CtRef) {
		self.remove_target_variable(c);
		self.constraints[c].active = false;
	}

	/// Create a new user-declared variable and return its reference.
	pub fn new_var(&mut self, name: impl Into<String>, domain: Domain) -> VarRef {
		self.variables
			.push(Variable::new(name.into(), domain, false))
	}

	/// Create a new front-end-introduced temporary variable and return its
	/// reference.
	pub fn new_temp_var(&mut self, domain: Domain) -> VarRef {
		let name = format!("X__{}", self.variables.len());
		self.variables.push(Variable::new(name, domain, true))
	}

	/// Detach the target-variable link of a constraint, clearing the
	/// variable's back-reference as well.
	pub fn remove_target_variable(&mut self, c: CtRef) {
		if let Some(target) = self.constraints[c].target_variable.take() {
			if self.variables[target].defining_constraint == Some(c) {
				self.variables[target].defining_constraint = None;
			}
		}
	}

	/// Render a single constraint argument.
	fn render_argument(&self, arg: &Argument) -> String {
		match arg {
			Argument::IntValue(value) => format!("{value}"),
			Argument::IntInterval(lb, ub) => format!("[{lb}..{ub}]"),
			Argument::IntList(values) => format!("[{}]", values.iter().join(", ")),
			Argument::Var(var) => self.variables[*var].name.clone(),
			Argument::VarArray(vars) => format!(
				"[{}]",
				vars.iter().map(|v| &self.variables[*v].name).join(", ")
			),
		}
	}

	/// Rewrite a constraint into the explicit unsatisfiable form.
	///
	/// The constraint stays active so the downstream solver sees the
	/// contradiction; presolve itself never declares global infeasibility.
	pub fn set_constraint_as_false(&mut self, c: CtRef) {
		self.remove_target_variable(c);
		let ct = &mut self.constraints[c];
		ct.ty = FALSE_CONSTRAINT.into();
		ct.arguments.clear();
	}

	/// Make a constraint the definer of `target`, maintaining the
	/// variable's back-reference (last writer wins).
	///
	/// The presolve rules only call this after checking that `target` has
	/// no definer yet; a front-end that produces conflicting claims is
	/// repaired by the cleanup pass.
	pub fn set_target_variable(&mut self, c: CtRef, target: VarRef) {
		self.constraints[c].target_variable = Some(target);
		self.variables[target].defining_constraint = Some(c);
	}
}

impl std::fmt::Display for Model {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for var in self.variables.iter().filter(|v| v.active) {
			writeln!(f, "var {}: {}", var.name, var.domain)?;
		}
		for c in self.active_constraints() {
			writeln!(f, "{}", self.constraint_to_string(c))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use expect_test::expect;

	use crate::{Argument, Domain, Model};

	#[test]
	fn test_build_and_render() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(-5, 5));
		let t = model.new_temp_var(Domain::boolean());
		let _ = model.add_constraint(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![1, -1]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(0),
			],
		);
		let c = model.add_constraint_with_target(
			"int_eq_reif",
			vec![
				Argument::Var(x),
				Argument::IntValue(3),
				Argument::Var(t),
			],
			t,
		);
		assert_eq!(model.variables[t].defining_constraint, Some(c));

		expect![[r#"
    var x: 0..10
    var y: -5..5
    var X__2: 0..1
    int_lin_eq([1, -1], [x, y], 0)
    int_eq_reif(x, 3, X__2) => X__2
"#]]
		.assert_eq(&model.to_string());
	}

	#[test]
	fn test_false_rewrite_and_deactivation() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 1));
		let c = model.add_constraint(
			"int_eq",
			vec![Argument::IntValue(1), Argument::IntValue(2)],
		);
		model.set_constraint_as_false(c);
		assert_eq!(model.constraints[c].ty, "false_constraint");
		assert!(model.constraints[c].arguments.is_empty());
		assert!(model.constraints[c].active);

		let d = model.add_constraint("int_ne", vec![Argument::Var(x), Argument::IntValue(0)]);
		model.mark_constraint_inactive(d);
		assert!(!model.constraints[d].active);
		assert_eq!(model.active_constraints().count(), 1);
	}

	#[test]
	fn test_arg_value() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::singleton(7));
		let y = model.new_var("y", Domain::interval(0, 2));
		assert_eq!(model.arg_value(&Argument::IntValue(3)), Some(3));
		assert_eq!(model.arg_value(&Argument::Var(x)), Some(7));
		assert_eq!(model.arg_value(&Argument::Var(y)), None);
		assert!(model.arg_has_one_value(&Argument::Var(x)));
		assert!(!model.arg_has_one_value(&Argument::VarArray(vec![x])));
	}
}
