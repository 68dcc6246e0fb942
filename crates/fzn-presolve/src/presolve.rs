//! The presolve engine: per-run session state, the ordered rule table, the
//! dispatcher, and the fixpoint driver.

pub(crate) mod boolean;
pub(crate) mod cleanup;
pub(crate) mod compare;
pub(crate) mod element;
pub(crate) mod linear;
pub(crate) mod substitute;

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{
	model::{
		argument::Argument,
		constraint::CtRef,
		variable::VarRef,
	},
	IntVal, Model,
};

/// Signature shared by every rewrite rule.
///
/// A rule inspects (and possibly rewrites) one constraint; it returns true
/// iff it modified the model. The `log` parameter collects an optional
/// explanatory line for the diagnostics of [`Presolver::apply_rule`].
type RuleFn = fn(&mut Presolver, &mut Model, CtRef, &mut String) -> bool;

#[derive(Clone, Copy, Debug)]
/// A recorded affine remapping `index = coefficient * variable + offset`,
/// discovered on a two-term linear equality that defines `index`.
pub(crate) struct AffineMapping {
	/// The variable being remapped.
	pub(crate) variable: VarRef,
	/// The multiplicative coefficient of the mapping.
	pub(crate) coefficient: IntVal,
	/// The additive offset of the mapping.
	pub(crate) offset: IntVal,
	/// The linear constraint the mapping was extracted from.
	pub(crate) constraint: CtRef,
}

#[derive(Clone, Copy, Debug)]
/// A recorded flattened 2-D index shape
/// `index = coefficient * variable1 + variable2 + offset`, discovered on a
/// three-term linear equality that defines `index`.
pub(crate) struct Array2dIndexMapping {
	/// The variable scaled by the row width.
	pub(crate) variable1: VarRef,
	/// The row width.
	pub(crate) coefficient: IntVal,
	/// The variable used as the second index.
	pub(crate) variable2: VarRef,
	/// The additive offset of the mapping.
	pub(crate) offset: IntVal,
	/// The linear constraint the mapping was extracted from.
	pub(crate) constraint: CtRef,
}

#[derive(Clone, Copy, Debug)]
/// How a rule-table entry is matched against a constraint's type tag.
enum TypeMatch {
	/// Matches the type tag exactly.
	Exact(&'static str),
	/// Matches any type tag starting with the given prefix.
	Prefix(&'static str),
	/// Matches any type tag ending with the given suffix.
	Suffix(&'static str),
	/// Matches every constraint.
	Any,
}

/// One entry of the ordered rule table.
struct RuleEntry {
	/// The type-tag matcher deciding applicability.
	matches: TypeMatch,
	/// Name of the rule, used in diagnostics.
	name: &'static str,
	/// The rule itself.
	rule: RuleFn,
}

/// Shorthand for building a [`RuleEntry`].
const fn rule(matches: TypeMatch, name: &'static str, rule: RuleFn) -> RuleEntry {
	RuleEntry {
		matches,
		name,
		rule,
	}
}

/// The ordered rule table of the dispatcher.
///
/// The firing order is load bearing: the rule set is not proven confluent,
/// so the order below must not be changed without revisiting every rule.
/// Reification stripping runs first, the universal fixed-target detachment
/// runs last.
static RULE_TABLE: &[RuleEntry] = &[
	rule(TypeMatch::Suffix("_reif"), "unreify", Presolver::unreify),
	rule(
		TypeMatch::Exact("bool2int"),
		"presolve_bool2int",
		Presolver::presolve_bool2int,
	),
	rule(
		TypeMatch::Exact("int_le"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("int_lt"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("int_ge"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("int_gt"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("bool_le"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("bool_lt"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("bool_ge"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(
		TypeMatch::Exact("bool_gt"),
		"presolve_inequalities",
		Presolver::presolve_inequalities,
	),
	rule(TypeMatch::Exact("int_abs"), "store_abs", Presolver::store_abs),
	rule(
		TypeMatch::Exact("int_eq_reif"),
		"store_int_eq_reif",
		Presolver::store_int_eq_reif,
	),
	rule(
		TypeMatch::Exact("int_ne_reif"),
		"simplify_int_ne_reif",
		Presolver::simplify_int_ne_reif,
	),
	rule(
		TypeMatch::Exact("int_eq_reif"),
		"remove_abs_from_eq_ne",
		Presolver::remove_abs_from_eq_ne,
	),
	rule(
		TypeMatch::Exact("int_ne_reif"),
		"remove_abs_from_eq_ne",
		Presolver::remove_abs_from_eq_ne,
	),
	rule(
		TypeMatch::Exact("int_ne"),
		"remove_abs_from_eq_ne",
		Presolver::remove_abs_from_eq_ne,
	),
	rule(
		TypeMatch::Exact("int_le_reif"),
		"remove_abs_from_int_le_reif",
		Presolver::remove_abs_from_int_le_reif,
	),
	rule(
		TypeMatch::Exact("int_eq"),
		"presolve_int_eq",
		Presolver::presolve_int_eq,
	),
	rule(
		TypeMatch::Exact("bool_eq"),
		"presolve_int_eq",
		Presolver::presolve_int_eq,
	),
	rule(
		TypeMatch::Exact("int_ne"),
		"presolve_int_ne",
		Presolver::presolve_int_ne,
	),
	rule(
		TypeMatch::Exact("bool_not"),
		"presolve_int_ne",
		Presolver::presolve_int_ne,
	),
	rule(
		TypeMatch::Exact("set_in"),
		"presolve_set_in",
		Presolver::presolve_set_in,
	),
	rule(
		TypeMatch::Exact("array_bool_and"),
		"presolve_array_bool_and",
		Presolver::presolve_array_bool_and,
	),
	rule(
		TypeMatch::Exact("array_bool_or"),
		"presolve_array_bool_or",
		Presolver::presolve_array_bool_or,
	),
	rule(
		TypeMatch::Exact("bool_eq_reif"),
		"presolve_bool_eq_ne_reif",
		Presolver::presolve_bool_eq_ne_reif,
	),
	rule(
		TypeMatch::Exact("bool_ne_reif"),
		"presolve_bool_eq_ne_reif",
		Presolver::presolve_bool_eq_ne_reif,
	),
	rule(
		TypeMatch::Exact("bool_xor"),
		"presolve_bool_xor",
		Presolver::presolve_bool_xor,
	),
	rule(
		TypeMatch::Exact("bool_not"),
		"presolve_bool_not",
		Presolver::presolve_bool_not,
	),
	rule(
		TypeMatch::Exact("bool_clause"),
		"presolve_bool_clause",
		Presolver::presolve_bool_clause,
	),
	rule(
		TypeMatch::Exact("int_div"),
		"presolve_int_div",
		Presolver::presolve_int_div,
	),
	rule(
		TypeMatch::Exact("int_times"),
		"presolve_int_times",
		Presolver::presolve_int_times,
	),
	rule(
		TypeMatch::Exact("int_lin_gt"),
		"presolve_int_lin_gt",
		Presolver::presolve_int_lin_gt,
	),
	rule(
		TypeMatch::Exact("int_lin_lt"),
		"presolve_int_lin_lt",
		Presolver::presolve_int_lin_lt,
	),
	rule(
		TypeMatch::Prefix("int_lin_"),
		"presolve_linear",
		Presolver::presolve_linear,
	),
	rule(
		TypeMatch::Prefix("int_lin_"),
		"regroup_linear",
		Presolver::regroup_linear,
	),
	rule(
		TypeMatch::Prefix("int_lin_"),
		"simplify_unary_linear",
		Presolver::simplify_unary_linear,
	),
	rule(
		TypeMatch::Prefix("int_lin_"),
		"simplify_binary_linear",
		Presolver::simplify_binary_linear,
	),
	rule(
		TypeMatch::Exact("int_lin_eq"),
		"propagate_positive_linear",
		Presolver::propagate_positive_linear,
	),
	rule(
		TypeMatch::Exact("int_lin_le"),
		"propagate_positive_linear",
		Presolver::propagate_positive_linear,
	),
	rule(
		TypeMatch::Exact("int_lin_ge"),
		"propagate_positive_linear",
		Presolver::propagate_positive_linear,
	),
	rule(
		TypeMatch::Exact("int_lin_eq"),
		"create_linear_target",
		Presolver::create_linear_target,
	),
	rule(
		TypeMatch::Exact("int_lin_eq"),
		"store_mapping",
		Presolver::store_mapping,
	),
	rule(
		TypeMatch::Exact("int_lin_eq_reif"),
		"check_int_lin_reif_bounds",
		Presolver::check_int_lin_reif_bounds,
	),
	rule(
		TypeMatch::Exact("int_lin_eq_reif"),
		"simplify_int_lin_eq_reif",
		Presolver::simplify_int_lin_eq_reif,
	),
	rule(
		TypeMatch::Exact("array_int_element"),
		"presolve_simplify_element",
		Presolver::presolve_simplify_element,
	),
	rule(
		TypeMatch::Exact("array_int_element"),
		"presolve_array_int_element",
		Presolver::presolve_array_int_element,
	),
	rule(
		TypeMatch::Exact("array_var_int_element"),
		"presolve_simplify_expr_element",
		Presolver::presolve_simplify_expr_element,
	),
	rule(
		TypeMatch::Exact("int_eq_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_ne_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_le_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_lt_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_ge_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_gt_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_eq_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_ne_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_le_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_lt_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_ge_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("bool_gt_reif"),
		"propagate_reified_comparisons",
		Presolver::propagate_reified_comparisons,
	),
	rule(
		TypeMatch::Exact("int_mod"),
		"presolve_int_mod",
		Presolver::presolve_int_mod,
	),
	rule(
		TypeMatch::Any,
		"detach_fixed_target",
		Presolver::detach_fixed_target,
	),
];

#[derive(Debug, Default)]
/// One presolve session: the pattern maps and bookkeeping discovered while
/// rewriting a model towards its fixpoint.
///
/// All fields are scoped to a single [`Presolver::run`] invocation and are
/// reset at its start. Pattern-map entries are write-once per run (the first
/// discovery wins) and are not invalidated when a referenced variable is
/// later substituted away.
pub struct Presolver {
	/// Cached `x = |y|` pairs, keyed by the absolute-value variable.
	pub(crate) abs_map: BTreeMap<VarRef, VarRef>,
	/// Cached affine index remappings, keyed by the remapped index variable.
	pub(crate) affine_map: BTreeMap<VarRef, AffineMapping>,
	/// Cached flattened 2-D index shapes, keyed by the flattened index
	/// variable.
	pub(crate) array2d_index_map: BTreeMap<VarRef, Array2dIndexMapping>,
	/// Variables referenced by the model's search annotations.
	pub(crate) decision_variables: BTreeSet<VarRef>,
	/// Recorded `x - y + z = 0` difference shapes, keyed by each outer
	/// variable and storing (other outer variable, middle variable).
	pub(crate) difference_map: BTreeMap<VarRef, (VarRef, VarRef)>,
	/// Cached `int_eq_reif(x, y, b)` triples, stored symmetrically.
	pub(crate) int_eq_reif_map: BTreeMap<VarRef, BTreeMap<VarRef, VarRef>>,
	/// The union-find forest of pending variable substitutions: eliminated
	/// variable to (possibly non-root) survivor.
	pub(crate) var_representative_map: BTreeMap<VarRef, VarRef>,
	/// Inverse index from variables to the constraints referencing them.
	pub(crate) var_to_constraints: BTreeMap<VarRef, BTreeSet<CtRef>>,
}

impl Presolver {
	/// Wrap a rule invocation: apply it and emit diagnostics on a firing.
	fn apply_rule(&mut self, model: &mut Model, c: CtRef, name: &str, rule: RuleFn) -> bool {
		let before = model.constraint_to_string(c);
		let mut log = String::new();
		let modified = rule(self, model, c, &mut log);
		if modified {
			trace!("apply rule {name} on {before}");
			if !log.is_empty() {
				trace!("  - log: {log}");
			}
			if !model.constraints[c].active {
				trace!("  - constraint is now inactive");
			} else {
				let after = model.constraint_to_string(c);
				if after != before {
					trace!("  - constraint is modified to {after}");
				}
			}
		}
		modified
	}

	/// Build the inverse variable-to-constraints index from scratch.
	fn build_var_to_constraints(&mut self, model: &Model) {
		for (c, ct) in model.constraints.iter_enumerated() {
			for arg in &ct.arguments {
				for var in arg.vars() {
					let _ = self.var_to_constraints.entry(*var).or_default().insert(c);
				}
			}
		}
	}

	/// Read-only view of the variables referenced by search annotations.
	///
	/// Collected during the first-pass scan of [`Presolver::run`];
	/// informational only.
	pub fn decision_variables(&self) -> &BTreeSet<VarRef> {
		&self.decision_variables
	}

	/// Universal final rule: a constraint whose target variable has become
	/// fixed to a single value no longer needs to maintain it as a defined
	/// output, so the target link is detached.
	fn detach_fixed_target(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let Some(target) = model.constraints[c].target_variable else {
			return false;
		};
		if model.variables[target].domain.has_one_value() {
			log.push_str("detach fixed target variable");
			model.remove_target_variable(c);
			return true;
		}
		false
	}

	/// Scan the model once before the fixpoint loop: record difference
	/// shapes and collect the decision variables named by the search
	/// annotations.
	fn first_pass_scan(&mut self, model: &Model) {
		for (c, ct) in model.constraints.iter_enumerated() {
			if ct.active && ct.ty == "int_lin_eq" {
				self.store_difference(model, c);
			}
		}

		let mut vars = Vec::new();
		for ann in &model.search_annotations {
			ann.append_variables(&mut vars);
		}
		self.decision_variables.extend(vars);
	}

	/// One-shot pass merging duplicated equality/disequality reifications:
	/// two booleans computing the same `x == value` (or `x != value`) test
	/// are the same variable, so the duplicate is substituted away.
	fn merge_int_eq_ne(&mut self, model: &mut Model) {
		let mut eq_map: BTreeMap<(VarRef, IntVal), VarRef> = BTreeMap::new();
		let mut ne_map: BTreeMap<(VarRef, IntVal), VarRef> = BTreeMap::new();
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			let ct = &model.constraints[c];
			if !ct.active || !(ct.ty == "int_eq_reif" || ct.ty == "int_ne_reif") {
				continue;
			}
			if !ct.arguments[2].is_variable() {
				continue;
			}
			let pair = match (&ct.arguments[0], &ct.arguments[1]) {
				(Argument::Var(var), Argument::IntValue(value)) => Some((*var, *value)),
				(Argument::IntValue(value), Argument::Var(var)) => Some((*var, *value)),
				_ => None,
			};
			let Some((var, value)) = pair else { continue };
			let boolvar = ct.arguments[2].var();
			let map = if ct.ty == "int_eq_reif" {
				&mut eq_map
			} else {
				&mut ne_map
			};
			if let Some(&stored) = map.get(&(var, value)) {
				trace!(
					"merge duplicate reification {}",
					model.constraint_to_string(c)
				);
				model.mark_constraint_inactive(c);
				self.add_substitution(model, stored, boolvar);
			} else {
				trace!("store reification {}", model.constraint_to_string(c));
				let _ = map.insert((var, value), boolvar);
			}
		}
	}

	/// Dispatch every applicable rule of the table on one constraint, in
	/// table order. Returns whether any rule modified the model.
	fn presolve_one_constraint(&mut self, model: &mut Model, c: CtRef) -> bool {
		let mut changed = false;
		for entry in RULE_TABLE {
			let ct = &model.constraints[c];
			if !ct.active || !entry.matches.matches(&ct.ty) {
				continue;
			}
			changed |= self.apply_rule(model, c, entry.name, entry.rule);
		}
		changed
	}

	/// Clear all per-run session state.
	fn reset(&mut self) {
		self.abs_map.clear();
		self.affine_map.clear();
		self.array2d_index_map.clear();
		self.decision_variables.clear();
		self.difference_map.clear();
		self.int_eq_reif_map.clear();
		self.var_representative_map.clear();
		self.var_to_constraints.clear();
	}

	/// Run the presolve engine on `model` until no rule fires and no
	/// substitution is pending. Returns whether anything changed.
	///
	/// Calling `run` again on an already converged model returns false and
	/// leaves the model untouched.
	pub fn run(&mut self, model: &mut Model) -> bool {
		self.reset();
		self.build_var_to_constraints(model);

		self.first_pass_scan(model);

		let mut changed_since_start = false;
		self.merge_int_eq_ne(model);
		if !self.var_representative_map.is_empty() {
			changed_since_start = true;
			self.substitute_everywhere(model);
			self.var_representative_map.clear();
		}
		// The bool2int casts commonly enable downstream substitutions, so
		// they are presolved before everything else.
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			if model.constraints[c].active && model.constraints[c].ty == "bool2int" {
				changed_since_start |= self.apply_rule(
					model,
					c,
					"presolve_bool2int",
					Presolver::presolve_bool2int,
				);
			}
		}
		if !self.var_representative_map.is_empty() {
			self.substitute_everywhere(model);
			self.var_representative_map.clear();
		}

		// Fixpoint loop. A pending substitution invalidates variable
		// references held by not-yet-visited constraints, so the scan stops
		// and restarts after every substitution batch.
		loop {
			let mut changed = false;
			self.var_representative_map.clear();
			for i in 0..model.constraints.len() {
				let c = CtRef::from_usize(i);
				if model.constraints[c].active {
					changed |= self.presolve_one_constraint(model, c);
				}
				if !self.var_representative_map.is_empty() {
					break;
				}
			}
			if !self.var_representative_map.is_empty() {
				changed = true;
				self.substitute_everywhere(model);
				self.var_representative_map.clear();
			}
			changed_since_start |= changed;
			if !changed {
				break;
			}
		}
		changed_since_start
	}
}

impl TypeMatch {
	/// Whether the matcher applies to the given type tag.
	fn matches(&self, ty: &str) -> bool {
		match self {
			TypeMatch::Exact(tag) => ty == *tag,
			TypeMatch::Prefix(prefix) => ty.starts_with(prefix),
			TypeMatch::Suffix(suffix) => ty.ends_with(suffix),
			TypeMatch::Any => true,
		}
	}
}

/// Intersect a variable's domain with the set of values denoted by a
/// constant argument.
///
/// Panics on variable-shaped arguments; the callers only pass constant sets.
pub(crate) fn intersect_domain_with(model: &mut Model, var: VarRef, arg: &Argument) {
	let domain = &mut model.variables[var].domain;
	let _ = match arg {
		Argument::IntValue(value) => domain.intersect_with_interval(*value, *value),
		Argument::IntInterval(lb, ub) => domain.intersect_with_interval(*lb, *ub),
		Argument::IntList(values) => domain.intersect_with_values(values),
		_ => panic!("argument does not denote a constant set of values"),
	};
}

#[cfg(test)]
mod tests {
	use expect_test::expect;
	use tracing_test::traced_test;

	use crate::{Argument, Domain, Model, Presolver};

	#[test]
	#[traced_test]
	fn test_run_reaches_fixpoint_and_is_idempotent() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let _ = model.add_constraint("int_le", vec![Argument::Var(x), Argument::IntValue(5)]);
		let _ = model.add_constraint("int_eq", vec![Argument::Var(x), Argument::Var(y)]);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));

		let snapshot = model.clone();
		assert!(!presolver.run(&mut model));
		assert_eq!(model, snapshot);
	}

	#[test]
	fn test_bound_propagation_example() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let c = model.add_constraint("int_le", vec![Argument::Var(x), Argument::IntValue(5)]);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));
		assert_eq!(model.variables[x].domain.min(), 0);
		assert_eq!(model.variables[x].domain.max(), 5);
		assert!(!model.constraints[c].active);
	}

	#[test]
	fn test_bool2int_presolved_first() {
		let mut model = Model::default();
		let b = model.new_var("b", Domain::boolean());
		let x = model.new_temp_var(Domain::interval(0, 1));
		let _ = model.add_constraint("bool2int", vec![Argument::Var(b), Argument::Var(x)]);
		let _ = model.add_constraint("int_eq", vec![Argument::Var(x), Argument::IntValue(1)]);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));
		// The cast variable is substituted away; its uses now fix `b`.
		assert!(!model.variables[x].active);
		assert!(model.variables[b].domain.has_one_value());
		assert_eq!(model.variables[b].domain.value(), 1);
	}

	#[test]
	fn test_merge_duplicate_eq_reifications() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_temp_var(Domain::boolean());
		let _ = model.add_constraint(
			"int_eq_reif",
			vec![Argument::Var(x), Argument::IntValue(4), Argument::Var(b1)],
		);
		let c2 = model.add_constraint(
			"int_eq_reif",
			vec![Argument::Var(x), Argument::IntValue(4), Argument::Var(b2)],
		);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));
		assert!(!model.constraints[c2].active);
		assert!(!model.variables[b2].active);
		assert!(model.variables[b1].active);
	}

	#[test]
	fn test_constant_inequality_settles() {
		let mut model = Model::default();
		let sat = model.add_constraint(
			"int_le",
			vec![Argument::IntValue(2), Argument::IntValue(5)],
		);
		let unsat = model.add_constraint(
			"int_gt",
			vec![Argument::IntValue(2), Argument::IntValue(5)],
		);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));
		assert!(!model.constraints[sat].active);
		expect!["false_constraint()"].assert_eq(&model.constraint_to_string(unsat));
	}

	#[test]
	fn test_decision_variables_collected() {
		use crate::Annotation;

		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 3));
		let y = model.new_var("y", Domain::interval(0, 3));
		model.add_search_annotation(Annotation::Call {
			id: "int_search".into(),
			arguments: vec![
				Annotation::VarArray(vec![x, y]),
				Annotation::Atom("input_order".into()),
			],
		});

		let mut presolver = Presolver::default();
		let _ = presolver.run(&mut model);
		assert!(presolver.decision_variables().contains(&x));
		assert!(presolver.decision_variables().contains(&y));
	}
}
