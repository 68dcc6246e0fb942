//! Rewrite rules for the linear (scalar product) constraints, and the
//! pattern-map recorders that mine linear equalities for difference, affine
//! and flattened 2-D index shapes.

use itertools::Itertools;
use tracing::debug;

use crate::{
	helpers::{compute_linear_bounds, div_ceil},
	model::{argument::Argument, constraint::CtRef},
	presolve::{AffineMapping, Array2dIndexMapping, Presolver},
	IntVal, Model,
};

/// The mirror image of a linear comparison type tag, used when the
/// coefficients of the constraint are sign-flipped.
fn mirror_linear_type(ty: &str) -> Option<&'static str> {
	match ty {
		"int_lin_le" => Some("int_lin_ge"),
		"int_lin_lt" => Some("int_lin_gt"),
		"int_lin_ge" => Some("int_lin_le"),
		"int_lin_gt" => Some("int_lin_lt"),
		"int_lin_le_reif" => Some("int_lin_ge_reif"),
		"int_lin_ge_reif" => Some("int_lin_le_reif"),
		_ => None,
	}
}

impl Presolver {
	/// Checks the bounds of `int_lin_eq_reif([c1, .., cn], [x1, .., xn],
	/// c0, b)` against the boolean: when `c0` lies strictly outside the
	/// sound bounds of the scalar product the boolean is forced to 0, and
	/// when the bounds pin the product to exactly `c0` it is forced to 1.
	///
	/// When computing the bounds would overflow, the rule aborts without
	/// modifying anything; deciding the constraint is left to the solver.
	pub(crate) fn check_int_lin_reif_bounds(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		debug_assert_eq!(model.constraints[c].ty, "int_lin_eq_reif");
		let (coefficients, vars, rhs) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
				ct.arguments[2].literal_value(),
			)
		};
		let bounds = compute_linear_bounds(
			&coefficients,
			vars.iter().map(|v| &model.variables[*v].domain),
		);
		let Ok((lb, ub)) = bounds else {
			log.push_str("overflow found when computing bounds, skipping");
			return false;
		};
		let Some(value) = rhs else {
			unreachable!("linear constraint without a constant bound")
		};
		let boolvar = model.constraints[c].arguments[3].var();
		if value < lb || value > ub {
			log.push_str("assign reification boolean to false");
			let _ = model.variables[boolvar].domain.intersect_with_interval(0, 0);
			model.mark_constraint_inactive(c);
			return true;
		} else if value == lb && value == ub {
			log.push_str("assign reification boolean to true");
			let _ = model.variables[boolvar].domain.intersect_with_interval(1, 1);
			model.mark_constraint_inactive(c);
			return true;
		}
		false
	}

	/// Marks the target of a two-term linear equality `-x + c2 * y = c0`
	/// (either term order): `x` is the variable defined by the constraint,
	/// provided the constraint has no target yet and `x` has no other
	/// definer and is not already fixed.
	pub(crate) fn create_linear_target(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		if model.constraints[c].target_variable.is_some() {
			return false;
		}
		let (coefficients, vars) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
			)
		};
		if coefficients.len() != 2 || vars.len() != 2 {
			return false;
		}
		for var_index in [0usize, 1] {
			let var = vars[var_index];
			if coefficients[var_index] == -1
				&& model.variables[var].defining_constraint.is_none()
				&& !model.variables[var].domain.has_one_value()
			{
				log.push_str(&format!("mark variable index {var_index} as target"));
				model.set_target_variable(c, var);
				return true;
			}
		}
		false
	}

	/// Rewrites `int_lin_gt(arg1, arg2, c)` into
	/// `int_lin_ge(arg1, arg2, c + 1)`, declining on the sentinel bound.
	pub(crate) fn presolve_int_lin_gt(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let ct = &mut model.constraints[c];
		let Argument::IntValue(rhs) = ct.arguments[2] else {
			unreachable!("linear constraint without a constant bound")
		};
		if rhs != IntVal::MAX {
			log.push_str("tighten into non-strict comparison");
			ct.arguments[2] = Argument::IntValue(rhs + 1);
			ct.ty = "int_lin_ge".into();
			return true;
		}
		false
	}

	/// Rewrites `int_lin_lt(arg1, arg2, c)` into
	/// `int_lin_le(arg1, arg2, c - 1)`, declining on the sentinel bound.
	pub(crate) fn presolve_int_lin_lt(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let ct = &mut model.constraints[c];
		let Argument::IntValue(rhs) = ct.arguments[2] else {
			unreachable!("linear constraint without a constant bound")
		};
		if rhs != IntVal::MIN {
			log.push_str("tighten into non-strict comparison");
			ct.arguments[2] = Argument::IntValue(rhs - 1);
			ct.ty = "int_lin_le".into();
			return true;
		}
		false
	}

	/// Normalises a linear constraint.
	///
	/// Rule 1: an all-constant argument list is evaluated directly: the
	/// scalar product settles the constraint to satisfied or unsatisfiable,
	/// and for reified variants assigns the boolean via a `bool_eq`
	/// rewrite.
	///
	/// Rule 2: all-negative coefficients are sign-flipped (coefficients and
	/// bound negated, comparison mirrored), unless flipping would disturb
	/// an existing target-variable assignment.
	pub(crate) fn presolve_linear(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let (coefficients, constant_terms) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().is_empty(),
			)
		};
		if coefficients.is_empty() {
			return false;
		}
		if constant_terms {
			// Rule 1.
			log.push_str("evaluate constant linear constraint");
			let (ty, scalprod, rhs) = {
				let ct = &model.constraints[c];
				let values = ct.arguments[1].int_list();
				let scalprod: IntVal = coefficients
					.iter()
					.zip_eq(values)
					.map(|(coef, value)| coef * value)
					.sum();
				let Argument::IntValue(rhs) = ct.arguments[2] else {
					unreachable!("linear constraint without a constant bound")
				};
				(ct.ty.clone(), scalprod, rhs)
			};
			let satisfied = match ty.as_str() {
				"int_lin_eq" | "int_lin_eq_reif" => scalprod == rhs,
				"int_lin_le" | "int_lin_le_reif" => scalprod <= rhs,
				"int_lin_ge" | "int_lin_ge_reif" => scalprod >= rhs,
				"int_lin_ne" | "int_lin_ne_reif" => scalprod != rhs,
				_ => return false,
			};
			if ty.ends_with("_reif") {
				let target = model.constraints[c].arguments[3].clone();
				let ct = &mut model.constraints[c];
				ct.arguments = vec![target, Argument::IntValue(IntVal::from(satisfied))];
				ct.ty = "bool_eq".into();
			} else if satisfied {
				model.mark_constraint_inactive(c);
			} else {
				model.set_constraint_as_false(c);
			}
			return true;
		}

		// Rule 2.
		if coefficients.iter().any(|&coef| coef > 0)
			|| coefficients.iter().all(|&coef| coef == 0)
		{
			return false;
		}
		if let Some(target) = model.constraints[c].target_variable {
			if model.constraints[c].arguments[1].vars().contains(&target) {
				return false;
			}
		}
		log.push_str("flip signs of negative constraint");
		let ct = &mut model.constraints[c];
		let flipped = coefficients.iter().map(|coef| -coef).collect();
		ct.arguments[0] = Argument::IntList(flipped);
		let Argument::IntValue(rhs) = ct.arguments[2] else {
			unreachable!("linear constraint without a constant bound")
		};
		ct.arguments[2] = Argument::IntValue(-rhs);
		if let Some(mirrored) = mirror_linear_type(&ct.ty) {
			ct.ty = mirrored.into();
		}
		true
	}

	/// Bound propagation over a linear constraint whose coefficients and
	/// variable domains are all non-negative.
	///
	/// Rule 1: for eq/le, every variable is capped at `c0 / ci`.
	///
	/// Rule 2: a single-term ge raises the variable's lower bound to
	/// `ceil(c0 / c1)` and deactivates.
	pub(crate) fn propagate_positive_linear(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (ty, coefficients, vars, rhs, done) = {
			let ct = &model.constraints[c];
			let Argument::IntValue(rhs) = ct.arguments[2] else {
				unreachable!("linear constraint without a constant bound")
			};
			(
				ct.ty.clone(),
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
				rhs,
				ct.presolve_propagation_done,
			)
		};
		if done || rhs < 0 || vars.is_empty() {
			return false;
		}
		if coefficients.iter().any(|&coef| coef < 0) {
			return false;
		}
		if vars.iter().any(|v| model.variables[*v].domain.min() < 0) {
			return false;
		}
		let mut modified = false;
		if ty != "int_lin_ge" {
			// Rule 1.
			log.push_str("propagate upper bounds");
			for (coef, var) in coefficients.iter().zip_eq(&vars) {
				if *coef > 0 {
					let bound = rhs / coef;
					if bound < model.variables[*var].domain.max() {
						log.push_str(&format!(
							", intersect {} with [0..{bound}]",
							model.variables[*var].name
						));
						let _ = model.variables[*var]
							.domain
							.intersect_with_interval(0, bound);
						modified = true;
					}
				}
			}
		} else if coefficients.len() == 1 && coefficients[0] > 0 {
			// Rule 2.
			let bound = div_ceil(rhs, coefficients[0]);
			if bound > model.variables[vars[0]].domain.min() {
				log.push_str(&format!(
					"raise lower bound of {} to {bound}",
					model.variables[vars[0]].name
				));
				let _ = model.variables[vars[0]]
					.domain
					.intersect_with_interval(bound, IntVal::MAX);
				model.mark_constraint_inactive(c);
				modified = true;
			}
		}
		model.constraints[c].presolve_propagation_done = true;
		modified
	}

	/// Coalesces repeated variables of a linear constraint: duplicate terms
	/// have their coefficients summed, and terms whose summed coefficient
	/// is zero are dropped.
	pub(crate) fn regroup_linear(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		use std::collections::{BTreeMap, BTreeSet};

		let (coefficients, vars) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
			)
		};
		if vars.is_empty() {
			return false;
		}
		let mut summed: BTreeMap<_, IntVal> = BTreeMap::new();
		for (coef, var) in coefficients.iter().zip_eq(&vars) {
			*summed.entry(*var).or_insert(0) += coef;
		}
		if summed.len() == vars.len() {
			return false;
		}
		log.push_str("coalesce repeated linear terms");
		let mut processed = BTreeSet::new();
		let mut new_coefficients = Vec::new();
		let mut new_vars = Vec::new();
		for var in &vars {
			if processed.insert(*var) {
				let coef = summed[var];
				if coef != 0 {
					new_coefficients.push(coef);
					new_vars.push(*var);
				}
			}
		}
		let ct = &mut model.constraints[c];
		ct.arguments[0] = Argument::IntList(new_coefficients);
		ct.arguments[1] = Argument::VarArray(new_vars);
		true
	}

	/// Rewrites a two-term linear equality `x1 - x2 = 0` (or its mirrored
	/// coefficient order) into the plain binary constraint, dropping the
	/// `_lin` infix; reified variants keep their boolean.
	pub(crate) fn simplify_binary_linear(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (coefficients, vars, rhs) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
				ct.arguments[2].literal_value(),
			)
		};
		if coefficients.len() != 2 || rhs != Some(0) || vars.is_empty() {
			return false;
		}
		let (first, second) = if coefficients == [1, -1] {
			(vars[0], vars[1])
		} else if coefficients == [-1, 1] {
			(vars[1], vars[0])
		} else {
			return false;
		};
		log.push_str("remove linear part");
		let ct = &mut model.constraints[c];
		ct.arguments[0] = Argument::Var(first);
		ct.arguments[1] = Argument::Var(second);
		ct.remove_arg(2);
		ct.ty = ct.ty.replacen("_lin", "", 1);
		true
	}

	/// Rewrites `b0 = (b1 + b2 == 1)` shapes of `int_lin_eq_reif` into
	/// boolean constraints.
	///
	/// Two 0/1 operands become `bool_ne_reif(b1, b2, b0)`; one fixed 0/1
	/// operand reduces to `bool_eq` or `bool_not` between the remaining
	/// operand and `b0`.
	pub(crate) fn simplify_int_lin_eq_reif(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (coefficients, vars, rhs) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
				ct.arguments[2].literal_value(),
			)
		};
		if coefficients != [1, 1] || rhs != Some(1) || vars.len() != 2 {
			return false;
		}
		let target = model.constraints[c].arguments[3].var();
		let (left, right) = (vars[0], vars[1]);
		let left_boolean = model.variables[left].domain.is_boolean();
		let right_boolean = model.variables[right].domain.is_boolean();
		if left_boolean && right_boolean {
			// Both operands undetermined booleans.
			log.push_str("rewrite as bool_ne_reif");
			let ct = &mut model.constraints[c];
			ct.arguments = vec![
				Argument::Var(left),
				Argument::Var(right),
				Argument::Var(target),
			];
			ct.ty = "bool_ne_reif".into();
			return true;
		}
		for (fixed, other, other_boolean) in
			[(left, right, right_boolean), (right, left, left_boolean)]
		{
			let domain = &model.variables[fixed].domain;
			if other_boolean && domain.has_one_value() && (0..=1).contains(&domain.value()) {
				let value = domain.value();
				log.push_str(if value == 0 {
					"rewrite as bool_eq"
				} else {
					"rewrite as bool_not"
				});
				let ct = &mut model.constraints[c];
				ct.arguments = vec![Argument::Var(other), Argument::Var(target)];
				ct.ty = if value == 0 { "bool_eq" } else { "bool_not" }.into();
				return true;
			}
		}
		false
	}

	/// Rewrites a one-term linear constraint `c1 * x = c2` into the plain
	/// comparison `int_xx(x, c2 / c1)` when the reduction is exact,
	/// dropping the `_lin` infix; reified variants keep their boolean.
	pub(crate) fn simplify_unary_linear(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (coefficients, vars, rhs) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].int_list().to_vec(),
				ct.arguments[1].vars().to_vec(),
				ct.arguments[2].literal_value(),
			)
		};
		if coefficients.len() != 1 || vars.len() != 1 {
			return false;
		}
		let coefficient = coefficients[0];
		let Some(rhs) = rhs else { return false };
		if coefficient == 1 || (coefficient > 0 && rhs % coefficient == 0) {
			log.push_str("remove linear part");
			let ct = &mut model.constraints[c];
			ct.arguments[0] = Argument::Var(vars[0]);
			ct.arguments[1] = Argument::IntValue(rhs / coefficient);
			ct.remove_arg(2);
			ct.ty = ct.ty.replacen("_lin", "", 1);
			return true;
		}
		false
	}

	/// Records the difference shape of `x - y + z = 0` (or its negation):
	/// each outer variable maps to (other outer variable, middle variable),
	/// enabling the null-difference rewrite of the equality rule.
	pub(crate) fn store_difference(&mut self, model: &Model, c: CtRef) {
		let ct = &model.constraints[c];
		if ct.arguments[2].literal_value() != Some(0) {
			return;
		}
		let coefficients = ct.arguments[0].int_list();
		if coefficients.len() != 3 {
			return;
		}
		if coefficients == [1, -1, 1] || coefficients == [-1, 1, -1] {
			debug!("store differences from {}", model.constraint_to_string(c));
			let vars = ct.arguments[1].vars();
			let _ = self.difference_map.insert(vars[0], (vars[2], vars[1]));
			let _ = self.difference_map.insert(vars[2], (vars[0], vars[1]));
		}
	}

	/// Records affine (two-term) and flattened 2-D (three-term) index
	/// remappings from an `int_lin_eq` that defines its target variable.
	/// The element rules later fold these mappings back into the element
	/// constraints that use the remapped index.
	///
	/// Recording only touches session state, never the model, so the rule
	/// reports no modification.
	pub(crate) fn store_mapping(&mut self, model: &mut Model, c: CtRef, _log: &mut String) -> bool {
		let ct = &model.constraints[c];
		let Some(target) = ct.target_variable else {
			return false;
		};
		let vars = ct.arguments[1].vars();
		if vars.is_empty() {
			return false;
		}
		let coefficients = ct.arguments[0].int_list();
		let Some(rhs) = ct.arguments[2].literal_value() else {
			return false;
		};
		if coefficients.len() == 2 {
			let mapping = if vars[0] == target && coefficients[0] == -1 && ct.strong_propagation {
				Some(AffineMapping {
					variable: vars[1],
					coefficient: coefficients[1],
					offset: -rhs,
					constraint: c,
				})
			} else if vars[1] == target && coefficients[1] == -1 {
				Some(AffineMapping {
					variable: vars[0],
					coefficient: coefficients[0],
					offset: -rhs,
					constraint: c,
				})
			} else {
				None
			};
			if let Some(mapping) = mapping {
				if !self.affine_map.contains_key(&target) {
					debug!("store affine mapping from {}", model.constraint_to_string(c));
					let _ = self.affine_map.insert(target, mapping);
				}
			}
			return false;
		}
		if coefficients.len() == 3 {
			let mapping = if vars[0] == target && coefficients[0] == -1 {
				if coefficients[2] == 1 && ct.strong_propagation {
					Some(Array2dIndexMapping {
						variable1: vars[1],
						coefficient: coefficients[1],
						variable2: vars[2],
						offset: -rhs,
						constraint: c,
					})
				} else if coefficients[1] == 1 && ct.strong_propagation {
					Some(Array2dIndexMapping {
						variable1: vars[2],
						coefficient: coefficients[2],
						variable2: vars[1],
						offset: -rhs,
						constraint: c,
					})
				} else {
					None
				}
			} else if vars[2] == target && coefficients[2] == -1 {
				if coefficients[1] == 1 {
					Some(Array2dIndexMapping {
						variable1: vars[0],
						coefficient: coefficients[0],
						variable2: vars[1],
						offset: -rhs,
						constraint: c,
					})
				} else if coefficients[0] == 1 {
					Some(Array2dIndexMapping {
						variable1: vars[1],
						coefficient: coefficients[1],
						variable2: vars[0],
						offset: -rhs,
						constraint: c,
					})
				} else {
					None
				}
			} else {
				None
			};
			if let Some(mapping) = mapping {
				if !self.array2d_index_map.contains_key(&target) {
					debug!(
						"store 2d index mapping from {}",
						model.constraint_to_string(c)
					);
					let _ = self.array2d_index_map.insert(target, mapping);
				}
			}
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use expect_test::expect;
	use tracing_test::traced_test;

	use crate::{Argument, Domain, IntVal, Model, Presolver};

	#[test]
	fn test_strict_linear_comparisons_tightened() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let c = model.add_constraint(
			"int_lin_lt",
			vec![
				Argument::IntList(vec![1, 1]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(8),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_lin_lt(&mut model, c, &mut log));
		expect!["int_lin_le([1, 1], [x, y], 7)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_sign_flip_mirrors_comparison() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let c = model.add_constraint(
			"int_lin_le",
			vec![
				Argument::IntList(vec![-2, -3]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(-12),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_linear(&mut model, c, &mut log));
		expect!["int_lin_ge([2, 3], [x, y], 12)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_constant_linear_reified_settles_boolean() {
		let mut model = Model::default();
		let b = model.new_var("b", Domain::boolean());
		let c = model.add_constraint(
			"int_lin_eq_reif",
			vec![
				Argument::IntList(vec![2, 1]),
				Argument::IntList(vec![3, 4]),
				Argument::IntValue(10),
				Argument::Var(b),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_linear(&mut model, c, &mut log));
		expect!["bool_eq(b, 1)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_regroup_duplicate_terms() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let c = model.add_constraint(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![2, 1, -2]),
				Argument::VarArray(vec![x, y, x]),
				Argument::IntValue(5),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.regroup_linear(&mut model, c, &mut log));
		expect!["int_lin_eq([1], [y], 5)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_unary_and_binary_reductions() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 100));
		let y = model.new_var("y", Domain::interval(0, 100));
		let unary = model.add_constraint(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![3]),
				Argument::VarArray(vec![x]),
				Argument::IntValue(12),
			],
		);
		let binary = model.add_constraint(
			"int_lin_ne",
			vec![
				Argument::IntList(vec![1, -1]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(0),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.simplify_unary_linear(&mut model, unary, &mut log));
		expect!["int_eq(x, 4)"].assert_eq(&model.constraint_to_string(unary));
		assert!(presolver.simplify_binary_linear(&mut model, binary, &mut log));
		expect!["int_ne(x, y)"].assert_eq(&model.constraint_to_string(binary));
	}

	#[test]
	fn test_positive_linear_caps_variables() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 100));
		let y = model.new_var("y", Domain::interval(0, 100));
		let c = model.add_constraint(
			"int_lin_le",
			vec![
				Argument::IntList(vec![2, 5]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(20),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.propagate_positive_linear(&mut model, c, &mut log));
		assert_eq!(model.variables[x].domain.max(), 10);
		assert_eq!(model.variables[y].domain.max(), 4);
		// The idempotence marker stops a second application.
		assert!(!presolver.propagate_positive_linear(&mut model, c, &mut log));
	}

	#[test]
	#[traced_test]
	fn test_overflow_guard_leaves_model_unmodified() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(1, IntVal::MAX / 2));
		let b = model.new_var("b", Domain::boolean());
		let c = model.add_constraint(
			"int_lin_eq_reif",
			vec![
				Argument::IntList(vec![4]),
				Argument::VarArray(vec![x]),
				Argument::IntValue(17),
				Argument::Var(b),
			],
		);
		let snapshot = model.clone();
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(!presolver.check_int_lin_reif_bounds(&mut model, c, &mut log));
		assert_eq!(model, snapshot);
	}

	#[test]
	fn test_reif_bounds_decide_boolean() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 3));
		let b = model.new_var("b", Domain::boolean());
		let c = model.add_constraint(
			"int_lin_eq_reif",
			vec![
				Argument::IntList(vec![2]),
				Argument::VarArray(vec![x]),
				Argument::IntValue(9),
				Argument::Var(b),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.check_int_lin_reif_bounds(&mut model, c, &mut log));
		assert_eq!(model.variables[b].domain.value(), 0);
	}

	#[test]
	fn test_create_linear_target() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 100));
		let y = model.new_var("y", Domain::interval(0, 10));
		let c = model.add_constraint(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![-1, 3]),
				Argument::VarArray(vec![x, y]),
				Argument::IntValue(2),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.create_linear_target(&mut model, c, &mut log));
		assert_eq!(model.constraints[c].target_variable, Some(x));
		assert_eq!(model.variables[x].defining_constraint, Some(c));
	}

	#[test]
	fn test_difference_rewrites_null_equality() {
		let mut model = Model::default();
		let d = model.new_temp_var(Domain::interval(-10, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let z = model.new_var("z", Domain::interval(0, 10));
		// d - y + z = 0, i.e. d = y - z.
		let _ = model.add_constraint(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![1, -1, 1]),
				Argument::VarArray(vec![d, y, z]),
				Argument::IntValue(0),
			],
		);
		let eq = model.add_constraint("int_eq", vec![Argument::Var(d), Argument::IntValue(0)]);

		let mut presolver = Presolver::default();
		assert!(presolver.run(&mut model));
		// The null difference turned into z = y, which was then merged.
		assert!(!model.constraints[eq].active);
		assert!(!model.variables[z].active || !model.variables[y].active);
	}
}
