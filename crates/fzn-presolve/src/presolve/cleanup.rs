//! The one-shot structural cleanup pass that runs after the rewrite rules
//! have converged: it resolves target-variable conflicts and folds the
//! constraint chains produced by a naive front-end flattening back into
//! compact n-ary form.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{
	model::{argument::Argument, constraint::CtRef, variable::VarRef},
	presolve::Presolver,
	IntVal, Model,
};

/// Whether every value is 0 or 1.
fn is_array_boolean(values: &[IntVal]) -> bool {
	values.iter().all(|value| *value == 0 || *value == 1)
}

/// Whether the values contain at most one 0 or at most one 1, so a single
/// position is distinguishable.
fn only_one_0_or_only_one_1(values: &[IntVal]) -> bool {
	let mut num_zero = 0;
	let mut num_one = 0;
	for value in values {
		if *value != 0 {
			num_one += 1;
		} else {
			num_zero += 1;
		}
		if num_one > 1 && num_zero > 1 {
			return false;
		}
	}
	true
}

/// Whether every coefficient but the last is 1 and the last is -1, the
/// shape of a front-end running-sum step `x1 + .. + xn - y = 0`.
fn are_ones_followed_by_minus_one(coefficients: &[IntVal]) -> bool {
	let Some((last, init)) = coefficients.split_last() else {
		return false;
	};
	init.iter().all(|coef| *coef == 1) && *last == -1
}

/// Whether `prefix` is a strict prefix of `list`.
fn is_strict_prefix(prefix: &[VarRef], list: &[VarRef]) -> bool {
	prefix.len() < list.len() && list[..prefix.len()] == *prefix
}

/// Ranking weight for competing defining constraints: reified constraints
/// score their variable arity alone, every other constraint scores
/// 100 + arity, and the lowest weight wins the definition.
fn sort_weight(model: &Model, c: CtRef) -> usize {
	let ct = &model.constraints[c];
	let mut weight = if ct.is_reified() { 0 } else { 100 };
	for arg in &ct.arguments {
		weight += arg.vars().len();
	}
	weight
}

impl Presolver {
	/// Recognise the start of a binary min/max cascade: a step that applies
	/// the same variable to both operands, the shape the front-end emits
	/// for the first element of an n-ary min/max.
	fn check_regroup_start(
		model: &mut Model,
		c: CtRef,
		chain: &mut Vec<VarRef>,
		carry_over: &mut Vec<VarRef>,
	) -> Option<CtRef> {
		let ct = &model.constraints[c];
		if !(ct.ty == "int_min" || ct.ty == "int_max") {
			return None;
		}
		if !(ct.arguments[0].is_variable() && ct.arguments[1].is_variable()) {
			return None;
		}
		if ct.arguments[0].var() != ct.arguments[1].var() {
			return None;
		}
		chain.push(ct.arguments[0].var());
		let carry = ct.arguments[2].var();
		carry_over.push(carry);
		model.variables[carry].defining_constraint = None;
		Some(c)
	}

	/// Strip target-variable links the downstream solver will not honor,
	/// resolve variables claimed by more than one defining constraint,
	/// promote unclaimed reification booleans to targets, and fold binary
	/// min/max and running-sum cascades back into compact form.
	///
	/// Runs exactly once, after [`Presolver::run`] has converged.
	/// `use_sat_backend` gates the target stripping for the constraint
	/// types that a Boolean-satisfiability encoding cannot honor as
	/// definers.
	pub fn clean_up_for_solver(&mut self, model: &mut Model, use_sat_backend: bool) {
		// First pass: strip targets the backends will not honor.
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			let ct = &model.constraints[c];
			let id = ct.ty.clone();

			if id == "int_lin_eq"
				&& ct.strong_propagation
				&& ct.arguments[0].int_list().len() > 3
			{
				// Compiled into a table representation, not an assignment.
				trace!(
					"remove target variable from {}",
					model.constraint_to_string(c)
				);
				model.remove_target_variable(c);
			}
			let ct = &model.constraints[c];
			if id == "int_lin_eq" {
				if let Some(target) = ct.target_variable {
					// Canonicalise the target's own coefficient to -1.
					let coefficients = ct.arguments[0].int_list().to_vec();
					let vars = ct.arguments[1].vars().to_vec();
					for (coef, var) in coefficients.iter().zip(&vars) {
						if *var != target {
							continue;
						}
						if *coef == -1 {
							break;
						} else if *coef == 1 {
							trace!("flip signs of {}", model.constraint_to_string(c));
							let Argument::IntValue(rhs) = model.constraints[c].arguments[2]
							else {
								unreachable!("linear constraint without a constant bound")
							};
							let ct = &mut model.constraints[c];
							ct.arguments[2] = Argument::IntValue(-rhs);
							ct.arguments[0] =
								Argument::IntList(coefficients.iter().map(|v| -v).collect());
							break;
						}
					}
				}
			}
			let ct = &model.constraints[c];
			if id == "array_var_int_element" {
				if let Some(target) = ct.target_variable {
					if ct.arguments[1].vars().contains(&target) {
						trace!(
							"remove target variable from {} as it appears in its own array",
							model.constraint_to_string(c)
						);
						model.remove_target_variable(c);
					}
				}
			}
			let ct = &model.constraints[c];
			if use_sat_backend
				&& ct.target_variable.is_some()
				&& (id == "array_bool_and"
					|| id == "array_bool_or"
					|| ((id == "bool_eq_reif" || id == "bool_ne_reif")
						&& !model.arg_has_one_value(&ct.arguments[1]))
					|| id == "bool_le_reif"
					|| id == "bool_ge_reif")
			{
				model.remove_target_variable(c);
			}
			if id == "count_reif" || id == "set_in_reif" {
				model.remove_target_variable(c);
			}
			let ct = &model.constraints[c];
			if (id == "array_int_element"
				&& (!is_array_boolean(ct.arguments[1].int_list())
					|| !only_one_0_or_only_one_1(ct.arguments[1].int_list())))
				|| id == "array_var_int_element"
			{
				model.remove_target_variable(c);
			}
		}

		self.clean_up_multiple_defining_constraints(model);

		// Second pass: promote unclaimed reification booleans to targets.
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			let ct = &model.constraints[c];
			let id = ct.ty.as_str();
			if ct.target_variable.is_none()
				&& matches!(
					id,
					"int_lin_eq_reif"
						| "int_lin_ne_reif" | "int_lin_ge_reif"
						| "int_lin_le_reif" | "int_lin_gt_reif"
						| "int_lin_lt_reif" | "int_eq_reif"
						| "int_ne_reif" | "int_le_reif"
						| "int_ge_reif" | "int_lt_reif"
						| "int_gt_reif"
				) {
				if let Some(bool_var) = ct.arguments[2].var_ref() {
					if model.variables[bool_var].defining_constraint.is_none() {
						trace!("create target variable on {}", model.constraint_to_string(c));
						model.set_target_variable(c, bool_var);
					}
				}
			}
		}

		self.regroup_min_max_chains(model);
		self.regroup_running_sums(model);
	}

	/// Resolve variables that ended up as the declared target of more than
	/// one constraint: rank the competitors by [`sort_weight`] and keep
	/// only the lowest-weight constraint as the definer.
	fn clean_up_multiple_defining_constraints(&mut self, model: &mut Model) {
		let mut targeted: BTreeMap<VarRef, Vec<CtRef>> = BTreeMap::new();
		for (c, ct) in model.constraints.iter_enumerated() {
			if let Some(target) = ct.target_variable {
				targeted.entry(target).or_default().push(c);
			}
		}
		for (var, mut claimants) in targeted {
			if claimants.len() <= 1 {
				continue;
			}
			claimants.sort_by_key(|c| sort_weight(model, *c));
			for c in &claimants[1..] {
				trace!(
					"remove duplicate target from {}",
					model.constraint_to_string(*c)
				);
				model.constraints[*c].target_variable = None;
			}
			model.variables[var].defining_constraint = Some(claimants[0]);
		}
	}

	/// Fold a cascade of binary `int_min`/`int_max` steps back into one
	/// n-ary `minimum_int`/`maximum_int`.
	///
	/// A chain starts when a step applies the same variable to both
	/// operands, and continues while each successive carry variable is
	/// referenced by at most two constraints (its producer and its
	/// consumer).
	fn regroup_min_max_chains(&mut self, model: &mut Model) {
		self.var_to_constraints.clear();
		self.build_var_to_constraints(model);

		let mut start: Option<CtRef> = None;
		let mut chain: Vec<VarRef> = Vec::new();
		let mut carry_over: Vec<VarRef> = Vec::new();
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			if let Some(start_ct) = start {
				let carry = *carry_over.last().expect("chain without a carry variable");
				let continues = {
					let ct = &model.constraints[c];
					ct.ty == model.constraints[start_ct].ty
						&& ct.arguments[1].is_variable()
						&& ct.arguments[1].var() == carry
						&& self
							.var_to_constraints
							.get(&carry)
							.is_some_and(|referencing| referencing.len() <= 2)
				};
				if continues {
					let ct = &model.constraints[c];
					chain.push(ct.arguments[0].var());
					let next_carry = ct.arguments[2].var();
					carry_over.push(next_carry);
					model.constraints[c].active = false;
					model.constraints[c].target_variable = None;
					model.variables[next_carry].defining_constraint = None;
				} else {
					Self::regroup(model, start_ct, &chain, &carry_over);
					chain.clear();
					carry_over.clear();
					start = Self::check_regroup_start(model, c, &mut chain, &mut carry_over);
				}
			} else {
				start = Self::check_regroup_start(model, c, &mut chain, &mut carry_over);
			}
		}
		if let Some(start_ct) = start {
			Self::regroup(model, start_ct, &chain, &carry_over);
		}
	}

	/// Fold a cascade of running-sum linear equalities
	/// `x1 + .. + xk - yk = 0` (each step a strict-prefix extension of the
	/// previous one) into explicit binary `int_plus` steps. Each step's
	/// target link is deliberately broken to prevent a pathological
	/// single-variable propagation chain during solving.
	fn regroup_running_sums(&mut self, model: &mut Model) {
		let mut current_variables: Vec<VarRef> = Vec::new();
		let mut target_variable: Option<VarRef> = None;
		let mut first_constraint: Option<CtRef> = None;
		for i in 0..model.constraints.len() {
			let c = CtRef::from_usize(i);
			if let Some(target) = target_variable {
				let continues = {
					let ct = &model.constraints[c];
					ct.ty == "int_lin_eq"
						&& are_ones_followed_by_minus_one(ct.arguments[0].int_list())
						&& ct.arguments[0].int_list().len() == current_variables.len() + 2
						&& is_strict_prefix(&current_variables, ct.arguments[1].vars())
				};
				if continues {
					trace!("recognize hidden int_plus {}", model.constraint_to_string(c));
					current_variables = model.constraints[c].arguments[1].vars().to_vec();
					let operand = current_variables[current_variables.len() - 2];
					let sum = *current_variables.last().expect("non-empty running sum");
					let ct = &mut model.constraints[c];
					ct.ty = "int_plus".into();
					ct.arguments[0] = Argument::Var(target);
					ct.arguments[1] = Argument::Var(operand);
					ct.arguments[2] = Argument::Var(sum);
					target_variable = Some(sum);
					let _ = current_variables.pop();
					model.remove_target_variable(c);
					if let Some(first) = first_constraint.take() {
						model.remove_target_variable(first);
					}
				} else {
					current_variables.clear();
					target_variable = None;
				}
			} else {
				let ct = &model.constraints[c];
				if ct.ty == "int_lin_eq"
					&& ct.arguments[0].int_list().len() == 3
					&& are_ones_followed_by_minus_one(ct.arguments[0].int_list())
					&& ct.arguments[1].vars().len() == 3
					&& ct.arguments[2].literal_value() == Some(0)
				{
					trace!("recognize assignment {}", model.constraint_to_string(c));
					current_variables = ct.arguments[1].vars().to_vec();
					target_variable = current_variables.pop();
					first_constraint = Some(c);
				}
			}
		}
	}

	/// Rewrite the start of a recognised min/max chain into the n-ary
	/// constraint defining the final carry variable, and deactivate the
	/// intermediate carries.
	fn regroup(model: &mut Model, start: CtRef, chain: &[VarRef], carry_over: &[VarRef]) {
		let out = *carry_over.last().expect("chain without a carry variable");
		let old_type = model.constraints[start].ty.clone();
		let ct = &mut model.constraints[start];
		let _ = ct.arguments.pop();
		ct.arguments[0] = Argument::Var(out);
		ct.arguments[1] = Argument::VarArray(chain.to_vec());
		ct.ty = if old_type == "int_min" {
			"minimum_int"
		} else {
			"maximum_int"
		}
		.into();
		ct.target_variable = Some(out);
		model.variables[out].defining_constraint = Some(start);
		for var in &carry_over[..carry_over.len() - 1] {
			model.variables[*var].active = false;
		}
		trace!(
			"regroup chain of {old_type} into {}",
			model.constraint_to_string(start)
		);
	}
}
