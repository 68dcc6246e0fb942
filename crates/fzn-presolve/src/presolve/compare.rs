//! Rewrite rules for casts, equalities, disequalities, inequalities, and
//! reified comparisons.
//!
//! Documentation conventions: `x`, `y`, `xi` denote integer variables, `b`,
//! `bi` denote Boolean variables, `c`, `ci` denote integer constants, and
//! `=> x` denotes the target variable of a constraint.

use tracing::debug;

use crate::{
	helpers::{cap_add, cap_sub},
	model::{argument::Argument, constraint::CtRef},
	presolve::Presolver,
	IntVal, Model,
};

/// The negation of a two-letter comparison operator.
fn negate_operator(op: &str) -> &'static str {
	match op {
		"eq" => "ne",
		"ne" => "eq",
		"le" => "gt",
		"lt" => "ge",
		"ge" => "lt",
		"gt" => "le",
		_ => unreachable!("unknown comparison operator `{op}'"),
	}
}

impl Presolver {
	/// Propagates the bool2int cast constraint.
	///
	/// Rule 1: `bool2int(b, c)` or `bool2int(t, x)` with one side fixed is
	/// rewritten to `int_eq(..)`.
	///
	/// Rule 2: `bool2int(b, x)` deactivates and substitutes every use of
	/// `x` by `b`.
	pub(crate) fn presolve_bool2int(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		if model.arg_has_one_value(&a0) || model.arg_has_one_value(&a1) {
			// Rule 1.
			log.push_str("simplifying bool2int with one side fixed");
			model.constraints[c].ty = "int_eq".into();
			true
		} else {
			// Rule 2.
			model.mark_constraint_inactive(c);
			self.add_substitution(model, a1.var(), a0.var());
			true
		}
	}

	/// Presolves the equality constraint (`int_eq` and `bool_eq`).
	///
	/// Rule 1: `int_eq(x, 0)` with `x == y - z` recorded in the difference
	/// map is rewritten to `int_eq(y, z)`.
	///
	/// Rule 2: `int_eq(x, c)` fixes `x` to `c` and deactivates.
	///
	/// Rule 3: `int_eq(x1, x2)` deactivates and registers a substitution.
	/// The variable that is not already the target of another constraint is
	/// kept, so that no dangling definition is created.
	///
	/// Rule 4: `int_eq(c, x)` fixes `x` to `c` and deactivates.
	///
	/// Rule 5: `int_eq(c1, c2)` is a no-op when `c1 == c2` and a
	/// contradiction otherwise.
	pub(crate) fn presolve_int_eq(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		// Rule 1.
		if let (Argument::Var(x), Some(0)) = (
			&model.constraints[c].arguments[0],
			model.constraints[c].arguments[1].literal_value(),
		) {
			if let Some(&(first, second)) = self.difference_map.get(x) {
				log.push_str("propagate equality, transform null difference");
				let x = *x;
				let _ = model.variables[x].domain.intersect_with_interval(0, 0);
				let ct = &mut model.constraints[c];
				ct.arguments[0] = Argument::Var(first);
				ct.arguments[1] = Argument::Var(second);
				return true;
			}
		}
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		if a0.is_variable() {
			if let Some(value) = model.arg_value(&a1) {
				// Rule 2.
				log.push_str("propagate equality");
				let _ = model.variables[a0.var()]
					.domain
					.intersect_with_interval(value, value);
				model.mark_constraint_inactive(c);
				return true;
			} else if a1.is_variable() {
				// Rule 3.
				model.mark_constraint_inactive(c);
				let (x, y) = (a0.var(), a1.var());
				if model.variables[y].defining_constraint.is_some()
					&& model.variables[x].defining_constraint.is_none()
				{
					self.add_substitution(model, y, x);
				} else {
					self.add_substitution(model, x, y);
				}
				return true;
			}
		} else if let Some(value) = model.arg_value(&a0) {
			if a1.is_variable() {
				// Rule 4.
				log.push_str("propagate equality");
				let _ = model.variables[a1.var()]
					.domain
					.intersect_with_interval(value, value);
				model.mark_constraint_inactive(c);
				return true;
			} else if let Some(other) = model.arg_value(&a1) {
				// Rule 5.
				if value == other {
					model.mark_constraint_inactive(c);
					return false;
				}
				model.set_constraint_as_false(c);
				return true;
			}
		}
		false
	}

	/// Presolves the disequality constraint (`int_ne`, and the value-shaped
	/// form of `bool_not`).
	///
	/// `int_ne(x, c)` or `int_ne(c, x)` removes `c` from the domain of `x`
	/// and deactivates if the removal was performed (the domain may be too
	/// large to remove a value from).
	pub(crate) fn presolve_int_ne(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		if model.constraints[c].presolve_propagation_done {
			return false;
		}
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		let pair = if a0.is_variable() && model.arg_has_one_value(&a1) {
			model.arg_value(&a1).map(|value| (a0.var(), value))
		} else if a1.is_variable() && model.arg_has_one_value(&a0) {
			model.arg_value(&a0).map(|value| (a1.var(), value))
		} else {
			None
		};
		if let Some((var, value)) = pair {
			let domain = &mut model.variables[var].domain;
			if !domain.contains(value) || domain.remove_value(value) {
				log.push_str("remove value from variable domain");
				model.mark_constraint_inactive(c);
				return true;
			}
		}
		false
	}

	/// Bound propagation on the comparison constraints `int_le`, `int_lt`,
	/// `int_ge`, `int_gt` and their Boolean variants.
	///
	/// Rule 1: two constant operands settle the constraint to satisfied or
	/// unsatisfiable.
	///
	/// Rule 2: one fixed operand tightens the variable's bound on the
	/// correct side (with the sentinel-aware ±1 adjustment for the strict
	/// variants) and deactivates.
	///
	/// Rule 3: two variable operands narrow each other's bounds; the
	/// constraint stays active.
	pub(crate) fn presolve_inequalities(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (id, a0, a1) = {
			let ct = &model.constraints[c];
			(
				ct.ty.clone(),
				ct.arguments[0].clone(),
				ct.arguments[1].clone(),
			)
		};
		let op = &id[id.len() - 2..];
		if a0.vars().is_empty() && a1.vars().is_empty() {
			// Rule 1.
			let (Some(left), Some(right)) = (model.arg_value(&a0), model.arg_value(&a1)) else {
				unreachable!("inequality operand is not a value")
			};
			let result = match op {
				"le" => left <= right,
				"lt" => left < right,
				"ge" => left >= right,
				"gt" => left > right,
				_ => unreachable!("unknown inequality `{id}'"),
			};
			if result {
				log.push_str("propagate bounds");
				model.mark_constraint_inactive(c);
			} else {
				model.set_constraint_as_false(c);
			}
			return true;
		}

		if a0.is_variable() && model.arg_has_one_value(&a1) {
			// Rule 2, variable on the left, e.g. x <= 5.
			let var = a0.var();
			let Some(value) = model.arg_value(&a1) else {
				unreachable!()
			};
			let domain = &mut model.variables[var].domain;
			let _ = match op {
				"le" => domain.intersect_with_interval(IntVal::MIN, value),
				"lt" => domain.intersect_with_interval(IntVal::MIN, cap_sub(value, 1)),
				"ge" => domain.intersect_with_interval(value, IntVal::MAX),
				"gt" => domain.intersect_with_interval(cap_add(value, 1), IntVal::MAX),
				_ => unreachable!(),
			};
			model.mark_constraint_inactive(c);
			return true;
		} else if model.arg_has_one_value(&a0) && a1.is_variable() {
			// Rule 2, variable on the right, e.g. 5 <= x.
			let var = a1.var();
			let Some(value) = model.arg_value(&a0) else {
				unreachable!()
			};
			let domain = &mut model.variables[var].domain;
			let _ = match op {
				"le" => domain.intersect_with_interval(value, IntVal::MAX),
				"lt" => domain.intersect_with_interval(cap_add(value, 1), IntVal::MAX),
				"ge" => domain.intersect_with_interval(IntVal::MIN, value),
				"gt" => domain.intersect_with_interval(IntVal::MIN, cap_sub(value, 1)),
				_ => unreachable!(),
			};
			model.mark_constraint_inactive(c);
			return true;
		}

		// Rule 3.
		log.push_str("narrow bounds from both sides");
		let left = a0.var();
		let right = a1.var();
		let (left_min, left_max) = {
			let domain = &model.variables[left].domain;
			(domain.min(), domain.max())
		};
		let (right_min, right_max) = {
			let domain = &model.variables[right].domain;
			(domain.min(), domain.max())
		};
		match op {
			"le" => {
				let _ = model.variables[left]
					.domain
					.intersect_with_interval(IntVal::MIN, right_max);
				let _ = model.variables[right]
					.domain
					.intersect_with_interval(left_min, IntVal::MAX);
				left_max > right_max || right_min < left_min
			}
			"lt" => {
				let _ = model.variables[left]
					.domain
					.intersect_with_interval(IntVal::MIN, cap_sub(right_max, 1));
				let _ = model.variables[right]
					.domain
					.intersect_with_interval(cap_add(left_min, 1), IntVal::MAX);
				left_max >= right_max || right_min <= left_min
			}
			"ge" => {
				let _ = model.variables[left]
					.domain
					.intersect_with_interval(right_min, IntVal::MAX);
				let _ = model.variables[right]
					.domain
					.intersect_with_interval(IntVal::MIN, left_max);
				right_max > left_max || left_min < right_min
			}
			"gt" => {
				let _ = model.variables[left]
					.domain
					.intersect_with_interval(cap_add(right_min, 1), IntVal::MAX);
				let _ = model.variables[right]
					.domain
					.intersect_with_interval(IntVal::MIN, cap_sub(left_max, 1));
				right_max >= left_max || left_min <= right_min
			}
			_ => unreachable!(),
		}
	}

	/// Removes an `int_div(c1, c2, x)` with constant operands by fixing `x`
	/// to the quotient, when `c2 != 0` and the quotient is in the domain of
	/// `x`.
	pub(crate) fn presolve_int_div(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let (a0, a1, a2, done) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].clone(),
				ct.arguments[1].clone(),
				ct.arguments[2].clone(),
				ct.presolve_propagation_done,
			)
		};
		if let (Some(left), Some(right), true, false) = (
			model.arg_value(&a0),
			model.arg_value(&a1),
			a2.is_variable(),
			done,
		) {
			if right == 0 {
				return false;
			}
			log.push_str("propagate constants");
			let value = left / right;
			model.constraints[c].presolve_propagation_done = true;
			if model.variables[a2.var()].domain.contains(value) {
				let _ = model.variables[a2.var()]
					.domain
					.intersect_with_interval(value, value);
				model.mark_constraint_inactive(c);
				return true;
			}
			log.push_str(", quotient is incompatible with the variable domain, skipping");
		}
		false
	}

	/// Strips the target link of an `int_mod(x1, x2, x3) => x3` whose
	/// result variable has been fixed.
	pub(crate) fn presolve_int_mod(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let ct = &model.constraints[c];
		if let (Some(target), Argument::Var(result)) = (ct.target_variable, &ct.arguments[2]) {
			if *result == target && model.variables[target].domain.has_one_value() {
				log.push_str("detach fixed modulo result");
				model.remove_target_variable(c);
				return true;
			}
		}
		false
	}

	/// Removes an `int_times(c1, c2, x)` with constant operands by fixing
	/// `x` to the product, when the product neither overflows nor falls
	/// outside the domain of `x`.
	pub(crate) fn presolve_int_times(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a1, a2, done) = {
			let ct = &model.constraints[c];
			(
				ct.arguments[0].clone(),
				ct.arguments[1].clone(),
				ct.arguments[2].clone(),
				ct.presolve_propagation_done,
			)
		};
		if let (Some(left), Some(right), true, false) = (
			model.arg_value(&a0),
			model.arg_value(&a1),
			a2.is_variable(),
			done,
		) {
			log.push_str("propagate constants");
			let Some(value) = left.checked_mul(right) else {
				log.push_str(", product overflows, skipping");
				return false;
			};
			model.constraints[c].presolve_propagation_done = true;
			if model.variables[a2.var()].domain.contains(value) {
				let _ = model.variables[a2.var()]
					.domain
					.intersect_with_interval(value, value);
				model.mark_constraint_inactive(c);
				return true;
			}
			log.push_str(", product is incompatible with the variable domain, skipping");
		}
		false
	}

	/// Propagates `set_in(x, [c1..c2])` and `set_in(x, {c1, .., cn})` by
	/// intersecting the domain of `x` with the constant set, then
	/// deactivates.
	pub(crate) fn presolve_set_in(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		if a0.is_variable() {
			log.push_str("propagate set on variable domain");
			crate::presolve::intersect_domain_with(model, a0.var(), &a1);
			model.mark_constraint_inactive(c);
			return true;
		}
		false
	}

	/// Propagates a reified comparison whose outcome is already decided.
	///
	/// Rule 1: both compared operands are the same variable, so the boolean
	/// follows from the operator's reflexivity (true for eq/le/ge, false
	/// for ne/lt/gt).
	///
	/// Rule 2: an eq/ne reification of a 0/1 variable against a 0/1
	/// constant is a boolean identity: rewrite to `bool_eq` or `bool_not`
	/// depending on the parity.
	///
	/// Rule 3: one operand is a fixed value and the variable's bounds
	/// already decide the comparison; assign the boolean and deactivate.
	pub(crate) fn propagate_reified_comparisons(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (id, a0, a1) = {
			let ct = &model.constraints[c];
			(
				ct.ty.clone(),
				ct.arguments[0].clone(),
				ct.arguments[1].clone(),
			)
		};
		let op = &id[id.len() - 7..id.len() - 5];
		if let (Argument::Var(left), Argument::Var(right)) = (&a0, &a1) {
			if left == right {
				// Rule 1.
				let value = matches!(op, "eq" | "le" | "ge");
				let a2 = model.constraints[c].arguments[2].clone();
				let fits = match model.arg_value(&a2) {
					None => true,
					Some(fixed) => fixed == IntVal::from(value),
				};
				if fits {
					log.push_str("propagate reified boolean from reflexivity");
					let _ = model.variables[a2.var()]
						.domain
						.intersect_with_interval(value.into(), value.into());
					model.mark_constraint_inactive(c);
					return true;
				}
			}
		}

		let (var, value, reverse) = if a0.is_variable() && model.arg_has_one_value(&a1) {
			match model.arg_value(&a1) {
				Some(value) => (a0.var(), value, false),
				None => return false,
			}
		} else if a1.is_variable() && model.arg_has_one_value(&a0) {
			match model.arg_value(&a0) {
				Some(value) => (a1.var(), value, true),
				None => return false,
			}
		} else {
			return false;
		};

		let domain = model.variables[var].domain.clone();
		if domain.is_boolean() && matches!(op, "eq" | "ne") && (value == 0 || value == 1) {
			// Rule 2.
			let mut parity = op == "eq";
			if value == 0 {
				parity = !parity;
			}
			log.push_str("rewrite as boolean identity");
			let target = model.constraints[c].arguments[2].clone();
			let ct = &mut model.constraints[c];
			ct.arguments = vec![Argument::Var(var), target];
			ct.ty = if parity { "bool_eq" } else { "bool_not" }.into();
			return true;
		}

		// Rule 3. The effective direction of the strict/loose comparisons
		// depends on which side the constant was found on.
		let state = match op {
			"eq" => {
				if domain.contains(value) {
					domain.has_one_value().then_some(true)
				} else {
					Some(false)
				}
			}
			"ne" => {
				if domain.contains(value) {
					domain.has_one_value().then_some(false)
				} else {
					Some(true)
				}
			}
			_ if domain.is_all_int() => None,
			"gt" | "lt" if (op == "lt") == reverse => {
				// var > value
				if domain.min() > value {
					Some(true)
				} else if domain.max() <= value {
					Some(false)
				} else {
					None
				}
			}
			"gt" | "lt" => {
				// var < value
				if domain.max() < value {
					Some(true)
				} else if domain.min() >= value {
					Some(false)
				} else {
					None
				}
			}
			"ge" | "le" if (op == "le") == reverse => {
				// var >= value
				if domain.min() >= value {
					Some(true)
				} else if domain.max() < value {
					Some(false)
				} else {
					None
				}
			}
			"ge" | "le" => {
				// var <= value
				if domain.max() <= value {
					Some(true)
				} else if domain.min() > value {
					Some(false)
				} else {
					None
				}
			}
			_ => unreachable!("unknown reified comparison `{id}'"),
		};
		if let Some(state) = state {
			log.push_str(if state {
				"assign reified boolean to true"
			} else {
				"assign reified boolean to false"
			});
			let boolvar = model.constraints[c].arguments[2].var();
			let _ = model.variables[boolvar]
				.domain
				.intersect_with_interval(state.into(), state.into());
			model.mark_constraint_inactive(c);
			return true;
		}
		false
	}

	/// Rewrites comparisons of an absolute value against zero in terms of
	/// the pre-abs variable: `int_eq(x, 0)`, `int_ne(x, 0)` and their
	/// reified forms with `x == |y|` become the same comparison on `y`.
	pub(crate) fn remove_abs_from_eq_ne(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let ct = &model.constraints[c];
		if let Argument::Var(x) = ct.arguments[0] {
			if model.arg_value(&ct.arguments[1]) == Some(0) {
				if let Some(&origin) = self.abs_map.get(&x) {
					if origin != x {
						log.push_str("remove absolute value from comparison with zero");
						model.constraints[c].arguments[0] = Argument::Var(origin);
						return true;
					}
				}
			}
		}
		false
	}

	/// Removes the absolute value from `int_le_reif`.
	///
	/// `int_le_reif(x, 0, b)` with `x == |y|` becomes `int_eq_reif(y, 0,
	/// b)`; `int_le_reif(x, c, b)` becomes the symmetric membership test
	/// `set_in_reif(y, [-c..c], b)`.
	pub(crate) fn remove_abs_from_int_le_reif(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		if !a0.is_variable() || !model.arg_has_one_value(&a1) {
			return false;
		}
		let Some(&origin) = self.abs_map.get(&a0.var()) else {
			return false;
		};
		log.push_str("remove absolute value from constraint");
		let Some(value) = model.arg_value(&a1) else {
			unreachable!()
		};
		let ct = &mut model.constraints[c];
		ct.arguments[0] = Argument::Var(origin);
		if value == 0 {
			ct.ty = "int_eq_reif".into();
		} else {
			ct.ty = "set_in_reif".into();
			ct.arguments[1] = Argument::IntInterval(-value, value);
			// set_in_reif does not honor a target variable.
			model.remove_target_variable(c);
		}
		true
	}

	/// Merges an `int_ne_reif(x, y, b2)` with a previously cached
	/// `int_eq_reif(x, y, b)` on the same pair into `bool_not(b, b2)`.
	pub(crate) fn simplify_int_ne_reif(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let ct = &model.constraints[c];
		if let (Argument::Var(x), Argument::Var(y), Argument::Var(b2)) =
			(&ct.arguments[0], &ct.arguments[1], &ct.arguments[2])
		{
			if let Some(&opposite) = self.int_eq_reif_map.get(x).and_then(|m| m.get(y)) {
				log.push_str("merge with the opposite equality reification");
				let b2 = *b2;
				let ct = &mut model.constraints[c];
				ct.arguments = vec![Argument::Var(opposite), Argument::Var(b2)];
				ct.ty = "bool_not".into();
				return true;
			}
		}
		false
	}

	/// Records the `x = |y|` pair of an `int_abs(y, x)` constraint.
	///
	/// Recording only touches session state, never the model, so the rule
	/// reports no modification.
	pub(crate) fn store_abs(&mut self, model: &mut Model, c: CtRef, _log: &mut String) -> bool {
		let ct = &model.constraints[c];
		let abs_var = ct.arguments[1].var();
		if !self.abs_map.contains_key(&abs_var) {
			debug!(
				"store absolute value pair from {}",
				model.constraint_to_string(c)
			);
			let origin = model.constraints[c].arguments[0].var();
			let _ = self.abs_map.insert(abs_var, origin);
		}
		false
	}

	/// Records an `int_eq_reif(x, y, b)` triple over three variables, so a
	/// later symmetric disequality reification can reuse `b`.
	///
	/// Recording only touches session state, never the model, so the rule
	/// reports no modification.
	pub(crate) fn store_int_eq_reif(
		&mut self,
		model: &mut Model,
		c: CtRef,
		_log: &mut String,
	) -> bool {
		let ct = &model.constraints[c];
		if let (Argument::Var(first), Argument::Var(second), Argument::Var(boolvar)) =
			(&ct.arguments[0], &ct.arguments[1], &ct.arguments[2])
		{
			let (first, second, boolvar) = (*first, *second, *boolvar);
			if self
				.int_eq_reif_map
				.get(&first)
				.is_some_and(|m| m.contains_key(&second))
			{
				return false;
			}
			debug!(
				"store equality reification {}",
				model.constraint_to_string(c)
			);
			let _ = self
				.int_eq_reif_map
				.entry(first)
				.or_default()
				.insert(second, boolvar);
			let _ = self
				.int_eq_reif_map
				.entry(second)
				.or_default()
				.insert(first, boolvar);
		}
		false
	}

	/// Rewrites a reified constraint whose reification boolean has been
	/// fixed into its plain (flag fixed to 1) or negated (flag fixed to 0)
	/// form, detaching the now-irrelevant target link first.
	///
	/// The negation uses the operator table eq↔ne, le↔gt, lt↔ge, ge↔lt,
	/// gt↔le; `set_in` and `set_not_in` are their own special-cased pair.
	pub(crate) fn unreify(&mut self, model: &mut Model, c: CtRef, log: &mut String) -> bool {
		let last = model.constraints[c].arguments.len() - 1;
		let flag = {
			let ct = &model.constraints[c];
			model.arg_value(&ct.arguments[last])
		};
		let Some(flag) = flag else {
			return false;
		};
		model.remove_target_variable(c);
		let base = {
			let ct = &model.constraints[c];
			debug_assert!(ct.is_reified(), "unreify on a non-reified constraint");
			ct.ty[..ct.ty.len() - 5].to_owned()
		};
		let ct = &mut model.constraints[c];
		ct.remove_arg(last);
		if flag == 1 {
			log.push_str("unreify constraint");
			ct.ty = base;
		} else if base == "set_in" || base == "set_not_in" {
			log.push_str("unreify and reverse constraint");
			ct.ty = if base == "set_in" {
				"set_not_in"
			} else {
				"set_in"
			}
			.into();
		} else {
			log.push_str("unreify and reverse constraint");
			let (prefix, op) = base.split_at(base.len() - 2);
			ct.ty = format!("{prefix}{}", negate_operator(op));
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use expect_test::expect;
	use tracing_test::traced_test;

	use crate::{Argument, Domain, Model, Presolver};

	#[test]
	fn test_unreify_fixed_true_and_false() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let b_true = model.new_var("bt", Domain::singleton(1));
		let b_false = model.new_var("bf", Domain::singleton(0));
		let pos = model.add_constraint(
			"int_eq_reif",
			vec![
				Argument::Var(x),
				Argument::IntValue(5),
				Argument::Var(b_true),
			],
		);
		let neg = model.add_constraint(
			"int_eq_reif",
			vec![
				Argument::Var(x),
				Argument::IntValue(5),
				Argument::Var(b_false),
			],
		);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.unreify(&mut model, pos, &mut log));
		expect!["int_eq(x, 5)"].assert_eq(&model.constraint_to_string(pos));
		assert!(presolver.unreify(&mut model, neg, &mut log));
		expect!["int_ne(x, 5)"].assert_eq(&model.constraint_to_string(neg));
	}

	#[test]
	fn test_unreify_set_pair() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let b = model.new_var("b", Domain::singleton(0));
		let c = model.add_constraint(
			"set_in_reif",
			vec![
				Argument::Var(x),
				Argument::IntInterval(2, 4),
				Argument::Var(b),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.unreify(&mut model, c, &mut log));
		expect!["set_not_in(x, [2..4])"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_int_eq_fixes_and_substitutes() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(5, 15));
		let fix = model.add_constraint("int_eq", vec![Argument::Var(x), Argument::IntValue(7)]);
		let merge = model.add_constraint("int_eq", vec![Argument::Var(x), Argument::Var(y)]);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_eq(&mut model, fix, &mut log));
		assert_eq!(model.variables[x].domain.value(), 7);
		assert!(!model.constraints[fix].active);

		assert!(presolver.presolve_int_eq(&mut model, merge, &mut log));
		assert!(!model.constraints[merge].active);
		assert!(!model.variables[x].active);
		// Survivor holds the intersection of both domains.
		assert_eq!(model.variables[y].domain.value(), 7);
	}

	#[test]
	fn test_int_eq_substitution_prefers_undefined_variable() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(0, 10));
		let b = model.new_var("b", Domain::boolean());
		// y is defined by another constraint; keep x free to be eliminated.
		let _ = model.add_constraint_with_target(
			"bool_not",
			vec![Argument::Var(b), Argument::Var(y)],
			y,
		);
		let eq = model.add_constraint("int_eq", vec![Argument::Var(x), Argument::Var(y)]);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_eq(&mut model, eq, &mut log));
		// y keeps its definition, x survives the merge in its place.
		assert!(!model.variables[y].active);
		assert!(model.variables[x].active);
	}

	#[test]
	fn test_int_eq_constant_contradiction() {
		let mut model = Model::default();
		let c = model.add_constraint(
			"int_eq",
			vec![Argument::IntValue(1), Argument::IntValue(2)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_eq(&mut model, c, &mut log));
		assert_eq!(model.constraints[c].ty, "false_constraint");
	}

	#[test]
	fn test_int_ne_removes_value() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 4));
		let c = model.add_constraint("int_ne", vec![Argument::Var(x), Argument::IntValue(2)]);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_ne(&mut model, c, &mut log));
		assert!(!model.variables[x].domain.contains(2));
		assert!(!model.constraints[c].active);
	}

	#[test]
	#[traced_test]
	fn test_strict_inequality_bounds() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 10));
		let y = model.new_var("y", Domain::interval(3, 8));
		let c = model.add_constraint("int_lt", vec![Argument::Var(x), Argument::Var(y)]);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_inequalities(&mut model, c, &mut log));
		assert_eq!(model.variables[x].domain.max(), 7);
		assert_eq!(model.variables[y].domain.min(), 3);
		// Two-sided narrowing keeps the constraint active.
		assert!(model.constraints[c].active);
	}

	#[test]
	fn test_reified_comparison_decided_by_bounds() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(6, 10));
		let b = model.new_var("b", Domain::boolean());
		let c = model.add_constraint(
			"int_ge_reif",
			vec![Argument::Var(x), Argument::IntValue(5), Argument::Var(b)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.propagate_reified_comparisons(&mut model, c, &mut log));
		assert_eq!(model.variables[b].domain.value(), 1);
		assert!(!model.constraints[c].active);
	}

	#[test]
	fn test_reified_comparison_reflexivity() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 9));
		let b = model.new_var("b", Domain::boolean());
		let c = model.add_constraint(
			"int_lt_reif",
			vec![Argument::Var(x), Argument::Var(x), Argument::Var(b)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.propagate_reified_comparisons(&mut model, c, &mut log));
		assert_eq!(model.variables[b].domain.value(), 0);
	}

	#[test]
	fn test_abs_chain_rewrites_comparison() {
		let mut model = Model::default();
		let y = model.new_var("y", Domain::interval(-5, 5));
		let x = model.new_var("x", Domain::interval(0, 5));
		let b = model.new_var("b", Domain::boolean());
		let abs = model.add_constraint("int_abs", vec![Argument::Var(y), Argument::Var(x)]);
		let le = model.add_constraint(
			"int_le_reif",
			vec![Argument::Var(x), Argument::IntValue(3), Argument::Var(b)],
		);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(!presolver.store_abs(&mut model, abs, &mut log));
		assert!(presolver.remove_abs_from_int_le_reif(&mut model, le, &mut log));
		expect!["set_in_reif(y, [-3..3], b)"].assert_eq(&model.constraint_to_string(le));
	}

	#[test]
	fn test_ne_reif_reuses_eq_reif() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 9));
		let y = model.new_var("y", Domain::interval(0, 9));
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let eq = model.add_constraint(
			"int_eq_reif",
			vec![Argument::Var(x), Argument::Var(y), Argument::Var(b1)],
		);
		let ne = model.add_constraint(
			"int_ne_reif",
			vec![Argument::Var(x), Argument::Var(y), Argument::Var(b2)],
		);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(!presolver.store_int_eq_reif(&mut model, eq, &mut log));
		assert!(presolver.simplify_int_ne_reif(&mut model, ne, &mut log));
		expect!["bool_not(b1, b2)"].assert_eq(&model.constraint_to_string(ne));
	}

	#[test]
	fn test_int_times_constant_folding() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(0, 100));
		let c = model.add_constraint(
			"int_times",
			vec![
				Argument::IntValue(6),
				Argument::IntValue(7),
				Argument::Var(x),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_int_times(&mut model, c, &mut log));
		assert_eq!(model.variables[x].domain.value(), 42);
		assert!(!model.constraints[c].active);
	}
}
