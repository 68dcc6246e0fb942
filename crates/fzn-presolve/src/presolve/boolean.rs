//! Rewrite rules for the boolean-algebra constraints: the n-ary and/or
//! aggregates, xor, negation, clauses, and the boolean equality
//! reifications.

use crate::{
	model::{argument::Argument, constraint::CtRef},
	presolve::Presolver,
	IntVal, Model,
};

impl Presolver {
	/// Simplifies and reduces `array_bool_and([b1, .., bn], b0)`.
	///
	/// Rule 1: a single-element array collapses to `bool_eq(b1, b0)`.
	///
	/// Rule 2: a true aggregate assigns true to every element and
	/// deactivates.
	///
	/// Rule 3: an element fixed to false assigns false to the aggregate and
	/// deactivates.
	///
	/// Rule 4: all elements fixed to true assign true to the aggregate and
	/// deactivate.
	///
	/// Rule 5: elements already fixed to true are stripped from the array.
	pub(crate) fn presolve_array_bool_and(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let vars = model.constraints[c].arguments[0].vars().to_vec();
		if vars.len() == 1 {
			// Rule 1.
			let ct = &mut model.constraints[c];
			ct.ty = "bool_eq".into();
			ct.arguments[0] = Argument::Var(vars[0]);
			return true;
		}
		let aggregate = model.constraints[c].arguments[1].clone();
		let aggregate_value = model.arg_value(&aggregate);
		if !model.constraints[c].presolve_propagation_done && aggregate_value == Some(1) {
			// Rule 2. The assignment is only sound when every element can
			// still take the value.
			if vars.iter().any(|v| !model.variables[*v].domain.contains(1)) {
				return false;
			}
			log.push_str("propagate constants");
			for v in &vars {
				let _ = model.variables[*v].domain.intersect_with_interval(1, 1);
			}
			model.constraints[c].presolve_propagation_done = true;
			model.mark_constraint_inactive(c);
			return true;
		}
		let mut has_bound_false_value = false;
		let mut unbound = Vec::new();
		for v in &vars {
			let domain = &model.variables[*v].domain;
			if domain.has_one_value() {
				has_bound_false_value |= domain.max() == 0;
			} else {
				unbound.push(*v);
			}
		}
		if has_bound_false_value {
			if aggregate_value.is_none() {
				// Rule 3.
				log.push_str("propagate aggregate to false");
				let _ = model.variables[aggregate.var()]
					.domain
					.intersect_with_interval(0, 0);
				model.mark_constraint_inactive(c);
				return true;
			} else if aggregate_value == Some(0) {
				model.mark_constraint_inactive(c);
				return true;
			}
			return false;
		}
		if unbound.is_empty() {
			// Rule 4.
			if aggregate_value.is_none() {
				log.push_str("propagate aggregate to true");
				let _ = model.variables[aggregate.var()]
					.domain
					.intersect_with_interval(1, 1);
				model.mark_constraint_inactive(c);
				return true;
			}
			return false;
		}
		if unbound.len() < vars.len() {
			// Rule 5.
			log.push_str("reduce array");
			model.constraints[c].arguments[0] = Argument::VarArray(unbound);
			return true;
		}
		false
	}

	/// Simplifies and reduces `array_bool_or([b1, .., bn], b0)`.
	///
	/// Rule 1: a single-element array collapses to `bool_eq(b1, b0)`.
	///
	/// Rule 2: a false aggregate assigns false to every element and
	/// deactivates.
	///
	/// Rule 3: an element fixed to true assigns true to the aggregate and
	/// deactivates.
	///
	/// Rule 4: all elements fixed to false assign false to the aggregate
	/// and deactivate.
	///
	/// Rule 5: elements already fixed to false are stripped from the array.
	pub(crate) fn presolve_array_bool_or(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let vars = model.constraints[c].arguments[0].vars().to_vec();
		if vars.len() == 1 {
			// Rule 1.
			let ct = &mut model.constraints[c];
			ct.ty = "bool_eq".into();
			ct.arguments[0] = Argument::Var(vars[0]);
			return true;
		}
		let aggregate = model.constraints[c].arguments[1].clone();
		let aggregate_value = model.arg_value(&aggregate);
		if !model.constraints[c].presolve_propagation_done && aggregate_value == Some(0) {
			// Rule 2. The assignment is only sound when every element can
			// still take the value.
			if vars.iter().any(|v| !model.variables[*v].domain.contains(0)) {
				return false;
			}
			log.push_str("propagate constants");
			for v in &vars {
				let _ = model.variables[*v].domain.intersect_with_interval(0, 0);
			}
			model.mark_constraint_inactive(c);
			return true;
		}
		let mut has_bound_true_value = false;
		let mut unbound = Vec::new();
		for v in &vars {
			let domain = &model.variables[*v].domain;
			if domain.has_one_value() {
				has_bound_true_value |= domain.min() == 1;
			} else {
				unbound.push(*v);
			}
		}
		if has_bound_true_value {
			if aggregate_value.is_none() {
				// Rule 3.
				log.push_str("propagate aggregate to true");
				let _ = model.variables[aggregate.var()]
					.domain
					.intersect_with_interval(1, 1);
				model.mark_constraint_inactive(c);
				return true;
			} else if aggregate_value == Some(1) {
				model.mark_constraint_inactive(c);
				return true;
			}
			return false;
		}
		if unbound.is_empty() {
			// Rule 4.
			if aggregate_value.is_none() {
				log.push_str("propagate aggregate to false");
				let _ = model.variables[aggregate.var()]
					.domain
					.intersect_with_interval(0, 0);
				model.mark_constraint_inactive(c);
				return true;
			}
			return false;
		}
		if unbound.len() < vars.len() {
			// Rule 5.
			log.push_str("reduce array");
			model.constraints[c].arguments[0] = Argument::VarArray(unbound);
			return true;
		}
		false
	}

	/// Simplifies `bool_clause([b1, ..][b'1, ..])`.
	///
	/// Rule 1: one positive and one negative literal become
	/// `bool_le(b'1, b1)`.
	///
	/// Rule 2: a single constant positive side settles the clause, or
	/// forces the negative literal to false.
	///
	/// Rule 3: a single constant negative side settles the clause, or
	/// reduces it to `array_bool_or`/`bool_eq` over the positive side.
	pub(crate) fn presolve_bool_clause(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		// Rule 1.
		if a0.vars().len() == 1 && a1.vars().len() == 1 {
			log.push_str("rewrite as implication");
			let ct = &mut model.constraints[c];
			ct.arguments[0] = Argument::Var(a1.vars()[0]);
			ct.arguments[1] = Argument::Var(a0.vars()[0]);
			ct.ty = "bool_le".into();
			return true;
		}
		// Rule 2.
		if let (Argument::IntList(values), 1) = (&a0, a1.vars().len()) {
			if values.len() == 1 {
				log.push_str("simplify constraint");
				let value = values[0];
				if value != 0 {
					model.mark_constraint_inactive(c);
				} else {
					let ct = &mut model.constraints[c];
					ct.arguments[0] = Argument::Var(a1.vars()[0]);
					ct.arguments[1] = Argument::IntValue(0);
					ct.ty = "bool_eq".into();
				}
				return true;
			}
		}
		// Rule 3.
		if let Argument::IntList(values) = &a1 {
			if values.len() == 1 {
				log.push_str("simplify constraint");
				let value = values[0];
				if value != 0 {
					if a0.vars().len() > 1 {
						let ct = &mut model.constraints[c];
						ct.arguments[1] = Argument::IntValue(1);
						ct.ty = "array_bool_or".into();
						return true;
					} else if a0.vars().len() == 1 {
						let ct = &mut model.constraints[c];
						ct.arguments[0] = Argument::Var(a0.vars()[0]);
						ct.arguments[1] = Argument::IntValue(1);
						ct.ty = "bool_eq".into();
						return true;
					}
				} else {
					model.mark_constraint_inactive(c);
					return true;
				}
			}
		}
		false
	}

	/// Simplifies `bool_eq_reif(b1, t, b2)` and `bool_ne_reif(b1, t, b2)`
	/// when one compared operand is fixed: the constraint collapses to
	/// `bool_eq` or `bool_not` depending on the operator and the fixed
	/// value.
	pub(crate) fn presolve_bool_eq_ne_reif(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		debug_assert!(matches!(
			model.constraints[c].ty.as_str(),
			"bool_eq_reif" | "bool_ne_reif"
		));
		for fixed_index in [1usize, 0] {
			let arg = model.constraints[c].arguments[fixed_index].clone();
			if let Some(value) = model.arg_value(&arg) {
				log.push_str("simplify constraint");
				let is_eq = model.constraints[c].ty == "bool_eq_reif";
				let ct = &mut model.constraints[c];
				ct.remove_arg(fixed_index);
				ct.ty = if (is_eq && value == 1) || (!is_eq && value == 0) {
					"bool_eq"
				} else {
					"bool_not"
				}
				.into();
				return true;
			}
		}
		false
	}

	/// Propagates `bool_not` over an undetermined pair: fixes the other
	/// side when one side is fixed, and otherwise opportunistically marks
	/// one of the two sides as the constraint's target variable.
	pub(crate) fn presolve_bool_not(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a1) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[1].clone())
		};
		if let (Some(value), true) = (model.arg_value(&a0), a1.is_variable()) {
			log.push_str("propagate constants");
			let negated = IntVal::from(value == 0);
			let _ = model.variables[a1.var()]
				.domain
				.intersect_with_interval(negated, negated);
			model.mark_constraint_inactive(c);
			return true;
		} else if let (Some(value), true) = (model.arg_value(&a1), a0.is_variable()) {
			log.push_str("propagate constants");
			let negated = IntVal::from(value == 0);
			let _ = model.variables[a0.var()]
				.domain
				.intersect_with_interval(negated, negated);
			model.mark_constraint_inactive(c);
			return true;
		}
		if model.constraints[c].target_variable.is_some() {
			return false;
		}
		for arg in [&a0, &a1] {
			if !arg.is_variable() {
				continue;
			}
			let var = arg.var();
			if model.variables[var].defining_constraint.is_none()
				&& !model.variables[var].domain.has_one_value()
			{
				log.push_str("set target variable");
				model.set_target_variable(c, var);
				return true;
			}
		}
		false
	}

	/// Simplifies `bool_xor(b1, b2, b3)` when any operand is fixed: the
	/// remaining two operands relate by `bool_not` (fixed true) or
	/// `bool_eq` (fixed false).
	pub(crate) fn presolve_bool_xor(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		for fixed_index in 0..3usize {
			let arg = model.constraints[c].arguments[fixed_index].clone();
			if let Some(value) = model.arg_value(&arg) {
				log.push_str("simplify constraint");
				let ct = &mut model.constraints[c];
				ct.remove_arg(fixed_index);
				ct.ty = if value == 1 { "bool_not" } else { "bool_eq" }.into();
				return true;
			}
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use expect_test::expect;

	use crate::{Argument, Domain, Model, Presolver};

	#[test]
	fn test_array_bool_or_fixed_true_element() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::singleton(1));
		let b0 = model.new_var("b0", Domain::boolean());
		let c = model.add_constraint(
			"array_bool_or",
			vec![Argument::VarArray(vec![b1, b2]), Argument::Var(b0)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_bool_or(&mut model, c, &mut log));
		assert_eq!(model.variables[b0].domain.value(), 1);
		assert!(!model.constraints[c].active);
	}

	#[test]
	fn test_array_bool_or_false_aggregate() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint(
			"array_bool_or",
			vec![Argument::VarArray(vec![b1, b2]), Argument::IntValue(0)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_bool_or(&mut model, c, &mut log));
		assert_eq!(model.variables[b1].domain.value(), 0);
		assert_eq!(model.variables[b2].domain.value(), 0);
		assert!(!model.constraints[c].active);
	}

	#[test]
	fn test_array_bool_and_strips_resolved_elements() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::singleton(1));
		let b3 = model.new_var("b3", Domain::boolean());
		let b0 = model.new_var("b0", Domain::boolean());
		let c = model.add_constraint(
			"array_bool_and",
			vec![Argument::VarArray(vec![b1, b2, b3]), Argument::Var(b0)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_bool_and(&mut model, c, &mut log));
		expect!["array_bool_and([b1, b3], b0)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_array_bool_and_singleton_collapses() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b0 = model.new_var("b0", Domain::boolean());
		let c = model.add_constraint(
			"array_bool_and",
			vec![Argument::VarArray(vec![b1]), Argument::Var(b0)],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_bool_and(&mut model, c, &mut log));
		expect!["bool_eq(b1, b0)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_bool_xor_with_fixed_operand() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint(
			"bool_xor",
			vec![
				Argument::Var(b1),
				Argument::IntValue(1),
				Argument::Var(b2),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_bool_xor(&mut model, c, &mut log));
		expect!["bool_not(b1, b2)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_bool_not_propagates_fixed_side() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::singleton(0));
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint("bool_not", vec![Argument::Var(b1), Argument::Var(b2)]);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_bool_not(&mut model, c, &mut log));
		assert_eq!(model.variables[b2].domain.value(), 1);
		assert!(!model.constraints[c].active);
	}

	#[test]
	fn test_bool_not_marks_target() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint("bool_not", vec![Argument::Var(b1), Argument::Var(b2)]);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_bool_not(&mut model, c, &mut log));
		assert_eq!(model.constraints[c].target_variable, Some(b1));
		assert_eq!(model.variables[b1].defining_constraint, Some(c));
	}

	#[test]
	fn test_bool_clause_binary_becomes_implication() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint(
			"bool_clause",
			vec![
				Argument::VarArray(vec![b1]),
				Argument::VarArray(vec![b2]),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_bool_clause(&mut model, c, &mut log));
		expect!["bool_le(b2, b1)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_bool_eq_reif_fixed_middle() {
		let mut model = Model::default();
		let b1 = model.new_var("b1", Domain::boolean());
		let b2 = model.new_var("b2", Domain::boolean());
		let c = model.add_constraint(
			"bool_ne_reif",
			vec![
				Argument::Var(b1),
				Argument::IntValue(1),
				Argument::Var(b2),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_bool_eq_ne_reif(&mut model, c, &mut log));
		expect!["bool_not(b1, b2)"].assert_eq(&model.constraint_to_string(c));
	}
}
