//! Rewrite rules for the 1-based array element constraints
//! `array_int_element` and `array_var_int_element`.

use crate::{
	model::{argument::Argument, constraint::CtRef},
	presolve::Presolver,
	IntVal, Model,
};

/// Whether the values form a strictly increasing contiguous run, i.e.
/// `values[i + 1] == values[i] + 1` everywhere.
fn is_increasing_contiguous(values: &[IntVal]) -> bool {
	values.windows(2).all(|w| w[1] == w[0] + 1)
}

impl Presolver {
	/// Propagates `array_int_element(x, [c1, .., cn], y)`.
	///
	/// Rule 1: positions whose value cannot satisfy the current domain of
	/// `y` are discarded from both ends, narrowing the index domain and
	/// truncating the array.
	///
	/// Rule 2: the domain of `y` is intersected with the set of array
	/// values (flag-guarded so the intersection runs once).
	pub(crate) fn presolve_array_int_element(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let (a0, a2) = {
			let ct = &model.constraints[c];
			(ct.arguments[0].clone(), ct.arguments[2].clone())
		};
		if a0.vars().len() == 1 && !model.arg_has_one_value(&a0) {
			// Rule 1.
			let index_var = a0.var();
			let (target_min, target_max) = match model.arg_value(&a2) {
				Some(value) => (value, value),
				None => {
					let domain = &model.variables[a2.var()].domain;
					(domain.min(), domain.max())
				}
			};
			let values = model.constraints[c].arguments[1].int_list().to_vec();
			let index_domain = &model.variables[index_var].domain;
			let (index_min, index_max) = (index_domain.min(), index_domain.max());

			let mut last_index = index_max.min(values.len() as IntVal);
			while last_index >= 1 {
				let value = values[last_index as usize - 1];
				if value < target_min || value > target_max {
					last_index -= 1;
				} else {
					break;
				}
			}
			let mut first_index = index_min.max(1);
			while first_index <= last_index {
				let value = values[first_index as usize - 1];
				if value < target_min || value > target_max {
					first_index += 1;
				} else {
					break;
				}
			}
			if last_index < index_max || first_index > index_min {
				log.push_str(&format!(
					"filter index to [{first_index}..{last_index}] and reduce array to size {last_index}"
				));
				let _ = model.variables[index_var]
					.domain
					.intersect_with_interval(first_index, last_index);
				let mut values = values;
				values.truncate(last_index.max(0) as usize);
				model.constraints[c].arguments[1] = Argument::IntList(values);
				return true;
			}
		}
		if a2.is_variable() && !model.constraints[c].presolve_propagation_done {
			// Rule 2.
			log.push_str("propagate array values into target domain");
			let values = model.constraints[c].arguments[1].clone();
			crate::presolve::intersect_domain_with(model, a2.var(), &values);
			model.constraints[c].presolve_propagation_done = true;
			return true;
		}
		false
	}

	/// Rewrites `array_int_element(x, [c1, .., cn], y)` into simpler
	/// shapes.
	///
	/// Rule 1: an index recorded as the affine remap `x = a * x' + b` is
	/// folded into the constraint by re-slicing the array, retiring both
	/// the remap constraint and the flattened index variable.
	///
	/// Rule 2: an index recorded as a flattened 2-D shape is materialised
	/// back into the two-index element form.
	///
	/// Rule 3: a fixed index specialises the constraint to `int_eq`.
	///
	/// Rule 4: a strictly increasing contiguous array is a shifted
	/// identity: the constraint is linearised to `int_eq`/`int_lin_eq`.
	pub(crate) fn presolve_simplify_element(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		if model.constraints[c].arguments[0].vars().len() > 1 {
			return false;
		}
		let index_var = model.constraints[c].arguments[0].var();
		if let Some(mapping) = self.affine_map.get(&index_var).copied() {
			let mapping_domain = model.variables[mapping.variable].domain.clone();
			if mapping_domain.is_empty() {
				// Invalid case, ignore it.
				return false;
			}
			let index_contiguous = model.variables[index_var].domain.is_contiguous();
			if mapping_domain.min() == 0
				&& mapping.coefficient == 1
				&& mapping.offset > 1
				&& index_contiguous
			{
				// Rule 1, plain translation: drop the array prefix the
				// offset skips over and renormalise the remap to offset 1.
				log.push_str("translate array by the affine offset");
				let offset = mapping.offset - 1;
				let mut values = model.constraints[c].arguments[1].int_list().to_vec();
				let _ = values.drain(..(offset as usize).min(values.len()));
				model.constraints[c].arguments[1] = Argument::IntList(values);
				model.constraints[mapping.constraint].arguments[2] = Argument::IntValue(-1);
				if let Some(entry) = self.affine_map.get_mut(&index_var) {
					entry.offset = 1;
				}
				model.variables[index_var].domain.shift(-offset);
				return true;
			} else if mapping.offset + mapping.coefficient > 0 && mapping_domain.min() > 0 {
				// Rule 1, re-slice the array through the mapping.
				let values = model.constraints[c].arguments[1].int_list().to_vec();
				let mut new_values = Vec::new();
				for i in 1..=mapping_domain.max() {
					let index = i * mapping.coefficient + mapping.offset - 1;
					if index < 0 {
						return false;
					}
					if index as usize >= values.len() {
						break;
					}
					new_values.push(values[index as usize]);
				}
				log.push_str("fold affine remap into the array");
				let ct = &mut model.constraints[c];
				ct.arguments[0] = Argument::Var(mapping.variable);
				ct.arguments[1] = if new_values.len() == 1 {
					Argument::IntValue(new_values[0])
				} else {
					Argument::IntList(new_values.clone())
				};
				ct.presolve_propagation_done = false;
				let _ = model.variables[mapping.variable]
					.domain
					.intersect_with_interval(1, new_values.len() as IntVal);
				model.mark_constraint_inactive(mapping.constraint);
				model.variables[index_var].active = false;
				return true;
			}
		}
		if let Some(mapping) = self.array2d_index_map.get(&index_var).copied() {
			// Rule 2.
			log.push_str("rewrite as a 2d element");
			let ct = &mut model.constraints[c];
			ct.arguments[0] = Argument::VarArray(vec![mapping.variable1, mapping.variable2]);
			ct.arguments
				.push(Argument::IntList(vec![mapping.coefficient, 1]));
			ct.arguments.push(Argument::IntValue(mapping.offset));
			model.remove_target_variable(c);
			model.variables[index_var].active = false;
			model.mark_constraint_inactive(mapping.constraint);
			return true;
		}
		if model.variables[index_var].domain.has_one_value() {
			// Rule 3.
			let index = model.variables[index_var].domain.value() - 1;
			let value = model.constraints[c].arguments[1].int_list()[index as usize];
			log.push_str("specialise fixed index to equality");
			let ct = &mut model.constraints[c];
			ct.ty = "int_eq".into();
			ct.arguments[0] = Argument::IntValue(value);
			ct.remove_arg(1);
			return true;
		}
		{
			let index_domain = &model.variables[index_var].domain;
			let len = model.constraints[c].arguments[1].int_list().len() as IntVal;
			let max = index_domain.max();
			if index_domain.is_contiguous() && max >= 1 && max < len {
				// The tail of the array can never be addressed.
				log.push_str("reduce array");
				let mut values = model.constraints[c].arguments[1].int_list().to_vec();
				values.truncate(max as usize);
				let ct = &mut model.constraints[c];
				ct.arguments[1] = Argument::IntList(values);
				ct.presolve_propagation_done = false;
				return true;
			}
		}
		let values = model.constraints[c].arguments[1].int_list().to_vec();
		if !values.is_empty() && is_increasing_contiguous(&values) {
			// Rule 4.
			let start = values[0];
			log.push_str("linearise shifted identity");
			if start == 1 {
				let ct = &mut model.constraints[c];
				ct.ty = "int_eq".into();
				ct.remove_arg(1);
			} else {
				let target = model.constraints[c].arguments[2].var();
				let ct = &mut model.constraints[c];
				ct.ty = "int_lin_eq".into();
				ct.arguments[0] = Argument::IntList(vec![-1, 1]);
				ct.arguments[1] = Argument::VarArray(vec![target, index_var]);
				ct.arguments[2] = Argument::IntValue(1 - start);
			}
			return true;
		}
		false
	}

	/// Simplifies `array_var_int_element(x, [x1, .., xn], y)`.
	///
	/// Rule 1: an all-fixed variable array becomes `array_int_element` over
	/// the fixed values.
	///
	/// Rule 2: a fixed index specialises the constraint to an equality
	/// with the selected array variable.
	///
	/// Rule 3: an index recorded as an affine remap is folded in by
	/// re-slicing the variable array, retiring the remap constraint and the
	/// flattened index variable.
	pub(crate) fn presolve_simplify_expr_element(
		&mut self,
		model: &mut Model,
		c: CtRef,
		log: &mut String,
	) -> bool {
		let array_vars = model.constraints[c].arguments[1].vars().to_vec();
		if array_vars
			.iter()
			.all(|v| model.variables[*v].domain.has_one_value())
		{
			// Rule 1.
			log.push_str("rewrite as constant element");
			let values = array_vars
				.iter()
				.map(|v| model.variables[*v].domain.min())
				.collect();
			let ct = &mut model.constraints[c];
			ct.arguments[1] = Argument::IntList(values);
			ct.ty = "array_int_element".into();
			return true;
		}
		let index_var = model.constraints[c].arguments[0].var();
		if model.variables[index_var].domain.has_one_value() {
			// Rule 2, arrays are 1 based.
			let position = model.variables[index_var].domain.min() - 1;
			let expr = array_vars[position as usize];
			log.push_str("specialise fixed index to equality");
			let ct = &mut model.constraints[c];
			ct.ty = "int_eq".into();
			ct.arguments[0] = Argument::Var(expr);
			ct.remove_arg(1);
			return true;
		} else if let Some(mapping) = self.affine_map.get(&index_var).copied() {
			// Rule 3.
			let mapping_domain = model.variables[mapping.variable].domain.clone();
			if mapping_domain.is_empty()
				|| mapping_domain.min() != 1
				|| mapping.offset + mapping.coefficient <= 0
			{
				// Invalid case, ignore it.
				return false;
			}
			let mut new_vars = Vec::new();
			for i in mapping_domain.min()..=mapping_domain.max() {
				let index = i * mapping.coefficient + mapping.offset - 1;
				if index < 0 {
					return false;
				}
				if index as usize >= array_vars.len() {
					break;
				}
				new_vars.push(array_vars[index as usize]);
			}
			log.push_str("fold affine remap into the array");
			let ct = &mut model.constraints[c];
			ct.arguments[0] = Argument::Var(mapping.variable);
			ct.arguments[1] = Argument::VarArray(new_vars);
			ct.presolve_propagation_done = false;
			model.mark_constraint_inactive(mapping.constraint);
			model.variables[index_var].active = false;
			return true;
		}
		let index_domain = &model.variables[index_var].domain;
		let max = index_domain.max();
		if index_domain.is_contiguous() && max >= 1 && (max as usize) < array_vars.len() {
			// The tail of the array can never be addressed.
			log.push_str("reduce array");
			let mut vars = array_vars;
			vars.truncate(max as usize);
			let ct = &mut model.constraints[c];
			ct.arguments[1] = Argument::VarArray(vars);
			ct.presolve_propagation_done = false;
			return true;
		}
		false
	}
}

#[cfg(test)]
mod tests {
	use expect_test::expect;

	use crate::{Argument, Domain, Model, Presolver};

	#[test]
	fn test_element_filters_index_against_target() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(1, 6));
		let y = model.new_var("y", Domain::interval(10, 20));
		let c = model.add_constraint(
			"array_int_element",
			vec![
				Argument::Var(x),
				Argument::IntList(vec![1, 12, 15, 3, 18, 2]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_int_element(&mut model, c, &mut log));
		// Positions 6 (value 2) and 1 (value 1) cannot satisfy y.
		assert_eq!(model.variables[x].domain.min(), 2);
		assert_eq!(model.variables[x].domain.max(), 5);
		expect!["array_int_element(x, [1, 12, 15, 3, 18], y)"]
			.assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_element_propagates_values_into_target() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(1, 3));
		let y = model.new_var("y", Domain::interval(0, 100));
		let c = model.add_constraint(
			"array_int_element",
			vec![
				Argument::Var(x),
				Argument::IntList(vec![7, 9, 7]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_array_int_element(&mut model, c, &mut log));
		assert_eq!(model.variables[y].domain.card(), 2);
		assert!(model.variables[y].domain.contains(7));
		assert!(model.variables[y].domain.contains(9));
	}

	#[test]
	fn test_element_fixed_index_becomes_equality() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::singleton(2));
		let y = model.new_var("y", Domain::interval(0, 100));
		let c = model.add_constraint(
			"array_int_element",
			vec![
				Argument::Var(x),
				Argument::IntList(vec![5, 8, 13]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_simplify_element(&mut model, c, &mut log));
		expect!["int_eq(8, y)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_element_contiguous_array_linearised() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(1, 4));
		let y = model.new_var("y", Domain::interval(0, 100));
		let c = model.add_constraint(
			"array_int_element",
			vec![
				Argument::Var(x),
				Argument::IntList(vec![5, 6, 7, 8]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_simplify_element(&mut model, c, &mut log));
		expect!["int_lin_eq([-1, 1], [y, x], -4)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_var_element_all_fixed_becomes_constant_element() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::interval(1, 2));
		let a = model.new_var("a", Domain::singleton(4));
		let b = model.new_var("b", Domain::singleton(9));
		let y = model.new_var("y", Domain::interval(0, 100));
		let c = model.add_constraint(
			"array_var_int_element",
			vec![
				Argument::Var(x),
				Argument::VarArray(vec![a, b]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_simplify_expr_element(&mut model, c, &mut log));
		expect!["array_int_element(x, [4, 9], y)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_var_element_fixed_index_selects_variable() {
		let mut model = Model::default();
		let x = model.new_var("x", Domain::singleton(1));
		let a = model.new_var("a", Domain::interval(0, 9));
		let b = model.new_var("b", Domain::interval(0, 9));
		let y = model.new_var("y", Domain::interval(0, 9));
		let c = model.add_constraint(
			"array_var_int_element",
			vec![
				Argument::Var(x),
				Argument::VarArray(vec![a, b]),
				Argument::Var(y),
			],
		);
		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(presolver.presolve_simplify_expr_element(&mut model, c, &mut log));
		expect!["int_eq(a, y)"].assert_eq(&model.constraint_to_string(c));
	}

	#[test]
	fn test_element_2d_materialisation() {
		let mut model = Model::default();
		// Front-end flattening of z = A[r][s] over a 3-wide matrix:
		// idx = 3*r + s - 3, stored with strong propagation.
		let r = model.new_var("r", Domain::interval(1, 2));
		let s = model.new_var("s", Domain::interval(1, 3));
		let idx = model.new_temp_var(Domain::interval(1, 6));
		let z = model.new_var("z", Domain::interval(0, 100));
		let remap = model.add_constraint_with_target(
			"int_lin_eq",
			vec![
				Argument::IntList(vec![-1, 3, 1]),
				Argument::VarArray(vec![idx, r, s]),
				Argument::IntValue(3),
			],
			idx,
		);
		model.constraints[remap].strong_propagation = true;
		let element = model.add_constraint(
			"array_int_element",
			vec![
				Argument::Var(idx),
				Argument::IntList(vec![11, 12, 13, 21, 22, 23]),
				Argument::Var(z),
			],
		);

		let mut presolver = Presolver::default();
		let mut log = String::new();
		assert!(!presolver.store_mapping(&mut model, remap, &mut log));
		assert!(presolver.presolve_simplify_element(&mut model, element, &mut log));
		expect!["array_int_element([r, s], [11, 12, 13, 21, 22, 23], z, [3, 1], -3)"]
			.assert_eq(&model.constraint_to_string(element));
		assert!(!model.variables[idx].active);
		assert!(!model.constraints[remap].active);
	}
}
