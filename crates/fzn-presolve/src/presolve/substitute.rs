//! The variable-substitution subsystem: a union-find forest over the
//! variable arena, and the batch rewrite that replaces every reference to an
//! eliminated variable by its surviving representative.

use std::collections::BTreeSet;

use tracing::trace;

use crate::{
	model::{annotation::Annotation, argument::Argument, constraint::CtRef, variable::VarRef},
	presolve::Presolver,
	Model,
};

impl Presolver {
	/// Records that `from` and `to` denote the same value, eliminating one
	/// of the two.
	///
	/// Both endpoints are resolved to their current representative first.
	/// A user-declared variable is preferred as the survivor over a
	/// front-end temporary. When the resolved endpoints differ, the
	/// eliminated variable's defining-constraint link is detached (so the
	/// survivor cannot end up claimed by two constraints), the survivor's
	/// domain is intersected with the eliminated domain, the eliminated
	/// variable is deactivated, and the forest records the merge.
	///
	/// The rewrite of the references is deferred to
	/// [`Presolver::substitute_everywhere`].
	pub(crate) fn add_substitution(&mut self, model: &mut Model, from: VarRef, to: VarRef) {
		let mut from = self.find_representative(from);
		let mut to = self.find_representative(to);
		if model.variables[to].temporary && !model.variables[from].temporary {
			// Keep the user-declared variable as the representative.
			std::mem::swap(&mut from, &mut to);
		}
		if from == to {
			return;
		}
		trace!(
			"mark {} as equivalent to {}",
			model.variables[from].name,
			model.variables[to].name
		);
		if let Some(defining) = model.variables[from].defining_constraint {
			trace!(
				"  - break target variable on {}",
				model.constraint_to_string(defining)
			);
			model.remove_target_variable(defining);
		}
		let from_domain = model.variables[from].domain.clone();
		let _ = model.variables[to].domain.intersect_with_domain(&from_domain);
		model.variables[from].active = false;
		let _ = self.var_representative_map.insert(from, to);
	}

	/// Resolves a variable to its current representative, compressing the
	/// visited path onto the root.
	pub(crate) fn find_representative(&mut self, var: VarRef) -> VarRef {
		let mut root = var;
		while let Some(&parent) = self.var_representative_map.get(&root) {
			if parent == root {
				break;
			}
			root = parent;
		}
		let mut walk = var;
		while walk != root {
			let parent = self.var_representative_map[&walk];
			let _ = self.var_representative_map.insert(walk, root);
			walk = parent;
		}
		root
	}

	/// Rewrites the annotation tree in place, replacing every variable
	/// reference by its representative.
	///
	/// Traversal is iterative with an explicit stack, so arbitrarily nested
	/// annotation trees cannot exhaust the call stack.
	fn substitute_annotation(&mut self, ann: &mut Annotation) {
		let mut stack = vec![ann];
		while let Some(node) = stack.pop() {
			match node {
				Annotation::List(anns) | Annotation::Call { arguments: anns, .. } => {
					stack.extend(anns.iter_mut());
				}
				Annotation::Var(var) => *var = self.find_representative(*var),
				Annotation::VarArray(vars) => {
					for var in vars {
						*var = self.find_representative(*var);
					}
				}
				Annotation::Atom(_) | Annotation::Int(_) => {}
			}
		}
	}

	/// Applies the pending substitution batch to the whole model: every
	/// constraint referencing an eliminated variable is rewritten (and the
	/// inverse index updated for the new references), target links are
	/// re-resolved, and the search annotations and output descriptors are
	/// walked the same way.
	///
	/// Because the domains of the two merged variables may each have been
	/// narrowed independently during the same dispatch pass, every
	/// survivor's domain is re-intersected with the eliminated domain one
	/// more time at the end.
	pub(crate) fn substitute_everywhere(&mut self, model: &mut Model) {
		let impacted: BTreeSet<CtRef> = self
			.var_representative_map
			.keys()
			.filter_map(|var| self.var_to_constraints.get(var))
			.flatten()
			.copied()
			.collect();
		for c in impacted {
			if !model.constraints[c].active {
				continue;
			}
			let mut arguments = std::mem::take(&mut model.constraints[c].arguments);
			for arg in &mut arguments {
				match arg {
					Argument::Var(var) => {
						let replacement = self.find_representative(*var);
						if replacement != *var {
							*var = replacement;
							let _ = self
								.var_to_constraints
								.entry(replacement)
								.or_default()
								.insert(c);
						}
					}
					Argument::VarArray(vars) => {
						for var in vars {
							let replacement = self.find_representative(*var);
							if replacement != *var {
								*var = replacement;
								let _ = self
									.var_to_constraints
									.entry(replacement)
									.or_default()
									.insert(c);
							}
						}
					}
					_ => {}
				}
			}
			model.constraints[c].arguments = arguments;
			if let Some(target) = model.constraints[c].target_variable {
				model.constraints[c].target_variable = Some(self.find_representative(target));
			}
		}

		let mut annotations = std::mem::take(&mut model.search_annotations);
		for ann in &mut annotations {
			self.substitute_annotation(ann);
		}
		model.search_annotations = annotations;

		let mut outputs = std::mem::take(&mut model.outputs);
		for output in &mut outputs {
			if let Some(var) = output.variable {
				output.variable = Some(self.find_representative(var));
			}
			for var in &mut output.flat_variables {
				*var = self.find_representative(*var);
			}
		}
		model.outputs = outputs;

		// Close the gap between the substitution decision and any domain
		// narrowing that happened concurrently in the same dispatch pass.
		let pairs: Vec<(VarRef, VarRef)> = self
			.var_representative_map
			.iter()
			.map(|(from, to)| (*from, *to))
			.collect();
		for (from, to) in pairs {
			let survivor = self.find_representative(to);
			let from_domain = model.variables[from].domain.clone();
			let _ = model.variables[survivor]
				.domain
				.intersect_with_domain(&from_domain);
		}
	}
}
