use crate::angle_table::{angle_table, AngleTable};
use cordic_math::config::MAX_ITERATIONS;
use cordic_math::FixedPoint16;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// CORDIC registers. X and Y carry cosh/sinh scaled by the rotation gain,
/// Z carries the angle still to be rotated away.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub x: FixedPoint16,
    pub y: FixedPoint16,
    pub z: FixedPoint16,
    pub iteration_count: usize,
    pub converged: bool,
}

impl RotationState {
    pub fn new(x: FixedPoint16, y: FixedPoint16, z: FixedPoint16) -> Self {
        Self {
            x,
            y,
            z,
            iteration_count: 0,
            converged: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationResult {
    pub final_state: RotationState,
    /// 1-based angle table indices in the order they were applied, repeats kept
    pub selected_angles: Vec<usize>,
    pub iterations_used: usize,
    /// True only when Z actually converged, not when the budget ran out
    pub converged_successfully: bool,
}

/// Greedy hyperbolic CORDIC.
///
/// Unlike the textbook schedule (k = 1, 2, 3, ...), each step picks the
/// largest tabulated angle not exceeding |Z|, so an index may be reused.
pub struct RotationEngine<'a> {
    table: &'a AngleTable,
    max_iterations: usize,
}

impl RotationEngine<'static> {
    /// Engine over the process-wide angle table.
    pub fn new() -> Self {
        Self::with_table(angle_table())
    }
}

impl Default for RotationEngine<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> RotationEngine<'a> {
    pub fn with_table(table: &'a AngleTable) -> Self {
        Self {
            table,
            max_iterations: MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn table(&self) -> &'a AngleTable {
        self.table
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run rotations until Z converges, no angle is available, or the budget is spent.
    pub fn iterate(&self, initial: RotationState) -> IterationResult {
        let mut state = initial;
        let mut selected_angles = Vec::with_capacity(self.max_iterations);
        let mut converged_successfully = false;

        for iter in 0..self.max_iterations {
            if state.z.has_converged() {
                state.converged = true;
                converged_successfully = true;
                break;
            }

            let Some(index) = self.table.select_greedy(state.z.to_f64()) else {
                debug!(iter, "no valid angle, stopping");
                break;
            };

            selected_angles.push(index);
            state = self.step(&state, index);
            state.iteration_count = iter + 1;

            trace!(
                iter,
                index,
                z = state.z.to_f64(),
                x = state.x.to_f64(),
                y = state.y.to_f64(),
                "rotation step"
            );
        }

        // The last step may land exactly on zero with no budget left to observe it
        if !converged_successfully && state.z.has_converged() {
            state.converged = true;
            converged_successfully = true;
        }

        if !converged_successfully {
            debug!(
                residual = state.z.to_f64(),
                iterations = selected_angles.len(),
                "iteration budget exhausted before convergence"
            );
        }

        IterationResult {
            final_state: state,
            iterations_used: selected_angles.len(),
            selected_angles,
            converged_successfully,
        }
    }

    /// One hyperbolic rotation with s = sign(Z):
    ///
    /// X' = X + s·(Y >> k)
    /// Y' = Y + s·(X >> k)
    /// Z' = Z - s·α_k
    ///
    /// Both shifts read the pre-update registers. An invalid index leaves the
    /// state untouched.
    pub fn step(&self, state: &RotationState, index: usize) -> RotationState {
        let Ok(entry) = self.table.get(index) else {
            return *state;
        };

        let positive = state.z.is_non_negative();
        let shifted_y = state.y >> entry.shift;
        let shifted_x = state.x >> entry.shift;

        RotationState {
            x: state.x + shifted_y.apply_sign(positive),
            y: state.y + shifted_x.apply_sign(positive),
            z: state.z - entry.fixed_angle.apply_sign(positive),
            ..*state
        }
    }
}
