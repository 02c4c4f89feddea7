//! Numerical constants shared by the optimizers and the harness.

/// Substituted for `D` and `beta` when a concentration bound is vacuous.
pub const VACUOUS_BOUND_SENTINEL: f64 = 1e7;

/// Number of L1-then-L2 rounds used by the hot-path block projections.
pub const ALTERNATING_ROUNDS: usize = 2;

/// Hard cap on the iterative alternating projections.
pub const MAX_ALTERNATING_ITER: usize = 1_000;

/// Feasibility slack for the iterative alternating projections.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// The first geometric recording point is `2^GEOMETRIC_START_EXP`.
pub const GEOMETRIC_START_EXP: f64 = 4.0;

/// Default bound on the norm of each example.
pub const DEFAULT_KAPPA: f64 = 1.0;

/// Default radius `R`.
pub const DEFAULT_RADIUS:     f64 = 1.0;
/// Default step-size scale `c`.
pub const DEFAULT_STEP_SCALE: f64 = 1.0;
/// Default failure probability of FSAUC's bounds.
pub const DEFAULT_DELTA:      f64 = 0.1;
/// Default budget `T` of FSAUC.
pub const DEFAULT_N_ITER:   usize = 1_000;
/// Default Bernstein degree of SAUC.
pub const DEFAULT_DEGREE:   usize = 5;
