//! Euclidean projections onto `ℓ1` balls, `ℓ2` balls,
//! and (approximately) onto their intersection.
//!
//! The block projections used on the hot path run a fixed number of
//! alternating rounds ([`ALTERNATING_ROUNDS`]) instead of iterating to
//! the exact projection onto the intersection.
//! The result always lies in the `ℓ2` ball and is close to,
//! but not necessarily inside, the `ℓ1`/box set.
//! [`PrimalRegion::alternate_until_feasible`] and
//! [`DualRegion::alternate_until_feasible`] iterate until both
//! conditions hold, up to a hard iteration cap.
use rand::Rng;

use crate::common::utils;
use crate::constants::ALTERNATING_ROUNDS;


/// Projects `v` onto the `ℓ1` ball of the given radius (Duchi et al., 2008).
///
/// Sort `|v|` in descending order, find the largest `ρ` with
/// `u[ρ] > (Σ_{j≤ρ} u[j] - radius) / (ρ + 1)`,
/// and soft-threshold every entry by the resulting shift `θ`.
///
/// Time complexity: `O(d log d)`.
pub fn project_onto_simplex_l1(v: &mut [f64], radius: f64) {
    if utils::l1_norm(v) <= radius { return; }

    let mut u = v.iter()
        .map(|x| x.abs())
        .collect::<Vec<_>>();
    u.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut cumsum = 0f64;
    let mut theta = 0f64;
    for (i, ui) in u.into_iter().enumerate() {
        cumsum += ui;
        let shift = (cumsum - radius) / (i + 1) as f64;
        if ui > shift {
            theta = shift;
        }
    }

    soft_threshold(v, theta);
}


/// Projects `v` onto the `ℓ1` ball of the given radius
/// with the randomized-pivot algorithm of Duchi et al. (2008).
///
/// Expected time complexity: `O(d)`.
/// The active set is kept as a window `work[lo..hi]` of an index buffer
/// and every round removes at least the pivot from it,
/// so the loop runs at most `d` times.
pub fn project_onto_simplex_l1_randomized<R>(
    v: &mut [f64],
    radius: f64,
    rng: &mut R,
)
    where R: Rng,
{
    if utils::l1_norm(v) <= radius { return; }

    let u = v.iter()
        .map(|x| x.abs())
        .collect::<Vec<_>>();
    let dim = u.len();
    let mut work = (0..dim).collect::<Vec<usize>>();

    let (mut lo, mut hi) = (0_usize, dim);
    let mut sum = 0f64;
    let mut rho = 0_usize;

    for _ in 0..=dim {
        if lo >= hi { break; }

        let p = rng.gen_range(lo..hi);
        work.swap(lo, p);
        let pivot = u[work[lo]];

        // work[lo..mid] holds the entries `>= pivot`, the pivot first.
        let mut mid = lo + 1;
        for j in lo + 1..hi {
            if u[work[j]] >= pivot {
                work.swap(mid, j);
                mid += 1;
            }
        }

        let delta_rho = mid - lo;
        let delta_sum = work[lo..mid].iter()
            .map(|&i| u[i])
            .sum::<f64>();

        if (sum + delta_sum) - (rho + delta_rho) as f64 * pivot < radius {
            sum += delta_sum;
            rho += delta_rho;
            lo = mid;
        } else {
            hi = mid;
            lo += 1;
        }
    }

    if rho == 0 { return; }
    let theta = (sum - radius) / rho as f64;
    soft_threshold(v, theta);
}


#[inline(always)]
fn soft_threshold(v: &mut [f64], theta: f64) {
    v.iter_mut()
        .for_each(|x| {
            *x = x.signum() * (x.abs() - theta).max(0f64);
        });
}


/// Projects `v` onto the `ℓ2` ball `{x : ‖x - center‖ ≤ radius}`.
///
/// Time complexity: `O(d)`.
pub fn project_onto_l2_ball(v: &mut [f64], center: &[f64], radius: f64) {
    let dist = utils::l2_distance(v, center);
    if dist <= radius { return; }

    let scale = radius / dist;
    v.iter_mut()
        .zip(center)
        .for_each(|(x, c)| { *x = c + scale * (*x - c); });
}


/// Projects `v` onto the `ℓ2` ball of the given radius around the origin.
pub fn project_onto_centered_l2_ball(v: &mut [f64], radius: f64) {
    let norm = utils::l2_norm(v);
    if norm <= radius { return; }

    let scale = radius / norm;
    v.iter_mut()
        .for_each(|x| { *x *= scale; });
}


/// Result of an iterative alternating projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternatingOutcome {
    /// Number of alternating rounds performed.
    pub iterations: usize,
    /// `true` if both feasibility conditions hold at exit.
    pub converged: bool,
}


/// The primal feasible set of an FSAUC epoch over `[w, a, b]`:
/// the product `{‖w‖₁ ≤ bound} × [-bound·κ, bound·κ]²`
/// intersected with the `ℓ2` ball of radius `radius` around `center`.
#[derive(Debug, Clone, Copy)]
pub struct PrimalRegion<'a> {
    /// Center of the `ℓ2` ball, of length `d + 2`.
    pub center: &'a [f64],
    /// Radius `r` of the `ℓ2` ball.
    pub radius: f64,
    /// Radius `R` of the `ℓ1` ball.
    pub bound: f64,
    /// Bound on the example norms.
    pub kappa: f64,
}


impl PrimalRegion<'_> {
    /// Applies [`ALTERNATING_ROUNDS`] rounds of
    /// `ℓ1`/box projection followed by `ℓ2` projection.
    pub fn project(&self, w: &mut [f64], a: &mut f64, b: &mut f64) {
        self.project_rounds(w, a, b, ALTERNATING_ROUNDS);
    }


    /// Applies `rounds` rounds of alternating projection.
    pub fn project_rounds(
        &self,
        w: &mut [f64],
        a: &mut f64,
        b: &mut f64,
        rounds: usize,
    )
    {
        for _ in 0..rounds {
            self.project_onto_box(w, a, b);
            self.project_onto_ball(w, a, b);
        }
    }


    /// Exact projection onto the `ℓ1`/box product set.
    pub fn project_onto_box(&self, w: &mut [f64], a: &mut f64, b: &mut f64) {
        project_onto_simplex_l1(w, self.bound);
        let cap = self.bound * self.kappa;
        *a = a.clamp(-cap, cap);
        *b = b.clamp(-cap, cap);
    }


    /// Exact projection of the concatenation `[w, a, b]`
    /// onto the `ℓ2` ball.
    pub fn project_onto_ball(&self, w: &mut [f64], a: &mut f64, b: &mut f64) {
        let dist = self.distance_to_center(w, *a, *b);
        if dist <= self.radius { return; }

        let d = w.len();
        let scale = self.radius / dist;
        w.iter_mut()
            .zip(&self.center[..d])
            .for_each(|(x, c)| { *x = c + scale * (*x - c); });
        *a = self.center[d] + scale * (*a - self.center[d]);
        *b = self.center[d + 1] + scale * (*b - self.center[d + 1]);
    }


    /// Returns the pair of
    /// the Euclidean distance from `[w, a, b]` to the `ℓ1`/box set and
    /// the amount by which `[w, a, b]` exceeds the `ℓ2` ball.
    pub fn excess(&self, w: &[f64], a: f64, b: f64) -> (f64, f64) {
        let mut pw = w.to_vec();
        let (mut pa, mut pb) = (a, b);
        self.project_onto_box(&mut pw, &mut pa, &mut pb);

        let box_dist = (
            utils::l2_distance(w, &pw).powi(2)
            + (a - pa).powi(2)
            + (b - pb).powi(2)
        ).sqrt();
        let ball_excess = (self.distance_to_center(w, a, b) - self.radius)
            .max(0f64);
        (box_dist, ball_excess)
    }


    /// Alternates projections until `[w, a, b]` lies in both sets
    /// up to `tolerance`, or `max_iter` rounds have been spent.
    /// [`FEASIBILITY_TOLERANCE`](crate::constants::FEASIBILITY_TOLERANCE) and
    /// [`MAX_ALTERNATING_ITER`](crate::constants::MAX_ALTERNATING_ITER)
    /// are the usual choices.
    pub fn alternate_until_feasible(
        &self,
        w: &mut [f64],
        a: &mut f64,
        b: &mut f64,
        tolerance: f64,
        max_iter: usize,
    ) -> AlternatingOutcome
    {
        for iterations in 0..max_iter {
            if self.is_feasible(w, *a, *b, tolerance) {
                return AlternatingOutcome { iterations, converged: true };
            }
            self.project_rounds(w, a, b, 1);
        }
        let converged = self.is_feasible(w, *a, *b, tolerance);
        AlternatingOutcome { iterations: max_iter, converged }
    }


    fn is_feasible(&self, w: &[f64], a: f64, b: f64, tolerance: f64) -> bool {
        let cap = self.bound * self.kappa + tolerance;
        utils::l1_norm(w) <= self.bound + tolerance
            && a.abs() <= cap
            && b.abs() <= cap
            && self.distance_to_center(w, a, b) <= self.radius + tolerance
    }


    fn distance_to_center(&self, w: &[f64], a: f64, b: f64) -> f64 {
        let d = w.len();
        let sq = w.iter()
            .zip(&self.center[..d])
            .map(|(x, c)| (x - c).powi(2))
            .sum::<f64>();
        (
            sq
            + (a - self.center[d]).powi(2)
            + (b - self.center[d + 1]).powi(2)
        ).sqrt()
    }
}


/// The dual feasible set of an FSAUC epoch:
/// the box `[-2·bound·κ, 2·bound·κ]^k` intersected with the `ℓ2` ball
/// of radius `width` around `center`.
#[derive(Debug, Clone, Copy)]
pub struct DualRegion<'a> {
    /// Center of the `ℓ2` ball.
    pub center: &'a [f64],
    /// Radius `D` of the `ℓ2` ball.
    pub width: f64,
    /// Radius `R` of the primal `ℓ1` ball.
    pub bound: f64,
    /// Bound on the example norms.
    pub kappa: f64,
}


impl DualRegion<'_> {
    /// Applies [`ALTERNATING_ROUNDS`] rounds of
    /// box projection followed by `ℓ2` projection.
    pub fn project(&self, alpha: &mut [f64]) {
        self.project_rounds(alpha, ALTERNATING_ROUNDS);
    }


    /// Applies `rounds` rounds of alternating projection.
    pub fn project_rounds(&self, alpha: &mut [f64], rounds: usize) {
        let cap = 2f64 * self.bound * self.kappa;
        for _ in 0..rounds {
            alpha.iter_mut()
                .for_each(|x| { *x = x.clamp(-cap, cap); });
            project_onto_l2_ball(alpha, self.center, self.width);
        }
    }


    /// Alternates projections until `alpha` lies in both sets
    /// up to `tolerance`, or `max_iter` rounds have been spent.
    pub fn alternate_until_feasible(
        &self,
        alpha: &mut [f64],
        tolerance: f64,
        max_iter: usize,
    ) -> AlternatingOutcome
    {
        for iterations in 0..max_iter {
            if self.is_feasible(alpha, tolerance) {
                return AlternatingOutcome { iterations, converged: true };
            }
            self.project_rounds(alpha, 1);
        }
        let converged = self.is_feasible(alpha, tolerance);
        AlternatingOutcome { iterations: max_iter, converged }
    }


    fn is_feasible(&self, alpha: &[f64], tolerance: f64) -> bool {
        let cap = 2f64 * self.bound * self.kappa + tolerance;
        alpha.iter().all(|x| x.abs() <= cap)
            && utils::l2_distance(alpha, self.center) <= self.width + tolerance
    }
}


/// Two rounds of alternating projection of `[w, a, b]` onto
/// `{‖w‖₁ ≤ R, |a| ≤ Rκ, |b| ≤ Rκ}` and the `ℓ2` ball of radius `r`
/// around `center`.
pub fn project_primal_block(
    w: &mut [f64],
    a: &mut f64,
    b: &mut f64,
    center: &[f64],
    r: f64,
    bound: f64,
    kappa: f64,
)
{
    let region = PrimalRegion { center, radius: r, bound, kappa };
    region.project(w, a, b);
}


/// Two rounds of alternating projection of `alpha` onto
/// the box `[-2Rκ, 2Rκ]` and the `ℓ2` ball of radius `width`
/// around `center`.
pub fn project_dual_block(
    alpha: &mut [f64],
    center: &[f64],
    width: f64,
    bound: f64,
    kappa: f64,
)
{
    let region = DualRegion { center, width, bound, kappa };
    region.project(alpha);
}
