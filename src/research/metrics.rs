//! Scoring metrics for held-out evaluation.


/// Returns the area under the ROC curve of `scores` against labels
/// in `{-1, +1}`.
///
/// Computed from the rank statistic with averaged ranks for tied
/// scores, which equals the trapezoidal area of the ROC curve.
/// Returns `NaN` if `target` lacks one of the two classes.
///
/// Time complexity: `O(n log n)`.
/// ```
/// use miniauc::research::roc_auc;
///
/// let target = [1.0, -1.0, 1.0, -1.0];
/// assert_eq!(roc_auc(&[0.9, 0.1, 0.8, 0.3], &target), 1.0);
/// assert_eq!(roc_auc(&[0.5, 0.5, 0.5, 0.5], &target), 0.5);
/// ```
pub fn roc_auc(scores: &[f64], target: &[f64]) -> f64 {
    let n_pos = target.iter().filter(|&&y| y > 0f64).count();
    let n_neg = target.len() - n_pos;
    if n_pos == 0 || n_neg == 0 { return f64::NAN; }

    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_unstable_by(|&i, &j| scores[i].total_cmp(&scores[j]));

    // Sum of the (1-indexed) ranks of the positive examples.
    let mut rank_sum = 0f64;
    let mut start = 0;
    while start < order.len() {
        let score = scores[order[start]];
        let end = order[start + 1..].iter()
            .position(|&i| scores[i] != score)
            .map_or(order.len(), |offset| start + 1 + offset);

        let avg_rank = (start + 1 + end) as f64 / 2f64;
        let n_tied_pos = order[start..end].iter()
            .filter(|&&i| target[i] > 0f64)
            .count();
        rank_sum += avg_rank * n_tied_pos as f64;
        start = end;
    }

    let (n_pos, n_neg) = (n_pos as f64, n_neg as f64);
    (rank_sum - n_pos * (n_pos + 1f64) / 2f64) / (n_pos * n_neg)
}
