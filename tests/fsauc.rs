use miniauc::prelude::*;
use miniauc::AucError;
use miniauc::constants::VACUOUS_BOUND_SENTINEL;


// Twenty linearly separable points in two slightly jittered clusters.
// Positives sit around `(0.5, 0.4)`, negatives around `(-0.4, -0.5)`.
fn toy_sample(jitter: usize) -> Sample {
    let mut rows = Vec::new();
    let mut target = Vec::new();
    for i in 0..20 {
        let j = ((i * jitter) % 5) as f64 * 0.02 - 0.04;
        if i % 2 == 0 {
            rows.push(vec![0.5 + j, 0.4 - 0.5 * j]);
            target.push(1.0);
        } else {
            rows.push(vec![-0.4 + 0.5 * j, -0.5 - j]);
            target.push(-1.0);
        }
    }
    Sample::from_rows(rows, target).unwrap()
}


fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}


/// Tests for `FSAUC`.
#[cfg(test)]
pub mod fsauc_tests {
    use super::*;

    fn run(train: &Sample, test: &Sample, n_iter: usize)
        -> (LinearScorer, Trace)
    {
        let fsauc = FSAUC::init(train)
            .radius(1.0)
            .step_scale(1.0)
            .delta(0.1)
            .n_iter(n_iter);
        LoggerBuilder::new()
            .optimizer(fsauc)
            .test_sample(test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn converges_on_separable_data() {
        let train = toy_sample(7);
        let test = toy_sample(3);

        for n_iter in [50, 1_000] {
            let (_, trace) = run(&train, &test, n_iter);
            assert_eq!(trace.n_scheduled(), n_iter);
            assert_eq!(trace.len(), n_iter);
            assert_eq!(trace.n_skipped(), 0);
            assert!(trace.scores().iter().all(|s| (0.0..=1.0).contains(s)));

            let last = trace.last_score().unwrap();
            println!("T = {n_iter}, final AUC = {last}");
            assert!(last >= 0.9);
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let train = toy_sample(7);
        let test = toy_sample(3);

        let (f1, t1) = run(&train, &test, 1_000);
        let (f2, t2) = run(&train, &test, 1_000);
        assert_eq!(f1.weights(), f2.weights());
        assert_eq!(t1.iterations(), t2.iterations());
        assert_eq!(t1.scores(), t2.scores());
    }

    #[test]
    fn radius_halves_every_epoch() {
        let train = toy_sample(7);
        let mut fsauc = FSAUC::init(&train).n_iter(1_000);
        let _ = fsauc.run().unwrap();

        let history = fsauc.epoch_history();
        assert_eq!(history.len(), 2);
        assert_eq!(fsauc.epoch_len(), 500);
        assert!(close(history[0].radius, 2.0 * 3f64.sqrt()));
        assert_eq!(history[1].radius, history[0].radius / 2.0);

        let next = fsauc.epoch_context();
        assert_eq!(next.radius, history[1].radius / 2.0);

        for ctx in history.iter().chain([&next]) {
            for value in [ctx.width, ctx.beta] {
                assert!(value.is_finite() && value > 0.0);
            }
        }

        assert!(close(history[1].width, 11.328455657297344));
        assert!(close(history[1].beta, 20678.08192142828));
        assert!(close(next.width, 8.878965914514167));
        assert!(close(next.beta, 20678.08192142828));
        assert!(close(history[0].eta, 0.00838525491562421));
    }

    #[test]
    fn vacuous_bounds_fall_back_to_sentinel() {
        let train = toy_sample(7);
        let mut fsauc = FSAUC::init(&train)
            .delta(1e-6)
            .n_iter(50);
        let _ = fsauc.run().unwrap();

        let next = fsauc.epoch_context();
        assert_eq!(next.width, VACUOUS_BOUND_SENTINEL);
        assert_eq!(next.beta, VACUOUS_BOUND_SENTINEL);
    }

    #[test]
    fn too_small_budget_is_configuration_error() {
        let train = toy_sample(7);
        let err = FSAUC::init(&train).n_iter(10).run().err();
        assert!(matches!(err, Some(AucError::Configuration(_))));

        let err = FSAUC::init(&train).radius(-1.0).run().err();
        assert!(matches!(err, Some(AucError::Configuration(_))));
    }

    #[test]
    fn params_from_json() {
        let train = toy_sample(7);
        let test = toy_sample(3);

        let params = FsaucParams::from_json(
            r#"{"R": 1.0, "c": 1.0, "delta": 0.1, "T": 1000}"#
        ).unwrap();
        let fsauc = FSAUC::init(&train).params(params);
        let (f1, _) = LoggerBuilder::new()
            .optimizer(fsauc)
            .test_sample(&test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();
        let (f2, _) = run(&train, &test, 1_000);
        assert_eq!(f1, f2);
    }

    #[test]
    fn geometric_recording() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let fsauc = FSAUC::init(&train).n_iter(1_000);
        let (_, trace) = LoggerBuilder::new()
            .optimizer(fsauc)
            .test_sample(&test)
            .record(RecordSchedule::Geometric { rec: 1.0 })
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(trace.iterations(), &[16, 32, 64, 128, 256, 1_000]);
        assert!(trace.elapsed().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn estimated_kappa_is_max_norm() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let kappa = train.max_row_norm();
        assert!(kappa > 0.6 && kappa < 0.7);

        let fsauc = FSAUC::init(&train).n_iter(1_000).estimate_kappa();
        let (f, _) = LoggerBuilder::new()
            .optimizer(fsauc)
            .test_sample(&test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();
        let scores = f.confidence_all(&test);
        assert!(roc_auc(&scores, test.target()) >= 0.9);
    }
}
