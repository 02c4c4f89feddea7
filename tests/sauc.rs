use miniauc::prelude::*;
use miniauc::AucError;


// Twenty linearly separable points in two slightly jittered clusters.
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


/// Tests for `SAUC`.
#[cfg(test)]
pub mod sauc_tests {
    use super::*;

    fn run(sauc: SAUC<'_>, test: &Sample) -> (LinearScorer, Trace) {
        LoggerBuilder::new()
            .optimizer(sauc)
            .test_sample(test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn converges_for_every_surrogate() {
        let train = toy_sample(7);
        let test = toy_sample(3);

        for loss in [SurrogateLoss::Hinge, SurrogateLoss::Logistic] {
            for degree in 3..=5 {
                for radius in [1.0, 0.5] {
                    let sauc = SAUC::init(&train, sequential_passes(20, 10))
                        .loss(loss)
                        .degree(degree)
                        .radius(radius);
                    let (_, trace) = run(sauc, &test);

                    assert_eq!(trace.n_scheduled(), 18);
                    assert_eq!(trace.len(), 18);
                    let last = trace.last_score().unwrap();
                    println!("{loss:?}, N = {degree}, R = {radius}: {last}");
                    assert!(last >= 0.9);
                }
            }
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let ids = shuffled_passes(20, 10, 42);

        let (f1, t1) = run(SAUC::init(&train, ids.clone()), &test);
        let (f2, t2) = run(SAUC::init(&train, ids), &test);
        assert_eq!(f1, f2);
        assert_eq!(t1.scores(), t2.scores());
    }

    #[test]
    fn bounds_of_hinge_surrogate() {
        let train = toy_sample(7);
        let mut sauc = SAUC::init(&train, sequential_passes(20, 10))
            .loss(SurrogateLoss::Hinge)
            .degree(3)
            .radius(1.0);
        let _ = sauc.run().unwrap();

        let bounds = sauc.bounds();
        assert!((bounds.r1 - 15.0).abs() < 1e-9);
        assert!((bounds.r2 - 25.6875).abs() < 1e-9);
        assert!((bounds.gamma - 267.15625).abs() < 1e-9);
    }

    #[test]
    fn non_finite_predictions_are_skipped() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let sauc = SAUC::init(&train, sequential_passes(20, 10))
            .loss(SurrogateLoss::Hinge)
            .degree(20)
            .radius(1e20);
        let (_, trace) = run(sauc, &test);

        assert_eq!(trace.n_scheduled(), 18);
        assert!(trace.len() < trace.n_scheduled());
        assert!(trace.n_skipped() > 0);
        assert_eq!(trace.len() + trace.n_skipped(), trace.n_scheduled());
    }

    #[test]
    fn every_step_recording() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let sauc = SAUC::init(&train, sequential_passes(20, 10));
        let (_, trace) = LoggerBuilder::new()
            .optimizer(sauc)
            .test_sample(&test)
            .record(RecordSchedule::EveryStep)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        // 18 epochs of lengths 1, 2, ..., 18.
        assert_eq!(trace.len(), 171);
        assert_eq!(trace.iterations().first(), Some(&1));
        assert_eq!(trace.iterations().last(), Some(&171));
    }

    #[test]
    fn unknown_loss_is_configuration_error() {
        let err = SaucParams::from_json(
            r#"{"R": 1.0, "c": 1.0, "N": 5, "name": "square", "ids": [0, 1]}"#
        ).err();
        assert!(matches!(err, Some(AucError::Configuration(_))));
    }

    #[test]
    fn params_from_json() {
        let train = toy_sample(7);
        let test = toy_sample(3);
        let ids = sequential_passes(20, 10);
        let json = format!(
            r#"{{"R": 1.0, "c": 1.0, "N": 5, "name": "logistic", "ids": {ids:?}}}"#
        );
        let params = SaucParams::from_json(&json).unwrap();
        assert_eq!(params.loss, SurrogateLoss::Logistic);

        let (f1, _) = run(SAUC::init(&train, Vec::new()).params(params), &test);
        let sauc = SAUC::init(&train, ids)
            .loss(SurrogateLoss::Logistic)
            .degree(5);
        let (f2, _) = run(sauc, &test);
        assert_eq!(f1, f2);
    }

    #[test]
    fn bad_parameters_are_configuration_errors() {
        let train = toy_sample(7);
        let ids = sequential_passes(20, 10);

        let err = SAUC::init(&train, ids.clone()).radius(0.0).run().err();
        assert!(matches!(err, Some(AucError::Configuration(_))));

        let err = SAUC::init(&train, vec![0, 1, 2, 20]).run().err();
        assert!(matches!(err, Some(AucError::Configuration(_))));

        let err = SAUC::init(&train, vec![0, 1]).run().err();
        assert!(matches!(err, Some(AucError::Configuration(_))));
    }
}
