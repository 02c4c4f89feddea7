use miniauc::prelude::*;
use miniauc::AucError;


/// Tests for `Logger`.
#[cfg(test)]
pub mod logger_tests {
    use super::*;

    // Fraction of correctly ordered signs, a stand-in for a custom metric.
    fn sign_accuracy(predictions: &[f64], target: &[f64]) -> f64 {
        let n_correct = predictions.iter()
            .zip(target)
            .filter(|(p, y)| **p * **y > 0f64)
            .count();
        n_correct as f64 / target.len() as f64
    }

    #[test]
    fn single_class_test_sample_is_rejected() {
        let train = gaussian_clusters(100, 3, 4.0, 0.5, 0).unwrap();
        let test = Sample::from_rows(
            vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]],
            vec![1.0, 1.0],
        ).unwrap();

        let result = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train).n_iter(1_000))
            .test_sample(&test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(AucError::Configuration(_))));
    }

    #[test]
    fn feature_count_mismatch_is_rejected() {
        let train = gaussian_clusters(200, 4, 4.0, 0.5, 0).unwrap();
        let narrow = gaussian_clusters(100, 2, 4.0, 0.5, 1).unwrap();
        let wide = gaussian_clusters(100, 6, 4.0, 0.5, 1).unwrap();

        for test in [&narrow, &wide] {
            let result = LoggerBuilder::new()
                .optimizer(FSAUC::init(&train).n_iter(1_000))
                .test_sample(test)
                .print_every(usize::MAX)
                .build()
                .unwrap()
                .run();
            assert!(matches!(result, Err(AucError::InvalidSample(_))));

            let result = LoggerBuilder::new()
                .optimizer(SAUC::init(&train, sequential_passes(200, 1)))
                .test_sample(test)
                .print_every(usize::MAX)
                .build()
                .unwrap()
                .run();
            assert!(matches!(result, Err(AucError::InvalidSample(_))));
        }

        let fsauc = FSAUC::init(&train);
        assert_eq!(fsauc.dimension(), 4);
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let train = Sample::from_rows(
            vec![
                vec![0.5, 0.4], vec![-0.4, -0.5],
                vec![f64::NAN, 0.4], vec![-0.4, -0.5],
            ],
            vec![1.0, -1.0, 1.0, -1.0],
        ).unwrap();
        let test = gaussian_clusters(20, 2, 4.0, 0.5, 1).unwrap();

        let result = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train).n_iter(50))
            .test_sample(&test)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(AucError::InvalidSample(_))));

        // The held-out sample is validated the same way.
        let clean = gaussian_clusters(20, 2, 4.0, 0.5, 0).unwrap();
        let result = LoggerBuilder::new()
            .optimizer(FSAUC::init(&clean).n_iter(50))
            .test_sample(&train)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run();
        assert!(matches!(result, Err(AucError::InvalidSample(_))));
    }

    #[test]
    fn missing_parts_are_rejected() {
        let train = gaussian_clusters(100, 3, 4.0, 0.5, 0).unwrap();
        let result = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train))
            .build();
        assert!(result.is_err());

        let result = LoggerBuilder::<FSAUC<'_>>::new()
            .test_sample(&train)
            .build();
        assert!(result.is_err());

        let result = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train))
            .test_sample(&train)
            .record(RecordSchedule::Every(0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn every_k_steps() {
        let train = gaussian_clusters(200, 4, 4.0, 0.5, 0).unwrap();
        let test = gaussian_clusters(100, 4, 4.0, 0.5, 1).unwrap();

        let (_, trace) = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train).n_iter(1_000))
            .test_sample(&test)
            .record(RecordSchedule::Every(100))
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        let expected = (1..=10).map(|k| 100 * k).collect::<Vec<_>>();
        assert_eq!(trace.iterations(), &expected[..]);
        assert!(trace.last_score().unwrap() > 0.9);
    }

    #[test]
    fn custom_score_function() {
        let train = gaussian_clusters(200, 4, 4.0, 0.5, 0).unwrap();
        let test = gaussian_clusters(100, 4, 4.0, 0.5, 1).unwrap();
        let ids = shuffled_passes(200, 1, 0);

        let (f, trace) = LoggerBuilder::new()
            .optimizer(SAUC::init(&train, ids))
            .test_sample(&test)
            .score_function(sign_accuracy)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        let scores = f.confidence_all(&test);
        let last = trace.last_score().unwrap();
        assert_eq!(last, sign_accuracy(&scores, test.target()));
        assert!(trace.scores().iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn time_limit_stops_between_epochs() {
        let train = gaussian_clusters(20_000, 50, 4.0, 1.0, 0).unwrap();
        let test = gaussian_clusters(200, 50, 4.0, 1.0, 1).unwrap();
        let fsauc = FSAUC::init(&train).n_iter(200_000);

        let (_, trace) = LoggerBuilder::new()
            .optimizer(fsauc)
            .test_sample(&test)
            .record(RecordSchedule::EpochEnd)
            .time_limit_as_millis(0)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(FSAUC::epochs_for(200_000), Some(6));
        assert_eq!(trace.n_scheduled(), 6);
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn trace_serializes_to_json() {
        let train = gaussian_clusters(200, 4, 4.0, 0.5, 0).unwrap();
        let test = gaussian_clusters(100, 4, 4.0, 0.5, 1).unwrap();

        let (_, trace) = LoggerBuilder::new()
            .optimizer(FSAUC::init(&train).n_iter(1_000))
            .test_sample(&test)
            .record(RecordSchedule::EpochEnd)
            .print_every(usize::MAX)
            .build()
            .unwrap()
            .run()
            .unwrap();

        let json = trace.to_json().unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);
        assert_eq!(trace.iterations(), &[500, 1_000]);
    }

    #[test]
    fn auc_of_known_ranking() {
        let target = [1.0, -1.0, 1.0, -1.0];
        assert_eq!(roc_auc(&[0.9, 0.1, 0.8, 0.2], &target), 1.0);
        assert_eq!(roc_auc(&[0.1, 0.9, 0.2, 0.8], &target), 0.0);
        assert_eq!(roc_auc(&[0.5, 0.5, 0.5, 0.5], &target), 0.5);
        assert!(roc_auc(&[0.1, 0.2], &[1.0, 1.0]).is_nan());
    }
}
