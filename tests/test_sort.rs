#[cfg(test)]
mod sort_properties {
    use std::env;

    use lazy_static::lazy_static;
    use rand::prelude::SliceRandom;
    use rand::rngs::StdRng;
    use rand::{thread_rng, Rng, SeedableRng};

    use sortviz::distribution::cumulative_counts;
    use sortviz::{
        sort, sort_headless, Algorithm, ArrayModel, InstantClock, RecordingRenderer, SortKey, Speed, StepScheduler,
        VisualizerError,
    };

    lazy_static! {
        static ref SEED: u64 = initialize_seed();
        static ref NUM_RUNS: usize = get_num_runs();
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Tagged {
        key: u32,
        tag: usize,
    }

    impl SortKey for Tagged {
        fn key(&self) -> u32 {
            self.key
        }
    }

    fn verify_sorted_permutation(input: &[u32], output: &[u32], algorithm: Algorithm) {
        for i in 1..output.len() {
            assert!(
                output[i - 1] <= output[i],
                "{algorithm}: not sorted! {} (i={}) > {} (i={}). Seed: {}",
                output[i - 1],
                i - 1,
                output[i],
                i,
                *SEED
            );
        }
        let mut expected = input.to_vec();
        expected.sort_unstable();
        assert_eq!(output, expected.as_slice(), "{algorithm}: not a permutation of the input");
    }

    fn run_recorded(input: &[u32], algorithm: Algorithm) -> (Vec<u32>, RecordingRenderer, sortviz::RunReport) {
        let mut arr = ArrayModel::from_vec(input.to_vec());
        let mut rec = RecordingRenderer::new();
        let scheduler = StepScheduler::detached(InstantClock::new(), Speed::default());
        let report = sort(&mut arr, algorithm, &mut rec, scheduler).unwrap();
        (arr.into_vec(), rec, report)
    }

    #[test]
    fn edge_inputs() {
        let inputs: Vec<Vec<u32>> = vec![
            vec![],
            vec![42],
            vec![7, 7, 7, 7, 7],
            vec![1, 2, 3, 4, 5, 6, 7, 8],
            vec![8, 7, 6, 5, 4, 3, 2, 1],
            vec![3, 1, 3, 1, 2, 2, 3, 1],
            vec![500, 25],
            vec![0, u32::MAX, 1, u32::MAX - 1],
        ];
        for algorithm in Algorithm::ALL {
            if algorithm == Algorithm::Counting {
                continue;
            }
            for input in &inputs {
                let mut arr = ArrayModel::from_vec(input.clone());
                sort_headless(&mut arr, algorithm).unwrap();
                verify_sorted_permutation(input, arr.as_slice(), algorithm);
            }
        }
        for input in &inputs[..inputs.len() - 1] {
            let mut arr = ArrayModel::from_vec(input.clone());
            sort_headless(&mut arr, Algorithm::Counting).unwrap();
            verify_sorted_permutation(input, arr.as_slice(), Algorithm::Counting);
        }
    }

    #[test]
    fn random_inputs() {
        let mut rng = StdRng::seed_from_u64(*SEED);
        for i in 0..*NUM_RUNS {
            let n = rng.gen_range(0..64);
            let mut shuffle_rng = StdRng::seed_from_u64(*SEED + i as u64);
            let input: Vec<u32> = (0..n).map(|_| shuffle_rng.gen_range(25..=500)).collect();
            for algorithm in Algorithm::ALL {
                let mut arr = ArrayModel::from_vec(input.clone());
                sort_headless(&mut arr, algorithm).unwrap();
                verify_sorted_permutation(&input, arr.as_slice(), algorithm);
            }
        }
    }

    fn verify_stable(keys: &[u32]) {
        let input: Vec<Tagged> = keys.iter().enumerate().map(|(tag, &key)| Tagged { key, tag }).collect();

        for algorithm in Algorithm::ALL.into_iter().filter(|a| a.is_stable()) {
            let mut arr = ArrayModel::from_vec(input.clone());
            sort_headless(&mut arr, algorithm).unwrap();
            for w in arr.as_slice().windows(2) {
                assert!(w[0].key <= w[1].key, "{algorithm}: not sorted");
                if w[0].key == w[1].key {
                    assert!(w[0].tag < w[1].tag, "{algorithm}: equal keys reordered: {:?}", w);
                }
            }
        }
    }

    #[test]
    fn stable_algorithms_keep_equal_keys_in_order() {
        let mut rng = StdRng::seed_from_u64(*SEED);
        let mut keys: Vec<u32> = (0..40).map(|i| i % 6).collect();
        keys.shuffle(&mut rng);
        verify_stable(&keys);
    }

    #[test]
    fn stability_survives_several_radix_passes() {
        verify_stable(&[170, 45, 170, 802, 45, 2, 802, 66]);

        let mut rng = StdRng::seed_from_u64(*SEED);
        let pool: Vec<u32> = (0..8).map(|_| rng.gen_range(100..=999)).collect();
        for _ in 0..*NUM_RUNS {
            let keys: Vec<u32> = (0..30).map(|_| pool[rng.gen_range(0..pool.len())]).collect();
            verify_stable(&keys);
        }
    }

    #[test]
    fn quadratic_sorts_compare_every_pair() {
        let mut rng = StdRng::seed_from_u64(*SEED);
        for n in [2usize, 5, 20, 33] {
            let input: Vec<u32> = (0..n).map(|_| rng.gen_range(25..=500)).collect();
            let pairs = (n * (n - 1) / 2) as u64;
            for algorithm in [Algorithm::Bubble, Algorithm::Selection] {
                let (_, _, report) = run_recorded(&input, algorithm);
                assert_eq!(report.stats.comparisons, pairs, "{algorithm} on {n} elements");
            }

            let (_, _, report) = run_recorded(&input, Algorithm::Insertion);
            assert!(report.stats.comparisons <= pairs);

            let reversed: Vec<u32> = (1..=n as u32).rev().collect();
            let (_, _, report) = run_recorded(&reversed, Algorithm::Insertion);
            assert_eq!(report.stats.comparisons, pairs, "insertion on reversed {n}");
        }
    }

    #[test]
    fn bubble_frames_show_each_swap() {
        let (output, rec, report) = run_recorded(&[5, 3, 8, 1], Algorithm::Bubble);
        assert_eq!(output, vec![1, 3, 5, 8]);
        assert_eq!(report.stats.steps, 6);

        let mut states: Vec<Vec<u32>> = rec.frames().map(|(keys, _, _)| keys.to_vec()).collect();
        states.dedup();
        assert_eq!(
            states,
            vec![vec![3, 5, 8, 1], vec![3, 5, 1, 8], vec![3, 1, 5, 8], vec![1, 3, 5, 8]]
        );

        let highlights: Vec<Vec<usize>> = rec.frames().map(|(_, h, _)| h.to_vec()).collect();
        assert_eq!(highlights[2], vec![2, 3]);
        assert_eq!(highlights[4], vec![1, 2]);
        assert_eq!(highlights[5], vec![0, 1]);
    }

    #[test]
    fn counting_sort_example() {
        let input = [4, 2, 2, 8, 3, 3, 1];
        let (output, rec, _) = run_recorded(&input, Algorithm::Counting);
        assert_eq!(output, vec![1, 2, 2, 3, 3, 4, 8]);

        let counts = cumulative_counts(input, 1, 8);
        assert_eq!(counts[3 - 1], 5);
        assert_eq!(rec.overlays().filter(|s| s.starts_with("Counting occurrences")).count(), input.len());
    }

    #[test]
    fn counting_sort_rejects_huge_range() {
        let mut arr = ArrayModel::from_vec(vec![3, 0, 5_000_000]);
        let err = sort_headless(&mut arr, Algorithm::Counting).unwrap_err();
        assert!(matches!(err, VisualizerError::RangeTooLarge { min: 0, max: 5_000_000, .. }));
        assert_eq!(arr.as_slice(), &[3, 0, 5_000_000]);

        // a narrow range is fine however large the values are
        let input = vec![4_000_000_005, 4_000_000_000, 4_000_000_003];
        let mut arr = ArrayModel::from_vec(input.clone());
        sort_headless(&mut arr, Algorithm::Counting).unwrap();
        verify_sorted_permutation(&input, arr.as_slice(), Algorithm::Counting);
    }

    #[test]
    fn radix_sort_example() {
        let input = [170, 45, 75, 90, 802, 24, 2, 66];
        let (output, rec, _) = run_recorded(&input, Algorithm::Radix);
        assert_eq!(output, vec![2, 24, 45, 66, 75, 90, 170, 802]);

        let passes: Vec<&str> = rec
            .overlays()
            .filter(|s| s.starts_with("Sorting array based on digit at place"))
            .collect();
        assert_eq!(
            passes,
            vec![
                "Sorting array based on digit at place 1",
                "Sorting array based on digit at place 10",
                "Sorting array based on digit at place 100",
            ]
        );
    }

    #[test]
    fn length_is_constant_across_frames() {
        let mut rng = StdRng::seed_from_u64(*SEED);
        let arr = ArrayModel::shuffled(&mut rng, 20);
        for algorithm in Algorithm::ALL {
            let (output, rec, report) = run_recorded(arr.as_slice(), algorithm);
            assert_eq!(output.len(), 20);
            assert_eq!(rec.frame_count() as u64, report.stats.steps);
            assert!(rec.frames().all(|(keys, highlight, _)| keys.len() == 20 && highlight.iter().all(|&i| i < 20)));
        }
    }

    fn initialize_seed() -> u64 {
        let randomize_seed = env::var("RANDOMIZE_SEED")
            .map(|val| val == "true")
            .unwrap_or(false);

        if randomize_seed {
            let seed: u64 = thread_rng().gen_range(0..u64::MAX / 2);
            println!("Seed: {}", seed);
            seed
        } else {
            let seed = env::var("SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12345);
            println!("Seed: {}", seed);
            seed
        }
    }

    fn get_num_runs() -> usize {
        env::var("NUM_RUNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(16)
    }
}
