//! Property-based tests for the search core's algebraic laws.
//!
//! Run with: cargo test --test property_tests

use proptest::prelude::*;

use hybridqa_search::codec;
use hybridqa_search::ranking::{concise_match_boost, tokens, within1};

mod codec_tests {
    use super::*;

    proptest! {
        /// Encoding then decoding round-trips exactly for values that are
        /// exactly representable in both f32 and f16.
        #[test]
        fn round_trip_exact_values(n in 1usize..8, dim in 1usize..8) {
            let vectors: Vec<Vec<f32>> = (0..n)
                .map(|i| (0..dim).map(|j| ((i * dim + j) as f32) * 0.5 - 4.0).collect())
                .collect();
            let bytes = codec::encode(&vectors);
            let decoded = codec::decode(&bytes).unwrap();
            prop_assert_eq!(decoded, vectors);
        }

        /// `decode` never panics on arbitrary byte input, only errors.
        #[test]
        fn decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let _ = codec::decode(&bytes);
        }
    }
}

mod tokens_tests {
    use super::*;

    proptest! {
        /// Tokenising is idempotent on its own joined output.
        #[test]
        fn idempotent_on_its_own_output(s in "\\PC{0,80}") {
            let once = tokens(&s);
            let rejoined = once.join(" ");
            let twice = tokens(&rejoined);
            prop_assert_eq!(once, twice);
        }

        /// `tokens` never panics on arbitrary unicode input.
        #[test]
        fn never_panics(s in "\\PC{0,200}") {
            let _ = tokens(&s);
        }
    }
}

mod typo_tests {
    use super::*;

    fn levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for (i, row) in dp.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            dp[0][j] = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
                dp[i][j] = (dp[i - 1][j] + 1)
                    .min(dp[i][j - 1] + 1)
                    .min(dp[i - 1][j - 1] + cost);
            }
        }
        dp[a.len()][b.len()]
    }

    proptest! {
        /// within1 agrees with true Levenshtein distance <= 1.
        #[test]
        fn matches_levenshtein_le_one(a in "[a-z]{0,8}", b in "[a-z]{0,8}") {
            let expected = levenshtein(&a, &b) <= 1;
            prop_assert_eq!(within1(&a, &b), expected);
        }

        /// within1 is reflexive.
        #[test]
        fn reflexive(s in "[a-z]{0,12}") {
            prop_assert!(within1(&s, &s));
        }

        /// within1 is symmetric.
        #[test]
        fn symmetric_random(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            prop_assert_eq!(within1(&a, &b), within1(&b, &a));
        }
    }
}

mod concise_tests {
    use super::*;

    proptest! {
        /// The concise-match boost never exceeds its ceiling and is never negative.
        #[test]
        fn never_exceeds_ceiling(
            extra_words in prop::collection::vec("[a-z]{1,6}", 0..6),
            ceiling in 0.0f32..2.0,
        ) {
            let query_words = vec!["dart".to_string(), "language".to_string()];
            let question = format!("dart language {}", extra_words.join(" "));
            let boost = concise_match_boost(&query_words, &question, ceiling, 1);
            prop_assert!(boost >= 0.0);
            prop_assert!(boost <= ceiling);
        }
    }
}
