use std::env;
use std::fs;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::patterns;
use crate::Sort;

#[cfg(miri)]
const TEST_SIZES: [usize; 13] = [0, 1, 2, 3, 4, 5, 8, 16, 17, 20, 33, 50, 100];

#[cfg(feature = "large_test_sizes")]
#[cfg(not(miri))]
const TEST_SIZES: [usize; 22] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 16, 17, 20, 24, 33, 50, 100, 256, 500, 1_000, 10_000, 100_000,
];

#[cfg(not(feature = "large_test_sizes"))]
#[cfg(not(miri))]
const TEST_SIZES: [usize; 21] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 16, 17, 20, 24, 33, 50, 100, 256, 500, 1_000, 10_000,
];

/// Worker counts exercised by the parallelism tests.
const PARALLELISM_LEVELS: [usize; 4] = [1, 2, 4, 8];

fn get_or_init_random_seed<S: Sort>() -> u64 {
    static SEED_WRITTEN: Mutex<bool> = Mutex::new(false);
    let seed = patterns::random_init_seed();

    let mut seed_writer = SEED_WRITTEN.lock().unwrap();
    if !*seed_writer {
        // Always write the seed before doing anything to ensure reproducibility of crashes.
        io::stdout()
            .write_all(format!("\nSeed: {seed}\nTesting: {}\n\n", <S as Sort>::name()).as_bytes())
            .unwrap();
        io::stdout().flush().unwrap();

        *seed_writer = true;
    }

    seed
}

fn sort_comp_by<S: Sort>(v: &mut [i64], sort_fn: impl Fn(&mut [i64])) {
    let seed = get_or_init_random_seed::<S>();

    let is_small_test = v.len() <= 100;
    let original_clone = v.to_vec();

    let mut stdlib_sorted_vec = v.to_vec();
    let stdlib_sorted = stdlib_sorted_vec.as_mut_slice();
    stdlib_sorted.sort();

    let testsort_sorted = v;
    sort_fn(testsort_sorted);

    assert_eq!(stdlib_sorted.len(), testsort_sorted.len());

    for (a, b) in stdlib_sorted.iter().zip(testsort_sorted.iter()) {
        if a != b {
            if is_small_test {
                eprintln!("Original: {:?}", original_clone);
                eprintln!("Expected: {:?}", stdlib_sorted);
                eprintln!("Got:      {:?}", testsort_sorted);
            } else if env::var("WRITE_LARGE_FAILURE").is_ok() {
                // Large arrays output them as files.
                let original_name = format!("original_{}.txt", seed);
                let std_name = format!("stdlib_sorted_{}.txt", seed);
                let test_name = format!("testsort_sorted_{}.txt", seed);

                fs::write(&original_name, format!("{:?}", original_clone)).unwrap();
                fs::write(&std_name, format!("{:?}", stdlib_sorted)).unwrap();
                fs::write(&test_name, format!("{:?}", testsort_sorted)).unwrap();

                eprintln!(
                    "Failed comparison, see files {original_name}, {std_name}, and {test_name}"
                );
            } else {
                eprintln!(
                    "Failed comparison, re-run with WRITE_LARGE_FAILURE env var set, to get output."
                );
            }

            panic!("Test assertion failed!")
        }
    }
}

fn sort_comp<S: Sort>(v: &mut [i64]) {
    sort_comp_by::<S>(v, <S as Sort>::sort);
}

fn test_impl<S: Sort>(pattern_fn: impl Fn(usize) -> Vec<i64>) {
    for test_size in TEST_SIZES {
        let mut test_data = pattern_fn(test_size);
        sort_comp::<S>(test_data.as_mut_slice());
    }
}

// --- TESTS ---

pub fn basic<S: Sort>() {
    sort_comp::<S>(&mut []);
    sort_comp::<S>(&mut [66]);
    sort_comp::<S>(&mut [2, 3]);
    sort_comp::<S>(&mut [3, 2]);
    sort_comp::<S>(&mut [2, 3, 99, 6]);
    sort_comp::<S>(&mut [5, -3, 0, 2, -100, 42]);
    sort_comp::<S>(&mut [7, 7, 7, 7]);
    sort_comp::<S>(&mut [15, -1, 3, -1, -3, -1, 7]);
}

pub fn fixed_seed<S: Sort>() {
    let fixed_seed_a = patterns::random_init_seed();
    let fixed_seed_b = patterns::random_init_seed();

    assert_eq!(fixed_seed_a, fixed_seed_b);
}

pub fn random<S: Sort>() {
    test_impl::<S>(patterns::random);
}

pub fn random_narrow<S: Sort>() {
    // Great for debugging.
    test_impl::<S>(|size| {
        if size > 3 {
            patterns::random_uniform(size, 0i64..=(((size as f64).log2().round()) as i64) * 100)
        } else {
            Vec::new()
        }
    });
}

pub fn random_binary<S: Sort>() {
    test_impl::<S>(|size| patterns::random_uniform(size, 0i64..=1));
}

pub fn random_negative<S: Sort>() {
    test_impl::<S>(patterns::random_negative);
}

pub fn random_positive<S: Sort>() {
    test_impl::<S>(|size| patterns::random_uniform(size, 0i64..i64::MAX));
}

pub fn random_z1<S: Sort>() {
    test_impl::<S>(|size| {
        if size == 0 {
            Vec::new()
        } else {
            patterns::random_zipf(size, 1.0)
        }
    });
}

pub fn all_equal<S: Sort>() {
    test_impl::<S>(patterns::all_equal);
}

pub fn ascending<S: Sort>() {
    test_impl::<S>(patterns::ascending);
}

pub fn descending<S: Sort>() {
    test_impl::<S>(patterns::descending);
}

pub fn saw_mixed<S: Sort>() {
    test_impl::<S>(|size| patterns::saw_mixed(size, ((size as f64).log2().round()) as usize));
}

pub fn pipe_organ<S: Sort>() {
    test_impl::<S>(patterns::pipe_organ);
}

pub fn already_sorted<S: Sort>() {
    // Sorting a sorted sequence must return it unchanged.
    for test_size in TEST_SIZES {
        let mut test_data = patterns::random(test_size);
        test_data.sort();
        let expected = test_data.clone();

        <S as Sort>::sort(&mut test_data);
        assert_eq!(test_data, expected);

        <S as Sort>::sort(&mut test_data);
        assert_eq!(test_data, expected);
    }
}

pub fn int_edge<S: Sort>() {
    let _seed = get_or_init_random_seed::<S>();

    // Ensure that the sort can handle integer edge cases.
    sort_comp::<S>(&mut [i64::MIN, i64::MAX]);
    sort_comp::<S>(&mut [i64::MAX, i64::MIN]);
    sort_comp::<S>(&mut [i64::MIN, 3]);
    sort_comp::<S>(&mut [i64::MIN, -3]);
    sort_comp::<S>(&mut [i64::MIN, -3, i64::MAX]);
    sort_comp::<S>(&mut [i64::MIN, -3, i64::MAX, i64::MIN, 5]);
    sort_comp::<S>(&mut [i64::MAX, 3, i64::MIN, 5, i64::MIN, -3, 60, 200, 50, 7, 10]);

    let mut large = patterns::random(TEST_SIZES[TEST_SIZES.len() - 2]);
    large.push(i64::MAX);
    large.push(i64::MIN);
    large.push(i64::MAX);
    sort_comp::<S>(&mut large);
}

pub fn max_values<S: Sort>() {
    // Implementations that pad with a max sentinel must not leak it into
    // inputs that legitimately contain the maximum value.
    sort_comp::<S>(&mut [i64::MAX; 7]);

    for test_size in TEST_SIZES {
        let mut test_data = patterns::random(test_size);
        for val in test_data.iter_mut().step_by(3) {
            *val = i64::MAX;
        }
        sort_comp::<S>(test_data.as_mut_slice());
    }
}

pub fn random_with_parallelism<S: Sort>(parallelism: usize) {
    for test_size in TEST_SIZES {
        let mut test_data = patterns::random(test_size);
        sort_comp_by::<S>(test_data.as_mut_slice(), |v| {
            <S as Sort>::sort_with_parallelism(v, parallelism)
        });
    }
}

pub fn parallelism_invariance<S: Sort>() {
    // The sorted output must not depend on the worker count.
    for test_size in TEST_SIZES {
        let test_data = patterns::random(test_size);

        let mut expected = test_data.clone();
        <S as Sort>::sort_with_parallelism(&mut expected, PARALLELISM_LEVELS[0]);

        for parallelism in &PARALLELISM_LEVELS[1..] {
            let mut run = test_data.clone();
            <S as Sort>::sort_with_parallelism(&mut run, *parallelism);
            assert_eq!(run, expected);
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! instantiate_sort_test_impl_inner {
    ($sort_impl:ty, miri_yes, $sort_name:ident) => {
        #[test]
        fn $sort_name() {
            sort_test_tools::tests::$sort_name::<$sort_impl>();
        }
    };
    ($sort_impl:ty, miri_no, $sort_name:ident) => {
        #[test]
        #[cfg(not(miri))]
        fn $sort_name() {
            sort_test_tools::tests::$sort_name::<$sort_impl>();
        }

        #[test]
        #[cfg(miri)]
        #[ignore]
        fn $sort_name() {}
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! instantiate_sort_test_impl {
    ($sort_impl:ty, $([$miri_use:ident, $sort_name:ident]),*) => {
        $(
            sort_test_tools::instantiate_sort_test_impl_inner!($sort_impl, $miri_use, $sort_name);
        )*
    };
}

#[macro_export]
macro_rules! instantiate_sort_tests {
    ($sort_impl:ty) => {
        sort_test_tools::instantiate_sort_test_impl!(
            $sort_impl,
            [miri_no, all_equal],
            [miri_yes, already_sorted],
            [miri_yes, ascending],
            [miri_yes, basic],
            [miri_yes, descending],
            [miri_yes, fixed_seed],
            [miri_yes, int_edge],
            [miri_yes, max_values],
            [miri_no, parallelism_invariance],
            [miri_yes, pipe_organ],
            [miri_yes, random],
            [miri_no, random_binary],
            [miri_yes, random_narrow],
            [miri_no, random_negative],
            [miri_no, random_positive],
            [miri_no, random_z1],
            [miri_yes, saw_mixed]
        );
    };
}

/// Instantiates `random_with_parallelism` once per given worker count.
#[macro_export]
macro_rules! instantiate_parallelism_tests {
    ($sort_impl:ty, $($parallelism:literal),* $(,)?) => {
        $(
            sort_test_tools::paste::paste! {
                #[test]
                fn [<random_parallelism_ $parallelism>]() {
                    sort_test_tools::tests::random_with_parallelism::<$sort_impl>($parallelism);
                }
            }
        )*
    };
}
