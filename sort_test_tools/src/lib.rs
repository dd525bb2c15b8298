/// Interface the shared test suite and benchmarks drive. The sorts under
/// test are specialized to `i64`, so the trait is too.
pub trait Sort {
    fn name() -> String;

    /// Sort with the implementation's default parallelism.
    fn sort(v: &mut [i64]);

    /// Sort with an explicit requested worker count. Implementations
    /// without a worker concept may ignore it.
    fn sort_with_parallelism(v: &mut [i64], parallelism: usize);
}

pub mod patterns;
pub mod tests;

// Re-exported for the macros in `tests`.
#[doc(hidden)]
pub use paste;
