//! Copyable Benchmark Library
//!
//! Schema fixtures and generated documents for the copy benchmarks.

pub mod data_gen;
