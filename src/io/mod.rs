//! File input/output: CSV plan export.

pub mod export;
