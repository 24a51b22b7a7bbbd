//! Test modules relocated from implementation files.
//!
//! Inline test modules that would grow past their implementation file
//! live here instead, alongside end-to-end scenarios that exercise the
//! runtime surface the way generated programs do.

mod operators_tests;
mod scenario_tests;
