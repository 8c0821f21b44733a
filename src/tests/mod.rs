//! Integration-level tests that exercise several subsystems together.

mod property_tests;
mod solver_tests;
