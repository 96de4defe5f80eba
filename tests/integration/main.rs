//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the panel end to end
//! against the simulated board in `mock_hw`.  All tests run on the host
//! on virtual time, so multi-second sequences finish instantly.

mod mock_hw;
mod startup_tests;
