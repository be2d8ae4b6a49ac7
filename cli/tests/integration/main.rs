//! Integration tests for the ccdeploy CLI
//!
//! These tests spawn the actual binary against an in-process fake world
//! server. They are slower and should be run separately from unit tests.

mod run_command;
