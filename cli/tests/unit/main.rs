//! Unit tests for the ccdeploy CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod connection_service;
mod exporter_service;
