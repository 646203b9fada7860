//! End-to-end pipeline scenarios with deterministic test doubles.

mod scenarios;
