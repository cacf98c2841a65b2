//! Tests for the prompt engine
//!
//! Organized by stage: tree resolution, wildcards, exclusion rules, tag
//! expansion, and whole runs.

use super::*;

// Test helper functions
mod helpers;
