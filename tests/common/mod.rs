// Shared helpers for integration tests. Not every test binary uses all of them.
#![allow(dead_code)]

pub mod git_test_helper;
pub mod lab_dir;
