//! Cross-module codec tests.

mod fixtures;
