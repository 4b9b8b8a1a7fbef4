//! Pipeline-level tests for wasmguard-syntax.
