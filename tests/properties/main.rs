//! Property-based tests for the alignment engine and the store.

mod alignment_props;
mod store_props;
