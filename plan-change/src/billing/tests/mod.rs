//! Property-based tests for the pricing helpers.
