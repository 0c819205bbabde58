//! No library surface; this crate exists only to host `tests/`.
