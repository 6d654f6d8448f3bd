#![allow(clippy::unwrap_used)]

mod tests_structure;
