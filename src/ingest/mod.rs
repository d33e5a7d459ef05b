/// Record input for the flood visualizer.
///
/// Submodules:
/// - `records`  - JSON record parsing and batch validation.
/// - `sample`   - the built-in one-week sample dataset.
/// - `fixtures` - JSON payloads for tests (cfg(test) only).

pub mod records;
pub mod sample;

#[cfg(test)]
pub(crate) mod fixtures;
