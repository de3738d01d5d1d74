//! Core processing building blocks: configuration, the reclassify / multiply /
//! gap-fill stages, and save helpers. These are the primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
