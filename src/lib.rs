//! Glyphsync
//!
//! Cross-master content transfer for font editing sessions: propagate
//! drawn paths, components, anchors, and side bearings from one master to
//! another, within one document or across two open documents.
pub mod core;
pub mod editing;
pub mod font_source;
pub mod logging;
#[cfg(test)]
mod tests;
