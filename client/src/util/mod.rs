//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Formatting helpers kept out of components so they can be unit tested
//! without a browser.

pub mod address;
