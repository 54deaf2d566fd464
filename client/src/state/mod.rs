//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`wallet`, `chain`, `message`, `ui`) so individual
//! components can depend on small focused models. Each model is a plain
//! struct held in an `RwSignal` created by the app root and provided through
//! context; transitions are methods so they can be tested without a browser.

pub mod chain;
pub mod message;
pub mod ui;
pub mod wallet;
