//! Capacity planning engine: land/IT allocation, reliability sizing, and
//! derived resource draws.
//!
//! Every stage is a pure function of an immutable input record and is
//! recomputed in full on each call; no state is carried between
//! invocations, so independent scenarios may run in parallel freely.

pub mod derived;
pub mod inputs;
pub mod land;
pub mod portfolio;
pub mod reliability;
