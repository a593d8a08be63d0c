//! takebridge: Command-line front end for the TakeBridge widget
//!
//! Submits tasks to the orchestration service, renders their step-by-step
//! results, and manages the persisted widget settings.

pub mod commands;
pub mod output;
