//! Session orchestration for the escape simulation.
//!
//! This crate wires the decision core into a playable, turn-based session.
//! Consumers build a [`Session`] from a [`RuntimeConfig`], plug in an
//! [`AgentController`] and either call [`Session::run`] or drive turns one at
//! a time with [`Session::step`].
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the turn loop and puzzle gating
//! - [`controller`] and [`autopilot`] source the agent's commands
//! - [`events`] describes what each turn did
//! - [`summary`] condenses a session into reportable statistics
//! - [`config`] reads session settings from the environment
pub mod autopilot;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod session;
pub mod summary;

pub use autopilot::{Autopilot, Plan, Target};
pub use config::{ConfigOverrides, RuntimeConfig};
pub use controller::{AgentCommand, AgentController, ScriptedController};
pub use error::{Result, RuntimeError};
pub use events::{SessionEvent, TurnReport};
pub use session::{Outcome, Session};
pub use summary::SessionSummary;
