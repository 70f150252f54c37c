//! Sheihu Launcher - simulated game launcher engine
//!
//! The launcher's long-running flows (booting a game, downloading a
//! version) are simulated operations that stream progress on a fixed
//! cadence. [`operation::Tracker`] drives them; [`runner::drive`] runs a
//! tracker against real time.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod operation;
pub mod runner;
pub mod servers;
pub mod session;
pub mod versions;
