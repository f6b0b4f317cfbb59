//! VIGIL: a calendar-aware solidarity counter.
//!
//! Vigil computes how much time has passed since a fixed historical date and
//! breaks that span down into calendar-correct years, months, days, hours,
//! minutes and seconds, handling leap years and variable month lengths.
//!
//! # This crate
//! This crate provides the computational core of the counter.
//!
//! The central entry point is [`elapsed::calculate_elapsed_time`], which turns
//! a pair of UNIX timestamps into an [`elapsed::ElapsedTime`] breakdown.
//! Around it:
//! - [`timestamp`] defines the validated [`UnixTimestamp`](timestamp::UnixTimestamp) input type,
//! - [`units`] names the time units used to render a breakdown for humans,
//! - [`counter`] pairs a fixed start date with the calculator,
//! - [`config`] loads the TOML configuration of a counter application.
//!
//! # Display surfaces
//! The crate contains no terminal or UI code. A display surface (such as the
//! `vigil-agent` binary) holds a [`counter::Counter`] and asks it for a fresh
//! reading on a fixed interval, typically every second. Readings are
//! independent pure computations, so a counter can be shared between call
//! sites without any coordination.

pub mod config;
pub mod counter;
pub mod elapsed;
pub mod timestamp;
pub mod units;
