//! Simple automated players for simulation and testing.

mod random;

pub use random::{Playout, RandomMover};
