//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, StdinReader)
//! but are themselves concrete structs, not traits.

mod solver;

pub use solver::{InputSource, Solution, SolverOptions, SolverService};
