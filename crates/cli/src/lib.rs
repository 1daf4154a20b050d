//! Console front end: turns typed inventory results into the user-facing
//! messages and runs the demonstration sequence.

pub mod demo;
pub mod messages;
