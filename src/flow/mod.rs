//! Focus mode: distraction blocking through the system hosts file.

mod hosts;


pub use hosts::{FlowError, FlowMode, FlowResult};
