pub mod auth;
pub mod config;
pub mod flow;
pub mod pom;
pub mod stats;
pub mod sync;
pub mod task;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod flow_test;
#[cfg(test)]
mod task_test;
