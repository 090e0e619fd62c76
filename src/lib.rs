pub mod cli;
pub mod config;
pub mod db;
pub mod flow;
pub mod manager;
pub mod remote;
pub mod sync;
pub mod timer;
