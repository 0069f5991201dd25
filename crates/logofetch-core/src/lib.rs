pub mod config;
pub mod logging;
pub mod output;

// Resolution pipeline
pub mod candidates;
pub mod catalog;
pub mod cycle;
pub mod fetch;
pub mod naming;
pub mod resolver;
pub mod session;
pub mod terminal;
