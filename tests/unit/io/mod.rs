mod cli;
mod configuration;
mod error;
mod logging;
mod progress;
mod report;
