//! Presentation shells that feed user input into a [`crate::collector::Collector`].

pub mod cli;
