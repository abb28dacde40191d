//! Extraction and reporting of electric-vehicle aspects from user comments.

pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod nlp;
pub mod report;
