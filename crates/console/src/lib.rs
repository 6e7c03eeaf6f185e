//! Console client for the Chess Out API: a position-timeline replayer with
//! per-position engine analysis.

pub mod app;
pub mod clients;
pub mod commands;
pub mod config;
pub mod display;
