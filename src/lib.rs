//! Wrapper around the code2prompt CLI.
//!
//! Loads `GROQ_*` settings from `<script_dir>/.env` (bootstrapped from
//! `.env.example`) and the process environment, then either lists the
//! Handlebars templates in `<script_dir>/templates` or runs code2prompt once
//! with the chosen template against a directory.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
