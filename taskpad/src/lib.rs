//! `Taskpad` — single-screen terminal task manager library.

pub mod app;
pub mod config;
pub mod ui;
