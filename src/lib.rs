//! Burndown/burnup chart series and a heuristic progress evaluation for a
//! single sprint, built from pasted spreadsheet rows or generated data.

pub mod chart;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod grid;
pub mod logging;
pub mod models;
pub mod report;
pub mod state;
