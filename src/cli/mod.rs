//! Command-line interface helpers

mod output;

pub use output::print_report;
