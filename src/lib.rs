//! svyreport: Survey Data Cleaning and Reporting Library
//!
//! Imputes missing values, filters outliers, computes (optionally weighted)
//! column means with margins of error, and assembles them into a report.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
