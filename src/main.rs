//! svyreport: Survey Data Cleaning and Reporting CLI Tool
//!
//! A command-line tool that cleans survey data (imputation and outlier
//! filtering), computes weighted means with margins of error, and writes
//! a plain-text report.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use console::style;

use cli::{select_weight_column, Cli};
use pipeline::{
    analyze_missing_values, column_margins, describe_columns, get_column_names, impute_missing,
    load_dataset_with_progress, remove_outliers_with_report, summarize_with_fallback,
    total_missing, ImputeMethod, OutlierMethod, WeightSelector,
};
use report::{
    bundle_path_for, display_description, display_preview, export_report_json, json_path_for,
    package_report_bundle, write_text_report, ReportBuilderParams, ReportDocumentBuilder,
    RunSummary,
};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, format_confidence, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning, RunConfig,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_path = cli.output_path();

    // Weight column: flag, interactive prompt, or none when prompts are disabled
    let weight_column = match (&cli.weight_column, cli.no_confirm) {
        (Some(column), _) => Some(column.clone()),
        (None, true) => None,
        (None, false) => {
            let columns = get_column_names(&cli.input)?;
            select_weight_column(&columns)?
        }
    };
    let selector = WeightSelector::from_option(weight_column.as_deref());

    let impute_label = cli.impute.to_string();
    let outlier_label = cli.outliers.to_string();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&RunConfig {
        input: &cli.input,
        output: &output_path,
        weight_column: selector.column_name(),
        impute: &impute_label,
        outliers: &outlier_label,
        confidence: cli.confidence,
    });

    // Step 1: Load dataset
    print_step_header(1, "Loading Dataset");
    let step_start = Instant::now();

    let (df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;
    print_success(&format!(
        "Loaded {} rows × {} columns ({:.1} MB)",
        rows, cols, memory_mb
    ));
    display_preview("DATA PREVIEW", &df)?;
    display_description(&describe_columns(&df)?);

    let missing_before = analyze_missing_values(&df)?;
    let with_missing = missing_before.iter().filter(|m| m.missing > 0).count();
    if with_missing > 0 {
        print_count(
            "columns with missing values",
            with_missing,
            Some(&format!("({} cells)", total_missing(&missing_before))),
        );
    } else {
        print_info("No missing values found");
    }
    print_step_time(step_start.elapsed());

    let mut run = RunSummary::new(rows, cols);

    // Step 2: Impute missing values
    print_step_header(2, "Imputing Missing Values");
    let step_start = Instant::now();

    let df = if cli.impute == ImputeMethod::None {
        print_info("Imputation disabled");
        df
    } else {
        let spinner = create_spinner(&format!(
            "Filling gaps with the {}...",
            impute_label.to_lowercase()
        ));
        let imputed = impute_missing(&df, cli.impute)?;
        finish_with_success(&spinner, "Imputation complete");
        imputed
    };

    let missing_after = total_missing(&analyze_missing_values(&df)?);
    run.set_missing(total_missing(&missing_before), missing_after);
    if missing_after > 0 {
        print_count("missing cells remain", missing_after, None);
    }
    print_step_time(step_start.elapsed());

    // Step 3: Remove outliers
    print_step_header(3, "Filtering Outliers");
    let step_start = Instant::now();

    let (df, outliers) = remove_outliers_with_report(&df, cli.outliers)?;
    if cli.outliers == OutlierMethod::None {
        print_info("Outlier filtering disabled");
    } else {
        print_success(&format!(
            "Removed {} rows, {} remain",
            outliers.total_removed(),
            outliers.final_rows
        ));
    }
    run.set_outliers(outliers);
    display_preview("CLEANED DATA PREVIEW", &df)?;
    print_step_time(step_start.elapsed());

    // Step 4: Summary statistics and margins of error
    print_step_header(4, "Computing Statistics");
    let step_start = Instant::now();

    let spinner = create_spinner("Computing means...");
    let outcome = summarize_with_fallback(&df, &selector)?;
    match &outcome.fallback_reason {
        Some(reason) => {
            finish_with_warning(&spinner, "Weights unusable, using unweighted means");
            print_warning(&reason.to_string());
            run.weight_fallback = Some(reason.to_string());
        }
        None => finish_with_success(&spinner, outcome.summary.kind.label()),
    }

    let margins = column_margins(&df, cli.confidence)?;
    print_count(
        "variables summarized",
        outcome.summary.len(),
        Some(&format!("at {} confidence", format_confidence(margins.confidence))),
    );
    print_step_time(step_start.elapsed());

    // Step 5: Assemble and write the report
    print_step_header(5, "Writing Report");
    let step_start = Instant::now();

    let doc = ReportDocumentBuilder::new(ReportBuilderParams {
        title: cli.title.clone(),
        dataset_name: cli.dataset_name(),
        imputation: cli.impute,
        outlier_method: cli.outliers,
        generated_at: Local::now(),
    })
    .build(&outcome.summary, &margins);

    write_text_report(&doc, &output_path)?;
    print_success(&format!("Report saved: {}", output_path.display()));

    let json_path = json_path_for(&output_path);
    if cli.json {
        export_report_json(&doc, &json_path)?;
        print_success(&format!("JSON saved: {}", json_path.display()));
    }

    if cli.bundle {
        let mut files: Vec<&Path> = vec![output_path.as_path()];
        if cli.json {
            files.push(json_path.as_path());
        }
        let zip_path = bundle_path_for(&output_path);
        package_report_bundle(&files, &zip_path)?;
        print_success(&format!("Bundle saved: {}", zip_path.display()));
    }
    print_step_time(step_start.elapsed());

    run.display(&outcome.summary, &margins);

    println!(
        "    {} {}",
        style("Report:").dim(),
        style(output_path.display()).cyan()
    );
    print_completion();

    Ok(())
}
