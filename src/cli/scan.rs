use tabled::Table;

use crate::{
    config::Config,
    job::{self, JobOutcome},
    notify::ConsoleNotifier,
    types::Job,
    utils, warning,
};

/// Runs the search described by a job and prints the placements.
pub async fn scan(config: &Config, job: Job, json: bool) -> JobOutcome {
    let notifier = ConsoleNotifier::new(&config.notify);
    let outcome = job::run_job(config, &job, &notifier).await;
    print_report(&outcome, json);
    outcome
}

/// Loads a job file (`-` for stdin) and runs it.
pub async fn job(config: &Config, path: &str, json: bool) -> JobOutcome {
    let notifier = ConsoleNotifier::new(&config.notify);
    let outcome = job::run_job_file(config, path, &notifier).await;
    print_report(&outcome, json);
    outcome
}

fn print_report(outcome: &JobOutcome, json: bool) {
    let Some(report) = outcome.report() else {
        return;
    };

    if json {
        match serde_json::to_string_pretty(report) {
            Ok(out) => println!("{}", out),
            Err(e) => warning!("Cannot serialize report: {}", e),
        }
    } else {
        println!("{}", Table::new(utils::report_table_rows(report)));
    }
}
