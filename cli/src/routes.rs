use std::path::Path;

use hitmiss::{load_config, save_report, RunConfig, RunReport};
use log::info;

use crate::opt;
use crate::utils::print_table;

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |x| format!("{x}"))
}

fn fmt_float(value: Option<f64>) -> String {
    fmt_opt(value.map(|x| format!("{x:.6}")))
}

fn summarize(report: &RunReport) {
    let rows = vec![
        vec![String::from("method"), report.method.clone()],
        vec![String::from("target"), report.target.name().to_owned()],
        vec![String::from("seed"), format!("{}", report.seed)],
        vec![String::from("samples"), format!("{}", report.samples.len())],
        vec![String::from("trials"), fmt_opt(report.n_trials)],
        vec![String::from("efficiency"), fmt_float(report.efficiency)],
        vec![String::from("integral"), fmt_float(report.integral_estimate)],
        vec![String::from("std err"), fmt_float(report.integral_std_err)],
        vec![
            String::from("analytic"),
            format!("{:.6}", report.analytic_integral),
        ],
        vec![String::from("mean"), fmt_float(report.mean)],
        vec![String::from("std"), fmt_float(report.std)],
    ];
    print_table(&["quantity", "value"], &rows);
}

fn execute(config: &RunConfig, output: Option<&Path>) -> i32 {
    let report = match config.run() {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Run failed: {err}");
            return 1;
        }
    };

    summarize(&report);

    if let Some(path) = output {
        if let Err(err) = save_report(&report, path) {
            eprintln!("Could not save report to {path:?}: {err}");
            return 1;
        }
        info!("Report saved to {path:?}");
    }
    0
}

pub fn reject(cmd: opt::RejectArgs) -> i32 {
    execute(&cmd.run_config(), cmd.output.as_deref())
}

pub fn transform(cmd: opt::TransformArgs) -> i32 {
    execute(&cmd.run_config(), cmd.output.as_deref())
}

pub fn run(cmd: opt::RunArgs) -> i32 {
    let config = match load_config(&cmd.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Could not load run config: {err}");
            return 1;
        }
    };
    execute(&config, cmd.output.as_deref())
}
