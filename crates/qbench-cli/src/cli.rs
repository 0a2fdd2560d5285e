// Dweve QBench - Query Engine Benchmark Reports
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI command definitions and argument parsing.
//!
//! One subcommand per analytical report, plus `all` to run every report in
//! sequence and `completion` for shell completion scripts. Reports that
//! need timing data take a results file; the code-metric reports run
//! entirely from the embedded dataset.

use crate::commands;
use crate::error::CliResult;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// QBench - query engine benchmark reports.
///
/// Renders comparison charts and prints summary statistics for the three
/// query-engine implementations (Web 1.0 scraping, RDFa, SPARQL endpoint)
/// over the ten benchmark requests R1-R10.
#[derive(Parser)]
#[command(
    name = "qbench",
    author,
    version,
    about = "QBench - query engine benchmark reports",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Output options shared by every report.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory for the rendered chart files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Skip chart rendering and only print the summary
    #[arg(long)]
    pub no_charts: bool,
}

/// Options for reports that read a benchmark results file.
#[derive(Args, Debug, Clone)]
pub struct ResultArgs {
    /// Benchmark results file (semicolon-delimited)
    #[arg(short, long, default_value = "benchmark_results.csv")]
    pub input: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Execution-time comparison charts and summary from a results file
    Benchmarks(ResultArgs),
    /// Lines-of-code comparison charts and summary
    Loc(OutputArgs),
    /// Branching-complexity charts and summary
    Complexity(OutputArgs),
    /// DOM robustness charts and summary
    Robustness(OutputArgs),
    /// Combined structural/text dependency chart and summary
    Dependencies(OutputArgs),
    /// Code-size versus performance trade-off charts and summary
    Tradeoff(ResultArgs),
    /// Every report in sequence, sharing one results load
    All(ResultArgs),
    /// Generate shell completion scripts
    Completion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// Text summaries are printed by the report itself; with `--json` the
    /// report stays quiet and the machine-readable summary is printed here.
    pub fn execute(self) -> CliResult<()> {
        match self {
            Self::Benchmarks(args) => {
                let summary = commands::benchmarks::run(&args)?;
                print_json(&args.output, &summary)
            }
            Self::Loc(output) => {
                let summary = commands::loc::run(&output)?;
                print_json(&output, &summary)
            }
            Self::Complexity(output) => {
                let summary = commands::complexity::run(&output)?;
                print_json(&output, &summary)
            }
            Self::Robustness(output) => {
                let summary = commands::robustness::run(&output)?;
                print_json(&output, &summary)
            }
            Self::Dependencies(output) => {
                let summary = commands::dependencies::run(&output)?;
                print_json(&output, &summary)
            }
            Self::Tradeoff(args) => {
                let summary = commands::tradeoff::run(&args)?;
                print_json(&args.output, &summary)
            }
            Self::All(args) => {
                let summary = commands::all::run(&args)?;
                print_json(&args.output, &summary)
            }
            Self::Completion { shell } => {
                clap_complete::generate(
                    shell,
                    &mut Cli::command(),
                    "qbench",
                    &mut std::io::stdout(),
                );
                Ok(())
            }
        }
    }
}

fn print_json(output: &OutputArgs, summary: &serde_json::Value) -> CliResult<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }
    Ok(())
}
