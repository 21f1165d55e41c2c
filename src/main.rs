// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand, ValueEnum};
use kopi_ingest::commands::OutputOptions;
use kopi_ingest::commands::feed::FeedCommand;
use kopi_ingest::commands::fetch::FetchCommand;
use kopi_ingest::commands::synthesize::SynthesizeCommand;
use kopi_ingest::config::IngestConfig;
use kopi_ingest::error::{IngestError, Result, format_error_with_color, get_exit_code};
use kopi_ingest::logging;
use kopi_ingest::models::release::ReleaseStatus;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kopi-ingest")]
#[command(author, version, about = "Vendor release ingestion for the JDK metadata catalog", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./kopi-ingest.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct BatchArgs {
    /// Skip packages already present in the catalog file
    #[arg(long)]
    only_new: bool,

    /// Catalog file from a previous run, used by --only-new
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Write the batch to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    no_minify: bool,
}

impl BatchArgs {
    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            output: self.output.clone(),
            minify: !self.no_minify,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StatusArg {
    Ga,
    Ea,
}

impl From<StatusArg> for ReleaseStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Ga => ReleaseStatus::Ga,
            StatusArg::Ea => ReleaseStatus::Ea,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Discover every GraalVM package: release feed, archive host and EA builds
    Fetch {
        /// Include early-access releases and builds
        #[arg(long)]
        include_ea: bool,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Probe synthesized download URLs on the archive host only
    Synthesize {
        /// Append packages from the early-access builds index
        #[arg(long)]
        include_ea: bool,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Read the release feed for one release status
    Feed {
        /// Release status to ingest
        #[arg(long, value_enum, default_value = "ga")]
        status: StatusArg,

        #[command(flatten)]
        batch: BatchArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match IngestConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e),
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Fetch { include_ea, batch } => {
            let command = FetchCommand::new(&config)?;
            command.execute(
                include_ea,
                batch.only_new,
                batch.catalog.as_deref(),
                &batch.output_options(),
            )
        }
        Commands::Synthesize { include_ea, batch } => {
            let command = SynthesizeCommand::new(&config)?;
            command.execute(
                include_ea,
                batch.only_new,
                batch.catalog.as_deref(),
                &batch.output_options(),
            )
        }
        Commands::Feed { status, batch } => {
            let command = FeedCommand::new(&config)?;
            command.execute(
                status.into(),
                batch.only_new,
                batch.catalog.as_deref(),
                &batch.output_options(),
            )
        }
    })();

    if let Err(e) = result {
        exit_with_error(&e);
    }
}

fn exit_with_error(error: &IngestError) -> ! {
    eprint!(
        "{}",
        format_error_with_color(error, std::io::stderr().is_terminal())
    );
    std::process::exit(get_exit_code(error));
}
