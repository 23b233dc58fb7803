use anyhow::Result;
use errdrop::cli::{self, Commands};
use errdrop::commands::{self, AnalyzeConfig};
use errdrop::formatting::FormattingConfig;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = cli::parse_args();
    cli::init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            config,
            name_only,
            fail_on_findings,
            no_parallel,
            jobs,
            plain,
            verbosity: _,
        } => {
            let results = commands::handle_analyze(AnalyzeConfig {
                path,
                format,
                output,
                config,
                name_only,
                formatting_config: FormattingConfig::for_cli(plain),
                parallel: !no_parallel,
                jobs,
            })?;

            if fail_on_findings && results.has_findings() {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
