use std::io::{self, Write};

use clap::Parser;
use wealthtax::cli::{Args, Command};
use wealthtax::{commands, init_logging};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), &args.log_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::List => commands::list(&mut out)?,
        Command::Run { scenario, format } => commands::run(&mut out, &scenario, format)?,
        Command::Compare { population, format } => {
            commands::compare(&mut out, population.as_deref(), format)?
        }
        Command::Sensitivity { scenario, format } => {
            commands::sensitivity(&mut out, &scenario, format)?
        }
        Command::Sweep {
            scenario,
            parameter,
            min,
            max,
            steps,
            format,
        } => commands::sweep(&mut out, &scenario, parameter, min, max, steps, format)?,
    }

    out.flush()?;
    Ok(())
}
