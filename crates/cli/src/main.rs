use clap::Parser;

use orderflow_cli::config::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    orderflow_observability::init(cli.log_format);

    let mut stdout = std::io::stdout().lock();
    let report = orderflow_cli::run::run(&cli, &mut stdout)?;

    tracing::info!(
        targets = report.outcomes.len(),
        published = report.published,
        "done"
    );
    Ok(())
}
