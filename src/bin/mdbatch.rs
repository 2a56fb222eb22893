use clap::Parser;
use mdjournal::application::BatchSiteBuilder;
use mdjournal::cli::prompt::{prompt_layout, prompt_site_name, prompt_theme};
use mdjournal::cli::{format_build_report, BatchCli};
use mdjournal::domain::{OutputLayout, SiteOptions, Theme};
use mdjournal::error::JournalError;
use mdjournal::infrastructure::BatchConfig;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn main() {
    mdjournal::logging::init();
    let cli = BatchCli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Fill in options missing from the command line by asking on stdin
fn site_options<R: BufRead, W: Write>(
    cli: &BatchCli,
    input: &mut R,
    out: &mut W,
) -> Result<SiteOptions, JournalError> {
    let theme = match &cli.theme {
        Some(theme) => Theme::from_str(theme).map_err(JournalError::Config)?,
        None => prompt_theme(input, out)?,
    };
    let site_name = match &cli.site_name {
        Some(name) => name.clone(),
        None => prompt_site_name(input, out)?,
    };
    let layout = match cli.use_folders() {
        Some(true) => OutputLayout::Folders,
        Some(false) => OutputLayout::Flat,
        None => prompt_layout(input, out)?,
    };

    Ok(SiteOptions::new(site_name, theme, layout))
}

fn run(cli: BatchCli) -> Result<(), JournalError> {
    let site = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        site_options(&cli, &mut input, &mut out)?
    };

    let config = BatchConfig {
        entries_folder: cli.input,
        output_folder: cli.output,
        assets_dir: cli.assets,
        site,
    };

    let report = BatchSiteBuilder::new(config).run()?;
    println!("{}", format_build_report(&report));
    Ok(())
}
