use chrono::Local;
use clap::Parser;
use mdjournal::application::HtmlRenderer;
use mdjournal::cli::{run_menu, Cli, Commands, JournalSession};
use mdjournal::error::JournalError;
use mdjournal::infrastructure::JournalConfig;
use std::io;

fn main() {
    mdjournal::logging::init();
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", error_text(&e));
            std::process::exit(e.exit_code());
        }
    }
}

fn error_text(e: &JournalError) -> String {
    match e {
        JournalError::EntryNotFound(_) | JournalError::InvalidEntryName(_) => {
            e.display_with_suggestions()
        }
        _ => format!("Error: {}", e.display_with_suggestions()),
    }
}

fn run(cli: Cli) -> Result<(), JournalError> {
    let root = JournalConfig::resolve_root(cli.root)?;
    let config = JournalConfig::load_from_dir(&root)?;
    config.ensure_dirs()?;

    let session = JournalSession::new(HtmlRenderer::from_config(&config));

    match cli.command {
        Some(Commands::New) => {
            println!("{}", session.create_entry(Local::now().date_naive())?);
            Ok(())
        }
        Some(Commands::List) => {
            println!("{}", session.list_entries()?.trim_end());
            Ok(())
        }
        Some(Commands::Convert { entry }) => {
            println!("{}", session.convert_entry(&entry)?);
            Ok(())
        }
        Some(Commands::Build) => {
            println!("{}", session.generate_site()?);
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            run_menu(&session, &mut input, &mut out)
        }
    }
}
