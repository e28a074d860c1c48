//! `bibleref` - look up Bible citations from the command line.
//!
//! Usage:
//!   `bibleref [--bible <file>] [options] <citation...>`
//!   `bibleref --list [--write-index]`

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use bibleref::bible::{BibleService, DisplayOptions};
use bibleref::config::Config;
use bibleref::error::{Error, LookupError};
use bibleref::library::Library;

const USAGE: &str = "\
Usage: bibleref [--bible <file>] [options] <citation...>
       bibleref --list [--write-index]

Citation: <book> <chapter>[,<verses>]   e.g. \"Gn 30,5-7.15\", \"Jo 3,16-\", \"Sl 23\"
  verses are dot-separated: a single verse (5), a range (5-7) or
  an open range to the end of the chapter (5-)

Options:
  --bible <file>       Bible document (.ebf1.json); overrides BIBLEREF_BIBLE
  --library <dir>      Bible library directory; overrides BIBLEREF_LIBRARY
  --list               List Bibles in the library
  --write-index        With --list, also write index.json
  --html               Print HTML instead of plain text
  --json               Print the passage as JSON
  --[no-]quotes        Wrap the passage in quotes
  --[no-]verse-numbers Number each verse
  --[no-]line-breaks   One verse per line
  --[no-]ellipsis      Mark skipped verses with [...]
  --[no-]citation      Append the compact citation
  --[no-]titles        Show section titles
  --version            Print the version";

#[derive(Debug, Default)]
struct Args {
    bible: Option<PathBuf>,
    library: Option<PathBuf>,
    list: bool,
    write_index: bool,
    html: bool,
    json: bool,
    help: bool,
    version: bool,
    citation: Vec<String>,
}

fn parse_args(raw: impl Iterator<Item = String>, display: &mut DisplayOptions) -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut raw = raw.peekable();

    while let Some(arg) = raw.next() {
        if !args.citation.is_empty() || !arg.starts_with("--") {
            args.citation.push(arg);
            continue;
        }
        let (flag, enabled) = arg
            .strip_prefix("--no-")
            .map_or((&arg[2..], true), |rest| (rest, false));
        match (flag, enabled) {
            ("bible", true) => args.bible = Some(raw.next().context("--bible needs a file")?.into()),
            ("library", true) => {
                args.library = Some(raw.next().context("--library needs a directory")?.into());
            }
            ("list", true) => args.list = true,
            ("write-index", true) => args.write_index = true,
            ("html", true) => args.html = true,
            ("json", true) => args.json = true,
            ("help", true) => args.help = true,
            ("version", true) => args.version = true,
            ("quotes", on) => display.quotes = on,
            ("verse-numbers", on) => display.verse_numbers = on,
            ("line-breaks", on) => display.line_breaks = on,
            ("ellipsis", on) => display.ellipsis = on,
            ("citation", on) => display.parentheses_citation = on,
            ("titles", on) => display.section_titles = on,
            _ => bail!("Unknown option {arg}"),
        }
    }

    Ok(args)
}

fn open_library(config: &Config, args: &Args) -> anyhow::Result<Option<Library>> {
    let Some(root) = args.library.as_ref().or(config.library_path.as_ref()) else {
        return Ok(None);
    };
    let library = Library::scan(root, config.default_bible.as_deref())?;
    Ok(Some(library))
}

fn version_line(config: &Config) -> String {
    format!("{} {}", config.app_name(), config.app_version())
}

fn run() -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let mut display = config.display;
    let args = parse_args(env::args().skip(1), &mut display)?;

    if args.version {
        println!("{}", version_line(&config));
        return Ok(ExitCode::SUCCESS);
    }

    if args.help {
        println!("{}\n\n{USAGE}", version_line(&config));
        return Ok(ExitCode::SUCCESS);
    }

    if args.list {
        let library = open_library(&config, &args)?
            .context("No library configured; pass --library or set BIBLEREF_LIBRARY")?;
        println!("Bibles in {}:", library.root().display());
        for entry in library.entries() {
            let marker = if entry.default { " [default]" } else { "" };
            println!("{} ({}) -> {}{marker}", entry.name, entry.kind.name(), entry.path);
        }
        if args.write_index {
            let path = library.write_index()?;
            println!("Index written to {}", path.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let mut service = BibleService::new();
    if let Some(path) = args.bible.as_ref().or(config.bible_path.as_ref()) {
        service.load_file(path)?;
    } else if let Some(library) = open_library(&config, &args)? {
        if let Some(entry) = library.default_entry() {
            service.set_document(library.load(entry)?);
        }
    }

    let citation = args.citation.join(" ");
    match service.lookup(&citation, &display) {
        Ok(passage) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&passage)?);
            } else if args.html {
                println!("{}", passage.to_html());
            } else {
                println!("{}", passage.to_plain_text());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(LookupError::Parse { .. }) if citation.trim().is_empty() => {
            eprintln!("{USAGE}");
            Ok(ExitCode::FAILURE)
        }
        Err(err @ LookupError::Parse { .. }) => {
            eprintln!("{err}\n\n{USAGE}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(Error::from(err).into()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
