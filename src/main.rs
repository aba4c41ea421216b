// minidecl: parser and AST browser for a tiny declaration language

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn, Level};

use minidecl::outline::Outline;
use minidecl::parser::printer::pretty_print;
use minidecl::ui::App;
use minidecl::{parse, parse_recovering};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Print the canonical form of the parsed program and exit
    #[arg(long, conflicts_with = "dump")]
    print: bool,

    /// Print the declaration outline and exit
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", args.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    info!(file = %args.file.display(), bytes = source.len(), "read source");

    if args.print || args.dump {
        return match parse(&source) {
            Ok(program) => {
                let outline = Outline::build(&program);
                info!(
                    declarations = outline.len(),
                    functions = outline.function_count(),
                    variables = outline.variable_count(),
                    max_depth = outline.max_depth(),
                    "parsed successfully"
                );
                if args.print {
                    print!("{}", pretty_print(&program));
                } else {
                    for row in outline.rows() {
                        println!("{}{}  @{}", "  ".repeat(row.depth), row.label, row.location);
                    }
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(location = %e.location(), "parse failed");
                eprintln!("{}: {}", args.file.display(), e);
                ExitCode::FAILURE
            }
        };
    }

    let parsed = parse_recovering(&source);
    match &parsed {
        Ok(program) => info!(
            declarations = program.declarations.len(),
            "parsed successfully"
        ),
        Err(errors) => {
            warn!(count = errors.len(), "parse reported errors");
            for err in errors {
                debug!("{}", err);
            }
        }
    }

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    match run_tui(App::new(file_name, source, parsed)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
