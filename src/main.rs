use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use bmpfilter::{FilterKind, ImageSession};

#[derive(FromArgs)]
/// Apply pixel filters to a 24-bit BMP file in place (interactive menu when no --filter is given)
struct Args {
    /// path to the BMP file; prompted for when omitted
    #[argh(positional)]
    path: Option<PathBuf>,

    /// filter to apply, repeatable: grayscale, sepia, reflect, blur, edges, revert
    #[argh(option, short = 'f')]
    filter: Vec<FilterKind>,

    /// write the result to this file instead of overwriting the input
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

/// How an editing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOutcome {
    /// Go back to the file prompt.
    Close,
    /// Leave the program.
    Quit,
}

const MENU: &str = "\
  1) grayscale   2) sepia   3) reflect   4) blur   5) edges
  6) revert      7) save    8) close     9) quit
";

/// Print `prompt` and read one trimmed line. `None` on end of input.
fn read_line(
    prompt: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

/// Prompt until a file loads. `None` when the user asks to quit.
fn open_session(
    mut pending: Option<PathBuf>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<ImageSession>> {
    loop {
        let path = match pending.take() {
            Some(p) => p,
            None => match read_line("BMP file (empty to quit): ", input, out)? {
                None => return Ok(None),
                Some(line) if line.is_empty() => return Ok(None),
                Some(line) => PathBuf::from(line),
            },
        };
        match ImageSession::load(&path) {
            Ok(session) => {
                let grid = session.grid();
                writeln!(
                    out,
                    "Loaded {} ({}x{}).",
                    path.display(),
                    grid.width(),
                    grid.height()
                )?;
                return Ok(Some(session));
            }
            Err(e) => writeln!(out, "Could not load {}: {e}", path.display())?,
        }
    }
}

fn edit_session(
    mut session: ImageSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<MenuOutcome> {
    let mut edited = false;
    let mut unsaved = false;
    loop {
        write!(out, "{MENU}")?;
        let Some(choice) = read_line("> ", input, out)? else {
            return Ok(MenuOutcome::Quit);
        };
        let kind = match choice.as_str() {
            "1" => FilterKind::Grayscale,
            "2" => FilterKind::Sepia,
            "3" => FilterKind::Reflect,
            "4" => FilterKind::Blur,
            "5" => FilterKind::EdgeDetect,
            "6" => FilterKind::Revert,
            "7" => {
                match session.save() {
                    Ok(()) => {
                        unsaved = false;
                        writeln!(out, "Saved {}.", session.path().display())?;
                    }
                    Err(e) => writeln!(out, "Save failed: {e}")?,
                }
                continue;
            }
            "8" | "9" => {
                if unsaved {
                    writeln!(out, "Discarding unsaved changes.")?;
                }
                return Ok(if choice == "8" {
                    MenuOutcome::Close
                } else {
                    MenuOutcome::Quit
                });
            }
            other => match other.parse::<FilterKind>() {
                Ok(kind) => kind,
                Err(_) => {
                    writeln!(out, "Please choose 1-9.")?;
                    continue;
                }
            },
        };

        if kind == FilterKind::Revert && !edited {
            writeln!(out, "Nothing to revert.")?;
            continue;
        }
        session.apply(kind);
        edited = kind.is_edit();
        unsaved = true;
        writeln!(out, "Applied {kind}.")?;
    }
}

fn run_interactive(
    path: Option<PathBuf>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut pending = path;
    loop {
        let Some(session) = open_session(pending.take(), input, out)? else {
            return Ok(());
        };
        match edit_session(session, input, out)? {
            MenuOutcome::Close => continue,
            MenuOutcome::Quit => return Ok(()),
        }
    }
}

fn run_batch(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let path = args.path.ok_or("a file path is required with --filter or --output")?;
    let mut session = ImageSession::load(&path)?;
    for kind in args.filter {
        log::info!("applying {kind}");
        session.apply(kind);
    }
    match args.output {
        Some(output) => session.save_as(output)?,
        None => session.save()?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    let result = if args.filter.is_empty() && args.output.is_none() {
        let stdin = io::stdin();
        run_interactive(args.path, &mut stdin.lock(), &mut io::stdout())
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    } else {
        run_batch(args)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
