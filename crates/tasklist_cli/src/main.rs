use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, Command};
use tasklist_cli::render;
use tasklist_core::config;
use tasklist_core::config::Palette;
use tasklist_core::error::AppError;
use tasklist_core::task_api;

fn resolve_palette(theme_flag: Option<&str>) -> Palette {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {err}");
    }

    let theme = theme_flag.map(str::to_string).or(loaded.config.theme);
    config::palette_for_theme(theme.as_deref())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    let mut in_quotes = false;
    let mut quoted_token = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => current.push('\\'),
            },
            '"' => {
                in_quotes = !in_quotes;
                quoted_token = true;
            }
            ch if ch.is_whitespace() && !in_quotes => {
                if quoted_token || !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                    quoted_token = false;
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if quoted_token || !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Add { text, deadline } => {
            let text = match text {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("text is required")),
            };

            let deadline = match deadline {
                Some(raw) => Some(task_api::parse_deadline(&raw)?),
                None => None,
            };

            let task = task_api::add_task(&text, deadline)?;
            if cli.json {
                println!("{}", render::task_json(&task)?);
            } else {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Command::Toggle { id } => {
            let task = task_api::toggle_task(&id)?;
            if cli.json {
                println!("{}", render::task_json(&task)?);
            } else if task.completed {
                println!("Completed task: {} ({})", task.text, task.id);
            } else {
                println!("Reopened task: {} ({})", task.text, task.id);
            }
        }
        Command::Delete { id } => {
            let task = task_api::delete_task(&id)?;
            if cli.json {
                println!("{}", render::task_json(&task)?);
            } else {
                println!("Deleted task: {} ({})", task.text, task.id);
            }
        }
        Command::List => {
            let tasks = task_api::list_tasks()?;
            if cli.json {
                println!("{}", render::tasks_json(&tasks)?);
            } else if tasks.is_empty() {
                println!("{}", render::EMPTY_STATE);
            } else {
                let palette = resolve_palette(cli.theme.as_deref());
                println!("{}", render::render_table(&tasks, &palette)?);
                println!("{}", render::summary_line(&tasks));
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
