mod app;
mod cli;
mod render;
mod theme;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands, MapArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use theme::Theme;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use trailmap_core::{
    samples, solve_with, validate, Grid, GridModel, WalkOptions, Walker, WalkerState,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Log to stderr. `TRAILMAP_LOG` takes precedence over `-v`/`-q`.
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_env("TRAILMAP_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Solve {
            map,
            json,
            max_steps,
        } => {
            let (_, grid) = load_map(&map)?;
            let result = solve_with(grid, &WalkOptions { max_steps });
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("Letters: {}", result.letters);
                println!("Path: {}", result.path);
            }
            Ok(exit_status(result.is_complete))
        }
        Commands::Validate { map, json } => {
            let (name, grid) = load_map(&map)?;
            let report = validate(&grid);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_valid {
                println!("{name}: valid");
            } else {
                println!("{name}: {} defect(s)", report.errors.len());
                for defect in &report.errors {
                    println!("  - {defect}");
                }
            }
            Ok(exit_status(report.is_valid))
        }
        Commands::Samples { invalid, json } => {
            let list = if invalid {
                samples::invalid_catalog()
            } else {
                samples::catalog()
            };
            if json {
                println!("{}", serde_json::to_string_pretty(list)?);
            } else {
                for sample in list {
                    println!("{:<10} {:<24} {}", sample.id, sample.name, sample.description);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Show {
            map,
            theme,
            max_steps,
        } => {
            let (name, grid) = load_map(&map)?;
            show(&name, grid, theme.theme(), WalkOptions { max_steps })
        }
        Commands::Play {
            map,
            theme,
            delay_ms,
            max_steps,
        } => {
            let (name, grid) = load_map(&map)?;
            let report = validate(&grid);
            if !report.is_valid {
                println!("{name}: {} defect(s)", report.errors.len());
                for defect in &report.errors {
                    println!("  - {defect}");
                }
                return Ok(ExitCode::from(1));
            }
            let state = WalkerState::new(grid)?;
            let walker = Walker::with_options(WalkOptions { max_steps });
            let theme = theme.theme().unwrap_or_else(Theme::plain);
            let app = App::new(name, state, walker, theme, Duration::from_millis(delay_ms));
            let complete = play(app)?;
            Ok(exit_status(complete))
        }
    }
}

fn exit_status(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Resolve `MapArgs` into a display name and a grid
fn load_map(args: &MapArgs) -> Result<(String, Grid)> {
    if let Some(id) = &args.sample {
        let sample = samples::find(id)
            .with_context(|| format!("unknown sample '{id}' (see `trailmap samples`)"))?;
        debug!(%id, "loaded sample");
        return Ok((sample.name.to_string(), sample.grid()));
    }

    let (name, text) = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read map from stdin")?;
            ("<stdin>".to_string(), text)
        }
    };

    // Editors end files with a newline; it is not part of the map.
    let text = text.strip_suffix('\n').unwrap_or(&text);
    let grid = Grid::from_text(text);
    info!(%name, rows = grid.row_count(), "loaded map");
    Ok((name, grid))
}

fn show(name: &str, grid: Grid, theme: Option<Theme>, options: WalkOptions) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    let report = validate(&grid);

    if !report.is_valid {
        let model = GridModel::new(grid);
        render::write_map(&mut stdout, &model, None, theme.as_ref(), None)?;
        writeln!(stdout)?;
        writeln!(stdout, "{name}: {} defect(s)", report.errors.len())?;
        for defect in &report.errors {
            writeln!(stdout, "  - {defect}")?;
        }
        return Ok(ExitCode::from(1));
    }

    let state = Walker::with_options(options).walk(WalkerState::new(grid)?);
    render::write_map(
        &mut stdout,
        state.model(),
        Some(state.position()),
        theme.as_ref(),
        None,
    )?;
    writeln!(stdout)?;
    writeln!(stdout, "Letters: {}", state.letters())?;
    writeln!(stdout, "Path: {}", state.trace())?;
    writeln!(stdout, "Status: {}", render::status_label(&state))?;
    Ok(exit_status(state.is_complete()))
}

/// Run the interactive player. Returns whether the walk reached the end.
fn play(mut app: App) -> io::Result<bool> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result?;
    println!("Letters: {}", app.state.letters());
    println!("Path: {}", app.state.trace());
    Ok(app.state.is_complete())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
