//! Kubernetes Troubleshooting Simulator
//!
//! Fix the CrashLoopBackOff in auth-service from a simulated kubectl prompt.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use k8s_troubleshooter::{logging, tui::App, Config, VERSION};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, stdout, Stdout};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    logging::init(&config)?;
    info!(version = VERSION, tick_ms = config.tick_ms, "starting simulator");

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode, is this a TTY?")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = run(&mut terminal, &mut app);
    app.shutdown();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    let progress = app.session.progress();
    info!(step = progress.step(), commands = app.session.stats().commands_run, "exiting");

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  Thanks for using the K8s Troubleshooting Simulator!   ║");
    println!("║  {:<54}║", format!("Finished at {}", progress));
    println!("╚════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}
