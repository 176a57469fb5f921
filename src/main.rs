use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use snake_arcade::cli::Cli;
use snake_arcade::constants::INPUT_POLL_MS;
use snake_arcade::input::{map_key, process_input};
use snake_arcade::ui::draw_ui;
use snake_arcade::{logging, Arcade, ArcadeEvent, GameConfig};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> snake_arcade::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        width = config.width,
        height = config.height,
        cadence_ms = config.cadence_ms,
        policy = config.collision_policy.name(),
        seed = ?cli.seed,
        "starting arcade"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &config, &mut rng);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let final_score = result?;
    println!("Final score: {}", final_score);
    Ok(())
}

/// Main loop. Returns the displayed score when the player quits.
fn run(terminal: &mut Term, config: &GameConfig, rng: &mut StdRng) -> snake_arcade::Result<u32> {
    let mut arcade = Arcade::new(config, rng);
    let started = Instant::now();

    loop {
        let now_ms = started.elapsed().as_millis() as u64;
        for event in arcade.frame(now_ms, rng) {
            if event == ArcadeEvent::GameOver {
                tracing::info!(
                    displayed_score = arcade.displayed_score(),
                    "final score"
                );
            }
        }

        terminal.draw(|frame| draw_ui(frame, &arcade))?;

        // Poll for input (50ms non-blocking)
        if event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            if let Event::Key(key_event) = event::read()? {
                if !process_input(&mut arcade, map_key(key_event)) {
                    return Ok(arcade.displayed_score());
                }
            }
        }
    }
}
