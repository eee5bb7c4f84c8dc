use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::PlayerScreen;
use crate::library;
use crate::logging;
use crate::player::{PlayerFacade, RodioPlayer};

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let (settings, config_problem) = settings::load_settings();

    let _log_guard = match logging::init(&settings.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("tracksweep: logging disabled: {e:#}");
            None
        }
    };
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }

    let path = startup::playlist_path(env::args().nth(1));
    let playlist = library::load(&path, &settings.library)
        .with_context(|| format!("loading playlist from {}", path.display()))?;
    info!(tracks = playlist.len(), path = %path.display(), "playlist loaded");

    let player = RodioPlayer::new();
    let mut screen = PlayerScreen::mount(playlist, &player, startup::screen_options(&settings));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut screen, &player, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let fade_out = Duration::from_millis(settings.audio.quit_fade_out_ms);
    close_player(screen, &player, fade_out);
    player.shutdown(Duration::ZERO);

    run_result
}

/// Fade the audio out and unmount the screen while the engine still takes
/// commands; the caller shuts the engine down afterwards.
fn close_player<P: PlayerFacade>(screen: PlayerScreen, player: &P, fade_out: Duration) {
    if let Err(e) = player.fade_out(fade_out) {
        debug!("no fade-out on quit: {e}");
    }
    screen.unmount(player);
}
