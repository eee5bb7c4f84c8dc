use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::PlayerScreen;
use crate::config;
use crate::player::PlayerFacade;
use crate::ui::{self, ScreenLayout};

/// Pointer gesture in progress, decided by where the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Swipe,
    Seek,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    gesture: Option<Gesture>,
    /// Layout of the last drawn frame, used for hit-testing.
    layout: ScreenLayout,
}

/// Main terminal event loop: drains player events, advances the carousel,
/// draws and handles input. Returns `Ok(())` when quit is requested.
pub fn run<P: PlayerFacade>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    screen: &mut PlayerScreen,
    player: &P,
    state: &mut EventLoopState,
) -> Result<()> {
    let frame_interval = Duration::from_millis(settings.ui.frame_interval_ms.max(1));

    loop {
        let now = Instant::now();
        screen.pump_events(player, now);
        screen.tick(player, now);

        terminal.draw(|f| {
            let layout = ScreenLayout::compute(f.area());
            screen.set_viewport(
                f64::from(layout.carousel.width),
                f64::from(layout.seek_bar.width),
                player,
                now,
            );
            ui::draw(
                f,
                screen,
                &settings.ui,
                &settings.carousel,
                &settings.controls,
                &layout,
            );
            state.layout = layout;
        })?;

        if event::poll(frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, screen, player, state) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, screen, player, state),
                _ => {}
            }
        }
    }
}

/// Returns true when the app should quit.
fn handle_key_event<P: PlayerFacade>(
    key: KeyEvent,
    settings: &config::Settings,
    screen: &mut PlayerScreen,
    player: &P,
    state: &mut EventLoopState,
) -> bool {
    let now = Instant::now();
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Esc => {
            if state.gesture == Some(Gesture::Seek) {
                state.gesture = None;
            }
            screen.cancel_seek();
        }
        KeyCode::Char('h') | KeyCode::Left => screen.prev_page(now),
        KeyCode::Char('l') | KeyCode::Right => screen.next_page(now),
        KeyCode::Char('g') | KeyCode::Home => screen.first_page(now),
        KeyCode::Char('G') | KeyCode::End => screen.last_page(now),
        KeyCode::Char('p') | KeyCode::Char(' ') => screen.toggle_playback(player),
        KeyCode::Char('r') => screen.cycle_repeat(player),
        KeyCode::Char('L') => screen.scrub(scrub, player),
        KeyCode::Char('H') => screen.scrub(-scrub, player),
        _ => {}
    }
    false
}

fn handle_mouse_event<P: PlayerFacade>(
    mouse: MouseEvent,
    screen: &mut PlayerScreen,
    player: &P,
    state: &mut EventLoopState,
) {
    let now = Instant::now();
    let layout = state.layout;
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if layout.in_seek_bar(col, row) {
                screen.begin_seek(layout.seek_delta(col));
                state.gesture = Some(Gesture::Seek);
            } else if layout.in_carousel(col, row) {
                screen.begin_swipe(layout.carousel_column(col));
                state.gesture = Some(Gesture::Swipe);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => match state.gesture {
            Some(Gesture::Seek) => screen.seek_move(layout.seek_delta(col)),
            Some(Gesture::Swipe) => screen.swipe_to(layout.carousel_column(col), player, now),
            None => {}
        },
        MouseEventKind::Up(MouseButton::Left) => match state.gesture.take() {
            Some(Gesture::Seek) => {
                if let Some(target) = screen.end_seek(player) {
                    debug!(target, "seek gesture released");
                }
            }
            Some(Gesture::Swipe) => screen.end_swipe(now),
            None => {}
        },
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight
            if layout.in_carousel(col, row) && state.gesture.is_none() =>
        {
            screen.next_page(now);
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft
            if layout.in_carousel(col, row) && state.gesture.is_none() =>
        {
            screen.prev_page(now);
        }
        _ => {}
    }
}
