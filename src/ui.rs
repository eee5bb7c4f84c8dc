//! UI rendering for the player screen.
//!
//! The layout is computed once per frame and shared with the event loop,
//! which uses the same rectangles to hit-test mouse gestures.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::PlayerScreen;
use crate::config::{CarouselSettings, ControlsSettings, UiSettings};
use crate::player::TransportState;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("h/l".to_string(), "prev/next page".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    // H/L is filled dynamically from config.
    map.insert("g/G".to_string(), "first/last".to_string());
    map.insert("r".to_string(), "repeat".to_string());
    map.insert("drag".to_string(), "swipe / seek".to_string());
    map.insert("esc".to_string(), "cancel seek".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = ["h/l", "space/p", "H/L", "g/G", "r", "drag", "esc", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions. `carousel` and `seek_bar` are the inner, hit-testable areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub header: Rect,
    pub carousel_block: Rect,
    pub carousel: Rect,
    pub now_playing: Rect,
    pub seek_block: Rect,
    pub elapsed: Rect,
    pub seek_bar: Rect,
    pub remaining: Rect,
    pub transport: Rect,
    pub footer: Rect,
}

const TIME_WIDTH: u16 = 8;

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(4),
            ])
            .split(area);

        let carousel_block = rows[1];
        let carousel = Block::default().borders(Borders::ALL).inner(carousel_block);

        let seek_block = rows[3];
        let seek_inner = Block::default().borders(Borders::ALL).inner(seek_block);
        let seek_cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(TIME_WIDTH),
                Constraint::Min(1),
                Constraint::Length(TIME_WIDTH),
            ])
            .split(seek_inner);

        Self {
            header: rows[0],
            carousel_block,
            carousel,
            now_playing: rows[2],
            seek_block,
            elapsed: seek_cols[0],
            seek_bar: seek_cols[1],
            remaining: seek_cols[2],
            transport: rows[4],
            footer: rows[5],
        }
    }

    pub fn in_carousel(&self, column: u16, row: u16) -> bool {
        self.carousel.contains(Position::new(column, row))
    }

    pub fn in_seek_bar(&self, column: u16, row: u16) -> bool {
        self.seek_bar.contains(Position::new(column, row))
    }

    /// Column relative to the carousel's left edge.
    pub fn carousel_column(&self, column: u16) -> f64 {
        f64::from(column) - f64::from(self.carousel.x)
    }

    /// Column relative to the seek bar's left edge; may fall outside the bar while dragging.
    pub fn seek_delta(&self, column: u16) -> f64 {
        f64::from(column) - f64::from(self.seek_bar.x)
    }
}

/// Horizontal slice of a visible cover card: page index, x relative to the viewport, width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpan {
    pub page: usize,
    pub x: u16,
    pub width: u16,
}

/// Project the pages that intersect a viewport of `width` cells scrolled to `offset`.
pub fn visible_cards(
    offset: f64,
    page_width: f64,
    pages: usize,
    width: u16,
    margin: u16,
) -> Vec<CardSpan> {
    if page_width <= 0.0 || width == 0 {
        return Vec::new();
    }
    let view = f64::from(width);
    let margin = f64::from(margin).min(page_width / 2.0 - 1.0).max(0.0);
    let first = (offset / page_width).floor().max(0.0) as usize;

    (first..pages)
        .map(|page| {
            let left = page as f64 * page_width - offset;
            (page, left + margin, left + page_width - margin)
        })
        .take_while(|&(_, x0, _)| x0 < view)
        .filter_map(|(page, x0, x1)| {
            let x0 = x0.max(0.0).round();
            let x1 = x1.min(view).round();
            (x1 > x0).then(|| CardSpan {
                page,
                x: x0 as u16,
                width: (x1 - x0) as u16,
            })
        })
        .collect()
}

fn transport_label(state: TransportState) -> &'static str {
    match state {
        TransportState::Idle => "■ idle",
        TransportState::Ready => "■ ready",
        TransportState::Playing => "▶ playing",
        TransportState::Paused => "⏸ paused",
        TransportState::Stopped => "■ stopped",
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn draw_carousel(
    frame: &mut Frame,
    screen: &PlayerScreen,
    carousel: &CarouselSettings,
    layout: &ScreenLayout,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {}/{} ",
            screen.carousel.current_page() + usize::from(!screen.playlist.is_empty()),
            screen.playlist.len()
        ))
        .title_alignment(Alignment::Right);
    frame.render_widget(block, layout.carousel_block);

    if screen.playlist.is_empty() {
        let empty = Paragraph::new("no tracks")
            .alignment(Alignment::Center)
            .italic();
        frame.render_widget(empty, layout.carousel);
        return;
    }

    let area = layout.carousel;
    let playing = screen.now_playing.as_ref().map(|n| n.index);
    let cards = visible_cards(
        screen.carousel.offset(),
        screen.carousel.page_width(),
        screen.carousel.pages(),
        area.width,
        carousel.card_margin,
    );

    for card in cards {
        let Some(track) = screen.playlist.get(card.page) else {
            continue;
        };
        let rect = Rect {
            x: area.x + card.x,
            y: area.y,
            width: card.width,
            height: area.height,
        };

        let artwork = track
            .artwork
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| format!("[{}]", n.to_string_lossy()))
            .unwrap_or_else(|| "♪".to_string());
        let lines = vec![
            Line::from(artwork),
            Line::from(""),
            Line::from(track.title.clone()).bold(),
            Line::from(track.artist.clone().unwrap_or_default()),
        ];

        let mut card_block = Block::default().borders(Borders::ALL);
        if playing == Some(card.page) {
            card_block = card_block.border_style(Style::default().add_modifier(Modifier::BOLD));
        }
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(card_block)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, rect);
    }
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    screen: &PlayerScreen,
    ui_settings: &UiSettings,
    carousel_settings: &CarouselSettings,
    controls_settings: &ControlsSettings,
    layout: &ScreenLayout,
) {
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tracksweep ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, layout.header);

    draw_carousel(frame, screen, carousel_settings, layout);

    let now_playing = match &screen.now_playing {
        Some(np) => vec![
            Line::from(np.title.clone()).bold(),
            Line::from(np.artist.clone().unwrap_or_else(|| "-".to_string())),
        ],
        None => vec![Line::from("nothing playing").italic()],
    };
    let now_playing = Paragraph::new(now_playing)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" track "));
    frame.render_widget(now_playing, layout.now_playing);

    let seek_title = if screen.seek.is_seeking() {
        " seek (release to jump) "
    } else {
        " position "
    };
    frame.render_widget(
        Block::default().borders(Borders::ALL).title(seek_title),
        layout.seek_block,
    );
    frame.render_widget(
        Paragraph::new(screen.elapsed_label()).alignment(Alignment::Left),
        layout.elapsed,
    );
    let gauge = Gauge::default()
        .ratio(screen.displayed_fraction())
        .label("")
        .use_unicode(true);
    frame.render_widget(gauge, layout.seek_bar);
    frame.render_widget(
        Paragraph::new(screen.remaining_label()).alignment(Alignment::Right),
        layout.remaining,
    );

    let transport = if screen.is_subscribed() {
        transport_label(screen.snapshot.state)
    } else {
        "✕ no audio"
    };
    let mut parts = vec![
        transport.to_string(),
        format!("REPEAT: {}", screen.repeat.label()),
    ];
    if let Some(status) = &screen.status {
        parts.push(status.clone());
    }
    let transport = Paragraph::new(parts.join(" • ")).block(padded_block(" status "));
    frame.render_widget(transport, layout.transport);

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, layout.footer);
}
