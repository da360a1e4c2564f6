//! Transport panel: status text and single-key controls.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    DefaultTerminal, Frame,
};

use lofi_engine::io::OutputDevice;
use lofi_engine::{Engine, PlaybackSnapshot};

const VOLUME_STEP: f32 = 0.05;

pub struct App<'a, O: OutputDevice> {
    engine: &'a mut Engine<O>,
    message: Option<String>,
    should_quit: bool,
}

impl<'a, O: OutputDevice> App<'a, O> {
    pub fn new(engine: &'a mut Engine<O>) -> Self {
        Self {
            engine,
            message: None,
            should_quit: false,
        }
    }

    /// Runs until `q` or Esc.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            let snapshot = self.engine.status();
            terminal.draw(|frame| self.render(frame, &snapshot))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        self.message = None;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                if self.engine.is_playing() {
                    self.engine.stop();
                } else if let Err(err) = self.engine.start() {
                    self.message = Some(err.to_string());
                }
            }
            KeyCode::Up => {
                let volume = self.engine.volume() + VOLUME_STEP;
                self.engine.set_volume(volume);
            }
            KeyCode::Down => {
                let volume = self.engine.volume() - VOLUME_STEP;
                self.engine.set_volume(volume);
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                if let Err(err) = self.engine.set_seed(fresh_seed()) {
                    self.message = Some(err.to_string());
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.engine.generate_new_patterns(),
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame, snapshot: &PlaybackSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport
                Constraint::Length(4), // Harmony
                Constraint::Length(3), // Volume
                Constraint::Min(0),
                Constraint::Length(1), // Help / errors
            ])
            .split(frame.area());

        render_transport(frame, chunks[0], snapshot);
        render_harmony(frame, chunks[1], snapshot);

        let volume = Gauge::default()
            .block(Block::default().title(" Volume ").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(snapshot.volume.clamp(0.0, 1.0) as f64);
        frame.render_widget(volume, chunks[2]);

        let footer = match &self.message {
            Some(message) => Paragraph::new(format!(" {message}"))
                .style(Style::default().fg(Color::Red)),
            None => Paragraph::new(
                " [Space] Play/Stop  [↑/↓] Volume  [N] New seed  [R] Re-roll  [Q] Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(footer, chunks[4]);
    }
}

fn render_transport(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot) {
    let block = Block::default().title(" lofi ").borders(Borders::ALL);

    let (symbol, label, colour) = if snapshot.is_playing {
        ("▶", "Playing", Color::Green)
    } else {
        ("⏸", "Stopped", Color::Yellow)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {symbol} {label}  "), Style::default().fg(colour)),
        Span::styled(
            format!("Seed: {}", snapshot.seed),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(" (v{})  ", snapshot.variation),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Bar {} | Step {:>2}", snapshot.bar_count + 1, snapshot.step + 1),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_harmony(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot) {
    let block = Block::default().title(" Harmony ").borders(Borders::ALL);
    let chord = snapshot.chord.as_deref().unwrap_or("-");
    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {}  ", snapshot.key), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} BPM", snapshot.bpm),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            format!(" Chord: {chord}"),
            Style::default().fg(Color::White),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn fresh_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
