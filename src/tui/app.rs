//! Main application state and rendering

use crate::game::{scenario, LineBuffer, Session};
use crate::tui::widgets::{PodCard, ProgressBar};
use crate::tui::{create_content_layout, create_main_layout, create_side_layout, styled_block, Theme, CONTROLS};
use crate::Config;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use tracing::debug;

const PROMPT: &str = "$ ";

/// Scrollback kept for the terminal pane
const MAX_OUTPUT_LINES: usize = 500;

/// Application state
pub struct App {
    pub session: Session,
    pub input: LineBuffer,
    pub theme: Theme,
    pub running: bool,
    pub show_hint: bool,
    pub output: Vec<String>,
    tick_rate: Duration,
    started: Instant,
    last_tick: Instant,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let now = Instant::now();
        Self {
            session: Session::new(),
            input: LineBuffer::new(),
            theme: Theme::default(),
            running: true,
            show_hint: config.show_hint,
            output: scenario::WELCOME.iter().map(|l| l.to_string()).collect(),
            tick_rate: config.tick_rate(),
            started: now,
            last_tick: now,
        }
    }

    /// Wait up to one tick for input, then let scheduled steps catch up
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Paste(text) => self.handle_paste(&text),
                _ => {}
            }
        }

        let now = Instant::now();
        self.tick(now.duration_since(self.last_tick));
        self.last_tick = now;

        Ok(self.running)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Esc => self.quit(),
            KeyCode::F(1) => self.show_hint = !self.show_hint,
            KeyCode::Enter => {
                self.echo(self.input.as_str().to_string());
                if let Some(line) = self.input.submit() {
                    self.submit(&line);
                }
            }
            KeyCode::Backspace => {
                self.input.backspace();
            }
            KeyCode::Up => self.input.recall_previous(),
            KeyCode::Down => self.input.recall_next(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        for line in self.input.paste(text) {
            self.echo(line.clone());
            self.submit(&line);
        }
    }

    /// Advance the session clock and print anything the rollout produced
    pub fn tick(&mut self, elapsed: Duration) {
        let lines = self.session.advance(elapsed);
        self.push_lines(lines);
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.shutdown();
    }

    /// Cancel scheduled steps so nothing fires after the UI is gone
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    /// Seconds since start, display only
    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn submit(&mut self, line: &str) {
        let response = self.session.execute(line);
        if response.clear_screen {
            debug!("clearing terminal pane");
            self.output.clear();
        }
        self.push_lines(response.lines);
    }

    fn echo(&mut self, typed: String) {
        self.push_lines(vec![format!("{}{}", PROMPT, typed)]);
    }

    fn push_lines(&mut self, lines: Vec<String>) {
        self.output.extend(lines);
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0]);

        let content = create_content_layout(layout[1]);
        self.render_side_panel(frame, content[0]);
        self.render_terminal(frame, content[1]);

        self.render_progress(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(70)])
            .split(area);

        let title = Paragraph::new(format!(" ⎈ {}", scenario::TITLE))
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(title, header_layout[0]);

        let status = Line::from(vec![
            Span::styled(
                format!("Time: {}", format_elapsed(self.elapsed_secs())),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Commands: {}", self.session.stats().commands_run),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(CONTROLS, Style::default().fg(self.theme.muted)),
        ]);
        let status = Paragraph::new(status)
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(status, header_layout[1]);
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = create_side_layout(area, self.show_hint);
        let pods = self.session.cluster().pods();
        let deployments: Vec<_> = self.session.cluster().deployments().collect();
        let available = deployments.iter().filter(|d| d.is_available()).count();

        let overview = vec![
            Line::from(vec![
                Span::raw("Nodes  "),
                Span::styled("1 active", Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::raw("Pods   "),
                Span::styled(format!("{} total", pods.len()), Style::default().fg(Color::Gray)),
            ]),
            Line::from(vec![
                Span::raw("Deploy "),
                Span::styled(
                    format!("{}/{} available", available, deployments.len()),
                    Style::default().fg(if available == deployments.len() {
                        self.theme.success
                    } else {
                        self.theme.alert
                    }),
                ),
            ]),
        ];
        let overview = Paragraph::new(overview).block(styled_block("Cluster Overview", &self.theme));
        frame.render_widget(overview, chunks[0]);

        let block = styled_block("Pod Status", &self.theme);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);
        for (i, pod) in pods.iter().enumerate() {
            let y = inner.y + (i as u16) * 4;
            if y + 3 > inner.y + inner.height {
                break;
            }
            frame.render_widget(PodCard::new(pod), Rect::new(inner.x, y, inner.width, 3));
        }

        if self.show_hint {
            let hint = Paragraph::new(scenario::HINT)
                .style(Style::default().fg(self.theme.fg))
                .wrap(Wrap { trim: true })
                .block(styled_block("Hint", &self.theme).border_style(Style::default().fg(self.theme.info)));
            frame.render_widget(hint, chunks[2]);
        }
    }

    fn render_terminal(&self, frame: &mut Frame, area: Rect) {
        let visible_lines = area.height.saturating_sub(2) as usize;
        let prompt = format!("{}{}_", PROMPT, self.input.as_str());

        // keep the last row for the prompt
        let start = (self.output.len() + 1).saturating_sub(visible_lines);
        let mut lines: Vec<Line> = self.output[start.min(self.output.len())..]
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), self.line_style(line))))
            .collect();
        lines.push(Line::from(Span::styled(prompt, Style::default().fg(self.theme.success))));

        let terminal = Paragraph::new(lines).block(styled_block("Terminal", &self.theme));
        frame.render_widget(terminal, area);
    }

    fn line_style(&self, line: &str) -> Style {
        if line.starts_with("Error:") || line.contains("ERROR:") || line.contains("Warning  BackOff") {
            Style::default().fg(self.theme.alert).add_modifier(Modifier::BOLD)
        } else if line.starts_with(PROMPT) {
            Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)
        } else if line.starts_with('#') {
            Style::default().fg(self.theme.muted)
        } else if line.contains("successfully rolled out") || line.ends_with(" edited") {
            Style::default().fg(self.theme.success)
        } else if line.starts_with("Waiting for") {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(self.theme.fg)
        }
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("Scenario Progress", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(ProgressBar::new(self.session.progress()).color(self.theme.info), inner);
    }
}

/// `mm:ss` for the header clock
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
