//! Custom widgets for the dashboard

use crate::data::Pod;
use crate::game::ScenarioProgress;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Scenario progress bar with a `Step n/5` label on the right
pub struct ProgressBar {
    progress: ScenarioProgress,
    color: Color,
}

impl ProgressBar {
    pub fn new(progress: ScenarioProgress) -> Self {
        Self {
            progress,
            color: Color::Blue,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = format!(" {}", self.progress);
        let label_width = label.chars().count() as u16;
        if area.width < label_width + 3 || area.height < 1 {
            return;
        }

        let bar_width = area.width - label_width - 2;
        let filled = (f64::from(bar_width) * self.progress.ratio()).round() as u16;

        buf.set_string(area.x, area.y, "[", Style::default());
        for x in 0..bar_width {
            let (symbol, color) = if x < filled {
                ("█", self.color)
            } else {
                ("░", Color::DarkGray)
            };
            buf.set_string(area.x + 1 + x, area.y, symbol, Style::default().fg(color));
        }
        buf.set_string(area.x + 1 + bar_width, area.y, "]", Style::default());
        buf.set_string(
            area.x + 2 + bar_width,
            area.y,
            &label,
            Style::default().fg(Color::Gray),
        );
    }
}

/// Three-line pod card: icon and name, status, restarts and age
pub struct PodCard<'a> {
    pod: &'a Pod,
}

impl<'a> PodCard<'a> {
    pub fn new(pod: &'a Pod) -> Self {
        Self { pod }
    }
}

impl Widget for PodCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }
        let color = crate::tui::pod_color(self.pod);
        let width = area.width as usize;

        let title = format!("{} {}", self.pod.status.symbol(), self.pod.name);
        buf.set_stringn(
            area.x,
            area.y,
            &title,
            width,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );

        if area.height > 1 {
            let status = format!("  {}", self.pod.status);
            buf.set_stringn(area.x, area.y + 1, &status, width, Style::default().fg(color));
        }
        if area.height > 2 {
            let details = format!("  Restarts: {} • Age: {}", self.pod.restarts, self.pod.age);
            buf.set_stringn(area.x, area.y + 2, &details, width, Style::default().fg(Color::DarkGray));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn progress_bar_fills_by_step() {
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar::new(ScenarioProgress::new(4).unwrap()).render(area, &mut buf);

        let line = row(&buf, 0);
        assert!(line.starts_with('['));
        assert!(line.ends_with("Step 4/5"));
        // 9 cells of bar, 4/5 of them filled
        assert_eq!(line.matches('█').count(), 7);
    }

    #[test]
    fn progress_bar_skips_tiny_area() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        ProgressBar::new(ScenarioProgress::default()).render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim(), "");
    }

    #[test]
    fn pod_card_shows_status_and_restarts() {
        let pod = Pod::crash_looping("auth-service-x", "10.0.0.1", 5, &[]);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        PodCard::new(&pod).render(area, &mut buf);

        assert!(row(&buf, 0).contains("auth-service-x"));
        assert!(row(&buf, 1).contains("CrashLoopBackOff"));
        assert!(row(&buf, 2).contains("Restarts: 5"));
    }
}
