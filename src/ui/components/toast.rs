use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::time::{Duration, Instant};

/// How long a notification stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Error,
}

/// Transient notification in the bottom-right corner
#[derive(Debug, Clone)]
pub struct Toast {
  pub kind: ToastKind,
  pub title: String,
  pub message: String,
  shown_at: Instant,
}

impl Toast {
  pub fn new(kind: ToastKind, title: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      kind,
      title: title.into(),
      message: message.into(),
      shown_at: Instant::now(),
    }
  }

  pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(ToastKind::Success, title, message)
  }

  pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
    Self::new(ToastKind::Error, title, message)
  }

  pub fn is_expired(&self, now: Instant) -> bool {
    now.duration_since(self.shown_at) >= TOAST_TTL
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let color = match self.kind {
      ToastKind::Success => Color::Green,
      ToastKind::Error => Color::Red,
    };

    let width = area.width.saturating_sub(2).min(48);
    let height = 4.min(area.height);
    let x = area.right().saturating_sub(width + 1);
    let y = area.bottom().saturating_sub(height);
    let toast_area = Rect::new(x.max(area.x), y.max(area.y), width, height);

    frame.render_widget(Clear, toast_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(color))
      .title(Span::styled(
        format!(" {} ", self.title),
        Style::default().fg(color).bold(),
      ));

    let paragraph = Paragraph::new(self.message.as_str())
      .block(block)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, toast_area);
  }
}
