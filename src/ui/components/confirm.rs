use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
  Confirmed,
  Cancelled,
}

/// Yes/no dialog. While busy only cancel is accepted.
#[derive(Debug, Clone)]
pub struct Confirm {
  title: String,
  body: String,
  busy: bool,
}

impl Confirm {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      body: body.into(),
      busy: false,
    }
  }

  pub fn set_busy(&mut self, busy: bool) {
    self.busy = busy;
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<ConfirmEvent> {
    match key.code {
      KeyCode::Esc | KeyCode::Char('n') => KeyResult::Event(ConfirmEvent::Cancelled),
      KeyCode::Enter | KeyCode::Char('y') if !self.busy => KeyResult::Event(ConfirmEvent::Confirmed),
      _ => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let overlay_area = super::centered(area, 56, 7);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Red))
      .title(format!(" {} ", self.title));

    let footer = if self.busy {
      Line::styled("Deleting...", Style::default().fg(Color::Yellow))
    } else {
      Line::from(vec![
        Span::styled("<y>", Style::default().fg(Color::Red)),
        Span::styled(" delete   ", Style::default().fg(Color::DarkGray)),
        Span::styled("<n>", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
      ])
    };

    let text = vec![Line::raw(self.body.as_str()), Line::raw(""), footer];
    let paragraph = Paragraph::new(text)
      .block(block)
      .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, overlay_area);
  }
}
