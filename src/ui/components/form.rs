use super::input::{InputResult, TextInput};
use super::KeyResult;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Events emitted by a form that its owner needs to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
  /// Enter pressed while the form was editable
  Submitted,
  /// Escape pressed
  Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  /// Digits and a decimal point only
  Number,
  /// Cycles through fixed options with Left/Right or Space
  Choice(&'static [&'static str]),
}

#[derive(Debug, Clone)]
struct Field {
  label: &'static str,
  kind: FieldKind,
  input: TextInput,
  choice: Option<usize>,
}

/// Modal form with labelled fields, one focused at a time.
///
/// While `busy` the fields are frozen; Esc still closes the form.
#[derive(Debug, Clone)]
pub struct Form {
  title: String,
  fields: Vec<Field>,
  focus: usize,
  busy: bool,
}

impl Form {
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      fields: Vec::new(),
      focus: 0,
      busy: false,
    }
  }

  pub fn text(self, label: &'static str, value: impl Into<String>) -> Self {
    self.field(label, FieldKind::Text, value)
  }

  pub fn number(self, label: &'static str, value: impl Into<String>) -> Self {
    self.field(label, FieldKind::Number, value)
  }

  pub fn choice(mut self, label: &'static str, options: &'static [&'static str]) -> Self {
    self.fields.push(Field {
      label,
      kind: FieldKind::Choice(options),
      input: TextInput::new(),
      choice: None,
    });
    self
  }

  fn field(mut self, label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
    self.fields.push(Field {
      label,
      kind,
      input: TextInput::with_value(value),
      choice: None,
    });
    self
  }

  /// Text of the field at `index`, empty for choice fields
  pub fn value(&self, index: usize) -> &str {
    self
      .fields
      .get(index)
      .map(|f| f.input.value())
      .unwrap_or("")
  }

  /// Selected option index of a choice field, `None` until one is picked
  pub fn selected(&self, index: usize) -> Option<usize> {
    self.fields.get(index).and_then(|f| f.choice)
  }

  pub fn is_busy(&self) -> bool {
    self.busy
  }

  pub fn set_busy(&mut self, busy: bool) {
    self.busy = busy;
  }

  fn move_focus(&mut self, delta: isize) {
    if self.fields.is_empty() {
      return;
    }
    let len = self.fields.len() as isize;
    self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<FormEvent> {
    match key.code {
      KeyCode::Esc => return KeyResult::Event(FormEvent::Cancelled),
      _ if self.busy => return KeyResult::Handled,
      KeyCode::Enter => return KeyResult::Event(FormEvent::Submitted),
      KeyCode::Tab | KeyCode::Down => {
        self.move_focus(1);
        return KeyResult::Handled;
      }
      KeyCode::BackTab | KeyCode::Up => {
        self.move_focus(-1);
        return KeyResult::Handled;
      }
      _ => {}
    }

    let Some(field) = self.fields.get_mut(self.focus) else {
      return KeyResult::NotHandled;
    };

    match field.kind {
      FieldKind::Choice(options) => {
        let len = options.len();
        if len == 0 {
          return KeyResult::Handled;
        }
        field.choice = match (key.code, field.choice) {
          (KeyCode::Right | KeyCode::Char(' '), None) => Some(0),
          (KeyCode::Left, None) => Some(len - 1),
          (KeyCode::Right | KeyCode::Char(' '), Some(i)) => Some((i + 1) % len),
          (KeyCode::Left, Some(i)) => Some((i + len - 1) % len),
          (_, current) => current,
        };
        KeyResult::Handled
      }
      FieldKind::Number => match key.code {
        KeyCode::Char(c) if !(c.is_ascii_digit() || c == '.') => KeyResult::Handled,
        _ => into_key_result(field.input.handle_key(key)),
      },
      FieldKind::Text => into_key_result(field.input.handle_key(key)),
    }
  }

  /// Render the form centered in `area`
  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(64);
    let height = (self.fields.len() as u16 + 4).min(area.height);
    let overlay_area = super::centered(area, width, height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(format!(" {} ", self.title));

    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    if inner.height == 0 {
      return;
    }

    let label_width = self
      .fields
      .iter()
      .map(|f| f.label.chars().count())
      .max()
      .unwrap_or(0)
      + 2;

    let mut lines: Vec<Line> = Vec::with_capacity(self.fields.len() + 2);
    for (i, field) in self.fields.iter().enumerate() {
      let focused = i == self.focus && !self.busy;
      let label_style = if focused {
        Style::default().fg(Color::Cyan).bold()
      } else {
        Style::default().fg(Color::DarkGray)
      };
      let value = match field.kind {
        FieldKind::Choice(options) => match field.choice.and_then(|c| options.get(c)) {
          Some(option) => format!("< {} >", option),
          None => "< select >".to_string(),
        },
        _ => field.input.value().to_string(),
      };
      lines.push(Line::from(vec![
        Span::styled(format!("{:<label_width$}", field.label), label_style),
        Span::raw(value),
      ]));
    }

    lines.push(Line::raw(""));
    lines.push(if self.busy {
      Line::styled("Saving...", Style::default().fg(Color::Yellow))
    } else {
      Line::styled(
        "Enter submit  Tab next  Esc cancel",
        Style::default().fg(Color::DarkGray),
      )
    });

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(field) = self.fields.get(self.focus) {
      if !self.busy && !matches!(field.kind, FieldKind::Choice(_)) {
        let x = inner.x + (label_width + field.input.cursor_position()) as u16;
        let y = inner.y + self.focus as u16;
        if x < inner.right() && y < inner.bottom() {
          frame.set_cursor_position(Position::new(x, y));
        }
      }
    }
  }
}

fn into_key_result(result: InputResult) -> KeyResult<FormEvent> {
  match result {
    InputResult::Consumed => KeyResult::Handled,
    InputResult::NotHandled => KeyResult::NotHandled,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::KeyModifiers;

  const SIZES: &[&str] = &["S", "M", "L"];

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_str(form: &mut Form, s: &str) {
    for c in s.chars() {
      form.handle_key(key(KeyCode::Char(c)));
    }
  }

  fn sample() -> Form {
    Form::new("Sample")
      .text("Name", "")
      .number("Price", "")
      .choice("Size", SIZES)
  }

  #[test]
  fn test_typing_goes_to_focused_field() {
    let mut form = sample();
    type_str(&mut form, "Mug");
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "4.50");

    assert_eq!(form.value(0), "Mug");
    assert_eq!(form.value(1), "4.50");
  }

  #[test]
  fn test_number_field_ignores_letters() {
    let mut form = sample();
    form.handle_key(key(KeyCode::Tab));
    type_str(&mut form, "1a2b.5");
    assert_eq!(form.value(1), "12.5");
  }

  #[test]
  fn test_focus_wraps() {
    let mut form = sample();
    form.handle_key(key(KeyCode::BackTab));
    assert_eq!(form.focus, 2);
    form.handle_key(key(KeyCode::Tab));
    assert_eq!(form.focus, 0);
  }

  #[test]
  fn test_choice_cycles() {
    let mut form = sample();
    form.handle_key(key(KeyCode::Up));
    assert_eq!(form.selected(2), None);

    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.selected(2), Some(0));
    form.handle_key(key(KeyCode::Left));
    assert_eq!(form.selected(2), Some(2));
    form.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(form.selected(2), Some(0));
  }

  #[test]
  fn test_submit_and_cancel() {
    let mut form = sample();
    assert_eq!(
      form.handle_key(key(KeyCode::Enter)),
      KeyResult::Event(FormEvent::Submitted)
    );
    assert_eq!(
      form.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(FormEvent::Cancelled)
    );
  }

  #[test]
  fn test_busy_form_is_frozen_but_closable() {
    let mut form = Form::new("Edit").text("Name", "Desk");
    form.set_busy(true);

    type_str(&mut form, "zzz");
    assert_eq!(form.value(0), "Desk");
    assert_eq!(form.handle_key(key(KeyCode::Enter)), KeyResult::Handled);
    assert_eq!(
      form.handle_key(key(KeyCode::Esc)),
      KeyResult::Event(FormEvent::Cancelled)
    );
  }
}
