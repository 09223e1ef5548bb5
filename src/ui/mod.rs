pub mod components;
pub mod renderfns;
pub mod views;

use crate::app::{App, Modal};
use crate::store::RemoteClient;
use ratatui::prelude::*;
use ratatui::widgets::ListState;

const LIST_HINTS: &[(&str, &str)] = &[
  ("j/k", "move"),
  ("n", "new"),
  ("e", "edit"),
  ("d", "delete"),
  ("o", "order"),
  ("r", "reload"),
  ("q", "quit"),
];

const FORM_HINTS: &[(&str, &str)] = &[
  ("tab", "next field"),
  ("enter", "submit"),
  ("esc", "close"),
];

const CONFIRM_HINTS: &[(&str, &str)] = &[("y", "confirm"), ("n", "cancel")];

const BUSY_HINTS: &[(&str, &str)] = &[("esc", "close")];

/// Main draw function
pub fn draw<R: RemoteClient + 'static>(frame: &mut Frame, app: &mut App<R>) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Product list
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let loading = app.is_loading();
  renderfns::draw_header(
    frame,
    chunks[0],
    app.title(),
    app.products().len(),
    loading,
    app.in_flight(),
  );

  let (products, list_state) = app.list_view();
  views::draw_product_list(frame, chunks[1], products, list_state, loading);

  let hints = footer_hints(app.modal());
  renderfns::draw_footer(frame, chunks[2], hints);

  let area = frame.area();
  match app.modal() {
    Some(Modal::Product(form)) => form.form.render_overlay(frame, area),
    Some(Modal::Delete(dialog)) => dialog.confirm.render_overlay(frame, area),
    Some(Modal::Order(order)) => order.form.render_overlay(frame, area),
    None => {}
  }

  if let Some(toast) = app.toast() {
    toast.render_overlay(frame, area);
  }
}

/// Key hints for whatever owns the keyboard. A submitted modal only closes.
fn footer_hints(modal: Option<&Modal>) -> &'static [(&'static str, &'static str)] {
  match modal {
    None => LIST_HINTS,
    Some(Modal::Product(form)) if form.form.is_busy() => BUSY_HINTS,
    Some(Modal::Order(order)) if order.form.is_busy() => BUSY_HINTS,
    Some(Modal::Delete(dialog)) if dialog.pending.is_some() => BUSY_HINTS,
    Some(Modal::Delete(_)) => CONFIRM_HINTS,
    Some(Modal::Product(_) | Modal::Order(_)) => FORM_HINTS,
  }
}

/// Keep the list cursor on a row that exists, or on nothing for an empty list.
pub fn ensure_valid_selection(state: &mut ListState, len: usize) {
  if len == 0 {
    state.select(None);
    return;
  }
  match state.selected() {
    Some(i) if i >= len => state.select(Some(len - 1)),
    None => state.select(Some(0)),
    _ => {}
  }
}
