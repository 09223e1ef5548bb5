use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the header bar with name, API context and product count
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: &str,
  product_count: usize,
  loading: bool,
  in_flight: usize,
) {
  let mut spans = vec![
    Span::styled(" shelf ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", title), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", count_label(product_count, loading)),
      Style::default().fg(Color::Yellow).bold(),
    ),
  ];

  if in_flight > 0 {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" {} pending ", in_flight),
      Style::default().fg(Color::Magenta),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

fn count_label(count: usize, loading: bool) -> String {
  match (loading, count) {
    (true, _) => "loading...".to_string(),
    (false, 1) => "1 product".to_string(),
    (false, n) => format!("{} products", n),
  }
}
