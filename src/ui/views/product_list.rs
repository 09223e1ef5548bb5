use crate::catalog::Product;
use crate::ui::renderfns::{format_date, format_price, truncate};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn draw_product_list(
  frame: &mut Frame,
  area: Rect,
  products: &[Product],
  list_state: &mut ListState,
  loading: bool,
) {
  let title = if loading {
    " Products (loading...) ".to_string()
  } else {
    format!(" Products ({}) ", products.len())
  };

  let block = Block::default()
    .title(title)
    .title_alignment(Alignment::Center)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Blue));

  if products.is_empty() {
    let content = if loading {
      "Loading products..."
    } else {
      "No products found. Press 'n' to create one, 'r' to reload."
    };
    let paragraph = Paragraph::new(content)
      .block(block)
      .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
    return;
  }

  let items: Vec<ListItem> = products
    .iter()
    .map(|product| {
      let line = Line::from(vec![
        Span::styled(
          format!("{:>10}", format_price(product.price)),
          Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
          format!("{:<32}", truncate(&product.name, 32)),
          Style::default().fg(Color::White).bold(),
        ),
        Span::raw(" "),
        Span::styled(
          format!("{:<10}", format_date(product.updated_at)),
          Style::default().fg(Color::Yellow),
        ),
        Span::raw(" "),
        Span::styled(truncate(&product.image, 48), Style::default().fg(Color::DarkGray)),
      ]);
      ListItem::new(line)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_style(
      Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

  frame.render_stateful_widget(list, area, list_state);
}
