//! Rendering of the derived view.
//!
//! Renderers only read: they receive the reducer, draw its derived view and
//! query the column configuration, sort directives and stored filters for
//! header state. `TextRenderer` draws a plain-text table.

use crate::reducer::{ViewReducer, ViewStatus};

/// Consumes the derived view after each state change.
pub trait Renderer {
    fn render(&mut self, reducer: &ViewReducer);
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Renders to a `String`, keeping the latest frame.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    pub fn render_to_string(reducer: &ViewReducer) -> String {
        let view = reducer.view();
        let columns = reducer.column_config();
        let mut lines: Vec<String> = Vec::new();

        if !view.columns.is_empty() {
            let header: Vec<String> = view
                .columns
                .iter()
                .map(|c| match reducer.sort_directive(c) {
                    Some(directive) if columns.is_sortable(c) => {
                        format!("{} {}", capitalize(c), directive.icon())
                    }
                    _ => capitalize(c),
                })
                .collect();

            let filters: Vec<String> = view
                .columns
                .iter()
                .map(|c| {
                    if columns.is_filterable(c) {
                        format!("[{}]", reducer.filter_value(c).unwrap_or(""))
                    } else {
                        String::new()
                    }
                })
                .collect();

            let body: Vec<Vec<String>> = view
                .rows
                .iter()
                .map(|row| view.columns.iter().map(|c| row.get(c).to_string()).collect())
                .collect();

            let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
            for cells in std::iter::once(&filters).chain(body.iter()) {
                for (w, cell) in widths.iter_mut().zip(cells) {
                    *w = (*w).max(cell.chars().count());
                }
            }

            lines.push(format_row(&header, &widths));
            lines.push(format_row(&filters, &widths));
            lines.extend(body.iter().map(|cells| format_row(cells, &widths)));
        }

        match view.status() {
            ViewStatus::Rows => {}
            ViewStatus::Loading => lines.push("Loading...".to_string()),
            ViewStatus::NoData => lines.push("No data".to_string()),
            ViewStatus::EmptyPage => lines.push("No rows on this page".to_string()),
        }

        let page = &view.pagination;
        let mut controls = vec!["Previous".to_string()];
        controls.extend(page.page_numbers.iter().map(|&n| {
            if n == page.current_page {
                format!("[{}]", n)
            } else {
                n.to_string()
            }
        }));
        if page.truncated {
            controls.push("....".to_string());
        }
        controls.push("Next".to_string());
        lines.push(controls.join(" "));

        lines.join("\n")
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, reducer: &ViewReducer) {
        self.frame = Self::render_to_string(reducer);
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
