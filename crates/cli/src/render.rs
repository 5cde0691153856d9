//! Plain-text rendering of session state. Pure functions of their inputs.

use shortlist_core::config::DisplayConfig;
use shortlist_core::{ComparisonRow, Product, ScoredProduct, SessionView};

/// Formats a price held in minor units, e.g. `₹129,999` or `$1,299.99`.
/// A `minor_units` too large for `u64` prints the raw minor value.
pub fn format_price(minor: u64, display: &DisplayConfig) -> String {
    let divisor = match 10u64.checked_pow(display.minor_units) {
        Some(divisor) if display.minor_units > 0 => divisor,
        _ => return format!("{}{}", display.currency_symbol, group_thousands(minor)),
    };
    let major = group_thousands(minor / divisor);

    let fraction = minor % divisor;
    let width = display.minor_units as usize;
    format!("{}{major}.{fraction:0width$}", display.currency_symbol)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn suggestions(products: &[Product]) -> String {
    if products.is_empty() {
        return "no suggestions".to_string();
    }

    let mut lines = vec!["suggestions:".to_string()];
    lines.extend(products.iter().map(|product| format!("  [{}] {}", product.id, product.name)));
    lines.join("\n")
}

pub fn comparison_table(rows: &[ComparisonRow], display: &DisplayConfig) -> String {
    let header = ["Product", "Price", "Rating", "Discount (%)", "Popularity", "Remove"];
    let body: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                format_price(row.price, display),
                row.rating.to_string(),
                row.discount.to_string(),
                row.popularity.to_string(),
                format!("remove {}", row.id),
            ]
        })
        .collect();

    let mut widths = header.map(|title| title.chars().count());
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |cells: &[String]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_row(&header.map(str::to_string))];
    lines.push(widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>().join("-+-"));
    lines.extend(body.iter().map(|cells| render_row(cells)));
    lines.join("\n")
}

pub fn recommendations(products: &[Product], display: &DisplayConfig) -> String {
    if products.is_empty() {
        return "similar products: none".to_string();
    }

    let mut lines = vec!["similar products:".to_string()];
    lines.extend(products.iter().map(|product| {
        format!(
            "  [{}] {}  {}  rating {}  (select {} to compare)",
            product.id,
            product.name,
            format_price(product.price, display),
            product.rating,
            product.id
        )
    }));
    lines.join("\n")
}

pub fn ranked(scored: &[ScoredProduct], display: &DisplayConfig) -> String {
    scored
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{:>2}. [{}] {} ({}) {}  score {:.2}",
                index + 1,
                entry.product.id,
                entry.product.name,
                entry.product.category,
                format_price(entry.product.price, display),
                entry.score
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn view(view: &SessionView, display: &DisplayConfig) -> String {
    let mut sections = vec![format!("state: {:?}", view.state)];

    if !view.query.is_empty() {
        sections.push(format!("query: {}", view.query));
        sections.push(suggestions(&view.suggestions));
    }
    if view.state.shows_table() {
        sections.push(comparison_table(&view.table, display));
    }
    if view.state.shows_recommendations() {
        sections.push(recommendations(&view.recommendations, display));
    }

    sections.join("\n")
}
