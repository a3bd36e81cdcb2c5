//! Chart widgets: portfolio value bars and investment vs value lines.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use stocklab_core::ChartData;

use crate::theme::Theme;

pub const VALUES_TITLE: &str = " My Stock Portfolio Values ";
pub const COMPARISON_TITLE: &str = " Investment vs Current Value ";

/// Above this many stocks only the first and last x-axis labels are drawn.
const MAX_AXIS_LABELS: usize = 12;

pub fn render_values(f: &mut Frame, area: Rect, data: &ChartData, theme: &Theme) {
    let block = titled_block(VALUES_TITLE, theme);
    if data.is_empty() {
        render_empty(f, area, block, theme);
        return;
    }

    let bars: Vec<Bar> = data
        .value_bars
        .iter()
        .map(|bar| {
            let color = theme.pnl_color(bar.gain);
            Bar::default()
                .value(to_u64(bar.value))
                .text_value(format!("{:.0}", bar.value))
                .label(Line::from(format!("#{}", bar.stock_no)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme.text_primary).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width, bars.len()))
        .bar_gap(1)
        .max(to_u64(data.max_value()).max(1));

    f.render_widget(chart, area);
}

pub fn render_comparison(f: &mut Frame, area: Rect, data: &ChartData, theme: &Theme) {
    let block = titled_block(COMPARISON_TITLE, theme);
    if data.is_empty() {
        render_empty(f, area, block, theme);
        return;
    }

    let investment: Vec<(f64, f64)> = data
        .comparison
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, to_f64(p.investment)))
        .collect();
    let value: Vec<(f64, f64)> = data
        .comparison
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, to_f64(p.value)))
        .collect();

    let y_max = to_f64(data.max_value());
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };
    let x_max = data.comparison.len().saturating_sub(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Total Investment")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme.neutral))
            .graph_type(GraphType::Line)
            .data(&investment),
        Dataset::default()
            .name("Current Value")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme.accent))
            .graph_type(GraphType::Line)
            .data(&value),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Stock Number", theme.muted_style()))
                .style(theme.muted_style())
                .bounds([0.0, x_max.max(1.0)])
                .labels(stock_labels(data, theme)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Value", theme.muted_style()))
                .style(theme.muted_style())
                .bounds([0.0, y_top])
                .labels(vec![
                    Span::styled("0", theme.muted_style()),
                    Span::styled(format!("{:.0}", y_top / 2.0), theme.muted_style()),
                    Span::styled(format!("{:.0}", y_top), theme.muted_style()),
                ]),
        );

    f.render_widget(chart, area);
}

fn stock_labels<'a>(data: &ChartData, theme: &Theme) -> Vec<Span<'a>> {
    let ids: Vec<String> = data
        .comparison
        .iter()
        .map(|p| p.stock_no.to_string())
        .collect();
    let shown: Vec<String> = if ids.len() <= MAX_AXIS_LABELS {
        ids
    } else {
        vec![ids[0].clone(), ids[ids.len() - 1].clone()]
    };
    shown
        .into_iter()
        .map(|id| Span::styled(id, theme.muted_style()))
        .collect()
}

fn titled_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title)
        .title_style(theme.title_style())
}

fn render_empty(f: &mut Frame, area: Rect, block: Block, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No stocks in the portfolio yet. Add one from the menu first.",
            theme.muted_style(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Widest bars that still fit every stock inside the borders.
fn bar_width(area_width: u16, bars: usize) -> u16 {
    let inner = area_width.saturating_sub(2) as usize;
    let per_bar = inner / bars.max(1);
    per_bar.saturating_sub(1).clamp(1, 9) as u16
}

fn to_u64(value: Decimal) -> u64 {
    value.round().to_u64().unwrap_or(0)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
