// TUI rendering: trace chart (time on X, first state variable on Y) + status panel.

use std::io::Stdout;

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Terminal,
};

use neuro_core::ModelKind;

use crate::app::App;
use crate::backend::SimBackend;

/// Upper bound on plotted points per frame.
const MAX_POINTS: usize = 2000;

/// Draws the UI each frame:
/// - Top: chart of the trace on screen (a sweep frame or the plain run).
/// - Bottom: Status including model, current, spike stats, run state, controls.
pub fn draw<B: SimBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    let points = app.chart_points(MAX_POINTS);
    let ([t0, t1], [y0, y1]) = App::<B>::bounds(&points);
    let model = app.backend.model();
    let variable = model.variable_names()[0];

    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(80), Constraint::Percentage(20)].as_ref())
            .split(f.size());

        let dataset = Dataset::default()
            .name(variable)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(Block::default().title(model.to_string()).borders(Borders::ALL))
            .x_axis(
                Axis::default()
                    .title("t")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([t0, t1])
                    .labels(vec![
                        Span::raw(format!("{t0:.0}")),
                        Span::raw(format!("{:.0}", (t0 + t1) / 2.0)),
                        Span::raw(format!("{t1:.0}")),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(variable)
                    .style(Style::default().fg(Color::Gray))
                    .bounds([y0, y1])
                    .labels(vec![
                        Span::raw(format!("{y0:.2}")),
                        Span::raw(format!("{:.2}", (y0 + y1) / 2.0)),
                        Span::raw(format!("{y1:.2}")),
                    ]),
            );
        f.render_widget(chart, chunks[0]);

        // Status and controls
        let current = match app.shown_current() {
            Some(i) => format!("{i:.2}"),
            None => "n/a".to_string(),
        };
        let (spikes, rate) = match &app.stats {
            Some(s) => (s.count, format_rate(model, s.firing_rate_hz)),
            None => (0, "-".to_string()),
        };
        let sweep = match app.frame {
            Some(i) => format!("{}/{}", i + 1, app.frames.len()),
            None => "off".to_string(),
        };
        let mut status = format!(
            "Model: {} | I: {} | Spikes: {} | Rate: {} | Sweep: {} | Running: {}\n\
             Controls: [m] Model  [+/-] Current  [s] Sweep step  [r] Run/Pause  [e] Export  [q] Quit",
            model.name(),
            current,
            spikes,
            rate,
            sweep,
            if app.running { "yes" } else { "no" }
        );
        if !app.status.is_empty() {
            status.push('\n');
            status.push_str(&app.status);
        }
        let status_widget = Paragraph::new(status)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[1]);
    })?;
    Ok(())
}

/// Maps count iterations, not milliseconds, so their rate is per 1000 iterations.
fn format_rate(model: &ModelKind, rate: f64) -> String {
    if model.is_map() {
        format!("{rate:.1} /1000 it")
    } else {
        format!("{rate:.1} Hz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuro_core::{HodgkinHuxley, RulkovMap};

    #[test]
    fn rate_unit_follows_time_base() {
        let hh = ModelKind::HodgkinHuxley(HodgkinHuxley::default());
        let rulkov = ModelKind::RulkovMap(RulkovMap::default());
        assert_eq!(format_rate(&hh, 62.5), "62.5 Hz");
        assert_eq!(format_rate(&rulkov, 40.0), "40.0 /1000 it");
    }
}
