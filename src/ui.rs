use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::{Outcome, Session, SESSION_SECS};
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.session.has_finished() {
            render_results(self, area, buf);
        } else {
            render_typing(self, area, buf);
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let mut prompt_occupied_lines =
        ((session.sample.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if session.sample.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(
                    ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                ),
                Constraint::Length(2),
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(
                    ((area.height as f64 - prompt_occupied_lines as f64) / 2.0) as u16,
                ),
            ]
            .as_ref(),
        )
        .split(area);

    let status = Paragraph::new(Span::styled(
        format!("{}s · {} errors", session.seconds_remaining, session.errors()),
        dim_bold_style,
    ))
    .alignment(Alignment::Center);
    status.render(chunks[1], buf);

    let prompt = Paragraph::new(Line::from(sample_spans(session)))
        .alignment(if prompt_occupied_lines == 1 {
            // when the whole sample fits on one line, centering it
            // gives a nice zen feeling
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    prompt.render(chunks[2], buf);
}

/// One span per sample character, styled by its diff classification.
fn sample_spans(session: &Session) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let cursor_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    let diff = session.diff();
    let cursor_pos = session.input.len();

    session
        .sample
        .chars()
        .enumerate()
        .map(|(idx, expected)| match diff[idx] {
            Outcome::Correct => Span::styled(expected.to_string(), green_bold_style),
            Outcome::Incorrect => Span::styled(
                // a mistyped space would be invisible in red
                match expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            Outcome::Untyped => Span::styled(
                expected.to_string(),
                if idx == cursor_pos {
                    cursor_style
                } else {
                    dim_bold_style
                },
            ),
        })
        .collect()
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),    // words-over-time chart
                Constraint::Length(1), // stats
                Constraint::Length(1), // tier info
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let highest_words = session
        .progress
        .iter()
        .map(|p| p.1)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&session.progress)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, SESSION_SECS as f64])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(SESSION_SECS.to_string(), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("words")
                .bounds([0.0, highest_words])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(format!("{highest_words:.0}"), bold_style),
                ]),
        );
    chart.render(chunks[0], buf);

    let stats = Paragraph::new(Span::styled(
        format!(
            "{} wpm   {} errors   {:.0}% acc",
            session.wpm,
            session.errors(),
            session.accuracy()
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let tier_info = Paragraph::new(Span::styled(
        format!(
            "{} · {}s",
            app.tier.to_string().to_lowercase(),
            SESSION_SECS
        ),
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    tier_info.render(chunks[2], buf);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (n)ew paragraph / (1)easy (2)medium (3)hard / (esc)ape",
        italic_style,
    ));
    legend.render(chunks[4], buf);
}
