use artbox::{
    Alignment as ArtAlignment, Fill, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::title_header::TemperatureBand;
use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::state::{AppState, FetchState, Focus, TemperatureReading, UnitPreference};

pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICKS_PER_SPINNER_FRAME: u32 = 6;

/// Rows available to the large temperature art (terminus height)
const TEMP_ART_CAP: u16 = 6;

/// Renders the outcome area below the form for each fetch state
pub struct TemperatureBody;

pub struct TemperatureBodyProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for TemperatureBody {
    type Props<'a> = TemperatureBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        match TemperatureView::from_state(state) {
            TemperatureView::Idle => render_idle(frame, area),
            TemperatureView::Pending(city) => render_pending(frame, area, city, state.tick_count),
            TemperatureView::Resolved(city, reading) => {
                render_resolved(frame, area, city, reading, state.unit, state.focus);
            }
            TemperatureView::Rejected(error) => {
                render_rejected(frame, area, error, state.focus == Focus::Controls);
            }
        }
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let [line] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);

    let hint = Line::from(vec![
        Span::styled("Type a city name and press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to check the weather", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), line);
}

fn render_pending(frame: &mut Frame, area: Rect, city: &str, tick_count: u32) {
    let [spinner_line, _, city_line] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(area);

    let frame_idx = (tick_count / TICKS_PER_SPINNER_FRAME) as usize % SPINNER.len();
    let spinner = Line::from(vec![
        Span::styled(SPINNER[frame_idx], Style::default().fg(Color::Cyan)),
        Span::styled(" Loading...", Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(spinner), spinner_line);

    let looking_up = Line::from(vec![Span::styled(
        format!("Looking up {}", city),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(looking_up), city_line);
}

fn render_resolved(
    frame: &mut Frame,
    area: Rect,
    city: &str,
    reading: &TemperatureReading,
    unit: UnitPreference,
    focus: Focus,
) {
    let [heading, _, art, caption, _, controls] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Max(TEMP_ART_CAP),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(area);

    let heading_line = Line::from(vec![
        Span::styled("The current weather in ", Style::default().fg(Color::Gray)),
        Span::styled(city.to_string(), Style::default().fg(Color::White).bold()),
        Span::styled(" is:", Style::default().fg(Color::Gray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(heading_line), heading);

    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(reading.celsius));
    frame.render_widget(ArtBox::new(&renderer, &unit.format(reading)), art);

    let caption_line = Line::from(vec![Span::styled(
        unit.caption(reading),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(caption_line), caption);

    frame.render_widget(
        Paragraph::new(unit_controls(unit, focus == Focus::Controls)),
        controls,
    );
}

fn unit_controls(active: UnitPreference, is_focused: bool) -> Line<'static> {
    let control = |unit: UnitPreference, key: &'static str| {
        let style = if unit == active {
            Style::default()
                .fg(Color::Black)
                .bg(if is_focused { Color::Cyan } else { Color::Gray })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        vec![
            Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {} ", unit.label()), style),
        ]
    };

    let mut spans = control(UnitPreference::Celsius, "c");
    spans.push(Span::raw("   "));
    spans.extend(control(UnitPreference::Kelvin, "k"));
    Line::from(spans).centered()
}

fn render_rejected(frame: &mut Frame, area: Rect, error: &str, is_focused: bool) {
    let [icon, message, _, retry] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), icon);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Something went wrong: ", Style::default().fg(Color::Red).bold()),
                Span::styled(error.to_string(), Style::default().fg(Color::Rgb(200, 100, 100))),
            ])
            .centered(),
        ),
        message,
    );

    let retry_style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("[r]", Style::default().fg(Color::Cyan)),
                Span::styled(" Retry ", retry_style),
            ])
            .centered(),
        ),
        retry,
    );
}

// ============================================================================
// Helpers
// ============================================================================

enum TemperatureView<'a> {
    Idle,
    Pending(&'a str),
    Resolved(&'a str, &'a TemperatureReading),
    Rejected(&'a str),
}

impl<'a> TemperatureView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        let city = state.city.as_deref().unwrap_or_default();
        match &state.fetch {
            FetchState::Idle => TemperatureView::Idle,
            FetchState::Pending => TemperatureView::Pending(city),
            FetchState::Resolved(reading) => TemperatureView::Resolved(city, reading),
            FetchState::Rejected(error) => TemperatureView::Rejected(error),
        }
    }
}

fn temperature_gradient(celsius: i32) -> Fill {
    TemperatureBand::from_celsius(Some(celsius)).fill()
}
