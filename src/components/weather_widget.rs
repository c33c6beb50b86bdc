use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, TemperatureBody, TemperatureBodyProps, TitleHeader, TitleHeaderProps};
use crate::action::Action;
use crate::state::{AppState, Focus};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Title rows: terminus is six rows tall, smaller fonts fall back inside.
const TITLE_CAP: u16 = 6;
const FORM_HEIGHT: u16 = 3;

/// Props for WeatherWidget - read-only view of state
pub struct WeatherWidgetProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Key handling for the controls below the form, plus the overall layout.
/// The city form itself is rendered and routed separately.
#[derive(Default)]
pub struct WeatherWidget;

impl WeatherWidget {
    /// Areas for title, form and body; the last row is the help bar.
    pub fn layout(area: Rect) -> [Rect; 6] {
        Layout::vertical([
            Constraint::Max(TITLE_CAP),
            Constraint::Length(1),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    pub fn form_area(area: Rect) -> Rect {
        Self::layout(area)[2]
    }
}

impl Component<Action> for WeatherWidget {
    type Props<'a> = WeatherWidgetProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let state = props.state;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('c') if state.fetch.is_resolved() => Some(Action::UnitSelectCelsius),
                KeyCode::Char('k') if state.fetch.is_resolved() => Some(Action::UnitSelectKelvin),
                KeyCode::Char('r') if state.fetch.is_rejected() => Some(Action::CityReset),
                KeyCode::Char('/') | KeyCode::Char('e') | KeyCode::Tab if state.form_armed() => {
                    Some(Action::UiFocusForm)
                }
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherWidgetProps<'_>) {
        let [title, _, _form, _, body, help] = Self::layout(area);
        let state = props.state;

        let mut header = TitleHeader;
        header.render(
            frame,
            title,
            TitleHeaderProps {
                celsius: state.fetch.reading().map(|r| r.celsius),
            },
        );

        let mut temperature = TemperatureBody;
        temperature.render(frame, body, TemperatureBodyProps { state });

        let hints: Vec<_> = help_keys(state)
            .into_iter()
            .map(|(key, label)| StatusBarHint::new(key, label))
            .collect();
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            help,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn help_keys(state: &AppState) -> Vec<(&'static str, &'static str)> {
    if state.focus == Focus::Form && state.form_armed() {
        return vec![("enter", "check weather"), ("tab", "controls")];
    }

    let mut hints = Vec::new();
    if state.fetch.is_resolved() {
        hints.push(("c", "celsius"));
        hints.push(("k", "kelvin"));
    }
    if state.fetch.is_rejected() {
        hints.push(("r", "retry"));
    } else {
        hints.push(("/", "city"));
    }
    hints.push(("q", "quit"));
    hints
}
