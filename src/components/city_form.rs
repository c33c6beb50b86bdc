use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const CITY_PLACEHOLDER: &str = "City name";
const SUBMIT_LABEL: &str = "Check Weather";

/// Single-field form: the city name and its submit control
pub struct CityForm {
    input: TextInput,
    was_armed: bool,
}

pub struct CityFormProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    /// False while an error is shown; the form ignores input until retry
    pub is_armed: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for CityForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            was_armed: false,
        }
    }
}

impl CityForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cursor state when the form is re-armed after a reset.
    pub fn set_armed(&mut self, is_armed: bool) {
        if is_armed && !self.was_armed {
            self.input = TextInput::new();
        }
        self.was_armed = is_armed;
    }
}

impl Component<Action> for CityForm {
    type Props<'a> = CityFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc | KeyCode::Tab => return vec![Action::UiFocusControls],
            KeyCode::Enter => {
                if !props.is_armed {
                    return Vec::new();
                }
                return vec![(props.on_submit)(props.value.to_string())];
            }
            _ => {}
        }

        if !props.is_armed {
            return Vec::new();
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: CITY_PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([
            Constraint::Min(10),                               // Input
            Constraint::Length(SUBMIT_LABEL.len() as u16 + 4), // Submit control
        ])
        .split(area);

        let bg = if props.is_armed {
            Color::Rgb(50, 50, 60)
        } else {
            Color::Rgb(35, 35, 40)
        };
        let input_props = TextInputProps {
            value: props.value,
            placeholder: CITY_PLACEHOLDER,
            is_focused: props.is_focused && props.is_armed,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: Some(bg),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, chunks[0], input_props);

        let button_style = if !props.is_armed {
            Style::default().fg(Color::DarkGray)
        } else if props.is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let button = Line::from(vec![Span::styled(format!(" {} ", SUBMIT_LABEL), button_style)])
            .centered();
        let button_area = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .split(chunks[1])[0];
        frame.render_widget(Paragraph::new(button), button_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(value: &str, is_armed: bool) -> CityFormProps<'_> {
        CityFormProps {
            value,
            is_focused: true,
            is_armed,
            on_change: Action::CityInputChange,
            on_submit: Action::CitySubmit,
        }
    }

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_submits_value() {
        let mut form = CityForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Enter), props("London", true))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::CitySubmit("London".into()));
    }

    #[test]
    fn test_disarmed_form_ignores_input() {
        let mut form = CityForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Enter), props("London", false))
            .into_iter()
            .collect();
        actions.assert_empty();

        let actions: Vec<_> = form
            .handle_event(&EventKind::Key(key("x")), props("London", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_tab_leaves_form() {
        let mut form = CityForm::new();
        let actions: Vec<_> = form
            .handle_event(&press(KeyCode::Tab), props("", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::UiFocusControls);
    }

    #[test]
    fn test_typing_changes_value() {
        let mut form = CityForm::new();
        let actions: Vec<_> = form
            .handle_event(&EventKind::Key(key("a")), props("", true))
            .into_iter()
            .collect();
        assert!(actions.contains(&Action::CityInputChange("a".into())));
    }
}
