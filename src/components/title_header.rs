use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{Frame, layout::Rect};

use super::Component;
use crate::action::Action;

pub const TITLE: &str = "Weather";

/// Coarse temperature bands used to tint the title and the reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureBand {
    /// Nothing loaded yet
    Unknown,
    Freezing,
    Cold,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(celsius: Option<i32>) -> Self {
        match celsius {
            None => TemperatureBand::Unknown,
            Some(t) if t < 0 => TemperatureBand::Freezing,
            Some(t) if t < 15 => TemperatureBand::Cold,
            Some(t) if t < 25 => TemperatureBand::Mild,
            Some(t) if t < 35 => TemperatureBand::Warm,
            Some(_) => TemperatureBand::Hot,
        }
    }

    /// Left and right ends of the band's gradient
    pub fn colors(self) -> (ArtColor, ArtColor) {
        match self {
            TemperatureBand::Unknown => (
                ArtColor::rgb(170, 170, 170),
                ArtColor::rgb(225, 225, 225),
            ),
            TemperatureBand::Freezing => (
                ArtColor::rgb(140, 190, 255),
                ArtColor::rgb(215, 235, 255),
            ),
            TemperatureBand::Cold => (
                ArtColor::rgb(90, 170, 250),
                ArtColor::rgb(140, 215, 205),
            ),
            TemperatureBand::Mild => (
                ArtColor::rgb(110, 200, 140),
                ArtColor::rgb(245, 215, 110),
            ),
            TemperatureBand::Warm => (
                ArtColor::rgb(250, 185, 90),
                ArtColor::rgb(250, 125, 75),
            ),
            TemperatureBand::Hot => (
                ArtColor::rgb(250, 95, 75),
                ArtColor::rgb(235, 50, 50),
            ),
        }
    }

    pub fn fill(self) -> Fill {
        let (start, end) = self.colors();
        Fill::Linear(LinearGradient::horizontal(start, end))
    }
}

/// FIGlet title tinted by the band of the last reading
pub struct TitleHeader;

pub struct TitleHeaderProps {
    pub celsius: Option<i32>,
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(TemperatureBand::from_celsius(props.celsius).fill());

        frame.render_widget(ArtBox::new(&renderer, TITLE), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TemperatureBand::from_celsius(None), TemperatureBand::Unknown);
        assert_eq!(TemperatureBand::from_celsius(Some(-1)), TemperatureBand::Freezing);
        assert_eq!(TemperatureBand::from_celsius(Some(0)), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::from_celsius(Some(15)), TemperatureBand::Mild);
        assert_eq!(TemperatureBand::from_celsius(Some(27)), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::from_celsius(Some(35)), TemperatureBand::Hot);
    }

    #[test]
    fn test_bands_are_distinct() {
        assert_ne!(TemperatureBand::Freezing.colors(), TemperatureBand::Hot.colors());
        assert_ne!(TemperatureBand::Unknown.colors(), TemperatureBand::Mild.colors());
    }

    #[test]
    fn test_render_falls_back_to_plain_title() {
        // One row is too short for any FIGlet font
        let mut render = RenderHarness::new(20, 1);
        let mut header = TitleHeader;

        let output = render.render_to_string_plain(|frame| {
            header.render(frame, frame.area(), TitleHeaderProps { celsius: Some(27) });
        });

        assert!(output.contains(TITLE), "Title missing:\n{}", output);
    }
}
