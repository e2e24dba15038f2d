use iced::mouse;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Theme};

use journey_catalog::destinations::Destination;
use journey_catalog::locations::MapProjection;

use crate::app::Message;

const MAP_HEIGHT: f32 = 300.0;
const MARKER_RADIUS: f32 = 6.0;
/// Click slop around a marker, in screen pixels.
const HIT_RADIUS: f32 = 14.0;

const MAP_BG: Color = Color::from_rgb(0.1, 0.12, 0.16);
const FALLBACK_MARKER: Color = Color::from_rgb(0.9, 0.9, 0.9);

/// Fits the projection's canvas into `size`, keeping its aspect ratio.
fn fit_scale(projection: &MapProjection, size: iced::Size) -> f32 {
    let (w, h) = projection.canvas_size();
    (size.width / w).min(size.height / h)
}

fn marker_position(projection: &MapProjection, destination: &Destination, scale: f32) -> Point {
    let (x, y) = projection.project(destination.latitude, destination.longitude);
    Point::new(x * scale, y * scale)
}

/// Destination whose marker is under `point`, nearest first.
pub fn hit_test<'a>(
    destinations: &'a [Destination],
    projection: &MapProjection,
    scale: f32,
    point: Point,
) -> Option<&'a Destination> {
    destinations
        .iter()
        .map(|d| (d, marker_position(projection, d, scale).distance(point)))
        .filter(|(_, distance)| *distance <= HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(d, _)| d)
}

struct DestinationMap {
    destinations: Vec<Destination>,
    selected: Option<String>,
    projection: MapProjection,
}

impl canvas::Program<Message> for DestinationMap {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event else {
            return None;
        };
        let position = cursor.position_in(bounds)?;
        let scale = fit_scale(&self.projection, bounds.size());
        let hit = hit_test(&self.destinations, &self.projection, scale, position)?;
        Some(canvas::Action::publish(Message::ToggleTrip(hit.id.clone())).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), MAP_BG);

        let scale = fit_scale(&self.projection, bounds.size());

        for destination in &self.destinations {
            let center = marker_position(&self.projection, destination, scale);
            let color = destination
                .rgb()
                .map(|[r, g, b]| Color::from_rgb(r, g, b))
                .unwrap_or(FALLBACK_MARKER);
            let radius = MARKER_RADIUS + (destination.photo_count.min(10) as f32) * 0.5;

            frame.fill(&Path::circle(center, radius), color);

            if self.selected.as_deref() == Some(destination.id.as_str()) {
                frame.stroke(
                    &Path::circle(center, radius + 4.0),
                    Stroke::default().with_color(Color::WHITE).with_width(2.0),
                );
            }

            let label = if destination.photo_count > 0 {
                format!("{} ({})", destination.name, destination.photo_count)
            } else {
                destination.name.clone()
            };
            frame.fill_text(canvas::Text {
                content: label,
                position: Point::new(center.x + radius + 4.0, center.y - 7.0),
                color: Color::from_rgb(0.85, 0.85, 0.85),
                size: 12.0.into(),
                ..Default::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

pub fn view<'a>(destinations: Vec<Destination>, selected: Option<&str>) -> Element<'a, Message> {
    iced::widget::canvas(DestinationMap {
        destinations,
        selected: selected.map(str::to_string),
        projection: MapProjection::INDIA,
    })
    .width(Length::Fill)
    .height(MAP_HEIGHT)
    .into()
}
