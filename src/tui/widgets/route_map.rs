//! Route map widget: draws a trip's path over world outlines.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Line as Segment, Map, MapResolution, Points};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::RouteGeometry;

/// Share of the route's span added as margin on each side.
const MARGIN_RATIO: f64 = 0.1;

/// Smallest framed span, in degrees.
const MIN_SPAN_DEGREES: f64 = 0.5;

/// Text drawn instead of a map when the trip has no usable route.
pub const NO_ROUTE_PLACEHOLDER: &str = "No route geometry available";

/// Renders the route, or a placeholder when `route` is `None`.
///
/// The view is framed on the route's bounding box. Segments are drawn in
/// travel order; the start is marked green and the end red.
#[mutants::skip]
pub fn draw_route_map(route: Option<&RouteGeometry>, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Route Map ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(route) = route else {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(NO_ROUTE_PLACEHOLDER),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let bounds = route.bounds().padded(MARGIN_RATIO, MIN_SPAN_DEGREES);
    let points = route.points();
    let start = [(points[0].lon, points[0].lat)];
    let end = points
        .last()
        .map(|p| [(p.lon, p.lat)])
        .unwrap_or(start);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for pair in points.windows(2) {
                ctx.draw(&Segment::new(
                    pair[0].lon,
                    pair[0].lat,
                    pair[1].lon,
                    pair[1].lat,
                    Color::Indexed(63),
                ));
            }
            ctx.draw(&Points {
                coords: &start,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &end,
                color: Color::Red,
            });
        });
    frame.render_widget(canvas, area);
}
