//! Painting finished nets onto a drawing sink.
//!
//! Runs after the generation loop; the simulation never draws on the
//! image it is reading.

use crate::evolution::NetTrace;
use edgenet_env::{Color, Coordinate, DrawSink};

/// How nets are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStyle {
    pub color: Color,

    /// Half-size of the square painted per node; negative skips nodes
    pub node_level: i32,

    /// Half-size of the square painted along connecting lines; negative
    /// skips lines
    pub line_level: i32,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            node_level: 0,
            line_level: -1,
        }
    }
}

/// Paints every net of an outcome.
pub fn draw_nets<D: DrawSink + ?Sized>(sink: &mut D, nets: &[NetTrace], style: DrawStyle) {
    for net in nets {
        draw_chain(sink, &net.chain, style);
    }
}

/// Paints one chain: its nodes, then the segments between neighbours.
pub fn draw_chain<D: DrawSink + ?Sized>(sink: &mut D, chain: &[Coordinate], style: DrawStyle) {
    for &node in chain {
        draw_square(sink, node, style.node_level, style.color);
    }
    if style.line_level < 0 {
        return;
    }
    for pair in chain.windows(2) {
        for point in line_points(pair[0], pair[1]) {
            draw_square(sink, point, style.line_level, style.color);
        }
    }
}

/// Paints the `(2 * level + 1)` square centred on `center`, clipped to the
/// sink. A negative level paints nothing.
pub fn draw_square<D: DrawSink + ?Sized>(sink: &mut D, center: Coordinate, level: i32, color: Color) {
    if level < 0 {
        return;
    }
    let (width, height) = (sink.width() as i64, sink.height() as i64);
    for y in (center.y as i64 - level as i64)..=(center.y as i64 + level as i64) {
        for x in (center.x as i64 - level as i64)..=(center.x as i64 + level as i64) {
            if x >= 0 && y >= 0 && x < width && y < height {
                sink.set_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Pixels of the segment from `from` to `to`, both ends included.
pub fn line_points(from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    let dx = to.x as i64 - from.x as i64;
    let dy = to.y as i64 - from.y as i64;
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return vec![from];
    }
    (0..=steps)
        .map(|i| {
            let x = from.x as f64 + (dx * i) as f64 / steps as f64;
            let y = from.y as f64 + (dy * i) as f64 / steps as f64;
            Coordinate::new(x.round() as i32, y.round() as i32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::NetId;
    use crate::random::Heading;
    use edgenet_env::{GrayImage, PixelSource};

    fn trace(chain: Vec<Coordinate>) -> NetTrace {
        NetTrace {
            id: NetId(0),
            fitness: 0,
            resistance: 1,
            heading: Heading::Up,
            ready_nodes: 0,
            chain,
        }
    }

    fn painted(image: &GrayImage) -> Vec<(u32, u32)> {
        let mut points = Vec::new();
        for y in 0..image.height() {
            for x in 0..image.width() {
                if image.intensity_at(x, y) == 255 {
                    points.push((x, y));
                }
            }
        }
        points
    }

    #[test]
    fn test_default_style_paints_nodes_only() {
        let mut image = GrayImage::filled(6, 6, 0);
        let net = trace(vec![Coordinate::new(0, 2), Coordinate::new(4, 2)]);
        draw_nets(&mut image, &[net], DrawStyle::default());
        assert_eq!(painted(&image), vec![(0, 2), (4, 2)]);
    }

    #[test]
    fn test_lines_connect_neighbours() {
        let mut image = GrayImage::filled(6, 6, 0);
        let style = DrawStyle { line_level: 0, ..Default::default() };
        draw_chain(&mut image, &[Coordinate::new(0, 2), Coordinate::new(4, 2)], style);
        assert_eq!(painted(&image), vec![(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_square_is_clipped() {
        let mut image = GrayImage::filled(3, 3, 0);
        draw_square(&mut image, Coordinate::new(0, 0), 1, Color::WHITE);
        assert_eq!(painted(&image), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_negative_levels_paint_nothing() {
        let mut image = GrayImage::filled(3, 3, 0);
        let style = DrawStyle { node_level: -1, line_level: -1, ..Default::default() };
        draw_chain(&mut image, &[Coordinate::new(1, 1), Coordinate::new(2, 2)], style);
        assert!(painted(&image).is_empty());
    }

    #[test]
    fn test_line_points_diagonal() {
        let points = line_points(Coordinate::new(0, 0), Coordinate::new(3, -3));
        assert_eq!(
            points,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, -1),
                Coordinate::new(2, -2),
                Coordinate::new(3, -3),
            ]
        );
        assert_eq!(line_points(Coordinate::new(2, 2), Coordinate::new(2, 2)), vec![Coordinate::new(2, 2)]);
    }
}
