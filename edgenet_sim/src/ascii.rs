//! Terminal preview of a scenario image with the final nets drawn on top.

use edgenet_core::{draw_nets, DrawStyle, NetTrace};
use edgenet_env::{Color, GrayImage, PixelSource};

/// Intensity ramp, darkest first.
const RAMP: &[u8] = b" .:-=+*%@";

/// Character used for pixels covered by a net.
const NET_MARK: char = '#';

/// Renders `image` one character per pixel, marking net nodes and the
/// lines between them.
pub fn render_ascii(image: &GrayImage, nets: &[NetTrace]) -> String {
    let mut overlay = GrayImage::filled(image.width(), image.height(), 0);
    let style = DrawStyle {
        color: Color::WHITE,
        node_level: 0,
        line_level: 0,
    };
    draw_nets(&mut overlay, nets, style);

    let mut out = String::with_capacity((image.width() as usize + 1) * image.height() as usize);
    for y in 0..image.height() {
        for x in 0..image.width() {
            if overlay.intensity_at(x, y) > 0 {
                out.push(NET_MARK);
            } else {
                let level = image.intensity_at(x, y) as usize * (RAMP.len() - 1) / 255;
                out.push(RAMP[level] as char);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgenet_core::{Heading, NetId};
    use edgenet_env::Coordinate;

    #[test]
    fn test_ramp_and_marks() {
        let image = GrayImage::from_fn(3, 2, |_, y| if y == 0 { 0 } else { 255 });
        let net = NetTrace {
            id: NetId(0),
            fitness: 3,
            resistance: 50,
            heading: Heading::Down,
            ready_nodes: 2,
            chain: vec![Coordinate::new(0, 0), Coordinate::new(2, 0)],
        };
        assert_eq!(render_ascii(&image, &[net]), "###\n@@@\n");
        assert_eq!(render_ascii(&image, &[]), "   \n@@@\n");
    }
}
