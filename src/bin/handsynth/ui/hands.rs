//! Hand overlay widget
//!
//! Draws the classified hands as skeletons, mirrored like a selfie camera so
//! moving your right hand moves the right-hand skeleton. Frame coordinates
//! have y growing downward; the canvas has it growing upward.

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line, Points},
        Block, Borders,
    },
    Frame,
};

use handsynth::landmarks::{
    hand::{FINGERTIPS, HAND_CONNECTIONS},
    Hand, RoleAssignment,
};

const PITCH_COLOR: Color = Color::Cyan;
const VOLUME_COLOR: Color = Color::Magenta;

/// Frame coordinates to canvas coordinates.
fn to_canvas(x: f32, y: f32) -> (f64, f64) {
    (1.0 - x as f64, 1.0 - y as f64)
}

pub fn render_hands(frame: &mut Frame, area: Rect, roles: Option<&RoleAssignment>) {
    let block = Block::default().title(" Hands ").borders(Borders::ALL);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| {
            // Role boundary; the pitch side shows on the right once mirrored.
            ctx.draw(&Line::new(0.5, 0.0, 0.5, 1.0, Color::DarkGray));

            if let Some(roles) = roles {
                if let Some(hand) = &roles.pitch {
                    draw_hand(ctx, hand, PITCH_COLOR);
                }
                if let Some(hand) = &roles.volume_effect {
                    draw_hand(ctx, hand, VOLUME_COLOR);
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_hand(ctx: &mut ratatui::widgets::canvas::Context<'_>, hand: &Hand, color: Color) {
    let points = hand.landmarks();

    for &(from, to) in HAND_CONNECTIONS.iter() {
        let (x1, y1) = to_canvas(points[from].x, points[from].y);
        let (x2, y2) = to_canvas(points[to].x, points[to].y);
        ctx.draw(&Line::new(x1, y1, x2, y2, color));
    }

    let tips: Vec<(f64, f64)> = FINGERTIPS
        .iter()
        .map(|&tip| to_canvas(points[tip].x, points[tip].y))
        .collect();
    ctx.draw(&Points {
        coords: &tips,
        color: Color::White,
    });
}
