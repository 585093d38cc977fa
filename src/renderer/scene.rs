//! Scene tessellation: world state to screen-space triangles
//!
//! Reads the entity list, the player and the camera; never mutates them.

use glam::Vec2;

use super::shapes::{ShapeBatch, quadratic_curve};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Camera, Entity, EntityKind, Facing, World};

/// "?" glyph, 5x7, one row per byte (bit 4 = leftmost column)
const QUESTION_GLYPH: [u8; 7] = [
    0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100,
];
const GLYPH_PIXEL: f32 = 2.0;

/// Build the triangle list for one frame
pub fn build_scene(world: &World) -> Vec<Vertex> {
    let mut batch = ShapeBatch::with_capacity(world.entities.len() * 24);

    draw_background(&mut batch);
    for entity in &world.entities {
        draw_entity(&mut batch, entity, &world.camera);
    }
    draw_entity(&mut batch, &world.player, &world.camera);

    batch.into_vertices()
}

fn draw_background(batch: &mut ShapeBatch) {
    batch.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, colors::SKY);
}

/// Whether any part of the entity falls inside the viewport horizontally
pub fn is_on_screen(entity: &Entity, camera: &Camera) -> bool {
    let draw_x = entity.pos.x - camera.x;
    !(draw_x + entity.width < 0.0 || draw_x > CANVAS_WIDTH)
}

/// Player sprite faces left when moving left, or idling after facing left
pub fn is_flipped(player: &Entity) -> bool {
    player.vel.x < -0.1 || (player.facing() == Facing::Left && player.vel.x.abs() < 0.1)
}

fn draw_entity(batch: &mut ShapeBatch, entity: &Entity, camera: &Camera) {
    if !is_on_screen(entity, camera) {
        return;
    }
    let x = entity.pos.x - camera.x;
    let y = entity.pos.y - camera.y;
    let (w, h) = (entity.width, entity.height);

    match entity.kind {
        EntityKind::Player { .. } => {
            batch.set_local(Vec2::new(x, y), w, is_flipped(entity));
            draw_catgirl(batch, w, h);
            batch.reset_transform();
        }
        EntityKind::Goomba { .. } => {
            if entity.is_dead {
                if entity.is_squash_visible() {
                    batch.fill_rect(x, y + h / 2.0, w, h / 2.0, colors::GOOMBA);
                }
            } else {
                batch.circle(Vec2::new(x + w / 2.0, y + h / 2.0), w / 2.0, colors::GOOMBA, 20);
                batch.fill_rect(x + 8.0, y + 8.0, 4.0, 4.0, colors::GOOMBA_EYE);
                batch.fill_rect(x + 20.0, y + 8.0, 4.0, 4.0, colors::GOOMBA_EYE);
            }
        }
        EntityKind::Ground => {
            batch.fill_rect(x, y, w, h, colors::GROUND);
            batch.stroke_rect(x, y, w, h, 2.0, colors::GROUND_EDGE);
        }
        EntityKind::Block => {
            batch.fill_rect(x, y, w, h, colors::BRICK);
            batch.stroke_rect(x, y, w, h, 1.0, colors::OUTLINE);
        }
        EntityKind::Question => {
            batch.fill_rect(x, y, w, h, colors::QUESTION);
            draw_glyph(batch, &QUESTION_GLYPH, x + w / 2.0, y + 9.0);
            batch.stroke_rect(x, y, w, h, 1.0, colors::OUTLINE);
        }
        EntityKind::Pipe { is_top } => {
            batch.fill_rect(x, y, w, h, colors::PIPE);
            batch.stroke_rect(x, y, w, h, 2.0, colors::PIPE_EDGE);
            if is_top {
                batch.fill_rect(x - 4.0, y, w + 8.0, 12.0, colors::PIPE);
                batch.stroke_rect(x - 4.0, y, w + 8.0, 12.0, 2.0, colors::PIPE_EDGE);
            }
        }
        EntityKind::Flag => {
            batch.fill_rect(x + 12.0, y, 8.0, h, colors::FLAG_POLE);
            batch.triangle(
                Vec2::new(x + 12.0, y),
                Vec2::new(x - 20.0, y + 20.0),
                Vec2::new(x + 12.0, y + 40.0),
                colors::FLAG,
            );
        }
    }
}

/// Bitmap glyph centered horizontally on `center_x`
fn draw_glyph(batch: &mut ShapeBatch, rows: &[u8; 7], center_x: f32, top: f32) {
    let left = center_x - 2.5 * GLYPH_PIXEL;
    for (row, bits) in rows.iter().enumerate() {
        for col in 0..5 {
            if bits & (0b10000 >> col) != 0 {
                batch.fill_rect(
                    left + col as f32 * GLYPH_PIXEL,
                    top + row as f32 * GLYPH_PIXEL,
                    GLYPH_PIXEL,
                    GLYPH_PIXEL,
                    colors::OUTLINE,
                );
            }
        }
    }
}

/// The player: a cat-eared girl built from boxes, drawn facing right in a
/// `width` x `height` local box
fn draw_catgirl(batch: &mut ShapeBatch, width: f32, height: f32) {
    let head = width * 0.7;
    let body_w = width * 0.8;
    let body_h = height * 0.5;

    // Shoes
    batch.fill_rect(width * 0.2, height - 8.0, width * 0.25, 8.0, colors::SHOES);
    batch.fill_rect(width * 0.55, height - 8.0, width * 0.25, 8.0, colors::SHOES);

    // Outfit
    batch.fill_rect((width - body_w) / 2.0, height - body_h - 4.0, body_w, body_h, colors::OUTFIT);

    // Head
    let head_x = (width - head) / 2.0;
    let head_y = height - body_h - head;
    batch.fill_rect(head_x, head_y, head, head, colors::SKIN);

    // Hair: top and side bangs
    batch.fill_rect(head_x - 2.0, head_y - 2.0, head + 4.0, head * 0.4, colors::HAIR);
    batch.fill_rect(head_x - 2.0, head_y, 4.0, head, colors::HAIR);
    batch.fill_rect(head_x + head - 2.0, head_y, 4.0, head, colors::HAIR);

    // Ears
    batch.triangle(
        Vec2::new(head_x, head_y),
        Vec2::new(head_x + 8.0, head_y - 12.0),
        Vec2::new(head_x + 16.0, head_y),
        colors::HAIR,
    );
    let head_right = head_x + head;
    batch.triangle(
        Vec2::new(head_right - 16.0, head_y),
        Vec2::new(head_right - 8.0, head_y - 12.0),
        Vec2::new(head_right, head_y),
        colors::HAIR,
    );

    // Eyes, looking right
    let eye_y = head_y + head * 0.4;
    batch.fill_rect(head_right - 8.0, eye_y, 3.0, 3.0, colors::EYE);
    batch.fill_rect(head_right - 16.0, eye_y, 3.0, 3.0, colors::EYE);

    // Tail
    let tail_x = (width - body_w) / 2.0;
    let tail = quadratic_curve(
        Vec2::new(tail_x, height - 12.0),
        Vec2::new(tail_x - 10.0, height - 20.0),
        Vec2::new(tail_x - 5.0, height - 25.0),
        8,
    );
    batch.polyline(&tail, 3.0, colors::HAIR);
}
