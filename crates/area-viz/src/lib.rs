//! Shared visualization utilities for partition viewers.

use std::hash::{Hash, Hasher};

use area_tree::{BoundingBox, Partition, PartitionNode};
use macroquad::prelude::*;
use nalgebra::DVector;

pub mod navigator;
pub use navigator::TreeNavigator;

/// Generates a deterministic color from an area prefix using hashing.
/// The same prefix gets the same color across runs and frames.
pub fn prefix_color(prefix: &str) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    prefix.hash(&mut hasher);
    let hash = hasher.finish();

    // Extract RGB from hash bytes
    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Ensure colors aren't too dark by adding a minimum brightness
    let r = r.max(60);
    let g = g.max(60);
    let b = b.max(60);

    Color::from_rgba(r, g, b, 255)
}

/// Converts the first two components of a coordinate.
pub fn to_vec2(v: &DVector<f64>) -> Vec2 {
    vec2(v[0] as f32, v[1] as f32)
}

/// Converts the first three components of a coordinate.
pub fn to_vec3(v: &DVector<f64>) -> Vec3 {
    vec3(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Maps the 2D field of a partition onto a screen rectangle.
///
/// The y axis points up, and the aspect ratio of the field is preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    field_min: Vec2,
    scale: f32,
    origin: Vec2,
}

impl Viewport {
    /// Fits `field` into a `width` x `height` screen with `margin` pixels on
    /// every side.
    pub fn fit(field: &BoundingBox, width: f32, height: f32, margin: f32) -> Self {
        let field_min = to_vec2(field.low());
        let extent = to_vec2(field.high()) - field_min;

        let avail = vec2(width - 2.0 * margin, height - 2.0 * margin).max(Vec2::ONE);
        let scale = (avail.x / extent.x.max(f32::EPSILON)).min(avail.y / extent.y.max(f32::EPSILON));

        // Center the field and flip y
        let used = extent * scale;
        let origin = vec2(
            margin + (avail.x - used.x) / 2.0,
            margin + (avail.y - used.y) / 2.0 + used.y,
        );
        Self {
            field_min,
            scale,
            origin,
        }
    }

    /// Screen position of a field position.
    pub fn to_screen(&self, p: Vec2) -> Vec2 {
        let rel = (p - self.field_min) * self.scale;
        vec2(self.origin.x + rel.x, self.origin.y - rel.y)
    }

    /// Screen rectangle `(x, y, w, h)` of a box, top-left corner first.
    pub fn rect(&self, bounds: &BoundingBox) -> Rect {
        let a = self.to_screen(to_vec2(bounds.low()));
        let b = self.to_screen(to_vec2(bounds.high()));
        Rect::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }
}

/// Draws a 2D leaf as a filled, outlined rectangle.
pub fn draw_leaf_2d(leaf: &PartitionNode, viewport: &Viewport, highlighted: bool) {
    let r = viewport.rect(leaf.bounds());
    if highlighted {
        let fill = prefix_color(leaf.prefix());
        draw_rectangle(r.x, r.y, r.w, r.h, Color { a: 0.35, ..fill });
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.5, fill);
    } else {
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, DARKGRAY);
    }
}

/// Draws a 3D leaf as a wire cube.
pub fn draw_leaf_3d(leaf: &PartitionNode, highlighted: bool) {
    let low = to_vec3(leaf.bounds().low());
    let high = to_vec3(leaf.bounds().high());
    let color = if highlighted {
        prefix_color(leaf.prefix())
    } else {
        Color::from_rgba(60, 60, 60, 255)
    };
    draw_cube_wires((low + high) / 2.0, high - low, color);
}

/// Draws the input points of a 2D partition.
pub fn draw_points_2d(partition: &Partition, viewport: &Viewport) {
    for p in partition.input() {
        let s = viewport.to_screen(to_vec2(p));
        draw_circle(s.x, s.y, 2.5, WHITE);
    }
}

/// Draws the input points of a 3D partition as small cubes.
pub fn draw_points_3d(partition: &Partition, size: f32) {
    for p in partition.input() {
        draw_cube(to_vec3(p), Vec3::splat(size), None, WHITE);
    }
}

/// Simple orbit camera for 3D scene navigation.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Multiplier for scroll wheel zoom
    pub zoom_speed: f32,
    /// Minimum distance from target
    pub min_distance: f32,
    /// Maximum distance from target
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Creates a new orbit camera with the given configuration.
    pub fn new(distance: f32, yaw: f32, pitch: f32) -> Self {
        Self {
            distance,
            yaw,
            pitch,
            target: vec3(0.0, 0.0, 0.0),
            zoom_speed: 5.0,
            min_distance: 10.0,
            max_distance: 200.0,
        }
    }

    /// Creates a camera looking at the center of `field` from outside it.
    pub fn framing(field: &BoundingBox) -> Self {
        let low = to_vec3(field.low());
        let high = to_vec3(field.high());
        let diagonal = (high - low).length();
        Self::new(diagonal * 1.2, 0.6, 0.4)
            .with_zoom(diagonal * 0.05, diagonal * 0.2, diagonal * 4.0)
            .with_target((low + high) / 2.0)
    }

    /// Sets the zoom configuration (speed and distance limits).
    pub fn with_zoom(mut self, speed: f32, min: f32, max: f32) -> Self {
        self.zoom_speed = speed;
        self.min_distance = min;
        self.max_distance = max;
        self
    }

    /// Sets the camera target point.
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Updates camera state from user input (mouse drag, scroll, arrow keys).
    pub fn update(&mut self) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * 2.0;
            self.pitch -= delta.y * 2.0;
        }

        // Clamp pitch to avoid gimbal lock
        self.pitch = self.pitch.clamp(-1.5, 1.5);

        let scroll = mouse_wheel().1;
        self.distance -= scroll * self.zoom_speed;
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);

        if is_key_down(KeyCode::Left) {
            self.yaw += 0.02;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= 0.02;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += 0.02;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= 0.02;
        }
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}
