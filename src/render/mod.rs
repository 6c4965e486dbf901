use crate::config;
use crate::types::{BodySnapshot, ColorId, Vector2};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vector2,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vector2::ZERO,
            zoom: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub weight: f64,
    pub color: ColorId,
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(
                len,
                RenderCell {
                    ch: ' ',
                    weight: f64::NEG_INFINITY,
                    color: ColorId::White,
                },
            );
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.ch = ' ';
            cell.weight = f64::NEG_INFINITY;
            cell.color = ColorId::White;
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: u16, y: u16, ch: char, weight: f64, color: ColorId) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if weight >= cell.weight {
            cell.weight = weight;
            cell.ch = ch;
            cell.color = color;
        }
    }
}

pub fn draw(snapshot: &[BodySnapshot], camera: &Camera, viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    let half_w = viewport.width as f64 / 2.0;
    let half_h = viewport.height as f64 / 2.0;

    // Links first, at the lowest weight, so bodies paint over them.
    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            let sq_d = snapshot[j]
                .position
                .subtract_new(snapshot[i].position)
                .length_squared();
            if sq_d < config::LINK_THRESHOLD_SQ {
                draw_link(
                    snapshot[i].position,
                    snapshot[j].position,
                    camera,
                    viewport,
                    frame,
                    half_w,
                    half_h,
                );
            }
        }
    }

    for body in snapshot {
        let (sx, sy) = project(body.position, camera, half_w, half_h);
        if sx < 0 || sy < 0 || sx >= viewport.width as i32 || sy >= viewport.height as i32 {
            continue;
        }
        frame.set(
            sx as u16,
            sy as u16,
            body_glyph(body.size),
            body.size,
            body_color(body),
        );
    }
}

fn project(pos: Vector2, camera: &Camera, half_w: f64, half_h: f64) -> (i32, i32) {
    let sx = ((pos.x - camera.pos.x) * camera.zoom + half_w).round() as i32;
    let sy = ((pos.y - camera.pos.y) * camera.zoom + half_h).round() as i32;
    (sx, sy)
}

fn draw_link(
    a: Vector2,
    b: Vector2,
    camera: &Camera,
    viewport: Viewport,
    frame: &mut FrameBuffer,
    half_w: f64,
    half_h: f64,
) {
    let (ax, ay) = project(a, camera, half_w, half_h);
    let (bx, by) = project(b, camera, half_w, half_h);
    let steps = (bx - ax).abs().max((by - ay).abs());
    for k in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            k as f64 / steps as f64
        };
        let x = (ax as f64 + (bx - ax) as f64 * t).round() as i32;
        let y = (ay as f64 + (by - ay) as f64 * t).round() as i32;
        if x < 0 || y < 0 || x >= viewport.width as i32 || y >= viewport.height as i32 {
            continue;
        }
        frame.set(x as u16, y as u16, '.', 0.0, ColorId::Link);
    }
}

fn body_glyph(size: f64) -> char {
    if size >= 20.0 {
        '@'
    } else if size >= 8.0 {
        'O'
    } else if size >= 4.0 {
        'o'
    } else {
        '·'
    }
}

fn body_color(body: &BodySnapshot) -> ColorId {
    let speed = body.velocity.length();
    if body.fixed {
        ColorId::Red
    } else if speed > 30.0 {
        ColorId::Cyan
    } else if body.size > 8.0 {
        ColorId::Yellow
    } else if body.size > 4.0 {
        ColorId::White
    } else {
        ColorId::Gray
    }
}
