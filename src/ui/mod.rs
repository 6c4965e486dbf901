use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::{
    config,
    core::{Body, Simulation},
    render,
    types::{BodySnapshot, ColorId, Vector2},
};

pub fn run() -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut sim = Simulation::new(Vector2::new(
        config::WORLD_HALF_WIDTH,
        config::WORLD_HALF_HEIGHT,
    ));
    seed_bodies(&mut sim);

    let mut snapshot: Vec<BodySnapshot> = Vec::with_capacity(config::INIT_BODIES + 1);
    let mut ui_state = UiState::new();

    let mut accumulator = 0.0_f64;
    let mut last_tick = std::time::Instant::now();
    let mut last_render = std::time::Instant::now();
    let render_interval = Duration::from_secs_f64(1.0 / config::RENDER_HZ);
    let mut sim_counter = 0_u32;
    let mut render_counter = 0_u32;
    let mut last_fps_sample = std::time::Instant::now();
    let mut sim_fps = 0.0_f64;
    let mut render_fps = 0.0_f64;

    loop {
        let now = std::time::Instant::now();
        let dt = (now - last_tick).as_secs_f64();
        last_tick = now;
        accumulator += dt;

        while accumulator >= config::DT {
            sim.step();
            accumulator -= config::DT;
            sim_counter += 1;
        }

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                CrosstermEvent::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        shutdown_terminal(&mut terminal)?;
                        return Ok(());
                    }
                    KeyCode::Up => {
                        let g = sim.gravitational_constant();
                        sim.set_gravitational_constant(g + config::G_STEP);
                    }
                    KeyCode::Down => {
                        let g = sim.gravitational_constant();
                        sim.set_gravitational_constant(g - config::G_STEP);
                    }
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(world) = ui_state.cell_to_world(mouse.column, mouse.row) {
                            match ui_state.cursor_body {
                                Some(i) => {
                                    if let Some(body) = sim.body_mut(i) {
                                        body.position.reset_to(world);
                                    }
                                }
                                None => {
                                    let body = Body::new(
                                        world,
                                        Vector2::ZERO,
                                        config::CURSOR_MASS,
                                        config::CURSOR_SIZE,
                                        true,
                                    );
                                    ui_state.cursor_body = Some(sim.add_body(body));
                                }
                            }
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let (Some(i), Some(world)) = (
                            ui_state.cursor_body,
                            ui_state.cell_to_world(mouse.column, mouse.row),
                        ) {
                            if let Some(body) = sim.body_mut(i) {
                                body.position.reset_to(world);
                            }
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(i) = ui_state.cursor_body.take() {
                            sim.remove_body(i);
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            sim.snapshot(&mut snapshot);
            let stats = sim.stats();
            if last_fps_sample.elapsed() >= Duration::from_secs(1) {
                let secs = last_fps_sample.elapsed().as_secs_f64();
                sim_fps = sim_counter as f64 / secs;
                render_fps = render_counter as f64 / secs;
                sim_counter = 0;
                render_counter = 0;
                last_fps_sample = std::time::Instant::now();
            }
            terminal.draw(|frame| {
                let size = frame.size();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(size);

                let header = Paragraph::new(format!(
                    "bodies: {} | fixed: {} | mass: {:.1} | v_max: {:.1} | G: {:.0} | smoothing: {:.2} | sim fps: {:.1} | render fps: {:.1}",
                    stats.body_count,
                    stats.fixed_count,
                    stats.total_mass,
                    stats.max_speed,
                    sim.gravitational_constant(),
                    sim.smoothing(),
                    sim_fps,
                    render_fps
                ))
                .block(Block::default().borders(Borders::ALL).title("gravicosmo"));
                frame.render_widget(header, chunks[0]);

                ui_state.ensure_viewport(chunks[1]);
                render::draw(
                    &snapshot,
                    &ui_state.camera,
                    render::Viewport {
                        width: ui_state.framebuf.width(),
                        height: ui_state.framebuf.height(),
                    },
                    &mut ui_state.framebuf,
                );

                let framebuf = &ui_state.framebuf;
                let width = framebuf.width();
                let height = framebuf.height();
                {
                    let lines_store = &mut ui_state.lines;
                    for y in 0..height {
                        let line = &mut lines_store[y as usize];
                        line.clear();
                        line.reserve(width as usize);
                        for x in 0..width {
                            let cell = framebuf.get(x, y);
                            line.push(cell.ch);
                        }
                    }
                }
                let lines: Vec<Line> = ui_state
                    .lines
                    .iter()
                    .enumerate()
                    .map(|(y, line)| {
                        let mut spans: Vec<Span> = Vec::with_capacity(line.len());
                        for (x, ch) in line.chars().enumerate() {
                            let cell = framebuf.get(x as u16, y as u16);
                            let color = color_for(cell.color);
                            spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
                        }
                        Line::from(spans)
                    })
                    .collect();

                let viewport = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title("Viewport"));
                frame.render_widget(viewport, chunks[1]);

                let footer = Paragraph::new(
                    "↑↓: gravitational constant | mouse press/drag: inject cursor body | q: quit",
                )
                .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            last_render = std::time::Instant::now();
            render_counter += 1;
        }

        std::thread::sleep(Duration::from_millis(1));
    }
}

/// Scatter the initial bodies on an annulus around the origin, each with a
/// tangential starting velocity so the disc shears instead of collapsing.
fn seed_bodies(sim: &mut Simulation) {
    let mut rng = StdRng::from_entropy();
    for _ in 0..config::INIT_BODIES {
        let radius = rng.gen_range(
            config::SPAWN_RADIUS_MIN..config::SPAWN_RADIUS_MIN + config::SPAWN_RADIUS_SPREAD,
        );
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let position = Vector2::new(angle.cos() * radius, angle.sin() * radius);
        let mut velocity = Vector2::new(position.y, -position.x);
        velocity.normalise().scale(config::SPAWN_SPEED);
        let u = rng.gen_range(0.0..1.0);
        let mass = config::SPAWN_MASS_BASE + u * config::SPAWN_MASS_SPREAD;
        let size = config::SPAWN_SIZE_BASE + u * config::SPAWN_SIZE_SPREAD;
        sim.add_body(Body::new(position, velocity, mass, size, false));
    }
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    camera: render::Camera,
    framebuf: render::FrameBuffer,
    lines: Vec<String>,
    cursor_body: Option<usize>,
    view_origin: (u16, u16),
}

impl UiState {
    fn new() -> Self {
        Self {
            camera: render::Camera::default(),
            framebuf: render::FrameBuffer::new(0, 0),
            lines: Vec::new(),
            cursor_body: None,
            view_origin: (0, 0),
        }
    }

    fn ensure_viewport(&mut self, area: Rect) {
        let width = area.width.saturating_sub(2);
        let height = area.height.saturating_sub(2);
        if self.framebuf.width() != width || self.framebuf.height() != height {
            self.framebuf.resize(width, height);
        }
        let desired = height as usize;
        if self.lines.len() != desired {
            self.lines.clear();
            self.lines.resize_with(desired, String::new);
        }
        self.view_origin = (area.x + 1, area.y + 1);
        let zoom_x = width as f64 / (2.0 * config::WORLD_HALF_WIDTH);
        let zoom_y = height as f64 / (2.0 * config::WORLD_HALF_HEIGHT);
        let zoom = zoom_x.min(zoom_y);
        if zoom > 0.0 {
            self.camera.zoom = zoom;
        }
    }

    /// Maps a terminal cell back into world coordinates. Returns `None`
    /// until the viewport has been laid out at least once.
    fn cell_to_world(&self, column: u16, row: u16) -> Option<Vector2> {
        let width = self.framebuf.width();
        let height = self.framebuf.height();
        if width == 0 || height == 0 {
            return None;
        }
        let cx = column as f64 - self.view_origin.0 as f64 - width as f64 / 2.0;
        let cy = row as f64 - self.view_origin.1 as f64 - height as f64 / 2.0;
        Some(Vector2::new(
            cx / self.camera.zoom + self.camera.pos.x,
            cy / self.camera.zoom + self.camera.pos.y,
        ))
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::White => Color::White,
        ColorId::Gray => Color::Gray,
        ColorId::Yellow => Color::Yellow,
        ColorId::Cyan => Color::Cyan,
        ColorId::Red => Color::Red,
        ColorId::Link => Color::DarkGray,
    }
}
