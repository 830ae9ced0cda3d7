//! Interactive window for playing a level.
//!
//! Arrow keys (or space for jump) drive the player, the frame clock supplies
//! dt, and the level file is hot-reloaded when it changes on disk. While
//! paused, Back/Forward scrub through the recorded history.

use crate::history::History;
use anyhow::Result;
use eframe::egui;
use glam::DVec2;
use notify::{Event, RecommendedWatcher, Watcher};
use platstep_core::math::Aabb;
use platstep_core::{
    build_simulation_context, step_simulation, InputState, Level, PlayerState, SimulationContext,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// Open the window and block until it closes
pub fn run(level_path: Option<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "platstep",
        options,
        Box::new(|cc| Ok(Box::new(PlayApp::new(level_path, cc)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))
}

pub struct PlayApp {
    level_path: Option<PathBuf>,
    ctx_opt: Option<SimulationContext>,
    last_load_error: Option<String>,
    playing: bool,
    history: History<PlayerState>,
    history_index: usize,
    scrub_step: usize,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl PlayApp {
    pub fn new(level_path: Option<PathBuf>, _cc: &eframe::CreationContext<'_>) -> Self {
        // Watcher events carry absolute paths.
        let level_path = level_path.map(|path| fs::canonicalize(&path).unwrap_or(path));
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), level_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                tracing::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let mut app = Self {
            level_path,
            ctx_opt: None,
            last_load_error: None,
            playing: true,
            history: History::default(),
            history_index: 0,
            scrub_step: 1,
            file_watcher: watcher,
            file_receiver: rx,
        };
        app.reload_context();
        app
    }

    fn load_level(&self) -> Result<Level, platstep_core::LevelError> {
        Level::from_file_or_demo(self.level_path.as_deref())
    }

    fn install(&mut self, sim: SimulationContext) {
        tracing::info!(level = %sim.level.name, "level loaded");
        self.ctx_opt = Some(sim);
        self.last_load_error = None;
        self.history.clear();
        self.history_index = 0;
    }

    fn reload_context(&mut self) {
        match self.load_level().and_then(build_simulation_context) {
            Ok(sim) => self.install(sim),
            Err(e) => {
                tracing::error!("failed to load level: {}", e);
                self.last_load_error = Some(e.to_string());
                self.ctx_opt = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.level_path {
                        needs_reload |= paths.iter().any(|p| is_same_file(p, path));
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            // A level that stops parsing leaves the old one running.
            match self.load_level().and_then(build_simulation_context) {
                Ok(sim) => self.install(sim),
                Err(e) => {
                    tracing::warn!("reload failed: {}", e);
                    self.last_load_error = Some(e.to_string());
                }
            }
        }
    }

    fn toggle_pause(&mut self) {
        self.playing = !self.playing;
        self.history_index = 0;
    }

    /// Further into the past
    fn scrub_back(&mut self) {
        if self.playing {
            return;
        }
        self.history_index = self.history.clamp_index(self.history_index + self.scrub_step);
    }

    /// Towards the present
    fn scrub_forward(&mut self) {
        if self.playing {
            return;
        }
        self.history_index = self.history_index.saturating_sub(self.scrub_step);
    }

    /// The state to draw: live while playing, the scrubbed entry while paused
    fn displayed_state(&self) -> Option<PlayerState> {
        let live = self.ctx_opt.as_ref().map(|ctx| ctx.state);
        if self.playing || self.history.is_empty() {
            live
        } else {
            self.history.get(self.history_index).copied().or(live)
        }
    }

    fn advance(&mut self, input: &InputState, dt: f64) {
        if let Some(ref mut ctx) = self.ctx_opt {
            let state = step_simulation(ctx, input, dt);
            self.history.push(state);
        }
    }
}

/// Event paths may name the file through a symlinked directory
fn is_same_file(event_path: &Path, level_path: &Path) -> bool {
    event_path == level_path || fs::canonicalize(event_path).is_ok_and(|p| p == level_path)
}

fn read_input(ctx: &egui::Context) -> (InputState, f64) {
    ctx.input(|i| {
        let input = InputState::from_pressed(
            i.key_down(egui::Key::ArrowLeft),
            i.key_down(egui::Key::ArrowRight),
            i.key_down(egui::Key::ArrowUp) || i.key_down(egui::Key::Space),
        );
        (input, f64::from(i.stable_dt))
    })
}

/// Maps world coordinates (y up) onto the canvas (y down)
struct View {
    origin: egui::Pos2,
    world_min: DVec2,
    scale: f64,
}

impl View {
    fn fit(rect: egui::Rect, world: Aabb) -> Self {
        let scale = (f64::from(rect.width()) / world.size.x).min(f64::from(rect.height()) / world.size.y) * 0.95;
        let origin = egui::pos2(rect.left() + rect.width() * 0.025, rect.bottom() - rect.height() * 0.025);
        Self {
            origin,
            world_min: world.min,
            scale,
        }
    }

    fn to_screen(&self, p: DVec2) -> egui::Pos2 {
        let offset = (p - self.world_min) * self.scale;
        egui::pos2(self.origin.x + offset.x as f32, self.origin.y - offset.y as f32)
    }

    fn rect(&self, aabb: Aabb) -> egui::Rect {
        egui::Rect::from_two_pos(self.to_screen(aabb.min), self.to_screen(aabb.max()))
    }
}

/// Smallest box containing every obstacle and the player
fn world_bounds(level: &Level, state: &PlayerState) -> Aabb {
    let mut min = state.body.bounds().min;
    let mut max = state.body.bounds().max();
    for obstacle in &level.obstacles {
        let bounds = obstacle.bounds();
        min = min.min(bounds.min);
        max = max.max(bounds.max());
    }
    Aabb::new(min, (max - min).max(DVec2::splat(1.0)))
}

impl eframe::App for PlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.toggle_pause();
                }

                if ui.button("⏮ Reset").clicked() {
                    if let Some(ref mut sim) = self.ctx_opt {
                        sim.reset();
                    }
                    self.history.clear();
                    self.history_index = 0;
                }

                ui.separator();

                if ui.button("◀ Back").clicked() {
                    self.scrub_back();
                }
                if ui.button("Forward ▶").clicked() {
                    self.scrub_forward();
                }
                ui.label("Step size:");
                ui.add(egui::DragValue::new(&mut self.scrub_step).range(1..=History::<PlayerState>::DEFAULT_CAPACITY));

                ui.separator();

                if let Some(ref sim) = self.ctx_opt {
                    ui.label(format!("Step: {}", sim.current_step));
                }
                if !self.playing {
                    ui.label(format!("History: -{} / {}", self.history_index, self.history.len()));
                }
            });
        });

        if let Some(state) = self.displayed_state() {
            egui::TopBottomPanel::bottom("state").show(ctx, |ui| {
                let body = &state.body;
                let c = &state.contacts;
                ui.label(format!(
                    "position ({:.3}, {:.3})  velocity ({:.3}, {:.3})  contacts up:{} down:{} left:{} right:{}",
                    body.position.x, body.position.y, body.velocity.x, body.velocity.y, c.up, c.down, c.left, c.right
                ));
            });
        }

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xEE, 0xEE, 0xFF));

            let (Some(sim), Some(state)) = (self.ctx_opt.as_ref(), self.displayed_state()) else {
                return;
            };
            let view = View::fit(rect, world_bounds(&sim.level, &state));

            for obstacle in &sim.level.obstacles {
                painter.rect_filled(view.rect(obstacle.bounds()), 0.0, egui::Color32::DARK_GRAY);
            }

            let color = if state.grounded() {
                egui::Color32::BLACK
            } else {
                egui::Color32::from_rgb(0x30, 0x30, 0x90)
            };
            painter.rect_filled(view.rect(state.body.bounds()), 0.0, color);

            let center = state.body.position + DVec2::new(0.0, state.body.dimension.y / 2.0);
            painter.line_segment(
                [view.to_screen(center), view.to_screen(center + state.body.velocity * 0.1)],
                egui::Stroke::new(1.5, egui::Color32::RED),
            );
        });

        if self.playing {
            let (input, dt) = read_input(ctx);
            self.advance(&input, dt);
            ctx.request_repaint();
        }
    }
}
