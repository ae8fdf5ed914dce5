use curve_editor::render::{self, CurveStyle, RenderingContext};
use curve_editor::{import, Camera2D, EditorContext, EditorOptions, EditorState, InputEvent, Scene};
use eframe::{CreationContext, NativeOptions};
use egui::{
    Align2, CentralPanel, Color32, DragValue, FontId, Frame, Key, Modifiers, Pos2, Response,
    Sense, SidePanel, Slider, Ui,
};
use glam::Vec2;
use serde_derive::{Deserialize, Serialize};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("curve editor v{} starting", env!("CARGO_PKG_VERSION"));

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("curve editor"),
        follow_system_theme: true,
        multisampling: 4,
        ..Default::default()
    };
    eframe::run_native(
        "curve editor",
        native_options,
        Box::new(|cc| Box::new(EditorApp::new(cc))),
    )
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct EditorApp {
    scene: Scene,
    camera: Camera2D,
    options: EditorOptions,
    #[serde(skip)]
    state: EditorState,
    #[serde(skip)]
    status: Option<String>,
}

impl Default for EditorApp {
    fn default() -> Self {
        let options = EditorOptions::default();
        let mut scene = Scene::new();
        scene.new_curve(Vec2::ZERO, &options);
        Self {
            scene,
            camera: Camera2D::new(),
            options,
            state: EditorState::new(),
            status: None,
        }
    }
}

impl EditorApp {
    fn new(cc: &CreationContext) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(app) = eframe::get_value::<EditorApp>(storage, eframe::APP_KEY) {
                log::info!("restored {} curves", app.scene.curves.len());
                return app;
            }
        }

        Self::default()
    }

    fn import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("point list", &["txt", "dat"])
            .pick_file()
        else {
            return;
        };
        match import::import_file(&path) {
            Ok(point_lists) => {
                self.status = Some(format!("imported {} curves", point_lists.len()));
                self.scene.extend(point_lists, &self.options);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.status = Some(format!("{e:#}"));
            }
        }
    }

    fn export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("point list", &["txt"])
            .set_file_name("curves.txt")
            .save_file()
        else {
            return;
        };
        if let Err(e) = import::export_file(&path, &self.scene.curves) {
            log::error!("{e:#}");
            self.status = Some(format!("{e:#}"));
        }
    }

    fn delete_last_handle(&mut self) {
        if let Some(removed) = self.scene.delete_last_handle() {
            log::debug!("{removed:?}");
        }
        self.state.validate(&self.scene);
    }

    fn settings_panel(&mut self, ui: &mut Ui) {
        ui.add_space(20.0);
        if ui.button("new curve").clicked() {
            self.scene.new_curve(self.camera.position, &self.options);
        }
        if ui.button("delete last handle").clicked() {
            self.delete_last_handle();
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("curves").clicked() {
                self.scene.toggle_curves();
            }
            if ui.button("polygons").clicked() {
                self.scene.toggle_polygons();
            }
            if ui.button("handles").clicked() {
                self.scene.toggle_handles();
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("import…").clicked() {
                self.import();
            }
            if ui.button("export…").clicked() {
                self.export();
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            let (min, max) = (self.options.zoom_min, self.options.zoom_max);
            let step = self.options.zoom_step;
            let center = self.camera.position;
            if ui.button("-").clicked() {
                self.camera.zoom_around(1.0 / step, center, min, max);
            }
            if ui.button("+").clicked() {
                self.camera.zoom_around(step, center, min, max);
            }
            if ui.button("reset view").clicked() {
                self.camera = Camera2D::new();
            }
        });

        ui.add_space(30.0);
        let options = &mut self.options;
        let mut changed = false;
        ui.label("samples");
        changed |= ui
            .add(DragValue::new(&mut options.num_samples).clamp_range(2..=1000))
            .changed();
        ui.label("curve thickness");
        changed |= ui
            .add(Slider::new(&mut options.curve_thickness, 0.001..=0.05).fixed_decimals(3))
            .changed();
        ui.label("polygon thickness");
        changed |= ui
            .add(Slider::new(&mut options.polygon_thickness, 0.001..=0.05).fixed_decimals(3))
            .changed();
        ui.label("handle radius");
        changed |= ui
            .add(Slider::new(&mut options.handle_radius, 1.0..=50.0))
            .changed();
        ui.label("handle segments");
        changed |= ui
            .add(DragValue::new(&mut options.handle_samples).clamp_range(3..=64))
            .changed();
        if changed {
            self.scene.apply_options(&self.options);
        }

        ui.add_space(30.0);
        for (i, curve) in self.scene.curves.iter().enumerate() {
            ui.label(format!("curve {i}: {} points", curve.control_points.len()));
        }
        if let Some(p) = self.state.selected.and_then(|h| self.scene.handle_position(h)) {
            ui.label(format!("selected ({:.1}, {:.1})", p.x, p.y));
        }
        if let Some(status) = &self.status {
            ui.add_space(10.0);
            ui.label(status.as_str());
        }
    }

    fn canvas_events(ui: &Ui, response: &Response) -> Vec<InputEvent> {
        let origin = response.rect.min;
        let local = |p: Pos2| Vec2::new(p.x - origin.x, p.y - origin.y);
        let mut events = Vec::new();

        if response.drag_started() {
            // press origin is where the pointer went down, before the drag threshold
            let start = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = start {
                events.push(InputEvent::PanStart { pos: local(pos) });
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::PanMove { pos: local(pos) });
            }
        }
        if response.drag_released() {
            events.push(InputEvent::PanEnd);
        }

        if let Some(pos) = response.interact_pointer_pos() {
            if response.double_clicked() {
                events.push(InputEvent::DoubleTap { pos: local(pos) });
            } else if response.clicked() {
                events.push(InputEvent::Press { pos: local(pos) });
                events.push(InputEvent::PressUp);
            }
        }

        if let Some(pos) = response.hover_pos() {
            let factor = ui.input(|i| i.zoom_delta());
            if factor != 1.0 {
                events.push(InputEvent::Zoom {
                    factor,
                    focus: local(pos),
                });
            }
        }
        events
    }
}

impl eframe::App for EditorApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Delete)) {
            self.delete_last_handle();
        }

        SidePanel::right("settings")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| self.settings_panel(ui));

        CentralPanel::default()
            .frame(Frame::none().fill(Color32::from_gray(0x20)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let rect = response.rect;

                let events = Self::canvas_events(ui, &response);
                let mut editor = EditorContext {
                    scene: &mut self.scene,
                    camera: &mut self.camera,
                    options: &self.options,
                    viewport_size: Vec2::new(rect.width(), rect.height()),
                };
                for event in events {
                    self.state.handle(&mut editor, event);
                }
                self.state.validate(&self.scene);

                let render_ctx = RenderingContext::new(rect, &self.camera);
                let style = CurveStyle::from_options(&self.options);
                for (i, curve) in self.scene.curves.iter().enumerate() {
                    let geometry = curve.regenerate_geometry();
                    let selected = self
                        .state
                        .selected
                        .filter(|h| h.curve == i)
                        .map(|h| h.handle);
                    render::paint_curve(&painter, &render_ctx, curve, &geometry, &style, selected);
                }

                if self.scene.is_empty() {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "click to place a control point",
                        FontId::proportional(20.0),
                        Color32::WHITE,
                    );
                }
            });
    }
}
