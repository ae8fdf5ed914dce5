//! Pointer gestures and their effect on the scene.
//!
//! The frontend turns raw pointer input into [`InputEvent`]s; [`EditorState`]
//! applies them synchronously, one at a time, between frames.

use glam::Vec2;

use crate::camera::Camera2D;
use crate::error::EditError;
use crate::options::EditorOptions;
use crate::scene::{HandleRef, Scene};

/// Positions are screen pixels relative to the viewport's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PanStart { pos: Vec2 },
    PanMove { pos: Vec2 },
    PanEnd,
    Press { pos: Vec2 },
    PressUp,
    DoubleTap { pos: Vec2 },
    Zoom { factor: f32, focus: Vec2 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragMode {
    #[default]
    Idle,
    /// Dragging a handle that sat at `grab` when the drag started at `origin`.
    Handle {
        handle: HandleRef,
        origin: Vec2,
        grab: Vec2,
    },
    Camera { last: Vec2 },
}

/// Everything the gesture handlers carry between events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    pub selected: Option<HandleRef>,
    pub drag: DragMode,
    pub pressed: bool,
}

/// The pieces of the editor a gesture may touch.
pub struct EditorContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera2D,
    pub options: &'a EditorOptions,
    pub viewport_size: Vec2,
}

impl EditorContext<'_> {
    fn to_world(&self, pos: Vec2) -> Vec2 {
        self.camera.screen_to_world(pos, self.viewport_size)
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event. Returns `true` when control points changed.
    pub fn handle(&mut self, ctx: &mut EditorContext, event: InputEvent) -> bool {
        match event {
            InputEvent::PanStart { pos } => {
                self.pan_start(ctx, pos);
                false
            }
            InputEvent::PanMove { pos } => self.pan_move(ctx, pos),
            InputEvent::PanEnd => {
                self.drag = DragMode::Idle;
                false
            }
            InputEvent::Press { pos } => self.press(ctx, pos),
            InputEvent::PressUp => {
                self.pressed = false;
                false
            }
            InputEvent::DoubleTap { pos } => self.double_tap(ctx, pos),
            InputEvent::Zoom { factor, focus } => {
                let focus = ctx.to_world(focus);
                let (min, max) = (ctx.options.zoom_min, ctx.options.zoom_max);
                ctx.camera.zoom_around(factor, focus, min, max);
                false
            }
        }
    }

    fn pan_start(&mut self, ctx: &mut EditorContext, pos: Vec2) {
        let world = ctx.to_world(pos);
        let hit = ctx.scene.clicked_handle(world.x, world.y);
        self.drag = match hit.and_then(|h| ctx.scene.handle_position(h).map(|p| (h, p))) {
            Some((handle, position)) => {
                self.selected = Some(handle);
                DragMode::Handle {
                    handle,
                    origin: world,
                    grab: position.truncate(),
                }
            }
            None => DragMode::Camera { last: pos },
        };
    }

    fn pan_move(&mut self, ctx: &mut EditorContext, pos: Vec2) -> bool {
        match self.drag {
            DragMode::Idle => false,
            DragMode::Handle {
                handle,
                origin,
                grab,
            } => {
                let target = grab + (ctx.to_world(pos) - origin);
                match ctx.scene.move_handle(handle, target.x, target.y) {
                    Ok(()) => true,
                    Err(err) => {
                        log::warn!("drag dropped: {err}");
                        self.drag = DragMode::Idle;
                        false
                    }
                }
            }
            DragMode::Camera { last } => {
                let delta = (pos - last) / ctx.camera.zoom;
                ctx.camera.pan(-delta);
                self.drag = DragMode::Camera { last: pos };
                false
            }
        }
    }

    /// Selects a handle under the pointer, otherwise appends a new one to the
    /// selected (or last) curve.
    fn press(&mut self, ctx: &mut EditorContext, pos: Vec2) -> bool {
        self.pressed = true;
        let world = ctx.to_world(pos);
        if let Some(hit) = ctx.scene.clicked_handle(world.x, world.y) {
            self.selected = Some(hit);
            return false;
        }

        let curve_idx = self
            .selected
            .map(|h| h.curve)
            .filter(|&c| c < ctx.scene.curves.len())
            .or_else(|| ctx.scene.curves.len().checked_sub(1));

        let Some(curve_idx) = curve_idx else {
            self.selected = Some(ctx.scene.start_curve(world.x, world.y, ctx.options));
            return true;
        };
        match ctx.scene.curves[curve_idx].add_handle(world.x, world.y) {
            Ok(handle) => {
                self.selected = Some(HandleRef {
                    curve: curve_idx,
                    handle,
                });
                true
            }
            Err(err @ EditError::CapacityExceeded { .. }) => {
                log::warn!("handle not added: {err}");
                false
            }
            Err(err) => {
                log::error!("handle not added: {err}");
                false
            }
        }
    }

    fn double_tap(&mut self, ctx: &mut EditorContext, pos: Vec2) -> bool {
        let world = ctx.to_world(pos);
        let Some(hit) = ctx.scene.clicked_handle(world.x, world.y) else {
            return false;
        };
        // indices after the removed handle shift, so nothing stays selected
        self.selected = None;
        self.drag = DragMode::Idle;
        match ctx.scene.remove_handle(hit) {
            Ok(removed) => {
                log::debug!("{removed:?}");
                true
            }
            Err(err) => {
                log::warn!("handle not removed: {err}");
                false
            }
        }
    }

    /// Drops references that no longer point at a control point.
    pub fn validate(&mut self, scene: &Scene) {
        if self.selected.is_some_and(|h| scene.handle_position(h).is_none()) {
            self.selected = None;
        }
        if let DragMode::Handle { handle, .. } = self.drag {
            if scene.handle_position(handle).is_none() {
                self.drag = DragMode::Idle;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    struct Fixture {
        scene: Scene,
        camera: Camera2D,
        options: EditorOptions,
        state: EditorState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                scene: Scene::new(),
                camera: Camera2D::new(),
                options: EditorOptions::default(),
                state: EditorState::new(),
            }
        }

        fn send(&mut self, event: InputEvent) -> bool {
            let mut ctx = EditorContext {
                scene: &mut self.scene,
                camera: &mut self.camera,
                options: &self.options,
                viewport_size: VIEWPORT,
            };
            self.state.handle(&mut ctx, event)
        }
    }

    /// Screen position of a curve-space point with the default camera.
    fn screen(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y) + VIEWPORT * 0.5
    }

    #[test]
    fn press_on_empty_scene_starts_curve() {
        let mut f = Fixture::new();
        assert!(f.send(InputEvent::Press { pos: screen(5.0, 6.0) }));
        assert_eq!(f.scene.curves.len(), 1);
        assert_eq!(f.scene.curves[0].control_points, vec![Vec3::new(5.0, 6.0, 0.0)]);
        assert_eq!(f.state.selected, Some(HandleRef { curve: 0, handle: 0 }));
    }

    #[test]
    fn press_appends_to_selected_curve() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::Press { pos: screen(100.0, 0.0) });
        f.send(InputEvent::PressUp);
        assert_eq!(f.scene.curves.len(), 1);
        assert_eq!(f.scene.curves[0].control_points.len(), 2);
        assert!(!f.state.pressed);
    }

    #[test]
    fn press_on_handle_only_selects() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::Press { pos: screen(100.0, 0.0) });
        assert!(!f.send(InputEvent::Press { pos: screen(2.0, 2.0) }));
        assert_eq!(f.state.selected, Some(HandleRef { curve: 0, handle: 0 }));
        assert_eq!(f.scene.curves[0].control_points.len(), 2);
    }

    #[test]
    fn drag_moves_handle() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::PanStart { pos: screen(3.0, 0.0) });
        assert!(f.send(InputEvent::PanMove { pos: screen(53.0, 20.0) }));
        f.send(InputEvent::PanEnd);
        assert_eq!(f.scene.curves[0].control_points[0], Vec3::new(50.0, 20.0, 0.0));
        assert_eq!(f.state.drag, DragMode::Idle);
    }

    #[test]
    fn drag_without_movement_changes_nothing() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(7.25, -3.5) });
        let before = f.scene.clone();
        f.send(InputEvent::PanStart { pos: screen(9.0, -1.0) });
        f.send(InputEvent::PanMove { pos: screen(9.0, -1.0) });
        f.send(InputEvent::PanEnd);
        assert_eq!(f.scene, before);
    }

    #[test]
    fn drag_on_empty_canvas_pans_camera() {
        let mut f = Fixture::new();
        f.send(InputEvent::PanStart { pos: screen(0.0, 0.0) });
        assert!(!f.send(InputEvent::PanMove { pos: screen(30.0, -10.0) }));
        assert_eq!(f.camera.position, Vec2::new(-30.0, 10.0));
        assert!(f.scene.is_empty());
    }

    #[test]
    fn double_tap_removes_handle_then_curve() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::Press { pos: screen(100.0, 0.0) });
        assert!(f.send(InputEvent::DoubleTap { pos: screen(100.0, 0.0) }));
        assert_eq!(f.scene.curves[0].control_points.len(), 1);
        assert_eq!(f.state.selected, None);
        assert!(f.send(InputEvent::DoubleTap { pos: screen(0.0, 0.0) }));
        assert!(f.scene.is_empty());
        assert!(!f.send(InputEvent::DoubleTap { pos: screen(0.0, 0.0) }));
    }

    #[test]
    fn zoom_changes_hit_mapping() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::Zoom {
            factor: 2.0,
            focus: screen(0.0, 0.0),
        });
        assert_eq!(f.camera.zoom, 2.0);
        // 16 pixels is 8 curve units at zoom 2, inside the handle radius
        assert!(!f.send(InputEvent::Press { pos: screen(16.0, 0.0) }));
        assert_eq!(f.scene.curves[0].control_points.len(), 1);
    }

    #[test]
    fn validate_drops_stale_selection() {
        let mut f = Fixture::new();
        f.send(InputEvent::Press { pos: screen(0.0, 0.0) });
        f.send(InputEvent::Press { pos: screen(100.0, 0.0) });
        f.scene.delete_last_handle();
        f.state.validate(&f.scene);
        assert_eq!(f.state.selected, None);
    }
}
