//! End-to-end flows: import, editing through the gesture dispatcher, and
//! geometry regeneration for the rendering backend.

use curve_editor::import::{parse_point_list, write_point_list};
use curve_editor::{
    Camera2D, Curve, EditError, EditorContext, EditorOptions, EditorState, HandleRef, InputEvent,
    Scene,
};
use glam::{Vec2, Vec3};

const VIEWPORT: Vec2 = Vec2::new(1024.0, 768.0);

fn dispatch(scene: &mut Scene, camera: &mut Camera2D, state: &mut EditorState, events: &[InputEvent]) {
    let options = EditorOptions::default();
    let mut ctx = EditorContext {
        scene,
        camera,
        options: &options,
        viewport_size: VIEWPORT,
    };
    for &event in events {
        state.handle(&mut ctx, event);
    }
}

#[test]
fn import_yields_scaled_and_flipped_points() {
    let options = EditorOptions::default();
    let mut scene = Scene::new();
    let lists = parse_point_list("1\nP3\n0 0\n1 1\n2 0\n").expect("valid point list");
    scene.extend(lists, &options);

    assert_eq!(scene.curves.len(), 1);
    assert_eq!(
        scene.curves[0].control_points,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(50.0, -50.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
        ]
    );
}

#[test]
fn failed_import_leaves_scene_untouched() {
    let options = EditorOptions::default();
    let mut scene = Scene::new();
    scene.new_curve(Vec2::ZERO, &options);
    let before = scene.clone();

    // second curve is broken, so the first one must not be imported either
    let result = parse_point_list("2\nP1\n0 0\nP2\n1 1\n");
    assert!(result.is_err());
    if let Ok(lists) = result {
        scene.extend(lists, &options);
    }
    assert_eq!(scene, before);
}

#[test]
fn add_then_move_handle() {
    let mut curve = Curve::new(vec![Vec3::ZERO], &EditorOptions::default());
    curve.add_handle(10.0, 20.0).expect("below capacity");
    assert_eq!(curve.control_points, vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 0.0)]);
    curve.move_handle(1, 30.0, 40.0).expect("index in range");
    assert_eq!(curve.control_points, vec![Vec3::ZERO, Vec3::new(30.0, 40.0, 0.0)]);
}

#[test]
fn single_point_curve_refuses_removal() {
    let mut curve = Curve::new(vec![Vec3::new(1.0, 2.0, 0.0)], &EditorOptions::default());
    let err = curve.remove_handle(0).unwrap_err();
    assert!(matches!(err, EditError::InvalidOperation(_)));
    assert_eq!(curve.control_points, vec![Vec3::new(1.0, 2.0, 0.0)]);
}

#[test]
fn gestures_build_and_edit_a_curve() {
    let mut scene = Scene::new();
    let mut camera = Camera2D::new();
    let mut state = EditorState::new();
    let center = VIEWPORT * 0.5;

    dispatch(
        &mut scene,
        &mut camera,
        &mut state,
        &[
            InputEvent::Press { pos: center },
            InputEvent::PressUp,
            InputEvent::Press {
                pos: center + Vec2::new(100.0, 0.0),
            },
            InputEvent::PressUp,
            InputEvent::Press {
                pos: center + Vec2::new(200.0, 100.0),
            },
            InputEvent::PressUp,
        ],
    );
    assert_eq!(scene.curves.len(), 1);
    assert_eq!(scene.curves[0].degree(), 2);

    // drag the middle handle up by 80 pixels
    dispatch(
        &mut scene,
        &mut camera,
        &mut state,
        &[
            InputEvent::PanStart {
                pos: center + Vec2::new(100.0, 0.0),
            },
            InputEvent::PanMove {
                pos: center + Vec2::new(100.0, -40.0),
            },
            InputEvent::PanMove {
                pos: center + Vec2::new(100.0, -80.0),
            },
            InputEvent::PanEnd,
        ],
    );
    assert_eq!(scene.curves[0].control_points[1], Vec3::new(100.0, -80.0, 0.0));
    assert_eq!(state.selected, Some(HandleRef { curve: 0, handle: 1 }));

    let geometry = scene.curves[0].regenerate_geometry();
    assert_eq!(geometry.samples.first(), scene.curves[0].control_points.first());
    assert_eq!(geometry.samples.last(), scene.curves[0].control_points.last());
    assert_eq!(geometry.curve.len(), 2 * geometry.samples.len());

    // double tap the first handle: two remain
    dispatch(
        &mut scene,
        &mut camera,
        &mut state,
        &[InputEvent::DoubleTap { pos: center }],
    );
    assert_eq!(scene.curves[0].control_points.len(), 2);
    assert_eq!(scene.curves[0].control_points[0], Vec3::new(100.0, -80.0, 0.0));
}

#[test]
fn pan_then_hit_test_uses_curve_space() {
    let options = EditorOptions::default();
    let mut scene = Scene::new();
    scene.extend(vec![vec![Vec3::new(300.0, 0.0, 0.0)]], &options);
    let mut camera = Camera2D::new();
    let mut state = EditorState::new();
    let center = VIEWPORT * 0.5;

    // drag the empty canvas left by 300 pixels: the handle now sits at the centre
    dispatch(
        &mut scene,
        &mut camera,
        &mut state,
        &[
            InputEvent::PanStart { pos: center },
            InputEvent::PanMove {
                pos: center - Vec2::new(300.0, 0.0),
            },
            InputEvent::PanEnd,
        ],
    );
    assert_eq!(camera.position, Vec2::new(300.0, 0.0));
    assert_eq!(scene.clicked_handle(300.0, 0.0), Some(HandleRef { curve: 0, handle: 0 }));

    dispatch(&mut scene, &mut camera, &mut state, &[InputEvent::Press { pos: center }]);
    assert_eq!(state.selected, Some(HandleRef { curve: 0, handle: 0 }));
    assert_eq!(scene.curves[0].control_points.len(), 1);
}

#[test]
fn delete_last_handle_drops_empty_curves() {
    let options = EditorOptions::default();
    let mut scene = Scene::new();
    scene.new_curve(Vec2::ZERO, &options);
    for _ in 0..3 {
        scene.delete_last_handle();
    }
    assert_eq!(scene.curves[0].control_points.len(), 1);
    scene.delete_last_handle();
    assert!(scene.is_empty());
    assert_eq!(scene.clicked_handle(0.0, 0.0), None);
}

#[test]
fn exported_scene_imports_again() {
    let options = EditorOptions::default();
    let mut scene = Scene::new();
    scene.new_curve(Vec2::new(50.0, 100.0), &options);
    scene.extend(vec![vec![Vec3::new(-150.0, 25.0, 0.0)]], &options);

    let lists = parse_point_list(&write_point_list(&scene.curves)).expect("own output parses");
    assert_eq!(lists.len(), 2);
    for (list, curve) in lists.iter().zip(&scene.curves) {
        assert_eq!(list.len(), curve.control_points.len());
        for (a, b) in list.iter().zip(&curve.control_points) {
            approx::assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
            approx::assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
        }
    }
}
