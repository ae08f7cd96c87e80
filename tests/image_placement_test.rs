// Image upload, sizing and dragging against a measured card

use compliment_card::models::image::{Placement, Rect, CENTER};
use compliment_card::{CardConfig, CardController, CardError, CardEvent, Node, RecordingSurface, Surface};

const SRC: &str = "data:image/png;base64,iVBORw0KGgo=";

fn controller_with_card(width: f64, height: f64) -> CardController<RecordingSurface> {
    let surface = RecordingSurface::new().with_rect(Node::Card, Rect::new(100.0, 50.0, width, height));
    let mut controller = CardController::new(CardConfig::default(), surface).unwrap();
    controller.init();
    controller
}

fn load_image(c: &mut CardController<RecordingSurface>, natural_width: f64, natural_height: f64) {
    let token = c.begin_image_upload();
    c.finish_image_upload(token, Ok(SRC.to_string())).unwrap();
    c.dispatch(CardEvent::ImageLoaded { natural_width, natural_height }).unwrap();
}

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}

#[test]
fn test_wide_image_within_height_cap_keeps_size() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 400.0, 100.0);

    c.dispatch(CardEvent::ImageSizeInput { value: 0.8 }).unwrap();
    let placement = c.render_image();

    match placement {
        Placement::Placed { size, width_px, height_px, .. } => {
            assert_close(size, 80.0);
            assert_close(width_px, 800.0);
            assert_close(height_px, 200.0);
        }
        other => panic!("expected a placement, got {:?}", other),
    }
    assert_close(c.state().image.size, 80.0);
    assert_eq!(c.surface().style(&Node::CardImage, "width"), Some("80%"));
}

#[test]
fn test_height_cap_back_derives_size() {
    let mut c = controller_with_card(1000.0, 100.0);
    load_image(&mut c, 400.0, 100.0);

    c.set_image_size(0.8);

    match c.render_image() {
        Placement::Placed { size, width_px, height_px, .. } => {
            assert_close(height_px, 90.0);
            assert_close(width_px, 360.0);
            assert_close(size, 36.0);
        }
        other => panic!("expected a placement, got {:?}", other),
    }
    assert_close(c.state().image.size, 36.0);
    assert_eq!(c.surface().text(&Node::ImageSizeLabel), Some("36%"));
}

#[test]
fn test_upload_shows_layer_and_recentres() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 300.0, 300.0);

    assert!(c.surface().has_class(&Node::ImageLayer, "has-image"));
    assert_eq!(c.surface().attribute(&Node::CardImage, "src"), Some(SRC));
    assert_eq!(c.state().image.x, CENTER);
    assert_eq!(c.state().image.y, CENTER);
    assert_eq!(c.surface().value(&Node::ImageUpload), Some(""));
}

#[test]
fn test_empty_natural_size_is_ignored() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 400.0, 100.0);
    c.image_loaded(0.0, 0.0);
    assert_close(c.state().image.aspect_ratio, 4.0);
}

#[test]
fn test_unmeasured_card_defers_render() {
    let mut c = controller_with_card(0.0, 0.0);
    let token = c.begin_image_upload();
    c.finish_image_upload(token, Ok(SRC.to_string())).unwrap();

    assert_eq!(c.render_image(), Placement::Deferred);
    assert!(!c.surface().has_class(&Node::ImageLayer, "has-image"));

    c.surface_mut().set_rect(Node::Card, Rect::new(0.0, 0.0, 800.0, 400.0));
    c.dispatch(CardEvent::Resize).unwrap();
    assert!(c.surface().has_class(&Node::ImageLayer, "has-image"));
}

#[test]
fn test_drag_keeps_grab_offset_and_clamps() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 300.0, 300.0);

    // Image centre sits at (600, 300) in viewport pixels
    c.dispatch(CardEvent::PointerDown { pointer_id: 3, client_x: 610.0, client_y: 310.0 }).unwrap();
    assert!(c.state().drag.active);
    assert!(c.surface().has_class(&Node::CardImage, "dragging"));
    assert!(c.surface().has_pointer_capture(&Node::CardImage, 3));

    c.dispatch(CardEvent::PointerMove { pointer_id: 3, client_x: 460.0, client_y: 285.0 }).unwrap();
    assert_close(c.state().image.x, 35.0);
    assert_close(c.state().image.y, 45.0);

    // Far past the top-left corner: a 280px square clamps to its half extents
    c.dispatch(CardEvent::PointerMove { pointer_id: 3, client_x: 0.0, client_y: 0.0 }).unwrap();
    assert_close(c.state().image.x, 14.0);
    assert_close(c.state().image.y, 28.0);

    c.dispatch(CardEvent::PointerUp { pointer_id: 3 }).unwrap();
    assert!(!c.state().drag.active);
    assert!(!c.surface().has_class(&Node::CardImage, "dragging"));
    assert!(!c.surface().has_pointer_capture(&Node::CardImage, 3));
}

#[test]
fn test_pointer_down_without_image_does_nothing() {
    let mut c = controller_with_card(1000.0, 500.0);
    assert!(!c.pointer_down(1, compliment_card::PointerPos::new(600.0, 300.0)));
    assert!(!c.surface().has_class(&Node::CardImage, "dragging"));
}

#[test]
fn test_lost_capture_ends_drag() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 300.0, 300.0);
    c.dispatch(CardEvent::PointerDown { pointer_id: 9, client_x: 600.0, client_y: 300.0 }).unwrap();
    c.dispatch(CardEvent::LostPointerCapture { pointer_id: 9 }).unwrap();
    assert!(!c.state().drag.active);
}

#[test]
fn test_clear_image_restores_defaults() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 400.0, 100.0);
    c.dispatch(CardEvent::PointerDown { pointer_id: 1, client_x: 600.0, client_y: 300.0 }).unwrap();
    c.dispatch(CardEvent::PointerMove { pointer_id: 1, client_x: 700.0, client_y: 300.0 }).unwrap();

    c.dispatch(CardEvent::ClearImage).unwrap();

    let image = &c.state().image;
    assert!(!image.has_source());
    assert_eq!((image.x, image.y), (CENTER, CENTER));
    assert_eq!(image.aspect_ratio, 1.0);
    assert!(!c.state().drag.active);
    assert!(!c.surface().has_class(&Node::ImageLayer, "has-image"));
    assert_eq!(c.surface().attribute(&Node::CardImage, "src"), None);
}

#[test]
fn test_failed_upload_notifies() {
    let mut c = controller_with_card(1000.0, 500.0);
    let token = c.begin_image_upload();
    let result = c.finish_image_upload(token, Err(CardError::image_load("unreadable")));

    assert!(result.is_err());
    assert_eq!(c.surface().notices().len(), 1);
    assert!(!c.state().image.has_source());
}

#[test]
fn test_height_cap_wins_over_size_floor() {
    let mut c = controller_with_card(1000.0, 500.0);
    load_image(&mut c, 50.0, 1000.0);

    c.set_image_size(0.12);

    match c.render_image() {
        Placement::Placed { size, width_px, height_px, .. } => {
            assert_close(height_px, 450.0);
            assert_close(width_px, 22.5);
            assert_close(size, 2.25);
        }
        other => panic!("expected a placement, got {:?}", other),
    }
    assert_close(c.state().image.size, 2.25);
    assert_eq!(c.surface().text(&Node::ImageSizeLabel), Some("2%"));

    // Half the height is 45% of the card, so the centre cannot rise above 45
    c.dispatch(CardEvent::PointerDown { pointer_id: 2, client_x: 600.0, client_y: 300.0 }).unwrap();
    c.dispatch(CardEvent::PointerMove { pointer_id: 2, client_x: 600.0, client_y: 0.0 }).unwrap();
    assert_close(c.state().image.y, 45.0);
}

#[test]
fn test_upload_finishing_after_clear_is_dropped() {
    let mut c = controller_with_card(1000.0, 500.0);
    let token = c.begin_image_upload();
    c.dispatch(CardEvent::ClearImage).unwrap();

    let result = c.finish_image_upload(token, Ok("data:late".to_string()));

    assert_eq!(result, Err(CardError::StaleUpload { token }));
    assert!(!c.state().image.has_source());
    assert_eq!(c.surface().attribute(&Node::CardImage, "src"), None);
}

#[test]
fn test_upload_finishing_after_reset_is_dropped() {
    let mut c = controller_with_card(1000.0, 500.0);
    let token = c.begin_image_upload();
    c.dispatch(CardEvent::Reset).unwrap();

    assert!(c.finish_image_upload(token, Ok("data:late".to_string())).is_err());
    assert!(!c.state().image.has_source());
}
