//! Feeds winit-shaped events through the raw queue and checks the decoded state

use phys3d_input::platform::{keyboard_record, mouse_button_record, mouse_motion_record, mouse_wheel_record};
use phys3d_input::{
    ButtonState, Input, InputAxis, InputButton, RawInputQueue, RawMouse, RAW_INPUT_BUFFER_SIZE, WHEEL_DELTA,
};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

#[test]
fn test_frame_of_keyboard_and_mouse_events() {
    let mut input = Input::default();
    let mut queue = RawInputQueue::new();

    queue.extend(keyboard_record(KeyCode::KeyW, ElementState::Pressed));
    queue.extend(keyboard_record(KeyCode::ShiftRight, ElementState::Pressed));
    queue.extend(mouse_button_record(MouseButton::Right, ElementState::Pressed));
    queue.push(mouse_motion_record((3.0, -2.0)));
    queue.push(mouse_motion_record((4.0, 1.0)));
    queue.extend(mouse_wheel_record(MouseScrollDelta::LineDelta(0.0, 1.0)));

    input.process_messages(&mut queue);

    assert!(input.is_down(InputButton::W));
    assert!(input.is_down(InputButton::RIGHT_SHIFT));
    assert!(input.is_down(InputButton::SHIFT));
    assert!(!input.is_down(InputButton::LEFT_SHIFT));
    assert_eq!(input.button_state(InputButton::RIGHT_BUTTON), ButtonState::Down);
    assert_eq!(input.axis_value(InputAxis::X), 7);
    assert_eq!(input.axis_value(InputAxis::Y), -1);
    assert_eq!(input.axis_value(InputAxis::Rx), WHEEL_DELTA);
    assert!(queue.is_empty());
}

#[test]
fn test_buttons_persist_across_frames() {
    let mut input = Input::default();
    let mut queue = RawInputQueue::new();

    queue.extend(keyboard_record(KeyCode::KeyD, ElementState::Pressed));
    queue.push(mouse_motion_record((5.0, 0.0)));
    input.process_messages(&mut queue);

    input.process_messages(&mut queue);
    assert!(input.is_down(InputButton::D));
    assert_eq!(input.axis_value(InputAxis::X), 0);

    queue.extend(keyboard_record(KeyCode::KeyD, ElementState::Released));
    input.process_messages(&mut queue);
    assert_eq!(input.button_state(InputButton::D), ButtonState::Up);
}

#[test]
fn test_overflowing_frame_carries_over() {
    let mut input = Input::default();
    let mut queue = RawInputQueue::new();

    for _ in 0..RAW_INPUT_BUFFER_SIZE {
        queue.push(RawMouse::moved(1, 0));
    }
    queue.extend(keyboard_record(KeyCode::Space, ElementState::Pressed));

    input.process_messages(&mut queue);
    assert_eq!(input.axis_value(InputAxis::X), RAW_INPUT_BUFFER_SIZE as i16);
    assert!(!input.is_down(InputButton::SPACE));
    assert_eq!(queue.len(), 1);

    input.process_messages(&mut queue);
    assert!(input.is_down(InputButton::SPACE));
    assert_eq!(input.axis_value(InputAxis::X), 0);
}

#[test]
fn test_caps_lock_toggles_through_queue() {
    let mut input = Input::default();
    let mut queue = RawInputQueue::new();

    queue.extend(keyboard_record(KeyCode::CapsLock, ElementState::Pressed));
    queue.extend(keyboard_record(KeyCode::CapsLock, ElementState::Released));
    input.process_messages(&mut queue);
    assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::On);

    queue.extend(keyboard_record(KeyCode::CapsLock, ElementState::Pressed));
    input.process_messages(&mut queue);
    assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::Off);
}
