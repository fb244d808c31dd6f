//! winit event adapter
//!
//! winit reports physical keys and already-sided modifiers, while the
//! decoder in [`crate::Input`] works on raw keyboard records. These helpers
//! encode winit events as the records a raw-input keyboard and mouse would
//! produce: the generic virtual key, the set-1 make code and the E0/E1
//! prefix flags.

use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::button::InputButton;
use crate::raw::{KeyFlags, MouseButtonFlags, RawKeyboard, RawMouse, WHEEL_DELTA};

/// Pixels treated as one wheel notch for touchpad scrolling
const PIXELS_PER_NOTCH: f64 = 40.0;

struct KeyEncoding {
    virtual_key: InputButton,
    make_code: u16,
    flags: KeyFlags,
}

const fn plain(virtual_key: InputButton, make_code: u16) -> Option<KeyEncoding> {
    Some(KeyEncoding {
        virtual_key,
        make_code,
        flags: KeyFlags::empty(),
    })
}

const fn extended(virtual_key: InputButton, make_code: u16) -> Option<KeyEncoding> {
    Some(KeyEncoding {
        virtual_key,
        make_code,
        flags: KeyFlags::E0,
    })
}

fn encode_key(key: KeyCode) -> Option<KeyEncoding> {
    use crate::button::InputButton as B;

    match key {
        KeyCode::Escape => plain(B::ESCAPE, 0x01),
        KeyCode::Digit1 => plain(B::D1, 0x02),
        KeyCode::Digit2 => plain(B::D2, 0x03),
        KeyCode::Digit3 => plain(B::D3, 0x04),
        KeyCode::Digit4 => plain(B::D4, 0x05),
        KeyCode::Digit5 => plain(B::D5, 0x06),
        KeyCode::Digit6 => plain(B::D6, 0x07),
        KeyCode::Digit7 => plain(B::D7, 0x08),
        KeyCode::Digit8 => plain(B::D8, 0x09),
        KeyCode::Digit9 => plain(B::D9, 0x0a),
        KeyCode::Digit0 => plain(B::D0, 0x0b),
        KeyCode::Minus => plain(B::OEM_MINUS, 0x0c),
        KeyCode::Equal => plain(B::OEM_PLUS, 0x0d),
        KeyCode::Backspace => plain(B::BACK, 0x0e),
        KeyCode::Tab => plain(B::TAB, 0x0f),
        KeyCode::KeyQ => plain(B::Q, 0x10),
        KeyCode::KeyW => plain(B::W, 0x11),
        KeyCode::KeyE => plain(B::E, 0x12),
        KeyCode::KeyR => plain(B::R, 0x13),
        KeyCode::KeyT => plain(B::T, 0x14),
        KeyCode::KeyY => plain(B::Y, 0x15),
        KeyCode::KeyU => plain(B::U, 0x16),
        KeyCode::KeyI => plain(B::I, 0x17),
        KeyCode::KeyO => plain(B::O, 0x18),
        KeyCode::KeyP => plain(B::P, 0x19),
        KeyCode::BracketLeft => plain(B::OEM_4, 0x1a),
        KeyCode::BracketRight => plain(B::OEM_6, 0x1b),
        KeyCode::Enter => plain(B::ENTER, 0x1c),
        KeyCode::ControlLeft => plain(B::CONTROL, 0x1d),
        KeyCode::KeyA => plain(B::A, 0x1e),
        KeyCode::KeyS => plain(B::S, 0x1f),
        KeyCode::KeyD => plain(B::D, 0x20),
        KeyCode::KeyF => plain(B::F, 0x21),
        KeyCode::KeyG => plain(B::G, 0x22),
        KeyCode::KeyH => plain(B::H, 0x23),
        KeyCode::KeyJ => plain(B::J, 0x24),
        KeyCode::KeyK => plain(B::K, 0x25),
        KeyCode::KeyL => plain(B::L, 0x26),
        KeyCode::Semicolon => plain(B::OEM_1, 0x27),
        KeyCode::Quote => plain(B::OEM_7, 0x28),
        KeyCode::Backquote => plain(B::OEM_3, 0x29),
        KeyCode::ShiftLeft => plain(B::SHIFT, 0x2a),
        KeyCode::Backslash => plain(B::OEM_5, 0x2b),
        KeyCode::KeyZ => plain(B::Z, 0x2c),
        KeyCode::KeyX => plain(B::X, 0x2d),
        KeyCode::KeyC => plain(B::C, 0x2e),
        KeyCode::KeyV => plain(B::V, 0x2f),
        KeyCode::KeyB => plain(B::B, 0x30),
        KeyCode::KeyN => plain(B::N, 0x31),
        KeyCode::KeyM => plain(B::M, 0x32),
        KeyCode::Comma => plain(B::OEM_COMMA, 0x33),
        KeyCode::Period => plain(B::OEM_PERIOD, 0x34),
        KeyCode::Slash => plain(B::OEM_2, 0x35),
        KeyCode::ShiftRight => plain(B::SHIFT, 0x36),
        KeyCode::NumpadMultiply => plain(B::MULTIPLY, 0x37),
        KeyCode::AltLeft => plain(B::ALT, 0x38),
        KeyCode::Space => plain(B::SPACE, 0x39),
        KeyCode::CapsLock => plain(B::CAPS_LOCK, 0x3a),
        KeyCode::F1 => plain(B::F1, 0x3b),
        KeyCode::F2 => plain(B::F2, 0x3c),
        KeyCode::F3 => plain(B::F3, 0x3d),
        KeyCode::F4 => plain(B::F4, 0x3e),
        KeyCode::F5 => plain(B::F5, 0x3f),
        KeyCode::F6 => plain(B::F6, 0x40),
        KeyCode::F7 => plain(B::F7, 0x41),
        KeyCode::F8 => plain(B::F8, 0x42),
        KeyCode::F9 => plain(B::F9, 0x43),
        KeyCode::F10 => plain(B::F10, 0x44),
        KeyCode::NumLock => plain(B::NUM_LOCK, 0x45),
        KeyCode::ScrollLock => plain(B::SCROLL_LOCK, 0x46),
        // Numpad digits arrive as their navigation twins without E0
        KeyCode::Numpad7 => plain(B::HOME, 0x47),
        KeyCode::Numpad8 => plain(B::UP_ARROW, 0x48),
        KeyCode::Numpad9 => plain(B::PAGE_UP, 0x49),
        KeyCode::NumpadSubtract => plain(B::SUBTRACT, 0x4a),
        KeyCode::Numpad4 => plain(B::LEFT_ARROW, 0x4b),
        KeyCode::Numpad5 => plain(B::CLEAR, 0x4c),
        KeyCode::Numpad6 => plain(B::RIGHT_ARROW, 0x4d),
        KeyCode::NumpadAdd => plain(B::ADD, 0x4e),
        KeyCode::Numpad1 => plain(B::END, 0x4f),
        KeyCode::Numpad2 => plain(B::DOWN_ARROW, 0x50),
        KeyCode::Numpad3 => plain(B::PAGE_DOWN, 0x51),
        KeyCode::Numpad0 => plain(B::INSERT, 0x52),
        KeyCode::NumpadDecimal => plain(B::DELETE, 0x53),
        KeyCode::IntlBackslash => plain(B::OEM_102, 0x56),
        KeyCode::F11 => plain(B::F11, 0x57),
        KeyCode::F12 => plain(B::F12, 0x58),
        KeyCode::F13 => plain(B::F13, 0x64),
        KeyCode::F14 => plain(B::F14, 0x65),
        KeyCode::F15 => plain(B::F15, 0x66),
        KeyCode::F16 => plain(B::F16, 0x67),
        KeyCode::F17 => plain(B::F17, 0x68),
        KeyCode::F18 => plain(B::F18, 0x69),
        KeyCode::F19 => plain(B::F19, 0x6a),
        KeyCode::F20 => plain(B::F20, 0x6b),
        KeyCode::F21 => plain(B::F21, 0x6c),
        KeyCode::F22 => plain(B::F22, 0x6d),
        KeyCode::F23 => plain(B::F23, 0x6e),
        KeyCode::F24 => plain(B::F24, 0x76),
        KeyCode::NumpadEnter => extended(B::ENTER, 0x1c),
        KeyCode::ControlRight => extended(B::CONTROL, 0x1d),
        KeyCode::NumpadDivide => extended(B::DIVIDE, 0x35),
        KeyCode::PrintScreen => extended(B::SNAPSHOT, 0x37),
        KeyCode::AltRight => extended(B::ALT, 0x38),
        KeyCode::Home => extended(B::HOME, 0x47),
        KeyCode::ArrowUp => extended(B::UP_ARROW, 0x48),
        KeyCode::PageUp => extended(B::PAGE_UP, 0x49),
        KeyCode::ArrowLeft => extended(B::LEFT_ARROW, 0x4b),
        KeyCode::ArrowRight => extended(B::RIGHT_ARROW, 0x4d),
        KeyCode::End => extended(B::END, 0x4f),
        KeyCode::ArrowDown => extended(B::DOWN_ARROW, 0x50),
        KeyCode::PageDown => extended(B::PAGE_DOWN, 0x51),
        KeyCode::Insert => extended(B::INSERT, 0x52),
        KeyCode::Delete => extended(B::DELETE, 0x53),
        KeyCode::SuperLeft => extended(B::LEFT_WIN, 0x5b),
        KeyCode::SuperRight => extended(B::RIGHT_WIN, 0x5c),
        KeyCode::ContextMenu => extended(B::APPS, 0x5d),
        KeyCode::Pause => Some(KeyEncoding {
            virtual_key: B::PAUSE,
            make_code: 0x1d,
            flags: KeyFlags::E1,
        }),
        _ => None,
    }
}

/// Encode a physical key transition as a raw keyboard record
///
/// Returns `None` for keys with no raw-input equivalent.
pub fn keyboard_record(key: KeyCode, state: ElementState) -> Option<RawKeyboard> {
    let Some(encoding) = encode_key(key) else {
        log::trace!("No raw encoding for {:?}", key);
        return None;
    };

    let mut flags = encoding.flags;
    if state == ElementState::Released {
        flags |= KeyFlags::BREAK;
    }

    Some(RawKeyboard {
        make_code: encoding.make_code,
        flags,
        virtual_key: encoding.virtual_key.code() as u16,
    })
}

/// Encode a mouse button transition
pub fn mouse_button_record(button: MouseButton, state: ElementState) -> Option<RawMouse> {
    let pressed = state == ElementState::Pressed;
    let (down, up) = match button {
        MouseButton::Left => (MouseButtonFlags::BUTTON_1_DOWN, MouseButtonFlags::BUTTON_1_UP),
        MouseButton::Right => (MouseButtonFlags::BUTTON_2_DOWN, MouseButtonFlags::BUTTON_2_UP),
        MouseButton::Middle => (MouseButtonFlags::BUTTON_3_DOWN, MouseButtonFlags::BUTTON_3_UP),
        MouseButton::Back => (MouseButtonFlags::BUTTON_4_DOWN, MouseButtonFlags::BUTTON_4_UP),
        MouseButton::Forward => (MouseButtonFlags::BUTTON_5_DOWN, MouseButtonFlags::BUTTON_5_UP),
        MouseButton::Other(_) => return None,
    };

    Some(RawMouse::buttons(if pressed { down } else { up }))
}

/// Encode relative pointer motion from a device event
pub fn mouse_motion_record(delta: (f64, f64)) -> RawMouse {
    RawMouse::moved(delta.0.round() as i32, delta.1.round() as i32)
}

/// Encode a scroll event as wheel records
///
/// Produces one record per wheel that moved: vertical first, then
/// horizontal.
pub fn mouse_wheel_record(delta: MouseScrollDelta) -> Vec<RawMouse> {
    let (x, y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (
            x as f64 * WHEEL_DELTA as f64,
            y as f64 * WHEEL_DELTA as f64,
        ),
        MouseScrollDelta::PixelDelta(position) => (
            position.x / PIXELS_PER_NOTCH * WHEEL_DELTA as f64,
            position.y / PIXELS_PER_NOTCH * WHEEL_DELTA as f64,
        ),
    };

    let mut records = Vec::with_capacity(2);
    let y = wheel_amount(y);
    if y != 0 {
        records.push(RawMouse::wheel(y));
    }
    let x = wheel_amount(x);
    if x != 0 {
        records.push(RawMouse::hwheel(x));
    }
    records
}

fn wheel_amount(value: f64) -> i16 {
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}
