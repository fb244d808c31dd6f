//! Decodes raw records into button states and axis values

use crate::button::{ButtonState, InputAxis, InputButton, InputDevice};
use crate::raw::{
    KeyFlags, MouseButtonFlags, MouseMoveFlags, RawInput, RawInputQueue, RawKeyboard, RawMouse,
};

const BUTTON_COUNT: usize = 256;

/// Current button and axis state for the registered devices
pub struct Input {
    devices: Vec<InputDevice>,
    buttons: [ButtonState; BUTTON_COUNT],
    relative: [i16; InputAxis::COUNT],
    absolute: [i16; InputAxis::COUNT],
}

impl Input {
    /// Create input state listening to the given device kinds
    pub fn new(devices: &[InputDevice]) -> Self {
        let mut devices = devices.to_vec();
        devices.dedup();
        for device in &devices {
            log::debug!(
                "Registered input device {:?} (usage page {:#04x}, usage {:#04x})",
                device,
                InputDevice::USAGE_PAGE,
                device.usage()
            );
        }

        let mut input = Self {
            devices,
            buttons: [ButtonState::Up; BUTTON_COUNT],
            relative: [0; InputAxis::COUNT],
            absolute: [0; InputAxis::COUNT],
        };
        input.reset_toggles();
        input
    }

    /// Device kinds this input listens to
    pub fn devices(&self) -> &[InputDevice] {
        &self.devices
    }

    pub fn is_registered(&self, device: InputDevice) -> bool {
        self.devices.contains(&device)
    }

    /// Decode one frame of records
    ///
    /// Relative axes are cleared first, so they describe only this frame's
    /// motion. Absolute axes and button states persist.
    pub fn process_messages(&mut self, queue: &mut RawInputQueue) {
        self.relative = [0; InputAxis::COUNT];
        for record in queue.take_frame() {
            self.process_record(&record);
        }
    }

    /// Decode a single record
    pub fn process_record(&mut self, record: &RawInput) {
        match record.device() {
            Some(device) if self.is_registered(device) => {}
            device => {
                log::trace!("Ignoring record from unregistered device {:?}", device);
                return;
            }
        }

        match record {
            RawInput::Keyboard(keyboard) => self.process_keyboard(keyboard),
            RawInput::Mouse(mouse) => self.process_mouse(mouse),
            RawInput::Hid(hid) => {
                log::trace!("HID report ({} bytes) from usage {:#04x}", hid.data.len(), hid.usage);
            }
        }
    }

    pub fn button_state(&self, button: InputButton) -> ButtonState {
        self.buttons[button.code() as usize]
    }

    pub fn is_down(&self, button: InputButton) -> bool {
        self.button_state(button) == ButtonState::Down
    }

    /// Resolve a pair of opposing buttons to a direction
    ///
    /// Returns 1 when only `positive` is in `state`, -1 when only `negative`
    /// is, and 0 when both or neither are. Both held cancel out; `negative`
    /// does not win the tie.
    pub fn which_button(&self, positive: InputButton, negative: InputButton, state: ButtonState) -> i8 {
        let positive = (self.button_state(positive) == state) as i8;
        let negative = (self.button_state(negative) == state) as i8;
        positive - negative
    }

    /// Motion on an axis during the last processed frame
    pub fn axis_value(&self, axis: InputAxis) -> i16 {
        self.relative[axis as usize]
    }

    /// Accumulated or reported position on an axis
    pub fn axis_value_absolute(&self, axis: InputAxis) -> i16 {
        self.absolute[axis as usize]
    }

    /// Release every button and clear all axes
    ///
    /// Used when the window loses focus, since release records will not
    /// arrive. Toggle keys go back to `Off`.
    pub fn clear(&mut self) {
        self.buttons = [ButtonState::Up; BUTTON_COUNT];
        self.relative = [0; InputAxis::COUNT];
        self.absolute = [0; InputAxis::COUNT];
        self.reset_toggles();
    }

    fn reset_toggles(&mut self) {
        for toggle in [InputButton::CAPS_LOCK, InputButton::NUM_LOCK, InputButton::SCROLL_LOCK] {
            self.set_state(toggle, ButtonState::Off);
        }
    }

    fn set_state(&mut self, button: InputButton, state: ButtonState) {
        self.buttons[button.code() as usize] = state;
    }

    fn process_keyboard(&mut self, record: &RawKeyboard) {
        let Some(button) = translate_key(record) else {
            log::trace!("Dropping key record with virtual key {:#06x}", record.virtual_key);
            return;
        };

        if button.is_toggle() {
            if !record.is_break() {
                let next = match self.button_state(button) {
                    ButtonState::On => ButtonState::Off,
                    _ => ButtonState::On,
                };
                self.set_state(button, next);
            }
            return;
        }

        let state = if record.is_break() {
            ButtonState::Up
        } else {
            ButtonState::Down
        };
        self.set_state(button, state);
        if let Some(generic) = button.generic_modifier() {
            self.set_state(generic, state);
        }
    }

    fn process_mouse(&mut self, record: &RawMouse) {
        if let Some(button) = translate_mouse_button(record.button_flags) {
            let state = if record.button_flags.intersects(MouseButtonFlags::ANY_DOWN) {
                ButtonState::Down
            } else {
                ButtonState::Up
            };
            self.set_state(button, state);
        }

        let x = saturate(record.last_x);
        let y = saturate(record.last_y);
        if record.flags.contains(MouseMoveFlags::MOVE_ABSOLUTE) {
            self.set_axis(InputAxis::X, x);
            self.set_axis(InputAxis::Y, y);
        } else {
            self.add_axis(InputAxis::X, x);
            self.add_axis(InputAxis::Y, y);
        }

        if record.button_flags.contains(MouseButtonFlags::WHEEL) {
            self.add_axis(InputAxis::Rx, record.button_data);
        }
        if record.button_flags.contains(MouseButtonFlags::HWHEEL) {
            self.add_axis(InputAxis::Ry, record.button_data);
        }
    }

    fn set_axis(&mut self, axis: InputAxis, value: i16) {
        self.relative[axis as usize] = value;
        self.absolute[axis as usize] = value;
    }

    fn add_axis(&mut self, axis: InputAxis, delta: i16) {
        let index = axis as usize;
        self.relative[index] = self.relative[index].saturating_add(delta);
        self.absolute[index] = self.absolute[index].saturating_add(delta);
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(&[InputDevice::Keyboard, InputDevice::Mouse])
    }
}

fn saturate(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Map a keyboard record to the button it refers to
///
/// Raw keyboard records report generic modifiers and share virtual keys
/// between the navigation cluster and the numpad; the make code and the E0
/// prefix tell them apart.
pub fn translate_key(record: &RawKeyboard) -> Option<InputButton> {
    let virtual_key = record.virtual_key;
    if virtual_key == 0 || virtual_key > 0xfe {
        return None;
    }

    let button = InputButton(virtual_key as u8);
    let extended = record.flags.contains(KeyFlags::E0);

    let translated = match button {
        InputButton::SHIFT => match record.make_code {
            0x2a => InputButton::LEFT_SHIFT,
            0x36 => InputButton::RIGHT_SHIFT,
            _ => InputButton::SHIFT,
        },
        InputButton::CONTROL if extended => InputButton::RIGHT_CONTROL,
        InputButton::CONTROL => InputButton::LEFT_CONTROL,
        InputButton::ALT if extended => InputButton::RIGHT_ALT,
        InputButton::ALT => InputButton::LEFT_ALT,
        InputButton::ENTER if extended => InputButton::SEPARATOR,
        _ if extended => button,
        InputButton::INSERT => InputButton::NUM_PAD_0,
        InputButton::DELETE => InputButton::DECIMAL,
        InputButton::HOME => InputButton::NUM_PAD_7,
        InputButton::END => InputButton::NUM_PAD_1,
        InputButton::PRIOR => InputButton::NUM_PAD_9,
        InputButton::NEXT => InputButton::NUM_PAD_3,
        InputButton::LEFT_ARROW => InputButton::NUM_PAD_4,
        InputButton::RIGHT_ARROW => InputButton::NUM_PAD_6,
        InputButton::UP_ARROW => InputButton::NUM_PAD_8,
        InputButton::DOWN_ARROW => InputButton::NUM_PAD_2,
        InputButton::CLEAR => InputButton::NUM_PAD_5,
        _ => button,
    };

    Some(translated)
}

/// First mouse button with a transition bit set
pub fn translate_mouse_button(flags: MouseButtonFlags) -> Option<InputButton> {
    const BUTTONS: [(MouseButtonFlags, InputButton); 5] = [
        (
            MouseButtonFlags::BUTTON_1_DOWN.union(MouseButtonFlags::BUTTON_1_UP),
            InputButton::LEFT_BUTTON,
        ),
        (
            MouseButtonFlags::BUTTON_2_DOWN.union(MouseButtonFlags::BUTTON_2_UP),
            InputButton::RIGHT_BUTTON,
        ),
        (
            MouseButtonFlags::BUTTON_3_DOWN.union(MouseButtonFlags::BUTTON_3_UP),
            InputButton::MIDDLE_BUTTON,
        ),
        (
            MouseButtonFlags::BUTTON_4_DOWN.union(MouseButtonFlags::BUTTON_4_UP),
            InputButton::EXTRA_BUTTON_1,
        ),
        (
            MouseButtonFlags::BUTTON_5_DOWN.union(MouseButtonFlags::BUTTON_5_UP),
            InputButton::EXTRA_BUTTON_2,
        ),
    ];

    BUTTONS
        .iter()
        .find(|(bits, _)| flags.intersects(*bits))
        .map(|(_, button)| *button)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawHid;

    fn key(virtual_key: u16, make_code: u16, flags: KeyFlags) -> RawKeyboard {
        RawKeyboard {
            make_code,
            flags,
            virtual_key,
        }
    }

    #[test]
    fn test_translate_rejects_out_of_range() {
        assert_eq!(translate_key(&key(0, 0, KeyFlags::empty())), None);
        assert_eq!(translate_key(&key(0xff, 0, KeyFlags::empty())), None);
        assert_eq!(translate_key(&key(0x1234, 0, KeyFlags::empty())), None);
    }

    #[test]
    fn test_translate_shift_by_make_code() {
        let shift = InputButton::SHIFT.code() as u16;
        assert_eq!(
            translate_key(&key(shift, 0x2a, KeyFlags::empty())),
            Some(InputButton::LEFT_SHIFT)
        );
        assert_eq!(
            translate_key(&key(shift, 0x36, KeyFlags::empty())),
            Some(InputButton::RIGHT_SHIFT)
        );
    }

    #[test]
    fn test_translate_control_and_alt_by_prefix() {
        let control = InputButton::CONTROL.code() as u16;
        let alt = InputButton::ALT.code() as u16;
        assert_eq!(
            translate_key(&key(control, 0x1d, KeyFlags::empty())),
            Some(InputButton::LEFT_CONTROL)
        );
        assert_eq!(
            translate_key(&key(control, 0x1d, KeyFlags::E0)),
            Some(InputButton::RIGHT_CONTROL)
        );
        assert_eq!(
            translate_key(&key(alt, 0x38, KeyFlags::empty())),
            Some(InputButton::LEFT_ALT)
        );
        assert_eq!(
            translate_key(&key(alt, 0x38, KeyFlags::E0)),
            Some(InputButton::RIGHT_ALT)
        );
    }

    #[test]
    fn test_translate_numpad_duplicates() {
        let cases = [
            (InputButton::INSERT, InputButton::NUM_PAD_0),
            (InputButton::DELETE, InputButton::DECIMAL),
            (InputButton::HOME, InputButton::NUM_PAD_7),
            (InputButton::END, InputButton::NUM_PAD_1),
            (InputButton::PAGE_UP, InputButton::NUM_PAD_9),
            (InputButton::PAGE_DOWN, InputButton::NUM_PAD_3),
            (InputButton::LEFT_ARROW, InputButton::NUM_PAD_4),
            (InputButton::RIGHT_ARROW, InputButton::NUM_PAD_6),
            (InputButton::UP_ARROW, InputButton::NUM_PAD_8),
            (InputButton::DOWN_ARROW, InputButton::NUM_PAD_2),
            (InputButton::CLEAR, InputButton::NUM_PAD_5),
        ];

        for (dedicated, numpad) in cases {
            let vk = dedicated.code() as u16;
            assert_eq!(translate_key(&key(vk, 0, KeyFlags::empty())), Some(numpad));
            assert_eq!(translate_key(&key(vk, 0, KeyFlags::E0)), Some(dedicated));
        }
    }

    #[test]
    fn test_translate_enter_and_pause() {
        let enter = InputButton::ENTER.code() as u16;
        assert_eq!(translate_key(&key(enter, 0x1c, KeyFlags::empty())), Some(InputButton::ENTER));
        assert_eq!(translate_key(&key(enter, 0x1c, KeyFlags::E0)), Some(InputButton::SEPARATOR));

        let pause = InputButton::PAUSE.code() as u16;
        assert_eq!(translate_key(&key(pause, 0x1d, KeyFlags::E1)), Some(InputButton::PAUSE));
    }

    #[test]
    fn test_translate_mouse_button_priority() {
        assert_eq!(translate_mouse_button(MouseButtonFlags::empty()), None);
        assert_eq!(translate_mouse_button(MouseButtonFlags::WHEEL), None);
        assert_eq!(
            translate_mouse_button(MouseButtonFlags::BUTTON_2_UP),
            Some(InputButton::RIGHT_BUTTON)
        );
        assert_eq!(
            translate_mouse_button(MouseButtonFlags::BUTTON_3_DOWN | MouseButtonFlags::BUTTON_5_DOWN),
            Some(InputButton::MIDDLE_BUTTON)
        );
        assert_eq!(
            translate_mouse_button(MouseButtonFlags::BUTTON_5_UP),
            Some(InputButton::EXTRA_BUTTON_2)
        );
    }

    #[test]
    fn test_toggle_keys_start_off() {
        let input = Input::default();
        assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::Off);
        assert_eq!(input.button_state(InputButton::NUM_LOCK), ButtonState::Off);
        assert_eq!(input.button_state(InputButton::SCROLL_LOCK), ButtonState::Off);
        assert_eq!(input.button_state(InputButton::A), ButtonState::Up);
    }

    #[test]
    fn test_toggle_flips_on_press_only() {
        let mut input = Input::default();
        let caps = InputButton::CAPS_LOCK.code() as u16;

        input.process_record(&RawInput::Keyboard(RawKeyboard::down(caps, 0x3a)));
        assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::On);
        input.process_record(&RawInput::Keyboard(RawKeyboard::up(caps, 0x3a)));
        assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::On);

        input.process_record(&RawInput::Keyboard(RawKeyboard::down(caps, 0x3a)));
        assert_eq!(input.button_state(InputButton::CAPS_LOCK), ButtonState::Off);
    }

    #[test]
    fn test_sided_modifier_drives_generic() {
        let mut input = Input::default();
        let control = InputButton::CONTROL.code() as u16;

        input.process_record(&RawKeyboard::down(control, 0x1d).with_flags(KeyFlags::E0).into());
        assert!(input.is_down(InputButton::RIGHT_CONTROL));
        assert!(input.is_down(InputButton::CONTROL));
        assert!(!input.is_down(InputButton::LEFT_CONTROL));

        input.process_record(&RawKeyboard::up(control, 0x1d).with_flags(KeyFlags::E0).into());
        assert!(!input.is_down(InputButton::CONTROL));
    }

    #[test]
    fn test_which_button() {
        let mut input = Input::default();
        let w = InputButton::W.code() as u16;
        let s = InputButton::S.code() as u16;

        assert_eq!(input.which_button(InputButton::W, InputButton::S, ButtonState::Down), 0);

        input.process_record(&RawKeyboard::down(w, 0x11).into());
        assert_eq!(input.which_button(InputButton::W, InputButton::S, ButtonState::Down), 1);

        input.process_record(&RawKeyboard::down(s, 0x1f).into());
        assert_eq!(input.which_button(InputButton::W, InputButton::S, ButtonState::Down), 0);

        input.process_record(&RawKeyboard::up(w, 0x11).into());
        assert_eq!(input.which_button(InputButton::W, InputButton::S, ButtonState::Down), -1);
        assert_eq!(input.which_button(InputButton::W, InputButton::S, ButtonState::Up), 1);
    }

    #[test]
    fn test_relative_motion_accumulates_and_saturates() {
        let mut input = Input::default();
        input.process_record(&RawMouse::moved(5, -3).into());
        input.process_record(&RawMouse::moved(2, 1).into());
        assert_eq!(input.axis_value(InputAxis::X), 7);
        assert_eq!(input.axis_value(InputAxis::Y), -2);

        input.process_record(&RawMouse::moved(100_000, -100_000).into());
        assert_eq!(input.axis_value(InputAxis::X), i16::MAX);
        assert_eq!(input.axis_value(InputAxis::Y), i16::MIN);
    }

    #[test]
    fn test_absolute_motion_sets_both() {
        let mut input = Input::default();
        input.process_record(&RawMouse::moved(10, 10).into());
        input.process_record(&RawMouse::moved_to(400, 300).into());
        assert_eq!(input.axis_value(InputAxis::X), 400);
        assert_eq!(input.axis_value_absolute(InputAxis::X), 400);
        assert_eq!(input.axis_value_absolute(InputAxis::Y), 300);
    }

    #[test]
    fn test_wheels() {
        let mut input = Input::default();
        input.process_record(&RawMouse::wheel(120).into());
        input.process_record(&RawMouse::wheel(120).into());
        input.process_record(&RawMouse::hwheel(-120).into());
        assert_eq!(input.axis_value(InputAxis::Rx), 240);
        assert_eq!(input.axis_value(InputAxis::Ry), -120);
        assert_eq!(input.axis_value(InputAxis::None), 0);
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = Input::default();
        input.process_record(&RawMouse::buttons(MouseButtonFlags::BUTTON_2_DOWN).into());
        assert_eq!(input.button_state(InputButton::RIGHT_BUTTON), ButtonState::Down);

        input.process_record(&RawMouse::buttons(MouseButtonFlags::BUTTON_2_UP).into());
        assert_eq!(input.button_state(InputButton::RIGHT_BUTTON), ButtonState::Up);

        // Motion-only records leave buttons alone
        input.process_record(&RawMouse::buttons(MouseButtonFlags::BUTTON_1_DOWN).into());
        input.process_record(&RawMouse::moved(1, 1).into());
        assert_eq!(input.button_state(InputButton::LEFT_BUTTON), ButtonState::Down);
    }

    #[test]
    fn test_unregistered_devices_are_ignored() {
        let mut input = Input::new(&[InputDevice::Keyboard]);
        input.process_record(&RawMouse::moved(5, 5).into());
        input.process_record(&RawMouse::buttons(MouseButtonFlags::BUTTON_1_DOWN).into());
        assert_eq!(input.axis_value(InputAxis::X), 0);
        assert_eq!(input.button_state(InputButton::LEFT_BUTTON), ButtonState::Up);

        input.process_record(&RawKeyboard::down(InputButton::A.code() as u16, 0x1e).into());
        assert!(input.is_down(InputButton::A));
    }

    #[test]
    fn test_hid_records_change_nothing() {
        let mut input = Input::new(&[InputDevice::Keyboard, InputDevice::Mouse, InputDevice::Gamepad]);
        input.process_record(&RawHid { usage: 0x05, data: vec![1, 2, 3] }.into());
        assert_eq!(input.axis_value(InputAxis::X), 0);
        assert_eq!(input.button_state(InputButton::A), ButtonState::Up);
    }

    #[test]
    fn test_process_messages_resets_relative_axes() {
        let mut input = Input::default();
        let mut queue = RawInputQueue::new();

        queue.push(RawMouse::moved(4, 2));
        input.process_messages(&mut queue);
        assert_eq!(input.axis_value(InputAxis::X), 4);
        assert_eq!(input.axis_value_absolute(InputAxis::X), 4);

        input.process_messages(&mut queue);
        assert_eq!(input.axis_value(InputAxis::X), 0);
        assert_eq!(input.axis_value_absolute(InputAxis::X), 4);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = Input::default();
        input.process_record(&RawKeyboard::down(InputButton::W.code() as u16, 0x11).into());
        input.process_record(&RawKeyboard::down(InputButton::NUM_LOCK.code() as u16, 0x45).into());
        input.clear();
        assert!(!input.is_down(InputButton::W));
        assert_eq!(input.button_state(InputButton::NUM_LOCK), ButtonState::Off);
    }
}
