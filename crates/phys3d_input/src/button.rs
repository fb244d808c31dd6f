//! Button, axis and device identifiers
//!
//! Buttons are identified by their 8-bit virtual-key code. Mouse buttons and
//! keyboard keys share the same code space, so a single state table covers
//! both devices.

/// Kind of device that produces input records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    Keyboard,
    Mouse,
    Flightstick,
    Gamepad,
}

impl InputDevice {
    /// HID usage page shared by all generic desktop devices
    pub const USAGE_PAGE: u16 = 0x01;

    /// HID usage id within the generic desktop page
    pub fn usage(self) -> u16 {
        match self {
            InputDevice::Keyboard => 0x06,
            InputDevice::Mouse => 0x02,
            InputDevice::Flightstick => 0x04,
            InputDevice::Gamepad => 0x05,
        }
    }

    /// Look up a device kind from its HID usage id
    pub fn from_usage(usage: u16) -> Option<Self> {
        match usage {
            0x06 => Some(InputDevice::Keyboard),
            0x02 => Some(InputDevice::Mouse),
            0x04 => Some(InputDevice::Flightstick),
            0x05 => Some(InputDevice::Gamepad),
            _ => None,
        }
    }
}

/// State of a button
///
/// `On`/`Off` are only used by toggle keys (caps, num and scroll lock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Up,
    Down,
    On,
    Off,
}

/// Analog axes reported by pointing devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InputAxis {
    None,
    X,
    Y,
    Z,
    /// Vertical wheel
    Rx,
    /// Horizontal wheel
    Ry,
    Rz,
}

impl InputAxis {
    /// Number of axis slots
    pub const COUNT: usize = 7;
}

/// A mouse button or keyboard key, identified by virtual-key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InputButton(pub u8);

#[allow(missing_docs)]
impl InputButton {
    pub const NONE: Self = Self(0x00);
    pub const LEFT_BUTTON: Self = Self(0x01);
    pub const RIGHT_BUTTON: Self = Self(0x02);
    pub const CANCEL: Self = Self(0x03);
    pub const MIDDLE_BUTTON: Self = Self(0x04);
    pub const EXTRA_BUTTON_1: Self = Self(0x05);
    pub const EXTRA_BUTTON_2: Self = Self(0x06);
    pub const BACK: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const CLEAR: Self = Self(0x0c);
    pub const ENTER: Self = Self(0x0d);
    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const ALT: Self = Self(0x12);
    pub const PAUSE: Self = Self(0x13);
    pub const CAPS_LOCK: Self = Self(0x14);
    pub const KANA_MODE: Self = Self(0x15);
    pub const HANGUL_MODE: Self = Self(0x15);
    pub const JUNJA_MODE: Self = Self(0x17);
    pub const FINAL_MODE: Self = Self(0x18);
    pub const HANJA_MODE: Self = Self(0x19);
    pub const KANJI_MODE: Self = Self(0x19);
    pub const ESCAPE: Self = Self(0x1b);
    pub const IME_CONVERT: Self = Self(0x1c);
    pub const IME_NO_CONVERT: Self = Self(0x1d);
    pub const IME_ACCEPT: Self = Self(0x1e);
    pub const IME_MODE_CHANGE: Self = Self(0x1f);
    pub const SPACE: Self = Self(0x20);
    pub const PRIOR: Self = Self(0x21);
    pub const PAGE_UP: Self = Self(0x21);
    pub const NEXT: Self = Self(0x22);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT_ARROW: Self = Self(0x25);
    pub const UP_ARROW: Self = Self(0x26);
    pub const RIGHT_ARROW: Self = Self(0x27);
    pub const DOWN_ARROW: Self = Self(0x28);
    pub const SELECT: Self = Self(0x29);
    pub const PRINT: Self = Self(0x2a);
    pub const EXECUTE: Self = Self(0x2b);
    pub const PRINT_SCREEN: Self = Self(0x2c);
    pub const SNAPSHOT: Self = Self(0x2c);
    pub const INSERT: Self = Self(0x2d);
    pub const DELETE: Self = Self(0x2e);
    pub const HELP: Self = Self(0x2f);
    pub const D0: Self = Self(0x30);
    pub const D1: Self = Self(0x31);
    pub const D2: Self = Self(0x32);
    pub const D3: Self = Self(0x33);
    pub const D4: Self = Self(0x34);
    pub const D5: Self = Self(0x35);
    pub const D6: Self = Self(0x36);
    pub const D7: Self = Self(0x37);
    pub const D8: Self = Self(0x38);
    pub const D9: Self = Self(0x39);
    pub const A: Self = Self(0x41);
    pub const B: Self = Self(0x42);
    pub const C: Self = Self(0x43);
    pub const D: Self = Self(0x44);
    pub const E: Self = Self(0x45);
    pub const F: Self = Self(0x46);
    pub const G: Self = Self(0x47);
    pub const H: Self = Self(0x48);
    pub const I: Self = Self(0x49);
    pub const J: Self = Self(0x4a);
    pub const K: Self = Self(0x4b);
    pub const L: Self = Self(0x4c);
    pub const M: Self = Self(0x4d);
    pub const N: Self = Self(0x4e);
    pub const O: Self = Self(0x4f);
    pub const P: Self = Self(0x50);
    pub const Q: Self = Self(0x51);
    pub const R: Self = Self(0x52);
    pub const S: Self = Self(0x53);
    pub const T: Self = Self(0x54);
    pub const U: Self = Self(0x55);
    pub const V: Self = Self(0x56);
    pub const W: Self = Self(0x57);
    pub const X: Self = Self(0x58);
    pub const Y: Self = Self(0x59);
    pub const Z: Self = Self(0x5a);
    pub const LEFT_WIN: Self = Self(0x5b);
    pub const RIGHT_WIN: Self = Self(0x5c);
    pub const APPS: Self = Self(0x5d);
    pub const SLEEP: Self = Self(0x5f);
    pub const NUM_PAD_0: Self = Self(0x60);
    pub const NUM_PAD_1: Self = Self(0x61);
    pub const NUM_PAD_2: Self = Self(0x62);
    pub const NUM_PAD_3: Self = Self(0x63);
    pub const NUM_PAD_4: Self = Self(0x64);
    pub const NUM_PAD_5: Self = Self(0x65);
    pub const NUM_PAD_6: Self = Self(0x66);
    pub const NUM_PAD_7: Self = Self(0x67);
    pub const NUM_PAD_8: Self = Self(0x68);
    pub const NUM_PAD_9: Self = Self(0x69);
    pub const MULTIPLY: Self = Self(0x6a);
    pub const ADD: Self = Self(0x6b);
    pub const SEPARATOR: Self = Self(0x6c);
    pub const SUBTRACT: Self = Self(0x6d);
    pub const DECIMAL: Self = Self(0x6e);
    pub const DIVIDE: Self = Self(0x6f);
    pub const F1: Self = Self(0x70);
    pub const F2: Self = Self(0x71);
    pub const F3: Self = Self(0x72);
    pub const F4: Self = Self(0x73);
    pub const F5: Self = Self(0x74);
    pub const F6: Self = Self(0x75);
    pub const F7: Self = Self(0x76);
    pub const F8: Self = Self(0x77);
    pub const F9: Self = Self(0x78);
    pub const F10: Self = Self(0x79);
    pub const F11: Self = Self(0x7a);
    pub const F12: Self = Self(0x7b);
    pub const F13: Self = Self(0x7c);
    pub const F14: Self = Self(0x7d);
    pub const F15: Self = Self(0x7e);
    pub const F16: Self = Self(0x7f);
    pub const F17: Self = Self(0x80);
    pub const F18: Self = Self(0x81);
    pub const F19: Self = Self(0x82);
    pub const F20: Self = Self(0x83);
    pub const F21: Self = Self(0x84);
    pub const F22: Self = Self(0x85);
    pub const F23: Self = Self(0x86);
    pub const F24: Self = Self(0x87);
    pub const NUM_LOCK: Self = Self(0x90);
    pub const SCROLL_LOCK: Self = Self(0x91);
    pub const LEFT_SHIFT: Self = Self(0xa0);
    pub const RIGHT_SHIFT: Self = Self(0xa1);
    pub const LEFT_CONTROL: Self = Self(0xa2);
    pub const RIGHT_CONTROL: Self = Self(0xa3);
    pub const LEFT_ALT: Self = Self(0xa4);
    pub const RIGHT_ALT: Self = Self(0xa5);
    pub const BROWSER_BACK: Self = Self(0xa6);
    pub const BROWSER_FORWARD: Self = Self(0xa7);
    pub const BROWSER_REFRESH: Self = Self(0xa8);
    pub const BROWSER_STOP: Self = Self(0xa9);
    pub const BROWSER_SEARCH: Self = Self(0xaa);
    pub const BROWSER_FAVORITES: Self = Self(0xab);
    pub const BROWSER_HOME: Self = Self(0xac);
    pub const VOLUME_MUTE: Self = Self(0xad);
    pub const VOLUME_DOWN: Self = Self(0xae);
    pub const VOLUME_UP: Self = Self(0xaf);
    pub const MEDIA_NEXT_TRACK: Self = Self(0xb0);
    pub const MEDIA_PREVIOUS_TRACK: Self = Self(0xb1);
    pub const MEDIA_STOP: Self = Self(0xb2);
    pub const MEDIA_PLAY_PAUSE: Self = Self(0xb3);
    pub const LAUNCH_MAIL: Self = Self(0xb4);
    pub const SELECT_MEDIA: Self = Self(0xb5);
    pub const LAUNCH_APPLICATION_1: Self = Self(0xb6);
    pub const LAUNCH_APPLICATION_2: Self = Self(0xb7);
    /// US layout: `;:`
    pub const OEM_1: Self = Self(0xba);
    pub const OEM_PLUS: Self = Self(0xbb);
    pub const OEM_COMMA: Self = Self(0xbc);
    pub const OEM_MINUS: Self = Self(0xbd);
    pub const OEM_PERIOD: Self = Self(0xbe);
    /// US layout: `/?`
    pub const OEM_2: Self = Self(0xbf);
    /// US layout: `` `~ ``
    pub const OEM_3: Self = Self(0xc0);
    /// US layout: `[{`
    pub const OEM_4: Self = Self(0xdb);
    /// US layout: `\|`
    pub const OEM_5: Self = Self(0xdc);
    /// US layout: `]}`
    pub const OEM_6: Self = Self(0xdd);
    /// US layout: quote
    pub const OEM_7: Self = Self(0xde);
    pub const OEM_8: Self = Self(0xdf);
    /// Angle bracket or backslash on the 102-key keyboard
    pub const OEM_102: Self = Self(0xe2);
    pub const PROCESS_KEY: Self = Self(0xe5);
    pub const PACKET: Self = Self(0xe7);
    pub const ATTN: Self = Self(0xf6);
    pub const CR_SEL: Self = Self(0xf7);
    pub const EX_SEL: Self = Self(0xf8);
    pub const ERASE_EOF: Self = Self(0xf9);
    pub const PLAY: Self = Self(0xfa);
    pub const ZOOM: Self = Self(0xfb);
    pub const NO_NAME: Self = Self(0xfc);
    pub const PA_1: Self = Self(0xfd);
    pub const OEM_CLEAR: Self = Self(0xfe);

    /// Virtual-key code of this button
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Look up a button by virtual-key code
    ///
    /// Returns `None` for codes that are reserved or unassigned.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00..=0x06
            | 0x08..=0x09
            | 0x0c..=0x0d
            | 0x10..=0x15
            | 0x17..=0x19
            | 0x1b..=0x39
            | 0x41..=0x5d
            | 0x5f..=0x87
            | 0x90..=0x91
            | 0xa0..=0xb7
            | 0xba..=0xc0
            | 0xdb..=0xdf
            | 0xe2
            | 0xe5
            | 0xe7
            | 0xf6..=0xfe => Some(Self(code)),
            _ => None,
        }
    }

    /// Whether this key keeps an on/off toggle state
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::CAPS_LOCK | Self::NUM_LOCK | Self::SCROLL_LOCK)
    }

    /// Whether this is one of the five mouse buttons
    pub fn is_mouse_button(self) -> bool {
        matches!(
            self,
            Self::LEFT_BUTTON
                | Self::RIGHT_BUTTON
                | Self::MIDDLE_BUTTON
                | Self::EXTRA_BUTTON_1
                | Self::EXTRA_BUTTON_2
        )
    }

    /// Generic modifier that a sided modifier also drives
    ///
    /// Left/right shift, control and alt share one generic state.
    pub fn generic_modifier(self) -> Option<Self> {
        match self {
            Self::LEFT_SHIFT | Self::RIGHT_SHIFT => Some(Self::SHIFT),
            Self::LEFT_CONTROL | Self::RIGHT_CONTROL => Some(Self::CONTROL),
            Self::LEFT_ALT | Self::RIGHT_ALT => Some(Self::ALT),
            _ => None,
        }
    }
}
