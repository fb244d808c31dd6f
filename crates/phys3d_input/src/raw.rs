//! Raw input records
//!
//! Records mirror what a raw-input capable platform reports: keyboard
//! records carry a virtual-key code plus the hardware make code, mouse
//! records carry button transition bits and motion, HID records carry
//! opaque report bytes.

use std::collections::VecDeque;

use bitflags::bitflags;

use crate::button::InputDevice;

/// Maximum number of records decoded per frame
pub const RAW_INPUT_BUFFER_SIZE: usize = 128;

/// Wheel movement of one notch
pub const WHEEL_DELTA: i16 = 120;

/// Most records a [`RawInputQueue`] holds; older ones are dropped past this
pub const RAW_INPUT_QUEUE_CAPACITY: usize = RAW_INPUT_BUFFER_SIZE * 16;

bitflags! {
    /// Keyboard record flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyFlags: u16 {
        /// Key released
        const BREAK = 0x01;
        /// Extended key with an E0 prefix
        const E0 = 0x02;
        /// Extended key with an E1 prefix
        const E1 = 0x04;
    }
}

bitflags! {
    /// Mouse button transition bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtonFlags: u16 {
        const BUTTON_1_DOWN = 0x0001;
        const BUTTON_1_UP = 0x0002;
        const BUTTON_2_DOWN = 0x0004;
        const BUTTON_2_UP = 0x0008;
        const BUTTON_3_DOWN = 0x0010;
        const BUTTON_3_UP = 0x0020;
        const BUTTON_4_DOWN = 0x0040;
        const BUTTON_4_UP = 0x0080;
        const BUTTON_5_DOWN = 0x0100;
        const BUTTON_5_UP = 0x0200;
        /// Vertical wheel moved, amount in `button_data`
        const WHEEL = 0x0400;
        /// Horizontal wheel moved, amount in `button_data`
        const HWHEEL = 0x0800;
    }
}

impl MouseButtonFlags {
    /// All "button went down" bits
    pub const ANY_DOWN: Self = Self::BUTTON_1_DOWN
        .union(Self::BUTTON_2_DOWN)
        .union(Self::BUTTON_3_DOWN)
        .union(Self::BUTTON_4_DOWN)
        .union(Self::BUTTON_5_DOWN);
}

bitflags! {
    /// Mouse motion flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseMoveFlags: u16 {
        /// Motion fields hold an absolute position instead of a delta
        const MOVE_ABSOLUTE = 0x01;
    }
}

/// A keyboard record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawKeyboard {
    /// Hardware scan code
    pub make_code: u16,
    pub flags: KeyFlags,
    /// Virtual-key code, generic for sided modifiers
    pub virtual_key: u16,
}

impl RawKeyboard {
    /// Record for a key press
    pub fn down(virtual_key: u16, make_code: u16) -> Self {
        Self {
            make_code,
            flags: KeyFlags::empty(),
            virtual_key,
        }
    }

    /// Record for a key release
    pub fn up(virtual_key: u16, make_code: u16) -> Self {
        Self {
            make_code,
            flags: KeyFlags::BREAK,
            virtual_key,
        }
    }

    /// Add extra flags, e.g. [`KeyFlags::E0`]
    pub fn with_flags(mut self, flags: KeyFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// True when the key was released
    pub fn is_break(&self) -> bool {
        self.flags.contains(KeyFlags::BREAK)
    }
}

/// A mouse record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMouse {
    pub flags: MouseMoveFlags,
    pub button_flags: MouseButtonFlags,
    /// Signed wheel delta when a wheel bit is set
    pub button_data: i16,
    pub last_x: i32,
    pub last_y: i32,
}

impl RawMouse {
    /// Relative motion
    pub fn moved(dx: i32, dy: i32) -> Self {
        Self {
            last_x: dx,
            last_y: dy,
            ..Self::default()
        }
    }

    /// Absolute position
    pub fn moved_to(x: i32, y: i32) -> Self {
        Self {
            flags: MouseMoveFlags::MOVE_ABSOLUTE,
            last_x: x,
            last_y: y,
            ..Self::default()
        }
    }

    /// Button transitions only
    pub fn buttons(button_flags: MouseButtonFlags) -> Self {
        Self {
            button_flags,
            ..Self::default()
        }
    }

    /// Vertical wheel movement
    pub fn wheel(delta: i16) -> Self {
        Self {
            button_flags: MouseButtonFlags::WHEEL,
            button_data: delta,
            ..Self::default()
        }
    }

    /// Horizontal wheel movement
    pub fn hwheel(delta: i16) -> Self {
        Self {
            button_flags: MouseButtonFlags::HWHEEL,
            button_data: delta,
            ..Self::default()
        }
    }
}

/// An opaque HID record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHid {
    /// HID usage id of the reporting device
    pub usage: u16,
    pub data: Vec<u8>,
}

/// One raw input record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Keyboard(RawKeyboard),
    Mouse(RawMouse),
    Hid(RawHid),
}

impl RawInput {
    /// Device kind that produced this record
    pub fn device(&self) -> Option<InputDevice> {
        match self {
            RawInput::Keyboard(_) => Some(InputDevice::Keyboard),
            RawInput::Mouse(_) => Some(InputDevice::Mouse),
            RawInput::Hid(hid) => InputDevice::from_usage(hid.usage),
        }
    }
}

impl From<RawKeyboard> for RawInput {
    fn from(record: RawKeyboard) -> Self {
        RawInput::Keyboard(record)
    }
}

impl From<RawMouse> for RawInput {
    fn from(record: RawMouse) -> Self {
        RawInput::Mouse(record)
    }
}

impl From<RawHid> for RawInput {
    fn from(record: RawHid) -> Self {
        RawInput::Hid(record)
    }
}

/// Records waiting to be decoded
///
/// The event loop pushes records as they arrive; [`crate::Input::process_messages`]
/// takes at most [`RAW_INPUT_BUFFER_SIZE`] of them per frame and leaves the
/// rest for the next frame. The queue never holds more than
/// [`RAW_INPUT_QUEUE_CAPACITY`] records; the oldest are dropped first.
#[derive(Debug, Default)]
pub struct RawInputQueue {
    records: VecDeque<RawInput>,
    /// Records dropped since the last frame was taken
    dropped: usize,
}

impl RawInputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: impl Into<RawInput>) {
        if self.records.len() == RAW_INPUT_QUEUE_CAPACITY {
            self.records.pop_front();
            self.dropped += 1;
        }
        self.records.push_back(record.into());
    }

    pub fn extend<I, R>(&mut self, records: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<RawInput>,
    {
        for record in records {
            self.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }

    /// Records dropped since the last frame was taken
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Take the records for one frame, oldest first
    pub fn take_frame(&mut self) -> impl Iterator<Item = RawInput> + '_ {
        if self.dropped > 0 {
            log::warn!("Raw input queue full, dropped {} oldest record(s)", self.dropped);
            self.dropped = 0;
        }
        let count = self.records.len().min(RAW_INPUT_BUFFER_SIZE);
        self.records.drain(..count)
    }
}
