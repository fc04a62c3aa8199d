//! Kernel input codes to USB HID usages.
//!
//! Pure lookup tables. A code maps to exactly one channel: consumer-control
//! codes go to the consumer function, the three mouse buttons to the mouse,
//! everything else to the keyboard. Codes without a usage are dropped by
//! the caller.

use super::ecodes::*;
use super::RawEvent;
use crate::hid::mouse::{BUTTON_LEFT, BUTTON_MIDDLE, BUTTON_RIGHT};
use crate::hid::Profile;

/// Report channel an `EV_KEY` code is dispatched to.
pub fn classify_channel(code: u16) -> Profile {
    if consumer_usage(code).is_some() {
        Profile::ConsumerControl
    } else if mouse_button(code).is_some() {
        Profile::Mouse
    } else {
        Profile::Keyboard
    }
}

/// HID usage of `code` on its channel: keyboard usage, mouse button bit or
/// consumer usage. `None` for codes nothing maps.
pub fn translate(code: u16) -> Option<u16> {
    match classify_channel(code) {
        Profile::ConsumerControl => consumer_usage(code),
        Profile::Mouse => mouse_button(code).map(u16::from),
        Profile::Keyboard => keyboard_usage(code).map(u16::from),
    }
}

/// Split one `EV_REL` event into `(dx, dy, dwheel)`.
///
/// At most one component is non-zero. Horizontal and high-resolution wheel
/// events have no place in the boot mouse report and yield `None`.
pub fn mouse_delta(event: &RawEvent) -> Option<(i32, i32, i32)> {
    if event.event_type != EV_REL {
        return None;
    }
    match event.code {
        REL_X => Some((event.value, 0, 0)),
        REL_Y => Some((0, event.value, 0)),
        REL_WHEEL => Some((0, 0, event.value)),
        _ => None,
    }
}

/// Button bit of a mouse button code.
pub fn mouse_button(code: u16) -> Option<u8> {
    match code {
        BTN_LEFT => Some(BUTTON_LEFT),
        BTN_RIGHT => Some(BUTTON_RIGHT),
        BTN_MIDDLE => Some(BUTTON_MIDDLE),
        _ => None,
    }
}

/// Keyboard/Keypad page (0x07) usage of a key code.
pub fn keyboard_usage(code: u16) -> Option<u8> {
    let usage = match code {
        KEY_A => 0x04,
        KEY_B => 0x05,
        KEY_C => 0x06,
        KEY_D => 0x07,
        KEY_E => 0x08,
        KEY_F => 0x09,
        KEY_G => 0x0A,
        KEY_H => 0x0B,
        KEY_I => 0x0C,
        KEY_J => 0x0D,
        KEY_K => 0x0E,
        KEY_L => 0x0F,
        KEY_M => 0x10,
        KEY_N => 0x11,
        KEY_O => 0x12,
        KEY_P => 0x13,
        KEY_Q => 0x14,
        KEY_R => 0x15,
        KEY_S => 0x16,
        KEY_T => 0x17,
        KEY_U => 0x18,
        KEY_V => 0x19,
        KEY_W => 0x1A,
        KEY_X => 0x1B,
        KEY_Y => 0x1C,
        KEY_Z => 0x1D,
        KEY_1 => 0x1E,
        KEY_2 => 0x1F,
        KEY_3 => 0x20,
        KEY_4 => 0x21,
        KEY_5 => 0x22,
        KEY_6 => 0x23,
        KEY_7 => 0x24,
        KEY_8 => 0x25,
        KEY_9 => 0x26,
        KEY_0 => 0x27,
        KEY_ENTER => 0x28,
        KEY_ESC => 0x29,
        KEY_BACKSPACE => 0x2A,
        KEY_TAB => 0x2B,
        KEY_SPACE => 0x2C,
        KEY_MINUS => 0x2D,
        KEY_EQUAL => 0x2E,
        KEY_LEFTBRACE => 0x2F,
        KEY_RIGHTBRACE => 0x30,
        KEY_BACKSLASH => 0x31,
        KEY_SEMICOLON => 0x33,
        KEY_APOSTROPHE => 0x34,
        KEY_GRAVE => 0x35,
        KEY_COMMA => 0x36,
        KEY_DOT => 0x37,
        KEY_SLASH => 0x38,
        KEY_CAPSLOCK => 0x39,
        KEY_F1 => 0x3A,
        KEY_F2 => 0x3B,
        KEY_F3 => 0x3C,
        KEY_F4 => 0x3D,
        KEY_F5 => 0x3E,
        KEY_F6 => 0x3F,
        KEY_F7 => 0x40,
        KEY_F8 => 0x41,
        KEY_F9 => 0x42,
        KEY_F10 => 0x43,
        KEY_F11 => 0x44,
        KEY_F12 => 0x45,
        KEY_SYSRQ => 0x46,
        KEY_SCROLLLOCK => 0x47,
        KEY_INSERT => 0x49,
        KEY_HOME => 0x4A,
        KEY_PAGEUP => 0x4B,
        KEY_DELETE => 0x4C,
        KEY_END => 0x4D,
        KEY_PAGEDOWN => 0x4E,
        KEY_RIGHT => 0x4F,
        KEY_LEFT => 0x50,
        KEY_DOWN => 0x51,
        KEY_UP => 0x52,
        KEY_NUMLOCK => 0x53,
        KEY_KPSLASH => 0x54,
        KEY_KPASTERISK => 0x55,
        KEY_KPMINUS => 0x56,
        KEY_KPPLUS => 0x57,
        KEY_KPENTER => 0x58,
        KEY_KP1 => 0x59,
        KEY_KP2 => 0x5A,
        KEY_KP3 => 0x5B,
        KEY_KP4 => 0x5C,
        KEY_KP5 => 0x5D,
        KEY_KP6 => 0x5E,
        KEY_KP7 => 0x5F,
        KEY_KP8 => 0x60,
        KEY_KP9 => 0x61,
        KEY_KP0 => 0x62,
        KEY_KPDOT => 0x63,
        KEY_102ND => 0x64,
        KEY_COMPOSE => 0x65,
        KEY_KPEQUAL => 0x67,
        KEY_F13 => 0x68,
        KEY_F14 => 0x69,
        KEY_F15 => 0x6A,
        KEY_F16 => 0x6B,
        KEY_F17 => 0x6C,
        KEY_F18 => 0x6D,
        KEY_F19 => 0x6E,
        KEY_F20 => 0x6F,
        KEY_F21 => 0x70,
        KEY_F22 => 0x71,
        KEY_F23 => 0x72,
        KEY_F24 => 0x73,
        KEY_KPCOMMA => 0x85,
        KEY_LEFTCTRL => 0xE0,
        KEY_LEFTSHIFT => 0xE1,
        KEY_LEFTALT => 0xE2,
        KEY_LEFTMETA => 0xE3,
        KEY_RIGHTCTRL => 0xE4,
        KEY_RIGHTSHIFT => 0xE5,
        KEY_RIGHTALT => 0xE6,
        KEY_RIGHTMETA => 0xE7,
        _ => return None,
    };
    Some(usage)
}

/// Consumer page (0x0C) usage of a key code.
pub fn consumer_usage(code: u16) -> Option<u16> {
    let usage = match code {
        KEY_POWER => 0x0030,
        KEY_RESTART => 0x0031,
        KEY_SLEEP => 0x0032,
        BTN_MISC => 0x0036,
        KEY_MENU => 0x0040,
        KEY_SELECT => 0x0041,
        KEY_INFO => 0x01BD,
        KEY_SUBTITLE => 0x0061,
        KEY_VCR => 0x0092,
        KEY_CAMERA => 0x0065,
        KEY_RED => 0x0069,
        KEY_GREEN => 0x006A,
        KEY_BLUE => 0x006B,
        KEY_YELLOW => 0x006C,
        KEY_ASPECT_RATIO => 0x006D,
        KEY_BRIGHTNESSUP => 0x006F,
        KEY_BRIGHTNESSDOWN => 0x0070,
        KEY_BRIGHTNESS_TOGGLE => 0x0072,
        KEY_BRIGHTNESS_MIN => 0x0073,
        KEY_BRIGHTNESS_MAX => 0x0074,
        KEY_BRIGHTNESS_AUTO => 0x0075,
        KEY_CAMERA_ACCESS_ENABLE => 0x0076,
        KEY_CAMERA_ACCESS_DISABLE => 0x0077,
        KEY_CAMERA_ACCESS_TOGGLE => 0x0078,
        KEY_KBDILLUMUP => 0x0079,
        KEY_KBDILLUMDOWN => 0x007A,
        KEY_KBDILLUMTOGGLE => 0x007C,
        KEY_VIDEO_NEXT => 0x0082,
        KEY_LAST => 0x0083,
        KEY_PC => 0x0088,
        KEY_TV => 0x0089,
        KEY_WWW => 0x0196,
        KEY_DVD => 0x008B,
        KEY_PHONE => 0x008C,
        KEY_PROGRAM => 0x008D,
        KEY_VIDEOPHONE => 0x008E,
        KEY_GAMES => 0x008F,
        KEY_MEMO => 0x0090,
        KEY_CD => 0x0091,
        KEY_TUNER => 0x0093,
        KEY_EXIT => 0x0204,
        KEY_HELP => 0x01A6,
        KEY_TAPE => 0x0096,
        KEY_TV2 => 0x0097,
        KEY_SAT => 0x0098,
        KEY_PVR => 0x009A,
        KEY_CHANNELUP => 0x009C,
        KEY_CHANNELDOWN => 0x009D,
        KEY_VCR2 => 0x00A0,
        KEY_PLAY => 0x00B0,
        KEY_PAUSE => 0x00B1,
        KEY_RECORD => 0x00B2,
        KEY_FASTFORWARD => 0x00B3,
        KEY_REWIND => 0x00B4,
        KEY_NEXTSONG => 0x00B5,
        KEY_PREVIOUSSONG => 0x00B6,
        KEY_STOPCD => 0x00B7,
        KEY_EJECTCD => 0x00B8,
        KEY_MEDIA_REPEAT => 0x00BC,
        KEY_SHUFFLE => 0x00B9,
        KEY_SLOW => 0x00F5,
        KEY_PLAYPAUSE => 0x00CD,
        KEY_VOICECOMMAND => 0x00CF,
        KEY_DICTATE => 0x00D8,
        KEY_EMOJI_PICKER => 0x00D9,
        KEY_MUTE => 0x00E2,
        KEY_BASSBOOST => 0x00E5,
        KEY_VOLUMEUP => 0x00E9,
        KEY_VOLUMEDOWN => 0x00EA,
        KEY_BUTTONCONFIG => 0x0181,
        KEY_BOOKMARKS => 0x022A,
        KEY_CONFIG => 0x0183,
        KEY_WORDPROCESSOR => 0x0184,
        KEY_EDITOR => 0x0185,
        KEY_SPREADSHEET => 0x0186,
        KEY_GRAPHICSEDITOR => 0x0187,
        KEY_PRESENTATION => 0x0188,
        KEY_DATABASE => 0x0189,
        KEY_MAIL => 0x018A,
        KEY_NEWS => 0x018B,
        KEY_VOICEMAIL => 0x018C,
        KEY_ADDRESSBOOK => 0x018D,
        KEY_CALENDAR => 0x018E,
        KEY_TASKMANAGER => 0x018F,
        KEY_JOURNAL => 0x0190,
        KEY_FINANCE => 0x0191,
        KEY_CALC => 0x0192,
        KEY_PLAYER => 0x0193,
        KEY_FILE => 0x01B4,
        KEY_CHAT => 0x0199,
        KEY_LOGOFF => 0x019C,
        KEY_COFFEE => 0x019E,
        KEY_CONTROLPANEL => 0x019F,
        KEY_APPSELECT => 0x01A2,
        KEY_NEXT => 0x01A3,
        KEY_PREVIOUS => 0x01A4,
        KEY_DOCUMENTS => 0x01A7,
        KEY_SPELLCHECK => 0x01AB,
        KEY_KEYBOARD => 0x01AE,
        KEY_SCREENSAVER => 0x01B1,
        KEY_IMAGES => 0x01B6,
        KEY_AUDIO => 0x01B7,
        KEY_VIDEO => 0x01B8,
        KEY_MESSENGER => 0x01BC,
        KEY_ASSISTANT => 0x01CB,
        KEY_NEW => 0x0201,
        KEY_OPEN => 0x0202,
        KEY_CLOSE => 0x0203,
        KEY_SAVE => 0x0207,
        KEY_PROPS => 0x0209,
        KEY_UNDO => 0x021A,
        KEY_COPY => 0x021B,
        KEY_CUT => 0x021C,
        KEY_PASTE => 0x021D,
        KEY_FIND => 0x021F,
        KEY_SEARCH => 0x0221,
        KEY_GOTO => 0x0222,
        KEY_HOMEPAGE => 0x0223,
        KEY_BACK => 0x0224,
        KEY_FORWARD => 0x0225,
        KEY_STOP => 0x0226,
        KEY_REFRESH => 0x0227,
        KEY_ZOOMIN => 0x022D,
        KEY_ZOOMOUT => 0x022E,
        KEY_ZOOMRESET => 0x022F,
        KEY_FULL_SCREEN => 0x0232,
        KEY_SCROLLUP => 0x0233,
        KEY_SCROLLDOWN => 0x0234,
        KEY_EDIT => 0x023D,
        KEY_CANCEL => 0x025F,
        KEY_REDO => 0x0279,
        KEY_REPLY => 0x0289,
        KEY_FORWARDMAIL => 0x028B,
        KEY_SEND => 0x028C,
        KEY_KBD_LAYOUT_NEXT => 0x029D,
        KEY_ALL_APPLICATIONS => 0x02A2,
        KEY_KBDINPUTASSIST_PREV => 0x02C7,
        KEY_KBDINPUTASSIST_NEXT => 0x02C8,
        KEY_KBDINPUTASSIST_PREVGROUP => 0x02C9,
        KEY_KBDINPUTASSIST_NEXTGROUP => 0x02CA,
        KEY_KBDINPUTASSIST_ACCEPT => 0x02CB,
        KEY_KBDINPUTASSIST_CANCEL => 0x02CC,
        KEY_SCALE => 0x029F,
        _ => return None,
    };
    Some(usage)
}
