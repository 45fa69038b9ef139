use crate::internals::SIGN_DEFAULT_READ_TIMEOUT;
use log::warn;
use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

/// Animation used by the sign when showing a text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Text scrolls from right to left.
    #[default]
    Rotate,
    /// Text is displayed centered, no animation.
    Hold,
    /// Text flashes. Some firmware revisions reboot on this mode.
    Flash,
    RollUp,
    RollDown,
    RollLeft,
    RollRight,
    WipeUp,
    WipeDown,
    WipeLeft,
    WipeRight,
    Scroll,
    /// The sign picks a mode for each page.
    AutoMode,
    RollIn,
    RollOut,
    WipeIn,
    WipeOut,
    /// Rotate with compressed characters.
    CompressedRotate,
    /// Pixels of the text twinkle on the display.
    Twinkle,
    /// New text is drawn one pixel at a time.
    Sparkle,
    /// Pixels snow down from the top.
    Snow,
    Interlock,
    Switch,
    Slide,
    Spray,
    Starburst,
    Welcome,
    /// Some firmware revisions crash on this mode.
    SlotMachine,
}

impl DisplayMode {
    /// Every display mode, in code order.
    pub const ALL: [DisplayMode; 28] = [
        DisplayMode::Rotate,
        DisplayMode::Hold,
        DisplayMode::Flash,
        DisplayMode::RollUp,
        DisplayMode::RollDown,
        DisplayMode::RollLeft,
        DisplayMode::RollRight,
        DisplayMode::WipeUp,
        DisplayMode::WipeDown,
        DisplayMode::WipeLeft,
        DisplayMode::WipeRight,
        DisplayMode::Scroll,
        DisplayMode::AutoMode,
        DisplayMode::RollIn,
        DisplayMode::RollOut,
        DisplayMode::WipeIn,
        DisplayMode::WipeOut,
        DisplayMode::CompressedRotate,
        DisplayMode::Twinkle,
        DisplayMode::Sparkle,
        DisplayMode::Snow,
        DisplayMode::Interlock,
        DisplayMode::Switch,
        DisplayMode::Slide,
        DisplayMode::Spray,
        DisplayMode::Starburst,
        DisplayMode::Welcome,
        DisplayMode::SlotMachine,
    ];

    /// Returns the one or two byte code that follows `ESC 0x20` in a write text payload.
    pub fn code(self) -> &'static [u8] {
        match self {
            DisplayMode::Rotate => b"a",
            DisplayMode::Hold => b"b",
            DisplayMode::Flash => b"c",
            DisplayMode::RollUp => b"e",
            DisplayMode::RollDown => b"f",
            DisplayMode::RollLeft => b"g",
            DisplayMode::RollRight => b"h",
            DisplayMode::WipeUp => b"i",
            DisplayMode::WipeDown => b"j",
            DisplayMode::WipeLeft => b"k",
            DisplayMode::WipeRight => b"l",
            DisplayMode::Scroll => b"m",
            DisplayMode::AutoMode => b"o",
            DisplayMode::RollIn => b"p",
            DisplayMode::RollOut => b"q",
            DisplayMode::WipeIn => b"r",
            DisplayMode::WipeOut => b"s",
            DisplayMode::CompressedRotate => b"t",
            DisplayMode::Twinkle => b"n0",
            DisplayMode::Sparkle => b"n1",
            DisplayMode::Snow => b"n2",
            DisplayMode::Interlock => b"n3",
            DisplayMode::Switch => b"n4",
            DisplayMode::Slide => b"n5",
            DisplayMode::Spray => b"n6",
            DisplayMode::Starburst => b"n7",
            DisplayMode::Welcome => b"n8",
            DisplayMode::SlotMachine => b"n9",
        }
    }

    /// Returns the snake_case name of the mode (e.g. `"roll_up"`).
    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Rotate => "rotate",
            DisplayMode::Hold => "hold",
            DisplayMode::Flash => "flash",
            DisplayMode::RollUp => "roll_up",
            DisplayMode::RollDown => "roll_down",
            DisplayMode::RollLeft => "roll_left",
            DisplayMode::RollRight => "roll_right",
            DisplayMode::WipeUp => "wipe_up",
            DisplayMode::WipeDown => "wipe_down",
            DisplayMode::WipeLeft => "wipe_left",
            DisplayMode::WipeRight => "wipe_right",
            DisplayMode::Scroll => "scroll",
            DisplayMode::AutoMode => "automode",
            DisplayMode::RollIn => "roll_in",
            DisplayMode::RollOut => "roll_out",
            DisplayMode::WipeIn => "wipe_in",
            DisplayMode::WipeOut => "wipe_out",
            DisplayMode::CompressedRotate => "c_rotate",
            DisplayMode::Twinkle => "twinkle",
            DisplayMode::Sparkle => "sparkle",
            DisplayMode::Snow => "snow",
            DisplayMode::Interlock => "interlock",
            DisplayMode::Switch => "switch",
            DisplayMode::Slide => "slide",
            DisplayMode::Spray => "spray",
            DisplayMode::Starburst => "starburst",
            DisplayMode::Welcome => "welcome",
            DisplayMode::SlotMachine => "slot_machine",
        }
    }

    /// Looks a mode up by name. Unknown names fall back to [`DisplayMode::Rotate`].
    pub fn from_name(name: &str) -> DisplayMode {
        match DisplayMode::ALL.into_iter().find(|mode| mode.name() == name) {
            Some(mode) => mode,
            None => {
                warn!("Unknown display mode {:?}, falling back to rotate", name);
                DisplayMode::Rotate
            }
        }
    }
}

impl FromStr for DisplayMode {
    type Err = Infallible;

    /// Same as [`DisplayMode::from_name`], never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DisplayMode::from_name(s))
    }
}

/// Text color, selected inline with `SET_COLOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Amber,
    DimRed,
    DimGreen,
    Brown,
    Orange,
    Yellow,
    Rainbow1,
    Rainbow2,
    Mix,
    Auto,
}

impl Color {
    /// The code byte following `SET_COLOR`.
    pub fn code(self) -> u8 {
        match self {
            Color::Red => b'1',
            Color::Green => b'2',
            Color::Amber => b'3',
            Color::DimRed => b'4',
            Color::DimGreen => b'5',
            Color::Brown => b'6',
            Color::Orange => b'7',
            Color::Yellow => b'8',
            Color::Rainbow1 => b'9',
            Color::Rainbow2 => b'A',
            Color::Mix => b'B',
            Color::Auto => b'C',
        }
    }
}

/// Character set, selected inline with `SET_FONT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    FiveStandard,
    FiveBold,
    FiveWide,
    SevenStandard,
    SevenBold,
    SevenWide,
}

impl Font {
    /// The code byte following `SET_FONT`.
    pub fn code(self) -> u8 {
        match self {
            Font::FiveStandard => b'1',
            Font::FiveBold => b'2',
            Font::FiveWide => 0x3B,
            Font::SevenStandard => b'3',
            Font::SevenBold => b'4',
            Font::SevenWide => 0x3C,
        }
    }
}

/// Scroll speed, 1 (slowest) to 5 (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speed {
    Speed1,
    Speed2,
    Speed3,
    Speed4,
    Speed5,
}

impl Speed {
    /// The inline control byte selecting this speed.
    pub fn code(self) -> u8 {
        match self {
            Speed::Speed1 => 0x15,
            Speed::Speed2 => 0x16,
            Speed::Speed3 => 0x17,
            Speed::Speed4 => 0x18,
            Speed::Speed5 => 0x19,
        }
    }
}

/// Character spacing, selected inline with `SET_CHAR_SPACING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharSpacing {
    Proportional,
    Fixed,
}

impl CharSpacing {
    pub fn code(self) -> u8 {
        match self {
            CharSpacing::Proportional => b'0',
            CharSpacing::Fixed => b'1',
        }
    }
}

/// Kind of file allocated by a memory configuration descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Text,
    String,
}

impl FileType {
    fn code(self) -> u8 {
        match self {
            FileType::Text => b'A',
            FileType::String => b'B',
        }
    }
}

/// One file slot in a memory configuration.
///
/// Rendered as `label ++ type ++ 'L' (unlocked) ++ size (4 hex digits) ++ tail (4 chars)`.
/// For text files the tail is the run time (`FF00` = always); string files use `0000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// File label; the string slots use decimal labels, so `10` is two characters.
    pub label: String,
    pub file_type: FileType,
    /// Capacity in bytes.
    pub size: u16,
    pub tail: [u8; 4],
}

impl FileDescriptor {
    /// A text file that is displayed at all times.
    pub fn text(label: char, size: u16) -> FileDescriptor {
        FileDescriptor {
            label: label.to_string(),
            file_type: FileType::Text,
            size,
            tail: *b"FF00",
        }
    }

    /// A string file.
    pub fn string(label: impl ToString, size: u16) -> FileDescriptor {
        FileDescriptor {
            label: label.to_string(),
            file_type: FileType::String,
            size,
            tail: *b"0000",
        }
    }

    /// Appends the wire form of the descriptor to `out`.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.label.as_bytes());
        out.push(self.file_type.code());
        out.push(b'L');
        out.extend_from_slice(format!("{:04X}", self.size).as_bytes());
        out.extend_from_slice(&self.tail);
    }
}

/// Options applied when connecting to a sign.
#[derive(Debug, Clone, PartialEq)]
pub struct SignOptions {
    /// If `true`, the sign clock is synced (time, weekday, 24h format) on connect.
    pub sync_clock_on_connect: bool,

    /// How long register reads wait for the sign to answer.
    pub read_timeout: Duration,
}

impl SignOptions {
    /// Creates `SignOptions` that leave the sign untouched on connect.
    pub fn without_clock_sync() -> SignOptions {
        SignOptions {
            sync_clock_on_connect: false,
            ..SignOptions::default()
        }
    }

    /// Returns a copy with a different register read timeout.
    ///
    /// # Arguments
    ///
    /// * `read_timeout` - The maximum duration to wait for a register reply.
    pub fn with_read_timeout(self, read_timeout: Duration) -> SignOptions {
        SignOptions {
            read_timeout,
            ..self
        }
    }
}

impl Default for SignOptions {
    /// Creates default `SignOptions`: sync the clock on connect, default read timeout.
    fn default() -> SignOptions {
        SignOptions {
            sync_clock_on_connect: true,
            read_timeout: SIGN_DEFAULT_READ_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_round_trip() {
        for mode in DisplayMode::ALL {
            assert_eq!(DisplayMode::from_name(mode.name()), mode);
        }
    }

    #[test]
    fn unknown_mode_name_falls_back_to_rotate() {
        assert_eq!(DisplayMode::from_name("moonwalk"), DisplayMode::Rotate);
        assert_eq!("".parse::<DisplayMode>(), Ok(DisplayMode::Rotate));
        assert_eq!("snow".parse::<DisplayMode>(), Ok(DisplayMode::Snow));
    }

    #[test]
    fn special_mode_codes_are_two_bytes() {
        assert_eq!(DisplayMode::Twinkle.code(), b"n0");
        assert_eq!(DisplayMode::SlotMachine.code(), b"n9");
        assert_eq!(DisplayMode::CompressedRotate.code(), b"t");
        assert_eq!(DisplayMode::default().code(), b"a");
    }

    #[test]
    fn descriptors_render_fixed_layout() {
        let mut out = Vec::new();
        FileDescriptor::text('A', 256).write_into(&mut out);
        FileDescriptor::string(10, 125).write_into(&mut out);
        assert_eq!(out, b"AAL0100FF0010BL007D0000".to_vec());
    }

    #[test]
    fn default_options_sync_clock() {
        let options = SignOptions::default();
        assert!(options.sync_clock_on_connect);
        assert!(!SignOptions::without_clock_sync().sync_clock_on_connect);
        let options = options.with_read_timeout(Duration::from_millis(10));
        assert_eq!(options.read_timeout, Duration::from_millis(10));
    }
}
