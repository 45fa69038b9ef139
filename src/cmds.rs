// Framing control codes

/// Null byte. Five of them open every packet so the sign can detect the baud rate.
pub const NUL: u8 = 0x00;

/// Start of header, follows the baud-rate preamble.
pub const SOH: u8 = 0x01;

/// Start of text, precedes the command selector.
pub const STX: u8 = 0x02;

/// End of text, follows the payload and precedes the checksum.
pub const ETX: u8 = 0x03;

/// End of transmission, closes every packet.
pub const EOT: u8 = 0x04;

/// Escape, introduces the line position and display mode in a write text payload.
pub const ESC: u8 = 0x1B;

/// Sign type and address meaning "all signs on the line".
pub const BROADCAST_ADDRESS: &[u8; 3] = b"Z00";

/// Number of NUL bytes sent ahead of SOH.
pub const PREAMBLE_NULS: usize = 5;

/// Line position sent after ESC in a write text payload. The sign has a single (middle) line.
pub const LINE_POSITION_MIDDLE: u8 = 0x20;

/// Label of the priority text file, which overrides every other message while it exists.
pub const PRIORITY_FILE_LABEL: char = '0';

/// The command kinds understood by the sign, each selected by one byte after STX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Write a text file.
    WriteText,
    /// Write a special function (clock, memory map, sound, reset...).
    WriteSpecial,
    /// Read a special function (error register, memory size...).
    ReadSpecial,
    /// Write a string file.
    WriteString,
    /// Write a small dots picture file.
    WriteSmallDots,
    /// Write an RGB dots picture file.
    WriteRgb,
    /// Write a large dots picture file.
    WriteLargeDots,
}

impl Command {
    /// All command kinds, in selector order.
    pub const ALL: [Command; 7] = [
        Command::WriteText,
        Command::WriteSpecial,
        Command::ReadSpecial,
        Command::WriteString,
        Command::WriteSmallDots,
        Command::WriteRgb,
        Command::WriteLargeDots,
    ];

    /// Returns the selector byte sent after STX.
    #[inline]
    pub fn selector(self) -> u8 {
        match self {
            Command::WriteText => b'A',
            Command::WriteSpecial => b'E',
            Command::ReadSpecial => b'F',
            Command::WriteString => b'G',
            Command::WriteSmallDots => b'I',
            Command::WriteRgb => b'K',
            Command::WriteLargeDots => b'M',
        }
    }

    /// Looks a command kind up by its selector byte.
    pub fn from_selector(selector: u8) -> Option<Command> {
        Command::ALL.into_iter().find(|cmd| cmd.selector() == selector)
    }
}

// Special function sub-commands (payload byte after the `WriteSpecial` / `ReadSpecial` selector)

/// Set time of day, followed by `HHMM` in 24 hour format.
pub const SPECIAL_SET_TIME: u8 = 0x20;

/// Speaker on/off, followed by `FF` (on) or `00` (off).
pub const SPECIAL_SPEAKER: u8 = 0x21;

/// Read: memory size of the sign.
pub const SPECIAL_MEMORY_SIZE: u8 = 0x23;

/// Configure memory, followed by one descriptor per file.
pub const SPECIAL_MEMORY_CONFIG: u8 = 0x24;

/// Set day of week, followed by the day number.
pub const SPECIAL_SET_WEEKDAY: u8 = 0x26;

/// Set time format, followed by `S` (AM/PM) or `M` (24 hour).
pub const SPECIAL_TIME_FORMAT: u8 = 0x27;

/// Read: serial error status register.
pub const SPECIAL_ERROR_REGISTER: u8 = 0x2A;

/// Soft reset, no argument.
pub const SPECIAL_SOFT_RESET: u8 = 0x2C;

/// Set date, followed by `MMDDYY`.
pub const SPECIAL_SET_DATE: u8 = 0x3B;

// Inline text control codes

/// Marks the next byte as an extended character code.
pub const EXTENDED_CHAR: u8 = 0x08;

/// Do not hold the text on screen after it is displayed.
pub const NO_HOLD: u8 = 0x09;

/// Start a new page.
pub const NEW_PAGE: u8 = 0x0C;

/// Start a new line.
pub const NEW_LINE: u8 = 0x0D;

/// Insert a string file, must be followed by its label.
pub const CALL_STRING: u8 = 0x10;

/// Insert the current time.
pub const CALL_TIME: u8 = 0x13;

/// Insert a small dots picture, must be followed by its label.
pub const CALL_DOTS: u8 = 0x14;

/// Select a font, followed by the font code.
pub const SET_FONT: u8 = 0x1A;

/// Select a color, followed by the color code.
pub const SET_COLOR: u8 = 0x1C;

/// Select character spacing, followed by `0` (proportional) or `1` (fixed).
pub const SET_CHAR_SPACING: u8 = 0x1E;
