use crate::cmds::{
    CALL_DOTS, CALL_STRING, CALL_TIME, EXTENDED_CHAR, NEW_LINE, NEW_PAGE, NO_HOLD,
    SET_CHAR_SPACING, SET_COLOR, SET_FONT,
};
use crate::types::{CharSpacing, Color, Font, Speed};

/// Character printed by the sign in place of anything it cannot show.
pub const PLACEHOLDER: char = '_';

/// Returns the extended character code for the accented letters the sign can render.
fn extended_code(c: char) -> Option<u8> {
    match c {
        'ä' => Some(0x24),
        'Ä' => Some(0x2E),
        'ö' => Some(0x34),
        'Ö' => Some(0x39),
        'å' => Some(0x26),
        'Å' => Some(0x2F),
        _ => None,
    }
}

/// Converts text into the sign's character set.
///
/// Known accented letters become `EXTENDED_CHAR` followed by their code; every other
/// character above code point 127 becomes [`PLACEHOLDER`]. Each input character is
/// looked at exactly once, so escape bytes are never filtered again.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(code) = extended_code(c) {
            escaped.push(EXTENDED_CHAR as char);
            escaped.push(code as char);
        } else if (c as u32) > 127 {
            escaped.push(PLACEHOLDER);
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Composes text with inline formatting codes for a write text command.
///
/// # Example
/// ```
/// use betabrite::text::TextBuilder;
/// use betabrite::types::Color;
///
/// let text = TextBuilder::new()
///     .color(Color::Green)
///     .push_str("Now: ")
///     .call_time()
///     .build();
/// assert_eq!(text, "\x1c2Now: \x13");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuilder {
    text: String,
}

impl TextBuilder {
    pub fn new() -> TextBuilder {
        TextBuilder::default()
    }

    fn control(mut self, code: u8) -> TextBuilder {
        self.text.push(code as char);
        self
    }

    fn control_with(self, code: u8, arg: u8) -> TextBuilder {
        self.control(code).control(arg)
    }

    /// Appends plain text. Escaping happens when the text is written to the sign.
    pub fn push_str(mut self, text: &str) -> TextBuilder {
        self.text.push_str(text);
        self
    }

    pub fn color(self, color: Color) -> TextBuilder {
        self.control_with(SET_COLOR, color.code())
    }

    pub fn font(self, font: Font) -> TextBuilder {
        self.control_with(SET_FONT, font.code())
    }

    pub fn speed(self, speed: Speed) -> TextBuilder {
        self.control(speed.code())
    }

    pub fn char_spacing(self, spacing: CharSpacing) -> TextBuilder {
        self.control_with(SET_CHAR_SPACING, spacing.code())
    }

    pub fn new_line(self) -> TextBuilder {
        self.control(NEW_LINE)
    }

    pub fn new_page(self) -> TextBuilder {
        self.control(NEW_PAGE)
    }

    pub fn no_hold(self) -> TextBuilder {
        self.control(NO_HOLD)
    }

    /// Inserts the current time as kept by the sign.
    pub fn call_time(self) -> TextBuilder {
        self.control(CALL_TIME)
    }

    /// Inserts the contents of a string file.
    ///
    /// # Arguments
    ///
    /// * `label` - The string file label, e.g. `'1'`.
    pub fn call_string(self, label: char) -> TextBuilder {
        self.control(CALL_STRING).push_char(label)
    }

    /// Inserts a small dots picture.
    ///
    /// # Arguments
    ///
    /// * `label` - The picture file label.
    pub fn call_dots(self, label: char) -> TextBuilder {
        self.control(CALL_DOTS).push_char(label)
    }

    fn push_char(mut self, c: char) -> TextBuilder {
        self.text.push(c);
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}
