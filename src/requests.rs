//! Builds the `Message` for every sign operation without touching a stream.

use crate::base::{Error, Message, Result};
use crate::cmds::*;
use crate::internals::*;
use crate::text::escape_text;
use crate::types::{DisplayMode, FileDescriptor};
use chrono::{NaiveDate, NaiveTime, Weekday};
use log::trace;

/// Checks that a file label fits in a single printable ASCII byte.
pub fn file_label(label: char) -> Result<u8> {
    if label.is_ascii() && !label.is_ascii_control() {
        Ok(label as u8)
    } else {
        Err(Error::InvalidArgument {
            description: format!("file label {:?} is not printable ASCII", label),
        })
    }
}

fn special(cmd: Command, sub_command: u8, arg: &[u8]) -> Message {
    let mut data = Vec::with_capacity(1 + arg.len());
    data.push(sub_command);
    data.extend_from_slice(arg);
    trace!(
        "Special function {:02X}/{:02X} with argument {:?}",
        cmd.selector(),
        sub_command,
        arg
    );
    Message {
        cmd: cmd.selector(),
        data,
    }
}

/// `label ++ ESC ++ 0x20 ++ mode code ++ escaped text`
pub fn write_text(label: char, mode: DisplayMode, text: &str) -> Result<Message> {
    let mut data = vec![file_label(label)?, ESC, LINE_POSITION_MIDDLE];
    data.extend_from_slice(mode.code());
    data.extend_from_slice(escape_text(text).as_bytes());
    Ok(Message {
        cmd: Command::WriteText.selector(),
        data,
    })
}

/// `label ++ escaped text`
pub fn write_string(label: char, text: &str) -> Result<Message> {
    let mut data = vec![file_label(label)?];
    data.extend_from_slice(escape_text(text).as_bytes());
    Ok(Message {
        cmd: Command::WriteString.selector(),
        data,
    })
}

pub fn set_time(time: NaiveTime) -> Message {
    special(
        Command::WriteSpecial,
        SPECIAL_SET_TIME,
        time.format("%H%M").to_string().as_bytes(),
    )
}

/// The day goes on the wire as one ASCII digit from the sign's table: `'1'` (Sunday) to `'7'` (Saturday).
pub fn set_weekday(day: Weekday) -> Message {
    special(
        Command::WriteSpecial,
        SPECIAL_SET_WEEKDAY,
        &[b'1' + day.num_days_from_sunday() as u8],
    )
}

pub fn set_date(date: NaiveDate) -> Message {
    special(
        Command::WriteSpecial,
        SPECIAL_SET_DATE,
        date.format("%m%d%y").to_string().as_bytes(),
    )
}

pub fn set_time_format(use_am_pm: bool) -> Message {
    let arg: &[u8] = if use_am_pm { b"S" } else { b"M" };
    special(Command::WriteSpecial, SPECIAL_TIME_FORMAT, arg)
}

pub fn sound(enabled: bool) -> Message {
    let arg: &[u8] = if enabled { b"FF" } else { b"00" };
    special(Command::WriteSpecial, SPECIAL_SPEAKER, arg)
}

pub fn soft_reset() -> Message {
    special(Command::WriteSpecial, SPECIAL_SOFT_RESET, &[])
}

/// The descriptors of the default layout: text files `A`..=`E`, string files `1`..=`10`.
pub fn default_memory_map() -> Vec<FileDescriptor> {
    let text_files = (0..SIGN_DEFAULT_TEXT_FILES)
        .map(|i| FileDescriptor::text((b'A' + i) as char, SIGN_DEFAULT_TEXT_FILE_SIZE));
    let string_files = (1..=SIGN_DEFAULT_STRING_FILES)
        .map(|i| FileDescriptor::string(i, SIGN_DEFAULT_STRING_FILE_SIZE));
    text_files.chain(string_files).collect()
}

/// Memory configuration for an arbitrary list of file slots.
pub fn set_memory_map_with(files: &[FileDescriptor]) -> Message {
    let mut layout = Vec::new();
    for file in files {
        file.write_into(&mut layout);
    }
    special(Command::WriteSpecial, SPECIAL_MEMORY_CONFIG, &layout)
}

pub fn set_memory_map() -> Message {
    set_memory_map_with(&default_memory_map())
}

pub fn read_error_register() -> Message {
    special(Command::ReadSpecial, SPECIAL_ERROR_REGISTER, &[])
}

pub fn read_memory_size() -> Message {
    special(Command::ReadSpecial, SPECIAL_MEMORY_SIZE, &[])
}
