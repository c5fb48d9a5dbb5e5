//! JSON body encoding.
//!
//! Bodies use the spacing of a stock Python `json.dumps`: `", "` between
//! items, `": "` after keys, and non-ASCII (plus DEL) escaped as `\uXXXX`.
//! Existing callers compare bodies byte for byte, so compact `serde_json`
//! output is not a drop-in replacement.
//!
//! Numbers are written with the digits the upstream sent; they are never
//! reparsed into `f64`, so wide integers and long decimals survive.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Encode `value` as a response body.
pub fn encode(value: &Value) -> String {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    match value.serialize(&mut ser) {
        // Output is pure ASCII.
        Ok(()) => String::from_utf8(buf).unwrap_or_default(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response body");
            String::from("null")
        }
    }
}
