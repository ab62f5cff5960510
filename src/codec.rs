use bytes::{BufMut, BytesMut};
use std::io;
use tokio_util::codec::Encoder;

use crate::ProductRow;

/// Encodes rows in PostgreSQL's COPY text format: tab-separated columns,
/// newline-terminated rows, backslash escapes for the special bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyTextEncoder;

impl CopyTextEncoder {
    pub fn new() -> Self {
        Self
    }

    fn put_field(field: &str, dst: &mut BytesMut) {
        let bytes = field.as_bytes();
        // Fast path: most generated text needs no escaping
        if !bytes.iter().any(|b| matches!(b, b'\\' | b'\t' | b'\n' | b'\r')) {
            dst.put_slice(bytes);
            return;
        }
        for &b in bytes {
            match b {
                b'\\' => dst.put_slice(b"\\\\"),
                b'\t' => dst.put_slice(b"\\t"),
                b'\n' => dst.put_slice(b"\\n"),
                b'\r' => dst.put_slice(b"\\r"),
                _ => dst.put_u8(b),
            }
        }
    }
}

impl<'a> Encoder<&'a ProductRow> for CopyTextEncoder {
    type Error = io::Error;

    fn encode(&mut self, row: &'a ProductRow, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let fields = row.fields();
        dst.reserve(fields.iter().map(|f| f.len() + 1).sum());
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                dst.put_u8(b'\t');
            }
            Self::put_field(field, dst);
        }
        dst.put_u8(b'\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, description: &str, price: &str) -> ProductRow {
        ProductRow {
            name: name.into(),
            description: description.into(),
            price: price.into(),
        }
    }

    #[test]
    fn plain_row_is_tab_separated() {
        let mut buf = BytesMut::new();
        CopyTextEncoder::new()
            .encode(&row("Sleek Steel Lamp", "A lamp", "19.99"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"Sleek Steel Lamp\tA lamp\t19.99\n");
    }

    #[test]
    fn special_bytes_are_escaped() {
        let mut buf = BytesMut::new();
        CopyTextEncoder::new()
            .encode(&row("a\\b", "line\nbreak\ttab\r", "1.00"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"a\\\\b\tline\\nbreak\\ttab\\r\t1.00\n");
    }

    #[test]
    fn rows_append_to_buffer() {
        let mut enc = CopyTextEncoder::new();
        let mut buf = BytesMut::new();
        enc.encode(&row("a", "b", "1.00"), &mut buf).unwrap();
        enc.encode(&row("c", "d", "2.00"), &mut buf).unwrap();
        assert_eq!(&buf[..], b"a\tb\t1.00\nc\td\t2.00\n");
    }
}
