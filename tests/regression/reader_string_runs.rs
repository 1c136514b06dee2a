// Strings read byte by byte from a reader decode the same as strings read
// in runs from a slice, including multibyte characters and escapes.

use picojson::Value;
use std::io::{BufReader, Read};

struct OneByte<'a>(&'a [u8]);

impl Read for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.0.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[0];
        self.0 = &self.0[1..];
        Ok(1)
    }
}

#[test]
fn test() {
    let json = "[\"plain\", \"aクリス\\n\", \"\\ud840\\udc0b tail\", \"\"]";
    let from_slice: Value = picojson::from_str(json).unwrap();
    let from_reader: Value = picojson::from_reader(OneByte(json.as_bytes())).unwrap();
    let buffered: Value = picojson::from_reader(BufReader::new(json.as_bytes())).unwrap();
    assert_eq!(from_slice, from_reader);
    assert_eq!(from_slice, buffered);
    assert_eq!(from_slice[2], "\u{2000B} tail");
}
