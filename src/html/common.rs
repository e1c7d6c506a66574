use quick_xml::{Reader, Writer};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Lenient reader: HTML void elements, unclosed tags and bare `&` in
/// text are not errors.
#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    let config = reader.config_mut();
    config.trim_text(false);
    config.enable_all_checks(false);
    config.allow_dangling_amp = true;
    reader
}

#[inline]
pub fn create_xml_writer(capacity: usize) -> XmlWriter {
    Writer::new(Cursor::new(Vec::with_capacity(capacity)))
}

/// Case-insensitive tag name match (`<HTML>` and `<html>` alike).
#[inline]
pub fn is_tag(name: &[u8], tag: &[u8]) -> bool {
    name.eq_ignore_ascii_case(tag)
}
