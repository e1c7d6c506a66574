//! Injection of Open Graph markup into an existing HTML document.
//!
//! ```text
//! <html lang="en">          ──► <html lang="en" prefix="og: http://ogp.me/ns#">
//!   <head>...</head>        ──►   <head>...<meta property="og:..." />...</head>
//! ```
//!
//! Everything else is streamed through untouched.

mod common;

use crate::{log, render::Render};
use anyhow::Result;
use common::{XmlWriter, create_xml_reader, create_xml_writer, is_tag};
use quick_xml::events::{BytesStart, Event};
use std::io::Write;

/// Decorate the root element and write the meta tags before `</head>`.
///
/// Only the first `<html>` and the first `</head>` are touched. A document
/// without a `<head>` keeps everything but the root decoration.
pub fn inject(content: &[u8], render: &mut Render<'_>) -> Result<Vec<u8>> {
    let mut writer = create_xml_writer(content.len() + 1024);
    let mut reader = create_xml_reader(content);
    let mut head_written = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(elem)) if is_tag(elem.name().as_ref(), b"html") => {
                write_html_with_namespace(&elem, &mut writer, render)?;
            }
            Ok(Event::End(elem)) if !head_written && is_tag(elem.name().as_ref(), b"head") => {
                writer.get_mut().write_all(render.meta_tags().as_bytes())?;
                writer.write_event(Event::End(elem))?;
                head_written = true;
            }
            Ok(Event::Eof) => break,
            Ok(event) => writer.write_event(event)?,
            Err(e) => anyhow::bail!(
                "HTML parse error at position {}: {:?}",
                reader.error_position(),
                e
            ),
        }
    }

    if !head_written {
        log!("inject"; "no </head> found, meta tags not written");
    }

    Ok(writer.into_inner().into_inner())
}

/// Write `<html>` with the namespace declarations merged into its attributes.
fn write_html_with_namespace(
    elem: &BytesStart<'_>,
    writer: &mut XmlWriter,
    render: &mut Render<'_>,
) -> Result<()> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let attrs = String::from_utf8_lossy(elem.attributes_raw());
    let merged = render.language_attributes(attrs.trim());

    let content = if merged.is_empty() {
        name.clone()
    } else {
        format!("{name} {merged}")
    };
    writer.write_event(Event::Start(BytesStart::from_content(content, name.len())))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
