//! Channel extraction from a saved channel-selector element
//!
//! The input is the `<select>` element saved from the browser's inspector.
//! Every `<option>` carries the channel key in its `value` attribute and the
//! display name as its text. Options are read in document order:
//! - `value=""` is a placeholder and is skipped silently
//! - a missing `value` is reported on stderr with the option's attributes, then skipped
//! - anything else yields a [`ChannelEntry`]
//!
//! Whitespace in the name is collapsed the way a browser renders it, so text
//! wrapped across lines comes out as a single line.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use thiserror::Error;
use tracing::{debug, warn};

const OPTION_TAG: &[u8] = b"option";
const VALUE_ATTR: &[u8] = b"value";

/// A selectable channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// URI-safe channel key, used in stream URLs and per-channel filenames
    pub key: String,
    /// Display name, trimmed with inner whitespace collapsed
    pub name: String,
}

impl ChannelEntry {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed channel document: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// An `<option>` whose end tag has not been reached yet
#[derive(Debug)]
struct OpenOption {
    value: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    /// Nesting depth of child elements inside the option
    depth: usize,
}

/// One-pass iterator over the channels of a selector document
///
/// A document error is yielded once and ends the iteration. Restarting
/// requires a new source over the same text.
pub struct ChannelSource<'a> {
    reader: Reader<&'a [u8]>,
    open: Option<OpenOption>,
    malformed: usize,
    finished: bool,
}

impl<'a> ChannelSource<'a> {
    pub fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
            open: None,
            malformed: 0,
            finished: false,
        }
    }

    /// Number of options skipped so far for lacking a `value` attribute
    pub fn malformed(&self) -> usize {
        self.malformed
    }

    fn open_option(&self, start: &BytesStart<'_>) -> Result<OpenOption, quick_xml::Error> {
        let mut value = None;
        let mut attributes = Vec::new();

        // Browser exports may contain bare HTML attributes such as `selected`
        for attr in start.html_attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let val = attr
                .decode_and_unescape_value(self.reader.decoder())?
                .into_owned();
            if attr.key.as_ref() == VALUE_ATTR {
                value = Some(val.clone());
            }
            attributes.push((key, val));
        }

        Ok(OpenOption {
            value,
            attributes,
            text: String::new(),
            depth: 0,
        })
    }

    fn close_option(&mut self, option: OpenOption) -> Option<ChannelEntry> {
        match option.value {
            Some(key) if key.is_empty() => None,
            Some(key) => {
                let name = option.text.split_whitespace().collect::<Vec<_>>().join(" ");
                Some(ChannelEntry::new(key, name))
            }
            None => {
                self.malformed += 1;
                let attrs = option
                    .attributes
                    .iter()
                    .map(|(k, v)| format!("{}='{}'", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                warn!("Ignoring bad <option> tag, with attrs: {}", attrs);
                None
            }
        }
    }

    fn next_entry(&mut self) -> Result<Option<ChannelEntry>, quick_xml::Error> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    if let Some(open) = self.open.as_mut() {
                        open.depth += 1;
                    } else if e.local_name().as_ref() == OPTION_TAG {
                        let option = self.open_option(&e)?;
                        self.open = Some(option);
                    }
                }
                Event::Empty(e) => {
                    if self.open.is_none() && e.local_name().as_ref() == OPTION_TAG {
                        let option = self.open_option(&e)?;
                        if let Some(entry) = self.close_option(option) {
                            return Ok(Some(entry));
                        }
                    }
                }
                Event::End(_) => {
                    let Some(open) = self.open.as_mut() else {
                        continue;
                    };
                    if open.depth > 0 {
                        open.depth -= 1;
                        continue;
                    }
                    let entry = self.open.take().and_then(|option| self.close_option(option));
                    if entry.is_some() {
                        return Ok(entry);
                    }
                }
                Event::Text(t) => {
                    if let Some(open) = self.open.as_mut().filter(|o| o.depth == 0) {
                        open.text.push_str(&t.decode().map_err(quick_xml::Error::from)?);
                    }
                }
                Event::CData(c) => {
                    if let Some(open) = self.open.as_mut().filter(|o| o.depth == 0) {
                        open.text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Event::GeneralRef(r) => {
                    if let Some(open) = self.open.as_mut().filter(|o| o.depth == 0) {
                        push_reference(&mut open.text, &r)?;
                    }
                }
                Event::Eof => {
                    if let Some(open) = self.open.take() {
                        debug!("Document ended inside an <option> tag: {:?}", open.value);
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

/// Append the text an entity or character reference stands for
///
/// Unknown named entities (HTML's `&nbsp;` and friends) are kept literally.
fn push_reference(text: &mut String, reference: &BytesRef<'_>) -> Result<(), quick_xml::Error> {
    if let Some(ch) = reference.resolve_char_ref()? {
        text.push(ch);
        return Ok(());
    }

    let name = reference.decode().map_err(quick_xml::Error::from)?;
    match resolve_predefined_entity(&name) {
        Some(resolved) => text.push_str(resolved),
        None => {
            text.push('&');
            text.push_str(&name);
            text.push(';');
        }
    }
    Ok(())
}

impl Iterator for ChannelSource<'_> {
    type Item = Result<ChannelEntry, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}
