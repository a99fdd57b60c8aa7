//! Flat XML decoder for payment notifications.
//!
//! Notifications arrive as `<xml><field>value</field>...</xml>`. The decoder walks the
//! token stream once and records the trimmed text of every element under its local name.
//! It is deliberately not a general XML mapper:
//!
//! - Nesting is flattened; a repeated name keeps the last value seen.
//! - The `xml` wrapper never becomes a key.
//! - Decoding stops at the wrapper's end tag; anything after it is ignored.
//! - Empty input, or input that ends with every element closed, decodes successfully.

use quick_xml::{Reader, events::Event};

use crate::types::CallbackPayload;

/// Local name of the wrapper element around a notification.
pub const ROOT_TAG: &str = "xml";

/// Why a notification body could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeFault {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("unexpected end of input with {open} unclosed element(s)")]
    UnexpectedEof { open: usize },

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// A decode failure, carrying whatever was decoded before the fault.
///
/// Callers must treat any `DecodeError` as a rejection; `partial` is for diagnostics only.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode callback XML: {fault}")]
pub struct DecodeError {
    pub partial: CallbackPayload,
    #[source]
    pub fault: DecodeFault,
}

impl DecodeError {
    fn new(partial: CallbackPayload, fault: impl Into<DecodeFault>) -> Self {
        let err = DecodeError {
            partial,
            fault: fault.into(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Callback XML parse failed: {}", err.fault);

        err
    }
}

/// Decode a raw notification body. Non UTF-8 input is a decode failure.
pub fn decode_bytes(xml: &[u8]) -> Result<CallbackPayload, DecodeError> {
    let text =
        std::str::from_utf8(xml).map_err(|err| DecodeError::new(CallbackPayload::new(), err))?;
    decode(text)
}

/// Decode a notification body into a flat [`CallbackPayload`].
pub fn decode(xml: &str) -> Result<CallbackPayload, DecodeError> {
    let mut reader = Reader::from_str(xml);
    let mut result = CallbackPayload::new();
    let mut key = String::new();
    let mut open = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => return Err(DecodeError::new(result, err)),
        };

        match event {
            Event::Start(start) => {
                open += 1;
                let name = start.local_name();
                let name = match std::str::from_utf8(name.as_ref()) {
                    Ok(name) => name,
                    Err(err) => return Err(DecodeError::new(result, err)),
                };
                if name != ROOT_TAG {
                    key = name.to_owned();
                }
            }
            Event::Empty(empty) => {
                let name = empty.local_name();
                let name = match std::str::from_utf8(name.as_ref()) {
                    Ok(name) => name,
                    Err(err) => return Err(DecodeError::new(result, err)),
                };
                // `<xml/>` opens and closes the wrapper in one token.
                if name == ROOT_TAG {
                    return Ok(result);
                }
                key = name.to_owned();
            }
            Event::End(end) => {
                if end.local_name().as_ref() == ROOT_TAG.as_bytes() {
                    return Ok(result);
                }
                open = open.saturating_sub(1);
            }
            Event::Text(text) => {
                let text = match text.unescape() {
                    Ok(text) => text,
                    Err(err) => return Err(DecodeError::new(result, err)),
                };
                store(&mut result, &key, &text);
            }
            Event::CData(cdata) => {
                let text = match std::str::from_utf8(&cdata) {
                    Ok(text) => text,
                    Err(err) => return Err(DecodeError::new(result, err)),
                };
                store(&mut result, &key, text);
            }
            Event::Eof => {
                if open > 0 {
                    return Err(DecodeError::new(result, DecodeFault::UnexpectedEof { open }));
                }
                return Ok(result);
            }
            _ => {}
        }
    }
}

fn store(result: &mut CallbackPayload, key: &str, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        result.insert(key, trimmed);
    }
}
