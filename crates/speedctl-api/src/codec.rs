// GetParameterValues envelope codec
//
// Builds the fixed SOAP request envelope and walks the response with a
// streaming reader. Element names are matched on their local part, so the
// device's `SOAP-ENV:` / `u:` prefixes don't matter.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::Error;
use crate::param::{ParameterPath, ParameterRow, ParameterValue};

/// Ancestry every `ParameterValueStruct` must sit under.
const RESPONSE_SHAPE: [&str; 4] = [
    "Envelope",
    "Body",
    "GetParameterValuesResponse",
    "ParameterList",
];

const STRUCT: &str = "ParameterValueStruct";

/// Encode a `GetParameterValues` request for `paths`, order preserved.
pub fn encode_request(paths: &[ParameterPath]) -> String {
    let names: String = paths
        .iter()
        .map(|p| format!("<xsd:string>{}</xsd:string>", escape(p.as_str())))
        .collect();

    format!(
        "<soap-env:Envelope \
         xmlns:soap-env=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:cwmp=\"urn:telekom-de.totr64-2-n\">\
         <soap-env:Body>\
         <cwmp:GetParameterValues xmlns:cwmp=\"urn:dslforum-org:cwmp-1-0\">\
         <cwmp:ParameterNames length=\"{len}\">{names}</cwmp:ParameterNames>\
         </cwmp:GetParameterValues>\
         </soap-env:Body>\
         </soap-env:Envelope>",
        len = paths.len(),
    )
}

/// Extract the requested paths from a request envelope.
///
/// The inverse of [`encode_request`] on path identity. Device simulators
/// in tests use it to echo back what was asked for.
pub fn decode_request(body: &str) -> Result<Vec<ParameterPath>, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut paths = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(local_name(&e)),
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                let in_names = stack.len() >= 2
                    && stack[stack.len() - 2] == "ParameterNames"
                    && stack[stack.len() - 1] == "string";
                if in_names {
                    let text = t.unescape().map_err(xml_error)?;
                    paths.push(ParameterPath::new(text.into_owned()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    Ok(paths)
}

// ── Response decoding ───────────────────────────────────────────────

#[derive(Default)]
struct PendingStruct {
    name: Option<String>,
    value: Option<String>,
}

/// Decode a `GetParameterValuesResponse` into `(path, value)` rows in
/// document order.
///
/// Fails with [`Error::Protocol`] when the envelope shape is missing or
/// the XML is malformed. A present but empty `ParameterList` decodes to
/// an empty sequence.
pub fn decode_response(body: &str) -> Result<Vec<ParameterRow>, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    let mut saw_list = false;
    let mut pending: Option<PendingStruct> = None;
    let mut fault: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = local_name(&e);
                if name == RESPONSE_SHAPE[3] && stack == RESPONSE_SHAPE[..3] {
                    saw_list = true;
                }
                if name == STRUCT && stack == RESPONSE_SHAPE {
                    pending = Some(PendingStruct::default());
                }
                stack.push(name);
            }
            Ok(Event::Empty(e)) => {
                // `<Value/>` leaves `value` unset, which decodes as Absent.
                let name = local_name(&e);
                if name == RESPONSE_SHAPE[3] && stack == RESPONSE_SHAPE[..3] {
                    saw_list = true;
                }
            }
            Ok(Event::End(_)) => {
                let closed = stack.pop();
                if closed.as_deref() == Some(STRUCT) && stack == RESPONSE_SHAPE {
                    if let Some(done) = pending.take() {
                        rows.push(finish_struct(done)?);
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let text = t.unescape().map_err(xml_error)?;
                collect_text(&stack, &mut pending, &mut fault, &text);
            }
            Ok(Event::CData(c)) => {
                let text = String::from_utf8_lossy(&c).into_owned();
                collect_text(&stack, &mut pending, &mut fault, &text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    if !saw_list {
        return Err(match fault {
            Some(reason) => Error::protocol(format!("device returned SOAP fault: {reason}")),
            None => Error::protocol(
                "response lacks Envelope/Body/GetParameterValuesResponse/ParameterList",
            ),
        });
    }

    Ok(rows)
}

fn collect_text(
    stack: &[String],
    pending: &mut Option<PendingStruct>,
    fault: &mut Option<String>,
    text: &str,
) {
    let Some(top) = stack.last() else { return };

    if top == "faultstring" {
        fault.get_or_insert_with(String::new).push_str(text);
        return;
    }

    let Some(current) = pending.as_mut() else {
        return;
    };
    // Only direct children of the struct carry data.
    if stack.len() != RESPONSE_SHAPE.len() + 2 {
        return;
    }
    match top.as_str() {
        "Name" => current.name.get_or_insert_with(String::new).push_str(text),
        "Value" => current.value.get_or_insert_with(String::new).push_str(text),
        _ => {}
    }
}

fn finish_struct(done: PendingStruct) -> Result<ParameterRow, Error> {
    let name = done
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::protocol("ParameterValueStruct without Name"))?;
    let value = done.value.map_or(ParameterValue::Absent, ParameterValue::Text);
    Ok((ParameterPath::new(name), value))
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::protocol(format!("malformed XML: {e}"))
}
