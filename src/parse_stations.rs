use crate::station::{OpenStatus, StationRecord};
use crate::Error;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tracing::{debug, trace};

/// The tags read from the station feed. Any other tag is passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    StationId,
    Lat,
    Long,
    IsOpen,
    BikeStands,
    AvailableBikes,
    LastUpdate,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Field> {
        match tag {
            b"Name" => Some(Field::Name),
            b"StationId" => Some(Field::StationId),
            b"Lat" => Some(Field::Lat),
            b"Long" => Some(Field::Long),
            b"IsOpen" => Some(Field::IsOpen),
            b"BikeStands" => Some(Field::BikeStands),
            b"AvailableBikes" => Some(Field::AvailableBikes),
            b"LastUpdate" => Some(Field::LastUpdate),
            _ => None,
        }
    }

    fn assign(self, record: &mut StationRecord, text: String) {
        match self {
            Field::Name => record.name = text,
            Field::StationId => record.station_id = text,
            Field::Lat => record.latitude = text,
            Field::Long => record.longitude = text,
            Field::IsOpen => record.is_open = OpenStatus::from_raw(&text),
            Field::BikeStands => record.bike_stands = text,
            Field::AvailableBikes => record.available_bikes = text,
            Field::LastUpdate => record.last_update = text,
        }
    }
}

/// Text collected after a recognised start tag, up to the next tag.
struct Capture {
    field: Field,
    text: Option<String>,
}

impl Capture {
    fn push(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match &mut self.text {
            Some(t) => t.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

fn commit(stations: &mut [StationRecord], capture: &mut Option<Capture>) {
    let (field, text) = match capture.take() {
        Some(Capture {
            field,
            text: Some(text),
        }) => (field, text),
        _ => return,
    };
    if let Some(record) = stations.last_mut() {
        field.assign(record, text);
    }
}

/// Reads every station from a feed document, in document order.
///
/// Each `StationId` start tag begins a new record. Fields whose tag is missing
/// for a station keep the "NA" placeholder. A malformed document fails as a
/// whole.
pub fn parse_stations(xml: &str) -> Result<Vec<StationRecord>, Error> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    reader.expand_empty_elements(true).check_end_names(true);

    let mut stations: Vec<StationRecord> = vec![];
    let mut capture: Option<Capture> = None;
    let mut depth: usize = 0;
    let mut opened = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(Error::ParseError(format!(
                    "Malformed station feed at byte {} ({}).",
                    reader.buffer_position(),
                    err
                )))
            }
        };

        match event {
            Event::Start(e) => {
                commit(&mut stations, &mut capture);
                depth += 1;
                opened = true;

                for attr in e.attributes() {
                    let valid = match attr {
                        Ok(attr) => attr.unescape_value().is_ok(),
                        Err(_) => false,
                    };
                    if !valid {
                        return Err(Error::ParseError(format!(
                            "Invalid attribute at byte {}.",
                            reader.buffer_position()
                        )));
                    }
                }

                let field = match Field::from_tag(e.local_name().as_ref()) {
                    Some(field) => field,
                    None => continue,
                };
                if field == Field::StationId {
                    stations.push(StationRecord::default());
                }
                if stations.is_empty() {
                    trace!(?field, "field before the first station, ignored");
                    continue;
                }
                capture = Some(Capture { field, text: None });
            }
            Event::End(_) => {
                commit(&mut stations, &mut capture);
                depth = match depth.checked_sub(1) {
                    Some(depth) => depth,
                    None => {
                        return Err(Error::ParseError(format!(
                            "Unexpected closing tag at byte {}.",
                            reader.buffer_position()
                        )))
                    }
                };
            }
            Event::Text(e) => {
                let text = match e.unescape() {
                    Ok(text) => text,
                    Err(err) => {
                        return Err(Error::ParseError(format!(
                            "Invalid text at byte {} ({}).",
                            reader.buffer_position(),
                            err
                        )))
                    }
                };
                if depth == 0 && !text.trim().is_empty() {
                    return Err(Error::ParseError(format!(
                        "Text outside of any element at byte {}.",
                        reader.buffer_position()
                    )));
                }
                if let Some(capture) = capture.as_mut() {
                    capture.push(&text);
                }
            }
            Event::CData(e) => {
                if depth == 0 {
                    return Err(Error::ParseError(format!(
                        "CDATA outside of any element at byte {}.",
                        reader.buffer_position()
                    )));
                }
                let bytes = e.into_inner();
                let text = match std::str::from_utf8(&bytes) {
                    Ok(text) => text,
                    Err(err) => {
                        return Err(Error::ParseError(format!(
                            "Invalid CDATA at byte {} ({}).",
                            reader.buffer_position(),
                            err
                        )))
                    }
                };
                if let Some(capture) = capture.as_mut() {
                    capture.push(text);
                }
            }
            Event::Eof => {
                if !opened {
                    return Err(Error::ParseError(
                        "Station feed contains no elements.".to_string(),
                    ));
                }
                if depth > 0 {
                    return Err(Error::ParseError(format!(
                        "Station feed ended with {} unclosed element(s).",
                        depth
                    )));
                }
                break;
            }
            _ => {}
        }
    }

    debug!(count = stations.len(), "parsed station feed");
    Ok(stations)
}
