//! Server-sent event framing of change events.

use bytes::Bytes;
use sample_store::{ChangeEvent, ChangeKind, Sample};
use serde::Serialize;

use crate::Result;

#[derive(Serialize)]
struct ChangeMessage<'a> {
    #[serde(rename = "type")]
    kind: ChangeKind,
    data: &'a Sample,
}

/// One encoded `data: <json>\n\n` record.
///
/// Cloning is cheap; every subscriber of a broadcast shares the same buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Bytes);

impl Frame {
    /// Encodes a change event as `data: {"type": ..., "data": <row>}\n\n`.
    ///
    /// Returns None when the event carries no affected row.
    pub fn encode(event: &ChangeEvent) -> Result<Option<Self>> {
        let Some(row) = event.affected_row() else {
            return Ok(None);
        };

        let json = serde_json::to_string(&ChangeMessage {
            kind: event.kind,
            data: row,
        })?;
        Ok(Some(Self(Bytes::from(format!("data: {json}\n\n")))))
    }

    /// Returns the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the frame, returning its buffer.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_store::{Decimal, NewSample, SampleId};

    fn row() -> Sample {
        NewSample::new(
            "PLA",
            "Compost",
            10,
            Decimal::new(1520, 2),
            Decimal::new(2500, 2),
            Decimal::new(6000, 2),
        )
        .with_id(SampleId::new(1))
    }

    #[test]
    fn encodes_sse_data_record() {
        let frame = Frame::encode(&ChangeEvent::inserted(row()))
            .unwrap()
            .unwrap();
        let text = std::str::from_utf8(frame.as_bytes()).unwrap();

        assert!(text.starts_with("data: "));
        assert!(text.ends_with("\n\n"));

        let json: serde_json::Value =
            serde_json::from_str(text.trim_start_matches("data: ").trim_end()).unwrap();
        assert_eq!(json["type"], "INSERT");
        assert_eq!(json["data"]["sample_id"], 1);
        assert_eq!(json["data"]["material_type"], "PLA");
        assert_eq!(json["data"]["degradation_pct"].as_f64(), Some(15.2));
    }

    #[test]
    fn delete_frames_carry_the_old_row() {
        let frame = Frame::encode(&ChangeEvent::deleted(row()))
            .unwrap()
            .unwrap();
        let text = std::str::from_utf8(frame.as_bytes()).unwrap();
        assert!(text.contains(r#""type":"DELETE""#));
        assert!(text.contains(r#""environment":"Compost""#));
    }

    #[test]
    fn events_without_a_row_are_not_encoded() {
        let event = ChangeEvent {
            kind: ChangeKind::Update,
            new: None,
            old: Some(row()),
        };
        assert!(Frame::encode(&event).unwrap().is_none());
    }
}
