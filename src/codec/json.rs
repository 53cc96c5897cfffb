use std::io::{Read, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{CodecError, DecodedRecords, JobRecord};
use crate::job::Job;

/// Write jobs as a tab-indented JSON array
pub fn encode<W: Write>(jobs: &[Job], mut writer: W) -> Result<(), CodecError> {
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    jobs.serialize(&mut serializer)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Read a JSON array of jobs. A document that is not an array fails as a
/// whole; an element that is not a valid job only fails its own slot.
pub fn decode<R: Read>(reader: R) -> Result<DecodedRecords, CodecError> {
    let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value::<JobRecord>(value).map_err(CodecError::from))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::fixtures;
    use crate::job::JobStatus;

    fn encoded(jobs: &[Job]) -> String {
        let mut buffer = Vec::new();
        encode(jobs, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn writes_fixed_date_patterns_and_nulls() {
        let text = encoded(&fixtures::jobs());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["applied_at"], "2024-01-10");
        assert_eq!(value[0]["created_at"], "2024-01-10 09:15:00");
        assert_eq!(value[0]["salary_range"], serde_json::Value::Null);
        assert_eq!(value[1]["status"], "Rejected Offer");
        assert_eq!(value[1]["id"], 2);
        assert!(text.contains("\n\t{"));
    }

    #[test]
    fn decoding_the_export_gives_back_the_jobs() {
        let jobs = fixtures::jobs();
        let records: Vec<JobRecord> = decode(encoded(&jobs).as_bytes())
            .unwrap()
            .into_iter()
            .map(Result::unwrap)
            .collect();

        let expected: Vec<JobRecord> = jobs.iter().map(JobRecord::from).collect();
        assert_eq!(records, expected);
    }

    #[test]
    fn missing_optional_keys_default_to_absent() {
        let body = r#"[{"company": "Acme", "position": "Engineer", "location": ""}]"#;
        let record = decode(body.as_bytes()).unwrap().remove(0).unwrap();

        assert_eq!(record.status, JobStatus::Applied);
        assert_eq!(record.location, None);
        assert_eq!(record.applied_at, None);
        assert_eq!(record.created_at, None);
    }

    #[test]
    fn a_bad_element_only_fails_its_own_slot() {
        let body = r#"[
            {"company": "Acme", "position": "Engineer", "status": "pending"},
            {"company": "Globex", "position": "SRE", "applied_at": "01/02/2024"},
            {"company": "Initech", "position": "Analyst", "status": "offer"}
        ]"#;
        let records = decode(body.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_err());
        assert!(records[1].is_err());
        assert_eq!(records[2].as_ref().unwrap().status, JobStatus::Offer);
    }

    #[test]
    fn a_document_that_is_not_an_array_fails() {
        assert!(matches!(
            decode(r#"{"company": "Acme"}"#.as_bytes()),
            Err(CodecError::Json(_))
        ));
    }
}
