//! MARCXML Generation
//!
//! キューエントリ・エクスポートオブジェクトから MARC21 slim 形式のXMLを生成

use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;

use crate::domain::entities::export_object::{EntryType, ExportObject};
use crate::domain::entities::queue_entry::QueueEntry;
use crate::domain::services::change_collapse::ChangeCollapseService;

pub const MARC21_NAMESPACE: &str = "http://www.loc.gov/MARC21/slim";

/// Characters allowed in an XML 1.0 document
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Escape the five XML special characters and drop characters XML 1.0 forbids
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Identifier written to 001 / 970 for an object
pub fn record_id(entry_type: EntryType, object_id: &str) -> String {
    format!("INDICO.{}.{}", entry_type, object_id)
}

fn format_dt(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Appends `<record>` elements to an in-memory buffer
struct RecordWriter {
    buf: String,
}

impl RecordWriter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn begin(&mut self) {
        self.buf.push_str("  <record>\n");
    }

    fn end(&mut self) {
        self.buf.push_str("  </record>\n");
    }

    fn controlfield(&mut self, tag: &str, value: &str) {
        self.buf.push_str(&format!(
            "    <controlfield tag=\"{}\">{}</controlfield>\n",
            tag,
            escape_xml(value)
        ));
    }

    /// Subfields with empty values are dropped; a field without subfields is not written
    fn datafield(&mut self, tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) {
        let present: Vec<&(char, &str)> = subfields
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        if present.is_empty() {
            return;
        }

        self.buf.push_str(&format!(
            "    <datafield tag=\"{}\" ind1=\"{}\" ind2=\"{}\">\n",
            tag, ind1, ind2
        ));
        for (code, value) in present {
            self.buf.push_str(&format!(
                "      <subfield code=\"{}\">{}</subfield>\n",
                code,
                escape_xml(value)
            ));
        }
        self.buf.push_str("    </datafield>\n");
    }

    fn finish(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<collection xmlns=\"{}\">\n{}</collection>\n",
            MARC21_NAMESPACE, self.buf
        )
    }
}

/// MARCXML ジェネレータ
pub struct MarcXmlGenerator;

impl MarcXmlGenerator {
    /// キューエントリのバッチをXMLに変換
    ///
    /// 同一オブジェクトへの変更は1件にまとめる。出力するレコードが無ければ `None`
    pub fn records_to_xml(entries: &[QueueEntry]) -> Option<String> {
        let mut writer = RecordWriter::new();
        let mut count = 0;

        for entry in ChangeCollapseService::collapse(entries) {
            if entry.is_deletion() {
                Self::write_deleted(&mut writer, entry.entry_type, &entry.object_id);
            } else if let Some(object) = &entry.object {
                Self::write_object(&mut writer, object);
            } else {
                warn!("Skipping {}: no snapshot to export", entry);
                continue;
            }
            count += 1;
        }

        if count == 0 {
            None
        } else {
            Some(writer.finish())
        }
    }

    /// エクスポートオブジェクトのバッチをXMLに変換（空なら `None`）
    pub fn objects_to_xml(objects: &[ExportObject]) -> Option<String> {
        if objects.is_empty() {
            return None;
        }

        let mut writer = RecordWriter::new();
        for object in objects {
            Self::write_object(&mut writer, object);
        }
        Some(writer.finish())
    }

    fn write_deleted(writer: &mut RecordWriter, entry_type: EntryType, object_id: &str) {
        let id = record_id(entry_type, object_id);
        writer.begin();
        writer.controlfield("001", &id);
        writer.datafield("970", ' ', ' ', &[('a', id.as_str())]);
        writer.datafield("980", ' ', ' ', &[('c', "DELETED")]);
        writer.end();
    }

    fn write_object(writer: &mut RecordWriter, object: &ExportObject) {
        let id = record_id(object.entry_type, &object.id);
        let start = object.start_dt.as_ref().map(format_dt).unwrap_or_default();
        let end = object.end_dt.as_ref().map(format_dt).unwrap_or_default();

        writer.begin();
        writer.controlfield("001", &id);
        writer.datafield("245", ' ', ' ', &[('a', object.title.as_str())]);
        writer.datafield(
            "520",
            ' ',
            ' ',
            &[('a', object.description.as_deref().unwrap_or_default())],
        );
        writer.datafield(
            "518",
            ' ',
            ' ',
            &[
                ('d', start.as_str()),
                ('h', end.as_str()),
                ('r', object.location.as_deref().unwrap_or_default()),
                ('g', object.room.as_deref().unwrap_or_default()),
            ],
        );
        for person in &object.persons {
            writer.datafield(
                "700",
                ' ',
                ' ',
                &[
                    ('a', person.name.as_str()),
                    ('u', person.affiliation.as_deref().unwrap_or_default()),
                ],
            );
        }
        for keyword in &object.keywords {
            writer.datafield("653", '1', ' ', &[('a', keyword.as_str())]);
        }
        if !object.category_path.is_empty() {
            let path = object.category_path.join(" / ");
            writer.datafield("650", '2', '7', &[('a', path.as_str())]);
        }
        writer.datafield(
            "856",
            '4',
            ' ',
            &[('u', object.url.as_deref().unwrap_or_default())],
        );
        writer.datafield("970", ' ', ' ', &[('a', id.as_str())]);
        let collection = object.entry_type.as_str().to_uppercase();
        writer.datafield("980", ' ', ' ', &[('a', collection.as_str())]);
        writer.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::export_object::Person;
    use crate::domain::entities::queue_entry::ChangeType;
    use chrono::TimeZone;

    fn create_test_object(id: &str) -> ExportObject {
        let mut object =
            ExportObject::new(id.to_string(), EntryType::Event, "Physics & <Friends>".to_string())
                .unwrap();
        object.start_dt = Some(Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap());
        object.persons = vec![Person {
            name: "Ada Lovelace".to_string(),
            affiliation: None,
        }];
        object.keywords = vec!["math".to_string()];
        object
    }

    fn create_test_entry(id: u64, change: ChangeType, object: Option<ExportObject>) -> QueueEntry {
        QueueEntry::new(
            id,
            change,
            EntryType::Event,
            "42".to_string(),
            Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, id as u32).unwrap(),
            object,
        )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"a & b < c > "d" 'e'"#),
            "a &amp; b &lt; c &gt; &quot;d&quot; &apos;e&apos;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_xml_drops_forbidden_characters() {
        assert_eq!(escape_xml("a\u{0}b\u{8}c\u{B}d\u{1F}e\u{FFFE}"), "abcde");
        assert_eq!(escape_xml("tab\tnl\ncr\r"), "tab\tnl\ncr\r");
        assert_eq!(escape_xml("caf\u{E9} \u{1F600}"), "caf\u{E9} \u{1F600}");
    }

    #[test]
    fn test_objects_to_xml_strips_control_characters() {
        let object = ExportObject::new(
            "7".to_string(),
            EntryType::Event,
            "Broken\u{1}Title\u{B}".to_string(),
        )
        .unwrap();

        let xml = MarcXmlGenerator::objects_to_xml(&[object]).unwrap();

        assert!(xml.contains("BrokenTitle"));
        assert!(!xml.chars().any(|c| c == '\u{1}' || c == '\u{B}'));
    }

    #[test]
    fn test_objects_to_xml_empty() {
        assert!(MarcXmlGenerator::objects_to_xml(&[]).is_none());
    }

    #[test]
    fn test_objects_to_xml_renders_fields() {
        let xml = MarcXmlGenerator::objects_to_xml(&[create_test_object("42")]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(MARC21_NAMESPACE));
        assert!(xml.contains("<controlfield tag=\"001\">INDICO.event.42</controlfield>"));
        assert!(xml.contains("Physics &amp; &lt;Friends&gt;"));
        assert!(xml.contains("<subfield code=\"d\">2024-12-25T10:00:00Z</subfield>"));
        assert!(xml.contains("<subfield code=\"a\">Ada Lovelace</subfield>"));
        assert!(xml.contains("<subfield code=\"a\">EVENT</subfield>"));
        // 値の無いフィールドは出力しない
        assert!(!xml.contains("tag=\"520\""));
        assert!(!xml.contains("tag=\"856\""));
        assert!(!xml.contains("code=\"u\""));
    }

    #[test]
    fn test_objects_to_xml_one_record_per_object() {
        let objects = vec![create_test_object("1"), create_test_object("2")];

        let xml = MarcXmlGenerator::objects_to_xml(&objects).unwrap();

        assert_eq!(xml.matches("<record>").count(), 2);
    }

    #[test]
    fn test_records_to_xml_deleted() {
        let entries = vec![create_test_entry(1, ChangeType::Deleted, None)];

        let xml = MarcXmlGenerator::records_to_xml(&entries).unwrap();

        assert!(xml.contains("<subfield code=\"c\">DELETED</subfield>"));
        assert!(!xml.contains("tag=\"245\""));
    }

    #[test]
    fn test_records_to_xml_collapses_changes() {
        let entries = vec![
            create_test_entry(1, ChangeType::Created, Some(create_test_object("42"))),
            create_test_entry(2, ChangeType::TitleChanged, Some(create_test_object("42"))),
        ];

        let xml = MarcXmlGenerator::records_to_xml(&entries).unwrap();

        assert_eq!(xml.matches("<record>").count(), 1);
    }

    #[test]
    fn test_records_to_xml_nothing_to_export() {
        let entries = vec![create_test_entry(1, ChangeType::DataChanged, None)];
        assert!(MarcXmlGenerator::records_to_xml(&entries).is_none());
        assert!(MarcXmlGenerator::records_to_xml(&[]).is_none());
    }
}
