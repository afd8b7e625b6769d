//! Saw cut-list (`.tiger`) generator.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::TigerSettings;
use crate::error::Result;
use crate::model::CutListRecord;
use crate::transform::WidthFile;

/// Namespaces declared on the root element.
const NAMESPACES: [(&str, &str); 2] = [
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xmlns:xsd", "http://www.w3.org/2001/XMLSchema"),
];

/// Label columns printed for every piece.
const LABEL_HEADERS: &[&str] = &["Index", "Part", "No"];

/// Extra label column printed when notes are used.
const NOTE_HEADER: &str = "Note";

type XmlWriter = Writer<Vec<u8>>;

/// Generate the XML cut list for one width file.
pub fn generate_tiger(
    width_file: &WidthFile,
    settings: &TigerSettings,
    use_extra_data: bool,
) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("CutList").with_attributes(NAMESPACES),
    ))?;

    write_settings(&mut writer, settings, width_file.stem())?;
    write_labels(&mut writer, settings, use_extra_data)?;

    open(&mut writer, "pieces")?;
    for (i, record) in width_file.records.iter().enumerate() {
        write_piece(&mut writer, record, i + 1, use_extra_data)?;
    }
    close(&mut writer, "pieces")?;
    close(&mut writer, "CutList")?;

    tracing::debug!(
        "Generated {} with {} piece(s)",
        width_file.file_name,
        width_file.records.len()
    );

    let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

fn open(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    Ok(())
}

fn close(writer: &mut XmlWriter, tag: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write `<tag>text</tag>`, or `<tag/>` for empty text.
fn element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        return Ok(());
    }
    open(writer, tag)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    close(writer, tag)
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn write_settings(writer: &mut XmlWriter, settings: &TigerSettings, fname: &str) -> Result<()> {
    element(writer, "style", &settings.style)?;
    element(writer, "unit", &settings.unit.to_string())?;
    element(writer, "isOptimized", flag(settings.is_optimized))?;
    element(writer, "headCut", &settings.head_cut)?;
    element(writer, "tailCut", &settings.tail_cut)?;
    element(writer, "patternStockLength", &settings.pattern_stock_length)?;
    element(writer, "sequenceNumber", &settings.sequence_number.to_string())?;
    element(writer, "sortString", settings.sort_string.as_deref().unwrap_or(""))?;
    element(writer, "sendFileName", flag(settings.send_file_name))?;
    element(writer, "fname", fname)?;
    element(writer, "quantityMultiples", flag(settings.quantity_multiples))?;
    element(writer, "isInfinite", flag(settings.is_infinite))?;
    element(writer, "isCascade", flag(settings.is_cascade))
}

fn write_labels(writer: &mut XmlWriter, settings: &TigerSettings, use_extra_data: bool) -> Result<()> {
    let note = if use_extra_data { Some(NOTE_HEADER) } else { None };

    open(writer, "printStrings")?;
    for (column, header) in LABEL_HEADERS.iter().copied().chain(note).enumerate() {
        let column = column as u32;
        open(writer, "LabelField")?;
        element(writer, "header", header)?;
        element(writer, "fontSize", &settings.label_font_size.to_string())?;
        element(writer, "x", "0")?;
        element(writer, "y", &(column * settings.label_spacing).to_string())?;
        element(writer, "column", &column.to_string())?;
        close(writer, "LabelField")?;
    }
    close(writer, "printStrings")
}

fn write_piece(
    writer: &mut XmlWriter,
    record: &CutListRecord,
    index: usize,
    use_extra_data: bool,
) -> Result<()> {
    open(writer, "Piece")?;

    open(writer, "labelStrings")?;
    element(writer, "string", &index.to_string())?;
    element(writer, "string", record.material())?;
    element(writer, "string", &record.expression())?;
    if use_extra_data {
        element(writer, "string", record.note())?;
    }
    close(writer, "labelStrings")?;

    element(writer, "length", &record.length().normalize().to_string())?;
    element(writer, "quantity", &record.declared_quantity().to_string())?;
    element(writer, "completed", "0")?;

    close(writer, "Piece")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_row;
    use crate::transform::into_width_files;
    use std::path::Path;

    fn width_file(rows: &[[&str; 6]], use_extra_data: bool) -> WidthFile {
        let records = rows
            .iter()
            .map(|row| parse_row(row, use_extra_data).unwrap().normalized())
            .collect();
        into_width_files(Path::new("Kitchen.dat"), records).remove(0)
    }

    /// Trimmed, non-empty lines of the output.
    fn lines(xml: &str) -> Vec<&str> {
        xml.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
    }

    #[test]
    fn test_settings_block() {
        let file = width_file(&[["1", "1.5", "30", "RS", "R1:1", ""]], false);
        let xml = generate_tiger(&file, &TigerSettings::default(), false).unwrap();
        let lines = lines(&xml);

        assert_eq!(lines[0], "<?xml version=\"1.0\" encoding=\"utf-8\"?>");
        assert_eq!(
            lines[1],
            concat!(
                "<CutList xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"",
                " xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">"
            )
        );
        assert_eq!(
            &lines[2..15],
            &[
                "<style>Setpoint</style>",
                "<unit>English</unit>",
                "<isOptimized>true</isOptimized>",
                "<headCut>0</headCut>",
                "<tailCut>0</tailCut>",
                "<patternStockLength>0</patternStockLength>",
                "<sequenceNumber>1</sequenceNumber>",
                "<sortString/>",
                "<sendFileName>true</sendFileName>",
                "<fname>Kitchen[1.5in]</fname>",
                "<quantityMultiples>false</quantityMultiples>",
                "<isInfinite>false</isInfinite>",
                "<isCascade>false</isCascade>",
            ]
        );
        assert_eq!(lines.last(), Some(&"</CutList>"));
        assert!(xml.ends_with("</CutList>\n"));
    }

    #[test]
    fn test_label_fields() {
        let file = width_file(&[["1", "1.5", "30", "RS", "R1:1", "Top"]], false);

        let xml = generate_tiger(&file, &TigerSettings::default(), false).unwrap();
        assert_eq!(xml.matches("<LabelField>").count(), 3);
        assert!(xml.contains("<y>40</y>"));
        assert!(!xml.contains("<header>Note</header>"));

        let xml = generate_tiger(&file, &TigerSettings::default(), true).unwrap();
        assert_eq!(xml.matches("<LabelField>").count(), 4);
        assert!(xml.contains("<header>Note</header>"));
        assert!(xml.contains("<y>60</y>"));
        assert!(xml.contains("<column>3</column>"));
    }

    #[test]
    fn test_piece_content() {
        let file = width_file(&[["2", "1.5", "86.50", "RS", "R5:1&2", "Face & frame"]], true);
        let xml = generate_tiger(&file, &TigerSettings::default(), true).unwrap();
        let lines = lines(&xml);

        let piece = [
            "<Piece>",
            "<labelStrings>",
            "<string>1</string>",
            "<string>RS</string>",
            "<string>R5:1&amp;2</string>",
            "<string>Face &amp; frame</string>",
            "</labelStrings>",
            "<length>86.5</length>",
            "<quantity>2</quantity>",
            "<completed>0</completed>",
            "</Piece>",
        ];
        assert!(
            lines.windows(piece.len()).any(|w| w == piece),
            "unexpected piece:\n{}",
            xml
        );
    }

    #[test]
    fn test_pieces_are_indexed_in_order() {
        let file = width_file(
            &[
                ["1", "1.5", "30", "RS", "R2:1", ""],
                ["1", "1.5", "20", "RS", "R1:1", ""],
            ],
            false,
        );
        let xml = generate_tiger(&file, &TigerSettings::default(), false).unwrap();
        let first = xml.find("<length>20</length>").unwrap();
        let second = xml.find("<length>30</length>").unwrap();
        assert!(first < second);
        assert!(xml.contains("<string>2</string>"));
    }

    #[test]
    fn test_custom_sort_string() {
        let file = width_file(&[["1", "1.5", "30", "RS", "R1:1", ""]], false);
        let settings = TigerSettings {
            sort_string: Some("length".to_string()),
            ..Default::default()
        };
        let xml = generate_tiger(&file, &settings, false).unwrap();
        assert!(xml.contains("<sortString>length</sortString>"));
    }
}
