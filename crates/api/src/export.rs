//! Spreadsheet export of registered IMEIs.
//!
//! An `.xlsx` file is a zip archive of SpreadsheetML parts. The workbook here
//! is fixed: one sheet named `IMEIs` with four columns. Text cells use inline
//! strings so IMEIs keep their leading zeros; campaign dates are Excel serial
//! numbers rendered with a `dd/mm/yyyy` number format.

use std::io::{Cursor, Write};

use baja_core::types::CalendarDate;
use baja_db::models::registration::ExportRow;
use chrono::Datelike;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download name for the admin export.
pub const EXPORT_FILENAME: &str = "reporte_imeis.xlsx";

/// Header label and column width, in sheet order.
const COLUMNS: [(&str, u32); 4] = [
    ("Código SAP", 15),
    ("Modelo", 30),
    ("IMEI", 20),
    ("Fecha Campaña", 15),
];

const COLUMN_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

// Indexes into `cellXfs` in styles.xml.
const STYLE_HEADER: u32 = 1;
const STYLE_DATE: u32 = 2;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// `num_days_from_ce` of 1899-12-30, day zero of Excel's date system.
const EXCEL_EPOCH_CE_DAYS: i64 = 693_594;

/// Days since the Excel epoch, as stored in date cells.
pub fn excel_serial(date: CalendarDate) -> i64 {
    i64::from(date.num_days_from_ce()) - EXCEL_EPOCH_CE_DAYS
}

/// Build the export workbook for the given rows, in the given order.
pub fn write_registrations_xlsx(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", WORKBOOK.to_string()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", STYLES.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(rows)),
    ];

    for (name, body) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn sheet_xml(rows: &[ExportRow]) -> String {
    let mut xml = String::with_capacity(256 + rows.len() * 320);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    xml.push_str("<cols>");
    for (i, (_, width)) in COLUMNS.iter().enumerate() {
        let n = i + 1;
        xml.push_str(&format!(
            r#"<col min="{n}" max="{n}" width="{width}" customWidth="1"/>"#
        ));
    }
    xml.push_str("</cols><sheetData>");

    xml.push_str(r#"<row r="1">"#);
    for (i, (label, _)) in COLUMNS.iter().enumerate() {
        push_text_cell(&mut xml, COLUMN_LETTERS[i], 1, label, Some(STYLE_HEADER));
    }
    xml.push_str("</row>");

    for (i, row) in rows.iter().enumerate() {
        let r = i + 2;
        xml.push_str(&format!(r#"<row r="{r}">"#));
        push_text_cell(&mut xml, 'A', r, &row.sap_code, None);
        push_text_cell(&mut xml, 'B', r, &row.model_name, None);
        push_text_cell(&mut xml, 'C', r, &row.imei, None);
        xml.push_str(&format!(
            r#"<c r="D{r}" s="{STYLE_DATE}"><v>{}</v></c>"#,
            excel_serial(row.campaign_date)
        ));
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_text_cell(xml: &mut String, col: char, row: usize, text: &str, style: Option<u32>) {
    let style = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();
    xml.push_str(&format!(
        r#"<c r="{col}{row}" t="inlineStr"{style}><is><t>{}</t></is></c>"#,
        escape_xml(text)
    ));
}

/// Escape text for a `<t>` element.
///
/// Characters XML 1.0 cannot carry (control characters other than tab, LF
/// and CR, plus U+FFFE/U+FFFF) are written as the SpreadsheetML escape
/// `_xHHHH_`. An underscore that would start such a sequence in the input
/// is itself escaped as `_x005F_` so the text reads back unchanged.
fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.char_indices() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '_' if starts_ooxml_escape(&raw[i..]) => out.push_str("_x005F_"),
            c if !is_xml_char(c) => out.push_str(&format!("_x{:04X}_", u32::from(c))),
            other => out.push(other),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Whether `text` begins with `_xHHHH_`.
fn starts_ooxml_escape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 7
        && bytes.starts_with(b"_x")
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const WORKBOOK: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<sheets><sheet name="IMEIs" sheetId="1" r:id="rId1"/></sheets></workbook>"#
);

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#
);

// cellXfs: 0 default, 1 bold header, 2 date with custom format 164.
const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<numFmts count="1"><numFmt numFmtId="164" formatCode="dd/mm/yyyy"/></numFmts>"#,
    r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font>"#,
    r#"<font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill>"#,
    r#"<fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="3">"#,
    r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#,
    r#"<xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>"#,
    r#"</cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#
);
