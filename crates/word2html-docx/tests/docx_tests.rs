//! Extraction tests over DOCX packages assembled in memory.

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use word2html_docx::{DocxExtractor, ExtractionError};
use word2html_dom::{NodeId, serialize_children};
use word2html_pipeline::{ConversionOptions, ExtractedDocument, Extractor, ImageSource, convert};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const STYLE: &str = "display: block";

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Titel"><w:name w:val="Title"/></w:style>
  <w:style w:type="paragraph" w:styleId="berschrift2"><w:name w:val="heading 2"/></w:style>
  <w:style w:type="paragraph" w:styleId="Aufzhlungszeichen2"><w:name w:val="List Bullet 2"/></w:style>
  <w:style w:type="paragraph" w:styleId="Listennummer"><w:name w:val="List Number"/></w:style>
  <w:style w:type="paragraph" w:styleId="Zitat"><w:name w:val="Quote"/></w:style>
  <w:style w:type="paragraph" w:styleId="IntensivesZitat"><w:name w:val="Intense Quote"/></w:style>
</w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl>
    <w:lvl w:ilvl="1"><w:numFmt w:val="decimal"/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId6" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/missing.png"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.test/?a=1&amp;b=2" TargetMode="External"/>
</Relationships>"#;

/// A DOCX package under construction.
struct Package {
    parts: Vec<(String, Vec<u8>)>,
}

impl Package {
    fn with_body(body: &str) -> Self {
        Self { parts: Vec::new() }.part("word/document.xml", document_xml(body).into_bytes())
    }

    fn part(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.parts.push((name.to_string(), bytes.into()));
        self
    }

    fn with_metadata(self) -> Self {
        self.part("word/styles.xml", STYLES_XML)
            .part("word/numbering.xml", NUMBERING_XML)
            .part("word/_rels/document.xml.rels", RELS_XML)
    }

    fn build(self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in self.parts {
            zip.start_file(name, SimpleFileOptions::default())
                .expect("start part");
            zip.write_all(&bytes).expect("write part");
        }
        zip.finish().expect("finish archive").into_inner()
    }
}

fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

fn paragraph(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#
    )
}

fn plain(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

fn drawing(embed: &str, descr: &str) -> String {
    format!(
        r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" descr="{descr}"/><a:graphic><a:graphicData><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:blipFill><a:blip r:embed="{embed}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
    )
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode fixture");
    buf.into_inner()
}

/// Extract with an image callback that records the size of every asset.
fn extract_with_sizes(bytes: Vec<u8>) -> (ExtractedDocument, Vec<usize>) {
    let mut extractor = DocxExtractor::from_bytes(bytes).expect("opens");
    let mut sizes = Vec::new();
    let doc = extractor
        .extract(&mut |asset| {
            sizes.push(asset.len());
            ImageSource::inline(format!("data:image/png;base64,#{}", sizes.len()), STYLE)
        })
        .expect("extracts");
    (doc, sizes)
}

fn extract(bytes: Vec<u8>) -> ExtractedDocument {
    extract_with_sizes(bytes).0
}

fn html(doc: &ExtractedDocument) -> String {
    serialize_children(&doc.tree, NodeId::ROOT)
}

#[test]
fn test_headings_from_style_names_and_ids() {
    let body = [
        paragraph("Titel", "Annual Report"),
        paragraph("berschrift2", "Summary"),
        paragraph("Heading3", "Details"),
        paragraph("Heading9", "Deep"),
        plain("Body text."),
    ]
    .concat();
    let doc = extract(Package::with_body(&body).with_metadata().build());

    assert_eq!(
        html(&doc),
        "<h1>Annual Report</h1><h2>Summary</h2><h3>Details</h3><h6>Deep</h6><p>Body text.</p>"
    );
    assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);
}

#[test]
fn test_list_styles_become_flat_items() {
    let body = [
        paragraph("Listennummer", "first"),
        paragraph("Aufzhlungszeichen2", "nested"),
    ]
    .concat();
    let doc = extract(Package::with_body(&body).with_metadata().build());

    assert_eq!(
        html(&doc),
        "<li class=\"list-number\">first</li><li class=\"list-bullet-2\">nested</li>"
    );
}

#[test]
fn test_numbering_properties_decide_kind_and_level() {
    let numbered = |ilvl: u32, text: &str| {
        format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{ilvl}"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        )
    };
    let body = [numbered(0, "a"), numbered(1, "b"), numbered(0, "c")].concat();
    let doc = extract(Package::with_body(&body).with_metadata().build());

    assert_eq!(
        html(&doc),
        "<li class=\"list-bullet\">a</li><li class=\"list-number-2\">b</li><li class=\"list-bullet\">c</li>"
    );
}

#[test]
fn test_out_of_range_list_level_is_clamped() {
    let body = r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="4294967295"/><w:numId w:val="1"/></w:numPr></w:pPr><w:r><w:t>deep</w:t></w:r></w:p>"#;
    let doc = extract(Package::with_body(body).with_metadata().build());

    assert_eq!(html(&doc), "<li class=\"list-bullet-9\">deep</li>");
}

#[test]
fn test_quote_styles() {
    let body = [
        paragraph("Zitat", "said once"),
        paragraph("IntensivesZitat", "said loudly"),
    ]
    .concat();
    let doc = extract(Package::with_body(&body).with_metadata().build());

    assert_eq!(
        html(&doc),
        "<blockquote>said once</blockquote><blockquote class=\"intense\">said loudly</blockquote>"
    );
}

#[test]
fn test_runs_with_same_format_share_wrappers() {
    let body = concat!(
        r#"<w:p>"#,
        r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Hello </w:t></w:r>"#,
        r#"<w:r><w:rPr><w:b/></w:rPr><w:t>world</w:t></w:r>"#,
        r#"<w:r><w:t>, </w:t></w:r>"#,
        r#"<w:r><w:rPr><w:b/><w:i/></w:rPr><w:t>both</w:t></w:r>"#,
        r#"<w:r><w:rPr><w:b w:val="0"/><w:vertAlign w:val="superscript"/></w:rPr><w:t>2</w:t></w:r>"#,
        r#"<w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r>"#,
        r#"</w:p>"#
    );
    let doc = extract(Package::with_body(body).build());

    assert_eq!(
        html(&doc),
        "<p><strong>Hello world</strong>, <strong><em>both</em></strong><sup>2</sup>a\tb<br>c</p>"
    );
}

#[test]
fn test_empty_paragraphs_are_dropped() {
    let body = [
        "<w:p/>".to_string(),
        plain("   "),
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr></w:p>"#.to_string(),
        plain("kept"),
    ]
    .concat();
    let doc = extract(Package::with_body(&body).build());

    assert_eq!(html(&doc), "<p>kept</p>");
}

#[test]
fn test_tables_with_header_and_spans() {
    let cell = |props: &str, text: &str| {
        format!(
            r#"<w:tc><w:tcPr>{props}</w:tcPr><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc>"#
        )
    };
    let body = format!(
        "<w:tbl><w:tblPr/><w:tblGrid/>\
         <w:tr><w:trPr><w:tblHeader/></w:trPr>{}{}</w:tr>\
         <w:tr>{}{}</w:tr>\
         <w:tr>{}{}</w:tr>\
         <w:tr>{}</w:tr>\
         </w:tbl>",
        cell("", "Name"),
        cell("", "Value"),
        cell(r#"<w:vMerge w:val="restart"/>"#, "merged"),
        cell("", "x"),
        cell("<w:vMerge/>", ""),
        cell("", "y"),
        cell(r#"<w:gridSpan w:val="2"/>"#, "wide"),
    );
    let doc = extract(Package::with_body(&body).build());

    assert_eq!(
        html(&doc),
        concat!(
            "<table>",
            "<tr><th><p>Name</p></th><th><p>Value</p></th></tr>",
            "<tr><td rowspan=\"2\"><p>merged</p></td><td><p>x</p></td></tr>",
            "<tr><td><p>y</p></td></tr>",
            "<tr><td colspan=\"2\"><p>wide</p></td></tr>",
            "</table>"
        )
    );
}

#[test]
fn test_hyperlinks() {
    let body = concat!(
        r#"<w:p><w:hyperlink r:id="rId7"><w:r><w:t>site</w:t></w:r></w:hyperlink>"#,
        r#"<w:r><w:t xml:space="preserve"> and </w:t></w:r>"#,
        r#"<w:hyperlink w:anchor="intro"><w:r><w:t>intro</w:t></w:r></w:hyperlink></w:p>"#
    );
    let doc = extract(Package::with_body(body).with_metadata().build());

    assert_eq!(
        html(&doc),
        "<p><a href=\"https://example.test/?a=1&amp;b=2\">site</a> and <a href=\"#intro\">intro</a></p>"
    );
}

#[test]
fn test_images_go_through_the_callback() {
    let image = png(4, 3);
    let expected_len = image.len();
    let body = drawing("rId5", "Quarterly chart");
    let package = Package::with_body(&body)
        .with_metadata()
        .part("word/media/image1.png", image)
        .build();

    let (doc, sizes) = extract_with_sizes(package);

    assert_eq!(sizes, vec![expected_len]);
    assert_eq!(
        html(&doc),
        "<p><img src=\"data:image/png;base64,#1\" alt=\"Quarterly chart\" style=\"display: block\"></p>"
    );
}

#[test]
fn test_unresolvable_images_become_placeholders() {
    let body = [drawing("rId6", "gone"), drawing("rId99", "")].concat();
    let (doc, sizes) = extract_with_sizes(Package::with_body(&body).with_metadata().build());

    assert!(sizes.is_empty());
    assert_eq!(
        html(&doc),
        "<p><img src=\"\" alt=\"Image could not be converted\"></p>\
         <p><img src=\"\" alt=\"Image could not be converted\"></p>"
    );
    assert_eq!(
        doc.warnings,
        vec![
            "image part word/media/missing.png missing from package".to_string(),
            "image relationship rId99 not found".to_string(),
        ]
    );
}

#[test]
fn test_content_controls_are_unwrapped() {
    let body = format!(
        "<w:sdt><w:sdtPr/><w:sdtContent>{}</w:sdtContent></w:sdt>",
        plain("inside control")
    );
    let doc = extract(Package::with_body(&body).build());

    assert_eq!(html(&doc), "<p>inside control</p>");
}

#[test]
fn test_unsupported_elements_warn_once() {
    let body = [
        "<w:altChunk/>".to_string(),
        plain("text"),
        "<w:altChunk/>".to_string(),
    ]
    .concat();
    let doc = extract(Package::with_body(&body).build());

    assert_eq!(html(&doc), "<p>text</p>");
    assert_eq!(doc.warnings, vec!["unsupported element: w:altChunk".to_string()]);
}

#[test]
fn test_malformed_optional_part_is_a_warning() {
    let package = Package::with_body(&paragraph("Heading2", "Still here"))
        .part("word/styles.xml", "<w:styles><w:style></w:styles>")
        .build();
    let doc = extract(package);

    assert_eq!(html(&doc), "<h2>Still here</h2>");
    assert_eq!(doc.warnings.len(), 1);
    assert!(doc.warnings[0].contains("word/styles.xml"), "{:?}", doc.warnings);
}

#[test]
fn test_non_zip_input_is_not_ooxml() {
    let legacy_doc = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1rest of a compound file".to_vec();
    assert!(matches!(
        DocxExtractor::from_bytes(legacy_doc),
        Err(ExtractionError::NotOoxml)
    ));
    assert!(matches!(
        DocxExtractor::from_bytes(Vec::new()),
        Err(ExtractionError::NotOoxml)
    ));
}

#[test]
fn test_missing_document_part() {
    let package = Package { parts: Vec::new() }
        .part("word/styles.xml", STYLES_XML)
        .build();
    match DocxExtractor::from_bytes(package) {
        Err(ExtractionError::MissingPart(part)) => assert_eq!(part, "word/document.xml"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("package without a document part opened"),
    }
}

#[test]
fn test_malformed_document_is_an_error() {
    let package = Package { parts: Vec::new() }
        .part("word/document.xml", "<w:document><w:body><w:p></w:body>")
        .build();
    let mut extractor = DocxExtractor::from_bytes(package).expect("opens");

    let err = extractor
        .extract(&mut |_| ImageSource::failed())
        .expect_err("malformed document");

    assert!(matches!(err, ExtractionError::Xml { ref part, .. } if part == "word/document.xml"));
}

#[test]
fn test_document_without_body() {
    let package = Package { parts: Vec::new() }
        .part("word/document.xml", "<w:document/>")
        .build();
    let mut extractor = DocxExtractor::from_bytes(package).expect("opens");

    let err = extractor
        .extract(&mut |_| ImageSource::failed())
        .expect_err("no body");

    assert!(matches!(err, ExtractionError::MissingPart(_)));
}

#[test]
fn test_end_to_end_conversion() {
    let body = [
        paragraph("Titel", "Report"),
        paragraph("ListBullet", "one"),
        paragraph("ListBullet2", "one.a"),
        paragraph("ListBullet", "two"),
        drawing("rId5", "Logo"),
    ]
    .concat();
    let package = Package::with_body(&body)
        .with_metadata()
        .part("word/media/image1.png", png(1600, 400))
        .build();
    let mut extractor = DocxExtractor::from_bytes(package).expect("opens");

    let conversion = convert(&mut extractor, &ConversionOptions::default()).expect("converts");

    assert_eq!(extractor.name(), "docx");
    assert_eq!(conversion.lists_rebuilt, 1);
    assert_eq!((conversion.images_converted, conversion.images_failed), (1, 0));
    let body = conversion.result.body_fragment_html();
    assert!(body.starts_with("<h1>Report</h1><ul style=\"list-style-type: disc;"), "{body}");
    assert!(body.contains("<ul style=\"list-style-type: circle;"), "{body}");
    assert!(body.contains("src=\"data:image/png;base64,"), "{body}");
    assert!(body.contains("alt=\"Logo\""), "{body}");
    assert!(conversion.warnings.is_empty(), "{:?}", conversion.warnings);
}
