//! WordprocessingML parts rendered from the templates under `templates/`.
//!
//! Template names end in `.xml.j2`, so every interpolated value is escaped by
//! minijinja. Values marked safe are fixed package paths and content types.

use apidoc_core::document::{Block, MAX_HEADING_LEVEL, Table};
use apidoc_core::error::DocumentError;
use minijinja::{Environment, Value, context};

const TEMPLATES: [(&str, &str); 4] = [
    (
        "content_types.xml.j2",
        include_str!("../templates/content_types.xml.j2"),
    ),
    (
        "relationships.xml.j2",
        include_str!("../templates/relationships.xml.j2"),
    ),
    ("styles.xml.j2", include_str!("../templates/styles.xml.j2")),
    ("document.xml.j2", include_str!("../templates/document.xml.j2")),
];

const TWIPS_PER_INCH: f32 = 1440.0;
const BODY_FONT: &str = "Calibri";

const DOCUMENT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const STYLES_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

/// Style id of a heading level. Level 0 is the document title.
pub fn heading_style(level: u8) -> String {
    if level == 0 {
        "Title".to_string()
    } else {
        format!("Heading{level}")
    }
}

pub fn inches_to_twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH).round().max(0.0) as u32
}

/// Font size in half-points for heading levels 1 through 9.
fn heading_size(level: u8) -> u32 {
    match level {
        1 => 32,
        2 => 28,
        3 => 26,
        4 => 24,
        _ => 22,
    }
}

/// Split text into lines of tab-separated segments for `<w:br/>` and
/// `<w:tab/>`. `\r\n`, `\r` and `\n` all break a line. Characters XML 1.0
/// does not allow are dropped.
fn text_lines(text: String) -> Vec<Vec<String>> {
    let text: String = text.chars().filter(|c| is_xml_char(*c)).collect();
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{FFFE}' | '\u{FFFF}' => false,
        c => c >= '\u{20}',
    }
}

fn template_error(e: minijinja::Error) -> DocumentError {
    DocumentError::Other(format!("failed to render docx template: {e}"))
}

/// The template environment for one package.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, DocumentError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("text_lines", text_lines);
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, DocumentError> {
        let tmpl = self.env.get_template(name).map_err(template_error)?;
        tmpl.render(ctx).map_err(template_error)
    }

    /// `[Content_Types].xml`
    pub fn content_types(&self) -> Result<String, DocumentError> {
        let overrides = vec![
            context! {
                name => Value::from_safe_string("word/document.xml".into()),
                content_type => Value::from_safe_string(DOCUMENT_CONTENT_TYPE.into()),
            },
            context! {
                name => Value::from_safe_string("word/styles.xml".into()),
                content_type => Value::from_safe_string(STYLES_CONTENT_TYPE.into()),
            },
        ];
        self.render("content_types.xml.j2", context! { overrides => overrides })
    }

    /// `_rels/.rels`
    pub fn package_rels(&self) -> Result<String, DocumentError> {
        self.relationships("officeDocument", "word/document.xml")
    }

    /// `word/_rels/document.xml.rels`
    pub fn document_rels(&self) -> Result<String, DocumentError> {
        self.relationships("styles", "styles.xml")
    }

    fn relationships(&self, kind: &str, target: &str) -> Result<String, DocumentError> {
        let relationships = vec![context! {
            kind => kind,
            target => Value::from_safe_string(target.to_string()),
        }];
        self.render(
            "relationships.xml.j2",
            context! { relationships => relationships },
        )
    }

    /// `word/styles.xml` with the Normal, Title, Heading1..9 and TableGrid styles.
    pub fn styles(&self) -> Result<String, DocumentError> {
        let headings: Vec<Value> = (1..=MAX_HEADING_LEVEL)
            .map(|level| {
                context! {
                    level => level,
                    size => heading_size(level),
                }
            })
            .collect();
        self.render(
            "styles.xml.j2",
            context! {
                body_font => BODY_FONT,
                headings => headings,
            },
        )
    }

    /// `word/document.xml` holding `blocks` in order.
    pub fn document(&self, blocks: &[Block]) -> Result<String, DocumentError> {
        let contexts: Vec<Value> = blocks.iter().map(block_context).collect();
        // Word refuses a body whose last element before sectPr is a table.
        let trailing_paragraph = matches!(blocks.last(), Some(Block::Table(_)));
        self.render(
            "document.xml.j2",
            context! {
                blocks => contexts,
                trailing_paragraph => trailing_paragraph,
            },
        )
    }
}

fn block_context(block: &Block) -> Value {
    match block {
        Block::Heading { level, text } => context! {
            kind => "paragraph",
            style => heading_style(*level),
            text => text,
            bold => false,
            italic => false,
            code => false,
        },
        Block::Paragraph { text, style } => context! {
            kind => "paragraph",
            style => style.style,
            text => text,
            bold => style.bold,
            italic => style.italic,
            code => false,
        },
        Block::CodeBlock { text } => context! {
            kind => "paragraph",
            style => (),
            text => text,
            bold => false,
            italic => false,
            code => true,
        },
        Block::Table(table) => table_context(table),
    }
}

fn table_context(table: &Table) -> Value {
    let widths: Vec<u32> = table
        .columns
        .iter()
        .map(|c| inches_to_twips(c.width_inches))
        .collect();
    let columns: Vec<Value> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| context! { header => column.header, width => width })
        .collect();
    let rows: Vec<Vec<Value>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(text, width)| context! { text => text, width => width })
                .collect()
        })
        .collect();

    context! {
        kind => "table",
        width => widths.iter().sum::<u32>(),
        columns => columns,
        rows => rows,
    }
}

#[cfg(test)]
mod tests {
    use apidoc_core::document::{Column, ParagraphStyle};

    use super::*;

    fn render_blocks(blocks: &[Block]) -> String {
        Templates::new().unwrap().document(blocks).unwrap()
    }

    #[test]
    fn test_heading_styles() {
        assert_eq!(heading_style(0), "Title");
        assert_eq!(heading_style(3), "Heading3");
    }

    #[test]
    fn test_inches_to_twips() {
        assert_eq!(inches_to_twips(1.0), 1440);
        assert_eq!(inches_to_twips(1.2), 1728);
        assert_eq!(inches_to_twips(0.6), 864);
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(
            text_lines("a\tb\r\n\rc".to_string()),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec![String::new()],
                vec!["c".to_string()],
            ]
        );
    }

    #[test]
    fn test_text_lines_drops_non_xml_chars() {
        assert_eq!(
            text_lines("ok\u{FFFE}\u{FFFF}\u{1}!".to_string()),
            vec![vec!["ok!".to_string()]]
        );
    }

    #[test]
    fn test_heading_paragraph() {
        let xml = render_blocks(&[Block::Heading {
            level: 2,
            text: "Responses".into(),
        }]);
        assert!(xml.contains(r#"<w:pPr><w:pStyle w:val="Heading2"/></w:pPr>"#));
        assert!(xml.contains(r#"<w:t xml:space="preserve">Responses</w:t>"#));
        assert!(!xml.contains("<w:rPr>"));
    }

    #[test]
    fn test_named_paragraph_style() {
        let style = ParagraphStyle {
            style: Some("Quote".into()),
            ..ParagraphStyle::italic()
        };
        let xml = render_blocks(&[Block::Paragraph {
            text: "quoted".into(),
            style,
        }]);
        assert!(xml.contains(r#"<w:pPr><w:pStyle w:val="Quote"/></w:pPr>"#));
        assert!(xml.contains("<w:rPr><w:i/></w:rPr>"));
    }

    #[test]
    fn test_plain_paragraph_has_no_properties() {
        let xml = render_blocks(&[Block::Paragraph {
            text: "Version: 1.0".into(),
            style: ParagraphStyle::plain(),
        }]);
        assert!(!xml.contains("<w:pPr>"));
        assert!(!xml.contains("<w:rPr>"));
        assert!(xml.contains(r#"<w:t xml:space="preserve">Version: 1.0</w:t>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = render_blocks(&[Block::Paragraph {
            text: r#"Tom & <Jerry> "quoted""#.into(),
            style: ParagraphStyle::bold(),
        }]);
        assert!(xml.contains("Tom &amp; &lt;Jerry&gt; &quot;quoted&quot;"));
        assert!(xml.contains("<w:rPr><w:b/></w:rPr>"));
    }

    #[test]
    fn test_code_block_line_breaks() {
        let xml = render_blocks(&[Block::CodeBlock {
            text: "Type: array\nItems:\n  Type: string".into(),
        }]);
        assert!(xml.contains(r#"w:ascii="Courier New""#));
        assert!(xml.contains(r#"<w:sz w:val="20"/>"#));
        assert_eq!(xml.matches("<w:br/>").count(), 2);
        assert!(xml.contains(r#"<w:t xml:space="preserve">  Type: string</w:t>"#));
    }

    #[test]
    fn test_tabs() {
        let xml = render_blocks(&[Block::CodeBlock {
            text: "a\tb".into(),
        }]);
        let a = xml.find(r#"<w:t xml:space="preserve">a</w:t>"#).unwrap();
        let tab = xml.find("<w:tab/>").unwrap();
        let b = xml.find(r#"<w:t xml:space="preserve">b</w:t>"#).unwrap();
        assert!(a < tab && tab < b);
    }

    #[test]
    fn test_table_layout() {
        let mut table = Table::new(vec![
            Column::new("Status Code", 1.0),
            Column::new("Description", 2.5),
        ]);
        table.push_row(vec!["200".into(), String::new()]);
        let xml = render_blocks(&[Block::Table(table)]);

        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert!(xml.contains(r#"<w:tblW w:w="5040" w:type="dxa"/>"#));
        assert!(xml.contains(r#"<w:tblLayout w:type="fixed"/>"#));
        assert!(xml.contains(r#"<w:gridCol w:w="1440"/>"#));
        assert!(xml.contains(r#"<w:gridCol w:w="3600"/>"#));
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert_eq!(xml.matches("<w:tblHeader/>").count(), 1);
        assert_eq!(xml.matches(r#"<w:tcW w:w="3600" w:type="dxa"/>"#).count(), 2);
        assert_eq!(xml.matches("<w:rPr><w:b/></w:rPr>").count(), 2);
        // Every cell holds a paragraph, the empty one included.
        assert_eq!(xml.matches("<w:p>").count(), 4);
        assert!(xml.contains("<w:p/>"));
    }

    #[test]
    fn test_trailing_paragraph_only_after_table() {
        let xml = render_blocks(&[Block::Heading {
            level: 1,
            text: "API Endpoints".into(),
        }]);
        assert!(!xml.contains("<w:p/>"));
    }

    #[test]
    fn test_styles_cover_every_heading_level() {
        let styles = Templates::new().unwrap().styles().unwrap();
        assert!(styles.contains(r#"w:styleId="Title""#));
        for level in 1..=MAX_HEADING_LEVEL {
            assert!(styles.contains(&format!(r#"w:styleId="Heading{level}""#)));
        }
        assert!(styles.contains(r#"<w:outlineLvl w:val="0"/>"#));
        assert!(styles.contains(r#"<w:outlineLvl w:val="8"/>"#));
        assert!(styles.contains(r#"w:styleId="TableGrid""#));
        assert_eq!(styles.matches(r#"w:val="single""#).count(), 6);
    }

    #[test]
    fn test_package_rels_snapshot() {
        let rels = Templates::new().unwrap().package_rels().unwrap();
        insta::assert_snapshot!(rels, @r#"
        <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
          <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
        </Relationships>
        "#);
    }

    #[test]
    fn test_package_parts_reference_each_other() {
        let templates = Templates::new().unwrap();
        let content_types = templates.content_types().unwrap();
        assert!(content_types.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(content_types.contains(STYLES_CONTENT_TYPE));

        let package_rels = templates.package_rels().unwrap();
        assert!(package_rels.contains(r#"Id="rId1""#));
        assert!(package_rels.contains(r#"Target="word/document.xml""#));

        let document_rels = templates.document_rels().unwrap();
        assert!(document_rels.contains("relationships/styles"));
        assert!(document_rels.contains(r#"Target="styles.xml""#));
    }
}
