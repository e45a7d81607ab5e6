//! exam card XML 的記憶體表示
//!
//! 保留 `quick_xml` 解析出的事件序列，沒改到的部分原樣寫回。
//! 不解析外部實體，DOCTYPE 只當成一般事件帶過。

use quick_xml::events::{BytesEnd, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: u64, message: String },
    #[error("root element is missing")]
    MissingRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("data at the root level is invalid")]
    TextOutsideRoot,
    #[error("unexpected end of document, {0} element(s) not closed")]
    UnclosedElements(usize),
    #[error("XML write error: {0}")]
    Write(String),
}

/// 元素在事件序列中的範圍 `start..=end`，自閉合元素 `start == end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan {
    pub start: usize,
    pub end: usize,
}

impl ElementSpan {
    pub fn is_self_closing(&self) -> bool {
        self.start == self.end
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    events: Vec<Event<'static>>,
    /// quick-xml 會吃掉 BOM，自己記下來寫回時補上
    has_bom: bool,
}

impl ParsedDocument {
    pub fn parse(xml: &[u8]) -> Result<Self, DocumentError> {
        let (has_bom, xml) = match xml.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, xml),
        };

        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut events = Vec::new();
        let mut depth = 0usize;
        let mut roots = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| DocumentError::Xml {
                position: reader.error_position() as u64,
                message: e.to_string(),
            })?;

            match &event {
                Event::Eof => break,
                Event::Start(_) | Event::Empty(_) => {
                    if depth == 0 {
                        roots += 1;
                        if roots > 1 {
                            return Err(DocumentError::MultipleRoots);
                        }
                    }
                    if matches!(event, Event::Start(_)) {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth.checked_sub(1).ok_or_else(|| DocumentError::Xml {
                        position: reader.buffer_position() as u64,
                        message: "unmatched end tag".to_string(),
                    })?;
                }
                Event::Text(text) if depth == 0 => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(DocumentError::TextOutsideRoot);
                    }
                }
                Event::CData(_) if depth == 0 => return Err(DocumentError::TextOutsideRoot),
                _ => {}
            }

            events.push(event.into_owned());
        }

        if depth > 0 {
            return Err(DocumentError::UnclosedElements(depth));
        }
        if roots == 0 {
            return Err(DocumentError::MissingRoot);
        }

        Ok(Self { events, has_bom })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let mut out = Vec::new();
        if self.has_bom {
            out.extend_from_slice(UTF8_BOM);
        }

        let mut writer = Writer::new(out);
        for event in &self.events {
            writer
                .write_event(event.borrow())
                .map_err(|e| DocumentError::Write(e.to_string()))?;
        }
        Ok(writer.into_inner())
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// 依文件順序回傳所有符合 tag 的元素（快照，之後修改文件不會更新）
    pub fn elements_by_tag(&self, tag: &str) -> Vec<ElementSpan> {
        let tag = tag.as_bytes();
        let mut open: Vec<(usize, bool)> = Vec::new();
        let mut spans = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            match event {
                Event::Start(start) => open.push((index, start.name().as_ref() == tag)),
                Event::Empty(start) if start.name().as_ref() == tag => spans.push(ElementSpan {
                    start: index,
                    end: index,
                }),
                Event::End(_) => {
                    if let Some((start, true)) = open.pop() {
                        spans.push(ElementSpan { start, end: index });
                    }
                }
                _ => {}
            }
        }

        // 巢狀元素在外層之前結束，依起點重新排序
        spans.sort_by_key(|span| span.start);
        spans
    }

    /// 元素內所有文字與 CDATA 串接
    pub fn inner_text(&self, span: &ElementSpan) -> String {
        if span.is_self_closing() {
            return String::new();
        }

        let mut text = String::new();
        for event in &self.events[span.start + 1..span.end] {
            match event {
                Event::Text(t) => match t.unescape() {
                    Ok(unescaped) => text.push_str(&unescaped),
                    Err(_) => text.push_str(&String::from_utf8_lossy(t)),
                },
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(c)),
                _ => {}
            }
        }
        text
    }

    /// 把元素內容換成 `text`
    ///
    /// 回傳事件數的增減量，包住 `span` 的外層元素 `end` 要跟著位移。
    pub fn replace_inner_text(&mut self, span: &ElementSpan, text: &str) -> isize {
        let content = Event::Text(BytesText::new(text).into_owned());

        if span.is_self_closing() {
            let Event::Empty(start) = &self.events[span.start] else {
                return 0;
            };
            let start = start.clone();
            let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
            let replacement = [Event::Start(start), content, Event::End(BytesEnd::new(name))];
            self.events.splice(span.start..=span.end, replacement);
            return 2;
        }

        let removed = span.end - span.start - 1;
        self.events.splice(span.start + 1..span.end, [content]);
        1 - removed as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(doc: &ParsedDocument) -> String {
        String::from_utf8(doc.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_untouched_document_serializes_verbatim() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<!-- card -->\r\n\
                   <ExamCard a=\"1\">\r\n  <Scan><SliceMode>128</SliceMode><Name>T1 &amp; T2</Name></Scan>\r\n\
                   <Empty/><![CDATA[raw <data>]]></ExamCard>\r\n";
        let doc = ParsedDocument::parse(xml.as_bytes()).unwrap();
        assert_eq!(render(&doc), xml);
    }

    #[test]
    fn test_utf8_bom_is_preserved() {
        let xml = b"\xEF\xBB\xBF<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<Card><SliceMode>64</SliceMode></Card>";
        let doc = ParsedDocument::parse(xml).unwrap();
        assert_eq!(doc.to_bytes().unwrap(), xml.to_vec());

        let plain = ParsedDocument::parse(b"<Card/>").unwrap();
        assert_eq!(plain.to_bytes().unwrap(), b"<Card/>".to_vec());
    }

    #[test]
    fn test_doctype_is_not_expanded() {
        let xml = r#"<!DOCTYPE card [<!ENTITY ext SYSTEM "file:///etc/passwd">]><card><SliceMode>&ext;</SliceMode></card>"#;
        let doc = ParsedDocument::parse(xml.as_bytes()).unwrap();
        let spans = doc.elements_by_tag("SliceMode");
        assert_eq!(spans.len(), 1);
        assert_eq!(doc.inner_text(&spans[0]), "&ext;");

        let rendered = render(&doc);
        assert!(rendered.contains("<!ENTITY ext SYSTEM"));
        assert!(rendered.contains("<SliceMode>&ext;</SliceMode>"));
    }

    #[test]
    fn test_elements_by_tag_in_document_order() {
        let xml = b"<r><SliceMode>1</SliceMode><a><SliceMode>2</SliceMode></a><SliceMode/></r>";
        let doc = ParsedDocument::parse(xml).unwrap();
        let spans = doc.elements_by_tag("SliceMode");
        assert_eq!(spans.len(), 3);
        assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
        assert_eq!(doc.inner_text(&spans[0]), "1");
        assert_eq!(doc.inner_text(&spans[1]), "2");
        assert!(spans[2].is_self_closing());
        assert_eq!(doc.inner_text(&spans[2]), "");
    }

    #[test]
    fn test_nested_elements_are_both_found() {
        let xml = b"<r><SliceMode>6<SliceMode>4</SliceMode></SliceMode></r>";
        let doc = ParsedDocument::parse(xml).unwrap();
        let spans = doc.elements_by_tag("SliceMode");
        assert_eq!(spans.len(), 2);
        assert!(spans[0].start < spans[1].start && spans[0].end > spans[1].end);
        assert_eq!(doc.inner_text(&spans[0]), "64");
    }

    #[test]
    fn test_replace_inner_text() {
        let mut doc = ParsedDocument::parse(b"<r><SliceMode> 9<!--x-->9 </SliceMode></r>").unwrap();
        let span = doc.elements_by_tag("SliceMode")[0];
        let before = doc.event_count();
        let delta = doc.replace_inner_text(&span, "64");
        assert_eq!(doc.event_count() as isize, before as isize + delta);
        assert_eq!(render(&doc), "<r><SliceMode>64</SliceMode></r>");
    }

    #[test]
    fn test_replace_expands_self_closing_element() {
        let mut doc = ParsedDocument::parse(br#"<r><SliceMode unit="x"/></r>"#).unwrap();
        let span = doc.elements_by_tag("SliceMode")[0];
        assert_eq!(doc.replace_inner_text(&span, "64"), 2);
        assert_eq!(render(&doc), r#"<r><SliceMode unit="x">64</SliceMode></r>"#);
    }

    #[test]
    fn test_malformed_documents_are_rejected() {
        assert!(matches!(
            ParsedDocument::parse(b"<r><a></r>"),
            Err(DocumentError::Xml { .. })
        ));
        assert!(matches!(
            ParsedDocument::parse(b"<r><a>"),
            Err(DocumentError::Xml { .. }) | Err(DocumentError::UnclosedElements(_))
        ));
        assert!(matches!(
            ParsedDocument::parse(b"<?xml version=\"1.0\"?>\n"),
            Err(DocumentError::MissingRoot)
        ));
        assert!(matches!(
            ParsedDocument::parse(b"<a/><b/>"),
            Err(DocumentError::MultipleRoots)
        ));
        assert!(matches!(
            ParsedDocument::parse(b"junk<a/>"),
            Err(DocumentError::TextOutsideRoot)
        ));
    }
}
