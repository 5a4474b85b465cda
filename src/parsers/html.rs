use crate::parsers::MetaProperty;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use std::cell::{Cell, RefCell};

/// Metadata read from a job page's head section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Content of `og:title`, if present
    pub title: Option<String>,
    /// Content of `og:image`, if present
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum HeadState {
    #[default]
    BeforeHead,
    InHead,
    AfterHead,
}

/// Token sink collecting `og:` meta tags between `<head>` and `</head>`.
///
/// Works on the token stream rather than the tree builder's output, which
/// synthesizes a head for every document and moves tags that follow body
/// content out of it.
#[derive(Default)]
struct HeadScanner {
    state: Cell<HeadState>,
    // outer None: no tag seen yet, inner None: first tag had no content
    title: RefCell<Option<Option<String>>>,
    image: RefCell<Option<Option<String>>>,
}

impl HeadScanner {
    fn start_tag(&self, tag: &Tag) -> TokenSinkResult<()> {
        match &*tag.name {
            "head" if self.state.get() == HeadState::BeforeHead => {
                self.state.set(HeadState::InHead);
            }
            "meta" if self.state.get() == HeadState::InHead => self.record_meta(tag),
            "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                return TokenSinkResult::RawData(RawKind::Rawtext);
            }
            "title" | "textarea" => return TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => return TokenSinkResult::Plaintext,
            _ => {}
        }
        TokenSinkResult::Continue
    }

    fn record_meta(&self, tag: &Tag) {
        let attr = |name: &str| {
            tag.attrs
                .iter()
                .find(|a| &*a.name.local == name)
                .map(|a| a.value.to_string())
        };
        let Some(property) = attr("property") else {
            return;
        };

        let slot = if property == MetaProperty::Title.key() {
            &self.title
        } else if property == MetaProperty::Image.key() {
            &self.image
        } else {
            return;
        };

        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(attr("content"));
        }
    }
}

impl TokenSink for HeadScanner {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(tag) = token {
            match tag.kind {
                TagKind::StartTag => return self.start_tag(&tag),
                TagKind::EndTag => {
                    if &*tag.name == "head" && self.state.get() == HeadState::InHead {
                        self.state.set(HeadState::AfterHead);
                    }
                }
            }
        }
        TokenSinkResult::Continue
    }
}

fn scan(html: &str) -> Option<PageMetadata> {
    let tokenizer = Tokenizer::new(HeadScanner::default(), TokenizerOpts::default());
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    let scanner = &tokenizer.sink;
    if scanner.state.get() == HeadState::BeforeHead {
        return None;
    }
    Some(PageMetadata {
        title: scanner.title.take().flatten(),
        image: scanner.image.take().flatten(),
    })
}

/// Whether the document declares a head section outside comments and raw text
pub fn has_head(html: &str) -> bool {
    scan(html).is_some()
}

/// Parses the head section of an HTML document.
///
/// Returns `None` when the document has no head section. Only the first meta tag
/// per property counts, and one without a `content` attribute is reported as absent.
pub fn parse_metadata(html: &str) -> Option<PageMetadata> {
    let metadata = scan(html);
    match &metadata {
        Some(found) => ::log::trace!("HTML parser found metadata {:?}", found),
        None => ::log::debug!("HTML parser found no head section"),
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_og_tags() {
        let html = r#"<html><head>
            <meta property="og:title" content="Senior Software Engineer">
            <meta property="og:image" content="https://cdn.example.com/logo.png">
        </head><body></body></html>"#;
        let meta = parse_metadata(html).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Senior Software Engineer"));
        assert_eq!(meta.image.as_deref(), Some("https://cdn.example.com/logo.png"));
    }

    #[test]
    fn test_missing_head() {
        let html = "<html><body><p>No head here</p></body></html>";
        assert!(!has_head(html));
        assert!(parse_metadata(html).is_none());
    }

    #[test]
    fn test_header_is_not_head() {
        assert!(!has_head("<body><header>Nav</header></body>"));
        assert!(has_head("<HEAD><title>x</title></HEAD>"));
        assert!(has_head("<head lang=\"en\"></head>"));
    }

    #[test]
    fn test_head_inside_script_is_not_a_head() {
        let html = r#"<body><script>var tpl = "<head></head>";</script><p>Apply</p></body>"#;
        assert!(!has_head(html));
    }

    #[test]
    fn test_head_inside_comment_is_not_a_head() {
        let html = "<!-- <head> removed --><html><body><p>Apply</p></body></html>";
        assert!(!has_head(html));
    }

    #[test]
    fn test_body_content_in_head_keeps_later_meta() {
        let html = concat!(
            r#"<head><title>Jobs</title><div id="banner"></div>"#,
            r#"<meta property="og:title" content="Senior Software Engineer"></head>"#,
        );
        let meta = parse_metadata(html).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Senior Software Engineer"));
    }

    #[test]
    fn test_meta_text_inside_head_script_is_ignored() {
        let html = concat!(
            "<head><script>",
            r#"document.write('<meta property="og:title" content="Fake Engineer">');"#,
            "</script></head>",
        );
        assert_eq!(parse_metadata(html).unwrap().title, None);
    }

    #[test]
    fn test_missing_tags_are_absent() {
        let html = "<html><head><title>Jobs</title></head><body></body></html>";
        assert_eq!(parse_metadata(html).unwrap(), PageMetadata::default());
    }

    #[test]
    fn test_meta_without_content_is_absent() {
        let html = r#"<html><head><meta property="og:title"></head></html>"#;
        assert_eq!(parse_metadata(html).unwrap().title, None);
    }

    #[test]
    fn test_first_meta_wins() {
        let html = concat!(
            r#"<head><meta property="og:title" content="Data Engineer">"#,
            r#"<meta property="og:title" content="Recruiter"></head>"#,
        );
        let meta = parse_metadata(html).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Data Engineer"));
    }

    #[test]
    fn test_body_meta_is_ignored() {
        let html = r#"<html><head></head><body>
            <div><meta property="og:title" content="Backend Developer"></div>
        </body></html>"#;
        assert_eq!(parse_metadata(html).unwrap().title, None);
    }
}
