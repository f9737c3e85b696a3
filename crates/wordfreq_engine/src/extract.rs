use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub title: Option<String>,
    pub text: String,
}

/// Visible text of an HTML document: the `<article>` if there is one,
/// else the `<body>`, else the whole document. Script and style contents
/// are skipped.
pub fn extract_text(html: &str) -> ExtractedText {
    let doc = Html::parse_document(html);

    let title = first_match(&doc, "title")
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let root = first_match(&doc, "article")
        .or_else(|| first_match(&doc, "body"))
        .unwrap_or_else(|| doc.root_element());

    ExtractedText {
        title,
        text: visible_text(root),
    }
}

fn first_match<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    doc.select(&selector).next()
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .is_some_and(|el| matches!(el.name(), "script" | "style" | "noscript"));
        let trimmed = text.trim();
        if !hidden && !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::extract_text;

    #[test]
    fn prefers_article_over_body() {
        let html = r#"<html><head><title> Wonderland </title></head>
            <body><nav>Menu</nav><article><h1>Down</h1><p>the rabbit hole</p></article></body></html>"#;
        let extracted = extract_text(html);
        assert_eq!(extracted.title.as_deref(), Some("Wonderland"));
        assert_eq!(extracted.text, "Down the rabbit hole");
    }

    #[test]
    fn skips_scripts_and_styles() {
        let html = r#"<html><body><style>p { color: red }</style><p>Visible</p>
            <script>var hidden = 1;</script></body></html>"#;
        assert_eq!(extract_text(html).text, "Visible");
    }

    #[test]
    fn plain_fragment_falls_back_to_body() {
        let extracted = extract_text("<p>just a fragment</p>");
        assert_eq!(extracted.title, None);
        assert_eq!(extracted.text, "just a fragment");
    }
}
