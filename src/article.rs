use roxmltree::Document;

use crate::model::Table;
use crate::xml_source::{collapse_whitespace, node_text};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub surname: String,
    pub given_names: String,
}

/// Structured article content. String fields default to empty when the
/// source carries no value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub file_name: String,
    pub title: String,
    pub authors: Vec<Author>,
    pub affiliations: Vec<String>,
    pub keywords: Vec<String>,
    pub abstract_text: String,
    pub short_abstract: String,
    pub pmid: String,
    pub pmc: String,
    pub issn_print: String,
    pub issn_electronic: String,
    pub publisher_name: String,
    pub publisher_location: String,
    pub plain_text: String,
    pub source_xml: String,
    pub tables: Vec<Table>,
}

impl Article {
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }
}

/// Flat metadata lookups over the parsed document.
pub(crate) fn parse_metadata(article: &mut Article, doc: &Document) {
    let root = doc.root_element();

    if let Some(title) = root
        .descendants()
        .find(|node| node.has_tag_name("article-title"))
    {
        article.title = collapse_whitespace(&node_text(title));
    }

    for contrib in root
        .descendants()
        .filter(|node| node.has_tag_name("contrib"))
    {
        let Some(name) = contrib.children().find(|node| node.has_tag_name("name")) else {
            continue;
        };
        let surname = name
            .children()
            .find(|node| node.has_tag_name("surname"))
            .map(node_text)
            .unwrap_or_default();
        let given_names = name
            .children()
            .find(|node| node.has_tag_name("given-names"))
            .map(node_text)
            .unwrap_or_default();
        article.authors.push(Author {
            surname,
            given_names,
        });
    }

    for issn in root.descendants().filter(|node| node.has_tag_name("issn")) {
        match issn.attribute("pub-type") {
            Some("ppub") => article.issn_print = node_text(issn),
            Some("epub") => article.issn_electronic = node_text(issn),
            _ => {}
        }
    }

    for id in root
        .descendants()
        .filter(|node| node.has_tag_name("article-id"))
    {
        match id.attribute("pub-id-type") {
            Some("pmid") => article.pmid = node_text(id),
            Some("pmc") => article.pmc = node_text(id),
            _ => {}
        }
    }

    article.affiliations = root
        .descendants()
        .filter(|node| node.has_tag_name("aff"))
        .map(node_text)
        .collect();

    article.keywords = root
        .descendants()
        .filter(|node| node.has_tag_name("kwd"))
        .map(node_text)
        .collect();

    for node in root
        .descendants()
        .filter(|node| node.has_tag_name("abstract"))
    {
        if node.attribute("abstract-type") == Some("short") {
            article.short_abstract = node_text(node);
        } else {
            article.abstract_text = node_text(node);
        }
    }

    if let Some(publisher) = root
        .descendants()
        .find(|node| node.has_tag_name("publisher-name"))
    {
        article.publisher_name = node_text(publisher);
    }
    if let Some(location) = root
        .descendants()
        .find(|node| node.has_tag_name("publisher-loc"))
    {
        article.publisher_location = node_text(location);
    }

    if let Some(body) = root.descendants().find(|node| node.has_tag_name("body")) {
        article.plain_text = node_text(body);
    }
}
