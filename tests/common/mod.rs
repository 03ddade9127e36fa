use std::io;
use std::path::Path;

/// Wraps table-wrap markup in a complete JATS article, DOCTYPE included, so
/// tests exercise the same DTD-line tolerance the batch path relies on.
pub fn article_xml(table_wraps: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE article PUBLIC \"-//NLM//DTD JATS (Z39.96) Journal Archiving and Interchange DTD v1.0 20120330//EN\" \"JATS-archivearticle1.dtd\">\n\
<article>\n\
  <front>\n\
    <journal-meta>\n\
      <issn pub-type=\"ppub\">2046-1402</issn>\n\
      <publisher><publisher-name>Example Press</publisher-name><publisher-loc>London</publisher-loc></publisher>\n\
    </journal-meta>\n\
    <article-meta>\n\
      <article-id pub-id-type=\"pmid\">24312345</article-id>\n\
      <article-id pub-id-type=\"pmc\">3845678</article-id>\n\
      <title-group><article-title>Spanning cells in observational cohorts</article-title></title-group>\n\
      <contrib-group>\n\
        <contrib contrib-type=\"author\"><name><surname>Lovelace</surname><given-names>Ada</given-names></name></contrib>\n\
      </contrib-group>\n\
      <aff>Department of Examples</aff>\n\
      <abstract>We tabulate things.</abstract>\n\
      <kwd-group><kwd>tables</kwd></kwd-group>\n\
    </article-meta>\n\
  </front>\n\
  <body>\n\
    <sec><p>Results are shown below.</p>\n{table_wraps}\n</sec>\n\
  </body>\n\
</article>\n"
    )
}

pub fn write_article(path: &Path, table_wraps: &str) -> io::Result<()> {
    std::fs::write(path, article_xml(table_wraps))
}
