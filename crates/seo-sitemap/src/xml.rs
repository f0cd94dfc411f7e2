//! XML document assembly.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <?xml-stylesheet type="text/xsl" href="https://example.com/sitemap.xsl"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01T00:00:00+00:00</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::hints::{ChangeFreq, Priority};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// One `<sitemap>` entry of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexEntry {
    /// Absolute URL of the section page.
    pub loc: String,
    /// W3C datetime of the newest entity in the section.
    pub lastmod: Option<String>,
}

/// One `<url>` entry of a urlset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlEntry {
    /// Absolute URL.
    pub loc: String,
    /// W3C datetime of the last modification.
    pub lastmod: Option<String>,
    /// Change frequency hint.
    pub changefreq: ChangeFreq,
    /// Priority hint.
    pub priority: Priority,
    /// Absolute image URLs.
    pub images: Vec<String>,
}

/// XML declaration and stylesheet processing instruction.
fn prolog(xml: &mut String, stylesheet_url: &str) {
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        xml,
        "<?xml-stylesheet type=\"text/xsl\" href=\"{}\"?>",
        escape(stylesheet_url)
    );
}

/// Render a `<sitemapindex>` document.
pub(crate) fn render_index(entries: &[IndexEntry], stylesheet_url: &str) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 128);
    prolog(&mut xml, stylesheet_url);
    let _ = writeln!(xml, "<sitemapindex xmlns=\"{SITEMAP_NS}\">");

    for entry in entries {
        xml.push_str("  <sitemap>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(entry.loc.as_str()));
        if let Some(lastmod) = &entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", escape(lastmod.as_str()));
        }
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Render a `<urlset>` document.
pub(crate) fn render_urlset(entries: &[UrlEntry], stylesheet_url: &str) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 256);
    prolog(&mut xml, stylesheet_url);
    let _ = writeln!(
        xml,
        "<urlset xmlns=\"{SITEMAP_NS}\" xmlns:image=\"{IMAGE_NS}\">"
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(entry.loc.as_str()));
        if let Some(lastmod) = &entry.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", escape(lastmod.as_str()));
        }
        let _ = writeln!(xml, "    <changefreq>{}</changefreq>", entry.changefreq);
        let _ = writeln!(xml, "    <priority>{}</priority>", entry.priority);
        for image in &entry.images {
            xml.push_str("    <image:image>\n");
            let _ = writeln!(
                xml,
                "      <image:loc>{}</image:loc>",
                escape(image.as_str())
            );
            xml.push_str("    </image:image>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
