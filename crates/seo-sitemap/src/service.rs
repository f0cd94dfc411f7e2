//! Sitemap document generation over a content index.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use seo_config::Config;
use seo_content::{AUTHOR_TYPE, ContentIndex, Entity, EntityKind};

use crate::SitemapError;
use crate::hints::{ChangeFreq, Priority};
use crate::images::collect_images;
use crate::lastmod::LastModCache;
use crate::paginate::{page_count, page_offset};
use crate::section::SitemapSection;
use crate::xml::{IndexEntry, UrlEntry, render_index, render_urlset};

/// File name of the sitemap index.
pub const INDEX_FILE: &str = "sitemap_index.xml";

/// File name of the XSL stylesheet.
pub const STYLESHEET_FILE: &str = "sitemap.xsl";

/// Generation settings derived from [`Config`].
#[derive(Debug, Clone)]
pub struct SitemapSettings {
    /// Site root URL without trailing slash.
    pub site_url: String,
    /// Entities per page.
    pub page_size: usize,
    /// Included post types, in index order.
    pub post_types: Vec<String>,
    /// Allowed taxonomies, in index order.
    pub taxonomies: Vec<String>,
    /// Whether the author section is generated.
    pub include_authors: bool,
    /// Whether `<image:image>` entries are emitted.
    pub include_images: bool,
    /// Id of the page configured as homepage.
    pub home_id: Option<u64>,
}

impl SitemapSettings {
    /// Extract sitemap settings.
    ///
    /// An unseeded taxonomy allow-list yields no taxonomy sections.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            site_url: config.site.url.trim_end_matches('/').to_owned(),
            page_size: config.sitemap.page_size,
            post_types: config.sitemap.post_types.clone(),
            taxonomies: config.sitemap.taxonomies.clone().unwrap_or_default(),
            include_authors: config.sitemap.include_authors,
            include_images: config.sitemap.include_images,
            home_id: config.site.home_id,
        }
    }

    fn absolute(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.site_url)
    }
}

/// Renders the sitemap index and section pages.
pub struct SitemapService {
    settings: SitemapSettings,
    index: Arc<dyn ContentIndex>,
    lastmod: LastModCache,
}

impl SitemapService {
    /// Create a service.
    #[must_use]
    pub fn new(settings: SitemapSettings, index: Arc<dyn ContentIndex>, lastmod: LastModCache) -> Self {
        Self {
            settings,
            index,
            lastmod,
        }
    }

    /// Generation settings.
    #[must_use]
    pub fn settings(&self) -> &SitemapSettings {
        &self.settings
    }

    /// Check whether entities of a type are listed in the sitemap.
    ///
    /// Used to decide whether a publish event warrants a search engine ping.
    #[must_use]
    pub fn qualifies(&self, kind: EntityKind, type_name: &str) -> bool {
        match kind {
            EntityKind::Post => self.settings.post_types.iter().any(|t| t == type_name),
            EntityKind::Term => self.settings.taxonomies.iter().any(|t| t == type_name),
            EntityKind::Author => self.settings.include_authors && type_name == AUTHOR_TYPE,
        }
    }

    /// Render a document by its wire file name.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::NotFound`] for names that are not sitemap
    /// addresses or address an unavailable section.
    pub fn render(&self, file_name: &str, now: DateTime<Utc>) -> Result<String, SitemapError> {
        if file_name == INDEX_FILE {
            return self.render_index();
        }
        let section = SitemapSection::parse(file_name)
            .ok_or_else(|| SitemapError::NotFound(file_name.to_owned()))?;
        self.render_section(&section, now)
    }

    /// Render the sitemap index.
    ///
    /// Sections with no entities are omitted. Configured types the content
    /// index does not know, or whose names cannot be addressed by a file
    /// name, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::Content`] if the content index fails.
    pub fn render_index(&self) -> Result<String, SitemapError> {
        let mut entries = Vec::new();

        for (kind, type_name) in self.sections() {
            let first = SitemapSection::new(kind, type_name, 1);
            if SitemapSection::parse(&first.file_name()).as_ref() != Some(&first) {
                tracing::warn!(kind = %kind, type_name, "Skipping unaddressable sitemap type");
                continue;
            }

            let count = match self.index.count(kind, type_name) {
                Ok(count) => count,
                Err(err) if err.is_not_found() => {
                    tracing::warn!(kind = %kind, type_name, "Skipping unregistered sitemap type");
                    continue;
                }
                Err(err) => return Err(SitemapError::Content(err)),
            };
            let pages = page_count(count, self.settings.page_size);
            if pages == 0 {
                continue;
            }

            let lastmod = self
                .lastmod
                .get_or_load(kind, type_name, || self.index.last_modified(kind, type_name))
                .map_err(SitemapError::from_content)?
                .map(format_lastmod);

            entries.extend((1..=pages).map(|page| IndexEntry {
                loc: self
                    .settings
                    .absolute(&SitemapSection::new(kind, type_name, page).file_name()),
                lastmod: lastmod.clone(),
            }));
        }

        Ok(render_index(&entries, &self.stylesheet_url()))
    }

    /// Render one section page.
    ///
    /// Page 1 of an included type with no entities renders an empty urlset.
    ///
    /// # Errors
    ///
    /// Returns [`SitemapError::NotFound`] for types that are unknown or not
    /// included, and for pages past the last one.
    pub fn render_section(
        &self,
        section: &SitemapSection,
        now: DateTime<Utc>,
    ) -> Result<String, SitemapError> {
        let not_found = || SitemapError::NotFound(section.file_name());

        if !self.qualifies(section.kind, &section.type_name) {
            return Err(not_found());
        }

        let count = self
            .index
            .count(section.kind, &section.type_name)
            .map_err(SitemapError::from_content)?;
        if section.page == 0 || section.page > page_count(count, self.settings.page_size).max(1) {
            return Err(not_found());
        }

        let entities = self
            .index
            .list(
                section.kind,
                &section.type_name,
                self.settings.page_size,
                page_offset(section.page, self.settings.page_size),
            )
            .map_err(SitemapError::from_content)?;

        let entries: Vec<UrlEntry> = entities
            .iter()
            .map(|entity| match section.kind {
                EntityKind::Post => self.post_entry(entity, now),
                EntityKind::Term | EntityKind::Author => archive_entry(entity),
            })
            .collect();

        tracing::debug!(section = %section, urls = entries.len(), "Rendered sitemap page");
        Ok(render_urlset(&entries, &self.stylesheet_url()))
    }

    /// Absolute URL of the XSL stylesheet.
    #[must_use]
    pub fn stylesheet_url(&self) -> String {
        self.settings.absolute(STYLESHEET_FILE)
    }

    /// `(kind, type_name)` pairs listed in the index, in order.
    fn sections(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        let posts = self
            .settings
            .post_types
            .iter()
            .map(|t| (EntityKind::Post, t.as_str()));
        let terms = self
            .settings
            .taxonomies
            .iter()
            .map(|t| (EntityKind::Term, t.as_str()));
        let authors = self
            .settings
            .include_authors
            .then_some((EntityKind::Author, AUTHOR_TYPE));

        posts.chain(terms).chain(authors)
    }

    fn post_entry(&self, entity: &Entity, now: DateTime<Utc>) -> UrlEntry {
        let images = if self.settings.include_images {
            collect_images(entity, &self.settings.site_url)
        } else {
            Vec::new()
        };

        UrlEntry {
            loc: entity.url.clone(),
            lastmod: Some(format_lastmod(entity.modified_at)),
            changefreq: ChangeFreq::from_age(entity.modified_at, now),
            priority: Priority::for_post(entity, self.settings.home_id),
            images,
        }
    }
}

fn archive_entry(entity: &Entity) -> UrlEntry {
    UrlEntry {
        loc: entity.url.clone(),
        lastmod: None,
        changefreq: ChangeFreq::Weekly,
        priority: Priority::ARCHIVE,
        images: Vec::new(),
    }
}

/// W3C datetime with second precision and a numeric offset.
fn format_lastmod(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use seo_cache::{MemoryCache, NullCache};
    use seo_content::MemoryContentIndex;

    use super::*;

    const SITE: &str = "https://example.com";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn settings() -> SitemapSettings {
        SitemapSettings {
            site_url: SITE.to_owned(),
            page_size: 1000,
            post_types: vec!["post".to_owned(), "page".to_owned()],
            taxonomies: vec!["category".to_owned()],
            include_authors: true,
            include_images: true,
            home_id: Some(1),
        }
    }

    fn post(id: u64, minutes_ago: i64) -> Entity {
        Entity::new(
            id,
            EntityKind::Post,
            "post",
            format!("{SITE}/?p={id}"),
            now() - chrono::Duration::minutes(minutes_ago),
        )
    }

    fn posts(count: u64) -> MemoryContentIndex {
        MemoryContentIndex::new()
            .with_post_type("post")
            .with_post_type("page")
            .with_taxonomy("category")
            .with_entities((1..=count).map(|id| post(id, i64::try_from(id).unwrap())))
    }

    fn service_with(index: MemoryContentIndex, settings: SitemapSettings) -> SitemapService {
        SitemapService::new(
            settings,
            Arc::new(index),
            LastModCache::new(&NullCache, Duration::from_secs(3600)),
        )
    }

    fn service(index: MemoryContentIndex) -> SitemapService {
        service_with(index, settings())
    }

    fn locs(xml: &str) -> Vec<&str> {
        xml.lines()
            .filter_map(|line| {
                line.trim()
                    .strip_prefix("<loc>")
                    .and_then(|rest| rest.strip_suffix("</loc>"))
            })
            .collect()
    }

    #[test]
    fn test_index_paginates_large_section() {
        let xml = service(posts(2500)).render_index().unwrap();

        assert_eq!(
            locs(&xml),
            vec![
                "https://example.com/post-sitemap.xml",
                "https://example.com/post-sitemap2.xml",
                "https://example.com/post-sitemap3.xml",
            ]
        );
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let service = service(posts(2500));

        let page3 = service.render("post-sitemap3.xml", now()).unwrap();
        assert_eq!(page3.matches("<url>").count(), 500);

        let page1 = service.render("post-sitemap.xml", now()).unwrap();
        assert_eq!(page1.matches("<url>").count(), 1000);
    }

    #[test]
    fn test_pages_partition_entities() {
        let mut settings = settings();
        settings.page_size = 7;
        let service = service_with(posts(30), settings);

        let mut seen = Vec::new();
        for page in 1..=5 {
            let section = SitemapSection::new(EntityKind::Post, "post", page);
            let xml = service.render_section(&section, now()).unwrap();
            seen.extend(locs(&xml).into_iter().map(str::to_owned));
        }

        let expected: Vec<String> = (1..=30).map(|id| format!("{SITE}/?p={id}")).collect();
        assert_eq!(seen, expected);
        assert!(
            service
                .render_section(&SitemapSection::new(EntityKind::Post, "post", 6), now())
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_unknown_type_is_not_found() {
        let err = service(posts(3))
            .render("unknown_type-sitemap.xml", now())
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_registered_but_excluded_type_is_not_found() {
        let index = posts(3).with_post_type("product");

        let err = service(index).render("product-sitemap.xml", now()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_non_sitemap_name_is_not_found() {
        let err = service(posts(3)).render("feed.xml", now()).unwrap_err();

        assert!(matches!(err, SitemapError::NotFound(name) if name == "feed.xml"));
    }

    #[test]
    fn test_empty_included_type_renders_empty_first_page() {
        let service = service(posts(3));

        let xml = service.render("page-sitemap.xml", now()).unwrap();
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));

        assert!(service.render("page-sitemap2.xml", now()).is_err());
    }

    #[test]
    fn test_index_omits_empty_sections_and_unregistered_types() {
        let mut settings = settings();
        settings.post_types.push("recipe".to_owned());
        let index = posts(2).with_entity(Entity::new(
            7,
            EntityKind::Author,
            AUTHOR_TYPE,
            format!("{SITE}/author/jane/"),
            now(),
        ));

        let xml = service_with(index, settings).render_index().unwrap();

        assert_eq!(
            locs(&xml),
            vec![
                "https://example.com/post-sitemap.xml",
                "https://example.com/author-sitemap.xml",
            ]
        );
    }

    #[test]
    fn test_every_index_link_renders() {
        let mut settings = settings();
        settings.page_size = 2;
        settings.post_types = vec!["post".to_owned(), "top10".to_owned(), "how-to".to_owned()];
        settings.taxonomies = vec!["genre".to_owned(), "post_tag".to_owned()];
        let entity = |id: u64, kind: EntityKind, type_name: &str| {
            Entity::new(id, kind, type_name, format!("{SITE}/e/{id}/"), now())
        };
        let index = posts(5)
            .with_post_type("top10")
            .with_post_type("how-to")
            .with_taxonomy("genre")
            .with_taxonomy("post_tag")
            .with_entities((10..13).map(|id| entity(id, EntityKind::Post, "top10")))
            .with_entities((20..21).map(|id| entity(id, EntityKind::Post, "how-to")))
            .with_entities((30..33).map(|id| entity(id, EntityKind::Term, "genre")))
            .with_entities((40..42).map(|id| entity(id, EntityKind::Term, "post_tag")))
            .with_entities((50..53).map(|id| entity(id, EntityKind::Author, AUTHOR_TYPE)));
        let service = service_with(index, settings);

        let xml = service.render_index().unwrap();
        let links = locs(&xml);

        assert_eq!(links.len(), 3 + 2 + 1 + 2 + 1 + 2);
        for link in links {
            let file_name = link.strip_prefix("https://example.com/").unwrap();
            let page = service.render(file_name, now()).unwrap();
            assert!(page.contains("<url>"), "{file_name}");
        }
    }

    #[test]
    fn test_index_skips_unaddressable_types() {
        let mut settings = settings();
        settings.post_types = vec!["post".to_owned(), "Product".to_owned(), "author".to_owned()];
        settings.include_authors = false;
        let index = posts(2)
            .with_post_type("Product")
            .with_post_type("author")
            .with_entity(Entity::new(
                8,
                EntityKind::Post,
                "Product",
                format!("{SITE}/product/mug/"),
                now(),
            ))
            .with_entity(Entity::new(
                9,
                EntityKind::Post,
                "author",
                format!("{SITE}/author-post/"),
                now(),
            ));

        let xml = service_with(index, settings).render_index().unwrap();

        assert_eq!(locs(&xml), vec!["https://example.com/post-sitemap.xml"]);
    }

    #[test]
    fn test_index_lastmod_from_newest_entity() {
        let xml = service(posts(5)).render_index().unwrap();

        assert!(xml.contains("<lastmod>2025-06-01T11:59:00+00:00</lastmod>"));
    }

    #[test]
    fn test_index_lastmod_is_memoized() {
        let cache = MemoryCache::new();
        let index = Arc::new(posts(2));
        let first = SitemapService::new(
            settings(),
            index,
            LastModCache::new(&cache, Duration::from_secs(3600)),
        );
        first.render_index().unwrap();

        // Newer content, same cache: the memoized value is still served.
        let newer = posts(2).with_entity(post(99, -60));
        let second = SitemapService::new(
            settings(),
            Arc::new(newer),
            LastModCache::new(&cache, Duration::from_secs(3600)),
        );
        let xml = second.render_index().unwrap();

        assert!(xml.contains("<lastmod>2025-06-01T11:59:00+00:00</lastmod>"));
    }

    #[test]
    fn test_post_entry_fields() {
        let index = MemoryContentIndex::new()
            .with_post_type("page")
            .with_entity(
                Entity::new(1, EntityKind::Post, "page", format!("{SITE}/"), now())
                    .with_featured_image(format!("{SITE}/cover.png")),
            );
        let mut settings = settings();
        settings.post_types = vec!["page".to_owned()];

        let xml = service_with(index, settings)
            .render("page-sitemap.xml", now())
            .unwrap();

        let expected = "\
<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<?xml-stylesheet type=\"text/xsl\" href=\"https://example.com/sitemap.xsl\"?>
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2025-06-01T12:00:00+00:00</lastmod>
    <changefreq>hourly</changefreq>
    <priority>1.0</priority>
    <image:image>
      <image:loc>https://example.com/cover.png</image:loc>
    </image:image>
  </url>
</urlset>
";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_images_disabled() {
        let index = MemoryContentIndex::new().with_post_type("post").with_entity(
            post(1, 5).with_content(r#"<img src="/a.png">"#),
        );
        let mut settings = settings();
        settings.include_images = false;

        let xml = service_with(index, settings)
            .render("post-sitemap.xml", now())
            .unwrap();

        assert!(!xml.contains("image:image"));
    }

    #[test]
    fn test_taxonomy_page_entries() {
        let index = posts(0).with_entity(Entity::new(
            3,
            EntityKind::Term,
            "category",
            format!("{SITE}/category/news/"),
            now(),
        ));

        let xml = service(index)
            .render("category-taxonomy-sitemap.xml", now())
            .unwrap();

        assert!(xml.contains("<loc>https://example.com/category/news/</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.4</priority>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_disabled_authors_not_found() {
        let mut settings = settings();
        settings.include_authors = false;

        let err = service_with(posts(1), settings)
            .render("author-sitemap.xml", now())
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_every_document_references_stylesheet() {
        let service = service(posts(3));
        let pi = "<?xml-stylesheet type=\"text/xsl\" href=\"https://example.com/sitemap.xsl\"?>";

        for name in [INDEX_FILE, "post-sitemap.xml", "author-sitemap.xml"] {
            let xml = service.render(name, now()).unwrap();
            assert_eq!(xml.lines().nth(1), Some(pi), "{name}");
        }
    }

    #[test]
    fn test_qualifies() {
        let service = service(posts(1));

        assert!(service.qualifies(EntityKind::Post, "post"));
        assert!(service.qualifies(EntityKind::Term, "category"));
        assert!(service.qualifies(EntityKind::Author, AUTHOR_TYPE));
        assert!(!service.qualifies(EntityKind::Post, "product"));
        assert!(!service.qualifies(EntityKind::Term, "post_tag"));
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::from_toml_str(
            "[site]\nurl = \"https://example.com/\"\nhome_id = 2\n",
            std::path::Path::new("/tmp"),
        )
        .unwrap();

        let settings = SitemapSettings::from_config(&config);

        assert_eq!(settings.site_url, "https://example.com");
        assert_eq!(settings.post_types, vec!["post", "page"]);
        assert!(settings.taxonomies.is_empty());
        assert_eq!(settings.home_id, Some(2));
    }
}
