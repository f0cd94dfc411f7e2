//! CLI command implementations.

pub(crate) mod generate_meta;
pub(crate) mod robots;
pub(crate) mod serve;
pub(crate) mod sitemap;

pub(crate) use generate_meta::GenerateMetaArgs;
pub(crate) use robots::RobotsArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use sitemap::SitemapArgs;
