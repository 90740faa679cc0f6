//! Tile URL resolution: template substitution and sub-domain sharding.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{core::geo::TileIndex, MapError, Result};

/// Matches `{name}` placeholders, tolerating spaces inside the braces.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{ *([\w_]+) *\}").expect("placeholder pattern is valid"));

/// Signature of a computed URL source: `(column, row, zoom) -> url`
pub type UrlFn = dyn Fn(i64, i64, u32) -> String + Send + Sync;

/// Where tile URLs come from.
#[derive(Clone)]
pub enum UrlSource {
    /// A template such as `https://{s}.tile.example/{z}/{x}/{y}.png`
    Literal(String),
    /// A function whose result is used verbatim
    Computed(Arc<UrlFn>),
}

impl UrlSource {
    pub fn literal(template: impl Into<String>) -> Self {
        UrlSource::Literal(template.into())
    }

    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(i64, i64, u32) -> String + Send + Sync + 'static,
    {
        UrlSource::Computed(Arc::new(f))
    }

    /// An empty literal template counts as no source at all
    pub fn is_empty(&self) -> bool {
        matches!(self, UrlSource::Literal(template) if template.is_empty())
    }
}

impl std::fmt::Debug for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlSource::Literal(template) => f.debug_tuple("Literal").field(template).finish(),
            UrlSource::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

impl From<&str> for UrlSource {
    fn from(template: &str) -> Self {
        UrlSource::literal(template)
    }
}

impl From<String> for UrlSource {
    fn from(template: String) -> Self {
        UrlSource::Literal(template)
    }
}

impl Serialize for UrlSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            UrlSource::Literal(template) => serializer.serialize_str(template),
            UrlSource::Computed(_) => Err(serde::ser::Error::custom(MapError::UnserializableSource)),
        }
    }
}

impl<'de> Deserialize<'de> for UrlSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(UrlSource::Literal)
    }
}

/// How a negative `(column + row) % len` shard is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShardPolicy {
    /// Negative shards use the first sub-domain. Matches the URLs other
    /// clients of the same tile servers produce.
    #[default]
    Clamp,
    /// Negative shards wrap around (Euclidean modulo)
    Wrap,
}

impl ShardPolicy {
    /// Index into a sub-domain list of length `len` (which must be non-zero)
    pub fn shard(&self, column: i64, row: i64, len: usize) -> usize {
        let len = len as i64;
        let sum = column + row;
        let shard = match self {
            ShardPolicy::Clamp => (sum % len).max(0),
            ShardPolicy::Wrap => sum.rem_euclid(len),
        };
        shard as usize
    }
}

/// Resolves tile indices to fetch URLs for one layer configuration.
#[derive(Debug, Clone, Copy)]
pub struct UrlResolver<'a> {
    source: Option<&'a UrlSource>,
    subdomains: &'a [String],
    error_tile_url: &'a str,
    shard_policy: ShardPolicy,
}

impl<'a> UrlResolver<'a> {
    pub fn new(
        source: Option<&'a UrlSource>,
        subdomains: &'a [String],
        error_tile_url: &'a str,
    ) -> Self {
        Self {
            source,
            subdomains,
            error_tile_url,
            shard_policy: ShardPolicy::default(),
        }
    }

    pub fn with_shard_policy(mut self, shard_policy: ShardPolicy) -> Self {
        self.shard_policy = shard_policy;
        self
    }

    /// Sub-domain for a tile, or `""` when there are none configured
    pub fn subdomain_for(&self, index: &TileIndex) -> &'a str {
        if self.subdomains.is_empty() {
            return "";
        }
        let shard = self
            .shard_policy
            .shard(index.column, index.row, self.subdomains.len());
        &self.subdomains[shard]
    }

    /// URL for a tile, sharded across the configured sub-domains
    pub fn resolve(&self, index: &TileIndex) -> Result<String> {
        self.resolve_on(index, self.subdomain_for(index))
    }

    /// URL for a tile on an explicit shard, e.g. to retry on another host.
    /// The shard is taken modulo the number of sub-domains.
    pub fn resolve_with_shard(&self, index: &TileIndex, shard: usize) -> Result<String> {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            &self.subdomains[shard % self.subdomains.len()]
        };
        self.resolve_on(index, subdomain)
    }

    fn resolve_on(&self, index: &TileIndex, subdomain: &str) -> Result<String> {
        match self.source {
            None => Ok(self.error_tile_url.to_string()),
            Some(source) if source.is_empty() => Ok(self.error_tile_url.to_string()),
            Some(UrlSource::Computed(f)) => Ok(f(index.column, index.row, index.zoom)),
            Some(UrlSource::Literal(template)) => {
                expand_template(template, index.column, index.row, index.zoom, subdomain)
            }
        }
    }
}

/// Substitutes `{x}`, `{y}`, `{z}` and `{s}` in `template`.
///
/// Any other placeholder is an error: a template that cannot be fully
/// resolved would produce a broken URL for every tile.
pub fn expand_template(
    template: &str,
    column: i64,
    row: i64,
    zoom: u32,
    subdomain: &str,
) -> Result<String> {
    let mut url = String::with_capacity(template.len() + 16);
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        url.push_str(&template[last..whole.start()]);
        match name.as_str() {
            "x" => url.push_str(&column.to_string()),
            "y" => url.push_str(&row.to_string()),
            "z" => url.push_str(&zoom.to_string()),
            "s" => url.push_str(subdomain),
            _ => return Err(MapError::Template(whole.as_str().to_string())),
        }
        last = whole.end();
    }

    url.push_str(&template[last..]);
    Ok(url)
}
