//! URL template expansion for tiles, glyphs and sprites.

/// Glyph range fetched first by the widget (basic Latin).
pub const DEFAULT_GLYPH_RANGE: &str = "0-255";

/// Expand a `{z}/{x}/{y}` tile template.
pub fn resolve_tile_url(template: &str, z: u8, x: u32, y: u32) -> String {
    template
        .replace("{z}", &z.to_string())
        .replace("{x}", &x.to_string())
        .replace("{y}", &y.to_string())
}

/// Expand a `{fontstack}/{range}` glyph template.
///
/// The font stack is comma-joined and spaces are percent-encoded.
pub fn resolve_glyph_url(template: &str, fontstack: &[String], range: &str) -> String {
    let stack = fontstack.join(",").replace(' ', "%20");
    template
        .replace("{fontstack}", &stack)
        .replace("{range}", range)
}

/// Sprite index and atlas locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteUrls {
    pub json: String,
    pub png: String,
}

/// Derive the sprite index/atlas URLs from the sprite base URL.
pub fn sprite_urls(base: &str) -> SpriteUrls {
    let base = base.trim_end_matches('/');
    SpriteUrls {
        json: format!("{}.json", base),
        png: format!("{}.png", base),
    }
}
