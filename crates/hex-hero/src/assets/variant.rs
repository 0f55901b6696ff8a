use serde::{Deserialize, Serialize};

/// Path segment of a public object in storage.
const OBJECT_SEGMENT: &str = "/storage/v1/object/public/";
/// Path segment of the image-transform endpoint for the same object.
const RENDER_SEGMENT: &str = "/storage/v1/render/image/public/";

/// Requested size and quality of an image variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Target width in pixels.
    pub width: u32,
    /// Encoder quality, 1-100.
    pub quality: u32,
}

impl VariantSpec {
    pub const LOW: VariantSpec = VariantSpec { width: 100, quality: 60 };
    pub const HIGH: VariantSpec = VariantSpec { width: 1200, quality: 100 };
}

/// Rewrite an object-storage URL to its resized variant.
///
/// `https://host/storage/v1/object/public/bucket/a.jpg` becomes
/// `https://host/storage/v1/render/image/public/bucket/a.jpg?width=W&quality=Q`.
/// Any existing query or fragment is dropped. URLs of any other shape come
/// back unchanged, which degrades to the original asset at full size.
pub fn derive_variant_url(source: &str, spec: VariantSpec) -> String {
    match split_origin(source) {
        Some((origin, path)) if path.contains(OBJECT_SEGMENT) => {
            let path = path.replacen(OBJECT_SEGMENT, RENDER_SEGMENT, 1);
            format!(
                "{origin}{path}?width={}&quality={}",
                spec.width, spec.quality
            )
        }
        _ => source.to_string(),
    }
}

/// Split `scheme://[user@]host/path?query#fragment` into `("scheme://host", "/path")`.
/// Userinfo is not part of the origin and is dropped.
fn split_origin(url: &str) -> Option<(String, &str)> {
    let (scheme, rest) = url.split_once("://")?;
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }

    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_len];
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }

    let tail = &rest[authority_len..];
    let path_len = tail.find(['?', '#']).unwrap_or(tail.len());
    Some((format!("{scheme}://{host}"), &tail[..path_len]))
}
