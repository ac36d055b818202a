use std::time::{SystemTime, UNIX_EPOCH};

use url::Url;

const FALLBACK_PREFIX: &str = "downloaded_image";

pub fn derive_filename(url: &Url, content_type: &str) -> String {
    let candidate = last_path_segment(url);

    let filename = match candidate {
        Some(name) if name.contains('.') => name.to_string(),
        _ => fallback_filename(content_type, unix_timestamp()),
    };

    final_component(&filename)
        .map(str::to_string)
        .unwrap_or_else(|| fallback_filename(content_type, unix_timestamp()))
}

fn last_path_segment(url: &Url) -> Option<&str> {
    url.path().rsplit('/').next().filter(|s| !s.is_empty())
}

/// Returns `None` when nothing usable is left (`""`, `.`, `..`).
pub fn final_component(name: &str) -> Option<&str> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);

    match last {
        "" | "." | ".." => None,
        _ => Some(last),
    }
}

pub fn fallback_filename(content_type: &str, epoch: u64) -> String {
    let subtype = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim();

    let subtype = final_component(subtype).unwrap_or("img");

    format!("{FALLBACK_PREFIX}_{epoch}.{subtype}")
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn uses_last_segment_with_extension() {
        let name = derive_filename(&url("https://example.com/pics/cat.jpg"), "image/jpeg");

        assert_eq!(name, "cat.jpg");
    }

    #[test]
    fn ignores_query_and_fragment() {
        let name = derive_filename(&url("https://example.com/cat.png?size=large#top"), "image/png");

        assert_eq!(name, "cat.png");
    }

    #[test]
    fn root_path_falls_back_to_subtype() {
        let name = derive_filename(&url("https://example.com/"), "image/png");

        assert!(name.starts_with("downloaded_image_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn segment_without_dot_falls_back() {
        let name = derive_filename(&url("https://example.com/avatar"), "image/webp");

        assert!(name.starts_with("downloaded_image_"));
        assert!(name.ends_with(".webp"));
    }

    #[test]
    fn dot_segments_never_escape() {
        let name = derive_filename(&url("https://example.com/../../etc/passwd.png"), "image/png");

        assert_eq!(name, "passwd.png");
    }

    #[test]
    fn encoded_separators_reduced_to_final_component() {
        // Percent-encoded names stay encoded, so they cannot contain a real separator.
        let name = derive_filename(&url("https://example.com/..%2F..%2Fpasswd.png"), "image/png");

        assert_eq!(name, "..%2F..%2Fpasswd.png");
        assert!(!name.contains('/'));
    }

    #[test]
    fn final_component_strips_both_separators() {
        assert_eq!(final_component("../../etc/passwd.png"), Some("passwd.png"));
        assert_eq!(final_component("..\\..\\boot.ini"), Some("boot.ini"));
        assert_eq!(final_component("a/b\\c.gif"), Some("c.gif"));
        assert_eq!(final_component("plain.bmp"), Some("plain.bmp"));
    }

    #[test]
    fn final_component_rejects_dot_names() {
        assert_eq!(final_component(""), None);
        assert_eq!(final_component("."), None);
        assert_eq!(final_component(".."), None);
        assert_eq!(final_component("dir/"), None);
    }

    #[test]
    fn fallback_drops_parameters() {
        assert_eq!(
            fallback_filename("image/jpeg; charset=binary", 1700000000),
            "downloaded_image_1700000000.jpeg"
        );
        assert_eq!(
            fallback_filename("image/svg+xml", 42),
            "downloaded_image_42.svg+xml"
        );
    }

    #[test]
    fn fallback_subtype_cannot_inject_path() {
        let name = fallback_filename("image/..", 7);

        assert_eq!(name, "downloaded_image_7.img");
    }
}
