pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 300;
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 300;

/// Append an ImageKit `tr=` transformation to a delivery URL.
pub fn with_transformation(url: &str, transformation: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}tr={transformation}")
}

/// Derived URL that asks the CDN for a copy fitting inside `width`×`height`.
pub fn thumbnail_url(url: &str, width: u32, height: u32) -> String {
    with_transformation(url, &format!("w-{width},h-{height},c-at_max"))
}

pub fn default_thumbnail_url(url: &str) -> String {
    thumbnail_url(url, DEFAULT_THUMBNAIL_WIDTH, DEFAULT_THUMBNAIL_HEIGHT)
}

/// Thumbnail for `url` when it is served from `endpoint`; other hosts
/// don't understand the transformation and get the original URL.
pub fn endpoint_thumbnail_url(url: &str, endpoint: &str, width: u32, height: u32) -> String {
    if url.starts_with(endpoint) {
        thumbnail_url(url, width, height)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_parameters() {
        assert_eq!(
            thumbnail_url("https://ik.imagekit.io/demo/a.jpg", 640, 480),
            "https://ik.imagekit.io/demo/a.jpg?tr=w-640,h-480,c-at_max"
        );
    }

    #[test]
    fn default_is_300_square() {
        assert_eq!(
            default_thumbnail_url("https://x/y.png"),
            "https://x/y.png?tr=w-300,h-300,c-at_max"
        );
    }

    #[test]
    fn existing_query_is_extended() {
        assert_eq!(
            thumbnail_url("https://x/y.png?v=2", 10, 20),
            "https://x/y.png?v=2&tr=w-10,h-20,c-at_max"
        );
    }

    #[test]
    fn foreign_hosts_are_left_alone() {
        let endpoint = "https://ik.imagekit.io/demo";
        assert_eq!(
            endpoint_thumbnail_url("https://example.com/a.jpg", endpoint, 10, 10),
            "https://example.com/a.jpg"
        );
        assert_eq!(
            endpoint_thumbnail_url("https://ik.imagekit.io/demo/a.jpg", endpoint, 10, 10),
            "https://ik.imagekit.io/demo/a.jpg?tr=w-10,h-10,c-at_max"
        );
    }
}
