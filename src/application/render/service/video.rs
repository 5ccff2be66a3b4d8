//! Third-party video links normalised into embeddable URLs.

const YOUTUBE_WATCH: &str = "youtube.com/watch";
const YOUTUBE_SHORT: &str = "youtu.be/";
const VIMEO: &str = "vimeo.com/";
const VIMEO_PLAYER: &str = "player.vimeo.com/video/";
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const VIMEO_EMBED_BASE: &str = "https://player.vimeo.com/video/";
const NATIVE_EXTENSIONS: [&str; 2] = [".mp4", ".webm"];

/// Normalises `url` into an embed URL. `None` only for absent or empty input; any link whose
/// id cannot be extracted is returned unchanged.
pub fn normalize_video_url(url: Option<&str>) -> Option<String> {
    let url = url.map(str::trim).filter(|url| !url.is_empty())?;

    let normalized = if url.contains(YOUTUBE_WATCH) {
        youtube_watch_id(url).map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
    } else if url.contains(YOUTUBE_SHORT) {
        path_id_after(url, YOUTUBE_SHORT).map(|id| format!("{YOUTUBE_EMBED_BASE}{id}"))
    } else if url.contains(VIMEO) && !url.contains(VIMEO_PLAYER) {
        path_id_after(url, VIMEO).map(|id| format!("{VIMEO_EMBED_BASE}{id}"))
    } else {
        None
    };

    Some(normalized.unwrap_or_else(|| url.to_string()))
}

/// Whether `url` points at a file a native `<video>` element can play.
pub fn is_native_video(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let lowered = path.to_ascii_lowercase();
    NATIVE_EXTENSIONS
        .iter()
        .any(|extension| lowered.ends_with(extension))
}

/// Raw `v=` value up to the next `&`, left exactly as written.
fn youtube_watch_id(url: &str) -> Option<&str> {
    let before_fragment = url.split('#').next().unwrap_or(url);
    let (_, query) = before_fragment.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("v="))
        .filter(|id| !id.is_empty())
}

fn path_id_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    let id = rest.split(['?', '#']).next().unwrap_or(rest);
    (!id.is_empty()).then_some(id)
}
