//! Demo asset pools for image and video attachments
//!
//! The pools are fixed at compile time; every dispatch draws uniformly at
//! random, so identical prompts may yield different assets. Nothing is
//! cached or deduplicated.

use rand::{Rng, RngCore};

/// Placeholder images served by a keyed placeholder service
pub const IMAGE_POOL: &[&str] = &[
    "https://picsum.photos/seed/neuro-aurora/1024/768",
    "https://picsum.photos/seed/neuro-canyon/1024/768",
    "https://picsum.photos/seed/neuro-harbor/1024/768",
    "https://picsum.photos/seed/neuro-meadow/1024/768",
    "https://picsum.photos/seed/neuro-skyline/1024/768",
    "https://picsum.photos/seed/neuro-tundra/1024/768",
];

/// Public sample clips from the Google test video bucket
pub const VIDEO_POOL: &[&str] = &[
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerEscapes.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
];

/// Picks a random image URL from the demo pool
pub fn random_image_url(rng: &mut dyn RngCore) -> &'static str {
    IMAGE_POOL[rng.random_range(0..IMAGE_POOL.len())]
}

/// Picks a random video URL from the demo pool
pub fn random_video_url(rng: &mut dyn RngCore) -> &'static str {
    VIDEO_POOL[rng.random_range(0..VIDEO_POOL.len())]
}

/// Derives a download file name from an asset URL
///
/// Takes the last path segment; falls back to the supplied default when the
/// URL has no usable segment.
pub fn file_name_from_url(url: &str, default: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Derives a download file name for a pooled image URL
///
/// The placeholder service keys images by the `seed/<name>` path segment
/// while the trailing segments are dimensions, so the seed segment names the
/// file. URLs without a seed segment fall back to the last-segment rule.
pub fn image_file_name(url: &str) -> String {
    url.split('/')
        .skip_while(|segment| *segment != "seed")
        .nth(1)
        .filter(|seed| !seed.is_empty())
        .map(|seed| format!("{}.jpg", seed))
        .unwrap_or_else(|| file_name_from_url(url, "image.png"))
}
