//! Integration tests for mime_range library

use mime_range::cache::{CacheConfig, ParseCache};
use mime_range::*;
use std::sync::Arc;

fn mt(s: &str) -> MediaType {
    MediaType::from_string(s).unwrap()
}

#[test]
fn test_negotiate_browser_accept() {
    // Typical browser navigation request
    let accept = MediaRange::from_string(
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    )
    .unwrap();

    let json = mt("application/json");
    let xml = mt("application/xml");
    let html = mt("text/html;charset=utf-8");

    // Only reachable through the catch-all
    let best = accept.query([&json]).unwrap();
    assert_eq!(best.pattern, MediaType::any());
    assert_eq!(best.quality, 80);

    let best = accept.query([&json, &xml]).unwrap();
    assert_eq!(best.candidate, &xml);
    assert_eq!(best.quality, 90);

    let best = accept.query([&json, &xml, &html]).unwrap();
    assert_eq!(best.candidate, &html);
    assert_eq!(best.pattern, &mt("text/html"));
    assert_eq!(best.quality, 100);
}

#[test]
fn test_negotiate_api_client() {
    let accept = range_from_string("application/json;version=2, application/json;q=0.5").unwrap();

    let v2 = mt("application/json;version=2");
    let v1 = mt("application/json;version=1");
    let bare = mt("application/json");

    assert_eq!(accept.quality(&v2), Some(100));
    // Only the parameterless pattern accepts version 1
    assert_eq!(accept.quality(&v1), Some(50));
    // The versioned pattern contains the bare candidate in reverse
    assert_eq!(accept.quality(&bare), Some(100));

    let best = accept.query([&v1, &v2]).unwrap();
    assert_eq!(best.candidate, &v2);
}

#[test]
fn test_file_type_negotiation() {
    let accept = MediaRange::from_string("image/*, text/plain;q=0.3").unwrap();
    let available: Vec<Arc<MediaType>> = ["photo.jpg", "notes.txt", "bundle.zip"]
        .iter()
        .map(|name| file_type(name).unwrap())
        .collect();

    let best = accept.query(available.iter().map(|t| t.as_ref())).unwrap();
    assert_eq!(best.candidate, &mt("image/jpeg"));
    assert_eq!(accept.quality(&available[2]), None);
}

#[test]
fn test_structured_subtypes() {
    let feed = type_from_string("application/rss").unwrap().push("xml");
    assert_eq!(feed.to_string(), "application/rss+xml");
    assert_eq!(&*type_from_string(lookup_extension("rss")).unwrap(), &feed);
    assert_eq!(feed.pop().to_string(), "application/rss");
}

#[test]
fn test_error_handling_chain() {
    assert!(matches!(
        type_from_string("no-slash"),
        Err(Error::MalformedType(_))
    ));
    assert!(matches!(
        range_from_string("text/html;q=maybe"),
        Err(Error::InvalidQuality(_))
    ));
    assert!(matches!(
        range_from_string("text/html;title=\"unterminated"),
        Err(Error::MalformedRange(_))
    ));
    assert!(matches!(
        type_from_bytes(b"text/\xc3"),
        Err(Error::Encoding(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_cache_across_tasks() {
    let cache: Arc<ParseCache<MediaRange>> = Arc::new(ParseCache::new(CacheConfig::new(4)));
    let headers = [
        "text/html, */*;q=0.1",
        "application/json",
        "image/*;q=0.5, image/png",
    ];

    let mut handles = Vec::new();
    for i in 0..32 {
        let cache = Arc::clone(&cache);
        let header = headers[i % headers.len()];
        handles.push(tokio::spawn(async move {
            let range = cache.parse(header).unwrap();
            range.quality(&MediaType::from_string("image/png").unwrap())
        }));
    }

    let mut qualities = Vec::new();
    for handle in handles {
        qualities.push(handle.await.unwrap());
    }

    assert!(qualities.contains(&Some(10)));
    assert!(qualities.contains(&None));
    assert!(qualities.contains(&Some(100)));
    assert!(cache.len() <= 4);

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 32);
    assert!(stats.misses >= headers.len() as u64);
}

#[tokio::test]
async fn test_values_move_between_tasks() {
    let range = range_from_string("text/*;q=0.7").unwrap();
    let quality = tokio::spawn(async move { range.quality(&mt("text/css")) })
        .await
        .unwrap();
    assert_eq!(quality, Some(70));
}
