//! Speculative loading of full-resolution assets around the current item.
//!
//! Requests are fire-and-forget. Each carries a [`LoadTicket`]; the host
//! reports completion by handing a [`LoadResult`] back to the controller,
//! which drops results whose ticket is no longer current.

use crate::media::model::{MediaReference, MediaType};
use crate::resolver::{to_full_screen_url, to_video_thumbnail, ThumbnailQuality};
use std::sync::mpsc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    FullImage,
    VideoPoster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub index: usize,
    pub generation: u64,
    pub kind: AssetKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub ticket: LoadTicket,
    pub outcome: LoadOutcome,
}

pub trait Prefetcher {
    fn prefetch(&self, request: LoadRequest);
}

impl<P: Prefetcher + ?Sized> Prefetcher for std::rc::Rc<P> {
    fn prefetch(&self, request: LoadRequest) {
        (**self).prefetch(request)
    }
}

/// Current index first, then its wrapped neighbours, without repeats.
pub fn prefetch_order(current: usize, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let prev = (current + len - 1) % len;
    let next = (current + 1) % len;
    let mut order = vec![current];
    for idx in [prev, next] {
        if !order.contains(&idx) {
            order.push(idx);
        }
    }
    order
}

/// Asset worth warming for one item, if any. Videos only have a poster
/// still, and only when the link is a recognisable YouTube video.
pub fn asset_for(item: &MediaReference) -> Option<(AssetKind, String)> {
    match item.media_type {
        MediaType::Photo => Some((AssetKind::FullImage, to_full_screen_url(item))),
        MediaType::Video => to_video_thumbnail(&item.raw_url, ThumbnailQuality::MaxRes)
            .map(|url| (AssetKind::VideoPoster, url)),
    }
}

pub fn plan_requests(items: &[MediaReference], current: usize, generation: u64) -> Vec<LoadRequest> {
    prefetch_order(current, items.len())
        .into_iter()
        .filter_map(|index| {
            let (kind, url) = asset_for(&items[index])?;
            Some(LoadRequest {
                ticket: LoadTicket {
                    index,
                    generation,
                    kind,
                },
                url,
            })
        })
        .collect()
}

/// Fetches each request on its own thread and posts the result to a channel
/// the host drains between events. No cap and no cancellation; superseded
/// results are filtered by generation on the receiving side.
pub struct HttpPrefetcher {
    client: reqwest::blocking::Client,
    results: mpsc::Sender<LoadResult>,
}

impl HttpPrefetcher {
    pub fn new() -> reqwest::Result<(Self, mpsc::Receiver<LoadResult>)> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok((
            Self {
                client,
                results: tx,
            },
            rx,
        ))
    }
}

impl Prefetcher for HttpPrefetcher {
    fn prefetch(&self, request: LoadRequest) {
        let client = self.client.clone();
        let results = self.results.clone();
        std::thread::spawn(move || {
            let outcome = match client.get(&request.url).send() {
                Ok(resp) if resp.status().is_success() => match resp.bytes() {
                    Ok(_) => LoadOutcome::Loaded,
                    Err(e) => LoadOutcome::Failed(e.to_string()),
                },
                Ok(resp) => LoadOutcome::Failed(format!("HTTP {}", resp.status())),
                Err(e) => LoadOutcome::Failed(e.to_string()),
            };
            tracing::debug!("prefetch done: {:?} {:?}", request.ticket, outcome);
            // Receiver gone means the host has shut down; nothing to update.
            let _ = results.send(LoadResult {
                ticket: request.ticket,
                outcome,
            });
        });
    }
}
