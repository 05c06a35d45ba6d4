//! Content feeds: sponsored and community-poll splicing, plus page assembly
//! for the home, search and shorts surfaces.

pub mod composer;
pub mod pages;

pub use composer::{compose, CommunityPoll, FeedItem};
pub use pages::{FeedBuilder, HomePage, SearchPage, ShortsFeed};
