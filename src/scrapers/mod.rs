//! Category page scrapers.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Inshorts | [`inshorts`] | HTML card matching on category listing pages |
//!
//! A scraper turns one seed page address into [`RawArticle`](crate::models::RawArticle)s
//! tagged with the page's category. Pages are scraped one after another and
//! the first failure aborts the whole batch.

pub mod inshorts;
