//! Corpus persistence.
//!
//! - [`table`]: writes records to a delimited flat file and loads them back
//!
//! # Output Structure
//!
//! ```text
//! news.csv
//! news_headline,news_article,news_category,full_text,normalized_text,tagged_text
//! "India win series","India beat ...",sports,"India win series. India beat ...",...
//! ```

pub mod table;
