//! GitHub outbound adapters.
//!
//! Provides a thin HTTP implementation of the `RepositoryListingSource` port.

mod dto;
mod http_source;

pub use http_source::{
    GithubCredentials, GithubHttpSource, GithubSourceBuildError, LISTING_PAGE_SIZE,
};
