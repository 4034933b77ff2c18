//! DTOs for decoding the GitHub repository listing response.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::ports::CodeRepository;

#[derive(Debug, Deserialize)]
pub(super) struct RepositoryDto {
    pub(super) name: String,
    pub(super) full_name: String,
    pub(super) html_url: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) language: Option<String>,
    #[serde(default)]
    pub(super) stargazers_count: u64,
    #[serde(default)]
    pub(super) watchers_count: u64,
    #[serde(default)]
    pub(super) forks_count: u64,
    pub(super) created_at: DateTime<Utc>,
}

impl From<RepositoryDto> for CodeRepository {
    fn from(dto: RepositoryDto) -> Self {
        Self {
            name: dto.name,
            full_name: dto.full_name,
            html_url: dto.html_url,
            description: dto.description,
            language: dto.language,
            stars: dto.stargazers_count,
            watchers: dto.watchers_count,
            forks: dto.forks_count,
            created_at: dto.created_at,
        }
    }
}
