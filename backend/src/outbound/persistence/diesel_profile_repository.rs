//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! Each profile is one row. Scalars and skills are columns; social links and
//! both entry sections are JSONB documents. `save` is a single
//! `INSERT .. ON CONFLICT (user_id) DO UPDATE`, so a write lands whole.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileScalars, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

fn encode<T: Serialize + ?Sized>(
    column: &str,
    value: &T,
) -> Result<serde_json::Value, ProfileRepositoryError> {
    serde_json::to_value(value)
        .map_err(|err| ProfileRepositoryError::query(format!("encode {column}: {err}")))
}

fn decode<T: DeserializeOwned>(
    column: &str,
    value: serde_json::Value,
) -> Result<T, ProfileRepositoryError> {
    serde_json::from_value(value)
        .map_err(|err| ProfileRepositoryError::query(format!("decode {column}: {err}")))
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let ProfileRow {
        user_id,
        company,
        website,
        location,
        bio,
        status,
        githubusername,
        skills,
        social,
        experience,
        education,
        created_at,
        updated_at,
    } = row;

    Ok(Profile::from_parts(
        UserId::from_uuid(user_id),
        ProfileScalars {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
        },
        skills,
        decode("social", social)?,
        decode("experience", experience)?,
        decode("education", education)?,
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_profile).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProfileRow> = profiles::table
            .order(profiles::created_at.asc())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let row = NewProfileRow {
            id: Uuid::new_v4(),
            user_id: *profile.user_id().as_uuid(),
            company: profile.company(),
            website: profile.website(),
            location: profile.location(),
            bio: profile.bio(),
            status: profile.status(),
            githubusername: profile.githubusername(),
            skills: profile.skills(),
            social: encode("social", profile.social())?,
            experience: encode("experience", profile.experience())?,
            education: encode("education", profile.education())?,
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(profiles::table)
            .values(&row)
            .on_conflict(profiles::user_id)
            .do_update()
            .set((
                profiles::company.eq(excluded(profiles::company)),
                profiles::website.eq(excluded(profiles::website)),
                profiles::location.eq(excluded(profiles::location)),
                profiles::bio.eq(excluded(profiles::bio)),
                profiles::status.eq(excluded(profiles::status)),
                profiles::githubusername.eq(excluded(profiles::githubusername)),
                profiles::skills.eq(excluded(profiles::skills)),
                profiles::social.eq(excluded(profiles::social)),
                profiles::experience.eq(excluded(profiles::experience)),
                profiles::education.eq(excluded(profiles::education)),
                profiles::updated_at.eq(excluded(profiles::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(profiles::table.filter(profiles::user_id.eq(user_id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    fn row(experience: serde_json::Value) -> ProfileRow {
        ProfileRow {
            user_id: Uuid::new_v4(),
            company: Some("Acme".to_owned()),
            website: None,
            location: None,
            bio: None,
            status: Some("Developer".to_owned()),
            githubusername: None,
            skills: vec!["rust".to_owned()],
            social: json!({ "twitter": "https://twitter.example/ada" }),
            experience,
            education: json!([]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_to_profile_decodes_documents() {
        let profile = row_to_profile(row(json!([{
            "id": "0b0f3c6e-8d9a-4f5e-9c41-1d2a5b7e6f80",
            "title": "Engineer",
            "company": "Acme",
            "location": null,
            "from": "2020-01-01",
            "to": null,
            "current": true,
            "description": null,
        }])))
        .expect("well formed row");

        assert_eq!(profile.company(), Some("Acme"));
        assert_eq!(
            profile.social().twitter.as_deref(),
            Some("https://twitter.example/ada")
        );
        assert_eq!(profile.experience().len(), 1);
        assert_eq!(profile.experience()[0].title, "Engineer");
    }

    #[rstest]
    fn row_to_profile_rejects_malformed_documents() {
        let err = row_to_profile(row(json!({ "not": "a list" })))
            .expect_err("object is not an entry list");
        assert!(matches!(err, ProfileRepositoryError::Query { .. }));
        assert!(err.to_string().contains("decode experience"));
    }
}
