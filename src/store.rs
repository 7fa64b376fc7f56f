//! Profile persistence
//!
//! One row per identity in SQLite. Columns stay NULL until the onboarding
//! flow captures them. `fetch_or_create` is idempotent; the engine treats
//! any store error as a hard stop for the current turn.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::info;

use crate::profile::{OnboardingState, UserProfile};

/// Store error taxonomy
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence seam for user profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a profile, creating a blank one for an unseen identity.
    async fn fetch_or_create(&self, identity: &str) -> Result<UserProfile, StoreError>;

    /// Persist the full record for the profile's identity.
    async fn update(&self, profile: &UserProfile) -> Result<(), StoreError>;

    /// All profiles, for the dashboard aggregates.
    async fn all(&self) -> Result<Vec<UserProfile>, StoreError>;
}

/// SQLite-backed profile store
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
}

impl SqliteProfileStore {
    /// Open or create the profile database.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        info!("Profile store opened: {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                phone TEXT PRIMARY KEY,
                name TEXT,
                age INTEGER,
                height REAL,
                weight REAL,
                bmi REAL,
                bmi_category TEXT,
                city TEXT,
                fam_name TEXT,
                fam_relation TEXT,
                family_member TEXT,
                checkins INTEGER NOT NULL DEFAULT 0,
                state TEXT NOT NULL DEFAULT 'new',
                msg_count INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_users_state ON users(state);
            "#,
        )?;
        Ok(())
    }

    fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<UserProfile> {
        let state: String = row.get("state")?;
        Ok(UserProfile {
            identity: row.get("phone")?,
            name: row.get("name")?,
            age: row.get("age")?,
            height_cm: row.get("height")?,
            weight_kg: row.get("weight")?,
            bmi: row.get("bmi")?,
            bmi_category: row.get("bmi_category")?,
            city: row.get("city")?,
            family_member_name: row.get("fam_name")?,
            family_member_relation: row.get("fam_relation")?,
            family_member: row.get("family_member")?,
            checkins: row.get::<_, i64>("checkins")?.max(0) as u32,
            state: OnboardingState::from_str_or_new(&state),
            message_count: row.get::<_, i64>("msg_count")?.max(0) as u32,
        })
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn fetch_or_create(&self, identity: &str) -> Result<UserProfile, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR IGNORE INTO users (phone, state, checkins, msg_count) VALUES (?1, 'new', 0, 0)",
            params![identity],
        )?;
        let profile = conn
            .query_row(
                "SELECT phone, name, age, height, weight, bmi, bmi_category, city,
                        fam_name, fam_relation, family_member, checkins, state, msg_count
                 FROM users WHERE phone = ?1",
                params![identity],
                Self::row_to_profile,
            )
            .optional()?
            .unwrap_or_else(|| UserProfile::new(identity));
        Ok(profile)
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "UPDATE users SET
                name = ?2, age = ?3, height = ?4, weight = ?5, bmi = ?6,
                bmi_category = ?7, city = ?8, fam_name = ?9, fam_relation = ?10,
                family_member = ?11, checkins = ?12, state = ?13, msg_count = ?14
             WHERE phone = ?1",
            params![
                profile.identity,
                profile.name,
                profile.age,
                profile.height_cm,
                profile.weight_kg,
                profile.bmi,
                profile.bmi_category,
                profile.city,
                profile.family_member_name,
                profile.family_member_relation,
                profile.family_member,
                profile.checkins as i64,
                profile.state.as_str(),
                profile.message_count as i64,
            ],
        )?;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<UserProfile>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT phone, name, age, height, weight, bmi, bmi_category, city,
                    fam_name, fam_relation, family_member, checkins, state, msg_count
             FROM users ORDER BY phone",
        )?;
        let profiles = stmt
            .query_map([], Self::row_to_profile)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(profiles)
    }
}

/// In-memory store for unit tests and the engine scenario tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<String, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_or_create(&self, identity: &str) -> Result<UserProfile, StoreError> {
        let mut profiles = self.profiles.lock().await;
        Ok(profiles
            .entry(identity.to_string())
            .or_insert_with(|| UserProfile::new(identity))
            .clone())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let mut profiles = self.profiles.lock().await;
        profiles.insert(profile.identity.clone(), profile.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<UserProfile>, StoreError> {
        let profiles = self.profiles.lock().await;
        let mut all: Vec<_> = profiles.values().cloned().collect();
        all.sort_by(|a, b| a.identity.cmp(&b.identity));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_or_create_is_idempotent() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        let first = store.fetch_or_create("+911234567890").await.unwrap();
        assert_eq!(first.state, OnboardingState::New);

        let second = store.fetch_or_create("+911234567890").await.unwrap();
        assert_eq!(second.identity, first.identity);
        assert_eq!(store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_round_trips_all_fields() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        let mut profile = store.fetch_or_create("+911234567890").await.unwrap();

        profile.name = Some("Alice".to_string());
        profile.age = Some(29);
        profile.height_cm = Some(165.0);
        profile.weight_kg = Some(60.0);
        profile.bmi = Some(22.0);
        profile.bmi_category = Some("Normal".to_string());
        profile.city = Some("Mumbai".to_string());
        profile.family_member_name = Some("Raj".to_string());
        profile.family_member_relation = Some("Parent".to_string());
        profile.family_member = Some("Raj (Parent)".to_string());
        profile.checkins = 3;
        profile.state = OnboardingState::Ready;
        profile.message_count = 9;
        store.update(&profile).await.unwrap();

        let read_back = store.fetch_or_create("+911234567890").await.unwrap();
        assert_eq!(read_back.name.as_deref(), Some("Alice"));
        assert_eq!(read_back.age, Some(29));
        assert_eq!(read_back.bmi, Some(22.0));
        assert_eq!(read_back.family_member.as_deref(), Some("Raj (Parent)"));
        assert_eq!(read_back.checkins, 3);
        assert_eq!(read_back.state, OnboardingState::Ready);
        assert_eq!(read_back.message_count, 9);
    }

    #[tokio::test]
    async fn partial_profile_keeps_nulls() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        let mut profile = store.fetch_or_create("+911234567890").await.unwrap();
        profile.name = Some("Alice".to_string());
        profile.state = OnboardingState::AwaitingAge;
        store.update(&profile).await.unwrap();

        let read_back = store.fetch_or_create("+911234567890").await.unwrap();
        assert_eq!(read_back.name.as_deref(), Some("Alice"));
        assert!(read_back.age.is_none());
        assert!(read_back.height_cm.is_none());
        assert!(read_back.bmi.is_none());
    }

    #[tokio::test]
    async fn open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sampark.db");
        let store = SqliteProfileStore::open(&path).unwrap();
        store.fetch_or_create("+911111111111").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn memory_store_mirrors_sqlite_contract() {
        let store = MemoryProfileStore::new();
        let mut profile = store.fetch_or_create("x").await.unwrap();
        profile.checkins = 5;
        store.update(&profile).await.unwrap();
        assert_eq!(store.fetch_or_create("x").await.unwrap().checkins, 5);
        assert_eq!(store.all().await.unwrap().len(), 1);
    }
}
