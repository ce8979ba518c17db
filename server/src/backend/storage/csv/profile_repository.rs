use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::connection::CsvConnection;
use crate::backend::domain::models::profile::{Profile, Role};
use crate::backend::storage::traits::ProfileStorage;

/// Intermediate struct for YAML serialization with string fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlProfile {
    id: String,
    full_name: String,
    email: String,
    #[serde(default)]
    phone: Option<String>,
    role: String,
    created_at: String,
}

impl YamlProfile {
    fn from_domain(profile: &Profile) -> Self {
        Self {
            id: profile.id.clone(),
            full_name: profile.full_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            role: profile.role.as_str().to_string(),
            created_at: profile.created_at.to_rfc3339(),
        }
    }

    fn into_domain(self) -> Result<Profile> {
        Ok(Profile {
            role: self
                .role
                .parse::<Role>()
                .with_context(|| format!("Invalid role for profile {}", self.id))?,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .with_context(|| format!("Failed to parse created_at for profile {}", self.id))?
                .with_timezone(&Utc),
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
        })
    }
}

/// Profile repository backed by `profiles.yaml`
#[derive(Clone)]
pub struct ProfileRepository {
    connection: CsvConnection,
}

impl ProfileRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn load_profiles(&self) -> Result<Vec<Profile>> {
        let records: Vec<YamlProfile> = self.connection.read_yaml_list(&self.connection.profiles_path())?;
        records.into_iter().map(YamlProfile::into_domain).collect()
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    async fn store_profile(&self, profile: &Profile) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        let path = self.connection.profiles_path();
        let mut records: Vec<YamlProfile> = self.connection.read_yaml_list(&path)?;
        if records.iter().any(|r| r.id == profile.id) {
            bail!("Profile already exists: {}", profile.id);
        }
        records.push(YamlProfile::from_domain(profile));
        self.connection.write_yaml_list(&path, &records)?;
        info!("Stored profile {} ({})", profile.id, profile.role);
        Ok(())
    }

    async fn get_profile(&self, profile_id: &str) -> Result<Option<Profile>> {
        Ok(self.load_profiles()?.into_iter().find(|p| p.id == profile_id))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut profiles = self.load_profiles()?;
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>> {
        let mut profiles: Vec<Profile> = self
            .load_profiles()?
            .into_iter()
            .filter(|p| p.role == role)
            .collect();
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }
}
