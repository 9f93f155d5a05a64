//! Resource items returned by the DigitalOcean API.
//!
//! Only the fields the collectors read are modelled. Every field is
//! tolerant of missing or `null` values, which decode to the zero value.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default instead of failing.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Identifiers are numeric for some resources and UUID strings for others.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdInput {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<IdInput>::deserialize(deserializer)? {
        Some(IdInput::Number(id)) => id.to_string(),
        Some(IdInput::Text(id)) => id,
        None => String::new(),
    })
}

/// Account-level limits and status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, deserialize_with = "null_to_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub email_verified: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub droplet_limit: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub floating_ip_limit: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub volume_limit: u64,
    /// One of "active", "warning" or "locked"
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub status_message: String,
}

/// Region reference embedded in other resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Region {
    #[serde(default, deserialize_with = "null_to_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
}

/// Droplet size, including pricing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(default, deserialize_with = "null_to_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub price_monthly: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub price_hourly: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Droplet {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    /// Memory in MiB
    #[serde(default, deserialize_with = "null_to_default")]
    pub memory: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub vcpus: u64,
    /// Disk in GiB
    #[serde(default, deserialize_with = "null_to_default")]
    pub disk: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub locked: bool,
    /// One of "new", "active", "off" or "archive"
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub region: Region,
    #[serde(default, deserialize_with = "null_to_default")]
    pub size: Size,
    #[serde(default, deserialize_with = "null_to_default")]
    pub features: Vec<String>,
}

impl Droplet {
    /// Whether automated backups are enabled for this droplet.
    pub fn backups_enabled(&self) -> bool {
        self.features.iter().any(|feature| feature == "backups")
    }
}

/// Block storage volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Volume {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub region: Region,
    #[serde(default, deserialize_with = "null_to_default")]
    pub size_gigabytes: f64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub droplet_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadBalancer {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub ip: String,
    /// One of "new", "active" or "errored"
    #[serde(default, deserialize_with = "null_to_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub region: Region,
    #[serde(default, deserialize_with = "null_to_default")]
    pub droplet_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub ttl: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainRecord {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub record_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub data: String,
    #[serde(default)]
    pub priority: Option<u64>,
    #[serde(default)]
    pub port: Option<u64>,
    #[serde(default)]
    pub weight: Option<u64>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub ttl: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_to_default")]
    pub image_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub distribution: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub regions: Vec<String>,
    /// Minimum disk in GiB
    #[serde(default, deserialize_with = "null_to_default")]
    pub min_disk_size: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub size_gigabytes: f64,
}

/// SSH key registered with the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Key {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub regions: Vec<String>,
    #[serde(default, deserialize_with = "id_string")]
    pub resource_id: String,
    /// Either "droplet" or "volume"
    #[serde(default, deserialize_with = "null_to_default")]
    pub resource_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub min_disk_size: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub size_gigabytes: f64,
}

/// Droplet reference embedded in a floating IP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropletRef {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloatingIp {
    #[serde(default, deserialize_with = "null_to_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub region: Region,
    #[serde(default)]
    pub droplet: Option<DropletRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub locked: bool,
}
