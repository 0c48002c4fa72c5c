use serde::{Deserialize, Deserializer};

/// Status value the API uses for disabled triggers and hosts.
pub const STATUS_DISABLED: u8 = 1;

/// Open problem as returned by `problem.get`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Problem {
    #[serde(rename = "eventid", deserialize_with = "de_u64")]
    pub event_id: u64,
    #[serde(rename = "r_eventid", default, deserialize_with = "de_u64")]
    pub related_event_id: u64,
    /// Trigger id for trigger-sourced problems
    #[serde(rename = "objectid", deserialize_with = "de_u64")]
    pub object_id: u64,
    #[serde(deserialize_with = "de_u64")]
    pub clock: u64,
    #[serde(rename = "ns", default, deserialize_with = "de_u64")]
    pub nanoseconds: u64,
    #[serde(deserialize_with = "de_u8")]
    pub severity: u8,
    #[serde(default, deserialize_with = "de_flag")]
    pub suppressed: bool,
    #[serde(default)]
    pub name: String,
}

/// Acknowledgement state from `event.get`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Event {
    #[serde(rename = "eventid", deserialize_with = "de_u64")]
    pub event_id: u64,
    #[serde(default, deserialize_with = "de_flag")]
    pub acknowledged: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Trigger {
    #[serde(rename = "triggerid", deserialize_with = "de_u64")]
    pub trigger_id: u64,
    #[serde(deserialize_with = "de_u8")]
    pub status: u8,
    #[serde(default)]
    pub error: String,
    #[serde(default, deserialize_with = "de_flag")]
    pub suppressed: bool,
    #[serde(default, deserialize_with = "de_u64")]
    pub flags: u64,
    #[serde(default, deserialize_with = "de_u64")]
    pub value: u64,
    #[serde(default)]
    pub hosts: Vec<Host>,
    #[serde(default)]
    pub items: Vec<TriggerItem>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Host {
    #[serde(rename = "hostid", deserialize_with = "de_u64")]
    pub host_id: u64,
    #[serde(rename = "host", default)]
    pub name: String,
    #[serde(deserialize_with = "de_u8")]
    pub status: u8,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TriggerItem {
    #[serde(rename = "hostid", deserialize_with = "de_u64")]
    pub host_id: u64,
    #[serde(deserialize_with = "de_u8")]
    pub status: u8,
}

impl Trigger {
    pub fn is_disabled(&self) -> bool {
        self.status == STATUS_DISABLED
    }
}

impl Host {
    pub fn is_disabled(&self) -> bool {
        self.status == STATUS_DISABLED
    }
}

/// The API encodes integers as JSON strings; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(u64),
    Text(String),
}

fn de_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid integer '{}': {}", s, e))),
    }
}

fn de_u8<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = de_u64(deserializer)?;
    u8::try_from(value).map_err(|_| serde::de::Error::custom(format!("value {} out of range", value)))
}

fn de_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_u64(deserializer)? != 0)
}
