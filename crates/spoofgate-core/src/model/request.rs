//! Provisioning request (JSON opts handed over by the host pipeline).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::ids::{AccountId, NetworkId, RequestId};
use crate::error::{Result, SpoofGateError};

/// Account owning the instance being provisioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: AccountId,
    /// Remaining account attributes, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    pub fn new(uuid: AccountId) -> Self {
        Self {
            uuid,
            extra: Map::new(),
        }
    }
}

/// Network identifier as the host sent it.
///
/// Anything that is not a UUID is kept verbatim so it round-trips to the host;
/// it can never match a policy entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkRef {
    Id(NetworkId),
    Opaque(Value),
}

impl NetworkRef {
    pub fn as_id(&self) -> Option<NetworkId> {
        match self {
            NetworkRef::Id(id) => Some(*id),
            NetworkRef::Opaque(_) => None,
        }
    }
}

impl From<NetworkId> for NetworkRef {
    fn from(id: NetworkId) -> Self {
        NetworkRef::Id(id)
    }
}

/// One candidate network attachment for the new instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    /// Primary network identifier.
    #[serde(
        default,
        deserialize_with = "network_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub uuid: Option<NetworkRef>,
    /// IPv4-specific identifier of a dual-stack network.
    #[serde(
        default,
        deserialize_with = "network_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv4_uuid: Option<NetworkRef>,
    /// Privileged flag read by the network-virtualization layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ip_spoofing: Option<bool>,
    /// Remaining descriptor attributes (mac, primary, ips...), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkDescriptor {
    pub fn new(uuid: NetworkId) -> Self {
        Self {
            uuid: Some(uuid.into()),
            ..Self::default()
        }
    }

    pub fn with_ipv4_uuid(mut self, ipv4_uuid: NetworkId) -> Self {
        self.ipv4_uuid = Some(ipv4_uuid.into());
        self
    }

    /// Identifier the policy is matched against: the IPv4 identifier when
    /// present, the primary identifier otherwise.
    pub fn effective_ref(&self) -> Option<&NetworkRef> {
        self.ipv4_uuid.as_ref().or(self.uuid.as_ref())
    }

    /// `effective_ref` when it is a UUID.
    pub fn effective_id(&self) -> Option<NetworkId> {
        self.effective_ref().and_then(NetworkRef::as_id)
    }

    pub fn is_privileged(&self) -> bool {
        self.allow_ip_spoofing == Some(true)
    }

    pub fn grant_ip_spoofing(&mut self) {
        self.allow_ip_spoofing = Some(true);
    }
}

/// Per-invocation request: owner account, ordered NIC candidates, trace id.
///
/// `account` and `req_id` decode as optional so that a request missing them
/// can still be reported as `InvalidRequest` by the filter instead of failing
/// somewhere inside serde. `networks` must always be a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    pub networks: Vec<NetworkDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<RequestId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProvisionRequest {
    pub fn new(account: AccountId, req_id: RequestId, networks: Vec<NetworkDescriptor>) -> Self {
        Self {
            account: Some(Account::new(account)),
            networks,
            req_id: Some(req_id),
            extra: Map::new(),
        }
    }

    /// Decode host opts from JSON text.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| SpoofGateError::InvalidRequest(format!("invalid request json: {e}")))
    }

    /// Decode host opts from an already-parsed JSON value.
    pub fn from_value(v: Value) -> Result<Self> {
        serde_json::from_value(v)
            .map_err(|e| SpoofGateError::InvalidRequest(format!("invalid request: {e}")))
    }

    pub fn account_id(&self) -> Option<AccountId> {
        self.account.as_ref().map(|a| a.uuid)
    }

    /// Check the identifiers every evaluation needs.
    pub fn identity(&self) -> Result<(AccountId, RequestId)> {
        let account = self
            .account_id()
            .ok_or_else(|| SpoofGateError::InvalidRequest("missing account".into()))?;
        let req_id = self
            .req_id
            .ok_or_else(|| SpoofGateError::InvalidRequest("missing req_id".into()))?;
        Ok((account, req_id))
    }
}

/// `null`, absent and `""` all mean "no identifier". Never fails on the
/// value itself: non-UUID ids stay `Opaque`.
fn network_ref<'de, D>(de: D) -> std::result::Result<Option<NetworkRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(de)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(match s.parse::<NetworkId>() {
            Ok(id) => NetworkRef::Id(id),
            Err(_) => NetworkRef::Opaque(Value::String(s)),
        }),
        Some(other) => Some(NetworkRef::Opaque(other)),
    })
}
