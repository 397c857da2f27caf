//! Records decoded from the `data` object of KYT API responses

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::Error;

/// A label attached to a malicious address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// The tag category, e.g. `sanction`
    pub tag_type: String,
    /// The tag itself, e.g. `OFAC`
    pub tag: String,
}

/// Result of the malicious address lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaliceRecord {
    /// Whether the address is flagged as malicious
    pub is_malice: bool,
    /// The screened address
    pub address: String,
    /// Labels explaining the flag, in the order returned by the API
    pub tags: Vec<Tag>,
}

/// Result of the sanctioned address lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionRecord {
    /// Whether the address is under sanctions
    pub is_sanction: bool,
    /// The screened address
    pub address: String,
    /// The sanctions list, e.g. `OFAC`
    pub standard: String,
    /// The sanctioned entity
    pub entity: String,
}

/// Risk score of an address. No fields are known yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddrScore {}

/// Risk score of a transaction. No fields are known yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxScore {}

/// Fund flow summary of an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddrDetail {
    /// The address
    pub address: String,
    /// Current balance
    pub balance: f64,
    /// Total amount received
    pub received: f64,
    /// Total amount sent
    pub sent: f64,
    /// Number of incoming transactions
    pub inflow: u64,
    /// Number of outgoing transactions
    pub outflow: u64,
    /// Hash of the first transaction
    pub first_tx: String,
    /// Timestamp of the first transaction
    pub first_tx_time: u64,
    /// Amount moved by the first transaction
    pub first_tx_amount: f64,
    /// Hash of the last transaction
    pub last_tx: String,
    /// Timestamp of the last transaction
    pub last_tx_time: u64,
    /// Amount moved by the last transaction
    pub last_tx_amount: f64,
}

/// Details of a transaction. No fields are known yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxDetail {}
