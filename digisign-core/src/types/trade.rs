use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Checkout flow selected for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    /// In-store QR code payment.
    #[serde(rename = "NATIVE")]
    Native,
    /// Mobile web (H5) payment with a redirect after checkout.
    #[serde(rename = "MWEB")]
    Mweb,
    /// WeChat mini-program payment.
    #[serde(rename = "MINIAPP")]
    MiniApp,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Native => "NATIVE",
            TradeType::Mweb => "MWEB",
            TradeType::MiniApp => "MINIAPP",
        }
    }
}

impl Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NATIVE" => Ok(TradeType::Native),
            "MWEB" => Ok(TradeType::Mweb),
            "MINIAPP" => Ok(TradeType::MiniApp),
            other => Err(Error::params_invalid(format!("unknown trade type '{other}'"))),
        }
    }
}
