//! Seeded demo portfolio with simple allocation metrics.

use axum::Json;
use serde::Serialize;

/// Wallet label reported for the demo portfolio.
pub const DEMO_WALLET: &str = "0xDEMO_WALLET";

pub const DEMO_NOTE: &str =
    "MVP uses seeded demo data. Next: LangGraph agent + x402 premium endpoint + Opik tracing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Crypto,
    Stablecoin,
    Nft,
}

#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub symbol: &'static str,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub value_usd: f64,
    pub chain: &'static str,
}

pub const DEMO_PORTFOLIO: [Position; 5] = [
    Position { symbol: "ETH", kind: AssetKind::Crypto, value_usd: 4200.0, chain: "Ethereum" },
    Position { symbol: "USDC", kind: AssetKind::Stablecoin, value_usd: 1800.0, chain: "Base" },
    Position { symbol: "SOL", kind: AssetKind::Crypto, value_usd: 1200.0, chain: "Solana" },
    Position { symbol: "ARB", kind: AssetKind::Crypto, value_usd: 600.0, chain: "Arbitrum" },
    Position { symbol: "NFT-ABC", kind: AssetKind::Nft, value_usd: 400.0, chain: "Ethereum" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concentration {
    pub top1_pct: f64,
    pub top5_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StableRatio {
    pub stable_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_usd: f64,
    pub concentration: Concentration,
    pub stable_ratio: StableRatio,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    pub wallet: &'static str,
    pub positions: Vec<Position>,
    pub metrics: Metrics,
    pub note: &'static str,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn total_value(positions: &[Position]) -> f64 {
    positions.iter().map(|p| p.value_usd).sum()
}

/// Share of the largest and the five largest positions, in percent.
pub fn concentration(positions: &[Position]) -> Concentration {
    let total = nonzero(total_value(positions));
    let mut values: Vec<f64> = positions.iter().map(|p| p.value_usd).collect();
    values.sort_by(|a, b| b.total_cmp(a));

    let top1 = values.first().copied().unwrap_or_default();
    let top5: f64 = values.iter().take(5).sum();

    Concentration {
        top1_pct: round2(top1 / total * 100.0),
        top5_pct: round2(top5 / total * 100.0),
    }
}

pub fn stable_ratio(positions: &[Position]) -> StableRatio {
    let total = nonzero(total_value(positions));
    let stable: f64 = positions
        .iter()
        .filter(|p| p.kind == AssetKind::Stablecoin)
        .map(|p| p.value_usd)
        .sum();

    StableRatio {
        stable_pct: round2(stable / total * 100.0),
    }
}

/// An empty portfolio divides by one instead of zero.
fn nonzero(total: f64) -> f64 {
    if total == 0.0 {
        1.0
    } else {
        total
    }
}

pub fn metrics(positions: &[Position]) -> Metrics {
    Metrics {
        total_usd: round2(total_value(positions)),
        concentration: concentration(positions),
        stable_ratio: stable_ratio(positions),
    }
}

/// Demo portfolio endpoint.
pub async fn portfolio_demo() -> Json<PortfolioReport> {
    let positions = DEMO_PORTFOLIO.to_vec();
    Json(PortfolioReport {
        wallet: DEMO_WALLET,
        metrics: metrics(&positions),
        positions,
        note: DEMO_NOTE,
    })
}
