//! マーカー配置
//!
//! 通報を入力順に5列のグリッドへ並べ、各マーカーにランダムな揺らぎを加える。
//!
//! - 列 = i mod 5、行 = floor(i / 5)
//! - 位置(%) = 20 + 列(行) × 15 + 揺らぎ[0, 10)、0〜85に制限
//! - 座標が欠損した通報は描画しないが、インデックス i は消費する
//!
//! 揺らぎは既定で毎回異なる（`ThreadJitter`）。再現性が必要な場合は
//! `SeededJitter` を渡す。

use crate::geo::{ScreenPosition, Viewport};
use crate::types::MarkerReport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const COLUMNS: usize = 5;
pub const ORIGIN_PERCENT: f64 = 20.0;
pub const STEP_PERCENT: f64 = 15.0;
pub const JITTER_PERCENT: f64 = 10.0;
pub const MAX_PERCENT: f64 = 85.0;

/// [0, 1) の一様乱数の供給元
pub trait JitterSource {
    fn next_unit(&mut self) -> f64;
}

/// スレッドローカル乱数（再現性なし）
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// シード固定の乱数（同じ入力なら同じ配置）
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// 配置結果（`slot` は入力シーケンス上のインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPlacement {
    pub slot: usize,
    pub position: ScreenPosition,
}

impl MarkerPlacement {
    pub fn column(&self) -> usize {
        self.slot % COLUMNS
    }

    pub fn row(&self) -> usize {
        self.slot / COLUMNS
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedMarker<'a> {
    pub report: &'a MarkerReport,
    pub placement: MarkerPlacement,
}

/// 通報を配置する
///
/// 位置はビューポートに対する百分率なので、サイズ変更では再配置不要。
/// `viewport` はピクセル換算した位置をトレースに出すためだけに使う。
pub fn layout_markers<'a>(
    reports: &'a [MarkerReport],
    viewport: Viewport,
    jitter: &mut dyn JitterSource,
) -> Vec<PlacedMarker<'a>> {
    let mut placed = Vec::with_capacity(reports.len());

    for (slot, report) in reports.iter().enumerate() {
        if !report.has_coordinates() {
            tracing::debug!(report_id = %report.id, slot, "座標なしのためマーカーを省略");
            continue;
        }

        let column = (slot % COLUMNS) as f64;
        let row = (slot / COLUMNS) as f64;
        let x = ORIGIN_PERCENT + column * STEP_PERCENT + jitter.next_unit() * JITTER_PERCENT;
        let y = ORIGIN_PERCENT + row * STEP_PERCENT + jitter.next_unit() * JITTER_PERCENT;

        let position = ScreenPosition::new(x.clamp(0.0, MAX_PERCENT), y.clamp(0.0, MAX_PERCENT));
        let (px, py) = position.to_pixels(viewport);
        tracing::trace!(report_id = %report.id, slot, px, py, "マーカー配置");

        placed.push(PlacedMarker {
            report,
            placement: MarkerPlacement { slot, position },
        });
    }

    placed
}

/// 入力集合の指紋（ID列のSHA-256、16進）
pub fn input_fingerprint(reports: &[MarkerReport]) -> String {
    hex::encode(fingerprint_digest(reports))
}

/// 入力集合から導出するシード（`SeededJitter` 用）
pub fn stable_seed(reports: &[MarkerReport]) -> u64 {
    let digest = fingerprint_digest(reports);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn fingerprint_digest(reports: &[MarkerReport]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for report in reports {
        hasher.update(report.id.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().into()
}
