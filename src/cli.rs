use clap::{Parser, Subcommand};
use crate::export::ExportFormat;
use report_map_common::{MapPoint, ReportStatus, ZoomDirection};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "report-map")]
#[command(about = "市民通報マップ - マーカー配置・クリック投影・描画コマンド出力ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// レイアウト系コマンド共通の引数
#[derive(clap::Args, Clone, Debug, Default)]
pub struct LayoutArgs {
    /// ビューポート幅(px)（省略時は設定値）
    #[arg(long)]
    pub width: Option<f64>,

    /// ビューポート高さ(px)（省略時は設定値）
    #[arg(long)]
    pub height: Option<f64>,

    /// 揺らぎのシード（指定すると配置を再現できる）
    #[arg(long, conflicts_with = "stable")]
    pub seed: Option<u64>,

    /// 入力のIDからシードを導出（同じ入力なら同じ配置）
    #[arg(long)]
    pub stable: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 通報をマーカー配置してJSONを出力
    Layout {
        /// 通報JSONファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// クリック位置(px)を緯度経度に変換
    Project {
        /// クリックX(px)
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,

        /// クリックY(px)
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,

        /// ビューポート幅(px)
        #[arg(long)]
        width: Option<f64>,

        /// ビューポート高さ(px)
        #[arg(long)]
        height: Option<f64>,

        /// 地図中心 "緯度,経度"（省略時は設定値）
        #[arg(long, allow_hyphen_values = true)]
        center: Option<MapPoint>,
    },

    /// 描画コマンドを出力（JSON/SVG）
    Render {
        /// 通報JSONファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// 出力形式 (json/svg)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        #[command(flatten)]
        layout: LayoutArgs,

        /// 地点選択モードで描画
        #[arg(long)]
        select: bool,

        /// 選択地点 "緯度,経度"
        #[arg(long, allow_hyphen_values = true)]
        selected: Option<MapPoint>,

        /// ズームレベル (1-18)
        #[arg(long)]
        zoom: Option<u8>,

        /// ステータスで絞り込み (pending/in-progress/completed)
        #[arg(long)]
        status: Option<String>,

        /// 種類・概要の部分一致で絞り込み
        #[arg(long)]
        search: Option<String>,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// ズーム操作の結果を表示
    Zoom {
        /// 方向 (in/out)
        #[arg(required = true)]
        direction: ZoomDirection,

        /// 開始ズーム（省略時は設定値）
        #[arg(long)]
        from: Option<u8>,

        /// 操作回数
        #[arg(long, default_value = "1")]
        steps: u32,
    },

    /// 現在地へ地図中心を移動
    Locate {
        /// 地点選択モード（取得した現在地を選択地点として通知）
        #[arg(long)]
        select: bool,
    },

    /// 凡例（ステータスと色）を表示
    Legend,

    /// ステータス別件数を表示
    Stats {
        /// 通報JSONファイルまたはフォルダ
        #[arg(required = true)]
        input: PathBuf,

        /// ステータスで絞り込み
        #[arg(long)]
        status: Option<String>,

        /// 種類・概要の部分一致で絞り込み
        #[arg(long)]
        search: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の地図中心を設定 "緯度,経度"
        #[arg(long, allow_hyphen_values = true)]
        set_center: Option<MapPoint>,

        /// 現在地として使う座標を設定 "緯度,経度"
        #[arg(long, allow_hyphen_values = true)]
        set_location: Option<MapPoint>,

        /// 現在地の設定を削除
        #[arg(long)]
        clear_location: bool,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `--status` の値をステータスへ
pub fn parse_status(value: Option<&str>) -> Option<ReportStatus> {
    value.map(ReportStatus::parse)
}
