//! 受験番号による成績照会
//!
//! フロー本体（状態機械・照合）は `results_lookup_common` にあり、
//! このクレートはCLI向けの非同期ドライバ・設定・描画を提供する。

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod dataset;
pub mod error;
pub mod interactive;
pub mod render;
pub mod verifier;
