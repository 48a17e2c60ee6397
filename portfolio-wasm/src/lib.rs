//! Bridge WASM <-> JavaScript trung lập framework cho timeline portfolio.

use chrono::Utc;
use portfolio_core::{
    compute_placement, portfolio_engagements, Engagement, Rect, Size, TimelineConfig,
    TimelineError, Viewport,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
struct JsTimelineConfig {
    #[serde(default)]
    min_year: Option<i32>,
    #[serde(default)]
    max_year: Option<i32>,
    #[serde(default)]
    future_extension_ms: Option<i64>,
    #[serde(default)]
    shine_threshold_percent: Option<f64>,
    #[serde(default)]
    tooltip_gap_px: Option<f64>,
    #[serde(default)]
    viewport_margin_px: Option<f64>,
}

impl From<JsTimelineConfig> for TimelineConfig {
    fn from(cfg: JsTimelineConfig) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(year) = cfg.min_year {
            base.min_year = year;
        }
        if let Some(year) = cfg.max_year {
            base.max_year = year;
        }
        if let Some(extension) = cfg.future_extension_ms {
            base.future_extension_ms = extension;
        }
        if let Some(threshold) = cfg.shine_threshold_percent {
            base.shine_threshold_percent = threshold;
        }
        if let Some(gap) = cfg.tooltip_gap_px {
            base.tooltip_gap_px = gap;
        }
        if let Some(margin) = cfg.viewport_margin_px {
            base.viewport_margin_px = margin;
        }
        base
    }
}

/// Dựng layout Gantt từ mảng engagement `{name, role, start, end, type, skills}`.
#[wasm_bindgen]
pub fn layout_timeline(engagements: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let records_value = from_value::<serde_json::Value>(engagements)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được danh sách engagement: {err}")))?;
    let records: Vec<Engagement> = serde_json::from_value(records_value)
        .map_err(|err| JsValue::from_str(&format!("Engagement không hợp lệ: {err}")))?;

    let cfg = parse_config(config)?;
    let layout = portfolio_core::layout_timeline(&records, &cfg, Utc::now())
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&layout).map_err(|err| JsValue::from_str(&format!("Không serialize layout: {err}")))
}

/// Bảng kinh nghiệm dựng sẵn của trang.
#[wasm_bindgen]
pub fn default_engagements() -> Result<JsValue, JsValue> {
    to_value(&portfolio_engagements())
        .map_err(|err| JsValue::from_str(&format!("Không serialize engagement: {err}")))
}

/// Tính vị trí tooltip từ khung thanh, kích thước tooltip và viewport.
#[wasm_bindgen]
pub fn place_tooltip(
    bar: JsValue,
    tooltip: JsValue,
    viewport: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    let bar: Rect = from_value(bar)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được khung thanh: {err}")))?;
    let tooltip: Size = from_value(tooltip)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được kích thước tooltip: {err}")))?;
    let viewport: Viewport = from_value(viewport)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được viewport: {err}")))?;
    let cfg = parse_config(config)?;

    to_value(&compute_placement(bar, tooltip, viewport, &cfg))
        .map_err(|err| JsValue::from_str(&format!("Không serialize vị trí: {err}")))
}

fn parse_config(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsTimelineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(TimelineConfig::from(cfg))
        }
        _ => Ok(TimelineConfig::default()),
    }
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}
