//! Validation and normalization of `generate_graph_data` tool input.
//!
//! The model's output is untrusted. It is checked structurally before being decoded
//! into a [`ChartSpec`], reshaped for chart types that need it, and given stable
//! color slots.
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::errors::{AnalystError, AnalystResult};
use crate::models::chart::{ChartSpec, ChartType, SeriesConfig};

/// The key every pie chart row is labelled by after normalization
pub const PIE_SEGMENT_KEY: &str = "segment";
pub const PIE_VALUE_KEY: &str = "value";

/// Fallback fields tried, in order, when a pie row has no value under `xAxisKey`
const SEGMENT_FALLBACKS: [&str; 3] = ["segment", "category", "name"];

/// Deterministic color for the 1-based series position `slot`
pub fn color_slot(slot: usize) -> String {
    format!("color-slot-{}", slot)
}

/// Validate and transform tool input into a render-ready chart.
///
/// The input is never modified; the returned spec is a new value.
pub fn normalize_chart_data(input: &Value) -> AnalystResult<ChartSpec> {
    validate_shape(input)?;

    let mut object = input.as_object().cloned().unwrap_or_default();
    // null config objects are treated as absent
    for key in ["config", "chartConfig"] {
        if object.get(key).is_some_and(Value::is_null) {
            object.remove(key);
        }
    }
    let mut spec: ChartSpec = serde_json::from_value(Value::Object(object))
        .map_err(|e| AnalystError::InvalidChartData(e.to_string()))?;

    if spec.chart_type == ChartType::Pie {
        to_pie_segments(&mut spec);
    }
    assign_colors(&mut spec.chart_config);

    Ok(spec)
}

fn validate_shape(input: &Value) -> AnalystResult<()> {
    let invalid = |reason: String| Err(AnalystError::InvalidChartData(reason));

    let Some(object) = input.as_object() else {
        return invalid("tool input must be an object".to_string());
    };

    match object.get("chartType") {
        None | Some(Value::Null) => return invalid("chartType is required".to_string()),
        Some(Value::String(tag)) => {
            if ChartType::from_str(tag).is_err() {
                return invalid(format!("unknown chartType '{}'", tag));
            }
        }
        Some(_) => return invalid("chartType must be a string".to_string()),
    }

    match object.get("data") {
        Some(Value::Array(_)) => Ok(()),
        None | Some(Value::Null) => invalid("data is required".to_string()),
        Some(_) => invalid("data must be an array".to_string()),
    }
}

/// Rewrite every row as `{segment, value}` and pin the x axis to `segment`.
fn to_pie_segments(spec: &mut ChartSpec) {
    let value_key = spec.chart_config.keys().next().cloned();
    let segment_key = spec.config.x_axis_key().map(str::to_string);

    spec.data = spec
        .data
        .iter()
        .map(|row| {
            let value = value_key
                .as_deref()
                .and_then(|key| field(row, key))
                .or_else(|| field(row, PIE_VALUE_KEY));
            let segment = segment_key
                .as_deref()
                .and_then(|key| field(row, key))
                .or_else(|| SEGMENT_FALLBACKS.iter().find_map(|key| field(row, key)));

            let mut out = Map::new();
            out.insert(
                PIE_SEGMENT_KEY.to_string(),
                segment.cloned().unwrap_or(Value::Null),
            );
            out.insert(
                PIE_VALUE_KEY.to_string(),
                value.cloned().unwrap_or(Value::Null),
            );
            out
        })
        .collect();

    spec.config.set_x_axis_key(PIE_SEGMENT_KEY);
}

/// A row field counts as absent when missing or null
fn field<'a>(row: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|value| !value.is_null())
}

/// Overwrite each series color with its position in declaration order
fn assign_colors(chart_config: &mut IndexMap<String, SeriesConfig>) {
    for (index, series) in chart_config.values_mut().enumerate() {
        series.set_color(color_slot(index + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn revenue_chart(chart_type: &str) -> Value {
        json!({
            "chartType": chart_type,
            "config": {
                "title": "Quarterly revenue",
                "description": "Revenue and expenses by quarter",
                "trend": {"percentage": 12.5, "direction": "up"},
                "xAxisKey": "quarter"
            },
            "data": [
                {"quarter": "Q1", "revenue": 120, "expenses": 80},
                {"quarter": "Q2", "revenue": 135, "expenses": 90},
                {"quarter": "Q3", "revenue": 150, "expenses": 95}
            ],
            "chartConfig": {
                "revenue": {"label": "Revenue", "color": "red"},
                "expenses": {"label": "Expenses", "stacked": true}
            }
        })
    }

    fn colors(spec: &ChartSpec) -> Vec<(String, Option<String>)> {
        spec.chart_config
            .iter()
            .map(|(key, series)| (key.clone(), series.color().map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_non_pie_data_passes_through() {
        for chart_type in ChartType::iter().filter(|c| *c != ChartType::Pie) {
            let input = revenue_chart(chart_type.as_ref());
            let spec = normalize_chart_data(&input).unwrap();

            assert_eq!(spec.chart_type, chart_type);
            assert_eq!(json!(spec.data), input["data"]);
            assert_eq!(spec.config.x_axis_key(), Some("quarter"));
            assert_eq!(
                colors(&spec),
                vec![
                    ("revenue".to_string(), Some("color-slot-1".to_string())),
                    ("expenses".to_string(), Some("color-slot-2".to_string())),
                ]
            );
        }
    }

    #[test]
    fn test_colors_follow_declaration_order() {
        let mut input = revenue_chart("multiBar");
        input["chartConfig"] = json!({
            "zeta": {"label": "Z"},
            "alpha": {"label": "A"},
            "mid": {"label": "M"}
        });
        let spec = normalize_chart_data(&input).unwrap();
        let keys: Vec<&str> = spec.chart_config.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(spec.chart_config["zeta"].color(), Some("color-slot-1"));
        assert_eq!(spec.chart_config["mid"].color(), Some("color-slot-3"));
    }

    #[test]
    fn test_colors_are_idempotent() {
        for chart_type in ChartType::iter().filter(|c| *c != ChartType::Pie) {
            let first = normalize_chart_data(&revenue_chart(chart_type.as_ref())).unwrap();
            let second = normalize_chart_data(&serde_json::to_value(&first).unwrap()).unwrap();
            assert_eq!(first.chart_config, second.chart_config, "{}", chart_type);
            assert_eq!(first, second, "{}", chart_type);
        }
    }

    #[test]
    fn test_config_passes_through_unchanged() {
        let config = json!({
            "title": null,
            "description": "Off-schema values are not ours to judge",
            "trend": {"percentage": 12, "direction": "flat"},
            "footer": "Source: filings",
            "xAxisKey": "quarter",
            "subtitle": "FY2023"
        });
        for chart_type in ChartType::iter().filter(|c| *c != ChartType::Pie) {
            let mut input = revenue_chart(chart_type.as_ref());
            input["config"] = config.clone();
            let spec = normalize_chart_data(&input).unwrap();
            let out = serde_json::to_value(&spec).unwrap();
            assert_eq!(
                serde_json::to_string(&out["config"]).unwrap(),
                serde_json::to_string(&config).unwrap()
            );
        }

        let mut input = revenue_chart("bar");
        input["config"]["trend"] = json!({"percentage": "4.2%", "direction": "up"});
        assert!(normalize_chart_data(&input).is_ok());
    }

    #[test]
    fn test_series_extras_survive_and_color_is_added() {
        let mut input = revenue_chart("line");
        input["chartConfig"] = json!({
            "revenue": {"label": "Revenue", "stacked": "yes", "dashed": true}
        });
        let spec = normalize_chart_data(&input).unwrap();
        let out = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            out["chartConfig"],
            json!({"revenue": {"label": "Revenue", "stacked": "yes", "dashed": true, "color": "color-slot-1"}})
        );
        assert_eq!(spec.chart_config["revenue"].stacked(), None);
    }

    #[test]
    fn test_null_config_defaults_to_empty() {
        let spec = normalize_chart_data(&json!({
            "chartType": "line",
            "config": null,
            "data": [],
            "chartConfig": null
        }))
        .unwrap();
        assert_eq!(spec.config, Default::default());
        assert!(spec.chart_config.is_empty());
    }

    #[test]
    fn test_series_flags_survive_coloring() {
        let spec = normalize_chart_data(&revenue_chart("area")).unwrap();
        assert_eq!(spec.chart_config["expenses"].stacked(), Some(true));
        assert_eq!(spec.chart_config["revenue"].label(), Some("Revenue"));
    }

    #[test]
    fn test_pie_rows_become_segments() {
        let input = json!({
            "chartType": "pie",
            "config": {"title": "Allocation", "description": "Portfolio mix", "xAxisKey": "asset"},
            "data": [
                {"asset": "Stocks", "allocation": 60, "note": "growth"},
                {"asset": "Bonds", "allocation": 30},
                {"asset": "Cash", "allocation": 10}
            ],
            "chartConfig": {"allocation": {"label": "Allocation"}}
        });

        let spec = normalize_chart_data(&input).unwrap();
        assert_eq!(
            json!(spec.data),
            json!([
                {"segment": "Stocks", "value": 60},
                {"segment": "Bonds", "value": 30},
                {"segment": "Cash", "value": 10}
            ])
        );
        assert_eq!(spec.config.x_axis_key(), Some("segment"));
        assert_eq!(spec.chart_config["allocation"].color(), Some("color-slot-1"));
        // the caller's input is left alone
        assert_eq!(input["data"][0]["asset"], "Stocks");
        assert_eq!(input["config"]["xAxisKey"], "asset");
    }

    #[test]
    fn test_pie_fallback_fields() {
        let input = json!({
            "chartType": "pie",
            "config": {"title": "Share", "description": "Market share"},
            "data": [
                {"segment": "North", "value": 5},
                {"category": "South", "value": 3},
                {"name": "East", "value": null, "share": 2},
                {"other": "West"}
            ],
            "chartConfig": {"share": {"label": "Share"}}
        });

        let spec = normalize_chart_data(&input).unwrap();
        assert_eq!(
            json!(spec.data),
            json!([
                {"segment": "North", "value": 5},
                {"segment": "South", "value": 3},
                {"segment": "East", "value": 2},
                {"segment": null, "value": null}
            ])
        );
        assert_eq!(spec.config.x_axis_key(), Some("segment"));
    }

    #[test]
    fn test_pie_without_chart_config_uses_value() {
        let input = json!({
            "chartType": "pie",
            "config": {"title": "t", "description": "d", "xAxisKey": "label"},
            "data": [{"label": "A", "value": 1}]
        });
        let spec = normalize_chart_data(&input).unwrap();
        assert_eq!(json!(spec.data), json!([{"segment": "A", "value": 1}]));
        assert!(spec.chart_config.is_empty());
    }

    #[test]
    fn test_rejects_missing_or_unknown_chart_type() {
        let mut input = revenue_chart("bar");
        input.as_object_mut().unwrap().remove("chartType");
        assert_eq!(
            normalize_chart_data(&input).unwrap_err(),
            AnalystError::InvalidChartData("chartType is required".to_string())
        );

        input["chartType"] = json!("scatter");
        assert!(matches!(
            normalize_chart_data(&input),
            Err(AnalystError::InvalidChartData(msg)) if msg.contains("scatter")
        ));

        input["chartType"] = json!(3);
        assert!(normalize_chart_data(&input).is_err());
    }

    #[test]
    fn test_rejects_missing_or_non_array_data() {
        let mut input = revenue_chart("line");
        input["data"] = json!({"Q1": 10});
        assert_eq!(
            normalize_chart_data(&input).unwrap_err(),
            AnalystError::InvalidChartData("data must be an array".to_string())
        );

        input.as_object_mut().unwrap().remove("data");
        assert_eq!(
            normalize_chart_data(&input).unwrap_err(),
            AnalystError::InvalidChartData("data is required".to_string())
        );
    }

    #[test]
    fn test_rejects_non_object_rows_and_input() {
        let mut input = revenue_chart("bar");
        input["data"] = json!([1, 2, 3]);
        assert!(matches!(
            normalize_chart_data(&input),
            Err(AnalystError::InvalidChartData(_))
        ));

        assert!(matches!(
            normalize_chart_data(&json!("bar")),
            Err(AnalystError::InvalidChartData(_))
        ));
    }

    #[test]
    fn test_missing_config_defaults() {
        let spec = normalize_chart_data(&json!({
            "chartType": "bar",
            "data": [{"month": "Jan", "sales": 4}]
        }))
        .unwrap();
        assert_eq!(spec.config.title(), None);
        assert!(spec.chart_config.is_empty());
        assert_eq!(spec.data.len(), 1);
    }
}
