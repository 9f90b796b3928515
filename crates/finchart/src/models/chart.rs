use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of chart shapes a renderer understands
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ChartType {
    Bar,
    MultiBar,
    Line,
    Pie,
    Area,
    StackedArea,
}

impl ChartType {
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar chart",
            ChartType::MultiBar => "Multi-bar chart",
            ChartType::Line => "Line chart",
            ChartType::Pie => "Pie chart",
            ChartType::Area => "Area chart",
            ChartType::StackedArea => "Stacked area chart",
        }
    }

    /// When the model should reach for this chart type
    pub fn use_case(&self) -> &'static str {
        match self {
            ChartType::Bar => {
                "single metric comparisons across periods or categories, such as quarterly revenue"
            }
            ChartType::MultiBar => {
                "several metrics side by side per period, such as revenue against expenses"
            }
            ChartType::Line => {
                "trends over time, such as stock prices or growth rates across many periods"
            }
            ChartType::Pie => {
                "composition of a whole at one point in time, such as portfolio allocation or market share"
            }
            ChartType::Area => "cumulative values or volume trends over time",
            ChartType::StackedArea => {
                "how components contribute to a changing total over time, such as revenue by segment"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Typed view of a well-formed `config.trend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub percentage: f64,
    pub direction: TrendDirection,
}

/// Chart-level display settings.
///
/// The model's object is kept exactly as sent, key order and number formatting
/// included. Accessors read the declared fields and return `None` when a field is
/// missing or off-schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartConfig(Map<String, Value>);

impl ChartConfig {
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn trend(&self) -> Option<Trend> {
        self.0
            .get("trend")
            .and_then(|trend| serde_json::from_value(trend.clone()).ok())
    }

    pub fn footer(&self) -> Option<&str> {
        self.str_field("footer")
    }

    pub fn total_label(&self) -> Option<&str> {
        self.str_field("totalLabel")
    }

    pub fn x_axis_key(&self) -> Option<&str> {
        self.str_field("xAxisKey")
    }

    pub fn set_x_axis_key<S: Into<String>>(&mut self, key: S) {
        self.0.insert("xAxisKey".to_string(), Value::String(key.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// Display settings for one data series, kept as sent apart from `color`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesConfig(Map<String, Value>);

impl SeriesConfig {
    pub fn label(&self) -> Option<&str> {
        self.0.get("label").and_then(Value::as_str)
    }

    /// Only a boolean `stacked` counts; anything else reads as unset
    pub fn stacked(&self) -> Option<bool> {
        self.0.get("stacked").and_then(Value::as_bool)
    }

    pub fn color(&self) -> Option<&str> {
        self.0.get("color").and_then(Value::as_str)
    }

    pub fn set_color<S: Into<String>>(&mut self, color: S) {
        self.0.insert("color".to_string(), Value::String(color.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A render-ready chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub chart_type: ChartType,
    #[serde(default)]
    pub config: ChartConfig,
    pub data: Vec<Map<String, Value>>,
    /// Series keyed by data field, in the order the model declared them
    #[serde(default)]
    pub chart_config: IndexMap<String, SeriesConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
