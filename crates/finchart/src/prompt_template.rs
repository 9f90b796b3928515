use serde::Serialize;
use strum::IntoEnumIterator;
use tera::{Context, Error as TeraError, Tera};

use crate::models::chart::ChartType;
use crate::tools::GENERATE_GRAPH_DATA;

const SYSTEM_TEMPLATE: &str = include_str!("prompts/system.md");

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

#[derive(Serialize)]
struct ChartPrompt {
    tag: String,
    label: &'static str,
    use_case: &'static str,
}

#[derive(Serialize)]
struct SystemPromptContext {
    chart_tool: &'static str,
    charts: Vec<ChartPrompt>,
}

/// Render the fixed system instruction that defines the visualization rules
pub fn system_prompt() -> Result<String, TeraError> {
    let context = SystemPromptContext {
        chart_tool: GENERATE_GRAPH_DATA,
        charts: ChartType::iter()
            .map(|chart| ChartPrompt {
                tag: chart.to_string(),
                label: chart.label(),
                use_case: chart.use_case(),
            })
            .collect(),
    };
    load_prompt(SYSTEM_TEMPLATE, &context)
}
