//! Compiles an [`EnhancementOptions`] record into the instruction document and
//! generation parameters sent to the image model.
//!
//! The document is the concatenation of [`RULES`] in table order. Later rules
//! may override earlier general guidance for a reader that weighs recency
//! (furniture staging over frozen geometry, the high-fidelity pass over the
//! finish rules), so the table order must not change.

mod blocks;
pub mod params;

use serde::Serialize;
use tracing::debug;

use crate::llm::media::PhotoPayload;
use crate::options::EnhancementOptions;

pub use params::{select_parameters, GenerationParameters};

pub struct Rule {
    pub name: &'static str,
    pub render: fn(&EnhancementOptions) -> Option<String>,
}

#[rustfmt::skip]
pub const RULES: &[Rule] = &[
    Rule { name: "invariant_header", render: blocks::invariant_header },
    Rule { name: "wood_texture", render: blocks::wood_texture },
    Rule { name: "atmosphere", render: blocks::atmosphere },
    Rule { name: "perspective", render: blocks::perspective },
    Rule { name: "decor_policy", render: blocks::decor_policy },
    Rule { name: "furniture_staging", render: blocks::furniture_staging },
    Rule { name: "window_view", render: blocks::window_view },
    Rule { name: "wall_material", render: blocks::wall_material },
    Rule { name: "wall_addition", render: blocks::wall_addition },
    Rule { name: "floor_material", render: blocks::floor_material },
    Rule { name: "fronts_heading", render: blocks::fronts_heading },
    Rule { name: "high_fidelity", render: blocks::high_fidelity },
    Rule { name: "finish", render: blocks::finish },
    Rule { name: "framed_doors", render: blocks::framed_doors },
    Rule { name: "reveal_lines", render: blocks::reveal_lines },
    Rule { name: "raytracing", render: blocks::raytracing },
    Rule { name: "hyper_realism", render: blocks::hyper_realism },
    Rule { name: "render_quality", render: blocks::render_quality },
    Rule { name: "decor_items_heading", render: blocks::decor_items_heading },
    Rule { name: "plants", render: blocks::plants },
    Rule { name: "wall_decor", render: blocks::wall_decor },
    Rule { name: "utensils", render: blocks::utensils },
    Rule { name: "fruit", render: blocks::fruit },
    Rule { name: "lighting_fixture", render: blocks::lighting_fixture },
    Rule { name: "closing_verification", render: blocks::closing_verification },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledPrompt {
    pub instruction_text: String,
    pub parameters: GenerationParameters,
}

fn render_fragments(options: &EnhancementOptions) -> Vec<(&'static str, String)> {
    RULES
        .iter()
        .filter_map(|rule| (rule.render)(options).map(|fragment| (rule.name, fragment)))
        .collect()
}

/// Names of the rules that emit text for `options`, in document order.
pub fn fired_rules(options: &EnhancementOptions) -> Vec<&'static str> {
    render_fragments(options)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

pub fn compile(options: &EnhancementOptions) -> CompiledPrompt {
    let fragments = render_fragments(options);
    let mut instruction_text = String::with_capacity(8 * 1024);
    for (_, fragment) in &fragments {
        instruction_text.push_str(fragment);
        instruction_text.push('\n');
    }

    let parameters = select_parameters(options.resolution);
    if tracing::enabled!(tracing::Level::DEBUG) {
        let names: Vec<&str> = fragments.iter().map(|(name, _)| *name).collect();
        debug!(
            target: "retouch.prompt",
            rules = %names.join(","),
            chars = instruction_text.len(),
            model = parameters.model_id,
            "compiled instruction document"
        );
    }

    CompiledPrompt {
        instruction_text,
        parameters,
    }
}

/// A photo paired with the document and parameters compiled for it.
#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    pub photo: PhotoPayload,
    pub prompt: CompiledPrompt,
}

impl EnhancementRequest {
    pub fn new(photo: PhotoPayload, options: &EnhancementOptions) -> Self {
        EnhancementRequest {
            photo,
            prompt: compile(options),
        }
    }
}
