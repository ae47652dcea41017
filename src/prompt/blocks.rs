//! Instruction blocks. Each function renders one block of the document for a
//! given configuration, or `None` when the block is silent.

use crate::options::{
    DecorIntensity, EnhancementOptions, FurnitureAdd, KitchenFinish, LightingAtmosphere,
    LightingIntensity, LightingOption, PerspectiveType, PlantOption, Resolution, WoodTexture,
};

pub(crate) const INVARIANT_HEADER: &[&str] = &[
    "ROLE: PROFESSIONAL INTERIOR PHOTO RETOUCHER (POST-PROCESSING ONLY).",
    "TASK: Apply a \"High-End Luxury Finishes\" filter to the EXISTING image.",
    "",
    "*** ABSOLUTE PRIME DIRECTIVE: GEOMETRY IS FROZEN ***",
    "You are NOT an architect. You are NOT allowed to add, remove, or move furniture.",
    "You are processing a flat 2D image. You can only change TEXTURES, LIGHTING, and SHADOWS.",
    "",
    "CRITICAL CONSTRAINT - THE \"NO ARCHITECT\" RULE:",
    "1. **NO NEW FURNITURE**: If there is an empty wall, IT MUST STAY EMPTY. Do NOT add cabinets, shelves, or paintings to fill the void.",
    "2. **NO LAYOUT CHANGES**: The outline/silhouette of the kitchen MUST match the original image pixel-for-pixel.",
    "3. **DRAWER VS DOOR**: If a unit has horizontal lines (drawers), it stays drawers. If it has vertical lines (doors), it stays doors.",
    "4. **NO EXTENSIONS**: Do not extend the countertop. Do not add an island if there isn't one.",
    "",
    "What you MUST do (THE \"RETOUCHING\"):",
    "- **RE-LIGHT**: Change the lighting to be more photorealistic (Raytracing simulation).",
    "- **RE-TEXTURE**: Upgrade the quality of the materials (make the wood look real, make the stone look heavy).",
    "- **COLOR GRADING**: Apply a high-end magazine color grade.",
    "",
    "STRICT PROHIBITIONS (COLOR & STYLE):",
    "- **COLOR PRESERVATION IS SACRED**:",
    "  - The cabinet color (Hex code) MUST remain EXACTLY the same.",
    "  - The countertop material MUST remain EXACTLY the same.",
    "- **NO FACADE ORNAMENTATION**:",
    "  - ABSOLUTELY NO new moldings, carvings, or patterns on the doors unless \"Framed Doors\" option is explicitly enabled below.",
    "  - Keep surfaces clean and modern if they are currently clean and modern.",
    "- **PRESERVE APPLIANCES**:",
    "  - The COOKING HOB (Induction/Gas), SINK, TAP, OVEN, and HOOD must stay exactly where they are. DO NOT REMOVE THEM.",
    "",
    "VISUAL ENHANCEMENTS REQUIRED:",
    "- **PHOTOREALISM**: The image must look like a photograph, not a 3D model.",
    "- **ANTI-PLASTICITY**: Add subtle imperfections, micro-grain, and \"orange peel\" texture to surfaces so they don't look like perfect CGI plastic.",
    "- **RADIOSITY & LIGHT BOUNCE**: Simulate how light bounces off the floor onto the cabinets.",
    "- **CONTACT SHADOWS**: Deepen shadows where objects touch (Ambient Occlusion) to ground the furniture.",
];

pub(crate) const WOOD_ENHANCED: &[&str] = &[
    "- **WOOD TEXTURE BOOST (CRITICAL)**: Any wood surface (cabinets, floor, countertop) must look ORGANIC and TACTILE.",
    "- Simulate \"brushed wood\" or \"open pore\" texture.",
    "- The grain must have relief and depth. It must NOT look like a flat printed sticker.",
    "- Accentuate the contrast of the veins to give it a raw, premium look.",
];

pub(crate) const WOOD_STANDARD: &[&str] = &[
    "- **WOOD TEXTURE**: Keep wood looking natural and realistic. Ensure it has proper sheen but do not artificially exaggerate the grain.",
];

pub(crate) const ATMOSPHERE_HEADING: &str = "LIGHTING & ATMOSPHERE SETTINGS:";

pub(crate) const ATMOSPHERE_NEUTRAL: &str =
    "- **ATMOSPHERE**: Professional Studio Lighting. Neutral white balance (4500K). Evenly lit, no harsh shadows, perfect for product visualization. **MAINTAIN TRUE COLORS**.";
pub(crate) const ATMOSPHERE_MORNING: &str =
    "- **ATMOSPHERE**: Cool, fresh morning light. Color temperature approx 5500K. Soft, diffused shadows. Sense of cleanliness and new beginnings.";
pub(crate) const ATMOSPHERE_GOLDEN_HOUR: &str =
    "- **ATMOSPHERE**: Golden Hour (Sun). Warm, directional sunlight entering the room. Color temperature approx 3500K. Long, dramatic shadows. Very cozy and emotional feeling.";
pub(crate) const ATMOSPHERE_COSY: &str =
    "- **ATMOSPHERE**: COSY / HYGGE / COCOONING. Very warm, soft, and enveloping light (approx 3000K). Low contrast. Feeling of comfort and relaxation. Focus on warm wood tones and inviting shadows. Makes the kitchen feel like the heart of the home.";
pub(crate) const ATMOSPHERE_EVENING: &str =
    "- **ATMOSPHERE**: Chic Evening / Night. Artificial lighting dominance. Moody contrast. Warm pools of light from lamps (2700K) against a dark blue exterior window tone. Luxury lounge vibe.";

pub(crate) const PERSPECTIVE_IMMERSIVE: &str =
    "- CAMERA PERSPECTIVE: **TILT-SHIFT LENS SIMULATION**. Use a 16-24mm wide-angle lens but keep vertical lines perfectly straight (Architectural 2-point perspective). Open up the space. Make it feel expansive.";
pub(crate) const PERSPECTIVE_NATURAL: &str =
    "- CAMERA PERSPECTIVE: STRICTLY KEEP the original camera angle and focal length. Do not distort the room geometry. Keep the view natural.";

pub(crate) const DECOR_MINIMAL: &[&str] = &[
    "- **MINIMALIST STYLE (STRICT)**:",
    "  - The client wants a \"Showroom\" look.",
    "  - Surfaces must be IMMACULATELY CLEAN.",
    "  - ZERO RANDOM CLUTTER. Do NOT add jars, bowls, bottles, or appliances unless specifically requested below.",
    "  - If no specific decor options are checked, the countertop must be EMPTY of loose objects.",
    "  - **EXCEPTION**: BUILT-IN ELEMENTS (COOKING HOB, SINK, TAP) ARE NOT CLUTTER. THEY MUST BE PRESERVED.",
];

pub(crate) const DECOR_BALANCED: &[&str] = &[
    "- **BALANCED STYLE**:",
    "  - Keep it tidy but natural.",
    "  - Do not add excessive clutter, but do not make it look sterile.",
    "  - Follow the specific decor requests below strictly.",
];

pub(crate) const DECOR_MAXIMAL: &[&str] = &[
    "- **LIVED-IN / ACCENTUATED STYLE**:",
    "  - The client wants a warm, inhabited, and \"alive\" kitchen.",
    "  - In addition to requested items, you are AUTHORIZED to add tasteful \"lifestyle\" props to accent the scene (e.g., an open cookbook, a coffee cup, a nice bottle of olive oil, a folded tea towel).",
    "  - Make the kitchen look active and loved, not sterile.",
];

pub(crate) const FURNITURE_STOOLS: &[&str] = &[
    "- **FURNITURE EXCEPTION - ADD BAR STOOLS**: The user specifically requests to stage the kitchen with bar stools.",
    "  - This exception OVERRIDES the \"NO NEW FURNITURE\" rule above, for seating only.",
    "  - DETECT: Look for a kitchen island, peninsula, or bar counter.",
    "  - ACTION: Place 2 or 3 modern bar stools aligned with the counter.",
    "  - STYLE: Sleek design, black thin metal legs (epoxy), fabric or velvet seat (beige, cognac, or grey).",
    "  - REALISM: Ensure they cast correct contact shadows on the floor.",
];

pub(crate) const FURNITURE_CHAIRS: &[&str] = &[
    "- **FURNITURE EXCEPTION - ADD DINING CHAIRS**: The user specifically requests to stage the kitchen with dining chairs.",
    "  - This exception OVERRIDES the \"NO NEW FURNITURE\" rule above, for seating only.",
    "  - DETECT: Look for a dining table or an open dining area.",
    "  - ACTION: Place modern dining chairs around the table.",
    "  - STYLE: Modern silhouette, black metal legs, comfortable fabric upholstery (terracotta, green, or grey).",
    "  - REALISM: Ensure they fit the perspective and scale of the room.",
];

pub(crate) const WINDOW_ALLOWED: &str =
    "- WINDOWS & VIEWS: Check for existing windows. If present, generate a beautiful, realistic outdoor view matching the lighting atmosphere. If the wall looks empty and it fits the composition, you ARE ALLOWED to creatively add a modern window to bring in natural light.";
pub(crate) const WINDOW_FORBIDDEN: &str =
    "- STRICT RULE: DO NOT ADD NEW WINDOWS. Keep the existing walls solid. If a window is already present, you can clean up the view, but DO NOT create new openings in walls.";

pub(crate) const WALLS_REDESIGN: &[&str] = &[
    "- WALLS REDESIGN AUTHORIZED: You are PERMITTED to change the wall color or texture (e.g., modern paint, soft concrete, elegant wallpaper) to better match the kitchen design.",
    "  - IMPORTANT: The new wall style MUST harmonize perfectly with the kitchen cabinet colors and the countertop. Create a cohesive, high-end interior design palette.",
];
pub(crate) const WALLS_KEEP: &str =
    "- STRICT RULE: DO NOT change the material, color, or texture of the existing walls. You may only improve the lighting interactions on them.";

pub(crate) const ADD_WALLS: &[&str] = &[
    "- **ADD STRUCTURAL WALLS / ENCLOSE SPACE**: The client wants a fully enclosed room.",
    "  - If the photo shows an open plan, undefined edges, or empty void space around the kitchen, **GENERATE REALISTIC WALLS** to close the room.",
    "  - Make the kitchen feel like a dedicated, enclosed architectural space.",
    "  - Ensure the new walls match the style of existing walls.",
];
pub(crate) const KEEP_OPENNESS: &str =
    "- KEEP LAYOUT OPENNESS: Do not arbitrarily add walls if the space is designed to be open-plan. Respect the current structural boundaries.";

pub(crate) const FLOOR_REDESIGN: &[&str] = &[
    "- FLOORS REDESIGN AUTHORIZED: You are PERMITTED to change the floor material (e.g., modern large tiles, warm wood parquet, polished concrete) to better match the high-end kitchen design.",
    "  - IMPORTANT: The new floor MUST harmonize perfectly with the kitchen cabinet colors. If the current floor is ugly or dated, replace it with a premium material.",
];
pub(crate) const FLOOR_KEEP: &str =
    "- STRICT RULE: DO NOT change the material, color, or texture of the existing floor tiles/parquet. Keep the original flooring exactly as is.";

pub(crate) const FRONTS_HEADING: &str = "- KITCHEN FRONTS FACADES & FINISH:";

pub(crate) const HIGH_FIDELITY: &[&str] = &[
    "  - **ULTRA-HIGH FIDELITY MATERIAL PASS**:",
    "    - Treat the kitchen fronts as if they are being photographed for a catalog close-up.",
    "    - **CRITICAL: DO NOT CHANGE THE COLOR**: Sample the exact original color (albedo) of the furniture and preserve it 100%. The hue must not shift.",
    "    - **TEXTURE UPSCALING**: Add micro-surface details (invisible to the naked eye but perceptible) like subtle grain, slight coating irregularities, or \"orange peel\" effect if appropriate, to make it look real.",
    "    - **EDGE DEFINITION**: Make every edge of the doors razor-sharp and perfectly defined. Add subtle chamfered edges to catch light highlights.",
];

pub(crate) const FINISH_MATTE: &[&str] = &[
    "  - **FORCE MATTE FINISH**: The client specifically requested a MATTE / SATIN finish.",
    "    - REMOVE all sharp reflections from cabinet doors.",
    "    - Use a soft, velvety light diffusion (\"Soft Touch\" or \"Fenix\" material style).",
    "    - Ensure the color remains deep and rich, but without gloss.",
];

pub(crate) const FINISH_GLOSSY: &[&str] = &[
    "  - **FORCE HIGH-GLOSS FINISH**: The client specifically requested a GLOSSY / LACQUERED finish.",
    "    - Add sharp, mirror-like reflections (Fresnel effect) to all cabinet fronts.",
    "    - The surfaces should look like polished glass or high-end glossy lacquer.",
    "    - Make the environment reflect clearly on the doors.",
];

pub(crate) const FINISH_AUTO: &[&str] = &[
    "  - **ENHANCE EXISTING FINISH**: Look at the original image.",
    "    - If it looks MATTE, keep it velvety smooth.",
    "    - If it looks GLOSSY, clean up the reflections to make them sharp.",
    "    - Generally improve the material quality to look \"Showroom New\".",
];

pub(crate) const FRAMED_DOORS: &[&str] = &[
    "  - **FRAMED / SHAKER DOORS ENHANCEMENT**:",
    "    - If the kitchen has framed doors (Shaker style), DRASTICALLY increase the contrast and sharpness of the frame edges.",
    "    - Deepen the shadows in the recesses to show depth.",
    "    - Make the molding lines crisp and architectural.",
    "    - Ensure the separation between the frame and the center panel is clearly visible.",
];

pub(crate) const FLAT_FACADES: &[&str] = &[
    "  - **KEEP FACADES FLAT/CLEAN**: Do NOT add frames or moldings if they are not present in the original image. Maintain the original style.",
    "    - Do NOT change Solid doors to Glass doors.",
];

pub(crate) const REVEAL_LINES: &str =
    "  - Ensure the gaps (reveal lines) between drawers and doors are sharp and dark to define the geometry clearly.";

pub(crate) const RAYTRACING: &[&str] = &[
    "- ACTIVATE RAYTRACING: Enable physically based rendering (PBR). Focus specifically on the COUNTERTOP and FACADES to render accurate caustics, contact shadows, and reflections of the environment on their surfaces.",
    "- Use a highly realistic Global Illumination model similar to Unreal Engine 5 Lumen or V-Ray.",
];

pub(crate) const HYPER_REALISM: &[&str] = &[
    "- **HYPER-REALISM MODE ACTIVATED**:",
    "  - Treat this image as an award-winning interior design photograph.",
    "  - CAMERA SETTINGS: Simulate a Sony A7R IV camera with a prime GM lens.",
    "  - ISO 100, Aperture f/8 for maximum sharpness.",
    "  - LIGHTING PHYSICS: Simulate complex photon bouncing (indirect lighting) to light up corners naturally.",
    "  - TEXTURE DETAIL: Every surface (wood, stone, metal) must display microscopic texture details (imperfections, grain, pores) to avoid the \"smooth CG look\".",
    "  - VOLUMETRIC LIGHTING: Add subtle air density/dust particles in light shafts if applicable for mood.",
    "  - Apply professional color grading: High dynamic range (HDR), rich blacks, detailed highlights.",
];

pub(crate) const QUALITY_LOW: &str = "- Create a fast draft render with standard lighting.";
pub(crate) const QUALITY_MEDIUM: &str = "- Create a high-quality, sharp, and well-balanced render.";
pub(crate) const QUALITY_HIGH: &str =
    "- Create an ULTRA-HIGH DEFINITION (4K) render with extremely fine texture details, complex reflections, and luxury magazine lighting.";

pub(crate) const DECOR_ITEMS_HEADING: &str = "DECORATIVE ADDITIONS REQUESTED BY USER:";

pub(crate) const PLANTS_NONE: &str = "- STRICTLY NO PLANTS. Remove any hallucinations of plants.";
pub(crate) const PLANTS_LITTLE: &str =
    "- Add a few small, discreet green plants on the countertop or shelves.";
pub(crate) const PLANTS_LOT: &str =
    "- Add abundant vegetation: hanging plants, herb pots, lush green plants for an \"Urban Jungle\" ambiance.";

pub(crate) const WALL_DECOR_ADD: &str =
    "- Add elegant wall decor (frames, modern clock) on empty walls, without cluttering.";
pub(crate) const WALL_DECOR_NONE: &str =
    "- Leave walls without additional decoration. Keep them clean.";

pub(crate) const UTENSILS_ADD: &str =
    "- Place realistic kitchen utensils (spatula pot, cutting board, premium food processor) on the countertop.";
pub(crate) const UTENSILS_NONE: &str =
    "- DO NOT add any kitchen utensils, appliances, or countertop accessories (unless authorized by 'Lived-In Style' above).";

pub(crate) const FRUIT_ADD: &str =
    "- Add a basket of colorful fresh fruit on the island or countertop.";
pub(crate) const FRUIT_NONE: &str = "- DO NOT add any food or fruit.";

pub(crate) const CLOSING_VERIFICATION: &[&str] = &[
    "",
    "**FINAL VERIFICATION STEP - APPLIANCE & GEOMETRY PRESERVATION**:",
    "- Locate the COOKING HOB (PLATING/STOVETOP) on the countertop. You MUST RENDER IT. Do not flatten it into the countertop material.",
    "- Locate the SINK and TAP. Ensure they are metallic/ceramic and distinct from the worktop.",
    "- Locate the OVEN and MICROWAVE. Keep their glass/metal texture distinct.",
    "- **GEOMETRY CHECK**: Ensure that drawers are still drawers and doors are still doors.",
    "- **DOUBLE CHECK COLORS**: Ensure the cabinets and countertop colors are identical to the input image.",
    "",
    "Generate the final result in photorealistic high definition.",
];

fn lines(block: &[&str]) -> String {
    block.join("\n")
}

/// Brightness band of a requested fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityBand {
    Low,
    Mid,
    High,
}

impl IntensityBand {
    pub fn of(intensity: LightingIntensity) -> Self {
        match intensity.value() {
            0..=29 => IntensityBand::Low,
            30..=69 => IntensityBand::Mid,
            _ => IntensityBand::High,
        }
    }
}

pub(crate) fn recessed_description(band: IntensityBand) -> &'static str {
    match band {
        IntensityBand::Low => "soft, dimmed, warm light (cozy atmosphere)",
        IntensityBand::Mid => "powerful, natural, and balanced lighting",
        IntensityBand::High => "very bright, intense, and vivid lighting (daylight type)",
    }
}

pub(crate) fn lamps_description(band: IntensityBand) -> &'static str {
    match band {
        IntensityBand::Low => "diffusing a soft and cozy ambient light",
        IntensityBand::Mid => "illuminating the room clearly and optimally",
        IntensityBand::High => "with powerful bulbs for maximum brightness",
    }
}

pub(crate) fn invariant_header(_: &EnhancementOptions) -> Option<String> {
    Some(lines(INVARIANT_HEADER))
}

pub(crate) fn wood_texture(options: &EnhancementOptions) -> Option<String> {
    let block = match options.wood_texture {
        WoodTexture::Enhanced => WOOD_ENHANCED,
        WoodTexture::Standard => WOOD_STANDARD,
    };
    Some(lines(block))
}

pub(crate) fn atmosphere(options: &EnhancementOptions) -> Option<String> {
    let paragraph = match options.lighting_atmosphere {
        LightingAtmosphere::Neutral => ATMOSPHERE_NEUTRAL,
        LightingAtmosphere::Morning => ATMOSPHERE_MORNING,
        LightingAtmosphere::GoldenHour => ATMOSPHERE_GOLDEN_HOUR,
        LightingAtmosphere::Cosy => ATMOSPHERE_COSY,
        LightingAtmosphere::Evening => ATMOSPHERE_EVENING,
    };
    Some(format!("\n{ATMOSPHERE_HEADING}\n{paragraph}"))
}

pub(crate) fn perspective(options: &EnhancementOptions) -> Option<String> {
    let clause = match options.perspective_type {
        PerspectiveType::Immersive => PERSPECTIVE_IMMERSIVE,
        PerspectiveType::Natural => PERSPECTIVE_NATURAL,
    };
    Some(clause.to_string())
}

pub(crate) fn decor_policy(options: &EnhancementOptions) -> Option<String> {
    let block = match options.decor_intensity {
        DecorIntensity::Minimal => DECOR_MINIMAL,
        DecorIntensity::Balanced => DECOR_BALANCED,
        DecorIntensity::Maximal => DECOR_MAXIMAL,
    };
    Some(lines(block))
}

pub(crate) fn furniture_staging(options: &EnhancementOptions) -> Option<String> {
    match options.furniture_add {
        FurnitureAdd::Stools => Some(lines(FURNITURE_STOOLS)),
        FurnitureAdd::Chairs => Some(lines(FURNITURE_CHAIRS)),
        FurnitureAdd::None => None,
    }
}

pub(crate) fn window_view(options: &EnhancementOptions) -> Option<String> {
    let clause = if options.add_window_view {
        WINDOW_ALLOWED
    } else {
        WINDOW_FORBIDDEN
    };
    Some(clause.to_string())
}

pub(crate) fn wall_material(options: &EnhancementOptions) -> Option<String> {
    if options.allow_wall_modification {
        Some(lines(WALLS_REDESIGN))
    } else {
        Some(WALLS_KEEP.to_string())
    }
}

pub(crate) fn wall_addition(options: &EnhancementOptions) -> Option<String> {
    if options.add_walls {
        Some(lines(ADD_WALLS))
    } else {
        Some(KEEP_OPENNESS.to_string())
    }
}

pub(crate) fn floor_material(options: &EnhancementOptions) -> Option<String> {
    if options.allow_floor_modification {
        Some(lines(FLOOR_REDESIGN))
    } else {
        Some(FLOOR_KEEP.to_string())
    }
}

pub(crate) fn fronts_heading(_: &EnhancementOptions) -> Option<String> {
    Some(FRONTS_HEADING.to_string())
}

pub(crate) fn high_fidelity(options: &EnhancementOptions) -> Option<String> {
    options.high_fidelity_details.then(|| lines(HIGH_FIDELITY))
}

pub(crate) fn finish(options: &EnhancementOptions) -> Option<String> {
    let block = match options.kitchen_finish {
        KitchenFinish::Matte => FINISH_MATTE,
        KitchenFinish::Glossy => FINISH_GLOSSY,
        KitchenFinish::Auto => FINISH_AUTO,
    };
    Some(lines(block))
}

pub(crate) fn framed_doors(options: &EnhancementOptions) -> Option<String> {
    let block = if options.enhance_framed_doors {
        FRAMED_DOORS
    } else {
        FLAT_FACADES
    };
    Some(lines(block))
}

pub(crate) fn reveal_lines(_: &EnhancementOptions) -> Option<String> {
    Some(REVEAL_LINES.to_string())
}

pub(crate) fn raytracing(options: &EnhancementOptions) -> Option<String> {
    options.raytracing.then(|| lines(RAYTRACING))
}

pub(crate) fn hyper_realism(options: &EnhancementOptions) -> Option<String> {
    options.hyper_realism.then(|| lines(HYPER_REALISM))
}

pub(crate) fn render_quality(options: &EnhancementOptions) -> Option<String> {
    let clause = match options.resolution {
        Resolution::Low => QUALITY_LOW,
        Resolution::Medium => QUALITY_MEDIUM,
        Resolution::High => QUALITY_HIGH,
    };
    Some(clause.to_string())
}

pub(crate) fn decor_items_heading(_: &EnhancementOptions) -> Option<String> {
    Some(format!("\n{DECOR_ITEMS_HEADING}"))
}

pub(crate) fn plants(options: &EnhancementOptions) -> Option<String> {
    let clause = match options.plants {
        PlantOption::None => PLANTS_NONE,
        PlantOption::Little => PLANTS_LITTLE,
        PlantOption::Lot => PLANTS_LOT,
    };
    Some(clause.to_string())
}

pub(crate) fn wall_decor(options: &EnhancementOptions) -> Option<String> {
    let clause = if options.wall_decor {
        WALL_DECOR_ADD
    } else {
        WALL_DECOR_NONE
    };
    Some(clause.to_string())
}

pub(crate) fn utensils(options: &EnhancementOptions) -> Option<String> {
    let clause = if options.utensils {
        UTENSILS_ADD
    } else {
        UTENSILS_NONE
    };
    Some(clause.to_string())
}

pub(crate) fn fruit(options: &EnhancementOptions) -> Option<String> {
    let clause = if options.fruit { FRUIT_ADD } else { FRUIT_NONE };
    Some(clause.to_string())
}

pub(crate) fn lighting_fixture(options: &EnhancementOptions) -> Option<String> {
    let band = IntensityBand::of(options.lighting_intensity);
    match options.lighting {
        LightingOption::Recessed => Some(format!(
            "- Add/Simulate modern recessed lighting (LED spots on ceiling) producing {}.",
            recessed_description(band)
        )),
        LightingOption::Lamps => Some(format!(
            "- Add aesthetic modern pendant lights or lamps (not recessed) to the ceiling, {}.",
            lamps_description(band)
        )),
        LightingOption::NoChange => None,
    }
}

pub(crate) fn closing_verification(_: &EnhancementOptions) -> Option<String> {
    Some(lines(CLOSING_VERIFICATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(update: impl FnOnce(&mut EnhancementOptions)) -> EnhancementOptions {
        let mut options = EnhancementOptions::default();
        update(&mut options);
        options
    }

    #[test]
    fn intensity_bands_split_at_thirty_and_seventy() {
        let band = |value| IntensityBand::of(LightingIntensity::new(value).unwrap());
        assert_eq!(band(0), IntensityBand::Low);
        assert_eq!(band(29), IntensityBand::Low);
        assert_eq!(band(30), IntensityBand::Mid);
        assert_eq!(band(69), IntensityBand::Mid);
        assert_eq!(band(70), IntensityBand::High);
        assert_eq!(band(100), IntensityBand::High);
    }

    #[test]
    fn lighting_fixture_is_silent_without_a_fixture() {
        let options = with(|o| o.lighting = LightingOption::NoChange);
        assert!(lighting_fixture(&options).is_none());
    }

    #[test]
    fn lighting_fixture_names_its_fixture() {
        let recessed = lighting_fixture(&with(|o| o.lighting = LightingOption::Recessed)).unwrap();
        assert!(recessed.contains("LED spots on ceiling"));
        let lamps = lighting_fixture(&with(|o| o.lighting = LightingOption::Lamps)).unwrap();
        assert!(lamps.contains("pendant lights or lamps"));
        assert!(!lamps.contains("LED spots"));
    }

    #[test]
    fn furniture_exception_overrides_frozen_geometry_explicitly() {
        assert!(furniture_staging(&EnhancementOptions::default()).is_none());
        for choice in [FurnitureAdd::Stools, FurnitureAdd::Chairs] {
            let text = furniture_staging(&with(|o| o.furniture_add = choice)).unwrap();
            assert!(text.contains("FURNITURE EXCEPTION"));
            assert!(text.contains("OVERRIDES the \"NO NEW FURNITURE\" rule"));
        }
        let stools = furniture_staging(&with(|o| o.furniture_add = FurnitureAdd::Stools)).unwrap();
        assert!(stools.contains("island, peninsula, or bar counter"));
        let chairs = furniture_staging(&with(|o| o.furniture_add = FurnitureAdd::Chairs)).unwrap();
        assert!(chairs.contains("dining table"));
    }

    #[test]
    fn high_fidelity_restates_color_preservation() {
        assert!(high_fidelity(&EnhancementOptions::default()).is_none());
        let text = high_fidelity(&with(|o| o.high_fidelity_details = true)).unwrap();
        assert!(text.contains("DO NOT CHANGE THE COLOR"));
        assert!(text.contains("hue must not shift"));
    }

    #[test]
    fn minimal_decor_carves_out_built_in_appliances() {
        let text = decor_policy(&with(|o| o.decor_intensity = DecorIntensity::Minimal)).unwrap();
        assert!(text.contains("ZERO RANDOM CLUTTER"));
        assert!(text.contains("BUILT-IN ELEMENTS (COOKING HOB, SINK, TAP) ARE NOT CLUTTER"));
    }

    #[test]
    fn window_block_keeps_view_cleanup_when_forbidden() {
        let text = window_view(&EnhancementOptions::default()).unwrap();
        assert!(text.contains("DO NOT ADD NEW WINDOWS"));
        assert!(text.contains("clean up the view"));
        let allowed = window_view(&with(|o| o.add_window_view = true)).unwrap();
        assert!(allowed.contains("ARE ALLOWED to creatively add a modern window"));
    }

    #[test]
    fn wall_and_floor_redesign_require_harmony() {
        let walls = wall_material(&with(|o| o.allow_wall_modification = true)).unwrap();
        assert!(walls.contains("MUST harmonize"));
        let floor = floor_material(&with(|o| o.allow_floor_modification = true)).unwrap();
        assert!(floor.contains("MUST harmonize"));
        assert_eq!(wall_material(&EnhancementOptions::default()).unwrap(), WALLS_KEEP);
        assert_eq!(floor_material(&EnhancementOptions::default()).unwrap(), FLOOR_KEEP);
    }

    #[test]
    fn every_atmosphere_has_a_distinct_paragraph() {
        let mut seen = Vec::new();
        for value in LightingAtmosphere::ALL {
            let text = atmosphere(&with(|o| o.lighting_atmosphere = *value)).unwrap();
            assert!(text.contains(ATMOSPHERE_HEADING));
            assert!(!seen.contains(&text));
            seen.push(text);
        }
    }

    #[test]
    fn render_quality_tracks_resolution() {
        assert_eq!(
            render_quality(&with(|o| o.resolution = Resolution::Low)).unwrap(),
            QUALITY_LOW
        );
        assert_eq!(
            render_quality(&with(|o| o.resolution = Resolution::High)).unwrap(),
            QUALITY_HIGH
        );
    }
}
