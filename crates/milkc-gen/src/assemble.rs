//! Final shader assembly.
//!
//! Stitches the fixed preamble, injected helper functions, the selected
//! wave renderer, uniform declarations, local-variable initialization,
//! the translated per-frame and per-pixel blocks, and the fixed
//! post-pipeline epilogue into one GLSL 330 fragment shader string.
//!
//! Everything here is deterministic: controls are walked in table order,
//! symbol-table locals in discovery order, so byte-identical input
//! produces a byte-identical shader.

use serde::Serialize;

use milkc_par::Node;
use milkc_sem::{tables, ControlDescriptor, SymbolTable};

use crate::emit::{format_float, GlslEmitter, PER_PIXEL_REWRITES};
use crate::wave::WaveMode;

/// A control with preset overrides applied.
///
/// The preset's top-level scalar (if numeric) replaces the table
/// default; slider bounds widen to include an out-of-range override so
/// the host UI can always show the actual value.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedControl {
    /// The static descriptor this control came from.
    pub descriptor: &'static ControlDescriptor,
    /// Effective default (table default or preset override).
    pub default: f64,
    /// Effective slider minimum.
    pub min: f64,
    /// Effective slider maximum.
    pub max: f64,
}

impl ResolvedControl {
    /// Apply an optional preset override to a descriptor.
    pub fn resolve(descriptor: &'static ControlDescriptor, preset_value: Option<f64>) -> Self {
        let default = preset_value.unwrap_or(descriptor.default);
        Self {
            descriptor,
            default,
            min: descriptor.min.min(default),
            max: descriptor.max.max(default),
        }
    }

    /// Resolve the full control table, in emission order.
    ///
    /// `preset_value` looks up a control name in the preset's top-level
    /// scalars.
    pub fn resolve_all(preset_value: impl Fn(&str) -> Option<f64>) -> Vec<ResolvedControl> {
        tables::CONTROLS
            .iter()
            .map(|descriptor| Self::resolve(descriptor, preset_value(descriptor.name)))
            .collect()
    }
}

/// UI metadata carried in the trailing comment of a uniform line.
/// Field order here is the key order in the generated JSON.
#[derive(Serialize)]
struct ControlMeta<'a> {
    widget: &'a str,
    default: f64,
    min: f64,
    max: f64,
    step: f64,
}

/// A fully analyzed preset, ready for assembly.
pub struct Program {
    /// Parsed per-frame statement block.
    pub per_frame: Node,
    /// Parsed per-pixel statement block.
    pub per_pixel: Node,
    /// Variables discovered across both blocks.
    pub symbols: SymbolTable,
    /// Selected waveform strategy.
    pub wave_mode: WaveMode,
    /// Controls with preset overrides applied, in emission order.
    pub controls: Vec<ResolvedControl>,
}

impl Program {
    /// Assemble the complete fragment shader.
    pub fn assemble(&self) -> String {
        let mut out = String::with_capacity(16 * 1024);

        self.write_prelude(&mut out);
        self.write_wave_renderer(&mut out);
        self.write_standard_uniforms(&mut out);
        self.write_control_uniforms(&mut out);
        self.write_main(&mut out);

        out
    }

    /// Version directive, output declaration, and injected helpers.
    fn write_prelude(&self, out: &mut String) {
        out.push_str("#version 330 core\n\n");
        out.push_str("out vec4 FragColor;\n\n");
        out.push_str(HELPER_FUNCTIONS);
    }

    /// Wave-mode helpers, vertex function, and `draw_wave`.
    fn write_wave_renderer(&self, out: &mut String) {
        out.push_str(&self.wave_mode.glsl());
    }

    fn write_standard_uniforms(&self, out: &mut String) {
        out.push_str("\n// Standard host uniforms\n");
        out.push_str("uniform float iTime;\n");
        out.push_str("uniform vec2 iResolution;\n");
        out.push_str("uniform float iFps;\n");
        out.push_str("uniform float iFrame;\n");
        out.push_str("uniform float iProgress;\n");
        out.push_str("uniform vec4 iAudioBands;\n");
        out.push_str("uniform vec4 iAudioBandsAtt;\n");
        out.push_str("uniform sampler2D iChannel0; // Feedback buffer\n");
        out.push_str("uniform sampler2D iChannel1;\n");
        out.push_str("uniform sampler2D iChannel2;\n");
        out.push_str("uniform sampler2D iChannel3;\n\n");
    }

    /// One annotated uniform per control, in table order.
    fn write_control_uniforms(&self, out: &mut String) {
        out.push_str("// Preset-specific uniforms with UI annotations\n");
        for control in &self.controls {
            let descriptor = control.descriptor;
            let meta = ControlMeta {
                widget: descriptor.widget,
                default: control.default,
                min: control.min,
                max: control.max,
                step: descriptor.step,
            };
            let json =
                serde_json::to_string(&meta).expect("control metadata serializes to JSON");
            out.push_str(&format!(
                "uniform float u_{} = {}; // {}\n",
                descriptor.name,
                format_float(control.default),
                json
            ));
        }
    }

    fn write_main(&self, out: &mut String) {
        out.push_str("\nvoid main() {\n");
        out.push_str("    // Calculate UV coordinates from screen position\n");
        out.push_str("    vec2 uv = gl_FragCoord.xy / iResolution.xy;\n\n");

        out.push_str("    // Initialize local variables from uniforms\n");
        for control in &self.controls {
            let name = control.descriptor.name;
            out.push_str(&format!("    float {} = u_{};\n", name, name));
        }

        out.push_str("\n    // State variables\n");
        for i in 1..=32 {
            out.push_str(&format!("    float q{} = 0.0;\n", i));
        }
        for i in 1..=8 {
            out.push_str(&format!("    float t{} = 0.0;\n", i));
        }
        for local in self.symbols.user_locals() {
            out.push_str(&format!("    float {} = 0.0;\n", local.name));
        }
        out.push_str("    vec4 pixelColor = vec4(0.0, 0.0, 0.0, 0.0);\n");

        out.push_str("\n    // Per-frame logic\n");
        let per_frame = GlslEmitter::new(&self.symbols);
        out.push_str(&per_frame.emit_block(&self.per_frame));

        out.push_str("\n    // Per-pixel logic\n");
        let per_pixel = GlslEmitter::with_rewrites(&self.symbols, PER_PIXEL_REWRITES);
        out.push_str(&per_pixel.emit_block(&self.per_pixel));

        out.push_str(EPILOGUE_TRANSFORM);
        out.push_str(&format!(
            "    float wave_intensity = {};\n",
            self.wave_mode.call_pattern()
        ));
        out.push_str(EPILOGUE_COMPOSE);
    }
}

/// Helpers injected into every generated shader.
///
/// `log10` and `megabuf` back the pass-through calls of the same name so
/// a preset using them still yields compilable GLSL.
const HELPER_FUNCTIONS: &str = r#"float float_from_bool(bool b) { return b ? 1.0 : 0.0; }

float rand(vec2 co){
    return fract(sin(dot(co.xy ,vec2(12.9898,78.233))) * 43758.5453);
}
const float EPSILON_EEL = 0.00001;
float sigmoid_eel(float value, float response) {
    float t = 1.0 + exp(-(value) * response);
    return (abs(t) > EPSILON_EEL) ? (1.0 / t) : 0.0;
}
float boolean_and_op_eel(float lhs, float rhs) {
    return (abs(lhs) > EPSILON_EEL && abs(rhs) > EPSILON_EEL) ? 1.0 : 0.0;
}
float boolean_or_op_eel(float lhs, float rhs) {
    return (abs(lhs) > EPSILON_EEL) ? 1.0 : ((abs(rhs) > EPSILON_EEL) ? 1.0 : 0.0);
}
float exec2_helper(float first, float second) {
    return second;
}
float exec3_helper(float first, float second, float third) {
    return third;
}
float log10(float value) {
    return log(value) / log(10.0);
}
float megabuf(float index) {
    return 0.0;
}
"#;

/// Post-pipeline: feedback warp up to the waveform call.
const EPILOGUE_TRANSFORM: &str = r#"
    // Apply coordinate transformations using per-pixel state.
    vec2 pixelCenter = vec2(cx, cy);
    vec2 pixelTranslate = vec2(dx, dy);
    vec2 pixelScale = vec2(sx, sy);
    float pixelZoom = zoom;
    float pixelZoomExp = zoomexp;
    float pixelWarp = warp;
    float pixelRotate = rot;
    float pixelDecay = decay;
    pixelColor = vec4(r, g, b, a);
    vec2 pixelUV = uv;

    vec2 centeredUV = pixelUV - pixelCenter;
    mat2 rotationMatrix = mat2(cos(pixelRotate), -sin(pixelRotate), sin(pixelRotate), cos(pixelRotate));
    centeredUV = rotationMatrix * centeredUV;

    float zoomDenominator = max(0.0001, pow(max(0.0001, pixelZoom), pixelZoomExp));
    vec2 scaleMagnitude = max(abs(pixelScale), vec2(0.0001));
    vec2 scaleSign = vec2(pixelScale.x >= 0.0 ? 1.0 : -1.0, pixelScale.y >= 0.0 ? 1.0 : -1.0);
    vec2 safeScale = scaleSign * scaleMagnitude;
    vec2 scaledUV = centeredUV / safeScale;
    scaledUV /= zoomDenominator;
    scaledUV *= pixelWarp;

    vec2 sampleUV = pixelCenter + scaledUV + pixelTranslate;
    sampleUV = clamp(sampleUV, vec2(0.001), vec2(0.999));

    // Fetch feedback using the transformed UV and apply decay.
    vec4 feedback = texture(iChannel0, sampleUV);
    float decayFactor = clamp(pixelDecay, 0.0, 1.0);
    feedback.rgb *= decayFactor;

    // Blend feedback with per-pixel color output.
    vec4 perPixelColor = clamp(pixelColor, 0.0, 1.0);
    float perPixelAlpha = clamp(perPixelColor.a, 0.0, 1.0);
    vec4 composedColor = mix(feedback, perPixelColor, perPixelAlpha);

    // Preserve existing border tint.
    vec4 border_color = clamp(vec4(ob_r, ob_g, ob_b, ob_a), 0.0, 1.0);
    composedColor = mix(composedColor, border_color, border_color.a);

    // Overlay waveforms.
    vec4 wave_color = clamp(vec4(wave_r, wave_g, wave_b, wave_a), 0.0, 1.0);
"#;

/// Post-pipeline: blend the waveform and write the fragment.
const EPILOGUE_COMPOSE: &str = r#"    composedColor.rgb = mix(composedColor.rgb, wave_color.rgb, clamp(wave_intensity * wave_color.a, 0.0, 1.0));

    FragColor = vec4(clamp(composedColor.rgb, 0.0, 1.0), clamp(composedColor.a, 0.0, 1.0));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use milkc_par::Parser;
    use milkc_util::Handler;

    /// Build a program from two blocks with no preset overrides.
    fn program(per_frame: &str, per_pixel: &str, wave_mode: WaveMode) -> Program {
        let handler = Handler::new();
        let mut symbols = SymbolTable::new();
        let per_frame = Parser::from_source(per_frame, &mut symbols, &handler).parse();
        let per_pixel = Parser::from_source(per_pixel, &mut symbols, &handler).parse();
        Program {
            per_frame,
            per_pixel,
            symbols,
            wave_mode,
            controls: ResolvedControl::resolve_all(|_| None),
        }
    }

    #[test]
    fn test_shader_skeleton() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        assert!(shader.starts_with("#version 330 core\n"));
        assert!(shader.contains("out vec4 FragColor;"));
        assert!(shader.contains("void main() {"));
        assert!(shader.ends_with("}\n"));
        assert!(shader.contains("vec2 uv = gl_FragCoord.xy / iResolution.xy;"));
    }

    #[test]
    fn test_injected_helpers_present() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        for helper in [
            "float float_from_bool(bool b)",
            "float rand(vec2 co)",
            "float sigmoid_eel(float value, float response)",
            "float boolean_and_op_eel(float lhs, float rhs)",
            "float boolean_or_op_eel(float lhs, float rhs)",
            "float exec2_helper(float first, float second)",
            "float exec3_helper(float first, float second, float third)",
            "float log10(float value)",
            "float megabuf(float index)",
        ] {
            assert!(shader.contains(helper), "missing helper: {}", helper);
        }
    }

    #[test]
    fn test_standard_uniforms_present() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        for uniform in [
            "uniform float iTime;",
            "uniform vec2 iResolution;",
            "uniform float iFps;",
            "uniform float iFrame;",
            "uniform float iProgress;",
            "uniform vec4 iAudioBands;",
            "uniform vec4 iAudioBandsAtt;",
            "uniform sampler2D iChannel0;",
            "uniform sampler2D iChannel3;",
        ] {
            assert!(shader.contains(uniform), "missing uniform: {}", uniform);
        }
    }

    #[test]
    fn test_control_uniform_line_format() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        assert!(shader.contains(
            "uniform float u_zoom = 1.0; // {\"widget\":\"slider\",\"default\":1.0,\"min\":0.5,\"max\":1.5,\"step\":0.01}"
        ));
        // Every control gets a uniform and a local copy.
        for control in tables::CONTROLS {
            assert!(
                shader.contains(&format!("uniform float u_{} = ", control.name)),
                "missing uniform for {}",
                control.name
            );
            assert!(
                shader.contains(&format!("    float {} = u_{};\n", control.name, control.name)),
                "missing local init for {}",
                control.name
            );
        }
    }

    #[test]
    fn test_control_override_widens_bounds() {
        // Preset sets zoom=2.5, beyond the default max of 1.5.
        let mut p = program("", "", WaveMode::LineWave);
        p.controls = ResolvedControl::resolve_all(|name| (name == "zoom").then_some(2.5));
        let shader = p.assemble();
        assert!(shader.contains(
            "uniform float u_zoom = 2.5; // {\"widget\":\"slider\",\"default\":2.5,\"min\":0.5,\"max\":2.5,\"step\":0.01}"
        ));
    }

    #[test]
    fn test_control_override_below_min_widens_min() {
        let mut p = program("", "", WaveMode::LineWave);
        p.controls = ResolvedControl::resolve_all(|name| (name == "decay").then_some(0.5));
        let shader = p.assemble();
        assert!(shader.contains("uniform float u_decay = 0.5;"));
        assert!(shader.contains("\"min\":0.5,\"max\":1.0"));
    }

    #[test]
    fn test_state_registers_declared() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        for name in ["q1", "q16", "q32", "t1", "t8"] {
            assert!(
                shader.contains(&format!("    float {} = 0.0;\n", name)),
                "missing register {}",
                name
            );
        }
        assert!(!shader.contains("float q33"));
        assert!(!shader.contains("float t9"));
    }

    #[test]
    fn test_user_locals_declared() {
        let shader = program("myvar = bass*2;", "", WaveMode::LineWave).assemble();
        assert!(shader.contains("    float myvar = 0.0;\n"));
        assert!(shader.contains("    myvar = (iAudioBands.x * 2.0);\n"));
    }

    #[test]
    fn test_per_frame_block_after_control_init() {
        let shader = program("zoom = 1.2;", "", WaveMode::LineWave).assemble();
        let init = shader
            .find("float zoom = u_zoom;")
            .expect("control init present");
        let assign = shader.find("    zoom = 1.2;\n").expect("per-frame assignment");
        assert!(assign > init);
    }

    #[test]
    fn test_epilogue_present() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        for fragment in [
            "vec2 pixelCenter = vec2(cx, cy);",
            "mat2 rotationMatrix = mat2(cos(pixelRotate), -sin(pixelRotate), sin(pixelRotate), cos(pixelRotate));",
            "vec4 feedback = texture(iChannel0, sampleUV);",
            "sampleUV = clamp(sampleUV, vec2(0.001), vec2(0.999));",
            "vec4 border_color = clamp(vec4(ob_r, ob_g, ob_b, ob_a), 0.0, 1.0);",
            "FragColor = vec4(clamp(composedColor.rgb, 0.0, 1.0), clamp(composedColor.a, 0.0, 1.0));",
        ] {
            assert!(shader.contains(fragment), "missing epilogue piece: {}", fragment);
        }
    }

    #[test]
    fn test_wave_call_uses_mode_pattern() {
        let shader = program("", "", WaveMode::LineWave).assemble();
        assert!(shader.contains(
            "float wave_intensity = draw_wave(pixelUV, iAudioBands.xy, 128, wave_x, wave_y, wave_mystery);"
        ));

        let shader = program("", "", WaveMode::CenteredSpiroVolume).assemble();
        assert!(shader.contains(
            "float wave_intensity = draw_wave(pixelUV, iAudioBands.xy, 128, wave_x, wave_y, wave_mystery, iAudioBands.z);"
        ));
    }

    #[test]
    fn test_exactly_one_draw_wave_per_shader() {
        for mode in [WaveMode::LineWave, WaveMode::DoubleLineWave, WaveMode::Fallback] {
            let shader = program("", "", mode).assemble();
            assert_eq!(
                shader.matches("float draw_wave(").count(),
                1,
                "mode {:?}",
                mode
            );
        }
    }

    #[test]
    fn test_assembly_deterministic() {
        let a = program("q1 = time; zoom = 1.1;", "r = rad;", WaveMode::CircleWave).assemble();
        let b = program("q1 = time; zoom = 1.1;", "r = rad;", WaveMode::CircleWave).assemble();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_blocks_still_produce_valid_skeleton() {
        // Worst case (all statements failed) must still be a complete
        // shader: main with declarations and epilogue, no code blocks.
        let shader = program("", "", WaveMode::Fallback).assemble();
        assert!(shader.contains("// Per-frame logic\n\n"));
        assert!(shader.contains("void main() {"));
        assert!(shader.ends_with("}\n"));
    }
}
