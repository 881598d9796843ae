//! Static lookup tables: built-in variables, writable controls, and the
//! callable function set.
//!
//! Table order matters: uniforms are emitted by walking [`CONTROLS`] from
//! top to bottom, so the order here is the order in the generated shader.

/// Metadata for one writable control parameter.
///
/// Each control becomes a `uniform float u_<name>` with a JSON annotation
/// the host UI parses to build a slider. The preset may override
/// `default`; when the override falls outside `[min, max]` the slider
/// bounds are widened to include it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlDescriptor {
    /// Variable name as written in preset code.
    pub name: &'static str,
    /// Default value when the preset does not provide one.
    pub default: f64,
    /// UI widget kind.
    pub widget: &'static str,
    /// Slider minimum.
    pub min: f64,
    /// Slider maximum.
    pub max: f64,
    /// Slider step.
    pub step: f64,
}

/// Built-in read-only variables and their GLSL equivalents.
///
/// The mapping is exhaustive; emission uses the right-hand side verbatim.
pub const BUILTIN_VARS: &[(&str, &str)] = &[
    ("time", "iTime"),
    ("fps", "iFps"),
    ("frame", "iFrame"),
    ("progress", "iProgress"),
    ("bass", "iAudioBands.x"),
    ("mid", "iAudioBands.y"),
    ("treb", "iAudioBands.z"),
    ("bass_att", "iAudioBandsAtt.x"),
    ("mid_att", "iAudioBandsAtt.y"),
    ("treb_att", "iAudioBandsAtt.z"),
    ("x", "uv.x"),
    ("y", "uv.y"),
    ("rad", "length(uv - vec2(0.5))"),
    ("ang", "atan(uv.y - 0.5, uv.x - 0.5)"),
    ("aspectx", "(iResolution.y / iResolution.x)"),
    ("aspecty", "(iResolution.x / iResolution.y)"),
];

/// Writable control parameters, in uniform-emission order.
pub const CONTROLS: &[ControlDescriptor] = &[
    ctrl("zoom", 1.0, 0.5, 1.5, 0.01),
    ctrl("zoomexp", 1.0, 0.5, 2.0, 0.01),
    ctrl("rot", 0.0, -0.1, 0.1, 0.001),
    ctrl("warp", 1.0, 0.0, 2.0, 0.01),
    ctrl("cx", 0.5, 0.0, 1.0, 0.01),
    ctrl("cy", 0.5, 0.0, 1.0, 0.01),
    ctrl("dx", 0.0, -0.1, 0.1, 0.001),
    ctrl("dy", 0.0, -0.1, 0.1, 0.001),
    ctrl("sx", 1.0, 0.5, 1.5, 0.01),
    ctrl("sy", 1.0, 0.5, 1.5, 0.01),
    ctrl("wave_r", 0.5, 0.0, 1.0, 0.01),
    ctrl("wave_g", 0.5, 0.0, 1.0, 0.01),
    ctrl("wave_b", 0.5, 0.0, 1.0, 0.01),
    ctrl("wave_a", 1.0, 0.0, 1.0, 0.01),
    ctrl("wave_x", 0.5, 0.0, 1.0, 0.01),
    ctrl("wave_y", 0.5, 0.0, 1.0, 0.01),
    ctrl("wave_mystery", 0.0, -1.0, 1.0, 0.01),
    ctrl("decay", 0.98, 0.9, 1.0, 0.001),
    ctrl("gamma", 1.0, 0.1, 5.0, 0.01),
    ctrl("brighten", 0.0, 0.0, 1.0, 1.0),
    ctrl("darken", 0.0, 0.0, 1.0, 1.0),
    ctrl("solarize", 0.0, 0.0, 1.0, 1.0),
    ctrl("wrap", 1.0, 0.0, 1.0, 1.0),
    ctrl("invert", 0.0, 0.0, 1.0, 1.0),
    ctrl("darken_center", 0.0, 0.0, 1.0, 1.0),
    ctrl("r", 0.0, 0.0, 1.0, 0.01),
    ctrl("g", 0.0, 0.0, 1.0, 0.01),
    ctrl("b", 0.0, 0.0, 1.0, 0.01),
    ctrl("a", 1.0, 0.0, 1.0, 0.01),
    ctrl("ob_size", 0.01, 0.0, 0.1, 0.001),
    ctrl("ob_r", 0.0, 0.0, 1.0, 0.01),
    ctrl("ob_g", 0.0, 0.0, 1.0, 0.01),
    ctrl("ob_b", 0.0, 0.0, 1.0, 0.01),
    ctrl("ob_a", 1.0, 0.0, 1.0, 0.01),
    ctrl("ib_size", 0.01, 0.0, 0.1, 0.001),
    ctrl("ib_r", 0.0, 0.0, 1.0, 0.01),
    ctrl("ib_g", 0.0, 0.0, 1.0, 0.01),
    ctrl("ib_b", 0.0, 0.0, 1.0, 0.01),
    ctrl("ib_a", 1.0, 0.0, 1.0, 0.01),
    ctrl("mv_x", 12.0, 0.0, 64.0, 1.0),
    ctrl("mv_y", 9.0, 0.0, 48.0, 1.0),
    ctrl("mv_dx", 0.0, -0.1, 0.1, 0.001),
    ctrl("mv_dy", 0.0, -0.1, 0.1, 0.001),
    ctrl("mv_l", 0.5, 0.0, 2.0, 0.01),
    ctrl("mv_r", 1.0, 0.0, 1.0, 0.01),
    ctrl("mv_g", 1.0, 0.0, 1.0, 0.01),
    ctrl("mv_b", 1.0, 0.0, 1.0, 0.01),
    ctrl("mv_a", 0.0, 0.0, 1.0, 0.01),
    ctrl("echo_zoom", 1.0, 0.5, 2.0, 0.01),
    ctrl("echo_alpha", 0.0, 0.0, 1.0, 0.01),
    ctrl("echo_orient", 0.0, 0.0, 3.0, 1.0),
];

const fn ctrl(name: &'static str, default: f64, min: f64, max: f64, step: f64) -> ControlDescriptor {
    ControlDescriptor {
        name,
        default,
        widget: "slider",
        min,
        max,
        step,
    }
}

/// Callable functions and their arity.
///
/// `above`/`below`/`equal` are spelled as functions in preset code but
/// compile to the corresponding comparison operators; the parser
/// desugars them, so they never reach the emitter as calls.
pub const FUNCTIONS: &[(&str, usize)] = &[
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("asin", 1),
    ("acos", 1),
    ("atan", 1),
    ("atan2", 2),
    ("sqrt", 1),
    ("pow", 2),
    ("exp", 1),
    ("abs", 1),
    ("log", 1),
    ("log10", 1),
    ("min", 2),
    ("max", 2),
    ("floor", 1),
    ("ceil", 1),
    ("sign", 1),
    ("rand", 1),
    ("if", 3),
    ("sqr", 1),
    ("bnot", 1),
    ("band", 2),
    ("bor", 2),
    ("above", 2),
    ("below", 2),
    ("equal", 2),
    ("invsqrt", 1),
    ("sigmoid", 2),
    ("exec2", 2),
    ("exec3", 3),
    ("megabuf", 1),
];

/// GLSL equivalent of a built-in read-only variable, if `name` is one.
pub fn builtin_glsl(name: &str) -> Option<&'static str> {
    BUILTIN_VARS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, glsl)| *glsl)
}

/// Control descriptor for `name`, if it is a writable control.
pub fn control(name: &str) -> Option<&'static ControlDescriptor> {
    CONTROLS.iter().find(|c| c.name == name)
}

/// True for the state registers `q1..q32` and `t1..t8`.
pub fn is_state_register(name: &str) -> bool {
    let (prefix, limit) = match name.as_bytes().first() {
        Some(b'q') => ("q", 32),
        Some(b't') => ("t", 8),
        _ => return false,
    };
    let digits = &name[prefix.len()..];
    if digits.is_empty() || digits.starts_with('0') {
        return false;
    }
    matches!(digits.parse::<u32>(), Ok(n) if n >= 1 && n <= limit)
}

/// Arity of a whitelisted function, or `None` if the name is unknown.
pub fn function_arity(name: &str) -> Option<usize> {
    FUNCTIONS
        .iter()
        .find(|(func, _)| *func == name)
        .map(|(_, arity)| *arity)
}
