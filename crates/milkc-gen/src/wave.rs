//! Waveform renderer strategies.
//!
//! MilkDrop presets pick an overlay waveform style with the integer
//! `nwavemode`. Each supported mode contributes three GLSL fragments to
//! the shader: a shared helper block (emitted once), a mode-specific
//! vertex helper, and a `draw_wave(...)` function returning the overlay
//! intensity at a fragment. The epilogue calls `draw_wave` through the
//! mode's call pattern - mode 3 takes an extra volume argument, so the
//! call site cannot be hardcoded.
//!
//! The set is closed: adding a mode means adding a variant here and one
//! arm per match. Unknown modes fall back to a no-op renderer whose
//! `draw_wave` returns `0.0`, keeping the shader compilable.

/// A waveform rendering strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveMode {
    /// Mode 0: spectrum circle bars.
    CircleWave,
    /// Mode 2: centered dots with trails.
    CenteredSpiro,
    /// Mode 3: volume-modulated centered dots.
    CenteredSpiroVolume,
    /// Mode 4: derivative line.
    DerivativeLine,
    /// Mode 5: explosive hash radial pattern.
    ExplosiveHash,
    /// Mode 6: angle-adjustable line spectrum (the MilkDrop default).
    LineWave,
    /// Mode 7: double spectrum lines.
    DoubleLineWave,
    /// Mode 8: spectrum line (angled analyser).
    SpectrumLine,
    /// No-op renderer for unsupported modes.
    Fallback,
}

/// Default mode when the preset does not specify one.
pub const DEFAULT_WAVE_MODE: i64 = 6;

impl WaveMode {
    /// Strategy for a preset's `nwavemode` value.
    ///
    /// Returns `None` for values outside the supported set; the caller
    /// decides how loudly to fall back.
    pub fn from_mode(mode: i64) -> Option<Self> {
        match mode {
            0 => Some(WaveMode::CircleWave),
            2 => Some(WaveMode::CenteredSpiro),
            3 => Some(WaveMode::CenteredSpiroVolume),
            4 => Some(WaveMode::DerivativeLine),
            5 => Some(WaveMode::ExplosiveHash),
            6 => Some(WaveMode::LineWave),
            7 => Some(WaveMode::DoubleLineWave),
            8 => Some(WaveMode::SpectrumLine),
            _ => None,
        }
    }

    /// Complete GLSL for this strategy: shared helpers, vertex helper,
    /// and the `draw_wave` function.
    pub fn glsl(&self) -> String {
        let mut out = String::from(COMMON_HELPERS);
        out.push_str(self.vertex_function());
        out.push_str(self.draw_function());
        out
    }

    /// Mode-specific vertex helper (empty for the fallback).
    pub fn vertex_function(&self) -> &'static str {
        match self {
            WaveMode::CircleWave => MODE0_VERTEX,
            WaveMode::CenteredSpiro => MODE2_VERTEX,
            WaveMode::CenteredSpiroVolume => MODE3_VERTEX,
            WaveMode::DerivativeLine => MODE4_VERTEX,
            WaveMode::ExplosiveHash => MODE5_VERTEX,
            WaveMode::LineWave => MODE6_VERTEX,
            WaveMode::DoubleLineWave => MODE7_VERTEX,
            WaveMode::SpectrumLine => MODE8_VERTEX,
            WaveMode::Fallback => "",
        }
    }

    /// Mode-specific `draw_wave` implementation.
    pub fn draw_function(&self) -> &'static str {
        match self {
            WaveMode::CircleWave => MODE0_DRAW,
            WaveMode::CenteredSpiro => MODE2_DRAW,
            WaveMode::CenteredSpiroVolume => MODE3_DRAW,
            WaveMode::DerivativeLine => MODE4_DRAW,
            WaveMode::ExplosiveHash => MODE5_DRAW,
            WaveMode::LineWave => MODE6_DRAW,
            WaveMode::DoubleLineWave => MODE7_DRAW,
            WaveMode::SpectrumLine => MODE8_DRAW,
            WaveMode::Fallback => FALLBACK_DRAW,
        }
    }

    /// Call expression the epilogue uses to invoke `draw_wave`.
    ///
    /// Mode 3 modulates point size by volume and takes `iAudioBands.z`
    /// as a seventh argument.
    pub fn call_pattern(&self) -> &'static str {
        match self {
            WaveMode::CenteredSpiroVolume => {
                "draw_wave(pixelUV, iAudioBands.xy, 128, wave_x, wave_y, wave_mystery, iAudioBands.z)"
            }
            _ => "draw_wave(pixelUV, iAudioBands.xy, 128, wave_x, wave_y, wave_mystery)",
        }
    }
}

/// Helper functions shared by every strategy.
const COMMON_HELPERS: &str = r#"
const float WAVE_EPSILON = 1e-5;
const float WAVE_INTENSITY_CUTOFF = 1e-4;
const float WAVE_DISTANCE_CLAMP = 8.0;
const float WAVE_MAX_ANGLE = 8192.0;
const float WAVE_TWO_PI = 6.28318530718;
const int WAVE_MIN_WARMUP_ITERATIONS = 4;

const int MODE0_MAX_WAVE_ITERATIONS = 48;
const int MODE2_MAX_WAVE_ITERATIONS = 48;
const int MODE3_MAX_WAVE_ITERATIONS = 48;
const int MODE4_MAX_WAVE_ITERATIONS = 64;
const int MODE5_MAX_WAVE_ITERATIONS = 48;
const int MODE6_MAX_WAVE_ITERATIONS = 64;
const int MODE7_MAX_WAVE_ITERATIONS = 48;
const int MODE8_MAX_WAVE_ITERATIONS = 64;

vec2 wave_aspect()
{
    return vec2(1.0, 1.0);
}

float wave_clamp_angle(float angle)
{
    return clamp(angle, -WAVE_MAX_ANGLE, WAVE_MAX_ANGLE);
}

float wave_safe_cos(float angle)
{
    return cos(wave_clamp_angle(angle));
}

float wave_safe_sin(float angle)
{
    return sin(wave_clamp_angle(angle));
}

vec2 wave_clamp_vec(vec2 value)
{
    return clamp(value, vec2(-WAVE_DISTANCE_CLAMP), vec2(WAVE_DISTANCE_CLAMP));
}

float wave_safe_length(vec2 value)
{
    vec2 clamped = wave_clamp_vec(value);
    return length(clamped);
}

float wave_safe_distance(vec2 a, vec2 b)
{
    return wave_safe_length(a - b);
}

float wave_contribution(float distance, float softness)
{
    float safeSoftness = max(softness, WAVE_EPSILON);
    float clampedDistance = clamp(distance, 0.0, WAVE_DISTANCE_CLAMP);
    return 1.0 - smoothstep(0.0, safeSoftness, clampedDistance);
}

float wave_distance_to_segment(vec2 p, vec2 v, vec2 w)
{
    vec2 clampedDiff = wave_clamp_vec(w - v);
    float l2 = max(dot(clampedDiff, clampedDiff), WAVE_EPSILON);
    vec2 clampedP = wave_clamp_vec(p - v);
    float t = clamp(dot(clampedP, clampedDiff) / l2, 0.0, 1.0);
    vec2 projection = v + clampedDiff * t;
    return wave_safe_distance(p, projection);
}

float wave_safe_divide(float numerator, float denominator)
{
    float denom = abs(denominator) < WAVE_EPSILON
        ? (denominator >= 0.0 ? WAVE_EPSILON : -WAVE_EPSILON)
        : denominator;
    return numerator / denom;
}

vec2 wave_clamp_audio(vec2 audio)
{
    return clamp(audio, vec2(-1.0), vec2(1.0));
}

bool wave_should_exit(int index, float contribution)
{
    return (index >= WAVE_MIN_WARMUP_ITERATIONS) && (contribution <= WAVE_INTENSITY_CUTOFF);
}

void clip_waveform_edges(float angle, float wave_x, float wave_y, float sample_count,
                         out float edge_x, out float edge_y,
                         out float distance_x, out float distance_y,
                         out float perpendicular_dx, out float perpendicular_dy)
{
    float safeAngle = wave_clamp_angle(angle);
    float orthoAngle = safeAngle + 1.57;
    vec2 direction = vec2(wave_safe_cos(safeAngle), wave_safe_sin(safeAngle));
    float orthoCos = wave_safe_cos(orthoAngle);
    float orthoSin = wave_safe_sin(orthoAngle);

    vec2 edge[2];
    edge[0] = wave_clamp_vec(vec2(wave_x * orthoCos - direction.x * 3.0,
                                  wave_y * orthoSin - direction.y * 3.0));
    edge[1] = wave_clamp_vec(vec2(wave_x * orthoCos + direction.x * 3.0,
                                  wave_y * orthoSin + direction.y * 3.0));

    for (int i = 0; i < 2; ++i)
    {
        for (int j = 0; j < 4; ++j)
        {
            float t = 0.0;
            bool clip = false;
            if (j == 0 && edge[i].x > 1.1)
            {
                t = wave_safe_divide(1.1 - edge[1 - i].x, edge[i].x - edge[1 - i].x);
                clip = true;
            }
            else if (j == 1 && edge[i].x < -1.1)
            {
                t = wave_safe_divide(-1.1 - edge[1 - i].x, edge[i].x - edge[1 - i].x);
                clip = true;
            }
            else if (j == 2 && edge[i].y > 1.1)
            {
                t = wave_safe_divide(1.1 - edge[1 - i].y, edge[i].y - edge[1 - i].y);
                clip = true;
            }
            else if (j == 3 && edge[i].y < -1.1)
            {
                t = wave_safe_divide(-1.1 - edge[1 - i].y, edge[i].y - edge[1 - i].y);
                clip = true;
            }

            if (clip)
            {
                t = clamp(t, 0.0, 1.0);
                vec2 diff = edge[i] - edge[1 - i];
                edge[i] = wave_clamp_vec(edge[1 - i] + diff * t);
            }
        }
    }

    vec2 diff = wave_clamp_vec(edge[1] - edge[0]);
    float inv_samples = 1.0 / max(sample_count, 1.0);
    vec2 delta = diff * inv_samples;

    edge_x = edge[0].x;
    edge_y = edge[0].y;
    distance_x = delta.x;
    distance_y = delta.y;

    float angle2 = atan(delta.y, delta.x);
    perpendicular_dx = wave_safe_cos(angle2 + 1.57);
    perpendicular_dy = wave_safe_sin(angle2 + 1.57);
}
"#;

const MODE0_VERTEX: &str = r#"
vec2 wave_mode0_vertex(float radius, float angle, vec2 center, vec2 aspect)
{
    float safeRadius = clamp(radius, -2.0, 2.0);
    float c = wave_safe_cos(angle);
    float s = wave_safe_sin(angle);
    return vec2(safeRadius * c * aspect.y + center.x,
                safeRadius * s * aspect.x + center.y);
}
"#;

const MODE0_DRAW: &str = r#"
// Mode 0: Spectrum circle bars
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    vec2 center = vec2(wave_x, wave_y);
    vec2 aspect = wave_aspect();
    float wave_scale = 0.25;
    float mystery = clamp(wave_mystery * 0.5 + 0.5, -1.0, 1.0);
    mystery = abs(fract(mystery));
    mystery = mystery * 2.0 - 1.0;

    int raw_samples = max(samples / 2, 2);
    int sample_count = min(raw_samples, MODE0_MAX_WAVE_ITERATIONS + 1);
    int segment_count = max(sample_count - 1, 1);
    float sample_count_f = float(sample_count);
    float angle_base = iTime * 0.2;
    float angle_step = WAVE_TWO_PI / max(sample_count_f, 1.0);

    for (int i = 0; i < segment_count; ++i)
    {
        float displacement1 = (i % 2 == 0) ? audio.x : audio.y;
        float displacement2 = ((i + 1) % 2 == 0) ? audio.x : audio.y;
        float radius1 = clamp(0.5 + 0.4 * displacement1 * wave_scale + mystery, -2.0, 2.0);
        float radius2 = clamp(0.5 + 0.4 * displacement2 * wave_scale + mystery, -2.0, 2.0);
        float angle1 = angle_base + angle_step * float(i);
        float angle2 = angle1 + angle_step;
        vec2 p1 = wave_mode0_vertex(radius1, angle1, center, aspect);
        vec2 p2 = wave_mode0_vertex(radius2, angle2, center, aspect);
        float dist = wave_distance_to_segment(uv, p1, p2);
        float contribution = wave_contribution(dist, 0.01);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE2_VERTEX: &str = r#"
vec2 wave_mode2_vertex(float displacement_x, float displacement_y, vec2 center, vec2 aspect, float wave_scale)
{
    return vec2(displacement_x * wave_scale * aspect.y + center.x,
                displacement_y * wave_scale * aspect.x + center.y);
}
"#;

const MODE2_DRAW: &str = r#"
// Mode 2: Centered dots with trails
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    vec2 center = vec2(wave_x, wave_y);
    vec2 aspect = wave_aspect();
    float wave_scale = 0.25;
    int sample_count = max(min(samples, MODE2_MAX_WAVE_ITERATIONS), 1);
    float sample_count_f = float(sample_count);

    for (int i = 0; i < sample_count; ++i)
    {
        float displacement_x = (i % 2 == 0) ? audio.x : audio.y;
        float displacement_y = ((i + 32) % 2 == 0) ? audio.x : audio.y;
        vec2 point = wave_mode2_vertex(displacement_x, displacement_y, center, aspect, wave_scale);
        float fade = 1.0 - float(i) / max(sample_count_f, 1.0);
        float dist = wave_safe_distance(uv, point);
        float contribution = wave_contribution(dist, 0.005 + 0.01 * fade);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE3_VERTEX: &str = r#"
vec2 wave_mode3_vertex(float displacement_x, float displacement_y, vec2 center, vec2 aspect, float wave_scale)
{
    return vec2(displacement_x * wave_scale * aspect.y + center.x,
                displacement_y * wave_scale * aspect.x + center.y);
}
"#;

const MODE3_DRAW: &str = r#"
// Mode 3: Volume-modulated centered dots
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery, float volume_level)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    vec2 center = vec2(wave_x, wave_y);
    vec2 aspect = wave_aspect();
    float base_scale = 0.25;
    float volume = clamp(volume_level, -1.0, 1.0);
    float volume_factor = clamp(volume * volume * 1.3, 0.1, 2.5);
    float wave_scale = base_scale * volume_factor;
    int sample_count = max(min(samples, MODE3_MAX_WAVE_ITERATIONS), 1);
    float sample_count_f = float(sample_count);

    for (int i = 0; i < sample_count; ++i)
    {
        float displacement_x = (i % 2 == 0) ? audio.x : audio.y;
        float displacement_y = ((i + 32) % 2 == 0) ? audio.x : audio.y;
        vec2 point = wave_mode3_vertex(displacement_x, displacement_y, center, aspect, wave_scale);
        float fade = 1.0 - float(i) / max(sample_count_f, 1.0);
        float dist = wave_safe_distance(uv, point);
        float contribution = wave_contribution(dist, 0.007 + 0.01 * fade);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE4_VERTEX: &str = r#"
vec2 wave_mode_line_vertex(float edge_x, float edge_y, float distance_x, float distance_y,
                           float perpendicular_dx, float perpendicular_dy, float index,
                           float displacement, float wave_scale)
{
    return vec2(edge_x + distance_x * index + perpendicular_dx * 0.25 * displacement * wave_scale,
                edge_y + distance_y * index + perpendicular_dy * 0.25 * displacement * wave_scale);
}
"#;

const MODE4_DRAW: &str = r#"
// Mode 4: Derivative line (scripted horizontal display)
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    float wave_scale = 0.25;

    int raw_samples = max(samples / 2, 2);
    int sample_count = min(raw_samples, MODE4_MAX_WAVE_ITERATIONS + 1);
    int segment_count = max(sample_count - 1, 1);

    float edge_x;
    float edge_y;
    float distance_x;
    float distance_y;
    float perpendicular_dx;
    float perpendicular_dy;
    clip_waveform_edges(0.0, wave_x, wave_y, float(sample_count), edge_x, edge_y,
                        distance_x, distance_y, perpendicular_dx, perpendicular_dy);

    for (int i = 0; i < segment_count; ++i)
    {
        float displacement1 = (i % 2 == 0) ? audio.x : audio.y;
        float displacement2 = ((i + 1) % 2 == 0) ? audio.x : audio.y;
        vec2 p1 = wave_mode_line_vertex(edge_x, edge_y, distance_x, distance_y,
                                        perpendicular_dx, perpendicular_dy, float(i), displacement1, wave_scale);
        vec2 p2 = wave_mode_line_vertex(edge_x, edge_y, distance_x, distance_y,
                                        perpendicular_dx, perpendicular_dy, float(i + 1), displacement2, wave_scale);
        float dist = wave_distance_to_segment(uv, p1, p2);
        float contribution = wave_contribution(dist, 0.01);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE5_VERTEX: &str = r#"
vec2 wave_mode5_vertex(float radius, float angle, vec2 center, vec2 aspect)
{
    float safeRadius = clamp(radius, -2.0, 2.0);
    float c = wave_safe_cos(angle);
    float s = wave_safe_sin(angle);
    return vec2(safeRadius * c * aspect.y + center.x,
                safeRadius * s * aspect.x + center.y);
}
"#;

const MODE5_DRAW: &str = r#"
// Mode 5: Explosive hash radial pattern
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    vec2 center = vec2(wave_x, wave_y);
    vec2 aspect = wave_aspect();
    float wave_scale = 0.25;

    int raw_samples = max(samples / 2, 1);
    int sample_count = max(min(raw_samples, MODE5_MAX_WAVE_ITERATIONS), 1);
    float sample_count_f = float(sample_count);

    for (int i = 0; i < sample_count; ++i)
    {
        float displacement = (i % 2 == 0) ? audio.x : audio.y;
        float t = float(i) / max(sample_count_f, 1.0);
        float angle = wave_mystery + WAVE_TWO_PI * t;
        float radius = clamp(0.5 + 0.5 * displacement * wave_scale, 0.0, 2.0);
        vec2 point = wave_mode5_vertex(radius, angle, center, aspect);
        float dist = wave_safe_distance(uv, point);
        float contribution = wave_contribution(dist, 0.008);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE6_VERTEX: &str = r#"
vec2 wave_mode6_vertex(float edge_x, float edge_y, float distance_x, float distance_y,
                       float perpendicular_dx, float perpendicular_dy, float index,
                       float displacement, float wave_scale)
{
    return vec2(edge_x + distance_x * index + perpendicular_dx * 0.25 * displacement * wave_scale,
                edge_y + distance_y * index + perpendicular_dy * 0.25 * displacement * wave_scale);
}
"#;

const MODE6_DRAW: &str = r#"
// Mode 6: Angle-adjustable line spectrum
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    float wave_scale = 0.25;

    int raw_samples = max(samples / 2, 2);
    int sample_count = min(raw_samples, MODE6_MAX_WAVE_ITERATIONS + 1);
    int segment_count = max(sample_count - 1, 1);

    float orientation = 1.57 + clamp(wave_mystery, -1.0, 1.0);

    float edge_x;
    float edge_y;
    float distance_x;
    float distance_y;
    float perpendicular_dx;
    float perpendicular_dy;
    clip_waveform_edges(orientation, wave_x, wave_y, float(sample_count), edge_x, edge_y,
                        distance_x, distance_y, perpendicular_dx, perpendicular_dy);

    for (int i = 0; i < segment_count; ++i)
    {
        float displacement1 = (i % 2 == 0) ? audio.x : audio.y;
        float displacement2 = ((i + 1) % 2 == 0) ? audio.x : audio.y;
        vec2 p1 = wave_mode6_vertex(edge_x, edge_y, distance_x, distance_y,
                                    perpendicular_dx, perpendicular_dy, float(i), displacement1, wave_scale);
        vec2 p2 = wave_mode6_vertex(edge_x, edge_y, distance_x, distance_y,
                                    perpendicular_dx, perpendicular_dy, float(i + 1), displacement2, wave_scale);
        float dist = wave_distance_to_segment(uv, p1, p2);
        float contribution = wave_contribution(dist, 0.01);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE7_VERTEX: &str = r#"
vec2 wave_mode7_vertex(float edge_x, float edge_y, float distance_x, float distance_y,
                       float perpendicular_dx, float perpendicular_dy, float index,
                       float displacement, float wave_scale, float separation)
{
    return vec2(edge_x + distance_x * index + perpendicular_dx * (0.25 * displacement * wave_scale + separation),
                edge_y + distance_y * index + perpendicular_dy * (0.25 * displacement * wave_scale + separation));
}
"#;

const MODE7_DRAW: &str = r#"
// Mode 7: Double spectrum lines
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;
    float wave_scale = 0.25;

    int raw_samples = max(samples / 2, 2);
    int sample_count = min(raw_samples, MODE7_MAX_WAVE_ITERATIONS + 1);
    int segment_count = max(sample_count - 1, 1);

    float orientation = 1.57 * max(wave_mystery, 0.1);

    float edge_x;
    float edge_y;
    float distance_x;
    float distance_y;
    float perpendicular_dx;
    float perpendicular_dy;
    clip_waveform_edges(orientation, wave_x, wave_y, float(sample_count), edge_x, edge_y,
                        distance_x, distance_y, perpendicular_dx, perpendicular_dy);

    float separation = pow(clamp(wave_y * 0.5 + 0.5, 0.0, 1.0), 2.0);

    for (int i = 0; i < segment_count; ++i)
    {
        vec2 p1L = wave_mode7_vertex(edge_x, edge_y, distance_x, distance_y,
                                     perpendicular_dx, perpendicular_dy, float(i), audio.x, wave_scale, separation);
        vec2 p2L = wave_mode7_vertex(edge_x, edge_y, distance_x, distance_y,
                                     perpendicular_dx, perpendicular_dy, float(i + 1), audio.x, wave_scale, separation);
        float distL = wave_distance_to_segment(uv, p1L, p2L);
        float contributionL = wave_contribution(distL, 0.01);
        intensity += contributionL;

        vec2 p1R = wave_mode7_vertex(edge_x, edge_y, distance_x, distance_y,
                                     perpendicular_dx, perpendicular_dy, float(i), audio.y, wave_scale, -separation);
        vec2 p2R = wave_mode7_vertex(edge_x, edge_y, distance_x, distance_y,
                                     perpendicular_dx, perpendicular_dy, float(i + 1), audio.y, wave_scale, -separation);
        float distR = wave_distance_to_segment(uv, p1R, p2R);
        float contributionR = wave_contribution(distR, 0.01);
        intensity += contributionR;

        if (wave_should_exit(i, contributionL + contributionR))
        {
            break;
        }
    }

    return intensity;
}
"#;

const MODE8_VERTEX: &str = r#"
vec2 wave_mode8_vertex(float edge_x, float edge_y, float distance_x, float distance_y,
                       float perpendicular_dx, float perpendicular_dy, float index, float displacement)
{
    float f = 0.1 * log(max(abs(displacement), 0.0001));
    return vec2(edge_x + distance_x * index + perpendicular_dx * f,
                edge_y + distance_y * index + perpendicular_dy * f);
}
"#;

const MODE8_DRAW: &str = r#"
// Mode 8: Spectrum line (angled analyser)
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    vec2 audio = wave_clamp_audio(audio_data);
    float intensity = 0.0;

    int raw_samples = max(min(samples, 256), 2);
    int sample_count = min(raw_samples, MODE8_MAX_WAVE_ITERATIONS + 1);
    int segment_count = max(sample_count - 1, 1);

    float orientation = 1.57 * max(wave_mystery, 0.1);

    float edge_x;
    float edge_y;
    float distance_x;
    float distance_y;
    float perpendicular_dx;
    float perpendicular_dy;
    clip_waveform_edges(orientation, wave_x, wave_y, float(sample_count), edge_x, edge_y,
                        distance_x, distance_y, perpendicular_dx, perpendicular_dy);

    for (int i = 0; i < segment_count; ++i)
    {
        float displacement1 = (i % 2 == 0) ? audio.x : audio.y;
        float displacement2 = ((i + 1) % 2 == 0) ? audio.x : audio.y;
        vec2 p1 = wave_mode8_vertex(edge_x, edge_y, distance_x, distance_y,
                                    perpendicular_dx, perpendicular_dy, float(i), displacement1);
        vec2 p2 = wave_mode8_vertex(edge_x, edge_y, distance_x, distance_y,
                                    perpendicular_dx, perpendicular_dy, float(i + 1), displacement2);
        float dist = wave_distance_to_segment(uv, p1, p2);
        float contribution = wave_contribution(dist, 0.01);
        intensity += contribution;
        if (wave_should_exit(i, contribution))
        {
            break;
        }
    }

    return intensity;
}
"#;

const FALLBACK_DRAW: &str = r#"
// Fallback waveform renderer when the mode is unsupported
float draw_wave(vec2 uv, vec2 audio_data, int samples, float wave_x, float wave_y, float wave_mystery)
{
    return 0.0;
}
"#;
