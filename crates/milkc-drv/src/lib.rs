//! milkc-drv - Conversion driver.
//!
//! Orchestrates the pipeline for one preset:
//!
//! ```text
//! .milk file ──▶ PresetFile ──▶ (scalars, code blocks)
//!                                 │
//!                                 ▼
//!                   normalize ─▶ lex ─▶ parse ─▶ AST + SymbolTable
//!                                 │
//!                                 ▼
//!                     wave-mode + control resolution
//!                                 │
//!                                 ▼
//!                      Program::assemble() ──▶ .frag text
//! ```
//!
//! One call to [`translate`] runs everything synchronously and returns
//! the shader string; the only fallible steps are reading the preset
//! and writing the output (see [`convert`]). Diagnostics collected
//! along the way are logged to the `tracing` subscriber - a preset full
//! of broken statements still converts, just with warnings and a
//! sparser shader.

pub mod error;
pub mod preset;

pub use error::ConvertError;
pub use preset::PresetFile;

use std::fs;
use std::path::PathBuf;

use milkc_gen::{Program, ResolvedControl, WaveMode, DEFAULT_WAVE_MODE};
use milkc_lex::normalize;
use milkc_par::Parser;
use milkc_sem::SymbolTable;
use milkc_util::{Handler, Level, Span};

/// Driver configuration for one conversion.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input preset path.
    pub input: PathBuf,
    /// Output shader path.
    pub output: PathBuf,
}

/// Convert a preset file into a fragment shader file.
///
/// Returns `Err` only for I/O failures; preset-content problems degrade
/// per statement and are logged.
pub fn convert(config: &Config) -> Result<(), ConvertError> {
    tracing::debug!("reading preset {}", config.input.display());
    let preset = PresetFile::read(&config.input)?;

    let per_frame = preset.code("per_frame_");
    let per_pixel = preset.code("per_pixel_");
    let shader = translate(&per_frame, &per_pixel, &preset);

    tracing::debug!("writing shader {}", config.output.display());
    fs::write(&config.output, shader).map_err(|source| ConvertError::WriteOutput {
        path: config.output.clone(),
        source,
    })?;
    Ok(())
}

/// Translate two expression blocks plus preset scalars into a shader.
///
/// Deterministic: byte-identical inputs produce a byte-identical
/// shader string.
pub fn translate(per_frame: &str, per_pixel: &str, preset: &PresetFile) -> String {
    let handler = Handler::new();
    let program = analyze(per_frame, per_pixel, preset, &handler);

    for diagnostic in handler.diagnostics() {
        match diagnostic.level {
            Level::Error => tracing::error!("{}", diagnostic),
            _ => tracing::warn!("{}", diagnostic),
        }
    }

    program.assemble()
}

/// Run normalization, parsing, and preset resolution, reporting
/// problems to `handler`.
pub fn analyze(
    per_frame: &str,
    per_pixel: &str,
    preset: &PresetFile,
    handler: &Handler,
) -> Program {
    let mut symbols = SymbolTable::new();

    let per_frame_src = normalize(per_frame);
    let per_pixel_src = normalize(per_pixel);

    tracing::debug!("parsing per-frame block ({} bytes)", per_frame_src.len());
    let per_frame_ast = Parser::from_source(&per_frame_src, &mut symbols, handler).parse();
    warn_if_block_lost("per-frame", &per_frame_src, &per_frame_ast, handler);

    tracing::debug!("parsing per-pixel block ({} bytes)", per_pixel_src.len());
    let per_pixel_ast = Parser::from_source(&per_pixel_src, &mut symbols, handler).parse();
    warn_if_block_lost("per-pixel", &per_pixel_src, &per_pixel_ast, handler);

    let wave_mode = select_wave_mode(preset, handler);
    let controls = resolve_controls(preset, handler);

    Program {
        per_frame: per_frame_ast,
        per_pixel: per_pixel_ast,
        symbols,
        wave_mode,
        controls,
    }
}

/// Warn when a non-empty block lost all of its statements to errors.
fn warn_if_block_lost(
    which: &str,
    source: &str,
    ast: &milkc_par::Node,
    handler: &Handler,
) {
    if !source.trim().is_empty() && ast.is_empty_sequence() {
        handler.warning(
            format!("{} block produced no statements; emitting empty block", which),
            Span::DUMMY,
        );
    }
}

/// Pick the wave renderer from the preset's `nwavemode`.
///
/// Missing value: default mode 6. Non-numeric: warned, default
/// substituted. Out-of-range: warned, no-op fallback renderer.
fn select_wave_mode(preset: &PresetFile, handler: &Handler) -> WaveMode {
    let mode = match preset.scalar("nwavemode") {
        None => DEFAULT_WAVE_MODE,
        Some(text) => match parse_wave_mode(text) {
            Some(mode) => mode,
            None => {
                handler.warning(
                    format!("non-numeric nwavemode '{}'; using default", text.trim()),
                    Span::DUMMY,
                );
                DEFAULT_WAVE_MODE
            }
        },
    };

    match WaveMode::from_mode(mode) {
        Some(wave_mode) => wave_mode,
        None => {
            handler.warning(
                format!("unknown wave mode {}; using no-op fallback", mode),
                Span::DUMMY,
            );
            WaveMode::Fallback
        }
    }
}

/// Parse `nwavemode`, tolerating float spellings like `7.0`.
fn parse_wave_mode(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(|value| value as i64))
}

/// Resolve the control table against the preset's top-level scalars.
fn resolve_controls(preset: &PresetFile, handler: &Handler) -> Vec<ResolvedControl> {
    ResolvedControl::resolve_all(|name| {
        let text = preset.scalar(name)?;
        match text.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                handler.warning(
                    format!(
                        "control '{}' has non-numeric preset value '{}'; using default",
                        name,
                        text.trim()
                    ),
                    Span::DUMMY,
                );
                None
            }
        }
    })
}
