//! End-to-end translation scenarios.
//!
//! Each test feeds expression blocks (and preset scalars) through the
//! full pipeline and checks for literal fragments in the generated
//! shader, pinning the emitter's exact output text.

use milkc_drv::{translate, PresetFile};

fn empty_preset() -> PresetFile {
    PresetFile::parse("")
}

#[test]
fn scenario_per_frame_control_assignment() {
    // S1: the per-frame statement appears verbatim, after the control
    // has been initialized from its uniform.
    let shader = translate("zoom = 1.2;", "", &empty_preset());
    let init = shader.find("float zoom = u_zoom;").expect("control init");
    let assign = shader.find("    zoom = 1.2;\n").expect("assignment");
    assert!(assign > init);
}

#[test]
fn scenario_ternary_from_above() {
    // S2: comparison conditions unwrap into a raw ternary.
    let shader = translate("", "if(above(bass, 0.5), r = 1, r = 0);", &empty_preset());
    assert!(shader.contains("((iAudioBands.x > 0.5) ? (r = 1.0) : (r = 0.0));"));
}

#[test]
fn scenario_state_register_with_sqr_and_rand() {
    // S3: q1 is pre-declared and the expression lowers sqr/rand.
    let shader = translate("q1 = sqr(time)+rand(2);", "", &empty_preset());
    assert!(shader.contains("float q1 = 0.0;"));
    assert!(shader.contains("q1 = (((iTime)*(iTime)) + (rand(uv) * 2.0));"));
}

#[test]
fn scenario_user_local_declared_and_assigned() {
    // S4: unknown names become zero-initialized locals.
    let shader = translate("", "myvar = bass*2;", &empty_preset());
    assert!(shader.contains("float myvar = 0.0;"));
    assert!(shader.contains("myvar = (iAudioBands.x * 2.0);"));
}

#[test]
fn scenario_control_override_widens_slider() {
    // S5: a preset scalar beyond the default range becomes the new
    // default and the slider max widens to include it.
    let preset = PresetFile::parse("zoom=2.5\n");
    let shader = translate("", "", &preset);
    assert!(shader.contains("uniform float u_zoom = 2.5;"));
    let comment_start = shader.find("u_zoom").expect("zoom uniform");
    let line_end = shader[comment_start..].find('\n').unwrap() + comment_start;
    let line = &shader[comment_start..line_end];
    assert!(line.contains("\"max\":2.5"), "line: {}", line);
}

#[test]
fn scenario_wave_mode_selection() {
    // S6: mode 7 splices the double-line renderer; an unknown mode
    // falls back to the no-op renderer.
    let preset = PresetFile::parse("nWaveMode=7\n");
    let shader = translate("", "", &preset);
    assert!(shader.contains("// Mode 7: Double spectrum lines"));
    assert_eq!(shader.matches("float draw_wave(").count(), 1);

    let preset = PresetFile::parse("nWaveMode=99\n");
    let shader = translate("", "", &preset);
    assert_eq!(shader.matches("float draw_wave(").count(), 1);
    assert!(shader.contains("// Fallback waveform renderer"));
    assert!(shader.contains("return 0.0;"));
}

#[test]
fn translation_is_deterministic() {
    let preset = PresetFile::parse("nWaveMode=5\nzoom=1.3\n");
    let per_frame = "q1 = q1 + bass*0.1; zoom = zoom + 0.01*sin(time);";
    let per_pixel = "rot = rot + 0.002*sin(ang*3.0 + time);";
    let first = translate(per_frame, per_pixel, &preset);
    let second = translate(per_frame, per_pixel, &preset);
    assert_eq!(first, second);
}

#[test]
fn broken_statements_are_skipped_not_fatal() {
    let shader = translate(
        "zoom = 1.1; rot = ((; warp = 1.5;",
        "bad stuff here",
        &empty_preset(),
    );
    // Good statements survive.
    assert!(shader.contains("    zoom = 1.1;\n"));
    assert!(shader.contains("    warp = 1.5;\n"));
    // The broken ones are gone, and the shader is still complete.
    assert!(!shader.contains("rot = (("));
    assert!(shader.starts_with("#version 330 core"));
    assert!(shader.ends_with("}\n"));
}

#[test]
fn comments_and_continuations_normalized() {
    let shader = translate(
        "zoom = 1.2 // pulse in\nq1 = max(bass,\n treb)",
        "",
        &empty_preset(),
    );
    assert!(shader.contains("    zoom = 1.2;\n"));
    assert!(shader.contains("    q1 = max(iAudioBands.x, iAudioBands.z);\n"));
}

#[test]
fn per_pixel_color_aliases_rewrite() {
    let shader = translate("", "red = 1; alpha = 0.5;", &empty_preset());
    assert!(shader.contains("    pixelColor.r = 1.0;\n"));
    assert!(shader.contains("    pixelColor.a = 0.5;\n"));
}

#[test]
fn empty_preset_still_produces_complete_shader() {
    let shader = translate("", "", &empty_preset());
    assert!(shader.starts_with("#version 330 core"));
    assert!(shader.contains("void main() {"));
    assert!(shader.contains("FragColor = vec4("));
    assert!(shader.ends_with("}\n"));
}
