//! End-to-end passes over slicer output files

use std::io::Write;

use slicekit_core::{Error, GcodeError, Rgb};
use slicekit_visualizer::{FeaturePalette, PrintData, PrintFileProcessor, ScanOptions};
use tempfile::NamedTempFile;

const PRUSA_SAMPLE: &str = "\
; generated by PrusaSlicer 2.6.1+linux-x64-GTK3 on 2023-09-14 at 10:21:33 UTC

;

; thumbnail begin 16x16 404
; iVBORw0KGgoAAAANSUhEUgAAABAAAAAQCAYAAAAf8/9hAAAA
; W0lEQVR4nGNgGAWjYBSMglEwCkbBKBgFwwAAgWAAAUOd7r8A
; thumbnail end
;

; external perimeters extrusion width = 0.45mm
M73 P0 R21
M201 X1000 Y1000 Z200 E5000
G90
M83
G28 W
G1 Z0.2 F720
G1 Y-3 F1000
G92 E0
;LAYER_CHANGE
;Z:0.2
;HEIGHT:0.2
G1 E-.8 F2100
G1 Z.4 F720
G0 X95.2 Y90.4
G1 Z.2
G1 E.8 F2100
;TYPE:Skirt/Brim
;WIDTH:0.42
G1 F1200
G1 X104.8 Y90.4 E.3
G1 X104.8 Y99.6 E.3
;TYPE:External perimeter
G1 X95.2 Y99.6 E.3
G1 X95.2 Y90.4 E.3
G1 E-.8 F2100
G0 X100 Y100
;TYPE:Solid infill
G1 X101 Y101 E.1
G0 X90 Y90
; Filament-specific end gcode
G1 X10 Y10 E2
M107

; filament used [mm] = 1047.32
; filament used [cm3] = 2.52
; filament used [g] = 3.12
; filament cost = 0.08
; total filament used [g] = 3.12
; total filament cost = 0.08
; estimated printing time (normal mode) = 21m 7s
; estimated printing time (silent mode) = 21m 30s
";

fn write_sample(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn process(text: &str, options: ScanOptions, palette: FeaturePalette) -> PrintData {
    let file = write_sample(text);
    PrintFileProcessor::process_file(file.path(), options, palette).unwrap()
}

#[test]
fn test_metadata_fields() {
    let data = process(PRUSA_SAMPLE, ScanOptions::default(), FeaturePalette::new());

    assert_eq!(
        data.thumbnail_image,
        "iVBORw0KGgoAAAANSUhEUgAAABAAAAAQCAYAAAAf8/9hAAAAW0lEQVR4nGNgGAWjYBSMglEwCkbBKBgFwwAAgWAAAUOd7r8A"
    );
    assert_eq!(data.estimated_printing_time, "21m 7s");
    assert_eq!(data.filament_amount_mm, "1047.32");
    assert_eq!(data.filament_amount_cm3, "2.52");
    // The later "total filament used [g]" line also matches and wins
    assert_eq!(data.filament_amount_g, "3.12");
    assert_eq!(data.filament_cost, "0.08");
}

#[test]
fn test_geometry_from_print_body() {
    let data = process(PRUSA_SAMPLE, ScanOptions::default(), FeaturePalette::new());

    // Accepted moves: Z0.2, Y-3, Z.4, X95.2/Y90.4, Z.2, two skirt moves,
    // two perimeter moves, X100/Y100, solid infill move, X90/Y90.
    assert_eq!(data.vertex_count(), 12);
    assert_eq!(data.pos_arr.len(), data.color_arr.len());

    // Y-3 is ignored, so vertex 1 stays at the Z0.2 position
    assert_eq!(&data.pos_arr[3..6], &[0.0, 0.0, 0.2]);
    // X95.2 is stored as 95.19 once floored to hundredths
    assert_eq!(&data.pos_arr[12..15], &[95.19, 90.4, 0.2]);
    assert_eq!(&data.pos_arr[15..18], &[104.8, 90.4, 0.2]);

    // Both runs anchor on vertex 4: the travel that ends the first run
    // is not an idle move.
    assert_eq!(data.index_arr, vec![4, 5, 5, 6, 6, 7, 7, 8, 4, 10]);
    assert!(data
        .index_arr
        .iter()
        .all(|&i| (i as usize) < data.vertex_count()));

    let skirt = Rgb::new(0.015, 0.721, 0.392).to_array();
    let perimeter = Rgb::new(0.96, 0.505, 0.019).to_array();
    let solid = Rgb::new(0.862, 0.058, 1.0).to_array();
    assert_eq!(&data.color_arr[0..3], &Rgb::WHITE.to_array());
    assert_eq!(&data.color_arr[5 * 3..6 * 3], &skirt);
    assert_eq!(&data.color_arr[7 * 3..8 * 3], &perimeter);
    assert_eq!(&data.color_arr[10 * 3..11 * 3], &solid);
}

#[test]
fn test_palette_override_applies() {
    let palette = FeaturePalette::new().with_color("Skirt/Brim", Rgb::new(0.0, 0.0, 0.0));
    let data = process(PRUSA_SAMPLE, ScanOptions::default(), palette);
    assert_eq!(&data.color_arr[5 * 3..6 * 3], &[0.0, 0.0, 0.0]);
}

#[test]
fn test_custom_end_marker() {
    let options = ScanOptions {
        gcode_end: ";TYPE:Solid infill".to_string(),
        ..ScanOptions::default()
    };
    let data = process(PRUSA_SAMPLE, options, FeaturePalette::new());
    assert_eq!(data.vertex_count(), 10);
}

#[test]
fn test_missing_file() {
    let result = PrintFileProcessor::process_file(
        "/definitely/not/here.gcode",
        ScanOptions::default(),
        FeaturePalette::new(),
    );
    assert!(matches!(
        result,
        Err(Error::Gcode(GcodeError::FileError { .. }))
    ));
}

#[test]
fn test_json_output_roundtrip() {
    let data = process(PRUSA_SAMPLE, ScanOptions::default(), FeaturePalette::new());
    let json = data.to_json(false).unwrap();
    let parsed: PrintData = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, data);
}

#[test]
fn test_overflowing_coordinates_keep_record_readable() {
    let options = ScanOptions {
        wait_for_thumbnail: false,
        ..ScanOptions::default()
    };
    let data = process(
        "G0 X10 Y10\nG1 X1e39 Y20 E1\nG0 Xinf Y5\n",
        options,
        FeaturePalette::new(),
    );

    assert_eq!(
        data.pos_arr,
        vec![10.0, 10.0, 0.0, 10.0, 20.0, 0.0, 10.0, 5.0, 0.0]
    );
    assert!(data.pos_arr.iter().all(|v| v.is_finite()));

    let json = data.to_json(false).unwrap();
    assert!(!json.contains("null"));
    let parsed: PrintData = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, data);
}
