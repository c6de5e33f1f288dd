use edgemap_core::{
    DetectParams, EdgeDetector, GrayRaster, Pixel, Result, Segment, SegmentModel, MASK_FOREGROUND,
};
use edgemap_io::{pgm, ply, save_edge_map};
use std::fs;

/// Traces each column whose top sample reaches the threshold, top to bottom.
struct ColumnTracer;

impl EdgeDetector for ColumnTracer {
    fn detect(&self, raster: &GrayRaster, params: &DetectParams) -> Result<SegmentModel> {
        let (width, height) = raster.dimensions();
        let min_len = params.second_threshold.unwrap_or(1).max(1) as u32;
        let mut model = SegmentModel::new(width, height)?;
        // Soft map: copy the input so stale mask content is observable.
        model.mask_mut().copy_from_slice(raster.data());
        for col in 0..width {
            let len = (0..height)
                .take_while(|&row| {
                    raster
                        .get(row, col)
                        .is_some_and(|v| i32::from(v) >= params.threshold)
                })
                .count() as u32;
            if len >= min_len {
                model.push_segment((0..len).map(|row| Pixel::new(row, col)).collect())?;
            }
        }
        Ok(model)
    }
}

fn two_segment_model() -> SegmentModel {
    let first: Segment = [(1, 1), (1, 2)].into_iter().map(Pixel::from).collect();
    let second: Segment = [(3, 0), (3, 1), (3, 2)].into_iter().map(Pixel::from).collect();
    SegmentModel::from_segments(4, 4, [first, second]).expect("valid model")
}

#[test]
fn mesh_file_counts_and_faces() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("edges.ply");

    ply::export(&path, &two_segment_model()).expect("export ply");
    let text = fs::read_to_string(&path).expect("read ply");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "ply");
    assert!(lines.contains(&"element vertex 5"));
    assert!(lines.contains(&"element face 2"));

    let header_end = lines.iter().position(|l| *l == "end_header").expect("end_header");
    let vertices = &lines[header_end + 1..header_end + 6];
    assert!(vertices.iter().all(|v| v.split(' ').nth(1) == Some("0")));
    assert_eq!(&lines[header_end + 6..], &["2 0 1", "3 2 3 4"]);
}

#[test]
fn saved_edge_map_has_only_segment_pixels() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mask.pgm");

    let mut model = two_segment_model();
    model.mask_mut().fill(99);
    save_edge_map(&path, &mut model).expect("save edge map");

    let mask = pgm::read(&path).expect("read mask");
    assert_eq!(mask.dimensions(), (4, 4));
    assert_eq!(mask.count(MASK_FOREGROUND), 5);
    assert_eq!(mask.count(0), 11);
    assert_eq!(mask.get(3, 2), Some(MASK_FOREGROUND));
}

#[test]
fn detector_to_files_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("input.pgm");
    #[rustfmt::skip]
    let samples = vec![
        200,  10, 200,
        200,  10, 200,
        200,  10,  10,
    ];
    pgm::write(&input, &GrayRaster::from_data(3, 3, samples).unwrap()).expect("write input");

    let raster = pgm::read(&input).expect("read input");
    let params = DetectParams::new(100).with_second_threshold(2);
    let mut model = ColumnTracer.detect(&raster, &params).expect("detect");
    assert_eq!(model.segment_count(), 2);
    assert_eq!(model.total_pixels(), 5);

    // Soft map written as-is keeps the detector's content.
    let soft = dir.path().join("soft.pgm");
    pgm::write(&soft, model.mask()).expect("write soft map");
    assert_eq!(pgm::read(&soft).expect("read soft").data(), raster.data());

    let mask = dir.path().join("mask.pgm");
    save_edge_map(&mask, &mut model).expect("save edge map");
    assert_eq!(pgm::read(&mask).expect("read mask").count(MASK_FOREGROUND), 5);

    let mesh = dir.path().join("mesh.ply");
    ply::export(&mesh, &model).expect("export mesh");
    let text = fs::read_to_string(&mesh).expect("read mesh");
    assert!(text.ends_with("3 0 1 2\n2 3 4\n"));
    // Column 2, row 0 on a 3x3 grid: x = 2 - 1 + 0.5, z = 0 - 1 + 0.5.
    assert!(text.contains("\n1.500000 0 -0.500000\n"));
}
