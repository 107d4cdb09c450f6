//! Integration tests for the split pipeline

use bandkit::split::{DimensionSplitter, Region, SplitPipeline};
use bandkit::storage::{BandFileSink, BandFileSource, ChunkSource};
use bandkit::{BandError, BandKit, ChunkingConfig, Dimension, LabeledArray};

fn temp_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("bandkit_it_{}_{}.bsq", name, std::process::id()))
        .to_string_lossy()
        .to_string()
}

fn synthetic_raster(bands: usize, height: usize, width: usize) -> LabeledArray {
    let dims = vec![
        Dimension::new("band", (1..=bands).map(|b| format!("B{}", b)).collect()),
        Dimension::indexed("y", height),
        Dimension::indexed("x", width),
    ];
    let mut values = Vec::with_capacity(bands * height * width);
    for b in 0..bands {
        for y in 0..height {
            for x in 0..width {
                values.push((b * 100_000 + y * 100 + x) as f64);
            }
        }
    }
    LabeledArray::from_values(values, dims).unwrap()
}

fn write_band_file(path: &str, array: &LabeledArray) {
    let split = DimensionSplitter::split(array, "band").unwrap();
    let mut sink = BandFileSink::create(
        path,
        array.dims()[2].len() as u32,
        array.dims()[1].len() as u32,
        array.dims()[0].coords.clone(),
    )
    .unwrap();
    sink.write_all(&split).unwrap();
    sink.finish().unwrap();
}

#[test]
fn test_chunked_split_is_byte_identical_to_whole_array() {
    let array = synthetic_raster(3, 23, 17);

    let input = temp_path("equiv_in");
    write_band_file(&input, &array);

    // Whole-array reference: split fully in memory and write in one pass
    let reference = temp_path("equiv_ref");
    write_band_file(&reference, &array);

    // Chunked run through the out-of-core pipeline, with a strip height
    // that does not divide the plane evenly
    let chunked = temp_path("equiv_chunked");
    {
        let mut source = BandFileSource::open(&input).unwrap();
        let dims = source.dims().to_vec();
        let mut sink = BandFileSink::create(
            &chunked,
            dims[2].len() as u32,
            dims[1].len() as u32,
            dims[0].coords.clone(),
        )
        .unwrap();
        SplitPipeline::new()
            .with_chunk_rows(5)
            .run(&mut source, &mut sink, "band")
            .unwrap();
        sink.finish().unwrap();
    }

    let reference_bytes = std::fs::read(&reference).unwrap();
    let chunked_bytes = std::fs::read(&chunked).unwrap();
    assert_eq!(reference_bytes, chunked_bytes);

    for path in [&input, &reference, &chunked] {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_streamed_source_round_trips_values() {
    let array = synthetic_raster(2, 9, 6);
    let input = temp_path("stream");
    write_band_file(&input, &array);

    let mut source = BandFileSource::open(&input).unwrap();
    assert_eq!(source.dims()[0].coords, vec!["B1", "B2"]);

    // A partial strip carries the right values and coordinate labels
    let chunk = source.read_chunk(Region::new(0, 3, 6, 2)).unwrap();
    assert_eq!(chunk.data().shape(), &[2, 2, 6]);
    assert_eq!(chunk.dims()[1].coords, vec!["3", "4"]);
    assert_eq!(chunk.data()[[0, 0, 0]], 300.0);
    assert_eq!(chunk.data()[[1, 1, 5]], 100_405.0);

    let full = source.read_all().unwrap();
    assert_eq!(full, array);

    std::fs::remove_file(&input).ok();
}

#[test]
fn test_invalid_dimension_leaves_no_output() {
    let array = synthetic_raster(2, 6, 5);
    let input = temp_path("nodim_in");
    write_band_file(&input, &array);

    let output = temp_path("nodim_out");
    let log = std::env::temp_dir()
        .join(format!("bandkit_it_nodim_{}.log", std::process::id()));
    let kit = BandKit::new(log.to_str()).unwrap();

    let err = kit
        .split(&input, &output, "time", &ChunkingConfig::default())
        .unwrap_err();
    assert!(matches!(err, BandError::InvalidDimension(_)));
    assert!(!std::path::Path::new(&output).exists());

    std::fs::remove_file(&input).ok();
    std::fs::remove_file(&log).ok();
}

#[test]
fn test_small_cube_split_2x2x2() {
    // A[x,y,band] = x*10 + y + band*100 with band in {1, 2}
    let dims = vec![
        Dimension::indexed("x", 2),
        Dimension::indexed("y", 2),
        Dimension::new("band", vec!["1".to_string(), "2".to_string()]),
    ];
    let mut values = Vec::new();
    for x in 0..2 {
        for y in 0..2 {
            for band in 1..=2 {
                values.push((x * 10 + y + band * 100) as f64);
            }
        }
    }
    let array = LabeledArray::from_values(values, dims).unwrap();

    let result = DimensionSplitter::split(&array, "band").unwrap();
    assert_eq!(result.len(), 2);

    let one = result.attribute("1").unwrap();
    assert_eq!(one.values.shape(), &[2, 2]);
    assert_eq!(
        one.values.iter().copied().collect::<Vec<f64>>(),
        vec![100.0, 101.0, 110.0, 111.0]
    );

    let two = result.attribute("2").unwrap();
    assert_eq!(
        two.values.iter().copied().collect::<Vec<f64>>(),
        vec![200.0, 201.0, 210.0, 211.0]
    );
}
