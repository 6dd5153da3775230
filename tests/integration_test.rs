//! Integration tests for the rasterscan library facade

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use rasterscan::io::byte_order::ByteOrder;
use rasterscan::io::raw::RawRasterSpec;
use rasterscan::utils::config::ScanConfig;
use rasterscan::utils::progress::ProgressTracker;
use rasterscan::{ElementType, Location, PartitionPolicy, RasterScan, ScanError};

#[test]
fn test_config_parsing() {
    let config = ScanConfig::from_str(r#"
        [partition]
        policy = "tiles"
        tile_width = 64
        tile_height = 32
        threads = 2

        [source]
        extension = ".tif"
        natural_sort = false
        frame_delay_ms = 40

        [output]
        format = "JSON"
    "#).unwrap();

    assert_eq!(config.partition, PartitionPolicy::Tiles { width: 64, height: 32 });
    assert_eq!(config.threads, Some(2));
    assert_eq!(config.extension, ".tif");
    assert!(!config.natural_sort);
    assert_eq!(config.frame_delay, Duration::from_millis(40));
    assert_eq!(config.output_format, "json");

    let partitioner = config.build_partitioner().unwrap();
    assert_eq!(partitioner.parallelism(), 2);
}

#[test]
fn test_config_defaults_and_errors() {
    assert_eq!(ScanConfig::from_str("").unwrap(), ScanConfig::default());

    let invalid = [
        "[partition\npolicy = 1",
        "[partition]\npolicy = \"spiral\"",
        "[partition]\npolicy = \"strips\"\nstrips = 0",
        "[partition]\npolicy = \"tiles\"\ntile_width = 0",
        "[source]\nnatural_sort = \"yes\"",
        "[source]\nframe_delay_ms = -5",
        "[output]\nformat = \"xml\"",
    ];
    for content in invalid {
        assert!(
            matches!(ScanConfig::from_str(content), Err(ScanError::ConfigError(_))),
            "expected a config error for {:?}", content
        );
    }
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rasterscan.toml");
    fs::write(&path, "[partition]\npolicy = \"strips\"\nstrips = 3\n").unwrap();

    let config = ScanConfig::from_file(path.to_str().unwrap()).unwrap();
    assert_eq!(config.partition, PartitionPolicy::Strips(3));

    let missing = ScanConfig::from_file(dir.path().join("missing.toml").to_str().unwrap());
    assert!(matches!(missing, Err(ScanError::IoError(_))));
}

#[test]
fn test_scan_raw_big_endian_file_with_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("frame.raw");

    // 4-byte header, then a 3x2 u16 raster with rows padded to 8 bytes
    let mut bytes = vec![0xEE; 4];
    for row in [[0u16, 300, 0], [7, 0, 0]] {
        for value in row {
            bytes.extend_from_slice(&value.to_be_bytes());
        }
        bytes.extend_from_slice(&[0xFF, 0xFF]);
    }
    fs::write(&path, &bytes).unwrap();

    let mut spec = RawRasterSpec::new(3, 2, ElementType::U16);
    spec.byte_order = ByteOrder::BigEndian;
    spec.stride = Some(8);
    spec.header_len = 4;

    let scanner = RasterScan::new(None).unwrap();
    let mut output = scanner.scan_raw(path.to_str().unwrap(), &spec).unwrap();
    output.sort_row_major();

    let (locations, values) = output.into_typed::<u16>().unwrap();
    assert_eq!(locations, vec![Location::new(1, 0), Location::new(0, 1)]);
    assert_eq!(values, vec![300, 7]);
}

#[test]
fn test_scan_raw_short_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.raw");
    fs::write(&path, [0u8; 10]).unwrap();

    let scanner = RasterScan::new(None).unwrap();
    let result = scanner.scan_raw(path.to_str().unwrap(), &RawRasterSpec::new(4, 4, ElementType::U8));
    assert!(matches!(result, Err(ScanError::InvalidRaster(_))));
}

#[test]
fn test_scan_image_writes_log_file() {
    let dir = TempDir::new().unwrap();
    let image_path = dir.path().join("mask.png");
    let log_path = dir.path().join("scan.log");

    let mut image = image::GrayImage::new(5, 4);
    image.put_pixel(4, 0, image::Luma([1]));
    image.put_pixel(1, 3, image::Luma([255]));
    image.save(&image_path).unwrap();

    let scanner = RasterScan::new(Some(log_path.to_str().unwrap())).unwrap();
    let output = scanner.scan_image(image_path.to_str().unwrap()).unwrap();

    assert_eq!(output.element_type, ElementType::U8);
    assert_eq!(output.len(), 2);
    assert!(output.complete);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("2 non-zero u8 samples"));
}

#[test]
fn test_scan_rgb_image_is_rejected() {
    let dir = TempDir::new().unwrap();
    let image_path = dir.path().join("color.png");
    image::RgbImage::new(2, 2).save(&image_path).unwrap();

    let scanner = RasterScan::new(None).unwrap();
    let result = scanner.scan_image(image_path.to_str().unwrap());
    assert!(matches!(result, Err(ScanError::UnsupportedImageLayout(_))));
}

#[test]
fn test_scan_directory_reports_every_frame() {
    let dir = TempDir::new().unwrap();
    for (name, set) in [("frame10.png", 3u32), ("frame2.png", 1), ("frame1.png", 0)] {
        let mut image = image::GrayImage::new(4, 4);
        for i in 0..set {
            image.put_pixel(i, i, image::Luma([9]));
        }
        image.save(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("frame5.png"), b"not a png").unwrap();
    fs::write(dir.path().join("readme.txt"), b"ignored").unwrap();

    let config = ScanConfig {
        partition: PartitionPolicy::Tiles { width: 3, height: 3 },
        ..ScanConfig::default()
    };
    let scanner = RasterScan::new(None).unwrap().with_config(config);
    let scans = scanner.scan_directory(dir.path(), &ProgressTracker::hidden()).unwrap();

    let labels: Vec<&str> = scans.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["frame1.png", "frame2.png", "frame5.png", "frame10.png"]);

    let counts: Vec<Option<usize>> = scans
        .iter()
        .map(|s| s.outcome.as_ref().ok().map(|output| output.len()))
        .collect();
    assert_eq!(counts, vec![Some(0), Some(1), None, Some(3)]);
    assert_eq!(scans[2].index, 2);
}

#[test]
fn test_save_output_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("samples.csv");

    let raster = rasterscan::RasterBuffer::from_elements::<i8>(3, 1, &[0, -4, 2]).unwrap();
    let scanner = RasterScan::new(None).unwrap();
    let output = scanner.scan_raster(&raster).unwrap();
    output.save_to_file(path.to_str().unwrap(), "csv").unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "x,y,value\n1,0,-4\n2,0,2\n");
}

#[test]
fn test_bundled_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/rasterscan.toml");
    let config = ScanConfig::from_file(path).unwrap();
    assert_eq!(config.partition, PartitionPolicy::Auto);
    assert_eq!(config.threads, None);
    assert_eq!(config.output_format, "csv");
}
