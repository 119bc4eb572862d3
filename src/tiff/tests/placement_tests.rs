//! Tests for offset placement strategies

extern crate std;

use crate::tiff::errors::TiffError;
use crate::tiff::header::TiffVariant;
use crate::tiff::write::output_item::{ItemKind, OutputItem};
use crate::tiff::write::placement::{clip_regions, coalesce_regions, GapFilling, Placement, Region, Sequential};

fn items(lengths: &[u64]) -> Vec<OutputItem> {
    lengths.iter()
        .enumerate()
        .map(|(field, &length)| OutputItem::new(ItemKind::Value { directory: 0, field }, length))
        .collect()
}

fn offsets(items: &[OutputItem]) -> Vec<u64> {
    items.iter().map(|item| item.offset.unwrap()).collect()
}

fn regions(pairs: &[(u64, u64)]) -> Vec<Region> {
    pairs.iter().map(|&(offset, length)| Region::new(offset, length)).collect()
}

#[test]
fn test_sequential_pads_to_even_offsets() {
    let mut items = items(&[5, 4, 3]);
    let length = Sequential.place(&mut items, TiffVariant::Classic).unwrap();

    std::assert_eq!(offsets(&items), vec![8, 14, 18]);
    std::assert_eq!(length, 22);

    let mut items = self::items(&[5]);
    std::assert_eq!(Sequential.place(&mut items, TiffVariant::BigTiff).unwrap(), 22);
    std::assert_eq!(items[0].offset, Some(16));
}

#[test]
fn test_sequential_offset_range() {
    let huge = u32::MAX as u64 - 7;

    let mut classic = items(&[huge]);
    let error = Sequential.place(&mut classic, TiffVariant::Classic).unwrap_err();
    std::assert!(matches!(error, TiffError::OffsetRange { variant: TiffVariant::Classic, .. }));

    let mut big = items(&[huge]);
    std::assert_eq!(Sequential.place(&mut big, TiffVariant::BigTiff).unwrap(), 4294967304);
}

#[test]
fn test_coalesce_merges_close_elements() {
    let merged = coalesce_regions(regions(&[(100, 10), (113, 5), (8, 10), (50, 4), (57, 1)]));
    std::assert_eq!(merged, regions(&[(8, 10), (50, 8), (100, 18)]));

    // Overlapping elements collapse into the outer one
    let merged = coalesce_regions(regions(&[(8, 10), (12, 2)]));
    std::assert_eq!(merged, regions(&[(8, 10)]));
}

#[test]
fn test_clip_regions() {
    let clipped = clip_regions(regions(&[(0, 20), (30, 10), (95, 10)]), 16, 100);
    std::assert_eq!(clipped, regions(&[(16, 4), (30, 10), (95, 5)]));

    std::assert!(clip_regions(regions(&[(0, 8)]), 8, 100).is_empty());
}

#[test]
fn test_gap_filling_best_fit() {
    let placement = GapFilling::new(regions(&[(10, 40), (60, 20), (90, 30)]), 200);
    let mut items = items(&[18, 35, 25]);

    let length = placement.place(&mut items, TiffVariant::Classic).unwrap();
    std::assert_eq!(offsets(&items), vec![60, 10, 90]);
    std::assert_eq!(length, 200);
}

#[test]
fn test_gap_filling_reuses_remainders() {
    let placement = GapFilling::new(regions(&[(10, 20)]), 100);
    let mut items = items(&[10, 8]);

    std::assert_eq!(placement.place(&mut items, TiffVariant::Classic).unwrap(), 100);
    std::assert_eq!(offsets(&items), vec![10, 20]);
}

#[test]
fn test_gap_filling_odd_region_start() {
    // Ten bytes starting at 11 only hold nine once aligned
    let placement = GapFilling::new(regions(&[(11, 10)]), 50);
    let mut items = items(&[10, 9]);

    let length = placement.place(&mut items, TiffVariant::Classic).unwrap();
    std::assert_eq!(offsets(&items), vec![50, 12]);
    std::assert_eq!(length, 60);
}

#[test]
fn test_gap_filling_discards_trailing_regions() {
    let placement = GapFilling::new(regions(&[(8, 20), (80, 20)]), 100);
    let mut items = items(&[16, 15]);

    let length = placement.place(&mut items, TiffVariant::Classic).unwrap();
    std::assert_eq!(offsets(&items), vec![8, 80]);
    std::assert_eq!(length, 96);
}

#[test]
fn test_gap_filling_appends_at_even_offset() {
    let placement = GapFilling::new(regions(&[(8, 4)]), 101);
    let mut items = items(&[3, 7]);

    let length = placement.place(&mut items, TiffVariant::Classic).unwrap();
    std::assert_eq!(offsets(&items), vec![8, 102]);
    std::assert_eq!(length, 110);
}

#[test]
fn test_gap_filling_skips_placed_items() {
    let placement = GapFilling::new(regions(&[(20, 10)]), 64);
    let mut items = items(&[10, 6]);
    items[0].offset = Some(40);
    items[0].preserved = true;

    std::assert_eq!(placement.place(&mut items, TiffVariant::Classic).unwrap(), 64);
    std::assert_eq!(offsets(&items), vec![40, 20]);
}
