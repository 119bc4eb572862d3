//! Offset assignment strategies
//!
//! A placement strategy sees only item lengths. [`Sequential`] lays items
//! out one after another behind the header. [`GapFilling`] reuses the byte
//! ranges an existing file spent on structures that are being rewritten,
//! and only appends what does not fit.

use log::{debug, trace};

use crate::tiff::errors::TiffResult;
use crate::tiff::header::TiffVariant;
use crate::tiff::validation;
use crate::tiff::write::output_item::OutputItem;
use crate::utils::write_utils;

/// Gap tolerated between two elements that still form one reusable region
pub(crate) const COALESCE_TOLERANCE: u64 = 3;

/// Assigns offsets to output items
pub(crate) trait Placement {
    /// Places every item that has no offset yet and returns the output length
    fn place(&self, items: &mut [OutputItem], variant: TiffVariant) -> TiffResult<u64>;
}

/// Forward placement starting right after the header
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Sequential;

impl Placement for Sequential {
    fn place(&self, items: &mut [OutputItem], variant: TiffVariant) -> TiffResult<u64> {
        let mut offset = variant.header_size();
        for item in items.iter_mut() {
            item.offset = Some(offset);
            offset = validation::advance_offset(offset, item.length, variant)?;
            offset = validation::advance_offset(offset, write_utils::calculate_padding(item.length), variant)?;
        }
        Ok(offset)
    }
}

/// A reusable byte range of the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Region {
    pub offset: u64,
    pub length: u64,
}

impl Region {
    pub fn new(offset: u64, length: u64) -> Self {
        Region { offset, length }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.length)
    }

    /// First even offset inside the region
    fn aligned_offset(&self) -> u64 {
        write_utils::align_to_word(self.offset)
    }

    /// Room left once the start is moved to an even offset
    fn usable_length(&self) -> u64 {
        self.length.saturating_sub(write_utils::calculate_padding(self.offset))
    }
}

/// Merges elements separated by at most [`COALESCE_TOLERANCE`] bytes
///
/// The result is sorted by offset and contains no overlapping regions.
pub(crate) fn coalesce_regions(mut elements: Vec<Region>) -> Vec<Region> {
    elements.sort_by_key(|e| (e.offset, e.length));

    let mut regions: Vec<Region> = Vec::new();
    for element in elements {
        match regions.last_mut() {
            Some(current) if element.offset.saturating_sub(current.end()) <= COALESCE_TOLERANCE => {
                let end = current.end().max(element.end());
                current.length = end - current.offset;
            }
            _ => regions.push(element),
        }
    }
    regions
}

/// Restricts regions to `start..end`, dropping those left empty
pub(crate) fn clip_regions(regions: Vec<Region>, start: u64, end: u64) -> Vec<Region> {
    regions.into_iter()
        .filter_map(|region| {
            let offset = region.offset.max(start);
            let region_end = region.end().min(end);
            (region_end > offset).then(|| Region::new(offset, region_end - offset))
        })
        .collect()
}

/// Best-fit placement into the free regions of an existing file
#[derive(Debug, Clone)]
pub(crate) struct GapFilling {
    regions: Vec<Region>,
    original_length: u64,
}

impl GapFilling {
    pub fn new(regions: Vec<Region>, original_length: u64) -> Self {
        GapFilling { regions, original_length }
    }
}

impl Placement for GapFilling {
    /// Largest items are placed first, each into the smallest region that
    /// holds it once its start is aligned. A region's unused remainder
    /// stays available. Regions reaching the end of the original file are
    /// given up so the file can shrink; items that fit nowhere are
    /// appended at the end.
    fn place(&self, items: &mut [OutputItem], variant: TiffVariant) -> TiffResult<u64> {
        let mut regions = self.regions.clone();
        regions.sort_by_key(|r| r.offset);

        let mut end = self.original_length;
        while let Some(last) = regions.last().copied() {
            if last.end() != end {
                break;
            }
            trace!("Discarding trailing region {}..{}", last.offset, last.end());
            end = last.offset;
            regions.pop();
        }

        let mut unplaced: Vec<usize> = (0..items.len()).filter(|&i| items[i].offset.is_none()).collect();
        unplaced.sort_by(|&a, &b| items[b].length.cmp(&items[a].length));

        let mut appended = false;
        for index in unplaced {
            let length = items[index].length;
            let best_fit = regions.iter()
                .enumerate()
                .filter(|(_, region)| region.usable_length() >= length)
                .min_by_key(|(_, region)| (region.usable_length(), region.offset))
                .map(|(position, _)| position);

            match best_fit {
                Some(position) => {
                    let region = regions.swap_remove(position);
                    let offset = validation::checked_offset(region.aligned_offset(), variant)?;
                    items[index].offset = Some(offset);

                    let item_end = offset + length;
                    if region.end() > item_end {
                        regions.push(Region::new(item_end, region.end() - item_end));
                    }
                    trace!("Placed {} ({} bytes) in gap at {}", items[index].description(), length, offset);
                }
                None => {
                    let offset = validation::advance_offset(end, write_utils::calculate_padding(end), variant)?;
                    items[index].offset = Some(offset);
                    end = validation::advance_offset(offset, length, variant)?;
                    appended = true;
                    trace!("Appended {} ({} bytes) at {}", items[index].description(), length, offset);
                }
            }
        }

        if appended {
            end = validation::advance_offset(end, write_utils::calculate_padding(end), variant)?;
        }
        debug!("Gap-filling placement: output length {} (original {})", end, self.original_length);
        Ok(end)
    }
}
