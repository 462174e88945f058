use anyhow::{anyhow, Result};
use log::debug;

use crate::table::{END_MARKER, INDENT, START_MARKER};

/// Byte span of a marker region: from the start of the start-marker line to
/// the end of the end-marker line, terminator excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRegion {
    pub start: usize,
    pub end: usize,
}

struct Line<'a> {
    offset: usize,
    content: &'a str,
}

fn lines_with_offsets(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split_inclusive('\n').scan(0, |offset, raw| {
        let line = Line {
            offset: *offset,
            content: raw
                .strip_suffix('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .unwrap_or(raw),
        };
        *offset += raw.len();
        Some(line)
    })
}

/// Finds the first start-marker line and the last end-marker line after it.
pub fn find_region(template: &str) -> Result<MarkerRegion> {
    let start_line = format!("{}{}", INDENT, START_MARKER);
    let end_line = format!("{}{}", INDENT, END_MARKER);

    let lines: Vec<Line> = lines_with_offsets(template).collect();
    let start_idx = lines
        .iter()
        .position(|line| line.content == start_line)
        .ok_or_else(|| anyhow!("No {:?} line found in template.", start_line))?;
    let end = lines[start_idx + 1..]
        .iter()
        .rev()
        .find(|line| line.content == end_line)
        .ok_or_else(|| anyhow!("No {:?} line found after {:?}.", end_line, start_line))?;

    let region = MarkerRegion {
        start: lines[start_idx].offset,
        end: end.offset + end.content.len(),
    };
    debug!("Marker region: {:?}", region);
    Ok(region)
}

/// Replaces the template's marker region, markers included, with `block`.
///
/// Everything outside the region is kept byte for byte.
pub fn splice(template: &str, block: &str) -> Result<String> {
    let region = find_region(template)?;
    let mut spliced =
        String::with_capacity(template.len() - (region.end - region.start) + block.len());
    spliced.push_str(&template[..region.start]);
    spliced.push_str(block);
    spliced.push_str(&template[region.end..]);
    Ok(spliced)
}
