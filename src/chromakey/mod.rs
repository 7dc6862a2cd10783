pub mod alpha;
pub mod box_filter;
pub mod extract;
pub mod keying;
pub mod rule;
pub mod summed_area_table;
