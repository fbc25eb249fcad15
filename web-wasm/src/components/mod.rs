pub mod header;
pub mod interactive_map;
pub mod legend;
pub mod map_controls;
pub mod report_details;
