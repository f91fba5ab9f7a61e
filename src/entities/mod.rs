pub mod project_track;
